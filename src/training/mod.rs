// src/training/mod.rs
//! Offline stages: preprocess the raw dataset, train, evaluate

pub mod dataset;
pub mod evaluator;
pub mod metrics;
pub mod preprocess;
pub mod trainer;

pub use dataset::{SkillDataset, SkillRecord};
pub use evaluator::Evaluator;
pub use metrics::ClassificationReport;
pub use preprocess::{PreprocessReport, Preprocessor};
pub use trainer::{Trainer, TrainingReport};
