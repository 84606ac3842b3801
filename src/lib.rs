//! Job-title recommendation from a free-text skill list.
//!
//! Offline, [`training::Preprocessor`] cleans the raw skills dataset and
//! [`training::Trainer`] fits a bag-of-words vectorizer, a label encoder and a
//! random forest over it. Online, [`recommendation::Recommender`] loads those
//! artifacts once together with the market reference table and answers
//! [`recommendation::Recommender::recommend`] calls.

pub mod config;
pub mod core;
pub mod environment;
pub mod model;
pub mod recommendation;
pub mod training;
pub mod utils;
pub mod web;

pub use config::{ArtifactPaths, TrainingConfig};
pub use environment::EnvironmentConfig;
pub use recommendation::{
    recommend, RecommendError, RecommendOutcome, RecommendationResult, Recommender,
};
pub use web::start_web_server;
