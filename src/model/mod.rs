// src/model/mod.rs
//! Text features, label encoding and the forest classifier

pub mod artifacts;
pub mod forest;
pub mod label_encoder;
pub mod sparse;
pub mod split;
pub mod tree;
pub mod vectorizer;

pub use artifacts::TrainedArtifacts;
pub use forest::{ForestParams, RandomForest};
pub use label_encoder::LabelEncoder;
pub use sparse::SparseVector;
pub use split::TrainTestSplit;
pub use vectorizer::CountVectorizer;
