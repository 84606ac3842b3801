// src/recommendation/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Everything `recommend` can fail with; every variant renders as the
/// message shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecommendError {
    #[error("No skills provided.")]
    NoSkills,

    #[error("Model files not found! Please train the model first using the `train` command.")]
    ModelNotFound(PathBuf),

    #[error("Failed to load model artifacts: {0}")]
    ArtifactLoad(String),

    #[error("Market data file not found!")]
    MarketDataNotFound(PathBuf),

    #[error("Failed to read market data: {0}")]
    MarketDataUnreadable(String),

    #[error("Required columns missing in market data.")]
    MissingColumns,

    #[error("No matching job found for the prediction.")]
    NoMatchingJob(u32),
}

impl RecommendError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoSkills => "NO_SKILLS",
            Self::ModelNotFound(_) => "MODEL_NOT_FOUND",
            Self::ArtifactLoad(_) => "MODEL_LOAD_FAILED",
            Self::MarketDataNotFound(_) => "MARKET_DATA_NOT_FOUND",
            Self::MarketDataUnreadable(_) => "MARKET_DATA_UNREADABLE",
            Self::MissingColumns => "MARKET_DATA_COLUMNS_MISSING",
            Self::NoMatchingJob(_) => "NO_MATCHING_JOB",
        }
    }

    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::NoSkills => vec!["Enter your skills as a comma-separated list".to_string()],
            Self::ModelNotFound(_) | Self::ArtifactLoad(_) => vec![
                "Run the preprocess and train commands".to_string(),
                "Check the configured models directory".to_string(),
            ],
            Self::MarketDataNotFound(_) | Self::MarketDataUnreadable(_) | Self::MissingColumns => {
                vec!["Check the market data CSV for 'Job Id' and 'Job Title' columns".to_string()]
            }
            Self::NoMatchingJob(_) => {
                vec!["The market data has no row for the predicted job id; refresh it".to_string()]
            }
        }
    }
}
