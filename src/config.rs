// src/config.rs
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const VECTORIZER_FILE: &str = "vectorizer.json";
const LABEL_ENCODER_FILE: &str = "label_encoder.json";
const MODEL_FILE: &str = "career_recommendation_model.json";

/// On-disk layout of every file the pipeline reads or writes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactPaths {
    pub raw_data: PathBuf,
    pub processed_data: PathBuf,
    pub models_dir: PathBuf,
    pub market_data: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            raw_data: PathBuf::from("data/skills_data.csv"),
            processed_data: PathBuf::from("data/processed_data/processed_skills_data.csv"),
            models_dir: PathBuf::from("data/models"),
            market_data: PathBuf::from("data/market_data.csv"),
        }
    }
}

impl ArtifactPaths {
    /// Default layout rooted at `root` instead of the working directory
    pub fn rooted_at(root: &Path) -> Self {
        Self::default().resolve_against(root)
    }

    pub fn with_raw_data(mut self, path: PathBuf) -> Self {
        self.raw_data = path;
        self
    }

    pub fn with_processed_data(mut self, path: PathBuf) -> Self {
        self.processed_data = path;
        self
    }

    pub fn with_models_dir(mut self, dir: PathBuf) -> Self {
        self.models_dir = dir;
        self
    }

    pub fn with_market_data(mut self, path: PathBuf) -> Self {
        self.market_data = path;
        self
    }

    pub fn vectorizer_path(&self) -> PathBuf {
        self.models_dir.join(VECTORIZER_FILE)
    }

    pub fn label_encoder_path(&self) -> PathBuf {
        self.models_dir.join(LABEL_ENCODER_FILE)
    }

    pub fn model_path(&self) -> PathBuf {
        self.models_dir.join(MODEL_FILE)
    }

    /// Make every relative path absolute against `base`
    pub fn resolve_against(self, base: &Path) -> Self {
        let resolve = |p: PathBuf| if p.is_absolute() { p } else { base.join(p) };
        Self {
            raw_data: resolve(self.raw_data),
            processed_data: resolve(self.processed_data),
            models_dir: resolve(self.models_dir),
            market_data: resolve(self.market_data),
        }
    }
}

/// Hyper-parameters for the trainer and the evaluator's split
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub n_trees: usize,
    pub seed: u64,
    pub test_fraction: f64,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            seed: 42,
            test_fraction: 0.2,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
        }
    }
}

impl TrainingConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.n_trees == 0 {
            anyhow::bail!("n_trees must be at least 1");
        }
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            anyhow::bail!(
                "test_fraction must be strictly between 0 and 1, got {}",
                self.test_fraction
            );
        }
        if self.min_samples_split < 2 {
            anyhow::bail!("min_samples_split must be at least 2");
        }
        if self.min_samples_leaf < 1 {
            anyhow::bail!("min_samples_leaf must be at least 1");
        }
        Ok(())
    }
}
