// src/model/artifacts.rs
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tracing::info;

use super::{CountVectorizer, LabelEncoder, RandomForest};
use crate::config::ArtifactPaths;
use crate::core::FsOps;

/// Everything the trainer produces and the predictor consumes
#[derive(Debug, Clone, PartialEq)]
pub struct TrainedArtifacts {
    pub vectorizer: CountVectorizer,
    pub label_encoder: LabelEncoder,
    pub classifier: RandomForest,
}

impl TrainedArtifacts {
    /// Persist all three artifacts, each replacing any previous version
    pub fn save(&self, paths: &ArtifactPaths) -> Result<()> {
        FsOps::ensure_dir_exists(&paths.models_dir)?;

        write_json(&paths.label_encoder_path(), &self.label_encoder)?;
        write_json(&paths.vectorizer_path(), &self.vectorizer)?;
        write_json(&paths.model_path(), &self.classifier)?;

        info!("Artifacts saved in: {}", paths.models_dir.display());
        Ok(())
    }

    pub fn load(paths: &ArtifactPaths) -> Result<Self> {
        let vectorizer: CountVectorizer = read_json(&paths.vectorizer_path())?;
        let label_encoder: LabelEncoder = read_json(&paths.label_encoder_path())?;
        let classifier: RandomForest = read_json(&paths.model_path())?;

        let artifacts = Self {
            vectorizer,
            label_encoder,
            classifier,
        };
        artifacts.check_consistency()?;

        info!(
            "Model, vectorizer and label encoder loaded ({} classes, {} terms, {} trees)",
            artifacts.label_encoder.len(),
            artifacts.vectorizer.len(),
            artifacts.classifier.n_trees()
        );
        Ok(artifacts)
    }

    /// Artifacts from different training runs must not be mixed
    pub fn check_consistency(&self) -> Result<()> {
        self.classifier
            .validate()
            .context("Classifier artifact is corrupt")?;

        if self.classifier.n_classes() != self.label_encoder.len() {
            anyhow::bail!(
                "Classifier knows {} classes but the label encoder has {}; retrain the model",
                self.classifier.n_classes(),
                self.label_encoder.len()
            );
        }
        if self.classifier.n_features() != self.vectorizer.len() {
            anyhow::bail!(
                "Classifier expects {} features but the vectorizer has {} terms; retrain the model",
                self.classifier.n_features(),
                self.vectorizer.len()
            );
        }
        Ok(())
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let bytes = serde_json::to_vec(value)
        .with_context(|| format!("Failed to serialize {}", path.display()))?;
    FsOps::write_file_atomic(path, &bytes)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = FsOps::read_file_safe(path)?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ForestParams;

    fn small_artifacts() -> TrainedArtifacts {
        let docs = ["python sql", "excel powerpoint", "python statistics"];
        let vectorizer = CountVectorizer::fit(docs).unwrap();
        let titles = ["Data Scientist", "Business Analyst", "Data Scientist"];
        let label_encoder = LabelEncoder::fit(titles);
        let x = vectorizer.transform_all(docs);
        let y = label_encoder.encode_all(titles).unwrap();
        let params = ForestParams {
            n_trees: 5,
            seed: 42,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
        };
        let classifier =
            RandomForest::fit(&x, &y, label_encoder.len(), vectorizer.len(), &params).unwrap();

        TrainedArtifacts {
            vectorizer,
            label_encoder,
            classifier,
        }
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ArtifactPaths::rooted_at(dir.path());
        let artifacts = small_artifacts();

        artifacts.save(&paths).unwrap();
        assert!(paths.model_path().exists());

        let loaded = TrainedArtifacts::load(&paths).unwrap();
        assert_eq!(loaded, artifacts);
    }

    #[test]
    fn test_mismatched_encoder_is_rejected() {
        let mut artifacts = small_artifacts();
        artifacts.label_encoder = LabelEncoder::fit(["Only One"]);
        assert!(artifacts.check_consistency().is_err());
    }
}
