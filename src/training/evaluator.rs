// src/training/evaluator.rs
use anyhow::{Context, Result};
use tracing::info;

use super::dataset::SkillDataset;
use super::metrics::ClassificationReport;
use crate::config::{ArtifactPaths, TrainingConfig};
use crate::model::{TrainTestSplit, TrainedArtifacts};

/// Scores persisted artifacts on the trainer's holdout rows.
///
/// The split is rebuilt from the same row count, fraction and seed, so the
/// configuration must match the one used for training.
pub struct Evaluator {
    paths: ArtifactPaths,
    config: TrainingConfig,
}

impl Evaluator {
    pub fn new(paths: ArtifactPaths, config: TrainingConfig) -> Self {
        Self { paths, config }
    }

    pub fn run(&self) -> Result<ClassificationReport> {
        let dataset = SkillDataset::load(&self.paths.processed_data)?;
        let artifacts = TrainedArtifacts::load(&self.paths)
            .context("Failed to load trained artifacts; run the train step first")?;

        let report = Self::evaluate(&artifacts, &dataset, &self.config)?;
        info!("Model accuracy: {:.4}", report.accuracy);
        Ok(report)
    }

    pub fn evaluate(
        artifacts: &TrainedArtifacts,
        dataset: &SkillDataset,
        config: &TrainingConfig,
    ) -> Result<ClassificationReport> {
        let x = artifacts.vectorizer.transform_all(dataset.skills());
        let y = artifacts
            .label_encoder
            .encode_all(dataset.job_titles())
            .context("Dataset contains job titles the model was not trained on")?;

        let split = TrainTestSplit::new(dataset.len(), config.test_fraction, config.seed)?;

        let mut y_true = Vec::with_capacity(split.test.len());
        let mut y_pred = Vec::with_capacity(split.test.len());
        for &i in &split.test {
            let predicted = artifacts.classifier.predict(&x[i]);
            y_true.push(decode(artifacts, y[i])?);
            y_pred.push(decode(artifacts, predicted)?);
        }

        ClassificationReport::from_predictions(&y_true, &y_pred)
    }
}

fn decode(artifacts: &TrainedArtifacts, id: u32) -> Result<&str> {
    artifacts
        .label_encoder
        .decode(id)
        .ok_or_else(|| anyhow::anyhow!("class id {} has no job title", id))
}
