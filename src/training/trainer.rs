// src/training/trainer.rs
use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use super::dataset::SkillDataset;
use super::metrics::accuracy;
use crate::config::{ArtifactPaths, TrainingConfig};
use crate::model::{
    CountVectorizer, ForestParams, LabelEncoder, RandomForest, SparseVector, TrainTestSplit,
    TrainedArtifacts,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingReport {
    pub rows: usize,
    pub classes: usize,
    pub vocabulary: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    pub holdout_accuracy: f64,
}

pub struct Trainer {
    paths: ArtifactPaths,
    config: TrainingConfig,
}

impl Trainer {
    pub fn new(paths: ArtifactPaths, config: TrainingConfig) -> Self {
        Self { paths, config }
    }

    /// Fit on the processed dataset and replace the persisted artifacts
    pub fn run(&self) -> Result<TrainingReport> {
        self.config.validate()?;

        let dataset = SkillDataset::load(&self.paths.processed_data)?;
        let (artifacts, report) = Self::fit(&dataset, &self.config)?;

        artifacts
            .save(&self.paths)
            .context("Failed to persist trained artifacts")?;

        info!(
            "Model training completed. Model saved in: {}",
            self.paths.models_dir.display()
        );
        Ok(report)
    }

    pub fn fit(
        dataset: &SkillDataset,
        config: &TrainingConfig,
    ) -> Result<(TrainedArtifacts, TrainingReport)> {
        let label_encoder = LabelEncoder::fit(dataset.job_titles());
        let y = label_encoder.encode_all(dataset.job_titles())?;

        let vectorizer = CountVectorizer::fit(dataset.skills())?;
        let x = vectorizer.transform_all(dataset.skills());

        info!(
            "Fitted label encoder ({} job titles) and vectorizer ({} terms)",
            label_encoder.len(),
            vectorizer.len()
        );

        let split = TrainTestSplit::new(dataset.len(), config.test_fraction, config.seed)
            .context("Not enough rows to hold out a test split")?;
        let x_train: Vec<SparseVector> = TrainTestSplit::select(&x, &split.train);
        let y_train: Vec<u32> = TrainTestSplit::select(&y, &split.train);

        let classifier = RandomForest::fit(
            &x_train,
            &y_train,
            label_encoder.len(),
            vectorizer.len(),
            &ForestParams::from(config),
        )?;

        let y_test: Vec<u32> = TrainTestSplit::select(&y, &split.test);
        let y_pred: Vec<u32> = split.test.iter().map(|&i| classifier.predict(&x[i])).collect();
        let holdout_accuracy = accuracy(&y_test, &y_pred);

        info!(
            trees = classifier.n_trees(),
            train_rows = split.train.len(),
            test_rows = split.test.len(),
            "Holdout accuracy: {:.4}",
            holdout_accuracy
        );

        let report = TrainingReport {
            rows: dataset.len(),
            classes: label_encoder.len(),
            vocabulary: vectorizer.len(),
            train_rows: split.train.len(),
            test_rows: split.test.len(),
            holdout_accuracy,
        };

        Ok((
            TrainedArtifacts {
                vectorizer,
                label_encoder,
                classifier,
            },
            report,
        ))
    }
}
