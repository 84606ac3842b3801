// src/recommendation/mod.rs
//! Online job-title recommendation over the trained artifacts

pub mod error;
pub mod market;
pub mod types;

pub use error::RecommendError;
pub use market::{MarketData, MarketInsights};
pub use types::{RecommendOutcome, RecommendationResult};

use std::path::Path;
use tracing::{debug, info};

use crate::config::ArtifactPaths;
use crate::core::FsOps;
use crate::model::TrainedArtifacts;
use crate::utils::{skills_document, to_percent_one_decimal};

const SKILLS_IMPROVEMENT: &str =
    "Consider improving your communication, teamwork, and leadership skills.";
const NO_INSIGHTS: &str = "No additional insights available.";
const NOT_AVAILABLE: &str = "N/A";
const SENTINEL_TITLE: &str = "Data Analyst";

/// Loaded artifacts plus market table, shared read-only across requests
pub struct Recommender {
    artifacts: TrainedArtifacts,
    market: MarketData,
}

impl Recommender {
    pub fn new(artifacts: TrainedArtifacts, market: MarketData) -> Self {
        Self { artifacts, market }
    }

    /// Load everything once, failing fast on missing files
    pub fn load(paths: &ArtifactPaths) -> Result<Self, RecommendError> {
        let artifact_files = [
            paths.model_path(),
            paths.vectorizer_path(),
            paths.label_encoder_path(),
        ];
        let artifact_refs: Vec<&Path> = artifact_files.iter().map(|p| p.as_path()).collect();
        if let Some(missing) = FsOps::first_missing(&artifact_refs) {
            return Err(RecommendError::ModelNotFound(missing.to_path_buf()));
        }

        let artifacts = TrainedArtifacts::load(paths)
            .map_err(|e| RecommendError::ArtifactLoad(format!("{:#}", e)))?;
        let market = MarketData::load(&paths.market_data)?;

        Ok(Self::new(artifacts, market))
    }

    pub fn recommend(&self, skills_input: &str) -> Result<RecommendationResult, RecommendError> {
        if !self.market.has_required_columns() {
            return Err(RecommendError::MissingColumns);
        }

        let document = skills_document(skills_input).ok_or(RecommendError::NoSkills)?;
        let features = self.artifacts.vectorizer.transform(&document);
        if features.is_zero() {
            debug!("No input skill is in the vocabulary: {}", document);
        }

        let (class_id, probability) = self.artifacts.classifier.predict_with_probability(&features);
        let confidence = to_percent_one_decimal(probability);

        let job_title = self
            .market
            .title_for_id(class_id)
            .ok_or(RecommendError::NoMatchingJob(class_id))?
            .to_string();

        debug!(
            class_id,
            trained_label = self.artifacts.label_encoder.decode(class_id).unwrap_or_default(),
            "Resolved prediction to market title {}",
            job_title
        );

        let insights = self.market.insights_for_title(&job_title);
        let (avg_salary, demand_level, market_insights) = match insights {
            Some(insights) => (
                insights.salary_range.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                insights.demand_level.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                format_details(&insights.details),
            ),
            None => (
                NOT_AVAILABLE.to_string(),
                NOT_AVAILABLE.to_string(),
                NO_INSIGHTS.to_string(),
            ),
        };

        info!("Recommended '{}' with {:.1}% confidence", job_title, confidence);

        Ok(RecommendationResult {
            alternative_jobs: alternative_jobs(&job_title),
            job_title,
            confidence,
            avg_salary,
            demand_level,
            market_insights,
            skills_improvement: SKILLS_IMPROVEMENT.to_string(),
        })
    }

    pub fn artifacts(&self) -> &TrainedArtifacts {
        &self.artifacts
    }

    pub fn market(&self) -> &MarketData {
        &self.market
    }
}

/// Load the artifacts and answer a single request
pub fn recommend(
    paths: &ArtifactPaths,
    skills_input: &str,
) -> Result<RecommendationResult, RecommendError> {
    Recommender::load(paths)?.recommend(skills_input)
}

fn format_details(details: &[(String, String)]) -> String {
    if details.is_empty() {
        return NO_INSIGHTS.to_string();
    }
    details
        .iter()
        .map(|(key, value)| format!("{}: {}", key, value))
        .collect::<Vec<_>>()
        .join("\n")
}

fn alternative_jobs(job_title: &str) -> Vec<String> {
    let alternatives: [&str; 2] = if job_title == SENTINEL_TITLE {
        ["Software Engineer", "Product Manager"]
    } else {
        ["Data Analyst", "Business Analyst"]
    };
    alternatives.iter().map(|s| s.to_string()).collect()
}
