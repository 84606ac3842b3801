// src/recommendation/types.rs
use serde::{Deserialize, Serialize};

use super::RecommendError;

/// Successful recommendation payload, built fresh per request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub job_title: String,
    /// Percentage in `[0, 100]`, one decimal place, serialized as `"82.3"`
    #[serde(with = "one_decimal")]
    pub confidence: f64,
    pub avg_salary: String,
    pub demand_level: String,
    pub market_insights: String,
    pub skills_improvement: String,
    pub alternative_jobs: Vec<String>,
}

/// Either a recommendation or `{ "error": "..." }`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RecommendOutcome {
    Recommendation(RecommendationResult),
    Error { error: String },
}

impl From<Result<RecommendationResult, RecommendError>> for RecommendOutcome {
    fn from(result: Result<RecommendationResult, RecommendError>) -> Self {
        match result {
            Ok(recommendation) => Self::Recommendation(recommendation),
            Err(e) => Self::Error {
                error: e.to_string(),
            },
        }
    }
}

mod one_decimal {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{:.1}", value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse::<f64>().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RecommendationResult {
        RecommendationResult {
            job_title: "Data Scientist".to_string(),
            confidence: 82.3,
            avg_salary: "$90k-$130k".to_string(),
            demand_level: "High".to_string(),
            market_insights: "Company: Acme".to_string(),
            skills_improvement: "Practice".to_string(),
            alternative_jobs: vec!["Data Analyst".to_string()],
        }
    }

    #[test]
    fn test_confidence_serializes_as_string() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["confidence"], "82.3");
        assert_eq!(json["job_title"], "Data Scientist");

        let back: RecommendationResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_outcome_shapes() {
        let ok = serde_json::to_value(RecommendOutcome::from(Ok(sample()))).unwrap();
        assert_eq!(ok["avg_salary"], "$90k-$130k");

        let err = RecommendOutcome::from(Err(RecommendError::NoSkills));
        let err = serde_json::to_value(err).unwrap();
        assert_eq!(err, serde_json::json!({ "error": "No skills provided." }));
    }
}
