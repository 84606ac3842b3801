// src/web/handlers/system_handlers.rs
use crate::recommendation::Recommender;
use crate::web::types::*;

use rocket::serde::json::Json;
use rocket::State;
use tracing::debug;

pub async fn health_handler(recommender: &State<Recommender>) -> Json<DataResponse<ModelSummary>> {
    let artifacts = recommender.artifacts();
    let summary = ModelSummary {
        job_titles: artifacts.label_encoder.len(),
        vocabulary: artifacts.vectorizer.len(),
        trees: artifacts.classifier.n_trees(),
        market_rows: recommender.market().len(),
    };
    debug!("Health check");

    Json(DataResponse::success("OK".to_string(), summary, None))
}
