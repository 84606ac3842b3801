// src/web/handlers/recommend_handlers.rs
use crate::recommendation::{RecommendError, RecommendationResult, Recommender};
use crate::web::types::*;

use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{info, warn};

pub async fn recommend_handler(
    request: Json<StandardRequest<RecommendRequest>>,
    recommender: &State<Recommender>,
) -> Result<Json<DataResponse<RecommendationResult>>, (Status, Json<StandardErrorResponse>)> {
    let request = request.into_inner();
    let conversation_id = request.conversation_id;

    info!("Recommendation requested for skills: {}", request.data.skills);

    match recommender.recommend(&request.data.skills) {
        Ok(result) => Ok(Json(DataResponse::success(
            format!(
                "Recommended job: {} ({:.1}% confidence)",
                result.job_title, result.confidence
            ),
            result,
            conversation_id,
        ))),
        Err(e) => {
            warn!("Recommendation failed: {}", e);
            Err((
                status_for(&e),
                Json(StandardErrorResponse::new(
                    e.to_string(),
                    e.error_code().to_string(),
                    e.suggestions(),
                    conversation_id,
                )),
            ))
        }
    }
}

fn status_for(error: &RecommendError) -> Status {
    match error {
        RecommendError::NoSkills => Status::BadRequest,
        RecommendError::NoMatchingJob(_) => Status::NotFound,
        // Only MissingColumns reaches here in practice: the server does not
        // start until artifacts and market data have loaded.
        _ => Status::ServiceUnavailable,
    }
}
