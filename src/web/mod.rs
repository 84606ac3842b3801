// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use types::*;

use crate::environment::ServerSettings;
use crate::recommendation::{RecommendationResult, Recommender};
use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, get, post, routes, Build, Request, Response, Rocket, State};
use tracing::info;

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[post("/recommend", data = "<request>")]
pub async fn recommend(
    request: Json<StandardRequest<RecommendRequest>>,
    recommender: &State<Recommender>,
) -> Result<Json<DataResponse<RecommendationResult>>, (Status, Json<StandardErrorResponse>)> {
    handlers::recommend_handler(request, recommender).await
}

#[get("/health")]
pub async fn health(recommender: &State<Recommender>) -> Json<DataResponse<ModelSummary>> {
    handlers::health_handler(recommender).await
}

#[rocket::options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check your request JSON format".to_string(),
            "Send the skills as a comma-separated string".to_string(),
        ],
        None,
    ))
}

#[rocket::catch(404)]
pub fn not_found() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Resource not found".to_string(),
        "NOT_FOUND".to_string(),
        vec!["Available endpoints: POST /api/recommend, GET /api/health".to_string()],
        None,
    ))
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Request body could not be parsed".to_string(),
        "UNPROCESSABLE_ENTITY".to_string(),
        vec!["The body must be a JSON object with a 'skills' string field".to_string()],
        None,
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec![
            "Try again in a few moments".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
        None,
    ))
}

/// Assemble the API around an already loaded recommender
pub fn build_rocket(recommender: Recommender, settings: &ServerSettings) -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("address", settings.address.clone()))
        .merge(("port", settings.port));

    rocket::custom(figment)
        .attach(Cors)
        .manage(recommender)
        .register(
            "/api",
            catchers![bad_request, not_found, unprocessable, internal_error],
        )
        .mount("/api", routes![recommend, health, options])
}

// Main server start function
pub async fn start_web_server(recommender: Recommender, settings: ServerSettings) -> Result<()> {
    info!(
        "Starting career recommendation API on http://{}:{}",
        settings.address, settings.port
    );

    let _rocket = build_rocket(recommender, &settings)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Rocket failed: {}", e))?;

    Ok(())
}
