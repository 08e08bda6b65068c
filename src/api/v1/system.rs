use axum::{extract::State, routing::get, Json, Router};

use crate::api::AppState;
use crate::models::{HealthResponse, InfoResponse};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/info", get(info))
        .route("/health", get(health))
}

async fn info(State(settings): State<AppState>) -> Json<InfoResponse> {
    Json(InfoResponse {
        version: settings.app_version.clone(),
        features: vec![String::new()],
    })
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        database: "connected".to_string(),
    })
}
