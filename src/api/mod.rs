//! Route registration.
//!
//! ```text
//! GET  /
//! GET  /api/v1/system/info
//! GET  /api/v1/system/health
//! POST /api/v1/conversation/start
//! ```

pub mod v1;

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::config::Settings;
use crate::models::RootResponse;

/// Shared state handed to every handler.
pub type AppState = Arc<Settings>;

/// All routes, without middleware.
pub fn router(settings: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/api/v1", v1::router())
        .with_state(settings)
}

async fn root(State(settings): State<AppState>) -> Json<RootResponse> {
    Json(RootResponse {
        message: format!("Welcome to {}", settings.app_name),
        version: settings.app_version.clone(),
        environment: settings.environment.clone(),
        status: "running".to_string(),
    })
}
