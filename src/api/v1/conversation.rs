//! Conversation endpoint. Replies with a fixed greeting.

use axum::{routing::post, Json, Router};

use crate::api::AppState;
use crate::http::ApiError;
use crate::models::{MessageIn, MessageOut};

const GREETING: &str = "Hello, how can I help you?";

pub fn router() -> Router<AppState> {
    Router::new().route("/start", post(start))
}

async fn start(Json(message): Json<MessageIn>) -> Result<Json<MessageOut>, ApiError> {
    if message.conversation_id.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "conversation_id must not be empty".to_string(),
        ));
    }

    tracing::info!(
        conversation_id = message.conversation_id.as_str(),
        content = message.content.as_str(),
        "Message received"
    );

    Ok(Json(MessageOut {
        conversation_id: message.conversation_id,
        content: GREETING.to_string(),
        wait_response: true,
    }))
}
