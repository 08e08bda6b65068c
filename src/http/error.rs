//! Handler errors and failure tagging.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Marks a response produced from an unhandled handler failure.
///
/// The request logger reports such responses as failed rather than
/// completed. The response itself is returned to the client unchanged.
/// Client errors (`BadRequest`, `NotFound`) are ordinary responses and
/// carry no marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerFailure {
    pub message: String,
    pub error_type: String,
}

/// Errors returned by API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "ApiError::BadRequest",
            ApiError::NotFound(_) => "ApiError::NotFound",
            ApiError::Internal(_) => "ApiError::Internal",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response =
            (self.status(), Json(json!({ "detail": self.to_string() }))).into_response();
        if let ApiError::Internal(_) = self {
            response.extensions_mut().insert(HandlerFailure {
                message: self.to_string(),
                error_type: self.kind().to_string(),
            });
        }
        response
    }
}

/// Response for a panic caught inside the handler stack.
pub fn panic_response(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    let mut response = (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "detail": "Internal Server Error" })),
    )
        .into_response();
    response.extensions_mut().insert(HandlerFailure {
        message,
        error_type: "panic".to_string(),
    });
    response
}
