//! Request identity.
//!
//! # Responsibilities
//! - Name the identity headers consumed and produced by the service
//! - Generate fresh identifiers (UUID v4)
//! - Expose the identifiers assigned to a request as an extractor
//!
//! # Design Decisions
//! - Identifiers are assigned as early as possible (outermost layer)
//! - Handlers read them from request extensions, never from headers

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderName};
use serde::Serialize;
use uuid::Uuid;

use crate::observability::context;

pub static X_CORRELATION_ID: HeaderName = HeaderName::from_static("x-correlation-id");
pub static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");
pub static X_USER_ID: HeaderName = HeaderName::from_static("x-user-id");

/// Fresh random identifier.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Non-empty UTF-8 value of `name`, if present.
pub fn header_str(headers: &HeaderMap, name: &HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// Identifiers assigned to the current request.
///
/// Inserted into request extensions by the correlation middleware. When a
/// handler runs without that middleware the extractor falls back to the
/// ambient store, which yields empty identifiers outside a request scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestContext {
    pub correlation_id: String,
    pub request_id: String,
    pub user_id: Option<String>,
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(ctx) = parts.extensions.get::<RequestContext>() {
            return Ok(ctx.clone());
        }

        let ambient = context::snapshot();
        Ok(RequestContext {
            correlation_id: ambient.correlation_id,
            request_id: ambient.request_id,
            user_id: Some(ambient.user_id).filter(|u| !u.is_empty()),
        })
    }
}
