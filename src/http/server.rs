//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with all handlers
//! - Wire up middleware (correlation IDs, request logging, panics, limits)
//! - Bind server to listener
//! - Stop gracefully on the shutdown signal

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{catch_panic::CatchPanicLayer, limit::RequestBodyLimitLayer, timeout::TimeoutLayer};

use crate::api;
use crate::config::Settings;
use crate::http::error::panic_response;
use crate::http::middleware::{CorrelationLayer, RequestLoggingLayer};

/// HTTP server for the API.
pub struct HttpServer {
    router: Router,
    settings: Arc<Settings>,
}

impl HttpServer {
    /// Create a new HTTP server with the given settings.
    pub fn new(settings: Arc<Settings>) -> Self {
        let router = build_router(settings.clone());
        Self { router, settings }
    }

    /// The fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// API routes wrapped in the standard middleware stack.
pub fn build_router(settings: Arc<Settings>) -> Router {
    let routes = api::router(settings.clone());
    apply_middleware(routes, &settings)
}

/// Wrap `router` in the middleware stack.
///
/// Layers added last run first, so correlation is outermost.
pub fn apply_middleware(router: Router, settings: &Settings) -> Router {
    router
        .layer(RequestBodyLimitLayer::new(settings.max_body_bytes))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(settings.request_timeout_secs),
        ))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(RequestLoggingLayer::new(
            settings.log_exclude_paths.iter().cloned(),
        ))
        .layer(CorrelationLayer)
}
