//! Request logging middleware.
//!
//! Per request, outside the excluded paths:
//!
//! ```text
//! NOT_STARTED → STARTED ("Request started", DEBUG)
//!             → COMPLETED ("Request completed", level from status)
//!             | FAILED ("Request failed", ERROR; failure returned unchanged)
//! ```
//!
//! A request fails when the wrapped service returns `Err`, or when the
//! response carries a [`HandlerFailure`] marker.

use std::any::type_name;
use std::collections::HashSet;
use std::fmt::Display;
use std::net::SocketAddr;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;

use axum::extract::ConnectInfo;
use axum::http::{header, Request, Response};
use futures_util::future::BoxFuture;
use tower::{Layer, Service};
use tracing::Level;

use crate::http::error::HandlerFailure;
use crate::observability::REQUEST_LOGGER;

const MAX_USER_AGENT_CHARS: usize = 100;

/// Paths skipped when no exclusion set is configured.
pub const DEFAULT_EXCLUDED_PATHS: &[&str] = &["/health", "/metrics"];

/// Completion severity for a response status.
pub fn completion_level(status: u16) -> Level {
    if status >= 500 {
        Level::ERROR
    } else if status >= 400 {
        Level::WARN
    } else {
        Level::INFO
    }
}

/// Elapsed milliseconds since `start`, rounded to two decimals.
fn elapsed_ms(start: Instant) -> f64 {
    (start.elapsed().as_secs_f64() * 1000.0 * 100.0).round() / 100.0
}

fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

/// Layer applying [`RequestLoggingService`].
#[derive(Debug, Clone)]
pub struct RequestLoggingLayer {
    excluded: Arc<HashSet<String>>,
}

impl RequestLoggingLayer {
    pub fn new<I, P>(excluded: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            excluded: Arc::new(excluded.into_iter().map(Into::into).collect()),
        }
    }
}

impl Default for RequestLoggingLayer {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED_PATHS.iter().copied())
    }
}

impl<S> Layer<S> for RequestLoggingLayer {
    type Service = RequestLoggingService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestLoggingService {
            inner,
            excluded: self.excluded.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RequestLoggingService<S> {
    inner: S,
    excluded: Arc<HashSet<String>>,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for RequestLoggingService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: Display + Send + 'static,
    ReqBody: Send + 'static,
    ResBody: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let path = req.uri().path().to_string();
        if self.excluded.contains(&path) {
            return Box::pin(inner.call(req));
        }

        let method = req.method().to_string();
        let client_ip = req
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string())
            .unwrap_or_else(|| "unknown".to_string());
        let user_agent = req
            .headers()
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(|ua| truncate_chars(ua, MAX_USER_AGENT_CHARS))
            .unwrap_or_else(|| "unknown".to_string());

        Box::pin(async move {
            let start = Instant::now();
            tracing::debug!(
                target: REQUEST_LOGGER,
                method = %method,
                path = %path,
                client_ip = %client_ip,
                user_agent = user_agent.as_str(),
                "Request started"
            );

            match inner.call(req).await {
                Ok(response) => {
                    let process_time_ms = elapsed_ms(start);
                    let status_code = response.status().as_u16();

                    if let Some(failure) = response.extensions().get::<HandlerFailure>() {
                        tracing::error!(
                            target: REQUEST_LOGGER,
                            method = %method,
                            path = %path,
                            status_code,
                            error = failure.message.as_str(),
                            error_type = failure.error_type.as_str(),
                            process_time_ms,
                            "Request failed"
                        );
                        return Ok(response);
                    }

                    macro_rules! completed {
                        ($level:expr) => {
                            tracing::event!(
                                target: REQUEST_LOGGER,
                                $level,
                                method = %method,
                                path = %path,
                                status_code,
                                process_time_ms,
                                "Request completed"
                            )
                        };
                    }
                    let level = completion_level(status_code);
                    if level == Level::ERROR {
                        completed!(Level::ERROR);
                    } else if level == Level::WARN {
                        completed!(Level::WARN);
                    } else {
                        completed!(Level::INFO);
                    }

                    Ok(response)
                }
                Err(err) => {
                    tracing::error!(
                        target: REQUEST_LOGGER,
                        method = %method,
                        path = %path,
                        error = %err,
                        error_type = type_name::<S::Error>(),
                        process_time_ms = elapsed_ms(start),
                        "Request failed"
                    );
                    Err(err)
                }
            }
        })
    }
}
