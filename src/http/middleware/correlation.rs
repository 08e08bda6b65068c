//! Correlation ID middleware.
//!
//! Assigns the correlation, request, and user identifiers of a request,
//! publishes them to the ambient context for everything the request awaits,
//! and echoes the correlation and request IDs on the response.

use std::task::{Context, Poll};

use axum::http::{HeaderValue, Request, Response};
use futures_util::future::BoxFuture;
use tower::{Layer, Service};

use crate::http::request::{
    header_str, new_id, RequestContext, X_CORRELATION_ID, X_REQUEST_ID, X_USER_ID,
};
use crate::observability::context::{self, Slot};

/// Layer applying [`CorrelationService`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CorrelationLayer;

impl<S> Layer<S> for CorrelationLayer {
    type Service = CorrelationService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CorrelationService { inner }
    }
}

#[derive(Debug, Clone)]
pub struct CorrelationService<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for CorrelationService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    ReqBody: Send + 'static,
    ResBody: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        let correlation_id = header_str(req.headers(), &X_CORRELATION_ID).unwrap_or_else(new_id);
        let request_id = new_id();
        let user_id = header_str(req.headers(), &X_USER_ID);

        req.extensions_mut().insert(RequestContext {
            correlation_id: correlation_id.clone(),
            request_id: request_id.clone(),
            user_id: user_id.clone(),
        });

        // The clone may not be ready; drive the instance poll_ready was called on.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(context::scope(async move {
            context::set(Slot::CorrelationId, correlation_id.as_str());
            context::set(Slot::RequestId, request_id.as_str());
            if let Some(user_id) = user_id {
                context::set(Slot::UserId, user_id);
            }

            let mut response = inner.call(req).await?;

            let headers = response.headers_mut();
            if let Ok(value) = HeaderValue::from_str(&correlation_id) {
                headers.insert(X_CORRELATION_ID.clone(), value);
            }
            if let Ok(value) = HeaderValue::from_str(&request_id) {
                headers.insert(X_REQUEST_ID.clone(), value);
            }

            Ok(response)
        }))
    }
}
