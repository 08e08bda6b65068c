//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → middleware/correlation.rs (IDs into ambient context + extensions)
//!     → middleware/request_logging.rs (timing, outcome events)
//!     → api handlers
//!     → response headers X-Correlation-ID / X-Request-ID
//!     → Send to client
//! ```

pub mod error;
pub mod middleware;
pub mod request;
pub mod server;

pub use error::{ApiError, HandlerFailure};
pub use request::{RequestContext, X_CORRELATION_ID, X_REQUEST_ID, X_USER_ID};
pub use server::HttpServer;
