//! HTTP middleware.
//!
//! # Layer order (outermost first)
//! ```text
//! correlation.rs      assign IDs, open ambient scope, echo response headers
//! request_logging.rs  time the request, emit start/complete/failed events
//! catch panic         panics become tagged 500 responses
//! timeout, body limit
//! router
//! ```

pub mod correlation;
pub mod request_logging;

pub use correlation::{CorrelationLayer, CorrelationService};
pub use request_logging::{completion_level, RequestLoggingLayer, RequestLoggingService};
