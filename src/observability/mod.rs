//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! correlation middleware
//!     → context.rs (task-local correlation/request/user IDs)
//!
//! tracing events from any subsystem
//!     → format.rs (enrich with service metadata + ambient IDs)
//!     → redact.rs (mask sensitive fields)
//!     → logging.rs (one line per event on stdout)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing, text for humans
//! - Identifiers are scoped to the request future, never to a thread
//! - Redaction sees the fully merged record

pub mod context;
pub mod format;
pub mod logging;
pub mod redact;

pub use context::{AmbientContext, Slot};
pub use format::{JsonFields, ServiceMetadata, StructuredFormat};
pub use logging::{init_logging, structured_layer, REQUEST_LOGGER};
