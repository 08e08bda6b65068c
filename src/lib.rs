//! HTTP API scaffold with request correlation and structured logging.

pub mod api;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod models;
pub mod observability;

pub use config::Settings;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
