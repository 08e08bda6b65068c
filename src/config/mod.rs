//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults
//!     → optional TOML file (loader.rs)
//!     → environment variables (loader.rs)
//!     → validation.rs (semantic checks)
//!     → Settings (validated, immutable)
//!     → shared via Arc with the formatter and middleware
//! ```
//!
//! # Design Decisions
//! - Settings are constructed once at startup and never mutated
//! - All fields have defaults to allow an empty environment
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_from_env, load_settings, ConfigError};
pub use schema::{LogFormat, Settings};
pub use validation::ValidationError;
