//! Structured logging setup.
//!
//! Installs a `tracing-subscriber` registry whose fmt layer formats every
//! event with [`StructuredFormat`] and keeps span fields as JSON
//! ([`JsonFields`]) so they can be merged into the records of their events. The minimum level comes from settings;
//! `RUST_LOG`, when set, takes precedence.

use tracing::Subscriber;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

use crate::config::Settings;
use crate::observability::format::{JsonFields, StructuredFormat};

/// Target used by the request logging middleware.
pub const REQUEST_LOGGER: &str = "api.requests";

/// Level filter for the given settings.
pub fn env_filter(settings: &Settings) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.level_directive().unwrap_or("info")))
}

/// fmt layer writing enriched records to `writer`.
pub fn structured_layer<S, W>(
    settings: &Settings,
    writer: W,
) -> fmt::Layer<S, JsonFields, StructuredFormat, W>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + 'static,
{
    fmt::layer()
        .fmt_fields(JsonFields)
        .event_format(StructuredFormat::from_settings(settings))
        .with_writer(writer)
}

/// Install the global subscriber writing to stdout.
///
/// Fails if a global subscriber is already set.
pub fn init_logging(settings: &Settings) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(env_filter(settings))
        .with(structured_layer(settings, std::io::stdout))
        .try_init()
}
