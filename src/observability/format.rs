//! Structured log record construction.
//!
//! Every event goes through the same pipeline:
//!
//! ```text
//! span fields (root to leaf), then event fields (Visit)
//!     → overlay timestamp/level/logger/message
//!     → overlay service metadata
//!     → overlay non-empty ambient identifiers
//!     → redact
//!     → one JSON object or one text line
//! ```

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Number, Value};
use tracing::field::{Field, Visit};
use tracing::{span, Event, Level, Subscriber};
use tracing_subscriber::field::RecordFields;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, FormattedFields};
use tracing_subscriber::registry::LookupSpan;

use crate::config::{LogFormat, Settings};
use crate::observability::context::{self, AmbientContext};
use crate::observability::redact::redact;

/// Keys rendered as fixed columns by the text format.
const FIXED_KEYS: &[&str] = &[
    "timestamp",
    "level",
    "logger",
    "message",
    "service",
    "version",
    "environment",
];

/// Static service fields stamped on every record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceMetadata {
    pub service: String,
    pub version: String,
    pub environment: String,
}

impl ServiceMetadata {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            service: settings.app_name.clone(),
            version: settings.app_version.clone(),
            environment: settings.environment.clone(),
        }
    }
}

/// A log event before enrichment.
#[derive(Debug, Clone)]
pub struct EventRecord {
    pub level: Level,
    pub target: String,
    pub message: String,
    pub fields: Map<String, Value>,
}

/// Record name for a `tracing` level.
pub fn level_name(level: &Level) -> &'static str {
    match *level {
        Level::TRACE => "TRACE",
        Level::DEBUG => "DEBUG",
        Level::INFO => "INFO",
        Level::WARN => "WARNING",
        Level::ERROR => "ERROR",
    }
}

/// Build the enriched, redacted record for one event.
pub fn build_record(
    event: EventRecord,
    metadata: &ServiceMetadata,
    ambient: &AmbientContext,
    at: DateTime<Utc>,
) -> Map<String, Value> {
    let mut record = event.fields;
    round_durations(&mut record);

    record.insert(
        "timestamp".into(),
        Value::String(at.to_rfc3339_opts(SecondsFormat::Millis, true)),
    );
    record.insert("level".into(), Value::String(level_name(&event.level).into()));
    record.insert("logger".into(), Value::String(event.target));
    record.insert("message".into(), Value::String(event.message));

    record.insert("service".into(), Value::String(metadata.service.clone()));
    record.insert("version".into(), Value::String(metadata.version.clone()));
    record.insert("environment".into(), Value::String(metadata.environment.clone()));

    for (key, value) in ambient.present() {
        record.insert(key.into(), Value::String(value.into()));
    }

    redact(&mut record);
    record
}

/// Round float fields named `*_ms` to two decimals.
fn round_durations(record: &mut Map<String, Value>) {
    for (key, value) in record.iter_mut() {
        if !key.ends_with("_ms") {
            continue;
        }
        if !value.is_f64() {
            continue;
        }
        let rounded = value
            .as_f64()
            .and_then(|ms| Number::from_f64((ms * 100.0).round() / 100.0));
        if let Some(rounded) = rounded {
            *value = Value::Number(rounded);
        }
    }
}

/// Render a record as `YYYY-MM-DD HH:MM:SS - logger - LEVEL - message key=value...`.
pub fn render_text(record: &Map<String, Value>, at: DateTime<Utc>) -> String {
    let column = |key: &str| record.get(key).and_then(Value::as_str).unwrap_or_default();

    let mut line = format!(
        "{} - {} - {} - {}",
        at.format("%Y-%m-%d %H:%M:%S"),
        column("logger"),
        column("level"),
        column("message"),
    );

    let mut extras: Vec<_> = record
        .iter()
        .filter(|(key, _)| !FIXED_KEYS.contains(&key.as_str()))
        .collect();
    extras.sort_by(|a, b| a.0.cmp(b.0));

    for (key, value) in extras {
        match value {
            Value::String(s) => line.push_str(&format!(" {key}={s}")),
            other => line.push_str(&format!(" {key}={other}")),
        }
    }

    line
}

/// Collects event fields into a JSON map.
///
/// Values recorded through `Display`/`Debug` that render as a JSON object
/// or array are embedded as structured JSON. Plain `&str` values are always
/// kept verbatim, so untrusted text should be recorded that way.
#[derive(Debug, Default)]
pub struct FieldCollector {
    pub message: String,
    pub fields: Map<String, Value>,
}

impl FieldCollector {
    fn insert(&mut self, field: &Field, value: Value) {
        self.fields.insert(field.name().to_string(), value);
    }
}

impl Visit for FieldCollector {
    fn record_f64(&mut self, field: &Field, value: f64) {
        let value = Number::from_f64(value)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(value.to_string()));
        self.insert(field, value);
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, Value::Bool(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.insert(field, Value::String(value.to_string()));
        }
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.insert(field, Value::String(value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let rendered = format!("{value:?}");
        if field.name() == "message" {
            self.message = rendered;
            return;
        }

        let value = if rendered.starts_with('{') || rendered.starts_with('[') {
            match serde_json::from_str::<Value>(&rendered) {
                Ok(json @ (Value::Object(_) | Value::Array(_))) => json,
                _ => Value::String(rendered),
            }
        } else {
            Value::String(rendered)
        };
        self.insert(field, value);
    }
}

/// Span field formatter that stores each span's fields as a JSON object.
///
/// The event formatter merges these objects into every record emitted
/// inside the span.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFields;

impl JsonFields {
    fn parse(stored: &str) -> Map<String, Value> {
        serde_json::from_str(stored).unwrap_or_default()
    }
}

impl<'writer> FormatFields<'writer> for JsonFields {
    fn format_fields<R: RecordFields>(&self, mut writer: Writer<'writer>, fields: R) -> fmt::Result {
        let mut collector = FieldCollector::default();
        fields.record(&mut collector);
        let json = serde_json::to_string(&collector.fields).map_err(|_| fmt::Error)?;
        write!(writer, "{json}")
    }

    fn add_fields(
        &self,
        current: &'writer mut FormattedFields<Self>,
        fields: &span::Record<'_>,
    ) -> fmt::Result {
        let mut collector = FieldCollector {
            fields: Self::parse(&current.fields),
            ..FieldCollector::default()
        };
        fields.record(&mut collector);
        current.fields = serde_json::to_string(&collector.fields).map_err(|_| fmt::Error)?;
        Ok(())
    }
}

/// `tracing-subscriber` event formatter producing enriched records.
#[derive(Debug, Clone)]
pub struct StructuredFormat {
    metadata: ServiceMetadata,
    format: LogFormat,
}

impl StructuredFormat {
    pub fn new(metadata: ServiceMetadata, format: LogFormat) -> Self {
        Self { metadata, format }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(ServiceMetadata::from_settings(settings), settings.log_format)
    }
}

impl<S, N> FormatEvent<S, N> for StructuredFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut collector = FieldCollector::default();
        if let Some(scope) = ctx.event_scope() {
            for span in scope.from_root() {
                if let Some(stored) = span.extensions().get::<FormattedFields<JsonFields>>() {
                    collector.fields.extend(JsonFields::parse(&stored.fields));
                }
            }
        }
        event.record(&mut collector);

        let metadata = event.metadata();
        let at = Utc::now();
        let record = build_record(
            EventRecord {
                level: *metadata.level(),
                target: metadata.target().to_string(),
                message: collector.message,
                fields: collector.fields,
            },
            &self.metadata,
            &context::snapshot(),
            at,
        );

        match self.format {
            LogFormat::Json => {
                let line = serde_json::to_string(&record).map_err(|_| fmt::Error)?;
                writeln!(writer, "{line}")
            }
            LogFormat::Text => writeln!(writer, "{}", render_text(&record, at)),
        }
    }
}
