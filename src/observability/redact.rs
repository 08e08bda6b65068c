//! Sensitive-field redaction for log records.
//!
//! Keys are compared case-insensitively against a fixed name set. Matching
//! values are replaced wholesale, whatever their shape. Mappings are walked
//! to any depth, including mappings held inside sequences; every other value
//! is left untouched.

use serde_json::{Map, Value};

/// Replacement for redacted values.
pub const REDACTED: &str = "***REDACTED***";

/// Field names whose values never reach the log output.
pub const SENSITIVE_KEYS: &[&str] = &["password", "token", "authorization", "secret", "api_key"];

/// Whether `key` names a sensitive field.
pub fn is_sensitive(key: &str) -> bool {
    let key = key.to_lowercase();
    SENSITIVE_KEYS.contains(&key.as_str())
}

/// Redact a record in place.
pub fn redact(record: &mut Map<String, Value>) {
    for (key, value) in record.iter_mut() {
        if is_sensitive(key) {
            *value = Value::String(REDACTED.to_string());
        } else {
            redact_value(value);
        }
    }
}

/// Redact every mapping reachable from `value`.
pub fn redact_value(value: &mut Value) {
    match value {
        Value::Object(map) => redact(map),
        Value::Array(items) => items.iter_mut().for_each(redact_value),
        _ => {}
    }
}
