//! `slog` integration for [`Value`].
//!
//! A [`Value`] logs as nested JSON through `slog`'s nested-value support, so a
//! sanitized argument can be attached to a log record as structured data:
//!
//! ```ignore
//! debug!(logger, "handler argument"; "argument" => &sanitized);
//! ```
//!
//! Records log as a map of their readable fields. Only log values that have
//! already been scanned.

use serde_json::Value as JsonValue;
use slog::{Key, Result as SlogResult, Serializer, Value as SlogValue};

use crate::value::Value;

/// Placeholder emitted if a value cannot be converted to JSON.
pub const SERIALIZATION_FAILED: &str = "Failed to serialize value";

/// Converts `value` into the JSON emitted to `slog`.
///
/// Never fails: a conversion error is replaced by [`SERIALIZATION_FAILED`].
pub fn to_log_json(value: &Value) -> JsonValue {
    serde_json::to_value(value)
        .unwrap_or_else(|_| JsonValue::String(SERIALIZATION_FAILED.to_string()))
}

impl SlogValue for Value {
    fn serialize(
        &self,
        record: &slog::Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        let nested = slog::Serde(to_log_json(self));
        SlogValue::serialize(&nested, record, key, serializer)
    }
}
