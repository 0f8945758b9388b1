//! The recursive walk over a [`Value`] graph.
//!
//! Scanning never mutates its input. Every call builds a new value of the same
//! shape with each text leaf replaced by its sanitized form.
//!
//! ## Shape handling
//!
//! | Shape | Result |
//! |-------|--------|
//! | `Null` | `Null` |
//! | `Text` | leaf sanitized (email bypass applies) |
//! | `Sequence` | each element scanned, order and length kept |
//! | `Mapping` | keys and text values sanitized; nested mappings **flattened** into the result |
//! | `Record` | fresh instance, fields with both accessors sanitized, null fields left at zero |
//!
//! Mapping entries whose value is neither text nor a mapping fail with
//! [`ScanError::TypeMismatch`]. Flattened keys overwrite earlier ones.

use std::fmt;

use slog::{error, o, warn, Discard, Logger};

use super::options::{RecordFailureMode, ScanOptions};
use crate::{
    email::is_email_bypass,
    error::ScanError,
    policy::{HtmlPolicy, SanitizationPolicy},
    record::{ConstructionError, Record},
    value::{Mapping, Value},
};

/// Walks values and sanitizes their text leaves with a [`SanitizationPolicy`].
///
/// A scanner holds no per-request state, so one instance can serve
/// concurrent requests.
pub struct Scanner<P = HtmlPolicy> {
    policy: P,
    options: ScanOptions,
    logger: Logger,
}

impl Scanner<HtmlPolicy> {
    /// Scanner using [`HtmlPolicy::formatting_and_links`].
    #[must_use]
    pub fn html() -> Self {
        Self::new(HtmlPolicy::formatting_and_links())
    }
}

impl Default for Scanner<HtmlPolicy> {
    fn default() -> Self {
        Self::html()
    }
}

impl<P: SanitizationPolicy> Scanner<P> {
    /// Creates a scanner with default options and a discarding logger.
    pub fn new(policy: P) -> Self {
        Self {
            policy,
            options: ScanOptions::default(),
            logger: Logger::root(Discard, o!()),
        }
    }

    /// Replaces the scan options.
    #[must_use]
    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    /// Routes scanner diagnostics to `logger`.
    #[must_use]
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// The leaf policy.
    pub const fn policy(&self) -> &P {
        &self.policy
    }

    /// The active options.
    pub const fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Returns a sanitized copy of `value`.
    pub fn scan(&self, value: &Value) -> Result<Value, ScanError> {
        self.scan_at(value, 0)
    }

    /// Converts a JSON body and scans it.
    ///
    /// Numbers and booleans fail with [`ScanError::UnsupportedShape`].
    pub fn scan_json(&self, json: serde_json::Value) -> Result<Value, ScanError> {
        let value = Value::try_from(json)?;
        self.scan(&value)
    }

    /// Returns a sanitized copy of a concrete record.
    ///
    /// Construction failures are always returned as errors here, regardless of
    /// [`RecordFailureMode`], since there is no typed null to fall back to.
    pub fn scan_record<R: Record>(&self, record: &R) -> Result<R, ScanError> {
        self.descend(0)?;
        let sanitized = self.sanitize_record(record)?;
        sanitized.downcast::<R>().map_err(|other| {
            ConstructionError::new(
                record.type_name(),
                format!("instantiate produced a `{}`", other.type_name()),
            )
            .into()
        })
    }

    /// Sanitizes a single text leaf.
    ///
    /// Strings that contain `@` and match the email pattern are returned
    /// unchanged; everything else goes through the policy.
    pub fn sanitize_leaf(&self, text: &str) -> String {
        if is_email_bypass(text) {
            text.to_string()
        } else {
            self.policy.sanitize(text)
        }
    }

    fn descend(&self, depth: usize) -> Result<usize, ScanError> {
        let next = depth + 1;
        if next > self.options.max_depth() {
            return Err(ScanError::DepthExceeded {
                max_depth: self.options.max_depth(),
            });
        }
        Ok(next)
    }

    fn scan_at(&self, value: &Value, depth: usize) -> Result<Value, ScanError> {
        match value {
            Value::Null => Ok(Value::Null),
            Value::Text(text) => Ok(Value::Text(self.sanitize_leaf(text))),
            Value::Mapping(mapping) => {
                let depth = self.descend(depth)?;
                self.sanitize_mapping(mapping, depth).map(Value::Mapping)
            }
            Value::Sequence(items) => {
                let depth = self.descend(depth)?;
                items
                    .iter()
                    .map(|item| self.scan_at(item, depth))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::Sequence)
            }
            Value::Record(record) => {
                self.descend(depth)?;
                self.scan_record_node(&**record)
            }
        }
    }

    fn sanitize_mapping(&self, mapping: &Mapping, depth: usize) -> Result<Mapping, ScanError> {
        let mut sanitized = Mapping::new();
        for (key, value) in mapping {
            match value {
                Value::Text(text) => {
                    sanitized.insert(
                        self.sanitize_leaf(key),
                        Value::Text(self.sanitize_leaf(text)),
                    );
                }
                // Nested entries land in the same result; later keys overwrite.
                Value::Mapping(nested) => {
                    let depth = self.descend(depth)?;
                    sanitized.extend(self.sanitize_mapping(nested, depth)?);
                }
                // The key is client input; only its sanitized form leaves the scanner.
                other => {
                    return Err(ScanError::TypeMismatch {
                        key: self.sanitize_leaf(key),
                        found: other.shape(),
                    });
                }
            }
        }
        Ok(sanitized)
    }

    fn scan_record_node(&self, record: &dyn Record) -> Result<Value, ScanError> {
        match self.sanitize_record(record) {
            Ok(sanitized) => Ok(Value::Record(sanitized)),
            Err(err) => match self.options.record_failure() {
                RecordFailureMode::Propagate => Err(err.into()),
                RecordFailureMode::Nullify => {
                    error!(self.logger, "record sanitization failed, substituting null";
                        "record" => err.type_name(),
                        "reason" => err.reason(),
                    );
                    Ok(Value::Null)
                }
            },
        }
    }

    fn sanitize_record(&self, record: &dyn Record) -> Result<Box<dyn Record>, ConstructionError> {
        let mut sanitized = record.instantiate()?;
        for field in record.fields().iter().filter(|field| field.is_scannable()) {
            let Some(current) = record.get(field.name()) else {
                continue;
            };
            if !sanitized.set(field.name(), self.sanitize_leaf(current)) {
                warn!(self.logger, "record refused a writable field";
                    "record" => record.type_name(),
                    "field" => field.name(),
                );
            }
        }
        Ok(sanitized)
    }
}

impl<P: fmt::Debug> fmt::Debug for Scanner<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scanner")
            .field("policy", &self.policy)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
