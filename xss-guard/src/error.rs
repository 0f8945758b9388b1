//! Errors raised while scanning a value graph.
//!
//! None of these are recoverable by retrying: each one means the request
//! argument cannot be sanitized as given, so the request has to be rejected.

use thiserror::Error;

use crate::record::ConstructionError;

/// Failure to produce a sanitized copy of a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// The input holds a shape outside null, text, mapping, sequence and record.
    #[error("unsupported value shape `{shape}`")]
    UnsupportedShape {
        /// The rejected shape (e.g. `number`).
        shape: &'static str,
    },

    /// A record could not be rebuilt to receive sanitized fields.
    #[error(transparent)]
    ConstructionFailure(#[from] ConstructionError),

    /// A mapping entry holds neither text nor a nested mapping.
    #[error("mapping entry `{key}` holds a {found} value; expected text or mapping")]
    TypeMismatch {
        /// Key of the offending entry, after sanitization.
        key: String,
        /// Shape of the offending value.
        found: &'static str,
    },

    /// The value nests deeper than the configured limit.
    #[error("value nesting exceeds the maximum depth of {max_depth}")]
    DepthExceeded {
        /// The configured limit.
        max_depth: usize,
    },
}

impl ScanError {
    /// Whether the failure is caused by the shape of the client's input.
    ///
    /// Construction failures are a server-side defect in the record type.
    pub const fn is_client_error(&self) -> bool {
        !matches!(self, Self::ConstructionFailure(_))
    }
}
