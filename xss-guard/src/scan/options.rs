//! Scanner configuration.

/// What to do when a record cannot be rebuilt during a scan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RecordFailureMode {
    /// Fail the whole scan with `ScanError::ConstructionFailure`.
    #[default]
    Propagate,
    /// Log the failure and replace the record with `Value::Null`.
    ///
    /// The rest of the value is still sanitized. Handlers then see a null
    /// argument where the record was, never the unsanitized record.
    Nullify,
}

/// Limits and failure handling for a [`super::Scanner`].
///
/// Use [`ScanOptions::new`] (or `Default`) and the `with_*` methods to build
/// an instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanOptions {
    /// Maximum number of nested containers (mappings, sequences, records).
    max_depth: usize,
    /// Handling of record construction failures.
    record_failure: RecordFailureMode,
}

impl ScanOptions {
    /// Nesting limit used unless configured otherwise.
    pub const DEFAULT_MAX_DEPTH: usize = 64;

    /// Default options: depth limit of [`Self::DEFAULT_MAX_DEPTH`], failures propagate.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            record_failure: RecordFailureMode::Propagate,
        }
    }

    /// Sets how many containers may nest inside each other.
    ///
    /// A root mapping or sequence counts as one level; a flattened nested
    /// mapping counts as another. `0` rejects every container.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the record construction failure handling.
    #[must_use]
    pub const fn with_record_failure(mut self, mode: RecordFailureMode) -> Self {
        self.record_failure = mode;
        self
    }

    /// The configured nesting limit.
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// The configured record failure handling.
    pub const fn record_failure(&self) -> RecordFailureMode {
        self.record_failure
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::new()
    }
}
