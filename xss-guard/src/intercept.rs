//! Request interception: sanitize a handler's bound argument before it runs.
//!
//! This is framework-agnostic. A routing layer describes each pending handler
//! call as an [`Invocation`] and hands it to a [`SanitizingInterceptor`], which
//! replaces the first argument with its scanned copy when the handler binds it
//! from the query string or the request body.
//!
//! ```text
//! routing layer -> Invocation -> SanitizingInterceptor::intercept -> handler(args)
//!                                         |
//!                                         +-> InterceptError (handler never runs)
//! ```
//!
//! Sanitization failures fail closed: the handler is not called with the
//! unsanitized argument.

use std::fmt;

use slog::{debug, error, info, o, Discard, Logger};
use thiserror::Error;

use crate::{
    error::ScanError,
    policy::{HtmlPolicy, SanitizationPolicy},
    scan::Scanner,
    value::Value,
};

/// Where the handler takes its first argument from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArgumentBinding {
    /// Bound from query parameters.
    QueryParam,
    /// Bound from the deserialized request body.
    RequestBody,
    /// Not bound from client input (path variables, headers, injected state).
    Unbound,
}

impl ArgumentBinding {
    /// Whether arguments with this binding carry client-controlled text.
    pub const fn is_client_input(self) -> bool {
        matches!(self, Self::QueryParam | Self::RequestBody)
    }
}

/// A pending handler call.
#[derive(Debug, PartialEq)]
pub struct Invocation {
    /// Name of the endpoint, used in logs and errors.
    pub endpoint: String,
    /// How the first argument is bound.
    pub binding: ArgumentBinding,
    /// Positional handler arguments.
    pub args: Vec<Value>,
}

impl Invocation {
    /// Describes a call to `endpoint`.
    pub fn new(endpoint: impl Into<String>, binding: ArgumentBinding, args: Vec<Value>) -> Self {
        Self {
            endpoint: endpoint.into(),
            binding,
            args,
        }
    }
}

/// A request rejected because its bound argument could not be sanitized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("endpoint `{endpoint}` rejected: {source}")]
pub struct InterceptError {
    endpoint: String,
    #[source]
    source: ScanError,
}

impl InterceptError {
    /// The endpoint whose invocation was rejected.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The underlying scan failure.
    pub const fn scan_error(&self) -> &ScanError {
        &self.source
    }

    /// HTTP status a routing layer should answer with.
    ///
    /// `400` when the client's input has an unacceptable shape, `500` when a
    /// record type cannot be rebuilt.
    pub const fn status_code(&self) -> u16 {
        if self.source.is_client_error() {
            400
        } else {
            500
        }
    }
}

/// Scans the bound argument of each matching invocation.
#[derive(Debug)]
pub struct SanitizingInterceptor<P = HtmlPolicy> {
    scanner: Scanner<P>,
    logger: Logger,
}

impl Default for SanitizingInterceptor<HtmlPolicy> {
    fn default() -> Self {
        Self::new(Scanner::default())
    }
}

impl<P: SanitizationPolicy> SanitizingInterceptor<P> {
    /// Wraps `scanner` with a discarding logger.
    pub fn new(scanner: Scanner<P>) -> Self {
        Self {
            scanner,
            logger: Logger::root(Discard, o!()),
        }
    }

    /// Routes interception logs to `logger`.
    #[must_use]
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// The scanner applied to bound arguments.
    pub const fn scanner(&self) -> &Scanner<P> {
        &self.scanner
    }

    /// Whether `invocation` has a client-bound first argument to sanitize.
    pub fn applies_to(&self, invocation: &Invocation) -> bool {
        invocation.binding.is_client_input() && !invocation.args.is_empty()
    }

    /// Replaces the first argument with its sanitized copy.
    ///
    /// Invocations that [`applies_to`](Self::applies_to) rejects are returned
    /// unchanged. Other arguments are never touched.
    pub fn prepare(&self, mut invocation: Invocation) -> Result<Invocation, InterceptError> {
        if !self.applies_to(&invocation) {
            return Ok(invocation);
        }

        let logger = self.logger.new(o!("endpoint" => invocation.endpoint.clone()));
        info!(logger, "intercepted endpoint"; "binding" => ?invocation.binding);

        match self.scanner.scan(&invocation.args[0]) {
            Ok(sanitized) => {
                invocation.args[0] = sanitized;
                debug!(logger, "executing handler with sanitized argument";
                    "argument" => &invocation.args[0],
                );
                Ok(invocation)
            }
            Err(source) => {
                error!(logger, "sanitization rejected request"; "error" => %source);
                Err(InterceptError {
                    endpoint: invocation.endpoint,
                    source,
                })
            }
        }
    }

    /// Prepares `invocation` and runs `handler` on its arguments.
    ///
    /// On failure the handler is not called. For intercepted endpoints the
    /// handler's response is logged at debug level.
    pub fn intercept<R, F>(&self, invocation: Invocation, handler: F) -> Result<R, InterceptError>
    where
        R: fmt::Debug,
        F: FnOnce(Vec<Value>) -> R,
    {
        let intercepted = self.applies_to(&invocation);
        let invocation = self.prepare(invocation)?;
        let endpoint = invocation.endpoint;
        let response = handler(invocation.args);
        if intercepted {
            debug!(self.logger, "handler completed";
                "endpoint" => endpoint,
                "response" => ?response,
            );
        }
        Ok(response)
    }
}
