//! Recursive XSS sanitization of inbound request values.
//!
//! This crate walks a request argument and replaces every free-text leaf with
//! a sanitized copy before a handler sees it. It separates:
//! - **Traversal**: [`Scanner`] walks [`Value`] graphs (mappings, sequences and
//!   [`Record`]s) and rebuilds them with sanitized leaves.
//! - **Policy**: [`SanitizationPolicy`] decides what a single string becomes.
//!   [`HtmlPolicy`] is an allow-list HTML cleaner.
//!
//! Key rules:
//! - Text leaves that look like email addresses are left untouched, since HTML
//!   cleaning corrupts them. See [`is_email_bypass`].
//! - Nested mappings are flattened into their parent; mapping values other
//!   than text or mappings are rejected.
//! - Record fields are sanitized only when they have both a getter and a
//!   setter. `#[derive(Record)]` generates the field access code.
//! - Scanning never mutates its input and fails closed: an error means the
//!   request must be rejected, not forwarded.
//!
//! [`SanitizingInterceptor`] applies a scanner to the first argument of a
//! handler call bound from a query string or request body.
//!
//! What it does not do:
//! - parse HTML itself (that is `ammonia`'s job)
//! - sanitize numbers, dates or binary data
//! - route requests or depend on a web framework

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::needless_ifs,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::struct_excessive_bools,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::future_not_send,
    clippy::option_if_let_else,
    clippy::from_over_into,
    clippy::manual_inspect
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

pub use xss_guard_derive::Record;

#[allow(unused_extern_crates)]
extern crate self as xss_guard;

// Module declarations
mod email;
mod error;
mod intercept;
mod policy;
mod record;
mod scan;
pub mod slog;
mod value;

// Re-exports
pub use email::{is_email_bypass, is_valid_email, looks_like_email, EMAIL_PATTERN};
pub use error::ScanError;
pub use intercept::{ArgumentBinding, InterceptError, Invocation, SanitizingInterceptor};
pub use policy::{
    HtmlPolicy, SanitizationPolicy, CONTENT_STRIPPED_TAGS, FORMATTING_TAGS, LINK_SCHEMES,
};
pub use record::{ConstructionError, FieldDescriptor, FieldValue, Record};
pub use scan::{RecordFailureMode, ScanOptions, Scanner};
pub use value::{Mapping, Value};
