//! Email heuristics deciding which text leaves bypass sanitization.
//!
//! HTML sanitizers escape `@` and friends, which corrupts addresses. A leaf
//! that both contains `@` and matches [`EMAIL_PATTERN`] is returned verbatim.

use std::sync::LazyLock;

use regex::Regex;

/// The address pattern. The `@domain` group is optional, so `name.co` matches
/// on its own; [`is_email_bypass`] additionally requires an `@`.
pub const EMAIL_PATTERN: &str = r"^[A-Za-z0-9._%+-]+(?:@[A-Za-z0-9.-]+)?\.[A-Za-z]{2,}$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"));

/// Returns `true` if `value` contains `@`.
pub fn looks_like_email(value: &str) -> bool {
    value.contains('@')
}

/// Returns `true` if the whole of `value` matches [`EMAIL_PATTERN`].
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Both heuristics hold: the leaf is passed through unsanitized.
pub fn is_email_bypass(value: &str) -> bool {
    looks_like_email(value) && is_valid_email(value)
}
