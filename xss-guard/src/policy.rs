//! Sanitization policies for text leaves.
//!
//! Policies are pure string transformations. They do not traverse structures
//! or decide which strings to touch; the scanner does that.

use std::fmt;

use ammonia::Builder;

/// Basic text formatting tags allowed by [`HtmlPolicy::formatting_and_links`].
pub const FORMATTING_TAGS: &[&str] = &[
    "b", "i", "font", "s", "u", "o", "sup", "sub", "ins", "del", "strong", "strike", "tt", "code",
    "big", "small", "br", "span", "em",
];

/// URL schemes allowed in link `href`s.
pub const LINK_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Elements removed together with everything inside them.
pub const CONTENT_STRIPPED_TAGS: &[&str] = &["script", "style"];

/// Turns untrusted text into text that is safe to render as HTML.
///
/// Implementations must be deterministic and side-effect free: the same input
/// always yields the same output, and nothing outside the call is touched.
pub trait SanitizationPolicy: Send + Sync {
    /// Returns the sanitized form of `raw`.
    fn sanitize(&self, raw: &str) -> String;
}

impl<F> SanitizationPolicy for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn sanitize(&self, raw: &str) -> String {
        self(raw)
    }
}

/// Allow-list HTML sanitizer, fixed at construction.
///
/// Disallowed elements are removed (keeping their text), `script` and `style`
/// are dropped with their content, and every attribute outside the allow-list
/// (including `on*` event handlers) is stripped.
pub struct HtmlPolicy {
    cleaner: Builder<'static>,
    name: &'static str,
}

impl HtmlPolicy {
    /// Basic formatting markup plus hyperlinks.
    ///
    /// Links keep only `href` with an `http`, `https` or `mailto` URL and get
    /// `rel="nofollow"`.
    #[must_use]
    pub fn formatting_and_links() -> Self {
        let mut cleaner = Self::base();
        cleaner
            .add_tags(FORMATTING_TAGS)
            .add_tags(["a"])
            .add_tag_attributes("a", ["href"])
            .add_url_schemes(LINK_SCHEMES)
            .link_rel(Some("nofollow"));
        Self {
            cleaner,
            name: "formatting_and_links",
        }
    }

    /// No markup at all; only text survives.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            cleaner: Self::base(),
            name: "strict",
        }
    }

    fn base() -> Builder<'static> {
        let mut cleaner = Builder::empty();
        cleaner
            .add_clean_content_tags(CONTENT_STRIPPED_TAGS)
            .strip_comments(true);
        cleaner
    }

    /// Short name of the allow-list, for logs.
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl Default for HtmlPolicy {
    fn default() -> Self {
        Self::formatting_and_links()
    }
}

impl fmt::Debug for HtmlPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HtmlPolicy")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl SanitizationPolicy for HtmlPolicy {
    fn sanitize(&self, raw: &str) -> String {
        self.cleaner.clean(raw).to_string()
    }
}
