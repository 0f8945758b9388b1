//! Parsing of `#[record(...)]` field attributes.
//!
//! This module maps attribute syntax to accessor decisions and produces
//! structured errors for invalid forms.

use proc_macro2::Span;
use syn::{spanned::Spanned, Attribute, Meta, Result};

/// Accessors a field exposes to the scanner.
///
/// ## Attribute Mapping
///
/// | Attribute | Access | Scanner behavior |
/// |-----------|--------|------------------|
/// | None | `ReadWrite` | Read, sanitize, write into the new instance |
/// | `#[record(read_only)]` | `ReadOnly` | Skipped, still visible to `get` |
/// | `#[record(write_only)]` | `WriteOnly` | Skipped, still accepted by `set` |
/// | `#[record(skip)]` | `Skip` | Skipped, invisible |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum FieldAccess {
    ReadWrite,
    ReadOnly,
    WriteOnly,
    Skip,
}

impl FieldAccess {
    pub(crate) const fn readable(self) -> bool {
        matches!(self, Self::ReadWrite | Self::ReadOnly)
    }

    pub(crate) const fn writable(self) -> bool {
        matches!(self, Self::ReadWrite | Self::WriteOnly)
    }
}

fn set_access(target: &mut Option<FieldAccess>, next: FieldAccess, span: Span) -> Result<()> {
    if target.is_some() {
        return Err(syn::Error::new(
            span,
            "multiple access options specified on the same field",
        ));
    }
    *target = Some(next);
    Ok(())
}

pub(crate) fn parse_field_access(attrs: &[Attribute]) -> Result<FieldAccess> {
    let mut access: Option<FieldAccess> = None;
    for attr in attrs {
        if !attr.path().is_ident("record") {
            continue;
        }

        match &attr.meta {
            Meta::Path(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "expected an access option (e.g., #[record(skip)])",
                ));
            }
            Meta::List(list) => {
                list.parse_nested_meta(|meta| {
                    let next = if meta.path.is_ident("skip") {
                        FieldAccess::Skip
                    } else if meta.path.is_ident("read_only") {
                        FieldAccess::ReadOnly
                    } else if meta.path.is_ident("write_only") {
                        FieldAccess::WriteOnly
                    } else {
                        return Err(meta.error(
                            "unknown field option; expected `skip`, `read_only` or `write_only`",
                        ));
                    };
                    set_access(&mut access, next, meta.path.span())
                })?;
            }
            Meta::NameValue(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "name-value syntax is not supported for #[record]",
                ));
            }
        }
    }

    Ok(access.unwrap_or(FieldAccess::ReadWrite))
}
