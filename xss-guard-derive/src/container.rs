//! Container-level attribute parsing for `#[derive(Record)]`.
//!
//! This module handles attributes on the struct itself, not on fields.

use syn::{Attribute, Meta, Result};

/// Options parsed from container-level `#[record(...)]` attributes.
#[derive(Clone, Debug, Default)]
pub(crate) struct ContainerOptions {
    /// Fallible zero-argument constructor; `Default::default()` when absent.
    pub(crate) constructor: Option<syn::Path>,
}

/// Parses container-level `#[record(...)]` attributes.
pub(crate) fn parse_container_options(attrs: &[Attribute]) -> Result<ContainerOptions> {
    let mut options = ContainerOptions::default();

    for attr in attrs {
        if !attr.path().is_ident("record") {
            continue;
        }

        match &attr.meta {
            Meta::Path(_) => {
                // Bare #[record] on container - currently no meaning, ignore
            }
            Meta::List(list) => {
                list.parse_nested_meta(|meta| {
                    if meta.path.is_ident("constructor") {
                        if options.constructor.is_some() {
                            return Err(meta.error("duplicate `constructor` option"));
                        }
                        let path: syn::Path = meta.value()?.parse()?;
                        options.constructor = Some(path);
                        Ok(())
                    } else {
                        Err(meta.error(format!(
                            "unknown container option `{}`; expected `constructor`",
                            meta.path
                                .get_ident()
                                .map_or_else(|| "?".to_string(), ToString::to_string)
                        )))
                    }
                })?;
            }
            Meta::NameValue(nv) => {
                return Err(syn::Error::new_spanned(
                    nv,
                    "name-value syntax is not supported for container-level #[record]",
                ));
            }
        }
    }

    Ok(options)
}

#[cfg(test)]
mod tests {
    use quote::quote;
    use syn::DeriveInput;

    use super::*;

    fn parse_attrs(tokens: proc_macro2::TokenStream) -> Vec<Attribute> {
        let input: DeriveInput = syn::parse2(quote! {
            #tokens
            struct Dummy;
        })
        .expect("should parse as DeriveInput");
        input.attrs
    }

    #[test]
    fn no_attribute_returns_defaults() {
        let attrs = parse_attrs(quote! {});
        let options = parse_container_options(&attrs).unwrap();
        assert!(options.constructor.is_none());
    }

    #[test]
    fn constructor_path_is_parsed() {
        let attrs = parse_attrs(quote! { #[record(constructor = forms::Signup::try_new)] });
        let options = parse_container_options(&attrs).unwrap();
        let path = options.constructor.unwrap();
        assert_eq!(path.segments.len(), 3);
        assert_eq!(path.segments.last().unwrap().ident, "try_new");
    }

    #[test]
    fn duplicate_constructor_errors() {
        let attrs = parse_attrs(quote! {
            #[record(constructor = first)]
            #[record(constructor = second)]
        });
        let result = parse_container_options(&attrs);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("duplicate `constructor`"));
    }

    #[test]
    fn unknown_option_errors() {
        let attrs = parse_attrs(quote! { #[record(unknown_option)] });
        let result = parse_container_options(&attrs);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("unknown container option"));
    }

    #[test]
    fn bare_record_on_container_is_ignored() {
        let attrs = parse_attrs(quote! { #[record] });
        let options = parse_container_options(&attrs).unwrap();
        assert!(options.constructor.is_none());
    }

    #[test]
    fn other_attributes_are_ignored() {
        let attrs = parse_attrs(quote! {
            #[derive(Debug)]
            #[serde(rename_all = "camelCase")]
        });
        let options = parse_container_options(&attrs).unwrap();
        assert!(options.constructor.is_none());
    }
}
