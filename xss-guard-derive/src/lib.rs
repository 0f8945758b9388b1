//! Derive macros for `xss-guard`.
//!
//! This crate generates the field-visitor code behind `#[derive(Record)]`. It:
//! - reads `#[record(...)]` container and field attributes
//! - emits a `Record` implementation exposing field descriptors, accessors and
//!   a zero-argument constructor
//!
//! It does **not** sanitize anything. Scanning and policies live in the main
//! `xss-guard` crate and are applied at runtime.

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
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

use proc_macro2::TokenStream;
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote};
use syn::{parse_macro_input, parse_quote, spanned::Spanned, Data, DeriveInput, Result};

mod container;
mod derive_struct;
mod field;
mod types;
use container::{parse_container_options, ContainerOptions};
use derive_struct::derive_struct;

/// Derives `xss_guard::Record` for structs with named fields.
///
/// The generated impl lets the scanner discover the struct's fields, read and
/// write them by name, and build a fresh instance to receive sanitized values.
///
/// # Container Attributes
///
/// - `#[record(constructor = path::to::fn)]` - Use `fn() -> Result<Self, E>` (with
///   `E: Display`) as the zero-argument constructor. A returned error becomes a
///   `ConstructionError`. Without this attribute the struct must implement `Default`.
///
/// # Field Attributes
///
/// - **No annotation**: The field is readable and writable. Its type must implement
///   `xss_guard::FieldValue` (`String`, `Option<String>`, or your own newtype).
///
/// - `#[record(skip)]`: The field has no accessors. It is not copied; the new instance
///   keeps the constructor's value. Required for scalar fields (`i32`, `bool`, ...).
///
/// - `#[record(read_only)]` / `#[record(write_only)]`: The field exposes a single
///   accessor. The scanner only rewrites fields with both, so these are skipped too,
///   but `read_only` fields still show up in equality checks and logging.
///
/// Enums, unions, tuple structs and unit structs are rejected at compile time.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Returns the token stream to reference the xss-guard crate root.
///
/// Handles crate renaming (e.g., `guard = { package = "xss-guard", ... }`)
/// and internal usage (when derive is used inside the xss-guard crate itself).
fn crate_root() -> TokenStream {
    match crate_name("xss-guard") {
        Ok(FoundCrate::Itself) => quote! { crate },
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Err(_) => quote! { ::xss_guard },
    }
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        attrs,
        ..
    } = input;

    let ContainerOptions { constructor } = parse_container_options(&attrs)?;
    let crate_root = crate_root();

    let output = match data {
        Data::Struct(data) => derive_struct(&ident, data, &crate_root)?,
        Data::Enum(data) => {
            return Err(syn::Error::new(
                data.enum_token.span(),
                "`Record` cannot be derived for enums; records have a fixed field set",
            ));
        }
        Data::Union(u) => {
            return Err(syn::Error::new(
                u.union_token.span(),
                "`Record` cannot be derived for unions",
            ));
        }
    };

    let uses_default = constructor.is_none();
    let instantiate_body = match constructor {
        Some(path) => quote! {
            match #path() {
                ::core::result::Result::Ok(value) => ::core::result::Result::Ok(
                    ::std::boxed::Box::new(value) as ::std::boxed::Box<dyn #crate_root::Record>,
                ),
                ::core::result::Result::Err(err) => ::core::result::Result::Err(
                    #crate_root::ConstructionError::new(
                        ::core::stringify!(#ident),
                        ::std::string::ToString::to_string(&err),
                    ),
                ),
            }
        },
        None => quote! {
            ::core::result::Result::Ok(::std::boxed::Box::new(
                <Self as ::core::default::Default>::default(),
            ) as ::std::boxed::Box<dyn #crate_root::Record>)
        },
    };

    // `Record: Any + Debug + Send`, so generic records need these on `Self`.
    let mut generics = generics;
    let (_, self_generics, _) = generics.split_for_impl();
    let self_ty: syn::Type = parse_quote!(#ident #self_generics);
    let where_clause = generics.make_where_clause();
    where_clause.predicates.push(parse_quote!(
        #self_ty: ::core::fmt::Debug + ::core::marker::Send + 'static
    ));
    if uses_default {
        where_clause
            .predicates
            .push(parse_quote!(#self_ty: ::core::default::Default));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let descriptors = &output.descriptors;
    let get_arms = &output.get_arms;
    let set_arms = &output.set_arms;

    Ok(quote! {
        impl #impl_generics #crate_root::Record for #ident #ty_generics #where_clause {
            fn type_name(&self) -> &'static str {
                ::core::stringify!(#ident)
            }

            fn fields(&self) -> &'static [#crate_root::FieldDescriptor] {
                const FIELDS: &[#crate_root::FieldDescriptor] = &[#(#descriptors),*];
                FIELDS
            }

            #[allow(unused_variables)]
            fn get(&self, name: &str) -> ::core::option::Option<&str> {
                match name {
                    #(#get_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            #[allow(unused_variables)]
            fn set(&mut self, name: &str, value: ::std::string::String) -> bool {
                match name {
                    #(#set_arms)*
                    _ => false,
                }
            }

            fn instantiate(
                &self,
            ) -> ::core::result::Result<
                ::std::boxed::Box<dyn #crate_root::Record>,
                #crate_root::ConstructionError,
            > {
                #instantiate_body
            }

            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }

            fn into_any(self: ::std::boxed::Box<Self>) -> ::std::boxed::Box<dyn ::core::any::Any> {
                self
            }
        }
    })
}
