//! Struct-specific `Record` derivation.
//!
//! This module turns named fields into descriptor entries and `get`/`set`
//! match arms. Field types are checked against `FieldValue` at the use site so
//! errors point at the offending field.

use proc_macro2::{Ident, TokenStream};
use quote::{quote, quote_spanned};
use syn::{spanned::Spanned, DataStruct, Fields, Result};

use crate::{
    field::{parse_field_access, FieldAccess},
    types::scalar_name,
};

pub(crate) struct StructDeriveOutput {
    pub(crate) descriptors: Vec<TokenStream>,
    pub(crate) get_arms: Vec<TokenStream>,
    pub(crate) set_arms: Vec<TokenStream>,
}

pub(crate) fn derive_struct(
    name: &Ident,
    data: DataStruct,
    crate_root: &TokenStream,
) -> Result<StructDeriveOutput> {
    let fields = match data.fields {
        Fields::Named(fields) => fields,
        Fields::Unnamed(fields) => {
            return Err(syn::Error::new(
                fields.span(),
                format!("`Record` requires named fields; `{name}` is a tuple struct"),
            ));
        }
        Fields::Unit => {
            return Err(syn::Error::new(
                name.span(),
                format!("`Record` requires named fields; `{name}` is a unit struct"),
            ));
        }
    };

    let field_value_path = quote! { #crate_root::FieldValue };
    let mut descriptors = Vec::new();
    let mut get_arms = Vec::new();
    let mut set_arms = Vec::new();

    for field in fields.named {
        let span = field.span();
        let access = parse_field_access(&field.attrs)?;
        let ident = field.ident.expect("named field should have an identifier");
        let ty = &field.ty;
        let field_name = ident.to_string();
        let field_name = field_name.strip_prefix("r#").unwrap_or(&field_name);

        if access != FieldAccess::Skip {
            if let Some(scalar) = scalar_name(ty) {
                return Err(syn::Error::new(
                    span,
                    format!(
                        "`{scalar}` fields are never sanitized; mark `{field_name}` with #[record(skip)]"
                    ),
                ));
            }
        }

        let readable = access.readable();
        let writable = access.writable();
        descriptors.push(quote! {
            #crate_root::FieldDescriptor::new(#field_name, #readable, #writable)
        });

        if readable {
            get_arms.push(quote_spanned! { span =>
                #field_name => <#ty as #field_value_path>::read(&self.#ident),
            });
        }
        if writable {
            set_arms.push(quote_spanned! { span =>
                #field_name => {
                    <#ty as #field_value_path>::write(&mut self.#ident, value);
                    true
                }
            });
        }
    }

    Ok(StructDeriveOutput {
        descriptors,
        get_arms,
        set_arms,
    })
}
