//! Derive macro for `regform_shared::FieldSource`.
//!
//! ```ignore
//! #[derive(regform_fields_derive::FieldSource)]
//! struct Step {
//!     name: Option<String>,
//!     #[field(name = "phoneNumber")]
//!     phone_number: Option<String>,
//! }
//! ```

use proc_macro::TokenStream;
use quote::quote;
use std::collections::BTreeSet;
use syn::{Attribute, Data, DeriveInput, Fields, GenericArgument, Ident, PathArguments, Type};

/// Derive `regform_shared::FieldSource` for a struct of string fields.
///
/// Supported field types are `String` and `Option<String>`. Field wire names
/// default to the Rust identifier and can be overridden with
/// `#[field(name = "...")]`; `#[field(skip)]` excludes a field.
#[proc_macro_derive(FieldSource, attributes(field))]
pub fn derive_field_source(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    match expand_field_source(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_field_source(input: &DeriveInput) -> Result<proc_macro2::TokenStream, syn::Error> {
    let Data::Struct(struct_data) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "FieldSource can only be derived for structs",
        ));
    };

    let fields = match &struct_data.fields {
        Fields::Named(fields) => &fields.named,
        _ => {
            return Err(syn::Error::new_spanned(
                &struct_data.fields,
                "FieldSource requires named fields",
            ));
        },
    };

    let mut seen = BTreeSet::new();
    let mut names = Vec::new();
    let mut getters = Vec::new();
    let mut setters = Vec::new();
    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let options = parse_field_options(&field.attrs, ident)?;
        if options.skip {
            continue;
        }
        if !seen.insert(options.name.clone()) {
            return Err(syn::Error::new_spanned(
                ident,
                format!("duplicate field name `{}`", options.name),
            ));
        }
        let shape = field_shape(&field.ty).ok_or_else(|| {
            syn::Error::new_spanned(
                &field.ty,
                "FieldSource fields must be `String` or `Option<String>`",
            )
        })?;

        names.push(syn::LitStr::new(
            &options.name,
            proc_macro2::Span::call_site(),
        ));
        getters.push(expand_getter(ident, shape));
        setters.push(expand_setter(ident, shape));
    }

    if names.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "FieldSource requires at least one field",
        ));
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    Ok(quote! {
        impl #impl_generics regform_shared::FieldSource for #name #ty_generics #where_clause {
            const FIELD_NAMES: &'static [&'static str] = &[#(#names),*];

            fn field(&self, name: &str) -> Option<&str> {
                match name {
                    #(#names => #getters,)*
                    _ => None,
                }
            }

            fn set_field(&mut self, name: &str, value: String) -> bool {
                match name {
                    #(#names => {
                        #setters
                        true
                    },)*
                    _ => false,
                }
            }
        }
    })
}

struct FieldOptions {
    name: String,
    skip: bool,
}

fn parse_field_options(attrs: &[Attribute], ident: &Ident) -> Result<FieldOptions, syn::Error> {
    let mut name_override: Option<String> = None;
    let mut skip = false;
    for attr in attrs {
        if !attr.path().is_ident("field") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: syn::LitStr = meta.value()?.parse()?;
                if name_override.is_some() {
                    return Err(meta.error("duplicate field(name = ...)"));
                }
                name_override = Some(value.value());
                return Ok(());
            }
            if meta.path.is_ident("skip") {
                skip = true;
                return Ok(());
            }
            Err(meta.error("unsupported field attribute"))
        })?;
    }
    Ok(FieldOptions {
        name: name_override.unwrap_or_else(|| ident.to_string()),
        skip,
    })
}

#[derive(Copy, Clone, Debug)]
enum FieldShape {
    Plain,
    Optional,
}

fn field_shape(ty: &Type) -> Option<FieldShape> {
    if is_string(ty) {
        return Some(FieldShape::Plain);
    }
    option_inner(ty)
        .filter(|inner| is_string(inner))
        .map(|_| FieldShape::Optional)
}

fn expand_getter(ident: &Ident, shape: FieldShape) -> proc_macro2::TokenStream {
    match shape {
        FieldShape::Plain => quote! { Some(self.#ident.as_str()) },
        FieldShape::Optional => quote! { self.#ident.as_deref() },
    }
}

fn expand_setter(ident: &Ident, shape: FieldShape) -> proc_macro2::TokenStream {
    match shape {
        FieldShape::Plain => quote! { self.#ident = value; },
        FieldShape::Optional => quote! { self.#ident = Some(value); },
    }
}

fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    })
}

fn is_string(ty: &Type) -> bool {
    let Type::Path(type_path) = ty else {
        return false;
    };
    type_path
        .path
        .segments
        .last()
        .is_some_and(|segment| segment.ident == "String" && segment.arguments.is_empty())
}
