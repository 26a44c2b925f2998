//! Attribute parsing shared by the derive.

use syn::{Attribute, DeriveInput, Field, Generics, Ident};

/// Options from `#[structural(..)]` on the type.
#[derive(Default)]
pub struct ContainerOptions {
    pub equatable: bool,
    pub fixed_layout: bool,
}

pub fn parse_container_options(input: &DeriveInput) -> syn::Result<ContainerOptions> {
    let mut options = ContainerOptions::default();
    for attr in structural_attrs(&input.attrs) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("equatable") {
                options.equatable = true;
                Ok(())
            } else if meta.path.is_ident("fixed_layout") {
                options.fixed_layout = true;
                Ok(())
            } else if meta.path.is_ident("skip") {
                Err(meta.error("`skip` applies to fields, not to the type"))
            } else {
                Err(meta.error("expected `equatable` or `fixed_layout`"))
            }
        })?;
    }
    Ok(options)
}

/// Whether the field carries `#[structural(skip)]`.
pub fn is_skipped(field: &Field) -> syn::Result<bool> {
    let mut skip = false;
    for attr in structural_attrs(&field.attrs) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else {
                Err(meta.error("expected `skip`"))
            }
        })?;
    }
    Ok(skip)
}

fn structural_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("structural"))
}

/// Identifiers listed in the type's `#[repr(..)]` attributes.
pub fn repr_idents(input: &DeriveInput) -> syn::Result<Vec<Ident>> {
    let mut reprs = Vec::new();
    for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("repr")) {
        attr.parse_nested_meta(|meta| {
            if let Some(ident) = meta.path.get_ident() {
                reprs.push(ident.clone());
            }
            // Skip arguments such as `align(8)`.
            if meta.input.peek(syn::token::Paren) {
                let _args;
                syn::parenthesized!(_args in meta.input);
            }
            Ok(())
        })?;
    }
    Ok(reprs)
}

const INTEGER_REPRS: &[&str] = &[
    "u8", "u16", "u32", "u64", "u128", "usize", "i8", "i16", "i32", "i64", "i128", "isize",
];

pub fn has_integer_repr(reprs: &[Ident]) -> bool {
    reprs
        .iter()
        .any(|repr| INTEGER_REPRS.iter().any(|int| repr == int))
}

pub fn has_stable_layout(reprs: &[Ident]) -> bool {
    reprs.iter().any(|repr| repr == "C" || repr == "transparent")
}

/// Every `Structural` type is `'static`.
pub fn reject_lifetimes(generics: &Generics) -> syn::Result<()> {
    match generics.lifetimes().next() {
        Some(lifetime) => Err(syn::Error::new_spanned(
            lifetime,
            "Structural types must be 'static; lifetime parameters are not supported",
        )),
        None => Ok(()),
    }
}
