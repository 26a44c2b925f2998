//! `Structural` derive implementation.
//!
//! Generates a `shapeq::Structural` impl whose descriptor lists the compared
//! fields in declaration order and whose strategy is a `CompositeComparer`
//! over the same fields. Fieldless enums get a discriminant comparer and a
//! `FixedLayout` impl.
//!
//! # Note
//!
//! The generated code refers to `::shapeq`. Inside `shapeq` itself this
//! resolves through `extern crate self as shapeq`.

use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{
    parse_macro_input, parse_quote, Data, DataEnum, DeriveInput, Fields, Index, LitStr, Member,
    Type,
};

use crate::utils::{
    has_integer_repr, has_stable_layout, is_skipped, parse_container_options, reject_lifetimes,
    repr_idents, ContainerOptions,
};

/// Main entry point for the Structural derive macro.
pub fn derive_structural(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_structural_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_structural_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    reject_lifetimes(&input.generics)?;
    let options = parse_container_options(input)?;

    match &input.data {
        Data::Struct(data) => derive_struct(input, &data.fields, &options),
        Data::Enum(data) => derive_enum(input, data, &options),
        Data::Union(data) => Err(syn::Error::new_spanned(
            data.union_token,
            "Structural derive does not support unions",
        )),
    }
}

/// A field that takes part in equality and hashing.
struct ComparedField {
    name: LitStr,
    member: Member,
    ty: Type,
}

fn derive_struct(
    input: &DeriveInput,
    fields: &Fields,
    options: &ContainerOptions,
) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    let mut compared = Vec::new();
    let mut any_skipped = false;
    for (index, field) in fields.iter().enumerate() {
        if is_skipped(field)? {
            any_skipped = true;
            continue;
        }
        let (label, member) = match &field.ident {
            Some(ident) => (ident.unraw().to_string(), Member::Named(ident.clone())),
            None => (index.to_string(), Member::Unnamed(Index::from(index))),
        };
        compared.push(ComparedField {
            name: LitStr::new(&label, Span::call_site()),
            member,
            ty: field.ty.clone(),
        });
    }

    let mut generics = input.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!(::shapeq::Structural));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let names: Vec<_> = compared.iter().map(|field| &field.name).collect();
    let types: Vec<_> = compared.iter().map(|field| &field.ty).collect();
    let members: Vec<_> = compared.iter().map(|field| &field.member).collect();

    let session = if compared.is_empty() {
        format_ident!("_session")
    } else {
        format_ident!("session")
    };

    let equatable = options.equatable.then(equatable_hook);

    let (fixed_layout, fixed_layout_impl) = if options.fixed_layout {
        let layout_impl = fixed_layout_struct_impl(input, fields, any_skipped)?;
        (Some(fixed_layout_hook()), layout_impl)
    } else {
        (None, quote! {})
    };

    Ok(quote! {
        impl #impl_generics ::shapeq::Structural for #name #ty_generics #where_clause {
            fn describe() -> ::shapeq::TypeDescriptor {
                ::shapeq::TypeDescriptor::composite::<Self>(::std::vec![
                    #(::shapeq::FieldInfo::of::<#types>(#names)),*
                ])
            }

            fn strategy(
                plan: &::shapeq::StrategyDescriptor,
                #session: &mut ::shapeq::CompileSession,
            ) -> ::core::result::Result<::shapeq::Strategy<Self>, ::shapeq::StructuralError> {
                ::shapeq::CompositeComparer::<Self>::builder(plan)
                    #(.field(#names, #session.handle::<#types>()?, |value| &value.#members))*
                    .finish()
            }

            #equatable

            #fixed_layout
        }

        #fixed_layout_impl
    })
}

/// Padding check and `FixedLayout` impl for `#[structural(fixed_layout)]`.
fn fixed_layout_struct_impl(
    input: &DeriveInput,
    fields: &Fields,
    any_skipped: bool,
) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    if !has_stable_layout(&repr_idents(input)?) {
        return Err(syn::Error::new_spanned(
            name,
            "`fixed_layout` requires #[repr(C)] or #[repr(transparent)]",
        ));
    }
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "`fixed_layout` is not supported on generic types",
        ));
    }
    if any_skipped {
        return Err(syn::Error::new_spanned(
            name,
            "`fixed_layout` compares every byte; skipped fields are not allowed",
        ));
    }

    let types: Vec<_> = fields.iter().map(|field| &field.ty).collect();
    let message = LitStr::new(
        &format!("`{name}` has padding bytes and cannot be `fixed_layout`"),
        Span::call_site(),
    );

    // SAFETY (of the emitted impl): the const assertion proves the struct
    // has no padding, the where clause proves every field is fixed-layout,
    // and `FixedLayout: Copy` rules out interior mutability.
    Ok(quote! {
        const _: () = ::core::assert!(
            ::core::mem::size_of::<#name>() == 0 #(+ ::core::mem::size_of::<#types>())*,
            #message
        );

        #[allow(unsafe_code)]
        unsafe impl ::shapeq::FixedLayout for #name
        where
            #(#types: ::shapeq::FixedLayout,)*
        {
        }
    })
}

fn derive_enum(
    input: &DeriveInput,
    data: &DataEnum,
    options: &ContainerOptions,
) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Structural derive does not support generic enums",
        ));
    }
    if let Some(variant) = data
        .variants
        .iter()
        .find(|variant| !matches!(variant.fields, Fields::Unit))
    {
        return Err(syn::Error::new_spanned(
            variant,
            "Structural derive supports only fieldless enums",
        ));
    }
    if !has_integer_repr(&repr_idents(input)?) {
        return Err(syn::Error::new_spanned(
            name,
            "Structural enums require an integer representation, e.g. #[repr(u8)]",
        ));
    }

    let equatable = options.equatable.then(equatable_hook);
    let fixed_layout = fixed_layout_hook();

    // SAFETY (of the emitted impl): a fieldless enum with an integer repr is
    // exactly one initialized integer.
    Ok(quote! {
        impl ::shapeq::Structural for #name {
            fn describe() -> ::shapeq::TypeDescriptor {
                ::shapeq::TypeDescriptor::enumeration::<Self>()
            }

            fn strategy(
                plan: &::shapeq::StrategyDescriptor,
                _session: &mut ::shapeq::CompileSession,
            ) -> ::core::result::Result<::shapeq::Strategy<Self>, ::shapeq::StructuralError> {
                ::shapeq::expect_shape(plan, &[::shapeq::TypeShape::Primitive])?;
                ::core::result::Result::Ok(::std::boxed::Box::new(
                    ::shapeq::DiscriminantComparer::new(|value: &Self| *value as u128),
                ))
            }

            #equatable

            #fixed_layout
        }

        #[allow(unsafe_code)]
        unsafe impl ::shapeq::FixedLayout for #name {}
    })
}

fn equatable_hook() -> TokenStream2 {
    quote! {
        fn equatable() -> ::core::option::Option<::shapeq::EquatableOps<Self>> {
            ::core::option::Option::Some(::shapeq::EquatableOps::of())
        }
    }
}

fn fixed_layout_hook() -> TokenStream2 {
    quote! {
        fn fixed_layout() -> ::core::option::Option<::shapeq::RawView<Self>> {
            ::core::option::Option::Some(::shapeq::RawView::of())
        }
    }
}
