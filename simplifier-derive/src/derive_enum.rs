//! Enum-specific `Simplifiable` derivation.
//!
//! Each variant becomes one match arm in `deep_copy` and one in
//! `apply_ruler`. Rules address the fields of whichever variant is present;
//! variant names themselves never take part in matching.

use proc_macro2::{Ident, TokenStream};
use quote::quote;
use syn::{spanned::Spanned, DataEnum, Result, WherePredicate};

use crate::{
    container::ContainerOptions,
    transform::{binding_pattern, collect_fields, copy_constructor, visit_statements, DeriveContext},
};

pub(crate) struct EnumDeriveOutput {
    pub(crate) copy_body: TokenStream,
    pub(crate) apply_body: TokenStream,
    pub(crate) bounds: Vec<WherePredicate>,
}

pub(crate) fn derive_enum(
    self_ident: &Ident,
    data: &DataEnum,
    generics: &syn::Generics,
    container: &ContainerOptions,
    crate_root: &TokenStream,
) -> Result<EnumDeriveOutput> {
    let mut copy_arms = Vec::new();
    let mut apply_arms = Vec::new();
    let mut bounds = Vec::new();

    for variant in &data.variants {
        if let Some(attr) = variant.attrs.iter().find(|attr| attr.path().is_ident("simplify")) {
            return Err(syn::Error::new(
                attr.span(),
                "#[simplify] is not supported on enum variants; annotate the fields instead",
            ));
        }

        let variant_ident = &variant.ident;
        let fields = collect_fields(&variant.fields, container)?;
        let pattern = binding_pattern(&fields);

        let mut ctx = DeriveContext {
            self_ident,
            generics,
            crate_root,
            bounds: &mut bounds,
        };
        let constructor = copy_constructor(&mut ctx, &fields);
        let visits = visit_statements(&ctx, &fields);

        copy_arms.push(quote! {
            Self::#variant_ident #pattern => Self::#variant_ident #constructor,
        });
        apply_arms.push(quote! {
            Self::#variant_ident #pattern => { #(#visits)* }
        });
    }

    if data.variants.is_empty() {
        return Ok(EnumDeriveOutput {
            copy_body: quote! { match *self {} },
            apply_body: quote! { match *self {} },
            bounds,
        });
    }

    Ok(EnumDeriveOutput {
        copy_body: quote! {
            match self {
                #(#copy_arms)*
            }
        },
        apply_body: quote! {
            match self {
                #(#apply_arms)*
            }
        },
        bounds,
    })
}
