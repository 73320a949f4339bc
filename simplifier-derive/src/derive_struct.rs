//! Struct-specific `Simplifiable` derivation.
//!
//! Named, tuple, and unit structs share one code path: fields are bound with a
//! braced pattern (`Self { 0: __simplify_0, .. }` for tuple structs) and
//! rebuilt with a braced constructor.

use proc_macro2::{Ident, TokenStream};
use quote::quote;
use syn::{DataStruct, Result, WherePredicate};

use crate::{
    container::ContainerOptions,
    transform::{binding_pattern, collect_fields, copy_constructor, visit_statements, DeriveContext},
};

pub(crate) struct StructDeriveOutput {
    pub(crate) copy_body: TokenStream,
    pub(crate) apply_body: TokenStream,
    pub(crate) bounds: Vec<WherePredicate>,
}

pub(crate) fn derive_struct(
    self_ident: &Ident,
    data: &DataStruct,
    generics: &syn::Generics,
    container: &ContainerOptions,
    crate_root: &TokenStream,
) -> Result<StructDeriveOutput> {
    let fields = collect_fields(&data.fields, container)?;
    let pattern = binding_pattern(&fields);

    let mut bounds = Vec::new();
    let mut ctx = DeriveContext {
        self_ident,
        generics,
        crate_root,
        bounds: &mut bounds,
    };
    let constructor = copy_constructor(&mut ctx, &fields);
    let visits = visit_statements(&ctx, &fields);

    Ok(StructDeriveOutput {
        copy_body: quote! {
            let Self #pattern = self;
            Self #constructor
        },
        apply_body: quote! {
            let Self #pattern = self;
            #(#visits)*
        },
        bounds,
    })
}
