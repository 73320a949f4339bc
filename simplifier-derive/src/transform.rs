//! Shared field handling for struct and enum derivation.
//!
//! Structs and enum variants are both lowered to a list of [`FieldSpec`]s, and
//! every field produces two pieces of code:
//!
//! - a **copy expression** used by `deep_copy`;
//! - a **visit statement** used by `apply_ruler`.
//!
//! Bindings are generated as `Self { 0: __simplify_0, .. }`-style braced
//! patterns, which work uniformly for named, tuple, and unit shapes.
//!
//! ## Field Transformation Rules
//!
//! | Strategy | Copy | Visit |
//! |----------|------|-------|
//! | `Walk` | `Simplifiable::deep_copy` | `visit_field` |
//! | `Opaque` | `Clone::clone` | `visit_opaque_field` |
//! | `Skip` | `Default::default()` | none |
//!
//! A `keep` field drops the `Default` requirement: a walked one is visited
//! with `descend_field`, an opaque one is cloned and never visited.

use proc_macro2::{Ident, Span, TokenStream};
use quote::{format_ident, quote, quote_spanned};
use syn::{ext::IdentExt, spanned::Spanned, Fields, LitStr, Member, Result, WherePredicate};

use crate::{
    container::ContainerOptions,
    generics::{field_bound, mentions_ident, param_bounds, uses_generics},
    strategy::{parse_field_options, Strategy},
};

/// One field of a struct or enum variant, ready for code generation.
pub(crate) struct FieldSpec {
    binding: Ident,
    member: Member,
    rule_name: String,
    ty: syn::Type,
    strategy: Strategy,
    keep: bool,
    span: Span,
}

/// Accumulated state during field processing.
pub(crate) struct DeriveContext<'a> {
    pub(crate) self_ident: &'a Ident,
    pub(crate) generics: &'a syn::Generics,
    pub(crate) crate_root: &'a TokenStream,
    pub(crate) bounds: &'a mut Vec<WherePredicate>,
}

/// Parses the fields of a struct or variant into [`FieldSpec`]s.
///
/// Named fields are matched by identifier (after `rename_all`), tuple fields
/// by their index, and `#[simplify(rename = "...")]` overrides both.
pub(crate) fn collect_fields(fields: &Fields, container: &ContainerOptions) -> Result<Vec<FieldSpec>> {
    fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let options = parse_field_options(&field.attrs)?;
            let (member, default_name) = match &field.ident {
                Some(ident) => {
                    let name = ident.unraw().to_string();
                    let name = container
                        .rename_all
                        .map_or_else(|| name.clone(), |rule| rule.apply(&name));
                    (Member::Named(ident.clone()), name)
                }
                None => (Member::Unnamed(index.into()), index.to_string()),
            };
            Ok(FieldSpec {
                binding: format_ident!("__simplify_{}", index),
                member,
                rule_name: options.rename.unwrap_or(default_name),
                ty: field.ty.clone(),
                strategy: options.strategy,
                keep: options.keep,
                span: field.span(),
            })
        })
        .collect()
}

/// Destructuring pattern body binding every copied or visited field.
///
/// Produces `{ a: __simplify_0, 1: __simplify_1, .. }`.
pub(crate) fn binding_pattern(fields: &[FieldSpec]) -> TokenStream {
    let bindings = fields
        .iter()
        .filter(|field| field.strategy != Strategy::Skip)
        .map(|field| {
            let member = &field.member;
            let binding = &field.binding;
            quote! { #member: #binding }
        });
    quote! { { #(#bindings,)* .. } }
}

/// Constructor body rebuilding the value from copy expressions.
pub(crate) fn copy_constructor(ctx: &mut DeriveContext<'_>, fields: &[FieldSpec]) -> TokenStream {
    let members: Vec<TokenStream> = fields
        .iter()
        .map(|field| {
            let member = &field.member;
            let expr = copy_expr(ctx, field);
            quote! { #member: #expr }
        })
        .collect();
    quote! { { #(#members),* } }
}

/// Visit statements for every field that takes part in traversal.
pub(crate) fn visit_statements(ctx: &DeriveContext<'_>, fields: &[FieldSpec]) -> Vec<TokenStream> {
    fields
        .iter()
        .filter_map(|field| visit_stmt(ctx, field))
        .collect()
}

fn copy_expr(ctx: &mut DeriveContext<'_>, field: &FieldSpec) -> TokenStream {
    let crate_root = ctx.crate_root;
    let binding = &field.binding;
    let span = field.span;
    match (&field.strategy, field.keep) {
        (Strategy::Walk, false) => {
            require(ctx, field, &quote! { #crate_root::Simplifiable + ::core::default::Default });
            quote_spanned! { span => #crate_root::Simplifiable::deep_copy(#binding) }
        }
        (Strategy::Walk, true) => {
            require(ctx, field, &quote! { #crate_root::Simplifiable });
            quote_spanned! { span => #crate_root::Simplifiable::deep_copy(#binding) }
        }
        (Strategy::Opaque, false) => {
            require(ctx, field, &quote! { ::core::clone::Clone + ::core::default::Default });
            quote_spanned! { span => ::core::clone::Clone::clone(#binding) }
        }
        (Strategy::Opaque, true) => {
            require(ctx, field, &quote! { ::core::clone::Clone });
            quote_spanned! { span => ::core::clone::Clone::clone(#binding) }
        }
        (Strategy::Skip, _) => {
            require(ctx, field, &quote! { ::core::default::Default });
            quote_spanned! { span => ::core::default::Default::default() }
        }
    }
}

fn visit_stmt(ctx: &DeriveContext<'_>, field: &FieldSpec) -> Option<TokenStream> {
    let crate_root = ctx.crate_root;
    let binding = &field.binding;
    let span = field.span;
    let name = LitStr::new(&field.rule_name, span);
    match (&field.strategy, field.keep) {
        (Strategy::Walk, false) => Some(quote_spanned! { span =>
            #crate_root::visit_field(#binding, #name, ruler, walk);
        }),
        (Strategy::Walk, true) => Some(quote_spanned! { span =>
            #crate_root::descend_field(#binding, #name, ruler, walk);
        }),
        (Strategy::Opaque, false) => Some(quote_spanned! { span =>
            #crate_root::visit_opaque_field(#binding, #name, ruler);
        }),
        (Strategy::Opaque, true) | (Strategy::Skip, _) => None,
    }
}

fn require(ctx: &mut DeriveContext<'_>, field: &FieldSpec, bound: &TokenStream) {
    if !uses_generics(&field.ty, ctx.generics) {
        return;
    }
    if mentions_ident(&field.ty, ctx.self_ident) {
        ctx.bounds
            .extend(param_bounds(&field.ty, ctx.generics, bound));
    } else {
        ctx.bounds.push(field_bound(&field.ty, bound));
    }
}
