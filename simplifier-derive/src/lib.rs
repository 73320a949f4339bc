//! Derive macro for `simplifier`.
//!
//! This crate generates the copy and traversal code behind
//! `#[derive(Simplifiable)]`. It:
//! - reads `#[simplify(...)]` container and field attributes
//! - emits a `Simplifiable` implementation that deep-copies every field and
//!   offers each named field to the active ruler
//!
//! It does **not** define rules. Those live in the main `simplifier` crate and
//! are applied at runtime.

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
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

use proc_macro2::TokenStream;
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote};
use syn::{parse_macro_input, Data, DeriveInput, Result};

mod container;
mod derive_enum;
mod derive_struct;
mod generics;
mod strategy;
mod transform;
use container::parse_container_options;
use derive_enum::derive_enum;
use derive_struct::derive_struct;
use generics::add_field_bounds;

/// Derives `simplifier::Simplifiable` for structs and enums.
///
/// Every named field becomes addressable by rules under its identifier; tuple
/// fields are addressed by index (`"0"`, `"1"`, ...).
///
/// # Container Attributes
///
/// - `#[simplify(rename_all = "...")]` - Convert every field identifier to
///   `lowercase`, `UPPERCASE`, `PascalCase`, `camelCase`, `snake_case`,
///   `SCREAMING_SNAKE_CASE` or `kebab-case` before matching. Useful when rule
///   documents were written against another naming convention.
///
/// # Field Attributes
///
/// - **No annotation**: The field is deep-copied and walked. Its type must
///   implement `Simplifiable` and `Default` (removal resets it to the default).
///
/// - `#[simplify(opaque)]`: The field is cloned instead of deep-copied and
///   only honours removal; nested scopes do not reach into it. Use this for
///   external types like `chrono::DateTime` that don't implement
///   `Simplifiable`. The type must implement `Clone` and `Default`.
///
/// - `#[simplify(skip)]`: The field is outside the rule schema. It is left at
///   its `Default` value in every copy and is never matched by name.
///
/// - `#[simplify(keep)]`: The field is never cleared by a removal rule, so its
///   type does not need `Default`. Walked fields are still descended into.
///   Combines with `opaque`, in which case the field is only cloned.
///
/// - `#[simplify(rename = "...")]`: Match the field under a different name.
///   Combines with `opaque`; overrides `rename_all`.
///
/// Unions are rejected at compile time.
///
/// # Generics
///
/// Bounds are added per field type, only for fields whose type mentions a
/// type parameter. `PhantomData<T>` does not count as a use of `T`. Fields
/// that refer back to the type being derived bound the parameters they
/// mention instead.
#[proc_macro_derive(Simplifiable, attributes(simplify))]
pub fn derive_simplifiable(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Returns the token stream to reference the simplifier crate root.
///
/// Handles crate renaming (e.g., `redact = { package = "simplifier", ... }`).
/// Inside the simplifier crate itself the root is still `::simplifier`, which
/// resolves through its `extern crate self as simplifier` alias.
fn crate_root() -> TokenStream {
    match crate_name("simplifier") {
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Ok(FoundCrate::Itself) | Err(_) => quote! { ::simplifier },
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

    let container = parse_container_options(&attrs)?;
    let crate_root = crate_root();

    let (copy_body, apply_body, bounds) = match &data {
        Data::Struct(data) => {
            let output = derive_struct(&ident, data, &generics, &container, &crate_root)?;
            (output.copy_body, output.apply_body, output.bounds)
        }
        Data::Enum(data) => {
            let output = derive_enum(&ident, data, &generics, &container, &crate_root)?;
            (output.copy_body, output.apply_body, output.bounds)
        }
        Data::Union(u) => {
            return Err(syn::Error::new(
                u.union_token.span,
                "`Simplifiable` cannot be derived for unions",
            ));
        }
    };

    let impl_generics = add_field_bounds(generics, &bounds);
    let (impl_generics, ty_generics, where_clause) = impl_generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #crate_root::Simplifiable for #ident #ty_generics #where_clause {
            fn deep_copy(&self) -> Self {
                #copy_body
            }

            #[allow(unused_variables)]
            fn apply_ruler(&mut self, ruler: &#crate_root::Ruler, walk: #crate_root::Walk<'_>) {
                #apply_body
            }
        }
    })
}
