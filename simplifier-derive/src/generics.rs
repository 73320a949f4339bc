//! Generic type parameter handling and trait bound management.
//!
//! Bounds are added per field type, and only for fields whose type mentions a
//! generic parameter. A field of type `Vec<T>` therefore requires
//! `Vec<T>: Simplifiable + Default` rather than over-constraining `T` itself.
//!
//! ## PhantomData Handling
//!
//! `PhantomData<T>` does not count as a use of `T`:
//!
//! ```ignore
//! struct TypedId<T> {
//!     id: String,
//!     _marker: PhantomData<T>,  // T should NOT require Simplifiable
//! }
//! ```
//!
//! `PhantomData<T>` is `Simplifiable` and `Default` for every `T`, so
//! `TypedId<DateTime<Utc>>` works even though `DateTime<Utc>` isn't
//! `Simplifiable`.
//!
//! ## Recursive Types
//!
//! A field such as `next: Option<Box<Page<T>>>` mentions the container itself.
//! Bounding that field type would ask the compiler to prove
//! `Page<T>: Simplifiable` while proving it, so such fields bound the type
//! parameters they mention instead (`T: Simplifiable + Default`).

use syn::{parse_quote, Ident, WherePredicate};

pub(crate) fn collect_generics_from_type(
    ty: &syn::Type,
    generics: &syn::Generics,
    result: &mut Vec<Ident>,
) {
    match ty {
        syn::Type::Path(path) => {
            if let Some(qself) = &path.qself {
                collect_generics_from_type(&qself.ty, generics, result);
            }
            if let Some(segment) = path.path.segments.last() {
                if segment.ident == "PhantomData" {
                    return;
                }
            }
            for segment in &path.path.segments {
                if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                    for arg in &args.args {
                        if let syn::GenericArgument::Type(inner_ty) = arg {
                            collect_generics_from_type(inner_ty, generics, result);
                        }
                    }
                }

                // Check if this type identifier matches a generic parameter
                for param in generics.type_params() {
                    if segment.ident == param.ident && !result.iter().any(|g| g == &param.ident) {
                        result.push(param.ident.clone());
                    }
                }
            }
        }
        syn::Type::Array(array) => collect_generics_from_type(&array.elem, generics, result),
        syn::Type::Slice(slice) => collect_generics_from_type(&slice.elem, generics, result),
        syn::Type::Paren(paren) => collect_generics_from_type(&paren.elem, generics, result),
        syn::Type::Group(group) => collect_generics_from_type(&group.elem, generics, result),
        syn::Type::Reference(reference) => {
            collect_generics_from_type(&reference.elem, generics, result);
        }
        syn::Type::Tuple(tuple) => {
            for elem in &tuple.elems {
                collect_generics_from_type(elem, generics, result);
            }
        }
        _ => {}
    }
}

/// Returns `true` if any path segment of `ty` is `ident`.
pub(crate) fn mentions_ident(ty: &syn::Type, ident: &Ident) -> bool {
    match ty {
        syn::Type::Path(path) => {
            if let Some(qself) = &path.qself {
                if mentions_ident(&qself.ty, ident) {
                    return true;
                }
            }
            path.path.segments.iter().any(|segment| {
                if segment.ident == *ident {
                    return true;
                }
                let syn::PathArguments::AngleBracketed(args) = &segment.arguments else {
                    return false;
                };
                args.args.iter().any(|arg| match arg {
                    syn::GenericArgument::Type(inner) => mentions_ident(inner, ident),
                    _ => false,
                })
            })
        }
        syn::Type::Array(array) => mentions_ident(&array.elem, ident),
        syn::Type::Slice(slice) => mentions_ident(&slice.elem, ident),
        syn::Type::Paren(paren) => mentions_ident(&paren.elem, ident),
        syn::Type::Group(group) => mentions_ident(&group.elem, ident),
        syn::Type::Reference(reference) => mentions_ident(&reference.elem, ident),
        syn::Type::Tuple(tuple) => tuple.elems.iter().any(|elem| mentions_ident(elem, ident)),
        _ => false,
    }
}

/// Returns `true` if `ty` mentions one of the container's type parameters.
pub(crate) fn uses_generics(ty: &syn::Type, generics: &syn::Generics) -> bool {
    let mut used = Vec::new();
    collect_generics_from_type(ty, generics, &mut used);
    !used.is_empty()
}

/// Appends `predicates` to the where clause of `generics`.
pub(crate) fn add_field_bounds(
    mut generics: syn::Generics,
    predicates: &[WherePredicate],
) -> syn::Generics {
    if predicates.is_empty() {
        return generics;
    }
    let where_clause = generics.make_where_clause();
    for predicate in predicates {
        where_clause.predicates.push(predicate.clone());
    }
    generics
}

/// Builds the predicate `ty: bound` for a field type.
pub(crate) fn field_bound(ty: &syn::Type, bound: &proc_macro2::TokenStream) -> WherePredicate {
    parse_quote!(#ty: #bound)
}

/// Builds `param: bound` for every type parameter `ty` mentions.
pub(crate) fn param_bounds(
    ty: &syn::Type,
    generics: &syn::Generics,
    bound: &proc_macro2::TokenStream,
) -> Vec<WherePredicate> {
    let mut used = Vec::new();
    collect_generics_from_type(ty, generics, &mut used);
    used.into_iter()
        .map(|param| parse_quote!(#param: #bound))
        .collect()
}

#[cfg(test)]
mod tests {
    use quote::quote;

    use super::*;

    fn generics(tokens: proc_macro2::TokenStream) -> syn::Generics {
        let input: syn::DeriveInput = syn::parse2(quote! { struct Dummy #tokens; })
            .expect("should parse as DeriveInput");
        input.generics
    }

    fn parse_type(tokens: proc_macro2::TokenStream) -> syn::Type {
        syn::parse2(tokens).expect("should parse as Type")
    }

    #[test]
    fn direct_parameter_is_used() {
        let generics = generics(quote! { <T> });
        assert!(uses_generics(&parse_type(quote! { T }), &generics));
    }

    #[test]
    fn nested_parameter_is_used() {
        let generics = generics(quote! { <K, V> });
        let mut used = Vec::new();
        collect_generics_from_type(
            &parse_type(quote! { std::collections::HashMap<K, Vec<Option<V>>> }),
            &generics,
            &mut used,
        );
        assert_eq!(used.len(), 2);
    }

    #[test]
    fn array_and_tuple_elements_are_inspected() {
        let generics = generics(quote! { <T> });
        assert!(uses_generics(&parse_type(quote! { [T; 4] }), &generics));
        assert!(uses_generics(&parse_type(quote! { (u8, T) }), &generics));
    }

    #[test]
    fn phantom_data_is_not_a_use() {
        let generics = generics(quote! { <T> });
        assert!(!uses_generics(
            &parse_type(quote! { std::marker::PhantomData<T> }),
            &generics
        ));
    }

    #[test]
    fn concrete_type_is_not_a_use() {
        let generics = generics(quote! { <T> });
        assert!(!uses_generics(&parse_type(quote! { Vec<String> }), &generics));
    }

    #[test]
    fn self_reference_is_detected() {
        let page: Ident = syn::parse_str("Page").unwrap();
        assert!(mentions_ident(&parse_type(quote! { Option<Box<Page<T>>> }), &page));
        assert!(mentions_ident(&parse_type(quote! { Vec<(u8, Page<T>)> }), &page));
        assert!(!mentions_ident(&parse_type(quote! { Vec<T> }), &page));
    }

    #[test]
    fn param_bounds_cover_each_mentioned_parameter() {
        let generics = generics(quote! { <K, V, U> });
        let bound = quote! { ::core::default::Default };
        let bounds = param_bounds(&parse_type(quote! { Map<K, Box<Node<V>>> }), &generics, &bound);
        assert_eq!(bounds.len(), 2);
    }

    #[test]
    fn field_bounds_extend_where_clause() {
        let generics = generics(quote! { <T> });
        let bound = quote! { ::core::default::Default };
        let predicate = field_bound(&parse_type(quote! { Vec<T> }), &bound);
        let generics = add_field_bounds(generics, &[predicate]);
        assert_eq!(generics.where_clause.unwrap().predicates.len(), 1);
    }
}
