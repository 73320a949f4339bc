//! Parsing of `#[simplify(...)]` field attributes.
//!
//! This module maps attribute syntax to copy/traversal decisions and produces
//! structured errors for invalid forms.

use syn::{spanned::Spanned, Attribute, LitStr, Meta, Result};

/// Field handling based on `#[simplify(...)]` attributes.
///
/// ## Strategy Mapping
///
/// | Attribute | Strategy | Copy | Traversal |
/// |-----------|----------|------|-----------|
/// | None | `Walk` | `Simplifiable::deep_copy` | full (`visit_field`) |
/// | `#[simplify(opaque)]` | `Opaque` | `Clone::clone` | removal only |
/// | `#[simplify(skip)]` | `Skip` | `Default::default()` | never visited |
///
/// `#[simplify(keep)]` combines with `Walk` and `Opaque`: the field is never
/// cleared, so its type does not need `Default`. A kept walked field is still
/// descended into; a kept opaque field is only cloned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Strategy {
    /// No annotation: deep-copy the field and walk into it.
    Walk,
    /// `#[simplify(opaque)]`: clone the field and only honour removal.
    ///
    /// External types like `DateTime<Utc>` that don't implement
    /// `Simplifiable` use this.
    Opaque,
    /// `#[simplify(skip)]`: the field is outside the schema.
    ///
    /// It is left at its default value in every copy and never matched by name.
    Skip,
}

/// Options parsed from a single field.
#[derive(Clone, Debug)]
pub(crate) struct FieldOptions {
    pub(crate) strategy: Strategy,
    /// Rule name override from `#[simplify(rename = "...")]`.
    pub(crate) rename: Option<String>,
    /// `#[simplify(keep)]`: removal rules never clear this field.
    pub(crate) keep: bool,
}

fn set_strategy(target: &mut Option<Strategy>, next: Strategy, span: proc_macro2::Span) -> Result<()> {
    if target.is_some() {
        return Err(syn::Error::new(
            span,
            "`skip` and `opaque` cannot be combined on the same field",
        ));
    }
    *target = Some(next);
    Ok(())
}

pub(crate) fn parse_field_options(attrs: &[Attribute]) -> Result<FieldOptions> {
    let mut strategy: Option<Strategy> = None;
    let mut rename: Option<String> = None;
    let mut keep = false;

    for attr in attrs {
        if !attr.path().is_ident("simplify") {
            continue;
        }

        match &attr.meta {
            Meta::List(list) => {
                list.parse_nested_meta(|meta| {
                    if meta.path.is_ident("skip") {
                        set_strategy(&mut strategy, Strategy::Skip, meta.path.span())
                    } else if meta.path.is_ident("opaque") {
                        set_strategy(&mut strategy, Strategy::Opaque, meta.path.span())
                    } else if meta.path.is_ident("keep") {
                        if keep {
                            return Err(meta.error("duplicate `keep` on the same field"));
                        }
                        keep = true;
                        Ok(())
                    } else if meta.path.is_ident("rename") {
                        if rename.is_some() {
                            return Err(meta.error("duplicate `rename` on the same field"));
                        }
                        let name: LitStr = meta.value()?.parse()?;
                        rename = Some(name.value());
                        Ok(())
                    } else {
                        Err(meta.error(format!(
                            "unknown field option `{}`; expected `skip`, `opaque`, `keep` or `rename`",
                            meta.path
                                .get_ident()
                                .map_or_else(|| "?".to_string(), ToString::to_string)
                        )))
                    }
                })?;
            }
            Meta::Path(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "expected an option list (e.g., #[simplify(skip)])",
                ));
            }
            Meta::NameValue(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "name-value syntax is not supported for #[simplify]",
                ));
            }
        }
    }

    let strategy = strategy.unwrap_or(Strategy::Walk);
    let attr_span = || {
        attrs
            .iter()
            .find(|attr| attr.path().is_ident("simplify"))
            .map_or_else(proc_macro2::Span::call_site, Spanned::span)
    };
    if strategy == Strategy::Skip && rename.is_some() {
        return Err(syn::Error::new(
            attr_span(),
            "a skipped field has no rule name; remove `rename`",
        ));
    }
    if strategy == Strategy::Skip && keep {
        return Err(syn::Error::new(
            attr_span(),
            "a skipped field is never visited; remove `keep`",
        ));
    }

    Ok(FieldOptions {
        strategy,
        rename,
        keep,
    })
}
