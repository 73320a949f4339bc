//! Declarative rule trees and the merge operation.
//!
//! A [`RuleTree`] is the raw, uncompiled form of a redaction policy. Each
//! scope names the properties to remove at that level and, for properties
//! that are kept, the nested rules to apply beneath them.
//!
//! Rule trees are plain data: build them in code, load them from a document
//! (see `RuleTree::from_json` with the `json` feature), or combine them with
//! [`merge`]. They only become executable once compiled into a
//! [`Ruler`](super::Ruler).

use std::collections::{BTreeMap, BTreeSet};

/// Hierarchical redaction rules for one scope.
///
/// ```rust
/// use simplifier::RuleTree;
///
/// let rules = RuleTree::new()
///     .remove("password")
///     .scope("profile", RuleTree::new().remove_all(["email", "phone"]));
///
/// assert!(rules.is_removed("password"));
/// assert!(rules.child("profile").unwrap().is_removed("email"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(deny_unknown_fields))]
pub struct RuleTree {
    /// Names cleared (record fields) or deleted (map keys) at this scope.
    #[cfg_attr(
        feature = "json",
        serde(
            default,
            deserialize_with = "null_as_default",
            skip_serializing_if = "BTreeSet::is_empty"
        )
    )]
    remove_properties: BTreeSet<String>,
    /// Nested rules applied beneath a kept name.
    #[cfg_attr(
        feature = "json",
        serde(
            default,
            alias = "property_rules",
            deserialize_with = "null_as_default",
            skip_serializing_if = "BTreeMap::is_empty"
        )
    )]
    property_simplifiers: BTreeMap<String, RuleTree>,
}

impl RuleTree {
    /// Creates an empty rule tree. Applying it leaves every value unchanged.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `name` to the removal set of this scope.
    #[must_use]
    pub fn remove(mut self, name: impl Into<String>) -> Self {
        self.remove_properties.insert(name.into());
        self
    }

    /// Adds every name in `names` to the removal set of this scope.
    #[must_use]
    pub fn remove_all<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.remove_properties
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Attaches nested rules beneath `name`.
    ///
    /// Attaching a second scope under the same name merges it into the first.
    #[must_use]
    pub fn scope(mut self, name: impl Into<String>, rules: RuleTree) -> Self {
        self.property_simplifiers
            .entry(name.into())
            .or_default()
            .absorb(&rules);
        self
    }

    /// Returns `true` if `name` is in the removal set of this scope.
    pub fn is_removed(&self, name: &str) -> bool {
        self.remove_properties.contains(name)
    }

    /// Returns the nested rules declared beneath `name`, if any.
    pub fn child(&self, name: &str) -> Option<&RuleTree> {
        self.property_simplifiers.get(name)
    }

    /// Iterates the removal set of this scope in sorted order.
    pub fn removes(&self) -> impl Iterator<Item = &str> + '_ {
        self.remove_properties.iter().map(String::as_str)
    }

    /// Iterates the nested scopes of this level in sorted order.
    pub fn scopes(&self) -> impl Iterator<Item = (&str, &RuleTree)> + '_ {
        self.property_simplifiers
            .iter()
            .map(|(name, rules)| (name.as_str(), rules))
    }

    /// Returns `true` if this scope declares no removals and no nested scopes.
    pub fn is_empty(&self) -> bool {
        self.remove_properties.is_empty() && self.property_simplifiers.is_empty()
    }

    /// Returns a new tree combining `self` with `extension`.
    ///
    /// Removal sets are unioned at every scope; nested scopes present on both
    /// sides are merged recursively; nested scopes present on one side are
    /// copied through. Neither input is modified.
    #[must_use]
    pub fn merge(&self, extension: &RuleTree) -> RuleTree {
        let mut merged = self.clone();
        merged.absorb(extension);
        merged
    }

    fn absorb(&mut self, extension: &RuleTree) {
        self.remove_properties
            .extend(extension.remove_properties.iter().cloned());
        for (name, rules) in &extension.property_simplifiers {
            self.property_simplifiers
                .entry(name.clone())
                .or_default()
                .absorb(rules);
        }
    }
}

/// Reads an explicit `null` the same way as a missing field.
#[cfg(feature = "json")]
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de> + Default,
{
    let value: Option<T> = serde::Deserialize::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

impl AsRef<RuleTree> for RuleTree {
    fn as_ref(&self) -> &RuleTree {
        self
    }
}

/// Merges two rule sets, raw or compiled, into a new raw [`RuleTree`].
///
/// Anything that exposes its source rules through `AsRef<RuleTree>` can be
/// merged, including a compiled [`Simplifier`](crate::Simplifier). The result
/// can be compiled again.
///
/// Merging is associative and commutative with respect to the set of names
/// removed at each scope.
#[must_use]
pub fn merge<A, B>(base: &A, extension: &B) -> RuleTree
where
    A: AsRef<RuleTree> + ?Sized,
    B: AsRef<RuleTree> + ?Sized,
{
    base.as_ref().merge(extension.as_ref())
}
