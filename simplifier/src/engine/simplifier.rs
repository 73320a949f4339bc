//! The compiled entrypoint: copy, then simplify.

use std::sync::Arc;

use super::{
    rules::RuleTree,
    ruler::Ruler,
    simplifiable::Simplifiable,
    traverse::{UnmatchedPolicy, Walk},
};

/// A compiled rule set that produces simplified copies of values.
///
/// The source [`RuleTree`] is kept alongside the compiled [`Ruler`] so a
/// simplifier can be extended with more rules later. Cloning is cheap: the
/// ruler is shared.
///
/// ```rust
/// use simplifier::{RuleTree, Simplifiable, Simplifier};
///
/// #[derive(Simplifiable, Debug, PartialEq)]
/// struct Event {
///     user: String,
///     token: String,
/// }
///
/// let simplifier = Simplifier::new(RuleTree::new().remove("token"));
/// let event = Event { user: "ana".into(), token: "tok_123".into() };
///
/// let safe = simplifier.simplify(&event);
/// assert_eq!(safe, Event { user: "ana".into(), token: String::new() });
/// assert_eq!(event.token, "tok_123");
/// ```
#[derive(Clone, Debug)]
pub struct Simplifier {
    rules: RuleTree,
    ruler: Arc<Ruler>,
    unmatched: UnmatchedPolicy,
}

impl Simplifier {
    /// Compiles `rules` into a simplifier with the default
    /// [`UnmatchedPolicy::Ignore`].
    #[must_use]
    pub fn new(rules: RuleTree) -> Self {
        let ruler = Arc::new(Ruler::compile(&rules));
        Self {
            rules,
            ruler,
            unmatched: UnmatchedPolicy::default(),
        }
    }

    /// Selects how fields and keys that no rule names are treated.
    #[must_use]
    pub fn with_unmatched_policy(mut self, policy: UnmatchedPolicy) -> Self {
        self.unmatched = policy;
        self
    }

    /// Returns a new simplifier whose rules are `self`'s rules merged with
    /// `extension`. The unmatched policy carries over.
    #[must_use]
    pub fn extend(&self, extension: &RuleTree) -> Self {
        Self::new(self.rules.merge(extension)).with_unmatched_policy(self.unmatched)
    }

    /// Returns a simplified deep copy of `original`.
    ///
    /// `original` is never modified. Names that match nothing on the value are
    /// ignored.
    #[must_use]
    pub fn simplify<T: Simplifiable>(&self, original: &T) -> T {
        let mut copy = original.deep_copy();
        self.apply(&mut copy);
        copy
    }

    /// Simplifies a value the caller already owns, in place.
    pub fn apply<T: Simplifiable>(&self, value: &mut T) {
        value.apply_ruler(&self.ruler, Walk::new(&self.ruler, self.unmatched));
    }

    /// The source rules this simplifier was compiled from.
    pub fn rules(&self) -> &RuleTree {
        &self.rules
    }

    /// The compiled root ruler.
    pub fn ruler(&self) -> &Ruler {
        &self.ruler
    }

    /// How names without a rule are treated.
    pub fn unmatched_policy(&self) -> UnmatchedPolicy {
        self.unmatched
    }
}

impl Default for Simplifier {
    fn default() -> Self {
        Self::new(RuleTree::new())
    }
}

impl From<RuleTree> for Simplifier {
    fn from(rules: RuleTree) -> Self {
        Self::new(rules)
    }
}

impl AsRef<RuleTree> for Simplifier {
    fn as_ref(&self) -> &RuleTree {
        &self.rules
    }
}

/// Convenience method for simplifying any [`Simplifiable`] value.
///
/// This trait is blanket-implemented for all `Simplifiable` types.
pub trait SimplifyExt: Simplifiable {
    /// Returns a copy of `self` simplified by `simplifier`.
    #[must_use]
    fn simplified(&self, simplifier: &Simplifier) -> Self {
        simplifier.simplify(self)
    }
}

impl<T> SimplifyExt for T where T: Simplifiable {}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{Simplifier, SimplifyExt};
    use crate::{merge, RuleTree, UnmatchedPolicy};

    #[test]
    fn simplify_leaves_original_untouched() {
        let mut original: HashMap<String, i32> = HashMap::new();
        original.insert("a".into(), 1);
        original.insert("b".into(), 2);

        let simplifier = Simplifier::new(RuleTree::new().remove("a"));
        let simplified = simplifier.simplify(&original);

        assert_eq!(simplified.len(), 1);
        assert_eq!(simplified["b"], 2);
        assert_eq!(original.len(), 2);
    }

    #[test]
    fn extend_merges_rules_and_keeps_policy() {
        let base = Simplifier::new(RuleTree::new().remove("a"))
            .with_unmatched_policy(UnmatchedPolicy::ReapplyRoot);
        let extended = base.extend(&RuleTree::new().remove("b"));

        assert!(extended.rules().is_removed("a"));
        assert!(extended.rules().is_removed("b"));
        assert!(!base.rules().is_removed("b"));
        assert_eq!(extended.unmatched_policy(), UnmatchedPolicy::ReapplyRoot);
    }

    #[test]
    fn compiled_simplifiers_merge_like_raw_rules() {
        let a = Simplifier::new(RuleTree::new().remove("a"));
        let b = RuleTree::new().remove("b");
        let merged = merge(&a, &b);
        assert_eq!(merged, RuleTree::new().remove_all(["a", "b"]));
    }

    #[test]
    fn default_simplifier_changes_nothing() {
        let mut original: HashMap<String, i32> = HashMap::new();
        original.insert("a".into(), 1);
        assert_eq!(original.simplified(&Simplifier::default()), original);
    }

    #[test]
    fn clones_share_the_compiled_ruler() {
        let simplifier = Simplifier::new(RuleTree::new().remove("a"));
        let clone = simplifier.clone();
        assert!(std::ptr::eq(simplifier.ruler(), clone.ruler()));
    }
}
