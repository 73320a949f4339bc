//! Compiled rule trees.
//!
//! Compilation collapses each scope of a [`RuleTree`] into a single lookup
//! table from name to [`Action`]. The result is immutable and holds no
//! per-call state, so one `Ruler` can serve any number of concurrent
//! traversals.

use std::collections::HashMap;

use super::rules::RuleTree;

/// What the traversal does with a name matched at a scope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Clear the field (records) or delete the entry (maps).
    Remove,
    /// Keep the value and apply the nested ruler beneath it.
    Descend(Ruler),
}

/// The executable form of a [`RuleTree`].
///
/// When a name is declared both for removal and for descent at the same
/// scope, removal wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ruler {
    actions: HashMap<String, Action>,
}

impl Ruler {
    /// Compiles `rules` into a ruler.
    #[must_use]
    pub fn compile(rules: &RuleTree) -> Self {
        let mut actions = HashMap::new();
        for (name, child) in rules.scopes() {
            actions.insert(name.to_owned(), Action::Descend(Ruler::compile(child)));
        }
        // Removals are inserted last so they replace any descent under the same name.
        for name in rules.removes() {
            actions.insert(name.to_owned(), Action::Remove);
        }
        Self { actions }
    }

    /// Looks up the action registered for `name` at this scope.
    #[inline]
    pub fn action(&self, name: &str) -> Option<&Action> {
        self.actions.get(name)
    }

    /// Returns the number of names with an action at this scope.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns `true` if no name has an action at this scope.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Iterates the names and actions of this scope in arbitrary order.
    pub fn actions(&self) -> impl Iterator<Item = (&str, &Action)> + '_ {
        self.actions
            .iter()
            .map(|(name, action)| (name.as_str(), action))
    }
}

impl From<&RuleTree> for Ruler {
    fn from(rules: &RuleTree) -> Self {
        Self::compile(rules)
    }
}

/// Rebuilds an equivalent raw rule tree from a compiled ruler.
///
/// Descents shadowed by a removal at compile time are not recovered; the
/// rebuilt tree behaves identically when compiled again.
impl From<&Ruler> for RuleTree {
    fn from(ruler: &Ruler) -> Self {
        ruler
            .actions()
            .fold(RuleTree::new(), |rules, (name, action)| match action {
                Action::Remove => rules.remove(name),
                Action::Descend(child) => rules.scope(name, RuleTree::from(child)),
            })
    }
}
