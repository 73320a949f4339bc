//! Traversal machinery shared by derived and hand-written implementations.
//!
//! Every record scope funnels its fields through [`visit_field`] (or
//! [`visit_opaque_field`]) and every map scope funnels its entries through
//! [`retain_entry`]. Those helpers are the only places that interpret an
//! [`Action`], so records, enums, maps and dynamic JSON values all share the
//! same semantics.

use std::borrow::Cow;

use super::{
    ruler::{Action, Ruler},
    simplifiable::Simplifiable,
};

/// How the traversal treats a field or key that no rule names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnmatchedPolicy {
    /// Leave unmatched fields and keys alone. Only explicitly declared scopes
    /// are visited.
    #[default]
    Ignore,
    /// Apply the root rules once to the contents of every unmatched field or
    /// key. Inside that re-application unmatched names are left alone, while
    /// declared nested scopes still apply.
    ReapplyRoot,
}

/// Per-traversal state threaded through `apply_ruler` and `descend`.
///
/// A `Walk` only carries a shared reference to the root ruler (when the
/// unmatched policy needs it), so it is `Copy` and free to pass down.
#[derive(Clone, Copy, Debug)]
pub struct Walk<'r> {
    root: Option<&'r Ruler>,
}

impl<'r> Walk<'r> {
    /// Starts a traversal at `root` under `policy`.
    pub fn new(root: &'r Ruler, policy: UnmatchedPolicy) -> Self {
        match policy {
            UnmatchedPolicy::Ignore => Self::detached(),
            UnmatchedPolicy::ReapplyRoot => Self { root: Some(root) },
        }
    }

    /// A walk that never revisits the root rules.
    pub const fn detached() -> Self {
        Self { root: None }
    }

    /// Visits a value whose name has no action at the current scope.
    pub fn pass_through<T: Simplifiable>(self, value: &mut T) {
        if let Some(root) = self.root {
            value.apply_ruler(root, Walk::detached());
        }
    }
}

/// Applies the action registered for `name` to a record field.
///
/// - [`Action::Remove`] resets the field to `T::default()`.
/// - [`Action::Descend`] hands the nested ruler to [`Simplifiable::descend`],
///   which walks sequences element by element.
/// - No action falls back to [`Walk::pass_through`].
#[inline]
pub fn visit_field<T>(value: &mut T, name: &str, ruler: &Ruler, walk: Walk<'_>)
where
    T: Simplifiable + Default,
{
    match ruler.action(name) {
        Some(Action::Remove) => *value = T::default(),
        Some(Action::Descend(child)) => value.descend(child, walk),
        None => walk.pass_through(value),
    }
}

/// Applies the action registered for `name` to a field that is never cleared.
///
/// Used for `#[simplify(keep)]` fields, whose type need not implement
/// `Default`. [`Action::Remove`] is ignored; descent and pass-through behave
/// as in [`visit_field`].
#[inline]
pub fn descend_field<T: Simplifiable>(value: &mut T, name: &str, ruler: &Ruler, walk: Walk<'_>) {
    match ruler.action(name) {
        Some(Action::Remove) => {}
        Some(Action::Descend(child)) => value.descend(child, walk),
        None => walk.pass_through(value),
    }
}

/// Applies the action registered for `name` to a field the engine cannot
/// look inside. Only [`Action::Remove`] has an effect.
#[inline]
pub fn visit_opaque_field<T: Default>(value: &mut T, name: &str, ruler: &Ruler) {
    if let Some(Action::Remove) = ruler.action(name) {
        *value = T::default();
    }
}

/// Applies the action registered for a map key to its entry.
///
/// Returns `false` when the entry must be deleted, which makes it suitable as
/// a `retain` predicate.
#[inline]
pub fn retain_entry<K, V>(key: &K, value: &mut V, ruler: &Ruler, walk: Walk<'_>) -> bool
where
    K: MapKey + ?Sized,
    V: Simplifiable,
{
    match ruler.action(&key.key_name()) {
        Some(Action::Remove) => false,
        Some(Action::Descend(child)) => {
            value.apply_ruler(child, walk);
            true
        }
        None => {
            walk.pass_through(value);
            true
        }
    }
}

/// Map keys that can be matched against rule names.
///
/// Rules name map entries by the key's string form. Strings, `bool`, `char`
/// and the primitive integers are covered. A map keyed by any other type
/// cannot be a walked field until its key type implements this trait; mark
/// the field `#[simplify(opaque)]` otherwise.
///
/// ```rust
/// use std::{borrow::Cow, collections::BTreeMap};
///
/// use simplifier::{MapKey, RuleTree, Simplifier};
///
/// #[derive(Clone, PartialEq, Eq, PartialOrd, Ord)]
/// struct Region(String);
///
/// impl MapKey for Region {
///     fn key_name(&self) -> Cow<'_, str> {
///         Cow::Borrowed(&self.0)
///     }
/// }
///
/// let simplifier = Simplifier::new(RuleTree::new().remove("eu"));
/// let totals = BTreeMap::from([(Region("eu".into()), 1_u64), (Region("us".into()), 2)]);
///
/// assert_eq!(simplifier.simplify(&totals).len(), 1);
/// ```
pub trait MapKey {
    /// Returns the string form used to look the key up in a ruler.
    fn key_name(&self) -> Cow<'_, str>;
}

impl MapKey for String {
    fn key_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl MapKey for str {
    fn key_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl<K: MapKey + ?Sized> MapKey for &K {
    fn key_name(&self) -> Cow<'_, str> {
        (**self).key_name()
    }
}

impl MapKey for Cow<'_, str> {
    fn key_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_ref())
    }
}

macro_rules! impl_map_key_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl MapKey for $ty {
                fn key_name(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }
            }
        )*
    };
}

impl_map_key_display!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize,
);
