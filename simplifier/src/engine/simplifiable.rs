//! The capability a type needs to be copied and simplified.
//!
//! [`Simplifiable`] combines the two halves of the engine:
//!
//! - **deep copy**: [`Simplifiable::deep_copy`] builds a storage-independent
//!   clone, so the traversal never touches caller-owned data;
//! - **traversal**: [`Simplifiable::apply_ruler`] and
//!   [`Simplifiable::descend`] apply a compiled [`Ruler`] to that clone in
//!   place.
//!
//! ## Structural kinds
//!
//! | Kind | `apply_ruler` (scope) | `descend` (named field) |
//! |------|-----------------------|-------------------------|
//! | Record / enum (derived) | match each field by name | same as scope |
//! | Map | match each key by its string form | same as scope |
//! | `Option` / `Box` | forwards to the target, `None` is a no-op | forwards to the target |
//! | Sequence | inert | applies the ruler to every element |
//! | Scalar, string, set | inert | inert |
//!
//! ## External types
//!
//! Types from other crates that don't implement `Simplifiable` can still live
//! in a derived record: mark the field `#[simplify(opaque)]` to clone it and
//! pass it through, or `#[simplify(skip)]` to leave it out of the copy.

use std::{
    borrow::Cow,
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque},
    hash::{BuildHasher, Hash},
    marker::PhantomData,
};

use super::{
    ruler::Ruler,
    traverse::{retain_entry, MapKey, Walk},
};

/// A value the engine can deep-copy and walk with a [`Ruler`].
///
/// Derive it with `#[derive(Simplifiable)]` on records and enums. The std
/// containers and scalar types are covered by this module.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Simplifiable`",
    label = "this type cannot be copied and walked by a simplifier",
    note = "use `#[derive(Simplifiable)]` on the type definition",
    note = "or mark the field `#[simplify(opaque)]` to clone it without walking into it"
)]
pub trait Simplifiable: Sized {
    /// Returns a clone that shares no mutable storage with `self`.
    #[must_use]
    fn deep_copy(&self) -> Self;

    /// Applies `ruler` to this value treated as a scope.
    ///
    /// Records and maps look their fields or keys up in `ruler`; everything
    /// else is inert by default.
    fn apply_ruler(&mut self, ruler: &Ruler, walk: Walk<'_>) {
        let _ = (ruler, walk);
    }

    /// Applies `ruler` to this value reached through a named field.
    ///
    /// Sequences override this to apply the ruler to each element instead of
    /// to the sequence as a whole.
    fn descend(&mut self, ruler: &Ruler, walk: Walk<'_>) {
        self.apply_ruler(ruler, walk);
    }
}

// =============================================================================
// Leaves
// =============================================================================

macro_rules! impl_simplifiable_leaf {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Simplifiable for $ty {
                #[inline]
                fn deep_copy(&self) -> Self {
                    self.clone()
                }
            }
        )*
    };
}

impl_simplifiable_leaf!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    String,
);

impl Simplifiable for Cow<'_, str> {
    fn deep_copy(&self) -> Self {
        Cow::Owned(String::from(self.as_ref()))
    }
}

impl<T: ?Sized> Simplifiable for PhantomData<T> {
    fn deep_copy(&self) -> Self {
        PhantomData
    }
}

// =============================================================================
// Nullable references
// =============================================================================

impl<T: Simplifiable> Simplifiable for Option<T> {
    fn deep_copy(&self) -> Self {
        self.as_ref().map(Simplifiable::deep_copy)
    }

    fn apply_ruler(&mut self, ruler: &Ruler, walk: Walk<'_>) {
        if let Some(value) = self {
            value.apply_ruler(ruler, walk);
        }
    }

    fn descend(&mut self, ruler: &Ruler, walk: Walk<'_>) {
        if let Some(value) = self {
            value.descend(ruler, walk);
        }
    }
}

impl<T: Simplifiable> Simplifiable for Box<T> {
    fn deep_copy(&self) -> Self {
        Box::new((**self).deep_copy())
    }

    fn apply_ruler(&mut self, ruler: &Ruler, walk: Walk<'_>) {
        (**self).apply_ruler(ruler, walk);
    }

    fn descend(&mut self, ruler: &Ruler, walk: Walk<'_>) {
        (**self).descend(ruler, walk);
    }
}

// =============================================================================
// Ordered sequences
// =============================================================================

impl<T: Simplifiable> Simplifiable for Vec<T> {
    fn deep_copy(&self) -> Self {
        self.iter().map(Simplifiable::deep_copy).collect()
    }

    fn descend(&mut self, ruler: &Ruler, walk: Walk<'_>) {
        for item in self {
            item.apply_ruler(ruler, walk);
        }
    }
}

impl<T: Simplifiable> Simplifiable for VecDeque<T> {
    fn deep_copy(&self) -> Self {
        self.iter().map(Simplifiable::deep_copy).collect()
    }

    fn descend(&mut self, ruler: &Ruler, walk: Walk<'_>) {
        for item in self {
            item.apply_ruler(ruler, walk);
        }
    }
}

impl<T: Simplifiable, const N: usize> Simplifiable for [T; N] {
    fn deep_copy(&self) -> Self {
        std::array::from_fn(|index| self[index].deep_copy())
    }

    fn descend(&mut self, ruler: &Ruler, walk: Walk<'_>) {
        for item in self {
            item.apply_ruler(ruler, walk);
        }
    }
}

// =============================================================================
// Maps
// =============================================================================

impl<K, V, S> Simplifiable for HashMap<K, V, S>
where
    K: MapKey + Hash + Eq + Clone,
    V: Simplifiable,
    S: BuildHasher + Clone,
{
    fn deep_copy(&self) -> Self {
        let mut copy = HashMap::with_capacity_and_hasher(self.len(), self.hasher().clone());
        copy.extend(self.iter().map(|(k, v)| (k.clone(), v.deep_copy())));
        copy
    }

    fn apply_ruler(&mut self, ruler: &Ruler, walk: Walk<'_>) {
        self.retain(|key, value| retain_entry(key, value, ruler, walk));
    }
}

impl<K, V> Simplifiable for BTreeMap<K, V>
where
    K: MapKey + Ord + Clone,
    V: Simplifiable,
{
    fn deep_copy(&self) -> Self {
        self.iter().map(|(k, v)| (k.clone(), v.deep_copy())).collect()
    }

    fn apply_ruler(&mut self, ruler: &Ruler, walk: Walk<'_>) {
        self.retain(|key, value| retain_entry(key, value, ruler, walk));
    }
}

// =============================================================================
// Sets
// =============================================================================
//
// Set elements are immutable once inserted, so sets are copied but never walked.

impl<T, S> Simplifiable for HashSet<T, S>
where
    T: Simplifiable + Hash + Eq,
    S: BuildHasher + Clone,
{
    fn deep_copy(&self) -> Self {
        let mut copy = HashSet::with_capacity_and_hasher(self.len(), self.hasher().clone());
        copy.extend(self.iter().map(Simplifiable::deep_copy));
        copy
    }
}

impl<T> Simplifiable for BTreeSet<T>
where
    T: Simplifiable + Ord,
{
    fn deep_copy(&self) -> Self {
        self.iter().map(Simplifiable::deep_copy).collect()
    }
}
