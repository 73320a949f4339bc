//! Rule compilation, deep copy, and traversal.
//!
//! This module ties the pieces together:
//!
//! - **`rules`**: raw rule trees and the merge operation (`RuleTree`, `merge`)
//! - **`ruler`**: compiled rule trees (`Ruler`, `Action`)
//! - **`simplifiable`**: the deep-copy and traversal capability (`Simplifiable`)
//! - **`traverse`**: how an action is applied to a field or map entry
//! - **`simplifier`**: the entrypoint that copies then simplifies (`Simplifier`)

mod rules;
mod ruler;
mod simplifiable;
mod simplifier;
mod traverse;

pub use rules::{merge, RuleTree};
pub use ruler::{Action, Ruler};
pub use simplifiable::Simplifiable;
pub use simplifier::{Simplifier, SimplifyExt};
pub use traverse::{
    descend_field, retain_entry, visit_field, visit_opaque_field, MapKey, UnmatchedPolicy, Walk,
};
