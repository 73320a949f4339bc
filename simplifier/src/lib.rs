//! Rule-driven deep copy and redaction for structured data.
//!
//! This crate separates:
//! - **Rules**: which names to strip at which nesting scope ([`RuleTree`]).
//! - **Compilation**: the immutable, shareable form of those rules
//!   ([`Ruler`], wrapped by [`Simplifier`]).
//! - **Traversal**: a deep copy of the input walked by the compiled rules
//!   ([`Simplifiable`]).
//!
//! The caller's value is never modified: [`Simplifier::simplify`] deep-copies
//! it first and applies the rules to the copy.
//!
//! Key rules:
//! - A removed record field is reset to its `Default` value; a removed map
//!   key is deleted.
//! - A nested scope applies to the field's value, or to every element when the
//!   field is a sequence.
//! - Names that match nothing are ignored, so one rule set can serve many
//!   differently shaped values.
//! - When a name is declared both for removal and for a nested scope, removal
//!   wins.
//! - Fields and keys that no rule names are left alone unless the simplifier
//!   uses [`UnmatchedPolicy::ReapplyRoot`].
//!
//! ```rust
//! use simplifier::{RuleTree, Simplifiable, Simplifier};
//!
//! #[derive(Simplifiable, Debug, Default, PartialEq)]
//! struct Credentials {
//!     user: String,
//!     secret: String,
//! }
//!
//! #[derive(Simplifiable, Debug, PartialEq)]
//! struct Request {
//!     path: String,
//!     credentials: Vec<Credentials>,
//! }
//!
//! let rules = RuleTree::new().scope("credentials", RuleTree::new().remove("secret"));
//! let simplifier = Simplifier::new(rules);
//!
//! let request = Request {
//!     path: "/login".into(),
//!     credentials: vec![Credentials { user: "ana".into(), secret: "hunter2".into() }],
//! };
//! let safe = simplifier.simplify(&request);
//!
//! assert_eq!(safe.credentials[0].secret, "");
//! assert_eq!(request.credentials[0].secret, "hunter2");
//! ```
//!
//! What this crate does:
//! - defines rule trees, their merge, and their compiled form
//! - defines the `Simplifiable` capability and implements it for std types
//! - provides integrations behind feature flags (`json`, `slog`)
//!
//! What it does not do:
//! - perform I/O or logging
//! - check that rule names exist on the values they are applied to
//! - mask or rewrite scalar content
//!
//! The `Simplifiable` derive macro lives in `simplifier-derive` and is
//! re-exported here.

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
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else,
    clippy::clone_on_copy
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

pub use simplifier_derive::Simplifiable;

// Lets derived code refer to `::simplifier` from inside this crate's own tests.
#[allow(unused_extern_crates)]
extern crate self as simplifier;

// Module declarations
mod engine;
#[cfg(feature = "json")]
mod error;
#[cfg(feature = "json")]
mod json;
#[cfg(feature = "slog")]
pub mod slog;

// Re-exports
pub use engine::{
    merge, Action, MapKey, RuleTree, Ruler, Simplifiable, Simplifier, SimplifyExt,
    UnmatchedPolicy, Walk,
};
#[cfg(feature = "json")]
pub use error::{Error, Result};
#[doc(hidden)]
pub use engine::{descend_field, retain_entry, visit_field, visit_opaque_field};
