//! Errors surfaced while loading rule documents.
//!
//! Only rule loading can fail. Traversal never errors: names that match
//! nothing are ignored, and values the engine cannot look inside are passed
//! through unchanged.

use thiserror::Error;

/// Errors returned by the `simplifier` crate.
///
/// New variants may be added as more document formats are supported.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The rule document does not have the `remove_properties` /
    /// `property_simplifiers` shape.
    #[error("malformed rule document: {0}")]
    MalformedRules(#[from] serde_json::Error),
}

/// Convenience alias for results in this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
