//! JSON rule documents and dynamic JSON values.
//!
//! This module connects the engine with `serde_json` in two directions:
//!
//! - rule documents: [`RuleTree::from_json`], [`Simplifier::from_json`] and
//!   [`Simplifier::extend_json`] parse the declarative form
//!
//!   ```json
//!   {
//!     "remove_properties": ["debug"],
//!     "property_simplifiers": {
//!       "data": { "remove_properties": ["token"] }
//!     }
//!   }
//!   ```
//!
//!   `property_rules` is accepted as an alias of `property_simplifiers`, both
//!   fields are optional and may be `null`, and unknown fields are rejected;
//! - values: `serde_json::Value` implements [`Simplifiable`], so untyped
//!   payloads are simplified with the same rules as typed ones. Objects behave
//!   like maps (removed keys are deleted), arrays behave like sequences.

use serde_json::Value;

use crate::{
    engine::{retain_entry, RuleTree, Ruler, Simplifiable, Simplifier, Walk},
    error::Result,
};

impl RuleTree {
    /// Parses a rule document from JSON text.
    pub fn from_json(document: &str) -> Result<Self> {
        Ok(serde_json::from_str(document)?)
    }

    /// Builds a rule tree from an already-parsed JSON document.
    pub fn from_json_value(document: Value) -> Result<Self> {
        Ok(serde_json::from_value(document)?)
    }

    /// Renders this rule tree as a JSON document.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Simplifier {
    /// Parses and compiles a JSON rule document.
    ///
    /// Fails without a partial result when the document is malformed.
    pub fn from_json(document: &str) -> Result<Self> {
        RuleTree::from_json(document).map(Self::new)
    }

    /// Parses a JSON rule document and merges it into a new simplifier.
    pub fn extend_json(&self, document: &str) -> Result<Self> {
        let extension = RuleTree::from_json(document)?;
        Ok(self.extend(&extension))
    }
}

impl Simplifiable for Value {
    fn deep_copy(&self) -> Self {
        self.clone()
    }

    fn apply_ruler(&mut self, ruler: &Ruler, walk: Walk<'_>) {
        if let Value::Object(map) = self {
            map.retain(|key, value| retain_entry(key, value, ruler, walk));
        }
    }

    fn descend(&mut self, ruler: &Ruler, walk: Walk<'_>) {
        match self {
            Value::Array(items) => {
                for item in items {
                    item.apply_ruler(ruler, walk);
                }
            }
            other => other.apply_ruler(ruler, walk),
        }
    }
}
