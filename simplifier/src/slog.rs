//! Adapters for emitting simplified values through `slog`.
//!
//! This module connects [`Simplifier`] with `slog` by providing a
//! `slog::Value` that serializes the *simplified copy* of a value as
//! structured JSON via `slog`'s nested-value support.
//!
//! It is responsible for:
//! - Ensuring the logged representation is derived from
//!   [`Simplifier::simplify`], never from the original value.
//! - Avoiding fallible logging APIs: serialization failures are represented as
//!   placeholder strings rather than propagated as errors.
//!
//! It does not configure `slog` or decide which rules apply.

use serde::Serialize;
use serde_json::Value as JsonValue;
use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::{Simplifiable, Simplifier};

/// Placeholder logged when the simplified value cannot be converted to JSON.
pub const SERIALIZATION_FAILED: &str = "Failed to serialize simplified value";

/// A `slog::Value` that emits an owned simplified payload as structured JSON.
///
/// This type does not return serialization errors to `slog`; if converting
/// the simplified output into a JSON value fails, it holds
/// [`SERIALIZATION_FAILED`] as a JSON string instead.
#[derive(Clone, Debug)]
pub struct SimplifiedJson {
    value: JsonValue,
}

impl SimplifiedJson {
    fn new(value: JsonValue) -> Self {
        Self { value }
    }

    /// The JSON payload that will be logged.
    pub fn as_json(&self) -> &JsonValue {
        &self.value
    }
}

impl SlogValue for SimplifiedJson {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        let nested = slog::Serde(self.value.clone());
        SlogValue::serialize(&nested, record, key, serializer)
    }
}

impl Simplifier {
    /// Simplifies `value` and wraps the result for logging.
    ///
    /// ## Example
    /// ```ignore
    /// info!(logger, "request"; "body" => simplifier.to_slog_value(&body));
    /// ```
    pub fn to_slog_value<T>(&self, value: &T) -> SimplifiedJson
    where
        T: Simplifiable + Serialize,
    {
        let simplified = self.simplify(value);
        let json = serde_json::to_value(simplified)
            .unwrap_or_else(|_| JsonValue::String(SERIALIZATION_FAILED.to_string()));
        SimplifiedJson::new(json)
    }
}
