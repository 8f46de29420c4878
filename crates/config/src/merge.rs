//! Right-biased deep merge of configuration documents.
//!
//! Invariants:
//! - Every key present in either input is present in the output.
//! - When both sides hold a mapping for a key, the mappings are merged recursively.
//! - Any other conflict (scalars, sequences, mapping vs. scalar) takes the override.
//! - Key order follows the base document, with new override keys appended.

use serde_json::Value;
use serde_json::map::Entry;

use crate::document::ConfigDocument;

/// Merge `overrides` into `base`, returning the combined document.
///
/// Both inputs are consumed; the result is a fresh document owned by the caller.
pub fn merge(base: ConfigDocument, overrides: ConfigDocument) -> ConfigDocument {
    let mut merged = base;

    for (key, value) in overrides {
        match merged.entry(key) {
            Entry::Occupied(mut slot) => {
                let replacement = match (slot.get_mut(), value) {
                    (Value::Object(existing), Value::Object(incoming)) => {
                        Value::Object(merge(std::mem::take(existing), incoming))
                    }
                    (_, value) => value,
                };
                slot.insert(replacement);
            }
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
        }
    }

    merged
}
