//! Recursive decryption of configuration documents.
//!
//! Invariants:
//! - Only `Value::Object` is recursed into; sequences are returned untouched,
//!   so secret references inside arrays are NOT resolved.
//! - Keys are visited in document order, depth-first, one resolution at a time.
//! - The input is consumed and a new document is returned; a failure yields no
//!   document at all.

use serde_json::Value;

use crate::document::ConfigDocument;
use crate::resolver::{ResolutionError, Resolver};

/// Resolve every secret reference reachable through nested mappings.
pub fn decrypt_tree(
    resolver: &Resolver,
    document: ConfigDocument,
) -> Result<ConfigDocument, ResolutionError> {
    document
        .into_iter()
        .map(|(key, value)| {
            let decrypted = match value {
                Value::Object(nested) => Value::Object(decrypt_tree(resolver, nested)?),
                Value::String(_) => resolver.resolve(value)?,
                other => other,
            };
            Ok::<_, ResolutionError>((key, decrypted))
        })
        .collect()
}
