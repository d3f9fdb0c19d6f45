//! The narrow contract the configuration store needs from a document backend.
//!
//! Documents are JSON objects stored under an id within a named index. Backends
//! keep a per-document version counter that starts at 1 and grows on every write;
//! the store only uses it for the optimistic update operations.

use async_trait::async_trait;
use serde_json::Value;

use crate::{AppConfError, Result, SearchRequest};

/// Filesystem-backed implementation.
pub mod filesystem;
/// In-memory implementation.
pub mod memory;

pub use filesystem::FileSystemBackend;
pub use memory::MemoryBackend;

/// A document as returned by [`Backend::get`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocument {
    /// Document id within its index.
    pub id:      String,
    /// Version of the document at read time.
    pub version: u64,
    /// Document body.
    pub data:    Value,
}

/// Operations the store issues against a document backend.
///
/// Implementations must be safe to share between tasks. Errors are returned to
/// the store's callers unchanged.
#[async_trait]
pub trait Backend: Send + Sync + std::fmt::Debug {
    /// Fetches a document. Returns `Ok(None)` when it does not exist.
    async fn get(&self, index: &str, id: &str) -> Result<Option<StoredDocument>>;

    /// Creates or fully replaces a document and returns its new version.
    async fn index(&self, index: &str, id: &str, document: Value) -> Result<u64>;

    /// Merges the top-level fields of `partial` into an existing document.
    ///
    /// Fails with [`AppConfError::NotFound`] if the document does not exist, and with
    /// [`AppConfError::VersionConflict`] if `expected_version` is set and differs from
    /// the stored version. Returns the new version.
    async fn update(&self, index: &str, id: &str, partial: Value, expected_version: Option<u64>) -> Result<u64>;

    /// Returns up to `request.limit` documents of `index` matching `request.filter`,
    /// ordered by `request.sort` when given.
    async fn search(&self, index: &str, request: &SearchRequest) -> Result<Vec<Value>>;
}

/// Merges top-level fields of `partial` into `existing`.
///
/// Both values must be JSON objects; fields absent from `partial` are kept.
pub(crate) fn merge_top_level(index: &str, id: &str, existing: &mut Value, partial: Value) -> Result<()> {
    let (Some(target), Value::Object(fields)) = (existing.as_object_mut(), partial)
    else {
        return Err(AppConfError::CorruptDocument {
            index:  index.to_owned(),
            id:     id.to_owned(),
            reason: "partial update requires both documents to be JSON objects".to_owned(),
        });
    };
    for (key, value) in fields {
        target.insert(key, value);
    }
    Ok(())
}

/// Checks that `expected` (if any) matches the stored version.
pub(crate) fn check_version(index: &str, id: &str, expected: Option<u64>, actual: u64) -> Result<()> {
    match expected {
        Some(expected) if expected != actual => {
            Err(AppConfError::VersionConflict {
                index: index.to_owned(),
                id: id.to_owned(),
                expected,
                actual,
            })
        },
        _ => Ok(()),
    }
}

/// Rejects empty document ids before they reach a backend.
pub(crate) fn validate_document_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(AppConfError::invalid_argument("document id must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_merge_top_level_keeps_untouched_fields() {
        let mut existing = json!({"Id": "A", "Name": "old", "IsHidden": true});
        merge_top_level("i", "A", &mut existing, json!({"Name": "new"})).unwrap();
        assert_eq!(existing, json!({"Id": "A", "Name": "new", "IsHidden": true}));
    }

    #[test]
    fn test_merge_top_level_rejects_non_objects() {
        let mut existing = json!({"Id": "A"});
        let err = merge_top_level("i", "A", &mut existing, json!([1, 2])).unwrap_err();
        assert!(matches!(err, AppConfError::CorruptDocument { .. }));
    }

    #[test]
    fn test_check_version() {
        assert!(check_version("i", "A", None, 3).is_ok());
        assert!(check_version("i", "A", Some(3), 3).is_ok());
        assert!(matches!(
            check_version("i", "A", Some(2), 3),
            Err(AppConfError::VersionConflict {
                expected: 2,
                actual: 3,
                ..
            })
        ));
    }
}
