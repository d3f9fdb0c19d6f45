use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, trace};

use super::{check_version, merge_top_level, validate_document_id, Backend, StoredDocument};
use crate::{filtering::apply_search, AppConfError, Result, SearchRequest};

/// Documents of one index, ordered by id.
type IndexMap = BTreeMap<String, (u64, Value)>;

/// A process-local backend keeping every document in memory.
///
/// Unsorted searches return documents in id order.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    /// Index name to documents.
    indexes: RwLock<HashMap<String, IndexMap>>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self { Self::default() }

    /// Number of documents stored in `index`.
    pub async fn count(&self, index: &str) -> usize {
        self.indexes
            .read()
            .await
            .get(index)
            .map_or(0, BTreeMap::len)
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn get(&self, index: &str, id: &str) -> Result<Option<StoredDocument>> {
        trace!("Getting document {} from memory index {}", id, index);
        validate_document_id(id)?;
        let indexes = self.indexes.read().await;
        Ok(indexes
            .get(index)
            .and_then(|docs| docs.get(id))
            .map(|(version, data)| {
                StoredDocument {
                    id:      id.to_owned(),
                    version: *version,
                    data:    data.clone(),
                }
            }))
    }

    async fn index(&self, index: &str, id: &str, document: Value) -> Result<u64> {
        trace!("Indexing document {} into memory index {}", id, index);
        validate_document_id(id)?;
        let mut indexes = self.indexes.write().await;
        let docs = indexes.entry(index.to_owned()).or_default();
        let version = docs
            .get(id)
            .map_or(1, |(version, _)| version.saturating_add(1));
        docs.insert(id.to_owned(), (version, document));
        debug!("Document {} indexed at version {}", id, version);
        Ok(version)
    }

    async fn update(&self, index: &str, id: &str, partial: Value, expected_version: Option<u64>) -> Result<u64> {
        trace!("Updating document {} in memory index {}", id, index);
        validate_document_id(id)?;
        let mut indexes = self.indexes.write().await;
        let Some((version, data)) = indexes.get_mut(index).and_then(|docs| docs.get_mut(id))
        else {
            return Err(AppConfError::NotFound {
                index: index.to_owned(),
                id:    id.to_owned(),
            });
        };
        check_version(index, id, expected_version, *version)?;
        merge_top_level(index, id, data, partial)?;
        *version = version.saturating_add(1);
        debug!("Document {} updated to version {}", id, version);
        Ok(*version)
    }

    async fn search(&self, index: &str, request: &SearchRequest) -> Result<Vec<Value>> {
        trace!("Searching memory index {}: {:?}", index, request);
        let indexes = self.indexes.read().await;
        let Some(docs) = indexes.get(index)
        else {
            return Ok(Vec::new());
        };
        Ok(apply_search(
            docs.values().map(|(_, data)| data.clone()),
            request,
        ))
    }
}
