use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::{fs as tokio_fs, sync::Mutex};
use tracing::{debug, error, trace};

use super::{check_version, merge_top_level, validate_document_id, Backend, StoredDocument};
use crate::{
    constants::DATA_DIR,
    filtering::apply_search,
    streaming::{document_file_name, stream_document_files},
    validation::validate_index_name,
    AppConfError,
    Result,
    SearchRequest,
};

/// On-disk envelope around a stored document.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DocumentFile {
    /// Document id.
    id:         String,
    /// Version, starting at 1.
    version:    u64,
    /// First write of this id.
    created_at: DateTime<Utc>,
    /// Last write of this id.
    updated_at: DateTime<Utc>,
    /// Document body.
    data:       Value,
}

/// A backend storing each document as a pretty-printed JSON file.
///
/// Layout:
/// - Root directory (specified at creation)
///   - `data/`
///     - one directory per index (e.g. `applications/`)
///       - one `<hex id>.json` file per document, or `_<digest>.json` for long ids
///
/// Writes go to a hidden temporary file that is renamed into place. Writes are
/// serialized within one backend instance; separate processes sharing a root are
/// not coordinated.
#[derive(Debug)]
pub struct FileSystemBackend {
    /// Root directory of the backend.
    root_path:  PathBuf,
    /// Serializes read-modify-write sequences.
    write_lock: Mutex<()>,
}

impl FileSystemBackend {
    /// Opens a backend rooted at `root_path`, creating the directory if needed.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use appconf_store::FileSystemBackend;
    ///
    /// # async fn example() -> appconf_store::Result<()> {
    /// let backend = FileSystemBackend::new("/var/lib/appconf").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new<P>(root_path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let root_path = root_path.as_ref().to_path_buf();
        trace!("Opening filesystem backend at {:?}", root_path);
        tokio_fs::create_dir_all(root_path.join(DATA_DIR))
            .await
            .map_err(|e| {
                error!("Failed to create backend directory {:?}: {}", root_path, e);
                e
            })?;
        debug!("Filesystem backend ready at {:?}", root_path);
        Ok(Self {
            root_path,
            write_lock: Mutex::new(()),
        })
    }

    /// Root directory of the backend.
    pub fn root_path(&self) -> &Path { &self.root_path }

    /// Directory holding the documents of `index`.
    fn index_path(&self, index: &str) -> Result<PathBuf> {
        validate_index_name(index)?;
        Ok(self.root_path.join(DATA_DIR).join(index))
    }

    /// Reads the envelope of a document, if present.
    async fn read_file(&self, index: &str, id: &str) -> Result<Option<DocumentFile>> {
        let file_path = self.index_path(index)?.join(document_file_name(id));
        let Some(file) = Self::read_envelope(index, &file_path).await?
        else {
            return Ok(None);
        };
        if file.id != id {
            error!(
                "Document file {:?} holds id {} instead of {}",
                file_path, file.id, id
            );
            return Err(AppConfError::CorruptDocument {
                index:  index.to_owned(),
                id:     id.to_owned(),
                reason: format!("file holds document '{}'", file.id),
            });
        }
        Ok(Some(file))
    }

    /// Reads and parses a document file. A missing file yields `None`.
    async fn read_envelope(index: &str, file_path: &Path) -> Result<Option<DocumentFile>> {
        let content = match tokio_fs::read_to_string(file_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                error!("Failed to read document file {:?}: {}", file_path, e);
                return Err(e.into());
            },
        };
        let file: DocumentFile = serde_json::from_str(&content).map_err(|e| {
            error!("Failed to parse document file {:?}: {}", file_path, e);
            AppConfError::CorruptDocument {
                index:  index.to_owned(),
                id:     file_path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                reason: e.to_string(),
            }
        })?;
        Ok(Some(file))
    }

    /// Atomically writes the envelope of a document.
    async fn write_file(&self, index: &str, file: &DocumentFile) -> Result<()> {
        let index_path = self.index_path(index)?;
        tokio_fs::create_dir_all(&index_path).await?;
        let file_name = document_file_name(&file.id);
        let final_path = index_path.join(&file_name);
        let temp_path = index_path.join(format!(".{}.tmp", file_name));

        let json = serde_json::to_string_pretty(file).map_err(|e| {
            error!("Failed to serialize document {} to JSON: {}", file.id, e);
            e
        })?;
        tokio_fs::write(&temp_path, &json).await.map_err(|e| {
            error!(
                "Failed to write document {} to file {:?}: {}",
                file.id, temp_path, e
            );
            e
        })?;
        tokio_fs::rename(&temp_path, &final_path).await.map_err(|e| {
            error!(
                "Failed to move document {} into place at {:?}: {}",
                file.id, final_path, e
            );
            e
        })?;
        Ok(())
    }
}

#[async_trait]
impl Backend for FileSystemBackend {
    async fn get(&self, index: &str, id: &str) -> Result<Option<StoredDocument>> {
        trace!("Getting document {} from index {}", id, index);
        validate_document_id(id)?;
        Ok(self.read_file(index, id).await?.map(|file| {
            StoredDocument {
                id:      file.id,
                version: file.version,
                data:    file.data,
            }
        }))
    }

    async fn index(&self, index: &str, id: &str, document: Value) -> Result<u64> {
        trace!("Indexing document {} into index {}", id, index);
        validate_document_id(id)?;
        let _guard = self.write_lock.lock().await;

        let now = Utc::now();
        let file = match self.read_file(index, id).await? {
            Some(existing) => {
                DocumentFile {
                    id:         id.to_owned(),
                    version:    existing.version.saturating_add(1),
                    created_at: existing.created_at,
                    updated_at: now,
                    data:       document,
                }
            },
            None => {
                DocumentFile {
                    id:         id.to_owned(),
                    version:    1,
                    created_at: now,
                    updated_at: now,
                    data:       document,
                }
            },
        };
        self.write_file(index, &file).await?;
        debug!("Document {} indexed at version {}", id, file.version);
        Ok(file.version)
    }

    async fn update(&self, index: &str, id: &str, partial: Value, expected_version: Option<u64>) -> Result<u64> {
        trace!("Updating document {} in index {}", id, index);
        validate_document_id(id)?;
        let _guard = self.write_lock.lock().await;

        let Some(mut file) = self.read_file(index, id).await?
        else {
            return Err(AppConfError::NotFound {
                index: index.to_owned(),
                id:    id.to_owned(),
            });
        };
        check_version(index, id, expected_version, file.version)?;
        merge_top_level(index, id, &mut file.data, partial)?;
        file.version = file.version.saturating_add(1);
        file.updated_at = Utc::now();
        self.write_file(index, &file).await?;
        debug!("Document {} updated to version {}", id, file.version);
        Ok(file.version)
    }

    async fn search(&self, index: &str, request: &SearchRequest) -> Result<Vec<Value>> {
        trace!("Searching index {}: {:?}", index, request);
        let index_path = self.index_path(index)?;
        if !tokio_fs::try_exists(&index_path).await? {
            return Ok(Vec::new());
        }

        let paths: Vec<PathBuf> = stream_document_files(index_path).try_collect().await?;
        let mut files = Vec::with_capacity(paths.len());
        for path in &paths {
            // A document removed between listing and reading is skipped.
            if let Some(file) = Self::read_envelope(index, path).await? {
                files.push(file);
            }
        }
        files.sort_by(|a, b| a.id.cmp(&b.id));

        let documents = files.into_iter().map(|file| file.data);
        let results = apply_search(documents, request);
        debug!("Search on index {} returned {} documents", index, results.len());
        Ok(results)
    }
}
