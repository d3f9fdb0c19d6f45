//! Streaming utilities for walking index directories.

use std::{path::PathBuf, pin::Pin};

use async_stream::stream;
use futures::Stream;
use tokio::fs as tokio_fs;
use tracing::warn;

use crate::{constants::DOCUMENT_EXTENSION, Result};

/// Longest hex stem used verbatim as a file name.
///
/// Keeps `<stem>.json` and the `.<name>.tmp` write file well under the common
/// 255-byte file name limit.
pub const MAX_HEX_STEM_LEN: usize = 200;

/// Marks file names derived from a digest of the id. Never produced by hex encoding.
const DIGEST_NAME_PREFIX: char = '_';

/// File name used for the document with the given id.
///
/// Short ids are hex encoded so that arbitrary setting keys map to safe file names.
/// Ids whose encoding would exceed [`MAX_HEX_STEM_LEN`] are stored under
/// `_<blake3 hex>.json` instead. The id itself is always kept in the file envelope.
pub fn document_file_name(id: &str) -> String {
    let stem = hex::encode(id);
    if stem.len() <= MAX_HEX_STEM_LEN {
        format!("{}.{}", stem, DOCUMENT_EXTENSION)
    }
    else {
        format!(
            "{}{}.{}",
            DIGEST_NAME_PREFIX,
            blake3::hash(id.as_bytes()).to_hex(),
            DOCUMENT_EXTENSION
        )
    }
}

/// Whether a directory entry name looks like a stored document.
fn is_document_file_name(file_name: &str) -> bool {
    !file_name.starts_with('.') &&
        file_name
            .strip_suffix(DOCUMENT_EXTENSION)
            .is_some_and(|stem| stem.len() > 1 && stem.ends_with('.'))
}

/// Streams the paths of document files in an index directory.
///
/// Hidden files (temporary writes), directories and foreign files are skipped.
pub fn stream_document_files(index_path: PathBuf) -> Pin<Box<dyn Stream<Item = Result<PathBuf>> + Send>> {
    Box::pin(stream! {
        let mut entries = match tokio_fs::read_dir(&index_path).await {
            Ok(entries) => entries,
            Err(e) => {
                yield Err(e.into());
                return;
            }
        };

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    yield Err(e.into());
                    break;
                }
            };

            let path = entry.path();
            match tokio_fs::metadata(&path).await {
                Ok(metadata) if metadata.is_file() => {},
                Ok(_) => continue,
                Err(e) => {
                    yield Err(e.into());
                    continue;
                }
            }
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if file_name.starts_with('.') {
                continue;
            }
            if is_document_file_name(file_name) {
                yield Ok(path);
            }
            else {
                warn!("Skipping unrecognized file {:?} in index directory", path);
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use futures::StreamExt as _;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_short_ids_are_hex_encoded() {
        assert_eq!(document_file_name("smtp.host"), format!("{}.json", hex::encode("smtp.host")));
        assert_ne!(document_file_name("a/b"), document_file_name("a\\b"));
    }

    #[test]
    fn test_long_ids_use_fixed_length_digest_name() {
        let long = "k".repeat(300);
        let name = document_file_name(&long);
        assert!(name.starts_with(DIGEST_NAME_PREFIX));
        assert_eq!(name.len(), 1 + 64 + 1 + DOCUMENT_EXTENSION.len());
        assert_eq!(name, document_file_name(&long));
        assert_ne!(name, document_file_name(&"k".repeat(301)));
    }

    #[test]
    fn test_hex_stem_boundary() {
        let at_limit = "a".repeat(MAX_HEX_STEM_LEN / 2);
        let over_limit = "a".repeat(MAX_HEX_STEM_LEN / 2 + 1);
        assert!(!document_file_name(&at_limit).starts_with(DIGEST_NAME_PREFIX));
        assert!(document_file_name(&over_limit).starts_with(DIGEST_NAME_PREFIX));
    }

    #[test]
    fn test_is_document_file_name() {
        assert!(is_document_file_name(&document_file_name("doc")));
        assert!(is_document_file_name(&document_file_name(&"x".repeat(500))));
        assert!(!is_document_file_name("notes.txt"));
        assert!(!is_document_file_name("json"));
        assert!(!is_document_file_name(".json"));
        assert!(!is_document_file_name(".pending.json.tmp"));
    }

    #[tokio::test]
    async fn test_stream_document_files() {
        let temp_dir = TempDir::new().unwrap();
        let index_path = temp_dir.path().join("index");
        tokio_fs::create_dir(&index_path).await.unwrap();
        let long_id = "y".repeat(250);
        let doc_ids = vec!["doc1", "doc2", long_id.as_str()];
        for id in &doc_ids {
            tokio_fs::write(index_path.join(document_file_name(id)), b"{}")
                .await
                .unwrap();
        }
        tokio_fs::write(index_path.join(".pending.tmp"), b"{}").await.unwrap();
        tokio_fs::write(index_path.join("readme.txt"), b"hi").await.unwrap();
        tokio_fs::create_dir(index_path.join("nested.json")).await.unwrap();

        let mut stream = stream_document_files(index_path.clone());
        let mut found = Vec::new();
        while let Some(result) = stream.next().await {
            found.push(result.unwrap());
        }
        found.sort();
        let mut expected: Vec<PathBuf> = doc_ids
            .iter()
            .map(|id| index_path.join(document_file_name(id)))
            .collect();
        expected.sort();
        assert_eq!(found, expected);
    }

    #[tokio::test]
    async fn test_stream_document_files_with_invalid_path() {
        let invalid_path = PathBuf::from("/dev/null/nonexistent");
        let mut stream = stream_document_files(invalid_path);
        let mut error_count = 0;
        while let Some(result) = stream.next().await {
            if result.is_err() {
                error_count += 1;
            }
        }
        assert!(error_count > 0, "Expected error when path is invalid");
    }
}
