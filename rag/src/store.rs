//! Persistence for the vector index.
//!
//! The index lives in a single JSON file wrapped in a self-describing
//! envelope (format tag, version, dimension). Saves are atomic: the
//! envelope is written to a sibling `.tmp` file and renamed into place, so
//! a crash or failure mid-save never leaves a partial index behind and the
//! previous index survives until the new one is complete. Loads validate
//! everything before handing back a usable [`VectorIndex`]; an unrecognized
//! or inconsistent file is rejected rather than trusted.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::index::VectorIndex;
use crate::types::IndexEntry;

/// Format tag written into every index file.
const INDEX_FORMAT: &str = "finsight-index";
/// Current envelope version.
const INDEX_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct IndexEnvelope {
    format: String,
    version: u32,
    dimension: usize,
    entries: Vec<IndexEntry>,
}

/// Filesystem-backed store for one index file.
#[derive(Clone, Debug)]
pub struct IndexStore {
    path: PathBuf,
}

impl IndexStore {
    /// Creates a store writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the index file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` when an index file exists at the configured path.
    ///
    /// This is the cheap readiness check; it says nothing about validity.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Persists the index atomically.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] when the temp file cannot be written or
    /// renamed into place.
    pub fn save(&self, index: &VectorIndex) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                    path: self.path.clone(),
                    source,
                })?;
            }
        }

        let envelope = IndexEnvelope {
            format: INDEX_FORMAT.to_string(),
            version: INDEX_VERSION,
            dimension: index.dimension(),
            entries: index.entries().to_vec(),
        };
        let bytes = serde_json::to_vec(&envelope).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            reason: source.to_string(),
        })?;

        let tmp = self.tmp_path();
        fs::write(&tmp, bytes).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        tracing::info!(path = %self.path.display(), entries = index.len(), "index saved");
        Ok(())
    }

    /// Loads and validates the persisted index.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] when no file exists
    /// - [`StoreError::Io`] when the file cannot be read
    /// - [`StoreError::Corrupt`] when the bytes do not parse as an envelope
    /// - [`StoreError::UnsupportedFormat`] for an unknown format tag or version
    /// - [`StoreError::DimensionMismatch`] when any entry's vector length
    ///   disagrees with the declared dimension
    pub fn load(&self) -> Result<VectorIndex, StoreError> {
        if !self.exists() {
            return Err(StoreError::NotFound {
                path: self.path.clone(),
            });
        }

        let bytes = fs::read(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        let envelope: IndexEnvelope =
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                reason: source.to_string(),
            })?;

        if envelope.format != INDEX_FORMAT || envelope.version != INDEX_VERSION {
            return Err(StoreError::UnsupportedFormat {
                path: self.path.clone(),
                format: envelope.format,
                version: envelope.version,
            });
        }

        validate_dimensions(envelope.dimension, &envelope.entries)?;
        // from_entries re-checks lengths; validated above so this cannot fail.
        VectorIndex::from_entries(envelope.dimension, envelope.entries).map_err(|err| {
            StoreError::Corrupt {
                path: self.path.clone(),
                reason: err.to_string(),
            }
        })
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

fn validate_dimensions(dimension: usize, entries: &[IndexEntry]) -> Result<(), StoreError> {
    for (index, entry) in entries.iter().enumerate() {
        if entry.embedding.len() != dimension {
            return Err(StoreError::DimensionMismatch {
                index,
                expected: dimension,
                actual: entry.embedding.len(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Chunk;

    fn sample_index() -> VectorIndex {
        let mut index = VectorIndex::new(2);
        index
            .push(Chunk::new("alpha", "https://a.example", 0), vec![1.0, 0.0])
            .unwrap();
        index
            .push(Chunk::new("beta", "https://a.example", 1), vec![0.0, 1.0])
            .unwrap();
        index
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = IndexStore::new(dir.path().join("index.json"));

        assert!(!store.exists());
        store.save(&sample_index()).unwrap();
        assert!(store.exists());

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.dimension(), 2);
        assert_eq!(loaded.entries()[0].chunk.text, "alpha");
    }

    #[test]
    fn save_leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        let store = IndexStore::new(&path);
        store.save(&sample_index()).unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["index.json".to_string()]);
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = IndexStore::new(dir.path().join("nested/deeper/index.json"));
        store.save(&sample_index()).unwrap();
        assert!(store.exists());
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = IndexStore::new(dir.path().join("absent.json"));
        assert!(matches!(store.load(), Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn garbage_bytes_are_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        fs::write(&path, b"definitely not json").unwrap();
        let store = IndexStore::new(&path);
        assert!(matches!(store.load(), Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn unknown_version_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        fs::write(
            &path,
            r#"{"format":"finsight-index","version":99,"dimension":2,"entries":[]}"#,
        )
        .unwrap();
        let store = IndexStore::new(&path);
        assert!(matches!(
            store.load(),
            Err(StoreError::UnsupportedFormat { version: 99, .. })
        ));
    }

    #[test]
    fn unknown_format_tag_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        fs::write(
            &path,
            r#"{"format":"something-else","version":1,"dimension":2,"entries":[]}"#,
        )
        .unwrap();
        let store = IndexStore::new(&path);
        assert!(matches!(
            store.load(),
            Err(StoreError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn inconsistent_entry_dimension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        fs::write(
            &path,
            r#"{"format":"finsight-index","version":1,"dimension":2,"entries":[
                {"chunk":{"text":"a","source_url":"u","index":0},"embedding":[1.0,0.0]},
                {"chunk":{"text":"b","source_url":"u","index":1},"embedding":[1.0]}
            ]}"#,
        )
        .unwrap();
        let store = IndexStore::new(&path);
        assert!(matches!(
            store.load(),
            Err(StoreError::DimensionMismatch {
                index: 1,
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn save_overwrites_previous_index_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let store = IndexStore::new(dir.path().join("index.json"));
        store.save(&sample_index()).unwrap();

        let mut replacement = VectorIndex::new(3);
        replacement
            .push(Chunk::new("gamma", "https://b.example", 0), vec![0.0; 3])
            .unwrap();
        store.save(&replacement).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.dimension(), 3);
        assert_eq!(loaded.entries()[0].chunk.text, "gamma");
    }
}
