//! Blob persistence - where the serialized store lives
//!
//! The store is written as one blob, in full, after every change. A
//! [`BlobStore`] only has to load and overwrite that blob.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::error::PersistError;

/// Load/overwrite access to a single serialized blob
pub trait BlobStore {
    /// The current blob, or `None` if nothing was ever saved
    fn load(&self) -> Result<Option<String>, PersistError>;

    /// Replace the blob
    fn save(&mut self, blob: &str) -> Result<(), PersistError>;
}

/// Blob kept in a JSON file on disk
///
/// Saves go to a sibling temporary file that is then renamed over the
/// target, so a crash mid-write leaves the previous blob intact.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    path: PathBuf,
}

impl FileBlobStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl BlobStore for FileBlobStore {
    fn load(&self) -> Result<Option<String>, PersistError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                debug!(path = %self.path.display(), bytes = content.len(), "loaded blob");
                Ok(Some(content))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no blob yet");
                Ok(None)
            }
            Err(source) => Err(PersistError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn save(&mut self, blob: &str) -> Result<(), PersistError> {
        let write_err = |source| PersistError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let tmp = self.temp_path();
        let mut file = fs::File::create(&tmp).map_err(write_err)?;
        file.write_all(blob.as_bytes()).map_err(write_err)?;
        file.sync_all().map_err(write_err)?;
        drop(file);
        fs::rename(&tmp, &self.path).map_err(write_err)?;

        debug!(path = %self.path.display(), bytes = blob.len(), "saved blob");
        Ok(())
    }
}

/// Blob kept in memory; counts saves so tests can check write-through
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    blob: Option<String>,
    saves: usize,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing blob
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Some(blob.into()),
            saves: 0,
        }
    }

    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }

    /// Number of times [`BlobStore::save`] was called
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl BlobStore for MemoryBlobStore {
    fn load(&self) -> Result<Option<String>, PersistError> {
        Ok(self.blob.clone())
    }

    fn save(&mut self, blob: &str) -> Result<(), PersistError> {
        self.blob = Some(blob.to_string());
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_store_missing_blob() {
        let tmp = tempdir().unwrap();
        let store = FileBlobStore::new(tmp.path().join("data.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_file_store_save_and_load() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("nested").join("data.json");
        let mut store = FileBlobStore::new(&path);

        store.save(r#"{"items": []}"#).unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some(r#"{"items": []}"#));

        store.save("{}").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("{}"));
        assert!(!tmp.path().join("nested").join("data.json.tmp").exists());
    }

    #[test]
    fn test_file_store_read_error() {
        let tmp = tempdir().unwrap();
        // A directory cannot be read as a file
        let store = FileBlobStore::new(tmp.path());
        assert!(matches!(store.load(), Err(PersistError::Read { .. })));
    }

    #[test]
    fn test_memory_store_counts_saves() {
        let mut store = MemoryBlobStore::new();
        assert!(store.load().unwrap().is_none());
        store.save("a").unwrap();
        store.save("b").unwrap();
        assert_eq!(store.blob(), Some("b"));
        assert_eq!(store.saves(), 2);
    }
}
