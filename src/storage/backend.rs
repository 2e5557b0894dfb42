//! Persistence backends for rule tables and journals.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error_handling::StorageError;

/// Where a persisted list lives.
///
/// Stores never append on disk: they load the whole contents, change them in
/// memory and flush the whole contents back.
pub trait PersistenceBackend: Send {
    /// Returns the stored contents, or `None` when nothing has been stored yet.
    fn load(&self) -> Result<Option<String>, StorageError>;

    /// Replaces the stored contents.
    fn flush(&self, contents: &str) -> Result<(), StorageError>;

    /// Human-readable location used in log and error messages.
    fn location(&self) -> String;
}

/// File-backed store. Writes are whole-file rewrites and are not atomic.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if the backing file exists and is a regular file.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            location: self.location(),
            source,
        }
    }
}

impl PersistenceBackend for FileBackend {
    fn load(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn flush(&self, contents: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }
        fs::write(&self.path, contents).map_err(|e| self.io_error(e))
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory store.
///
/// Clones share the same cell, so a test can keep one handle and inspect what the
/// store under test flushed.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    contents: Arc<Mutex<Option<String>>>,
    name: String,
}

impl MemoryBackend {
    /// Creates an empty store.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            contents: Arc::new(Mutex::new(None)),
            name: name.into(),
        }
    }

    /// Creates a store that already holds `contents`.
    pub fn with_contents(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            contents: Arc::new(Mutex::new(Some(contents.into()))),
            name: name.into(),
        }
    }

    /// Returns the current contents.
    pub fn contents(&self) -> Option<String> {
        self.contents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl PersistenceBackend for MemoryBackend {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.contents())
    }

    fn flush(&self, contents: &str) -> Result<(), StorageError> {
        let mut guard = self
            .contents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Some(contents.to_string());
        Ok(())
    }

    fn location(&self) -> String {
        format!("memory:{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_backend_missing_file_loads_none() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let backend = FileBackend::new(temp_dir.path().join("absent.json"));
        assert!(!backend.exists());
        assert_eq!(backend.load().expect("load should succeed"), None);
    }

    #[test]
    fn test_file_backend_flush_creates_parent_directories() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("nested/dir/journal.json");
        let backend = FileBackend::new(&path);

        backend.flush("[]").expect("flush should succeed");

        assert!(backend.exists());
        assert_eq!(backend.load().expect("load").as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_backend_flush_rewrites_whole_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let backend = FileBackend::new(temp_dir.path().join("journal.json"));

        backend.flush("first, longer contents").expect("flush");
        backend.flush("second").expect("flush");

        assert_eq!(backend.load().expect("load").as_deref(), Some("second"));
    }

    #[test]
    fn test_file_backend_load_directory_is_io_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let backend = FileBackend::new(temp_dir.path());
        let err = backend.load().expect_err("a directory is not a readable file");
        assert!(matches!(err, StorageError::Io { .. }));
    }

    #[test]
    fn test_memory_backend_clones_share_contents() {
        let backend = MemoryBackend::new("journal");
        let observer = backend.clone();
        assert_eq!(observer.contents(), None);

        backend.flush("[1]").expect("flush");

        assert_eq!(observer.contents().as_deref(), Some("[1]"));
        assert_eq!(observer.location(), "memory:journal");
    }
}
