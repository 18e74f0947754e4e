//! Key-value persistence port for the cart.
//!
//! The cart engine never talks to a concrete storage medium directly; it
//! goes through [`KeyValueStore`], a get/set interface with string-serialize
//! semantics. Implementations can back this with whatever the host page
//! context offers (a browser-profile file, an in-memory map for tests)
//! while the engine controls what is stored.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised by a storage backend.
///
/// These propagate unrecovered to the caller of the failing operation;
/// previously persisted state is unaffected.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed (e.g., quota exceeded, permission denied).
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),

    /// Backend-specific failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// A key-value persistence interface with string values.
///
/// Methods take `&self`, allowing implementations to use interior
/// mutability. Reading a missing key is `Ok(None)`, never an error.
pub trait KeyValueStore {
    /// Retrieve the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend could not be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write failed. Failed writes leave any
    /// previously stored value intact.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store: the test fake, and the backend for page contexts with
/// no durable medium.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// File-backed store: one file per key inside a root directory, which is
/// how the cart survives page loads and navigation between pages.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// the first write.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory holding the per-key files.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are caller-controlled; map anything outside a conservative
        // character set to '_' so a key can never escape the root.
        let file_name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(format!("{file_name}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}
