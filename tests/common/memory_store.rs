//! In-memory file store for testing
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use feature_overlay::error::{Error, Result};
use feature_overlay::store::FileStore;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Simple in-memory `FileStore`
///
/// Features:
/// - Files keyed by path
/// - Call tracking for verification
/// - Error injection for failure path testing
#[derive(Default)]
pub struct MemoryStore {
    files: Mutex<HashMap<PathBuf, Vec<u8>>>,
    // Call tracking
    read_calls: Mutex<Vec<PathBuf>>,
    write_calls: Mutex<Vec<PathBuf>>,
    // Error injection
    fail_reads: Mutex<HashSet<PathBuf>>,
    fail_writes: Mutex<HashSet<PathBuf>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file
    pub fn put(&self, path: impl AsRef<Path>, contents: impl AsRef<[u8]>) {
        self.files
            .lock()
            .unwrap()
            .insert(path.as_ref().to_path_buf(), contents.as_ref().to_vec());
    }

    /// Current contents of a file as text
    pub fn text(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files
            .lock()
            .unwrap()
            .get(path.as_ref())
            .map(|b| String::from_utf8_lossy(b).into_owned())
    }

    /// Whether a file exists
    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        self.files.lock().unwrap().contains_key(path.as_ref())
    }

    // === Error injection methods ===

    /// Make reads of `path` fail
    pub fn fail_read(&self, path: impl AsRef<Path>) {
        self.fail_reads
            .lock()
            .unwrap()
            .insert(path.as_ref().to_path_buf());
    }

    /// Make writes of `path` fail
    pub fn fail_write(&self, path: impl AsRef<Path>) {
        self.fail_writes
            .lock()
            .unwrap()
            .insert(path.as_ref().to_path_buf());
    }

    // === Call inspection methods ===

    /// Paths read so far, in order
    pub fn read_calls(&self) -> Vec<PathBuf> {
        self.read_calls.lock().unwrap().clone()
    }

    /// Paths written so far, in order
    pub fn write_calls(&self) -> Vec<PathBuf> {
        self.write_calls.lock().unwrap().clone()
    }
}

impl FileStore for MemoryStore {
    fn read(&self, path: &Path) -> Result<Option<Vec<u8>>> {
        self.read_calls.lock().unwrap().push(path.to_path_buf());
        if self.fail_reads.lock().unwrap().contains(path) {
            return Err(Error::io(
                path,
                io::Error::new(io::ErrorKind::PermissionDenied, "injected read failure"),
            ));
        }
        Ok(self.files.lock().unwrap().get(path).cloned())
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.write_calls.lock().unwrap().push(path.to_path_buf());
        if self.fail_writes.lock().unwrap().contains(path) {
            return Err(Error::io(
                path,
                io::Error::new(io::ErrorKind::PermissionDenied, "injected write failure"),
            ));
        }
        self.put(path, contents);
        Ok(())
    }
}
