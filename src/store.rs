//! File access for the merge pipelines
//!
//! The merge engine only ever reads whole files and replaces whole files.
//! [`FileStore`] captures exactly that, so the pipelines can run against an
//! in-memory store in tests and the local filesystem everywhere else.

use crate::error::{Error, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Whole-file read/replace access
pub trait FileStore {
    /// Read a file, returning `None` if it does not exist
    fn read(&self, path: &Path) -> Result<Option<Vec<u8>>>;

    /// Replace a file's contents, creating parent directories as needed
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
}

/// [`FileStore`] backed by the local filesystem
///
/// Writes go to a sibling temporary file that is then renamed over the
/// target, so readers observe either the previous or the new contents.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileStore;

impl FileStore for LocalFileStore {
    fn read(&self, path: &Path) -> Result<Option<Vec<u8>>> {
        match fs::read(path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::io(path, e)),
        }
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
        }

        let staging = staging_path(path);
        if let Err(e) = fs::write(&staging, contents) {
            discard(&staging);
            return Err(Error::io(&staging, e));
        }
        if let Err(e) = fs::rename(&staging, path) {
            discard(&staging);
            return Err(Error::io(path, e));
        }
        Ok(())
    }
}

/// Best-effort removal of a staging file after a failed write
fn discard(staging: &Path) {
    match fs::remove_file(staging) {
        Err(e) if e.kind() != ErrorKind::NotFound => {
            tracing::warn!(path = %staging.display(), error = %e, "could not remove staging file");
        }
        _ => {}
    }
}

/// `dir/.name.tmp` next to the target
fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map_or_else(|| "output".into(), |n| n.to_string_lossy().into_owned());
    path.with_file_name(format!(".{name}.tmp"))
}
