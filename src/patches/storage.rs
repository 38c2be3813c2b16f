//! Persistence for user patch files.

use crate::error::{Error, Result};
use crate::store::FileStore;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Load a patch list.
///
/// Returns an empty list if the file doesn't exist or holds only
/// whitespace. Malformed JSON is an `Error::PatchFormat`; callers decide
/// whether to degrade.
pub fn load_patches<P: DeserializeOwned>(store: &dyn FileStore, path: &Path) -> Result<Vec<P>> {
    let Some(bytes) = store.read(path)? else {
        return Ok(Vec::new());
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    serde_json::from_slice(&bytes)
        .map_err(|e| Error::PatchFormat(format!("failed to parse {}: {e}", path.display())))
}

/// Render a patch list as pretty JSON with a trailing newline.
///
/// Keys follow field declaration order, so identical patches always
/// produce identical bytes.
pub fn encode_patches<P: Serialize>(patches: &[P]) -> Result<String> {
    let mut content = serde_json::to_string_pretty(patches)
        .map_err(|e| Error::Serialize(format!("failed to serialize patches: {e}")))?;
    content.push('\n');
    Ok(content)
}

/// Replace the patch file with `patches`.
pub fn save_patches<P: Serialize>(store: &dyn FileStore, path: &Path, patches: &[P]) -> Result<()> {
    let content = encode_patches(patches)?;
    store.write(path, content.as_bytes())
}
