//! Write-temporary-then-rename file replacement.
//!
//! The new content lands in a sibling temporary file that is synced and then
//! renamed over the target, so readers see either the old file or the new
//! one. If anything fails before the rename the temporary file is removed
//! and the target is untouched.

use crate::model::StoreError;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Atomically replace `target` with `contents`.
pub fn write_atomic(target: &Path, contents: &str) -> Result<(), StoreError> {
    write_atomic_with(target, contents, |_| Ok(()))
}

/// [`write_atomic`] with a hook run on the synced temporary file just before
/// the rename. An error from the hook aborts the write.
pub(crate) fn write_atomic_with<F>(
    target: &Path,
    contents: &str,
    before_rename: F,
) -> Result<(), StoreError>
where
    F: FnOnce(&Path) -> io::Result<()>,
{
    let parent = parent_dir(target);
    std::fs::create_dir_all(&parent).map_err(|e| StoreError::io(&parent, e))?;

    let mut tmp = NamedTempFile::new_in(&parent).map_err(|e| StoreError::io(&parent, e))?;
    tmp.write_all(contents.as_bytes())
        .map_err(|e| StoreError::io(tmp.path(), e))?;
    tmp.flush().map_err(|e| StoreError::io(tmp.path(), e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| StoreError::io(tmp.path(), e))?;

    before_rename(tmp.path()).map_err(|e| StoreError::io(target, e))?;

    tmp.persist(target)
        .map_err(|e| StoreError::io(target, e.error))?;
    debug!(path = %target.display(), bytes = contents.len(), "Replaced file atomically");
    Ok(())
}

fn parent_dir(target: &Path) -> PathBuf {
    match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
