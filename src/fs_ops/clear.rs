//! Recursive deletion helpers.

use std::fs;
use std::path::Path;
use tracing::debug;

use crate::errors::Result;

use super::helpers::fs_error;

/// Delete everything inside `dir`, keeping `dir` itself.
/// Symlinks are unlinked, never followed.
pub fn clear_dir(dir: &Path) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(fs_error("read directory", dir))?;
    for entry in entries {
        let entry = entry.map_err(fs_error("read directory", dir))?;
        let path = entry.path();
        let ftype = entry.file_type().map_err(fs_error("stat", &path))?;
        if ftype.is_dir() {
            fs::remove_dir_all(&path).map_err(fs_error("remove directory", &path))?;
        } else {
            fs::remove_file(&path).map_err(fs_error("remove file", &path))?;
        }
        debug!(path = %path.display(), "removed");
    }
    Ok(())
}

/// Remove `dir` and everything below it.
pub fn remove_tree(dir: &Path) -> Result<()> {
    fs::remove_dir_all(dir).map_err(fs_error("remove directory", dir))
}
