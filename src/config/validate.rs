//! Config validation logic.
//! Makes sure the managed path is a usable directory and that it and the
//! staging area are disjoint.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::errors::{Result, WallyMoverError};
use crate::fs_ops::fs_error;

use super::types::Config;

impl Config {
    /// Create the managed directory if missing, check it is readable, and
    /// reject a staging area nested inside it (or the reverse).
    pub fn validate(&self) -> Result<()> {
        let managed = &self.managed_path;
        ensure_dir_is_or_create(managed)?;
        fs::read_dir(managed).map_err(fs_error("read managed path", managed))?;
        debug!(path = %managed.display(), "managed path readable");
        self.check_disjoint()?;

        info!(
            managed = %managed.display(),
            staging = %self.staging_dir.display(),
            "config validated"
        );
        Ok(())
    }

    /// Reject a staging area nested inside the managed path, or the reverse.
    /// Compares canonical forms, so symlinked spellings of one place still clash.
    pub fn check_disjoint(&self) -> Result<()> {
        let managed_real = real_path(&self.managed_path);
        let staging_real = real_path(&self.staging_dir);
        if managed_real.starts_with(&staging_real) || staging_real.starts_with(&managed_real) {
            return Err(WallyMoverError::StagingOverlap {
                managed: self.managed_path.clone(),
                staging: self.staging_dir.clone(),
            });
        }
        Ok(())
    }
}

/// Ensure directory exists (create if missing). If exists, it must be a directory.
fn ensure_dir_is_or_create(path: &Path) -> Result<()> {
    if path.exists() {
        if !path.is_dir() {
            return Err(WallyMoverError::ManagedPathInvalid {
                path: path.to_path_buf(),
                reason: "exists but isn't a directory".into(),
            });
        }
    } else {
        fs::create_dir_all(path).map_err(fs_error("create managed path", path))?;
        info!(path = %path.display(), "created managed path");
    }
    Ok(())
}

/// Canonical form of `p`; for a not-yet-existing path, canonicalize the
/// deepest existing ancestor and re-append the rest.
fn real_path(p: &Path) -> PathBuf {
    if let Ok(real) = dunce::canonicalize(p) {
        return real;
    }
    match (p.parent(), p.file_name()) {
        (Some(parent), Some(name)) => real_path(parent).join(name),
        _ => p.to_path_buf(),
    }
}
