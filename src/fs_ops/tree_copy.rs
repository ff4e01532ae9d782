//! Recursive tree copy used for both Drain and Restore.
//! Walks the source with walkdir, recreates directories, and byte-copies every
//! non-directory entry. The source tree is never modified.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::errors::Result;

use super::helpers::fs_error;

/// What a single tree copy did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyReport {
    pub dirs: u64,
    pub files: u64,
    pub bytes: u64,
}

/// Kind of a discovered entry. Symlinks resolve to their target's kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// A file or directory found under the source root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub relative: PathBuf,
    pub kind: EntryKind,
}

/// Copy every entry under `src` into `dest`, creating `dest` and any missing
/// parents. Files at the same relative path are truncated and overwritten.
///
/// The first I/O error aborts the copy. Whatever was already written to `dest`
/// stays there; rolling back is up to the caller.
pub fn copy_tree(src: &Path, dest: &Path) -> Result<CopyReport> {
    // Fail early with a clear message instead of an opaque walk error.
    let meta = fs::metadata(src).map_err(fs_error("read source directory", src))?;
    if !meta.is_dir() {
        return Err(fs_error("read source directory", src)(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a directory",
        )));
    }

    fs::create_dir_all(dest).map_err(fs_error("create destination directory", dest))?;

    let mut report = CopyReport::default();
    for entry in walk(src) {
        let entry = entry?;
        let target = dest.join(&entry.relative);
        match entry.kind {
            EntryKind::Directory => {
                fs::create_dir_all(&target).map_err(fs_error("create directory", &target))?;
                report.dirs += 1;
            }
            EntryKind::File => {
                let from = src.join(&entry.relative);
                let bytes = fs::copy(&from, &target).map_err(fs_error("copy file", &from))?;
                debug!(src = %from.display(), dest = %target.display(), bytes, "copied file");
                report.files += 1;
                report.bytes += bytes;
            }
        }
    }

    info!(
        src = %src.display(),
        dest = %dest.display(),
        files = report.files,
        dirs = report.dirs,
        bytes = report.bytes,
        "copied tree"
    );
    Ok(report)
}

/// Enumerate entries under `root` (root excluded), parents before children.
/// Siblings come back in file-name order so runs are reproducible.
pub fn walk(root: &Path) -> impl Iterator<Item = Result<TreeEntry>> + '_ {
    WalkDir::new(root)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .map(move |res| {
            let entry = res.map_err(|e| {
                let at = e.path().unwrap_or(root).to_path_buf();
                fs_error("read directory entry", &at)(io::Error::from(e))
            })?;
            let relative = entry
                .path()
                .strip_prefix(root)
                .map(Path::to_path_buf)
                .unwrap_or_else(|_| entry.path().to_path_buf());
            let kind = if entry.file_type().is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            Ok(TreeEntry { relative, kind })
        })
}

/// True when `dir` has no entries at all.
pub fn is_dir_empty(dir: &Path) -> Result<bool> {
    let mut it = fs::read_dir(dir).map_err(fs_error("read directory", dir))?;
    match it.next() {
        None => Ok(true),
        Some(Ok(_)) => Ok(false),
        Some(Err(e)) => Err(fs_error("read directory", dir)(e)),
    }
}
