//! I/O error enrichment.
//!
//! Turns a bare io::Error into a `WallyMoverError::Fs` whose message names the
//! operation, the path, and a platform-aware hint.
//!
//! Usage:
//!   fs::create_dir_all(dir).map_err(fs_error("create directory", dir))?;

use std::io;
use std::path::Path;

use crate::errors::WallyMoverError;

/// "<op> '<path>': <error> (hint: ...) [os code: N]"
fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{op} '{}': {e}", path.display());
    if let Some(hint) = hint_for(e) {
        msg.push_str(&format!(" (hint: {hint})"));
    }
    if let Some(code) = e.raw_os_error() {
        msg.push_str(&format!(" [os code: {code}]"));
    }
    msg
}

#[cfg(unix)]
fn os_hint(code: i32) -> Option<&'static str> {
    Some(match code {
        libc::EACCES | libc::EPERM => "permission denied; check ownership and write permissions",
        libc::ENOENT => "path not found; verify it exists",
        libc::ENOTDIR => "a path component is a file, not a directory",
        libc::EEXIST => "already exists; remove the target first",
        libc::ENOSPC => "insufficient space on device",
        libc::EROFS => "read-only filesystem; cannot write here",
        libc::ELOOP => "too many symbolic link levels; possible symlink cycle",
        libc::ENAMETOOLONG => "filename or path too long; shorten path segments",
        libc::EBUSY => "resource busy; close programs using the packages folder",
        libc::EMFILE | libc::ENFILE => "too many open files; close files or raise limits",
        _ => return None,
    })
}

#[cfg(windows)]
fn os_hint(code: i32) -> Option<&'static str> {
    Some(match code {
        5 => "access denied; check permissions",
        2 | 3 => "path not found; verify it exists",
        32 => "sharing violation; a file is in use",
        112 => "insufficient disk space",
        206 => "filename or path too long (MAX_PATH exceeded)",
        _ => return None,
    })
}

#[cfg(not(any(unix, windows)))]
fn os_hint(_code: i32) -> Option<&'static str> {
    None
}

fn hint_for(e: &io::Error) -> Option<&'static str> {
    if let Some(hint) = e.raw_os_error().and_then(os_hint) {
        return Some(hint);
    }
    match e.kind() {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and write permissions"),
        io::ErrorKind::NotFound => Some("path not found; verify it exists"),
        io::ErrorKind::AlreadyExists => Some("already exists; remove the target first"),
        _ => None,
    }
}

/// Returns a closure suitable for `.map_err(...)` that converts io::Error into
/// a `WallyMoverError::Fs` carrying the original error as its source.
pub fn fs_error<'a>(op: &'a str, path: &'a Path) -> impl FnOnce(io::Error) -> WallyMoverError + 'a {
    move |e: io::Error| WallyMoverError::Fs {
        message: build_message(op, path, &e),
        source: e,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_op_and_path() {
        let e = io::Error::new(io::ErrorKind::NotFound, "gone");
        let err = fs_error("read directory", Path::new("/pkgs"))(e);
        let msg = err.to_string();
        assert!(msg.starts_with("read directory '/pkgs': gone"), "{msg}");
        assert!(msg.contains("path not found"), "{msg}");
    }

    #[cfg(unix)]
    #[test]
    fn raw_os_error_gets_hint_and_code() {
        let e = io::Error::from_raw_os_error(libc::ENOSPC);
        let msg = fs_error("copy file", Path::new("/stage/a.txt"))(e).to_string();
        assert!(msg.contains("insufficient space"), "{msg}");
        assert!(msg.contains(&format!("[os code: {}]", libc::ENOSPC)), "{msg}");
    }
}
