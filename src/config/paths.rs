//! Config file location and symlink checks.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::types::resolve_against;
use super::{CONFIG_ENV, DEFAULT_CONFIG_FILE};

/// Config file to use.
/// Precedence: explicit flag > WALLYMOVER_CONFIG > `wallymover.toml` in `cwd`.
/// Relative values resolve against `cwd`.
pub fn resolve_config_path(explicit: Option<&Path>, cwd: &Path) -> PathBuf {
    if let Some(p) = explicit {
        return resolve_against(cwd, p);
    }
    match env::var_os(CONFIG_ENV) {
        Some(v) if !v.is_empty() => resolve_against(cwd, Path::new(&v)),
        _ => cwd.join(DEFAULT_CONFIG_FILE),
    }
}

/// Directory that relative settings in `config_file` are resolved against.
pub fn project_root(config_file: &Path) -> PathBuf {
    match config_file.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() {
            let meta = fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn explicit_beats_env() {
        unsafe { env::set_var(CONFIG_ENV, "/from/env.toml") };
        let p = resolve_config_path(Some(Path::new("cfg/w.toml")), Path::new("/work"));
        assert_eq!(p, PathBuf::from("/work/cfg/w.toml"));
        unsafe { env::remove_var(CONFIG_ENV) };
    }

    #[test]
    #[serial]
    fn env_beats_default() {
        unsafe { env::set_var(CONFIG_ENV, "/from/env.toml") };
        let p = resolve_config_path(None, Path::new("/work"));
        assert_eq!(p, PathBuf::from("/from/env.toml"));
        unsafe { env::remove_var(CONFIG_ENV) };
    }

    #[test]
    #[serial]
    fn default_is_in_cwd() {
        unsafe { env::remove_var(CONFIG_ENV) };
        let p = resolve_config_path(None, Path::new("/work"));
        assert_eq!(p, PathBuf::from("/work/wallymover.toml"));
        assert_eq!(project_root(&p), PathBuf::from("/work"));
    }
}
