//! TOML config file support.
//! - Reads `wallymover.toml` (the `Path` key plus optional extras).
//! - Writes it atomically for `init`, keeping keys the user already set.
//!
//! Notes:
//! - This module only reads/writes the file; directory checks happen in validate.rs.
//! - Unknown keys are rejected so typos surface instead of being ignored.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

use crate::errors::{Result, WallyMoverError};

use super::paths::project_root;
use super::types::{Config, LogLevel, ToolCommand, resolve_against};

/// On-disk shape of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// The managed packages directory.
    #[serde(rename = "Path")]
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staging_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<String>,
}

/// Read and parse `path`. A missing file maps to `ConfigMissing`.
pub fn read_config_file(path: &Path) -> Result<ConfigFile> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            WallyMoverError::ConfigMissing(path.to_path_buf())
        } else {
            WallyMoverError::ConfigRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    toml::from_str(&content).map_err(|e| WallyMoverError::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Serialize and atomically replace `path` (temp sibling + rename).
pub fn write_config_file(path: &Path, cfg: &ConfigFile) -> Result<()> {
    let data = toml::to_string(cfg)?;
    let write_err = |e: io::Error| WallyMoverError::ConfigWrite {
        path: path.to_path_buf(),
        source: e,
    };

    let tmp = tmp_sibling_name(path);
    fs::write(&tmp, data.as_bytes()).map_err(write_err)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(write_err(e));
    }
    debug!(path = %path.display(), "wrote config");
    Ok(())
}

/// Load `config_file` and resolve it into a runtime Config.
pub fn load_config(config_file: &Path) -> Result<Config> {
    let raw = read_config_file(config_file)?;
    let root = project_root(config_file);

    let trimmed = raw.path.trim();
    if trimmed.is_empty() {
        return Err(WallyMoverError::ManagedPathInvalid {
            path: PathBuf::new(),
            reason: format!("is empty in {}", config_file.display()),
        });
    }

    let mut cfg = Config::new(&root, trimmed);
    if let Some(s) = non_empty(raw.staging_dir.as_deref()) {
        cfg.staging_dir = resolve_against(&root, Path::new(s));
    }
    if let Some(t) = non_empty(raw.tool.as_deref()) {
        cfg.tool = ToolCommand::new(t).in_dir(&root);
    }
    if let Some(l) = non_empty(raw.log_level.as_deref()) {
        match LogLevel::parse(l) {
            Some(level) => cfg.log_level = level,
            None => warn!(value = l, "ignoring unknown log_level in config"),
        }
    }
    cfg.log_file = non_empty(raw.log_file.as_deref()).map(|f| resolve_against(&root, Path::new(f)));

    debug!(
        config = %config_file.display(),
        managed = %cfg.managed_path.display(),
        staging = %cfg.staging_dir.display(),
        tool = %cfg.tool.program,
        "loaded config"
    );
    Ok(cfg)
}

/// `init <path>`: set the managed path, keeping any other keys already present.
pub fn init_config(config_file: &Path, managed: Option<&Path>) -> Result<ConfigFile> {
    let managed = managed
        .map(|p| p.to_string_lossy().trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or(WallyMoverError::MissingInitPath)?;

    let mut file = match read_config_file(config_file) {
        Ok(existing) => existing,
        Err(WallyMoverError::ConfigMissing(_)) => ConfigFile::default(),
        Err(e) => {
            warn!(error = %e, "existing config unreadable; rewriting from scratch");
            ConfigFile::default()
        }
    };
    file.path = managed;
    write_config_file(config_file, &file)?;
    info!(config = %config_file.display(), path = %file.path, "initialized config");
    Ok(file)
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Unique hidden sibling used for atomic config writes.
/// Pattern: .wallymover.tmp.<pid>.<nanos>.<seq>
fn tmp_sibling_name(target: &Path) -> PathBuf {
    let pid = std::process::id();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    let name = format!(".wallymover.tmp.{pid}.{nanos}.{seq}");
    project_root(target).join(name)
}
