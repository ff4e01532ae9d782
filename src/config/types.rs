//! Core configuration types.
//! - Config holds the resolved settings for one invocation.
//! - LogLevel represents verbosity with simple parsing helpers.
//! - ToolCommand names the external installer and where it runs.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::{DEFAULT_STAGING_DIR, DEFAULT_TOOL};

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Warnings and errors (default)
    #[default]
    Normal,
    /// Phase-by-phase progress
    Info,
    /// Every file copied or removed
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" | "warn" => Some(LogLevel::Normal),
            "info" | "verbose" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// External program invocation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    /// Executable name looked up on PATH, or an explicit path.
    pub program: String,
    /// Working directory for the child; inherits ours when None.
    pub working_dir: Option<PathBuf>,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            working_dir: None,
        }
    }

    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

impl Default for ToolCommand {
    fn default() -> Self {
        Self::new(DEFAULT_TOOL)
    }
}

/// Resolved settings for one invocation. All paths are absolute.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory whose content gets staged while the tool runs
    pub managed_path: PathBuf,
    /// Temporary home for the managed content
    pub staging_dir: PathBuf,
    /// Installer to run
    pub tool: ToolCommand,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Build a Config rooted at `project_root` (the directory holding the
    /// config file) with default staging dir and tool.
    pub fn new(project_root: impl Into<PathBuf>, managed_path: impl Into<PathBuf>) -> Self {
        let root = project_root.into();
        Self {
            managed_path: resolve_against(&root, &managed_path.into()),
            staging_dir: root.join(DEFAULT_STAGING_DIR),
            tool: ToolCommand::default().in_dir(root),
            log_level: LogLevel::default(),
            log_file: None,
        }
    }
}

/// Join `p` onto `base` unless it is already absolute.
pub fn resolve_against(base: &Path, p: &Path) -> PathBuf {
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base.join(p)
    }
}
