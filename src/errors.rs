//! Typed error definitions for wallymover.
//! Every failure carries a kind tag so the top-level handler can report it uniformly.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::staging::Phase;

/// Coarse classification used for logs and exit reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Copy,
    ExternalTool,
    Staging,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Config => "config",
            ErrorKind::Copy => "copy",
            ErrorKind::ExternalTool => "external_tool",
            ErrorKind::Staging => "staging",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
pub enum WallyMoverError {
    #[error("{} is not found. please run 'wallymover init [your packages folder path]' first", .0.display())]
    ConfigMissing(PathBuf),

    #[error("failed to read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed config {}: {source}; re-run 'wallymover init <path>' to rewrite it", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to write config {}: {source}", .path.display())]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("argument <path> is not given")]
    MissingInitPath,

    #[error("managed path {} {reason}", .path.display())]
    ManagedPathInvalid { path: PathBuf, reason: String },

    /// Filesystem failure; `message` already names the operation, path and a hint.
    #[error("{message}")]
    Fs {
        message: String,
        #[source]
        source: io::Error,
    },

    #[error("staging area {} already exists (left over from an interrupted run?); move its contents back into the managed path or delete it, then retry", .0.display())]
    StagingExists(PathBuf),

    #[error("staging area {} and managed path {} must not contain each other", .staging.display(), .managed.display())]
    StagingOverlap { managed: PathBuf, staging: PathBuf },

    #[error("failed to launch {program}: {source}")]
    ToolLaunch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} exited with {}", describe_code(.code))]
    ToolFailed { program: String, code: Option<i32> },

    /// The real content currently lives in the staging area and was not moved back.
    #[error("{phase} failed; your files are kept in the staging area {} for manual recovery: {source}", .staging.display())]
    Stranded {
        phase: Phase,
        staging: PathBuf,
        #[source]
        source: Box<WallyMoverError>,
    },
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("status {c}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

impl WallyMoverError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WallyMoverError::ConfigMissing(_)
            | WallyMoverError::ConfigRead { .. }
            | WallyMoverError::ConfigParse { .. }
            | WallyMoverError::ConfigWrite { .. }
            | WallyMoverError::ConfigSerialize(_)
            | WallyMoverError::MissingInitPath
            | WallyMoverError::ManagedPathInvalid { .. } => ErrorKind::Config,
            WallyMoverError::Fs { .. } => ErrorKind::Copy,
            WallyMoverError::ToolLaunch { .. } | WallyMoverError::ToolFailed { .. } => {
                ErrorKind::ExternalTool
            }
            WallyMoverError::StagingExists(_)
            | WallyMoverError::StagingOverlap { .. }
            | WallyMoverError::Stranded { .. } => ErrorKind::Staging,
        }
    }

    /// Stable short identifier for structured logs.
    pub fn code(&self) -> &'static str {
        match self {
            WallyMoverError::ConfigMissing(_) => "config_missing",
            WallyMoverError::ConfigRead { .. } => "config_read",
            WallyMoverError::ConfigParse { .. } => "config_parse",
            WallyMoverError::ConfigWrite { .. } => "config_write",
            WallyMoverError::ConfigSerialize(_) => "config_serialize",
            WallyMoverError::MissingInitPath => "missing_init_path",
            WallyMoverError::ManagedPathInvalid { .. } => "managed_path_invalid",
            WallyMoverError::Fs { .. } => "fs",
            WallyMoverError::StagingExists(_) => "staging_exists",
            WallyMoverError::StagingOverlap { .. } => "staging_overlap",
            WallyMoverError::ToolLaunch { .. } => "tool_launch",
            WallyMoverError::ToolFailed { .. } => "tool_failed",
            WallyMoverError::Stranded { .. } => "stranded",
        }
    }

    /// Staging directory that holds the user's files, if this error left them there.
    pub fn stranded_in(&self) -> Option<&std::path::Path> {
        match self {
            WallyMoverError::Stranded { staging, .. } => Some(staging),
            _ => None,
        }
    }
}

pub type Result<T, E = WallyMoverError> = std::result::Result<T, E>;
