//! Core library for `wallymover`.
//!
//! Moves a managed packages directory into a staging area, runs the external
//! installer against the emptied directory, then moves the content back.
//! The binary is a thin shell around `staging::run_install`.

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod runner;
pub mod staging;

pub use config::{Config, LogLevel, ToolCommand};
pub use errors::{ErrorKind, Result, WallyMoverError};
pub use fs_ops::{CopyReport, copy_tree};
pub use runner::{ProcessRunner, StreamMode, ToolOutcome, ToolRunner};
pub use staging::{InstallReport, Phase, run_install};
