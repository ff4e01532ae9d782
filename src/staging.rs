//! Staged relocation around the external installer.
//!
//! Cycle: CheckEmpty -> Drain -> RunExternal -> Restore -> Done.
//!
//! Invariants:
//! - The managed path is only emptied after its content was fully copied into
//!   the staging area.
//! - Once drained, the staging area is never removed until the content has been
//!   copied back; any failure in between leaves it in place and is reported as
//!   `Stranded` with the staging location.
//! - A staging area that already exists when the cycle starts is never reused.

use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::io;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::errors::{Result, WallyMoverError};
use crate::fs_ops::{CopyReport, clear_dir, copy_tree, fs_error, is_dir_empty, remove_tree};
use crate::runner::{ToolOutcome, ToolRunner};

/// Argument passed to the external tool for the install cycle.
pub const INSTALL_ARG: &str = "install";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    CheckEmpty,
    Drain,
    RunExternal,
    Restore,
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::CheckEmpty => "check",
            Phase::Drain => "drain",
            Phase::RunExternal => "external tool",
            Phase::Restore => "restore",
            Phase::Done => "done",
        };
        f.write_str(s)
    }
}

/// Summary of a completed install cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    /// None when the managed path was empty and nothing was staged.
    pub drained: Option<CopyReport>,
    pub restored: Option<CopyReport>,
    pub tool: ToolOutcome,
}

/// Run one full install cycle for `cfg.managed_path`, using `cfg.staging_dir`
/// as the temporary home and `runner` to invoke `cfg.tool`.
///
/// The managed path must exist (`Config::validate` creates it). Overlapping
/// managed and staging paths are refused here as well.
pub fn run_install(cfg: &Config, runner: &dyn ToolRunner) -> Result<InstallReport> {
    let managed = &cfg.managed_path;
    let staging = &cfg.staging_dir;
    cfg.check_disjoint()?;

    match fs::symlink_metadata(staging) {
        Ok(_) => return Err(WallyMoverError::StagingExists(staging.clone())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(fs_error("inspect staging area", staging)(e)),
    }

    info!(phase = %Phase::CheckEmpty, managed = %managed.display());
    let drained = if is_dir_empty(managed)? {
        info!(managed = %managed.display(), "managed path is empty; nothing to stage");
        None
    } else {
        Some(drain(cfg)?)
    };

    info!(phase = %Phase::RunExternal, program = %cfg.tool.program);
    let tool = match runner.run(&cfg.tool, &[OsStr::new(INSTALL_ARG)]) {
        Ok(outcome) => outcome,
        Err(e) if drained.is_some() => return Err(stranded(Phase::RunExternal, cfg, e)),
        Err(e) => return Err(e),
    };

    let restored = match drained {
        Some(_) => Some(restore(cfg)?),
        None => None,
    };

    info!(phase = %Phase::Done, managed = %managed.display());
    Ok(InstallReport {
        drained,
        restored,
        tool,
    })
}

/// Copy managed -> staging, then empty the managed path. Nothing is deleted
/// unless the copy finished.
fn drain(cfg: &Config) -> Result<CopyReport> {
    let managed = &cfg.managed_path;
    let staging = &cfg.staging_dir;
    info!(phase = %Phase::Drain, from = %managed.display(), to = %staging.display());

    if let Some(parent) = staging.parent() {
        fs::create_dir_all(parent).map_err(fs_error("create staging parent", parent))?;
    }
    // create_dir (not _all) so a staging dir that appeared since the check is an error.
    fs::create_dir(staging).map_err(fs_error("create staging area", staging))?;

    let report = copy_tree(managed, staging).inspect_err(|e| {
        error!(
            error = %e,
            managed = %managed.display(),
            staging = %staging.display(),
            "drain copy failed; managed path left untouched, delete the partial staging area before retrying"
        );
    })?;

    clear_dir(managed).map_err(|e| stranded(Phase::Drain, cfg, e))?;
    Ok(report)
}

/// Copy staging -> managed, then remove the staging area.
fn restore(cfg: &Config) -> Result<CopyReport> {
    let managed = &cfg.managed_path;
    let staging = &cfg.staging_dir;
    info!(phase = %Phase::Restore, from = %staging.display(), to = %managed.display());

    let report = copy_tree(staging, managed).map_err(|e| stranded(Phase::Restore, cfg, e))?;

    if let Err(e) = remove_tree(staging) {
        warn!(error = %e, staging = %staging.display(), "content restored but staging area could not be removed");
        return Err(e);
    }
    Ok(report)
}

fn stranded(phase: Phase, cfg: &Config, source: WallyMoverError) -> WallyMoverError {
    error!(
        %phase,
        staging = %cfg.staging_dir.display(),
        error = %source,
        "content left in staging area"
    );
    WallyMoverError::Stranded {
        phase,
        staging: cfg.staging_dir.clone(),
        source: Box::new(source),
    }
}
