//! External tool invocation.
//! The child's stdout/stderr are inherited so the user sees its output live.

use std::ffi::OsStr;
use std::process::{Command, Stdio};
use tracing::{debug, info};

use crate::config::ToolCommand;
use crate::errors::{Result, WallyMoverError};

/// How the child's output streams were wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamMode {
    Inherited,
}

/// Result of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolOutcome {
    /// Exit code (always 0 for an outcome returned as Ok)
    pub code: i32,
    pub streams: StreamMode,
}

/// Anything that can run the external installer. Blocks until it exits.
///
/// Launch failures map to `ToolLaunch`, non-zero exits to `ToolFailed`.
pub trait ToolRunner {
    fn run(&self, tool: &ToolCommand, args: &[&OsStr]) -> Result<ToolOutcome>;
}

/// Spawns a real child process. No retries, no timeout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
    fn run(&self, tool: &ToolCommand, args: &[&OsStr]) -> Result<ToolOutcome> {
        let mut cmd = Command::new(&tool.program);
        cmd.args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(dir) = &tool.working_dir {
            cmd.current_dir(dir);
        }

        debug!(program = %tool.program, ?args, cwd = ?tool.working_dir, "spawning external tool");
        let status = cmd.status().map_err(|e| WallyMoverError::ToolLaunch {
            program: tool.program.clone(),
            source: e,
        })?;

        if !status.success() {
            return Err(WallyMoverError::ToolFailed {
                program: tool.program.clone(),
                code: status.code(),
            });
        }
        info!(program = %tool.program, "external tool finished");
        Ok(ToolOutcome {
            code: status.code().unwrap_or(0),
            streams: StreamMode::Inherited,
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn zero_exit_is_ok() {
        let out = ProcessRunner
            .run(&ToolCommand::new("true"), &[OsStr::new("install")])
            .unwrap();
        assert_eq!(out.code, 0);
        assert_eq!(out.streams, StreamMode::Inherited);
    }

    #[test]
    fn non_zero_exit_is_tool_failed() {
        let err = ProcessRunner
            .run(&ToolCommand::new("false"), &[OsStr::new("install")])
            .unwrap_err();
        assert!(
            matches!(err, WallyMoverError::ToolFailed { code: Some(1), .. }),
            "{err:?}"
        );
    }

    #[test]
    fn missing_program_is_launch_error() {
        let err = ProcessRunner
            .run(&ToolCommand::new("wallymover-no-such-tool-xyz"), &[])
            .unwrap_err();
        assert!(matches!(err, WallyMoverError::ToolLaunch { .. }), "{err:?}");
    }

    #[test]
    fn runs_in_working_dir() {
        let td = tempfile::tempdir().unwrap();
        let tool = ToolCommand::new("sh").in_dir(td.path());
        ProcessRunner
            .run(&tool, &[OsStr::new("-c"), OsStr::new("touch marker")])
            .unwrap();
        assert!(td.path().join("marker").exists());
    }
}
