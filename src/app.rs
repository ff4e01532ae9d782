//! Application orchestrator.
//! Dispatches the command, loads config, initializes logging, and is the single
//! place where errors are turned into user-facing messages and an exit code.

use anyhow::Result;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

use wallymover::cli::{Args, Command, USAGE_ROWS};
use wallymover::config::{init_config, load_config, resolve_config_path};
use wallymover::output as out;
use wallymover::{
    Config, LogLevel, ProcessRunner, ToolCommand, ToolRunner, WallyMoverError, run_install,
};

use crate::logging::init_tracing;

/// Run the CLI application and map the outcome to a process exit code.
pub fn run(args: Args) -> ExitCode {
    let mut guard = None;
    let result = dispatch(&args, &mut guard);
    let code = match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    };
    // Flush file logs before exit.
    drop(guard);
    code
}

fn dispatch(args: &Args, guard: &mut Option<WorkerGuard>) -> Result<()> {
    let Some(command) = &args.command else {
        out::print_usage(&program_name(), &USAGE_ROWS);
        return Ok(());
    };

    let cwd = std::env::current_dir()?;
    let config_file = resolve_config_path(args.config.as_deref(), &cwd);

    match command {
        Command::Init { path, extra } => {
            *guard = init_logging(args, args.effective_log_level().unwrap_or_default(), None)?;
            if !extra.is_empty() {
                debug!(?extra, "ignoring words after <path>");
            }
            init_config(&config_file, path.as_deref())?;
            out::print_success(&format!(
                "successfully initialized {}",
                config_file.display()
            ));
            Ok(())
        }
        Command::Install => {
            let mut cfg = load_config(&config_file)?;
            args.apply_overrides(&mut cfg);
            *guard = init_logging(args, cfg.log_level.clone(), cfg.log_file.as_deref())?;
            debug!(?args, config = %config_file.display(), "starting install");
            install(&cfg)
        }
        Command::External(words) => {
            let tool = passthrough_tool(&config_file);
            let level = args.effective_log_level().unwrap_or_default();
            *guard = init_logging(args, level, args.log_file.as_deref())?;
            let argv: Vec<&OsStr> = words.iter().map(|w| w.as_os_str()).collect();
            debug!(program = %tool.program, ?argv, "delegating to external tool");
            ProcessRunner.run(&tool, &argv)?;
            Ok(())
        }
    }
}

fn install(cfg: &Config) -> Result<()> {
    cfg.validate()?;
    let report = run_install(cfg, &ProcessRunner)?;
    match report.restored {
        Some(r) => info!(
            files = r.files,
            bytes = r.bytes,
            managed = %cfg.managed_path.display(),
            "install cycle complete"
        ),
        None => {
            info!("install cycle complete; nothing was staged");
            out::print_info(&format!(
                "{} was empty; nothing was staged",
                cfg.managed_path.display()
            ));
        }
    }
    out::print_success("successfully installed and moved with wallymover!");
    Ok(())
}

/// Tool for pass-through commands: the configured one if a config is
/// readable, otherwise the default. Runs in the caller's directory.
fn passthrough_tool(config_file: &Path) -> ToolCommand {
    match load_config(config_file) {
        Ok(cfg) => ToolCommand::new(cfg.tool.program),
        Err(WallyMoverError::ConfigMissing(_)) => ToolCommand::default(),
        Err(e) => {
            out::print_warn(&format!("{e}; using the default tool"));
            ToolCommand::default()
        }
    }
}

fn init_logging(
    args: &Args,
    level: LogLevel,
    log_file: Option<&Path>,
) -> Result<Option<WorkerGuard>> {
    init_tracing(&level, log_file, args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {e}"));
        e
    })
}

/// Print the error and choose an exit code. A failed pass-through keeps the
/// tool's own status.
fn report(e: &anyhow::Error) -> ExitCode {
    let Some(wm) = e.downcast_ref::<WallyMoverError>() else {
        error!(error = ?e, "command failed");
        out::print_error(&format!("{e:#}"));
        return ExitCode::FAILURE;
    };

    error!(code = wm.code(), kind = %wm.kind(), error = %wm, "command failed");
    out::print_error(&wm.to_string());
    if let Some(staging) = wm.stranded_in() {
        warn!(staging = %staging.display(), "manual recovery required");
        out::print_warn(&format!(
            "copy everything in {} back into your packages folder, then delete {}",
            staging.display(),
            staging.display()
        ));
    }

    match wm {
        WallyMoverError::ToolFailed {
            code: Some(c), ..
        } => ExitCode::from(u8::try_from(*c).ok().filter(|c| *c != 0).unwrap_or(1)),
        _ => ExitCode::FAILURE,
    }
}

fn program_name() -> String {
    std::env::args_os()
        .next()
        .map(PathBuf::from)
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "wallymover".to_string())
}
