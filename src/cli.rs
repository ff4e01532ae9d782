//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Options go before the command; everything after an unknown command is
//!   forwarded to the external tool untouched.
//! - A first word that is neither one of our options nor `init`/`install`
//!   (including `--help`, `--version` and unknown flags) is forwarded too.
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, Subcommand, ValueHint};
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};

/// Rows of the usage table printed when no command is given.
pub const USAGE_ROWS: [(&str, &str); 2] = [
    ("init <path>", "Set wallymover's path"),
    ("install", "Run wally install with wallymover"),
];

/// Words that keep a command line with us instead of the external tool.
const OWN_WORDS: [&str; 8] = [
    "init",
    "install",
    "--config",
    "-d",
    "--debug",
    "--log-level",
    "--log-file",
    "--json",
];

/// CLI wrapper for the wallymover library.
/// CLI flags override config values (which are loaded from TOML).
#[derive(Parser, Debug, Clone)]
#[command(
    name = "wallymover",
    author,
    version,
    about = "Move your packages folder aside while wally installs, then put it back",
    disable_help_subcommand = true
)]
pub struct Args {
    /// Config file to use instead of ./wallymover.toml (or WALLYMOVER_CONFIG).
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Also append logs to this file.
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON.
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Set wallymover's path
    Init {
        #[arg(value_name = "PATH", value_hint = ValueHint::DirPath)]
        path: Option<PathBuf>,
        /// Anything after <path> is ignored.
        #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
        extra: Vec<OsString>,
    },
    /// Run wally install with wallymover
    Install,
    // Any other command is passed to wally verbatim.
    #[command(external_subcommand)]
    External(Vec<OsString>),
}

impl Args {
    /// Command line handed to the external tool as-is.
    pub fn passthrough(words: Vec<OsString>) -> Self {
        Self {
            config: None,
            debug: false,
            log_level: None,
            log_file: None,
            json: false,
            command: Some(Command::External(words)),
        }
    }

    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(f) = &self.log_file {
            cfg.log_file = Some(f.clone());
        }
    }
}

pub fn parse() -> Args {
    parse_args(std::env::args_os())
}

/// Parse a full argv (program name first). Only the first word decides
/// whether clap sees the line at all.
pub fn parse_args<I, T>(argv: I) -> Args
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
    match argv.get(1) {
        Some(first) if !is_own_word(first) => Args::passthrough(argv[1..].to_vec()),
        _ => Args::parse_from(argv),
    }
}

fn is_own_word(word: &OsStr) -> bool {
    let Some(w) = word.to_str() else {
        return false;
    };
    let name = match w.split_once('=') {
        Some((flag, _)) if flag.starts_with("--") => flag,
        _ => w,
    };
    OWN_WORDS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn unknown_command_keeps_all_words() {
        let args = Args::parse_from(["wallymover", "publish", "--token", "x"]);
        assert_eq!(
            args.command,
            Some(Command::External(vec![
                "publish".into(),
                "--token".into(),
                "x".into()
            ]))
        );
    }

    #[test]
    fn init_path_is_optional_at_parse_time() {
        let args = Args::parse_from(["wallymover", "init"]);
        assert_eq!(
            args.command,
            Some(Command::Init {
                path: None,
                extra: vec![]
            })
        );
    }

    #[test]
    fn init_ignores_words_after_path() {
        let args = parse_args(["wallymover", "init", "pkgs", "more", "--stuff"]);
        assert_eq!(
            args.command,
            Some(Command::Init {
                path: Some("pkgs".into()),
                extra: vec!["more".into(), "--stuff".into()]
            })
        );
    }

    #[test]
    fn unknown_leading_flags_are_forwarded() {
        for first in ["--version", "-V", "--help", "-h", "-v", "--frobnicate"] {
            let args = parse_args(["wallymover", first, "x"]);
            assert_eq!(
                args.command,
                Some(Command::External(vec![first.into(), "x".into()])),
                "{first}"
            );
            assert!(!args.debug && !args.json && args.config.is_none());
        }
    }

    #[test]
    fn own_options_still_parse() {
        let args = parse_args(["wallymover", "--config=c.toml", "-d", "install"]);
        assert_eq!(args.config.as_deref(), Some(std::path::Path::new("c.toml")));
        assert!(args.debug);
        assert_eq!(args.command, Some(Command::Install));

        let args = parse_args(["wallymover", "--json", "publish", "--token", "x"]);
        assert!(args.json);
        assert_eq!(
            args.command,
            Some(Command::External(vec![
                "publish".into(),
                "--token".into(),
                "x".into()
            ]))
        );
    }

    #[test]
    fn no_words_means_no_command() {
        assert_eq!(parse_args(["wallymover"]).command, None);
    }
}
