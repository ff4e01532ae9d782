//! Configuration: types, file location, TOML load/save, and validation.

pub mod file;
pub mod paths;
pub mod types;
mod validate;

pub use file::{ConfigFile, init_config, load_config, read_config_file, write_config_file};
pub use paths::{path_has_symlink_ancestor, project_root, resolve_config_path};
pub use types::{Config, LogLevel, ToolCommand, resolve_against};

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "wallymover.toml";
/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "WALLYMOVER_CONFIG";
/// Staging directory name under the project root.
pub const DEFAULT_STAGING_DIR: &str = ".wallymover-staging";
/// External installer invoked by `install` and pass-through commands.
pub const DEFAULT_TOOL: &str = "wally";
