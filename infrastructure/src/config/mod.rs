//! Configuration file loading for pipefmt
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `PIPEFMT_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./pipefmt.toml` or `./.pipefmt.toml`
//! 4. Global: `$XDG_CONFIG_HOME/pipefmt/config.toml`
//! 5. Default values

mod file_config;
mod loader;
mod settings_store;

pub use file_config::{FileConfig, FileFormatterConfig, FileLogConfig, FileOutputConfig};
pub use loader::{ConfigError, ConfigLoader, ConfigSources, ENV_PREFIX, PROJECT_CONFIG_FILES};
pub use settings_store::{FileSettingsStore, write_format_on_save};
