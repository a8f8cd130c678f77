//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines
    Text,
    /// JSON output
    Json,
}

impl From<OutputFormat> for pipefmt_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => pipefmt_domain::OutputFormat::Text,
            OutputFormat::Json => pipefmt_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for pipefmt
#[derive(Parser, Debug)]
#[command(name = "pipefmt")]
#[command(author, version, about = "Run an external code formatter over whole documents")]
#[command(long_about = r#"
pipefmt pipes each document through an external formatter (leptosfmt by
default), waits for it under a deadline, and writes the result back only
when the formatter succeeded. A failing, hanging or missing formatter never
modifies the document.

Configuration files are loaded from (in priority order):
1. PIPEFMT_* environment variables (PIPEFMT_FORMATTER__TIMEOUT_MS=5000)
2. --config <path>     Explicit config file
3. ./pipefmt.toml      Project-level config
4. ~/.config/pipefmt/config.toml   Global config

Example:
  pipefmt format src/app.rs src/components/*.rs
  pipefmt format --check src/**/*.rs
  cat src/app.rs | pipefmt stdin
  pipefmt on-save src/app.rs
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format (overrides [output] format in config)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators and success messages
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write diagnostic logs to this file
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Format files in place
    Format {
        /// Files to format
        #[arg(required = true, value_name = "FILES")]
        files: Vec<PathBuf>,

        /// Report files that would change without writing them
        #[arg(long)]
        check: bool,

        /// Number of formatter processes to run at once
        #[arg(short, long, default_value_t = 1, value_name = "N")]
        jobs: usize,
    },

    /// Format a document read from stdin and print it to stdout
    Stdin,

    /// Handle a "document saved" event (for editor hooks)
    OnSave {
        /// The file that was saved
        file: PathBuf,
    },

    /// Turn format on save on or off in the config file
    ToggleOnSave,

    /// Check that the formatter can be run
    Probe,
}
