//! Logging configuration from TOML (`[log]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLogConfig {
    /// Write diagnostic logs to this file in addition to stderr
    pub file: Option<PathBuf>,
    /// Append one JSON line per invocation event to this file
    pub invocations: Option<PathBuf>,
}
