//! Tool descriptor and locator.
//!
//! [`locate`] turns the configured settings into a [`ToolDescriptor`]. It is
//! pure: no `PATH` lookup and no process execution happen here. Whether the
//! descriptor points at something runnable is the prober's question.

use crate::config::settings::{DEFAULT_TOOL, FormatterSettings};
use std::time::Duration;

/// Resolved formatter executable plus how to call it.
///
/// Derived from configuration once per invocation and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDescriptor {
    program: String,
    args: Vec<String>,
    version_args: Vec<String>,
    timeout: Duration,
}

impl ToolDescriptor {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            version_args: Vec::new(),
            timeout,
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_version_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.version_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Executable name or path
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments for a formatting run
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Arguments for the availability probe
    pub fn version_args(&self) -> &[String] {
        &self.version_args
    }

    /// Deadline for a formatting run
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl std::fmt::Display for ToolDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Resolve the configured formatter into a descriptor.
///
/// A missing or blank `tool_path` falls back to [`DEFAULT_TOOL`].
pub fn locate(settings: &FormatterSettings) -> ToolDescriptor {
    let program = settings
        .tool_path
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or(DEFAULT_TOOL);

    ToolDescriptor::new(program, settings.timeout)
        .with_args(settings.args.iter().cloned())
        .with_version_args(settings.version_args.iter().cloned())
}
