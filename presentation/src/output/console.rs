//! Console output for invocation results

use colored::Colorize;
use pipefmt_application::{BatchReport, DocumentStatus, FormatNotifier};
use pipefmt_domain::{Applied, ConfigIssue, DocumentId, FormatError, ProbeResult, ToolDescriptor};
use std::collections::HashSet;
use std::sync::Mutex;

/// Prints invocation results to stderr as they happen.
///
/// A missing formatter is shown with its install link, once per tool; every
/// other failure is shown as an error line. Successes are only printed when
/// `verbose`.
pub struct ConsoleNotifier {
    verbose: bool,
    failures: bool,
    reported_missing: Mutex<HashSet<String>>,
}

impl ConsoleNotifier {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            failures: true,
            reported_missing: Mutex::new(HashSet::new()),
        }
    }

    /// Leave failures to a summary printed later (batch runs).
    pub fn without_failures(mut self) -> Self {
        self.failures = false;
        self
    }

    pub fn tool_missing_message(tool: &str, install_url: &str) -> String {
        format!(
            "{} '{}' was not found or could not be run. Install it from {}",
            "Formatter missing:".yellow().bold(),
            tool,
            install_url.underline()
        )
    }
}

impl FormatNotifier for ConsoleNotifier {
    fn on_tool_missing(&self, tool: &str, install_url: &str) {
        let first = self
            .reported_missing
            .lock()
            .map(|mut seen| seen.insert(tool.to_string()))
            .unwrap_or(true);
        if first {
            eprintln!("{}", Self::tool_missing_message(tool, install_url));
        }
    }

    fn on_failure(&self, document: &DocumentId, error: &FormatError) {
        if self.failures {
            eprintln!("{} {}: {}", "error:".red().bold(), document, error);
        }
    }

    fn on_applied(&self, document: &DocumentId, applied: &Applied) {
        if !self.verbose {
            return;
        }
        match applied {
            Applied::Replaced { bytes } => {
                eprintln!("{} {} ({} bytes)", "formatted".green(), document, bytes)
            }
            Applied::Unchanged => eprintln!("{} {}", "unchanged".dimmed(), document),
        }
    }
}

/// Formats command results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// One line per document plus a summary line.
    pub fn format_batch(report: &BatchReport, check: bool) -> String {
        let mut output = String::new();

        for entry in &report.documents {
            let line = match &entry.status {
                DocumentStatus::Formatted => format!("{} {}", "formatted".green(), entry.document),
                DocumentStatus::Unchanged => {
                    format!("{} {}", "unchanged".dimmed(), entry.document)
                }
                DocumentStatus::WouldChange => {
                    format!("{} {}", "would reformat".yellow(), entry.document)
                }
                DocumentStatus::Failed { message, .. } => {
                    format!("{} {}: {}", "failed".red(), entry.document, message)
                }
            };
            output.push_str(&line);
            output.push('\n');
        }

        output.push_str(&Self::summary(report, check));
        output
    }

    fn summary(report: &BatchReport, check: bool) -> String {
        let total = report.documents.len();
        let changed = report.changed();
        let failed = report.failures();
        let verb = if check { "would change" } else { "formatted" };

        let mut parts = vec![format!("{} {}", changed, verb)];
        parts.push(format!("{} unchanged", total - changed - failed));
        if failed > 0 {
            parts.push(format!("{}", format!("{} failed", failed).red()));
        }

        format!("{} {}\n", "Summary:".cyan().bold(), parts.join(", "))
    }

    /// Format as JSON
    pub fn format_batch_json(report: &BatchReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn format_probe(tool: &ToolDescriptor, probe: &ProbeResult, install_url: &str) -> String {
        match probe {
            ProbeResult::Available { version } => format!(
                "{} {} ({})",
                "available".green().bold(),
                tool.program(),
                if version.is_empty() { "no version output" } else { version }
            ),
            ProbeResult::Missing(reason) => format!(
                "{}\n  reason: {}",
                ConsoleNotifier::tool_missing_message(tool.program(), install_url),
                reason
            ),
        }
    }

    pub fn format_probe_json(tool: &ToolDescriptor, probe: &ProbeResult) -> String {
        let value = match probe {
            ProbeResult::Available { version } => serde_json::json!({
                "tool": tool.program(),
                "available": true,
                "version": version,
            }),
            ProbeResult::Missing(reason) => serde_json::json!({
                "tool": tool.program(),
                "available": false,
                "reason": reason.to_string(),
            }),
        };
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn format_issue(issue: &ConfigIssue) -> String {
        if issue.is_error() {
            format!("{} {}", "config error:".red().bold(), issue.message)
        } else {
            format!("{} {}", "config warning:".yellow().bold(), issue.message)
        }
    }
}
