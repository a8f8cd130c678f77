//! Progress reporting for batch formatting

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use pipefmt_application::ProgressNotifier;
use pipefmt_domain::DocumentId;
use std::sync::Mutex;

/// Reports batch progress with a progress bar
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_batch_start(&self, total: usize) {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(Self::style());
        pb.set_prefix("Formatting");
        pb.set_message("Starting...");

        if let Ok(mut bar) = self.bar.lock() {
            *bar = Some(pb);
        }
    }

    fn on_document_complete(&self, document: &DocumentId, success: bool) {
        if let Ok(bar) = self.bar.lock()
            && let Some(pb) = bar.as_ref()
        {
            let status = if success {
                format!("{} {}", "v".green(), document)
            } else {
                format!("{} {}", "x".red(), document)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_batch_complete(&self) {
        if let Ok(mut bar) = self.bar.lock()
            && let Some(pb) = bar.take()
        {
            pb.finish_and_clear();
        }
    }
}

/// Simple text-based progress (no fancy UI), written to stderr
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_batch_start(&self, total: usize) {
        eprintln!("{} {} ({} files)", "->".cyan(), "Formatting".bold(), total);
    }

    fn on_document_complete(&self, document: &DocumentId, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), document);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), document);
        }
    }

    fn on_batch_complete(&self) {}
}
