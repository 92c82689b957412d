//! CLI presenter for output formatting

use std::path::Path;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

/// Width of the separator line between build phases
const RULE_WIDTH: usize = 50;

/// Presenter for CLI output formatting.
///
/// Clones share the same progress bar, so a clone handed to a callback
/// prints without tearing the bar.
#[derive(Clone)]
pub struct Presenter {
    progress: Option<ProgressBar>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self { progress: None }
    }

    /// Start a progress bar; its length can be set later
    pub fn start_progress(&mut self, total: u64) {
        let bar = ProgressBar::new(total);
        if let Ok(style) =
            ProgressStyle::default_bar().template("{bar:30.cyan/blue} {pos}/{len} {msg}")
        {
            bar.set_style(style.progress_chars("█▉░"));
        }
        self.progress = Some(bar);
    }

    /// Set the progress bar length
    pub fn set_progress_length(&self, total: u64) {
        if let Some(ref bar) = self.progress {
            bar.set_length(total);
        }
    }

    /// Advance the progress bar by one and show a message
    pub fn advance_progress(&self, message: &str) {
        if let Some(ref bar) = self.progress {
            bar.set_message(message.to_string());
            bar.inc(1);
        }
    }

    /// Remove the progress bar
    pub fn finish_progress(&mut self) {
        if let Some(bar) = self.progress.take() {
            bar.finish_and_clear();
        }
    }

    /// Print to stderr, suspending the progress bar while doing so
    fn status_line(&self, line: String) {
        match self.progress {
            Some(ref bar) => bar.suspend(|| eprintln!("{}", line)),
            None => eprintln!("{}", line),
        }
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        self.status_line(format!("{} {}", "ℹ".cyan(), message));
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        self.status_line(format!("{} {}", "✓".green(), message));
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        self.status_line(format!("{} {}", "⚠".yellow(), message));
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        self.status_line(format!("{} {}", "✗".red(), message));
    }

    /// Print a plain status line to stderr
    pub fn plain(&self, message: &str) {
        self.status_line(message.to_string());
    }

    /// Print a separator rule to stderr
    pub fn rule(&self) {
        self.status_line("-".repeat(RULE_WIDTH).dimmed().to_string());
    }

    /// Print a list item to stderr
    pub fn bullet(&self, item: &str) {
        self.status_line(format!("  - {}", item));
    }

    /// Announce the generated entry page
    pub fn index_ready(&self, path: &Path) {
        self.status_line(format!(
            "\n{} Your index.html is ready at: {}",
            "✨".bold(),
            path.display()
        ));
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}
