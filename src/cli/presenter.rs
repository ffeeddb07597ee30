//! CLI presenter for output formatting

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::recording::SignalSummary;

/// Presenter for CLI output formatting.
///
/// Status lines go to stderr; the spinner is a cloneable handle so the
/// recording callbacks can drive it from the capture thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct Presenter;

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self
    }

    /// Start a spinner with message
    pub fn start_spinner(&self, message: &str) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
        {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        spinner
    }

    /// Mark spinner as success and finish
    pub fn spinner_success(&self, spinner: &ProgressBar, message: &str) {
        spinner.finish_with_message(Self::success_line(message));
    }

    /// Mark spinner as failed and finish
    pub fn spinner_fail(&self, spinner: &ProgressBar, message: &str) {
        if !spinner.is_finished() {
            spinner.abandon_with_message(format!("{} {}", "✗".red(), message));
        }
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{}", Self::info_line(message));
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{}", Self::success_line(message));
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print the level summary of a saved recording
    pub fn summary(&self, summary: &SignalSummary) {
        self.info(&format!("Captured {}", summary));
        if summary.is_silent() {
            self.warn("Recorded signal is silent");
        }
    }

    /// Info message with its glyph
    pub fn info_line(message: &str) -> String {
        format!("{} {}", "ℹ".cyan(), message)
    }

    /// Success message with its glyph
    pub fn success_line(message: &str) -> String {
        format!("{} {}", "✓".green(), message)
    }

    /// Format recording progress bar
    pub fn format_progress(elapsed_ms: u64, total_ms: u64) -> String {
        let percent = if total_ms > 0 {
            (elapsed_ms as f64 / total_ms as f64 * 100.0).min(100.0)
        } else {
            0.0
        };

        // Build progress bar
        let bar_width = 20;
        let filled = ((percent / 100.0) * bar_width as f64) as usize;
        let empty = bar_width - filled;

        format!(
            "[{}{}] {:.1}s / {:.1}s",
            "█".repeat(filled).cyan(),
            "░".repeat(empty),
            elapsed_ms as f64 / 1000.0,
            total_ms as f64 / 1000.0
        )
    }

    /// Message shown while recording
    pub fn recording_message(elapsed_ms: u64, total_ms: u64) -> String {
        format!("Recording... {}", Self::format_progress(elapsed_ms, total_ms))
    }
}
