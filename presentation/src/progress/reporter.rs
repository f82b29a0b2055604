//! Progress reporting while a message is being answered

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Stage notifications for one request
pub trait ProgressNotifier {
    fn on_start(&self, provider: &str, channel: &str);

    fn on_finish(&self, success: bool);
}

/// Spinner shown while the provider and tools are working
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_start(&self, provider: &str, channel: &str) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(provider.to_string());
        pb.set_message(format!("answering on {}...", channel));
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.spinner.lock() {
            *slot = Some(pb);
        }
    }

    fn on_finish(&self, success: bool) {
        let Some(pb) = self.spinner.lock().ok().and_then(|mut slot| slot.take()) else {
            return;
        };
        if success {
            pb.finish_and_clear();
        } else {
            pb.abandon_with_message(format!("{}", "failed".red()));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_start(&self, provider: &str, channel: &str) {
        eprintln!("{} {} on {}", "->".cyan(), provider.bold(), channel);
    }

    fn on_finish(&self, success: bool) {
        if !success {
            eprintln!("  {} failed", "x".red());
        }
    }
}

/// No output at all (`--quiet` and JSON output)
pub struct SilentProgress;

impl ProgressNotifier for SilentProgress {
    fn on_start(&self, _provider: &str, _channel: &str) {}

    fn on_finish(&self, _success: bool) {}
}
