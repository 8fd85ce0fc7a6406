//! Spinner shown while a plan is applied.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use c64dreams_lib::ApplyProgress;

/// A single spinner driven by [`ApplyProgress`] updates.
pub(crate) struct ApplySpinner {
    pb: ProgressBar,
}

impl ApplySpinner {
    /// When `hidden` is true (quiet or JSON mode) nothing is drawn.
    pub(crate) fn new(hidden: bool) -> Self {
        let pb = ProgressBar::new_spinner();
        if hidden {
            pb.set_draw_target(ProgressDrawTarget::hidden());
        }
        if let Ok(style) = ProgressStyle::with_template("  {spinner:.cyan} {msg}") {
            pb.set_style(style.tick_chars("/-\\|"));
        }
        Self { pb }
    }

    pub(crate) fn update(&self, progress: ApplyProgress) {
        match progress {
            ApplyProgress::Started { total } => {
                self.pb.enable_steady_tick(Duration::from_millis(100));
                self.pb.set_message(format!("Applying {} entries...", total));
            }
            ApplyProgress::Entry {
                current,
                total,
                path,
            } => {
                self.pb.set_message(format!("[{}/{}] {}", current, total, path));
            }
            ApplyProgress::Resolved { finder, source } => {
                self.pb.set_message(format!("Found {} ({})", source, finder));
            }
            ApplyProgress::Completed { .. } => self.finish(),
        }
    }

    /// Stop ticking and clear the line.
    pub(crate) fn finish(&self) {
        self.pb.disable_steady_tick();
        self.pb.finish_and_clear();
    }
}
