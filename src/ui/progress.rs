//! Loading spinner with CI fallback

use super::context::UiContext;
use crate::session::LoadProgress;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown on stderr while a page is loading.
///
/// Hidden entirely in non-interactive mode so piped output stays clean.
pub struct FetchProgress {
    bar: Option<ProgressBar>,
}

impl FetchProgress {
    pub fn new(ctx: &UiContext, label: &str) -> Self {
        let bar = ctx.use_fancy_output().then(|| {
            let bar = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner()
                .template("  {spinner:.cyan} {prefix}  {msg:.dim}  {elapsed:.dim}")
            {
                bar.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
            }
            bar.set_prefix(label.to_string());
            bar.enable_steady_tick(Duration::from_millis(120));
            bar
        });
        Self { bar }
    }

    /// Show the current number of requests in flight
    pub fn update(&self, progress: &LoadProgress) {
        if let Some(ref bar) = self.bar {
            bar.set_message(progress.message());
        }
    }

    pub fn is_visible(&self) -> bool {
        self.bar.is_some()
    }

    /// Finish and clear the spinner
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.disable_steady_tick();
            bar.finish_and_clear();
        }
    }
}

impl Drop for FetchProgress {
    fn drop(&mut self) {
        self.finish();
    }
}
