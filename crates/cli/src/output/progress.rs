//! Upload spinner
//!
//! Uploads are a single request with no byte-level progress callbacks, so
//! a spinner on stderr is all that is shown.

use std::time::Duration;

use super::OutputConfig;

/// Spinner wrapper
///
/// Hidden in quiet, JSON and no-progress mode.
#[derive(Debug)]
pub struct Spinner {
    bar: Option<indicatif::ProgressBar>,
}

impl Spinner {
    /// Start a spinner with the given message
    pub fn start(config: &OutputConfig, message: &str) -> Self {
        let bar = if config.quiet || config.json || config.no_progress {
            None
        } else {
            let bar = indicatif::ProgressBar::new_spinner();
            if let Ok(style) =
                indicatif::ProgressStyle::default_spinner().template("{spinner:.green} {msg}")
            {
                bar.set_style(style);
            }
            bar.set_message(message.to_string());
            bar.enable_steady_tick(Duration::from_millis(100));
            Some(bar)
        };

        Self { bar }
    }

    /// Stop and erase the spinner
    pub fn finish_and_clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}
