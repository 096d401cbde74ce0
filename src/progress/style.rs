//! Progress bar styling and configuration options.
//!
//! # Examples
//!
//! ```rust
//! use ants::progress::ProgressBarOpts;
//!
//! // Default byte-oriented bar.
//! let opts = ProgressBarOpts::default();
//!
//! // Custom look.
//! let custom = ProgressBarOpts::new(
//!     Some("[{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}".to_string()),
//!     Some(ProgressBarOpts::CHARS_FINE.to_string()),
//!     true,
//!     false,
//! );
//!
//! // No output at all.
//! let hidden = ProgressBarOpts::hidden();
//! assert!(!hidden.is_enabled());
//! ```

use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

/// Define the options for the download progress bar.
#[derive(Debug, Clone)]
pub struct ProgressBarOpts {
    /// Progress bar template string.
    template: Option<String>,
    /// Progression characters set.
    ///
    /// There must be at least 3 characters for the following states:
    /// "filled", "current", and "to do".
    progress_chars: Option<String>,
    /// Enable or disable the progress bar.
    pub(crate) enabled: bool,
    /// Clear the progress bar once completed.
    pub(crate) clear: bool,
}

impl Default for ProgressBarOpts {
    fn default() -> Self {
        Self::with_pip_style()
    }
}

impl ProgressBarOpts {
    /// Template which looks like the Python package installer pip.
    ///
    /// `━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━ 211.23 KiB/211.23 KiB 1008.31 KiB/s eta 0s`
    pub const TEMPLATE_PIP: &'static str =
        "{bar:40.green/black} {bytes:>11.green}/{total_bytes:<11.green} {bytes_per_sec:>13.red} eta {eta:.blue}";
    /// Template showing the percentage next to the transferred bytes.
    ///
    /// `███████████████████▌          48% 4.77 MiB/9.54 MiB eta 00:00:02`
    pub const TEMPLATE_PERCENT: &'static str =
        "{bar:30.blue} {percent:>3}% {bytes}/{total_bytes} eta {eta_precise:.blue}";
    /// Use fine blocks as progress characters: `"█▉▊▋▌▍▎▏  "`.
    pub const CHARS_FINE: &'static str = "█▉▊▋▌▍▎▏  ";
    /// Use a line as progress characters: `"━╾─"`.
    pub const CHARS_LINE: &'static str = "━╾╴─";

    /// Create a new [`ProgressBarOpts`].
    pub fn new(
        template: Option<String>,
        progress_chars: Option<String>,
        enabled: bool,
        clear: bool,
    ) -> Self {
        Self {
            template,
            progress_chars,
            enabled,
            clear,
        }
    }

    /// Create a [`ProgressStyle`] based on the provided options.
    ///
    /// An invalid template falls back to the default bar.
    pub fn to_progress_style(self) -> ProgressStyle {
        let mut style = ProgressStyle::default_bar();
        if let Some(template) = self.template {
            match ProgressStyle::with_template(&template) {
                Ok(s) => style = s,
                Err(e) => warn!("Ignoring invalid progress template {:?}: {}", template, e),
            }
        }
        if let Some(progress_chars) = self.progress_chars {
            style = style.progress_chars(&progress_chars);
        }
        style
    }

    /// Create a [`ProgressBar`] of `len` bytes based on the provided options.
    pub fn to_progress_bar(self, len: u64) -> ProgressBar {
        // Return a hidden Progress bar if we disabled it.
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let style = self.to_progress_style();
        ProgressBar::new(len).with_style(style)
    }

    /// Create a new [`ProgressBarOpts`] which looks like Python pip.
    pub fn with_pip_style() -> Self {
        Self {
            template: Some(ProgressBarOpts::TEMPLATE_PIP.into()),
            progress_chars: Some(ProgressBarOpts::CHARS_LINE.into()),
            enabled: true,
            clear: false,
        }
    }

    /// Create a new [`ProgressBarOpts`] showing a percentage.
    pub fn with_percent_style() -> Self {
        Self {
            template: Some(ProgressBarOpts::TEMPLATE_PERCENT.into()),
            progress_chars: Some(ProgressBarOpts::CHARS_FINE.into()),
            enabled: true,
            clear: false,
        }
    }

    /// Set to `true` to clear the progress bar upon completion.
    pub fn set_clear(&mut self, clear: bool) {
        self.clear = clear;
    }

    /// Return `false` if the bar is hidden.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Create a new [`ProgressBarOpts`] which hides the progress bar.
    pub fn hidden() -> Self {
        Self {
            enabled: false,
            ..ProgressBarOpts::default()
        }
    }
}
