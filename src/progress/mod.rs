//! Progress module containing progress reporting for a download.
//!
//! - `style` - progress bar styling options and templates
//! - `aggregator` - the task that sums worker byte counts and draws the bar
//!
//! # Examples
//!
//! ```rust
//! use ants::downloader::DownloaderBuilder;
//! use ants::progress::ProgressBarOpts;
//!
//! let downloader = DownloaderBuilder::new()
//!     .progress(ProgressBarOpts::with_percent_style())
//!     .build();
//! ```

pub(crate) mod aggregator;
pub(crate) mod style;

pub use aggregator::{ProgressAggregator, ProgressHandle, ProgressSender};
pub use style::ProgressBarOpts;
