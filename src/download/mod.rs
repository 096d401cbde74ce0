//! Download module containing the per-download building blocks.
//!
//! # Overview
//!
//! - [`request`] - the [`DownloadRequest`] (URL, headers, optional file name)
//! - [`segment`] - splitting a content length into worker byte windows
//! - [`conflict`] - the [`ConflictPolicy`] applied to leftover working files
//! - [`destination`] - the `.part` working file and the final file
//!
//! # Examples
//!
//! ```rust
//! use ants::download::{plan_segments, Destination};
//! use std::path::Path;
//!
//! let destination = Destination::new(Path::new("downloads"), "image.iso");
//! assert!(destination.part_path().ends_with("image.iso.part"));
//!
//! let segments = plan_segments(10_000_000, 4);
//! assert_eq!(segments[3].start, 7_500_000);
//! ```

pub mod conflict;
pub mod destination;
pub mod request;
pub mod segment;

pub use conflict::ConflictPolicy;
pub use destination::Destination;
pub use request::DownloadRequest;
pub use segment::{plan_segments, Segment};
