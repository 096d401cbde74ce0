//! Shared utility functions.
//!
//! - [`content_length`] - `Content-Length` and `Content-Range` header parsing
//! - [`filename`] - destination file name inference

pub mod content_length;
pub mod filename;

pub use content_length::{content_range_start, declared_content_length, parse_content_range_start};
pub use filename::{filename_from_url, infer_filename, parse_content_disposition};
