//! Segment planning.
//!
//! A resource of `content_length` bytes is split into one contiguous byte
//! window per worker. Windows are half-open (`start..end`), ordered, never
//! overlap, and together cover `0..content_length` exactly once.
//!
//! ```rust
//! use ants::download::{plan_segments, Segment};
//!
//! let segments = plan_segments(7, 4);
//! assert_eq!(
//!     segments,
//!     vec![Segment::new(0, 1), Segment::new(1, 2), Segment::new(2, 3), Segment::new(3, 7)]
//! );
//! ```

use std::fmt;

/// A contiguous byte window `start..end` of the remote resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    /// First byte of the window.
    pub start: u64,
    /// One past the last byte of the window.
    pub end: u64,
}

impl Segment {
    /// Creates a new [`Segment`].
    pub fn new(start: u64, end: u64) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// Number of bytes in the window.
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    /// `true` when the window holds no byte. Empty segments are scheduled
    /// but never hit the network.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Value of the HTTP `Range` header for this window.
    ///
    /// HTTP ranges are inclusive, so the last byte is `end - 1`.
    pub fn range_header(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        Some(format!("bytes={}-{}", self.start, self.end - 1))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Split `content_length` bytes into `worker_count` segments.
///
/// Each segment is `content_length / worker_count` bytes long and the last
/// one absorbs the remainder. When the resource is smaller than the worker
/// count the leading segments are empty. A zero-length resource yields a
/// single empty segment. A `worker_count` of zero is treated as one.
pub fn plan_segments(content_length: u64, worker_count: usize) -> Vec<Segment> {
    if content_length == 0 {
        return vec![Segment::new(0, 0)];
    }

    let workers = worker_count.max(1) as u64;
    let segment_size = content_length / workers;

    (0..workers)
        .map(|i| {
            let start = i * segment_size;
            let end = if i == workers - 1 {
                content_length
            } else {
                (start + segment_size).min(content_length)
            };
            Segment::new(start, end)
        })
        .collect()
}
