//! Content length extraction utilities.

use reqwest::header::{HeaderMap, CONTENT_LENGTH, CONTENT_RANGE};

/// Read the `Content-Length` a server declared in `headers`.
///
/// Returns `None` if the header is missing or its value is not an u64.
///
/// ```rust
/// use ants::utils::declared_content_length;
/// use reqwest::header::{HeaderMap, HeaderValue, CONTENT_LENGTH};
///
/// let mut headers = HeaderMap::new();
/// headers.insert(CONTENT_LENGTH, HeaderValue::from_static("2048"));
/// assert_eq!(declared_content_length(&headers), Some(2048));
/// ```
pub fn declared_content_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
}

/// Parse the first byte position out of a `Content-Range` header.
///
/// Content-Range header format: "bytes start-end/total"
pub fn content_range_start(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_RANGE)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_content_range_start)
}

/// Extract `start` from a "bytes start-end/total" value.
pub fn parse_content_range_start(content_range: &str) -> Option<u64> {
    content_range
        .trim()
        .strip_prefix("bytes")?
        .trim_start()
        .split('-')
        .next()
        .and_then(|start| start.trim().parse::<u64>().ok())
}
