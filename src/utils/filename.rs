//! Destination file name inference.
//!
//! The name comes from the response's `Content-Disposition` header when the
//! server provides one, otherwise from the last segment of the URL path.

use crate::error::Error;

use reqwest::header::{HeaderMap, CONTENT_DISPOSITION};
use reqwest::Url;

/// Infer the file name for `url` from the response `headers`.
///
/// `filename*=` (RFC 5987) wins over `filename=`. Any directory part is
/// dropped so the result is always a bare file name.
///
/// ```rust
/// use ants::utils::infer_filename;
/// use reqwest::header::{HeaderMap, HeaderValue, CONTENT_DISPOSITION};
/// use reqwest::Url;
///
/// let url = Url::parse("https://example.com/dl?id=3")?;
/// let mut headers = HeaderMap::new();
/// headers.insert(CONTENT_DISPOSITION, HeaderValue::from_static("attachment; filename=\"report.pdf\""));
/// assert_eq!(infer_filename(&url, &headers)?, "report.pdf");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn infer_filename(url: &Url, headers: &HeaderMap) -> Result<String, Error> {
    let from_header = headers
        .get(CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_content_disposition)
        .map(|name| sanitize(&name))
        .filter(|name| !name.is_empty());

    if let Some(name) = from_header {
        return Ok(name);
    }

    filename_from_url(url)
}

/// Last non-empty path segment of `url`, percent-decoded.
pub fn filename_from_url(url: &Url) -> Result<String, Error> {
    url.path_segments()
        .ok_or_else(|| {
            Error::InvalidUrl(format!("The url \"{}\" does not contain a valid path", url))
        })?
        .next_back()
        .map(percent_decode)
        .map(|name| sanitize(&name))
        .filter(|name| !name.is_empty())
        .ok_or_else(|| {
            Error::InvalidUrl(format!("The url \"{}\" does not contain a filename", url))
        })
}

/// Extract the file name from a `Content-Disposition` value.
pub fn parse_content_disposition(value: &str) -> Option<String> {
    let mut plain = None;
    let mut extended = None;

    for param in value.split(';').map(str::trim) {
        let Some((key, val)) = param.split_once('=') else {
            continue;
        };
        match key.trim().to_ascii_lowercase().as_str() {
            "filename*" => {
                // charset'language'percent-encoded
                let encoded = val.trim().trim_matches('"');
                let encoded = encoded.splitn(3, '\'').last().unwrap_or(encoded);
                extended = Some(percent_decode(encoded));
            }
            "filename" => plain = Some(val.trim().trim_matches('"').to_string()),
            _ => {}
        }
    }

    extended.or(plain)
}

fn percent_decode(s: &str) -> String {
    // Form decoding treats these as separators or spaces.
    let escaped = s
        .replace('+', "%2B")
        .replace('&', "%26")
        .replace('=', "%3D");
    form_urlencoded::parse(escaped.as_bytes())
        .map(|(key, val)| [key, val].concat())
        .collect()
}

fn sanitize(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default().trim();
    match base {
        "." | ".." => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn disposition(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_DISPOSITION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_from_url() {
        let url = Url::parse("http://domain.com/path/file.zip").unwrap();
        assert_eq!(infer_filename(&url, &HeaderMap::new()).unwrap(), "file.zip");
    }

    #[test]
    fn test_from_url_percent_encoded() {
        let url = Url::parse("http://domain.com/my%20file+v1.zip").unwrap();
        assert_eq!(filename_from_url(&url).unwrap(), "my file+v1.zip");
    }

    #[test]
    fn test_from_url_without_name() {
        let url = Url::parse("http://domain.com/").unwrap();
        assert!(matches!(filename_from_url(&url), Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_plain_disposition() {
        let url = Url::parse("http://domain.com/download").unwrap();
        let headers = disposition("attachment; filename=\"data.csv\"");
        assert_eq!(infer_filename(&url, &headers).unwrap(), "data.csv");
    }

    #[test]
    fn test_unquoted_disposition() {
        assert_eq!(
            parse_content_disposition("attachment; filename=data.csv").as_deref(),
            Some("data.csv")
        );
    }

    #[test]
    fn test_extended_disposition_wins() {
        let value = "attachment; filename=\"fallback.txt\"; filename*=UTF-8''na%C3%AFve.txt";
        assert_eq!(parse_content_disposition(value).as_deref(), Some("naïve.txt"));
    }

    #[test]
    fn test_disposition_cannot_escape_directory() {
        let url = Url::parse("http://domain.com/download").unwrap();
        let headers = disposition("attachment; filename=\"../../etc/passwd\"");
        assert_eq!(infer_filename(&url, &headers).unwrap(), "passwd");
    }

    #[test]
    fn test_disposition_without_filename_falls_back_to_url() {
        let url = Url::parse("http://domain.com/file.iso").unwrap();
        let headers = disposition("inline");
        assert_eq!(infer_filename(&url, &headers).unwrap(), "file.iso");
    }
}
