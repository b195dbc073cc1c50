//! URL Helpers
//!
//! Base/path joining and percent-encoding for request URLs.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left alone by `encodeURIComponent`
const COMPONENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// True when the path already carries a scheme and must not be prefixed
pub fn is_absolute(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Join base and path with exactly one `/` between them.
///
/// Absolute paths are returned unchanged. An empty base yields the path
/// rooted at `/` so it resolves against the page origin.
pub fn join_url(base: &str, path: &str) -> String {
    if is_absolute(path) {
        return path.to_string();
    }
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}

/// Percent-encode a single query value or path segment
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT_ENCODE_SET).to_string()
}

/// Append `key=value` to a URL, choosing `?` or `&` as needed
pub fn with_query(url: &str, key: &str, value: &str) -> String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{}{}{}={}", url, sep, key, encode_component(value))
}

/// Append an encoded path segment
pub fn with_segment(url: &str, segment: &str) -> String {
    format!("{}/{}", url.trim_end_matches('/'), encode_component(segment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_collapses_slashes() {
        assert_eq!(join_url("http://localhost:8000///", "//api/me/"), "http://localhost:8000/api/me/");
        assert_eq!(join_url("http://localhost:8000", "api/me/"), "http://localhost:8000/api/me/");
        assert_eq!(join_url("http://localhost:8000/", "/api/me/"), "http://localhost:8000/api/me/");
    }

    #[test]
    fn test_join_keeps_single_protocol() {
        let url = join_url("https://example.org/", "/api/list-codebooks");
        assert_eq!(url.matches("https://").count(), 1);
        assert_eq!(url, "https://example.org/api/list-codebooks");
    }

    #[test]
    fn test_join_passes_absolute_through() {
        assert_eq!(join_url("http://localhost:8000", "https://other.host/x"), "https://other.host/x");
        assert_eq!(join_url("http://localhost:8000", "HTTP://other.host/x"), "HTTP://other.host/x");
    }

    #[test]
    fn test_join_empty_base_is_origin_relative() {
        assert_eq!(join_url("", "api/me/"), "/api/me/");
        assert_eq!(join_url("/", "/api/me/"), "/api/me/");
    }

    #[test]
    fn test_query_separator() {
        assert_eq!(with_query("/api/codebook", "codebook_id", "a b"), "/api/codebook?codebook_id=a%20b");
        assert_eq!(with_query("/api/x?y=1", "codebook_id", "c/d"), "/api/x?y=1&codebook_id=c%2Fd");
    }

    #[test]
    fn test_segment_encoding() {
        assert_eq!(with_segment("/api/coding/", "report 1"), "/api/coding/report%201");
        assert_eq!(encode_component("it's(ok)"), "it's(ok)");
    }
}
