//! Bearer `Authorization` header parsing

use axum::http::{HeaderMap, header::AUTHORIZATION};

/// Case-sensitive scheme prefix, including the separating space.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Extract the token from `Authorization: Bearer <token>`.
///
/// The header must start with exactly `Bearer `; the token is the next
/// space-delimited segment and may be empty (`Bearer ` or `Bearer  x`).
/// An empty token is still a presented token and fails token lookup.
/// Returns `None` when the header is absent, not valid ASCII, or uses a
/// different scheme.
pub fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    parse_bearer(value)
}

/// Parse a raw header value. See [`extract_bearer`].
pub fn parse_bearer(value: &str) -> Option<&str> {
    let rest = value.strip_prefix(BEARER_PREFIX)?;
    rest.split(' ').next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_parse_bearer() {
        assert_eq!(parse_bearer("Bearer abc123"), Some("abc123"));
        assert_eq!(parse_bearer("Bearer abc trailing"), Some("abc"));
        assert_eq!(parse_bearer("bearer abc123"), None);
        assert_eq!(parse_bearer("Basic dXNlcjpwYXNz"), None);
        assert_eq!(parse_bearer("Bearer"), None);
        assert_eq!(parse_bearer("Bearer "), Some(""));
        assert_eq!(parse_bearer("Bearer  abc123"), Some(""));
        assert_eq!(parse_bearer("abc123"), None);
    }

    #[test]
    fn test_extract_bearer_from_headers() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_bearer(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer deadbeef"));
        assert_eq!(extract_bearer(&headers), Some("deadbeef"));
    }
}
