//! ETag helpers for session polling.
//!
//! The tag is derived from the session code and its version counter, so it
//! changes after every observable mutation and polling clients can use
//! `If-None-Match` to skip unchanged snapshots.

/// Generate an ETag for a session resource.
///
/// Format: `"session-{code}-v{version}"` (quoted, as HTTP requires)
///
/// # Example
/// ```
/// # use backend::http::etag::session_etag;
/// assert_eq!(session_etag("ABC123", 5), r#""session-ABC123-v5""#);
/// ```
pub fn session_etag(code: &str, version: u64) -> String {
    format!(r#""session-{code}-v{version}""#)
}

/// Whether an `If-None-Match` header value matches `etag`.
///
/// Accepts the wildcard `*` and comma-separated lists. Weak validators
/// (`W/"..."`) compare by their opaque tag.
pub fn if_none_match_matches(header: &str, etag: &str) -> bool {
    let header = header.trim();
    header == "*"
        || header
            .split(',')
            .map(str::trim)
            .map(|candidate| candidate.strip_prefix("W/").unwrap_or(candidate))
            .any(|candidate| candidate == etag)
}
