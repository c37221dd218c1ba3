//! Assertions on the backend's `application/problem+json` bodies, written
//! against the wire format rather than backend types.

use actix_web::http::header::HeaderMap;
use actix_web::http::StatusCode;
use serde::Deserialize;

/// A decoded problem document.
#[derive(Debug, Deserialize)]
pub struct Problem {
    #[serde(rename = "type")]
    pub type_uri: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

impl Problem {
    /// Decode `body`, failing the test with the raw text if it is not a
    /// problem document.
    pub fn parse(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_else(|e| {
            panic!(
                "not a problem document ({e}): {}",
                String::from_utf8_lossy(body)
            )
        })
    }
}

/// Check one rejected response against the error contract and return the
/// decoded body for further checks.
///
/// The HTTP status and body `status` both equal `status`, `code` matches,
/// `detail` contains `detail_fragment` when given, and the `x-trace-id`
/// header repeats the body's `trace_id`.
pub fn expect_problem(
    actual_status: StatusCode,
    headers: &HeaderMap,
    body: &[u8],
    code: &str,
    status: StatusCode,
    detail_fragment: Option<&str>,
) -> Problem {
    assert_eq!(actual_status, status, "HTTP status");
    let problem = Problem::parse(body);

    assert_eq!(problem.code, code);
    assert_eq!(problem.status, status.as_u16(), "body status");
    if let Some(fragment) = detail_fragment {
        assert!(
            problem.detail.contains(fragment),
            "detail {:?} lacks {fragment:?}",
            problem.detail
        );
    }

    let header = headers.get("x-trace-id").and_then(|v| v.to_str().ok());
    assert_eq!(header, Some(problem.trace_id.as_str()), "x-trace-id header");

    problem
}
