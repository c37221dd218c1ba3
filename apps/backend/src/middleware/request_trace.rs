use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::middleware::Next;
use actix_web::{web, Error};
use serde::Deserialize;
use tracing::{info_span, Instrument};

use crate::trace_ctx::{self, RequestContext};
use crate::utils::join_code::normalize_code;

/// Outermost request middleware, mounted with
/// [`from_fn`](actix_web::middleware::from_fn).
///
/// Installs a fresh [`RequestContext`] as the task-local trace scope, runs the
/// rest of the chain in a `request` span, and echoes the trace id as
/// `x-request-id`. Everything logged while serving the request inherits the
/// span's `trace_id` and `session_code`.
pub async fn request_trace(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse, Error> {
    let ctx = RequestContext::new(session_code_of(&req));
    let span = info_span!(
        "request",
        trace_id = %ctx.trace_id,
        method = %req.method(),
        path = %req.path(),
        session_code = ctx.session_code.as_deref(),
    );
    let request_id = HeaderValue::from_str(&ctx.trace_id).ok();

    let mut res = trace_ctx::scope(ctx, next.call(req))
        .instrument(span)
        .await?
        .map_into_boxed_body();

    if let Some(value) = request_id {
        res.headers_mut()
            .insert(HeaderName::from_static("x-request-id"), value);
    }
    Ok(res)
}

#[derive(Deserialize)]
struct CodeParam {
    code: Option<String>,
}

/// Session code named in the query string, normalized. Bodies are not read
/// here; JSON-carried codes show up in handler logs instead.
fn session_code_of(req: &ServiceRequest) -> Option<String> {
    web::Query::<CodeParam>::from_query(req.query_string())
        .ok()
        .and_then(|q| q.into_inner().code)
        .map(|raw| normalize_code(&raw))
        .filter(|code| !code.is_empty())
}
