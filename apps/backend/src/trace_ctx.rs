//! Request context carried in task-local storage for the lifetime of one HTTP
//! request. Installed by [`request_trace`](crate::middleware::request_trace);
//! read when problem details and extractor logs need the trace id.

use std::future::Future;

use tokio::task_local;
use uuid::Uuid;

const UNKNOWN_TRACE: &str = "unknown";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestContext {
    pub trace_id: String,
    /// Normalized session code when the request names one (`?code=`).
    pub session_code: Option<String>,
}

impl RequestContext {
    /// Fresh context with a new v4 trace id.
    pub fn new(session_code: Option<String>) -> Self {
        Self {
            trace_id: Uuid::new_v4().to_string(),
            session_code,
        }
    }
}

task_local! {
    static CURRENT: RequestContext;
}

/// Trace id of the request being served, or `"unknown"` outside one.
pub fn trace_id() -> String {
    CURRENT
        .try_with(|ctx| ctx.trace_id.clone())
        .unwrap_or_else(|_| UNKNOWN_TRACE.to_string())
}

/// Drive `fut` with `ctx` installed as the current request context.
pub async fn scope<F: Future>(ctx: RequestContext, fut: F) -> F::Output {
    CURRENT.scope(ctx, fut).await
}
