use std::time::Instant;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::middleware::Next;
use actix_web::Error;
use tracing::Level;

/// Emits one `request_completed` event per request. Mount it inside
/// [`request_trace`](super::request_trace::request_trace) so the event lands
/// in the request span and picks up `trace_id` and `session_code` from it.
///
/// WebSocket upgrades log once, when the handshake completes.
pub async fn log_completion(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse, Error> {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.path().to_owned();

    let result = next.call(req).await;

    let status = match &result {
        Ok(res) => res.status(),
        Err(err) => err.as_response_error().status_code(),
    };
    let duration_us = started.elapsed().as_micros() as u64;

    macro_rules! completed {
        ($level:expr) => {
            tracing::event!(
                $level,
                http.method = %method,
                url.path = %path,
                http.status_code = status.as_u16(),
                duration_us,
                "request_completed"
            )
        };
    }

    let level = completion_level(status);
    if level == Level::ERROR {
        completed!(Level::ERROR);
    } else if level == Level::WARN {
        completed!(Level::WARN);
    } else if level == Level::DEBUG {
        completed!(Level::DEBUG);
    } else {
        completed!(Level::INFO);
    }

    result.map(ServiceResponse::map_into_boxed_body)
}

/// Server errors at error, client errors at warn, cache revalidations at debug.
fn completion_level(status: StatusCode) -> Level {
    if status.is_server_error() {
        Level::ERROR
    } else if status.is_client_error() {
        Level::WARN
    } else if status == StatusCode::NOT_MODIFIED {
        Level::DEBUG
    } else {
        Level::INFO
    }
}
