use std::future::Future;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::web::Bytes;
use actix_web::{FromRequest, HttpRequest};
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use tracing::debug;

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Request body of a polling endpoint, parsed as JSON.
///
/// Failures render as `BAD_REQUEST` problem details instead of actix's
/// plain-text 400. A blank body reads as `{}`: every request type defaults
/// its fields and leaves the missing-field checks to the services.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<T> FromRequest for JsonBody<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, AppError>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let bytes = Bytes::from_request(req, payload);

        Box::pin(async move {
            let bytes = bytes.await.map_err(|e| {
                debug!(error = %e, "Request body could not be read");
                AppError::rejected(ErrorCode::BadRequest, "Request body could not be read")
            })?;
            parse_body(&bytes).map(JsonBody)
        })
    }
}

fn parse_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, AppError> {
    let json = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"{}".as_slice()
    } else {
        bytes
    };

    serde_json::from_slice(json).map_err(|e| {
        debug!(error = %e, body_len = bytes.len(), "Rejected request body");
        AppError::rejected(ErrorCode::BadRequest, describe(&e))
    })
}

/// Client-facing summary that never echoes body content.
fn describe(e: &serde_json::Error) -> String {
    match e.classify() {
        Category::Syntax => format!(
            "Invalid JSON: syntax error at line {}, column {}",
            e.line(),
            e.column()
        ),
        Category::Eof => "Invalid JSON: body ended early".to_string(),
        Category::Data => "Invalid JSON: a field has the wrong type".to_string(),
        Category::Io => "Invalid JSON: body could not be read".to_string(),
    }
}
