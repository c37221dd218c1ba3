//! HTTP boundary error.
//!
//! Every rejection leaves the server as an RFC 7807 problem document. The
//! status is a function of the [`ErrorCode`], so a code always maps to the
//! same status whichever layer raised it.

use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

use crate::errors::domain::DomainError;
use crate::errors::ErrorCode;
use crate::trace_ctx;

const PROBLEM_TYPE_BASE: &str = "https://lifeline.game/errors/";

#[derive(Error, Debug)]
pub enum AppError {
    /// A request the API refuses.
    #[error("{code}: {detail}")]
    Rejected { code: ErrorCode, detail: String },
    /// Startup configuration could not be read.
    #[error("configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn rejected(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Rejected {
            code,
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config(detail.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Rejected { code, .. } => *code,
            Self::Config(_) => ErrorCode::ConfigError,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            Self::Rejected { detail, .. } | Self::Config(detail) => detail,
        }
    }

    pub fn status(&self) -> StatusCode {
        status_for(self.code())
    }
}

/// Validation and malformed input are 400, lookups 404, lifecycle rule
/// violations 409, and anything the server could not do 500.
pub const fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidName
        | ErrorCode::MissingParameter
        | ErrorCode::ValidationError
        | ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
        ErrorCode::SessionNotFound | ErrorCode::PlayerNotFound | ErrorCode::NotFound => {
            StatusCode::NOT_FOUND
        }
        ErrorCode::AlreadyStarted
        | ErrorCode::SessionFull
        | ErrorCode::NotEnoughPlayers
        | ErrorCode::GameNotStarted
        | ErrorCode::GameAlreadyOver
        | ErrorCode::NotYourTurn
        | ErrorCode::NotHost
        | ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::CodeSpaceExhausted | ErrorCode::Internal | ErrorCode::ConfigError => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::rejected(err.code(), err.detail())
    }
}

/// Wire shape of a problem document.
#[derive(Serialize)]
struct Problem<'a> {
    #[serde(rename = "type")]
    type_: String,
    title: &'static str,
    status: u16,
    detail: &'a str,
    code: ErrorCode,
    trace_id: &'a str,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let code = self.code();
        let trace_id = trace_ctx::trace_id();

        let body = Problem {
            type_: format!("{PROBLEM_TYPE_BASE}{code}"),
            title: status.canonical_reason().unwrap_or("Error"),
            status: status.as_u16(),
            detail: self.detail(),
            code,
            trace_id: &trace_id,
        };

        HttpResponse::build(status)
            .content_type("application/problem+json")
            .insert_header(("x-trace-id", trace_id.as_str()))
            .json(body)
    }
}
