//! Domain-level error type used across the session core and both delivery
//! adapters.
//!
//! This error type is HTTP- and WebSocket-agnostic. Route handlers convert
//! it with `From<DomainError> for AppError`; the WebSocket session maps it to
//! an `error` message carrying the same `ErrorCode`.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use super::ErrorCode;

/// Input validation failures. Nothing is mutated when these are raised.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    InvalidName,
    MissingParameter,
    Other(String),
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Session,
    Player,
    Other(String),
}

/// Session state conflicts. Surfaced distinctly so clients can re-sync
/// instead of retrying blindly.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    AlreadyStarted,
    SessionFull,
    NotEnoughPlayers,
    GameNotStarted,
    GameAlreadyOver,
    NotYourTurn,
    NotHost,
    Other(String),
}

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    CodeSpaceExhausted,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input/user validation
    Validation(ValidationKind, String),
    /// Session state conflict
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    pub fn session_not_found(code: &str) -> Self {
        Self::not_found(NotFoundKind::Session, format!("Session {code} not found"))
    }

    /// Human-readable detail without the kind prefix.
    pub fn detail(&self) -> &str {
        match self {
            DomainError::Validation(_, d)
            | DomainError::Conflict(_, d)
            | DomainError::NotFound(_, d)
            | DomainError::Infra(_, d) => d,
        }
    }

    /// Stable wire code shared by the HTTP and WebSocket adapters.
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::Validation(kind, _) => match kind {
                ValidationKind::InvalidName => ErrorCode::InvalidName,
                ValidationKind::MissingParameter => ErrorCode::MissingParameter,
                ValidationKind::Other(_) => ErrorCode::ValidationError,
            },
            DomainError::NotFound(kind, _) => match kind {
                NotFoundKind::Session => ErrorCode::SessionNotFound,
                NotFoundKind::Player => ErrorCode::PlayerNotFound,
                NotFoundKind::Other(_) => ErrorCode::NotFound,
            },
            DomainError::Conflict(kind, _) => match kind {
                ConflictKind::AlreadyStarted => ErrorCode::AlreadyStarted,
                ConflictKind::SessionFull => ErrorCode::SessionFull,
                ConflictKind::NotEnoughPlayers => ErrorCode::NotEnoughPlayers,
                ConflictKind::GameNotStarted => ErrorCode::GameNotStarted,
                ConflictKind::GameAlreadyOver => ErrorCode::GameAlreadyOver,
                ConflictKind::NotYourTurn => ErrorCode::NotYourTurn,
                ConflictKind::NotHost => ErrorCode::NotHost,
                ConflictKind::Other(_) => ErrorCode::Conflict,
            },
            DomainError::Infra(kind, _) => match kind {
                InfraErrorKind::CodeSpaceExhausted => ErrorCode::CodeSpaceExhausted,
                InfraErrorKind::Other(_) => ErrorCode::Internal,
            },
        }
    }
}
