//! Error codes for the Lifeline backend API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP problem details and WebSocket `error` messages.

use core::fmt;

use serde::{Serialize, Serializer};

/// Centralized error codes for the Lifeline backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// Player name empty, whitespace-only, or too long
    InvalidName,
    /// A required request parameter is missing
    MissingParameter,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// Unknown session code
    SessionNotFound,
    /// Player id not part of the session
    PlayerNotFound,
    /// General not found error
    NotFound,

    // Session State Conflicts
    /// Join attempted after the game started
    AlreadyStarted,
    /// Join attempted on a session at capacity
    SessionFull,
    /// Start attempted with fewer than the minimum players
    NotEnoughPlayers,
    /// Turn attempted before the game started
    GameNotStarted,
    /// Turn attempted after the game ended
    GameAlreadyOver,
    /// Turn attempted by a player who is not current
    NotYourTurn,
    /// Start attempted by someone other than the host
    NotHost,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// No free session code could be generated
    CodeSpaceExhausted,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            // Request Validation
            Self::InvalidName => "INVALID_NAME",
            Self::MissingParameter => "MISSING_PARAMETER",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            // Resource Not Found
            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            // Session State Conflicts
            Self::AlreadyStarted => "ALREADY_STARTED",
            Self::SessionFull => "SESSION_FULL",
            Self::NotEnoughPlayers => "NOT_ENOUGH_PLAYERS",
            Self::GameNotStarted => "GAME_NOT_STARTED",
            Self::GameAlreadyOver => "GAME_ALREADY_OVER",
            Self::NotYourTurn => "NOT_YOUR_TURN",
            Self::NotHost => "NOT_HOST",
            Self::Conflict => "CONFLICT",

            // System Errors
            Self::CodeSpaceExhausted => "CODE_SPACE_EXHAUSTED",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
