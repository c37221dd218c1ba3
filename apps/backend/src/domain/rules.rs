use std::time::Duration;

use unicode_normalization::UnicodeNormalization;

use crate::errors::domain::{DomainError, ValidationKind};

pub const STARTING_LIVES: i32 = 5;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 7;
pub const MAX_NAME_CHARS: usize = 20;

/// Wall-clock limit measured from session creation, evaluated at turn time.
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(20 * 60);

/// Normalize and validate a display name.
///
/// Names are NFKC-normalized and trimmed; the result must be non-empty and at
/// most [`MAX_NAME_CHARS`] characters. Uniqueness within a session is not
/// enforced.
pub fn validate_player_name(raw: &str) -> Result<String, DomainError> {
    let normalized: String = raw.nfkc().collect();
    let name = normalized.trim();

    if name.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::InvalidName,
            "Player name must not be empty",
        ));
    }

    let chars = name.chars().count();
    if chars > MAX_NAME_CHARS {
        return Err(DomainError::validation(
            ValidationKind::InvalidName,
            format!("Player name must be at most {MAX_NAME_CHARS} characters (got {chars})"),
        ));
    }

    Ok(name.to_string())
}
