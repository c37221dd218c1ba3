//! Session code generation.
//!
//! Codes are 6 characters drawn from `A-Z0-9`. Uniqueness is enforced by the
//! store at insert time, not here.

use rand::Rng;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub const CODE_LEN: usize = 6;

/// Generate a session code from the supplied random source.
///
/// # Example
/// ```
/// use backend::utils::join_code::{generate_join_code, CODE_LEN};
///
/// let code = generate_join_code(&mut rand::rng());
/// assert_eq!(code.len(), CODE_LEN);
/// ```
pub fn generate_join_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..CODE_LEN)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Canonical form used for every lookup: trimmed and upper-cased.
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

pub fn is_well_formed(code: &str) -> bool {
    code.len() == CODE_LEN && code.bytes().all(|b| ALPHABET.contains(&b))
}
