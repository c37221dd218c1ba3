//! Infrastructure layer - clock, randomness, and state construction.

pub mod clock;
pub mod random;
pub mod state;
