//! Domain layer: pure session and turn logic.

pub mod events;
pub mod game_transition;
pub mod rules;
pub mod session;
pub mod snapshot;
pub mod turn;

#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_props_turn;
#[cfg(test)]
mod tests_turn;

// Re-exports for ergonomics
pub use events::{EventCard, EventKind, EVENT_CATALOG};
pub use session::{GamePhase, GameSession, Player, PlayerId};
pub use snapshot::GameSnapshot;
pub use turn::TurnAction;
