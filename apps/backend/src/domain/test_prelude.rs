//! Shared helpers for domain unit and property tests.

use std::time::{Duration, Instant};

use proptest::test_runner::Config;

use crate::domain::rules::DEFAULT_TIME_LIMIT;
use crate::domain::session::{GameSession, Player};

pub fn proptest_config() -> Config {
    Config {
        cases: 128,
        ..Config::default()
    }
}

pub const LIMIT: Duration = DEFAULT_TIME_LIMIT;

/// Lobby holding `names` in join order.
pub fn lobby(names: &[&str], now: Instant) -> GameSession {
    let mut session = GameSession::new("TEST01", Player::new(names[0]), now);
    for name in &names[1..] {
        session
            .add_player(Player::new(*name), now)
            .expect("lobby has room");
    }
    session
}

/// Started session holding `names` in join order.
pub fn started(names: &[&str], now: Instant) -> GameSession {
    let mut session = lobby(names, now);
    session.start(None, now).expect("enough players");
    session
}
