//! Static catalog of turn outcomes.
//!
//! The catalog is pure data. Draws are uniform over the index and take the
//! random source as a parameter so a seeded generator gives a reproducible
//! sequence.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Display tone of an event card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Positive,
    Negative,
    Neutral,
}

/// One catalog entry: the life/points delta applied to the active player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventCard {
    pub title: &'static str,
    pub description: &'static str,
    pub kind: EventKind,
    pub lives_change: i32,
    pub points_change: i32,
}

const fn card(
    title: &'static str,
    description: &'static str,
    kind: EventKind,
    lives_change: i32,
    points_change: i32,
) -> EventCard {
    EventCard {
        title,
        description,
        kind,
        lives_change,
        points_change,
    }
}

pub const EVENT_CATALOG: &[EventCard] = &[
    card(
        "Lucky Find",
        "You find a coin purse on the floor.",
        EventKind::Positive,
        0,
        3,
    ),
    card(
        "Second Wind",
        "A deep breath brings you back.",
        EventKind::Positive,
        1,
        0,
    ),
    card(
        "Standing Ovation",
        "The whole table applauds your dance moves.",
        EventKind::Positive,
        0,
        5,
    ),
    card(
        "Guardian Angel",
        "Something is looking out for you tonight.",
        EventKind::Positive,
        2,
        1,
    ),
    card(
        "Stubbed Toe",
        "The coffee table strikes again.",
        EventKind::Negative,
        -1,
        0,
    ),
    card(
        "Spilled Drink",
        "Right on the host's carpet.",
        EventKind::Negative,
        -1,
        -1,
    ),
    card(
        "Bad Karaoke",
        "Nobody asked for that encore.",
        EventKind::Negative,
        0,
        -2,
    ),
    card(
        "Trap Door",
        "You should have watched your step.",
        EventKind::Negative,
        -2,
        0,
    ),
    card(
        "Quiet Moment",
        "Nothing happens. Enjoy it while it lasts.",
        EventKind::Neutral,
        0,
        0,
    ),
    card(
        "Risky Bet",
        "You trade a life for a pile of points.",
        EventKind::Neutral,
        -1,
        4,
    ),
    card(
        "Trade Winds",
        "You give up some points to patch yourself up.",
        EventKind::Neutral,
        1,
        -2,
    ),
];

/// Draw one event uniformly at random from [`EVENT_CATALOG`].
pub fn draw_event<R: Rng + ?Sized>(rng: &mut R) -> EventCard {
    EVENT_CATALOG[rng.random_range(0..EVENT_CATALOG.len())]
}

/// Six-sided die roll recorded alongside a drawn event.
pub fn roll_die<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.random_range(1..=6)
}
