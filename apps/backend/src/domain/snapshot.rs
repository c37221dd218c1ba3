//! Public snapshot API for observing a session without exposing internals.
//!
//! Both delivery adapters serialize exactly this shape. Rotation index and
//! monotonic instants stay server-side.

use serde::{Deserialize, Serialize};

use crate::domain::events::EventKind;
use crate::domain::session::{GameSession, HostRef, Player, PlayerId, TurnOutcome};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPublic {
    pub id: PlayerId,
    pub name: String,
    pub lives: i32,
    pub points: i32,
}

impl From<&Player> for PlayerPublic {
    fn from(p: &Player) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            lives: p.lives,
            points: p.points,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostPublic {
    pub id: PlayerId,
    pub name: String,
}

impl From<&HostRef> for HostPublic {
    fn from(h: &HostRef) -> Self {
        Self {
            id: h.id,
            name: h.name.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastEventPublic {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub lives_change: i32,
    pub points_change: i32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub dice_roll: Option<u8>,
    pub player_id: PlayerId,
    pub player_name: String,
    pub eliminated: bool,
}

impl From<&TurnOutcome> for LastEventPublic {
    fn from(o: &TurnOutcome) -> Self {
        Self {
            title: o.title.clone(),
            description: o.description.clone(),
            kind: o.kind,
            lives_change: o.lives_change,
            points_change: o.points_change,
            dice_roll: o.dice_roll,
            player_id: o.player_id,
            player_name: o.player_name.clone(),
            eliminated: o.eliminated,
        }
    }
}

/// Full public view of a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub session_code: String,
    pub host: HostPublic,
    pub players: Vec<PlayerPublic>,
    /// `None` before start and after game over.
    pub current_player: Option<PlayerPublic>,
    pub last_event: Option<LastEventPublic>,
    pub turn_number: u32,
    pub started: bool,
    pub game_over: bool,
    pub winner: Option<PlayerPublic>,
    pub eliminated: Vec<PlayerPublic>,
    pub version: u64,
}

impl From<&GameSession> for GameSnapshot {
    fn from(s: &GameSession) -> Self {
        snapshot(s)
    }
}

pub fn snapshot(s: &GameSession) -> GameSnapshot {
    GameSnapshot {
        session_code: s.code.clone(),
        host: HostPublic::from(&s.host),
        players: s.players.iter().map(PlayerPublic::from).collect(),
        current_player: s.current_player().map(PlayerPublic::from),
        last_event: s.last_event.as_ref().map(LastEventPublic::from),
        turn_number: s.turn_number,
        started: s.started,
        game_over: s.game_over,
        winner: s.winner.as_ref().map(PlayerPublic::from),
        eliminated: s.eliminated.iter().map(PlayerPublic::from).collect(),
        version: s.version,
    }
}
