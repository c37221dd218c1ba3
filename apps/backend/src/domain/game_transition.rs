//! Lifecycle edges derived by diffing a session before and after a mutation.

use crate::domain::session::{GamePhase, GameSession, PlayerId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameLifecycleView {
    pub version: u64,
    pub turn: Option<PlayerId>,
    pub phase: GamePhase,
    pub host: PlayerId,
}

impl GameLifecycleView {
    pub fn of(session: &GameSession) -> Self {
        Self {
            version: session.version,
            turn: session.current_player().map(|p| p.id),
            phase: session.phase(),
            host: session.host.id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameTransition {
    /// Edge-triggered: the turn became a specific player.
    TurnBecame { player_id: PlayerId },

    /// Edge-triggered: Lobby -> Active
    GameStarted,

    /// Edge-triggered: a winner was decided
    GameEnded,

    /// Edge-triggered: host role moved to another player
    HostChanged { player_id: PlayerId },

    /// Explicit: player joined the lobby
    PlayerJoined { player_id: PlayerId },

    /// Explicit: player's connection went away
    PlayerLeft { player_id: PlayerId },

    /// Explicit: a turn was resolved
    TurnTaken { player_id: PlayerId },
}

/// Derive domain transitions from before/after lifecycle state.
pub fn derive_game_transitions(
    before: &GameLifecycleView,
    after: &GameLifecycleView,
) -> Vec<GameTransition> {
    let mut transitions = Vec::new();

    // 1. Turn change
    if let Some(player_id) = after.turn {
        if before.turn != Some(player_id) {
            transitions.push(GameTransition::TurnBecame { player_id });
        }
    }

    // 2. Game start. A game cannot finish in the same mutation that started it.
    if before.phase == GamePhase::Lobby && after.phase == GamePhase::Active {
        transitions.push(GameTransition::GameStarted);
    }

    // 3. Game end
    if before.phase != GamePhase::Finished && after.phase == GamePhase::Finished {
        transitions.push(GameTransition::GameEnded);
    }

    // 4. Host reassignment
    if before.host != after.host {
        transitions.push(GameTransition::HostChanged {
            player_id: after.host,
        });
    }

    transitions
}
