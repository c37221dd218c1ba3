//! Session data model and the lifecycle rules that operate on it.
//!
//! Everything here is synchronous and lock-free: callers hold the per-session
//! mutex while invoking these methods. Every successful mutation bumps
//! `version` and `last_activity` through [`GameSession::mark_mutated`].

use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::domain::events::{EventCard, EventKind};
use crate::domain::rules::{MAX_PLAYERS, MIN_PLAYERS, STARTING_LIVES};
use crate::domain::turn::end_by_attrition;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};

pub type PlayerId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub lives: i32,
    pub points: i32,
}

impl Player {
    /// New participant with a fresh id and starting counters.
    ///
    /// `name` must already be validated.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            lives: STARTING_LIVES,
            points: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRef {
    pub id: PlayerId,
    pub name: String,
}

impl From<&Player> for HostRef {
    fn from(p: &Player) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
        }
    }
}

/// Most recent outcome applied to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub title: String,
    pub description: String,
    pub kind: EventKind,
    pub lives_change: i32,
    pub points_change: i32,
    /// Present for dice turns; minigames carry no roll.
    pub dice_roll: Option<u8>,
    pub player_id: PlayerId,
    pub player_name: String,
    pub eliminated: bool,
}

impl TurnOutcome {
    pub fn from_card(card: &EventCard, dice_roll: u8, player: &Player) -> Self {
        Self {
            title: card.title.to_string(),
            description: card.description.to_string(),
            kind: card.kind,
            lives_change: card.lives_change,
            points_change: card.points_change,
            dice_roll: Some(dice_roll),
            player_id: player.id,
            player_name: player.name.clone(),
            eliminated: false,
        }
    }

    pub fn minigame(beneficiary: &Player) -> Self {
        Self {
            title: "Minigame".to_string(),
            description: format!("{} wins the minigame and gains a life.", beneficiary.name),
            kind: EventKind::Positive,
            lives_change: 1,
            points_change: 0,
            dice_roll: None,
            player_id: beneficiary.id,
            player_name: beneficiary.name.clone(),
            eliminated: false,
        }
    }
}

/// Coarse lifecycle position of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Lobby,
    Active,
    Finished,
}

/// What happened when a participant left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveOutcome {
    pub player: Player,
    /// True when the roster is now empty and the session should be dropped.
    pub session_empty: bool,
    /// New host, when the leaver held that role.
    pub new_host: Option<HostRef>,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    pub code: String,
    pub host: HostRef,
    pub players: Vec<Player>,
    pub current_idx: usize,
    pub turn_number: u32,
    pub started: bool,
    pub game_over: bool,
    pub winner: Option<Player>,
    pub eliminated: Vec<Player>,
    pub last_event: Option<TurnOutcome>,
    pub created_at: Instant,
    pub last_activity: Instant,
    pub finished_at: Option<Instant>,
    pub version: u64,
    /// Set once the session has been removed from the store. Holders of a stale
    /// handle must treat the session as gone.
    pub closed: bool,
}

impl GameSession {
    /// Fresh lobby with `host` as its only player.
    pub fn new(code: impl Into<String>, host: Player, now: Instant) -> Self {
        Self {
            code: code.into(),
            host: HostRef::from(&host),
            players: vec![host],
            current_idx: 0,
            turn_number: 0,
            started: false,
            game_over: false,
            winner: None,
            eliminated: Vec::new(),
            last_event: None,
            created_at: now,
            last_activity: now,
            finished_at: None,
            version: 1,
            closed: false,
        }
    }

    pub fn phase(&self) -> GamePhase {
        if self.game_over {
            GamePhase::Finished
        } else if self.started {
            GamePhase::Active
        } else {
            GamePhase::Lobby
        }
    }

    /// Player whose turn it is. `None` outside of an active game.
    pub fn current_player(&self) -> Option<&Player> {
        if self.phase() != GamePhase::Active {
            return None;
        }
        self.players.get(self.current_idx)
    }

    pub fn find_player(&self, id: PlayerId) -> Option<&Player> {
        self.players
            .iter()
            .chain(self.eliminated.iter())
            .find(|p| p.id == id)
    }

    pub fn mark_mutated(&mut self, now: Instant) {
        self.version += 1;
        self.last_activity = now;
    }

    /// Append a player to the lobby.
    ///
    /// Started sessions are rejected before capacity is considered.
    pub fn add_player(&mut self, player: Player, now: Instant) -> Result<(), DomainError> {
        if self.started {
            return Err(DomainError::conflict(
                ConflictKind::AlreadyStarted,
                format!("Session {} has already started", self.code),
            ));
        }
        if self.players.len() >= MAX_PLAYERS {
            return Err(DomainError::conflict(
                ConflictKind::SessionFull,
                format!("Session {} is full ({MAX_PLAYERS} players)", self.code),
            ));
        }

        self.players.push(player);
        self.mark_mutated(now);
        Ok(())
    }

    /// Start the game. Returns `false` when it was already running.
    pub fn start(
        &mut self,
        requested_by: Option<PlayerId>,
        now: Instant,
    ) -> Result<bool, DomainError> {
        if self.started {
            return Ok(false);
        }
        if let Some(requester) = requested_by {
            if requester != self.host.id {
                return Err(DomainError::conflict(
                    ConflictKind::NotHost,
                    format!("Only the host ({}) can start the game", self.host.name),
                ));
            }
        }
        if self.players.len() < MIN_PLAYERS {
            return Err(DomainError::conflict(
                ConflictKind::NotEnoughPlayers,
                format!(
                    "At least {MIN_PLAYERS} players are required to start (have {})",
                    self.players.len()
                ),
            ));
        }

        self.started = true;
        self.turn_number = 1;
        self.current_idx = 0;
        self.mark_mutated(now);
        Ok(true)
    }

    /// Remove a participant after their connection dropped.
    ///
    /// In the lobby the player is removed from the roster. Once the game has
    /// started an active leaver moves to `eliminated` and the rotation closes
    /// over their seat; a running game left with one player ends. The host
    /// role only ever passes to a player still in rotation.
    pub fn leave(&mut self, player_id: PlayerId, now: Instant) -> Result<LeaveOutcome, DomainError> {
        let was_host = self.host.id == player_id;

        if !self.started {
            let idx = self
                .players
                .iter()
                .position(|p| p.id == player_id)
                .ok_or_else(|| player_not_found(player_id))?;
            let player = self.players.remove(idx);

            let new_host = match self.players.first() {
                Some(first) if was_host => {
                    self.host = HostRef::from(first);
                    Some(self.host.clone())
                }
                _ => None,
            };

            self.mark_mutated(now);
            return Ok(LeaveOutcome {
                player,
                session_empty: self.players.is_empty(),
                new_host,
            });
        }

        let mut changed = false;
        let player = match self.players.iter().position(|p| p.id == player_id) {
            Some(idx) => {
                let player = self.players.remove(idx);
                self.eliminated.push(player.clone());
                if !self.game_over {
                    self.close_seat(idx);
                    end_by_attrition(self, now);
                }
                changed = true;
                player
            }
            None => self
                .eliminated
                .iter()
                .find(|p| p.id == player_id)
                .cloned()
                .ok_or_else(|| player_not_found(player_id))?,
        };

        let mut new_host = None;
        if was_host {
            if let Some(next) = self.players.first() {
                self.host = HostRef::from(next);
                new_host = Some(self.host.clone());
                changed = true;
            }
        }

        if changed {
            self.mark_mutated(now);
        }
        Ok(LeaveOutcome {
            player,
            session_empty: false,
            new_host,
        })
    }

    /// Keep `current_idx` on the right player after the seat at `removed`
    /// was vacated. Removing the current seat hands the turn to whoever
    /// shifted into it, wrapping past the tail.
    fn close_seat(&mut self, removed: usize) {
        if removed < self.current_idx {
            self.current_idx -= 1;
        } else if self.current_idx >= self.players.len() {
            self.current_idx = 0;
        }
    }

    /// Whether the sweeper may drop this session.
    ///
    /// Finished sessions are kept for `finished_retention` so late pollers can
    /// see the result; everything else expires after `idle_ttl` without a
    /// mutation.
    pub fn is_reclaimable(
        &self,
        now: Instant,
        idle_ttl: Duration,
        finished_retention: Duration,
    ) -> bool {
        if let Some(finished_at) = self.finished_at {
            if now.saturating_duration_since(finished_at) >= finished_retention {
                return true;
            }
        }
        now.saturating_duration_since(self.last_activity) >= idle_ttl
    }
}

fn player_not_found(player_id: PlayerId) -> DomainError {
    DomainError::not_found(
        NotFoundKind::Player,
        format!("Player {player_id} is not part of this session"),
    )
}
