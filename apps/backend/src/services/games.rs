//! Session lifecycle: create, join, start, leave, status.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::game_transition::GameTransition;
use crate::domain::rules::validate_player_name;
use crate::domain::session::{GameSession, Player, PlayerId};
use crate::domain::snapshot::{snapshot, GameSnapshot};
use crate::errors::domain::DomainError;
use crate::infra::clock::Clock;
use crate::infra::random::GameRng;
use crate::repos::sessions::SessionStore;
use crate::services::game_flow::{require_session, run_mutation, GameFlowMutationResult};
use crate::utils::join_code::generate_join_code;

/// Upper bound on code draws before giving up on a crowded code space.
pub const MAX_CODE_ATTEMPTS: usize = 32;

/// Result of creating or joining: the caller's own player id plus the
/// mutation to fan out.
#[derive(Debug, Clone)]
pub struct SeatClaim {
    pub player_id: PlayerId,
    pub mutation: GameFlowMutationResult,
}

#[derive(Debug, Clone)]
pub struct LeaveResult {
    pub mutation: GameFlowMutationResult,
    /// The lobby emptied out and the session was dropped from the store.
    pub session_removed: bool,
}

/// Lifecycle service. Cheap to clone.
#[derive(Clone)]
pub struct GameService {
    store: Arc<SessionStore>,
    clock: Arc<dyn Clock>,
    rng: Arc<GameRng>,
}

impl GameService {
    pub fn new(store: Arc<SessionStore>, clock: Arc<dyn Clock>, rng: Arc<GameRng>) -> Self {
        Self { store, clock, rng }
    }

    /// Open a lobby hosted by `host_name` under a fresh unique code.
    pub fn create_session(&self, host_name: &str) -> Result<SeatClaim, DomainError> {
        let name = validate_player_name(host_name)?;
        let now = self.clock.now();
        let host = Player::new(name);
        let host_id = host.id;

        let handle = self.store.insert_with_unique_code(
            MAX_CODE_ATTEMPTS,
            || self.rng.with(|rng| generate_join_code(rng)),
            move |code| GameSession::new(code, host, now),
        )?;

        let mutation = {
            let session = handle.lock();
            GameFlowMutationResult {
                snapshot: snapshot(&session),
                old_version: 0,
                transitions: vec![GameTransition::PlayerJoined { player_id: host_id }],
            }
        };

        info!(
            session_code = %mutation.session_code(),
            host = %mutation.snapshot.host.name,
            "Session created"
        );

        Ok(SeatClaim {
            player_id: host_id,
            mutation,
        })
    }

    /// Add `player_name` to a lobby that has not started and has room.
    pub fn join_session(&self, code: &str, player_name: &str) -> Result<SeatClaim, DomainError> {
        let name = validate_player_name(player_name)?;
        let handle = require_session(&self.store, code)?;
        let now = self.clock.now();

        let player = Player::new(name);
        let player_id = player.id;
        let mutation = run_mutation(&handle, |session| {
            session.add_player(player, now)?;
            Ok(vec![GameTransition::PlayerJoined { player_id }])
        })?;

        info!(
            session_code = %mutation.session_code(),
            player_id = %player_id,
            players = mutation.snapshot.players.len(),
            "Player joined"
        );

        Ok(SeatClaim {
            player_id,
            mutation,
        })
    }

    /// Start the game. Starting a running game returns the current state
    /// with no transitions.
    pub fn start_game(
        &self,
        code: &str,
        requested_by: Option<PlayerId>,
    ) -> Result<GameFlowMutationResult, DomainError> {
        let handle = require_session(&self.store, code)?;
        let now = self.clock.now();

        let mutation = run_mutation(&handle, |session| {
            session.start(requested_by, now)?;
            Ok(Vec::new())
        })?;

        if mutation.is_noop() {
            debug!(session_code = %mutation.session_code(), "Start ignored, already started");
        } else {
            info!(
                session_code = %mutation.session_code(),
                players = mutation.snapshot.players.len(),
                "Game started"
            );
        }

        Ok(mutation)
    }

    /// Handle a participant going away.
    ///
    /// Empty lobbies are removed from the store. The emptiness check is
    /// repeated under the store's own lock so a concurrent join keeps the
    /// session alive.
    pub fn leave_session(
        &self,
        code: &str,
        player_id: PlayerId,
    ) -> Result<LeaveResult, DomainError> {
        let handle = require_session(&self.store, code)?;
        let now = self.clock.now();

        let mut emptied = false;
        let mutation = run_mutation(&handle, |session| {
            let outcome = session.leave(player_id, now)?;
            emptied = outcome.session_empty;
            Ok(vec![GameTransition::PlayerLeft {
                player_id: outcome.player.id,
            }])
        })?;

        // Session lock released above; the store takes its own locks.
        let session_removed = emptied && self.store.delete_if_empty(mutation.session_code());

        if session_removed {
            info!(session_code = %mutation.session_code(), "Last player left, session removed");
        } else if mutation
            .transitions
            .iter()
            .any(|t| matches!(t, GameTransition::HostChanged { .. }))
        {
            info!(
                session_code = %mutation.session_code(),
                new_host = %mutation.snapshot.host.name,
                "Host reassigned"
            );
        } else {
            debug!(session_code = %mutation.session_code(), player_id = %player_id, "Player left");
        }

        if emptied && !session_removed {
            warn!(
                session_code = %mutation.session_code(),
                "Lobby refilled before removal, keeping session"
            );
        }

        Ok(LeaveResult {
            mutation,
            session_removed,
        })
    }

    /// Current public state for polling clients.
    pub fn status(&self, code: &str) -> Result<GameSnapshot, DomainError> {
        let handle = require_session(&self.store, code)?;
        let session = handle.lock();
        if session.closed {
            return Err(DomainError::session_not_found(&session.code));
        }
        Ok(snapshot(&session))
    }
}
