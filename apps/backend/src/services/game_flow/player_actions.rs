use tracing::{debug, info};

use super::mutation::{run_mutation, GameFlowMutationResult};
use super::GameFlowService;
use crate::domain::game_transition::GameTransition;
use crate::domain::session::PlayerId;
use crate::domain::turn::{self, TurnAction};
use crate::errors::domain::DomainError;

impl GameFlowService {
    /// Resolve one turn for the session's active player.
    ///
    /// `actor` is checked against the active player when present. The drawn
    /// event (or minigame beneficiary) comes from the shared generator.
    pub fn take_turn(
        &self,
        code: &str,
        action: TurnAction,
        actor: Option<PlayerId>,
    ) -> Result<GameFlowMutationResult, DomainError> {
        let handle = self.require_session(code)?;
        let now = self.clock.now();
        let time_limit = self.time_limit;

        debug!(session_code = %code, ?action, ?actor, "Taking turn");

        let result = run_mutation(&handle, |session| {
            let acting = session
                .players
                .get(session.current_idx)
                .map(|p| p.id);
            self.rng
                .with(|rng| turn::take_turn(session, action, actor, rng, now, time_limit))?;

            Ok(acting
                .map(|player_id| vec![GameTransition::TurnTaken { player_id }])
                .unwrap_or_default())
        })?;

        if let Some(event) = &result.snapshot.last_event {
            info!(
                session_code = %result.session_code(),
                turn_number = result.snapshot.turn_number,
                player = %event.player_name,
                event = %event.title,
                lives_change = event.lives_change,
                points_change = event.points_change,
                eliminated = event.eliminated,
                "Turn resolved"
            );
        }
        if result.snapshot.game_over {
            info!(
                session_code = %result.session_code(),
                winner = ?result.snapshot.winner.as_ref().map(|w| w.name.as_str()),
                "Game over"
            );
        }

        Ok(result)
    }
}
