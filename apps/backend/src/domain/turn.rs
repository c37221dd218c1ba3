//! Turn engine.
//!
//! Pure functions over [`GameSession`]. The caller holds the session lock and
//! supplies the random source and the current instant.

use std::time::{Duration, Instant};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::events::{draw_event, roll_die, EventCard};
use crate::domain::session::{GameSession, Player, PlayerId, TurnOutcome};
use crate::errors::domain::{ConflictKind, DomainError};

/// Turn variants a player may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TurnAction {
    #[default]
    RollDice,
    PlayMinigame,
}

/// Reject turns on sessions that are not running, and turns taken out of order.
pub fn ensure_can_act(session: &GameSession, actor: Option<PlayerId>) -> Result<(), DomainError> {
    if !session.started {
        return Err(DomainError::conflict(
            ConflictKind::GameNotStarted,
            "The game has not started yet",
        ));
    }
    if session.game_over {
        return Err(DomainError::conflict(
            ConflictKind::GameAlreadyOver,
            "The game is already over",
        ));
    }

    let current = session.players.get(session.current_idx).ok_or_else(|| {
        DomainError::conflict(
            ConflictKind::Other("no active player".into()),
            "No active player in rotation",
        )
    })?;

    if let Some(actor) = actor {
        if current.id != actor {
            return Err(DomainError::conflict(
                ConflictKind::NotYourTurn,
                format!("It is {}'s turn", current.name),
            ));
        }
    }

    Ok(())
}

/// Validate, then draw from `rng` and apply the requested action.
pub fn take_turn<R: Rng + ?Sized>(
    session: &mut GameSession,
    action: TurnAction,
    actor: Option<PlayerId>,
    rng: &mut R,
    now: Instant,
    time_limit: Duration,
) -> Result<(), DomainError> {
    ensure_can_act(session, actor)?;

    match action {
        TurnAction::RollDice => {
            let event = draw_event(rng);
            let roll = roll_die(rng);
            apply_event(session, actor, &event, roll, now, time_limit)
        }
        TurnAction::PlayMinigame => {
            let beneficiary = rng.random_range(0..session.players.len());
            apply_minigame(session, actor, beneficiary, now, time_limit)
        }
    }
}

/// Apply an already drawn event to the active player.
pub fn apply_event(
    session: &mut GameSession,
    actor: Option<PlayerId>,
    event: &EventCard,
    dice_roll: u8,
    now: Instant,
    time_limit: Duration,
) -> Result<(), DomainError> {
    ensure_can_act(session, actor)?;

    let idx = session.current_idx;
    let player = &mut session.players[idx];
    player.lives += event.lives_change;
    player.points += event.points_change;

    let mut outcome = TurnOutcome::from_card(event, dice_roll, player);

    if player.lives <= 0 {
        let out = session.players.remove(idx);
        session.eliminated.push(out);
        outcome.eliminated = true;
        // The player who shifted into `idx` takes the turn; wrap when the tail was removed.
        if idx >= session.players.len() {
            session.current_idx = 0;
        }
    } else {
        session.current_idx = (idx + 1) % session.players.len();
    }

    session.last_event = Some(outcome);
    session.turn_number += 1;
    check_game_over(session, now, time_limit);
    session.mark_mutated(now);
    Ok(())
}

/// Grant one life to the active player at `beneficiary_idx` and advance rotation.
pub fn apply_minigame(
    session: &mut GameSession,
    actor: Option<PlayerId>,
    beneficiary_idx: usize,
    now: Instant,
    time_limit: Duration,
) -> Result<(), DomainError> {
    ensure_can_act(session, actor)?;

    let len = session.players.len();
    let beneficiary = &mut session.players[beneficiary_idx % len];
    beneficiary.lives += 1;
    let outcome = TurnOutcome::minigame(beneficiary);

    session.current_idx = (session.current_idx + 1) % len;
    session.last_event = Some(outcome);
    session.turn_number += 1;
    check_game_over(session, now, time_limit);
    session.mark_mutated(now);
    Ok(())
}

/// Attrition first, then the wall-clock limit. The winner is assigned once.
fn check_game_over(session: &mut GameSession, now: Instant, time_limit: Duration) {
    if end_by_attrition(session, now) || session.game_over {
        return;
    }
    if now.saturating_duration_since(session.created_at) >= time_limit {
        let winner = leader_by_points(session).cloned();
        finish(session, winner, now);
    }
}

/// End a running game once at most one active player is left.
///
/// The survivor wins; with nobody left the last eliminated player does.
/// Returns whether this call finished the game.
pub(crate) fn end_by_attrition(session: &mut GameSession, now: Instant) -> bool {
    if !session.started || session.game_over || session.players.len() > 1 {
        return false;
    }
    let winner = session
        .players
        .first()
        .or_else(|| session.eliminated.last())
        .cloned();
    finish(session, winner, now);
    true
}

fn finish(session: &mut GameSession, winner: Option<Player>, now: Instant) {
    session.game_over = true;
    session.winner = winner;
    session.finished_at = Some(now);
}

/// Strictly highest points; ties go to the earliest player in rotation order.
fn leader_by_points(session: &GameSession) -> Option<&Player> {
    let mut best: Option<&Player> = None;
    for p in &session.players {
        match best {
            Some(b) if p.points <= b.points => {}
            _ => best = Some(p),
        }
    }
    best
}
