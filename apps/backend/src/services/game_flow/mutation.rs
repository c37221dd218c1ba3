use crate::domain::game_transition::{derive_game_transitions, GameLifecycleView, GameTransition};
use crate::domain::session::GameSession;
use crate::domain::snapshot::{snapshot, GameSnapshot};
use crate::errors::domain::DomainError;
use crate::repos::sessions::SessionHandle;

#[derive(Debug, Clone)]
pub struct GameFlowMutationResult {
    pub snapshot: GameSnapshot,
    pub old_version: u64,
    pub transitions: Vec<GameTransition>,
}

impl GameFlowMutationResult {
    pub fn final_version(&self) -> u64 {
        self.snapshot.version
    }

    pub fn session_code(&self) -> &str {
        &self.snapshot.session_code
    }

    pub fn is_noop(&self) -> bool {
        self.transitions.is_empty()
    }
}

/// Run `mutation` inside the session's critical section.
///
/// The lock is held from the before-view through the snapshot, so the
/// returned snapshot is exactly the state the mutation produced. Sessions
/// that were removed from the store while the caller held a stale handle are
/// reported as not found.
pub fn run_mutation<F>(
    handle: &SessionHandle,
    mutation: F,
) -> Result<GameFlowMutationResult, DomainError>
where
    F: FnOnce(&mut GameSession) -> Result<Vec<GameTransition>, DomainError>,
{
    let mut session = handle.lock();
    if session.closed {
        return Err(DomainError::session_not_found(&session.code));
    }

    let before = GameLifecycleView::of(&session);
    let old_version = before.version;

    let mut explicit_transitions = mutation(&mut session)?;

    let after = GameLifecycleView::of(&session);
    let mut transitions = derive_game_transitions(&before, &after);
    transitions.append(&mut explicit_transitions);

    Ok(GameFlowMutationResult {
        snapshot: snapshot(&session),
        old_version,
        transitions,
    })
}
