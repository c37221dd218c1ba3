//! Turn orchestration - bridges the pure turn engine with the shared store,
//! clock, and random source.

mod mutation;
mod player_actions;

use std::sync::Arc;
use std::time::Duration;

use crate::errors::domain::{DomainError, ValidationKind};
use crate::infra::clock::Clock;
use crate::infra::random::GameRng;
use crate::repos::sessions::{SessionHandle, SessionStore};
use crate::utils::join_code::normalize_code;

pub use mutation::{run_mutation, GameFlowMutationResult};

/// Turn service. Cheap to clone; all state lives behind the shared handles.
#[derive(Clone)]
pub struct GameFlowService {
    store: Arc<SessionStore>,
    clock: Arc<dyn Clock>,
    rng: Arc<GameRng>,
    time_limit: Duration,
}

impl GameFlowService {
    pub fn new(
        store: Arc<SessionStore>,
        clock: Arc<dyn Clock>,
        rng: Arc<GameRng>,
        time_limit: Duration,
    ) -> Self {
        Self {
            store,
            clock,
            rng,
            time_limit,
        }
    }

    fn require_session(&self, code: &str) -> Result<SessionHandle, DomainError> {
        require_session(&self.store, code)
    }
}

/// Look up a session by a caller-supplied code.
pub(crate) fn require_session(
    store: &SessionStore,
    raw_code: &str,
) -> Result<SessionHandle, DomainError> {
    let code = normalize_code(raw_code);
    if code.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::MissingParameter,
            "sessionCode is required",
        ));
    }
    store
        .get(&code)
        .ok_or_else(|| DomainError::session_not_found(&code))
}
