use std::sync::Arc;

use actix::prelude::*;
use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

use crate::domain::game_transition::GameTransition;
use crate::domain::snapshot::GameSnapshot;
use crate::services::game_flow::GameFlowMutationResult;

/// Which broadcast a mutation produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BroadcastKind {
    GameUpdated,
    GameStarted,
    GameOver,
}

impl BroadcastKind {
    /// Game end wins over start, start over everything else. `None` when
    /// nothing changed.
    pub fn for_transitions(transitions: &[GameTransition]) -> Option<Self> {
        if transitions.is_empty() {
            None
        } else if transitions.contains(&GameTransition::GameEnded) {
            Some(Self::GameOver)
        } else if transitions.contains(&GameTransition::GameStarted) {
            Some(Self::GameStarted)
        } else {
            Some(Self::GameUpdated)
        }
    }
}

#[derive(Message, Clone, Debug)]
#[rtype(result = "()")]
pub struct HubEvent {
    pub kind: BroadcastKind,
    pub snapshot: Arc<GameSnapshot>,
}

impl HubEvent {
    pub fn from_mutation(result: &GameFlowMutationResult) -> Option<Self> {
        let kind = BroadcastKind::for_transitions(&result.transitions)?;
        Some(Self {
            kind,
            snapshot: Arc::new(result.snapshot.clone()),
        })
    }
}

/// Broadcast groups: session code -> connection id -> mailbox.
#[derive(Default)]
pub struct GameSessionRegistry {
    groups: DashMap<String, DashMap<Uuid, Recipient<HubEvent>>>,
}

impl GameSessionRegistry {
    pub fn new() -> Self {
        Self {
            groups: DashMap::new(),
        }
    }

    pub fn register(&self, code: &str, conn_id: Uuid, recipient: Recipient<HubEvent>) {
        self.groups
            .entry(code.to_string())
            .or_default()
            .insert(conn_id, recipient);
    }

    pub fn unregister(&self, code: &str, conn_id: Uuid) {
        let now_empty = match self.groups.get(code) {
            Some(group) => {
                group.remove(&conn_id);
                group.is_empty()
            }
            None => return,
        };
        // Outer guard dropped above; re-check under the write lock.
        if now_empty {
            self.groups.remove_if(code, |_, group| group.is_empty());
        }
    }

    pub fn drop_group(&self, code: &str) {
        self.groups.remove(code);
    }

    pub fn subscriber_count(&self, code: &str) -> usize {
        self.groups.get(code).map(|g| g.len()).unwrap_or(0)
    }

    /// Deliver `event` to every live connection in the group. Returns how
    /// many were addressed.
    pub fn broadcast(&self, code: &str, event: HubEvent) -> usize {
        let Some(group) = self.groups.get(code) else {
            return 0;
        };
        let mut delivered = 0;
        for recipient in group.iter().filter(|r| r.value().connected()) {
            recipient.value().do_send(event.clone());
            delivered += 1;
        }
        delivered
    }

    /// Fan a completed mutation out to its session's group.
    pub fn publish_mutation(&self, result: &GameFlowMutationResult) -> usize {
        let Some(event) = HubEvent::from_mutation(result) else {
            return 0;
        };
        let code = result.session_code();
        let delivered = self.broadcast(code, event.clone());
        debug!(
            session_code = %code,
            kind = ?event.kind,
            version = result.final_version(),
            delivered,
            "Published session update"
        );
        delivered
    }
}
