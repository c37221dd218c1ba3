//! In-memory session store.
//!
//! Lock order is always map shard first, then the session mutex. Code that
//! holds a session lock must not call back into the store.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;

use crate::domain::session::GameSession;
use crate::errors::domain::{DomainError, InfraErrorKind};

pub type SessionHandle = Arc<Mutex<GameSession>>;

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<String, SessionHandle>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the session stored under its own code.
    pub fn put(&self, session: GameSession) -> SessionHandle {
        let code = session.code.clone();
        let handle = Arc::new(Mutex::new(session));
        if let Some(previous) = self.sessions.insert(code, handle.clone()) {
            previous.lock().closed = true;
        }
        handle
    }

    pub fn get(&self, code: &str) -> Option<SessionHandle> {
        self.sessions.get(code).map(|entry| entry.value().clone())
    }

    pub fn has(&self, code: &str) -> bool {
        self.sessions.contains_key(code)
    }

    /// Remove unconditionally. The removed session is marked closed.
    pub fn delete(&self, code: &str) -> Option<SessionHandle> {
        let (_, handle) = self.sessions.remove(code)?;
        handle.lock().closed = true;
        Some(handle)
    }

    /// Remove the session only if its roster is empty at removal time.
    pub fn delete_if_empty(&self, code: &str) -> bool {
        self.sessions
            .remove_if(code, |_, handle| {
                let mut session = handle.lock();
                if session.players.is_empty() {
                    session.closed = true;
                    true
                } else {
                    false
                }
            })
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn codes(&self) -> Vec<String> {
        self.sessions.iter().map(|e| e.key().clone()).collect()
    }

    /// Generate codes until one is free, then build and insert the session
    /// while the slot is held.
    ///
    /// Fails with `CodeSpaceExhausted` after `max_attempts` collisions.
    pub fn insert_with_unique_code<G, F>(
        &self,
        max_attempts: usize,
        mut generate: G,
        factory: F,
    ) -> Result<SessionHandle, DomainError>
    where
        G: FnMut() -> String,
        F: FnOnce(&str) -> GameSession,
    {
        for _ in 0..max_attempts {
            let code = generate();
            if let Entry::Vacant(slot) = self.sessions.entry(code) {
                let session = factory(slot.key());
                let handle = Arc::new(Mutex::new(session));
                slot.insert(handle.clone());
                return Ok(handle);
            }
        }

        Err(DomainError::infra(
            InfraErrorKind::CodeSpaceExhausted,
            format!("Could not allocate a free session code after {max_attempts} attempts"),
        ))
    }

    /// Drop sessions that finished longer than `finished_retention` ago or
    /// have been idle for `idle_ttl`. Returns the removed codes.
    pub fn purge_expired(
        &self,
        now: Instant,
        idle_ttl: Duration,
        finished_retention: Duration,
    ) -> Vec<String> {
        let mut removed = Vec::new();
        self.sessions.retain(|code, handle| {
            let mut session = handle.lock();
            if session.is_reclaimable(now, idle_ttl, finished_retention) {
                session.closed = true;
                removed.push(code.clone());
                false
            } else {
                true
            }
        });
        removed
    }
}
