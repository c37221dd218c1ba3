//! Background reclamation of finished and idle sessions.

use std::time::Instant;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::config::game::GameConfig;
use crate::state::app_state::AppState;

/// One pass over the store. Returns the removed codes.
pub fn sweep_once(state: &AppState, now: Instant) -> Vec<String> {
    let GameConfig {
        idle_ttl,
        finished_retention,
        ..
    } = state.config;

    let removed = state
        .sessions
        .purge_expired(now, idle_ttl, finished_retention);

    for code in &removed {
        state.realtime.drop_group(code);
    }

    if removed.is_empty() {
        debug!(live = state.sessions.len(), "Sweep found nothing to reclaim");
    } else {
        info!(
            removed = removed.len(),
            live = state.sessions.len(),
            codes = ?removed,
            "Reclaimed expired sessions"
        );
    }
    removed
}

/// Run [`sweep_once`] every `sweep_interval` on the current tokio runtime.
pub fn spawn_sweeper(state: AppState) -> JoinHandle<()> {
    let period = state.config.sweep_interval;
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // First tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            sweep_once(&state, state.clock.now());
        }
    })
}
