use std::sync::Arc;

use crate::config::game::GameConfig;
use crate::infra::clock::Clock;
use crate::repos::sessions::SessionStore;
use crate::services::game_flow::GameFlowService;
use crate::services::games::GameService;
use crate::ws::hub::GameSessionRegistry;

/// Application state containing shared resources.
///
/// Cloning is cheap; every clone sees the same store and registry.
#[derive(Clone)]
pub struct AppState {
    /// Live sessions
    pub sessions: Arc<SessionStore>,
    /// Session lifecycle (create, join, start, leave, status)
    pub games: GameService,
    /// Turn resolution
    pub game_flow: GameFlowService,
    /// WebSocket broadcast groups keyed by session code
    pub realtime: Arc<GameSessionRegistry>,
    pub clock: Arc<dyn Clock>,
    pub config: GameConfig,
}

impl AppState {
    pub fn websocket_registry(&self) -> Arc<GameSessionRegistry> {
        self.realtime.clone()
    }
}
