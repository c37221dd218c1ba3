use std::sync::Arc;

use crate::config::game::GameConfig;
use crate::infra::clock::{Clock, SystemClock};
use crate::infra::random::GameRng;
use crate::repos::sessions::SessionStore;
use crate::services::game_flow::GameFlowService;
use crate::services::games::GameService;
use crate::state::app_state::AppState;
use crate::ws::hub::GameSessionRegistry;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    config: GameConfig,
    clock: Arc<dyn Clock>,
    rng_seed: Option<u64>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
            clock: Arc::new(SystemClock),
            rng_seed: None,
        }
    }

    /// Replaces the config. A seed set on the config is kept unless
    /// [`with_rng_seed`](Self::with_rng_seed) overrides it.
    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn build(self) -> AppState {
        let seed = self.rng_seed.or(self.config.rng_seed);
        let rng = Arc::new(GameRng::from_seed(seed));
        let sessions = Arc::new(SessionStore::new());

        let games = GameService::new(sessions.clone(), self.clock.clone(), rng.clone());
        let game_flow = GameFlowService::new(
            sessions.clone(),
            self.clock.clone(),
            rng,
            self.config.time_limit,
        );

        AppState {
            sessions,
            games,
            game_flow,
            realtime: Arc::new(GameSessionRegistry::new()),
            clock: self.clock,
            config: self.config,
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
