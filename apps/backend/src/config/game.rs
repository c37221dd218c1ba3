use std::env;
use std::time::Duration;

use crate::domain::rules::DEFAULT_TIME_LIMIT;
use crate::error::AppError;

/// Timing and randomness knobs for the session core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Turns at or beyond this age (from creation) end the game on points.
    pub time_limit: Duration,
    /// Sessions with no mutation for this long are reclaimed.
    pub idle_ttl: Duration,
    /// Finished sessions stay readable for this long.
    pub finished_retention: Duration,
    pub sweep_interval: Duration,
    /// Fixed seed for reproducible draws; OS entropy when unset.
    pub rng_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            time_limit: DEFAULT_TIME_LIMIT,
            idle_ttl: Duration::from_secs(30 * 60),
            finished_retention: Duration::from_secs(5 * 60),
            sweep_interval: Duration::from_secs(60),
            rng_seed: None,
        }
    }
}

impl GameConfig {
    /// Read overrides from the environment, falling back to defaults.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();
        Ok(Self {
            time_limit: secs_var("GAME_TIME_LIMIT_SECS", defaults.time_limit)?,
            idle_ttl: secs_var("GAME_IDLE_TTL_SECS", defaults.idle_ttl)?,
            finished_retention: secs_var(
                "GAME_FINISHED_RETENTION_SECS",
                defaults.finished_retention,
            )?,
            sweep_interval: secs_var("GAME_SWEEP_INTERVAL_SECS", defaults.sweep_interval)?,
            rng_seed: optional_u64("GAME_RNG_SEED")?,
        })
    }
}

fn secs_var(name: &str, default: Duration) -> Result<Duration, AppError> {
    match optional_u64(name)? {
        Some(0) => Err(AppError::config(format!("{name} must be greater than zero"))),
        Some(secs) => Ok(Duration::from_secs(secs)),
        None => Ok(default),
    }
}

fn optional_u64(name: &str) -> Result<Option<u64>, AppError> {
    match env::var(name) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| AppError::config(format!("{name} must be a non-negative integer, got '{raw}'"))),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(AppError::config(format!("{name}: {e}"))),
    }
}
