//! Adaptive difficulty derived from cumulative kills
//!
//! The kill counter is the single source of truth; spawn intervals and
//! the enemy population cap are recomputed from it on demand and never
//! stored, so they cannot drift. Interval changes take effect on the next
//! timer fire, not retroactively.

use serde::{Deserialize, Serialize};

const BASE_ENEMY_INTERVAL_MS: f64 = 1000.0;
const ENEMY_INTERVAL_STEP_MS: f64 = 50.0;
const MIN_ENEMY_INTERVAL_MS: f64 = 500.0;

const BASE_POWERUP_INTERVAL_MS: f64 = 15_000.0;
const POWERUP_INTERVAL_STEP_MS: f64 = 100.0;
const MIN_POWERUP_INTERVAL_MS: f64 = 5_000.0;

const BASE_ENEMY_CAP: usize = 10;
const MAX_ENEMY_CAP: usize = 20;
const KILLS_PER_CAP_STEP: u32 = 5;

/// Spawn cadence and population cap for a given kill count
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyParams {
    pub enemy_spawn_interval_ms: f64,
    pub powerup_spawn_interval_ms: f64,
    pub max_concurrent_enemies: usize,
}

impl DifficultyParams {
    /// Recompute all parameters from the cumulative kill count.
    ///
    /// Intervals shrink linearly to a floor; the enemy cap grows one slot
    /// per five kills up to a ceiling.
    pub fn for_kills(kills: u32) -> Self {
        let kills_f = kills as f64;
        Self {
            enemy_spawn_interval_ms: (BASE_ENEMY_INTERVAL_MS
                - ENEMY_INTERVAL_STEP_MS * kills_f)
                .max(MIN_ENEMY_INTERVAL_MS),
            powerup_spawn_interval_ms: (BASE_POWERUP_INTERVAL_MS
                - POWERUP_INTERVAL_STEP_MS * kills_f)
                .max(MIN_POWERUP_INTERVAL_MS),
            max_concurrent_enemies: (BASE_ENEMY_CAP + (kills / KILLS_PER_CAP_STEP) as usize)
                .min(MAX_ENEMY_CAP),
        }
    }
}
