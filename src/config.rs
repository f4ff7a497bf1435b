//! World bounds and gameplay tuning
//!
//! Everything a session needs to know about the world comes in through
//! this struct at construction time; the simulation never reads ambient
//! engine globals. The headless driver can override defaults from a JSON
//! file.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Tunable constants for one simulation session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    // === World ===
    /// World width in units
    pub world_width: f32,
    /// World height in units
    pub world_height: f32,
    /// Where the player starts
    pub player_spawn: Vec2,

    // === Movement ===
    /// Player movement speed (units/s)
    pub player_speed: f32,
    /// Enemy pursuit speed (units/s)
    pub enemy_speed: f32,
    /// Projectile speed (units/s)
    pub bullet_speed: f32,
    /// Fraction of the remaining angular delta applied per tick when the
    /// player turns toward the movement heading (no aim target)
    pub turn_smoothing: f32,
    /// Enemies hold position once within this range of the player
    pub stop_distance: f32,

    // === Bodies ===
    /// Player bounding square side
    pub player_size: f32,
    /// Enemy bounding square side
    pub enemy_size: f32,
    /// Powerup bounding square side
    pub powerup_size: f32,
    /// Projectile collision radius
    pub projectile_radius: f32,
    /// Enemy collision radius for projectile strikes
    pub enemy_hit_radius: f32,

    // === Combat ===
    /// Player health ceiling
    pub max_health: u32,
    /// Damage per enemy contact
    pub contact_damage: u32,
    /// Health restored by a health pack
    pub heal_amount: u32,
    /// Post-damage window during which an enemy deals no further damage
    pub invulnerability_ms: f64,
    /// Score awarded per kill
    pub score_per_kill: u64,

    // === Spawning ===
    /// Minimum distance from the player for a fresh enemy
    pub min_enemy_spawn_distance: f32,
    /// Side of the keep-out square around the player for powerup placement
    pub powerup_clearance: f32,
    /// Concurrent powerup cap
    pub max_powerups: usize,
    /// Rejection-sampling attempts before falling back to an
    /// unconstrained point
    pub placement_retry_limit: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            world_width: 800.0,
            world_height: 600.0,
            player_spawn: Vec2::new(100.0, 100.0),

            player_speed: 200.0,
            enemy_speed: 100.0,
            bullet_speed: 500.0,
            turn_smoothing: 0.2,
            stop_distance: 60.0,

            player_size: 48.0,
            enemy_size: 48.0,
            powerup_size: 32.0,
            projectile_radius: 8.0,
            enemy_hit_radius: 24.0,

            max_health: 100,
            contact_damage: 10,
            heal_amount: 20,
            invulnerability_ms: 1000.0,
            score_per_kill: 10,

            min_enemy_spawn_distance: 400.0,
            powerup_clearance: 120.0,
            max_powerups: 3,
            placement_retry_limit: 32,
        }
    }
}

impl SessionConfig {
    /// World extent as a vector
    #[inline]
    pub fn world_extent(&self) -> Vec2 {
        Vec2::new(self.world_width, self.world_height)
    }
}
