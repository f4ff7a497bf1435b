//! Entity records and session state
//!
//! One [`Session`] is one playthrough. It exclusively owns every entity
//! collection, the deferred-action queue, the RNG, and the simulation
//! clock; nothing is shared across sessions. Entities carry stable ids so
//! deferred callbacks can reference them safely after destruction.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyParams;
use super::events::{EntityKind, FeedbackKind, GameEvent};
use super::geometry::Rect;
use crate::config::SessionConfig;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Suspended, state intact
    Paused,
    /// Run ended; only a fresh session resumes play
    GameOver,
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub pos: Vec2,
    /// Facing (radians)
    pub rotation: f32,
    pub vel: Vec2,
    /// Clamped to [0, max_health]
    pub health: u32,
}

impl Player {
    pub fn new(id: u32, pos: Vec2, health: u32) -> Self {
        Self {
            id,
            pos,
            rotation: 0.0,
            vel: Vec2::ZERO,
            health,
        }
    }

    /// Body rect for contact checks
    pub fn bounds(&self, size: f32) -> Rect {
        Rect::from_center(self.pos, Vec2::splat(size))
    }
}

/// A pursuing enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub rotation: f32,
    pub vel: Vec2,
    /// True during the post-damage invulnerability window; a hit enemy
    /// deals no further damage until the window clears
    pub hit: bool,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2, rotation: f32) -> Self {
        Self {
            id,
            pos,
            rotation,
            vel: Vec2::ZERO,
            hit: false,
        }
    }

    pub fn bounds(&self, size: f32) -> Rect {
        Rect::from_center(self.pos, Vec2::splat(size))
    }
}

/// A fired projectile; velocity magnitude is the configured bullet speed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    /// Aligned to velocity at spawn
    pub rotation: f32,
    pub vel: Vec2,
}

/// Powerup variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PowerupKind {
    #[default]
    HealthPack,
}

/// A collectible powerup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Powerup {
    pub id: u32,
    pub kind: PowerupKind,
    pub pos: Vec2,
    pub scale: f32,
}

impl Powerup {
    pub fn bounds(&self, size: f32) -> Rect {
        Rect::from_center(self.pos, Vec2::splat(size * self.scale))
    }
}

/// Work deferred against the simulation clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeferredAction {
    /// Repeating enemy spawn timer
    SpawnEnemy,
    /// Repeating powerup spawn timer
    SpawnPowerup,
    /// Clear the invulnerability window; a stale id is a no-op
    ClearEnemyHit { enemy_id: u32 },
}

/// A deferred action and when it fires
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduledAction {
    pub due_ms: f64,
    pub action: DeferredAction,
}

/// Complete state of one playthrough (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Tuning and world bounds, fixed at construction
    pub config: SessionConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    /// Simulated time since session start
    pub clock_ms: f64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub powerups: Vec<Powerup>,
    /// Cumulative kill counter; difficulty derives from this alone
    pub kills: u32,
    pub score: u64,
    /// Time-ordered deferred actions, processed at tick boundaries
    pub pending: Vec<ScheduledAction>,
    /// Outbound signals buffered for the host
    #[serde(skip)]
    events: Vec<GameEvent>,
    next_id: u32,
}

impl Session {
    /// Start a new session
    pub fn new(config: SessionConfig, seed: u64) -> Self {
        let mut session = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            clock_ms: 0.0,
            player: Player::new(0, config.player_spawn, config.max_health),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            powerups: Vec::new(),
            kills: 0,
            score: 0,
            pending: Vec::new(),
            events: Vec::new(),
            next_id: 1,
            config,
        };
        session.player.id = session.next_entity_id();

        // Arm both spawn timers with the fresh-session cadence
        let params = DifficultyParams::for_kills(0);
        session.schedule_in(params.enemy_spawn_interval_ms, DeferredAction::SpawnEnemy);
        session.schedule_in(params.powerup_spawn_interval_ms, DeferredAction::SpawnPowerup);

        session.push_event(GameEvent::EntitySpawned {
            id: session.player.id,
            kind: EntityKind::Player,
            pos: session.player.pos,
            rotation: session.player.rotation,
        });
        session.push_event(GameEvent::Feedback(FeedbackKind::ThemeLoop));
        session.push_hud_update();

        log::info!("session started (seed {seed})");
        session
    }

    /// Discard this run and start over with the same config
    pub fn reset(&mut self, seed: u64) {
        log::info!("session reset");
        *self = Session::new(self.config.clone(), seed);
    }

    /// Allocate a new entity id
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// The playable world rect
    pub fn world_bounds(&self) -> Rect {
        Rect::new(Vec2::ZERO, self.config.world_extent())
    }

    /// Queue an action `delay_ms` from now
    pub fn schedule_in(&mut self, delay_ms: f64, action: DeferredAction) {
        self.schedule_at(self.clock_ms + delay_ms, action);
    }

    /// Queue an action at an absolute clock time
    pub fn schedule_at(&mut self, due_ms: f64, action: DeferredAction) {
        self.pending.push(ScheduledAction { due_ms, action });
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub(crate) fn push_hud_update(&mut self) {
        let event = GameEvent::HudUpdate {
            score: self.score,
            health: self.player.health,
        };
        self.events.push(event);
    }

    /// Take all signals buffered since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    #[cfg(test)]
    pub(crate) fn events_snapshot(&self) -> &[GameEvent] {
        &self.events
    }
}
