//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and
//! deterministic:
//! - Seeded RNG only
//! - Fixed per-tick stage order
//! - Deferred actions fire at tick boundaries, never mid-tick
//! - No rendering or platform dependencies

pub mod combat;
pub mod difficulty;
pub mod events;
pub mod geometry;
pub mod spawn;
pub mod state;
pub mod steering;
pub mod tick;

pub use difficulty::DifficultyParams;
pub use events::{EntityKind, FeedbackKind, GameEvent, SceneChange};
pub use geometry::{Rect, circles_overlap, quadrant_of, quadrant_rect};
pub use state::{
    DeferredAction, Enemy, GamePhase, Player, Powerup, PowerupKind, Projectile, ScheduledAction,
    Session,
};
pub use tick::{TickInput, tick};
