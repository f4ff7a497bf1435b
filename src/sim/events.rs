//! Outbound signals for the host engine
//!
//! The simulation never renders or plays audio itself; it buffers these
//! events each tick and the host drains them with
//! [`Session::drain_events`](super::Session::drain_events). Entity
//! transforms are not mirrored here - the host reads positions and
//! rotations straight off the session state each frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// What kind of entity a spawn event refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Enemy,
    Projectile,
    Powerup,
}

/// Audio/visual feedback cues the host maps to its own assets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackKind {
    /// Player fired a shot
    GunShot,
    /// An enemy died to a projectile
    ZombieDeath,
    /// An enemy landed a hit on the player
    ZombieAttack,
    /// Ambient theme, started once per session
    ThemeLoop,
}

/// Scene-level transitions the host realizes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SceneChange {
    /// Terminal: the run ended with this final score
    GameOver { score: u64 },
    Paused,
    Resumed,
}

/// One buffered outbound signal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EntitySpawned {
        id: u32,
        kind: EntityKind,
        pos: Vec2,
        rotation: f32,
    },
    EntityDestroyed {
        id: u32,
    },
    Feedback(FeedbackKind),
    HudUpdate {
        score: u64,
        health: u32,
    },
    SceneTransition(SceneChange),
}
