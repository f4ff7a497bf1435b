//! Siege Core - simulation core for a top-down survival shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (steering, combat, spawning, difficulty)
//! - `config`: World bounds and gameplay tuning, passed in at session start
//!
//! The crate owns no window, renderer, or audio device. A host engine
//! drives `sim::tick` once per frame and realizes the buffered
//! [`sim::GameEvent`]s (sprites, sounds, HUD, scene changes) however it
//! likes.

pub mod config;
pub mod sim;

pub use config::SessionConfig;
pub use sim::{GameEvent, GamePhase, Session, TickInput, tick};

use glam::Vec2;

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Heading angle from `from` toward `to`
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Unit vector pointing along a heading angle
#[inline]
pub fn heading_vector(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle_wraps() {
        assert!((normalize_angle(3.0 * PI) - (-PI)).abs() < 1e-5);
        assert!((normalize_angle(-3.0 * PI) - (-PI)).abs() < 1e-5);
        assert!((normalize_angle(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_angle_between_cardinals() {
        let origin = Vec2::ZERO;
        assert!((angle_between(origin, Vec2::new(1.0, 0.0)) - 0.0).abs() < 1e-6);
        assert!((angle_between(origin, Vec2::new(0.0, 1.0)) - PI / 2.0).abs() < 1e-6);
        assert!((angle_between(origin, Vec2::new(-1.0, 0.0)).abs() - PI).abs() < 1e-6);
    }

    #[test]
    fn test_heading_vector_unit_length() {
        for angle in [0.0, 0.7, -2.1, PI] {
            assert!((heading_vector(angle).length() - 1.0).abs() < 1e-6);
        }
    }
}
