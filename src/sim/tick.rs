//! Frame driver
//!
//! Advances one session by one tick in fixed order: input/fire handling,
//! player steering, enemy pursuit, projectile motion, combat resolution,
//! then deferred actions (spawn timers, cooldown clears) at the tick
//! boundary. Pausing suspends the clock with all state intact; game over
//! short-circuits everything until the session is reset.

use glam::Vec2;

use super::combat;
use super::events::{EntityKind, FeedbackKind, GameEvent, SceneChange};
use super::spawn;
use super::state::{GamePhase, Projectile, Session};
use super::steering;
use crate::{angle_between, heading_vector};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Combined 8-way movement direction from key state (unnormalized)
    pub move_dir: Vec2,
    /// World-space aim point; facing snaps to it when present
    pub aim_target: Option<Vec2>,
    /// Fire one projectile this tick
    pub fire: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the session by one frame of `dt_ms` simulated milliseconds
pub fn tick(session: &mut Session, input: &TickInput, dt_ms: f32) {
    if input.pause {
        match session.phase {
            GamePhase::Playing => {
                session.phase = GamePhase::Paused;
                session.push_event(GameEvent::SceneTransition(SceneChange::Paused));
                return;
            }
            GamePhase::Paused => {
                session.phase = GamePhase::Playing;
                session.push_event(GameEvent::SceneTransition(SceneChange::Resumed));
            }
            GamePhase::GameOver => {}
        }
    }

    match session.phase {
        GamePhase::Paused | GamePhase::GameOver => return,
        GamePhase::Playing => {}
    }

    session.clock_ms += dt_ms as f64;
    let dt = dt_ms / 1000.0;

    if input.fire {
        fire_projectile(session, input.aim_target);
    }

    steering::update_player(session, input, dt);
    steering::update_enemies(session, dt);
    steering::update_projectiles(session, dt);
    combat::resolve(session);

    // Timers fire at tick boundaries, never mid-tick
    if session.phase == GamePhase::Playing {
        spawn::process_deferred(session);
    }
}

/// Spawn a projectile at the player, aimed at the target (or along the
/// current facing when no aim target exists)
fn fire_projectile(session: &mut Session, aim_target: Option<Vec2>) {
    let pos = session.player.pos;
    let rotation = match aim_target {
        Some(target) => angle_between(pos, target),
        None => session.player.rotation,
    };
    let vel = heading_vector(rotation) * session.config.bullet_speed;

    let id = session.next_entity_id();
    session.projectiles.push(Projectile {
        id,
        pos,
        rotation,
        vel,
    });
    session.push_event(GameEvent::EntitySpawned {
        id,
        kind: EntityKind::Projectile,
        pos,
        rotation,
    });
    session.push_event(GameEvent::Feedback(FeedbackKind::GunShot));
}
