//! Per-tick motion for the player, enemies, and projectiles
//!
//! The player moves on 8-way input and either snaps to the aim target or
//! smooths toward the movement heading. Enemies pursue the player and
//! hold position inside the stop distance. Projectiles fly straight and
//! die at the world edge.

use glam::Vec2;

use super::events::GameEvent;
use super::state::Session;
use super::tick::TickInput;
use crate::{angle_between, heading_vector, normalize_angle};

/// Apply movement input and facing rules to the player
pub fn update_player(session: &mut Session, input: &TickInput, dt: f32) {
    let config = &session.config;
    let player = &mut session.player;

    let direction = input.move_dir.normalize_or_zero();
    player.vel = direction * config.player_speed;
    player.pos += player.vel * dt;

    // Keep the body inside the world
    let half = config.player_size / 2.0;
    player.pos.x = player.pos.x.clamp(half, config.world_width - half);
    player.pos.y = player.pos.y.clamp(half, config.world_height - half);

    if let Some(target) = input.aim_target {
        // Aim-snap takes precedence over heading smoothing
        player.rotation = angle_between(player.pos, target);
    } else if player.vel.length_squared() > 0.0 {
        let target_angle = player.vel.y.atan2(player.vel.x);
        let delta = normalize_angle(target_angle - player.rotation);
        player.rotation = normalize_angle(player.rotation + delta * config.turn_smoothing);
    }
}

/// Steer every enemy toward the player
pub fn update_enemies(session: &mut Session, dt: f32) {
    let config = &session.config;
    let player_pos = session.player.pos;

    for enemy in &mut session.enemies {
        let angle = angle_between(enemy.pos, player_pos);
        enemy.rotation = angle;

        if enemy.pos.distance(player_pos) < config.stop_distance {
            // Hold position, keep facing the player
            enemy.vel = Vec2::ZERO;
        } else {
            enemy.vel = heading_vector(angle) * config.enemy_speed;
        }
        enemy.pos += enemy.vel * dt;
    }
}

/// Integrate projectiles and destroy any that leave the world
pub fn update_projectiles(session: &mut Session, dt: f32) {
    let bounds = session.world_bounds();
    let mut escaped = Vec::new();

    for projectile in &mut session.projectiles {
        projectile.pos += projectile.vel * dt;
        if !bounds.contains(projectile.pos) {
            escaped.push(projectile.id);
        }
    }

    for id in escaped {
        session.projectiles.retain(|projectile| projectile.id != id);
        session.push_event(GameEvent::EntityDestroyed { id });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::sim::state::{Enemy, Projectile};
    use std::f32::consts::{FRAC_PI_2, PI};

    const DT: f32 = 1.0 / 60.0;

    fn fresh_session() -> Session {
        let mut session = Session::new(SessionConfig::default(), 99);
        session.drain_events();
        session
    }

    #[test]
    fn test_player_diagonal_input_moves_at_full_speed() {
        let mut session = fresh_session();
        let input = TickInput {
            move_dir: Vec2::new(1.0, 1.0),
            ..Default::default()
        };
        update_player(&mut session, &input, DT);
        assert!((session.player.vel.length() - 200.0).abs() < 1e-3);
    }

    #[test]
    fn test_player_clamped_to_world_bounds() {
        let mut session = fresh_session();
        session.player.pos = Vec2::new(30.0, 30.0);
        let input = TickInput {
            move_dir: Vec2::new(-1.0, -1.0),
            ..Default::default()
        };
        for _ in 0..120 {
            update_player(&mut session, &input, DT);
        }
        // Half the body size keeps the sprite on screen
        assert_eq!(session.player.pos, Vec2::new(24.0, 24.0));
    }

    #[test]
    fn test_aim_target_snaps_rotation() {
        let mut session = fresh_session();
        session.player.pos = Vec2::new(400.0, 300.0);
        let input = TickInput {
            aim_target: Some(Vec2::new(400.0, 400.0)),
            ..Default::default()
        };
        update_player(&mut session, &input, DT);
        assert!((session.player.rotation - FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_heading_smoothing_takes_shortest_path() {
        let mut session = fresh_session();
        session.player.pos = Vec2::new(400.0, 300.0);
        // Facing -0.9π, heading π: the short way is backwards through ±π
        session.player.rotation = -0.9 * PI;
        let input = TickInput {
            move_dir: Vec2::new(-1.0, 0.0),
            ..Default::default()
        };
        update_player(&mut session, &input, DT);
        let expected = normalize_angle(-0.9 * PI + 0.2 * normalize_angle(PI + 0.9 * PI));
        assert!((session.player.rotation - expected).abs() < 1e-5);
        // Rotated toward -π, away from zero
        assert!(session.player.rotation < -0.9 * PI);
    }

    #[test]
    fn test_smoothing_converges_on_heading() {
        let mut session = fresh_session();
        session.player.pos = Vec2::new(400.0, 300.0);
        session.player.rotation = 0.0;
        let input = TickInput {
            move_dir: Vec2::new(0.0, 1.0),
            ..Default::default()
        };
        for _ in 0..60 {
            update_player(&mut session, &input, DT);
        }
        assert!((session.player.rotation - FRAC_PI_2).abs() < 1e-3);
    }

    #[test]
    fn test_enemy_pursues_player_at_fixed_speed() {
        let mut session = fresh_session();
        session.player.pos = Vec2::new(400.0, 300.0);
        let id = session.next_entity_id();
        session
            .enemies
            .push(Enemy::new(id, Vec2::new(700.0, 300.0), 0.0));

        update_enemies(&mut session, DT);
        let enemy = &session.enemies[0];
        assert!((enemy.vel.length() - 100.0).abs() < 1e-3);
        assert!(enemy.vel.x < 0.0);
        assert!((enemy.rotation.abs() - PI).abs() < 1e-5);
    }

    #[test]
    fn test_enemy_holds_inside_stop_distance() {
        let mut session = fresh_session();
        session.player.pos = Vec2::new(400.0, 300.0);
        let id = session.next_entity_id();
        session
            .enemies
            .push(Enemy::new(id, Vec2::new(440.0, 300.0), 0.0));

        update_enemies(&mut session, DT);
        let enemy = &session.enemies[0];
        assert_eq!(enemy.vel, Vec2::ZERO);
        assert_eq!(enemy.pos, Vec2::new(440.0, 300.0));
        // Still faces the player while holding
        assert!((enemy.rotation.abs() - PI).abs() < 1e-5);
    }

    #[test]
    fn test_projectile_destroyed_at_world_edge() {
        let mut session = fresh_session();
        let id = session.next_entity_id();
        session.projectiles.push(Projectile {
            id,
            pos: Vec2::new(795.0, 300.0),
            rotation: 0.0,
            vel: Vec2::new(500.0, 0.0),
        });

        update_projectiles(&mut session, DT);
        assert!(session.projectiles.is_empty());
        assert!(session
            .events_snapshot()
            .iter()
            .any(|event| matches!(event, GameEvent::EntityDestroyed { id: gone } if *gone == id)));
    }

    #[test]
    fn test_projectile_in_flight_survives() {
        let mut session = fresh_session();
        let id = session.next_entity_id();
        session.projectiles.push(Projectile {
            id,
            pos: Vec2::new(400.0, 300.0),
            rotation: 0.0,
            vel: Vec2::new(500.0, 0.0),
        });

        update_projectiles(&mut session, DT);
        assert_eq!(session.projectiles.len(), 1);
        let expected_x = 400.0 + 500.0 * DT;
        assert!((session.projectiles[0].pos.x - expected_x).abs() < 1e-3);
    }
}
