//! Timer-driven spawning and the deferred-action queue
//!
//! Enemy/powerup spawn timers and per-enemy invulnerability clears all
//! live in one time-ordered queue against the simulation clock, processed
//! at tick boundaries in expiry order. Spawn timers re-arm themselves with
//! the difficulty cadence current at the moment of firing.
//!
//! Placement is rejection sampling with a bounded retry count; when the
//! budget runs out the point is placed unconstrained and the degraded
//! placement is logged. An action referencing a destroyed enemy is a
//! no-op.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::difficulty::DifficultyParams;
use super::events::{EntityKind, GameEvent};
use super::geometry::{self, Rect};
use super::state::{DeferredAction, Enemy, Powerup, PowerupKind, Session};
use crate::angle_between;

/// Dispatch every action due at the current clock, in expiry order
pub fn process_deferred(session: &mut Session) {
    session
        .pending
        .sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms));
    let cut = session
        .pending
        .partition_point(|entry| entry.due_ms <= session.clock_ms);
    let due: Vec<_> = session.pending.drain(..cut).collect();

    for entry in due {
        match entry.action {
            DeferredAction::SpawnEnemy => {
                spawn_enemy(session);
                let params = DifficultyParams::for_kills(session.kills);
                session.schedule_in(params.enemy_spawn_interval_ms, DeferredAction::SpawnEnemy);
            }
            DeferredAction::SpawnPowerup => {
                spawn_powerup(session);
                let params = DifficultyParams::for_kills(session.kills);
                session.schedule_in(
                    params.powerup_spawn_interval_ms,
                    DeferredAction::SpawnPowerup,
                );
            }
            DeferredAction::ClearEnemyHit { enemy_id } => {
                // Stale ids (enemy already destroyed) fall through
                if let Some(enemy) = session
                    .enemies
                    .iter_mut()
                    .find(|enemy| enemy.id == enemy_id)
                {
                    enemy.hit = false;
                }
            }
        }
    }
}

/// Spawn one enemy unless the population is at the difficulty cap
fn spawn_enemy(session: &mut Session) {
    let params = DifficultyParams::for_kills(session.kills);
    if session.enemies.len() >= params.max_concurrent_enemies {
        log::debug!(
            "enemy spawn skipped, population at cap {}",
            params.max_concurrent_enemies
        );
        return;
    }

    let pos = place_enemy(session);
    let rotation = angle_between(pos, session.player.pos);
    let id = session.next_entity_id();
    session.enemies.push(Enemy::new(id, pos, rotation));
    session.push_event(GameEvent::EntitySpawned {
        id,
        kind: EntityKind::Enemy,
        pos,
        rotation,
    });
}

/// Pick an enemy spawn point: a quadrant away from the player, at least
/// the minimum distance out
fn place_enemy(session: &mut Session) -> Vec2 {
    let world = session.config.world_extent();
    let player_pos = session.player.pos;
    let player_quadrant = geometry::quadrant_of(player_pos, world);
    let min_distance = session.config.min_enemy_spawn_distance;

    for _ in 0..session.config.placement_retry_limit {
        // One of the three quadrants the player is not in
        let mut quadrant = session.rng.random_range(0..3u8);
        if quadrant >= player_quadrant {
            quadrant += 1;
        }
        let rect = geometry::quadrant_rect(quadrant, world);
        let candidate = sample_in_rect(&mut session.rng, &rect);
        if candidate.distance(player_pos) >= min_distance {
            return candidate;
        }
    }

    let world_rect = session.world_bounds();
    let candidate = sample_in_rect(&mut session.rng, &world_rect);
    log::warn!(
        "degraded enemy placement after {} retries, falling back to {candidate}",
        session.config.placement_retry_limit
    );
    candidate
}

/// Spawn one powerup unless the population is at the cap
fn spawn_powerup(session: &mut Session) {
    if session.powerups.len() >= session.config.max_powerups {
        log::debug!(
            "powerup spawn skipped, population at cap {}",
            session.config.max_powerups
        );
        return;
    }

    let pos = place_powerup(session);
    let id = session.next_entity_id();
    session.powerups.push(Powerup {
        id,
        kind: PowerupKind::HealthPack,
        pos,
        scale: 1.0,
    });
    session.push_event(GameEvent::EntitySpawned {
        id,
        kind: EntityKind::Powerup,
        pos,
        rotation: 0.0,
    });
}

/// Pick a powerup spawn point anywhere in the world that keeps clear of
/// the player
fn place_powerup(session: &mut Session) -> Vec2 {
    let world_rect = session.world_bounds();
    let keep_out = Rect::from_center(
        session.player.pos,
        Vec2::splat(session.config.powerup_clearance),
    );
    let size = Vec2::splat(session.config.powerup_size);

    for _ in 0..session.config.placement_retry_limit {
        let candidate = sample_in_rect(&mut session.rng, &world_rect);
        if !Rect::from_center(candidate, size).overlaps(&keep_out) {
            return candidate;
        }
    }

    let candidate = sample_in_rect(&mut session.rng, &world_rect);
    log::warn!(
        "degraded powerup placement after {} retries, falling back to {candidate}",
        session.config.placement_retry_limit
    );
    candidate
}

fn sample_in_rect(rng: &mut Pcg32, rect: &Rect) -> Vec2 {
    Vec2::new(
        rng.random_range(rect.min.x..rect.max.x),
        rng.random_range(rect.min.y..rect.max.y),
    )
}
