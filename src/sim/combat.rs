//! Overlap resolution: contact damage, projectile kills, pickups
//!
//! Each enemy runs a two-state machine: Idle (`hit = false`) deals contact
//! damage and enters Cooldown (`hit = true`); a deferred clear returns it
//! to Idle after the invulnerability window. Projectile strikes destroy
//! projectile and enemy together in the same resolution step.

use super::events::{FeedbackKind, GameEvent, SceneChange};
use super::geometry::circles_overlap;
use super::state::{DeferredAction, GamePhase, Session};

/// Resolve all overlaps for this tick
pub fn resolve(session: &mut Session) {
    resolve_enemy_contact(session);
    if session.phase == GamePhase::GameOver {
        return;
    }
    resolve_projectile_hits(session);
    resolve_powerup_pickups(session);
}

/// Player-enemy contact: Idle enemies deal damage and enter Cooldown
fn resolve_enemy_contact(session: &mut Session) {
    let player_bounds = session.player.bounds(session.config.player_size);
    let enemy_size = session.config.enemy_size;
    let damage = session.config.contact_damage;
    let invulnerability_ms = session.config.invulnerability_ms;

    let mut attackers = Vec::new();
    for enemy in &mut session.enemies {
        if enemy.hit {
            // Cooldown: no damage until the window clears
            continue;
        }
        if enemy.bounds(enemy_size).overlaps(&player_bounds) {
            enemy.hit = true;
            attackers.push(enemy.id);
        }
    }

    for enemy_id in attackers {
        // Terminal state forbids further mutation
        if session.phase == GamePhase::GameOver || session.player.health == 0 {
            break;
        }
        session.player.health = session.player.health.saturating_sub(damage);
        session.schedule_in(invulnerability_ms, DeferredAction::ClearEnemyHit { enemy_id });
        session.push_event(GameEvent::Feedback(FeedbackKind::ZombieAttack));
        session.push_hud_update();

        if session.player.health == 0 {
            game_over(session);
        }
    }
}

/// Projectile-enemy strikes: one hit kills, both bodies destroyed together
fn resolve_projectile_hits(session: &mut Session) {
    let projectile_radius = session.config.projectile_radius;
    let enemy_radius = session.config.enemy_hit_radius;

    let mut spent_projectiles = Vec::new();
    let mut killed_enemies = Vec::new();

    for projectile in &session.projectiles {
        let strike = session.enemies.iter().find(|enemy| {
            !killed_enemies.contains(&enemy.id)
                && circles_overlap(projectile.pos, projectile_radius, enemy.pos, enemy_radius)
        });
        if let Some(enemy) = strike {
            spent_projectiles.push(projectile.id);
            killed_enemies.push(enemy.id);
        }
    }

    if killed_enemies.is_empty() {
        return;
    }

    session
        .projectiles
        .retain(|projectile| !spent_projectiles.contains(&projectile.id));
    session
        .enemies
        .retain(|enemy| !killed_enemies.contains(&enemy.id));

    for id in spent_projectiles {
        session.push_event(GameEvent::EntityDestroyed { id });
    }
    for id in killed_enemies {
        session.kills += 1;
        session.score += session.config.score_per_kill;
        session.push_event(GameEvent::EntityDestroyed { id });
        session.push_event(GameEvent::Feedback(FeedbackKind::ZombieDeath));
        session.push_hud_update();
    }
    log::debug!("kill count {}, score {}", session.kills, session.score);
}

/// Player-powerup overlap: consume and apply the effect
fn resolve_powerup_pickups(session: &mut Session) {
    let player_bounds = session.player.bounds(session.config.player_size);
    let powerup_size = session.config.powerup_size;

    let collected: Vec<u32> = session
        .powerups
        .iter()
        .filter(|powerup| powerup.bounds(powerup_size).overlaps(&player_bounds))
        .map(|powerup| powerup.id)
        .collect();
    if collected.is_empty() {
        return;
    }

    session
        .powerups
        .retain(|powerup| !collected.contains(&powerup.id));
    for id in collected {
        session.player.health =
            (session.player.health + session.config.heal_amount).min(session.config.max_health);
        session.push_event(GameEvent::EntityDestroyed { id });
        session.push_hud_update();
    }
}

/// Terminal transition: freeze the run and clear the arena
pub(crate) fn game_over(session: &mut Session) {
    session.phase = GamePhase::GameOver;
    // Drops both spawn timers; pending invulnerability clears target
    // destroyed enemies and would be no-ops anyway
    session.pending.clear();

    for enemy in std::mem::take(&mut session.enemies) {
        session.push_event(GameEvent::EntityDestroyed { id: enemy.id });
    }
    for projectile in std::mem::take(&mut session.projectiles) {
        session.push_event(GameEvent::EntityDestroyed { id: projectile.id });
    }
    session.push_event(GameEvent::SceneTransition(SceneChange::GameOver {
        score: session.score,
    }));
    log::info!("game over, final score {}", session.score);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::sim::state::{Enemy, Powerup, PowerupKind, Projectile};
    use glam::Vec2;
    use proptest::prelude::*;

    fn fresh_session() -> Session {
        let mut session = Session::new(SessionConfig::default(), 77);
        session.player.pos = Vec2::new(400.0, 300.0);
        session.drain_events();
        session
    }

    fn add_enemy_at(session: &mut Session, pos: Vec2) -> u32 {
        let id = session.next_entity_id();
        session.enemies.push(Enemy::new(id, pos, 0.0));
        id
    }

    fn add_projectile_at(session: &mut Session, pos: Vec2) -> u32 {
        let id = session.next_entity_id();
        session.projectiles.push(Projectile {
            id,
            pos,
            rotation: 0.0,
            vel: Vec2::new(500.0, 0.0),
        });
        id
    }

    #[test]
    fn test_contact_damages_once_and_enters_cooldown() {
        let mut session = fresh_session();
        let player_pos = session.player.pos;
        let id = add_enemy_at(&mut session, player_pos);

        resolve(&mut session);
        assert_eq!(session.player.health, 90);
        assert!(session.enemies[0].hit);
        assert!(session.pending.iter().any(|entry| matches!(
            entry.action,
            DeferredAction::ClearEnemyHit { enemy_id } if enemy_id == id
        )));

        // Still overlapping on later ticks: Cooldown blocks further damage
        resolve(&mut session);
        resolve(&mut session);
        assert_eq!(session.player.health, 90);
    }

    #[test]
    fn test_cooldown_clear_is_scheduled_a_window_out() {
        let mut session = fresh_session();
        session.clock_ms = 250.0;
        let player_pos = session.player.pos;
        add_enemy_at(&mut session, player_pos);

        resolve(&mut session);
        let clear = session
            .pending
            .iter()
            .find(|entry| matches!(entry.action, DeferredAction::ClearEnemyHit { .. }))
            .unwrap();
        assert_eq!(clear.due_ms, 1250.0);
    }

    #[test]
    fn test_two_idle_enemies_each_deal_damage() {
        let mut session = fresh_session();
        let player_pos = session.player.pos;
        add_enemy_at(&mut session, player_pos);
        add_enemy_at(&mut session, player_pos + Vec2::new(10.0, 0.0));

        resolve(&mut session);
        assert_eq!(session.player.health, 80);
    }

    #[test]
    fn test_projectile_and_enemy_die_in_same_step() {
        let mut session = fresh_session();
        let enemy_id = add_enemy_at(&mut session, Vec2::new(600.0, 300.0));
        let projectile_id = add_projectile_at(&mut session, Vec2::new(600.0, 300.0));

        resolve(&mut session);
        assert!(session.enemies.is_empty());
        assert!(session.projectiles.is_empty());
        assert_eq!(session.kills, 1);
        assert_eq!(session.score, 10);

        let events = session.events_snapshot();
        assert!(events
            .iter()
            .any(|event| matches!(event, GameEvent::EntityDestroyed { id } if *id == enemy_id)));
        assert!(events.iter().any(
            |event| matches!(event, GameEvent::EntityDestroyed { id } if *id == projectile_id)
        ));
        assert!(events
            .iter()
            .any(|event| matches!(event, GameEvent::Feedback(FeedbackKind::ZombieDeath))));
    }

    #[test]
    fn test_projectile_kills_at_most_one_enemy() {
        let mut session = fresh_session();
        add_enemy_at(&mut session, Vec2::new(600.0, 300.0));
        add_enemy_at(&mut session, Vec2::new(610.0, 300.0));
        add_projectile_at(&mut session, Vec2::new(600.0, 300.0));

        resolve(&mut session);
        assert_eq!(session.enemies.len(), 1);
        assert_eq!(session.kills, 1);
    }

    #[test]
    fn test_second_projectile_survives_shared_target() {
        let mut session = fresh_session();
        add_enemy_at(&mut session, Vec2::new(600.0, 300.0));
        add_projectile_at(&mut session, Vec2::new(600.0, 300.0));
        add_projectile_at(&mut session, Vec2::new(605.0, 300.0));

        resolve(&mut session);
        assert!(session.enemies.is_empty());
        assert_eq!(session.projectiles.len(), 1);
    }

    #[test]
    fn test_health_pack_heals_and_clamps() {
        let mut session = fresh_session();
        session.player.health = 95;
        let id = session.next_entity_id();
        session.powerups.push(Powerup {
            id,
            kind: PowerupKind::HealthPack,
            pos: session.player.pos,
            scale: 1.0,
        });

        resolve(&mut session);
        assert_eq!(session.player.health, 100);
        assert!(session.powerups.is_empty());
    }

    #[test]
    fn test_lethal_hit_triggers_game_over() {
        let mut session = fresh_session();
        session.player.health = 10;
        let player_pos = session.player.pos;
        add_enemy_at(&mut session, player_pos);
        add_enemy_at(&mut session, Vec2::new(700.0, 500.0));
        add_projectile_at(&mut session, Vec2::new(100.0, 500.0));

        resolve(&mut session);
        assert_eq!(session.phase, GamePhase::GameOver);
        assert_eq!(session.player.health, 0);
        assert!(session.enemies.is_empty());
        assert!(session.projectiles.is_empty());
        assert!(session.pending.is_empty());
        assert!(session.events_snapshot().iter().any(|event| matches!(
            event,
            GameEvent::SceneTransition(SceneChange::GameOver { score: 0 })
        )));
    }

    #[test]
    fn test_no_damage_after_game_over() {
        let mut session = fresh_session();
        session.player.health = 10;
        let player_pos = session.player.pos;
        add_enemy_at(&mut session, player_pos);
        resolve(&mut session);
        assert_eq!(session.phase, GamePhase::GameOver);

        // Overlap processed after the terminal transition must be a no-op
        let player_pos = session.player.pos;
        add_enemy_at(&mut session, player_pos);
        let before = session.player.health;
        resolve(&mut session);
        assert_eq!(session.player.health, before);
    }

    proptest! {
        #[test]
        fn prop_health_stays_in_range(steps in proptest::collection::vec(any::<bool>(), 1..40)) {
            let mut session = fresh_session();
            for take_damage in steps {
                if take_damage {
                    // A fresh idle enemy on top of the player
                    let player_pos = session.player.pos;
                    add_enemy_at(&mut session, player_pos);
                } else {
                    let id = session.next_entity_id();
                    session.powerups.push(Powerup {
                        id,
                        kind: PowerupKind::HealthPack,
                        pos: session.player.pos,
                        scale: 1.0,
                    });
                }
                resolve(&mut session);
                prop_assert!(session.player.health <= 100);
                if session.phase == GamePhase::GameOver {
                    prop_assert_eq!(session.player.health, 0);
                }
            }
        }
    }
}
