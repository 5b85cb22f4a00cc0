//! Per-frame simulation tick
//!
//! Advances the world in a fixed order: spawn, move, expire, level, collide,
//! then apply hits. Collisions see positions already moved this tick, so a
//! kill and a life loss can land in the same tick.

use glam::Vec3;

use super::collision::{self, HitReport};
use super::state::{GameEvent, RemovalCause};
use super::world::World;

/// A shoot event from the input side
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub origin: Vec3,
    /// Expected normalized; a zero vector fires a stationary projectile
    pub direction: Vec3,
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Current player position (owned by the controller)
    pub player_pos: Vec3,
    /// Shots fired since the last tick
    pub shots: Vec<Shot>,
}

/// Advance the world by `dt` seconds at timestamp `now_ms`
///
/// `now_ms` is read once by the caller and used for every step, so motion and
/// collision agree on the time. Returns the tick's hit report.
pub fn tick(world: &mut World, input: &TickInput, dt: f32, now_ms: u64) -> HitReport {
    // Frozen after game over
    if world.state.is_game_over() {
        return HitReport::default();
    }

    for shot in &input.shots {
        world.shoot(shot.origin, shot.direction, now_ms);
    }

    let spawned = world
        .spawner
        .maybe_spawn(now_ms, &world.tuning, &mut world.ids);
    world.add_enemies(spawned);

    for enemy in &mut world.enemies {
        enemy.update(input.player_pos, dt, world.tuning.tomato_speed);
    }

    let lifetime_ms = world.tuning.projectile_lifetime_ms;
    let mut expired = Vec::new();
    world.projectiles.retain_mut(|projectile| {
        let alive = projectile.update(dt, now_ms, lifetime_ms);
        if !alive {
            expired.push(projectile.id);
        }
        alive
    });
    for id in expired {
        world.push_event(GameEvent::ProjectileRemoved {
            id,
            cause: RemovalCause::Expired,
        });
    }

    if world.state.update_level(now_ms, &world.tuning) {
        let level = world.state.level();
        world.spawner.set_level(level, &world.tuning);
        world.push_event(GameEvent::LevelUp { level });
    }

    let report = collision::resolve(
        &world.projectiles,
        &world.enemies,
        input.player_pos,
        &world.tuning,
    );

    // Every reported pair scores, even when the same enemy or projectile repeats
    for hit in &report.projectile_hits {
        world.remove_projectile(hit.projectile, RemovalCause::HitEnemy);
        world.remove_enemy(hit.enemy, RemovalCause::ShotDown);
        world.state.add_score(world.tuning.score_per_kill);
        log::debug!("Enemy {} shot down by projectile {}", hit.enemy, hit.projectile);
    }

    // Contact costs a life even if a projectile removed the enemy this tick
    for &enemy in &report.player_hits {
        world.remove_enemy(enemy, RemovalCause::HitPlayer);
        world.lose_life();
    }

    if report.player_out_of_bounds {
        log::warn!("Player out of bounds at {:?}", input.player_pos);
        world.lose_life();
    }

    report
}
