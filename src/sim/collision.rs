//! Collision detection between the player, projectiles and enemies
//!
//! Detection is pure: it reads entity snapshots and produces a [`HitReport`].
//! Applying the hits (removals, score, lives) is the world's job.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::entity::{Enemy, Projectile};
use crate::tuning::Tuning;
use crate::{horizontal, outside_arena};

/// A projectile overlapping an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectileHit {
    pub projectile: u32,
    pub enemy: u32,
}

/// Everything that collided during one tick
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitReport {
    /// Every overlapping (projectile, enemy) pair; one projectile may appear
    /// several times
    pub projectile_hits: Vec<ProjectileHit>,
    /// Enemies touching the player on the ground plane
    pub player_hits: Vec<u32>,
    /// Player is outside the arena bounds
    pub player_out_of_bounds: bool,
}

impl HitReport {
    /// True when nothing collided
    pub fn is_empty(&self) -> bool {
        self.projectile_hits.is_empty() && self.player_hits.is_empty() && !self.player_out_of_bounds
    }
}

/// Sphere overlap in full 3D
#[inline]
pub fn spheres_overlap(a: Vec3, radius_a: f32, b: Vec3, radius_b: f32) -> bool {
    a.distance(b) < radius_a + radius_b
}

/// Circle overlap on the ground plane; height is ignored
#[inline]
pub fn horizontal_overlap(a: Vec3, radius_a: f32, b: Vec3, radius_b: f32) -> bool {
    horizontal(a).distance(horizontal(b)) < radius_a + radius_b
}

/// Test every entity pair against current positions
///
/// Pairs are reported in input order, so identical snapshots always produce
/// identical reports.
pub fn resolve(
    projectiles: &[Projectile],
    enemies: &[Enemy],
    player_pos: Vec3,
    tuning: &Tuning,
) -> HitReport {
    let player_out_of_bounds = outside_arena(player_pos, tuning.half_extent());

    let projectile_hits = projectiles
        .iter()
        .flat_map(|projectile| {
            enemies
                .iter()
                .filter(move |enemy| {
                    spheres_overlap(projectile.pos, projectile.radius, enemy.pos, enemy.radius)
                })
                .map(move |enemy| ProjectileHit {
                    projectile: projectile.id,
                    enemy: enemy.id,
                })
        })
        .collect();

    let player_hits = enemies
        .iter()
        .filter(|enemy| {
            horizontal_overlap(player_pos, tuning.player_collision_radius, enemy.pos, enemy.radius)
        })
        .map(|enemy| enemy.id)
        .collect();

    HitReport {
        projectile_hits,
        player_hits,
        player_out_of_bounds,
    }
}
