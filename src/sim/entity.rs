//! Moving entities: projectiles and chasing enemies
//!
//! Entities only carry what the simulation needs (position, velocity, radius).
//! Meshes and other visuals belong to the renderer, keyed by entity id.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Hands out entity ids, starting at 1, never reused within a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdAllocator {
    next: u32,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdAllocator {
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// A projectile flying in a straight line until it expires or hits something
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec3,
    /// Fixed at creation: normalized direction * projectile speed
    pub vel: Vec3,
    /// Timestamp (ms) of the shot
    pub created_ms: u64,
    pub radius: f32,
}

impl Projectile {
    /// Fire a projectile from `origin` along `direction`
    ///
    /// A zero-length direction produces a stationary projectile rather than NaN.
    pub fn new(id: u32, origin: Vec3, direction: Vec3, now_ms: u64, tuning: &Tuning) -> Self {
        Self {
            id,
            pos: origin,
            vel: direction.normalize_or_zero() * tuning.projectile_speed,
            created_ms: now_ms,
            radius: tuning.projectile_size,
        }
    }

    /// Advance by `dt` seconds; returns false once the lifetime has elapsed
    pub fn update(&mut self, dt: f32, now_ms: u64, lifetime_ms: u64) -> bool {
        self.pos += self.vel * dt;
        self.is_alive(now_ms, lifetime_ms)
    }

    /// Whether the projectile is still within its lifetime at `now_ms`
    #[inline]
    pub fn is_alive(&self, now_ms: u64, lifetime_ms: u64) -> bool {
        now_ms.saturating_sub(self.created_ms) < lifetime_ms
    }
}

/// An enemy ("tomato") that steers toward the player every tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec3,
    /// Velocity applied on the last update
    pub vel: Vec3,
    pub radius: f32,
    /// Captured from the difficulty level at spawn; never re-evaluated
    speed_multiplier: f32,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec3, speed_multiplier: f32, tuning: &Tuning) -> Self {
        Self {
            id,
            pos,
            vel: Vec3::ZERO,
            radius: tuning.tomato_size,
            speed_multiplier,
        }
    }

    #[inline]
    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    /// Steer toward `target` (at our own height) and move for `dt` seconds
    ///
    /// When the target sits exactly on top of us there is no direction, so the
    /// enemy holds still for this tick.
    pub fn update(&mut self, target: Vec3, dt: f32, base_speed: f32) {
        let flat_target = Vec3::new(target.x, self.pos.y, target.z);
        let direction = (flat_target - self.pos).normalize_or_zero();

        self.vel = direction * base_speed * self.speed_multiplier;
        self.pos += self.vel * dt;
    }
}
