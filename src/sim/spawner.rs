//! Time-gated enemy spawning along the arena edges
//!
//! Difficulty feeds in three ways: shorter spawn interval, more enemies per
//! spawn event, and a faster speed multiplier for newly spawned enemies.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::{Enemy, IdAllocator};
use crate::tuning::Tuning;

/// Arena edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    North,
    East,
    South,
    West,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::North, Edge::East, Edge::South, Edge::West];

    /// Point on this edge, `inset` is the fixed perpendicular coordinate and
    /// `along` the coordinate parallel to the edge
    pub fn point(self, inset: f32, along: f32) -> Vec3 {
        match self {
            Edge::North => Vec3::new(along, 0.0, inset),
            Edge::East => Vec3::new(inset, 0.0, along),
            Edge::South => Vec3::new(along, 0.0, -inset),
            Edge::West => Vec3::new(-inset, 0.0, along),
        }
    }
}

/// Enemies created per spawn event at `level`, capped at `cap`
#[inline]
pub fn spawn_count(level: u32, cap: u32) -> u32 {
    (level / 2 + 1).min(cap)
}

/// Speed multiplier assigned to enemies spawned at `level`
#[inline]
pub fn speed_multiplier(level: u32, step: f32) -> f32 {
    1.0 + level.saturating_sub(1) as f32 * step
}

/// Spawn interval for `level`: base * decay^(level-1), floored
pub fn spawn_rate_for_level(level: u32, tuning: &Tuning) -> f64 {
    let exponent = level.saturating_sub(1).min(i32::MAX as u32) as i32;
    let rate = tuning.spawn_rate_ms as f64 * tuning.spawn_rate_decay.powi(exponent);
    rate.max(tuning.min_spawn_rate_ms as f64)
}

/// Enemy spawner for one game session
#[derive(Debug, Clone)]
pub struct Spawner {
    rng: Pcg32,
    /// None until the first spawn, so a fresh session spawns immediately
    last_spawn_ms: Option<u64>,
    spawn_rate_ms: f64,
    level: u32,
}

impl Spawner {
    pub fn new(tuning: &Tuning, seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            last_spawn_ms: None,
            spawn_rate_ms: spawn_rate_for_level(1, tuning),
            level: 1,
        }
    }

    /// Return to level 1 with a freshly seeded RNG
    pub fn reset(&mut self, tuning: &Tuning, seed: u64) {
        *self = Self::new(tuning, seed);
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn spawn_rate_ms(&self) -> f64 {
        self.spawn_rate_ms
    }

    pub fn last_spawn_ms(&self) -> Option<u64> {
        self.last_spawn_ms
    }

    /// Apply a difficulty level; recomputed from the base rate, so repeated
    /// calls with the same level are idempotent
    pub fn set_level(&mut self, level: u32, tuning: &Tuning) {
        self.level = level.max(1);
        self.spawn_rate_ms = spawn_rate_for_level(self.level, tuning);
        log::info!(
            "Difficulty level {}, spawn rate {:.0}ms",
            self.level,
            self.spawn_rate_ms
        );
    }

    /// Spawn a wave of enemies if the spawn interval has passed
    pub fn maybe_spawn(&mut self, now_ms: u64, tuning: &Tuning, ids: &mut IdAllocator) -> Vec<Enemy> {
        let due = match self.last_spawn_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) as f64 > self.spawn_rate_ms,
        };
        if !due {
            return Vec::new();
        }
        self.last_spawn_ms = Some(now_ms);

        let count = spawn_count(self.level, tuning.max_spawn_per_event);
        let multiplier = speed_multiplier(self.level, tuning.speed_step_per_level);
        let enemies: Vec<Enemy> = (0..count)
            .map(|_| {
                let pos = self.edge_position(tuning);
                Enemy::new(ids.next_id(), pos, multiplier, tuning)
            })
            .collect();

        log::debug!("{} enemies spawned at level {}", enemies.len(), self.level);
        enemies
    }

    /// Random point just inside one of the four edges
    fn edge_position(&mut self, tuning: &Tuning) -> Vec3 {
        let half = tuning.half_extent();
        let edge = Edge::ALL[self.rng.random_range(0..Edge::ALL.len())];
        let along = self.rng.random_range(-half..half);
        edge.point(half - tuning.spawn_margin, along)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_count_grows_and_caps() {
        assert_eq!(spawn_count(1, 4), 1);
        assert_eq!(spawn_count(2, 4), 2);
        assert_eq!(spawn_count(3, 4), 2);
        assert_eq!(spawn_count(4, 4), 3);
        assert_eq!(spawn_count(6, 4), 4);
        assert_eq!(spawn_count(10, 4), 4);
    }

    #[test]
    fn test_speed_multiplier_per_level() {
        assert_eq!(speed_multiplier(1, 0.3), 1.0);
        assert!((speed_multiplier(2, 0.3) - 1.3).abs() < 1e-6);
        assert!((speed_multiplier(5, 0.3) - 2.2).abs() < 1e-6);
    }

    #[test]
    fn test_spawn_rate_decays_to_floor() {
        let tuning = Tuning::default();
        assert_eq!(spawn_rate_for_level(1, &tuning), 3000.0);
        assert!((spawn_rate_for_level(2, &tuning) - 2400.0).abs() < 1e-6);
        assert!((spawn_rate_for_level(3, &tuning) - 1920.0).abs() < 1e-6);
        assert_eq!(spawn_rate_for_level(10, &tuning), 500.0);
        assert_eq!(spawn_rate_for_level(100, &tuning), 500.0);
    }

    #[test]
    fn test_set_level_is_idempotent() {
        let tuning = Tuning::default();
        let mut spawner = Spawner::new(&tuning, 1);
        spawner.set_level(3, &tuning);
        let once = spawner.spawn_rate_ms();
        spawner.set_level(3, &tuning);
        assert_eq!(spawner.spawn_rate_ms(), once);
        assert_eq!(spawner.level(), 3);
    }

    #[test]
    fn test_first_call_spawns_then_waits() {
        let tuning = Tuning::default();
        let mut spawner = Spawner::new(&tuning, 7);
        let mut ids = IdAllocator::default();

        assert_eq!(spawner.maybe_spawn(0, &tuning, &mut ids).len(), 1);
        assert_eq!(spawner.last_spawn_ms(), Some(0));

        // Strictly greater than the interval is required
        assert!(spawner.maybe_spawn(3000, &tuning, &mut ids).is_empty());
        assert_eq!(spawner.maybe_spawn(3001, &tuning, &mut ids).len(), 1);
        assert_eq!(spawner.last_spawn_ms(), Some(3001));
    }

    #[test]
    fn test_spawned_enemies_on_edges() {
        let tuning = Tuning::default();
        let mut spawner = Spawner::new(&tuning, 42);
        spawner.set_level(8, &tuning);
        let mut ids = IdAllocator::default();
        let inset = tuning.half_extent() - tuning.spawn_margin;

        let mut now = 0;
        for _ in 0..50 {
            for enemy in spawner.maybe_spawn(now, &tuning, &mut ids) {
                let on_x_edge = (enemy.pos.x.abs() - inset).abs() < 1e-4;
                let on_z_edge = (enemy.pos.z.abs() - inset).abs() < 1e-4;
                assert!(on_x_edge || on_z_edge, "off edge: {:?}", enemy.pos);
                assert!(enemy.pos.x.abs() <= tuning.half_extent());
                assert!(enemy.pos.z.abs() <= tuning.half_extent());
                assert_eq!(enemy.pos.y, 0.0);
                assert!((enemy.speed_multiplier() - 3.1).abs() < 1e-5);
            }
            now += 1000;
        }
    }

    #[test]
    fn test_same_seed_same_positions() {
        let tuning = Tuning::default();
        let mut a = Spawner::new(&tuning, 99);
        let mut b = Spawner::new(&tuning, 99);
        let mut ids_a = IdAllocator::default();
        let mut ids_b = IdAllocator::default();

        assert_eq!(
            a.maybe_spawn(0, &tuning, &mut ids_a),
            b.maybe_spawn(0, &tuning, &mut ids_b)
        );
    }

    #[test]
    fn test_reset_restores_level_one() {
        let tuning = Tuning::default();
        let mut spawner = Spawner::new(&tuning, 3);
        spawner.set_level(6, &tuning);
        spawner.maybe_spawn(100, &tuning, &mut IdAllocator::default());

        spawner.reset(&tuning, 3);
        assert_eq!(spawner.level(), 1);
        assert_eq!(spawner.spawn_rate_ms(), 3000.0);
        assert_eq!(spawner.last_spawn_ms(), None);
    }
}
