//! The world: sole owner of every entity collection in a session
//!
//! Other components get read-only slices or hand back new entities; only the
//! world (and the tick that drives it) mutates the collections.

use glam::Vec3;

use super::entity::{Enemy, IdAllocator, Projectile};
use super::spawner::{Spawner, speed_multiplier};
use super::state::{GameEvent, GameState, Hud, RemovalCause};
use crate::tuning::Tuning;

/// One game session
#[derive(Debug, Clone)]
pub struct World {
    pub(super) tuning: Tuning,
    /// Session seed, reused by `reset`
    seed: u64,
    pub(super) state: GameState,
    pub(super) spawner: Spawner,
    /// Live enemies, in id order
    pub(super) enemies: Vec<Enemy>,
    /// Live projectiles, in id order
    pub(super) projectiles: Vec<Projectile>,
    pub(super) ids: IdAllocator,
    /// Notifications not yet collected by collaborators
    events: Vec<GameEvent>,
}

impl World {
    /// Start a session at `now_ms`
    ///
    /// `tuning` must already pass [`Tuning::validate`]; [`Tuning::from_json`]
    /// and [`Tuning::load`] check it for you. A non-positive arena leaves the
    /// spawner no edge to place enemies on.
    pub fn new(tuning: Tuning, seed: u64, now_ms: u64) -> Self {
        debug_assert!(
            tuning.validate().is_ok(),
            "World::new given invalid tuning: {:?}",
            tuning.validate()
        );
        log::info!("New session with seed {}", seed);
        Self {
            state: GameState::new(&tuning, now_ms),
            spawner: Spawner::new(&tuning, seed),
            tuning,
            seed,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            ids: IdAllocator::default(),
            events: Vec::new(),
        }
    }

    /// Throw away everything and start over with the same seed
    pub fn reset(&mut self, now_ms: u64) {
        log::info!("Session reset (seed {})", self.seed);
        self.state.reset(&self.tuning, now_ms);
        self.spawner.reset(&self.tuning, self.seed);
        self.enemies.clear();
        self.projectiles.clear();
        self.ids = IdAllocator::default();
        self.events.clear();
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn hud(&self) -> Hud {
        self.state.hud()
    }

    pub fn spawner(&self) -> &Spawner {
        &self.spawner
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    /// Pending notifications, oldest first
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Hand pending notifications to the caller
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Fire a projectile; ignored once the run is over
    pub fn shoot(&mut self, origin: Vec3, direction: Vec3, now_ms: u64) -> Option<u32> {
        if self.state.is_game_over() {
            return None;
        }
        let id = self.ids.next_id();
        self.projectiles
            .push(Projectile::new(id, origin, direction, now_ms, &self.tuning));
        self.events.push(GameEvent::ProjectileFired { id });
        log::debug!("Projectile {} fired", id);
        Some(id)
    }

    /// Place an enemy directly, with the multiplier of the current level
    ///
    /// For scripted scenarios; regular enemies come from the spawner.
    pub fn spawn_enemy_at(&mut self, pos: Vec3) -> u32 {
        let multiplier = speed_multiplier(self.spawner.level(), self.tuning.speed_step_per_level);
        let id = self.ids.next_id();
        self.add_enemies(vec![Enemy::new(id, pos, multiplier, &self.tuning)]);
        id
    }

    /// Remove an enemy by id; a missing id is a no-op returning false
    pub fn remove_enemy(&mut self, id: u32, cause: RemovalCause) -> bool {
        let Some(index) = self.enemies.iter().position(|e| e.id == id) else {
            return false;
        };
        self.enemies.remove(index);
        self.events.push(GameEvent::EnemyRemoved { id, cause });
        true
    }

    /// Remove a projectile by id; a missing id is a no-op returning false
    pub fn remove_projectile(&mut self, id: u32, cause: RemovalCause) -> bool {
        let Some(index) = self.projectiles.iter().position(|p| p.id == id) else {
            return false;
        };
        self.projectiles.remove(index);
        self.events.push(GameEvent::ProjectileRemoved { id, cause });
        true
    }

    pub(super) fn add_enemies(&mut self, enemies: Vec<Enemy>) {
        self.events
            .extend(enemies.iter().map(|e| GameEvent::EnemySpawned { id: e.id }));
        self.enemies.extend(enemies);
    }

    pub(super) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take a life and emit the matching notifications
    pub(super) fn lose_life(&mut self) {
        if self.state.is_game_over() {
            return;
        }
        let ended = self.state.lose_life();
        self.events.push(GameEvent::LifeLost {
            remaining: self.state.lives(),
        });
        if ended {
            self.events.push(GameEvent::GameOver {
                score: self.state.score(),
                level: self.state.level(),
            });
        }
    }
}
