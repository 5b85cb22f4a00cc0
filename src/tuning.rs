//! Game balance and arena constants
//!
//! Loaded from JSON so balance can change without a rebuild. Every field has
//! a default, so a partial file only overrides what it names.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating tuning
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Tunable constants consumed by the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    /// Side length of the square arena centered at the origin
    pub map_size: f32,
    /// Distance inside the boundary at which enemies spawn
    pub spawn_margin: f32,

    // === Player ===
    /// Acceleration applied per second of held movement input
    pub player_speed: f32,
    /// Velocity damping factor per second
    pub player_friction: f32,
    /// Player movement is clamped this far inside the boundary
    pub player_edge_margin: f32,
    pub player_lives: u32,
    /// Horizontal radius used for enemy contact
    pub player_collision_radius: f32,

    // === Projectiles ===
    pub projectile_speed: f32,
    /// Collision radius of a projectile
    pub projectile_size: f32,
    pub projectile_lifetime_ms: u64,

    // === Enemies ===
    /// Base chase speed before the per-level multiplier
    pub tomato_speed: f32,
    /// Collision radius of an enemy
    pub tomato_size: f32,

    // === Difficulty ===
    /// Spawn interval at level 1
    pub spawn_rate_ms: u64,
    /// Spawn interval never drops below this
    pub min_spawn_rate_ms: u64,
    /// Spawn interval is multiplied by this per level
    pub spawn_rate_decay: f64,
    /// Enemy speed multiplier gained per level
    pub speed_step_per_level: f32,
    /// Cap on enemies created by one spawn event
    pub max_spawn_per_event: u32,
    /// Session time needed per level
    pub difficulty_interval_ms: u64,
    pub max_difficulty: u32,

    pub score_per_kill: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            map_size: 100.0,
            spawn_margin: 2.0,

            player_speed: 100.0,
            player_friction: 5.0,
            player_edge_margin: 2.0,
            player_lives: 3,
            player_collision_radius: 2.0,

            projectile_speed: 50.0,
            projectile_size: 0.5,
            projectile_lifetime_ms: 2000,

            tomato_speed: 5.0,
            tomato_size: 1.5,

            spawn_rate_ms: 3000,
            min_spawn_rate_ms: 500,
            spawn_rate_decay: 0.8,
            speed_step_per_level: 0.3,
            max_spawn_per_event: 4,
            difficulty_interval_ms: 30_000,
            max_difficulty: 10,

            score_per_kill: 10,
        }
    }
}

impl Tuning {
    /// Parse tuning from a JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("map_size", self.map_size),
            ("player_collision_radius", self.player_collision_radius),
            ("projectile_speed", self.projectile_speed),
            ("projectile_size", self.projectile_size),
            ("tomato_speed", self.tomato_speed),
            ("tomato_size", self.tomato_size),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }
        if self.spawn_margin < 0.0 || self.spawn_margin >= self.half_extent() {
            return Err(TuningError::Invalid(format!(
                "spawn_margin must lie in [0, {}), got {}",
                self.half_extent(),
                self.spawn_margin
            )));
        }
        if self.player_lives == 0 {
            return Err(TuningError::Invalid("player_lives must be at least 1".into()));
        }
        if self.max_difficulty == 0 {
            return Err(TuningError::Invalid("max_difficulty must be at least 1".into()));
        }
        if self.max_spawn_per_event == 0 {
            return Err(TuningError::Invalid("max_spawn_per_event must be at least 1".into()));
        }
        if self.difficulty_interval_ms == 0 {
            return Err(TuningError::Invalid("difficulty_interval_ms must be non-zero".into()));
        }
        if !(self.spawn_rate_decay > 0.0 && self.spawn_rate_decay <= 1.0) {
            return Err(TuningError::Invalid(format!(
                "spawn_rate_decay must lie in (0, 1], got {}",
                self.spawn_rate_decay
            )));
        }
        if self.min_spawn_rate_ms > self.spawn_rate_ms {
            return Err(TuningError::Invalid(format!(
                "min_spawn_rate_ms ({}) exceeds spawn_rate_ms ({})",
                self.min_spawn_rate_ms, self.spawn_rate_ms
            )));
        }
        Ok(())
    }

    /// Half the arena side: the bound on |x| and |z|
    #[inline]
    pub fn half_extent(&self) -> f32 {
        self.map_size / 2.0
    }
}
