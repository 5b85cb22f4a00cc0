//! Tomato Rush - an arena shooter simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, spawning, collisions, game state)
//! - `player`: Input-side player controller (movement, shooting)
//! - `tuning`: Data-driven game balance

pub mod player;
pub mod sim;
pub mod tuning;

pub use player::{MoveIntent, PlayerController};
pub use tuning::{Tuning, TuningError};

use glam::{Vec2, Vec3};

/// Game loop constants
pub mod consts {
    /// Fixed simulation timestep (100 Hz)
    pub const SIM_DT: f32 = 0.01;
    /// Same timestep in whole milliseconds, for the tick clock
    pub const SIM_DT_MS: u64 = 10;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
}

/// Project a world position onto the ground plane (x, z)
#[inline]
pub fn horizontal(pos: Vec3) -> Vec2 {
    Vec2::new(pos.x, pos.z)
}

/// Whether a position lies outside the square arena of the given half extent
#[inline]
pub fn outside_arena(pos: Vec3, half_extent: f32) -> bool {
    pos.x.abs() > half_extent || pos.z.abs() > half_extent
}
