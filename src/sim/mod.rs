//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Timestamps come from the caller, read once per tick
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod world;

pub use collision::{HitReport, ProjectileHit, horizontal_overlap, resolve, spheres_overlap};
pub use entity::{Enemy, IdAllocator, Projectile};
pub use spawner::{Edge, Spawner, spawn_count, spawn_rate_for_level, speed_multiplier};
pub use state::{GameEvent, GameState, GameStatus, Hud, RemovalCause};
pub use tick::{Shot, TickInput, tick};
pub use world::World;
