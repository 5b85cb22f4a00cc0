//! First-person player controller
//!
//! Lives on the input side of the simulation: turns held movement keys and a
//! facing direction into a position. The simulation only reads the result.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::sim::Shot;
use crate::tuning::Tuning;

/// Camera height above the ground plane
pub const EYE_HEIGHT: f32 = 1.6;

/// Movement keys held this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveIntent {
    pub fn is_idle(&self) -> bool {
        !(self.forward || self.backward || self.left || self.right)
    }
}

/// Player position and momentum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerController {
    pub pos: Vec3,
    pub vel: Vec3,
}

impl Default for PlayerController {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, EYE_HEIGHT, 0.0))
    }
}

impl PlayerController {
    pub fn new(pos: Vec3) -> Self {
        Self { pos, vel: Vec3::ZERO }
    }

    /// Apply friction and input for `dt` seconds, then clamp to the arena
    ///
    /// `facing` is the camera look direction; only its horizontal part steers.
    pub fn update(&mut self, intent: &MoveIntent, facing: Vec3, dt: f32, tuning: &Tuning) {
        self.vel.x -= self.vel.x * tuning.player_friction * dt;
        self.vel.z -= self.vel.z * tuning.player_friction * dt;

        let right = facing.cross(Vec3::Y).normalize_or_zero();
        let right = Vec3::new(right.x, 0.0, right.z);
        let forward = Vec3::new(facing.x, 0.0, facing.z).normalize_or_zero();

        let accel = tuning.player_speed * dt;
        if intent.forward {
            self.vel += forward * accel;
        }
        if intent.backward {
            self.vel -= forward * accel;
        }
        if intent.left {
            self.vel -= right * accel;
        }
        if intent.right {
            self.vel += right * accel;
        }

        self.pos.x += self.vel.x * dt;
        self.pos.z += self.vel.z * dt;

        let bound = tuning.half_extent() - tuning.player_edge_margin;
        self.pos.x = self.pos.x.clamp(-bound, bound);
        self.pos.z = self.pos.z.clamp(-bound, bound);
    }

    /// Shoot event from the eye along `facing`
    pub fn shot(&self, facing: Vec3) -> Shot {
        Shot {
            origin: self.pos,
            direction: facing.normalize_or_zero(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_forward_follows_facing() {
        let tuning = Tuning::default();
        let mut player = PlayerController::default();
        let intent = MoveIntent {
            forward: true,
            ..Default::default()
        };
        // Looking down and along -Z: movement stays on the ground plane
        let facing = Vec3::new(0.0, -0.5, -1.0).normalize();
        for _ in 0..30 {
            player.update(&intent, facing, DT, &tuning);
        }
        assert!(player.pos.z < -0.1);
        assert!(player.pos.x.abs() < 1e-4);
        assert_eq!(player.pos.y, EYE_HEIGHT);
    }

    #[test]
    fn test_strafe_right() {
        let tuning = Tuning::default();
        let mut player = PlayerController::default();
        let intent = MoveIntent {
            right: true,
            ..Default::default()
        };
        // Facing -Z, right is +X
        for _ in 0..30 {
            player.update(&intent, Vec3::NEG_Z, DT, &tuning);
        }
        assert!(player.pos.x > 0.1);
        assert!(player.pos.z.abs() < 1e-4);
    }

    #[test]
    fn test_friction_slows_to_rest() {
        let tuning = Tuning::default();
        let mut player = PlayerController::default();
        player.vel = Vec3::new(10.0, 0.0, 0.0);
        for _ in 0..600 {
            player.update(&MoveIntent::default(), Vec3::NEG_Z, DT, &tuning);
        }
        assert!(player.vel.x.abs() < 1e-3);
    }

    #[test]
    fn test_clamped_inside_arena() {
        let tuning = Tuning::default();
        let mut player = PlayerController::default();
        let intent = MoveIntent {
            forward: true,
            ..Default::default()
        };
        for _ in 0..2000 {
            player.update(&intent, Vec3::X, DT, &tuning);
        }
        let bound = tuning.half_extent() - tuning.player_edge_margin;
        assert_eq!(player.pos.x, bound);
        assert!(!crate::outside_arena(player.pos, tuning.half_extent()));
    }

    #[test]
    fn test_shot_normalizes_direction() {
        let player = PlayerController::default();
        let shot = player.shot(Vec3::new(0.0, 0.0, -3.0));
        assert_eq!(shot.origin, player.pos);
        assert!((shot.direction.length() - 1.0).abs() < 1e-6);
        assert!(MoveIntent::default().is_idle());
    }
}
