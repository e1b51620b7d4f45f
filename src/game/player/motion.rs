// Motion integrator: intent in, velocity out

use glam::Vec2;

use super::stats::Tunables;
use crate::core::math::move_toward;

/// Share of roll speed kept when a roll ends, so the player glides out of it
pub const ROLL_EXIT_DAMPING: f32 = 0.8;

/// Velocity plus the direction the next roll will take
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionState {
    pub velocity: Vec2,
    /// Last non-zero input direction, frozen for the duration of a roll
    pub roll_vector: Vec2,
}

impl Default for MotionState {
    fn default() -> Self {
        Self {
            velocity: Vec2::ZERO,
            // Sprites face the camera (down the screen) at spawn
            roll_vector: Vec2::Y,
        }
    }
}

impl MotionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build speed toward `intent * max_speed`
    pub fn accelerate(&mut self, intent: Vec2, tunables: &Tunables, dt: f32) {
        self.velocity = move_toward(
            self.velocity,
            intent * tunables.max_speed,
            tunables.acceleration * dt,
        );
    }

    /// Bleed speed toward rest
    pub fn apply_friction(&mut self, tunables: &Tunables, dt: f32) {
        self.velocity = move_toward(self.velocity, Vec2::ZERO, tunables.friction * dt);
    }

    /// Constant-speed roll along the frozen roll vector
    pub fn roll(&mut self, tunables: &Tunables) {
        self.velocity = self.roll_vector * tunables.roll_speed;
    }

    pub fn finish_roll(&mut self) {
        self.velocity *= ROLL_EXIT_DAMPING;
    }

    pub fn stop(&mut self) {
        self.velocity = Vec2::ZERO;
    }
}

/// Normalized movement intent from two opposed axes
pub fn intent_from_axes(right: f32, left: f32, down: f32, up: f32) -> Vec2 {
    Vec2::new(right - left, down - up).normalize_or_zero()
}
