// Per-player input state management

use super::action::Action;
use std::collections::{HashMap, HashSet};

/// Input state for the local player
#[derive(Debug, Default)]
pub struct PlayerInput {
    /// Analog strength of every action that is currently down, in (0, 1]
    strengths: HashMap<Action, f32>,

    /// Actions that were just pressed this frame (press events)
    just_pressed: HashSet<Action>,

    /// Actions that were just released this frame (release events)
    just_released: HashSet<Action>,

    /// Actions that were down in the previous frame
    previous_pressed: HashSet<Action>,
}

impl PlayerInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently pressed
    pub fn is_pressed(&self, action: Action) -> bool {
        self.strengths.contains_key(&action)
    }

    /// Check if an action was just pressed this frame
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action was just released this frame
    pub fn just_released(&self, action: Action) -> bool {
        self.just_released.contains(&action)
    }

    /// Check if an action is held (pressed for multiple frames)
    pub fn is_held(&self, action: Action) -> bool {
        self.is_pressed(action) && self.previous_pressed.contains(&action)
    }

    /// Current strength of an action (0.0 when released)
    pub fn strength(&self, action: Action) -> f32 {
        self.strengths.get(&action).copied().unwrap_or(0.0)
    }

    /// Register a digital press
    pub fn press(&mut self, action: Action) {
        self.set_strength(action, 1.0);
    }

    /// Register a digital release
    pub fn release(&mut self, action: Action) {
        self.set_strength(action, 0.0);
    }

    /// Set an analog strength, clamped to `[0, 1]`.
    /// Rising from zero counts as a press, falling to zero as a release.
    pub fn set_strength(&mut self, action: Action, strength: f32) {
        let strength = if strength.is_nan() {
            0.0
        } else {
            strength.clamp(0.0, 1.0)
        };
        let was_down = self.is_pressed(action);

        if strength > 0.0 {
            if !was_down {
                self.just_pressed.insert(action);
            }
            self.strengths.insert(action, strength);
        } else if was_down {
            self.strengths.remove(&action);
            self.just_released.insert(action);
        }
    }

    /// Update input state for a new frame
    /// Call this once per frame after the frame's updates have consumed input
    pub fn update(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
        self.previous_pressed = self.strengths.keys().copied().collect();
    }

    /// Reset all input state
    pub fn reset(&mut self) {
        self.strengths.clear();
        self.just_pressed.clear();
        self.just_released.clear();
        self.previous_pressed.clear();
    }

    /// Get all currently pressed actions
    pub fn get_pressed_actions(&self) -> Vec<Action> {
        self.strengths.keys().copied().collect()
    }
}
