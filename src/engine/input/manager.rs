// Input manager - turns window events into action state

use super::action::{Action, ActionInput, InputSource};
use super::config::InputConfig;
use super::player::PlayerInput;
use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::PhysicalKey;

/// Coordinates bindings and per-frame action state for the local player
#[derive(Debug)]
pub struct InputManager {
    config: InputConfig,
    player: PlayerInput,
    /// Physical sources currently down
    held: HashSet<InputSource>,
}

impl InputManager {
    /// Create an input manager with the default bindings
    pub fn new() -> Self {
        Self::with_config(InputConfig::with_defaults())
    }

    /// Create an input manager with custom bindings
    pub fn with_config(config: InputConfig) -> Self {
        Self {
            config,
            player: PlayerInput::new(),
            held: HashSet::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(key_code) = event.physical_key {
            // Key repeats are not new presses
            if event.repeat {
                return;
            }
            self.apply(InputSource::key(key_code), event.state);
        }
    }

    /// Process a mouse button event from winit
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        self.apply(InputSource::mouse(button), state);
    }

    fn apply(&mut self, source: InputSource, state: ElementState) {
        let Some(action) = self.config.get_action(source) else {
            return;
        };
        match state {
            ElementState::Pressed => {
                self.held.insert(source);
                self.player.press(action);
            }
            ElementState::Released => {
                self.held.remove(&source);
                // The action stays down while any other source for it is held
                let still_held = self
                    .held
                    .iter()
                    .any(|held| self.config.get_action(*held) == Some(action));
                if !still_held {
                    self.player.release(action);
                }
            }
        }
    }

    /// Clear per-frame edges. Call once per frame after all updates ran.
    pub fn update(&mut self) {
        self.player.update();
    }

    /// Get the action state
    pub fn player(&self) -> &PlayerInput {
        &self.player
    }

    /// Get mutable action state (analog sources, scripted input)
    pub fn player_mut(&mut self) -> &mut PlayerInput {
        &mut self.player
    }

    /// Get the bindings
    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    /// Get mutable bindings
    pub fn config_mut(&mut self) -> &mut InputConfig {
        &mut self.config
    }

    /// Reset all action state
    pub fn reset(&mut self) {
        self.player.reset();
        self.held.clear();
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionInput for InputManager {
    fn action_strength(&self, action: Action) -> f32 {
        if !self.has_action(action) {
            return 0.0;
        }
        self.player.strength(action)
    }

    fn is_action_just_pressed(&self, action: Action) -> bool {
        self.has_action(action) && self.player.just_pressed(action)
    }

    fn has_action(&self, action: Action) -> bool {
        self.config.has_binding(action)
    }
}
