// Input handling system
//
// Keyboard and mouse input for the local player, with remappable bindings
// and per-frame edge detection.
//
// ## Architecture
//
// - `action`: Game actions, physical sources, default bindings and the
//   `ActionInput` view consumed by gameplay code
// - `player`: Per-frame action state (strengths and edges)
// - `config`: Binding configuration and remapping
// - `manager`: Feeds winit events into the action state
//
// ## Usage Example
//
// ```rust
// use engine::input::{Action, ActionInput, InputManager};
//
// let mut input = InputManager::new();
//
// // In your event loop
// input.process_keyboard_event(&key_event);
//
// // During the fixed update
// if input.is_action_just_pressed(Action::Roll) {
//     // Roll!
// }
//
// // After all updates for the frame
// input.update();
// ```

pub mod action;
pub mod config;
pub mod manager;
pub mod player;

// Re-export commonly used types
pub use action::{Action, ActionInput, InputSource};
pub use config::InputConfig;
pub use manager::InputManager;
pub use player::PlayerInput;
