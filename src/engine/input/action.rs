// Game action definitions and mappings

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement (y grows downward, like screen space)
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,

    // Combat
    Roll,
    Attack,

    // Meta actions
    Pause,
}

/// Represents an input source (keyboard key or mouse button)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
    Mouse(MouseButton),
}

impl InputSource {
    /// Create a keyboard input source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }

    /// Create a mouse button input source
    pub fn mouse(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

/// Read-only view of action state, as consumed by the player controller.
///
/// Actions without any binding behave as if never pressed: strength is 0 and
/// no edge is ever reported.
pub trait ActionInput {
    /// Analog strength of an action in `[0, 1]`
    fn action_strength(&self, action: Action) -> f32;

    /// Whether the action went down this frame
    fn is_action_just_pressed(&self, action: Action) -> bool;

    /// Whether the action is registered in the input configuration
    fn has_action(&self, action: Action) -> bool;
}

/// Default keyboard/mouse bindings
pub fn default_bindings() -> Vec<(InputSource, Action)> {
    vec![
        // Arrows
        (InputSource::key(KeyCode::ArrowLeft), Action::MoveLeft),
        (InputSource::key(KeyCode::ArrowRight), Action::MoveRight),
        (InputSource::key(KeyCode::ArrowUp), Action::MoveUp),
        (InputSource::key(KeyCode::ArrowDown), Action::MoveDown),
        // WASD
        (InputSource::key(KeyCode::KeyA), Action::MoveLeft),
        (InputSource::key(KeyCode::KeyD), Action::MoveRight),
        (InputSource::key(KeyCode::KeyW), Action::MoveUp),
        (InputSource::key(KeyCode::KeyS), Action::MoveDown),
        // Combat
        (InputSource::key(KeyCode::Space), Action::Roll),
        (InputSource::key(KeyCode::KeyJ), Action::Attack),
        (InputSource::mouse(MouseButton::Left), Action::Attack),
        // Meta
        (InputSource::key(KeyCode::Escape), Action::Pause),
        (InputSource::key(KeyCode::KeyP), Action::Pause),
    ]
}
