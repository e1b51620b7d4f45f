// Contracts the player core expects from the runtime hosting it
//
// The core never owns the animation engine, the physics world, the health
// store or the scene. It talks to them through these traits, and they talk
// back by delivering `PlayerEvent`s.

use glam::Vec2;

pub use crate::engine::input::ActionInput;

/// Collision-aware mover (slides along obstacles)
pub trait Mover {
    /// Move by `velocity * dt`, returning the velocity actually achieved
    fn move_and_slide(&mut self, velocity: Vec2, dt: f32) -> Vec2;
}

/// Blend-tree animation engine
pub trait AnimationTree {
    /// Write the 2D blend position of a blend-space node
    fn set_blend_position(&mut self, node: &str, position: Vec2);

    /// Ask the state machine to travel to a node. Safe to call every frame.
    fn travel(&mut self, node: &str);
}

/// Animation player that runs the hit blink
pub trait BlinkPlayer {
    fn play(&mut self, animation: &str);
}

/// Hurtbox that owns the invincibility window
pub trait Hurtbox {
    /// Start (or restart) the invincibility window
    fn start_invincibility(&mut self, duration: f32);

    /// Spawn the one-shot hit effect at the hurtbox
    fn create_hit_effect(&mut self);
}

/// Externally owned health
pub trait HealthStore {
    fn health(&self) -> i32;
    fn set_health(&mut self, health: i32);
}

/// Scene that can host transient effects
pub trait EffectHost {
    /// Spawn the hurt sound under the scene root, so it outlives the player
    fn spawn_hurt_sound(&mut self);
}

/// Everything the player reacts through, borrowed for one update or event
pub struct PlayerHost<'a> {
    pub animation: &'a mut dyn AnimationTree,
    pub blink: &'a mut dyn BlinkPlayer,
    pub hurtbox: &'a mut dyn Hurtbox,
    pub stats: &'a mut dyn HealthStore,
    pub effects: &'a mut dyn EffectHost,
}
