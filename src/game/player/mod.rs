// Player core
//
// This module contains the player-controlled character and the pieces it
// is wired to:
// - Behavior state machine (move, roll, attack)
// - Motion integration and tunables
// - Damage handling with an invincibility window
// - Animation tree, blink and hurtbox collaborators used by the arena

pub mod animation;
pub mod damage;
pub mod host;
pub mod hurtbox;
pub mod motion;
#[allow(clippy::module_inception)]
pub mod player;
pub mod state;
pub mod stats;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use animation::{AnimationStateMachine, BlinkAnimation};
pub use damage::{HitOutcome, INVINCIBILITY_DURATION};
pub use host::{AnimationTree, BlinkPlayer, EffectHost, HealthStore, Hurtbox, Mover, PlayerHost};
pub use hurtbox::{HurtboxSignal, InvincibilityHurtbox};
pub use player::{Player, PlayerEvent};
pub use state::BehaviorState;
pub use stats::{PlayerStats, StatsSignal, Tunables, PLAYER_TUNABLES};

/// Wiring errors caught when the player is assembled
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SetupError {
    #[error("Animation tree has no node named {0:?}")]
    MissingAnimationNode(String),

    #[error("Tunable {name} must be finite and non-negative, got {value}")]
    InvalidTunable { name: &'static str, value: f32 },

    #[error("Max health must be positive, got {0}")]
    InvalidMaxHealth(i32),
}
