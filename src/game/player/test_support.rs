// Recording fakes for the player's collaborators

use std::collections::{HashMap, HashSet};

use glam::Vec2;

use super::host::{
    ActionInput, AnimationTree, BlinkPlayer, EffectHost, HealthStore, Hurtbox, Mover, PlayerHost,
};
use crate::engine::input::Action;

#[derive(Debug, Default)]
pub struct FakeInput {
    pub strengths: HashMap<Action, f32>,
    pub just_pressed: HashSet<Action>,
    pub unregistered: HashSet<Action>,
}

impl FakeInput {
    pub fn hold(&mut self, action: Action) {
        self.strengths.insert(action, 1.0);
    }

    pub fn tap(&mut self, action: Action) {
        self.just_pressed.insert(action);
    }

    /// End of frame: edges are consumed, holds stay
    pub fn next_frame(&mut self) {
        self.just_pressed.clear();
    }

    pub fn release_all(&mut self) {
        self.strengths.clear();
        self.just_pressed.clear();
    }
}

impl ActionInput for FakeInput {
    fn action_strength(&self, action: Action) -> f32 {
        if !self.has_action(action) {
            return 0.0;
        }
        self.strengths.get(&action).copied().unwrap_or(0.0)
    }

    fn is_action_just_pressed(&self, action: Action) -> bool {
        self.has_action(action) && self.just_pressed.contains(&action)
    }

    fn has_action(&self, action: Action) -> bool {
        !self.unregistered.contains(&action)
    }
}

#[derive(Debug, Default)]
pub struct FakeMover {
    pub moves: Vec<Vec2>,
}

impl Mover for FakeMover {
    fn move_and_slide(&mut self, velocity: Vec2, _dt: f32) -> Vec2 {
        self.moves.push(velocity);
        velocity
    }
}

#[derive(Debug, Default)]
pub struct FakeAnimation {
    pub blend: HashMap<String, Vec2>,
    pub travels: Vec<String>,
}

impl FakeAnimation {
    pub fn last_travel(&self) -> Option<&str> {
        self.travels.last().map(String::as_str)
    }
}

impl AnimationTree for FakeAnimation {
    fn set_blend_position(&mut self, node: &str, position: Vec2) {
        self.blend.insert(node.to_string(), position);
    }

    fn travel(&mut self, node: &str) {
        self.travels.push(node.to_string());
    }
}

#[derive(Debug, Default)]
pub struct FakeBlink {
    pub played: Vec<String>,
}

impl BlinkPlayer for FakeBlink {
    fn play(&mut self, animation: &str) {
        self.played.push(animation.to_string());
    }
}

#[derive(Debug, Default)]
pub struct FakeHurtbox {
    pub starts: Vec<f32>,
    pub hit_effects: usize,
}

impl Hurtbox for FakeHurtbox {
    fn start_invincibility(&mut self, duration: f32) {
        self.starts.push(duration);
    }

    fn create_hit_effect(&mut self) {
        self.hit_effects += 1;
    }
}

#[derive(Debug, Default)]
pub struct FakeStats {
    pub health: i32,
}

impl HealthStore for FakeStats {
    fn health(&self) -> i32 {
        self.health
    }

    fn set_health(&mut self, health: i32) {
        self.health = health;
    }
}

#[derive(Debug, Default)]
pub struct FakeEffects {
    pub hurt_sounds: usize,
}

impl EffectHost for FakeEffects {
    fn spawn_hurt_sound(&mut self) {
        self.hurt_sounds += 1;
    }
}

/// All fakes in one place, lent out as a `PlayerHost`
#[derive(Debug, Default)]
pub struct FakeHost {
    pub animation: FakeAnimation,
    pub blink: FakeBlink,
    pub hurtbox: FakeHurtbox,
    pub stats: FakeStats,
    pub effects: FakeEffects,
}

impl FakeHost {
    pub fn with_health(health: i32) -> Self {
        Self {
            stats: FakeStats { health },
            ..Self::default()
        }
    }

    pub fn host(&mut self) -> PlayerHost<'_> {
        PlayerHost {
            animation: &mut self.animation,
            blink: &mut self.blink,
            hurtbox: &mut self.hurtbox,
            stats: &mut self.stats,
            effects: &mut self.effects,
        }
    }
}
