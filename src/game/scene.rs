// Scene root: owns transient effects independently of the entities that spawned them

use glam::Vec2;

use super::player::EffectHost;

/// One-shot effects the scene can host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    HurtSound,
    HitEffect,
}

impl EffectKind {
    /// How long the effect lives before freeing itself (seconds)
    pub fn lifetime(&self) -> f32 {
        match self {
            EffectKind::HurtSound => 0.6,
            EffectKind::HitEffect => 0.4,
        }
    }
}

/// A transient effect living under the scene root
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Effect {
    pub kind: EffectKind,
    pub position: Vec2,
    pub remaining: f32,
}

#[derive(Debug, Default)]
pub struct SceneRoot {
    effects: Vec<Effect>,
    /// Where effects spawned without an explicit position appear
    anchor: Vec2,
}

impl SceneRoot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the position used by `EffectHost` spawns
    pub fn set_anchor(&mut self, anchor: Vec2) {
        self.anchor = anchor;
    }

    pub fn spawn(&mut self, kind: EffectKind, position: Vec2) {
        log::debug!("Spawning {:?} at {}", kind, position);
        self.effects.push(Effect {
            kind,
            position,
            remaining: kind.lifetime(),
        });
    }

    /// Age every effect and free the expired ones
    pub fn update(&mut self, dt: f32) {
        for effect in &mut self.effects {
            effect.remaining -= dt;
        }
        self.effects.retain(|effect| effect.remaining > 0.0);
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    pub fn count(&self, kind: EffectKind) -> usize {
        self.effects.iter().filter(|effect| effect.kind == kind).count()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }
}

impl EffectHost for SceneRoot {
    fn spawn_hurt_sound(&mut self) {
        self.spawn(EffectKind::HurtSound, self.anchor);
    }
}
