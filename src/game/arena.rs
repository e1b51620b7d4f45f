// Arena: hosts the player, its collaborators and the physics world

use std::collections::HashMap;

use glam::Vec2;

use crate::engine::input::{ActionInput, InputManager};
use crate::engine::physics::{
    presets, ColliderHandle, PhysicsWorld, RigidBodyHandle, Vector,
};

use super::player::animation::{ATTACK, BLEND_NODES, ROLL};
use super::player::{
    AnimationStateMachine, BlinkAnimation, EffectHost, HurtboxSignal, InvincibilityHurtbox,
    Mover, Player, PlayerEvent, PlayerHost, PlayerStats, SetupError, StatsSignal, Tunables,
};
use super::scene::{EffectKind, SceneRoot};

/// Capsule radius of the player's solid collider
const PLAYER_RADIUS: f32 = 4.0;
/// Half length of the capsule's straight segment
const PLAYER_HALF_WIDTH: f32 = 3.0;
/// Hurtbox half extents
const HURTBOX_HALF_EXTENTS: (f32, f32) = (5.0, 7.0);

/// Damage source attached to a hitbox sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hitbox {
    pub damage: i32,
}

/// Concrete collaborators wired to the player at spawn
#[derive(Debug)]
pub struct PlayerRig {
    pub animation: AnimationStateMachine,
    pub blink: BlinkAnimation,
    pub hurtbox: InvincibilityHurtbox,
    pub stats: PlayerStats,
}

impl PlayerRig {
    fn host<'a>(&'a mut self, effects: &'a mut dyn EffectHost) -> PlayerHost<'a> {
        PlayerHost {
            animation: &mut self.animation,
            blink: &mut self.blink,
            hurtbox: &mut self.hurtbox,
            stats: &mut self.stats,
            effects,
        }
    }
}

#[derive(Debug)]
struct PlayerEntity {
    player: Player,
    rig: PlayerRig,
    /// Handle to the player's kinematic body
    body: RigidBodyHandle,
    /// Solid collider swept by the character controller
    collider: ColliderHandle,
    /// Sensor receiving hits
    hurtbox_collider: ColliderHandle,
}

impl PlayerEntity {
    fn handle(&mut self, event: PlayerEvent, effects: &mut dyn EffectHost) {
        let mut host = self.rig.host(effects);
        self.player.handle_event(event, &mut host);
    }

    /// Deliver a hit from `other` if it is a hitbox and the hurtbox is listening
    fn deliver_hit(
        &mut self,
        other: ColliderHandle,
        hitboxes: &HashMap<ColliderHandle, Hitbox>,
        effects: &mut dyn EffectHost,
    ) {
        if !self.rig.hurtbox.is_monitoring() {
            return;
        }
        if let Some(hitbox) = hitboxes.get(&other) {
            self.handle(
                PlayerEvent::AreaEntered {
                    damage: hitbox.damage,
                },
                effects,
            );
        }
    }
}

/// Moves the player's body through the physics world
struct BodyMover<'w> {
    physics: &'w mut PhysicsWorld,
    body: RigidBodyHandle,
    collider: ColliderHandle,
}

impl Mover for BodyMover<'_> {
    fn move_and_slide(&mut self, velocity: Vec2, dt: f32) -> Vec2 {
        let achieved = self.physics.move_character(
            self.body,
            self.collider,
            Vector::new(velocity.x, velocity.y),
            dt,
        );
        to_vec2(achieved)
    }
}

fn to_vec2(v: Vector<f32>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

/// A room with walls, hazards and at most one player
pub struct Arena {
    physics: PhysicsWorld,
    scene: SceneRoot,
    hitboxes: HashMap<ColliderHandle, Hitbox>,
    player: Option<PlayerEntity>,
}

impl Arena {
    pub fn new() -> Self {
        Self {
            physics: PhysicsWorld::new(),
            scene: SceneRoot::new(),
            hitboxes: HashMap::new(),
            player: None,
        }
    }

    /// Add a solid wall centered at (x, y)
    pub fn add_wall(&mut self, x: f32, y: f32, width: f32, height: f32) -> RigidBodyHandle {
        let body = self.physics.add_rigid_body(presets::fixed_body(x, y));
        self.physics
            .add_collider(presets::wall_collider(width, height), body);
        body
    }

    /// Add a static hazard that hurts on contact
    pub fn add_hitbox(
        &mut self,
        x: f32,
        y: f32,
        half_width: f32,
        half_height: f32,
        damage: i32,
    ) -> ColliderHandle {
        let body = self.physics.add_rigid_body(presets::fixed_body(x, y));
        let collider = self
            .physics
            .add_collider(presets::hitbox_sensor(half_width, half_height), body);
        self.hitboxes.insert(collider, Hitbox { damage });
        collider
    }

    /// Wire up a player at (x, y), replacing any existing one.
    /// Fails before touching the world if the setup is invalid.
    pub fn spawn_player(
        &mut self,
        x: f32,
        y: f32,
        tunables: Tunables,
        max_health: i32,
    ) -> Result<(), SetupError> {
        let animation = AnimationStateMachine::with_player_nodes();
        animation.validate(&BLEND_NODES)?;
        let player = Player::new(tunables)?;
        let stats = PlayerStats::new(max_health)?;

        if let Some(previous) = self.player.take() {
            self.physics.remove_rigid_body(previous.body);
        }

        let body = self.physics.add_rigid_body(presets::player_body(x, y));
        let collider = self.physics.add_collider(
            presets::player_collider(PLAYER_RADIUS, PLAYER_HALF_WIDTH),
            body,
        );
        let (half_width, half_height) = HURTBOX_HALF_EXTENTS;
        let hurtbox_collider = self
            .physics
            .add_collider(presets::hurtbox_sensor(half_width, half_height), body);

        self.player = Some(PlayerEntity {
            player,
            rig: PlayerRig {
                animation,
                blink: BlinkAnimation::new(),
                hurtbox: InvincibilityHurtbox::new(),
                stats,
            },
            body,
            collider,
            hurtbox_collider,
        });

        log::info!("Player spawned at ({x}, {y}) with {max_health} health");
        Ok(())
    }

    /// Advance the arena by one fixed step
    pub fn tick(&mut self, dt: f32, input: &dyn ActionInput) {
        self.physics.set_timestep(dt);

        let Some(entity) = self.player.as_mut() else {
            self.physics.step();
            self.physics.drain_collision_events();
            self.scene.update(dt);
            return;
        };

        // Behavior
        let mut mover = BodyMover {
            physics: &mut self.physics,
            body: entity.body,
            collider: entity.collider,
        };
        entity
            .player
            .update(dt, input, &mut mover, &mut entity.rig.animation);

        self.physics.step();
        let collisions = self.physics.drain_collision_events();
        if let Some(position) = self.physics.body_translation(entity.body) {
            self.scene.set_anchor(to_vec2(position));
        }

        // Animation completions
        if let Some(finished) = entity.rig.animation.update(dt) {
            match finished.as_str() {
                ROLL => entity.handle(PlayerEvent::RollAnimationFinished, &mut self.scene),
                ATTACK => entity.handle(PlayerEvent::AttackAnimationFinished, &mut self.scene),
                other => log::trace!("Animation {other} finished with no listener"),
            }
        }

        entity.rig.hurtbox.update(dt);

        // A window that ended this tick is settled before new hits arrive, so
        // a hitbox entering on that same step lands through the rescan
        self.drain_player_signals();

        // Hits from hitboxes that entered the hurtbox this step
        if let Some(entity) = self.player.as_mut() {
            for event in &collisions {
                if let Some(other) = event.started_with(entity.hurtbox_collider) {
                    entity.deliver_hit(other, &self.hitboxes, &mut self.scene);
                }
            }
        }

        self.drain_player_signals();

        if let Some(entity) = self.player.as_mut() {
            entity.rig.blink.update(dt);
        }
        self.scene.update(dt);

        // Deferred removal
        if self
            .player
            .as_ref()
            .is_some_and(|entity| entity.player.is_queued_for_removal())
        {
            if let Some(entity) = self.player.take() {
                self.physics.remove_rigid_body(entity.body);
                log::info!("Player removed from the arena");
            }
        }
    }

    /// Run the ticks of one frame. Each input edge is seen by the first tick
    /// only, so a press cannot start an action again later in the frame.
    pub fn run_ticks(&mut self, steps: u32, dt: f32, input: &mut InputManager) {
        for _ in 0..steps {
            self.tick(dt, input);
            input.update();
        }
    }

    /// Deliver collaborator signals to the player until none are left
    fn drain_player_signals(&mut self) {
        let Some(entity) = self.player.as_mut() else {
            return;
        };

        loop {
            let mut events = Vec::new();
            let mut rescan = false;

            for signal in entity.rig.hurtbox.drain_signals() {
                match signal {
                    HurtboxSignal::InvincibilityStarted => {
                        events.push(PlayerEvent::InvincibilityStarted)
                    }
                    HurtboxSignal::InvincibilityEnded => {
                        events.push(PlayerEvent::InvincibilityEnded);
                        rescan = true;
                    }
                    HurtboxSignal::HitEffect => {
                        let position = self
                            .physics
                            .get_collider(entity.hurtbox_collider)
                            .map(|collider| to_vec2(*collider.translation()))
                            .unwrap_or_default();
                        self.scene.spawn(EffectKind::HitEffect, position);
                    }
                }
            }

            for signal in entity.rig.stats.drain_signals() {
                match signal {
                    StatsSignal::HealthChanged(health) => {
                        log::debug!("Player health changed to {health}")
                    }
                    StatsSignal::NoHealth => events.push(PlayerEvent::NoHealth),
                }
            }

            if events.is_empty() {
                break;
            }

            for event in events {
                entity.handle(event, &mut self.scene);
            }

            // Monitoring resumed: hitboxes still overlapping count as entering again
            if rescan {
                for other in self.physics.intersections_with(entity.hurtbox_collider) {
                    entity.deliver_hit(other, &self.hitboxes, &mut self.scene);
                }
            }
        }
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref().map(|entity| &entity.player)
    }

    pub fn rig(&self) -> Option<&PlayerRig> {
        self.player.as_ref().map(|entity| &entity.rig)
    }

    pub fn player_position(&self) -> Option<Vec2> {
        let entity = self.player.as_ref()?;
        self.physics.body_translation(entity.body).map(to_vec2)
    }

    pub fn has_player(&self) -> bool {
        self.player.is_some()
    }

    pub fn scene(&self) -> &SceneRoot {
        &self.scene
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    pub fn hitbox(&self, collider: ColliderHandle) -> Option<&Hitbox> {
        self.hitboxes.get(&collider)
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}
