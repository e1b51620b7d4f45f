// The player entity: per-tick dispatch and event handling

use glam::Vec2;

use super::animation::{self, IDLE, RUN};
use super::damage::{DamageCoordinator, HitOutcome};
use super::host::{ActionInput, AnimationTree, Mover, PlayerHost};
use super::motion::{intent_from_axes, MotionState};
use super::state::{voluntary_transition, BehaviorState, PlayerStateMachine};
use super::stats::Tunables;
use super::SetupError;
use crate::engine::input::Action;

/// Things that happen to the player outside its own update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    /// The roll animation reached its end
    RollAnimationFinished,
    /// The attack animation reached its end
    AttackAnimationFinished,
    /// A hitbox entered the hurtbox
    AreaEntered { damage: i32 },
    InvincibilityStarted,
    InvincibilityEnded,
    /// The health store ran dry
    NoHealth,
}

/// Player-controlled character
#[derive(Debug)]
pub struct Player {
    state: PlayerStateMachine,
    motion: MotionState,
    tunables: Tunables,
    damage: DamageCoordinator,
    queued_for_removal: bool,
}

impl Player {
    pub fn new(tunables: Tunables) -> Result<Self, SetupError> {
        tunables.validate()?;
        Ok(Self {
            state: PlayerStateMachine::new(),
            motion: MotionState::new(),
            tunables,
            damage: DamageCoordinator::new(),
            queued_for_removal: false,
        })
    }

    /// Run the handler of the current state. Call once per tick.
    pub fn update(
        &mut self,
        dt: f32,
        input: &dyn ActionInput,
        mover: &mut dyn Mover,
        tree: &mut dyn AnimationTree,
    ) {
        match self.state.state() {
            BehaviorState::Move => self.move_state(dt, input, mover, tree),
            BehaviorState::Roll => self.roll_state(dt, mover, tree),
            BehaviorState::Attack => self.attack_state(tree),
        }
        self.state.tick(dt);
    }

    fn move_state(
        &mut self,
        dt: f32,
        input: &dyn ActionInput,
        mover: &mut dyn Mover,
        tree: &mut dyn AnimationTree,
    ) {
        let intent = intent_from_axes(
            input.action_strength(Action::MoveRight),
            input.action_strength(Action::MoveLeft),
            input.action_strength(Action::MoveDown),
            input.action_strength(Action::MoveUp),
        );

        if intent != Vec2::ZERO {
            self.motion.roll_vector = intent;
            animation::publish_blend_direction(tree, intent);
            animation::request_animation(tree, RUN);
            self.motion.accelerate(intent, &self.tunables, dt);
        } else {
            animation::request_animation(tree, IDLE);
            self.motion.apply_friction(&self.tunables, dt);
        }

        mover.move_and_slide(self.motion.velocity, dt);

        let roll = just_pressed(input, Action::Roll);
        let attack = just_pressed(input, Action::Attack);
        if let Some(next) = voluntary_transition(roll, attack) {
            self.state.begin(next);
        }
    }

    fn roll_state(&mut self, dt: f32, mover: &mut dyn Mover, tree: &mut dyn AnimationTree) {
        self.motion.roll(&self.tunables);
        self.request_state_animation(tree);
        mover.move_and_slide(self.motion.velocity, dt);
    }

    fn attack_state(&mut self, tree: &mut dyn AnimationTree) {
        // No sliding out of a swing
        self.motion.stop();
        self.request_state_animation(tree);
    }

    fn request_state_animation(&self, tree: &mut dyn AnimationTree) {
        if let Some(name) = self.state.state().animation_name() {
            animation::request_animation(tree, name);
        }
    }

    /// React to an event from a collaborator
    pub fn handle_event(&mut self, event: PlayerEvent, host: &mut PlayerHost<'_>) {
        match event {
            PlayerEvent::RollAnimationFinished => {
                if self.state.finish(BehaviorState::Roll) {
                    self.motion.finish_roll();
                } else {
                    log::debug!("Stale roll completion in {:?}", self.state.state());
                }
            }
            PlayerEvent::AttackAnimationFinished => {
                if !self.state.finish(BehaviorState::Attack) {
                    log::debug!("Stale attack completion in {:?}", self.state.state());
                }
            }
            PlayerEvent::AreaEntered { damage } => {
                self.receive_hit(damage, host);
            }
            PlayerEvent::InvincibilityStarted => self.damage.invincibility_started(host.blink),
            PlayerEvent::InvincibilityEnded => self.damage.invincibility_ended(host.blink),
            PlayerEvent::NoHealth => self.queue_removal(),
        }
    }

    /// Apply a hit unless removal is already pending
    pub fn receive_hit(&mut self, damage: i32, host: &mut PlayerHost<'_>) -> HitOutcome {
        if self.queued_for_removal {
            return HitOutcome::Ignored;
        }
        self.damage.receive_hit(damage, host)
    }

    fn queue_removal(&mut self) {
        if !self.queued_for_removal {
            log::info!("Player out of health, removal scheduled");
            self.queued_for_removal = true;
        }
    }

    /// Whether the host should remove this player at the end of the tick
    pub fn is_queued_for_removal(&self) -> bool {
        self.queued_for_removal
    }

    pub fn state(&self) -> BehaviorState {
        self.state.state()
    }

    pub fn state_machine(&self) -> &PlayerStateMachine {
        &self.state
    }

    pub fn velocity(&self) -> Vec2 {
        self.motion.velocity
    }

    pub fn roll_vector(&self) -> Vec2 {
        self.motion.roll_vector
    }

    pub fn tunables(&self) -> &Tunables {
        &self.tunables
    }

    pub fn is_invincible(&self) -> bool {
        self.damage.is_invincible()
    }
}

/// Unregistered actions are simply never pressed
fn just_pressed(input: &dyn ActionInput, action: Action) -> bool {
    input.has_action(action) && input.is_action_just_pressed(action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::player::animation::{ATTACK, BLEND_NODES, ROLL};
    use crate::game::player::stats::PLAYER_TUNABLES;
    use crate::game::player::test_support::{FakeHost, FakeInput, FakeMover};
    use approx::assert_relative_eq;

    const DT: f32 = 1.0 / 60.0;

    struct Rig {
        player: Player,
        input: FakeInput,
        mover: FakeMover,
        host: FakeHost,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                player: Player::new(PLAYER_TUNABLES).unwrap(),
                input: FakeInput::default(),
                mover: FakeMover::default(),
                host: FakeHost::with_health(30),
            }
        }

        fn tick(&mut self) {
            self.player.update(
                DT,
                &self.input,
                &mut self.mover,
                &mut self.host.animation,
            );
            self.input.next_frame();
        }

        fn send(&mut self, event: PlayerEvent) {
            self.player.handle_event(event, &mut self.host.host());
        }
    }

    #[test]
    fn test_invalid_tunables_fail_fast() {
        let tunables = Tunables {
            acceleration: -1.0,
            ..PLAYER_TUNABLES
        };
        assert!(Player::new(tunables).is_err());
    }

    #[test]
    fn test_running_publishes_direction_and_accelerates() {
        let mut rig = Rig::new();
        rig.input.hold(Action::MoveLeft);
        rig.tick();

        assert_eq!(rig.player.state(), BehaviorState::Move);
        assert_eq!(rig.host.animation.last_travel(), Some(RUN));
        for node in BLEND_NODES {
            assert_eq!(rig.host.animation.blend.get(node), Some(&Vec2::NEG_X));
        }
        assert_relative_eq!(rig.player.velocity().x, -PLAYER_TUNABLES.acceleration * DT);
        assert_eq!(rig.mover.moves, vec![rig.player.velocity()]);
        assert_eq!(rig.player.roll_vector(), Vec2::NEG_X);
    }

    #[test]
    fn test_diagonal_input_is_normalized() {
        let mut rig = Rig::new();
        rig.input.hold(Action::MoveRight);
        rig.input.hold(Action::MoveUp);
        for _ in 0..60 {
            rig.tick();
        }
        assert_relative_eq!(
            rig.player.velocity().length(),
            PLAYER_TUNABLES.max_speed,
            epsilon = 1e-3
        );
        assert_relative_eq!(rig.player.roll_vector().length(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_idle_applies_friction() {
        let mut rig = Rig::new();
        rig.input.hold(Action::MoveRight);
        for _ in 0..30 {
            rig.tick();
        }
        rig.input.release_all();

        let mut previous = rig.player.velocity().length();
        for _ in 0..30 {
            rig.tick();
            let speed = rig.player.velocity().length();
            assert!(speed <= previous);
            previous = speed;
        }
        assert_eq!(rig.player.velocity(), Vec2::ZERO);
        assert_eq!(rig.host.animation.last_travel(), Some(IDLE));
        // Facing is kept while idle
        assert_eq!(rig.host.animation.blend.get(IDLE), Some(&Vec2::X));
    }

    #[test]
    fn test_roll_uses_frozen_direction_and_ignores_input() {
        let mut rig = Rig::new();
        rig.input.hold(Action::MoveRight);
        rig.tick();
        rig.input.tap(Action::Roll);
        rig.tick();
        assert_eq!(rig.player.state(), BehaviorState::Roll);

        // Steering, attacking and rolling again mid-roll all do nothing
        rig.input.release_all();
        rig.input.hold(Action::MoveDown);
        rig.input.tap(Action::Attack);
        rig.input.tap(Action::Roll);
        rig.tick();

        assert_eq!(rig.player.state(), BehaviorState::Roll);
        assert_eq!(
            rig.player.velocity(),
            Vec2::new(PLAYER_TUNABLES.roll_speed, 0.0)
        );
        assert_eq!(rig.host.animation.last_travel(), Some(ROLL));
        assert_eq!(rig.mover.moves.last(), Some(&rig.player.velocity()));
    }

    #[test]
    fn test_roll_finish_damps_velocity() {
        let mut rig = Rig::new();
        rig.input.tap(Action::Roll);
        rig.tick();
        rig.tick();
        let rolling = rig.player.velocity();
        assert_eq!(rolling, Vec2::Y * PLAYER_TUNABLES.roll_speed);

        rig.send(PlayerEvent::RollAnimationFinished);
        assert_eq!(rig.player.state(), BehaviorState::Move);
        assert_eq!(rig.player.velocity(), rolling * 0.8);
    }

    #[test]
    fn test_attack_roots_player() {
        let mut rig = Rig::new();
        rig.input.hold(Action::MoveRight);
        for _ in 0..10 {
            rig.tick();
        }
        rig.input.tap(Action::Attack);
        rig.tick();
        assert_eq!(rig.player.state(), BehaviorState::Attack);

        let moves_before = rig.mover.moves.len();
        rig.tick();
        rig.tick();
        assert_eq!(rig.player.velocity(), Vec2::ZERO);
        assert_eq!(rig.host.animation.last_travel(), Some(ATTACK));
        assert_eq!(rig.mover.moves.len(), moves_before);

        rig.send(PlayerEvent::AttackAnimationFinished);
        assert_eq!(rig.player.state(), BehaviorState::Move);
        assert_eq!(rig.player.velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_mismatched_completions_are_ignored() {
        let mut rig = Rig::new();
        rig.input.tap(Action::Attack);
        rig.tick();

        rig.send(PlayerEvent::RollAnimationFinished);
        assert_eq!(rig.player.state(), BehaviorState::Attack);

        rig.send(PlayerEvent::AttackAnimationFinished);
        rig.input.hold(Action::MoveRight);
        rig.tick();
        let velocity = rig.player.velocity();

        // A late roll completion while moving must not damp anything
        rig.send(PlayerEvent::RollAnimationFinished);
        assert_eq!(rig.player.velocity(), velocity);
        assert_eq!(rig.player.state(), BehaviorState::Move);
    }

    #[test]
    fn test_roll_preempts_attack_on_same_tick() {
        let mut rig = Rig::new();
        rig.input.tap(Action::Roll);
        rig.input.tap(Action::Attack);
        rig.tick();
        assert_eq!(rig.player.state(), BehaviorState::Roll);
    }

    #[test]
    fn test_unregistered_roll_never_fires() {
        let mut rig = Rig::new();
        rig.input.unregistered.insert(Action::Roll);
        rig.input.tap(Action::Roll);
        rig.tick();
        assert_eq!(rig.player.state(), BehaviorState::Move);

        // Attack still works
        rig.input.tap(Action::Attack);
        rig.tick();
        assert_eq!(rig.player.state(), BehaviorState::Attack);
    }

    #[test]
    fn test_hit_event_damages_and_blinks() {
        let mut rig = Rig::new();
        rig.send(PlayerEvent::AreaEntered { damage: 10 });
        assert_eq!(rig.host.stats.health, 20);
        assert_eq!(rig.host.hurtbox.starts, vec![0.6]);
        assert!(rig.player.is_invincible());

        rig.send(PlayerEvent::InvincibilityStarted);
        rig.send(PlayerEvent::AreaEntered { damage: 10 });
        assert_eq!(rig.host.stats.health, 20);

        rig.send(PlayerEvent::InvincibilityEnded);
        assert!(!rig.player.is_invincible());
        assert_eq!(rig.host.blink.played, vec!["Start", "Stop"]);
    }

    #[test]
    fn test_hits_do_not_change_behavior_state() {
        let mut rig = Rig::new();
        rig.input.tap(Action::Roll);
        rig.tick();
        rig.send(PlayerEvent::AreaEntered { damage: 5 });
        assert_eq!(rig.player.state(), BehaviorState::Roll);
    }

    #[test]
    fn test_no_health_defers_removal() {
        let mut rig = Rig::new();
        rig.send(PlayerEvent::NoHealth);
        assert!(rig.player.is_queued_for_removal());

        // Still a live value until the host drops it; further hits are ignored
        rig.tick();
        let outcome = rig.player.receive_hit(10, &mut rig.host.host());
        assert_eq!(outcome, HitOutcome::Ignored);
        assert_eq!(rig.host.stats.health, 30);
    }

    #[test]
    fn test_only_completions_leave_action_states() {
        let mut rig = Rig::new();
        let script: [(&[Action], Option<PlayerEvent>); 8] = [
            (&[Action::Roll], None),
            (&[Action::Attack, Action::MoveLeft], None),
            (&[], Some(PlayerEvent::AttackAnimationFinished)),
            (&[Action::Roll], Some(PlayerEvent::RollAnimationFinished)),
            (&[Action::Attack], None),
            (&[Action::Roll], None),
            (&[], Some(PlayerEvent::RollAnimationFinished)),
            (&[], Some(PlayerEvent::AttackAnimationFinished)),
        ];

        for (taps, event) in script {
            let before = rig.player.state();
            for action in taps {
                rig.input.tap(*action);
            }
            rig.tick();
            if before != BehaviorState::Move {
                assert_eq!(rig.player.state(), before, "input changed {before:?}");
            }
            if let Some(event) = event {
                rig.send(event);
            }
        }
        assert_eq!(rig.player.state(), BehaviorState::Move);
    }
}
