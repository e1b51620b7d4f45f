// Player behavior state machine

use super::animation;

/// The player's current mutually exclusive mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BehaviorState {
    /// Free movement driven by the directional input
    #[default]
    Move,
    /// Dodge-roll in a frozen direction
    Roll,
    /// Melee swing, rooted in place
    Attack,
}

impl BehaviorState {
    /// Whether input can start a new action from this state
    pub fn accepts_input(&self) -> bool {
        matches!(self, Self::Move)
    }

    /// Name of the animation node this state plays (Move picks Idle or Run)
    pub fn animation_name(&self) -> Option<&'static str> {
        match self {
            Self::Move => None,
            Self::Roll => Some(animation::ROLL),
            Self::Attack => Some(animation::ATTACK),
        }
    }
}

/// Pick at most one voluntary transition from this tick's input edges.
/// Roll preempts attack when both are pressed on the same tick.
pub fn voluntary_transition(roll_pressed: bool, attack_pressed: bool) -> Option<BehaviorState> {
    if roll_pressed {
        Some(BehaviorState::Roll)
    } else if attack_pressed {
        Some(BehaviorState::Attack)
    } else {
        None
    }
}

/// Owns the current behavior state and guards its transitions
#[derive(Debug, Default)]
pub struct PlayerStateMachine {
    current_state: BehaviorState,
    previous_state: BehaviorState,
    state_time: f32,
}

impl PlayerStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current state
    pub fn state(&self) -> BehaviorState {
        self.current_state
    }

    /// Get the previous state
    pub fn previous_state(&self) -> BehaviorState {
        self.previous_state
    }

    /// Get time spent in current state
    pub fn state_time(&self) -> f32 {
        self.state_time
    }

    /// Advance the time-in-state clock
    pub fn tick(&mut self, dt: f32) {
        self.state_time += dt;
    }

    /// Enter an action state from Move. Returns false if input is locked out.
    pub fn begin(&mut self, action: BehaviorState) -> bool {
        if !self.current_state.accepts_input() || action == BehaviorState::Move {
            return false;
        }
        self.transition(action);
        true
    }

    /// Return to Move when the animation of `finished` completes.
    /// Completion of any other state than the current one is ignored.
    pub fn finish(&mut self, finished: BehaviorState) -> bool {
        if finished == BehaviorState::Move || self.current_state != finished {
            return false;
        }
        self.transition(BehaviorState::Move);
        true
    }

    fn transition(&mut self, new_state: BehaviorState) {
        log::debug!("Player state {:?} -> {:?}", self.current_state, new_state);
        self.previous_state = self.current_state;
        self.current_state = new_state;
        self.state_time = 0.0;
    }
}
