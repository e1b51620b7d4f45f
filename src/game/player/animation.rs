// Player animation: intent publishing, blend-space state machine, hit blink

use std::collections::HashMap;

use glam::Vec2;

use super::host::{AnimationTree, BlinkPlayer};
use super::SetupError;

pub const IDLE: &str = "Idle";
pub const RUN: &str = "Run";
pub const ATTACK: &str = "Attack";
pub const ROLL: &str = "Roll";

/// Blend-space nodes that all share the player's facing direction
pub const BLEND_NODES: [&str; 4] = [IDLE, RUN, ATTACK, ROLL];

pub const BLINK_START: &str = "Start";
pub const BLINK_STOP: &str = "Stop";

/// Point every facing-dependent clip in the same direction
pub fn publish_blend_direction(tree: &mut dyn AnimationTree, direction: Vec2) {
    for node in BLEND_NODES {
        tree.set_blend_position(node, direction);
    }
}

/// Ask the animation engine to travel to `name`
pub fn request_animation(tree: &mut dyn AnimationTree, name: &str) {
    tree.travel(name);
}

/// One of the four authored sprite directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facing {
    Right,
    Left,
    Up,
    Down,
}

impl Facing {
    /// Blend-space points; vertical ones sit slightly further out so that
    /// exact diagonals resolve to a side-facing sprite
    const POINTS: [(Facing, Vec2); 4] = [
        (Facing::Right, Vec2::new(1.0, 0.0)),
        (Facing::Left, Vec2::new(-1.0, 0.0)),
        (Facing::Up, Vec2::new(0.0, -1.1)),
        (Facing::Down, Vec2::new(0.0, 1.1)),
    ];

    /// Nearest authored direction to a blend position (y grows downward)
    pub fn from_blend(position: Vec2) -> Self {
        Self::POINTS
            .iter()
            .min_by(|(_, a), (_, b)| {
                a.distance_squared(position)
                    .total_cmp(&b.distance_squared(position))
            })
            .map(|(facing, _)| *facing)
            .unwrap_or(Facing::Down)
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Right => "Right",
            Self::Left => "Left",
            Self::Up => "Up",
            Self::Down => "Down",
        }
    }
}

/// A single animation clip
#[derive(Debug, Clone)]
pub struct AnimationClip {
    /// Name of the state-machine node (e.g., "Idle", "Roll")
    pub name: String,
    /// Number of frames per direction
    pub frame_count: usize,
    /// Duration of each frame in seconds
    pub frame_duration: f32,
    /// Whether the animation loops
    pub looping: bool,
}

impl AnimationClip {
    pub fn new(name: &str, frame_count: usize, fps: f32, looping: bool) -> Self {
        Self {
            name: name.to_string(),
            frame_count: frame_count.max(1),
            frame_duration: 1.0 / fps,
            looping,
        }
    }

    /// Create a looping animation
    pub fn looping(name: &str, frame_count: usize, fps: f32) -> Self {
        Self::new(name, frame_count, fps, true)
    }

    /// Create a one-shot animation (plays once, then reports finished)
    pub fn one_shot(name: &str, frame_count: usize, fps: f32) -> Self {
        Self::new(name, frame_count, fps, false)
    }

    /// Get the total duration of one animation cycle
    pub fn total_duration(&self) -> f32 {
        self.frame_count as f32 * self.frame_duration
    }
}

/// Data needed to draw the current animation frame
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationFrame {
    pub node: String,
    pub facing: Facing,
    pub frame_index: usize,
}

impl AnimationFrame {
    /// Directional clip name, e.g. "RunLeft"
    pub fn clip_name(&self) -> String {
        format!("{}{}", self.node, self.facing.suffix())
    }
}

/// Blend-space animation state machine
///
/// Every node is a 2D blend space over four facings. `travel` switches the
/// playing node; one-shot nodes report completion once from `update`.
#[derive(Debug, Default)]
pub struct AnimationStateMachine {
    clips: HashMap<String, AnimationClip>,
    blend_positions: HashMap<String, Vec2>,
    current: String,
    elapsed: f32,
    finished: bool,
}

impl AnimationStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The player's node set: looping idle/run, one-shot attack (0.4s) and roll (0.5s)
    pub fn with_player_nodes() -> Self {
        let mut machine = Self::new();
        machine.add_clip(AnimationClip::looping(IDLE, 1, 10.0));
        machine.add_clip(AnimationClip::looping(RUN, 6, 10.0));
        machine.add_clip(AnimationClip::one_shot(ATTACK, 4, 10.0));
        machine.add_clip(AnimationClip::one_shot(ROLL, 5, 10.0));
        machine.travel(IDLE);
        machine
    }

    /// Add a node
    pub fn add_clip(&mut self, clip: AnimationClip) {
        self.blend_positions
            .entry(clip.name.clone())
            .or_insert(Vec2::Y);
        self.clips.insert(clip.name.clone(), clip);
    }

    /// Fail if any required node is missing
    pub fn validate(&self, required: &[&str]) -> Result<(), SetupError> {
        match required.iter().find(|name| !self.clips.contains_key(**name)) {
            Some(missing) => Err(SetupError::MissingAnimationNode(missing.to_string())),
            None => Ok(()),
        }
    }

    /// Advance playback. Returns the node name when a one-shot just finished.
    pub fn update(&mut self, dt: f32) -> Option<String> {
        let clip = self.clips.get(&self.current)?;
        if self.finished {
            return None;
        }

        self.elapsed += dt;
        if !clip.looping && self.elapsed >= clip.total_duration() {
            self.finished = true;
            log::trace!("Animation {} finished", self.current);
            return Some(self.current.clone());
        }
        None
    }

    /// Get the current node name
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Whether the current one-shot has run to completion
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn blend_position(&self, node: &str) -> Option<Vec2> {
        self.blend_positions.get(node).copied()
    }

    /// Frame to draw for the current node
    pub fn frame(&self) -> AnimationFrame {
        let (frame_index, position) = match self.clips.get(&self.current) {
            Some(clip) => {
                let frame = (self.elapsed / clip.frame_duration) as usize;
                let frame = if clip.looping {
                    frame % clip.frame_count
                } else {
                    frame.min(clip.frame_count - 1)
                };
                let position = self
                    .blend_positions
                    .get(&self.current)
                    .copied()
                    .unwrap_or(Vec2::Y);
                (frame, position)
            }
            None => (0, Vec2::Y),
        };

        AnimationFrame {
            node: self.current.clone(),
            facing: Facing::from_blend(position),
            frame_index,
        }
    }
}

impl AnimationTree for AnimationStateMachine {
    fn set_blend_position(&mut self, node: &str, position: Vec2) {
        match self.blend_positions.get_mut(node) {
            Some(slot) => *slot = position,
            None => log::warn!("Blend position set on unknown animation node {node}"),
        }
    }

    fn travel(&mut self, node: &str) {
        if !self.clips.contains_key(node) {
            log::warn!("Travel to unknown animation node {node}");
            return;
        }
        // Re-requesting a node that is still playing changes nothing
        if self.current == node && !self.finished {
            return;
        }
        self.current = node.to_string();
        self.elapsed = 0.0;
        self.finished = false;
    }
}

/// How long each blink phase lasts
pub const BLINK_INTERVAL: f32 = 0.1;

/// Flicker played over the sprite while invincible
#[derive(Debug)]
pub struct BlinkAnimation {
    blinking: bool,
    elapsed: f32,
}

impl Default for BlinkAnimation {
    fn default() -> Self {
        Self::new()
    }
}

impl BlinkAnimation {
    pub fn new() -> Self {
        Self {
            blinking: false,
            elapsed: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32) {
        if self.blinking {
            self.elapsed += dt;
        }
    }

    pub fn is_blinking(&self) -> bool {
        self.blinking
    }

    /// Whether the sprite is drawn this frame
    pub fn is_visible(&self) -> bool {
        if !self.blinking {
            return true;
        }
        // Hidden on the first phase so the hit reads immediately
        (self.elapsed / BLINK_INTERVAL) as u32 % 2 == 1
    }
}

impl BlinkPlayer for BlinkAnimation {
    fn play(&mut self, animation: &str) {
        match animation {
            BLINK_START => {
                self.blinking = true;
                self.elapsed = 0.0;
            }
            BLINK_STOP => {
                self.blinking = false;
                self.elapsed = 0.0;
            }
            other => log::warn!("Unknown blink animation {other}"),
        }
    }
}
