/// Fixed-rate stepping for the arena
///
/// Frames arrive whenever the window redraws; gameplay only ever advances in
/// whole 60 Hz ticks so roll distances and invincibility windows come out
/// the same on every machine.
use std::time::{Duration, Instant};

/// Seconds per tick
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const TICK: Duration = Duration::from_micros(16_667);

/// Upper bound on ticks run for a single frame
pub const MAX_STEPS_PER_FRAME: u32 = 5;

pub struct GameLoop {
    /// Frame time not yet turned into ticks
    backlog: Duration,
    last_frame: Instant,
    paused: bool,
    frames: u64,
    ticks: u64,
}

impl GameLoop {
    pub fn new() -> Self {
        Self {
            backlog: Duration::ZERO,
            last_frame: Instant::now(),
            paused: false,
            frames: 0,
            ticks: 0,
        }
    }

    /// Measure the frame against the wall clock and return how many ticks to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        self.advance(elapsed)
    }

    /// Feed `elapsed` into the backlog and return how many ticks it pays for
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.frames += 1;
        if self.paused {
            return 0;
        }

        self.backlog += elapsed;
        let due = (self.backlog.as_nanos() / TICK.as_nanos()) as u64;
        let steps = due.min(MAX_STEPS_PER_FRAME as u64) as u32;

        if due > MAX_STEPS_PER_FRAME as u64 {
            // A hitch is skipped, not replayed at high speed
            log::debug!("Dropping {} ticks after a long frame", due - steps as u64);
            self.backlog = Duration::ZERO;
        } else {
            self.backlog -= TICK * steps;
        }

        self.ticks += steps as u64;
        steps
    }

    pub fn fixed_timestep(&self) -> f32 {
        FIXED_TIMESTEP
    }

    /// Frames seen, paused or not
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Ticks handed out so far
    pub fn update_count(&self) -> u64 {
        self.ticks
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused == paused {
            return;
        }
        self.paused = paused;
        // Time spent paused never turns into ticks
        self.backlog = Duration::ZERO;
        self.last_frame = Instant::now();
        log::info!("Game {}", if paused { "paused" } else { "resumed" });
    }

    /// Flip the pause state, returning the new one
    pub fn toggle_pause(&mut self) -> bool {
        self.set_paused(!self.paused);
        self.paused
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
