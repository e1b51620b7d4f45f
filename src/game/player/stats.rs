// Player tuning and health

use super::host::HealthStore;
use super::SetupError;

/// Movement tuning, in pixels and seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tunables {
    /// Top running speed (px/s)
    pub max_speed: f32,
    /// How fast running speed builds up (px/s²)
    pub acceleration: f32,
    /// How fast speed bleeds off without input (px/s²)
    pub friction: f32,
    /// Fixed dodge-roll speed (px/s)
    pub roll_speed: f32,
}

/// Default tuning: snappy to start, snappy to stop, roll 1.5x run speed
pub const PLAYER_TUNABLES: Tunables = Tunables {
    max_speed: 80.0,
    acceleration: 500.0,
    friction: 500.0,
    roll_speed: 120.0,
};

impl Default for Tunables {
    fn default() -> Self {
        PLAYER_TUNABLES
    }
}

impl Tunables {
    /// Reject negative or non-finite values
    pub fn validate(&self) -> Result<(), SetupError> {
        for (name, value) in [
            ("max_speed", self.max_speed),
            ("acceleration", self.acceleration),
            ("friction", self.friction),
            ("roll_speed", self.roll_speed),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SetupError::InvalidTunable { name, value });
            }
        }
        Ok(())
    }
}

/// Signals emitted by the stats store, drained by the host after each handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsSignal {
    HealthChanged(i32),
    NoHealth,
}

/// Health store for the player, injected at spawn
#[derive(Debug)]
pub struct PlayerStats {
    max_health: i32,
    health: i32,
    signals: Vec<StatsSignal>,
}

impl PlayerStats {
    /// Full health stats. `max_health` must be positive.
    pub fn new(max_health: i32) -> Result<Self, SetupError> {
        if max_health <= 0 {
            return Err(SetupError::InvalidMaxHealth(max_health));
        }
        Ok(Self {
            max_health,
            health: max_health,
            signals: Vec::new(),
        })
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn is_depleted(&self) -> bool {
        self.health <= 0
    }

    /// Take the signals emitted since the last drain
    pub fn drain_signals(&mut self) -> Vec<StatsSignal> {
        std::mem::take(&mut self.signals)
    }
}

impl HealthStore for PlayerStats {
    fn health(&self) -> i32 {
        self.health
    }

    fn set_health(&mut self, health: i32) {
        self.health = health.clamp(0, self.max_health);
        self.signals.push(StatsSignal::HealthChanged(self.health));
        if self.health <= 0 {
            self.signals.push(StatsSignal::NoHealth);
        }
    }
}
