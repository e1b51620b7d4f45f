// Damage and invincibility coordination

use super::animation::{BLINK_START, BLINK_STOP};
use super::host::{BlinkPlayer, PlayerHost};

/// Length of the invincibility window started by every landed hit (seconds)
pub const INVINCIBILITY_DURATION: f32 = 0.6;

/// What happened to an incoming hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Damage was applied; carries the health left afterwards
    Applied { remaining_health: i32 },
    /// The player was invincible and the hit was dropped
    Ignored,
}

/// Applies hits and tracks the invincibility window it has observed.
///
/// The flag goes up the moment a hit starts a window, not when the hurtbox
/// gets around to announcing it, so a second hit delivered in the same
/// callback batch is dropped.
#[derive(Debug, Default)]
pub struct DamageCoordinator {
    invincible: bool,
}

impl DamageCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible
    }

    /// React to a hitbox entering the hurtbox
    pub fn receive_hit(&mut self, damage: i32, host: &mut PlayerHost<'_>) -> HitOutcome {
        if self.invincible {
            log::debug!("Hit for {damage} ignored, player is invincible");
            return HitOutcome::Ignored;
        }

        let damage = damage.max(0);
        let remaining_health = host.stats.health().saturating_sub(damage);
        host.stats.set_health(remaining_health);

        host.hurtbox.start_invincibility(INVINCIBILITY_DURATION);
        self.invincible = true;

        host.hurtbox.create_hit_effect();
        host.effects.spawn_hurt_sound();

        log::info!("Player hit for {damage}, health now {}", host.stats.health());
        HitOutcome::Applied {
            remaining_health: host.stats.health(),
        }
    }

    pub fn invincibility_started(&mut self, blink: &mut dyn BlinkPlayer) {
        self.invincible = true;
        blink.play(BLINK_START);
    }

    pub fn invincibility_ended(&mut self, blink: &mut dyn BlinkPlayer) {
        self.invincible = false;
        blink.play(BLINK_STOP);
    }
}
