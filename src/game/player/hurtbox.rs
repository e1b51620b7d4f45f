// Hurtbox with an invincibility window

use super::host::Hurtbox;

/// Signals emitted by the hurtbox, drained by the host after each handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HurtboxSignal {
    InvincibilityStarted,
    InvincibilityEnded,
    /// A hit effect should be spawned at the hurtbox position
    HitEffect,
}

/// Timer-driven invincibility. While invincible the hurtbox stops
/// monitoring, so the host does not deliver new hits.
#[derive(Debug, Default)]
pub struct InvincibilityHurtbox {
    invincible: bool,
    remaining: f32,
    signals: Vec<HurtboxSignal>,
}

impl InvincibilityHurtbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible
    }

    /// Whether overlapping hitboxes should be reported
    pub fn is_monitoring(&self) -> bool {
        !self.invincible
    }

    /// Seconds left in the current window
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Count the window down
    pub fn update(&mut self, dt: f32) {
        if !self.invincible {
            return;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            self.invincible = false;
            self.signals.push(HurtboxSignal::InvincibilityEnded);
        }
    }

    /// Take the signals emitted since the last drain
    pub fn drain_signals(&mut self) -> Vec<HurtboxSignal> {
        std::mem::take(&mut self.signals)
    }
}

impl Hurtbox for InvincibilityHurtbox {
    fn start_invincibility(&mut self, duration: f32) {
        self.remaining = duration.max(0.0);
        if !self.invincible {
            self.invincible = true;
            self.signals.push(HurtboxSignal::InvincibilityStarted);
        }
    }

    fn create_hit_effect(&mut self) {
        self.signals.push(HurtboxSignal::HitEffect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_lifecycle() {
        let mut hurtbox = InvincibilityHurtbox::new();
        assert!(hurtbox.is_monitoring());

        hurtbox.start_invincibility(0.6);
        assert!(hurtbox.is_invincible());
        assert!(!hurtbox.is_monitoring());
        assert_eq!(
            hurtbox.drain_signals(),
            vec![HurtboxSignal::InvincibilityStarted]
        );

        hurtbox.update(0.5);
        assert!(hurtbox.is_invincible());
        assert!(hurtbox.drain_signals().is_empty());

        hurtbox.update(0.11);
        assert!(!hurtbox.is_invincible());
        assert_eq!(hurtbox.remaining(), 0.0);
        assert_eq!(
            hurtbox.drain_signals(),
            vec![HurtboxSignal::InvincibilityEnded]
        );
    }

    #[test]
    fn test_restart_extends_without_second_start() {
        let mut hurtbox = InvincibilityHurtbox::new();
        hurtbox.start_invincibility(0.6);
        hurtbox.update(0.5);
        hurtbox.start_invincibility(0.6);

        assert_eq!(
            hurtbox.drain_signals(),
            vec![HurtboxSignal::InvincibilityStarted]
        );
        hurtbox.update(0.5);
        assert!(hurtbox.is_invincible());
    }

    #[test]
    fn test_hit_effect_signal() {
        let mut hurtbox = InvincibilityHurtbox::new();
        hurtbox.create_hit_effect();
        assert_eq!(hurtbox.drain_signals(), vec![HurtboxSignal::HitEffect]);
    }

    #[test]
    fn test_update_when_idle_is_noop() {
        let mut hurtbox = InvincibilityHurtbox::new();
        hurtbox.update(1.0);
        assert!(hurtbox.drain_signals().is_empty());
    }
}
