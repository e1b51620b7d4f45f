// Math utilities and helper functions

use glam::Vec2;

/// Move a scalar toward `target` by at most `max_delta`, never overshooting
pub fn approach(current: f32, target: f32, max_delta: f32) -> f32 {
    let max_delta = max_delta.max(0.0);
    let diff = target - current;
    if diff.abs() <= max_delta {
        target
    } else {
        current + diff.signum() * max_delta
    }
}

/// Move each component of `current` toward `target` by at most `max_delta`
///
/// Components that are already within `max_delta` of the target snap to it
/// exactly, so repeated calls settle on the target instead of oscillating.
pub fn move_toward(current: Vec2, target: Vec2, max_delta: f32) -> Vec2 {
    Vec2::new(
        approach(current.x, target.x, max_delta),
        approach(current.y, target.y, max_delta),
    )
}
