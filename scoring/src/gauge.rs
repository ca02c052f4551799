//! Radial gauge geometry and animation timing.
//!
//! The gauge is a circle of radius [`RADIUS`] in a 100×100 viewBox. The arc is drawn with a dash
//! pattern of one circumference and an offset that hides the unfilled part, so the visible
//! fraction is `score / 100`. The arc starts empty and begins filling [`START_DELAY`] after the
//! gauge appears, over [`TRANSITION`].

use std::time::Duration;

pub const RADIUS: f64 = 45.0;
pub const STROKE_WIDTH: f64 = 8.0;
pub const START_DELAY: Duration = Duration::from_millis(500);
pub const TRANSITION: Duration = Duration::from_millis(1000);

pub fn circumference() -> f64 {
    2.0 * std::f64::consts::PI * RADIUS
}

/// Filled fraction of the arc, in `[0, 1]`.
pub fn fill_fraction(score: u8) -> f64 {
    f64::from(score.min(100)) / 100.0
}

/// `stroke-dashoffset` that leaves `fill_fraction(score)` of the arc visible.
pub fn dash_offset(score: u8) -> f64 {
    circumference() - fill_fraction(score) * circumference()
}

/// Intermediate values from 0 to `score` with an ease-out curve, one per animation frame.
/// The last frame is always exactly `score`.
pub fn frames(score: u8, steps: usize) -> Vec<u8> {
    let steps = steps.max(1);
    (1..=steps)
        .map(|i| {
            let t = i as f64 / steps as f64;
            let eased = 1.0 - (1.0 - t).powi(3);
            (eased * f64::from(score)).round() as u8
        })
        .collect()
}

/// Delay between frames so `steps` frames span [`TRANSITION`].
pub fn frame_interval(steps: usize) -> Duration {
    TRANSITION / steps.max(1) as u32
}
