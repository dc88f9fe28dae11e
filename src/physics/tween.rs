//! Fixed-duration eased transitions (spring-back and ease-reset).

use crate::transform::ViewportTransform;
use daylens_input::Timestamp;

/// Cubic ease-out: `1 - (1 - t)^3`, input clamped to `[0, 1]`.
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

/// Eased interpolation between two transforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: ViewportTransform,
    pub to: ViewportTransform,
    pub started: Timestamp,
    pub duration_ms: f64,
}

impl Tween {
    pub fn new(from: ViewportTransform, to: ViewportTransform, started: Timestamp, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            started,
            duration_ms,
        }
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self, now: Timestamp) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (now.millis_since(self.started) / self.duration_ms).min(1.0) as f32
    }

    /// Transform at `now` and whether the tween has finished.
    ///
    /// The finished sample is exactly `to`, not an interpolated approximation.
    pub fn sample(&self, now: Timestamp) -> (ViewportTransform, bool) {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return (self.to, true);
        }
        (self.from.lerp(&self.to, ease_out_cubic(progress)), false)
    }
}
