//! One-pointer panning of a zoomed image.

use crate::bounds::Bounds;
use crate::constants::gesture::{VELOCITY_SMOOTHING, VELOCITY_STALE_MS};
use crate::transform::ViewportTransform;
use daylens_input::{Point, Timestamp};

/// Pan session state, captured at pointer-down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanSession {
    pub start_translate: Point,
    pub start_pointer: Point,
    last_position: Point,
    last_move: Timestamp,
    velocity: Point,
}

impl PanSession {
    pub fn begin(transform: &ViewportTransform, pointer: Point, at: Timestamp) -> Self {
        Self {
            start_translate: transform.translate(),
            start_pointer: pointer,
            last_position: pointer,
            last_move: at,
            velocity: Point::ZERO,
        }
    }

    /// Follow the pointer: translation is the start translation plus the total pointer movement, clamped.
    pub fn update(&mut self, pointer: Point, at: Timestamp, transform: &mut ViewportTransform, bounds: &Bounds) {
        let target = self.start_translate + (pointer - self.start_pointer);
        transform.set_translate(bounds.clamp(target));

        self.velocity = track_velocity(self.velocity, pointer - self.last_position, at.millis_since(self.last_move));
        self.last_position = pointer;
        self.last_move = at;
    }

    /// Velocity to fling with when released at `at`.
    pub fn release_velocity(&self, at: Timestamp) -> Point {
        release_velocity(self.velocity, self.last_move, at)
    }
}

/// Blend a new movement sample (px over `elapsed_ms`) into a px/s estimate.
pub(super) fn track_velocity(previous: Point, moved: Point, elapsed_ms: f64) -> Point {
    if elapsed_ms <= 0.0 {
        return previous;
    }
    let sample = moved * (1000.0 / elapsed_ms) as f32;
    sample * VELOCITY_SMOOTHING + previous * (1.0 - VELOCITY_SMOOTHING)
}

/// A pointer that rested before lifting has no velocity.
pub(super) fn release_velocity(velocity: Point, last_move: Timestamp, at: Timestamp) -> Point {
    if at.millis_since(last_move) > VELOCITY_STALE_MS {
        Point::ZERO
    } else {
        velocity
    }
}
