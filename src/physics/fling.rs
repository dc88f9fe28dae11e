//! Inertial fling with exponential decay and bound damping.

use crate::bounds::Bounds;
use crate::config::ViewportConfig;
use crate::constants::physics::{BOUND_DAMPING, MAX_FRAME_DT, REFERENCE_FPS};
use daylens_input::{Point, Timestamp};

/// Decay and stopping parameters of a fling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlingParams {
    /// Velocity retained per 1/60 s
    pub decay: f32,
    /// Speed below which the fling stops (px/s)
    pub stop_speed: f32,
    /// Distance allowed past the bounds; 0 clamps hard
    pub overshoot: f32,
}

impl FlingParams {
    pub fn from_config(config: &ViewportConfig) -> Self {
        Self {
            decay: config.fling_decay,
            stop_speed: config.fling_stop_speed,
            overshoot: config.fling_overshoot,
        }
    }
}

/// A fling in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fling {
    /// Current velocity (px/s)
    pub velocity: Point,
    pub params: FlingParams,
    last_step: Timestamp,
}

impl Fling {
    pub fn new(velocity: Point, params: FlingParams, at: Timestamp) -> Self {
        Self {
            velocity,
            params,
            last_step: at,
        }
    }

    /// Advance to `now`. Returns `true` while the fling keeps moving.
    pub fn step(&mut self, now: Timestamp, translate: &mut Point, bounds: &Bounds) -> bool {
        let dt = now.seconds_since(self.last_step);
        self.last_step = now;
        self.advance(dt, translate, bounds)
    }

    /// Integrate `dt` seconds. Returns `true` while the fling keeps moving.
    ///
    /// An axis that ends up past its bound has its velocity damped and its
    /// position limited to the bound plus the overshoot allowance.
    pub fn advance(&mut self, dt: f32, translate: &mut Point, bounds: &Bounds) -> bool {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        let mut next = *translate + self.velocity * dt;
        self.velocity = self.velocity * self.params.decay.powf(dt * REFERENCE_FPS);

        let limit = bounds.expanded(self.params.overshoot);
        if next.x.abs() > bounds.max_x {
            self.velocity.x *= BOUND_DAMPING;
            next.x = next.x.clamp(-limit.max_x, limit.max_x);
        }
        if next.y.abs() > bounds.max_y {
            self.velocity.y *= BOUND_DAMPING;
            next.y = next.y.clamp(-limit.max_y, limit.max_y);
        }

        *translate = next;
        self.velocity.length() >= self.params.stop_speed
    }
}
