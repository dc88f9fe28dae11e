//! Two-finger pinch zoom around the starting centroid.

use super::pan::{release_velocity, track_velocity};
use super::Contact;
use crate::constants::gesture::MIN_PINCH_DISTANCE;
use crate::measure::Layout;
use crate::transform::{anchored_translate, clamp_scale, ViewportTransform};
use daylens_input::{Point, PointerId, Timestamp};

/// Pinch session state.
///
/// Scale and translation are always derived from the values captured at
/// pinch start, never from the previous frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchSession {
    pub pointers: [PointerId; 2],
    positions: [Point; 2],
    pub start_scale: f32,
    pub start_distance: f32,
    pub start_translate: Point,
    /// Centroid at pinch start, relative to the container center
    pub anchor: Point,
    last_centroid: Point,
    last_move: Timestamp,
    velocity: Point,
}

impl PinchSession {
    pub fn begin(first: Contact, second: Contact, transform: &ViewportTransform, layout: &Layout, at: Timestamp) -> Self {
        let centroid = first.position.midpoint(&second.position);
        let session = Self {
            pointers: [first.pointer, second.pointer],
            positions: [first.position, second.position],
            start_scale: transform.scale,
            start_distance: first.position.distance_to(&second.position).max(MIN_PINCH_DISTANCE),
            start_translate: transform.translate(),
            anchor: layout.to_local(centroid),
            last_centroid: centroid,
            last_move: at,
            velocity: Point::ZERO,
        };
        log::debug!(
            "Pinch start: scale {:.2}, distance {:.1}, anchor ({:.1}, {:.1})",
            session.start_scale,
            session.start_distance,
            session.anchor.x,
            session.anchor.y
        );
        session
    }

    pub fn involves(&self, pointer: PointerId) -> bool {
        self.pointers.contains(&pointer)
    }

    /// Apply a move of one of the two fingers. Returns `false` for any other pointer.
    pub fn update(
        &mut self,
        pointer: PointerId,
        position: Point,
        at: Timestamp,
        transform: &mut ViewportTransform,
        layout: &Layout,
        max_scale: f32,
    ) -> bool {
        let Some(slot) = self.pointers.iter().position(|p| *p == pointer) else {
            return false;
        };
        self.positions[slot] = position;

        let distance = self.positions[0].distance_to(&self.positions[1]).max(MIN_PINCH_DISTANCE);
        let next = clamp_scale(self.start_scale * distance / self.start_distance, max_scale);
        let translate = anchored_translate(self.start_translate, self.anchor, self.start_scale, next);

        transform.scale = next;
        transform.set_translate(layout.bounds(next).clamp(translate));

        let centroid = self.positions[0].midpoint(&self.positions[1]);
        self.velocity = track_velocity(self.velocity, centroid - self.last_centroid, at.millis_since(self.last_move));
        self.last_centroid = centroid;
        self.last_move = at;
        true
    }

    /// Centroid velocity to fling with when a finger lifts at `at`.
    pub fn release_velocity(&self, at: Timestamp) -> Point {
        release_velocity(self.velocity, self.last_move, at)
    }
}
