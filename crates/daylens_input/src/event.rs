use crate::{Point, Timestamp};
use serde::{Deserialize, Serialize};

/// Identifies one contact from its press until its release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointerId(pub u32);

impl PointerId {
    /// Id conventionally used for the primary mouse.
    pub const MOUSE: PointerId = PointerId(1);
}

/// The device that produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    #[default]
    Mouse,
    Touch,
    Pen,
}

impl PointerKind {
    pub fn is_touch(&self) -> bool {
        matches!(self, PointerKind::Touch)
    }
}

/// Where in its lifetime a contact is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    /// The platform took the contact away (scroll takeover, lost capture, ...).
    Cancel,
}

/// A single pointer/touch sample in container-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub pointer: PointerId,
    #[serde(default)]
    pub kind: PointerKind,
    pub phase: PointerPhase,
    /// Position relative to the container's top-left corner.
    pub position: Point,
    pub timestamp: Timestamp,
}

impl PointerEvent {
    pub fn new(
        pointer: PointerId,
        kind: PointerKind,
        phase: PointerPhase,
        position: Point,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            pointer,
            kind,
            phase,
            position,
            timestamp,
        }
    }

    /// Primary mouse event at `(x, y)` and `millis`.
    pub fn mouse(phase: PointerPhase, x: f32, y: f32, millis: f64) -> Self {
        Self::new(
            PointerId::MOUSE,
            PointerKind::Mouse,
            phase,
            Point::new(x, y),
            Timestamp::from_millis(millis),
        )
    }

    /// Touch event for contact `id` at `(x, y)` and `millis`.
    pub fn touch(id: u32, phase: PointerPhase, x: f32, y: f32, millis: f64) -> Self {
        Self::new(
            PointerId(id),
            PointerKind::Touch,
            phase,
            Point::new(x, y),
            Timestamp::from_millis(millis),
        )
    }

    /// Up or Cancel.
    pub fn is_release(&self) -> bool {
        matches!(self.phase, PointerPhase::Up | PointerPhase::Cancel)
    }
}
