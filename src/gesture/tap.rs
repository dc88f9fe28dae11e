//! Tap and double-tap recognition.

use crate::config::ViewportConfig;
use crate::constants::gesture::{DOUBLE_TAP_SLOP, TAP_SLOP};
use crate::constants::zoom::{DOUBLE_TAP_RESET_THRESHOLD, MIN_SCALE};
use crate::measure::Layout;
use crate::transform::{anchored_translate, ViewportTransform};
use daylens_input::{Point, PointerEvent, PointerId, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Press {
    pointer: PointerId,
    position: Point,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Tap {
    position: Point,
    released: Timestamp,
}

/// Tracks completed taps so the next press can be recognised as a double tap.
///
/// A press counts as a tap when it lifts within [`TAP_SLOP`] of where it went
/// down. A second press within the window, measured from the first tap's
/// release, and within [`DOUBLE_TAP_SLOP`] of it is a double tap.
#[derive(Debug, Clone, Default)]
pub struct TapTracker {
    press: Option<Press>,
    last_tap: Option<Tap>,
}

impl TapTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a press. Returns `true` when it completes a double tap.
    pub fn on_down(&mut self, event: &PointerEvent, window_ms: f64) -> bool {
        if let Some(tap) = self.last_tap.take() {
            let in_time = event.timestamp.millis_since(tap.released) <= window_ms;
            let in_place = tap.position.distance_to(&event.position) <= DOUBLE_TAP_SLOP;
            if in_time && in_place {
                self.press = None;
                return true;
            }
        }
        self.press = Some(Press {
            pointer: event.pointer,
            position: event.position,
        });
        false
    }

    pub fn on_move(&mut self, event: &PointerEvent) {
        if let Some(press) = self.press {
            if press.pointer == event.pointer && press.position.distance_to(&event.position) > TAP_SLOP {
                self.press = None;
            }
        }
    }

    pub fn on_up(&mut self, event: &PointerEvent) {
        match self.press {
            Some(press) if press.pointer == event.pointer => {
                self.press = None;
                if press.position.distance_to(&event.position) <= TAP_SLOP {
                    self.last_tap = Some(Tap {
                        position: press.position,
                        released: event.timestamp,
                    });
                }
            }
            _ => {}
        }
    }

    /// Forget the current press and any pending first tap.
    pub fn clear(&mut self) {
        self.press = None;
        self.last_tap = None;
    }
}

/// Where a double tap at container-local `position` should animate to.
///
/// Zoomed in past the reset threshold: back to identity. Otherwise zoom to the
/// double-tap scale keeping the tapped point under the finger, then clamp.
pub fn double_tap_target(
    current: &ViewportTransform,
    position: Point,
    layout: &Layout,
    config: &ViewportConfig,
) -> ViewportTransform {
    if current.scale > DOUBLE_TAP_RESET_THRESHOLD {
        return ViewportTransform::identity();
    }
    let scale = config.double_tap_target().max(MIN_SCALE);
    let translate = anchored_translate(current.translate(), layout.to_local(position), current.scale, scale);
    let translate = layout.bounds(scale).clamp(translate);
    ViewportTransform::new(scale, translate.x, translate.y)
}
