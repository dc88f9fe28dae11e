//! Viewport transform and zoom-about-a-point mathematics.
//!
//! Screen mapping, with every point expressed relative to the container center:
//! `screen = content * scale + translate`, where `content` is a point of the
//! contain-fit image at scale 1.

use crate::bounds::Bounds;
use crate::constants::zoom::MIN_SCALE;
use daylens_input::Point;
use serde::{Deserialize, Serialize};

/// Current zoom and pan of the displayed image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportTransform {
    pub scale: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

impl ViewportTransform {
    /// Create a new transform with the given scale and translation.
    pub fn new(scale: f32, translate_x: f32, translate_y: f32) -> Self {
        Self {
            scale,
            translate_x,
            translate_y,
        }
    }

    /// Create an identity transform (scale=1, centered).
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    pub fn translate(&self) -> Point {
        Point::new(self.translate_x, self.translate_y)
    }

    pub fn set_translate(&mut self, translate: Point) {
        self.translate_x = translate.x;
        self.translate_y = translate.y;
    }

    /// Same scale, translation clamped into `bounds`.
    pub fn clamped(&self, bounds: &Bounds) -> ViewportTransform {
        let t = bounds.clamp(self.translate());
        ViewportTransform::new(self.scale, t.x, t.y)
    }

    /// Content point (scale 1, center-relative) shown at center-relative screen point `local`.
    pub fn screen_to_content(&self, local: Point) -> Point {
        (local - self.translate()) * (1.0 / self.scale)
    }

    /// Center-relative screen position of a content point.
    pub fn content_to_screen(&self, content: Point) -> Point {
        content * self.scale + self.translate()
    }

    /// Interpolate scale and translation, `t = 0` yields `self`.
    pub fn lerp(&self, to: &ViewportTransform, t: f32) -> ViewportTransform {
        let translate = self.translate().lerp(to.translate(), t);
        ViewportTransform::new(self.scale + (to.scale - self.scale) * t, translate.x, translate.y)
    }
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Limit `scale` to `[MIN_SCALE, max_scale]`; a `max_scale` below the minimum collapses to it.
pub fn clamp_scale(scale: f32, max_scale: f32) -> f32 {
    scale.min(max_scale.max(MIN_SCALE)).max(MIN_SCALE)
}

/// Translation that keeps `local` roughly stationary while scaling from `reference_scale` to `next_scale`.
///
/// `dx = local.x * (1 - next / reference)` is added to `reference_translate`.
/// Pinch passes the session's start scale and start translation every frame so
/// error never compounds across frames; double tap passes the current transform.
pub fn anchored_translate(
    reference_translate: Point,
    local: Point,
    reference_scale: f32,
    next_scale: f32,
) -> Point {
    if !(reference_scale.is_finite() && reference_scale > 0.0) {
        return reference_translate;
    }
    let factor = 1.0 - next_scale / reference_scale;
    reference_translate + local * factor
}
