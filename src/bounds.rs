//! Translation bounds for a contain-fit image.
//!
//! The image is first laid out "contain" style: scaled uniformly so it fits
//! entirely inside the container and centered. Zooming multiplies that
//! rendered size; the bounds are how far the zoomed image may be translated
//! before an edge of the container would be uncovered.

use daylens_input::{Point, Rect, Size};

/// Maximum translation magnitude per axis. Both values are always `>= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    pub const ZERO: Bounds = Bounds { max_x: 0.0, max_y: 0.0 };

    /// Clamp a translation into `[-max, max]` on both axes.
    pub fn clamp(&self, translate: Point) -> Point {
        Point::new(
            translate.x.clamp(-self.max_x, self.max_x),
            translate.y.clamp(-self.max_y, self.max_y),
        )
    }

    /// Whether a translation is within the bounds on both axes.
    pub fn contains(&self, translate: Point) -> bool {
        translate.x.abs() <= self.max_x && translate.y.abs() <= self.max_y
    }

    /// Bounds grown by `margin` on both axes.
    pub fn expanded(&self, margin: f32) -> Bounds {
        Bounds {
            max_x: self.max_x + margin.max(0.0),
            max_y: self.max_y + margin.max(0.0),
        }
    }
}

/// Uniform scale that fits `natural` inside `container`, or `None` when either size is degenerate.
pub fn contain_fit_scale(container: Size, natural: Size) -> Option<f32> {
    if container.is_empty() || natural.is_empty() {
        return None;
    }
    let fit = (container.width / natural.width).min(container.height / natural.height);
    fit.is_finite().then_some(fit)
}

/// Size of the image at scale 1 after contain-fit layout.
pub fn rendered_size(container: Size, natural: Size) -> Size {
    match contain_fit_scale(container, natural) {
        Some(fit) => Size::new(natural.width * fit, natural.height * fit),
        None => Size::ZERO,
    }
}

/// The displayed image rectangle at scale 1, centered in the container.
pub fn displayed_image_rect(container: Size, natural: Size) -> Rect {
    let rendered = rendered_size(container, natural);
    if rendered.is_empty() {
        return Rect::default();
    }
    Rect::new(
        (container.width - rendered.width) / 2.0,
        (container.height - rendered.height) / 2.0,
        rendered.width,
        rendered.height,
    )
}

/// Maximum allowed translation at `scale`.
///
/// Degenerate measurements (zero, negative or non-finite) yield [`Bounds::ZERO`].
pub fn bounds(scale: f32, container: Size, natural: Size) -> Bounds {
    if !scale.is_finite() {
        return Bounds::ZERO;
    }
    let rendered = rendered_size(container, natural);
    if rendered.is_empty() {
        return Bounds::ZERO;
    }
    let scaled_w = rendered.width * scale;
    let scaled_h = rendered.height * scale;
    let max_x = ((scaled_w - container.width) / 2.0).max(0.0);
    let max_y = ((scaled_h - container.height) / 2.0).max(0.0);
    if !(max_x.is_finite() && max_y.is_finite()) {
        return Bounds::ZERO;
    }
    Bounds { max_x, max_y }
}
