//! Host measurements.
//!
//! The engine never queries platform layout itself. The host implements
//! [`Measure`] (typically backed by `getBoundingClientRect` and the decoded
//! image's natural size) and the engine snapshots it into a [`Layout`]
//! whenever it needs bounds.

use crate::bounds::{self, Bounds};
use daylens_input::{Point, Rect, Size};

/// Supplies container and image measurements on demand.
pub trait Measure {
    /// Rendered box of the viewport container, if laid out yet.
    fn container_size(&self) -> Option<Size>;
    /// Natural pixel size of the image, if decoded yet.
    fn natural_size(&self) -> Option<Size>;
}

/// A [`Measure`] backed by plain values.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StaticMeasure {
    pub container: Option<Size>,
    pub natural: Option<Size>,
}

impl StaticMeasure {
    pub fn new(container: Size, natural: Size) -> Self {
        Self {
            container: Some(container),
            natural: Some(natural),
        }
    }
}

impl Measure for StaticMeasure {
    fn container_size(&self) -> Option<Size> {
        self.container
    }

    fn natural_size(&self) -> Option<Size> {
        self.natural
    }
}

/// A snapshot of both measurements; anything missing is [`Size::ZERO`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Layout {
    pub container: Size,
    pub natural: Size,
}

impl Layout {
    pub fn new(container: Size, natural: Size) -> Self {
        Self { container, natural }
    }

    /// Snapshot a host measurement.
    pub fn measure(source: &dyn Measure) -> Self {
        let container = source.container_size().unwrap_or(Size::ZERO);
        let natural = source.natural_size().unwrap_or(Size::ZERO);
        if container.is_empty() || natural.is_empty() {
            log::trace!("Layout not measured yet: container {:?}, image {:?}", container, natural);
        }
        Self { container, natural }
    }

    /// Whether both sizes are usable.
    pub fn is_measured(&self) -> bool {
        !self.container.is_empty() && !self.natural.is_empty()
    }

    /// Translation bounds at `scale`.
    pub fn bounds(&self, scale: f32) -> Bounds {
        bounds::bounds(scale, self.container, self.natural)
    }

    /// Displayed image rectangle at scale 1, in container coordinates.
    pub fn image_rect(&self) -> Rect {
        bounds::displayed_image_rect(self.container, self.natural)
    }

    /// Express a container-local point relative to the container center.
    pub fn to_local(&self, position: Point) -> Point {
        position - self.container.center()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_measurements_degrade_to_zero() {
        let layout = Layout::measure(&StaticMeasure::default());
        assert!(!layout.is_measured());
        assert_eq!(layout.bounds(3.0), Bounds::ZERO);
        assert_eq!(layout.image_rect(), Rect::default());
    }

    #[test]
    fn test_local_coordinates() {
        let layout = Layout::measure(&StaticMeasure::new(Size::new(300.0, 200.0), Size::new(600.0, 400.0)));
        assert!(layout.is_measured());
        assert_eq!(layout.to_local(Point::new(150.0, 100.0)), Point::ZERO);
        assert_eq!(layout.to_local(Point::new(200.0, 50.0)), Point::new(50.0, -50.0));
        assert_eq!(layout.image_rect(), Rect::new(0.0, 0.0, 300.0, 200.0));
    }
}
