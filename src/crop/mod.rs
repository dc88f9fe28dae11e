//! Crop mode state: the selection rectangle, its aspect lock and hit testing.
//!
//! All rectangles are in container coordinates of the displayed image at
//! scale 1 (the viewport eases back to 1x when crop mode starts).

mod geometry;
mod handles;

pub use geometry::{clamp_to_image, draw_rect, fit_aspect, move_rect, resize_free, resize_locked, resize_rect};
pub use handles::{hit_test_handles, HandleIndex};

use crate::config::ViewportConfig;
use daylens_input::{Point, Rect};

/// Width-to-height constraint on the crop rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AspectLock {
    #[default]
    Free,
    /// Width divided by height
    Ratio(f32),
}

impl AspectLock {
    pub const SQUARE: AspectLock = AspectLock::Ratio(1.0);
    pub const PORTRAIT_4_5: AspectLock = AspectLock::Ratio(4.0 / 5.0);
    pub const LANDSCAPE_16_9: AspectLock = AspectLock::Ratio(16.0 / 9.0);
    pub const CLASSIC_3_2: AspectLock = AspectLock::Ratio(3.0 / 2.0);

    /// Lock to `width:height`; unusable dimensions give [`AspectLock::Free`].
    pub fn from_dimensions(width: f32, height: f32) -> AspectLock {
        let ratio = width / height;
        if ratio.is_finite() && ratio > 0.0 {
            AspectLock::Ratio(ratio)
        } else {
            AspectLock::Free
        }
    }

    /// The enforced ratio, if any.
    pub fn ratio(&self) -> Option<f32> {
        match *self {
            AspectLock::Ratio(r) if r.is_finite() && r > 0.0 => Some(r),
            _ => None,
        }
    }
}

/// What a press lands on in crop mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropHit {
    Handle(HandleIndex),
    Inside,
    Outside,
}

/// The crop selection of an active crop mode.
#[derive(Debug, Clone, PartialEq)]
pub struct CropEditor {
    active: bool,
    image_rect: Rect,
    rect: Option<Rect>,
    aspect: AspectLock,
    handle_size: f32,
    handle_tolerance: f32,
}

impl CropEditor {
    pub fn new(handle_size: f32, handle_tolerance: f32) -> Self {
        Self {
            active: false,
            image_rect: Rect::default(),
            rect: None,
            aspect: AspectLock::Free,
            handle_size,
            handle_tolerance,
        }
    }

    pub fn from_config(config: &ViewportConfig) -> Self {
        Self::new(config.handle_size, config.handle_touch_tolerance)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The current selection, `None` while a fresh selection is still under the draw threshold.
    pub fn rect(&self) -> Option<Rect> {
        self.rect
    }

    /// The displayed image rectangle the selection is confined to.
    pub fn image_rect(&self) -> Rect {
        self.image_rect
    }

    pub fn aspect(&self) -> AspectLock {
        self.aspect
    }

    /// Enter crop mode with the whole image selected.
    pub fn begin(&mut self, image_rect: Rect) {
        self.active = true;
        self.image_rect = image_rect;
        self.rect = Some(match self.aspect.ratio() {
            Some(ratio) => fit_aspect(&image_rect, ratio, &image_rect),
            None => image_rect,
        });
        log::debug!("Crop mode started on {:?}", image_rect);
    }

    /// Leave crop mode, returning the final selection.
    pub fn end(&mut self) -> Option<Rect> {
        if !self.active {
            return None;
        }
        self.active = false;
        let rect = self.rect.take();
        log::debug!("Crop mode ended with {:?}", rect);
        rect
    }

    /// Change the aspect lock, refitting an existing selection to the new ratio.
    pub fn set_aspect(&mut self, aspect: AspectLock) {
        self.aspect = aspect;
        if let (Some(ratio), Some(rect)) = (aspect.ratio(), self.rect) {
            self.rect = Some(fit_aspect(&rect, ratio, &self.image_rect));
        }
    }

    /// Drop the aspect lock and select the whole image again.
    pub fn reset(&mut self) {
        self.aspect = AspectLock::Free;
        if self.active {
            self.rect = Some(self.image_rect);
        }
    }

    /// Follow a new displayed image rectangle after the layout changed.
    pub fn set_image_rect(&mut self, image_rect: Rect) {
        if image_rect == self.image_rect {
            return;
        }
        self.image_rect = image_rect;
        if let Some(rect) = self.rect {
            let clamped = clamp_to_image(rect, &image_rect);
            self.rect = Some(match self.aspect.ratio() {
                Some(ratio) if clamped != rect => fit_aspect(&clamped, ratio, &image_rect),
                _ => clamped,
            });
        }
    }

    /// Classify a press against the current selection. Handles win over the interior.
    pub fn hit_test(&self, point: Point) -> CropHit {
        let Some(rect) = self.rect else {
            return CropHit::Outside;
        };
        if let Some(handle) = hit_test_handles(&rect, point, self.handle_size, self.handle_tolerance) {
            CropHit::Handle(handle)
        } else if rect.contains(&point) {
            CropHit::Inside
        } else {
            CropHit::Outside
        }
    }

    pub(crate) fn set_rect(&mut self, rect: Rect) {
        self.rect = Some(rect);
    }
}
