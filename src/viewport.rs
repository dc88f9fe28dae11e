//! The viewport: owns the transform and wires gestures, animation, crop and signals together.

use crate::config::ViewportConfig;
use crate::crop::{AspectLock, CropEditor};
use crate::error::ConfigError;
use crate::gesture::{GestureContext, GestureOutcome, GestureRouter, GestureSession, SessionKind};
use crate::measure::{Layout, Measure};
use crate::physics::{AnimationKind, AnimationStatus, Animator, FrameScheduler};
use crate::signals::{SignalGate, SignalSink};
use crate::transform::ViewportTransform;
use daylens_input::{PointerEvent, Rect, Timestamp};
use serde::Serialize;

/// Everything the host needs to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderFrame {
    pub scale: f32,
    pub translate_x: f32,
    pub translate_y: f32,
    /// Displayed image rectangle at scale 1, in container coordinates
    pub image_rect: Rect,
    /// Crop selection, only while crop mode is active
    pub crop_rect: Option<Rect>,
}

/// Host side that applies a [`RenderFrame`] to the rendering surface.
pub trait Compositor {
    fn composite(&mut self, frame: &RenderFrame);
}

/// Interactive image viewport.
///
/// Feed it pointer events with [`handle_pointer`](Viewport::handle_pointer)
/// and call [`on_frame`](Viewport::on_frame) whenever a frame requested
/// through the [`FrameScheduler`] fires.
pub struct Viewport {
    config: ViewportConfig,
    transform: ViewportTransform,
    crop: CropEditor,
    router: GestureRouter,
    animator: Animator,
    measure: Box<dyn Measure>,
    signals: SignalGate,
}

impl Viewport {
    /// Build a viewport at identity. Fails if `config` does not validate.
    pub fn new(
        config: ViewportConfig,
        measure: Box<dyn Measure>,
        signals: Box<dyn SignalSink>,
        scheduler: Box<dyn FrameScheduler>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        log::debug!(
            "Viewport created: max scale {:.1}, double tap {:.1}",
            config.max_scale,
            config.double_tap_target()
        );
        Ok(Self {
            crop: CropEditor::from_config(&config),
            config,
            transform: ViewportTransform::identity(),
            router: GestureRouter::new(),
            animator: Animator::new(scheduler),
            measure,
            signals: SignalGate::new(signals),
        })
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    pub fn transform(&self) -> ViewportTransform {
        self.transform
    }

    /// Current measurements, taken from the host on every call.
    pub fn layout(&self) -> Layout {
        Layout::measure(self.measure.as_ref())
    }

    pub fn crop(&self) -> &CropEditor {
        &self.crop
    }

    pub fn session(&self) -> Option<&GestureSession> {
        self.router.session()
    }

    pub fn session_kind(&self) -> Option<SessionKind> {
        self.router.session().map(GestureSession::kind)
    }

    pub fn animation(&self) -> Option<AnimationKind> {
        self.animator.kind()
    }

    pub fn has_pending_frame(&self) -> bool {
        self.animator.has_pending_frame()
    }

    /// No gesture in progress and nothing animating.
    pub fn is_settled(&self) -> bool {
        self.router.is_idle() && !self.animator.is_running()
    }

    /// Replace the measurement source, e.g. after the image changed.
    pub fn set_measure(&mut self, measure: Box<dyn Measure>) {
        self.measure = measure;
        self.relayout();
    }

    /// Re-apply bounds after the container or image size changed.
    pub fn relayout(&mut self) {
        let layout = self.layout();
        if !self.animator.is_running() {
            self.transform = self.transform.clamped(&layout.bounds(self.transform.scale));
        }
        if self.crop.is_active() {
            self.crop.set_image_rect(layout.image_rect());
        }
    }

    /// Route one pointer event.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> GestureOutcome {
        let layout = self.layout();
        let mut ctx = GestureContext {
            transform: &mut self.transform,
            crop: &mut self.crop,
            layout,
            config: &self.config,
        };
        let outcome = self.router.handle(event, &mut ctx);
        let now = event.timestamp;

        match outcome {
            GestureOutcome::Opened(kind) => {
                // A new session takes the transform from whatever was animating it
                if kind.moves_viewport() {
                    self.animator.cancel();
                }
            }
            GestureOutcome::DoubleTap(target) => {
                self.animator.start_ease(self.transform, target, self.config.settle_duration_ms, now);
            }
            GestureOutcome::Released { kind, velocity } if kind.moves_viewport() => {
                self.animator.start_fling(velocity, &self.transform, &layout, &self.config, now);
            }
            GestureOutcome::Cancelled(kind) if kind.moves_viewport() => {
                self.spring_back(&layout, now);
            }
            _ => {}
        }

        self.sync_signals(now);
        outcome
    }

    /// Advance the running animation; call when a requested frame fires.
    pub fn on_frame(&mut self, now: Timestamp) -> AnimationStatus {
        let layout = self.layout();
        self.animator.step(now, &mut self.transform, &layout, &self.config)
    }

    pub fn render_frame(&self) -> RenderFrame {
        RenderFrame {
            scale: self.transform.scale,
            translate_x: self.transform.translate_x,
            translate_y: self.transform.translate_y,
            image_rect: self.layout().image_rect(),
            crop_rect: if self.crop.is_active() { self.crop.rect() } else { None },
        }
    }

    pub fn present(&self, compositor: &mut dyn Compositor) {
        compositor.composite(&self.render_frame());
    }

    /// Ease back to identity.
    pub fn reset(&mut self, now: Timestamp) {
        self.drop_session(now);
        let identity = ViewportTransform::identity();
        if self.transform == identity {
            self.animator.cancel();
        } else {
            self.animator.start_ease(self.transform, identity, self.config.settle_duration_ms, now);
        }
    }

    /// Jump to identity without animating.
    pub fn reset_immediately(&mut self, now: Timestamp) {
        self.drop_session(now);
        self.animator.cancel();
        self.transform = ViewportTransform::identity();
    }

    /// Start crop mode. The viewport eases back to 1x; zooming gestures stay off until exit.
    pub fn enter_crop_mode(&mut self, now: Timestamp) {
        if self.crop.is_active() {
            return;
        }
        self.reset(now);
        self.crop.begin(self.layout().image_rect());
    }

    /// Leave crop mode, returning the final selection in displayed-image coordinates.
    pub fn exit_crop_mode(&mut self, now: Timestamp) -> Option<Rect> {
        if !self.crop.is_active() {
            return None;
        }
        self.drop_session(now);
        self.crop.end()
    }

    pub fn set_aspect_lock(&mut self, aspect: AspectLock) {
        self.crop.set_aspect(aspect);
    }

    /// Clear the aspect lock and select the whole image.
    pub fn reset_crop(&mut self) {
        self.crop.reset();
    }

    /// Stop everything before the host drops the viewport.
    ///
    /// Cancels the outstanding frame request and emits the closing `End`
    /// signal if a gesture was still suspending outer swipes.
    pub fn teardown(&mut self, now: Timestamp) {
        self.animator.cancel();
        self.drop_session(now);
        log::debug!("Viewport torn down");
    }

    fn drop_session(&mut self, now: Timestamp) {
        if let Some(kind) = self.router.reset() {
            log::debug!("{:?} session interrupted", kind);
        }
        self.sync_signals(now);
    }

    fn spring_back(&mut self, layout: &Layout, now: Timestamp) {
        let bounds = layout.bounds(self.transform.scale);
        self.animator
            .start_spring_back(&self.transform, &bounds, self.config.settle_duration_ms, now);
    }

    /// Outer swipe stays suspended exactly while a session is live.
    fn sync_signals(&mut self, now: Timestamp) {
        match self.router.session().map(GestureSession::kind) {
            Some(kind) => {
                if !self.signals.is_started() {
                    log::trace!("Suspending outer swipe for {:?}", kind);
                }
                self.signals.start(now);
            }
            None => self.signals.end(now),
        }
    }
}
