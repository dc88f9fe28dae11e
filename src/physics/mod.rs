//! Frame-stepped animations of the viewport transform.
//!
//! [`Animator`] owns a single animation slot. Fling, spring-back and
//! ease-reset all write the same scale/translation, so starting any run
//! replaces the previous one and cancels its outstanding frame request;
//! two writers can never race on the transform.

mod fling;
mod tween;

pub use fling::{Fling, FlingParams};
pub use tween::{ease_out_cubic, Tween};

use crate::bounds::Bounds;
use crate::config::ViewportConfig;
use crate::measure::Layout;
use crate::transform::ViewportTransform;
use daylens_input::{Point, Timestamp};

/// Handle of a frame callback requested from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequestId(pub u64);

/// The host's animation-frame facility (`requestAnimationFrame` or a render loop).
///
/// When a requested frame fires, the host calls [`Viewport::on_frame`](crate::Viewport::on_frame).
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameRequestId;
    fn cancel_frame(&mut self, id: FrameRequestId);
}

/// Scheduler for hosts that call `on_frame` every frame regardless.
#[derive(Debug, Clone, Default)]
pub struct ContinuousFrames {
    next_id: u64,
}

impl FrameScheduler for ContinuousFrames {
    fn request_frame(&mut self) -> FrameRequestId {
        self.next_id += 1;
        FrameRequestId(self.next_id)
    }

    fn cancel_frame(&mut self, _id: FrameRequestId) {}
}

/// What an animation run is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationKind {
    /// Inertial motion after a pan or pinch release
    Fling,
    /// Eased return of an out-of-bounds translation
    SpringBack,
    /// Eased change to a target scale and translation (reset, double tap)
    EaseReset,
}

/// Result of stepping the animator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStatus {
    /// Nothing was animating
    Idle,
    /// A run is still in progress; another frame has been requested
    Running(AnimationKind),
    /// The given run finished this frame and the transform is at rest
    Settled(AnimationKind),
}

#[derive(Debug, Clone, Copy)]
enum AnimationRun {
    Fling(Fling),
    Tween { kind: AnimationKind, tween: Tween },
}

impl AnimationRun {
    fn kind(&self) -> AnimationKind {
        match self {
            AnimationRun::Fling(_) => AnimationKind::Fling,
            AnimationRun::Tween { kind, .. } => *kind,
        }
    }
}

/// Single-slot animation runner.
pub struct Animator {
    run: Option<AnimationRun>,
    pending_frame: Option<FrameRequestId>,
    scheduler: Box<dyn FrameScheduler>,
}

impl Animator {
    pub fn new(scheduler: Box<dyn FrameScheduler>) -> Self {
        Self {
            run: None,
            pending_frame: None,
            scheduler,
        }
    }

    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    pub fn kind(&self) -> Option<AnimationKind> {
        self.run.as_ref().map(AnimationRun::kind)
    }

    /// Whether a frame callback is outstanding with the host.
    pub fn has_pending_frame(&self) -> bool {
        self.pending_frame.is_some()
    }

    /// Stop the current run and synchronously cancel its frame request.
    pub fn cancel(&mut self) -> Option<AnimationKind> {
        if let Some(id) = self.pending_frame.take() {
            self.scheduler.cancel_frame(id);
        }
        let cancelled = self.run.take().map(|run| run.kind());
        if let Some(kind) = cancelled {
            log::debug!("Cancelled {:?} animation", kind);
        }
        cancelled
    }

    /// Start a fling, or go straight to spring-back if `velocity` is already below the stop speed.
    pub fn start_fling(
        &mut self,
        velocity: Point,
        transform: &ViewportTransform,
        layout: &Layout,
        config: &ViewportConfig,
        now: Timestamp,
    ) -> Option<AnimationKind> {
        let params = FlingParams::from_config(config);
        if !velocity.is_finite() || velocity.length() < params.stop_speed {
            let bounds = layout.bounds(transform.scale);
            return self
                .start_spring_back(transform, &bounds, config.settle_duration_ms, now)
                .then_some(AnimationKind::SpringBack);
        }
        log::debug!("Fling at ({:.0}, {:.0}) px/s", velocity.x, velocity.y);
        self.start(AnimationRun::Fling(Fling::new(velocity, params, now)));
        Some(AnimationKind::Fling)
    }

    /// Ease the translation back inside `bounds`. Returns `false` (and cancels
    /// any run) when the transform is already in bounds.
    pub fn start_spring_back(
        &mut self,
        transform: &ViewportTransform,
        bounds: &Bounds,
        duration_ms: f64,
        now: Timestamp,
    ) -> bool {
        let target = transform.clamped(bounds);
        if target == *transform {
            self.cancel();
            return false;
        }
        log::debug!(
            "Spring back from ({:.1}, {:.1}) to ({:.1}, {:.1})",
            transform.translate_x,
            transform.translate_y,
            target.translate_x,
            target.translate_y
        );
        self.start(AnimationRun::Tween {
            kind: AnimationKind::SpringBack,
            tween: Tween::new(*transform, target, now, duration_ms),
        });
        true
    }

    /// Ease from `from` to `to`.
    pub fn start_ease(
        &mut self,
        from: ViewportTransform,
        to: ViewportTransform,
        duration_ms: f64,
        now: Timestamp,
    ) {
        log::debug!("Ease from {:.2}x to {:.2}x", from.scale, to.scale);
        self.start(AnimationRun::Tween {
            kind: AnimationKind::EaseReset,
            tween: Tween::new(from, to, now, duration_ms),
        });
    }

    /// Advance the current run to `now`, writing into `transform`.
    ///
    /// Call when a requested frame fires. A finished fling hands over to
    /// spring-back within the same call.
    pub fn step(
        &mut self,
        now: Timestamp,
        transform: &mut ViewportTransform,
        layout: &Layout,
        config: &ViewportConfig,
    ) -> AnimationStatus {
        // The frame we asked for is the one being delivered
        self.pending_frame = None;

        let Some(run) = self.run.take() else {
            return AnimationStatus::Idle;
        };

        match run {
            AnimationRun::Fling(mut fling) => {
                let bounds = layout.bounds(transform.scale);
                let mut translate = transform.translate();
                let moving = fling.step(now, &mut translate, &bounds);
                transform.set_translate(translate);

                if moving {
                    self.run = Some(AnimationRun::Fling(fling));
                    self.request_frame();
                    log::trace!("Fling at ({:.1}, {:.1})", translate.x, translate.y);
                    AnimationStatus::Running(AnimationKind::Fling)
                } else if self.start_spring_back(transform, &bounds, config.settle_duration_ms, now) {
                    AnimationStatus::Running(AnimationKind::SpringBack)
                } else {
                    AnimationStatus::Settled(AnimationKind::Fling)
                }
            }
            AnimationRun::Tween { kind, tween } => {
                let (value, done) = tween.sample(now);
                *transform = value;
                if done {
                    log::trace!("{:?} settled at {:?}", kind, value);
                    AnimationStatus::Settled(kind)
                } else {
                    self.run = Some(AnimationRun::Tween { kind, tween });
                    self.request_frame();
                    AnimationStatus::Running(kind)
                }
            }
        }
    }

    fn start(&mut self, run: AnimationRun) {
        self.cancel();
        self.run = Some(run);
        self.request_frame();
    }

    fn request_frame(&mut self) {
        if self.pending_frame.is_none() {
            self.pending_frame = Some(self.scheduler.request_frame());
        }
    }
}
