//! Scenario tests for the whole viewport.
//!
//! These tests drive a [`Viewport`] through pointer sequences the way a host
//! page would, delivering animation frames from a recording scheduler.

mod script_tests;

use crate::physics::tests::RecordingScheduler;
use crate::{
    AnimationStatus, GestureOutcome, GestureSignal, PointerEvent, PointerPhase, Size, StaticMeasure, Timestamp,
    Viewport, ViewportConfig,
};
use std::sync::mpsc::{self, Receiver};

/// Frame interval used when settling animations.
pub(crate) const FRAME_MS: f64 = 16.0;

pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A viewport wired to a recording scheduler and a signal channel.
pub(crate) struct Harness {
    pub(crate) view: Viewport,
    pub(crate) frames: RecordingScheduler,
    pub(crate) signals: Receiver<GestureSignal>,
    /// Clock of the last event or frame delivered
    pub(crate) now: f64,
}

impl Harness {
    /// 300x300 container showing a 1200x600 image: 300x150 at 1x, 2x bounds are (150, 0).
    pub(crate) fn new() -> Self {
        Self::with(ViewportConfig::default(), Size::new(300.0, 300.0), Size::new(1200.0, 600.0))
    }

    /// 300x300 container showing a square image that fills it.
    pub(crate) fn square() -> Self {
        Self::with(ViewportConfig::default(), Size::new(300.0, 300.0), Size::new(300.0, 300.0))
    }

    pub(crate) fn with(config: ViewportConfig, container: Size, natural: Size) -> Self {
        init_logging();
        let frames = RecordingScheduler::default();
        let (tx, signals) = mpsc::channel();
        let view = Viewport::new(
            config,
            Box::new(StaticMeasure::new(container, natural)),
            Box::new(tx),
            Box::new(frames.clone()),
        )
        .expect("valid test config");
        Self {
            view,
            frames,
            signals,
            now: 0.0,
        }
    }

    pub(crate) fn send(&mut self, event: PointerEvent) -> GestureOutcome {
        self.now = self.now.max(event.timestamp.as_millis());
        self.view.handle_pointer(&event)
    }

    /// Deliver frames every [`FRAME_MS`] until none is requested. Returns the number delivered.
    pub(crate) fn settle(&mut self) -> usize {
        let mut delivered = 0;
        while self.frames.fire() > 0 {
            self.now += FRAME_MS;
            let status = self.view.on_frame(Timestamp::from_millis(self.now));
            delivered += 1;
            assert!(delivered < 10_000, "animation never settled: {:?}", status);
            if matches!(status, AnimationStatus::Settled(_)) {
                assert_eq!(self.frames.outstanding(), 0, "settled run left a frame request");
            }
        }
        delivered
    }

    /// Mouse double click at `(x, y)` followed by settling the zoom animation.
    pub(crate) fn double_tap(&mut self, x: f32, y: f32) -> GestureOutcome {
        let t = self.now + 500.0;
        self.send(PointerEvent::mouse(PointerPhase::Down, x, y, t));
        self.send(PointerEvent::mouse(PointerPhase::Up, x, y, t + 40.0));
        let outcome = self.send(PointerEvent::mouse(PointerPhase::Down, x, y, t + 150.0));
        self.send(PointerEvent::mouse(PointerPhase::Up, x, y, t + 190.0));
        self.settle();
        outcome
    }

    pub(crate) fn drain_signals(&self) -> Vec<GestureSignal> {
        self.signals.try_iter().collect()
    }

    /// Current translation bounds.
    pub(crate) fn bounds(&self) -> crate::Bounds {
        self.view.layout().bounds(self.view.transform().scale)
    }
}

/// Assert `signals` alternate Start, End, Start, End, ... with non-decreasing times.
pub(crate) fn assert_paired(signals: &[GestureSignal]) {
    let mut open = false;
    let mut last = f64::NEG_INFINITY;
    for signal in signals {
        match signal {
            GestureSignal::Start { .. } => assert!(!open, "Start without End in {:?}", signals),
            GestureSignal::End { .. } => assert!(open, "End without Start in {:?}", signals),
        }
        open = !open;
        assert!(signal.at().as_millis() >= last);
        last = signal.at().as_millis();
    }
    assert!(!open, "unterminated Start in {:?}", signals);
}
