//! Gesture start/end signals for the outer swipe container.
//!
//! While a pinch, a pan of a zoomed image or a crop drag is live, the
//! horizontal view-swiper around the editor must not react to the same
//! pointer. The engine emits paired [`GestureSignal`]s into an injected
//! [`SignalSink`]; [`SwipeGuard`] is the swiper's side of that contract,
//! including the fail-safe for a lost `End`.

use crate::config::ViewportConfig;
use crate::constants::signals::SWIPE_FAILSAFE_MS;
use daylens_input::Timestamp;
use serde::Serialize;
use std::sync::mpsc::Sender;

/// Outbound coordination signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GestureSignal {
    /// A gesture took ownership of the pointer; suspend swiping
    Start { at: Timestamp },
    /// The gesture ended; swiping may resume
    End { at: Timestamp },
}

impl GestureSignal {
    pub fn at(&self) -> Timestamp {
        match self {
            GestureSignal::Start { at } | GestureSignal::End { at } => *at,
        }
    }
}

/// Receives gesture signals.
pub trait SignalSink {
    fn emit(&mut self, signal: GestureSignal);
}

impl SignalSink for Sender<GestureSignal> {
    fn emit(&mut self, signal: GestureSignal) {
        if self.send(signal).is_err() {
            log::debug!("Signal receiver dropped, discarding {:?}", signal);
        }
    }
}

/// A sink that ignores every signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl SignalSink for NullSink {
    fn emit(&mut self, _signal: GestureSignal) {}
}

/// Keeps `Start`/`End` strictly paired no matter how sessions hand over.
pub(crate) struct SignalGate {
    sink: Box<dyn SignalSink>,
    started: bool,
}

impl SignalGate {
    pub(crate) fn new(sink: Box<dyn SignalSink>) -> Self {
        Self { sink, started: false }
    }

    pub(crate) fn is_started(&self) -> bool {
        self.started
    }

    pub(crate) fn start(&mut self, at: Timestamp) {
        if !self.started {
            self.started = true;
            self.sink.emit(GestureSignal::Start { at });
        }
    }

    pub(crate) fn end(&mut self, at: Timestamp) {
        if self.started {
            self.started = false;
            self.sink.emit(GestureSignal::End { at });
        }
    }
}

/// Swipe suspension state on the outer container's side.
///
/// Suspends on `Start`, resumes on `End`, and resumes by itself once the
/// fail-safe timeout passes without an `End`.
#[derive(Debug, Clone)]
pub struct SwipeGuard {
    suspended_since: Option<Timestamp>,
    failsafe_ms: f64,
}

impl Default for SwipeGuard {
    fn default() -> Self {
        Self::new(SWIPE_FAILSAFE_MS)
    }
}

impl SwipeGuard {
    pub fn new(failsafe_ms: f64) -> Self {
        Self {
            suspended_since: None,
            failsafe_ms,
        }
    }

    /// Guard using the configured `swipe_failsafe_ms`.
    pub fn from_config(config: &ViewportConfig) -> Self {
        Self::new(config.swipe_failsafe_ms)
    }

    pub fn on_signal(&mut self, signal: GestureSignal) {
        match signal {
            GestureSignal::Start { at } => self.suspended_since = Some(at),
            GestureSignal::End { .. } => self.suspended_since = None,
        }
    }

    /// Apply the fail-safe. Returns `true` if swiping was force re-enabled by this call.
    pub fn poll(&mut self, now: Timestamp) -> bool {
        match self.suspended_since {
            Some(since) if now.millis_since(since) >= self.failsafe_ms => {
                log::warn!(
                    "No gesture end within {} ms, re-enabling swipe",
                    self.failsafe_ms
                );
                self.suspended_since = None;
                true
            }
            _ => false,
        }
    }

    /// Whether the outer container may handle swipes at `now`.
    pub fn is_swipe_enabled(&mut self, now: Timestamp) -> bool {
        self.poll(now);
        self.suspended_since.is_none()
    }
}

impl SignalSink for SwipeGuard {
    fn emit(&mut self, signal: GestureSignal) {
        self.on_signal(signal);
    }
}
