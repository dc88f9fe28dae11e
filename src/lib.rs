//! Daylens - interactive image viewport and crop engine
//!
//! Pinch, pan, double-tap and fling gestures over a contain-fit image, with
//! bounds clamping, frame-stepped animation, an aspect-lockable crop
//! rectangle and start/end signals for an enclosing swipe container.
//!
//! The engine is host agnostic: measurements come in through [`Measure`],
//! animation frames through [`FrameScheduler`], signals go out through
//! [`SignalSink`] and drawing happens in a [`Compositor`].

pub mod bounds;
pub mod config;
pub mod constants;
pub mod crop;
pub mod error;
pub mod gesture;
pub mod measure;
pub mod physics;
pub mod signals;
pub mod transform;
mod viewport;

pub use bounds::Bounds;
pub use config::{LogLevel, ViewportConfig};
pub use crop::{AspectLock, CropEditor, CropHit, HandleIndex};
pub use error::ConfigError;
pub use gesture::{GestureOutcome, GestureSession, SessionKind};
pub use measure::{Layout, Measure, StaticMeasure};
pub use physics::{AnimationKind, AnimationStatus, ContinuousFrames, FrameRequestId, FrameScheduler};
pub use signals::{GestureSignal, NullSink, SignalSink, SwipeGuard};
pub use transform::ViewportTransform;
pub use viewport::{Compositor, RenderFrame, Viewport};

pub use daylens_input::{
    MonotonicClock, Point, PointerEvent, PointerId, PointerKind, PointerPhase, Rect, Size, Timestamp,
};

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;

#[cfg(test)]
mod tests;
