//! daylens_input - pointer events and layout primitives for the daylens viewport
//!
//! Hosts translate their native input (DOM pointer/touch events, winit events, ...)
//! into [`PointerEvent`]s and report layout as [`Size`]s and [`Rect`]s in logical pixels.

mod clock;
mod event;
mod layout;

pub use clock::{MonotonicClock, Timestamp};
pub use event::{PointerEvent, PointerId, PointerKind, PointerPhase};
pub use layout::{Point, Rect, Size};
