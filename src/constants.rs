//! Tuning constants for the viewport engine.
//!
//! Values that hosts may want to change are mirrored in
//! [`ViewportConfig`](crate::ViewportConfig); these are the defaults.

/// Zoom limits and double-tap targets.
pub mod zoom {
    /// Scale at which the contain-fit image exactly fits the container
    pub const MIN_SCALE: f32 = 1.0;
    /// Default upper zoom clamp
    pub const MAX_SCALE: f32 = 4.0;
    /// Scale a double tap zooms to from 1x
    pub const DOUBLE_TAP_SCALE: f32 = 2.0;
    /// Above this scale a double tap resets to 1x instead of zooming in
    pub const DOUBLE_TAP_RESET_THRESHOLD: f32 = 1.1;
}

/// Gesture classification thresholds.
pub mod gesture {
    /// Max gap between the first tap's release and the second press (ms)
    pub const DOUBLE_TAP_WINDOW_MS: f64 = 400.0;
    /// Max distance between the two taps of a double tap (px)
    pub const DOUBLE_TAP_SLOP: f32 = 30.0;
    /// Max movement for a press to still count as a tap (px)
    pub const TAP_SLOP: f32 = 10.0;
    /// A release this long after the last move carries no velocity (ms)
    pub const VELOCITY_STALE_MS: f64 = 100.0;
    /// Weight of the newest sample in the smoothed release velocity
    pub const VELOCITY_SMOOTHING: f32 = 0.8;
    /// A touch without a session that has not moved for this long is treated as lifted (ms)
    pub const CONTACT_STALE_MS: f64 = 1000.0;
    /// Lower bound on finger distance so pinch ratios stay finite (px)
    pub const MIN_PINCH_DISTANCE: f32 = 1.0;
}

/// Fling and settle animation parameters.
pub mod physics {
    /// Velocity retained per reference frame
    pub const FLING_DECAY: f32 = 0.95;
    /// Frame rate the decay factor is expressed against
    pub const REFERENCE_FPS: f32 = 60.0;
    /// Fling ends below this speed (px/s)
    pub const FLING_STOP_SPEED: f32 = 20.0;
    /// Distance a fling may travel past the bounds before spring-back (px)
    pub const FLING_OVERSHOOT: f32 = 100.0;
    /// Velocity multiplier applied on an axis that is past its bound
    pub const BOUND_DAMPING: f32 = 0.5;
    /// Duration of spring-back and ease-reset (ms)
    pub const SETTLE_DURATION_MS: f64 = 300.0;
    /// Longest time step a single fling frame integrates (s)
    pub const MAX_FRAME_DT: f32 = 1.0 / 15.0;
}

/// Crop rectangle editing.
pub mod crop {
    /// Edge length of a resize handle's hit box (px)
    pub const HANDLE_SIZE: f32 = 8.0;
    /// Extra hit padding around each handle, on all sides (px)
    pub const HANDLE_TOUCH_TOLERANCE: f32 = 6.0;
    /// Movement before a drawn selection comes into existence (px)
    pub const DRAW_THRESHOLD: f32 = 5.0;
    /// Smallest allowed crop width/height (px)
    pub const MIN_SIZE: f32 = 1.0;
}

/// Outer swipe coordination.
pub mod signals {
    /// Swipe is force re-enabled after this long without a gesture end (ms)
    pub const SWIPE_FAILSAFE_MS: f64 = 5000.0;
}
