//! Viewport configuration.
//!
//! Hosts can ship a JSON file to tune gesture and physics behaviour. Every
//! field is optional; missing fields take the defaults from [`crate::constants`].

use crate::constants::{crop, gesture, physics, signals, zoom};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Log level setting for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Tunable behaviour of a [`Viewport`](crate::Viewport).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Version of the configuration file format
    pub version: u32,
    /// Upper zoom clamp; the lower clamp is always 1
    pub max_scale: f32,
    /// Scale a double tap zooms to (clamped to `max_scale`)
    pub double_tap_scale: f32,
    /// Max gap between the first tap's release and the second press
    pub double_tap_window_ms: f64,
    /// Fraction of fling velocity kept per 1/60 s
    pub fling_decay: f32,
    /// Fling hands off to spring-back below this speed (px/s)
    pub fling_stop_speed: f32,
    /// How far a fling may run past the bounds; 0 clamps hard
    pub fling_overshoot: f32,
    /// Duration of spring-back and ease-reset animations
    pub settle_duration_ms: f64,
    /// Crop handle hit box edge length
    pub handle_size: f32,
    /// Extra hit padding around crop handles
    pub handle_touch_tolerance: f32,
    /// Movement before a drawn crop selection exists
    pub draw_threshold: f32,
    /// Outer swipe is force re-enabled after this long without a gesture end
    pub swipe_failsafe_ms: f64,
    /// Log verbosity level
    pub log_level: LogLevel,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            max_scale: zoom::MAX_SCALE,
            double_tap_scale: zoom::DOUBLE_TAP_SCALE,
            double_tap_window_ms: gesture::DOUBLE_TAP_WINDOW_MS,
            fling_decay: physics::FLING_DECAY,
            fling_stop_speed: physics::FLING_STOP_SPEED,
            fling_overshoot: physics::FLING_OVERSHOOT,
            settle_duration_ms: physics::SETTLE_DURATION_MS,
            handle_size: crop::HANDLE_SIZE,
            handle_touch_tolerance: crop::HANDLE_TOUCH_TOLERANCE,
            draw_threshold: crop::DRAW_THRESHOLD,
            swipe_failsafe_ms: signals::SWIPE_FAILSAFE_MS,
            log_level: LogLevel::default(),
        }
    }
}

impl ViewportConfig {
    /// Parse and validate a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ViewportConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The scale a double tap zooms to, never above `max_scale`.
    pub fn double_tap_target(&self) -> f32 {
        self.double_tap_scale.min(self.max_scale)
    }

    /// Check that every value is usable by the engine.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version > CONFIG_VERSION {
            return Err(ConfigError::VersionMismatch {
                expected: CONFIG_VERSION,
                found: self.version,
            });
        }
        if !(self.max_scale.is_finite() && self.max_scale >= zoom::MIN_SCALE) {
            return Err(ConfigError::invalid_value(
                "max_scale",
                format!("must be a finite value >= 1, got {}", self.max_scale),
            ));
        }
        if !(self.double_tap_scale.is_finite() && self.double_tap_scale >= zoom::MIN_SCALE) {
            return Err(ConfigError::invalid_value(
                "double_tap_scale",
                format!("must be a finite value >= 1, got {}", self.double_tap_scale),
            ));
        }
        if !(self.fling_decay > 0.0 && self.fling_decay < 1.0) {
            return Err(ConfigError::invalid_value(
                "fling_decay",
                format!("must be in (0, 1), got {}", self.fling_decay),
            ));
        }
        if !(self.fling_stop_speed.is_finite() && self.fling_stop_speed > 0.0) {
            return Err(ConfigError::invalid_value("fling_stop_speed", "must be positive"));
        }
        check_non_negative("fling_overshoot", self.fling_overshoot)?;
        check_non_negative("handle_size", self.handle_size)?;
        check_non_negative("handle_touch_tolerance", self.handle_touch_tolerance)?;
        check_non_negative("draw_threshold", self.draw_threshold)?;
        if !(self.double_tap_window_ms.is_finite() && self.double_tap_window_ms >= 0.0) {
            return Err(ConfigError::invalid_value("double_tap_window_ms", "must not be negative"));
        }
        if !(self.settle_duration_ms.is_finite() && self.settle_duration_ms > 0.0) {
            return Err(ConfigError::invalid_value("settle_duration_ms", "must be positive"));
        }
        if !(self.swipe_failsafe_ms.is_finite() && self.swipe_failsafe_ms > 0.0) {
            return Err(ConfigError::invalid_value("swipe_failsafe_ms", "must be positive"));
        }
        Ok(())
    }
}

fn check_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid_value(
            field,
            format!("must be a finite value >= 0, got {}", value),
        ))
    }
}
