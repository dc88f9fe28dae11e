//! Host timestamps.

use serde::{Deserialize, Serialize};
use web_time::Instant;

/// Milliseconds on the host's monotonic clock.
///
/// Browsers hand these out as `performance.now()` and as the `timeStamp` of
/// every DOM event, so events and animation frames share one time base.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub f64);

impl Timestamp {
    pub fn from_millis(millis: f64) -> Self {
        Self(millis)
    }

    pub fn as_millis(self) -> f64 {
        self.0
    }

    /// Milliseconds elapsed since `earlier`, never negative.
    pub fn millis_since(self, earlier: Timestamp) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }

    /// Seconds elapsed since `earlier`, never negative.
    pub fn seconds_since(self, earlier: Timestamp) -> f32 {
        (self.millis_since(earlier) / 1000.0) as f32
    }
}

/// Produces [`Timestamp`]s for hosts without their own event clock.
///
/// Uses `web_time::Instant` so the same code runs natively and on wasm32.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Milliseconds since the clock was created.
    pub fn now(&self) -> Timestamp {
        Timestamp(self.origin.elapsed().as_secs_f64() * 1000.0)
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}
