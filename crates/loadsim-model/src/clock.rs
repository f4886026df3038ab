//! Injectable wall-clock abstraction.
//!
//! All "now" reads in the simulator go through [`Clock`] so tests can
//! time-travel (advance 31 seconds without sleeping) and so elapsed-time
//! arithmetic lives in one place.

use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the current time, in seconds since the Unix epoch.
pub trait Clock: Send + Sync {
    fn now_secs(&self) -> f64;
}

/// The real wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs_f64()
    }
}

/// A clock that only moves when told to. Test use only in spirit, but
/// exported so downstream crates can drive deterministic demos.
#[derive(Debug, Default)]
pub struct ManualClock {
    secs: Mutex<f64>,
}

impl ManualClock {
    /// Create a manual clock starting at the given epoch time.
    pub fn new(start_secs: f64) -> Self {
        Self {
            secs: Mutex::new(start_secs),
        }
    }

    /// Move the clock forward by `secs` seconds.
    pub fn advance(&self, secs: f64) {
        if let Ok(mut now) = self.secs.lock() {
            *now += secs;
        }
    }

    /// Set the clock to an absolute epoch time.
    pub fn set(&self, secs: f64) {
        if let Ok(mut now) = self.secs.lock() {
            *now = secs;
        }
    }
}

impl Clock for ManualClock {
    fn now_secs(&self) -> f64 {
        self.secs.lock().map(|now| *now).unwrap_or_default()
    }
}
