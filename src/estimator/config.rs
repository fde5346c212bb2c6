//! Validated filter configuration and time-step policy.

use crate::error::{Error, Result};
use std::time::{Duration, Instant};

/// Default gyro weight.
pub const DEFAULT_ALPHA: f64 = 0.98;

/// Default largest accepted gap between updates (seconds).
pub const DEFAULT_MAX_DT: f64 = 0.1;

/// Immutable complementary-filter configuration.
///
/// Construct through [`FilterConfig::new`]; out-of-range values are rejected,
/// never clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterConfig {
    alpha: f64,
    max_dt: f64,
}

/// Outcome of the time-step gate for one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeStep {
    /// Elapsed time in seconds, within `(0, max_dt]`
    Accepted(f64),
    /// `now` is at or before the last accepted update
    NonPositive,
    /// Gap in seconds longer than `max_dt`
    Stale(f64),
}

impl TimeStep {
    #[inline]
    pub fn is_accepted(&self) -> bool {
        matches!(self, TimeStep::Accepted(_))
    }
}

impl FilterConfig {
    /// Create a configuration.
    ///
    /// # Arguments
    ///
    /// * `alpha` - Gyro weight in `[0, 1]`. 1.0 ignores the accelerometer,
    ///   0.0 ignores gyro history for roll and pitch.
    /// * `max_dt` - Largest accepted gap between updates in seconds, `> 0`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfig`] when either value is out of range or not finite.
    pub fn new(alpha: f64, max_dt: f64) -> Result<Self> {
        if !alpha.is_finite() || !(0.0..=1.0).contains(&alpha) {
            return Err(Error::InvalidConfig {
                field: "alpha",
                reason: format!("must be within [0, 1], got {}", alpha),
            });
        }
        if !max_dt.is_finite() || max_dt <= 0.0 {
            return Err(Error::InvalidConfig {
                field: "max_dt",
                reason: format!("must be a positive number of seconds, got {}", max_dt),
            });
        }
        Ok(Self { alpha, max_dt })
    }

    /// Gyro weight.
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Largest accepted gap between updates (seconds).
    #[inline]
    pub fn max_dt(&self) -> f64 {
        self.max_dt
    }

    /// Classify the step from `last` to `now`.
    pub fn classify(&self, last: Instant, now: Instant) -> TimeStep {
        match now.checked_duration_since(last) {
            Some(elapsed) if elapsed > Duration::ZERO => self.classify_secs(elapsed.as_secs_f64()),
            _ => TimeStep::NonPositive,
        }
    }

    /// Classify an elapsed time given in seconds.
    pub fn classify_secs(&self, dt: f64) -> TimeStep {
        if dt <= 0.0 || dt.is_nan() {
            TimeStep::NonPositive
        } else if dt > self.max_dt {
            TimeStep::Stale(dt)
        } else {
            TimeStep::Accepted(dt)
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            max_dt: DEFAULT_MAX_DT,
        }
    }
}
