//! Complementary filter for accelerometer + gyroscope attitude fusion.
//!
//! # Why Complementary Filter?
//!
//! | Source        | Strength                         | Weakness                     |
//! |---------------|----------------------------------|------------------------------|
//! | Accelerometer | Absolute tilt, no drift          | Noisy, corrupted by motion   |
//! | Gyroscope     | Smooth short-term rotation       | Integrates bias → drift      |
//!
//! Roll and pitch are blended:
//! ```text
//! θ = α × (θ_prev + ω × dt) + (1 - α) × θ_accel
//! ```
//! Yaw has no gravity reference, so it is pure gyro dead reckoning and drifts
//! without bound.

use super::config::{FilterConfig, TimeStep};
use crate::core::math::{accel_pitch, accel_roll, degrees};
use crate::core::types::{Orientation, Sample};
use std::time::Instant;

/// Filter state threaded through [`update`].
///
/// `last_update` only moves forward, and only on accepted samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationState {
    roll: f64,
    pitch: f64,
    yaw: f64,
    last_update: Instant,
}

impl OrientationState {
    /// Level state (all angles zero) starting at `start`.
    pub fn new(start: Instant) -> Self {
        Self::with_orientation(Orientation::zero(), start)
    }

    /// State holding `orientation`, starting at `start`.
    pub fn with_orientation(orientation: Orientation, start: Instant) -> Self {
        Self {
            roll: orientation.roll,
            pitch: orientation.pitch,
            yaw: orientation.yaw,
            last_update: start,
        }
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        Orientation::new(self.roll, self.pitch, self.yaw)
    }

    /// Instant of the last accepted update (or the start instant).
    #[inline]
    pub fn last_update(&self) -> Instant {
        self.last_update
    }
}

/// Advance `state` by one sample.
///
/// Returns `state` unchanged when the step from `state.last_update()` to `now`
/// is non-positive or longer than `config.max_dt()`.
pub fn update(
    state: OrientationState,
    config: &FilterConfig,
    sample: Sample,
    now: Instant,
) -> OrientationState {
    update_with_step(state, config, sample, now).0
}

/// [`update`] that also reports how the time-step gate classified the sample.
pub fn update_with_step(
    state: OrientationState,
    config: &FilterConfig,
    sample: Sample,
    now: Instant,
) -> (OrientationState, TimeStep) {
    let step = config.classify(state.last_update, now);
    let TimeStep::Accepted(dt) = step else {
        return (state, step);
    };

    let roll_accel = accel_roll(sample.ay, sample.az);
    let pitch_accel = accel_pitch(sample.ax, sample.ay, sample.az);

    let roll_gyro = state.roll + degrees(sample.gx) * dt;
    let pitch_gyro = state.pitch + degrees(sample.gy) * dt;
    let yaw_gyro = state.yaw + degrees(sample.gz) * dt;

    let alpha = config.alpha();
    let next = OrientationState {
        roll: alpha * roll_gyro + (1.0 - alpha) * roll_accel,
        pitch: alpha * pitch_gyro + (1.0 - alpha) * pitch_accel,
        yaw: yaw_gyro,
        last_update: now,
    };
    (next, step)
}

/// Current `(roll, pitch, yaw)` estimate.
#[inline]
pub fn current(state: &OrientationState) -> Orientation {
    state.orientation()
}

/// Complementary filter owning its configuration and state.
///
/// # Usage
///
/// ```
/// use disha::{ComplementaryFilter, FilterConfig, Sample};
/// use std::time::{Duration, Instant};
///
/// let start = Instant::now();
/// let mut filter = ComplementaryFilter::new_at(FilterConfig::default(), start);
///
/// let level = Sample::new(0.0, 0.0, 9.81, 0.0, 0.0, 0.0);
/// let orientation = filter.update(level, start + Duration::from_millis(20));
/// assert_eq!(orientation.as_tuple(), (0.0, 0.0, 0.0));
/// ```
#[derive(Debug)]
pub struct ComplementaryFilter {
    config: FilterConfig,
    state: OrientationState,
}

impl ComplementaryFilter {
    /// Create a level filter whose clock starts now.
    pub fn new(config: FilterConfig) -> Self {
        Self::new_at(config, Instant::now())
    }

    /// Create a level filter whose clock starts at `start`.
    pub fn new_at(config: FilterConfig, start: Instant) -> Self {
        Self {
            config,
            state: OrientationState::new(start),
        }
    }

    /// Get the current orientation estimate.
    pub fn orientation(&self) -> Orientation {
        current(&self.state)
    }

    pub fn state(&self) -> &OrientationState {
        &self.state
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Reset to level, restarting the clock at `now`.
    pub fn reset(&mut self, now: Instant) {
        self.state = OrientationState::new(now);
    }

    /// Reset to a specific orientation, restarting the clock at `now`.
    pub fn reset_to(&mut self, orientation: Orientation, now: Instant) {
        self.state = OrientationState::with_orientation(orientation, now);
    }

    /// Keep the current angles but restart the clock at `now`.
    ///
    /// Used after a stale gap so the following sample is measured from `now`
    /// instead of from the last accepted update.
    pub fn resync(&mut self, now: Instant) {
        self.reset_to(self.orientation(), now);
    }

    /// Fuse one sample taken at `now` and return the new estimate.
    pub fn update(&mut self, sample: Sample, now: Instant) -> Orientation {
        self.update_with_step(sample, now).0
    }

    /// Fuse one sample and report the time-step classification.
    pub fn update_with_step(&mut self, sample: Sample, now: Instant) -> (Orientation, TimeStep) {
        let (state, step) = update_with_step(self.state, &self.config, sample, now);
        self.state = state;
        (self.orientation(), step)
    }
}
