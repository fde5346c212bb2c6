//! Orientation estimation.
//!
//! # Components
//!
//! - [`FilterConfig`]: validated blend weight and time-step limit
//! - [`OrientationState`] with [`update`] / [`current`]: explicit state passing
//! - [`ComplementaryFilter`]: owning wrapper around the same update rule
//!
//! The estimator never logs and never fails on numeric input; timing anomalies
//! are reported through [`TimeStep`] for callers that want to count them.

mod complementary;
mod config;

pub use complementary::{
    ComplementaryFilter, OrientationState, current, update, update_with_step,
};
pub use config::{DEFAULT_ALPHA, DEFAULT_MAX_DT, FilterConfig, TimeStep};
