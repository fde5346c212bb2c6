//! Disha - Orientation estimation for 6-axis IMU streams
//!
//! Fuses accelerometer tilt with gyroscope integration through a
//! complementary filter and reports roll, pitch and yaw in degrees.
//!
//! ## Features
//!
//! - `mock`: Enable the in-memory `MockTransport` for hardware-free testing
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                  app / main                         │  ← Viewer loop
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌──────────────────────┐   ┌──────────────────────────┐
//! │  ingestion/          │   │  display, input          │  ← Collaborators
//! │  (framing, parsing)  │   │  (OSD text, yaw toggle)  │
//! └──────────────────────┘   └──────────────────────────┘
//!            │
//! ┌──────────────────────┐
//! │  transport/          │                                ← Byte sources
//! │  (serial, replay)    │
//! └──────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                  estimator/                         │  ← Filter core
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                    core/                            │  ← Types, math
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use disha::{FilterConfig, OrientationState, Sample, current, update};
//! use std::time::{Duration, Instant};
//!
//! let config = FilterConfig::new(0.98, 0.1)?;
//! let start = Instant::now();
//! let state = OrientationState::new(start);
//!
//! let sample = Sample::new(0.0, 0.0, 9.81, 0.0, 0.0, 0.1);
//! let state = update(state, &config, sample, start + Duration::from_millis(20));
//!
//! let (roll, pitch, yaw) = current(&state).as_tuple();
//! assert_eq!((roll, pitch), (0.0, 0.0));
//! assert!(yaw > 0.0);
//! # Ok::<(), disha::Error>(())
//! ```

pub mod app;
pub mod config;
pub mod core;
pub mod display;
pub mod error;
pub mod estimator;
pub mod ingestion;
pub mod input;
pub mod signal;
pub mod transport;

// Re-export commonly used types
pub use app::{TickOutcome, ViewerApp, ViewerStats};
pub use config::AppConfig;
pub use crate::core::types::{Orientation, Sample};
pub use error::{Error, Result};
pub use estimator::{
    ComplementaryFilter, FilterConfig, OrientationState, TimeStep, current, update,
};
pub use ingestion::{LineSampleSource, SampleSource, parse_sample};
