//! Core foundation layer.
//!
//! Bottom layer with no internal dependencies. Everything else builds on it.
//!
//! # Contents
//!
//! - [`types`]: Sample and orientation value types
//! - [`math`]: Degree conversion and gravity-projection tilt

pub mod math;
pub mod types;
