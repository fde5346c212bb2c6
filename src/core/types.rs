//! Core data types.
//!
//! - [`Sample`]: one 6-axis IMU reading as delivered on the wire
//! - [`Orientation`]: fused roll/pitch/yaw estimate in degrees

use std::fmt;

/// One 6-axis IMU reading.
///
/// Field order matches the wire format `ax,ay,az,gx,gy,gz`.
/// No range checks are applied; the estimator tolerates implausible values.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sample {
    /// Acceleration along body X (m/s²)
    pub ax: f64,
    /// Acceleration along body Y (m/s²)
    pub ay: f64,
    /// Acceleration along body Z (m/s²)
    pub az: f64,
    /// Angular rate about body X (rad/s)
    pub gx: f64,
    /// Angular rate about body Y (rad/s)
    pub gy: f64,
    /// Angular rate about body Z (rad/s)
    pub gz: f64,
}

impl Sample {
    /// Create a sample from its six components in wire order.
    pub fn new(ax: f64, ay: f64, az: f64, gx: f64, gy: f64, gz: f64) -> Self {
        Self {
            ax,
            ay,
            az,
            gx,
            gy,
            gz,
        }
    }

    /// Accelerometer triple (m/s²).
    #[inline]
    pub fn accel(&self) -> [f64; 3] {
        [self.ax, self.ay, self.az]
    }

    /// Gyroscope triple (rad/s).
    #[inline]
    pub fn gyro(&self) -> [f64; 3] {
        [self.gx, self.gy, self.gz]
    }

    /// True when every component is a finite number.
    pub fn is_finite(&self) -> bool {
        self.accel().iter().chain(self.gyro().iter()).all(|v| v.is_finite())
    }
}

/// Fused attitude estimate in degrees.
///
/// Angles are unbounded: they are not wrapped to ±180°.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    /// Rotation about the forward axis (degrees)
    pub roll: f64,
    /// Rotation about the right axis (degrees)
    pub pitch: f64,
    /// Rotation about the vertical axis (degrees)
    pub yaw: f64,
}

impl Orientation {
    pub fn new(roll: f64, pitch: f64, yaw: f64) -> Self {
        Self { roll, pitch, yaw }
    }

    /// Level attitude, all angles zero.
    pub fn zero() -> Self {
        Self::default()
    }

    /// `(roll, pitch, yaw)` in degrees.
    #[inline]
    pub fn as_tuple(&self) -> (f64, f64, f64) {
        (self.roll, self.pitch, self.yaw)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "roll={:.2}° pitch={:.2}° yaw={:.2}°",
            self.roll, self.pitch, self.yaw
        )
    }
}
