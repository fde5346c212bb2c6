//! Gravity-projection trigonometry.
//!
//! Tilt angles are derived from the accelerometer alone, so they are only
//! meaningful while the body is not accelerating beyond gravity.

/// Radians to degrees.
#[inline]
pub fn degrees(rad: f64) -> f64 {
    rad.to_degrees()
}

/// Roll implied by the gravity vector, in degrees: `atan2(-ay, az)`.
///
/// With `ay = az = 0` the result is ±0°, never NaN.
///
/// # Example
/// ```
/// use disha::core::math::accel_roll;
///
/// assert!(accel_roll(0.0, 9.81).abs() < 1e-12);
/// assert!((accel_roll(-9.81, 0.0) - 90.0).abs() < 1e-12);
/// ```
#[inline]
pub fn accel_roll(ay: f64, az: f64) -> f64 {
    degrees((-ay).atan2(az))
}

/// Pitch implied by the gravity vector, in degrees:
/// `atan2(ax, sqrt(ay² + az²))`.
///
/// The two-argument form keeps the free-fall case defined: with
/// `ay = az = 0` the result is +90° for `ax > 0`, -90° for `ax < 0`
/// and 0° for `ax = 0`.
#[inline]
pub fn accel_pitch(ax: f64, ay: f64, az: f64) -> f64 {
    degrees(ax.atan2((ay * ay + az * az).sqrt()))
}
