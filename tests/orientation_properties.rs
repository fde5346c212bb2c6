//! Estimator Property Tests
//!
//! Synthetic sample sequences with exact timestamps, checking the filter
//! against closed-form expectations:
//! - Roll/pitch converge to the accelerometer tilt from any start
//! - Yaw is the plain integral of `gz`
//! - Rejected time steps leave the state untouched
//! - `alpha = 1` / `alpha = 0` reduce to pure gyro / pure accelerometer
//!
//! Run with: `cargo test --test orientation_properties`

use approx::assert_relative_eq;
use disha::{
    ComplementaryFilter, FilterConfig, Orientation, OrientationState, Sample, TimeStep, current,
    parse_sample, update,
};
use disha::estimator::update_with_step;
use std::time::{Duration, Instant};

const G: f64 = 9.81;

// ============================================================================
// Helpers
// ============================================================================

fn level() -> Sample {
    Sample::new(0.0, 0.0, G, 0.0, 0.0, 0.0)
}

/// Accelerometer reading for a body rolled by `deg` degrees, at rest
fn rolled(deg: f64) -> Sample {
    let r = deg.to_radians();
    Sample::new(0.0, -G * r.sin(), G * r.cos(), 0.0, 0.0, 0.0)
}

/// Accelerometer reading for a body pitched by `deg` degrees, at rest
fn pitched(deg: f64) -> Sample {
    let p = deg.to_radians();
    Sample::new(G * p.sin(), 0.0, G * p.cos(), 0.0, 0.0, 0.0)
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

// ============================================================================
// Convergence
// ============================================================================

#[test]
fn test_level_convergence_from_tilted_start() {
    let config = FilterConfig::new(0.98, 0.1).unwrap();
    let start = Instant::now();
    let mut state =
        OrientationState::with_orientation(Orientation::new(30.0, -20.0, 5.0), start);

    let mut now = start;
    for _ in 0..2000 {
        now += ms(10);
        state = update(state, &config, level(), now);
    }

    let o = current(&state);
    assert_relative_eq!(o.roll, 0.0, epsilon = 1e-6);
    assert_relative_eq!(o.pitch, 0.0, epsilon = 1e-6);
    // No gz, so yaw keeps its initial value
    assert_relative_eq!(o.yaw, 5.0, epsilon = 1e-12);
}

#[test]
fn test_convergence_to_static_tilt() {
    let start = Instant::now();
    let mut filter = ComplementaryFilter::new_at(FilterConfig::new(0.95, 0.1).unwrap(), start);

    let mut now = start;
    for _ in 0..1000 {
        now += ms(20);
        filter.update(rolled(25.0), now);
    }
    assert_relative_eq!(filter.orientation().roll, 25.0, epsilon = 1e-6);
    assert_relative_eq!(filter.orientation().pitch, 0.0, epsilon = 1e-6);

    for _ in 0..1000 {
        now += ms(20);
        filter.update(pitched(-40.0), now);
    }
    assert_relative_eq!(filter.orientation().roll, 0.0, epsilon = 1e-6);
    assert_relative_eq!(filter.orientation().pitch, -40.0, epsilon = 1e-6);
}

#[test]
fn test_convergence_is_geometric_in_alpha() {
    let alpha = 0.9;
    let config = FilterConfig::new(alpha, 0.1).unwrap();
    let start = Instant::now();
    let mut state = OrientationState::with_orientation(Orientation::new(10.0, 0.0, 0.0), start);

    let mut now = start;
    for n in 1..=20 {
        now += ms(10);
        state = update(state, &config, level(), now);
        assert_relative_eq!(current(&state).roll, 10.0 * alpha.powi(n), epsilon = 1e-9);
    }
}

// ============================================================================
// Yaw dead reckoning
// ============================================================================

#[test]
fn test_yaw_is_sum_of_gyro_increments() {
    let config = FilterConfig::new(0.98, 0.1).unwrap();
    let start = Instant::now();
    let mut state = OrientationState::with_orientation(Orientation::new(0.0, 0.0, 12.0), start);

    // (gap in ms, gz in rad/s); accelerometer deliberately varies
    let steps: [(u64, f64); 8] = [
        (10, 0.5),
        (20, -0.25),
        (5, 1.0),
        (50, 0.0),
        (15, -2.0),
        (100, 0.3),
        (1, 3.0),
        (33, -0.7),
    ];

    let mut now = start;
    let mut expected = 12.0;
    for (i, &(gap, gz)) in steps.iter().enumerate() {
        now += ms(gap);
        let sample = Sample::new(i as f64, -(i as f64), G, 0.2, -0.1, gz);
        state = update(state, &config, sample, now);
        expected += gz.to_degrees() * (gap as f64 / 1000.0);
    }

    assert_relative_eq!(current(&state).yaw, expected, epsilon = 1e-9);
}

#[test]
fn test_yaw_skips_rejected_samples() {
    let config = FilterConfig::new(0.98, 0.1).unwrap();
    let start = Instant::now();
    let spin = Sample::new(0.0, 0.0, G, 0.0, 0.0, 1.0);

    let state = update(OrientationState::new(start), &config, spin, start + ms(50));
    // Stale gap: not integrated
    let state = update(state, &config, spin, start + ms(500));
    // Duplicate timestamp: not integrated
    let state = update(state, &config, spin, start + ms(50));

    assert_relative_eq!(current(&state).yaw, 1.0_f64.to_degrees() * 0.05, epsilon = 1e-9);
    assert_eq!(state.last_update(), start + ms(50));
}

// ============================================================================
// Time-step gate
// ============================================================================

#[test]
fn test_rejection_idempotence() {
    let config = FilterConfig::new(0.98, 0.1).unwrap();
    let start = Instant::now() + ms(1000);
    let state = OrientationState::with_orientation(Orientation::new(1.5, -2.5, 90.0), start);
    let sample = Sample::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);

    let same = update(state, &config, sample, start);
    assert_eq!(same, state);

    let earlier = update(state, &config, sample, start - ms(10));
    assert_eq!(earlier, state);
    assert_eq!(earlier.last_update(), start);
}

#[test]
fn test_rejection_on_stale_gap() {
    let config = FilterConfig::new(0.98, 0.1).unwrap();
    let start = Instant::now();
    let state = OrientationState::with_orientation(Orientation::new(3.0, 4.0, 5.0), start);

    let (next, step) = update_with_step(state, &config, rolled(45.0), start + ms(5000));
    assert_eq!(step, TimeStep::Stale(5.0));
    assert_eq!(next, state);
    assert_eq!(next.last_update(), start);
}

#[test]
fn test_gap_exactly_max_dt_is_accepted() {
    let config = FilterConfig::new(0.98, 0.1).unwrap();
    let start = Instant::now();

    let (_, step) =
        update_with_step(OrientationState::new(start), &config, level(), start + ms(100));
    assert!(step.is_accepted());
}

#[test]
fn test_reset_recovers_after_stale_gap() {
    let start = Instant::now();
    let mut filter = ComplementaryFilter::new_at(FilterConfig::new(0.98, 0.1).unwrap(), start);
    let spin = Sample::new(0.0, 0.0, G, 0.0, 0.0, 1.0);

    let (_, step) = filter.update_with_step(spin, start + ms(2000));
    assert!(!step.is_accepted());

    let yaw = filter.orientation().yaw;
    filter.reset_to(Orientation::new(0.0, 0.0, yaw), start + ms(2000));
    let (_, step) = filter.update_with_step(spin, start + ms(2010));
    assert!(step.is_accepted());
    assert!(filter.orientation().yaw > yaw);
}

// ============================================================================
// Blend boundaries
// ============================================================================

#[test]
fn test_alpha_one_is_pure_gyro() {
    let config = FilterConfig::new(1.0, 0.1).unwrap();
    let start = Instant::now();
    let state = OrientationState::with_orientation(Orientation::new(10.0, -5.0, 0.0), start);

    // Accelerometer says 60° roll; it must be ignored
    let mut sample = rolled(60.0);
    sample.gx = 0.5;
    sample.gy = -1.0;

    let o = current(&update(state, &config, sample, start + ms(20)));
    assert_relative_eq!(o.roll, 10.0 + 0.5_f64.to_degrees() * 0.02, epsilon = 1e-9);
    assert_relative_eq!(o.pitch, -5.0 - 1.0_f64.to_degrees() * 0.02, epsilon = 1e-9);
}

#[test]
fn test_alpha_zero_is_pure_accelerometer() {
    let config = FilterConfig::new(0.0, 0.1).unwrap();
    let start = Instant::now();
    let state = OrientationState::with_orientation(Orientation::new(-70.0, 80.0, 0.0), start);

    let mut sample = rolled(30.0);
    sample.gx = 4.0;
    sample.gy = 4.0;

    let o = current(&update(state, &config, sample, start + ms(20)));
    assert_relative_eq!(o.roll, 30.0, epsilon = 1e-9);
    assert_relative_eq!(o.pitch, 0.0, epsilon = 1e-9);
}

#[test]
fn test_invalid_config_is_refused() {
    assert!(FilterConfig::new(1.01, 0.1).is_err());
    assert!(FilterConfig::new(-0.01, 0.1).is_err());
    assert!(FilterConfig::new(0.98, 0.0).is_err());
    assert!(FilterConfig::new(0.98, -1.0).is_err());
}

// ============================================================================
// Malformed input
// ============================================================================

#[test]
fn test_malformed_then_level_sample() {
    assert_eq!(parse_sample("1.0,2.0,3.0"), None);

    let sample = parse_sample("0.0,0.0,9.81,0.0,0.0,0.0").unwrap();
    assert_eq!(sample, Sample::new(0.0, 0.0, 9.81, 0.0, 0.0, 0.0));

    let config = FilterConfig::new(0.98, 0.1).unwrap();
    let start = Instant::now();
    let state = update(OrientationState::new(start), &config, sample, start + ms(20));

    let o = current(&state);
    assert_relative_eq!(o.roll, 0.0);
    assert_relative_eq!(o.pitch, 0.0);
    assert_relative_eq!(o.yaw, 0.0);
    assert_eq!(state.last_update(), start + ms(20));
}
