//! Text sample decoding.
//!
//! Wire format: `ax,ay,az,gx,gy,gz`, exactly six decimal fields.

use crate::core::types::Sample;

/// Number of commas in a well-formed line.
pub const FIELD_SEPARATORS: usize = 5;

/// Decode one line into a [`Sample`].
///
/// Returns `None` when the line does not have exactly five commas, when any
/// field is not a number, or when any value is NaN or infinite.
///
/// # Example
/// ```
/// use disha::ingestion::parse_sample;
/// use disha::Sample;
///
/// assert_eq!(parse_sample("1.0,2.0,3.0"), None);
/// assert_eq!(
///     parse_sample("0.0,0.0,9.81,0.0,0.0,0.0"),
///     Some(Sample::new(0.0, 0.0, 9.81, 0.0, 0.0, 0.0))
/// );
/// ```
pub fn parse_sample(line: &str) -> Option<Sample> {
    if line.matches(',').count() != FIELD_SEPARATORS {
        return None;
    }

    let mut values = [0.0f64; FIELD_SEPARATORS + 1];
    for (slot, field) in values.iter_mut().zip(line.split(',')) {
        *slot = field.trim().parse().ok()?;
    }

    let [ax, ay, az, gx, gy, gz] = values;
    let sample = Sample::new(ax, ay, az, gx, gy, gz);
    sample.is_finite().then_some(sample)
}
