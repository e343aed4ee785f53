//! Numeric conversion and rounding helpers.

/// Convert a count to f64 for ratio calculations.
///
/// Counts in this crate (scaffolds, bases in a sample) are far below the
/// 2^53 limit of exact f64 integers.
#[inline]
#[must_use]
pub fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Convert a sequence length (or sum of lengths) to f64.
#[inline]
#[must_use]
pub fn length_to_f64(length: u64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        length as f64
    }
}

/// Round to a fixed number of decimal places.
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
