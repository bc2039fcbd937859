//! Rounding helpers
//!
//! Scores and averages round half to even so values exactly between two
//! integers (e.g. `2.5`) land on the even neighbour.

/// Round to the nearest integer, ties to even
#[inline]
pub fn round_half_even(value: f64) -> f64 {
    value.round_ties_even()
}

/// Round to a fixed number of decimal places, ties to even
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round_ties_even() / factor
}
