//! Shared numeric helpers.

use std::cmp::Ordering;

/// Min-max normalizes a dataset: each value becomes
/// `(v - min) / (max - min)`.
///
/// When every value is equal the denominator is zero and the output is NaN
/// per IEEE division; callers working with possibly-homogeneous data must
/// guard first ([`Population::evaluate`](crate::Population::evaluate) does).
pub fn normalize(values: &[f32]) -> Vec<f32> {
    let min = values.iter().copied().fold(f32::INFINITY, f32::min);
    let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);

    values.iter().map(|v| (v - min) / (max - min)).collect()
}

/// Compares two f32 values, treating NaN as less than everything else so
/// NaN-fitness individuals sort to the end of a descending ranking.
pub fn cmp_f32_nan_last(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}
