//! Utility functions for analysis module
//!
//! Shared numeric helpers used across analysis submodules.

/// Mean over the finite values of a slice, `NaN` if there are none.
///
/// Undefined per-site values (`NaN`) are skipped rather than propagated.
pub fn nan_mean(values: &[f64]) -> f64 {
    let (sum, count) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

/// Sum of the finite values of a slice, treating undefined entries as 0.
pub fn nan_sum(values: &[f64]) -> f64 {
    values.iter().filter(|v| v.is_finite()).sum()
}

/// Cache for commonly used harmonic numbers
/// Avoids recalculating for common sample sizes
/// Note: harmonic_number(n) = sum_{i=1}^{n-1} 1/i
static HARMONIC_CACHE: [f64; 11] = [
    0.0,                // n=0 (unused)
    0.0,                // n=1
    1.0,                // n=2
    1.5,                // n=3
    1.8333333333333333, // n=4
    2.083333333333333,  // n=5
    2.283333333333333,  // n=6
    2.45,               // n=7
    2.5928571428571425, // n=8
    2.7178571428571425, // n=9
    2.8289682539682537, // n=10
];

/// Calculate harmonic number efficiently
///
/// This is the `a1` term of Watterson's estimator for `n` sampled allele copies.
#[inline]
pub fn harmonic_number(n: usize) -> f64 {
    if n < HARMONIC_CACHE.len() {
        HARMONIC_CACHE[n]
    } else {
        (1..n).map(|i| 1.0 / i as f64).sum()
    }
}

/// Sum of inverse squares `sum_{i=1}^{n-1} 1/i^2` (Tajima's `a2`).
#[inline]
pub fn harmonic_number_squared(n: usize) -> f64 {
    (1..n).map(|i| 1.0 / (i as f64 * i as f64)).sum()
}

/// Number of bases covered by a set of variant positions, inclusive of both
/// ends. `None` when there are no positions.
pub fn span(positions: &[i64]) -> Option<f64> {
    let min = positions.iter().min()?;
    let max = positions.iter().max()?;
    Some(*max as f64 - *min as f64 + 1.0)
}
