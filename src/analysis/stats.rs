//! Small descriptive-statistics helpers over lap times.
//!
//! All functions return `None` on an empty sample instead of dividing by zero.

use crate::core::types::cmp_seconds;

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sorted = sorted(values);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Population standard deviation
pub fn std_dev(values: &[f64]) -> Option<f64> {
    let avg = mean(values)?;
    // sum / n does not round-trip for most decimals
    if values.iter().all(|&v| v == values[0]) {
        return Some(0.0);
    }
    let variance =
        values.iter().map(|v| (v - avg) * (v - avg)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

pub fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().min_by(cmp_seconds)
}

pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().max_by(cmp_seconds)
}

/// Interquartile range using nearest-rank indexing (`sorted[floor(n * q)]`).
pub fn iqr(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sorted = sorted(values);
    let last = sorted.len() - 1;
    let q1 = sorted[((sorted.len() as f64 * 0.25) as usize).min(last)];
    let q3 = sorted[((sorted.len() as f64 * 0.75) as usize).min(last)];
    Some(q3 - q1)
}

/// Mean of the second half minus mean of the first half (negative = getting faster).
///
/// With an odd count the middle lap belongs to the second half.
pub fn trend(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let (first, second) = values.split_at(values.len() / 2);
    Some(mean(second)? - mean(first)?)
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(cmp_seconds);
    sorted
}
