//! Summary statistics for numeric columns.
//!
//! Matches what the dashboard stats panel shows per column: min, max,
//! mean, median, and population standard deviation.

use crate::types::ColumnStats;

/// Compute summary statistics over the non-null, finite values.
///
/// Returns `None` when no usable values remain.
pub fn summary_stats(values: &[Option<f64>]) -> Option<ColumnStats> {
    let mut sorted: Vec<f64> = values
        .iter()
        .flatten()
        .copied()
        .filter(|v| v.is_finite())
        .collect();

    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    let sum: f64 = sorted.iter().sum();
    let mean = sum / n as f64;

    let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;

    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };

    Some(ColumnStats {
        min: sorted[0],
        max: sorted[n - 1],
        mean,
        median,
        std_dev: variance.sqrt(),
    })
}
