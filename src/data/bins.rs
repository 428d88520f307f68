//! Histogram binning and categorical value counts.
//!
//! Numeric columns get uniform bins over their range (or the fixed
//! [0, 360] domain for angles), time-of-day columns get 96 fifteen-minute
//! buckets, and categorical columns get first-seen-order value counts.

use crate::constants::{ANGLE_DOMAIN_MAX, CATEGORICAL_MAX_UNIQUE, SECONDS_PER_DAY};
use crate::data::error::DataResult;
use crate::data::infer::parse_time_of_day;
use crate::data::loader::Dataset;
use crate::types::{BinnedColumn, CategoryCounts};
use polars::prelude::{DataType as PlDataType, TimeUnit};
use std::collections::HashMap;

/// Bin numeric values into `bins` uniform buckets over `[start, end]`.
///
/// Values outside the domain, nulls, and NaNs are dropped. The final bin
/// is closed on the right so `end` itself lands in the last bucket.
pub fn bin_values(
    column: &str,
    values: &[Option<f64>],
    start: f64,
    end: f64,
    bins: usize,
) -> BinnedColumn {
    let mut counts = vec![0u32; bins.max(1)];
    let width = end - start;

    if width > 0.0 {
        let bins_f = counts.len() as f64;
        for v in values.iter().flatten() {
            if !v.is_finite() || *v < start || *v > end {
                continue;
            }
            let idx = (((v - start) / width) * bins_f) as usize;
            let idx = idx.min(counts.len() - 1);
            counts[idx] += 1;
        }
    } else {
        // Degenerate range: every in-domain value lands in the single bin
        let hits = values
            .iter()
            .flatten()
            .filter(|v| v.is_finite() && **v == start)
            .count();
        counts[0] = hits as u32;
    }

    BinnedColumn {
        column: column.to_string(),
        start,
        end,
        counts,
    }
}

/// Bin a numeric column over its observed range.
pub fn bin_numeric(column: &str, values: &[Option<f64>], bins: usize) -> BinnedColumn {
    let (min, max) = crate::data::infer::numeric_range(values);
    let start = min.unwrap_or(0.0);
    let end = max.unwrap_or(0.0);
    bin_values(column, values, start, end, bins)
}

/// Bin an angular column over the fixed [0, 360] domain.
pub fn bin_angle(column: &str, values: &[Option<f64>], bins: usize) -> BinnedColumn {
    bin_values(column, values, 0.0, ANGLE_DOMAIN_MAX, bins)
}

/// Bin seconds-since-midnight into fifteen-minute buckets over the day.
pub fn bin_time_of_day(column: &str, seconds: &[Option<f64>], bins: usize) -> BinnedColumn {
    bin_values(column, seconds, 0.0, SECONDS_PER_DAY, bins)
}

/// Extract seconds-since-midnight from a time column, whatever its
/// physical representation: `HH:MM:SS` strings, datetimes (wall-clock
/// seconds modulo the day), the Time dtype, or raw second counts.
pub fn time_of_day_seconds(dataset: &Dataset, name: &str) -> DataResult<Vec<Option<f64>>> {
    let dtype = dataset.column(name)?.dtype().clone();

    match dtype {
        PlDataType::String => Ok(dataset
            .column_str(name)?
            .iter()
            .map(|v| v.as_deref().and_then(parse_time_of_day))
            .collect()),
        PlDataType::Datetime(unit, _) => {
            let divisor = match unit {
                TimeUnit::Nanoseconds => 1e9,
                TimeUnit::Microseconds => 1e6,
                TimeUnit::Milliseconds => 1e3,
            };
            Ok(dataset
                .column_f64(name)?
                .iter()
                .map(|v| v.map(|raw| (raw / divisor).rem_euclid(SECONDS_PER_DAY)))
                .collect())
        }
        PlDataType::Time => {
            // Physical representation is nanoseconds since midnight
            Ok(dataset
                .column_f64(name)?
                .iter()
                .map(|v| v.map(|ns| ns / 1e9))
                .collect())
        }
        _ => Ok(dataset.column_f64(name)?),
    }
}

/// Count categorical values in first-seen order.
///
/// Capped at [`CATEGORICAL_MAX_UNIQUE`] labels; rows whose label falls
/// outside the cap are dropped rather than lumped into an "other" bucket,
/// matching how the prototypes only charted small categoricals.
pub fn count_categories(column: &str, values: &[Option<String>]) -> CategoryCounts {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, u32> = HashMap::new();

    for label in values.iter().flatten() {
        match counts.get_mut(label) {
            Some(n) => *n += 1,
            None => {
                if order.len() >= CATEGORICAL_MAX_UNIQUE {
                    continue;
                }
                order.push(label.clone());
                counts.insert(label.clone(), 1);
            }
        }
    }

    let tallies = order.iter().map(|l| counts[l]).collect();
    CategoryCounts {
        column: column.to_string(),
        labels: order,
        counts: tallies,
    }
}
