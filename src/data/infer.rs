//! Semantic column-type inference.
//!
//! Polars gives us the physical dtype; this module layers the value
//! heuristics on top: numeric columns confined to [0, 360] with enough
//! spread are angular, strings matching HH:MM(:SS) are time-of-day, and
//! strings with few distinct values are categorical.

use crate::constants::{
    ANGLE_DOMAIN_MAX, ANGLE_MIN_UNIQUE, CATEGORICAL_MAX_UNIQUE, MAX_PROFILED_COLUMNS,
    SCHEMA_INFER_ROWS, TIME_MATCH_FRACTION,
};
use crate::data::error::DataResult;
use crate::data::loader::Dataset;
use crate::types::{ColumnProfile, ColumnType};
use polars::prelude::DataType as PlDataType;

/// Profile every column of a dataset: semantic type, null/unique counts,
/// and numeric range.
///
/// Columns beyond [`MAX_PROFILED_COLUMNS`] are skipped, matching the
/// display limit of the interactive views.
pub fn profile_columns(dataset: &Dataset) -> DataResult<Vec<ColumnProfile>> {
    let mut profiles = Vec::new();

    for name in dataset.column_names().into_iter().take(MAX_PROFILED_COLUMNS) {
        profiles.push(profile_column(dataset, &name)?);
    }

    Ok(profiles)
}

/// Profile a single column by name.
pub fn profile_column(dataset: &Dataset, name: &str) -> DataResult<ColumnProfile> {
    let column = dataset.column(name)?;
    let series = column.as_materialized_series();
    let null_count = series.null_count();
    let unique_count = series.n_unique()?.saturating_sub(usize::from(null_count > 0));

    let dtype = series.dtype().clone();
    let mut min = None;
    let mut max = None;

    let column_type = if null_count == series.len() {
        // All-null columns carry no signal regardless of dtype
        ColumnType::Text
    } else if dtype == PlDataType::Boolean {
        ColumnType::Boolean
    } else if matches!(
        dtype,
        PlDataType::Date | PlDataType::Datetime(_, _) | PlDataType::Time
    ) {
        ColumnType::Time
    } else if is_numeric_dtype(&dtype) {
        let values = dataset.column_f64(name)?;
        let (lo, hi) = numeric_range(&values);
        min = lo;
        max = hi;
        infer_numeric(&dtype, lo, hi, unique_count, &values)
    } else if dtype == PlDataType::String {
        let values = dataset.column_str(name)?;
        infer_string(&values, unique_count)
    } else {
        ColumnType::Text
    };

    Ok(ColumnProfile {
        name: name.to_string(),
        column_type,
        null_count,
        unique_count,
        min,
        max,
    })
}

/// Physical numeric dtypes (integers and floats).
fn is_numeric_dtype(dtype: &PlDataType) -> bool {
    is_integer_dtype(dtype) || matches!(dtype, PlDataType::Float32 | PlDataType::Float64)
}

fn is_integer_dtype(dtype: &PlDataType) -> bool {
    matches!(
        dtype,
        PlDataType::Int8
            | PlDataType::Int16
            | PlDataType::Int32
            | PlDataType::Int64
            | PlDataType::UInt8
            | PlDataType::UInt16
            | PlDataType::UInt32
            | PlDataType::UInt64
    )
}

/// Classify a numeric column.
fn infer_numeric(
    dtype: &PlDataType,
    min: Option<f64>,
    max: Option<f64>,
    unique_count: usize,
    values: &[Option<f64>],
) -> ColumnType {
    // Angle detection: bounded by [0, 360] with more than a handful of
    // distinct values. A 0/1 flag column also fits the range, hence the
    // uniqueness floor.
    if let (Some(lo), Some(hi)) = (min, max) {
        if lo >= 0.0 && hi <= ANGLE_DOMAIN_MAX && unique_count > ANGLE_MIN_UNIQUE {
            return ColumnType::Angle;
        }
    }

    if is_integer_dtype(dtype) || all_integral(values) {
        ColumnType::Integer
    } else {
        ColumnType::Number
    }
}

/// Classify a string column: time-of-day pattern first, then categorical
/// by distinct-value count.
fn infer_string(values: &[Option<String>], unique_count: usize) -> ColumnType {
    let sample: Vec<&str> = values
        .iter()
        .filter_map(|v| v.as_deref())
        .filter(|s| !s.trim().is_empty())
        .take(SCHEMA_INFER_ROWS)
        .collect();

    if sample.is_empty() {
        return ColumnType::Text;
    }

    let time_matches = sample
        .iter()
        .filter(|s| parse_time_of_day(s).is_some())
        .count();
    if (time_matches as f64) >= (sample.len() as f64) * TIME_MATCH_FRACTION {
        return ColumnType::Time;
    }

    if unique_count <= CATEGORICAL_MAX_UNIQUE {
        ColumnType::Categorical
    } else {
        ColumnType::Text
    }
}

/// Min/max over the non-null, finite values of a column.
pub fn numeric_range(values: &[Option<f64>]) -> (Option<f64>, Option<f64>) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut seen = false;

    for v in values.iter().flatten() {
        if v.is_finite() {
            min = min.min(*v);
            max = max.max(*v);
            seen = true;
        }
    }

    if seen {
        (Some(min), Some(max))
    } else {
        (None, None)
    }
}

/// Whether all sampled values are whole numbers, which classifies a float
/// column as `Integer`.
fn all_integral(values: &[Option<f64>]) -> bool {
    let mut sampled = 0usize;
    for v in values.iter().flatten() {
        if !v.is_finite() || v.fract() != 0.0 {
            return false;
        }
        sampled += 1;
        if sampled >= SCHEMA_INFER_ROWS {
            break;
        }
    }
    sampled > 0
}

/// Parse a `HH:MM` or `HH:MM:SS[.frac]` string into seconds since midnight.
///
/// Returns `None` for anything that is not a plausible time of day.
pub fn parse_time_of_day(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    let mut parts = trimmed.split(':');

    let hours: u32 = parts.next()?.parse().ok()?;
    let minutes_part = parts.next()?;
    if minutes_part.len() != 2 {
        return None;
    }
    let minutes: u32 = minutes_part.parse().ok()?;

    let seconds: f64 = match parts.next() {
        Some(sec) => {
            if sec.is_empty() || sec.len() < 2 {
                return None;
            }
            sec.parse().ok()?
        }
        None => 0.0,
    };
    if parts.next().is_some() {
        return None;
    }

    if hours >= 24 || minutes >= 60 || !(0.0..60.0).contains(&seconds) {
        return None;
    }

    Some(f64::from(hours) * 3600.0 + f64::from(minutes) * 60.0 + seconds)
}
