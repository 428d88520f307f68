//! Dataset loading from CSV/TSV, JSON, and Arrow IPC files.
//!
//! All parsing is delegated to polars readers; this module handles format
//! dispatch, eager-load guard rails, and typed access to columns for the
//! profiling and embedding stages.
//!
//! ## Memory Limits
//!
//! To prevent unbounded memory growth:
//! - Files larger than [`MAX_INPUT_SIZE_MB`]MB are rejected with [`DataError::TooLarge`]
//! - Files with more than [`MAX_INPUT_ROWS`] rows are rejected with [`DataError::TooManyRows`]

use crate::constants::{MAX_INPUT_ROWS, MAX_INPUT_SIZE_MB, SCHEMA_INFER_ROWS};
use crate::data::error::{DataError, DataResult};
use crate::types::DataOrigin;
use polars::prelude::*;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// An eagerly-loaded tabular dataset backed by a polars DataFrame.
#[derive(Clone, Debug)]
pub struct Dataset {
    /// Human-readable name, derived from the file stem
    pub name: String,
    /// Origin of the data, kept for refresh and export
    pub origin: DataOrigin,
    frame: DataFrame,
}

impl Dataset {
    /// Load a dataset, dispatching on the file extension.
    ///
    /// Supported: `.csv`, `.tsv`, `.json`, `.arrow`, `.ipc`, `.feather`.
    pub fn from_path(path: &Path) -> DataResult<Self> {
        check_file_size(path)?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "csv" => Self::from_csv(path, b','),
            "tsv" => Self::from_csv(path, b'\t'),
            "json" => Self::from_json(path),
            "arrow" | "ipc" | "feather" => Self::from_arrow(path),
            other => Err(DataError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Load a CSV/TSV file with the given separator.
    pub fn from_csv(path: &Path, separator: u8) -> DataResult<Self> {
        let start = std::time::Instant::now();

        let lf = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_separator(separator)
            .with_infer_schema_length(Some(SCHEMA_INFER_ROWS))
            .finish()?;
        let df = lf.collect()?;

        tracing::debug!(
            "Loaded CSV {} with {} rows x {} cols in {:?}",
            path.display(),
            df.height(),
            df.width(),
            start.elapsed()
        );

        Self::from_frame(
            df,
            name_from_path(path),
            DataOrigin::Csv {
                path: path.to_path_buf(),
                delimiter: separator,
            },
        )
    }

    /// Load a JSON file (array of objects, or a single object).
    pub fn from_json(path: &Path) -> DataResult<Self> {
        let start = std::time::Instant::now();

        let file = std::fs::File::open(path)?;
        let infer = NonZeroUsize::new(SCHEMA_INFER_ROWS).unwrap();
        let df = JsonReader::new(file)
            .with_json_format(JsonFormat::Json)
            .infer_schema_len(Some(infer))
            .finish()?;

        tracing::debug!(
            "Loaded JSON {} with {} rows x {} cols in {:?}",
            path.display(),
            df.height(),
            df.width(),
            start.elapsed()
        );

        Self::from_frame(
            df,
            name_from_path(path),
            DataOrigin::Json {
                path: path.to_path_buf(),
            },
        )
    }

    /// Load an Arrow IPC file.
    ///
    /// Tries the file format first, then falls back to the stream format,
    /// since `.arrow` files in the wild are written both ways.
    pub fn from_arrow(path: &Path) -> DataResult<Self> {
        let start = std::time::Instant::now();

        let df = match IpcReader::new(std::fs::File::open(path)?).finish() {
            Ok(df) => df,
            Err(file_err) => {
                tracing::debug!(
                    "IPC file read of {} failed ({}), retrying as stream",
                    path.display(),
                    file_err
                );
                IpcStreamReader::new(std::fs::File::open(path)?).finish()?
            }
        };

        tracing::debug!(
            "Loaded Arrow {} with {} rows x {} cols in {:?}",
            path.display(),
            df.height(),
            df.width(),
            start.elapsed()
        );

        Self::from_frame(
            df,
            name_from_path(path),
            DataOrigin::Arrow {
                path: path.to_path_buf(),
            },
        )
    }

    /// Wrap an existing frame, applying the shape guard rails.
    pub fn from_frame(frame: DataFrame, name: String, origin: DataOrigin) -> DataResult<Self> {
        if frame.width() == 0 {
            return Err(DataError::NoColumns);
        }
        if frame.height() == 0 {
            return Err(DataError::EmptyFile);
        }
        if frame.height() > MAX_INPUT_ROWS {
            return Err(DataError::TooManyRows {
                rows: frame.height(),
                max_rows: MAX_INPUT_ROWS,
            });
        }
        Ok(Self {
            name,
            origin,
            frame,
        })
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.frame.width()
    }

    /// Column names in schema order.
    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    /// The backing polars frame.
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Borrow a column by name.
    pub fn column(&self, name: &str) -> DataResult<&Column> {
        self.frame
            .column(name)
            .map_err(|_| DataError::UnknownColumn(name.to_string()))
    }

    /// Read a column as `f64` values, going through the physical
    /// representation so dates and datetimes come out as their raw counts.
    pub fn column_f64(&self, name: &str) -> DataResult<Vec<Option<f64>>> {
        let series = self.column(name)?.as_materialized_series();
        let physical = series.to_physical_repr();
        let floats = physical.cast(&DataType::Float64)?;
        Ok(floats.f64()?.into_iter().collect())
    }

    /// Read a string column's values.
    pub fn column_str(&self, name: &str) -> DataResult<Vec<Option<String>>> {
        let series = self.column(name)?.as_materialized_series();
        let strings = series.str()?;
        Ok(strings
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect())
    }

    /// Export the dataset back to CSV.
    pub fn write_csv(&self, path: &Path) -> DataResult<()> {
        let mut frame = self.frame.clone();
        let mut file = std::fs::File::create(path)?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut frame)?;
        tracing::info!("Exported {} rows to {}", frame.height(), path.display());
        Ok(())
    }

    /// Render the dataset to an in-memory CSV string (for the preview
    /// server's export endpoint).
    pub fn to_csv_string(&self) -> DataResult<String> {
        let mut frame = self.frame.clone();
        let mut buf = Vec::new();
        CsvWriter::new(&mut buf)
            .include_header(true)
            .finish(&mut frame)?;
        String::from_utf8(buf).map_err(|e| DataError::InvalidData(e.to_string()))
    }
}

const MAX_INPUT_BYTES: u64 = MAX_INPUT_SIZE_MB as u64 * 1024 * 1024;

/// Reject files too large to load eagerly. Compares bytes so a file just
/// past the limit does not slip through MB truncation.
fn check_file_size(path: &Path) -> DataResult<()> {
    let metadata = std::fs::metadata(path)?;
    if exceeds_size_limit(metadata.len()) {
        return Err(DataError::TooLarge {
            size_mb: metadata.len().div_ceil(1024 * 1024),
            max_mb: MAX_INPUT_SIZE_MB,
        });
    }
    Ok(())
}

fn exceeds_size_limit(bytes: u64) -> bool {
    bytes > MAX_INPUT_BYTES
}

fn name_from_path(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Data")
        .to_string()
}

/// Check if a path points at a loadable data file.
pub fn is_data_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            matches!(
                ext.to_lowercase().as_str(),
                "csv" | "tsv" | "json" | "arrow" | "ipc" | "feather"
            )
        })
        .unwrap_or(false)
}

/// Format row count for display (e.g. "1.2M rows")
pub fn format_row_count(count: usize) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M rows", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K rows", count as f64 / 1_000.0)
    } else {
        format!("{} rows", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_data_file() {
        assert!(is_data_file(Path::new("data.csv")));
        assert!(is_data_file(Path::new("data.TSV")));
        assert!(is_data_file(Path::new("data.arrow")));
        assert!(is_data_file(Path::new("data.feather")));
        assert!(!is_data_file(Path::new("data.parquet")));
        assert!(!is_data_file(Path::new("README")));
    }

    #[test]
    fn test_format_row_count() {
        assert_eq!(format_row_count(50), "50 rows");
        assert_eq!(format_row_count(1500), "1.5K rows");
        assert_eq!(format_row_count(1_500_000), "1.5M rows");
    }

    #[test]
    fn test_size_limit_is_byte_precise() {
        assert!(!exceeds_size_limit(0));
        assert!(!exceeds_size_limit(MAX_INPUT_BYTES));
        assert!(exceeds_size_limit(MAX_INPUT_BYTES + 1));
    }

    #[test]
    fn test_from_frame_rejects_empty() {
        let df = DataFrame::empty();
        let result = Dataset::from_frame(
            df,
            "empty".to_string(),
            DataOrigin::Json {
                path: PathBuf::from("empty.json"),
            },
        );
        assert!(matches!(result, Err(DataError::NoColumns)));
    }
}
