//! Core data structures shared across the crate.
//!
//! Everything that crosses a module boundary lives here: column profiles,
//! chart configurations, and the explorer configuration that ultimately
//! gets serialized into the dashboard HTML.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Column Types
// ============================================================================

/// Semantic type of a column, inferred from dtype and value heuristics.
///
/// This is deliberately richer than the physical dtype: an `f64` column
/// whose values sit in `[0, 360]` with enough spread renders as an angular
/// histogram, and a string column with few distinct values renders as a bar
/// chart rather than being dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Whole numbers (integer dtype, or floats that are all integral)
    Integer,
    /// General floating point values
    Number,
    /// Degrees in [0, 360]
    Angle,
    /// Time of day or date/datetime values
    Time,
    /// String column with a small set of distinct values
    Categorical,
    /// True/false
    Boolean,
    /// Free-form strings
    Text,
}

impl ColumnType {
    /// Numeric types participate in histograms, stats, and scatter plots.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Number | Self::Angle)
    }
}

impl Default for ColumnType {
    fn default() -> Self {
        Self::Text
    }
}

/// Per-column profile computed at load time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ColumnProfile {
    /// Column name as it appears in the source schema
    pub name: String,
    /// Inferred semantic type
    pub column_type: ColumnType,
    /// Null values in the column
    pub null_count: usize,
    /// Distinct non-null values
    pub unique_count: usize,
    /// Minimum value, numeric columns only
    pub min: Option<f64>,
    /// Maximum value, numeric columns only
    pub max: Option<f64>,
}

/// Summary statistics for a numeric column, matching what the dashboard
/// stats panel displays.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation
    pub std_dev: f64,
}

// ============================================================================
// Chart Types
// ============================================================================

/// Kind of chart a panel renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Binned distribution of a numeric column
    Histogram,
    /// Time-of-day distribution
    Time,
    /// Value counts of a categorical column
    Categorical,
}

/// A single panel in the dashboard grid: `{type, column, title}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub column: String,
    pub title: String,
}

/// Scatter panel pairing two numeric columns, cross-filtered by the
/// histogram brushes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScatterSpec {
    pub x: String,
    pub y: String,
    /// Client-side point sample size
    pub sample: usize,
}

/// One entry in the header metric strip.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MiniMetric {
    pub id: String,
    pub label: String,
}

// ============================================================================
// Explorer Configuration
// ============================================================================

/// Histogram bins for one column, precomputed server-side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BinnedColumn {
    pub column: String,
    /// Lower edge of the first bin
    pub start: f64,
    /// Upper edge of the last bin
    pub end: f64,
    /// Count per bin
    pub counts: Vec<u32>,
}

/// Value counts for a categorical column, in first-seen order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub column: String,
    pub labels: Vec<String>,
    pub counts: Vec<u32>,
}

/// The complete configuration consumed by the client-side renderer.
///
/// Serialized to JSON and injected into the HTML template as
/// `window.DATADECK_CONFIG`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExplorerConfig {
    pub title: String,
    pub total_rows: usize,
    pub columns: Vec<ColumnProfile>,
    pub charts: Vec<ChartSpec>,
    pub scatter: Option<ScatterSpec>,
    pub mini_metrics: Vec<MiniMetric>,
}

// ============================================================================
// Data Origin
// ============================================================================

/// Where a dataset came from, kept for refresh and export.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataOrigin {
    /// CSV or TSV file
    Csv { path: PathBuf, delimiter: u8 },
    /// JSON file (array of objects or single object)
    Json { path: PathBuf },
    /// Arrow IPC file or stream
    Arrow { path: PathBuf },
}

impl DataOrigin {
    pub fn path(&self) -> &PathBuf {
        match self {
            DataOrigin::Csv { path, .. } => path,
            DataOrigin::Json { path } => path,
            DataOrigin::Arrow { path } => path,
        }
    }
}
