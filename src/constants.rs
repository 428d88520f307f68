//! Application-wide constants.
//!
//! Centralizes magic numbers and limits to make the codebase
//! more maintainable and self-documenting.

// ============================================================================
// Loading Limits
// ============================================================================

/// Maximum input file size for eager loading, in megabytes
pub const MAX_INPUT_SIZE_MB: usize = 500;

/// Maximum number of rows for eager loading
pub const MAX_INPUT_ROWS: usize = 10_000_000;

/// Rows sampled per column when inferring schema and semantic types
pub const SCHEMA_INFER_ROWS: usize = 1000;

/// Maximum columns profiled for display
pub const MAX_PROFILED_COLUMNS: usize = 50;

// ============================================================================
// Type Inference
// ============================================================================

/// Upper bound of the angle domain in degrees
pub const ANGLE_DOMAIN_MAX: f64 = 360.0;

/// Minimum distinct values before a [0, 360] column counts as angular
pub const ANGLE_MIN_UNIQUE: usize = 10;

/// Maximum distinct values for a string column to count as categorical
pub const CATEGORICAL_MAX_UNIQUE: usize = 20;

/// Fraction of sampled strings that must match HH:MM(:SS) for a time column
pub const TIME_MATCH_FRACTION: f64 = 0.8;

// ============================================================================
// Binning & Charts
// ============================================================================

/// Default number of uniform bins for numeric histograms
pub const NUMERIC_BINS: usize = 30;

/// Bins for time-of-day histograms (15-minute buckets over 24h)
pub const TIME_OF_DAY_BINS: usize = 96;

/// Seconds in a day, the time-of-day bin domain
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Maximum charts emitted for the dashboard grid
pub const MAX_DASHBOARD_CHARTS: usize = 6;

/// Numeric columns surfaced as "Avg" mini metrics
pub const MAX_AVG_METRICS: usize = 2;

/// Default client-side sample size for the scatter panel
pub const SCATTER_SAMPLE_SIZE: usize = 5000;

// ============================================================================
// Preview Server
// ============================================================================

/// Default bind port for the preview server
pub const DEFAULT_SERVE_PORT: u16 = 8765;

/// Accept-loop poll timeout in milliseconds
pub const SERVER_POLL_MS: u64 = 100;

/// Debounce window for rebuild-on-change, in milliseconds
pub const REBUILD_DEBOUNCE_MS: u64 = 250;
