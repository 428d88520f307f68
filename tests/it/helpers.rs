//! Test helpers for creating fixture datasets.

use datadeck::data::Dataset;
use std::fmt::Write as _;
use std::path::PathBuf;
use tempfile::TempDir;

/// Rows in the generated mixed-type fixture.
pub const MIXED_ROWS: usize = 24;

/// A CSV covering every semantic column type the profiler distinguishes.
///
/// - `id`: integers above 360, so the angle heuristic stays out of the way
/// - `score`: floats above 360 with fractional parts
/// - `heading`: distinct values spread across [0, 360)
/// - `logged_at`: HH:MM:SS strings
/// - `region`: four repeating labels
/// - `comment`: a distinct string per row, too many to be categorical
/// - `active`: alternating true/false
pub fn mixed_csv() -> String {
    let mut out = String::from("id,score,heading,logged_at,region,comment,active\n");
    let regions = ["north", "south", "east", "west"];

    for i in 0..MIXED_ROWS {
        writeln!(
            out,
            "{},{:.2},{:.1},{:02}:{:02}:{:02},{},note number {},{}",
            1000 + i,
            400.0 + i as f64 * 3.7,
            (i * 37 % 360) as f64 + 0.5,
            i % 24,
            (i * 7) % 60,
            (i * 13) % 60,
            regions[i % regions.len()],
            i,
            i % 2 == 0
        )
        .expect("write fixture row");
    }

    out
}

/// Write CSV content into a temp dir and return (dir, path).
/// The dir must be kept alive for the file to exist.
pub fn write_temp_csv(content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("data.csv");
    std::fs::write(&path, content).expect("write csv fixture");
    (dir, path)
}

/// Load CSV content as a Dataset, keeping the backing temp dir alive.
pub fn load_csv(content: &str) -> (TempDir, Dataset) {
    let (dir, path) = write_temp_csv(content);
    let dataset = Dataset::from_path(&path).expect("load csv fixture");
    (dir, dataset)
}
