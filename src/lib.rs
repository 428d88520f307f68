//! datadeck: bake tabular data into self-contained interactive dashboards.
//!
//! The pipeline is: load a CSV/JSON/Arrow file into a polars frame
//! ([`data::Dataset`]), profile every column's semantic type
//! ([`data::profile_columns`]), generate chart configurations
//! ([`charts`]), precompute bins and summary stats, downcast columns into
//! base64 typed arrays ([`embed`]), and splice everything into a static
//! HTML template ([`html`]). [`server`] serves the result locally with
//! rebuild-on-change.

pub mod charts;
pub mod constants;
pub mod dashboard;
pub mod data;
pub mod embed;
pub mod html;
pub mod sample;
pub mod server;
pub mod settings;
pub mod types;
pub mod watcher;
