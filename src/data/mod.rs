//! Data loading and profiling.
//!
//! This module turns a tabular file into everything the dashboard needs:
//! a polars-backed [`Dataset`], per-column semantic profiles, summary
//! statistics, and precomputed histogram bins.
//!
//! ## Error Handling
//!
//! All data operations return `DataResult<T>` which uses the `DataError`
//! type. Common errors include:
//! - `TooLarge`: File exceeds size limits
//! - `TooManyRows`: Dataset exceeds row limits
//! - `UnsupportedFormat`: Extension is not csv/tsv/json/arrow/ipc/feather
//! - `Polars`: Reader or frame errors

mod bins;
mod error;
mod infer;
mod loader;
mod stats;

pub use bins::*;
pub use error::*;
pub use infer::*;
pub use loader::*;
pub use stats::*;
