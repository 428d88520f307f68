//! Single test binary entry point.
//!
//! Consolidates all tests into one binary to cut linking overhead.
//!
//! Structure:
//! - unit: single-component tests (profiling, settings, watcher)
//! - integration: full build and serve workflows

mod helpers;
mod integration;
mod unit;
