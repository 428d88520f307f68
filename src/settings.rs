//! Builder settings: tunable knobs for dashboard generation.
//!
//! Settings load from a JSON file (every field optional thanks to serde
//! defaults) and can be overridden per-invocation from the CLI.

use crate::constants::{
    MAX_DASHBOARD_CHARTS, NUMERIC_BINS, SCATTER_SAMPLE_SIZE, TIME_OF_DAY_BINS,
};
use crate::data::DataResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Dashboard color theme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

impl Default for Theme {
    fn default() -> Self {
        Self::Dark
    }
}

/// All build-time options, JSON-loadable with per-field defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
    /// Dashboard title; defaults to the dataset name when unset
    pub title: Option<String>,
    /// Uniform bins for numeric histograms
    pub numeric_bins: usize,
    /// Bins for time-of-day histograms
    pub time_bins: usize,
    /// Maximum chart panels in the grid
    pub max_charts: usize,
    /// Client-side scatter sample size
    pub scatter_sample: usize,
    pub theme: Theme,
    /// Directory holding pre-downloaded vega/vega-lite/vega-embed bundles
    /// to inline for fully offline output; CDN script tags otherwise
    pub vendor_dir: Option<PathBuf>,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            title: None,
            numeric_bins: NUMERIC_BINS,
            time_bins: TIME_OF_DAY_BINS,
            max_charts: MAX_DASHBOARD_CHARTS,
            scatter_sample: SCATTER_SAMPLE_SIZE,
            theme: Theme::default(),
            vendor_dir: None,
        }
    }
}

impl BuildSettings {
    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> DataResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings = serde_json::from_str(&content)?;
        Ok(settings)
    }

    /// Load from the given path, falling back to the default location and
    /// then to defaults when nothing exists on disk.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let candidate = path
            .map(PathBuf::from)
            .or_else(default_settings_path)
            .filter(|p| p.exists());

        match candidate {
            Some(p) => match Self::load(&p) {
                Ok(settings) => {
                    tracing::debug!("Loaded settings from {}", p.display());
                    settings
                }
                Err(e) => {
                    tracing::warn!("Failed to load settings from {}: {}", p.display(), e);
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }
}

/// Default settings file location under the user config directory.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("datadeck").join("settings.json"))
}
