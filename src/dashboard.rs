//! Dashboard assembly: dataset in, self-contained HTML out.
//!
//! Ties the pipeline together: profile columns, generate chart configs,
//! precompute bins and stats, encode typed-array payloads, and render the
//! page.

use crate::charts::{explorer_config, vega_spec};
use crate::data::{
    bin_angle, bin_numeric, bin_time_of_day, count_categories, profile_columns, summary_stats,
    time_of_day_seconds, DataResult, Dataset,
};
use crate::embed::encode_dataset;
use crate::html::render_page;
use crate::settings::BuildSettings;
use crate::types::{BinnedColumn, CategoryCounts, ChartKind, ColumnStats, ExplorerConfig};
use serde_json::json;
use std::collections::BTreeMap;
use std::path::Path;

/// Result of a dashboard build.
pub struct DashboardBuild {
    /// Complete page, ready to write or serve
    pub html: String,
    /// The explorer configuration embedded in the page
    pub config: ExplorerConfig,
}

/// Build the dashboard page for a dataset.
pub fn build_dashboard(
    dataset: &Dataset,
    settings: &BuildSettings,
    template: Option<&Path>,
) -> DataResult<DashboardBuild> {
    let start = std::time::Instant::now();

    let profiles = profile_columns(dataset)?;
    let title = settings
        .title
        .clone()
        .unwrap_or_else(|| dataset.name.clone());

    let mut config = explorer_config(&title, dataset.height(), &profiles);
    config.charts.truncate(settings.max_charts);
    if let Some(scatter) = config.scatter.as_mut() {
        scatter.sample = settings.scatter_sample;
    }

    let (bins, categories) = compute_bins(dataset, &config, settings)?;
    let stats = compute_stats(dataset, &config)?;

    // Embed every profiled column that encodes cleanly; anything exotic is
    // skipped with a warning rather than failing the whole build.
    let mut embeddable = Vec::new();
    for profile in &profiles {
        match crate::embed::encode_column(dataset, &profile.name) {
            Ok(_) => embeddable.push(profile.name.clone()),
            Err(e) => tracing::warn!("Skipping column '{}': {}", profile.name, e),
        }
    }
    let payload = encode_dataset(dataset, &embeddable)?;

    let spec = vega_spec(&config, settings.numeric_bins);
    let bundle = json!({
        "config": config,
        "vega": spec,
        "bins": bins,
        "categories": categories,
        "stats": stats,
        "payload": payload,
    });

    let html = render_page(
        &title,
        &serde_json::to_string(&bundle)?,
        settings.theme,
        settings.vendor_dir.as_deref(),
        template,
    )?;

    tracing::info!(
        "Built dashboard '{}': {} rows, {} charts, {} embedded columns in {:?}",
        title,
        dataset.height(),
        config.charts.len(),
        embeddable.len(),
        start.elapsed()
    );

    Ok(DashboardBuild { html, config })
}

/// Precompute histogram bins and categorical counts for every chart panel.
fn compute_bins(
    dataset: &Dataset,
    config: &ExplorerConfig,
    settings: &BuildSettings,
) -> DataResult<(Vec<BinnedColumn>, Vec<CategoryCounts>)> {
    let mut bins = Vec::new();
    let mut categories = Vec::new();

    for chart in &config.charts {
        match chart.kind {
            ChartKind::Histogram => {
                let values = dataset.column_f64(&chart.column)?;
                let is_angle = config
                    .columns
                    .iter()
                    .any(|p| p.name == chart.column && p.column_type == crate::types::ColumnType::Angle);
                let binned = if is_angle {
                    bin_angle(&chart.column, &values, settings.numeric_bins)
                } else {
                    bin_numeric(&chart.column, &values, settings.numeric_bins)
                };
                bins.push(binned);
            }
            ChartKind::Time => {
                let seconds = time_of_day_seconds(dataset, &chart.column)?;
                bins.push(bin_time_of_day(&chart.column, &seconds, settings.time_bins));
            }
            ChartKind::Categorical => {
                let values = dataset.column_str(&chart.column)?;
                categories.push(count_categories(&chart.column, &values));
            }
        }
    }

    Ok((bins, categories))
}

/// Summary statistics for every numeric column in the config.
fn compute_stats(
    dataset: &Dataset,
    config: &ExplorerConfig,
) -> DataResult<BTreeMap<String, ColumnStats>> {
    let mut stats = BTreeMap::new();

    for profile in config.columns.iter().filter(|p| p.column_type.is_numeric()) {
        let values = dataset.column_f64(&profile.name)?;
        if let Some(column_stats) = summary_stats(&values) {
            stats.insert(profile.name.clone(), column_stats);
        }
    }

    Ok(stats)
}
