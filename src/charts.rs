//! Chart configuration generation.
//!
//! Maps column profiles to the flat `{type, column, title}` list the
//! client renders, plus the Vega-Lite spec for the brush-linked
//! histogram/scatter view.

use crate::constants::{MAX_AVG_METRICS, MAX_DASHBOARD_CHARTS, SCATTER_SAMPLE_SIZE};
use crate::types::{
    ChartKind, ChartSpec, ColumnProfile, ColumnType, ExplorerConfig, MiniMetric, ScatterSpec,
};
use serde_json::{json, Value};

/// Generate chart configurations from column profiles.
///
/// One chart per chartable column, capped at `max_charts` for the grid:
/// histograms for numeric columns, a time panel for time columns, bars for
/// categoricals. Text and boolean columns get no panel.
pub fn generate_charts(profiles: &[ColumnProfile], max_charts: usize) -> Vec<ChartSpec> {
    let mut charts = Vec::new();

    for profile in profiles {
        let kind = match profile.column_type {
            ColumnType::Integer | ColumnType::Number | ColumnType::Angle => ChartKind::Histogram,
            ColumnType::Time => ChartKind::Time,
            ColumnType::Categorical => ChartKind::Categorical,
            ColumnType::Boolean | ColumnType::Text => continue,
        };
        charts.push(ChartSpec {
            kind,
            column: profile.name.clone(),
            title: format!("{} Distribution", profile.name),
        });
        if charts.len() >= max_charts {
            break;
        }
    }

    charts
}

/// Generate the header metric strip: filtered-row counters plus averages
/// for the first couple of numeric columns.
pub fn generate_mini_metrics(profiles: &[ColumnProfile]) -> Vec<MiniMetric> {
    let mut metrics = vec![
        MiniMetric {
            id: "filtered".to_string(),
            label: "Filtered Rows".to_string(),
        },
        MiniMetric {
            id: "percent".to_string(),
            label: "of Total".to_string(),
        },
    ];

    for profile in profiles
        .iter()
        .filter(|p| p.column_type.is_numeric())
        .take(MAX_AVG_METRICS)
    {
        metrics.push(MiniMetric {
            id: format!("avg_{}", profile.name),
            label: format!("Avg {}", profile.name),
        });
    }

    metrics
}

/// Pair the first two numeric columns as the scatter panel.
pub fn generate_scatter(profiles: &[ColumnProfile], sample: usize) -> Option<ScatterSpec> {
    let mut numeric = profiles.iter().filter(|p| p.column_type.is_numeric());
    let x = numeric.next()?;
    let y = numeric.next()?;
    Some(ScatterSpec {
        x: x.name.clone(),
        y: y.name.clone(),
        sample,
    })
}

/// Assemble the full explorer configuration for a profiled dataset.
pub fn explorer_config(
    title: &str,
    total_rows: usize,
    profiles: &[ColumnProfile],
) -> ExplorerConfig {
    ExplorerConfig {
        title: title.to_string(),
        total_rows,
        columns: profiles.to_vec(),
        charts: generate_charts(profiles, MAX_DASHBOARD_CHARTS),
        scatter: generate_scatter(profiles, SCATTER_SAMPLE_SIZE),
        mini_metrics: generate_mini_metrics(profiles),
    }
}

/// Build the Vega-Lite v5 spec for the dashboard: a column of brushable
/// histograms next to a cross-filtered scatter, dark theme.
///
/// Data is attached client-side after the typed arrays are decoded, so the
/// spec references the named source `table` instead of inlining values.
pub fn vega_spec(config: &ExplorerConfig, maxbins: usize) -> Value {
    let hist_columns: Vec<&str> = config
        .charts
        .iter()
        .filter(|c| c.kind != ChartKind::Categorical)
        .map(|c| c.column.as_str())
        .collect();

    let brush = json!({
        "name": "brush",
        "select": {
            "type": "interval",
            "encodings": ["x"],
            "resolve": "intersect"
        }
    });

    let hist = json!({
        "mark": "bar",
        "encoding": {
            "x": {
                "field": {"repeat": "row"},
                "type": "quantitative",
                "bin": {"maxbins": maxbins}
            },
            "y": {
                "aggregate": "count",
                "type": "quantitative",
                "title": null
            }
        }
    });

    let hist_layer = json!({
        "layer": [
            {
                "mark": hist["mark"],
                "params": [brush],
                "encoding": {
                    "x": hist["encoding"]["x"],
                    "y": hist["encoding"]["y"],
                    "color": {"value": "lightgrey"}
                }
            },
            {
                "mark": hist["mark"],
                "transform": [{"filter": {"param": "brush"}}],
                "encoding": {
                    "x": hist["encoding"]["x"],
                    "y": hist["encoding"]["y"],
                    "color": {"value": "#1f77b4"}
                }
            }
        ],
        "width": 400,
        "height": 100
    });

    let mut concat = vec![json!({
        "repeat": {"row": hist_columns},
        "spec": hist_layer
    })];

    if let Some(scatter) = &config.scatter {
        concat.push(json!({
            "data": {"name": "sample"},
            "mark": {"type": "point", "tooltip": true},
            "width": 400,
            "height": 400,
            "encoding": {
                "x": {
                    "field": scatter.x,
                    "type": "quantitative",
                    "scale": {"zero": false}
                },
                "y": {
                    "field": scatter.y,
                    "type": "quantitative",
                    "scale": {"zero": false}
                },
                "color": {
                    "condition": {"param": "brush", "value": "#1f77b4"},
                    "value": "grey"
                },
                "opacity": {
                    "condition": {"param": "brush", "value": 0.8},
                    "value": 0.1
                }
            }
        }));
    }

    json!({
        "$schema": "https://vega.github.io/schema/vega-lite/v5.json",
        "data": {"name": "table"},
        "hconcat": concat,
        "config": {
            "background": "#161b22",
            "view": {"stroke": null},
            "axis": {
                "labelColor": "#8b949e",
                "titleColor": "#c9d1d9",
                "gridColor": "#21262d",
                "domainColor": "#30363d"
            }
        }
    })
}
