//! End-to-end dashboard build workflows.

use crate::helpers;
use datadeck::dashboard::build_dashboard;
use datadeck::data::{DataError, Dataset};
use datadeck::sample::{self, SampleSpec};
use datadeck::settings::BuildSettings;
use datadeck::types::{ChartKind, ColumnType};
use polars::prelude::*;

#[test]
fn test_build_dashboard_from_csv() {
    let (_dir, dataset) = helpers::load_csv(&helpers::mixed_csv());
    let settings = BuildSettings::default();

    let build = build_dashboard(&dataset, &settings, None).unwrap();

    assert!(build.html.starts_with("<!DOCTYPE html>"));
    assert!(build.html.contains("window.DATADECK_CONFIG"));
    assert!(build.html.contains("<title>data</title>"));
    // CDN scripts by default, no vendor dir configured
    assert!(build.html.contains("cdn.jsdelivr.net"));

    assert_eq!(build.config.total_rows, helpers::MIXED_ROWS);
    assert_eq!(build.config.columns.len(), 7);

    // id, score, heading histograms; logged_at time; region categorical.
    // Text and boolean columns get no panel.
    assert_eq!(build.config.charts.len(), 5);
    let kinds: Vec<ChartKind> = build.config.charts.iter().map(|c| c.kind).collect();
    assert_eq!(
        kinds,
        [
            ChartKind::Histogram,
            ChartKind::Histogram,
            ChartKind::Histogram,
            ChartKind::Time,
            ChartKind::Categorical,
        ]
    );

    // Scatter pairs the first two numeric columns
    let scatter = build.config.scatter.as_ref().unwrap();
    assert_eq!(scatter.x, "id");
    assert_eq!(scatter.y, "score");
}

#[test]
fn test_build_respects_settings() {
    let (_dir, dataset) = helpers::load_csv(&helpers::mixed_csv());
    let settings = BuildSettings {
        title: Some("Custom Title".to_string()),
        max_charts: 2,
        scatter_sample: 123,
        ..Default::default()
    };

    let build = build_dashboard(&dataset, &settings, None).unwrap();

    assert!(build.html.contains("<title>Custom Title</title>"));
    assert_eq!(build.config.title, "Custom Title");
    assert_eq!(build.config.charts.len(), 2);
    assert_eq!(build.config.scatter.as_ref().unwrap().sample, 123);
}

#[test]
fn test_build_with_custom_template() {
    let (dir, dataset) = helpers::load_csv(&helpers::mixed_csv());
    let template_path = dir.path().join("template.html");
    std::fs::write(
        &template_path,
        "<html><head><title>{{TITLE}}</title>{{VEGA_SCRIPTS}}</head><body></body></html>",
    )
    .unwrap();

    let build = build_dashboard(&dataset, &BuildSettings::default(), Some(&template_path)).unwrap();

    assert!(build.html.contains("<title>data</title>"));
    // The runtime payload is injected before </body> even in custom templates
    assert!(build.html.contains("window.DATADECK_CONFIG"));
    let config_pos = build.html.find("window.DATADECK_CONFIG").unwrap();
    let body_pos = build.html.find("</body>").unwrap();
    assert!(config_pos < body_pos);
}

#[test]
fn test_generated_sample_builds() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.csv");
    let spec = SampleSpec {
        rows: 500,
        ..Default::default()
    };
    sample::write_csv(&path, &spec).unwrap();

    let dataset = Dataset::from_path(&path).unwrap();
    assert_eq!(dataset.height(), 500);

    let build = build_dashboard(&dataset, &BuildSettings::default(), None).unwrap();

    let type_of = |name: &str| {
        build
            .config
            .columns
            .iter()
            .find(|p| p.name == name)
            .unwrap()
            .column_type
    };
    assert_eq!(type_of("time"), ColumnType::Time);
    assert_eq!(type_of("angle"), ColumnType::Angle);
    assert_eq!(type_of("category"), ColumnType::Categorical);

    // Chart panels cap at the configured maximum
    assert!(build.config.charts.len() <= BuildSettings::default().max_charts);
}

#[test]
fn test_arrow_ipc_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.arrow");

    let mut df = df! {
        "pressure" => [101.3, 98.6, 102.1, 99.4],
        "site" => ["alpha", "beta", "alpha", "gamma"],
    }
    .unwrap();
    let mut file = std::fs::File::create(&path).unwrap();
    IpcWriter::new(&mut file).finish(&mut df).unwrap();

    let dataset = Dataset::from_path(&path).unwrap();
    assert_eq!(dataset.height(), 4);
    assert_eq!(dataset.column_names(), ["pressure", "site"]);

    let build = build_dashboard(&dataset, &BuildSettings::default(), None).unwrap();
    assert!(build.html.contains("window.DATADECK_CONFIG"));
}

#[test]
fn test_csv_export_round_trips() {
    let (dir, dataset) = helpers::load_csv(&helpers::mixed_csv());
    let export_path = dir.path().join("export.csv");

    dataset.write_csv(&export_path).unwrap();

    let reloaded = Dataset::from_path(&export_path).unwrap();
    assert_eq!(reloaded.height(), dataset.height());
    assert_eq!(reloaded.column_names(), dataset.column_names());
    assert_eq!(
        reloaded.column_f64("id").unwrap(),
        dataset.column_f64("id").unwrap()
    );
}

#[test]
fn test_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.parquet");
    std::fs::write(&path, "whatever").unwrap();

    let result = Dataset::from_path(&path);
    assert!(matches!(result, Err(DataError::UnsupportedFormat(_))));
}

#[test]
fn test_empty_csv_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    std::fs::write(&path, "a,b,c\n").unwrap();

    assert!(Dataset::from_path(&path).is_err());
}
