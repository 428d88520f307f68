//! Settings file loading.

use datadeck::constants::{NUMERIC_BINS, TIME_OF_DAY_BINS};
use datadeck::settings::{BuildSettings, Theme};
use std::path::Path;

#[test]
fn test_load_settings_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(
        &path,
        r#"{"title": "Production Runs", "max_charts": 4, "theme": "light"}"#,
    )
    .unwrap();

    let settings = BuildSettings::load(&path).unwrap();
    assert_eq!(settings.title.as_deref(), Some("Production Runs"));
    assert_eq!(settings.max_charts, 4);
    assert_eq!(settings.theme, Theme::Light);
    // Unset fields keep their defaults
    assert_eq!(settings.numeric_bins, NUMERIC_BINS);
    assert_eq!(settings.time_bins, TIME_OF_DAY_BINS);
}

#[test]
fn test_load_rejects_invalid_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{not json").unwrap();

    assert!(BuildSettings::load(&path).is_err());
}

#[test]
fn test_load_or_default_missing_path() {
    let missing = Path::new("/nonexistent/datadeck/settings.json");
    let settings = BuildSettings::load_or_default(Some(missing));
    assert_eq!(settings, BuildSettings::default());
}

#[test]
fn test_load_or_default_invalid_file_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "garbage").unwrap();

    let settings = BuildSettings::load_or_default(Some(&path));
    assert_eq!(settings, BuildSettings::default());
}

#[test]
fn test_settings_round_trip() {
    let mut settings = BuildSettings::default();
    settings.title = Some("Telemetry".to_string());
    settings.numeric_bins = 60;
    settings.vendor_dir = Some("/opt/vega".into());

    let json = serde_json::to_string(&settings).unwrap();
    let parsed: BuildSettings = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, settings);
}
