//! Column profiling over real loaded datasets.

use crate::helpers;
use datadeck::data::{profile_columns, Dataset};
use datadeck::types::{ColumnType, DataOrigin};
use polars::prelude::*;
use std::collections::HashMap;

#[test]
fn test_profile_mixed_csv() {
    let (_dir, dataset) = helpers::load_csv(&helpers::mixed_csv());
    let profiles = profile_columns(&dataset).unwrap();

    let types: HashMap<&str, ColumnType> = profiles
        .iter()
        .map(|p| (p.name.as_str(), p.column_type))
        .collect();

    assert_eq!(types["id"], ColumnType::Integer);
    assert_eq!(types["score"], ColumnType::Number);
    assert_eq!(types["heading"], ColumnType::Angle);
    assert_eq!(types["logged_at"], ColumnType::Time);
    assert_eq!(types["region"], ColumnType::Categorical);
    assert_eq!(types["comment"], ColumnType::Text);
    assert_eq!(types["active"], ColumnType::Boolean);
}

#[test]
fn test_profile_counts_and_ranges() {
    let (_dir, dataset) = helpers::load_csv(&helpers::mixed_csv());
    let profiles = profile_columns(&dataset).unwrap();

    let region = profiles.iter().find(|p| p.name == "region").unwrap();
    assert_eq!(region.null_count, 0);
    assert_eq!(region.unique_count, 4);
    assert!(region.min.is_none());

    let heading = profiles.iter().find(|p| p.name == "heading").unwrap();
    assert_eq!(heading.unique_count, helpers::MIXED_ROWS);
    assert!(heading.min.unwrap() >= 0.0);
    assert!(heading.max.unwrap() <= 360.0);

    let id = profiles.iter().find(|p| p.name == "id").unwrap();
    assert_eq!(id.min, Some(1000.0));
    assert_eq!(id.max, Some(1000.0 + helpers::MIXED_ROWS as f64 - 1.0));
}

#[test]
fn test_profile_handles_nulls() {
    let csv = "value,label\n1.5,a\n,b\n3.25,\n4.0,a\n";
    let (_dir, dataset) = helpers::load_csv(csv);
    let profiles = profile_columns(&dataset).unwrap();

    let value = profiles.iter().find(|p| p.name == "value").unwrap();
    assert_eq!(value.null_count, 1);
    assert_eq!(value.unique_count, 3);
    assert_eq!(value.column_type, ColumnType::Number);

    let label = profiles.iter().find(|p| p.name == "label").unwrap();
    assert_eq!(label.null_count, 1);
    assert_eq!(label.unique_count, 2);
    assert_eq!(label.column_type, ColumnType::Categorical);
}

#[test]
fn test_all_null_numeric_column_is_text() {
    // All-null float columns (Arrow IPC or JSON nulls) carry no signal and
    // must not produce a histogram panel
    let frame = df! {
        "reading" => [None::<f64>, None, None],
        "site" => ["alpha", "beta", "alpha"],
    }
    .unwrap();
    let dataset = Dataset::from_frame(
        frame,
        "nulls".to_string(),
        DataOrigin::Json {
            path: "nulls.json".into(),
        },
    )
    .unwrap();

    let profiles = profile_columns(&dataset).unwrap();
    let reading = profiles.iter().find(|p| p.name == "reading").unwrap();
    assert_eq!(reading.column_type, ColumnType::Text);
    assert_eq!(reading.null_count, 3);
    assert!(reading.min.is_none());
    assert!(reading.max.is_none());
}

#[test]
fn test_mostly_time_column_embeds_as_seconds() {
    // One stray value below the match-fraction threshold: the column still
    // profiles as Time, and its payload must be seconds, not label codes
    let mut csv = String::from("stamp\n");
    for h in 1..=9 {
        csv.push_str(&format!("{h:02}:00:00\n"));
    }
    csv.push_str("N/A\n");

    let (_dir, dataset) = helpers::load_csv(&csv);
    let profiles = profile_columns(&dataset).unwrap();
    assert_eq!(profiles[0].column_type, ColumnType::Time);

    let payload = datadeck::embed::encode_column(&dataset, "stamp").unwrap();
    assert_eq!(payload.dtype, datadeck::embed::PayloadDtype::Float32);
    assert!(payload.labels.is_none());
}

#[test]
fn test_profiles_preserve_schema_order() {
    let (_dir, dataset) = helpers::load_csv(&helpers::mixed_csv());
    let profiles = profile_columns(&dataset).unwrap();

    let names: Vec<&str> = profiles.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        ["id", "score", "heading", "logged_at", "region", "comment", "active"]
    );
}
