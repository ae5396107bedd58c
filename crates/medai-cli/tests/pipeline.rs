//! Integration tests for the ingestion pipeline.

use std::path::Path;

use chrono::NaiveDate;
use medai_cli::pipeline::{PREVIEW_ROWS, run_ingestion};
use medai_model::IngestConfig;
use serde_json::json;
use tempfile::TempDir;

fn write_json(dir: &Path, name: &str, value: &serde_json::Value) {
    std::fs::write(dir.join(name), serde_json::to_vec(value).unwrap()).unwrap();
}

fn bundle(
    birth_date: &str,
    bmi: f64,
    systolic: Option<f64>,
    cholesterol: f64,
) -> serde_json::Value {
    let mut entries = vec![
        json!({ "resource": { "resourceType": "Patient", "birthDate": birth_date } }),
        json!({ "resource": {
            "resourceType": "Observation",
            "code": { "coding": [{ "code": "39156-5", "display": "Body Mass Index" }] },
            "valueQuantity": { "value": bmi }
        }}),
        json!({ "resource": {
            "resourceType": "Observation",
            "code": { "coding": [{ "code": "2093-3", "display": "Cholesterol" }] },
            "valueQuantity": { "value": cholesterol }
        }}),
    ];
    if let Some(systolic) = systolic {
        entries.push(json!({ "resource": {
            "resourceType": "Observation",
            "code": { "coding": [{ "code": "85354-9", "display": "Blood pressure panel" }] },
            "component": [
                { "code": { "coding": [{ "code": "8480-6", "display": "Systolic Blood Pressure" }] },
                  "valueQuantity": { "value": systolic } }
            ]
        }}));
    }
    json!({ "resourceType": "Bundle", "entry": entries })
}

fn config(source: &Path, output: &Path) -> IngestConfig {
    IngestConfig::new(source, output)
        .with_reference_date(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
}

#[test]
fn end_to_end_writes_dataset() {
    let source = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let output = out.path().join("patients.csv");
    write_json(source.path(), "a.json", &bundle("1970-01-01", 28.0, Some(150.0), 210.0));
    write_json(source.path(), "b.json", &bundle("1990-07-01", 22.0, None, 180.0));
    write_json(source.path(), "c.json", &json!({ "resourceType": "Practitioner" }));
    std::fs::write(source.path().join("d.json"), "not json").unwrap();

    let result = run_ingestion(&config(source.path(), &output), false).unwrap();

    assert!(result.written);
    assert_eq!(result.record_count, 2);
    assert_eq!(result.read.files_scanned, 4);
    assert_eq!(result.read.skipped.len(), 1);
    assert_eq!(result.read.failed.len(), 1);
    let preview = result.preview.as_ref().unwrap();
    assert_eq!(preview.height(), 2);

    let mut reader = csv::Reader::from_path(&output).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][0], "a.json");
    assert_eq!(rows[0][1].parse::<i64>().unwrap(), 54);
    assert_eq!(&rows[0][7], "1");
    assert_eq!(&rows[1][0], "b.json");
    assert_eq!(rows[1][1].parse::<i64>().unwrap(), 33);
    assert_eq!(rows[1][3].parse::<f64>().unwrap(), 120.0);
    assert_eq!(&rows[1][7], "0");
}

#[test]
fn zero_records_writes_nothing() {
    let source = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let output = out.path().join("patients.csv");
    write_json(source.path(), "org.json", &json!({ "resourceType": "Organization" }));

    let result = run_ingestion(&config(source.path(), &output), false).unwrap();

    assert!(!result.written);
    assert!(result.is_empty());
    assert!(result.report.is_none());
    assert!(!output.exists());
}

#[test]
fn empty_directory_reports_zero_and_writes_nothing() {
    let source = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let output = out.path().join("patients.csv");

    let result = run_ingestion(&config(source.path(), &output), false).unwrap();

    assert_eq!(result.read.files_found, 0);
    assert_eq!(result.read.files_scanned, 0);
    assert_eq!(result.record_count, 0);
    assert!(!result.written);
    assert!(result.preview.is_none());
    assert!(!output.exists());
}

#[test]
fn missing_source_directory_is_fatal() {
    let out = TempDir::new().unwrap();
    let missing = out.path().join("does-not-exist");

    let err = run_ingestion(&config(&missing, &out.path().join("p.csv")), false).unwrap_err();

    assert!(format!("{err:#}").contains("does-not-exist"));
}

#[test]
fn limit_caps_files_and_preview_caps_rows() {
    let source = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    for idx in 0..8 {
        write_json(
            source.path(),
            &format!("{idx:02}.json"),
            &bundle("1980-03-03", 20.0 + f64::from(idx), Some(130.0), 190.0),
        );
    }

    let cfg = config(source.path(), &out.path().join("p.csv")).with_record_limit(Some(7));
    let result = run_ingestion(&cfg, false).unwrap();

    assert_eq!(result.read.files_found, 8);
    assert_eq!(result.read.files_scanned, 7);
    assert_eq!(result.record_count, 7);
    assert_eq!(result.preview.as_ref().unwrap().height(), PREVIEW_ROWS);
}

#[test]
fn rerun_is_byte_identical() {
    let source = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_json(source.path(), "b.json", &bundle("1955-12-24", 31.5, None, 240.0));
    write_json(source.path(), "a.json", &bundle("1962-02-14", 26.0, Some(138.0), 205.0));

    let first = out.path().join("first.csv");
    let second = out.path().join("second.csv");
    run_ingestion(&config(source.path(), &first), false).unwrap();
    run_ingestion(&config(source.path(), &second), false).unwrap();

    assert_eq!(std::fs::read(first).unwrap(), std::fs::read(second).unwrap());
}
