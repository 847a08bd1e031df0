//! End-to-end pipeline tests over real files in a temporary directory.
//!
//! These exercise the full load -> covariate -> predict -> persist path and
//! the invariants it must uphold: exact formula values, zero-clipping of the
//! linear fits, row order preservation, and fail-fast behaviour that leaves
//! no output file behind.

use std::fs;
use std::path::{Path, PathBuf};

use flashrate_core::config::{CoefficientPaths, RunConfig};
use flashrate_core::errors::FlashRateError;
use flashrate_core::pipeline;
use tempfile::TempDir;

const SUMMARY_CSV: &str = "\
,cape_monthly_mean,mtpr_monthly_mean,mean_strike_rate
0,2.0,2.0,1.1
1,1.0,1.0,0.2
2,5.0,1.0,3.4
3,0.5,1.0,0.0
";

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("failed to write test input");
    path
}

/// Standard coefficient set used across tests:
/// pl: a=2, b=0.5; pl_op: a=1, b=1; sc: a=3; li: a=1.5, b=-2; li2: a=1, b=-1.
fn write_coefficients(dir: &Path) -> CoefficientPaths {
    CoefficientPaths {
        pl: write_file(dir, "pl.csv", ",0\na,2.0\nb,0.5\n"),
        pl_op: write_file(dir, "pl_op.csv", ",0\na,1.0\nb,1.0\n"),
        sc: write_file(dir, "sc.csv", ",0\na,3.0\n"),
        li: write_file(dir, "li.csv", ",0\na,1.5\nb,-2.0\n"),
        li2: write_file(dir, "li2.csv", ",0\na,1.0\nb,-1.0\n"),
    }
}

fn config_for(dir: &Path) -> RunConfig {
    RunConfig {
        summary: write_file(dir, "summary.csv", SUMMARY_CSV),
        coefficients: write_coefficients(dir),
        predictions: dir.join("predictions.csv"),
    }
}

fn read_rows(path: &Path) -> (Vec<String>, Vec<Vec<f64>>) {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .expect("failed to open predictions");
    let mut labels = Vec::new();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.expect("bad prediction record");
        labels.push(record.get(0).unwrap().to_string());
        rows.push(
            record
                .iter()
                .skip(1)
                .map(|v| v.parse::<f64>().expect("non-numeric prediction"))
                .collect(),
        );
    }
    (labels, rows)
}

#[test]
fn run_produces_expected_predictions() {
    let dir = TempDir::new().unwrap();
    let config = config_for(dir.path());

    let predictions = pipeline::run(&config).unwrap();
    assert_eq!(predictions.len(), 4);

    let (_, rows) = read_rows(&config.predictions);
    assert_eq!(rows.len(), 4);

    // Row 0: cxp = 2 * 2 = 4.
    let row = &rows[0];
    assert_eq!(row[0], 4.0); // pl: 2 * 4^0.5
    assert_eq!(row[1], 4.0); // pl_op: 1 * 4^1
    assert_eq!(row[2], 12.0); // sc: 3 * 4
    assert_eq!(row[3], 4.0); // li: 1.5 * 4 - 2
    assert_eq!(row[4], 3.0); // li2: 1 * 4 - 1

    // Row 1: cxp = 1; linear fit dips to -0.5 and is clipped.
    let row = &rows[1];
    assert_eq!(row[3], 0.0);
    assert_eq!(row[4], 0.0);
}

#[test]
fn linear_predictions_are_never_negative() {
    let dir = TempDir::new().unwrap();
    let config = config_for(dir.path());

    pipeline::run(&config).unwrap();
    let (_, rows) = read_rows(&config.predictions);

    // li is column 3, li2 is column 4; rows 1 and 3 are negative pre-clip.
    for (i, row) in rows.iter().enumerate() {
        assert!(row[3] >= 0.0, "li negative at row {}", i);
        assert!(row[4] >= 0.0, "li2 negative at row {}", i);
    }
    assert_eq!(rows[3][3], 0.0); // 1.5 * 0.5 - 2.0 clipped
    assert_eq!(rows[3][4], 0.0); // 1.0 * 0.5 - 1.0 clipped
}

#[test]
fn output_rows_mirror_input_index_and_order() {
    let dir = TempDir::new().unwrap();
    let config = config_for(dir.path());

    pipeline::run(&config).unwrap();
    let (labels, rows) = read_rows(&config.predictions);

    assert_eq!(labels, vec!["0", "1", "2", "3"]);
    assert_eq!(rows.len(), 4);

    // cxp values per input row: 4, 1, 5, 0.5; sc = 3 * cxp keeps the order.
    let sc: Vec<f64> = rows.iter().map(|r| r[2]).collect();
    assert_eq!(sc, vec![12.0, 3.0, 15.0, 1.5]);
}

#[test]
fn missing_summary_column_fails_before_any_output() {
    let dir = TempDir::new().unwrap();
    let mut config = config_for(dir.path());
    config.summary = write_file(
        dir.path(),
        "bad_summary.csv",
        ",cape_monthly_mean,mean_strike_rate\n0,2.0,1.1\n",
    );

    let err = pipeline::run(&config).unwrap_err();
    match err {
        FlashRateError::MissingColumn { column, .. } => {
            assert_eq!(column, "mtpr_monthly_mean");
        }
        other => panic!("expected MissingColumn, got {:?}", other),
    }
    assert!(
        !config.predictions.exists(),
        "failed run must not leave an output file"
    );
}

#[test]
fn missing_coefficient_file_fails_before_any_output() {
    let dir = TempDir::new().unwrap();
    let mut config = config_for(dir.path());
    config.coefficients.li2 = dir.path().join("absent.csv");

    let err = pipeline::run(&config).unwrap_err();
    assert!(matches!(err, FlashRateError::Io { .. }));
    assert!(!config.predictions.exists());
}

#[test]
fn coefficient_table_without_expected_label_fails() {
    let dir = TempDir::new().unwrap();
    let mut config = config_for(dir.path());
    // Scale table carries only `b`; the model needs `a`.
    config.coefficients.sc = write_file(dir.path(), "sc_bad.csv", ",0\nb,3.0\n");

    let err = pipeline::run(&config).unwrap_err();
    match err {
        FlashRateError::MissingCoefficient { name, .. } => assert_eq!(name, "a"),
        other => panic!("expected MissingCoefficient, got {:?}", other),
    }
    assert!(!config.predictions.exists());
}

#[test]
fn run_from_toml_config() {
    let dir = TempDir::new().unwrap();
    let config = config_for(dir.path());

    let toml_contents = format!(
        r#"
summary = {summary:?}
predictions = {predictions:?}

[coefficients]
pl = {pl:?}
pl_op = {pl_op:?}
sc = {sc:?}
li = {li:?}
li2 = {li2:?}
"#,
        summary = config.summary,
        predictions = config.predictions,
        pl = config.coefficients.pl,
        pl_op = config.coefficients.pl_op,
        sc = config.coefficients.sc,
        li = config.coefficients.li,
        li2 = config.coefficients.li2,
    );
    let config_path = write_file(dir.path(), "run.toml", &toml_contents);

    let loaded = RunConfig::from_toml_file(&config_path).unwrap();
    let predictions = pipeline::run(&loaded).unwrap();

    assert_eq!(predictions.len(), 4);
    assert!(loaded.predictions.exists());
}
