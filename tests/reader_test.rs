//! Tests for the table reader

use std::io::Write;
use std::path::PathBuf;

use tempfile::TempDir;

use rsclass::infrastructure::{read_records, InfraError};

fn write_table(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("create table file");
    file.write_all(content.as_bytes()).expect("write table file");
    path
}

#[test]
fn given_plain_two_column_table_when_reading_then_returns_records_in_order() {
    let temp = TempDir::new().unwrap();
    let path = write_table(&temp, "ebkp.csv", "2,Structure\n203,Walls\n203006,Brick Wall\n");

    let records = read_records(&path).unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].code, "2");
    assert_eq!(records[0].label, "Structure");
    assert_eq!(records[2].code, "203006");
    assert_eq!(records[2].label, "Brick Wall");
}

#[test]
fn given_quoted_labels_when_reading_then_commas_and_quotes_survive() {
    let temp = TempDir::new().unwrap();
    let path = write_table(
        &temp,
        "quoted.csv",
        "203001,\"Wände, tragend\"\n203002,\"so called \"\"facade\"\"\"\n",
    );

    let records = read_records(&path).unwrap();

    assert_eq!(records[0].label, "Wände, tragend");
    assert_eq!(records[1].label, "so called \"facade\"");
}

#[test]
fn given_blank_lines_when_reading_then_they_are_skipped() {
    let temp = TempDir::new().unwrap();
    let path = write_table(&temp, "gaps.csv", "2,Structure\n\n   \n203,Walls\n");

    let records = read_records(&path).unwrap();

    assert_eq!(records.len(), 2);
}

#[test]
fn given_single_field_row_when_reading_then_label_is_empty() {
    let temp = TempDir::new().unwrap();
    let path = write_table(&temp, "bare.csv", "2\n");

    let records = read_records(&path).unwrap();

    assert_eq!(records[0].code, "2");
    assert_eq!(records[0].label, "");
}

#[test]
fn given_too_many_fields_when_reading_then_errors_with_row_number() {
    let temp = TempDir::new().unwrap();
    let path = write_table(&temp, "bad.csv", "2,Structure\n203,Walls,extra\n");

    let err = read_records(&path).unwrap_err();

    match err {
        InfraError::MalformedRow { row, .. } => assert_eq!(row, 2),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn given_missing_file_when_reading_then_errors() {
    let result = read_records(std::path::Path::new("/nonexistent/table.csv"));
    assert!(result.is_err());
}
