//! End-to-end conversion tests: CSV table in, IFC reference file out

use std::path::PathBuf;

use rstest::rstest;
use tempfile::TempDir;

use rsclass::application::{ApplicationError, ConvertService};
use rsclass::domain::DomainError;
use rsclass::{convert_file, SchemeMeta};

fn write_table(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write table");
    path
}

#[rstest]
fn test_convert_writes_reference_file_with_linked_hierarchy() {
    let temp = TempDir::new().unwrap();
    let input = write_table(
        &temp,
        "ebkp.csv",
        "2,Structure\n203,Walls\n203006,Brick Wall\n",
    );
    let output = temp.path().join("ebkp.ifc");

    let report = convert_file(&input, &output, SchemeMeta::default(), false).unwrap();

    assert_eq!(report.entries, 3);
    assert!(report.warnings.is_empty());
    assert_eq!(report.output, output);

    let doc = std::fs::read_to_string(&output).unwrap();
    assert!(doc.starts_with("ISO-10303-21;"));
    assert!(doc.contains("#1=IFCCLASSIFICATION('CRB','2020','2020-09-28','eBKP-H'"));
    assert!(doc.contains("#2=IFCCLASSIFICATIONREFERENCE($,'2','Structure',#1,$,$);"));
    assert!(doc.contains("#3=IFCCLASSIFICATIONREFERENCE($,'203','Walls',#2,$,$);"));
    assert!(doc.contains("#4=IFCCLASSIFICATIONREFERENCE($,'203006','Brick Wall',#3,$,$);"));
}

#[rstest]
fn test_convert_reports_orphans_but_still_writes() {
    let temp = TempDir::new().unwrap();
    let input = write_table(&temp, "orphan.csv", "203,Walls\n999006,Orphan Element\n");
    let output = temp.path().join("orphan.ifc");

    let report = convert_file(&input, &output, SchemeMeta::default(), false).unwrap();

    assert_eq!(report.warnings.len(), 1);
    assert!(output.exists());

    // Orphan is attached to the classification container itself.
    let doc = std::fs::read_to_string(&output).unwrap();
    assert!(doc.contains("IFCCLASSIFICATIONREFERENCE($,'999006','Orphan Element',#1,$,$);"));
}

#[rstest]
fn test_strict_mode_fails_on_warnings_and_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let input = write_table(&temp, "orphan.csv", "203,Walls\n999006,Orphan Element\n");
    let output = temp.path().join("orphan.ifc");

    let err = convert_file(&input, &output, SchemeMeta::default(), true).unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::StrictViolation { count: 1 }
    ));
    assert!(!output.exists());
}

#[rstest]
fn test_duplicate_code_aborts_conversion() {
    let temp = TempDir::new().unwrap();
    let input = write_table(&temp, "dup.csv", "1,A\n1,B\n");
    let output = temp.path().join("dup.ifc");

    let err = convert_file(&input, &output, SchemeMeta::default(), false).unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::DuplicateCode { .. })
    ));
    assert!(!output.exists());
}

#[rstest]
fn test_check_reports_levels_orphans_and_code_shape() {
    let temp = TempDir::new().unwrap();
    let input = write_table(
        &temp,
        "mixed.csv",
        "2,Structure\n203,Walls\n999006,Orphan\n20-3,Dashed\n2030,Odd Length\n",
    );

    let report = ConvertService::new(SchemeMeta::default())
        .check(&input)
        .unwrap();

    assert_eq!(report.entries, 5);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.findings.len(), 2);
    assert!(!report.is_clean());
    assert_eq!(report.finding_count(), 3);
    assert_eq!(report.level_counts.get(&1), Some(&1));
    assert_eq!(report.level_counts.get(&3), Some(&1));
    assert_eq!(report.level_counts.get(&4), Some(&2));
    assert_eq!(report.level_counts.get(&6), Some(&1));
}

#[rstest]
fn test_check_is_clean_for_consistent_table() {
    let temp = TempDir::new().unwrap();
    let input = write_table(&temp, "clean.csv", "2,Structure\n203,Walls\n");

    let report = ConvertService::new(SchemeMeta::default())
        .check(&input)
        .unwrap();

    assert!(report.is_clean());
}

#[rstest]
fn test_scheme_metadata_overrides_reach_the_document() {
    let temp = TempDir::new().unwrap();
    let input = write_table(&temp, "t.csv", "A,Alpha\n");
    let output = temp.path().join("t.ifc");

    let meta = SchemeMeta {
        source: "ACME".to_string(),
        edition: "1".to_string(),
        edition_date: "2024-01-31".to_string(),
        name: "TestScheme".to_string(),
        description: String::new(),
        reference_tokens: vec![],
    };
    convert_file(&input, &output, meta, false).unwrap();

    let doc = std::fs::read_to_string(&output).unwrap();
    // Empty description and token list render as unset attributes.
    assert!(doc.contains("#1=IFCCLASSIFICATION('ACME','1','2024-01-31','TestScheme',$,$,$);"));
}
