//! Files written for one run.

use std::fs;

use chrono::{NaiveDate, NaiveDateTime};
use metafill_ingest::{TableFormat, read_table};
use metafill_output::{OutputOptions, write_outputs, write_outputs_at, write_table};
use metafill_validate::ValidationMessage;
use polars::prelude::*;
use tempfile::TempDir;

fn test_df(columns: Vec<(&str, Vec<Option<&str>>)>) -> DataFrame {
    let cols: Vec<Column> = columns
        .into_iter()
        .map(|(name, values)| {
            Series::new(
                name.into(),
                values
                    .into_iter()
                    .map(|v| v.map(String::from))
                    .collect::<Vec<_>>(),
            )
            .into_column()
        })
        .collect();
    DataFrame::new(cols).unwrap()
}

fn populated() -> DataFrame {
    test_df(vec![
        ("sample_name", vec![Some("s1"), Some("s2")]),
        ("body_site", vec![Some("gut"), None]),
        ("hosttype_shorthand", vec![Some("human"), Some("martian")]),
        ("sampletype_shorthand", vec![Some("stool"), Some("stool")]),
        ("qc_note", vec![Some(""), Some("invalid host_type")]),
    ])
}

fn stamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(3, 4, 5)
        .unwrap()
}

fn message() -> ValidationMessage {
    ValidationMessage {
        sample_name: "s1".to_string(),
        field_name: "host_age".to_string(),
        error_message: "required field".to_string(),
    }
}

#[test]
fn internals_removed_splits_fails() {
    let dir = TempDir::new().unwrap();
    let options = OutputOptions::new(dir.path(), "study");
    let paths = write_outputs_at(&populated(), &[message()], &options, stamp()).unwrap();

    assert_eq!(
        paths.main.file_name().unwrap(),
        "2024-01-02_03-04-05_study.csv"
    );
    assert_eq!(
        fs::read_to_string(&paths.main).unwrap(),
        "sample_name,body_site\ns1,gut\n"
    );

    let fails = fs::read_to_string(paths.fails.unwrap()).unwrap();
    assert_eq!(
        fails,
        "sample_name,body_site,hosttype_shorthand,sampletype_shorthand,qc_note\n\
         s2,,martian,stool,invalid host_type\n"
    );

    let errors = fs::read_to_string(paths.validation_errors.unwrap()).unwrap();
    assert_eq!(
        errors,
        "sample_name,field_name,error_message\ns1,host_age,required field\n"
    );
}

#[test]
fn keeping_internals_writes_every_row_and_no_fails_file() {
    let dir = TempDir::new().unwrap();
    let mut options = OutputOptions::new(dir.path(), "study");
    options.remove_internals = false;
    options.format = TableFormat::Tsv;
    let paths = write_outputs_at(&populated(), &[], &options, stamp()).unwrap();

    assert!(paths.fails.is_none());
    let main = read_table(&paths.main).unwrap();
    assert_eq!(main.height(), 2);
    assert!(main.column("qc_note").is_ok());
}

#[test]
fn empty_files_are_suppressed_on_request() {
    let dir = TempDir::new().unwrap();
    let data = test_df(vec![
        ("sample_name", vec![Some("s1")]),
        ("hosttype_shorthand", vec![Some("human")]),
        ("sampletype_shorthand", vec![Some("stool")]),
        ("qc_note", vec![Some("")]),
    ]);
    let mut options = OutputOptions::new(dir.path(), "study");
    options.suppress_empty_fails = true;
    let paths = write_outputs(&data, &[], &options).unwrap();

    assert!(paths.fails.is_none());
    assert!(paths.validation_errors.is_none());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn empty_fails_are_written_without_suppression() {
    let dir = TempDir::new().unwrap();
    let data = test_df(vec![
        ("sample_name", vec![Some("s1")]),
        ("qc_note", vec![Some("")]),
    ]);
    let options = OutputOptions::new(dir.path(), "study");
    let paths = write_outputs_at(&data, &[], &options, stamp()).unwrap();

    let fails = fs::read_to_string(paths.fails.unwrap()).unwrap();
    assert_eq!(fails, "sample_name,qc_note\n");
    assert_eq!(
        fs::read_to_string(paths.validation_errors.unwrap()).unwrap(),
        ""
    );
}

#[test]
fn output_directory_is_created() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("a").join("b");
    let options = OutputOptions::new(&nested, "study");
    let paths = write_outputs_at(&populated(), &[], &options, stamp()).unwrap();
    assert!(paths.main.starts_with(&nested));
}

#[test]
fn tables_round_trip_through_ingest() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("table.tsv");
    let data = test_df(vec![
        ("sample_name", vec![Some("s1"), Some("s2")]),
        ("description", vec![Some("a, b"), None]),
    ]);
    write_table(&data, &path, TableFormat::Tsv).unwrap();
    let back = read_table(&path).unwrap();
    assert!(back.equals_missing(&data));
}
