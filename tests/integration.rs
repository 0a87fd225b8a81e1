//! Integration tests for explorar.

#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::uninlined_format_args,
    clippy::cast_lossless,
    clippy::float_cmp
)]

use std::{io::Write, sync::Arc};

use arrow::{
    array::{Float64Array, Int64Array, RecordBatch, StringArray},
    datatypes::{DataType, Field, Schema},
};
use explorar::{
    compute_quality_flags, correlation_matrix, flatten_summary_for_print,
    has_suspicious_id_duplicates, missing_table, summarize_dataset, top_categories, ColumnType,
    QualityEvaluator, Table,
};

/// The sample table from the README-style walkthrough: one missing age,
/// one missing city.
fn sample_table() -> Table {
    let schema = Arc::new(Schema::new(vec![
        Field::new("age", DataType::Float64, true),
        Field::new("height", DataType::Float64, true),
        Field::new("city", DataType::Utf8, true),
    ]));

    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Float64Array::from(vec![
                Some(10.0),
                Some(20.0),
                Some(30.0),
                None,
            ])),
            Arc::new(Float64Array::from(vec![
                Some(140.0),
                Some(150.0),
                Some(160.0),
                Some(170.0),
            ])),
            Arc::new(StringArray::from(vec![
                Some("A"),
                Some("B"),
                Some("A"),
                None,
            ])),
        ],
    )
    .expect("batch");

    Table::from_batch(batch).expect("table")
}

fn events_table(event_ids: Vec<i64>, user_ids: Vec<i64>) -> Table {
    let schema = Arc::new(Schema::new(vec![
        Field::new("event_id", DataType::Int64, false),
        Field::new("user_id", DataType::Int64, false),
        Field::new("event_type", DataType::Utf8, false),
    ]));

    let types: Vec<&str> = vec![
        "login", "login", "click", "login", "click", "purchase", "login", "purchase", "click",
        "logout",
    ];

    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int64Array::from(event_ids)),
            Arc::new(Int64Array::from(user_ids)),
            Arc::new(StringArray::from(types)),
        ],
    )
    .expect("batch");
    Table::from_batch(batch).expect("table")
}

#[test]
fn test_full_eda_pipeline() {
    let table = sample_table();

    // 1. Summarize
    let summary = summarize_dataset(&table);
    assert_eq!(summary.n_rows, 4);
    assert_eq!(summary.n_cols, 3);
    assert_eq!(summary.column("age").expect("age").dtype, ColumnType::Numeric);
    assert_eq!(
        summary.column("city").expect("city").dtype,
        ColumnType::Categorical
    );

    // 2. Missingness agrees with the summary
    let missing = missing_table(&table);
    assert_eq!(missing.len(), summary.n_cols);
    assert_eq!(missing.get("age").expect("age").missing_count, 1);
    for col in &summary.columns {
        assert_eq!(
            missing.get(&col.name).expect("entry").missing_count,
            col.missing_count
        );
    }

    // 3. Correlation over the two numeric columns
    let corr = correlation_matrix(&table);
    assert!(!corr.is_empty());
    let age_height = corr.get("age", "height").expect("age/height");
    assert!((age_height - 1.0).abs() < 1e-9);
    assert_eq!(corr.get("age", "height"), corr.get("height", "age"));

    // 4. Top categories for city
    let cats = top_categories(&table, 5, 2);
    let city = cats.get("city").expect("city");
    assert!(city.len() <= 2);
    assert_eq!(city[0].value, "A");
    assert_eq!(city[0].count, 2);

    // 5. Quality flags
    let flags = compute_quality_flags(&summary, &missing).expect("flags");
    assert!(flags.quality_score >= 0.0 && flags.quality_score <= 1.0);
    assert!(!flags.suspicious_id_duplicates);

    // 6. Flat view for printing
    let flat = flatten_summary_for_print(&summary);
    assert_eq!(flat.len(), 3);
    assert_eq!(flat.rows[0].name, "age");
    assert!((flat.rows[0].missing_share - 0.25).abs() < 1e-9);
}

#[test]
fn test_duplicate_identifiers_are_flagged() {
    // event_id repeats 5, user_id repeats 103
    let table = events_table(
        vec![1, 2, 3, 4, 5, 5, 7, 8, 9, 10],
        vec![101, 102, 103, 103, 105, 106, 107, 108, 109, 110],
    );
    let summary = summarize_dataset(&table);
    assert!(has_suspicious_id_duplicates(&summary));

    let flags = compute_quality_flags(&summary, &missing_table(&table)).expect("flags");
    assert!(flags.suspicious_id_duplicates);
}

#[test]
fn test_unique_identifiers_are_not_flagged() {
    let table = events_table((1..=10).collect(), (101..=110).collect());
    let summary = summarize_dataset(&table);
    assert!(!has_suspicious_id_duplicates(&summary));
}

#[test]
fn test_csv_workflow() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("people.csv");
    let mut file = std::fs::File::create(&path).expect("create");
    writeln!(file, "age,height,city").expect("write");
    writeln!(file, "10,140,A").expect("write");
    writeln!(file, "20,150,B").expect("write");
    writeln!(file, "30,160,A").expect("write");
    writeln!(file, ",170,").expect("write");
    drop(file);

    let table = Table::from_csv(&path).expect("table");
    let summary = summarize_dataset(&table);
    assert_eq!(summary.n_rows, 4);
    assert_eq!(summary.n_cols, 3);
    assert_eq!(summary.column("age").expect("age").missing_count, 1);

    let cats = top_categories(&table, 5, 2);
    let city = cats.get("city").expect("city");
    assert_eq!(city[0].value, "A");
    assert_eq!(city[0].count, 2);
}

#[test]
fn test_csv_round_trip_preserves_counts() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("round.csv");

    let table = sample_table();
    table.to_csv(&path).expect("write csv");

    let reloaded = Table::from_csv(&path).expect("reload");
    assert_eq!(reloaded.num_rows(), table.num_rows());
    assert_eq!(reloaded.num_columns(), table.num_columns());

    let summary = summarize_dataset(&reloaded);
    assert_eq!(summary.column("age").expect("age").missing_count, 1);
}

#[test]
fn test_parquet_round_trip_preserves_counts() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("round.parquet");

    let table = sample_table();
    table.to_parquet(&path).expect("write parquet");

    let reloaded = Table::from_parquet(&path).expect("reload");
    assert_eq!(reloaded.num_rows(), 4);
    assert_eq!(reloaded.num_columns(), 3);

    let missing = missing_table(&reloaded);
    assert_eq!(missing.get("city").expect("city").missing_count, 1);
}

#[test]
fn test_reports_serialize_to_json() {
    let table = sample_table();
    let summary = summarize_dataset(&table);
    let missing = missing_table(&table);
    let flags = compute_quality_flags(&summary, &missing).expect("flags");

    for json in [
        serde_json::to_string(&summary).expect("summary json"),
        serde_json::to_string(&missing).expect("missing json"),
        serde_json::to_string(&correlation_matrix(&table)).expect("corr json"),
        serde_json::to_string(&top_categories(&table, 5, 2)).expect("cats json"),
        serde_json::to_string(&flags).expect("flags json"),
    ] {
        let value: serde_json::Value = serde_json::from_str(&json).expect("parse");
        assert!(value.is_object());
    }
}

#[test]
fn test_mismatched_reports_fail_loudly() {
    let summary = summarize_dataset(&sample_table());
    let other_missing = missing_table(&events_table(
        (1..=10).collect(),
        (101..=110).collect(),
    ));

    let err = compute_quality_flags(&summary, &other_missing).unwrap_err();
    assert!(err.to_string().contains("Report mismatch"));
}

#[test]
fn test_custom_evaluator_thresholds() {
    let table = sample_table();
    let summary = summarize_dataset(&table);
    let missing = missing_table(&table);

    let flags = QualityEvaluator::new()
        .mostly_missing_threshold(0.2)
        .evaluate(&summary, &missing)
        .expect("flags");
    assert!(flags.has_mostly_missing_columns);
}

#[test]
fn test_zero_row_table_never_divides() {
    let schema = Arc::new(Schema::new(vec![
        Field::new("x", DataType::Float64, true),
        Field::new("label", DataType::Utf8, true),
    ]));
    let table = Table::from_batch(RecordBatch::new_empty(schema)).expect("table");

    let summary = summarize_dataset(&table);
    assert_eq!(summary.n_rows, 0);
    for col in &summary.columns {
        assert_eq!(col.missing_share, 0.0);
    }

    let missing = missing_table(&table);
    assert_eq!(missing.len(), 2);

    assert!(correlation_matrix(&table).is_empty());

    let flags = compute_quality_flags(&summary, &missing).expect("flags");
    assert_eq!(flags.quality_score, 1.0);
}
