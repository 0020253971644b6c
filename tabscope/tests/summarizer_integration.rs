//! End-to-end tests of the printing operations against an in-memory writer.

use std::sync::Arc;

use arrow::array::{
    ArrayRef, BooleanArray, Float64Array, Int32Array, Int64Array, StringArray, StructArray,
    TimestampMillisecondArray,
};
use arrow::buffer::NullBuffer;
use arrow::datatypes::{DataType, Field, Fields};
use arrow::record_batch::RecordBatch;
use tabscope::prelude::*;

fn dataset(columns: Vec<(&str, ArrayRef)>) -> Dataset {
    Dataset::from(RecordBatch::try_from_iter(columns).unwrap())
}

fn render<F>(f: F) -> String
where
    F: FnOnce(&mut TableSummarizer<Vec<u8>>) -> tabscope::error::Result<()>,
{
    let mut summarizer = TableSummarizer::new(Vec::new());
    f(&mut summarizer).unwrap();
    String::from_utf8(summarizer.into_inner()).unwrap()
}

/// Cells of every header and body line of the rendered tables.
fn cells(output: &str) -> Vec<Vec<String>> {
    output
        .lines()
        .filter(|line| line.starts_with('|'))
        .map(|line| {
            line.trim_matches('|')
                .split('|')
                .map(|cell| cell.trim().to_string())
                .collect()
        })
        .collect()
}

fn id_flag() -> Dataset {
    dataset(vec![
        ("id", Arc::new(Int64Array::from(vec![1, 1, 2])) as ArrayRef),
        ("flag", Arc::new(BooleanArray::from(vec![true, true, false])) as ArrayRef),
    ])
}

#[test]
fn test_duplicates_scenario_prints_both_rows() {
    let output = render(|s| s.find_duplicates(&id_flag(), &DuplicateOptions::default()));
    assert!(output.starts_with("Number of duplicated rows: 2\n\n"));
    assert_eq!(
        cells(&output),
        vec![vec!["", "id", "flag"], vec!["0", "1", "true"], vec!["1", "1", "true"]]
    );
}

#[test]
fn test_duplicates_count_only() {
    let output = render(|s| s.find_duplicates(&id_flag(), &DuplicateOptions::count_only()));
    assert_eq!(output, "Number of duplicated rows: 2\n");
}

#[test]
fn test_sorted_duplicates() {
    let ds = dataset(vec![
        ("id", Arc::new(Int64Array::from(vec![5, 3, 5, 3])) as ArrayRef),
        ("tag", Arc::new(StringArray::from(vec!["x", "y", "x", "y"])) as ArrayRef),
    ]);
    let output = render(|s| {
        s.find_duplicates(&ds, &DuplicateOptions::default().with_sort(true))
    });
    let labels: Vec<String> = cells(&output).into_iter().skip(1).map(|row| row[0].clone()).collect();
    assert_eq!(labels, vec!["1", "3", "0", "2"]);
}

#[test]
fn test_no_nulls_scenario() {
    let ds = dataset(vec![(
        "value",
        Arc::new(Int64Array::from(vec![1, 2, 3])) as ArrayRef,
    )]);
    assert_eq!(render(|s| s.show_nulls(&ds)), "No null in the dataframe.\n");
}

#[test]
fn test_null_fractions() {
    let ds = dataset(vec![
        (
            "score",
            Arc::new(Float64Array::from(vec![Some(1.0), None, Some(f64::NAN), Some(4.0)]))
                as ArrayRef,
        ),
        (
            "name",
            Arc::new(StringArray::from(vec![Some("a"), Some("b"), Some("c"), None])) as ArrayRef,
        ),
    ]);
    let output = render(|s| s.show_nulls(&ds));
    let rows = cells(&output);
    assert!(rows.contains(&vec!["score".to_string(), "2".to_string()]));
    assert!(rows.contains(&vec!["name".to_string(), "1".to_string()]));
    assert!(rows.contains(&vec!["score".to_string(), "0.500000".to_string()]));
    assert!(rows.contains(&vec!["name".to_string(), "0.250000".to_string()]));
}

#[test]
fn test_category_counts_scenario() {
    let ds = dataset(vec![(
        "color",
        Arc::new(StringArray::from(vec!["red", "red", "blue"])) as ArrayRef,
    )]);
    let output = render(|s| {
        s.category_counts(&ds, &CategoryCountOptions::default())
            .map(|_| ())
    });
    assert_eq!(
        cells(&output),
        vec![vec!["color", "count"], vec!["red", "2"], vec!["blue", "1"]]
    );
}

#[test]
fn test_category_counts_stop_at_boolean() {
    let ds = dataset(vec![
        ("first", Arc::new(StringArray::from(vec!["a", "b", "a"])) as ArrayRef),
        ("flag", Arc::new(BooleanArray::from(vec![true, false, false])) as ArrayRef),
        ("last", Arc::new(StringArray::from(vec!["x", "x", "y"])) as ArrayRef),
    ]);
    let output = render(|s| {
        s.category_counts(&ds, &CategoryCountOptions::default())
            .map(|_| ())
    });
    let headers: Vec<String> = cells(&output)
        .into_iter()
        .filter(|row| row[1] == "count")
        .map(|row| row[0].clone())
        .collect();
    assert_eq!(headers, vec!["first", "flag"]);

    let all = CategoryCountOptions::default().with_stop_after_boolean(false);
    let output = render(|s| s.category_counts(&ds, &all).map(|_| ()));
    assert!(cells(&output).contains(&vec!["last".to_string(), "count".to_string()]));
}

#[test]
fn test_describe_groups_in_order() {
    let ds = dataset(vec![
        ("label", Arc::new(StringArray::from(vec!["a", "b", "a"])) as ArrayRef),
        ("flag", Arc::new(BooleanArray::from(vec![true, false, true])) as ArrayRef),
        ("n", Arc::new(Int32Array::from(vec![1, 2, 3])) as ArrayRef),
        (
            "at",
            Arc::new(TimestampMillisecondArray::from(vec![0, 1_000, 2_000])) as ArrayRef,
        ),
    ]);
    let output = render(|s| s.describe_by_type(&ds, &DescribeOptions::default()));
    let positions: Vec<usize> = [
        "Datetime columns:",
        "Numeric columns:",
        "Boolean columns:",
        "Other columns:",
    ]
    .iter()
    .map(|heading| output.find(heading).unwrap())
    .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));

    let rows = cells(&output);
    assert!(rows.contains(&vec!["mean".to_string(), "2.000000".to_string()]));
    assert!(rows.contains(&vec!["top".to_string(), "true".to_string()]));
    assert!(rows.contains(&vec!["top".to_string(), "a".to_string()]));
}

#[test]
fn test_describe_skips_absent_groups() {
    let ds = dataset(vec![(
        "n",
        Arc::new(Int64Array::from(vec![1, 2, 3])) as ArrayRef,
    )]);
    let output = render(|s| s.describe_by_type(&ds, &DescribeOptions::default()));
    assert!(output.starts_with("Numeric columns:\n"));
    assert!(!output.contains("Other columns:"));
    assert!(!output.contains("Datetime"));
}

#[test]
fn test_datetime_index_described_first() {
    let stamps: ArrayRef = Arc::new(TimestampMillisecondArray::from(vec![0, 60_000, 120_000]));
    let ds = dataset(vec![(
        "n",
        Arc::new(Int64Array::from(vec![1, 2, 3])) as ArrayRef,
    )])
    .with_index(RowIndex::named("at", stamps))
    .unwrap();
    let output = render(|s| s.describe_by_type(&ds, &DescribeOptions::default()));
    assert!(output.starts_with("Datetime index:\n"));
    assert!(cells(&output).contains(&vec!["".to_string(), "at".to_string()]));
}

#[test]
fn test_summary_is_idempotent() {
    let ds = id_flag();
    let mut summarizer = TableSummarizer::new(Vec::new());
    summarizer.summarize(&ds, &SummaryOptions::default()).unwrap();
    let first = summarizer.into_inner();

    let mut summarizer = TableSummarizer::new(first.clone());
    summarizer.summarize(&ds, &SummaryOptions::default()).unwrap();
    let both = summarizer.into_inner();

    assert_eq!(&both[..first.len()], &first[..]);
    assert_eq!(&both[first.len()..], &first[..]);
}

#[test]
fn test_summary_layout() {
    let output = render(|s| s.summarize(&id_flag(), &SummaryOptions::default()));
    assert!(output.starts_with("Head of the dataframe:\n\n"));
    assert!(output.contains("RangeIndex: 3 entries, 0 to 2\n"));
    assert!(output.contains("Data columns (total 2 columns):\n"));
    assert!(output.contains("dtypes: Boolean(1), Int64(1)\n"));
    assert!(output.contains("No null in the dataframe.\n\n\n"));
    assert!(output.contains("Number of duplicated rows: 2\n"));
}

#[test]
fn test_head_row_limit() {
    let ds = dataset(vec![(
        "n",
        Arc::new(Int64Array::from_iter_values(0..20)) as ArrayRef,
    )]);
    let output = render(|s| s.head(&ds, 5));
    // header plus five rows
    assert_eq!(cells(&output).len(), 6);
}

#[test]
fn test_eda_rejects_non_tabular_input() {
    let array: ArrayRef = Arc::new(Int64Array::from(vec![1, 2, 3]));
    let err = tabscope::eda(array, &SummaryOptions::default()).unwrap_err();
    match err {
        TabscopeError::InvalidInput { found } => assert!(found.contains("Int64")),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_eda_rejects_struct_with_null_rows() {
    let fields = Fields::from(vec![Field::new("a", DataType::Int64, true)]);
    let array: ArrayRef = Arc::new(StructArray::new(
        fields,
        vec![Arc::new(Int64Array::from(vec![1, 2])) as ArrayRef],
        Some(NullBuffer::from(vec![true, false])),
    ));
    let err = tabscope::eda(array, &SummaryOptions::default()).unwrap_err();
    assert!(matches!(err, TabscopeError::InvalidInput { .. }));
}

#[test]
fn test_eda_rejects_empty_batch_list() {
    let err = tabscope::eda(Vec::<RecordBatch>::new(), &SummaryOptions::default()).unwrap_err();
    assert!(matches!(err, TabscopeError::InvalidInput { .. }));
}
