//! Loading datasets through DataFusion and summarizing them.

use std::io::Write;
use std::sync::Arc;

use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use datafusion::datasource::MemTable;
use datafusion::prelude::*;
use tabscope::prelude::*;

fn orders_batch(ids: Vec<i64>, regions: Vec<&str>) -> RecordBatch {
    let schema = Arc::new(Schema::new(vec![
        Field::new("order_id", DataType::Int64, false),
        Field::new("region", DataType::Utf8, false),
    ]));
    RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int64Array::from(ids)) as ArrayRef,
            Arc::new(StringArray::from(regions)) as ArrayRef,
        ],
    )
    .unwrap()
}

#[tokio::test]
async fn test_from_table_concatenates_partitions() {
    let first = orders_batch(vec![1, 2], vec!["east", "west"]);
    let second = orders_batch(vec![2, 3], vec!["west", "east"]);
    let table = MemTable::try_new(first.schema(), vec![vec![first], vec![second]]).unwrap();

    let ctx = SessionContext::new();
    ctx.register_table("orders", Arc::new(table)).unwrap();

    let dataset = Dataset::from_table(&ctx, "orders").await.unwrap();
    assert_eq!(dataset.num_rows(), 4);
    assert_eq!(dataset.column_names(), vec!["order_id", "region"]);

    let mut summarizer = TableSummarizer::new(Vec::new());
    summarizer
        .find_duplicates(&dataset, &DuplicateOptions::count_only())
        .unwrap();
    let output = String::from_utf8(summarizer.into_inner()).unwrap();
    assert_eq!(output, "Number of duplicated rows: 2\n");
}

#[tokio::test]
async fn test_from_table_unknown_table() {
    let ctx = SessionContext::new();
    let err = Dataset::from_table(&ctx, "missing").await.unwrap_err();
    assert!(err.to_string().contains("missing"));
}

#[tokio::test]
async fn test_from_dataframe_empty_result_keeps_schema() {
    let ctx = SessionContext::new();
    let batch = orders_batch(vec![1], vec!["east"]);
    ctx.register_batch("orders", batch).unwrap();

    let df = ctx
        .sql("SELECT * FROM orders WHERE order_id > 100")
        .await
        .unwrap();
    let dataset = Dataset::from_dataframe(df).await.unwrap();
    assert_eq!(dataset.num_rows(), 0);
    assert_eq!(dataset.num_columns(), 2);

    let report = tabscope::analyzers::null_report(&dataset).unwrap();
    assert!(!report.has_nulls());
}

#[tokio::test]
async fn test_csv_file_summary() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "city,temperature,rainy").unwrap();
    writeln!(file, "Oslo,3.5,true").unwrap();
    writeln!(file, "Rome,,false").unwrap();
    writeln!(file, "Oslo,3.5,true").unwrap();
    file.flush().unwrap();

    let ctx = SessionContext::new();
    let df = ctx
        .read_csv(file.path().to_str().unwrap(), CsvReadOptions::new())
        .await
        .unwrap();
    let dataset = Dataset::from_dataframe(df).await.unwrap();
    assert_eq!(
        dataset.column_kinds(),
        vec![ColumnKind::Other, ColumnKind::Numeric, ColumnKind::Boolean]
    );

    let mut summarizer = TableSummarizer::new(Vec::new());
    summarizer
        .summarize(&dataset, &SummaryOptions::statistics_only())
        .unwrap();
    let output = String::from_utf8(summarizer.into_inner()).unwrap();
    assert!(output.contains("Number of nulls in each column:"));
    assert!(output.contains("Numeric columns:"));
    assert!(output.contains("Boolean columns:"));
    assert!(output.contains("Number of duplicated rows: 2"));
}
