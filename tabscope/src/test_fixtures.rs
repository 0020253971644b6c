//! Sample datasets for tests, benchmarks and demos.
//!
//! Available to this crate's tests and, with the `test-utils` feature, to
//! dependents.

use std::sync::Arc;

use arrow::array::{
    ArrayRef, BooleanArray, Date32Array, Float64Array, Int64Array, StringArray,
    TimestampSecondArray,
};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;

use crate::dataset::{Dataset, RowIndex};

/// Six people with a few missing values.
///
/// Columns: `name` (Utf8), `age` (Int64), `city` (Utf8), `score` (Float64),
/// `active` (Boolean), `joined` (Date32).
pub fn people() -> Dataset {
    let schema = Arc::new(Schema::new(vec![
        Field::new("name", DataType::Utf8, true),
        Field::new("age", DataType::Int64, true),
        Field::new("city", DataType::Utf8, true),
        Field::new("score", DataType::Float64, true),
        Field::new("active", DataType::Boolean, true),
        Field::new("joined", DataType::Date32, true),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(vec![
            Some("Alice"),
            Some("Bob"),
            None,
            Some("Dana"),
            Some("Eve"),
            Some("Frank"),
        ])),
        Arc::new(Int64Array::from(vec![
            Some(34),
            Some(28),
            Some(45),
            None,
            Some(52),
            Some(28),
        ])),
        Arc::new(StringArray::from(vec![
            "Paris", "Lyon", "Paris", "Nice", "Lyon", "Paris",
        ])),
        Arc::new(Float64Array::from(vec![
            Some(88.5),
            Some(f64::NAN),
            Some(72.0),
            Some(91.25),
            None,
            Some(65.0),
        ])),
        Arc::new(BooleanArray::from(vec![
            Some(true),
            Some(false),
            Some(true),
            Some(true),
            None,
            Some(false),
        ])),
        // 2021-01-01 onwards
        Arc::new(Date32Array::from(vec![
            18628, 18660, 18700, 18628, 18750, 18800,
        ])),
    ];
    Dataset::new(batch(schema, columns))
}

/// `[id: Int64, flag: Boolean]` with rows `(1, true), (1, true), (2, false)`.
pub fn with_duplicates() -> Dataset {
    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int64, false),
        Field::new("flag", DataType::Boolean, false),
    ]));
    Dataset::new(batch(
        schema,
        vec![
            Arc::new(Int64Array::from(vec![1, 1, 2])),
            Arc::new(BooleanArray::from(vec![true, true, false])),
        ],
    ))
}

/// A single numeric column without missing values.
pub fn numeric_only() -> Dataset {
    let schema = Arc::new(Schema::new(vec![Field::new("value", DataType::Float64, false)]));
    Dataset::new(batch(
        schema,
        vec![Arc::new(Float64Array::from(vec![1.0, 2.5, 4.0, 8.0]))],
    ))
}

/// `[color: Utf8]` with values `red, red, blue`.
pub fn colors() -> Dataset {
    let schema = Arc::new(Schema::new(vec![Field::new("color", DataType::Utf8, false)]));
    Dataset::new(batch(
        schema,
        vec![Arc::new(StringArray::from(vec!["red", "red", "blue"]))],
    ))
}

/// Daily sensor readings indexed by a `timestamp` datetime index.
pub fn sensor_readings(days: usize) -> Dataset {
    let stamps: Vec<i64> = (0..days as i64).map(|d| 1_609_459_200 + d * 86_400).collect();
    let readings: Vec<Option<f64>> = (0..days)
        .map(|d| (d % 7 != 3).then(|| 20.0 + (d % 5) as f64 * 0.5))
        .collect();
    let sensors: Vec<&str> = (0..days)
        .map(|d| if d % 2 == 0 { "north" } else { "south" })
        .collect();

    let schema = Arc::new(Schema::new(vec![
        Field::new("sensor", DataType::Utf8, false),
        Field::new("reading", DataType::Float64, true),
    ]));
    let index: ArrayRef = Arc::new(TimestampSecondArray::from(stamps));
    Dataset::new(batch(
        schema,
        vec![
            Arc::new(StringArray::from(sensors)),
            Arc::new(Float64Array::from(readings)),
        ],
    ))
    .with_index(RowIndex::named("timestamp", index))
    .unwrap_or_else(|e| panic!("fixture index must match its rows: {e}"))
}

/// A wide synthetic dataset for benchmarks: `rows` rows with an id, a
/// low-cardinality category, a float measure with gaps and a flag.
pub fn synthetic(rows: usize) -> Dataset {
    let categories = ["alpha", "beta", "gamma", "delta"];
    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int64, false),
        Field::new("category", DataType::Utf8, false),
        Field::new("measure", DataType::Float64, true),
        Field::new("flag", DataType::Boolean, false),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from_iter_values((0..rows as i64).map(|i| i % (rows as i64 / 2).max(1)))),
        Arc::new(StringArray::from_iter_values(
            (0..rows).map(|i| categories[i % categories.len()]),
        )),
        Arc::new(Float64Array::from_iter(
            (0..rows).map(|i| (i % 11 != 0).then(|| (i as f64).sqrt())),
        )),
        Arc::new(BooleanArray::from_iter((0..rows).map(|i| Some(i % 3 == 0)))),
    ];
    Dataset::new(batch(schema, columns))
}

fn batch(schema: Arc<Schema>, columns: Vec<ArrayRef>) -> RecordBatch {
    RecordBatch::try_new(schema, columns)
        .unwrap_or_else(|e| panic!("fixture columns must match their schema: {e}"))
}
