//! Head rows and the info block.

use std::collections::BTreeMap;

use arrow::array::Array;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::RowTable;
use crate::classify::ColumnKind;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::stats::{display_values, missing_count};

/// How rows are labelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IndexSummary {
    /// Positional labels `0..entries`
    Range { entries: usize },
    /// An explicit index
    Labels {
        name: Option<String>,
        kind: ColumnKind,
        dtype: String,
        entries: usize,
        first: Option<String>,
        last: Option<String>,
    },
}

/// One line of the per-column table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub position: usize,
    pub name: String,
    pub non_null: usize,
    pub dtype: String,
    pub kind: ColumnKind,
}

/// Shape, dtypes and memory footprint of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoReport {
    pub index: IndexSummary,
    pub columns: Vec<ColumnInfo>,
    /// Number of columns per dtype, ordered by dtype name
    pub dtype_counts: Vec<(String, usize)>,
    pub memory_bytes: usize,
}

/// The first `n` rows.
#[instrument(skip(dataset), fields(rows = dataset.num_rows()))]
pub fn head_rows(dataset: &Dataset, n: usize) -> Result<RowTable> {
    let positions: Vec<usize> = (0..n.min(dataset.num_rows())).collect();
    RowTable::from_rows(dataset, &positions)
}

#[instrument(skip_all, fields(rows = dataset.num_rows(), columns = dataset.num_columns()))]
pub fn info_report(dataset: &Dataset) -> Result<InfoReport> {
    let index = match dataset.index() {
        None => IndexSummary::Range {
            entries: dataset.num_rows(),
        },
        Some(index) => {
            let values = display_values(index.values())?;
            IndexSummary::Labels {
                name: index.name().map(str::to_string),
                kind: index.kind(),
                dtype: index.data_type().to_string(),
                entries: index.len(),
                first: values.first().cloned().flatten(),
                last: values.last().cloned().flatten(),
            }
        }
    };

    let schema = dataset.schema();
    let mut dtype_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut columns = Vec::with_capacity(dataset.num_columns());
    for (position, (field, array)) in schema.fields().iter().zip(dataset.columns()).enumerate() {
        let dtype = field.data_type().to_string();
        *dtype_counts.entry(dtype.clone()).or_default() += 1;
        columns.push(ColumnInfo {
            position,
            name: field.name().clone(),
            non_null: array.len() - missing_count(array)?,
            dtype,
            kind: ColumnKind::of(field.data_type()),
        });
    }

    Ok(InfoReport {
        index,
        columns,
        dtype_counts: dtype_counts.into_iter().collect(),
        memory_bytes: dataset.memory_size(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::RowIndex;
    use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray, TimestampSecondArray};
    use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
    use std::sync::Arc;

    fn sample() -> Dataset {
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int64, false),
            Field::new("score", DataType::Float64, true),
            Field::new("label", DataType::Utf8, true),
            Field::new("rank", DataType::Int64, true),
        ]));
        Dataset::try_new(
            schema,
            vec![
                Arc::new(Int64Array::from(vec![1, 2, 3])),
                Arc::new(Float64Array::from(vec![Some(0.5), Some(f64::NAN), None])),
                Arc::new(StringArray::from(vec![Some("x"), None, Some("z")])),
                Arc::new(Int64Array::from(vec![Some(1), Some(2), Some(3)])),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_info_counts_non_null_values() {
        let report = info_report(&sample()).unwrap();
        let non_null: Vec<usize> = report.columns.iter().map(|c| c.non_null).collect();
        assert_eq!(non_null, vec![3, 1, 2, 3]);
        assert_eq!(report.index, IndexSummary::Range { entries: 3 });
        assert!(report.memory_bytes > 0);
    }

    #[test]
    fn test_info_dtype_counts_sorted_by_name() {
        let report = info_report(&sample()).unwrap();
        assert_eq!(
            report.dtype_counts,
            vec![
                ("Float64".to_string(), 1),
                ("Int64".to_string(), 2),
                ("Utf8".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_info_datetime_index() {
        let stamps: ArrayRef = Arc::new(TimestampSecondArray::from(vec![0, 86_400, 172_800]));
        let ds = sample()
            .with_index(RowIndex::named("day", stamps))
            .unwrap();
        match info_report(&ds).unwrap().index {
            IndexSummary::Labels {
                name,
                kind,
                dtype,
                entries,
                first,
                last,
            } => {
                assert_eq!(name.as_deref(), Some("day"));
                assert_eq!(kind, ColumnKind::Datetime);
                assert_eq!(dtype, DataType::Timestamp(TimeUnit::Second, None).to_string());
                assert_eq!(entries, 3);
                assert_eq!(first.as_deref(), Some("1970-01-01T00:00:00"));
                assert_eq!(last.as_deref(), Some("1970-01-03T00:00:00"));
            }
            other => panic!("expected labelled index, got {other:?}"),
        }
    }

    #[test]
    fn test_head_rows() {
        let head = head_rows(&sample(), 2).unwrap();
        assert_eq!(head.len(), 2);
        assert_eq!(head.labels, vec!["0".to_string(), "1".to_string()]);
        assert_eq!(head.columns.len(), 4);
        assert_eq!(head.rows[1][1], None);
        assert_eq!(head.rows[1][2], None);
        assert_eq!(head.rows[0][2].as_deref(), Some("x"));
    }
}
