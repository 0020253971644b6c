//! Missing values per column.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::dataset::Dataset;
use crate::error::Result;
use crate::stats::missing_count;

/// Missing values in one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnNulls {
    pub column: String,
    pub count: usize,
    /// `count / row_count`, in `[0, 1]`; zero for an empty dataset
    pub fraction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NullReport {
    pub row_count: usize,
    pub columns: Vec<ColumnNulls>,
}

impl NullReport {
    /// Missing values across all columns.
    pub fn total(&self) -> usize {
        self.columns.iter().map(|c| c.count).sum()
    }

    pub fn has_nulls(&self) -> bool {
        self.total() > 0
    }
}

#[instrument(skip_all, fields(rows = dataset.num_rows(), columns = dataset.num_columns()))]
pub fn null_report(dataset: &Dataset) -> Result<NullReport> {
    let row_count = dataset.num_rows();
    let columns = dataset
        .column_names()
        .into_iter()
        .zip(dataset.columns())
        .map(|(column, array)| {
            let count = missing_count(array)?;
            let fraction = if row_count == 0 {
                0.0
            } else {
                count as f64 / row_count as f64
            };
            Ok(ColumnNulls {
                column,
                count,
                fraction,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let report = NullReport { row_count, columns };
    debug!(total = report.total(), "Counted missing values");
    Ok(report)
}
