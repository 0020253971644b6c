//! Pure report computation.
//!
//! Each analyzer inspects a [`Dataset`](crate::dataset::Dataset) and returns
//! a serializable report. Nothing here writes output; the
//! [`summarizer`](crate::summarizer) renders reports through a
//! [`formatter`](crate::formatters).
//!
//! - [`info`]: head rows and the info block (index, dtypes, memory)
//! - [`nulls`]: missing values per column
//! - [`describe`]: descriptive statistics grouped by column kind
//! - [`duplicates`]: fully duplicated rows
//! - [`categories`]: value counts for categorical columns

pub mod categories;
pub mod describe;
pub mod duplicates;
pub mod info;
pub mod nulls;

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::error::Result;
use crate::stats::display_values;

pub use categories::{value_counts_report, CategoryCounts, SkipReason, SkippedColumn, ValueCounts};
pub use describe::{describe_columns, DescribeTable, StatValue, TypeGroupedDescription};
pub use duplicates::{duplicate_positions, duplicate_report, DuplicateReport};
pub use info::{head_rows, info_report, ColumnInfo, IndexSummary, InfoReport};
pub use nulls::{null_report, ColumnNulls, NullReport};

/// Selected rows rendered to display strings, with their row labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowTable {
    /// Header of the label column (index name, empty when unnamed)
    pub label_header: String,
    pub columns: Vec<String>,
    /// Row labels: index values, or original positions
    pub labels: Vec<String>,
    /// Row-major cells; `None` marks a missing value
    pub rows: Vec<Vec<Option<String>>>,
}

impl RowTable {
    /// Renders the given row positions of a dataset.
    pub fn from_rows(dataset: &Dataset, positions: &[usize]) -> Result<Self> {
        let batch = dataset.labelled_rows(positions)?;
        let schema = batch.schema();
        let mut rendered = batch
            .columns()
            .iter()
            .map(display_values)
            .collect::<Result<Vec<_>>>()?
            .into_iter();

        let labels = rendered
            .next()
            .unwrap_or_default()
            .into_iter()
            .map(Option::unwrap_or_default)
            .collect();

        let column_values: Vec<Vec<Option<String>>> = rendered.collect();
        let rows = (0..positions.len())
            .map(|row| {
                column_values
                    .iter()
                    .map(|values| values.get(row).cloned().flatten())
                    .collect()
            })
            .collect();

        Ok(Self {
            label_header: schema.field(0).name().clone(),
            columns: dataset.column_names(),
            labels,
            rows,
        })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
