//! # tabscope - exploratory summaries for Arrow tables
//!
//! tabscope prints the first look you want at a new table: its head, an info
//! block, missing values, descriptive statistics grouped by column type,
//! duplicated rows and value counts for categorical columns. Tables are Apache
//! Arrow [`RecordBatch`](arrow::record_batch::RecordBatch)es, optionally
//! loaded through DataFusion.
//!
//! ## Quick Start
//!
//! ```rust
//! use arrow::array::{BooleanArray, Int64Array, StringArray};
//! use arrow::record_batch::RecordBatch;
//! use std::sync::Arc;
//! use tabscope::prelude::*;
//!
//! let batch = RecordBatch::try_from_iter(vec![
//!     ("id", Arc::new(Int64Array::from(vec![1, 1, 2])) as _),
//!     ("color", Arc::new(StringArray::from(vec!["red", "red", "blue"])) as _),
//!     ("flag", Arc::new(BooleanArray::from(vec![true, true, false])) as _),
//! ])?;
//! let dataset = Dataset::from(batch);
//!
//! let mut summarizer = TableSummarizer::new(Vec::new());
//! summarizer.summarize(&dataset, &SummaryOptions::default())?;
//! summarizer.category_counts(&dataset, &CategoryCountOptions::default())?;
//!
//! let output = String::from_utf8(summarizer.into_inner()).unwrap();
//! assert!(output.contains("Number of duplicated rows: 2"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The free functions [`eda`], [`describe_by_type`], [`show_nulls`],
//! [`find_duplicates`] and [`category_counts`] print straight to standard
//! output.
//!
//! ## Column kinds
//!
//! Every column is classified from its Arrow type into one
//! [`ColumnKind`](classify::ColumnKind): boolean, numeric, datetime or other.
//! Descriptive statistics are computed per kind and printed in the order
//! datetime, numeric, boolean, other.
//!
//! ## Architecture
//!
//! - **`dataset`**: the table type, with an optional row index
//! - **`classify`**: column kind classification
//! - **`analyzers`**: pure report computation
//! - **`formatters`**: human and JSON rendering of reports
//! - **`summarizer`**: the printing operations
//! - **`sources`**: collecting DataFusion DataFrames into datasets
//! - **`logging`**: `tracing` configuration helpers
//!
//! Missing values are nulls, plus NaN in floating point columns.

pub mod analyzers;
pub mod classify;
pub mod config;
pub mod dataset;
pub mod error;
pub mod formatters;
pub mod logging;
pub mod prelude;
pub mod sources;
pub mod stats;
pub mod summarizer;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_fixtures;

pub use summarizer::{category_counts, describe_by_type, eda, find_duplicates, show_nulls};
