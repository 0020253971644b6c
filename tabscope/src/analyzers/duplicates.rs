//! Fully duplicated rows.
//!
//! Rows are compared on their complete value tuple (the index is ignored)
//! using Arrow's row format, which gives every tuple a hashable,
//! byte-comparable encoding. Missing values compare equal to each other,
//! including NaN against null in floating point columns.

use std::collections::HashMap;

use arrow::array::{ArrayRef, BooleanArray};
use arrow::compute::kernels::nullif::nullif;
use arrow::compute::SortOptions;
use arrow::row::{Row, RowConverter, SortField};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::RowTable;
use crate::classify::is_floating;
use crate::config::DuplicateOptions;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::stats::missing_mask;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateReport {
    pub total_rows: usize,
    /// Rows whose value tuple appears more than once, counting every occurrence
    pub duplicate_rows: usize,
    /// Rows beyond the first occurrence of each tuple (`total_rows - distinct`)
    pub redundant_rows: usize,
    /// The participating rows, when requested and present
    pub rows: Option<RowTable>,
}

/// Positions of every row that takes part in a duplicate group.
///
/// Positions are ascending, or ordered by the full value tuple (ascending,
/// nulls last, ties by position) when `sort` is set.
pub fn duplicate_positions(dataset: &Dataset, sort: bool) -> Result<Vec<usize>> {
    Ok(scan(dataset, sort)?.positions)
}

#[instrument(skip_all, fields(rows = dataset.num_rows(), show = options.show, sort = options.sort))]
pub fn duplicate_report(dataset: &Dataset, options: &DuplicateOptions) -> Result<DuplicateReport> {
    let scan = scan(dataset, options.sort)?;
    let rows = if options.show && !scan.positions.is_empty() {
        Some(RowTable::from_rows(dataset, &scan.positions)?)
    } else {
        None
    };

    debug!(
        duplicate_rows = scan.positions.len(),
        distinct = scan.distinct,
        "Scanned for duplicate rows"
    );

    Ok(DuplicateReport {
        total_rows: dataset.num_rows(),
        duplicate_rows: scan.positions.len(),
        redundant_rows: dataset.num_rows() - scan.distinct,
        rows,
    })
}

struct Scan {
    positions: Vec<usize>,
    distinct: usize,
}

fn scan(dataset: &Dataset, sort: bool) -> Result<Scan> {
    let num_rows = dataset.num_rows();
    // Without columns there are no values to compare.
    if dataset.num_columns() == 0 || num_rows == 0 {
        return Ok(Scan {
            positions: Vec::new(),
            distinct: num_rows,
        });
    }

    let order = SortOptions {
        descending: false,
        nulls_first: false,
    };
    let fields = dataset
        .schema()
        .fields()
        .iter()
        .map(|field| SortField::new_with_options(field.data_type().clone(), order))
        .collect();
    let columns = dataset
        .columns()
        .iter()
        .map(normalize_missing)
        .collect::<Result<Vec<_>>>()?;
    let converter = RowConverter::new(fields)?;
    let rows = converter.convert_columns(&columns)?;

    let mut occurrences: HashMap<Row<'_>, usize> = HashMap::with_capacity(num_rows);
    for row in rows.iter() {
        *occurrences.entry(row).or_insert(0) += 1;
    }

    let mut positions: Vec<usize> = (0..num_rows)
        .filter(|&i| occurrences.get(&rows.row(i)).is_some_and(|&n| n > 1))
        .collect();
    if sort {
        positions.sort_by(|&a, &b| rows.row(a).cmp(&rows.row(b)));
    }

    Ok(Scan {
        positions,
        distinct: occurrences.len(),
    })
}

/// Turns NaN into null so that both encode as the same missing value.
fn normalize_missing(array: &ArrayRef) -> Result<ArrayRef> {
    if !is_floating(array.data_type()) {
        return Ok(array.clone());
    }
    let mask = BooleanArray::from(missing_mask(array)?);
    Ok(nullif(array.as_ref(), &mask)?)
}
