//! Value counts for categorical columns.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::classify::ColumnKind;
use crate::config::CategoryCountOptions;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::stats::{display_values, value_frequencies};

/// Frequency table of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueCounts {
    pub column: String,
    pub kind: ColumnKind,
    /// Distinct non-missing values, most frequent first
    pub counts: Vec<(String, u64)>,
}

impl ValueCounts {
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }
}

/// Why a column has no frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    TooManyValues { distinct: usize, max: usize },
    Numeric,
    Datetime,
    /// Not reached because counting stopped at an earlier boolean column
    AfterBoolean,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedColumn {
    pub name: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub columns: Vec<ValueCounts>,
    pub skipped: Vec<SkippedColumn>,
    /// Boolean column at which counting stopped, if any
    pub stopped_at: Option<String>,
}

impl CategoryCounts {
    pub fn get(&self, column: &str) -> Option<&ValueCounts> {
        self.columns.iter().find(|c| c.column == column)
    }
}

#[instrument(skip_all, fields(
    columns = dataset.num_columns(),
    max_unique_values = ?options.max_unique_values,
    stop_after_boolean = options.stop_after_boolean,
))]
pub fn value_counts_report(
    dataset: &Dataset,
    options: &CategoryCountOptions,
) -> Result<CategoryCounts> {
    let mut report = CategoryCounts::default();
    let kinds = dataset.column_kinds();
    let names = dataset.column_names();

    let mut entries = names.into_iter().zip(kinds).zip(dataset.columns());
    for ((name, kind), array) in entries.by_ref() {
        let excluded = match kind {
            ColumnKind::Numeric if !options.include_numeric => Some(SkipReason::Numeric),
            ColumnKind::Datetime if !options.include_datetime => Some(SkipReason::Datetime),
            _ => None,
        };
        if let Some(reason) = excluded {
            debug!(column = %name, ?reason, "Skipping column");
            report.skipped.push(SkippedColumn { name, reason });
            continue;
        }

        let counts = value_frequencies(&display_values(array)?);

        if kind == ColumnKind::Boolean {
            report.columns.push(ValueCounts {
                column: name.clone(),
                kind,
                counts,
            });
            if options.stop_after_boolean {
                warn!(
                    column = %name,
                    "Stopping value counts at the first boolean column; \
                     set stop_after_boolean = false to count every column"
                );
                report.stopped_at = Some(name);
                break;
            }
            continue;
        }

        if let Some(max) = options.max_unique_values {
            if counts.len() > max {
                let reason = SkipReason::TooManyValues {
                    distinct: counts.len(),
                    max,
                };
                debug!(column = %name, ?reason, "Skipping column");
                report.skipped.push(SkippedColumn { name, reason });
                continue;
            }
        }

        report.columns.push(ValueCounts {
            column: name,
            kind,
            counts,
        });
    }

    report.skipped.extend(entries.map(|((name, _), _)| SkippedColumn {
        name,
        reason: SkipReason::AfterBoolean,
    }));

    debug!(
        counted = report.columns.len(),
        skipped = report.skipped.len(),
        "Computed value counts"
    );
    Ok(report)
}
