//! Descriptive statistics grouped by column kind.
//!
//! Columns are split into datetime, numeric, boolean and other groups (in
//! that order) and each present group gets one table:
//!
//! | group            | statistics                                   |
//! |------------------|----------------------------------------------|
//! | numeric          | count, mean, std, min, percentiles, max      |
//! | datetime         | count, mean, min, percentiles, max           |
//! | boolean, other   | count, unique, top, freq                     |
//!
//! A datetime row index is described first, with the datetime statistics.

use std::fmt;

use arrow::array::ArrayRef;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::classify::ColumnKind;
use crate::config::DescribeOptions;
use crate::dataset::Dataset;
use crate::error::{Result, TabscopeError};
use crate::stats::{
    datetime_ticks, display_values, format_ticks, mean, numeric_values, percentile_label,
    quantile, sample_std, value_frequencies,
};

/// One cell of a statistics table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Count(u64),
    Number(f64),
    Text(String),
    Missing,
}

impl StatValue {
    /// Renders the value with the given number of decimals for floats.
    pub fn render(&self, precision: usize) -> String {
        match self {
            Self::Count(n) => n.to_string(),
            Self::Number(v) if v.is_nan() => "NaN".to_string(),
            Self::Number(v) => format!("{v:.precision$}"),
            Self::Text(s) => s.clone(),
            Self::Missing => "NaN".to_string(),
        }
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(6))
    }
}

/// Statistics of one column, aligned with [`DescribeTable::statistics`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescription {
    pub name: String,
    pub values: Vec<StatValue>,
}

/// Statistics table for one group of columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescribeTable {
    pub kind: ColumnKind,
    /// Row labels, e.g. `count`, `mean`, `25%`
    pub statistics: Vec<String>,
    pub columns: Vec<ColumnDescription>,
}

impl DescribeTable {
    /// Looks up one statistic of one column.
    pub fn get(&self, column: &str, statistic: &str) -> Option<&StatValue> {
        let row = self.statistics.iter().position(|s| s == statistic)?;
        self.columns
            .iter()
            .find(|c| c.name == column)
            .and_then(|c| c.values.get(row))
    }
}

/// Index description (for a datetime index) followed by one table per group present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeGroupedDescription {
    pub index: Option<DescribeTable>,
    pub groups: Vec<DescribeTable>,
}

impl TypeGroupedDescription {
    pub fn group(&self, kind: ColumnKind) -> Option<&DescribeTable> {
        self.groups.iter().find(|g| g.kind == kind)
    }
}

#[instrument(skip_all, fields(rows = dataset.num_rows(), columns = dataset.num_columns()))]
pub fn describe_columns(
    dataset: &Dataset,
    options: &DescribeOptions,
) -> Result<TypeGroupedDescription> {
    let percentiles = options.sorted_percentiles()?;

    let index = match dataset.index() {
        Some(index) if index.is_datetime() => {
            let name = index.name().unwrap_or("index").to_string();
            Some(describe_datetime(&[(name, index.values())], &percentiles)?)
        }
        _ => None,
    };

    let kinds = dataset.column_kinds();
    let names = dataset.column_names();
    let mut groups = Vec::new();
    for kind in ColumnKind::DESCRIBE_ORDER {
        let members: Vec<(String, &ArrayRef)> = names
            .iter()
            .zip(dataset.columns())
            .zip(&kinds)
            .filter(|(_, column_kind)| **column_kind == kind)
            .map(|((name, array), _)| (name.clone(), array))
            .collect();
        if members.is_empty() {
            debug!(%kind, "No columns in group, skipping");
            continue;
        }
        let table = match kind {
            ColumnKind::Numeric => describe_numeric(&members, &percentiles)?,
            ColumnKind::Datetime => describe_datetime(&members, &percentiles)?,
            ColumnKind::Boolean | ColumnKind::Other => describe_categorical(kind, &members)?,
        };
        groups.push(table);
    }

    Ok(TypeGroupedDescription { index, groups })
}

fn describe_numeric(
    columns: &[(String, &ArrayRef)],
    percentiles: &[f64],
) -> Result<DescribeTable> {
    let mut statistics: Vec<String> = ["count", "mean", "std", "min"]
        .into_iter()
        .map(String::from)
        .collect();
    statistics.extend(percentiles.iter().map(|p| percentile_label(*p)));
    statistics.push("max".to_string());

    let mut described = Vec::with_capacity(columns.len());
    for (name, array) in columns {
        let mut values = numeric_values(array)?;
        values.sort_by(f64::total_cmp);

        let mut stats = vec![
            StatValue::Count(values.len() as u64),
            StatValue::Number(mean(&values)),
            StatValue::Number(sample_std(&values)),
            StatValue::Number(values.first().copied().unwrap_or(f64::NAN)),
        ];
        stats.extend(
            percentiles
                .iter()
                .map(|p| StatValue::Number(quantile(&values, *p))),
        );
        stats.push(StatValue::Number(values.last().copied().unwrap_or(f64::NAN)));

        described.push(ColumnDescription {
            name: name.clone(),
            values: stats,
        });
    }

    Ok(DescribeTable {
        kind: ColumnKind::Numeric,
        statistics,
        columns: described,
    })
}

fn describe_datetime(
    columns: &[(String, &ArrayRef)],
    percentiles: &[f64],
) -> Result<DescribeTable> {
    let mut statistics: Vec<String> = ["count", "mean", "min"]
        .into_iter()
        .map(String::from)
        .collect();
    statistics.extend(percentiles.iter().map(|p| percentile_label(*p)));
    statistics.push("max".to_string());

    let mut described = Vec::with_capacity(columns.len());
    for (name, array) in columns {
        let mut ticks = datetime_ticks(array)?;
        ticks.sort_unstable();

        let mut stats = vec![StatValue::Count(ticks.len() as u64)];
        if ticks.is_empty() {
            stats.extend(std::iter::repeat_n(StatValue::Missing, statistics.len() - 1));
        } else {
            let mut points = vec![tick_mean(&ticks)?];
            points.extend(ticks.first().copied());
            points.extend(percentiles.iter().filter_map(|p| tick_quantile(&ticks, *p)));
            points.extend(ticks.last().copied());
            stats.extend(
                format_ticks(&points, array.data_type())?
                    .into_iter()
                    .map(StatValue::Text),
            );
        }

        described.push(ColumnDescription {
            name: name.clone(),
            values: stats,
        });
    }

    Ok(DescribeTable {
        kind: ColumnKind::Datetime,
        statistics,
        columns: described,
    })
}

fn describe_categorical(
    kind: ColumnKind,
    columns: &[(String, &ArrayRef)],
) -> Result<DescribeTable> {
    let statistics: Vec<String> = ["count", "unique", "top", "freq"]
        .into_iter()
        .map(String::from)
        .collect();

    let mut described = Vec::with_capacity(columns.len());
    for (name, array) in columns {
        let values = display_values(array)?;
        let count = values.iter().filter(|v| v.is_some()).count();
        let frequencies = value_frequencies(&values);
        let (top, freq) = match frequencies.first() {
            Some((value, freq)) => (StatValue::Text(value.clone()), StatValue::Count(*freq)),
            None => (StatValue::Missing, StatValue::Missing),
        };
        described.push(ColumnDescription {
            name: name.clone(),
            values: vec![
                StatValue::Count(count as u64),
                StatValue::Count(frequencies.len() as u64),
                top,
                freq,
            ],
        });
    }

    Ok(DescribeTable {
        kind,
        statistics,
        columns: described,
    })
}

fn tick_mean(ticks: &[i64]) -> Result<i64> {
    let sum: i128 = ticks.iter().map(|&t| i128::from(t)).sum();
    let len = i128::try_from(ticks.len())
        .map_err(|_| TabscopeError::Internal("row count overflow".to_string()))?;
    i64::try_from(sum / len)
        .map_err(|_| TabscopeError::Internal("datetime mean out of range".to_string()))
}

/// Interpolated quantile over sorted ticks, rounded to the nearest tick.
fn tick_quantile(sorted: &[i64], p: f64) -> Option<i64> {
    let position = p * (sorted.len().checked_sub(1)? as f64);
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let low = *sorted.get(lower)?;
    let high = *sorted.get(upper)?;
    let offset = ((high - low) as f64 * (position - lower as f64)).round() as i64;
    Some(low + offset)
}
