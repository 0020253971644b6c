//! Rendering of summary reports.
//!
//! Analyzers produce plain report values; a [`ReportFormatter`] turns them
//! into text. Two formatters are provided:
//!
//! - [`HumanFormatter`]: terminal tables, the output of the printing
//!   operations on [`TableSummarizer`](crate::summarizer::TableSummarizer)
//! - [`JsonFormatter`]: the same reports as JSON, for programmatic use
//!
//! # Examples
//!
//! ```rust
//! use tabscope::formatters::{HumanFormatter, ReportFormatter};
//! use tabscope::summarizer::SummaryReport;
//!
//! let formatter = HumanFormatter::new();
//! // let report: SummaryReport = /* ... */;
//! // println!("{}", formatter.format(&report)?);
//! ```

use std::fmt::Write;
use std::sync::Arc;

use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use serde::Serialize;

use crate::analyzers::{
    CategoryCounts, DescribeTable, DuplicateReport, IndexSummary, InfoReport, NullReport,
    RowTable, TypeGroupedDescription,
};
use crate::classify::ColumnKind;
use crate::error::Result;
use crate::summarizer::SummaryReport;

/// Configuration options for rendering reports.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Decimals used for floating point statistics
    pub float_precision: usize,
    /// Text shown for missing values in row tables
    pub null_marker: String,
    /// Whether to include a generation timestamp (JSON output)
    pub include_timestamps: bool,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            float_precision: 6,
            null_marker: "null".to_string(),
            include_timestamps: false,
        }
    }
}

impl FormatterConfig {
    /// Sets the number of decimals for floating point statistics.
    pub fn with_float_precision(mut self, precision: usize) -> Self {
        self.float_precision = precision;
        self
    }

    /// Sets the marker printed for missing values.
    pub fn with_null_marker(mut self, marker: impl Into<String>) -> Self {
        self.null_marker = marker.into();
        self
    }

    /// Sets whether to include timestamps in output.
    pub fn with_timestamps(mut self, include: bool) -> Self {
        self.include_timestamps = include;
        self
    }
}

/// Trait for turning summary reports into text.
///
/// Each section has its own method so that the printing operations can emit
/// one section at a time; [`format`](ReportFormatter::format) renders a full
/// [`SummaryReport`].
pub trait ReportFormatter {
    /// Formats every section present in the report, in summary order.
    fn format(&self, report: &SummaryReport) -> Result<String> {
        let mut output = String::new();
        if let Some(head) = &report.head {
            output.push_str(&self.format_head(head)?);
        }
        if let Some(info) = &report.info {
            output.push_str(&self.format_info(info)?);
        }
        if let Some(nulls) = &report.nulls {
            output.push_str(&self.format_nulls(nulls)?);
        }
        if let Some(description) = &report.description {
            output.push_str(&self.format_description(description)?);
        }
        if let Some(duplicates) = &report.duplicates {
            output.push_str(&self.format_duplicates(duplicates)?);
        }
        Ok(output)
    }

    fn format_head(&self, head: &RowTable) -> Result<String>;

    fn format_info(&self, info: &InfoReport) -> Result<String>;

    fn format_nulls(&self, nulls: &NullReport) -> Result<String>;

    fn format_description(&self, description: &TypeGroupedDescription) -> Result<String>;

    fn format_duplicates(&self, duplicates: &DuplicateReport) -> Result<String>;

    fn format_category_counts(&self, counts: &CategoryCounts) -> Result<String>;
}

/// Renders reports as terminal tables.
#[derive(Debug, Clone, Default)]
pub struct HumanFormatter {
    config: FormatterConfig,
}

impl HumanFormatter {
    /// Creates a new human formatter with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new human formatter with the specified configuration.
    pub fn with_config(config: FormatterConfig) -> Self {
        Self { config }
    }

    fn row_table(&self, rows: &RowTable) -> Result<String> {
        let mut headers = Vec::with_capacity(rows.columns.len() + 1);
        headers.push(rows.label_header.clone());
        headers.extend(rows.columns.iter().cloned());

        let body = rows
            .labels
            .iter()
            .zip(&rows.rows)
            .map(|(label, cells)| {
                let mut line = Vec::with_capacity(cells.len() + 1);
                line.push(label.clone());
                line.extend(cells.iter().map(|cell| {
                    cell.clone()
                        .unwrap_or_else(|| self.config.null_marker.clone())
                }));
                line
            })
            .collect::<Vec<_>>();
        render_table(&headers, &body)
    }

    fn describe_table(&self, table: &DescribeTable) -> Result<String> {
        let mut headers = vec![String::new()];
        headers.extend(table.columns.iter().map(|c| c.name.clone()));

        let body = table
            .statistics
            .iter()
            .enumerate()
            .map(|(row, statistic)| {
                let mut line = vec![statistic.clone()];
                line.extend(table.columns.iter().map(|column| {
                    column
                        .values
                        .get(row)
                        .map(|value| value.render(self.config.float_precision))
                        .unwrap_or_default()
                }));
                line
            })
            .collect::<Vec<_>>();
        render_table(&headers, &body)
    }
}

fn group_heading(kind: ColumnKind) -> &'static str {
    match kind {
        ColumnKind::Datetime => "Datetime columns:",
        ColumnKind::Numeric => "Numeric columns:",
        ColumnKind::Boolean => "Boolean columns:",
        ColumnKind::Other => "Other columns:",
    }
}

impl ReportFormatter for HumanFormatter {
    fn format(&self, report: &SummaryReport) -> Result<String> {
        let mut output = String::new();
        if let Some(head) = &report.head {
            output.push_str(&self.format_head(head)?);
        }
        if let Some(info) = &report.info {
            output.push_str(&self.format_info(info)?);
        }
        if let Some(nulls) = &report.nulls {
            output.push_str(&self.format_nulls(nulls)?);
            output.push_str("\n\n");
        }
        if let Some(description) = &report.description {
            output.push_str(&self.format_description(description)?);
        }
        if let Some(duplicates) = &report.duplicates {
            output.push_str(&self.format_duplicates(duplicates)?);
        }
        Ok(output)
    }

    fn format_head(&self, head: &RowTable) -> Result<String> {
        Ok(format!(
            "Head of the dataframe:\n\n{}\n\n\n",
            self.row_table(head)?
        ))
    }

    fn format_info(&self, info: &InfoReport) -> Result<String> {
        let mut output = String::new();
        writeln!(output, "tabscope.Dataset")?;
        match &info.index {
            IndexSummary::Range { entries: 0 } => {
                writeln!(output, "RangeIndex: 0 entries")?;
            }
            IndexSummary::Range { entries } => {
                writeln!(output, "RangeIndex: {entries} entries, 0 to {}", entries - 1)?;
            }
            IndexSummary::Labels {
                kind,
                entries,
                first,
                last,
                ..
            } => {
                let label = if *kind == ColumnKind::Datetime {
                    "DatetimeIndex"
                } else {
                    "Index"
                };
                match (first, last) {
                    (Some(first), Some(last)) => {
                        writeln!(output, "{label}: {entries} entries, {first} to {last}")?
                    }
                    _ => writeln!(output, "{label}: {entries} entries")?,
                }
            }
        }
        writeln!(output, "Data columns (total {} columns):", info.columns.len())?;

        let headers = ["#", "Column", "Non-Null Count", "Dtype"].map(String::from);
        let body = info
            .columns
            .iter()
            .map(|c| {
                vec![
                    c.position.to_string(),
                    c.name.clone(),
                    format!("{} non-null", c.non_null),
                    c.dtype.clone(),
                ]
            })
            .collect::<Vec<_>>();
        writeln!(output, "{}", render_table(&headers, &body)?)?;

        let dtypes = info
            .dtype_counts
            .iter()
            .map(|(dtype, count)| format!("{dtype}({count})"))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(output, "dtypes: {dtypes}")?;
        writeln!(output, "memory usage: {} bytes", info.memory_bytes)?;
        output.push_str("\n\n");
        Ok(output)
    }

    fn format_nulls(&self, nulls: &NullReport) -> Result<String> {
        if !nulls.has_nulls() {
            return Ok("No null in the dataframe.\n".to_string());
        }

        let counts = nulls
            .columns
            .iter()
            .map(|c| vec![c.column.clone(), c.count.to_string()])
            .collect::<Vec<_>>();
        let fractions = nulls
            .columns
            .iter()
            .map(|c| {
                vec![
                    c.column.clone(),
                    format!("{:.*}", self.config.float_precision, c.fraction),
                ]
            })
            .collect::<Vec<_>>();

        let mut output = String::new();
        writeln!(
            output,
            "Number of nulls in each column:\n{}\n",
            render_table(&["column", "nulls"].map(String::from), &counts)?
        )?;
        writeln!(
            output,
            "Percentage of nulls in each column:\n{}\n",
            render_table(&["column", "fraction"].map(String::from), &fractions)?
        )?;
        Ok(output)
    }

    fn format_description(&self, description: &TypeGroupedDescription) -> Result<String> {
        let mut output = String::new();
        if let Some(index) = &description.index {
            writeln!(output, "Datetime index:")?;
            writeln!(output, "{}\n\n", self.describe_table(index)?)?;
        }
        for table in &description.groups {
            writeln!(output, "{}", group_heading(table.kind))?;
            writeln!(output, "{}\n\n", self.describe_table(table)?)?;
        }
        Ok(output)
    }

    fn format_duplicates(&self, duplicates: &DuplicateReport) -> Result<String> {
        let mut output = format!("Number of duplicated rows: {}\n", duplicates.duplicate_rows);
        if let Some(rows) = &duplicates.rows {
            writeln!(output)?;
            writeln!(output, "{}", self.row_table(rows)?)?;
        }
        Ok(output)
    }

    fn format_category_counts(&self, counts: &CategoryCounts) -> Result<String> {
        let mut output = String::new();
        for column in &counts.columns {
            let body = column
                .counts
                .iter()
                .map(|(value, count)| vec![value.clone(), count.to_string()])
                .collect::<Vec<_>>();
            let headers = [column.column.clone(), "count".to_string()];
            writeln!(output, "{}\n\n", render_table(&headers, &body)?)?;
        }
        Ok(output)
    }
}

/// Formats reports as structured JSON.
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    config: FormatterConfig,
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter with default configuration.
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
            pretty: true,
        }
    }

    /// Creates a new JSON formatter with the specified configuration.
    pub fn with_config(config: FormatterConfig) -> Self {
        Self {
            config,
            pretty: true,
        }
    }

    /// Sets whether to use pretty-printed JSON.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn render<T: Serialize>(&self, value: &T) -> Result<String> {
        let mut value = serde_json::to_value(value)?;
        if self.config.include_timestamps {
            if let serde_json::Value::Object(map) = &mut value {
                map.insert(
                    "generated_at".to_string(),
                    serde_json::Value::String(chrono::Utc::now().to_rfc3339()),
                );
            }
        }
        let mut rendered = if self.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        rendered.push('\n');
        Ok(rendered)
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, report: &SummaryReport) -> Result<String> {
        self.render(report)
    }

    fn format_head(&self, head: &RowTable) -> Result<String> {
        self.render(head)
    }

    fn format_info(&self, info: &InfoReport) -> Result<String> {
        self.render(info)
    }

    fn format_nulls(&self, nulls: &NullReport) -> Result<String> {
        self.render(nulls)
    }

    fn format_description(&self, description: &TypeGroupedDescription) -> Result<String> {
        self.render(description)
    }

    fn format_duplicates(&self, duplicates: &DuplicateReport) -> Result<String> {
        self.render(duplicates)
    }

    fn format_category_counts(&self, counts: &CategoryCounts) -> Result<String> {
        self.render(counts)
    }
}

/// Renders string cells as a bordered table with Arrow's pretty printer.
fn render_table(headers: &[String], rows: &[Vec<String>]) -> Result<String> {
    let fields: Vec<Field> = headers
        .iter()
        .map(|name| Field::new(name.as_str(), DataType::Utf8, false))
        .collect();
    let columns: Vec<ArrayRef> = (0..headers.len())
        .map(|col| {
            Arc::new(StringArray::from_iter_values(
                rows.iter()
                    .map(|row| row.get(col).map(String::as_str).unwrap_or_default()),
            )) as ArrayRef
        })
        .collect();
    let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?;
    Ok(pretty_format_batches(&[batch])?.to_string())
}
