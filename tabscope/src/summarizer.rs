//! The printing entry points.
//!
//! [`TableSummarizer`] writes rendered reports to any [`Write`] sink (standard
//! output by default) and flushes after every operation, so its output
//! interleaves predictably with whatever else the caller prints. The free
//! functions at the bottom of this module are shorthands that print to
//! standard output.
//!
//! # Examples
//!
//! ```rust
//! use arrow::array::{BooleanArray, Int64Array};
//! use arrow::record_batch::RecordBatch;
//! use std::sync::Arc;
//! use tabscope::config::DuplicateOptions;
//! use tabscope::summarizer::TableSummarizer;
//!
//! let batch = RecordBatch::try_from_iter(vec![
//!     ("id", Arc::new(Int64Array::from(vec![1, 1, 2])) as _),
//!     ("flag", Arc::new(BooleanArray::from(vec![true, true, false])) as _),
//! ])?;
//!
//! let mut summarizer = TableSummarizer::new(Vec::new());
//! summarizer.find_duplicates(&batch.into(), &DuplicateOptions::default())?;
//! let output = String::from_utf8(summarizer.into_inner()).unwrap();
//! assert!(output.starts_with("Number of duplicated rows: 2"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::io::{self, Stdout, Write};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::analyzers::{
    describe_columns, duplicate_report, head_rows, info_report, null_report,
    value_counts_report, CategoryCounts, DuplicateReport, InfoReport, NullReport, RowTable,
    TypeGroupedDescription,
};
use crate::config::{CategoryCountOptions, DescribeOptions, DuplicateOptions, SummaryOptions};
use crate::dataset::Dataset;
use crate::error::{Result, TabscopeError};
use crate::formatters::{HumanFormatter, ReportFormatter};
use crate::logging::{truncate_field, LogConfig};

/// Every section of a full summary; disabled sections are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub head: Option<RowTable>,
    pub info: Option<InfoReport>,
    pub nulls: Option<NullReport>,
    pub description: Option<TypeGroupedDescription>,
    pub duplicates: Option<DuplicateReport>,
}

/// Computes the enabled sections of a summary without rendering them.
#[instrument(skip_all, fields(rows = dataset.num_rows(), columns = dataset.num_columns()))]
pub fn summary_report(dataset: &Dataset, options: &SummaryOptions) -> Result<SummaryReport> {
    options.validate()?;
    Ok(SummaryReport {
        head: options
            .show_head
            .then(|| head_rows(dataset, options.head_rows))
            .transpose()?,
        info: options.show_info.then(|| info_report(dataset)).transpose()?,
        nulls: options.show_info.then(|| null_report(dataset)).transpose()?,
        description: options
            .show_describe
            .then(|| describe_columns(dataset, &options.describe))
            .transpose()?,
        duplicates: options
            .show_duplicates
            .then(|| duplicate_report(dataset, &options.duplicates))
            .transpose()?,
    })
}

/// Prints summaries of datasets to a writer.
pub struct TableSummarizer<W: Write = Stdout> {
    writer: W,
    formatter: Box<dyn ReportFormatter + Send + Sync>,
    log_config: LogConfig,
}

impl TableSummarizer<Stdout> {
    /// A summarizer printing to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl Default for TableSummarizer<Stdout> {
    fn default() -> Self {
        Self::stdout()
    }
}

impl<W: Write> TableSummarizer<W> {
    /// A summarizer writing human-readable text to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            formatter: Box::new(HumanFormatter::new()),
            log_config: LogConfig::default(),
        }
    }

    /// Replaces the formatter used to render every section.
    pub fn with_formatter(mut self, formatter: impl ReportFormatter + Send + Sync + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    pub fn with_log_config(mut self, log_config: LogConfig) -> Self {
        self.log_config = log_config;
        self
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Computes a full summary without printing anything.
    pub fn report(&self, dataset: &Dataset, options: &SummaryOptions) -> Result<SummaryReport> {
        summary_report(dataset, options)
    }

    /// Prints head, info and nulls, type-grouped statistics and duplicates,
    /// each as enabled in `options`.
    ///
    /// Every section is computed before anything is written, so an error
    /// leaves the writer untouched.
    #[instrument(skip_all, fields(rows = dataset.num_rows(), columns = dataset.num_columns()))]
    pub fn summarize(&mut self, dataset: &Dataset, options: &SummaryOptions) -> Result<()> {
        let report = summary_report(dataset, options)?;
        let text = self.formatter.format(&report)?;
        self.emit("summary", &text)?;
        info!(
            head = options.show_head,
            info = options.show_info,
            describe = options.show_describe,
            duplicates = options.show_duplicates,
            "Summary printed"
        );
        Ok(())
    }

    /// Prints the first `n` rows.
    #[instrument(skip(self, dataset), fields(rows = dataset.num_rows()))]
    pub fn head(&mut self, dataset: &Dataset, n: usize) -> Result<()> {
        let text = self.formatter.format_head(&head_rows(dataset, n)?)?;
        self.emit("head", &text)
    }

    /// Prints the info block: index, per-column non-null counts, dtypes and memory.
    #[instrument(skip_all, fields(columns = dataset.num_columns()))]
    pub fn info(&mut self, dataset: &Dataset) -> Result<()> {
        let text = self.formatter.format_info(&info_report(dataset)?)?;
        self.emit("info", &text)
    }

    /// Prints missing-value counts and fractions per column, or a single
    /// line when there are none.
    #[instrument(skip_all, fields(columns = dataset.num_columns()))]
    pub fn show_nulls(&mut self, dataset: &Dataset) -> Result<()> {
        let text = self.formatter.format_nulls(&null_report(dataset)?)?;
        self.emit("nulls", &text)
    }

    /// Prints descriptive statistics per column kind, datetime index first.
    #[instrument(skip_all, fields(columns = dataset.num_columns()))]
    pub fn describe_by_type(&mut self, dataset: &Dataset, options: &DescribeOptions) -> Result<()> {
        let text = self
            .formatter
            .format_description(&describe_columns(dataset, options)?)?;
        self.emit("describe", &text)
    }

    /// Prints the number of fully duplicated rows and, optionally, the rows.
    #[instrument(skip_all, fields(rows = dataset.num_rows(), show = options.show, sort = options.sort))]
    pub fn find_duplicates(&mut self, dataset: &Dataset, options: &DuplicateOptions) -> Result<()> {
        let text = self
            .formatter
            .format_duplicates(&duplicate_report(dataset, options)?)?;
        self.emit("duplicates", &text)
    }

    /// Prints value counts for the columns selected by `options`.
    #[instrument(skip_all, fields(columns = dataset.num_columns()))]
    pub fn category_counts(
        &mut self,
        dataset: &Dataset,
        options: &CategoryCountOptions,
    ) -> Result<CategoryCounts> {
        let counts = value_counts_report(dataset, options)?;
        let text = self.formatter.format_category_counts(&counts)?;
        self.emit("category_counts", &text)?;
        Ok(counts)
    }

    fn emit(&mut self, section: &str, text: &str) -> Result<()> {
        self.writer.write_all(text.as_bytes())?;
        self.writer.flush()?;

        debug!(section, bytes = text.len(), "Section written");
        if self.log_config.logs_sections() {
            debug!(
                section,
                preview = %truncate_field(text, self.log_config.max_field_length),
                "Section preview"
            );
        }
        Ok(())
    }
}

/// Prints a full summary of `input` to standard output.
///
/// `input` is converted and validated before anything is printed; a value
/// that is not a dataset fails with [`TabscopeError::InvalidInput`].
///
/// # Examples
///
/// ```rust
/// use arrow::array::{ArrayRef, Int64Array};
/// use std::sync::Arc;
/// use tabscope::config::SummaryOptions;
/// use tabscope::error::TabscopeError;
///
/// let not_a_table: ArrayRef = Arc::new(Int64Array::from(vec![1, 2, 3]));
/// let err = tabscope::eda(not_a_table, &SummaryOptions::default()).unwrap_err();
/// assert!(matches!(err, TabscopeError::InvalidInput { .. }));
/// ```
pub fn eda<D>(input: D, options: &SummaryOptions) -> Result<()>
where
    D: TryInto<Dataset>,
    TabscopeError: From<D::Error>,
{
    let dataset: Dataset = input.try_into()?;
    TableSummarizer::stdout().summarize(&dataset, options)
}

/// Prints type-grouped descriptive statistics to standard output.
pub fn describe_by_type(dataset: &Dataset) -> Result<()> {
    TableSummarizer::stdout().describe_by_type(dataset, &DescribeOptions::default())
}

/// Prints the missing-value report to standard output.
pub fn show_nulls(dataset: &Dataset) -> Result<()> {
    TableSummarizer::stdout().show_nulls(dataset)
}

/// Prints the duplicate-row report to standard output.
pub fn find_duplicates(dataset: &Dataset, options: &DuplicateOptions) -> Result<()> {
    TableSummarizer::stdout().find_duplicates(dataset, options)
}

/// Prints value counts to standard output.
pub fn category_counts(dataset: &Dataset, options: &CategoryCountOptions) -> Result<()> {
    TableSummarizer::stdout()
        .category_counts(dataset, options)
        .map(|_| ())
}
