//! Per-call options for the summary operations.
//!
//! Every option struct has a `Default` matching the documented defaults,
//! a few presets, and `with_*` builder methods. All of them deserialize with
//! missing fields filled from the defaults.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TabscopeError};

/// Options for the type-grouped descriptive statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DescribeOptions {
    /// Quantiles reported for numeric and datetime data, each in `[0, 1]`
    pub percentiles: Vec<f64>,
}

impl Default for DescribeOptions {
    fn default() -> Self {
        Self {
            percentiles: vec![0.25, 0.5, 0.75],
        }
    }
}

impl DescribeOptions {
    /// Sets the reported quantiles.
    pub fn with_percentiles(mut self, percentiles: impl Into<Vec<f64>>) -> Self {
        self.percentiles = percentiles.into();
        self
    }

    /// Checks that every percentile lies in `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        match self
            .percentiles
            .iter()
            .find(|p| !(0.0..=1.0).contains(*p))
        {
            Some(p) => Err(TabscopeError::invalid_config(format!(
                "percentiles must lie in [0, 1], got {p}"
            ))),
            None => Ok(()),
        }
    }

    /// Validated percentiles, ascending and without repeats.
    pub fn sorted_percentiles(&self) -> Result<Vec<f64>> {
        self.validate()?;
        let mut percentiles = self.percentiles.clone();
        percentiles.sort_by(f64::total_cmp);
        percentiles.dedup();
        Ok(percentiles)
    }
}

/// Options for the duplicate-row report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuplicateOptions {
    /// Print the rows taking part in duplicate groups
    pub show: bool,
    /// Order printed rows by their full value tuple instead of position
    pub sort: bool,
}

impl Default for DuplicateOptions {
    fn default() -> Self {
        Self {
            show: true,
            sort: false,
        }
    }
}

impl DuplicateOptions {
    /// Reports only the number of duplicated rows.
    pub fn count_only() -> Self {
        Self {
            show: false,
            sort: false,
        }
    }

    pub fn with_show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }

    pub fn with_sort(mut self, sort: bool) -> Self {
        self.sort = sort;
        self
    }
}

/// Options for per-column value counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryCountOptions {
    /// Skip columns with more distinct values than this (`None` for no limit)
    pub max_unique_values: Option<usize>,
    /// Also count numeric columns
    pub include_numeric: bool,
    /// Also count datetime columns
    pub include_datetime: bool,
    /// Stop after printing the first boolean column
    ///
    /// Matches the historical behaviour of this report. Set to `false` to
    /// process every column.
    pub stop_after_boolean: bool,
}

impl Default for CategoryCountOptions {
    fn default() -> Self {
        Self {
            max_unique_values: Some(20),
            include_numeric: false,
            include_datetime: false,
            stop_after_boolean: true,
        }
    }
}

impl CategoryCountOptions {
    /// Counts every column regardless of type or cardinality.
    pub fn all_columns() -> Self {
        Self {
            max_unique_values: None,
            include_numeric: true,
            include_datetime: true,
            stop_after_boolean: false,
        }
    }

    pub fn with_max_unique_values(mut self, max: Option<usize>) -> Self {
        self.max_unique_values = max;
        self
    }

    pub fn with_numeric(mut self, include: bool) -> Self {
        self.include_numeric = include;
        self
    }

    pub fn with_datetime(mut self, include: bool) -> Self {
        self.include_datetime = include;
        self
    }

    pub fn with_stop_after_boolean(mut self, stop: bool) -> Self {
        self.stop_after_boolean = stop;
        self
    }
}

/// Options for the full summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryOptions {
    /// Print the first rows
    pub show_head: bool,
    /// Print the info block and the null report
    pub show_info: bool,
    /// Print the type-grouped descriptive statistics
    pub show_describe: bool,
    /// Print the duplicate-row report
    pub show_duplicates: bool,
    /// Number of rows printed by the head step
    pub head_rows: usize,
    pub describe: DescribeOptions,
    pub duplicates: DuplicateOptions,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            show_head: true,
            show_info: true,
            show_describe: true,
            show_duplicates: true,
            head_rows: 5,
            describe: DescribeOptions::default(),
            duplicates: DuplicateOptions::default(),
        }
    }
}

impl SummaryOptions {
    /// Only the info block and null report.
    pub fn minimal() -> Self {
        Self {
            show_head: false,
            show_info: true,
            show_describe: false,
            show_duplicates: false,
            ..Self::default()
        }
    }

    /// Statistics without any row output.
    pub fn statistics_only() -> Self {
        Self {
            show_head: false,
            duplicates: DuplicateOptions::count_only(),
            ..Self::default()
        }
    }

    pub fn with_head(mut self, show: bool) -> Self {
        self.show_head = show;
        self
    }

    pub fn with_info(mut self, show: bool) -> Self {
        self.show_info = show;
        self
    }

    pub fn with_describe(mut self, show: bool) -> Self {
        self.show_describe = show;
        self
    }

    pub fn with_duplicates(mut self, show: bool) -> Self {
        self.show_duplicates = show;
        self
    }

    pub fn with_head_rows(mut self, rows: usize) -> Self {
        self.head_rows = rows;
        self
    }

    pub fn with_describe_options(mut self, options: DescribeOptions) -> Self {
        self.describe = options;
        self
    }

    pub fn with_duplicate_options(mut self, options: DuplicateOptions) -> Self {
        self.duplicates = options;
        self
    }

    /// Checks nested options.
    pub fn validate(&self) -> Result<()> {
        self.describe.validate()
    }
}
