//! Prelude for commonly used types and traits in tabscope.

pub use crate::classify::ColumnKind;
pub use crate::config::{CategoryCountOptions, DescribeOptions, DuplicateOptions, SummaryOptions};
pub use crate::dataset::{Dataset, RowIndex};
pub use crate::error::{ErrorContext, Result, TabscopeError};
pub use crate::formatters::{FormatterConfig, HumanFormatter, JsonFormatter, ReportFormatter};
pub use crate::logging::LogConfig;
pub use crate::summarizer::{SummaryReport, TableSummarizer};
