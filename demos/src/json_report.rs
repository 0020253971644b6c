//! Emitting summaries as JSON instead of terminal tables.
//!
//! Run with:
//! ```bash
//! cargo run --example json_report
//! ```

use tabscope::config::SummaryOptions;
use tabscope::formatters::{FormatterConfig, JsonFormatter, ReportFormatter};
use tabscope::logging::setup::{init_logging, LoggingConfig};
use tabscope::logging::LogConfig;
use tabscope::summarizer::{summary_report, TableSummarizer};
use tabscope::test_fixtures::people;
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(LoggingConfig::structured())?;

    let dataset = people();

    // Print through the summarizer with a JSON formatter.
    let formatter = JsonFormatter::with_config(FormatterConfig::default().with_timestamps(true));
    let mut summarizer = TableSummarizer::stdout()
        .with_formatter(formatter)
        .with_log_config(LogConfig::verbose());
    summarizer.summarize(&dataset, &SummaryOptions::statistics_only())?;

    // Or compute the report and use it directly.
    let report = summary_report(&dataset, &SummaryOptions::minimal())?;
    if let Some(nulls) = &report.nulls {
        info!(total = nulls.total(), "Missing values");
    }
    let compact = JsonFormatter::new().with_pretty(false).format(&report)?;
    println!("{compact}");

    Ok(())
}
