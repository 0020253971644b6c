//! Full summary of a small in-memory table.
//!
//! Prints the head, the info block, missing values, statistics per column
//! kind and duplicated rows, then the same summary for a table with a
//! datetime index.
//!
//! Run with:
//! ```bash
//! cargo run --example basic_eda
//! ```

use tabscope::config::{DuplicateOptions, SummaryOptions};
use tabscope::logging::setup::{init_logging, LoggingConfig};
use tabscope::test_fixtures::{people, sensor_readings};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(LoggingConfig::default().with_env_filter("warn"))?;

    println!("=== People ===\n");
    tabscope::eda(people(), &SummaryOptions::default())?;

    println!("\n=== Sensor readings (datetime index) ===\n");
    let options = SummaryOptions::default()
        .with_head_rows(3)
        .with_duplicate_options(DuplicateOptions::default().with_sort(true));
    tabscope::eda(sensor_readings(14), &options)?;

    Ok(())
}
