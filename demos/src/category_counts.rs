//! Value counts for categorical columns.
//!
//! Shows the default selection rules, the stop at the first boolean column
//! and how to count every column instead.
//!
//! Run with:
//! ```bash
//! cargo run --example category_counts
//! ```

use tabscope::config::CategoryCountOptions;
use tabscope::summarizer::TableSummarizer;
use tabscope::test_fixtures::people;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dataset = people();
    let mut summarizer = TableSummarizer::stdout();

    println!("Default options (numeric and datetime columns skipped):\n");
    let counts = summarizer.category_counts(&dataset, &CategoryCountOptions::default())?;
    if let Some(column) = &counts.stopped_at {
        println!("Counting stopped at boolean column '{column}'.");
    }
    for skipped in &counts.skipped {
        println!("Skipped '{}': {:?}", skipped.name, skipped.reason);
    }

    println!("\nEvery column:\n");
    summarizer.category_counts(&dataset, &CategoryCountOptions::all_columns())?;

    Ok(())
}
