//! Summarizing a CSV file read through DataFusion.
//!
//! Run with:
//! ```bash
//! cargo run --example csv_summary
//! ```

use std::io::Write;

use datafusion::prelude::*;
use tabscope::config::{DescribeOptions, SummaryOptions};
use tabscope::dataset::Dataset;
use tabscope::summarizer::TableSummarizer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let csv_data = r#"order_id,region,amount,express,shipped_on
1,north,120.50,true,2024-03-01
2,south,80.00,false,2024-03-02
3,north,,false,2024-03-02
4,east,42.25,true,
2,south,80.00,false,2024-03-02
5,west,310.00,false,2024-03-05"#;

    let mut file = tempfile::Builder::new().suffix(".csv").tempfile()?;
    file.write_all(csv_data.as_bytes())?;
    file.flush()?;

    let ctx = SessionContext::new();
    ctx.register_csv(
        "orders",
        file.path().to_str().ok_or("temporary path is not UTF-8")?,
        CsvReadOptions::default(),
    )
    .await?;

    let dataset = Dataset::from_table(&ctx, "orders").await?;
    let options = SummaryOptions::default().with_describe_options(
        DescribeOptions::default().with_percentiles(vec![0.1, 0.5, 0.9]),
    );
    TableSummarizer::stdout().summarize(&dataset, &options)?;

    // Any SQL result can be summarized too.
    let df = ctx
        .sql("SELECT region, SUM(amount) AS total FROM orders GROUP BY region ORDER BY region")
        .await?;
    let totals = Dataset::from_dataframe(df).await?;
    println!("Totals per region:\n");
    TableSummarizer::stdout().head(&totals, 10)?;

    Ok(())
}
