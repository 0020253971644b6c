//! Loading datasets from DataFusion.
//!
//! Summaries run on a single in-memory [`RecordBatch`](arrow::record_batch::RecordBatch).
//! These adapters execute a DataFusion plan to completion and concatenate its
//! output, so anything DataFusion can read (CSV, Parquet, JSON, registered
//! in-memory tables, SQL queries) can be summarized.

use arrow::compute::concat_batches;
use datafusion::prelude::{DataFrame, SessionContext};
use tracing::{debug, instrument};

use crate::dataset::Dataset;
use crate::error::{ErrorContext, Result};

impl Dataset {
    /// Collects a DataFrame into a dataset.
    ///
    /// An empty result yields a dataset with the DataFrame's schema and no rows.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use datafusion::prelude::*;
    /// use tabscope::dataset::Dataset;
    ///
    /// # async fn example() -> tabscope::error::Result<()> {
    /// let ctx = SessionContext::new();
    /// let df = ctx.sql("SELECT 1 AS id, 'a' AS label").await?;
    /// let dataset = Dataset::from_dataframe(df).await?;
    /// assert_eq!(dataset.num_rows(), 1);
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip_all)]
    pub async fn from_dataframe(df: DataFrame) -> Result<Self> {
        let schema = df.schema().inner().clone();
        let batches = df.collect().await?;
        debug!(batches = batches.len(), "Collected DataFrame");
        let batch = concat_batches(&schema, &batches)?;
        Ok(Self::new(batch))
    }

    /// Collects a table registered with `ctx`.
    #[instrument(skip(ctx))]
    pub async fn from_table(ctx: &SessionContext, name: &str) -> Result<Self> {
        let df = ctx
            .table(name)
            .await
            .with_context(|| format!("Failed to resolve table '{name}'"))?;
        Self::from_dataframe(df).await
    }
}
