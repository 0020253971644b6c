//! Error types for the tabscope summary library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! `thiserror`-derived [`TabscopeError`].

use std::convert::Infallible;

use thiserror::Error;

/// The main error type for tabscope.
#[derive(Error, Debug)]
pub enum TabscopeError {
    /// The supplied value cannot be summarized as a dataset.
    #[error("A tabular dataset is required; got {found} instead")]
    InvalidInput {
        /// Description of what was supplied instead
        found: String,
    },

    /// An option value is out of range or inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Error when a required column is not found in the dataset.
    #[error("Column '{column}' not found in dataset")]
    ColumnNotFound { column: String },

    /// Error from Arrow operations.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Error from DataFusion operations.
    #[error("DataFusion error: {0}")]
    DataFusion(#[from] datafusion::error::DataFusionError),

    /// Error writing to the output stream.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from serialization operations.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic internal error for unexpected conditions.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A type alias for `Result<T, TabscopeError>`.
pub type Result<T> = std::result::Result<T, TabscopeError>;

impl TabscopeError {
    /// Creates an invalid input error describing what was supplied.
    pub fn invalid_input(found: impl Into<String>) -> Self {
        Self::InvalidInput {
            found: found.into(),
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Creates a column not found error.
    pub fn column_not_found(column: impl Into<String>) -> Self {
        Self::ColumnNotFound {
            column: column.into(),
        }
    }
}

impl From<serde_json::Error> for TabscopeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<std::fmt::Error> for TabscopeError {
    fn from(err: std::fmt::Error) -> Self {
        Self::Internal(format!("Failed to format report: {err}"))
    }
}

// Lets `Dataset` itself satisfy `TryInto<Dataset>` bounds.
impl From<Infallible> for TabscopeError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

/// Extension trait for adding context to errors.
pub trait ErrorContext<T> {
    /// Adds context to an error.
    fn context(self, msg: &str) -> Result<T>;

    /// Adds context with a lazy message.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<TabscopeError>,
{
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| match e.into() {
            TabscopeError::Internal(inner) => TabscopeError::Internal(format!("{msg}: {inner}")),
            other => TabscopeError::Internal(format!("{msg}: {other}")),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let msg = f();
            match e.into() {
                TabscopeError::Internal(inner) => {
                    TabscopeError::Internal(format!("{msg}: {inner}"))
                }
                other => TabscopeError::Internal(format!("{msg}: {other}")),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_names_offending_type() {
        let err = TabscopeError::invalid_input("Int64 array");
        assert_eq!(
            err.to_string(),
            "A tabular dataset is required; got Int64 array instead"
        );
    }

    #[test]
    fn test_column_not_found() {
        let err = TabscopeError::column_not_found("user_id");
        assert_eq!(err.to_string(), "Column 'user_id' not found in dataset");
    }

    #[test]
    fn test_arrow_error_conversion() {
        let arrow_err = arrow::error::ArrowError::ComputeError("boom".to_string());
        let err: TabscopeError = arrow_err.into();
        assert!(matches!(err, TabscopeError::Arrow(_)));
    }

    #[test]
    fn test_error_context() {
        fn failing_operation() -> Result<()> {
            Err(TabscopeError::Internal("Something went wrong".to_string()))
        }

        let err = failing_operation()
            .context("While describing columns")
            .unwrap_err();
        assert!(err.to_string().contains("While describing columns"));
        assert!(err.to_string().contains("Something went wrong"));
    }

    #[test]
    fn test_io_error_with_lazy_context() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "pipe closed",
        ));
        let err = result
            .with_context(|| "Writing null report".to_string())
            .unwrap_err();
        assert!(err.to_string().contains("Writing null report"));
    }
}
