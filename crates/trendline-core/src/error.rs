// File: crates/trendline-core/src/error.rs
// Summary: Error taxonomy for loading, building and presenting charts.

use chrono::NaiveDate;
use thiserror::Error;

pub type Result<T, E = ChartError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ChartError {
    /// The CSV resource could not be opened, read or tokenised.
    #[error("failed to load '{resource}': {source}")]
    ResourceLoad {
        resource: String,
        #[source]
        source: csv::Error,
    },

    #[error("'{resource}' has no leading 'date' column")]
    MissingDateColumn { resource: String },

    /// `row` is 1-based and counts data rows only (the header is not a row).
    #[error("row {row}: '{value}' is not a YYYY-MM-DD date")]
    InvalidDate { row: usize, value: String },

    #[error("row {row}, column '{column}': '{value}' is not a number")]
    InvalidCell { row: usize, column: String, value: String },

    #[error("no rows dated after {start}")]
    EmptyRange { start: NaiveDate },

    #[error("expected {expected} values, got {got}")]
    ValueCount { expected: usize, got: usize },

    #[error("column '{column}': {value} is not a finite count")]
    NonFiniteValue { column: String, value: f64 },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[cfg(feature = "png")]
    #[error("raster backend: {0}")]
    Raster(String),
}

impl From<toml::de::Error> for ChartError {
    fn from(e: toml::de::Error) -> Self {
        ChartError::Config(e.to_string())
    }
}
