//! Terminal pipeline conditions.
//!
//! Every variant halts the current run before anything is rendered. Per-cell
//! coercion failures are not errors; they surface as diagnostics instead.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("No data source available: the default file is unreadable and no upload was supplied")]
    NoDataSource,

    #[error("Required key column '{column}' not found in table headers")]
    MissingKeyColumn { column: String },

    #[error("Table contains none of the 16 recognized type columns")]
    NoRecognizedCategories,

    #[error("Column(s) without a single numeric value: {}", columns.join(", "))]
    UnusableColumn { columns: Vec<String> },
}
