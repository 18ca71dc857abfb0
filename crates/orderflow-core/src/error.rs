// crates/orderflow-core/src/error.rs

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Source unreadable: {path}: {reason}")]
    SourceUnreadable { path: PathBuf, reason: String },

    #[error("Source {path} is missing required column '{column}'")]
    MissingColumn { path: PathBuf, column: String },

    #[error(
        "Schema mismatch between regions: missing from region A {missing_in_a:?}, missing from region B {missing_in_b:?}"
    )]
    SchemaMismatch {
        missing_in_a: Vec<String>,
        missing_in_b: Vec<String>,
    },

    #[error("Destination write failed: {0}")]
    DestinationWriteFailure(#[source] sqlx::Error),

    #[error("Validation query failed: {0}")]
    QueryExecutionFailure(#[source] sqlx::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
