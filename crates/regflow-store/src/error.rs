use std::path::PathBuf;

use regflow_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("table file not found: {0}")]
    NotFound(PathBuf),

    #[error("unsupported table format: {0} (expected .csv or .parquet)")]
    UnsupportedFormat(PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error(transparent)]
    Core(#[from] CoreError),
}
