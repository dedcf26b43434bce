//! Storage layer: regulation tables from CSV or Parquet files as Arrow batches.

mod error;
mod table;

pub use error::StoreError;
pub use table::{column_names, load_regulations, load_table, read_csv, read_parquet};
