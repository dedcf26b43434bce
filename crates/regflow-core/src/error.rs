use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("missing column '{0}' in regulation table")]
    MissingColumn(String),

    #[error("invalid column configuration: {0}")]
    Config(#[from] serde_json::Error),
}
