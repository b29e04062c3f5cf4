use thiserror::Error;

use crate::api::SourceError;

#[derive(Error, Debug)]
pub enum KwError {
    #[error("Input Shape Error: {0}")]
    InputShape(String),

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid Query: {0}")]
    InvalidQuery(String),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Search Source Error: {0}")]
    Source(#[from] SourceError),

    #[error("Dataset is empty, nothing to export")]
    EmptyDataset,
}

pub type KwResult<T> = Result<T, KwError>;
