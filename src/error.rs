use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WordedError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to read dataset '{path}': {source}")]
    DatasetRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dataset '{0}' has no usable words")]
    EmptyDataset(String),

    #[error("unknown builtin word list '{0}'")]
    UnknownWordList(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, WordedError>;
