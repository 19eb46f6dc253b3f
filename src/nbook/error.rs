use crate::dialog::ValidationIssue;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NbookError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unable to decode notebook: {0}")]
    Encoding(#[from] bincode::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{}", crate::dialog::validation_message(.0))]
    Validation(Vec<ValidationIssue>),

    #[error("No open notebooks")]
    NoNotebook,

    #[error("Config error: {0}")]
    Config(String),

    #[error("{0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, NbookError>;
