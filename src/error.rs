//! Error types for splconq

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// splconq errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("Feature model parse error: {0}")]
    DocumentParse(String),

    #[error("Malformed log: {0}")]
    MalformedLog(String),

    #[error("Model parse error: {0}")]
    ModelParse(String),

    #[error("Constraint references unknown option: {0}")]
    UnknownOption(String),

    #[error("No model fitted yet")]
    NotFitted,

    #[error("Configuration is missing option: {0}")]
    MissingOption(String),

    #[error("{0}")]
    Other(String),
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}
