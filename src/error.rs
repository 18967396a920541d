use thiserror::Error;

use crate::assist::Operation;

/// Library result type alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The operation works on selected code and nothing is selected.
    #[error("select some code before running {0}")]
    SelectionRequired(Operation),

    #[error("{0} is a directory, not a file")]
    NotAFile(String),

    #[error("this action needs an administrator session")]
    AdminRequired,

    #[error("{0} must not be empty")]
    MissingField(&'static str),

    /// Storage provider or remote backend failure on an explicit user action.
    #[error(transparent)]
    Backend(#[from] anyhow::Error),

    #[error("session file error: {0}")]
    SessionIo(#[from] std::io::Error),

    #[error("malformed session data: {0}")]
    SessionFormat(#[from] serde_json::Error),
}
