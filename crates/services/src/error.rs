//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;
use trivia_core::model::{ChoiceError, EndpointError, QuestionError};

/// Why a question could not be loaded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FetchFailure {
    #[error("question request failed: {0}")]
    Transport(String),
    #[error("question request failed with status {0}")]
    HttpStatus(u16),
    #[error("question response could not be decoded: {0}")]
    Malformed(String),
    #[error("question provider reported response code {0}")]
    ResponseCode(i64),
    #[error("question provider returned no results")]
    Empty,
    #[error(transparent)]
    InvalidQuestion(#[from] QuestionError),
}

impl From<reqwest::Error> for FetchFailure {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Errors emitted by `SessionController` for caller mistakes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Choice(#[from] ChoiceError),
}

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error(transparent)]
    Endpoint(#[from] EndpointError),
    #[error("invalid timeout value: {raw}")]
    InvalidTimeout { raw: String },
    #[error("could not build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
