//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use trivia_core::model::{QuestionError, QuestionId};

/// Errors emitted while loading a question catalog.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("question {id}: {source}")]
    Question {
        id: QuestionId,
        #[source]
        source: QuestionError,
    },
    #[error("duplicate question id: {0}")]
    DuplicateId(QuestionId),
}
