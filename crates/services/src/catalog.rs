//! Question catalog loading.
//!
//! Catalogs are TOML documents with one `[[questions]]` table per question:
//!
//! ```toml
//! [[questions]]
//! id = 1
//! prompt = "Arrange the planets in order from closest to farthest from the Sun."
//! choices = ["Mars", "Earth", "Mercury", "Venus"]
//! correct_order = ["Mercury", "Venus", "Earth", "Mars"]
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use trivia_core::model::{Question, QuestionId};

use crate::error::CatalogError;

const SAMPLE_CATALOG: &str = include_str!("../data/sample_catalog.toml");

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    questions: Vec<QuestionRecord>,
}

#[derive(Debug, Deserialize)]
struct QuestionRecord {
    id: QuestionId,
    prompt: String,
    choices: Vec<String>,
    correct_order: Vec<String>,
}

/// Parses and validates a TOML catalog.
///
/// # Errors
///
/// Returns `CatalogError::Parse` for malformed TOML, `CatalogError::Question` for a question
/// that fails validation, and `CatalogError::DuplicateId` when two questions share an id.
pub fn parse_catalog(source: &str) -> Result<Vec<Question>, CatalogError> {
    let file: CatalogFile = toml::from_str(source)?;
    let mut seen = HashSet::with_capacity(file.questions.len());
    let mut questions = Vec::with_capacity(file.questions.len());

    for record in file.questions {
        if !seen.insert(record.id) {
            return Err(CatalogError::DuplicateId(record.id));
        }
        let question = Question::new(
            record.id,
            record.prompt,
            record.choices,
            record.correct_order,
        )
        .map_err(|source| CatalogError::Question {
            id: record.id,
            source,
        })?;
        questions.push(question);
    }

    Ok(questions)
}

/// Reads a catalog file from disk.
///
/// # Errors
///
/// Returns `CatalogError::Io` if the file cannot be read, otherwise see [`parse_catalog`].
pub fn load_catalog(path: &Path) -> Result<Vec<Question>, CatalogError> {
    let source = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let questions = parse_catalog(&source)?;
    tracing::info!(path = %path.display(), count = questions.len(), "loaded catalog");
    Ok(questions)
}

/// The three built-in ordering questions.
///
/// # Errors
///
/// Only fails if the bundled catalog is malformed.
pub fn sample_catalog() -> Result<Vec<Question>, CatalogError> {
    parse_catalog(SAMPLE_CATALOG)
}
