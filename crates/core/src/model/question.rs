use std::collections::HashSet;

use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("question must offer at least one choice")]
    NoChoices,

    #[error("choice labels cannot be empty")]
    EmptyChoice,

    #[error("duplicate choice label: {0}")]
    DuplicateChoice(String),

    #[error("correct order must be a permutation of the choices")]
    OrderMismatch,
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// An ordering question: the player must arrange `choices` into `correct_order`.
///
/// Immutable once built; `correct_order` is always a permutation of `choices`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    choices: Vec<String>,
    correct_order: Vec<String>,
}

impl Question {
    /// Creates a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyPrompt` for a blank prompt, `NoChoices` or `EmptyChoice`
    /// for missing labels, `DuplicateChoice` when a label repeats, and `OrderMismatch` when
    /// `correct_order` is not a permutation of `choices`.
    pub fn new<C, O>(
        id: QuestionId,
        prompt: impl Into<String>,
        choices: C,
        correct_order: O,
    ) -> Result<Self, QuestionError>
    where
        C: IntoIterator,
        C::Item: Into<String>,
        O: IntoIterator,
        O::Item: Into<String>,
    {
        let prompt = prompt.into().trim().to_string();
        if prompt.is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }

        let choices: Vec<String> = choices.into_iter().map(Into::into).collect();
        let correct_order: Vec<String> = correct_order.into_iter().map(Into::into).collect();
        if choices.is_empty() {
            return Err(QuestionError::NoChoices);
        }

        let mut seen = HashSet::with_capacity(choices.len());
        for choice in &choices {
            if choice.trim().is_empty() {
                return Err(QuestionError::EmptyChoice);
            }
            if !seen.insert(choice.as_str()) {
                return Err(QuestionError::DuplicateChoice(choice.clone()));
            }
        }

        let mut expected = choices.clone();
        let mut actual = correct_order.clone();
        expected.sort_unstable();
        actual.sort_unstable();
        if expected != actual {
            return Err(QuestionError::OrderMismatch);
        }

        Ok(Self {
            id,
            prompt,
            choices,
            correct_order,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Choice labels in catalog order.
    #[must_use]
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    #[must_use]
    pub fn correct_order(&self) -> &[String] {
        &self.correct_order
    }

    #[must_use]
    pub fn choice_count(&self) -> usize {
        self.choices.len()
    }

    #[must_use]
    pub fn has_choice(&self, label: &str) -> bool {
        self.choices.iter().any(|c| c == label)
    }

    /// Exact element-wise match against the correct order.
    ///
    /// A shorter (or longer) sequence never matches, even when it is a prefix.
    #[must_use]
    pub fn is_correct_order<S: AsRef<str>>(&self, order: &[S]) -> bool {
        order.len() == self.correct_order.len()
            && order
                .iter()
                .zip(&self.correct_order)
                .all(|(picked, expected)| picked.as_ref() == expected)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
