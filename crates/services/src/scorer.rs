use trivia_core::model::{Question, ResultEntry, RoundResult};

/// Running score and ordered per-round log.
///
/// One call to [`Scorer::record_result`] per submitted round; the round controller's
/// submission guard is what keeps it to one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scorer {
    score: u32,
    log: Vec<ResultEntry>,
}

impl Scorer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a result entry and bumps the score when `is_correct`.
    pub fn record_result(
        &mut self,
        question: &Question,
        is_correct: bool,
        elapsed_secs: f64,
    ) -> &ResultEntry {
        if is_correct {
            self.score = self.score.saturating_add(1);
        }
        self.log.push(ResultEntry::new(
            question.prompt(),
            RoundResult::from_correct(is_correct),
            elapsed_secs,
        ));
        &self.log[self.log.len() - 1]
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn log(&self) -> &[ResultEntry] {
        &self.log
    }

    #[must_use]
    pub fn rounds_recorded(&self) -> usize {
        self.log.len()
    }
}
