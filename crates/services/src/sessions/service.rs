use chrono::{DateTime, Utc};
use std::fmt;

use trivia_core::countdown::TimerEvent;
use trivia_core::model::{FinalScore, GameSettings, Question, ResultEntry, RoundPhase};

use super::progress::SessionProgress;
use super::view::SessionSnapshot;
use crate::question_bank::{QuestionBank, Shuffler};
use crate::round_controller::{RoundController, RoundState, Submission, TickOutcome};
use crate::scorer::Scorer;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One play-through of a shuffled catalog.
///
/// Owns the question order, the round controller and the scorer. All methods are
/// synchronous; `now` comes from the caller's clock so tests stay deterministic.
pub struct GameSession {
    questions: Vec<Question>,
    current: usize,
    controller: RoundController,
    scorer: Scorer,
    shuffler: Box<dyn Shuffler>,
    complete: bool,
}

impl GameSession {
    /// Shuffles the catalog and opens the first question.
    ///
    /// An empty catalog yields a session that is already complete with a 0/0 score.
    #[must_use]
    pub fn start(
        bank: &QuestionBank,
        settings: &GameSettings,
        mut shuffler: Box<dyn Shuffler>,
    ) -> Self {
        let questions = bank.shuffled_questions(&mut *shuffler);
        let complete = questions.is_empty();
        tracing::info!(questions = questions.len(), "session started");
        if complete {
            tracing::info!("empty catalog; session complete");
        }

        Self {
            questions,
            current: 0,
            controller: RoundController::new(settings.round_secs()),
            scorer: Scorer::new(),
            shuffler,
            complete,
        }
    }

    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        self.controller.phase()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// The question in play, or the one the next `start_round` will present.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.complete {
            return None;
        }
        self.questions.get(self.current)
    }

    #[must_use]
    pub fn current_round(&self) -> Option<&RoundState> {
        self.controller.round()
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.controller.remaining_secs()
    }

    #[must_use]
    pub fn is_timer_running(&self) -> bool {
        self.controller.is_timer_running()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.scorer.score()
    }

    #[must_use]
    pub fn results(&self) -> &[ResultEntry] {
        self.scorer.log()
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.questions.len();
        let answered = self.scorer.rounds_recorded();
        SessionProgress {
            question_number: if total == 0 {
                0
            } else {
                (self.current + 1).min(total)
            },
            total,
            answered,
            remaining: total.saturating_sub(answered),
            is_complete: self.complete,
        }
    }

    /// Score out of total once every question has been played.
    #[must_use]
    pub fn final_score(&self) -> Option<FinalScore> {
        if !self.complete {
            return None;
        }
        Some(FinalScore {
            score: self.scorer.score(),
            total: u32::try_from(self.questions.len()).unwrap_or(u32::MAX),
        })
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(self)
    }

    /// Presents the current question with shuffled choices.
    pub fn start_round(&mut self) -> bool {
        if self.complete {
            return false;
        }
        let Some(question) = self.questions.get(self.current).cloned() else {
            return false;
        };
        self.controller.present(question, &mut *self.shuffler)
    }

    /// The intro cue finished; the countdown starts now.
    pub fn finish_cue(&mut self, now: DateTime<Utc>) -> bool {
        self.controller.begin_input(now)
    }

    pub fn toggle_choice(&mut self, label: &str) -> bool {
        let changed = self.controller.toggle_choice(label);
        tracing::debug!(label, changed, "toggle choice");
        changed
    }

    pub fn reset_selection(&mut self) -> bool {
        self.controller.reset_selection()
    }

    /// Submits the current selection; returns the recorded entry on the first call only.
    pub fn submit(&mut self, now: DateTime<Utc>) -> Option<&ResultEntry> {
        let submission = self.controller.submit(now)?;
        Some(self.record(&submission))
    }

    /// Feeds one countdown tick; expiry records a forced submission.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<TimerEvent> {
        match self.controller.tick(now)? {
            TickOutcome::Ticked { remaining } => {
                tracing::debug!(remaining, "tick");
                Some(TimerEvent::Tick { remaining })
            }
            TickOutcome::Expired(submission) => {
                self.record(&submission);
                Some(TimerEvent::Expired)
            }
        }
    }

    /// Moves past a submitted round: opens the next question or finalizes the session.
    ///
    /// No-op unless the round in play has been submitted.
    pub fn next_question(&mut self) -> bool {
        if self.complete || self.controller.phase() != RoundPhase::Submitted {
            return false;
        }
        self.controller.complete();

        if self.current + 1 < self.questions.len() {
            self.current += 1;
        } else {
            self.complete = true;
            if let Some(score) = self.final_score() {
                tracing::info!(%score, "session complete");
            }
        }
        true
    }

    /// Tears down the round in play without recording it.
    pub fn abandon(&mut self) {
        self.controller.abandon();
    }

    fn record(&mut self, submission: &Submission) -> &ResultEntry {
        let question = &self.questions[self.current];
        self.scorer.record_result(
            question,
            submission.result.is_correct(),
            submission.elapsed_secs,
        )
    }
}

impl fmt::Debug for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("controller", &self.controller)
            .field("score", &self.scorer.score())
            .field("complete", &self.complete)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
