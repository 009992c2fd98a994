use chrono::{DateTime, Utc};
use std::fmt;

use trivia_core::countdown::{Countdown, TimerEvent};
use trivia_core::model::{Question, RoundPhase, RoundResult, Selection};

use crate::question_bank::{QuestionBank, Shuffler};

//
// ─── ROUND STATE ───────────────────────────────────────────────────────────────
//

/// State of the question currently in play.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundState {
    question: Question,
    presented: Vec<String>,
    selection: Selection,
    started_at: Option<DateTime<Utc>>,
    elapsed_secs: Option<f64>,
    result: Option<RoundResult>,
}

impl RoundState {
    fn new(question: Question, presented: Vec<String>) -> Self {
        let selection = Selection::with_capacity(question.choice_count());
        Self {
            question,
            presented,
            selection,
            started_at: None,
            elapsed_secs: None,
            result: None,
        }
    }

    #[must_use]
    pub fn question(&self) -> &Question {
        &self.question
    }

    /// Choice labels in the order shown to the player. Fixed for the whole round.
    #[must_use]
    pub fn presented_choices(&self) -> &[String] {
        &self.presented
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> Option<f64> {
        self.elapsed_secs
    }

    #[must_use]
    pub fn result(&self) -> Option<RoundResult> {
        self.result
    }

    /// The correct order, only once an incorrect answer has been submitted.
    #[must_use]
    pub fn revealed_order(&self) -> Option<&[String]> {
        match self.result {
            Some(RoundResult::Incorrect) => Some(self.question.correct_order()),
            _ => None,
        }
    }
}

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

/// Produced exactly once per round, when the answer is evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub result: RoundResult,
    pub elapsed_secs: f64,
    /// True when the countdown forced the submission.
    pub forced: bool,
}

/// What a countdown tick did to the round.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    Ticked { remaining: u32 },
    Expired(Submission),
}

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

/// Drives one question at a time through
/// `Idle → Presenting → AwaitingInput → Submitted → Completed`.
///
/// Intents that do not fit the current phase are ignored and reported through the
/// `bool`/`Option` return values. The countdown is cancelled on every way out of
/// `AwaitingInput`.
pub struct RoundController {
    phase: RoundPhase,
    round: Option<RoundState>,
    countdown: Countdown,
    round_secs: u32,
}

impl RoundController {
    #[must_use]
    pub fn new(round_secs: u32) -> Self {
        Self {
            phase: RoundPhase::Idle,
            round: None,
            countdown: Countdown::new(),
            round_secs,
        }
    }

    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    #[must_use]
    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    #[must_use]
    pub fn round_secs(&self) -> u32 {
        self.round_secs
    }

    /// Seconds left on the countdown display.
    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        match self.phase {
            RoundPhase::Presenting => self.round_secs,
            RoundPhase::AwaitingInput | RoundPhase::Submitted => self.countdown.remaining(),
            _ => 0,
        }
    }

    #[must_use]
    pub fn is_timer_running(&self) -> bool {
        self.countdown.is_running()
    }

    /// Puts `question` on screen with a freshly shuffled choice order.
    ///
    /// Only valid from `Idle` or `Completed`; returns `false` otherwise.
    pub fn present(&mut self, question: Question, shuffler: &mut dyn Shuffler) -> bool {
        if !self.phase.can_start() {
            return false;
        }
        self.countdown.cancel();
        let presented = QuestionBank::shuffled_choices(&question, shuffler);
        tracing::info!(question = %question.id(), "presenting question");
        self.round = Some(RoundState::new(question, presented));
        self.phase = RoundPhase::Presenting;
        true
    }

    /// Called once the intro cue has finished: starts the countdown and opens input.
    pub fn begin_input(&mut self, now: DateTime<Utc>) -> bool {
        if self.phase != RoundPhase::Presenting {
            return false;
        }
        let Some(round) = self.round.as_mut() else {
            return false;
        };
        round.started_at = Some(now);
        self.countdown.start(self.round_secs, now);
        self.phase = RoundPhase::AwaitingInput;
        true
    }

    /// Appends `label` to the selection if it is a choice of this question, not yet picked,
    /// and the selection is not full.
    pub fn toggle_choice(&mut self, label: &str) -> bool {
        if !self.phase.accepts_input() {
            return false;
        }
        let Some(round) = self.round.as_mut() else {
            return false;
        };
        if !round.question.has_choice(label) {
            return false;
        }
        round.selection.push(label)
    }

    pub fn reset_selection(&mut self) -> bool {
        if !self.phase.accepts_input() {
            return false;
        }
        let Some(round) = self.round.as_mut() else {
            return false;
        };
        if round.selection.is_empty() {
            return false;
        }
        round.selection.clear();
        true
    }

    /// Evaluates the current selection. Only the first submission of a round counts.
    pub fn submit(&mut self, now: DateTime<Utc>) -> Option<Submission> {
        self.settle(now, false)
    }

    /// Feeds one countdown tick. Expiry forces a submission with whatever is selected.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<TickOutcome> {
        if self.phase != RoundPhase::AwaitingInput {
            self.countdown.cancel();
            return None;
        }
        match self.countdown.tick()? {
            TimerEvent::Tick { remaining } => Some(TickOutcome::Ticked { remaining }),
            TimerEvent::Expired => self.settle(now, true).map(TickOutcome::Expired),
        }
    }

    /// `Submitted → Completed`.
    pub fn complete(&mut self) -> bool {
        self.countdown.cancel();
        if self.phase != RoundPhase::Submitted {
            return false;
        }
        self.phase = RoundPhase::Completed;
        true
    }

    /// Drops the active round without recording anything.
    pub fn abandon(&mut self) {
        self.countdown.cancel();
        if !self.phase.is_settled() {
            self.round = None;
        }
        self.phase = RoundPhase::Idle;
    }

    fn settle(&mut self, now: DateTime<Utc>, forced: bool) -> Option<Submission> {
        if self.phase != RoundPhase::AwaitingInput {
            return None;
        }
        self.countdown.cancel();
        let elapsed_secs = self.countdown.elapsed_secs(now);
        let round = self.round.as_mut()?;

        let result =
            RoundResult::from_correct(round.question.is_correct_order(round.selection.as_slice()));
        round.result = Some(result);
        round.elapsed_secs = Some(elapsed_secs);
        self.phase = RoundPhase::Submitted;

        tracing::info!(
            question = %round.question.id(),
            %result,
            elapsed_secs,
            forced,
            "round submitted"
        );

        Some(Submission {
            result,
            elapsed_secs,
            forced,
        })
    }
}

impl fmt::Debug for RoundController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoundController")
            .field("phase", &self.phase)
            .field("question", &self.round.as_ref().map(|r| r.question.id()))
            .field("remaining", &self.countdown.remaining())
            .field("timer_running", &self.countdown.is_running())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
