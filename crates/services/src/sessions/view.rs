use trivia_core::model::{FinalScore, QuestionId, ResultEntry, RoundPhase, RoundResult};

use super::progress::SessionProgress;
use super::service::GameSession;

/// Read-only view of the round in play.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSnapshot {
    pub question_id: QuestionId,
    pub prompt: String,
    pub choices: Vec<String>,
    pub selection: Vec<String>,
    pub selection_full: bool,
    pub phase: RoundPhase,
    pub remaining_secs: u32,
    pub result: Option<RoundResult>,
    pub elapsed_secs: Option<f64>,
    /// Present only after an incorrect submission.
    pub correct_order: Option<Vec<String>>,
}

/// Read-only view of the whole session, published after every change.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub progress: SessionProgress,
    pub phase: RoundPhase,
    pub score: u32,
    pub round: Option<RoundSnapshot>,
    pub results: Vec<ResultEntry>,
    pub final_score: Option<FinalScore>,
}

impl SessionSnapshot {
    #[must_use]
    pub fn capture(session: &GameSession) -> Self {
        let phase = session.phase();
        let round = session
            .current_round()
            .filter(|_| {
                matches!(
                    phase,
                    RoundPhase::Presenting | RoundPhase::AwaitingInput | RoundPhase::Submitted
                )
            })
            .map(|round| RoundSnapshot {
                question_id: round.question().id(),
                prompt: round.question().prompt().to_string(),
                choices: round.presented_choices().to_vec(),
                selection: round.selection().as_slice().to_vec(),
                selection_full: round.selection().is_full(),
                phase,
                remaining_secs: session.remaining_secs(),
                result: round.result(),
                elapsed_secs: round.elapsed_secs(),
                correct_order: round.revealed_order().map(<[String]>::to_vec),
            });

        Self {
            progress: session.progress(),
            phase,
            score: session.score(),
            round,
            results: session.results().to_vec(),
            final_score: session.final_score(),
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress.is_complete
    }
}
