use serde::Serialize;
use std::fmt;

//
// ─── ROUND RESULT ─────────────────────────────────────────────────────────────
//

/// Outcome tag of one submitted round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundResult {
    Correct,
    Incorrect,
}

impl RoundResult {
    #[must_use]
    pub fn from_correct(is_correct: bool) -> Self {
        if is_correct {
            Self::Correct
        } else {
            Self::Incorrect
        }
    }

    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, Self::Correct)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::Incorrect => "incorrect",
        }
    }
}

impl fmt::Display for RoundResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

//
// ─── RESULT ENTRY ─────────────────────────────────────────────────────────────
//

/// Immutable record of one completed round.
///
/// `elapsed_secs` is kept at millisecond precision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultEntry {
    prompt: String,
    result: RoundResult,
    elapsed_secs: f64,
}

impl ResultEntry {
    #[must_use]
    pub fn new(prompt: impl Into<String>, result: RoundResult, elapsed_secs: f64) -> Self {
        let elapsed_secs = if elapsed_secs.is_finite() {
            (elapsed_secs.max(0.0) * 1_000.0).round() / 1_000.0
        } else {
            0.0
        };
        Self {
            prompt: prompt.into(),
            result,
            elapsed_secs,
        }
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn result(&self) -> RoundResult {
        self.result
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    /// Elapsed time formatted with three decimals, e.g. `"3.142"`.
    #[must_use]
    pub fn elapsed_label(&self) -> String {
        format!("{:.3}", self.elapsed_secs)
    }
}

//
// ─── FINAL SCORE ──────────────────────────────────────────────────────────────
//

/// Score out of total, reported once a session runs out of questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FinalScore {
    pub score: u32,
    pub total: u32,
}

impl fmt::Display for FinalScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.score, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_rounds_to_milliseconds() {
        let entry = ResultEntry::new("Q", RoundResult::Correct, 3.141_592);
        assert_eq!(entry.elapsed_secs(), 3.142);
        assert_eq!(entry.elapsed_label(), "3.142");
        assert!(entry.result().is_correct());
    }

    #[test]
    fn entry_sanitizes_bad_durations() {
        assert_eq!(ResultEntry::new("Q", RoundResult::Incorrect, -1.0).elapsed_secs(), 0.0);
        assert_eq!(
            ResultEntry::new("Q", RoundResult::Incorrect, f64::NAN).elapsed_secs(),
            0.0
        );
    }

    #[test]
    fn final_score_displays_as_fraction() {
        let score = FinalScore { score: 1, total: 2 };
        assert_eq!(score.to_string(), "1/2");
        assert_eq!(FinalScore { score: 0, total: 0 }.to_string(), "0/0");
    }

    #[test]
    fn result_tag_maps_from_bool() {
        assert_eq!(RoundResult::from_correct(true), RoundResult::Correct);
        assert_eq!(RoundResult::from_correct(false).to_string(), "incorrect");
    }
}
