/// Lifecycle phase of the round currently in play.
///
/// `Idle → Presenting → AwaitingInput → Submitted → Completed`, then back to `Presenting`
/// for the next question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundPhase {
    /// No question active.
    #[default]
    Idle,
    /// The question is shown and the intro cue is playing; input is ignored.
    Presenting,
    /// The countdown runs and the player builds a selection.
    AwaitingInput,
    /// The answer has been evaluated and recorded.
    Submitted,
    /// The player moved on from the submitted round.
    Completed,
}

impl RoundPhase {
    #[must_use]
    pub fn accepts_input(self) -> bool {
        matches!(self, Self::AwaitingInput)
    }

    /// True once the round's result is fixed.
    #[must_use]
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Submitted | Self::Completed)
    }

    /// A new round may begin from these phases.
    #[must_use]
    pub fn can_start(self) -> bool {
        matches!(self, Self::Idle | Self::Completed)
    }
}
