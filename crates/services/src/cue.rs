//! Intro cue played while a question is presented.

use std::time::Duration;

use async_trait::async_trait;
use trivia_core::model::GameSettings;

/// Presentation cue awaited before a round starts accepting input.
///
/// The round controller waits for `play` to resolve; the cue is not cancelled mid-play.
#[async_trait]
pub trait IntroCue: Send + Sync {
    async fn play(&self);
}

/// Rising tones (440 Hz, 540 Hz, ...) separated by a fixed gap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToneCue {
    tones: u32,
    gap: Duration,
}

impl ToneCue {
    const BASE_HZ: u32 = 440;
    const STEP_HZ: u32 = 100;

    #[must_use]
    pub fn new(tones: u32, gap: Duration) -> Self {
        Self { tones, gap }
    }

    #[must_use]
    pub fn from_settings(settings: &GameSettings) -> Self {
        Self::new(
            settings.cue_tones(),
            Duration::from_millis(settings.cue_tone_ms()),
        )
    }

    /// Frequencies in play order.
    #[must_use]
    pub fn frequencies(&self) -> Vec<u32> {
        (0..self.tones)
            .map(|i| Self::BASE_HZ + i * Self::STEP_HZ)
            .collect()
    }

    /// Total time the cue takes.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.gap * self.tones
    }
}

#[async_trait]
impl IntroCue for ToneCue {
    async fn play(&self) {
        for hz in self.frequencies() {
            tracing::debug!(hz, "intro tone");
            tokio::time::sleep(self.gap).await;
        }
    }
}

/// Resolves immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentCue;

#[async_trait]
impl IntroCue for SilentCue {
    async fn play(&self) {}
}
