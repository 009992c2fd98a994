use thiserror::Error;

use crate::countdown::DEFAULT_ROUND_SECS;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("round length must be between 1 and 600 seconds")]
    InvalidRoundSecs,

    #[error("intro cue must have at most 10 tones")]
    InvalidCueTones,

    #[error("intro cue tone length must be at most 5000 ms")]
    InvalidCueToneMs,
}

/// Tunable knobs for a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSettings {
    round_secs: u32,
    cue_tones: u32,
    cue_tone_ms: u64,
}

impl GameSettings {
    /// Creates custom settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if any value is out of range.
    pub fn new(round_secs: u32, cue_tones: u32, cue_tone_ms: u64) -> Result<Self, SettingsError> {
        if !(1..=600).contains(&round_secs) {
            return Err(SettingsError::InvalidRoundSecs);
        }
        if cue_tones > 10 {
            return Err(SettingsError::InvalidCueTones);
        }
        if cue_tone_ms > 5_000 {
            return Err(SettingsError::InvalidCueToneMs);
        }
        Ok(Self {
            round_secs,
            cue_tones,
            cue_tone_ms,
        })
    }

    /// Returns a copy with a different round length.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidRoundSecs` when out of range.
    pub fn with_round_secs(&self, round_secs: u32) -> Result<Self, SettingsError> {
        Self::new(round_secs, self.cue_tones, self.cue_tone_ms)
    }

    #[must_use]
    pub fn round_secs(&self) -> u32 {
        self.round_secs
    }

    #[must_use]
    pub fn cue_tones(&self) -> u32 {
        self.cue_tones
    }

    #[must_use]
    pub fn cue_tone_ms(&self) -> u64 {
        self.cue_tone_ms
    }
}

impl Default for GameSettings {
    /// Ten-second rounds introduced by three 300 ms tones.
    fn default() -> Self {
        Self {
            round_secs: DEFAULT_ROUND_SECS,
            cue_tones: 3,
            cue_tone_ms: 300,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_game() {
        let settings = GameSettings::default();
        assert_eq!(settings.round_secs(), 10);
        assert_eq!(settings.cue_tones(), 3);
        assert_eq!(settings.cue_tone_ms(), 300);
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert_eq!(
            GameSettings::new(0, 3, 300).unwrap_err(),
            SettingsError::InvalidRoundSecs
        );
        assert_eq!(
            GameSettings::new(601, 3, 300).unwrap_err(),
            SettingsError::InvalidRoundSecs
        );
        assert_eq!(
            GameSettings::new(10, 11, 300).unwrap_err(),
            SettingsError::InvalidCueTones
        );
        assert_eq!(
            GameSettings::new(10, 3, 5_001).unwrap_err(),
            SettingsError::InvalidCueToneMs
        );
    }

    #[test]
    fn with_round_secs_keeps_cue_shape() {
        let settings = GameSettings::default().with_round_secs(30).unwrap();
        assert_eq!(settings.round_secs(), 30);
        assert_eq!(settings.cue_tones(), 3);
    }
}
