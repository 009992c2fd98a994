use chrono::{DateTime, Duration, Utc};

/// Source of wall-clock timestamps for the game runner.
///
/// State machines never read the time themselves; callers pass `now` in, and this clock
/// is where those values come from outside of tests.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Returns a clock backed by the system time.
    #[must_use]
    pub fn system() -> Self {
        Self::System
    }

    /// Returns a clock pinned to the given timestamp.
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Moves a fixed clock forward. No effect on `Clock::System`.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }
}

/// Seconds between two instants with microsecond precision.
///
/// Negative spans (clock skew) clamp to zero.
#[must_use]
pub fn seconds_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let span = end - start;
    let micros = span
        .num_microseconds()
        .unwrap_or_else(|| span.num_milliseconds().saturating_mul(1_000));
    #[allow(clippy::cast_precision_loss)]
    let secs = micros as f64 / 1_000_000.0;
    secs.max(0.0)
}

/// Deterministic timestamp for tests (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Returns a deterministic `DateTime<Utc>` for tests.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_between_keeps_sub_second_precision() {
        let start = fixed_now();
        let end = start + Duration::milliseconds(3_142);
        assert!((seconds_between(start, end) - 3.142).abs() < 1e-9);
    }

    #[test]
    fn seconds_between_clamps_negative_spans() {
        let start = fixed_now();
        assert_eq!(seconds_between(start, start - Duration::seconds(2)), 0.0);
    }

    #[test]
    fn fixed_clock_advances_and_system_clock_ignores_advance() {
        let mut clock = Clock::fixed(fixed_now());
        clock.advance(Duration::seconds(5));
        assert_eq!(clock.now(), fixed_now() + Duration::seconds(5));

        let mut system = Clock::system();
        system.advance(Duration::days(1));
        assert!(matches!(system, Clock::System));
    }
}
