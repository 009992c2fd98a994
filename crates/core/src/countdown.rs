//! Tick-driven countdown used for the per-round time limit.
//!
//! The countdown does not schedule anything itself: a driver calls [`Countdown::tick`] once per
//! second of wall time and reacts to the returned [`TimerEvent`]. The scored time comes from
//! [`Countdown::elapsed_secs`], which measures real time since `start` and is independent of
//! the integer count.

use chrono::{DateTime, Utc};

use crate::time::seconds_between;

/// Default countdown length in seconds.
pub const DEFAULT_ROUND_SECS: u32 = 10;

/// Emitted by [`Countdown::tick`] while the countdown is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// One second passed; `remaining` seconds are left on the display.
    Tick { remaining: u32 },
    /// The count reached zero. Emitted once per `start`.
    Expired,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Countdown {
    remaining: u32,
    started_at: Option<DateTime<Utc>>,
    running: bool,
}

impl Countdown {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts (or restarts) the countdown at `secs`.
    pub fn start(&mut self, secs: u32, now: DateTime<Utc>) {
        self.remaining = secs;
        self.started_at = Some(now);
        self.running = true;
    }

    /// Advances the count by one second.
    ///
    /// The tick that brings the count to zero reports `Expired` instead of `Tick` and stops
    /// the countdown. Returns `None` when the countdown is not running.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if !self.running {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            return Some(TimerEvent::Expired);
        }
        Some(TimerEvent::Tick {
            remaining: self.remaining,
        })
    }

    /// Stops the countdown. Safe to call repeatedly or after expiry.
    pub fn cancel(&mut self) {
        self.running = false;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Wall-clock seconds since the last `start`, or `0.0` if never started.
    #[must_use]
    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> f64 {
        self.started_at
            .map_or(0.0, |started| seconds_between(started, now))
    }
}
