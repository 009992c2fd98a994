use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, watch};
use tokio::time::{self, Instant, MissedTickBehavior};
use trivia_core::model::RoundPhase;

use super::service::GameSession;
use super::view::SessionSnapshot;
use crate::Clock;
use crate::cue::IntroCue;

const TICK_PERIOD: Duration = Duration::from_secs(1);
const INTENT_BUFFER: usize = 32;

/// User intents forwarded by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    StartRound,
    Toggle(String),
    Reset,
    Submit,
    Advance,
    Quit,
}

/// Presentation-side ends of a running game.
#[derive(Debug)]
pub struct GameHandle {
    pub intents: mpsc::Sender<Intent>,
    pub snapshots: watch::Receiver<SessionSnapshot>,
}

/// Drives a [`GameSession`] in real time: plays the intro cue, ticks the countdown once per
/// second while input is open, applies intents, and publishes a snapshot after every change.
///
/// Round timestamps are the clock reading taken at construction plus the monotonic time
/// since then, so scored time and the countdown share one timer.
pub struct GameRunner {
    session: GameSession,
    cue: Arc<dyn IntroCue>,
    epoch: Instant,
    anchor: DateTime<Utc>,
    intents: mpsc::Receiver<Intent>,
    snapshots: watch::Sender<SessionSnapshot>,
}

impl GameRunner {
    #[must_use]
    pub fn new(session: GameSession, cue: Arc<dyn IntroCue>, clock: Clock) -> (Self, GameHandle) {
        let (intent_tx, intent_rx) = mpsc::channel(INTENT_BUFFER);
        let (snapshot_tx, snapshot_rx) = watch::channel(session.snapshot());
        let runner = Self {
            session,
            cue,
            epoch: Instant::now(),
            anchor: clock.now(),
            intents: intent_rx,
            snapshots: snapshot_tx,
        };
        let handle = GameHandle {
            intents: intent_tx,
            snapshots: snapshot_rx,
        };
        (runner, handle)
    }

    /// Runs until the session completes, the player quits, or every intent sender is dropped.
    ///
    /// Returns the session as it stands; an abandoned round is not recorded.
    pub async fn run(mut self) -> GameSession {
        loop {
            self.publish();
            if self.session.is_complete() {
                break;
            }
            match self.session.phase() {
                RoundPhase::Presenting => {
                    if !self.present().await {
                        break;
                    }
                }
                RoundPhase::AwaitingInput => {
                    if !self.await_input().await {
                        break;
                    }
                }
                _ => match self.intents.recv().await {
                    Some(Intent::Quit) | None => {
                        self.quit();
                        break;
                    }
                    Some(intent) => self.apply(intent),
                },
            }
        }
        self.publish();
        self.session
    }

    /// Plays the cue to completion, then opens input. Intents that arrived meanwhile are
    /// dropped, apart from a quit.
    async fn present(&mut self) -> bool {
        self.cue.play().await;
        loop {
            match self.intents.try_recv() {
                Ok(Intent::Quit) | Err(mpsc::error::TryRecvError::Disconnected) => {
                    self.quit();
                    return false;
                }
                Ok(intent) => tracing::debug!(?intent, "ignored while presenting"),
                Err(mpsc::error::TryRecvError::Empty) => break,
            }
        }
        self.session.finish_cue(self.now());
        true
    }

    /// Holds the tick interval for as long as input is open; leaving this function by any
    /// path drops it.
    async fn await_input(&mut self) -> bool {
        let mut ticker = time::interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        while self.session.phase().accepts_input() {
            tokio::select! {
                _ = ticker.tick() => {
                    self.session.tick(self.now());
                }
                intent = self.intents.recv() => match intent {
                    Some(Intent::Quit) | None => {
                        self.quit();
                        return false;
                    }
                    Some(intent) => self.apply(intent),
                },
            }
            self.publish();
        }
        true
    }

    fn now(&self) -> DateTime<Utc> {
        chrono::Duration::from_std(self.epoch.elapsed())
            .ok()
            .and_then(|elapsed| self.anchor.checked_add_signed(elapsed))
            .unwrap_or(self.anchor)
    }

    fn apply(&mut self, intent: Intent) {
        let now = self.now();
        let changed = match &intent {
            Intent::StartRound => self.session.start_round(),
            Intent::Toggle(label) => self.session.toggle_choice(label),
            Intent::Reset => self.session.reset_selection(),
            Intent::Submit => self.session.submit(now).is_some(),
            Intent::Advance => self.session.next_question(),
            Intent::Quit => false,
        };
        if !changed {
            tracing::debug!(?intent, phase = ?self.session.phase(), "intent ignored");
        }
    }

    fn quit(&mut self) {
        tracing::info!(phase = ?self.session.phase(), "session abandoned");
        self.session.abandon();
    }

    fn publish(&self) {
        let snapshot = self.session.snapshot();
        self.snapshots.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
    }
}
