#![forbid(unsafe_code)]

pub mod catalog;
pub mod cue;
pub mod error;
pub mod question_bank;
pub mod round_controller;
pub mod scorer;
pub mod sessions;

pub use trivia_core::Clock;
pub use sessions as session;

pub use catalog::{load_catalog, parse_catalog, sample_catalog};
pub use cue::{IntroCue, SilentCue, ToneCue};
pub use error::CatalogError;
pub use question_bank::{
    IdentityShuffler, QuestionBank, RandomShuffler, ReverseShuffler, Shuffler,
};
pub use round_controller::{RoundController, RoundState, Submission, TickOutcome};
pub use scorer::Scorer;

pub use sessions::{
    GameHandle, GameRunner, GameSession, Intent, RoundSnapshot, SessionProgress,
    SessionSnapshot,
};
