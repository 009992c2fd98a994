mod ids;
mod question;
mod result;
mod round;
mod selection;
mod settings;

pub use ids::QuestionId;

pub use question::{Question, QuestionError};
pub use result::{FinalScore, ResultEntry, RoundResult};
pub use round::RoundPhase;
pub use selection::Selection;
pub use settings::{GameSettings, SettingsError};
