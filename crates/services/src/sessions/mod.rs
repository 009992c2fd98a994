mod progress;
mod service;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use progress::SessionProgress;
pub use service::GameSession;
pub use view::{RoundSnapshot, SessionSnapshot};
pub use workflow::{GameHandle, GameRunner, Intent};
