//! Game flow: rounds, the controller that feeds them, and the events they emit

mod controller;
mod driver;
mod error;
mod event;
mod fallback;
mod round;

pub use controller::{GameController, MAX_DUPLICATE_RETRIES, Request, Response, SessionToken};
pub use driver::fulfil;
pub use error::GameError;
pub use event::{Cell, GameEvent, Snapshot};
pub use fallback::fallback_word;
pub use round::{Attempt, MAX_ATTEMPTS, Outcome, RoundState};
