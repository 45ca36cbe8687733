//! Terminal output formatting
//!
//! Message text and coloured rendering of the board and keyboard.

pub mod display;
pub mod formatters;

pub use display::{print_board, print_event, print_keyboard, print_message};
pub use formatters::{Tone, error_message, event_message, score_line};
