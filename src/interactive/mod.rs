//! Full-screen terminal game

pub mod app;
pub mod rendering;

pub use app::{App, Message, Statistics, run_tui};
