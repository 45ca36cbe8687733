//! Command implementations

pub mod simple;

pub use simple::{Flow, LineCommand, run_simple, step};
