//! Command-line front end: argument parsing, handlers and output formatting.

pub mod args;
pub mod commands;
pub mod output;

pub use args::{Cli, Commands};
pub use commands::{dispatch, Outcome, MAILER_DAEMON};
