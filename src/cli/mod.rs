//! CLI module
//!
//! Command-line interface for API Load Pro: argument parsing and the
//! runner that loads configuration and authenticates against the API.

mod commands;
mod runner;

pub use commands::Cli;
pub use runner::Runner;
