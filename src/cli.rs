//! CLI command implementations for Skirmish.

pub(crate) mod bots;
pub(crate) mod run;
pub(crate) mod tournament;

mod output;

use clap::ValueEnum;
use std::error::Error;
use std::fmt;

/// Output format for the `run` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Output format for the `tournament` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum TournamentFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format.
    Csv,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<skirmish::error::MatchError> for CliError {
    fn from(e: skirmish::error::MatchError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<skirmish::replay::ReplayError> for CliError {
    fn from(e: skirmish::replay::ReplayError) -> Self {
        Self::new(e.to_string())
    }
}

/// Resolve a list of built-in bot names, with a helpful error for typos.
pub(crate) fn resolve_bots(
    names: &[String],
) -> Result<Vec<Box<dyn skirmish::Bot>>, CliError> {
    names
        .iter()
        .map(|name| {
            skirmish::bots::builtin(name).ok_or_else(|| {
                CliError::new(format!(
                    "Unknown bot '{name}' (see `skirmish bots` for the list)"
                ))
            })
        })
        .collect()
}
