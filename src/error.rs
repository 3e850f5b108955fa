//! Error types for the match engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A decision function panicked during invocation.
///
/// Faults are caught at the step-engine boundary and treated as an empty
/// action for that player for that step; they never abort a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotFault {
    /// Name of the faulting player.
    pub player: String,
    /// Step at which the fault occurred.
    pub step: u32,
    /// Panic message, if one could be extracted.
    pub message: String,
}

impl fmt::Display for BotFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} bot error at step {}: {}",
            self.player, self.step, self.message
        )
    }
}

impl std::error::Error for BotFault {}

/// Error type for match setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchError {
    /// Not enough players (minimum 2).
    TooFewPlayers(usize),
    /// Too many players (maximum 6).
    TooManyPlayers(usize),
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewPlayers(n) => write!(f, "Too few players: {n} (minimum 2)"),
            Self::TooManyPlayers(n) => write!(f, "Too many players: {n} (maximum 6)"),
        }
    }
}

impl std::error::Error for MatchError {}
