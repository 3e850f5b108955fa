//! Match recordings.
//!
//! A [`Recording`] is the one-way handoff to renderers and analysis tools:
//! the ordered per-step reports of a match, serializable to JSON. Nothing in
//! a recording feeds back into the simulation.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::game::step::StepReport;

/// A complete recorded match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    /// Player names, by index.
    pub names: Vec<String>,
    /// Step cap the match was run with.
    pub max_steps: u32,
    /// Reports in step order.
    pub steps: Vec<StepReport>,
}

impl Recording {
    /// Create an empty recording.
    #[must_use]
    pub const fn new(names: Vec<String>, max_steps: u32) -> Self {
        Self {
            names,
            max_steps,
            steps: Vec::new(),
        }
    }

    /// Append one step's report.
    pub fn push(&mut self, report: StepReport) {
        self.steps.push(report);
    }

    /// Serialize to pretty JSON and write to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error when serialization or the file write fails.
    pub fn save(&self, path: &Path) -> Result<(), ReplayError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load a recording from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// Error type for recording I/O.
#[derive(Debug)]
pub enum ReplayError {
    /// Filesystem error.
    Io(std::io::Error),
    /// JSON error.
    Json(serde_json::Error),
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "recording I/O error: {e}"),
            Self::Json(e) => write!(f, "recording JSON error: {e}"),
        }
    }
}

impl std::error::Error for ReplayError {}

impl From<std::io::Error> for ReplayError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ReplayError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}
