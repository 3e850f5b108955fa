//! Run command implementation.

use super::output::{JsonMatchResult, format_step, format_text};
use super::{CliError, OutputFormat, resolve_bots};
use skirmish::{MatchConfig, run_match};
use std::path::PathBuf;

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if a bot name is unknown or the match fails to run.
pub(crate) fn execute(
    bots: Vec<String>,
    steps: u32,
    format: OutputFormat,
    save: Option<PathBuf>,
    quiet: bool,
) -> Result<(), CliError> {
    let roster = resolve_bots(&bots)?;

    if !quiet {
        println!("Players: {}", bots.join(", "));
    }

    // Record whenever step-by-step output or a save file is wanted.
    let config = MatchConfig {
        max_steps: steps,
        record: save.is_some() || (!quiet && format == OutputFormat::Text),
    };

    let outcome = run_match(roster, &config)?;

    if !quiet
        && format == OutputFormat::Text
        && let Some(recording) = &outcome.recording
    {
        for report in &recording.steps {
            print!("{}", format_step(report));
        }
        println!();
    }

    if let Some(save_path) = save {
        let recording = outcome
            .recording
            .as_ref()
            .ok_or_else(|| CliError::new("recording missing"))?;
        recording
            .save(&save_path)
            .map_err(|e| CliError::new(format!("Failed to save recording: {e}")))?;
        if !quiet {
            println!("Recording saved to: {}", save_path.display());
            println!();
        }
    }

    match format {
        OutputFormat::Text => {
            print!("{}", format_text(&outcome));
        }
        OutputFormat::Json => {
            let json_result = JsonMatchResult::from_outcome(&outcome);
            let json = serde_json::to_string_pretty(&json_result)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}
