//! Tournament command implementation.

use super::output::{
    JsonTournamentResult, TournamentStats, format_tournament_csv, format_tournament_text,
};
use super::{CliError, TournamentFormat, resolve_bots};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use skirmish::bots::BUILTIN_BOTS;
use skirmish::{MatchConfig, run_match};
use std::time::Instant;

/// Execute the tournament command: every ordered pairing from the roster
/// plays one match, so each bot takes both seats against each opponent.
///
/// # Errors
///
/// Returns an error if a bot name is unknown or a match fails to run.
pub(crate) fn execute(
    bots: Vec<String>,
    steps: u32,
    threads: Option<usize>,
    format: TournamentFormat,
    progress: bool,
) -> Result<(), CliError> {
    let roster: Vec<String> = if bots.is_empty() {
        BUILTIN_BOTS.iter().map(|(name, _)| (*name).to_string()).collect()
    } else {
        bots
    };
    if roster.len() < 2 {
        return Err(CliError::new("tournament needs at least 2 bots"));
    }
    // Validate names up front so a typo fails before any match runs.
    drop(resolve_bots(&roster)?);

    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let config = MatchConfig {
        max_steps: steps,
        record: false,
    };

    let pairings: Vec<(usize, usize)> = (0..roster.len())
        .flat_map(|a| (0..roster.len()).filter(move |&b| b != a).map(move |b| (a, b)))
        .collect();

    let total_matches =
        u64::try_from(pairings.len()).map_err(|e| CliError::new(e.to_string()))?;
    let pb = if progress {
        let pb = ProgressBar::new(total_matches);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} matches ({per_sec})")
                .expect("valid template")
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();
    let num_bots = roster.len();

    // Each thread accumulates into its own TournamentStats, then we merge
    // at the end (no shared state in the hot path).
    let stats = pairings
        .par_iter()
        .fold(
            || TournamentStats::new(num_bots),
            |mut local_stats, &(a, b)| {
                let pair = resolve_bots(&[roster[a].clone(), roster[b].clone()])
                    .unwrap_or_default();
                if let Ok(outcome) = run_match(pair, &config) {
                    local_stats.add_outcome(&[a, b], &outcome);
                }
                local_stats
            },
        )
        .reduce(
            || TournamentStats::new(num_bots),
            |mut a, b| {
                a.merge(&b);
                a
            },
        );

    if let Some(pb) = pb {
        pb.set_position(stats.matches_played);
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();

    match format {
        TournamentFormat::Text => {
            println!();
            print!("{}", format_tournament_text(&stats, &roster));
            println!();
            println!("Duration: {:.2}s", duration.as_secs_f64());
        }
        TournamentFormat::Json => {
            let json_result = JsonTournamentResult::from_stats(&stats, &roster);
            let json = serde_json::to_string_pretty(&json_result)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
        TournamentFormat::Csv => {
            print!("{}", format_tournament_csv(&stats, &roster));
        }
    }

    Ok(())
}
