//! Match loop.
//!
//! Provides a pure function interface: `(bots, config) -> MatchOutcome`.
//! Repeatedly drives the step engine until a termination condition and
//! reports the outcome. Matches are single-threaded and deterministic for
//! deterministic bots; callers may run independent matches in parallel.

use crate::bot::Bot;
use crate::error::MatchError;
use crate::game::step::{PlayerSnapshot, StepEngine, StepReport};
use crate::game::{GameState, MAX_PLAYERS, MIN_PLAYERS, PlayerState};
use crate::replay::Recording;

/// Configuration for a match.
#[derive(Debug, Clone, Copy)]
pub struct MatchConfig {
    /// Maximum steps before the match ends on score.
    pub max_steps: u32,
    /// Collect per-step reports into a recording.
    pub record: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_steps: 200,
            record: false,
        }
    }
}

/// Final result of a match.
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    /// Winning player index (None on a draw).
    pub winner: Option<usize>,
    /// Player names, by index.
    pub names: Vec<String>,
    /// Final scores, by index.
    pub scores: Vec<f64>,
    /// Steps played.
    pub steps_played: u32,
    /// Elimination order (first eliminated is index 0).
    pub elimination_order: Vec<usize>,
    /// Decision-function faults per player.
    pub fault_counts: Vec<u32>,
    /// Final resources, by index.
    pub players: Vec<PlayerSnapshot>,
    /// Per-step reports, when recording was requested.
    pub recording: Option<Recording>,
}

/// Run a match between the given bots to completion.
///
/// The winner is the sole survivor; if the step cap is reached first, the
/// highest score wins (see [`crate::game::ScoringWeights`]), with equal top
/// scores a draw. All players falling in the same step is also a draw.
///
/// # Errors
///
/// Returns an error when the participant count is outside 2..=6.
pub fn run_match(
    mut bots: Vec<Box<dyn Bot>>,
    config: &MatchConfig,
) -> Result<MatchOutcome, MatchError> {
    let n = bots.len();
    if n < MIN_PLAYERS {
        return Err(MatchError::TooFewPlayers(n));
    }
    if n > MAX_PLAYERS {
        return Err(MatchError::TooManyPlayers(n));
    }

    let players: Vec<PlayerState> = bots.iter().map(|b| PlayerState::new(b.name())).collect();
    let names: Vec<String> = players.iter().map(|p| p.name.clone()).collect();

    let mut engine = StepEngine::new(GameState::new(players, config.max_steps));
    let mut recording = config
        .record
        .then(|| Recording::new(names.clone(), config.max_steps));
    let mut elimination_order = Vec::new();
    let mut fault_counts = vec![0u32; n];

    while !engine.state().is_over() {
        let report = engine.execute_step(&mut bots);
        track(&report, &names, &mut elimination_order, &mut fault_counts);
        if let Some(rec) = recording.as_mut() {
            rec.push(report);
        }
    }

    let state = engine.state();
    let scores: Vec<f64> = (0..n).map(|i| state.calculate_score(i)).collect();
    let winner = decide_winner(state, &scores);

    Ok(MatchOutcome {
        winner,
        names,
        scores,
        steps_played: state.step(),
        elimination_order,
        fault_counts,
        players: state.players.iter().map(PlayerSnapshot::from).collect(),
        recording,
    })
}

/// Accumulate per-match bookkeeping from one step report.
fn track(
    report: &StepReport,
    names: &[String],
    elimination_order: &mut Vec<usize>,
    fault_counts: &mut [u32],
) {
    elimination_order.extend(&report.eliminated);
    for fault in &report.faults {
        if let Some(i) = names.iter().position(|n| *n == fault.player) {
            fault_counts[i] += 1;
        }
    }
}

/// Sole survivor wins; otherwise the match ran out of steps and the top
/// score wins, a tie at the top being a draw.
fn decide_winner(state: &GameState, scores: &[f64]) -> Option<usize> {
    let alive = state.alive_indices();
    match alive.len() {
        0 => None,
        1 => Some(alive[0]),
        _ => {
            let best = scores.iter().copied().fold(f64::MIN, f64::max);
            let mut at_best = scores
                .iter()
                .enumerate()
                .filter(|(_, s)| s.total_cmp(&best).is_eq());
            let winner = at_best.next().map(|(i, _)| i);
            if at_best.next().is_some() { None } else { winner }
        }
    }
}
