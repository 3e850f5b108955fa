//! Output formatting utilities for CLI.

use serde::Serialize;
use skirmish::MatchOutcome;
use skirmish::SanitizedAction;
use skirmish::game::step::{PlayerSnapshot, StepReport};

/// Label for one executed action, matching the text renderer's vocabulary.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn action_label(action: SanitizedAction, send: u32) -> String {
    match action {
        SanitizedAction::Convert(n) => format!("Convert {n}"),
        SanitizedAction::BuildHouses(n) => format!("Build Houses x{n}"),
        SanitizedAction::BuildDefenses(n) => format!("Build Defenses x{n}"),
        SanitizedAction::Attack(pct) => {
            format!("Attack {}% (send {send})", (pct * 100.0).round() as u32)
        }
        SanitizedAction::Wait => "Wait".to_string(),
    }
}

/// One player's status line.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn status_line(p: &PlayerSnapshot) -> String {
    if p.alive {
        format!(
            "W:{:4} S:{:4} H:{:2} D:{:2} A:{:3}%",
            p.workers,
            p.soldiers,
            p.houses,
            p.defenses,
            (p.attack_pct * 100.0).round() as u32
        )
    } else {
        "eliminated".to_string()
    }
}

/// Format one resolved step as human-readable text.
pub(super) fn format_step(report: &StepReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("\nStep {}\n", report.step));
    for fault in &report.faults {
        output.push_str(&format!("  [WARN] {fault}\n"));
    }
    for (i, player) in report.players.iter().enumerate() {
        output.push_str(&format!(
            "  {} action: {}\n",
            player.name,
            action_label(report.actions[i], report.sends[i])
        ));
    }
    if report.sends.iter().any(|&s| s > 0) {
        for (i, player) in report.players.iter().enumerate() {
            let c = &report.casualties[i];
            output.push_str(&format!(
                "  Hits on {}: towers -{}, soldiers -{}, workers -{}\n",
                player.name, c.destroyed_defenses, c.killed_soldiers, c.killed_workers
            ));
        }
    }
    for player in &report.players {
        output.push_str(&format!("  {}: {}\n", player.name, status_line(player)));
    }

    output
}

/// Format a match outcome as human-readable text.
pub(super) fn format_text(outcome: &MatchOutcome) -> String {
    let mut output = String::new();

    output.push_str("=== RESULT ===\n");
    if let Some(i) = outcome.winner {
        output.push_str(&format!("  Winner: {}\n", outcome.names[i]));
    } else {
        output.push_str("  Winner: Draw\n");
    }
    output.push_str(&format!("  Steps: {}\n\n", outcome.steps_played));

    for (i, name) in outcome.names.iter().enumerate() {
        output.push_str(&format!("  {}: {:.0} points", name, outcome.scores[i]));
        if let Some(order) = outcome.elimination_order.iter().position(|&e| e == i) {
            output.push_str(&format!(" [eliminated #{}]", order + 1));
        }
        if outcome.fault_counts[i] > 0 {
            output.push_str(&format!(" [{} faults]", outcome.fault_counts[i]));
        }
        output.push('\n');
    }

    output
}

/// JSON-serializable match result.
#[derive(Debug, Serialize)]
pub(super) struct JsonMatchResult {
    /// Winner name (null if draw).
    pub(super) winner: Option<String>,
    /// Total steps played.
    pub(super) steps_played: u32,
    /// Per-player results.
    pub(super) players: Vec<JsonPlayerResult>,
}

/// JSON-serializable player result.
#[derive(Debug, Serialize)]
pub(super) struct JsonPlayerResult {
    /// Bot name.
    pub(super) name: String,
    /// Final score.
    pub(super) score: f64,
    /// Elimination position (null if survived).
    pub(super) eliminated: Option<usize>,
    /// Decision-function fault count.
    pub(super) faults: u32,
}

impl JsonMatchResult {
    /// Create from a match outcome.
    pub(super) fn from_outcome(outcome: &MatchOutcome) -> Self {
        Self {
            winner: outcome.winner.map(|i| outcome.names[i].clone()),
            steps_played: outcome.steps_played,
            players: outcome
                .names
                .iter()
                .enumerate()
                .map(|(i, name)| JsonPlayerResult {
                    name: name.clone(),
                    score: outcome.scores[i],
                    eliminated: outcome
                        .elimination_order
                        .iter()
                        .position(|&e| e == i)
                        .map(|order| order + 1),
                    faults: outcome.fault_counts[i],
                })
                .collect(),
        }
    }
}

/// Aggregated round-robin statistics, indexed by roster position.
#[derive(Debug)]
pub(super) struct TournamentStats {
    /// Total matches played.
    pub(super) matches_played: u64,
    /// Win count per bot.
    wins: Vec<u64>,
    /// Matches each bot took part in.
    games: Vec<u64>,
    /// Draw count.
    pub(super) draws: u64,
    /// Total score per bot.
    total_scores: Vec<f64>,
    /// Total steps across all matches.
    total_steps: u64,
}

impl TournamentStats {
    /// Create new stats for a roster of n bots.
    pub(super) fn new(num_bots: usize) -> Self {
        Self {
            matches_played: 0,
            wins: vec![0; num_bots],
            games: vec![0; num_bots],
            draws: 0,
            total_scores: vec![0.0; num_bots],
            total_steps: 0,
        }
    }

    /// Add one pairing's outcome. `roster` maps the match's player indices
    /// to roster positions.
    pub(super) fn add_outcome(&mut self, roster: &[usize], outcome: &MatchOutcome) {
        self.matches_played += 1;
        self.total_steps += u64::from(outcome.steps_played);

        match outcome.winner {
            Some(i) => self.wins[roster[i]] += 1,
            None => self.draws += 1,
        }
        for (i, &slot) in roster.iter().enumerate() {
            self.games[slot] += 1;
            self.total_scores[slot] += outcome.scores[i];
        }
    }

    /// Merge another thread's stats into this one.
    pub(super) fn merge(&mut self, other: &Self) {
        self.matches_played += other.matches_played;
        self.draws += other.draws;
        self.total_steps += other.total_steps;
        for (a, b) in self.wins.iter_mut().zip(&other.wins) {
            *a += b;
        }
        for (a, b) in self.games.iter_mut().zip(&other.games) {
            *a += b;
        }
        for (a, b) in self.total_scores.iter_mut().zip(&other.total_scores) {
            *a += b;
        }
    }

    /// Win rate for a roster slot (0.0-1.0).
    #[allow(clippy::cast_precision_loss)]
    pub(super) fn win_rate(&self, slot: usize) -> f64 {
        let games = self.games.get(slot).copied().unwrap_or(0);
        if games == 0 {
            return 0.0;
        }
        self.wins.get(slot).copied().unwrap_or(0) as f64 / games as f64
    }

    /// Average score for a roster slot.
    #[allow(clippy::cast_precision_loss)]
    pub(super) fn avg_score(&self, slot: usize) -> f64 {
        let games = self.games.get(slot).copied().unwrap_or(0);
        if games == 0 {
            return 0.0;
        }
        self.total_scores.get(slot).copied().unwrap_or(0.0) / games as f64
    }

    /// Wins for a roster slot.
    pub(super) fn wins(&self, slot: usize) -> u64 {
        self.wins.get(slot).copied().unwrap_or(0)
    }

    /// Average match length.
    #[allow(clippy::cast_precision_loss)]
    pub(super) fn avg_steps(&self) -> f64 {
        if self.matches_played == 0 {
            return 0.0;
        }
        self.total_steps as f64 / self.matches_played as f64
    }
}

/// JSON-serializable tournament result.
#[derive(Debug, Serialize)]
pub(super) struct JsonTournamentResult {
    /// Total matches played.
    matches_played: u64,
    /// Per-bot statistics.
    bots: Vec<JsonTournamentBot>,
    /// Number of draws.
    draws: u64,
    /// Average match length in steps.
    avg_steps: f64,
}

/// JSON-serializable per-bot tournament stats.
#[derive(Debug, Serialize)]
pub(super) struct JsonTournamentBot {
    /// Bot name.
    bot: String,
    /// Number of wins.
    wins: u64,
    /// Win rate (0.0-1.0).
    win_rate: f64,
    /// Average score.
    avg_score: f64,
}

impl JsonTournamentResult {
    /// Create from stats and the roster.
    pub(super) fn from_stats(stats: &TournamentStats, roster: &[String]) -> Self {
        let bots = roster
            .iter()
            .enumerate()
            .map(|(i, name)| JsonTournamentBot {
                bot: name.clone(),
                wins: stats.wins(i),
                win_rate: stats.win_rate(i),
                avg_score: stats.avg_score(i),
            })
            .collect();

        Self {
            matches_played: stats.matches_played,
            bots,
            draws: stats.draws,
            avg_steps: stats.avg_steps(),
        }
    }
}

/// Format tournament stats as human-readable text.
#[allow(clippy::cast_precision_loss)]
pub(super) fn format_tournament_text(stats: &TournamentStats, roster: &[String]) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Tournament Results ({} matches)\n",
        stats.matches_played
    ));
    output.push_str("========================================\n\n");

    output.push_str("Win Rates:\n");
    let mut ranked: Vec<usize> = (0..roster.len()).collect();
    ranked.sort_by(|&a, &b| stats.win_rate(b).total_cmp(&stats.win_rate(a)));
    for slot in ranked {
        output.push_str(&format!(
            "  {}: {:.1}% ({} wins)\n",
            roster[slot],
            stats.win_rate(slot) * 100.0,
            stats.wins(slot)
        ));
    }
    if stats.matches_played > 0 {
        output.push_str(&format!(
            "  Draws: {} ({:.1}%)\n",
            stats.draws,
            (stats.draws as f64 / stats.matches_played as f64) * 100.0
        ));
    }

    output.push_str("\nAverage Scores:\n");
    for (slot, name) in roster.iter().enumerate() {
        output.push_str(&format!("  {}: {:.1}\n", name, stats.avg_score(slot)));
    }

    output.push_str(&format!(
        "\nAverage Match Length: {:.0} steps\n",
        stats.avg_steps()
    ));

    output
}

/// Format tournament stats as CSV.
pub(super) fn format_tournament_csv(stats: &TournamentStats, roster: &[String]) -> String {
    let mut output = String::new();

    output.push_str("bot,wins,win_rate,avg_score\n");
    for (slot, name) in roster.iter().enumerate() {
        output.push_str(&format!(
            "{},{},{:.4},{:.2}\n",
            name,
            stats.wins(slot),
            stats.win_rate(slot),
            stats.avg_score(slot)
        ));
    }

    output
}
