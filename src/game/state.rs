//! Match state management.

use crate::game::PlayerState;

/// Minimum number of participants in a match.
pub const MIN_PLAYERS: usize = 2;

/// Maximum number of participants in a match.
pub const MAX_PLAYERS: usize = 6;

/// Weights for the step-cap score tiebreak.
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    /// Points per worker (default: 1.0).
    pub workers: f64,
    /// Points per soldier (default: 2.0).
    pub soldiers: f64,
    /// Points per standing defense tower (default: 5.0).
    pub defenses: f64,
    /// Points per house (default: 3.0).
    pub houses: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            workers: 1.0,
            soldiers: 2.0,
            defenses: 5.0,
            houses: 3.0,
        }
    }
}

/// Complete match state.
#[derive(Debug, Clone)]
pub struct GameState {
    /// All participants, in fixed index order.
    pub players: Vec<PlayerState>,
    /// Completed step count (first executed step is step 1).
    step: u32,
    /// Maximum number of steps before the match ends on score.
    max_steps: u32,
    /// Scoring weights for the step-cap tiebreak.
    pub scoring: ScoringWeights,
}

impl GameState {
    /// Create a new match state with the given participants.
    #[must_use]
    pub fn new(players: Vec<PlayerState>, max_steps: u32) -> Self {
        Self {
            players,
            step: 0,
            max_steps,
            scoring: ScoringWeights::default(),
        }
    }

    /// Completed step count.
    #[must_use]
    pub const fn step(&self) -> u32 {
        self.step
    }

    /// Step cap for this match.
    #[must_use]
    pub const fn max_steps(&self) -> u32 {
        self.max_steps
    }

    /// Advance the step counter.
    pub fn advance_step(&mut self) {
        self.step += 1;
    }

    /// Number of players still in the match.
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.players.iter().filter(|p| p.alive).count()
    }

    /// Check if the match is over: step cap reached, or at most one
    /// player left (zero when all fell in the same step).
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.step >= self.max_steps || self.alive_count() <= 1
    }

    /// Indices of players still in the match.
    #[must_use]
    pub fn alive_indices(&self) -> Vec<usize> {
        self.players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.alive)
            .map(|(i, _)| i)
            .collect()
    }

    /// The reference opponent shown to player `i`: the next living player
    /// in cyclic index order. Falls back to the next index when nobody
    /// else is alive (only reachable once the match is already over).
    #[must_use]
    pub fn reference_opponent(&self, i: usize) -> usize {
        let n = self.players.len();
        for offset in 1..n {
            let j = (i + offset) % n;
            if self.players[j].alive {
                return j;
            }
        }
        (i + 1) % n
    }

    /// Score for the step-cap tiebreak.
    #[must_use]
    pub fn calculate_score(&self, i: usize) -> f64 {
        let p = &self.players[i];
        f64::from(p.workers) * self.scoring.workers
            + f64::from(p.soldiers) * self.scoring.soldiers
            + f64::from(p.defense_count()) * self.scoring.defenses
            + f64::from(p.houses) * self.scoring.houses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_player_state() -> GameState {
        GameState::new(
            vec![PlayerState::new("left"), PlayerState::new("right")],
            200,
        )
    }

    #[test]
    fn test_new_state() {
        let state = two_player_state();
        assert_eq!(state.step(), 0);
        assert_eq!(state.alive_count(), 2);
        assert!(!state.is_over());
    }

    #[test]
    fn test_over_when_one_left() {
        let mut state = two_player_state();
        state.players[1].eliminate();
        assert!(state.is_over());
    }

    #[test]
    fn test_over_at_step_cap() {
        let mut state = two_player_state();
        for _ in 0..200 {
            state.advance_step();
        }
        assert!(state.is_over());
    }

    #[test]
    fn test_reference_opponent_skips_dead() {
        let mut state = GameState::new(
            vec![
                PlayerState::new("a"),
                PlayerState::new("b"),
                PlayerState::new("c"),
            ],
            200,
        );
        assert_eq!(state.reference_opponent(0), 1);

        state.players[1].eliminate();
        assert_eq!(state.reference_opponent(0), 2);
        assert_eq!(state.reference_opponent(2), 0);
    }

    #[test]
    fn test_score_weights() {
        let mut state = two_player_state();
        let p = &mut state.players[0];
        p.workers = 10;
        p.soldiers = 5;
        p.houses = 2;
        p.add_defenses(1);

        // 10*1 + 5*2 + 1*5 + 2*3 = 31
        let score = state.calculate_score(0);
        assert!((score - 31.0).abs() < f64::EPSILON);
    }
}
