//! Game invariants - sanity checks that detect bugs.
//!
//! These should NEVER trigger in a correctly implemented engine: actions are
//! clamped before application and all counts are unsigned. If one fires, it
//! indicates a bug in step resolution, not bad bot input.

use crate::game::GameState;
use crate::game::economy::DEFENSE_HEALTH;

/// Sanity bound: worker count per player. Income is ~5% compound plus a
/// flat base, so even a 1000-step match stays far below this.
pub const SANITY_MAX_WORKERS: u32 = 1_000_000_000;

/// Sanity bound: soldiers per player. Soldiers only come from workers.
pub const SANITY_MAX_SOLDIERS: u32 = 1_000_000_000;

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all state invariants.
///
/// Returns the violations found, or empty if all invariants hold. Only
/// meaningful between steps; mid-phase state is allowed to be transient.
#[must_use]
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    for player in &state.players {
        if !player.attack_pct.is_finite() || !(0.0..=1.0).contains(&player.attack_pct) {
            violations.push(InvariantViolation {
                message: format!(
                    "Player {} has attack_pct {} outside [0, 1]",
                    player.name, player.attack_pct
                ),
            });
        }

        for (i, hp) in player.defenses.iter().enumerate() {
            if *hp == 0 || *hp > DEFENSE_HEALTH {
                violations.push(InvariantViolation {
                    message: format!(
                        "Player {} tower {} has HP {} outside 1..={}",
                        player.name, i, hp, DEFENSE_HEALTH
                    ),
                });
            }
        }

        if player.workers > SANITY_MAX_WORKERS {
            violations.push(InvariantViolation {
                message: format!(
                    "Player {} has {} workers > sanity max {}",
                    player.name, player.workers, SANITY_MAX_WORKERS
                ),
            });
        }

        if player.soldiers > SANITY_MAX_SOLDIERS {
            violations.push(InvariantViolation {
                message: format!(
                    "Player {} has {} soldiers > sanity max {}",
                    player.name, player.soldiers, SANITY_MAX_SOLDIERS
                ),
            });
        }

        // Eliminated players must hold nothing.
        if !player.alive
            && (player.workers > 0
                || player.soldiers > 0
                || player.houses > 0
                || !player.defenses.is_empty())
        {
            violations.push(InvariantViolation {
                message: format!("Eliminated player {} still owns resources", player.name),
            });
        }

        // Defeat must be applied at the lifecycle check, never left pending.
        if player.alive && player.is_defeated() {
            violations.push(InvariantViolation {
                message: format!("Defeated player {} was not eliminated", player.name),
            });
        }
    }

    violations
}

/// Assert all state invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with a detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(state: &GameState) {
    let violations = check_invariants(state);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Game invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_state: &GameState) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::PlayerState;

    fn valid_state() -> GameState {
        GameState::new(
            vec![PlayerState::new("left"), PlayerState::new("right")],
            200,
        )
    }

    #[test]
    fn test_valid_state_passes() {
        let state = valid_state();
        assert!(check_invariants(&state).is_empty());
    }

    #[test]
    fn test_attack_pct_out_of_range_detected() {
        let mut state = valid_state();
        state.players[0].attack_pct = 1.5;

        let violations = check_invariants(&state);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("attack_pct"));
    }

    #[test]
    fn test_zero_hp_tower_detected() {
        let mut state = valid_state();
        state.players[0].defenses.push(0);

        let violations = check_invariants(&state);
        assert!(!violations.is_empty());
        assert!(violations[0].message.contains("tower"));
    }

    #[test]
    fn test_overhealed_tower_detected() {
        let mut state = valid_state();
        state.players[0].defenses.push(DEFENSE_HEALTH + 1);

        assert!(!check_invariants(&state).is_empty());
    }

    #[test]
    fn test_dead_player_with_resources_detected() {
        let mut state = valid_state();
        state.players[1].alive = false;

        let violations = check_invariants(&state);
        assert!(!violations.is_empty());
        assert!(violations[0].message.contains("still owns"));
    }

    #[test]
    fn test_pending_defeat_detected() {
        let mut state = valid_state();
        state.players[0].workers = 0;

        let violations = check_invariants(&state);
        assert!(!violations.is_empty());
        assert!(violations[0].message.contains("not eliminated"));
    }
}
