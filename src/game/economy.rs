//! Economy constants and the worker income formula.
//!
//! Workers are the sole fungible resource. Each step a player gains a flat
//! base income, a per-house bonus, and a compound bonus proportional to the
//! worker count at the start of the step:
//!
//! ```text
//! income = BASE_WORKERS_PER_STEP
//!        + houses * HOUSE_WORKER_BONUS
//!        + floor(workers * (WORKER_BONUS - 1))
//! ```
//!
//! The formula is a pure function of the pre-step counts, with no randomness.

/// Flat worker income per step.
pub const BASE_WORKERS_PER_STEP: u32 = 10;

/// Extra workers per house per step.
pub const HOUSE_WORKER_BONUS: u32 = 3;

/// Compound growth multiplier. At 1.05 each step adds ~5% of the current
/// worker count (floored).
pub const WORKER_BONUS: f64 = 1.05;

/// Worker cost of one house.
pub const HOUSE_COST: u32 = 20;

/// Worker cost of one defense tower.
pub const DEFENSE_COST: u32 = 20;

/// Hit points of a freshly built defense tower.
pub const DEFENSE_HEALTH: u32 = 30;

/// Workers each player starts the match with.
pub const STARTING_WORKERS: u32 = 20;

/// Worker income for one step, from the pre-step worker and house counts.
#[must_use]
pub fn worker_income(workers: u32, houses: u32) -> u32 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let compound = (f64::from(workers) * (WORKER_BONUS - 1.0).max(0.0)) as u32;

    BASE_WORKERS_PER_STEP
        .saturating_add(houses.saturating_mul(HOUSE_WORKER_BONUS))
        .saturating_add(compound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_income_base_only() {
        assert_eq!(worker_income(0, 0), BASE_WORKERS_PER_STEP);
    }

    #[test]
    fn test_income_starting_workers() {
        // floor(20 * 0.05) = 1
        assert_eq!(worker_income(STARTING_WORKERS, 0), 21);
    }

    #[test]
    fn test_income_houses() {
        assert_eq!(worker_income(0, 2), BASE_WORKERS_PER_STEP + 2 * HOUSE_WORKER_BONUS);
    }

    #[test]
    fn test_income_compound_floors() {
        // floor(19 * 0.05) = 0, floor(39 * 0.05) = 1
        assert_eq!(worker_income(19, 0), 10);
        assert_eq!(worker_income(39, 0), 11);
    }

    #[test]
    fn test_income_no_overflow() {
        let income = worker_income(u32::MAX, u32::MAX);
        assert!(income > 0);
    }
}
