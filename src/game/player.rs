//! Per-player resource ledger.

use crate::game::economy::{DEFENSE_HEALTH, STARTING_WORKERS, worker_income};

/// State for a single participant.
///
/// All counts are authoritative integers; positional bookkeeping for
/// renderers lives outside the engine. Non-negativity is structural.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    /// Display name, used only for reporting.
    pub name: String,
    /// Fungible resource; source of all spending.
    pub workers: u32,
    /// Garrisoned soldiers, available to be sent as attackers.
    pub soldiers: u32,
    /// House count; each adds a fixed worker bonus per step.
    pub houses: u32,
    /// Per-tower hit points, in build order. Zero-HP towers are removed
    /// immediately after damage application.
    pub defenses: Vec<u32>,
    /// Last-chosen attack intensity in `[0, 1]`, persisted across steps.
    pub attack_pct: f64,
    /// Whether the player is still in the match.
    pub alive: bool,
}

impl PlayerState {
    /// Create a player with starting resources.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            workers: STARTING_WORKERS,
            soldiers: 0,
            houses: 0,
            defenses: Vec::new(),
            attack_pct: 0.0,
            alive: true,
        }
    }

    /// Apply one step of worker income. Returns the gain.
    pub fn spawn_workers(&mut self) -> u32 {
        let gain = worker_income(self.workers, self.houses);
        self.workers = self.workers.saturating_add(gain);
        gain
    }

    /// Add `n` houses.
    pub fn add_houses(&mut self, n: u32) {
        self.houses = self.houses.saturating_add(n);
    }

    /// Add `n` defense towers at full health.
    pub fn add_defenses(&mut self, n: u32) {
        self.defenses
            .extend(std::iter::repeat_n(DEFENSE_HEALTH, n as usize));
    }

    /// Remove up to `n` soldiers from the garrison and return the count
    /// actually removed, for attack-packet formation.
    pub fn pop_attackers(&mut self, n: u32) -> u32 {
        let taken = n.min(self.soldiers);
        self.soldiers -= taken;
        taken
    }

    /// Number of standing defense towers.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn defense_count(&self) -> u32 {
        self.defenses.len() as u32
    }

    /// A player is defeated once workers, soldiers, and defenses are all
    /// gone. Houses alone do not keep a player in the match.
    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.workers == 0 && self.soldiers == 0 && self.defenses.is_empty()
    }

    /// Mark the player eliminated and zero all remaining assets.
    pub fn eliminate(&mut self) {
        self.alive = false;
        self.workers = 0;
        self.soldiers = 0;
        self.houses = 0;
        self.defenses.clear();
        self.attack_pct = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::economy::{BASE_WORKERS_PER_STEP, HOUSE_WORKER_BONUS};

    #[test]
    fn test_starting_resources() {
        let p = PlayerState::new("left");
        assert_eq!(p.workers, STARTING_WORKERS);
        assert_eq!(p.soldiers, 0);
        assert_eq!(p.houses, 0);
        assert!(p.defenses.is_empty());
        assert!((p.attack_pct - 0.0).abs() < f64::EPSILON);
        assert!(p.alive);
    }

    #[test]
    fn test_spawn_workers_formula() {
        let mut p = PlayerState::new("p");
        p.workers = 20;
        p.houses = 2;

        // 10 + 2*3 + floor(20 * 0.05) = 17
        let gain = p.spawn_workers();
        assert_eq!(gain, BASE_WORKERS_PER_STEP + 2 * HOUSE_WORKER_BONUS + 1);
        assert_eq!(p.workers, 37);
    }

    #[test]
    fn test_add_defenses_full_health() {
        let mut p = PlayerState::new("p");
        p.add_defenses(3);
        assert_eq!(p.defenses, vec![DEFENSE_HEALTH; 3]);
        assert_eq!(p.defense_count(), 3);
    }

    #[test]
    fn test_pop_attackers_caps_at_garrison() {
        let mut p = PlayerState::new("p");
        p.soldiers = 5;
        assert_eq!(p.pop_attackers(8), 5);
        assert_eq!(p.soldiers, 0);

        p.soldiers = 5;
        assert_eq!(p.pop_attackers(3), 3);
        assert_eq!(p.soldiers, 2);
    }

    #[test]
    fn test_defeated_ignores_houses() {
        let mut p = PlayerState::new("p");
        p.workers = 0;
        p.houses = 7;
        assert!(p.is_defeated());

        p.defenses.push(1);
        assert!(!p.is_defeated());
    }

    #[test]
    fn test_eliminate_zeroes_everything() {
        let mut p = PlayerState::new("p");
        p.soldiers = 4;
        p.houses = 2;
        p.add_defenses(1);
        p.attack_pct = 0.5;

        p.eliminate();
        assert!(!p.alive);
        assert_eq!(p.workers, 0);
        assert_eq!(p.soldiers, 0);
        assert_eq!(p.houses, 0);
        assert!(p.defenses.is_empty());
    }
}
