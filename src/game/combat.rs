//! Simultaneous combat resolution.
//!
//! Each attacker deals exactly 1 point of damage and is spent. Damage is
//! applied in a fixed order: defense towers (in build order) first, then
//! soldiers 1:1, then workers 1:1. Attackers left over once a defender's
//! pools are exhausted are discarded; leftover capacity is never reassigned
//! to another target.

use serde::{Deserialize, Serialize};

use crate::game::PlayerState;

/// Attackers dispatched from one player toward one target in a single step.
///
/// Packets are formed at send time and consumed entirely during resolution;
/// no attacker survives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackPacket {
    /// Sending player index.
    pub from: usize,
    /// Target player index.
    pub to: usize,
    /// Attacker count.
    pub count: u32,
}

/// Losses a defender took from one step's incoming attackers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Casualties {
    /// Towers reduced to zero HP and removed.
    pub destroyed_defenses: u32,
    /// Total tower HP consumed.
    pub defense_damage: u32,
    /// Soldiers killed.
    pub killed_soldiers: u32,
    /// Workers killed.
    pub killed_workers: u32,
}

/// Resolve `attackers` against a defender, mutating its pools.
///
/// Towers soak damage first, in list order; a tower hitting zero HP is
/// removed immediately and the next tower absorbs any remaining attackers.
/// Surviving attackers then kill soldiers 1:1, then workers 1:1. Whatever
/// is left after that is discarded.
pub fn resolve_attack(mut attackers: u32, defender: &mut PlayerState) -> Casualties {
    let mut result = Casualties::default();

    let mut i = 0;
    while attackers > 0 && i < defender.defenses.len() {
        let hit = attackers.min(defender.defenses[i]);
        defender.defenses[i] -= hit;
        attackers -= hit;
        result.defense_damage += hit;

        if defender.defenses[i] == 0 {
            defender.defenses.remove(i);
            result.destroyed_defenses += 1;
            // next tower is now at index i
        } else {
            i += 1;
        }
    }

    if attackers > 0 && defender.soldiers > 0 {
        let take = defender.soldiers.min(attackers);
        defender.soldiers -= take;
        attackers -= take;
        result.killed_soldiers = take;
    }

    if attackers > 0 && defender.workers > 0 {
        let take = defender.workers.min(attackers);
        defender.workers -= take;
        result.killed_workers = take;
    }

    result
}

/// Number of attackers dispatched for an attack at `pct` intensity:
/// `floor(soldiers * pct)`, truncated and capped at the garrison size.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn attackers_from_pct(soldiers: u32, pct: f64) -> u32 {
    let send = (f64::from(soldiers) * pct.clamp(0.0, 1.0)) as u32;
    send.min(soldiers)
}

/// Divide `total` attackers evenly across `targets` slots: each gets
/// `total / targets`, with the remainder handed out one extra each to the
/// first `total % targets` slots in index order. An empty target list
/// yields an empty split.
#[must_use]
pub fn split_evenly(total: u32, targets: usize) -> Vec<u32> {
    if targets == 0 {
        return Vec::new();
    }

    #[allow(clippy::cast_possible_truncation)]
    let n = targets as u32;
    let base = total / n;
    let rem = (total % n) as usize;

    (0..targets).map(|i| base + u32::from(i < rem)).collect()
}
