//! Action sanitization.
//!
//! Bots emit loosely-typed [`ActionRequest`]s; the engine acts only on the
//! tagged [`SanitizedAction`] produced here. Exactly one action executes per
//! player per step, chosen by a fixed priority, with every amount clamped to
//! what the player can afford.

use serde::{Deserialize, Serialize};

use crate::game::economy::{DEFENSE_COST, HOUSE_COST};

/// Raw, untrusted action request from a decision function.
///
/// Any subset of fields may be present; values may be fractional, negative,
/// or non-finite. This type exists only at the bot boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ActionRequest {
    /// Workers to convert into soldiers.
    pub convert: Option<f64>,
    /// Houses to build.
    pub build_houses: Option<f64>,
    /// Defense towers to build.
    pub build_defenses: Option<f64>,
    /// New attack intensity in `[0, 1]`.
    pub attack_pct: Option<f64>,
}

impl ActionRequest {
    /// A request with no fields, equivalent to "do nothing".
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            convert: None,
            build_houses: None,
            build_defenses: None,
            attack_pct: None,
        }
    }
}

/// The single validated action the engine executes for a player in a step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SanitizedAction {
    /// Convert this many workers into soldiers (1:1).
    Convert(u32),
    /// Build this many houses.
    BuildHouses(u32),
    /// Build this many defense towers.
    BuildDefenses(u32),
    /// Set the attack intensity and dispatch attackers this step.
    Attack(f64),
    /// No action this step.
    Wait,
}

/// Coerce a raw count: non-finite or negative becomes 0, fractional values
/// are truncated.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_count(raw: Option<f64>) -> u32 {
    match raw {
        Some(v) if v.is_finite() && v > 0.0 => v as u32,
        _ => 0,
    }
}

/// Coerce a raw fraction into `[0, 1]`, falling back to `default` when the
/// value is not a finite number.
fn to_fraction(raw: f64, default: f64) -> f64 {
    if raw.is_finite() { raw.clamp(0.0, 1.0) } else { default }
}

/// Validate and clamp a raw request against the player's current resources.
///
/// Priority: convert > build houses > build defenses > attack > wait. The
/// first field with a positive requested amount wins; the rest are ignored
/// for this step. An attack fires only when the request explicitly carried
/// an `attack_pct` field and the clamped percentage is positive; a persisted
/// nonzero percentage alone never re-triggers an attack.
#[must_use]
pub fn sanitize(
    request: &ActionRequest,
    prev_attack_pct: f64,
    workers_available: u32,
) -> SanitizedAction {
    let convert = to_count(request.convert);
    if convert > 0 {
        return SanitizedAction::Convert(convert.min(workers_available));
    }

    let houses = to_count(request.build_houses);
    if houses > 0 {
        return SanitizedAction::BuildHouses(houses.min(workers_available / HOUSE_COST));
    }

    let defenses = to_count(request.build_defenses);
    if defenses > 0 {
        return SanitizedAction::BuildDefenses(defenses.min(workers_available / DEFENSE_COST));
    }

    if let Some(raw) = request.attack_pct {
        let pct = to_fraction(raw, prev_attack_pct);
        if pct > 0.0 {
            return SanitizedAction::Attack(pct);
        }
    }

    SanitizedAction::Wait
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ActionRequest {
        ActionRequest::empty()
    }

    #[test]
    fn test_empty_request_waits() {
        assert_eq!(sanitize(&request(), 0.0, 100), SanitizedAction::Wait);
    }

    #[test]
    fn test_convert_clamped_to_workers() {
        let req = ActionRequest {
            convert: Some(50.0),
            ..request()
        };
        assert_eq!(sanitize(&req, 0.0, 30), SanitizedAction::Convert(30));
    }

    #[test]
    fn test_priority_convert_beats_houses() {
        let req = ActionRequest {
            convert: Some(5.0),
            build_houses: Some(2.0),
            ..request()
        };
        assert_eq!(sanitize(&req, 0.0, 100), SanitizedAction::Convert(5));
    }

    #[test]
    fn test_priority_houses_beat_defenses_and_attack() {
        let req = ActionRequest {
            build_houses: Some(1.0),
            build_defenses: Some(3.0),
            attack_pct: Some(0.9),
            ..request()
        };
        assert_eq!(sanitize(&req, 0.0, 100), SanitizedAction::BuildHouses(1));
    }

    #[test]
    fn test_build_capped_by_cost() {
        let req = ActionRequest {
            build_houses: Some(10.0),
            ..request()
        };
        // 45 workers afford 2 houses at cost 20
        assert_eq!(sanitize(&req, 0.0, 45), SanitizedAction::BuildHouses(2));

        let req = ActionRequest {
            build_defenses: Some(10.0),
            ..request()
        };
        assert_eq!(sanitize(&req, 0.0, 19), SanitizedAction::BuildDefenses(0));
    }

    #[test]
    fn test_attack_requires_explicit_field() {
        // Persisted percentage alone never fires an attack.
        assert_eq!(sanitize(&request(), 0.5, 100), SanitizedAction::Wait);

        let req = ActionRequest {
            attack_pct: Some(0.5),
            ..request()
        };
        assert_eq!(sanitize(&req, 0.0, 100), SanitizedAction::Attack(0.5));
    }

    #[test]
    fn test_attack_clamped_to_unit_interval() {
        let req = ActionRequest {
            attack_pct: Some(100.0),
            ..request()
        };
        assert_eq!(sanitize(&req, 0.0, 0), SanitizedAction::Attack(1.0));

        let req = ActionRequest {
            attack_pct: Some(-3.0),
            ..request()
        };
        assert_eq!(sanitize(&req, 0.0, 0), SanitizedAction::Wait);
    }

    #[test]
    fn test_invalid_attack_falls_back_to_previous() {
        // A present-but-invalid field defaults to the persisted value, and
        // fires when that value is positive.
        let req = ActionRequest {
            attack_pct: Some(f64::NAN),
            ..request()
        };
        assert_eq!(sanitize(&req, 0.4, 100), SanitizedAction::Attack(0.4));
        assert_eq!(sanitize(&req, 0.0, 100), SanitizedAction::Wait);
    }

    #[test]
    fn test_garbage_counts_become_zero() {
        let req = ActionRequest {
            convert: Some(f64::NAN),
            build_houses: Some(-7.0),
            build_defenses: Some(f64::INFINITY),
            ..request()
        };
        assert_eq!(sanitize(&req, 0.0, 100), SanitizedAction::Wait);
    }

    #[test]
    fn test_fractional_counts_truncate() {
        let req = ActionRequest {
            convert: Some(4.9),
            ..request()
        };
        assert_eq!(sanitize(&req, 0.0, 100), SanitizedAction::Convert(4));
    }
}
