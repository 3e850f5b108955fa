//! Built-in reference bots.
//!
//! A spread of simple strategies for testing the engine and giving new bot
//! authors something to beat. Each picks exactly one action per step.
//! `warlord` intentionally emits out-of-range values; the sanitizer is
//! expected to cope.

use crate::bot::{Bot, BotView, FnBot};
use crate::game::action::ActionRequest;

/// Names and one-line descriptions of every built-in bot.
pub const BUILTIN_BOTS: &[(&str, &str)] = &[
    ("greedy_rush", "converts everything above a floor, attacks at 50%"),
    ("boom_econ", "builds five houses before applying pressure"),
    ("turtle_defense", "fortifies first, trickles out small raids"),
    ("adaptive_match", "reacts to the opponent's army size"),
    ("warlord", "aggressive all-in with sloppy request values"),
];

/// Look up a built-in bot by name.
#[must_use]
pub fn builtin(name: &str) -> Option<Box<dyn Bot>> {
    match name {
        "greedy_rush" => Some(Box::new(FnBot::new(name, greedy_rush))),
        "boom_econ" => Some(Box::new(FnBot::new(name, boom_econ))),
        "turtle_defense" => Some(Box::new(FnBot::new(name, turtle_defense))),
        "adaptive_match" => Some(Box::new(FnBot::new(name, adaptive_match))),
        "warlord" => Some(Box::new(FnBot::new(name, warlord))),
        _ => None,
    }
}

/// Convert aggressively until an army exists, then attack at 50%.
fn greedy_rush(view: &BotView) -> ActionRequest {
    let me = &view.me;
    let spare = me.workers.saturating_sub(20);

    if me.soldiers > 0 {
        return ActionRequest {
            attack_pct: Some(0.5),
            ..ActionRequest::empty()
        };
    }
    if spare > 0 {
        return ActionRequest {
            convert: Some(f64::from(spare)),
            ..ActionRequest::empty()
        };
    }
    ActionRequest::empty()
}

/// Build an economy of five houses, then apply steady pressure.
fn boom_econ(view: &BotView) -> ActionRequest {
    let me = &view.me;
    if me.houses < 5 && me.workers >= view.costs.house {
        return ActionRequest {
            build_houses: Some(1.0),
            ..ActionRequest::empty()
        };
    }
    if view.step >= 8 && me.soldiers >= 10 {
        return ActionRequest {
            attack_pct: Some(0.35),
            ..ActionRequest::empty()
        };
    }
    ActionRequest {
        convert: Some(f64::from(me.workers / 2)),
        ..ActionRequest::empty()
    }
}

/// Four towers first, then small raids backed by trickle conversion.
fn turtle_defense(view: &BotView) -> ActionRequest {
    let me = &view.me;
    if me.defenses < 4 && me.workers >= view.costs.defense {
        return ActionRequest {
            build_defenses: Some(1.0),
            ..ActionRequest::empty()
        };
    }
    if me.soldiers >= 8 {
        return ActionRequest {
            attack_pct: Some(0.2),
            ..ActionRequest::empty()
        };
    }
    ActionRequest {
        convert: Some(f64::from(me.workers / 3)),
        ..ActionRequest::empty()
    }
}

/// React to the reference opponent: fortify when outgunned, press an edge.
fn adaptive_match(view: &BotView) -> ActionRequest {
    let (me, opp) = (&view.me, &view.opp);
    if f64::from(opp.soldiers) > f64::from(me.soldiers) * 1.3
        && me.workers >= view.costs.defense
    {
        return ActionRequest {
            build_defenses: Some(1.0),
            ..ActionRequest::empty()
        };
    }
    if me.houses < 3 && me.workers >= view.costs.house {
        return ActionRequest {
            build_houses: Some(1.0),
            ..ActionRequest::empty()
        };
    }
    if f64::from(me.soldiers) >= f64::from(opp.soldiers) * 1.1 && me.soldiers >= 6 {
        return ActionRequest {
            attack_pct: Some(0.45),
            ..ActionRequest::empty()
        };
    }
    ActionRequest {
        convert: Some(f64::from(me.workers.saturating_sub(10))),
        ..ActionRequest::empty()
    }
}

/// Population-counting all-in. Deliberately careless with its numbers:
/// percentages above 1 and fractional build counts exercise the clamps.
fn warlord(view: &BotView) -> ActionRequest {
    let (me, opp) = (&view.me, &view.opp);
    let my_pop = f64::from(me.soldiers + me.workers);
    let opp_pop = f64::from(opp.soldiers + opp.workers);

    if me.soldiers > opp.soldiers + opp.workers {
        return ActionRequest {
            attack_pct: Some(100.0),
            ..ActionRequest::empty()
        };
    }
    if my_pop > opp_pop * 1.5 {
        return ActionRequest {
            convert: Some(f64::from(me.workers) * 0.5),
            ..ActionRequest::empty()
        };
    }
    if f64::from(opp.soldiers) > my_pop {
        let difference = f64::from(opp.soldiers) - my_pop;
        return ActionRequest {
            build_defenses: Some(difference / 2.0 + 1.0),
            ..ActionRequest::empty()
        };
    }
    if me.soldiers > 200 {
        return ActionRequest {
            attack_pct: Some(100.0),
            ..ActionRequest::empty()
        };
    }
    if my_pop > f64::from(opp.soldiers) * 1.2 {
        return ActionRequest {
            build_houses: Some(f64::from(opp.soldiers) * (2.0 / 3.0) / 20.0),
            ..ActionRequest::empty()
        };
    }
    ActionRequest {
        convert: Some(my_pop * 0.045),
        ..ActionRequest::empty()
    }
}
