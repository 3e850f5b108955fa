//! The decision-function boundary.
//!
//! Bots see a read-only [`BotView`] snapshot once per step and answer with a
//! raw [`ActionRequest`]. The engine never trusts that answer: requests are
//! sanitized, and a panicking bot is caught here and surfaced as a
//! [`BotFault`] instead of tearing down the match.

use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::error::BotFault;
use crate::game::PlayerState;
use crate::game::action::ActionRequest;
use crate::game::economy::{
    BASE_WORKERS_PER_STEP, DEFENSE_COST, HOUSE_COST, HOUSE_WORKER_BONUS,
};

/// One player's resources as shown to decision functions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceView {
    /// Worker count.
    pub workers: u32,
    /// Garrisoned soldier count.
    pub soldiers: u32,
    /// House count.
    pub houses: u32,
    /// Standing tower count (HP is not exposed).
    pub defenses: u32,
    /// Persisted attack intensity.
    pub attack_pct: f64,
}

impl From<&PlayerState> for ResourceView {
    fn from(p: &PlayerState) -> Self {
        Self {
            workers: p.workers,
            soldiers: p.soldiers,
            houses: p.houses,
            defenses: p.defense_count(),
            attack_pct: p.attack_pct,
        }
    }
}

/// Fixed economy rates, for bots that plan around income.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EconomyRates {
    /// Flat worker income per step.
    pub base_workers_per_step: u32,
    /// Extra workers per house per step.
    pub house_worker_bonus: u32,
}

/// Fixed build costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildCosts {
    /// Worker cost of one house.
    pub house: u32,
    /// Worker cost of one defense tower.
    pub defense: u32,
}

/// Read-only snapshot handed to a decision function each step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BotView {
    /// Current step number (first step is 1).
    pub step: u32,
    /// The deciding player's own resources.
    pub me: ResourceView,
    /// One reference opponent's resources.
    pub opp: ResourceView,
    /// Economy constants.
    pub economy: EconomyRates,
    /// Cost constants.
    pub costs: BuildCosts,
}

impl BotView {
    /// Build a snapshot for `me` with `opp` as the reference opponent.
    #[must_use]
    pub fn new(step: u32, me: &PlayerState, opp: &PlayerState) -> Self {
        Self {
            step,
            me: me.into(),
            opp: opp.into(),
            economy: EconomyRates {
                base_workers_per_step: BASE_WORKERS_PER_STEP,
                house_worker_bonus: HOUSE_WORKER_BONUS,
            },
            costs: BuildCosts {
                house: HOUSE_COST,
                defense: DEFENSE_COST,
            },
        }
    }
}

/// A participant's decision function.
///
/// `act` is called once per step while the player lives. It must not block;
/// the engine invokes bots sequentially in fixed player order. Bots may keep
/// internal state between steps but can never touch engine state.
pub trait Bot {
    /// Display name, used for reporting.
    fn name(&self) -> &str;

    /// Decide this step's action from the snapshot.
    fn act(&mut self, view: &BotView) -> ActionRequest;
}

/// Adapter turning a closure into a [`Bot`].
pub struct FnBot<F> {
    name: String,
    func: F,
}

impl<F> std::fmt::Debug for FnBot<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnBot").field("name", &self.name).finish_non_exhaustive()
    }
}

impl<F> FnBot<F>
where
    F: FnMut(&BotView) -> ActionRequest,
{
    /// Wrap a closure as a named bot.
    #[must_use]
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> Bot for FnBot<F>
where
    F: FnMut(&BotView) -> ActionRequest,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn act(&mut self, view: &BotView) -> ActionRequest {
        (self.func)(view)
    }
}

/// Invoke a bot, converting a panic into a [`BotFault`].
///
/// # Errors
///
/// Returns a fault carrying the player name, step number, and panic message
/// when the decision function panics. The caller treats a fault as an empty
/// request.
pub fn invoke_bot(bot: &mut dyn Bot, view: &BotView) -> Result<ActionRequest, BotFault> {
    let player = bot.name().to_string();
    catch_unwind(AssertUnwindSafe(|| bot.act(view))).map_err(|payload| BotFault {
        player,
        step: view.step,
        message: panic_message(payload.as_ref()),
    })
}

/// Extract a printable message from a panic payload.
fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
