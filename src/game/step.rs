//! Step resolution.
//!
//! One call to [`StepEngine::execute_step`] drives a full turn through the
//! phase sequence `PLANNING -> ACTION_RESOLUTION -> COMBAT ->
//! LIFECYCLE_CHECK`:
//!
//! - `PLANNING`: economy tick for every living player, then one decision
//!   per living player from its bot (panics caught, sanitized to exactly
//!   one action).
//! - `ACTION_RESOLUTION`: each sanitized action mutates only its own
//!   player; attackers leave the garrison here.
//! - `COMBAT`: attack packets are formed (split evenly across living
//!   targets in a multi-player match) and each defender is resolved exactly
//!   once against its pre-combat pools, so no outcome depends on another
//!   defender's outcome from the same step.
//! - `LIFECYCLE_CHECK`: defeated players are eliminated and zeroed.
//!
//! The engine is a pure function of its inputs: no randomness, no clocks.

use serde::{Deserialize, Serialize};

use crate::bot::{Bot, BotView, invoke_bot};
use crate::error::BotFault;
use crate::game::action::{ActionRequest, SanitizedAction, sanitize};
use crate::game::combat::{AttackPacket, Casualties, attackers_from_pct, resolve_attack, split_evenly};
use crate::game::economy::{DEFENSE_COST, HOUSE_COST};
use crate::game::invariants::assert_invariants;
use crate::game::{GameState, PlayerState};

/// One player's post-step resources, for reporting and rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// Player name.
    pub name: String,
    /// Worker count.
    pub workers: u32,
    /// Garrisoned soldier count.
    pub soldiers: u32,
    /// House count.
    pub houses: u32,
    /// Standing tower count.
    pub defenses: u32,
    /// Persisted attack intensity.
    pub attack_pct: f64,
    /// Whether the player is still in the match.
    pub alive: bool,
}

impl From<&PlayerState> for PlayerSnapshot {
    fn from(p: &PlayerState) -> Self {
        Self {
            name: p.name.clone(),
            workers: p.workers,
            soldiers: p.soldiers,
            houses: p.houses,
            defenses: p.defense_count(),
            attack_pct: p.attack_pct,
            alive: p.alive,
        }
    }
}

/// Everything a renderer or recording needs about one resolved step.
///
/// This is a one-way handoff: nothing in it feeds back into the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepReport {
    /// Step number (first step is 1).
    pub step: u32,
    /// The action each player executed, by index.
    pub actions: Vec<SanitizedAction>,
    /// Attackers each player dispatched, by index.
    pub sends: Vec<u32>,
    /// Attack packets formed this step.
    pub packets: Vec<AttackPacket>,
    /// Losses each player took, by index.
    pub casualties: Vec<Casualties>,
    /// Decision-function faults this step.
    pub faults: Vec<BotFault>,
    /// Players eliminated this step, by index.
    pub eliminated: Vec<usize>,
    /// Post-step resources, by index.
    pub players: Vec<PlayerSnapshot>,
}

/// Drives match state through one step at a time.
#[derive(Debug)]
pub struct StepEngine {
    state: GameState,
}

impl StepEngine {
    /// Create an engine over the given state.
    #[must_use]
    pub const fn new(state: GameState) -> Self {
        Self { state }
    }

    /// Current match state.
    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// Consume the engine, returning the final state.
    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Execute one full step. `bots` must be index-aligned with the
    /// players; dead players' bots are not invoked.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if a state invariant is violated afterwards,
    /// which indicates an engine bug.
    pub fn execute_step(&mut self, bots: &mut [Box<dyn Bot>]) -> StepReport {
        debug_assert_eq!(bots.len(), self.state.players.len());
        let step = self.state.step() + 1;

        let (actions, faults) = self.planning(step, bots);
        let sends = self.resolve_actions(&actions);
        let (packets, casualties) = self.combat(&sends);
        let eliminated = self.lifecycle_check();

        self.state.advance_step();
        assert_invariants(&self.state);

        StepReport {
            step,
            actions,
            sends,
            packets,
            casualties,
            faults,
            eliminated,
            players: self.state.players.iter().map(PlayerSnapshot::from).collect(),
        }
    }

    /// `PLANNING`: economy tick, then collect and sanitize one decision per
    /// living player. Dead players act as `Wait`.
    fn planning(
        &mut self,
        step: u32,
        bots: &mut [Box<dyn Bot>],
    ) -> (Vec<SanitizedAction>, Vec<BotFault>) {
        for player in &mut self.state.players {
            if player.alive {
                player.spawn_workers();
            }
        }

        let n = self.state.players.len();
        let mut actions = Vec::with_capacity(n);
        let mut faults = Vec::new();

        for i in 0..n {
            if !self.state.players[i].alive {
                actions.push(SanitizedAction::Wait);
                continue;
            }

            let opp = self.state.reference_opponent(i);
            let view = BotView::new(step, &self.state.players[i], &self.state.players[opp]);

            let request = match invoke_bot(bots[i].as_mut(), &view) {
                Ok(request) => request,
                Err(fault) => {
                    faults.push(fault);
                    ActionRequest::empty()
                }
            };

            let player = &self.state.players[i];
            actions.push(sanitize(&request, player.attack_pct, player.workers));
        }

        (actions, faults)
    }

    /// `ACTION_RESOLUTION`: apply each action to its own player. Returns
    /// the attacker count each player dispatched; those soldiers have
    /// already left the garrison.
    fn resolve_actions(&mut self, actions: &[SanitizedAction]) -> Vec<u32> {
        let mut sends = vec![0u32; actions.len()];

        for (i, action) in actions.iter().enumerate() {
            let player = &mut self.state.players[i];
            match *action {
                SanitizedAction::Convert(n) if n > 0 => {
                    player.workers = player.workers.saturating_sub(n);
                    player.soldiers = player.soldiers.saturating_add(n);
                }
                SanitizedAction::BuildHouses(n) if n > 0 => {
                    player.workers = player.workers.saturating_sub(n.saturating_mul(HOUSE_COST));
                    player.add_houses(n);
                }
                SanitizedAction::BuildDefenses(n) if n > 0 => {
                    player.workers = player.workers.saturating_sub(n.saturating_mul(DEFENSE_COST));
                    player.add_defenses(n);
                }
                SanitizedAction::Attack(pct) => {
                    player.attack_pct = pct;
                    let requested = attackers_from_pct(player.soldiers, pct);
                    sends[i] = player.pop_attackers(requested);
                }
                _ => {}
            }
        }

        sends
    }

    /// `COMBAT`: split each sender's attackers across all other living
    /// players, sum incoming per defender, and resolve each defender once.
    ///
    /// Defender pools are whatever ACTION_RESOLUTION left behind; combat
    /// itself mutates each defender exactly once, which keeps resolution
    /// logically simultaneous regardless of iteration order.
    fn combat(&mut self, sends: &[u32]) -> (Vec<AttackPacket>, Vec<Casualties>) {
        let n = self.state.players.len();
        let mut packets = Vec::new();
        let mut incoming = vec![0u32; n];

        for (i, &send) in sends.iter().enumerate() {
            if send == 0 {
                continue;
            }

            // A sender with no living target simply loses the order.
            let targets: Vec<usize> = (0..n)
                .filter(|&j| j != i && self.state.players[j].alive)
                .collect();

            for (&to, count) in targets.iter().zip(split_evenly(send, targets.len())) {
                if count > 0 {
                    packets.push(AttackPacket { from: i, to, count });
                    incoming[to] += count;
                }
            }
        }

        let casualties = self
            .state
            .players
            .iter_mut()
            .zip(&incoming)
            .map(|(player, &count)| {
                if count > 0 && player.alive {
                    resolve_attack(count, player)
                } else {
                    Casualties::default()
                }
            })
            .collect();

        (packets, casualties)
    }

    /// `LIFECYCLE_CHECK`: eliminate every living player whose workers,
    /// soldiers, and defenses are all gone.
    fn lifecycle_check(&mut self) -> Vec<usize> {
        let mut eliminated = Vec::new();
        for (i, player) in self.state.players.iter_mut().enumerate() {
            if player.alive && player.is_defeated() {
                player.eliminate();
                eliminated.push(i);
            }
        }
        eliminated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::FnBot;
    use crate::game::economy::STARTING_WORKERS;

    fn boxed(bot: impl Bot + 'static) -> Box<dyn Bot> {
        Box::new(bot)
    }

    fn idle() -> Box<dyn Bot> {
        boxed(FnBot::new("idle", |_: &BotView| ActionRequest::empty()))
    }

    fn engine(names: &[&str]) -> StepEngine {
        let players = names.iter().map(|n| PlayerState::new(*n)).collect();
        StepEngine::new(GameState::new(players, 200))
    }

    #[test]
    fn test_economy_runs_before_decisions() {
        // The bot must see the post-income worker count.
        let seen = std::sync::Arc::new(std::sync::Mutex::new(0u32));
        let seen_clone = std::sync::Arc::clone(&seen);

        let mut bots = vec![
            boxed(FnBot::new("probe", move |view: &BotView| {
                *seen_clone.lock().expect("lock") = view.me.workers;
                ActionRequest::empty()
            })),
            idle(),
        ];

        let mut engine = engine(&["probe", "idle"]);
        engine.execute_step(&mut bots);

        // 20 + 10 + floor(20*0.05) = 31
        assert_eq!(*seen.lock().expect("lock"), STARTING_WORKERS + 11);
    }

    #[test]
    fn test_convert_moves_workers_to_soldiers() {
        let mut bots = vec![
            boxed(FnBot::new("conv", |_: &BotView| ActionRequest {
                convert: Some(11.0),
                ..ActionRequest::empty()
            })),
            idle(),
        ];

        let mut engine = engine(&["conv", "idle"]);
        let report = engine.execute_step(&mut bots);

        assert_eq!(report.actions[0], SanitizedAction::Convert(11));
        assert_eq!(engine.state().players[0].workers, 20);
        assert_eq!(engine.state().players[0].soldiers, 11);
    }

    #[test]
    fn test_attack_sends_floor_of_pct() {
        let mut bots = vec![
            boxed(FnBot::new("att", |_: &BotView| ActionRequest {
                attack_pct: Some(0.5),
                ..ActionRequest::empty()
            })),
            idle(),
        ];

        let mut engine = engine(&["att", "idle"]);
        engine.state.players[0].soldiers = 11;

        let report = engine.execute_step(&mut bots);
        assert_eq!(report.sends[0], 5);
        assert_eq!(engine.state().players[0].soldiers, 6);
        assert_eq!(
            report.packets,
            vec![AttackPacket { from: 0, to: 1, count: 5 }]
        );
    }

    #[test]
    fn test_faulty_bot_waits_and_match_continues() {
        let mut bots = vec![
            boxed(FnBot::new("crasher", |_: &BotView| -> ActionRequest {
                panic!("boom")
            })),
            idle(),
        ];

        let mut engine = engine(&["crasher", "idle"]);
        let report = engine.execute_step(&mut bots);

        assert_eq!(report.faults.len(), 1);
        assert_eq!(report.faults[0].player, "crasher");
        assert_eq!(report.actions[0], SanitizedAction::Wait);
        // Economy still applied.
        assert_eq!(engine.state().players[0].workers, 31);
    }

    #[test]
    fn test_dead_player_skipped_entirely() {
        let mut bots = vec![
            idle(),
            boxed(FnBot::new("ghost", |_: &BotView| -> ActionRequest {
                panic!("must never be invoked")
            })),
        ];

        let mut engine = engine(&["idle", "ghost"]);
        engine.state.players[1].eliminate();

        let report = engine.execute_step(&mut bots);
        assert!(report.faults.is_empty());
        assert_eq!(report.actions[1], SanitizedAction::Wait);
        assert_eq!(engine.state().players[1].workers, 0);
    }

    #[test]
    fn test_multiplayer_split_in_index_order() {
        let mut bots = vec![
            boxed(FnBot::new("att", |_: &BotView| ActionRequest {
                attack_pct: Some(1.0),
                ..ActionRequest::empty()
            })),
            idle(),
            idle(),
            idle(),
        ];

        let mut engine = engine(&["att", "b", "c", "d"]);
        engine.state.players[0].soldiers = 10;

        let report = engine.execute_step(&mut bots);
        assert_eq!(report.sends[0], 10);
        assert_eq!(
            report.packets,
            vec![
                AttackPacket { from: 0, to: 1, count: 4 },
                AttackPacket { from: 0, to: 2, count: 3 },
                AttackPacket { from: 0, to: 3, count: 3 },
            ]
        );
    }

    #[test]
    fn test_combat_uses_precombat_pools() {
        // Both sides attack with their full garrison; each defender's losses
        // are computed against the garrison that remained after its own send,
        // not after the opponent's combat outcome.
        let full_attack = |name: &str| {
            boxed(FnBot::new(name.to_string(), |_: &BotView| ActionRequest {
                attack_pct: Some(1.0),
                ..ActionRequest::empty()
            }))
        };
        let mut bots = vec![full_attack("l"), full_attack("r")];

        let mut engine = engine(&["l", "r"]);
        engine.state.players[0].soldiers = 10;
        engine.state.players[0].workers = 3;
        engine.state.players[1].soldiers = 4;
        engine.state.players[1].workers = 50;

        let report = engine.execute_step(&mut bots);

        // Left sent all 10, leaving 0 soldiers; right's 4 attackers hit
        // left's post-send garrison of 0 soldiers and then its workers.
        assert_eq!(report.casualties[0].killed_soldiers, 0);
        assert_eq!(report.casualties[0].killed_workers, 4);
        // Right sent all 4; left's 10 attackers kill 10 of right's workers.
        assert_eq!(report.casualties[1].killed_soldiers, 0);
        assert_eq!(report.casualties[1].killed_workers, 10);
    }

    #[test]
    fn test_elimination_zeroes_houses() {
        // Houses alone keep nobody in the match: once the step's income is
        // wiped out, the player falls despite owning five of them.
        let mut bots = vec![
            idle(),
            boxed(FnBot::new("att", |_: &BotView| ActionRequest {
                attack_pct: Some(1.0),
                ..ActionRequest::empty()
            })),
        ];

        let mut engine = engine(&["doomed", "att"]);
        {
            let p = &mut engine.state.players[0];
            p.workers = 0;
            p.houses = 5;
        }
        engine.state.players[1].soldiers = 100;

        let report = engine.execute_step(&mut bots);
        assert_eq!(report.eliminated, vec![0]);
        assert!(!engine.state().players[0].alive);
        assert_eq!(engine.state().players[0].houses, 0);
    }

    #[test]
    fn test_no_living_target_drops_attack() {
        let mut bots = vec![
            boxed(FnBot::new("att", |_: &BotView| ActionRequest {
                attack_pct: Some(1.0),
                ..ActionRequest::empty()
            })),
            idle(),
        ];

        let mut engine = engine(&["att", "dead"]);
        engine.state.players[0].soldiers = 8;
        engine.state.players[1].eliminate();

        let report = engine.execute_step(&mut bots);
        // Soldiers left the garrison but the packet had nowhere to go.
        assert_eq!(report.sends[0], 8);
        assert!(report.packets.is_empty());
    }
}
