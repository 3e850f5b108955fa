//! Game rules for Skirmish.
//!
//! Implements the simulation underneath the arena:
//! - Players with workers, soldiers, houses, and defense towers
//! - Economy (worker spawning, conversion, construction)
//! - Action sanitization
//! - Combat resolution
//! - The per-step pipeline tying them together

pub mod action;
pub mod combat;
pub mod economy;
pub mod invariants;
mod player;
mod state;
pub mod step;

pub use player::PlayerState;
pub use state::{GameState, MAX_PLAYERS, MIN_PLAYERS, ScoringWeights};
