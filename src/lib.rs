// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Skirmish: a deterministic step engine for bot battles.
//!
//! Untrusted decision functions compete in a turn-based resource and
//! military game. The engine is designed for:
//! - Bit-exact deterministic execution
//! - Strict sanitization of every bot request
//! - Panic isolation, so a broken bot loses instead of crashing the match
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │       Tournament / Arena            │
//! ├─────────────────────────────────────┤
//! │          Step Engine                │
//! ├─────────────────────────────────────┤
//! │   Bot boundary (views, faults)      │
//! └─────────────────────────────────────┘
//! ```

pub mod arena;
pub mod bot;
pub mod bots;
pub mod error;
pub mod game;
pub mod replay;

pub use arena::{MatchConfig, MatchOutcome, run_match};
pub use bot::{Bot, BotView, FnBot};
pub use error::{BotFault, MatchError};

// Re-export key game types at crate root for convenience
pub use game::{GameState, PlayerState, ScoringWeights};
pub use game::action::{ActionRequest, SanitizedAction};
