//! Match state machine for T3
//!
//! A `Match` wraps a board, the local player's side and an optional bot
//! opponent. Every accepted action ends by notifying a `MatchObserver`
//! exactly once, either with the new status or with the final result.

pub mod game;
pub mod observer;
pub mod policy;

pub use game::{ActionOutcome, IgnoreReason, Match, MatchId};
pub use observer::{Hooks, MatchEvent, MatchObserver};
pub use policy::{FirstEmptyPolicy, Policy};
