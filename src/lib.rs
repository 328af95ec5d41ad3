//! # omlongo
//!
//! Rules engine for Omlongo, a two-player card game of the Casino family.
//! Players take turns playing one card each from their hand to capture
//! table cards by rank or by sum, to combine cards into builds and pairs,
//! or to trail the card onto the table.
//!
//! ## Design Principles
//!
//! 1. **Snapshots, not mutation**: Every transition takes a `GameState` and
//!    returns a new one. A refused action leaves the caller's state as it
//!    was. O(1) cloning via `im`.
//!
//! 2. **Ids, not values**: Cards repeat values across the table, so table
//!    items are selected and removed by `ItemId`.
//!
//! 3. **No timers**: Cosmetic delays come back as `Scheduled` follow-ups
//!    guarded by the state revision. The host owns the clock.
//!
//! ## Modules
//!
//! - `core`: Item ids, players, state, actions, RNG, configuration, errors
//! - `cards`: Cards, ranks, value tables, the deck
//! - `table`: Table items and the id-keyed table
//! - `rules`: Capture, build and pair rules, turns, rounds, scoring, and
//!   the `RulesEngine` trait
//!
//! ## Example
//!
//! ```
//! use omlongo::{OmlongoRules, RulesEngine};
//!
//! let rules = OmlongoRules::default();
//! let state = rules.new_game(42);
//!
//! let action = rules.legal_actions(&state).remove(0);
//! let transition = rules.apply_action(&state, &action).unwrap();
//! assert_eq!(transition.state.history().len(), 1);
//! ```

pub mod cards;
pub mod core;
pub mod rules;
pub mod table;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionError, ActionKind, ActionRecord, GameConfig, GameState, ItemId, Phase, PlayerId,
    PlayerMap, RuleViolation, ScoringConfig,
};

pub use crate::cards::{Card, Rank, Suit};

pub use crate::table::{Table, TableItem, TableItemKind};

pub use crate::rules::{
    GameResult, OmlongoRules, RulesEngine, Scheduled, ScoreBreakdown, Transition, TurnResult,
};
