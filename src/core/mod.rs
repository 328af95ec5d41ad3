//! Core engine types: item ids, players, RNG, configuration, actions,
//! errors and state.
//!
//! Nothing in here knows the capture, build or pair rules; those live in
//! `rules` and operate on these types.

pub mod action;
pub mod config;
pub mod entity;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, ActionKind, ActionRecord, Selection};
pub use config::{GameConfig, ScoringConfig};
pub use entity::ItemId;
pub use error::{ActionError, InvariantViolation, RuleViolation};
pub use player::{PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::GameRng;
pub use state::{GameState, GameStateBuilder, Phase};
