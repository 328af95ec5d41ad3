//! Omlongo rules.
//!
//! The validators (`capture`, `build`, `pair`) and `scoring` are pure
//! functions of their inputs. `turn` and `round` drive a `GameState` from
//! snapshot to snapshot, and `engine` puts everything behind `RulesEngine`.

pub mod build;
pub mod capture;
pub mod engine;
pub mod pair;
pub mod round;
pub mod scoring;
pub mod turn;

pub use build::{construct_build, validate_build, BuildPlan};
pub use capture::{
    captured_cards, enumerate_capture_options, partition_selection, validate_selection, CaptureSet,
};
pub use engine::{GameResult, OmlongoRules, RulesEngine, TurnResult, MAX_BUILD_SELECTION};
pub use pair::{construct_pair, validate_pair};
pub use round::{advance_round, apply_scheduled, deal_initial};
pub use scoring::{score_piles, tally, ScoreBreakdown};
pub use turn::{apply_action, check_trail, Deferred, Scheduled, Transition};
