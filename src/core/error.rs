//! Error types.
//!
//! Two classes:
//! - `RuleViolation`: an expected, recoverable refusal. The `Display` text
//!   is the message shown to the player. State is left untouched.
//! - `InvariantViolation`: a defect in the caller or the engine (for
//!   example a selection naming an item that is not on the table). Logged
//!   and aborted, never partially applied.

use thiserror::Error;

use super::{ItemId, PlayerId};
use crate::cards::{Card, Rank};
use crate::core::state::Phase;

/// A proposed action breaks a game rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("Action not allowed while the game is {0}")]
    WrongPhase(Phase),

    #[error("It is {0}'s turn")]
    NotYourTurn(PlayerId),

    #[error("{0} has already played this turn")]
    AlreadyPlayed(PlayerId),

    #[error("{card} is not in {player}'s hand")]
    CardNotInHand { card: Card, player: PlayerId },

    #[error("Select at least one item from the table")]
    EmptySelection,

    #[error("The same table item was selected more than once")]
    DuplicateSelection,

    #[error("Invalid capture selection")]
    InvalidCapture,

    #[error("Face cards cannot be used in builds")]
    FaceCardInBuild,

    #[error("Cannot modify or add to compound builds or pairs")]
    LockedItem,

    #[error("You must hold a card matching the build value ({0}) in your hand")]
    NoCaptureCardForBuild(u8),

    #[error("Cannot modify multiple builds at once")]
    MultipleBuilds,

    #[error("Can only pair with individual cards on the table")]
    PairWithNonCard,

    #[error("All selected table cards must be rank {0} to pair")]
    PairRankMismatch(Rank),

    #[error("You must hold another {0} in hand to make this pair")]
    NoCardForPair(Rank),

    #[error("You control a build of {0} and must act on it before trailing")]
    MustActOnBuild(u8),

    #[error("Cannot trail your last card able to capture your build of {0}")]
    LastCapturingCard(u8),
}

/// Engine or caller bookkeeping is inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("table item {0} is not on the table")]
    MissingItem(ItemId),

    #[error("scheduled transition does not apply in phase {0}")]
    UnexpectedPhase(Phase),
}

/// Why an action was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error(transparent)]
    Rule(#[from] RuleViolation),

    #[error("internal error: {0}")]
    Invariant(#[from] InvariantViolation),
}

impl ActionError {
    /// True for ordinary rule refusals.
    #[must_use]
    pub fn is_rule_violation(&self) -> bool {
        matches!(self, ActionError::Rule(_))
    }
}
