//! Action representation: who plays which card, and what they do with it.
//!
//! Every turn plays exactly one card from the acting player's hand. The
//! `ActionKind` says what happens to it:
//! - `Trail` = lay it on the table, no selection
//! - `Capture` = take the selected table items
//! - `Build` = combine it with the selected items into a build
//! - `Pair` = group it with selected cards of the same rank
//!
//! Selections name table items by `ItemId`, never by value.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::entity::ItemId;
use super::player::PlayerId;
use crate::cards::Card;

/// Table items chosen for an action.
///
/// SmallVec keeps the common case (1-4 items) off the heap.
pub type Selection = SmallVec<[ItemId; 4]>;

/// What the played card does.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Trail,
    Capture(Selection),
    Build(Selection),
    Pair(Selection),
}

/// A complete turn action.
///
/// ## Example
///
/// ```
/// use omlongo::core::{Action, ActionKind, ItemId, PlayerId};
///
/// let seven = "7S".parse().unwrap();
/// let trail = Action::trail(PlayerId::ONE, seven);
/// assert!(trail.selection().is_empty());
///
/// let capture = Action::capture(PlayerId::ONE, seven, &[ItemId(0), ItemId(3)]);
/// assert_eq!(capture.selection(), &[ItemId(0), ItemId(3)]);
/// assert!(matches!(capture.kind, ActionKind::Capture(_)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    /// The player taking the turn.
    pub player: PlayerId,
    /// The card played from their hand.
    pub card: Card,
    pub kind: ActionKind,
}

impl Action {
    #[must_use]
    pub fn trail(player: PlayerId, card: Card) -> Self {
        Self {
            player,
            card,
            kind: ActionKind::Trail,
        }
    }

    #[must_use]
    pub fn capture(player: PlayerId, card: Card, items: &[ItemId]) -> Self {
        Self {
            player,
            card,
            kind: ActionKind::Capture(SmallVec::from_slice(items)),
        }
    }

    #[must_use]
    pub fn build(player: PlayerId, card: Card, items: &[ItemId]) -> Self {
        Self {
            player,
            card,
            kind: ActionKind::Build(SmallVec::from_slice(items)),
        }
    }

    #[must_use]
    pub fn pair(player: PlayerId, card: Card, items: &[ItemId]) -> Self {
        Self {
            player,
            card,
            kind: ActionKind::Pair(SmallVec::from_slice(items)),
        }
    }

    /// Selected table items (empty for a trail).
    #[must_use]
    pub fn selection(&self) -> &[ItemId] {
        match &self.kind {
            ActionKind::Trail => &[],
            ActionKind::Capture(items) | ActionKind::Build(items) | ActionKind::Pair(items) => items,
        }
    }

    /// Lower-case name of the action, for logs.
    #[must_use]
    pub fn verb(&self) -> &'static str {
        match self.kind {
            ActionKind::Trail => "trail",
            ActionKind::Capture(_) => "capture",
            ActionKind::Build(_) => "build",
            ActionKind::Pair(_) => "pair",
        }
    }
}

/// An accepted action with its place in the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player: PlayerId,
    pub action: Action,
    /// Deal number the action was taken in (starts at 1).
    pub round: u32,
    /// Position in the whole game (0-based).
    pub sequence: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(action: Action, round: u32, sequence: u32) -> Self {
        Self {
            player: action.player,
            action,
            round,
            sequence,
        }
    }
}
