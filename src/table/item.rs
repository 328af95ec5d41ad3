//! Table items: loose cards, builds and pairs.
//!
//! `TableItemKind` is a closed sum type, so every rule that inspects the
//! table matches all three shapes exhaustively.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Card, Rank};
use crate::core::{ItemId, PlayerId};

/// Member cards of a build or pair.
pub type Members = SmallVec<[Card; 4]>;

/// A build: cards grouped under a single capture value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Build {
    /// Target value in build units (ace 1).
    pub value: u8,
    /// Member cards, the card that created or last extended the build first.
    pub cards: Members,
    /// Player who made the build and may capture it.
    pub controller: PlayerId,
    /// Compound builds are justified by more than one group of cards and can
    /// only be taken by an exact value match.
    pub compound: bool,
}

/// A pair: two or more cards of one rank grouped together.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pair {
    pub rank: Rank,
    pub cards: Members,
    pub controller: PlayerId,
}

/// Shape of a table item.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableItemKind {
    Card(Card),
    Build(Build),
    Pair(Pair),
}

/// An item on the table with its selection id.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableItem {
    pub id: ItemId,
    pub kind: TableItemKind,
}

impl TableItem {
    #[must_use]
    pub fn new(id: ItemId, kind: TableItemKind) -> Self {
        Self { id, kind }
    }

    /// Every physical card held by this item.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        match &self.kind {
            TableItemKind::Card(card) => std::slice::from_ref(card),
            TableItemKind::Build(build) => &build.cards,
            TableItemKind::Pair(pair) => &pair.cards,
        }
    }

    /// The loose card, if this is a card item.
    #[must_use]
    pub fn as_card(&self) -> Option<Card> {
        match &self.kind {
            TableItemKind::Card(card) => Some(*card),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_build(&self) -> Option<&Build> {
        match &self.kind {
            TableItemKind::Build(build) => Some(build),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_pair(&self) -> Option<&Pair> {
        match &self.kind {
            TableItemKind::Pair(pair) => Some(pair),
            _ => None,
        }
    }

    /// Controller of a build or pair. Loose cards belong to nobody.
    #[must_use]
    pub fn controller(&self) -> Option<PlayerId> {
        match &self.kind {
            TableItemKind::Card(_) => None,
            TableItemKind::Build(build) => Some(build.controller),
            TableItemKind::Pair(pair) => Some(pair.controller),
        }
    }

    /// Loose cards and pairs of `rank` are taken together by a rank match.
    #[must_use]
    pub fn matches_rank(&self, rank: Rank) -> bool {
        match &self.kind {
            TableItemKind::Card(card) => card.rank == rank,
            TableItemKind::Pair(pair) => pair.rank == rank,
            TableItemKind::Build(_) => false,
        }
    }

    /// Value this item contributes to a sum capture or a build.
    ///
    /// Non-face cards count their build value, simple builds their stored
    /// value. Face cards, pairs and compound builds never combine.
    #[must_use]
    pub fn combination_value(&self) -> Option<u8> {
        match &self.kind {
            TableItemKind::Card(card) => card.build_value(),
            TableItemKind::Build(build) if !build.compound => Some(build.value),
            TableItemKind::Build(_) | TableItemKind::Pair(_) => None,
        }
    }
}

impl std::fmt::Display for TableItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            TableItemKind::Card(card) => write!(f, "{card}"),
            TableItemKind::Build(build) => {
                let kind = if build.compound { "compound build" } else { "build" };
                write!(f, "{kind} of {} ({})", build.value, build.controller)
            }
            TableItemKind::Pair(pair) => write!(f, "pair of {}s ({})", pair.rank, pair.controller),
        }
    }
}
