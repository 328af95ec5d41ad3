//! The shared table: an id-keyed arena of table items.
//!
//! The `Table` tracks what lies face-up between the players and hands out
//! fresh `ItemId`s. It supports:
//! - Placing loose cards, builds and pairs
//! - Lookup and all-or-nothing removal by id
//! - Flattening everything into plain cards at game end
//!
//! Items live in an `im::Vector`, so cloning a table for a new state
//! snapshot is O(1).

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::error;

use super::item::{TableItem, TableItemKind};
use crate::cards::Card;
use crate::core::{InvariantViolation, ItemId, PlayerId};

/// Items on the table, in the order they were placed.
///
/// ## Usage
///
/// ```
/// use omlongo::table::Table;
///
/// let mut table = Table::new();
/// let seven = table.place_card("7S".parse().unwrap());
/// let three = table.place_card("3D".parse().unwrap());
///
/// let removed = table.remove(&[seven]).unwrap();
/// assert_eq!(removed.len(), 1);
/// assert!(table.contains(three));
/// assert!(!table.contains(seven));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    items: Vector<TableItem>,
    next_id: ItemId,
}

impl Table {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over items in placement order.
    pub fn iter(&self) -> impl Iterator<Item = &TableItem> {
        self.items.iter()
    }

    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&TableItem> {
        self.items.iter().find(|item| item.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: ItemId) -> bool {
        self.get(id).is_some()
    }

    /// Allocate an id and place an item at the end of the table.
    pub fn place(&mut self, kind: TableItemKind) -> ItemId {
        let id = self.next_id;
        self.next_id = id.next();
        self.items.push_back(TableItem::new(id, kind));
        id
    }

    /// Place a loose card.
    pub fn place_card(&mut self, card: Card) -> ItemId {
        self.place(TableItemKind::Card(card))
    }

    /// Look up every id in `ids`.
    ///
    /// Fails on the first id that is not on the table.
    pub fn resolve(&self, ids: &[ItemId]) -> Result<Vec<&TableItem>, InvariantViolation> {
        ids.iter()
            .map(|&id| {
                self.get(id).ok_or_else(|| {
                    error!(item = %id, "selected item is not on the table");
                    InvariantViolation::MissingItem(id)
                })
            })
            .collect()
    }

    /// Remove every id in `ids` and return the removed items.
    ///
    /// All ids are checked before anything is removed, so a failure leaves
    /// the table unchanged.
    pub fn remove(&mut self, ids: &[ItemId]) -> Result<Vec<TableItem>, InvariantViolation> {
        self.resolve(ids)?;

        let (removed, kept): (Vector<TableItem>, Vector<TableItem>) =
            self.items.iter().cloned().partition(|item| ids.contains(&item.id));
        self.items = kept;
        Ok(removed.into_iter().collect())
    }

    /// Builds on the table controlled by `player`.
    pub fn builds_controlled_by(&self, player: PlayerId) -> impl Iterator<Item = &TableItem> {
        self.items
            .iter()
            .filter(move |item| matches!(&item.kind, TableItemKind::Build(b) if b.controller == player))
    }

    /// Number of physical cards on the table.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.items.iter().map(|item| item.cards().len()).sum()
    }

    /// Empty the table, expanding builds and pairs into their member cards.
    pub fn clear_into_cards(&mut self) -> Vec<Card> {
        let cards = self
            .items
            .iter()
            .flat_map(|item| item.cards().iter().copied())
            .collect();
        self.items.clear();
        cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::item::{Build, Pair};
    use crate::cards::Rank;
    use smallvec::smallvec;

    fn card(code: &str) -> Card {
        code.parse().unwrap()
    }

    #[test]
    fn test_place_allocates_unique_ids() {
        let mut table = Table::new();
        let a = table.place_card(card("7S"));
        let b = table.place_card(card("7S"));

        assert_ne!(a, b);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_ids_not_reused_after_removal() {
        let mut table = Table::new();
        let a = table.place_card(card("7S"));
        table.remove(&[a]).unwrap();
        let b = table.place_card(card("8S"));

        assert_ne!(a, b);
    }

    #[test]
    fn test_remove_missing_is_atomic() {
        let mut table = Table::new();
        let a = table.place_card(card("7S"));
        let before = table.clone();

        let err = table.remove(&[a, ItemId(99)]).unwrap_err();

        assert_eq!(err, InvariantViolation::MissingItem(ItemId(99)));
        assert_eq!(table, before);
    }

    #[test]
    fn test_builds_controlled_by() {
        let mut table = Table::new();
        table.place_card(card("2C"));
        table.place(TableItemKind::Build(Build {
            value: 9,
            cards: smallvec![card("4C"), card("5D")],
            controller: PlayerId::TWO,
            compound: false,
        }));

        assert_eq!(table.builds_controlled_by(PlayerId::ONE).count(), 0);
        assert_eq!(table.builds_controlled_by(PlayerId::TWO).count(), 1);
    }

    #[test]
    fn test_clear_into_cards_flattens() {
        let mut table = Table::new();
        table.place_card(card("2C"));
        table.place(TableItemKind::Pair(Pair {
            rank: Rank::Eight,
            cards: smallvec![card("8C"), card("8H")],
            controller: PlayerId::ONE,
        }));

        assert_eq!(table.card_count(), 3);
        let cards = table.clear_into_cards();

        assert_eq!(cards, vec![card("2C"), card("8C"), card("8H")]);
        assert!(table.is_empty());
    }
}
