//! Capture resolution.
//!
//! `enumerate_capture_options` lists every independent way a played card can
//! take items from the table:
//!
//! 1. **Rank match**: all loose cards and pairs of the played rank, taken
//!    together as one set.
//! 2. **Build match** (numerals and aces only): each build whose value equals
//!    the played card's build value, alone. An ace takes a build of 1.
//! 3. **Sum match** (numerals and aces only): every subset of combinable
//!    items (non-face loose cards at ace-low value, simple builds at their
//!    value) summing to the capture value. Subsets made only of rank-matched
//!    cards are dropped: those cards are taken with the whole rank group.
//!
//! A player may take several options in one turn as long as they do not
//! overlap; `partition_selection` checks a selection against the options.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::Card;
use crate::core::ItemId;
use crate::table::{Table, TableItem, TableItemKind};

/// One valid capture: a set of table item ids, kept sorted.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaptureSet {
    items: SmallVec<[ItemId; 4]>,
}

impl CaptureSet {
    /// Build a set from ids in any order. Duplicates collapse.
    #[must_use]
    pub fn new(ids: impl IntoIterator<Item = ItemId>) -> Self {
        let mut items: SmallVec<[ItemId; 4]> = ids.into_iter().collect();
        items.sort_unstable();
        items.dedup();
        Self { items }
    }

    /// Member ids in ascending order.
    #[must_use]
    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    #[must_use]
    pub fn contains(&self, id: ItemId) -> bool {
        self.items.binary_search(&id).is_ok()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Every distinct way `played` can capture from `table`.
///
/// The result is deterministic for a given table: rank match first, then
/// build matches in table order, then sum combinations.
#[must_use]
pub fn enumerate_capture_options(played: Card, table: &Table) -> Vec<CaptureSet> {
    let mut options = Vec::new();

    let rank_ids: Vec<ItemId> = table
        .iter()
        .filter(|item| item.matches_rank(played.rank))
        .map(|item| item.id)
        .collect();
    let rank_group = (!rank_ids.is_empty()).then(|| CaptureSet::new(rank_ids));
    options.extend(rank_group.clone());

    if !played.is_face() {
        let target = played.capture_value();

        let build_value = played.build_value();
        options.extend(
            table
                .iter()
                .filter(|item| matches!(&item.kind, TableItemKind::Build(b) if Some(b.value) == build_value))
                .map(|item| CaptureSet::new([item.id])),
        );

        let combinable: Vec<(ItemId, u8)> = table
            .iter()
            .filter_map(|item| item.combination_value().map(|v| (item.id, v)))
            .filter(|&(_, v)| v <= target)
            .collect();
        let mut sums = Vec::new();
        collect_sums(&combinable, 0, target, &mut Vec::new(), &mut sums);

        // Same-rank cards go with the whole rank group, never on their own.
        options.extend(sums.into_iter().filter(|sum| {
            rank_group
                .as_ref()
                .map_or(true, |group| !sum.items().iter().all(|id| group.contains(*id)))
        }));
    }

    let mut seen = FxHashSet::default();
    options.retain(|set| seen.insert(set.clone()));
    options
}

/// Depth-first search for subsets of `items[start..]` summing to `remaining`.
///
/// Values are positive, so a branch stops as soon as it overshoots.
fn collect_sums(
    items: &[(ItemId, u8)],
    start: usize,
    remaining: u8,
    chosen: &mut Vec<ItemId>,
    out: &mut Vec<CaptureSet>,
) {
    for (offset, &(id, value)) in items[start..].iter().enumerate() {
        if value > remaining {
            continue;
        }
        chosen.push(id);
        if value == remaining {
            out.push(CaptureSet::new(chosen.iter().copied()));
        } else {
            collect_sums(items, start + offset + 1, remaining - value, chosen, out);
        }
        chosen.pop();
    }
}

/// Split `selection` into disjoint options that cover it exactly.
///
/// Returns the options used, or `None` if the selection is empty, repeats an
/// id, or cannot be covered exactly (something left over, or an item that
/// belongs to no option).
#[must_use]
pub fn partition_selection<'a>(selection: &[ItemId], options: &'a [CaptureSet]) -> Option<Vec<&'a CaptureSet>> {
    if selection.is_empty() {
        return None;
    }

    let mut remaining: Vec<ItemId> = selection.to_vec();
    remaining.sort_unstable();
    let before = remaining.len();
    remaining.dedup();
    if remaining.len() != before {
        return None;
    }

    let mut used = Vec::new();
    exact_cover(&remaining, options, &mut used).then_some(used)
}

/// Whether `selection` is exactly a disjoint union of `options`.
#[must_use]
pub fn validate_selection(selection: &[ItemId], options: &[CaptureSet]) -> bool {
    partition_selection(selection, options).is_some()
}

fn exact_cover<'a>(remaining: &[ItemId], options: &'a [CaptureSet], used: &mut Vec<&'a CaptureSet>) -> bool {
    // The smallest uncovered id must belong to exactly one chosen option.
    let Some(&first) = remaining.first() else {
        return true;
    };

    for option in options.iter().filter(|o| o.contains(first)) {
        if !option.items().iter().all(|id| remaining.binary_search(id).is_ok()) {
            continue;
        }
        let rest: Vec<ItemId> = remaining
            .iter()
            .copied()
            .filter(|id| !option.contains(*id))
            .collect();

        used.push(option);
        if exact_cover(&rest, options, used) {
            return true;
        }
        used.pop();
    }
    false
}

/// Every physical card taken by capturing `items`.
pub fn captured_cards<'a>(items: impl IntoIterator<Item = &'a TableItem>) -> Vec<Card> {
    items
        .into_iter()
        .flat_map(|item| item.cards().iter().copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Rank;
    use crate::core::{GameState, PlayerId};

    fn card(code: &str) -> Card {
        code.parse().unwrap()
    }

    fn ids(raw: &[u32]) -> Vec<ItemId> {
        raw.iter().map(|&r| ItemId(r)).collect()
    }

    fn set(raw: &[u32]) -> CaptureSet {
        CaptureSet::new(ids(raw))
    }

    #[test]
    fn test_rank_match_takes_whole_group() {
        let state = GameState::builder()
            .table_cards(&["7C"])
            .table_pair(Rank::Seven, &["7D", "7H"], PlayerId::TWO)
            .table_cards(&["4C", "3C"])
            .build();

        let options = enumerate_capture_options(card("7S"), state.table());

        // The loose 7 and the pair go together; 4 + 3 is a separate option.
        assert_eq!(options, vec![set(&[0, 1]), set(&[2, 3])]);
    }

    #[test]
    fn test_sum_combinations() {
        let state = GameState::builder().table_cards(&["3C", "4D", "5H", "2S"]).build();

        let options = enumerate_capture_options(card("7C"), state.table());

        assert_eq!(options.len(), 2);
        assert!(options.contains(&set(&[0, 1])));
        assert!(options.contains(&set(&[2, 3])));
    }

    #[test]
    fn test_ace_captures_fourteen_with_ace_low_members() {
        let state = GameState::builder().table_cards(&["AC", "4D", "9H"]).build();

        let options = enumerate_capture_options(card("AS"), state.table());

        // Rank match on AC, and A(1) + 4 + 9 = 14.
        assert_eq!(options, vec![set(&[0]), set(&[0, 1, 2])]);
    }

    #[test]
    fn test_face_cards_only_rank_match() {
        let state = GameState::builder().table_cards(&["JC", "5D", "6H", "JH"]).build();

        // 5 + 6 equals the jack's capture value, but a played face only
        // matches rank.
        let jack = enumerate_capture_options(card("JS"), state.table());
        assert_eq!(jack, vec![set(&[0, 3])]);

        let ten = enumerate_capture_options(card("10S"), state.table());
        assert!(ten.is_empty());
    }

    #[test]
    fn test_builds_by_value_and_in_sums() {
        let state = GameState::builder()
            .table_build(6, &["4C", "2D"], PlayerId::ONE, false)
            .table_build(8, &["8C", "5D", "3D"], PlayerId::TWO, true)
            .table_cards(&["2H"])
            .build();

        let eight = enumerate_capture_options(card("8S"), state.table());
        // Compound build 8 by value, simple build 6 + loose 2 by sum.
        assert_eq!(eight, vec![set(&[1]), set(&[0, 2])]);

        let six = enumerate_capture_options(card("6S"), state.table());
        assert_eq!(six, vec![set(&[0])]);
    }

    #[test]
    fn test_pairs_never_combine() {
        let state = GameState::builder()
            .table_pair(Rank::Three, &["3C", "3D"], PlayerId::ONE)
            .table_cards(&["3H"])
            .build();

        let six = enumerate_capture_options(card("6S"), state.table());
        assert!(six.is_empty());
    }

    #[test]
    fn test_enumeration_is_idempotent() {
        let state = GameState::builder().table_cards(&["AC", "2D", "3H", "4S", "5C"]).build();

        let a = enumerate_capture_options(card("6D"), state.table());
        let b = enumerate_capture_options(card("6D"), state.table());
        assert_eq!(a, b);
    }

    #[test]
    fn test_validate_union_of_disjoint_sets() {
        let options = vec![set(&[0]), set(&[1, 2]), set(&[3, 4])];

        assert!(validate_selection(&ids(&[0, 1, 2]), &options));
        assert!(validate_selection(&ids(&[4, 3, 0]), &options));
        assert!(!validate_selection(&ids(&[0, 1]), &options));
        assert!(!validate_selection(&ids(&[0, 1, 2, 5]), &options));
        assert!(!validate_selection(&[], &options));
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let options = vec![set(&[0])];
        assert!(!validate_selection(&ids(&[0, 0]), &options));
    }

    #[test]
    fn test_partition_backtracks_past_bad_first_choice() {
        // Greedy taking {0,1} first would strand 2; {0} + {1,2} covers it.
        let options = vec![set(&[0, 1]), set(&[0]), set(&[1, 2])];

        let used = partition_selection(&ids(&[0, 1, 2]), &options).unwrap();
        assert_eq!(used, vec![&options[1], &options[2]]);
    }

    #[test]
    fn test_captured_cards_expands_groups() {
        let state = GameState::builder()
            .table_build(6, &["4C", "2D"], PlayerId::ONE, false)
            .table_cards(&["9H"])
            .build();

        let cards = captured_cards(state.table().iter());
        assert_eq!(cards, vec![card("4C"), card("2D"), card("9H")]);
    }
}
