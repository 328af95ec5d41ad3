//! Pair validation and construction.

use crate::cards::{Card, Rank};
use crate::core::{PlayerId, RuleViolation};
use crate::table::{Members, Pair, TableItem};

/// Check whether `played` can be paired with `selected` by a player holding
/// `hand` (which may still contain `played`).
///
/// Every selected item must be a loose card of the played rank, and the
/// player must keep another card of that rank to take the pair later.
pub fn validate_pair(played: Card, selected: &[&TableItem], hand: &[Card]) -> Result<Rank, RuleViolation> {
    if selected.is_empty() {
        return Err(RuleViolation::EmptySelection);
    }

    let rank = played.rank;
    for item in selected {
        let card = item.as_card().ok_or(RuleViolation::PairWithNonCard)?;
        if card.rank != rank {
            return Err(RuleViolation::PairRankMismatch(rank));
        }
    }

    if !hand.iter().any(|&card| card != played && card.rank == rank) {
        return Err(RuleViolation::NoCardForPair(rank));
    }

    Ok(rank)
}

/// Group the played card with the selected cards.
#[must_use]
pub fn construct_pair(played: Card, selected: &[&TableItem], controller: PlayerId) -> Pair {
    let mut cards = Members::new();
    cards.push(played);
    cards.extend(selected.iter().flat_map(|item| item.cards().iter().copied()));

    Pair {
        rank: played.rank,
        cards,
        controller,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameState;

    fn card(code: &str) -> Card {
        code.parse().unwrap()
    }

    fn hand(codes: &[&str]) -> Vec<Card> {
        codes.iter().map(|c| card(c)).collect()
    }

    #[test]
    fn test_valid_pair() {
        let state = GameState::builder().table_cards(&["8C"]).build();
        let selected: Vec<_> = state.table().iter().collect();

        let rank = validate_pair(card("8D"), &selected, &hand(&["8D", "8S"])).unwrap();
        assert_eq!(rank, Rank::Eight);

        let pair = construct_pair(card("8D"), &selected, PlayerId::TWO);
        assert_eq!(pair.cards.as_slice(), &[card("8D"), card("8C")]);
        assert_eq!(pair.controller, PlayerId::TWO);
    }

    #[test]
    fn test_face_cards_can_pair() {
        let state = GameState::builder().table_cards(&["KC", "KH"]).build();
        let selected: Vec<_> = state.table().iter().collect();

        assert_eq!(validate_pair(card("KD"), &selected, &hand(&["KD", "KS"])), Ok(Rank::King));
    }

    #[test]
    fn test_rank_mismatch() {
        let state = GameState::builder().table_cards(&["8C", "7C"]).build();
        let selected: Vec<_> = state.table().iter().collect();

        assert_eq!(
            validate_pair(card("8D"), &selected, &hand(&["8D", "8S"])),
            Err(RuleViolation::PairRankMismatch(Rank::Eight))
        );
    }

    #[test]
    fn test_only_loose_cards() {
        let state = GameState::builder()
            .table_pair(Rank::Eight, &["8C", "8H"], PlayerId::ONE)
            .build();
        let selected: Vec<_> = state.table().iter().collect();

        assert_eq!(
            validate_pair(card("8D"), &selected, &hand(&["8D", "8S"])),
            Err(RuleViolation::PairWithNonCard)
        );
    }

    #[test]
    fn test_needs_another_in_hand() {
        let state = GameState::builder().table_cards(&["8C"]).build();
        let selected: Vec<_> = state.table().iter().collect();

        assert_eq!(
            validate_pair(card("8D"), &selected, &hand(&["8D", "9S"])),
            Err(RuleViolation::NoCardForPair(Rank::Eight))
        );
    }

    #[test]
    fn test_empty_selection() {
        assert_eq!(
            validate_pair(card("8D"), &[], &hand(&["8D", "8S"])),
            Err(RuleViolation::EmptySelection)
        );
    }
}
