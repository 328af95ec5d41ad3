//! End-of-game scoring.
//!
//! - Most cards: strictly more cards in the pile (no award on a tie)
//! - Most spades: strictly more spades (no award on a tie)
//! - Each ace
//! - The ten of diamonds
//! - The two of spades
//!
//! `tally` adds these on top of whatever running scores it is given. The
//! engine passes the scores accumulated from captures during play, so the
//! final total is capture points plus the tally.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank, Suit};
use crate::core::{PlayerId, PlayerMap, ScoringConfig};

/// Points one player earned from the end-of-game tally.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub most_cards: u32,
    pub most_spades: u32,
    pub aces: u32,
    pub ten_of_diamonds: u32,
    pub two_of_spades: u32,
}

impl ScoreBreakdown {
    #[must_use]
    pub fn total(&self) -> u32 {
        self.most_cards + self.most_spades + self.aces + self.ten_of_diamonds + self.two_of_spades
    }
}

/// Winner of a strict comparison, `None` on a tie.
fn strictly_more(counts: &PlayerMap<usize>) -> Option<PlayerId> {
    let (one, two) = (counts[PlayerId::ONE], counts[PlayerId::TWO]);
    match one.cmp(&two) {
        std::cmp::Ordering::Greater => Some(PlayerId::ONE),
        std::cmp::Ordering::Less => Some(PlayerId::TWO),
        std::cmp::Ordering::Equal => None,
    }
}

/// Score both piles and add the result onto `running`.
#[must_use]
pub fn tally(
    piles: &PlayerMap<Vector<Card>>,
    running: &PlayerMap<u32>,
    config: &ScoringConfig,
) -> (PlayerMap<u32>, PlayerMap<ScoreBreakdown>) {
    let breakdown = score_piles(piles, config);
    let totals = running.map(|player, score| score + breakdown[player].total());
    (totals, breakdown)
}

/// Score both piles without any running total.
#[must_use]
pub fn score_piles(piles: &PlayerMap<Vector<Card>>, config: &ScoringConfig) -> PlayerMap<ScoreBreakdown> {
    let card_counts = piles.map(|_, pile| pile.len());
    let spade_counts = piles.map(|_, pile| pile.iter().filter(|c| c.suit == Suit::Spades).count());
    let most_cards = strictly_more(&card_counts);
    let most_spades = strictly_more(&spade_counts);

    piles.map(|player, pile| {
        let aces = pile.iter().filter(|c| c.rank == Rank::Ace).count() as u32;
        ScoreBreakdown {
            most_cards: if most_cards == Some(player) { config.most_cards } else { 0 },
            most_spades: if most_spades == Some(player) { config.most_spades } else { 0 },
            aces: aces * config.per_ace,
            ten_of_diamonds: if pile.iter().any(|c| c.is_ten_of_diamonds()) { config.ten_of_diamonds } else { 0 },
            two_of_spades: if pile.iter().any(|c| c.is_two_of_spades()) { config.two_of_spades } else { 0 },
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pile(codes: &[&str]) -> Vector<Card> {
        codes.iter().map(|c| c.parse::<Card>().unwrap()).collect()
    }

    fn piles(one: &[&str], two: &[&str]) -> PlayerMap<Vector<Card>> {
        let mut map = PlayerMap::with_default();
        map[PlayerId::ONE] = pile(one);
        map[PlayerId::TWO] = pile(two);
        map
    }

    #[test]
    fn test_single_pile_takes_every_bonus() {
        let piles = piles(&["AS", "10D", "2S"], &[]);
        let breakdown = score_piles(&piles, &ScoringConfig::default());

        let one = &breakdown[PlayerId::ONE];
        assert_eq!(one.most_cards, 3);
        assert_eq!(one.most_spades, 1);
        assert_eq!(one.aces, 1);
        assert_eq!(one.ten_of_diamonds, 2);
        assert_eq!(one.two_of_spades, 1);
        assert_eq!(one.total(), 8);
        assert_eq!(breakdown[PlayerId::TWO], ScoreBreakdown::default());
    }

    #[test]
    fn test_ties_award_nothing() {
        let piles = piles(&["3S", "4H"], &["5S", "6H"]);
        let breakdown = score_piles(&piles, &ScoringConfig::default());

        assert_eq!(breakdown[PlayerId::ONE].total(), 0);
        assert_eq!(breakdown[PlayerId::TWO].total(), 0);
    }

    #[test]
    fn test_spades_and_cards_split() {
        // Player 1 has more cards, player 2 more spades.
        let piles = piles(&["3H", "4H", "5H"], &["5S", "6S"]);
        let breakdown = score_piles(&piles, &ScoringConfig::default());

        assert_eq!(breakdown[PlayerId::ONE].most_cards, 3);
        assert_eq!(breakdown[PlayerId::ONE].most_spades, 0);
        assert_eq!(breakdown[PlayerId::TWO].most_cards, 0);
        assert_eq!(breakdown[PlayerId::TWO].most_spades, 1);
    }

    #[test]
    fn test_every_ace_counts() {
        let piles = piles(&["AS", "AH", "AD"], &["AC"]);
        let breakdown = score_piles(&piles, &ScoringConfig::default());

        assert_eq!(breakdown[PlayerId::ONE].aces, 3);
        assert_eq!(breakdown[PlayerId::TWO].aces, 1);
    }

    #[test]
    fn test_tally_adds_onto_running_scores() {
        let piles = piles(&["AS", "10D", "2S"], &["9C"]);
        let mut running = PlayerMap::with_value(0);
        running[PlayerId::ONE] = 4;
        running[PlayerId::TWO] = 2;

        let (totals, breakdown) = tally(&piles, &running, &ScoringConfig::default());

        assert_eq!(totals[PlayerId::ONE], 4 + breakdown[PlayerId::ONE].total());
        assert_eq!(totals[PlayerId::TWO], 2);
    }

    #[test]
    fn test_custom_weights() {
        let config = ScoringConfig {
            per_ace: 5,
            ..ScoringConfig::default()
        };
        let piles = piles(&["AH"], &["AC", "2H"]);
        let breakdown = score_piles(&piles, &config);

        assert_eq!(breakdown[PlayerId::ONE].aces, 5);
        assert_eq!(breakdown[PlayerId::TWO].total(), 5 + 3);
    }
}
