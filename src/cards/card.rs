//! Card model and the three rank-to-number interpretations.
//!
//! | rank    | default | capture | build |
//! |---------|---------|---------|-------|
//! | 2..=10  | face    | face    | face  |
//! | J/Q/K   | 10      | 11/12/13| none  |
//! | A       | 1       | 14      | 1     |
//!
//! Each operation uses exactly one interpretation. Sum captures and build
//! arithmetic use the build value (ace low); a played card is matched
//! against those sums by its capture value; scoring reads the default value.
//! Face cards have no build value and take part only in rank matches.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Card suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    /// All suits in deck order.
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    /// Single-letter code (`C`, `D`, `H`, `S`).
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        }
    }

    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
            Suit::Spades => '♠',
        }
    }
}

/// Card rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// All ranks in deck order.
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Jack, queen or king.
    #[must_use]
    pub const fn is_face(self) -> bool {
        matches!(self, Rank::Jack | Rank::Queen | Rank::King)
    }

    /// Numeral pip count for 2..=10, `None` otherwise.
    const fn pips(self) -> Option<u8> {
        match self {
            Rank::Two => Some(2),
            Rank::Three => Some(3),
            Rank::Four => Some(4),
            Rank::Five => Some(5),
            Rank::Six => Some(6),
            Rank::Seven => Some(7),
            Rank::Eight => Some(8),
            Rank::Nine => Some(9),
            Rank::Ten => Some(10),
            Rank::Jack | Rank::Queen | Rank::King | Rank::Ace => None,
        }
    }

    /// Default value: faces 10, ace 1, numerals face value.
    #[must_use]
    pub const fn default_value(self) -> u8 {
        match self.pips() {
            Some(v) => v,
            None => match self {
                Rank::Ace => 1,
                _ => 10,
            },
        }
    }

    /// Capture value: J=11, Q=12, K=13, A=14, numerals face value.
    #[must_use]
    pub const fn capture_value(self) -> u8 {
        match self {
            Rank::Jack => 11,
            Rank::Queen => 12,
            Rank::King => 13,
            Rank::Ace => 14,
            _ => self.default_value(),
        }
    }

    /// Build/combination value: ace 1, numerals face value, faces excluded.
    #[must_use]
    pub const fn build_value(self) -> Option<u8> {
        match self {
            Rank::Ace => Some(1),
            _ => self.pips(),
        }
    }

    /// Short label (`2`..`10`, `J`, `Q`, `K`, `A`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A physical playing card.
///
/// A standard deck holds each (rank, suit) once, so two `Card` values are
/// equal only if they are the same physical card. Table placement identity
/// is carried separately by `ItemId`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    #[must_use]
    pub const fn is_face(self) -> bool {
        self.rank.is_face()
    }

    #[must_use]
    pub const fn default_value(self) -> u8 {
        self.rank.default_value()
    }

    #[must_use]
    pub const fn capture_value(self) -> u8 {
        self.rank.capture_value()
    }

    #[must_use]
    pub const fn build_value(self) -> Option<u8> {
        self.rank.build_value()
    }

    /// The ten of diamonds.
    #[must_use]
    pub fn is_ten_of_diamonds(self) -> bool {
        self == Card::new(Rank::Ten, Suit::Diamonds)
    }

    /// The two of spades.
    #[must_use]
    pub fn is_two_of_spades(self) -> bool {
        self == Card::new(Rank::Two, Suit::Spades)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit.glyph())
    }
}

/// Failure to parse a card code such as `"10D"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCardError {
    #[error("card code is empty")]
    Empty,
    #[error("unknown suit '{0}'")]
    Suit(char),
    #[error("unknown rank '{0}'")]
    Rank(String),
}

impl FromStr for Card {
    type Err = ParseCardError;

    /// Parse `<rank><suit>`, e.g. `7S`, `10D`, `ah`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let suit_char = s.chars().last().ok_or(ParseCardError::Empty)?;
        let suit = match suit_char.to_ascii_uppercase() {
            'C' => Suit::Clubs,
            'D' => Suit::Diamonds,
            'H' => Suit::Hearts,
            'S' => Suit::Spades,
            other => return Err(ParseCardError::Suit(other)),
        };

        let rank_str = &s[..s.len() - suit_char.len_utf8()];
        let rank = Rank::ALL
            .into_iter()
            .find(|r| r.label().eq_ignore_ascii_case(rank_str))
            .ok_or_else(|| ParseCardError::Rank(rank_str.to_string()))?;

        Ok(Card::new(rank, suit))
    }
}
