//! Card model: suits, ranks, the three value interpretations, and the deck.
//!
//! ## Key Types
//!
//! - `Card`: A physical card (rank + suit)
//! - `Rank`: Default, capture and build values
//! - `standard_deck` / `shuffled_deck`: Deck construction

pub mod card;
pub mod deck;

pub use card::{Card, ParseCardError, Rank, Suit};
pub use deck::{shuffled_deck, standard_deck, DECK_SIZE};
