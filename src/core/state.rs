//! Game state snapshots.
//!
//! ## GameState
//!
//! Everything the orchestrator needs between turns:
//! - Phase, round counter, current player, per-player turn flags
//! - Deck, hands, table, capture piles, discarded remainder
//! - Running scores and the last player to capture
//! - Player-facing message and action history
//!
//! A `GameState` is a value. Transitions clone it (O(1) thanks to `im`
//! persistent collections), modify the clone and hand it back, so a
//! rejected action leaves the caller's snapshot exactly as it was.
//!
//! ## Revision
//!
//! `revision` increases on every transition. Scheduled follow-ups carry the
//! revision they were issued for and are dropped once it moves on.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::ActionRecord;
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::cards::{shuffled_deck, Card, Rank};
use crate::rules::ScoreBreakdown;
use crate::table::{Build, Members, Pair, Table, TableItemKind};

/// Lifecycle of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Deck shuffled, nothing dealt yet.
    AwaitingDeal,
    /// Players are taking turns.
    InPlay,
    /// Both hands are empty and a redeal is pending.
    RoundEnding,
    /// Deck and hands exhausted, scores final.
    GameOver,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::AwaitingDeal => "awaiting-deal",
            Phase::InPlay => "in-play",
            Phase::RoundEnding => "round-ending",
            Phase::GameOver => "game-over",
        };
        f.write_str(name)
    }
}

/// Complete game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) phase: Phase,

    /// Undealt cards; the next card dealt is the back of the vector.
    pub(crate) deck: Vector<Card>,
    pub(crate) hands: PlayerMap<Vector<Card>>,
    pub(crate) table: Table,
    pub(crate) piles: PlayerMap<Vector<Card>>,

    /// Table remainder at game end when nobody ever captured.
    pub(crate) discarded: Vector<Card>,

    pub(crate) current_player: PlayerId,
    pub(crate) last_capturer: Option<PlayerId>,
    pub(crate) scores: PlayerMap<u32>,
    pub(crate) round: u32,
    pub(crate) turn_complete: PlayerMap<bool>,

    pub(crate) message: String,
    pub(crate) revision: u64,
    pub(crate) history: Vector<ActionRecord>,

    /// Set once the game is over.
    pub(crate) final_breakdown: Option<PlayerMap<ScoreBreakdown>>,
}

impl GameState {
    /// Create a game with a freshly shuffled deck, waiting for the deal.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let mut rng = GameRng::new(seed);
        Self::with_deck(shuffled_deck(&mut rng))
    }

    /// Create a game that will deal from `deck` (back of the vector first).
    #[must_use]
    pub fn with_deck(deck: Vec<Card>) -> Self {
        Self {
            phase: Phase::AwaitingDeal,
            deck: deck.into_iter().collect(),
            hands: PlayerMap::with_default(),
            table: Table::new(),
            piles: PlayerMap::with_default(),
            discarded: Vector::new(),
            current_player: PlayerId::ONE,
            last_capturer: None,
            scores: PlayerMap::with_value(0),
            round: 1,
            turn_complete: PlayerMap::with_value(false),
            message: String::new(),
            revision: 0,
            history: Vector::new(),
            final_breakdown: None,
        }
    }

    /// Start describing a mid-game position.
    #[must_use]
    pub fn builder() -> GameStateBuilder {
        GameStateBuilder::default()
    }

    // === Accessors ===

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn deck(&self) -> &Vector<Card> {
        &self.deck
    }

    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &Vector<Card> {
        &self.hands[player]
    }

    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    #[must_use]
    pub fn pile(&self, player: PlayerId) -> &Vector<Card> {
        &self.piles[player]
    }

    #[must_use]
    pub fn piles(&self) -> &PlayerMap<Vector<Card>> {
        &self.piles
    }

    #[must_use]
    pub fn discarded(&self) -> &Vector<Card> {
        &self.discarded
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    #[must_use]
    pub fn last_capturer(&self) -> Option<PlayerId> {
        self.last_capturer
    }

    #[must_use]
    pub fn score(&self, player: PlayerId) -> u32 {
        self.scores[player]
    }

    #[must_use]
    pub fn scores(&self) -> &PlayerMap<u32> {
        &self.scores
    }

    /// Deal number, starting at 1.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Whether `player` has already played since their turn began.
    #[must_use]
    pub fn has_played(&self, player: PlayerId) -> bool {
        self.turn_complete[player]
    }

    /// Message for the players ("Player 2's turn", "Sweep! ...").
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// End-of-game tally, once the game is over.
    #[must_use]
    pub fn final_breakdown(&self) -> Option<&PlayerMap<ScoreBreakdown>> {
        self.final_breakdown.as_ref()
    }

    /// Total physical cards tracked by this state.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.deck.len()
            + self.hands.iter().map(|(_, h)| h.len()).sum::<usize>()
            + self.table.card_count()
            + self.piles.iter().map(|(_, p)| p.len()).sum::<usize>()
            + self.discarded.len()
    }

    // === Internal helpers for transitions ===

    /// Bump the revision and replace the message.
    pub(crate) fn touch(&mut self, message: impl Into<String>) {
        self.revision += 1;
        self.message = message.into();
    }

    /// Deal up to `count` cards into each hand, alternating seats.
    pub(crate) fn deal_hands(&mut self, count: usize) {
        for _ in 0..count {
            for player in PlayerId::all() {
                if let Some(card) = self.deck.pop_back() {
                    self.hands[player].push_back(card);
                }
            }
        }
    }

    pub(crate) fn hands_empty(&self) -> bool {
        self.hands.iter().all(|(_, h)| h.is_empty())
    }

    pub(crate) fn turn_prompt(&self) -> String {
        format!("{}'s turn", self.current_player)
    }
}

/// Describes an in-progress position, mostly for tests and puzzle setups.
///
/// Table items receive ids in the order they are added, starting at
/// `ItemId(0)`. The built state is `InPlay` with the turn prompt set.
///
/// ```
/// use omlongo::core::{GameState, ItemId, Phase, PlayerId};
///
/// let state = GameState::builder()
///     .hand(PlayerId::ONE, &["5C", "9D"])
///     .hand(PlayerId::TWO, &["KS"])
///     .table_cards(&["4H", "2S"])
///     .build();
///
/// assert_eq!(state.phase(), Phase::InPlay);
/// assert_eq!(state.table().get(ItemId(1)).unwrap().as_card(), Some("2S".parse().unwrap()));
/// ```
#[derive(Clone, Debug, Default)]
pub struct GameStateBuilder {
    hands: PlayerMap<Vec<Card>>,
    table: Vec<TableItemKind>,
    deck: Vec<Card>,
    piles: PlayerMap<Vec<Card>>,
    scores: PlayerMap<u32>,
    current_player: Option<PlayerId>,
    last_capturer: Option<PlayerId>,
    round: Option<u32>,
}

fn parse_all(codes: &[&str]) -> Vec<Card> {
    codes
        .iter()
        .map(|code| {
            code.parse()
                .unwrap_or_else(|e| panic!("bad card code {code:?}: {e}"))
        })
        .collect()
}

impl GameStateBuilder {
    /// Set a player's hand from card codes.
    ///
    /// Panics on an unparsable code.
    #[must_use]
    pub fn hand(mut self, player: PlayerId, codes: &[&str]) -> Self {
        self.hands[player] = parse_all(codes);
        self
    }

    /// Add loose cards to the table.
    #[must_use]
    pub fn table_cards(mut self, codes: &[&str]) -> Self {
        self.table
            .extend(parse_all(codes).into_iter().map(TableItemKind::Card));
        self
    }

    /// Add a build to the table.
    #[must_use]
    pub fn table_build(mut self, value: u8, codes: &[&str], controller: PlayerId, compound: bool) -> Self {
        self.table.push(TableItemKind::Build(Build {
            value,
            cards: parse_all(codes).into_iter().collect::<Members>(),
            controller,
            compound,
        }));
        self
    }

    /// Add a pair to the table.
    #[must_use]
    pub fn table_pair(mut self, rank: Rank, codes: &[&str], controller: PlayerId) -> Self {
        self.table.push(TableItemKind::Pair(Pair {
            rank,
            cards: parse_all(codes).into_iter().collect::<Members>(),
            controller,
        }));
        self
    }

    /// Cards left to deal (back of the slice first).
    #[must_use]
    pub fn deck(mut self, codes: &[&str]) -> Self {
        self.deck = parse_all(codes);
        self
    }

    #[must_use]
    pub fn pile(mut self, player: PlayerId, codes: &[&str]) -> Self {
        self.piles[player] = parse_all(codes);
        self
    }

    #[must_use]
    pub fn score(mut self, player: PlayerId, score: u32) -> Self {
        self.scores[player] = score;
        self
    }

    #[must_use]
    pub fn current_player(mut self, player: PlayerId) -> Self {
        self.current_player = Some(player);
        self
    }

    #[must_use]
    pub fn last_capturer(mut self, player: PlayerId) -> Self {
        self.last_capturer = Some(player);
        self
    }

    #[must_use]
    pub fn round(mut self, round: u32) -> Self {
        self.round = Some(round);
        self
    }

    #[must_use]
    pub fn build(self) -> GameState {
        let mut state = GameState::with_deck(self.deck);
        for player in PlayerId::all() {
            state.hands[player] = self.hands[player].iter().copied().collect();
            state.piles[player] = self.piles[player].iter().copied().collect();
        }
        for kind in self.table {
            state.table.place(kind);
        }
        state.scores = self.scores;
        state.current_player = self.current_player.unwrap_or(PlayerId::ONE);
        state.last_capturer = self.last_capturer;
        state.round = self.round.unwrap_or(1);
        state.phase = Phase::InPlay;
        state.message = state.turn_prompt();
        state
    }
}
