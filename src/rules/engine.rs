//! Rules engine trait and the Omlongo implementation.
//!
//! `RulesEngine` is the one surface a host needs:
//! - What actions are legal
//! - How actions modify state
//! - Follow-ups scheduled by earlier transitions
//! - Win/draw conditions

use serde::{Deserialize, Serialize};
use tracing::info;

use super::build::validate_build;
use super::capture::enumerate_capture_options;
use super::pair::validate_pair;
use super::round::{self, deal_opening};
use super::turn::{self, check_trail, Scheduled, Transition};
use crate::cards::Card;
use crate::core::{Action, ActionError, GameConfig, GameState, ItemId, Phase, PlayerId};
use crate::table::TableItem;

/// Largest number of table items `legal_actions` combines into one build.
pub const MAX_BUILD_SELECTION: usize = 4;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Equal final scores.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

/// What the presentation layer gets back from a turn.
///
/// Unlike `apply_action`, this never fails: a refused action comes back
/// with `success == false`, the player-facing reason in `message` and the
/// original state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnResult {
    pub success: bool,
    pub message: String,
    pub state: GameState,
    pub sweep: bool,
    pub captured: Vec<Card>,
    pub scheduled: Option<Scheduled>,
}

impl TurnResult {
    fn accepted(transition: Transition) -> Self {
        Self {
            success: true,
            message: transition.message().to_string(),
            state: transition.state,
            sweep: transition.sweep,
            captured: transition.captured,
            scheduled: transition.scheduled,
        }
    }

    fn refused(state: &GameState, error: &ActionError) -> Self {
        Self {
            success: false,
            message: error.to_string(),
            state: state.clone(),
            sweep: false,
            captured: Vec::new(),
            scheduled: None,
        }
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: Return empty vec if nobody can act
/// - `apply_action`: Must be deterministic and leave `state` untouched
/// - `is_terminal`: Return None if game continues
pub trait RulesEngine {
    /// Get the game configuration.
    fn config(&self) -> &GameConfig;

    /// Every action the current player may take.
    fn legal_actions(&self, state: &GameState) -> Vec<Action>;

    /// Apply an action, producing the next snapshot.
    fn apply_action(&self, state: &GameState, action: &Action) -> Result<Transition, ActionError>;

    /// Apply a follow-up issued by an earlier transition, unless it is stale.
    fn apply_scheduled(&self, state: &GameState, scheduled: &Scheduled) -> Option<GameState>;

    /// Check if the game is over.
    ///
    /// Returns `Some(result)` if the game has ended, `None` if it continues.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult>;

    // === Convenience Methods ===

    /// Apply an action and fold the outcome into a `TurnResult`.
    fn play(&self, state: &GameState, action: &Action) -> TurnResult {
        match self.apply_action(state, action) {
            Ok(transition) => TurnResult::accepted(transition),
            Err(error) => TurnResult::refused(state, &error),
        }
    }
}

/// Standard Omlongo rules.
#[derive(Clone, Debug, Default)]
pub struct OmlongoRules {
    config: GameConfig,
}

impl OmlongoRules {
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }

    /// Shuffle a deck with `seed` and deal the opening hands.
    #[must_use]
    pub fn new_game(&self, seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        deal_opening(&self.config, &mut state);
        info!(seed, dealt = self.config.opening_deal_size(), "new game");
        state
    }

    /// Deal fresh hands without waiting for a scheduled redeal.
    pub fn advance_round(&self, state: &GameState) -> Result<GameState, ActionError> {
        Ok(round::advance_round(&self.config, state)?)
    }

    fn actions_for_card(&self, state: &GameState, player: PlayerId, played: Card, hand: &[Card], out: &mut Vec<Action>) {
        let table = state.table();

        if check_trail(played, hand, table, player).is_ok() {
            out.push(Action::trail(player, played));
        }

        for option in enumerate_capture_options(played, table) {
            out.push(Action::capture(player, played, option.items()));
        }

        let buildable: Vec<&TableItem> = table
            .iter()
            .filter(|item| item.combination_value().is_some())
            .collect();
        let mut chosen = Vec::new();
        for_each_subset(&buildable, 0, &mut chosen, &mut |subset: &[&TableItem]| {
            if validate_build(played, subset, hand).is_ok() {
                let ids: Vec<ItemId> = subset.iter().map(|item| item.id).collect();
                out.push(Action::build(player, played, &ids));
            }
        });

        let same_rank: Vec<&TableItem> = table
            .iter()
            .filter(|item| item.as_card().is_some_and(|card| card.rank == played.rank))
            .collect();
        let mut chosen = Vec::new();
        for_each_subset(&same_rank, 0, &mut chosen, &mut |subset: &[&TableItem]| {
            if validate_pair(played, subset, hand).is_ok() {
                let ids: Vec<ItemId> = subset.iter().map(|item| item.id).collect();
                out.push(Action::pair(player, played, &ids));
            }
        });
    }
}

/// Visit every non-empty subset of `items[start..]` of at most
/// `MAX_BUILD_SELECTION` items, extending `chosen`.
fn for_each_subset<'a>(
    items: &[&'a TableItem],
    start: usize,
    chosen: &mut Vec<&'a TableItem>,
    visit: &mut impl FnMut(&[&'a TableItem]),
) {
    if chosen.len() == MAX_BUILD_SELECTION {
        return;
    }
    for i in start..items.len() {
        chosen.push(items[i]);
        visit(chosen.as_slice());
        for_each_subset(items, i + 1, chosen, visit);
        chosen.pop();
    }
}

impl RulesEngine for OmlongoRules {
    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn legal_actions(&self, state: &GameState) -> Vec<Action> {
        let player = state.current_player();
        if state.phase() != Phase::InPlay || state.has_played(player) {
            return vec![];
        }

        let hand: Vec<Card> = state.hand(player).iter().copied().collect();
        let mut actions = Vec::new();
        for &played in &hand {
            self.actions_for_card(state, player, played, &hand, &mut actions);
        }
        actions
    }

    fn apply_action(&self, state: &GameState, action: &Action) -> Result<Transition, ActionError> {
        turn::apply_action(&self.config, state, action)
    }

    fn apply_scheduled(&self, state: &GameState, scheduled: &Scheduled) -> Option<GameState> {
        round::apply_scheduled(&self.config, state, scheduled)
    }

    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        if state.phase() != Phase::GameOver {
            return None;
        }

        let (one, two) = (state.score(PlayerId::ONE), state.score(PlayerId::TWO));
        Some(match one.cmp(&two) {
            std::cmp::Ordering::Greater => GameResult::Winner(PlayerId::ONE),
            std::cmp::Ordering::Less => GameResult::Winner(PlayerId::TWO),
            std::cmp::Ordering::Equal => GameResult::Draw,
        })
    }
}
