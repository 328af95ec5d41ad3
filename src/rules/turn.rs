//! Turn orchestration.
//!
//! `apply_action` takes a snapshot and an action and either returns the next
//! snapshot or refuses. It never touches its input: all work happens on a
//! clone, which is simply dropped when a check fails part way through.
//!
//! ## Order of checks
//!
//! 1. The game is in play, it is the acting player's turn and they have not
//!    played yet
//! 2. The played card is in their hand
//! 3. Capture, build and pair name at least one table item, each at most once
//! 4. Every named item is on the table
//! 5. The rules of the chosen action
//!
//! ## Scheduled follow-ups
//!
//! Build, pair and sweep messages stay up for `message_delay` before the turn
//! prompt comes back, and a finished round waits `redeal_delay` before the
//! next deal. The engine does not keep timers: it returns a `Scheduled`
//! guarded by the revision it was issued for, and the host hands it back to
//! `apply_scheduled` once the delay has passed.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::build::{construct_build, validate_build};
use super::capture::{captured_cards, enumerate_capture_options, partition_selection};
use super::pair::{construct_pair, validate_pair};
use super::round;
use crate::cards::Card;
use crate::core::{
    Action, ActionError, ActionKind, ActionRecord, GameConfig, GameState, ItemId, Phase, PlayerId,
    RuleViolation,
};
use crate::table::{Table, TableItemKind};

/// A transition the host should apply later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Deferred {
    /// Replace a build, pair or sweep message with the turn prompt.
    ShowTurnPrompt,
    /// Deal the next round after both hands ran out.
    DealNextRound,
}

/// A deferred transition, valid only while the state is still at `guard`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scheduled {
    /// How long the host should wait before applying it.
    pub after: Duration,
    /// Revision of the state it was issued for.
    pub guard: u64,
    pub deferred: Deferred,
}

impl Scheduled {
    pub(crate) fn new(after: Duration, state: &GameState, deferred: Deferred) -> Self {
        Self {
            after,
            guard: state.revision(),
            deferred,
        }
    }

    /// Whether `state` has moved on since this was issued.
    #[must_use]
    pub fn is_stale(&self, state: &GameState) -> bool {
        state.revision() != self.guard
    }
}

/// The result of an accepted action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub state: GameState,
    /// The capture emptied the table.
    pub sweep: bool,
    /// Cards moved into the acting player's pile, played card first.
    pub captured: Vec<Card>,
    pub scheduled: Option<Scheduled>,
}

impl Transition {
    #[must_use]
    pub fn message(&self) -> &str {
        self.state.message()
    }
}

/// What the played card did, before the turn is handed over.
struct Outcome {
    /// Message to show instead of the turn prompt.
    message: Option<String>,
    sweep: bool,
    captured: Vec<Card>,
}

impl Outcome {
    fn quiet() -> Self {
        Self {
            message: None,
            sweep: false,
            captured: Vec::new(),
        }
    }

    fn announce(message: String) -> Self {
        Self {
            message: Some(message),
            ..Self::quiet()
        }
    }
}

/// Apply `action` to `state`.
///
/// On success the returned transition carries the new snapshot. On failure
/// `state` is, as always, unchanged.
pub fn apply_action(config: &GameConfig, state: &GameState, action: &Action) -> Result<Transition, ActionError> {
    let result = resolve(config, state, action);

    match &result {
        Ok(transition) => debug!(
            player = %action.player,
            card = %action.card,
            action = action.verb(),
            revision = transition.state.revision(),
            "action accepted"
        ),
        Err(ActionError::Rule(reason)) => debug!(
            player = %action.player,
            card = %action.card,
            action = action.verb(),
            %reason,
            "action rejected"
        ),
        Err(ActionError::Invariant(defect)) => error!(
            player = %action.player,
            card = %action.card,
            action = action.verb(),
            %defect,
            "action aborted"
        ),
    }

    result
}

fn resolve(config: &GameConfig, state: &GameState, action: &Action) -> Result<Transition, ActionError> {
    check_turn(state, action)?;

    let player = action.player;
    let played = action.card;
    let hand: Vec<Card> = state.hand(player).iter().copied().collect();
    let selection = action.selection();
    if !matches!(action.kind, ActionKind::Trail) {
        check_selection(selection)?;
    }
    let selected = state.table().resolve(selection)?;

    let mut next = state.clone();
    let outcome = match &action.kind {
        ActionKind::Trail => {
            check_trail(played, &hand, state.table(), player)?;
            next.table.place_card(played);
            Outcome::quiet()
        }
        ActionKind::Capture(_) => capture(config, &mut next, player, played, selection)?,
        ActionKind::Build(_) => {
            let plan = validate_build(played, &selected, &hand)?;
            let build = construct_build(played, &selected, &plan, player);
            if plan.is_modification() {
                debug!(%player, value = plan.target_value, "build extended");
            }
            next.table.remove(selection)?;
            next.table.place(TableItemKind::Build(build));
            let kind = if plan.compound { "compound build" } else { "build" };
            Outcome::announce(format!("{player} made a {kind} of {}", plan.target_value))
        }
        ActionKind::Pair(_) => {
            let rank = validate_pair(played, &selected, &hand)?;
            let pair = construct_pair(played, &selected, player);
            next.table.remove(selection)?;
            next.table.place(TableItemKind::Pair(pair));
            Outcome::announce(format!("{player} paired {rank}s"))
        }
    };

    Ok(finish_turn(config, next, action, outcome))
}

fn check_turn(state: &GameState, action: &Action) -> Result<(), RuleViolation> {
    if state.phase() != Phase::InPlay {
        return Err(RuleViolation::WrongPhase(state.phase()));
    }
    if action.player != state.current_player() {
        return Err(RuleViolation::NotYourTurn(state.current_player()));
    }
    if state.has_played(action.player) {
        return Err(RuleViolation::AlreadyPlayed(action.player));
    }
    if !state.hand(action.player).contains(&action.card) {
        return Err(RuleViolation::CardNotInHand {
            card: action.card,
            player: action.player,
        });
    }
    Ok(())
}

fn check_selection(selection: &[ItemId]) -> Result<(), RuleViolation> {
    if selection.is_empty() {
        return Err(RuleViolation::EmptySelection);
    }
    if selection
        .iter()
        .enumerate()
        .any(|(i, id)| selection[..i].contains(id))
    {
        return Err(RuleViolation::DuplicateSelection);
    }
    Ok(())
}

/// Whether `player` may lay `played` on the table.
///
/// A player controlling a build they can still take must act on it.
/// Trailing the last card that could take it gets its own message.
pub fn check_trail(played: Card, hand: &[Card], table: &Table, player: PlayerId) -> Result<(), RuleViolation> {
    let controlled: Vec<u8> = table
        .builds_controlled_by(player)
        .filter_map(|item| item.as_build().map(|build| build.value))
        .collect();

    if let Some(value) = played.build_value() {
        let holding = hand.iter().filter(|card| card.build_value() == Some(value)).count();
        if controlled.contains(&value) && holding <= 1 {
            return Err(RuleViolation::LastCapturingCard(value));
        }
    }

    // A build the player can no longer take does not hold up their turn.
    let takeable = controlled
        .iter()
        .find(|&&value| hand.iter().any(|card| card.build_value() == Some(value)));
    match takeable {
        Some(&value) => Err(RuleViolation::MustActOnBuild(value)),
        None => Ok(()),
    }
}

fn capture(
    config: &GameConfig,
    next: &mut GameState,
    player: PlayerId,
    played: Card,
    selection: &[ItemId],
) -> Result<Outcome, ActionError> {
    let options = enumerate_capture_options(played, next.table());
    if partition_selection(selection, &options).is_none() {
        return Err(RuleViolation::InvalidCapture.into());
    }

    let removed = next.table.remove(selection)?;
    let mut captured = vec![played];
    captured.extend(captured_cards(&removed));

    let scoring = &config.scoring;
    next.piles[player].extend(captured.iter().copied());
    next.scores[player] += scoring.per_captured_card * captured.len() as u32;
    next.last_capturer = Some(player);

    let sweep = next.table.is_empty();
    if sweep {
        next.scores[player] += scoring.sweep_bonus;
    }

    Ok(Outcome {
        message: sweep.then(|| "Sweep!".to_string()),
        sweep,
        captured,
    })
}

/// Hand the turn over and record the action.
fn finish_turn(config: &GameConfig, mut next: GameState, action: &Action, outcome: Outcome) -> Transition {
    let player = action.player;
    if let Some(index) = next.hands[player].index_of(&action.card) {
        next.hands[player].remove(index);
    }
    next.turn_complete[player] = true;

    let sequence = next.history.len() as u32;
    next.history
        .push_back(ActionRecord::new(action.clone(), next.round, sequence));

    // Skip a seat whose hand ran dry when an uneven deal left the other with cards.
    let opponent = player.opponent();
    let following = if next.hands[opponent].is_empty() && !next.hands[player].is_empty() {
        player
    } else {
        opponent
    };
    next.current_player = following;
    next.turn_complete[following] = false;

    let scheduled = if next.hands_empty() {
        let scheduled = round::close_round(config, &mut next);
        if outcome.sweep {
            next.message = format!("Sweep! {}", next.message);
        }
        scheduled
    } else {
        match outcome.message {
            Some(message) => {
                next.touch(message);
                Some(Scheduled::new(config.message_delay, &next, Deferred::ShowTurnPrompt))
            }
            None => {
                let prompt = next.turn_prompt();
                next.touch(prompt);
                None
            }
        }
    };

    Transition {
        state: next,
        sweep: outcome.sweep,
        captured: outcome.captured,
        scheduled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Rank;

    fn card(code: &str) -> Card {
        code.parse().unwrap()
    }

    fn config() -> GameConfig {
        GameConfig::default()
    }

    #[test]
    fn test_trail_places_card_and_switches_player() {
        let state = GameState::builder()
            .hand(PlayerId::ONE, &["7S", "2D"])
            .hand(PlayerId::TWO, &["3C"])
            .table_cards(&["KD"])
            .build();

        let t = apply_action(&config(), &state, &Action::trail(PlayerId::ONE, card("7S"))).unwrap();

        assert_eq!(t.state.table().len(), 2);
        assert_eq!(t.state.hand(PlayerId::ONE).len(), 1);
        assert_eq!(t.state.current_player(), PlayerId::TWO);
        assert_eq!(t.message(), "Player 2's turn");
        assert!(t.scheduled.is_none());
        assert_eq!(t.state.history().len(), 1);
    }

    #[test]
    fn test_rejection_leaves_state_untouched() {
        let state = GameState::builder()
            .hand(PlayerId::ONE, &["7S"])
            .hand(PlayerId::TWO, &["3C"])
            .table_cards(&["5D"])
            .build();
        let before = state.clone();

        let err = apply_action(&config(), &state, &Action::capture(PlayerId::ONE, card("7S"), &[ItemId(0)]))
            .unwrap_err();

        assert_eq!(err, ActionError::Rule(RuleViolation::InvalidCapture));
        assert_eq!(state, before);
    }

    #[test]
    fn test_turn_preconditions() {
        let state = GameState::builder()
            .hand(PlayerId::ONE, &["7S"])
            .hand(PlayerId::TWO, &["3C"])
            .table_cards(&["5D"])
            .build();

        let wrong_player = apply_action(&config(), &state, &Action::trail(PlayerId::TWO, card("3C")));
        assert_eq!(wrong_player, Err(RuleViolation::NotYourTurn(PlayerId::ONE).into()));

        let not_held = apply_action(&config(), &state, &Action::trail(PlayerId::ONE, card("8S")));
        assert!(matches!(not_held, Err(ActionError::Rule(RuleViolation::CardNotInHand { .. }))));

        let empty = apply_action(&config(), &state, &Action::capture(PlayerId::ONE, card("7S"), &[]));
        assert_eq!(empty, Err(RuleViolation::EmptySelection.into()));

        let twice = apply_action(
            &config(),
            &state,
            &Action::capture(PlayerId::ONE, card("7S"), &[ItemId(0), ItemId(0)]),
        );
        assert_eq!(twice, Err(RuleViolation::DuplicateSelection.into()));
    }

    #[test]
    fn test_missing_item_is_invariant_violation() {
        let state = GameState::builder()
            .hand(PlayerId::ONE, &["7S"])
            .hand(PlayerId::TWO, &["3C"])
            .build();

        let err = apply_action(&config(), &state, &Action::capture(PlayerId::ONE, card("7S"), &[ItemId(42)]))
            .unwrap_err();

        assert!(!err.is_rule_violation());
    }

    #[test]
    fn test_already_played() {
        let mut state = GameState::builder()
            .hand(PlayerId::ONE, &["7S", "8S"])
            .hand(PlayerId::TWO, &["3C"])
            .build();
        state.turn_complete[PlayerId::ONE] = true;

        let err = apply_action(&config(), &state, &Action::trail(PlayerId::ONE, card("7S"))).unwrap_err();
        assert_eq!(err, RuleViolation::AlreadyPlayed(PlayerId::ONE).into());
    }

    #[test]
    fn test_check_trail_with_controlled_build() {
        let state = GameState::builder()
            .table_build(9, &["4C", "5D"], PlayerId::ONE, false)
            .build();

        let only_nine = [card("9S"), card("3H")];
        assert_eq!(
            check_trail(card("9S"), &only_nine, state.table(), PlayerId::ONE),
            Err(RuleViolation::LastCapturingCard(9))
        );
        assert_eq!(
            check_trail(card("3H"), &only_nine, state.table(), PlayerId::ONE),
            Err(RuleViolation::MustActOnBuild(9))
        );
        assert_eq!(check_trail(card("3H"), &only_nine, state.table(), PlayerId::TWO), Ok(()));

        // The nine went elsewhere: nothing left to act on the build with.
        let no_nine = [card("3H"), card("KD")];
        assert_eq!(check_trail(card("3H"), &no_nine, state.table(), PlayerId::ONE), Ok(()));
    }

    #[test]
    fn test_pair_message_schedules_prompt() {
        let state = GameState::builder()
            .hand(PlayerId::ONE, &["8D", "8S"])
            .hand(PlayerId::TWO, &["3C"])
            .table_cards(&["8C"])
            .build();

        let t = apply_action(&config(), &state, &Action::pair(PlayerId::ONE, card("8D"), &[ItemId(0)])).unwrap();

        assert_eq!(t.message(), "Player 1 paired 8s");
        let pair = t.state.table().iter().next().unwrap().as_pair().unwrap().clone();
        assert_eq!(pair.rank, Rank::Eight);
        let scheduled = t.scheduled.unwrap();
        assert_eq!(scheduled.deferred, Deferred::ShowTurnPrompt);
        assert_eq!(scheduled.after, config().message_delay);
        assert!(!scheduled.is_stale(&t.state));
    }
}
