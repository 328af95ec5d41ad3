//! Deals, round ends and the end of the game.
//!
//! ```text
//! AwaitingDeal --deal_initial--> InPlay --hands empty--> RoundEnding --advance_round--> InPlay
//!                                   |
//!                                   +--hands and deck empty--> GameOver
//! ```

use std::cmp::Ordering;

use tracing::{debug, error, info};

use super::scoring::tally;
use super::turn::{Deferred, Scheduled};
use crate::core::{GameConfig, GameState, InvariantViolation, Phase, PlayerId, PlayerMap};

/// Deal the opening hands and table cards.
pub fn deal_initial(config: &GameConfig, state: &GameState) -> Result<GameState, InvariantViolation> {
    expect_phase(state, Phase::AwaitingDeal)?;
    let mut next = state.clone();
    deal_opening(config, &mut next);
    Ok(next)
}

/// One card to each player, then one to the table, until everyone has their
/// share.
pub(crate) fn deal_opening(config: &GameConfig, state: &mut GameState) {
    for i in 0..config.hand_size.max(config.initial_table_cards) {
        if i < config.hand_size {
            state.deal_hands(1);
        }
        if i < config.initial_table_cards {
            if let Some(card) = state.deck.pop_back() {
                state.table.place_card(card);
            }
        }
    }

    state.phase = Phase::InPlay;
    state.current_player = PlayerId::ONE;
    state.turn_complete = PlayerMap::with_value(false);
    let prompt = state.turn_prompt();
    state.touch(prompt);

    info!(
        table = state.table.len(),
        deck = state.deck.len(),
        "dealt opening hands"
    );
}

/// Deal fresh hands after a round ended. No cards go to the table.
pub fn advance_round(config: &GameConfig, state: &GameState) -> Result<GameState, InvariantViolation> {
    expect_phase(state, Phase::RoundEnding)?;

    let mut next = state.clone();
    next.deal_hands(config.hand_size);
    next.round += 1;
    next.phase = Phase::InPlay;
    if next.hands[next.current_player].is_empty() {
        next.current_player = next.current_player.opponent();
    }
    next.turn_complete = PlayerMap::with_value(false);
    let message = format!("Round {} - {}", next.round, next.turn_prompt());
    next.touch(message);

    info!(round = next.round, deck = next.deck.len(), "dealt new round");
    Ok(next)
}

/// Called once both hands are empty. Either waits for a redeal or ends the
/// game straight away when the deck is exhausted.
pub(crate) fn close_round(config: &GameConfig, state: &mut GameState) -> Option<Scheduled> {
    if state.deck.is_empty() {
        finish_game(config, state);
        return None;
    }

    state.phase = Phase::RoundEnding;
    state.touch("Round over - dealing new cards");
    info!(round = state.round, deck = state.deck.len(), "round over");
    Some(Scheduled::new(config.redeal_delay, state, Deferred::DealNextRound))
}

/// Sweep the table to the last capturer, tally, and freeze the state.
pub(crate) fn finish_game(config: &GameConfig, state: &mut GameState) {
    let remainder = state.table.clear_into_cards();
    match state.last_capturer {
        Some(player) => state.piles[player].extend(remainder),
        None => state.discarded.extend(remainder),
    }

    let (scores, breakdown) = tally(&state.piles, &state.scores, &config.scoring);
    state.scores = scores;
    state.final_breakdown = Some(breakdown);
    state.phase = Phase::GameOver;

    let (one, two) = (state.scores[PlayerId::ONE], state.scores[PlayerId::TWO]);
    let message = match one.cmp(&two) {
        Ordering::Greater => format!("Game over - {} wins {one} to {two}", PlayerId::ONE),
        Ordering::Less => format!("Game over - {} wins {two} to {one}", PlayerId::TWO),
        Ordering::Equal => format!("Game over - tied at {one}"),
    };
    state.touch(message);

    info!(player_one = one, player_two = two, "game over");
}

/// Apply a deferred transition if `state` is still the one it was issued for.
///
/// Returns `None` for a stale follow-up, which the host should drop.
pub fn apply_scheduled(config: &GameConfig, state: &GameState, scheduled: &Scheduled) -> Option<GameState> {
    if scheduled.is_stale(state) {
        debug!(
            guard = scheduled.guard,
            revision = state.revision(),
            deferred = ?scheduled.deferred,
            "dropping stale scheduled transition"
        );
        return None;
    }

    match scheduled.deferred {
        Deferred::ShowTurnPrompt => {
            if state.phase() != Phase::InPlay {
                return None;
            }
            let mut next = state.clone();
            let prompt = next.turn_prompt();
            next.touch(prompt);
            Some(next)
        }
        Deferred::DealNextRound => advance_round(config, state).ok(),
    }
}

fn expect_phase(state: &GameState, phase: Phase) -> Result<(), InvariantViolation> {
    if state.phase() == phase {
        Ok(())
    } else {
        error!(expected = %phase, actual = %state.phase(), "transition in wrong phase");
        Err(InvariantViolation::UnexpectedPhase(state.phase()))
    }
}
