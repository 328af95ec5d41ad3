//! Build validation and construction.
//!
//! A build groups the played card with selected table items under one
//! value that only a matching card can later capture. The builder must keep
//! such a card in hand.
//!
//! ## Simple and compound builds
//!
//! The usual target is the full sum of the played card and the selection.
//! When the hand cannot capture that sum, the cards may instead be grouped
//! into two or more parts that each reach a smaller target (play a 5 onto a
//! loose 5 while holding another 5; play a 9 onto a 4 and a 5 while holding
//! a 9). Such a build is compound: it is justified more than once over and
//! can only be taken whole, by exact value.

use crate::cards::Card;
use crate::core::{ItemId, PlayerId, RuleViolation};
use crate::table::{Build, Members, TableItem, TableItemKind};

/// Result of a successful build validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildPlan {
    /// Value the new build will carry.
    pub target_value: u8,
    /// Whether the build is compound.
    pub compound: bool,
    /// Simple build being extended, if any.
    pub modifies: Option<ItemId>,
}

impl BuildPlan {
    #[must_use]
    pub fn is_modification(&self) -> bool {
        self.modifies.is_some()
    }
}

/// Check whether `played` plus `selected` makes a legal build for a player
/// holding `hand` (which may still contain `played`).
///
/// Rules, first failure wins: something selected; no face cards; no pairs
/// or compound builds; a capturing card held; at most one build extended.
pub fn validate_build(played: Card, selected: &[&TableItem], hand: &[Card]) -> Result<BuildPlan, RuleViolation> {
    if selected.is_empty() {
        return Err(RuleViolation::EmptySelection);
    }

    let played_value = played.build_value().ok_or(RuleViolation::FaceCardInBuild)?;
    if selected.iter().any(|item| item.as_card().is_some_and(Card::is_face)) {
        return Err(RuleViolation::FaceCardInBuild);
    }

    let mut parts = vec![played_value];
    for item in selected {
        match &item.kind {
            TableItemKind::Pair(_) => return Err(RuleViolation::LockedItem),
            TableItemKind::Build(build) if build.compound => return Err(RuleViolation::LockedItem),
            _ => {}
        }
        parts.push(item.combination_value().ok_or(RuleViolation::LockedItem)?);
    }

    let total: u32 = parts.iter().map(|&v| u32::from(v)).sum();
    let capturers: Vec<u8> = hand
        .iter()
        .filter(|&&card| card != played)
        .filter_map(|card| card.build_value())
        .collect();

    let (target_value, compound) = if let Some(v) = capturers.iter().copied().find(|&v| u32::from(v) == total) {
        (v, false)
    } else {
        compound_target(&parts, total, &capturers)
            .map(|t| (t, true))
            .ok_or(RuleViolation::NoCaptureCardForBuild(total.min(u32::from(u8::MAX)) as u8))?
    };

    let mut builds = selected.iter().filter(|item| item.as_build().is_some());
    let modifies = builds.next().map(|item| item.id);
    if builds.next().is_some() {
        return Err(RuleViolation::MultipleBuilds);
    }

    Ok(BuildPlan {
        target_value,
        compound,
        modifies,
    })
}

/// Largest held value below `total` that the parts split into evenly.
fn compound_target(parts: &[u8], total: u32, capturers: &[u8]) -> Option<u8> {
    let mut candidates: Vec<u8> = capturers
        .iter()
        .copied()
        .filter(|&t| u32::from(t) < total && total % u32::from(t) == 0)
        .collect();
    candidates.sort_unstable_by(|a, b| b.cmp(a));
    candidates.dedup();

    candidates.into_iter().find(|&t| splits_evenly(parts, t))
}

/// Whether `parts` can be grouped so that every group sums to `target`.
fn splits_evenly(parts: &[u8], target: u8) -> bool {
    if parts.iter().any(|&p| p > target) {
        return false;
    }
    let total: u32 = parts.iter().map(|&v| u32::from(v)).sum();
    let groups = (total / u32::from(target)) as usize;

    let mut sorted = parts.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    let mut bins = vec![0u8; groups];
    fill_bins(&sorted, &mut bins, target)
}

fn fill_bins(parts: &[u8], bins: &mut [u8], target: u8) -> bool {
    let Some((&part, rest)) = parts.split_first() else {
        return bins.iter().all(|&b| b == target);
    };

    for i in 0..bins.len() {
        if bins[i] + part > target {
            continue;
        }
        // Empty bins are interchangeable; trying more than one is wasted work.
        if bins[i] == 0 && bins[..i].contains(&0) {
            continue;
        }
        bins[i] += part;
        if fill_bins(rest, bins, target) {
            return true;
        }
        bins[i] -= part;
    }
    false
}

/// Assemble the build described by `plan`.
///
/// Members are the played card followed by the cards of every selected item,
/// including all members of an extended build.
#[must_use]
pub fn construct_build(played: Card, selected: &[&TableItem], plan: &BuildPlan, controller: PlayerId) -> Build {
    let mut cards = Members::new();
    cards.push(played);
    for item in selected {
        cards.extend(item.cards().iter().copied());
    }

    Build {
        value: plan.target_value,
        cards,
        controller,
        compound: plan.compound,
    }
}
