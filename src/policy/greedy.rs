//! Greedy baseline decisions.
//!
//! These are the default resolution choices of every [`Decider`] and the
//! whole behaviour of [`GreedyDecider`]. They are deterministic and only
//! look at the deciding player's own ledger.

use crate::board::{self, LocationKind, UtilityKind};
use crate::buildings::{Building, BuildingRule};
use crate::cards::Card;
use crate::core::{Action, ActionSpace, ResourceKind, Resources};
use crate::encoding::layout;
use crate::players::{Player, ToolSelection};

use super::decider::Decider;

/// Spend the fewest tool pips that lift `pips` to the next multiple of
/// `divisor`, or nothing when no combination gets there.
#[must_use]
pub fn tools(player: &Player, pips: u32, divisor: u32) -> ToolSelection {
    if divisor == 0 {
        return ToolSelection::none();
    }
    let remainder = pips % divisor;
    if remainder == 0 {
        return ToolSelection::none();
    }
    let needed = divisor - remainder;

    let mut usable: Vec<(usize, u32)> = player
        .tools
        .iter()
        .enumerate()
        .filter(|(_, tool)| tool.usable())
        .map(|(slot, tool)| (slot, u32::from(tool.level)))
        .collect();
    usable.sort_by_key(|&(slot, level)| (level, slot));

    // Smallest single tool that is enough.
    if let Some(&(slot, _)) = usable.iter().find(|&&(_, level)| level >= needed) {
        return ToolSelection::slots(&[slot]);
    }

    // Otherwise stack tools from the top until the gap is closed.
    let mut chosen = Vec::new();
    let mut bonus = 0;
    for &(slot, level) in usable.iter().rev() {
        chosen.push(slot);
        bonus += level;
        if bonus >= needed {
            return ToolSelection::slots(&chosen);
        }
    }

    // One-use tools only when they close the gap on their own.
    player
        .one_use_tools
        .iter()
        .enumerate()
        .filter(|&(_, &level)| u32::from(level) >= needed)
        .min_by_key(|&(index, &level)| (level, index))
        .map_or_else(ToolSelection::none, |(index, _)| {
            ToolSelection::none().with_one_use(&[index])
        })
}

/// Pay a card with the cheapest materials first.
#[must_use]
pub fn card_payment(player: &Player, card: &Card) -> Option<Resources> {
    if !card.is_able_to_buy(player) {
        return None;
    }
    Some(cheapest_first(&player.resources, &Resources::new(), card.cost))
}

/// Pay a building: the exact requirement, or for a flexible tile one unit
/// of each of the cheapest kinds topped up with the cheapest materials.
#[must_use]
pub fn building_payment(player: &Player, building: &Building) -> Option<Resources> {
    let held = &player.resources;
    if !building.is_able_to_buy(held) {
        return None;
    }
    match building.rule {
        BuildingRule::Certain { required } => Some(required),
        BuildingRule::Flex { total, variety } => {
            let mut seed = Resources::new();
            for kind in ResourceKind::MATERIALS
                .into_iter()
                .filter(|&kind| held.get(kind) > 0)
                .take(variety as usize)
            {
                seed.add(kind, 1);
            }
            Some(cheapest_first(held, &seed, total))
        }
    }
}

/// Top `start` up to `total` units using the cheapest held materials.
fn cheapest_first(held: &Resources, start: &Resources, total: u32) -> Resources {
    let mut payment = *start;
    let mut remaining = total.saturating_sub(payment.total());
    for kind in ResourceKind::MATERIALS {
        if remaining == 0 {
            break;
        }
        let spare = held.get(kind).saturating_sub(payment.get(kind));
        let take = spare.min(remaining);
        payment.add(kind, take);
        remaining -= take;
    }
    payment
}

/// The most valuable option.
#[must_use]
pub fn resource(options: &[ResourceKind]) -> ResourceKind {
    options
        .iter()
        .copied()
        .max_by_key(|kind| kind.value())
        .unwrap_or(ResourceKind::Wood)
}

/// The highest face.
#[must_use]
pub fn die(dice: &[u8]) -> usize {
    dice.iter()
        .enumerate()
        .max_by_key(|&(index, &face)| (face, std::cmp::Reverse(index)))
        .map_or(0, |(index, _)| index)
}

// =============================================================================
// Greedy placement
// =============================================================================

/// A rule-of-thumb player.
///
/// With an action space it ranks placements from the state vector: buy when
/// materials allow, hunt when the tribe would go hungry, otherwise gather
/// with as many workers as possible. Without one it takes the first legal
/// action.
#[derive(Clone, Debug, Default)]
pub struct GreedyDecider {
    space: Option<ActionSpace>,
}

impl GreedyDecider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rank placements using the game's action space.
    #[must_use]
    pub fn with_action_space(space: ActionSpace) -> Self {
        Self { space: Some(space) }
    }

    fn rank(state: &[f32], action: Action) -> f32 {
        let at = |offset: usize| state.get(offset).copied().unwrap_or(0.0);
        let wheat = at(layout::WHEAT);
        let workers = at(layout::TOTAL_WORKERS);
        let food = at(layout::RESOURCES + ResourceKind::Food.index());
        let materials: f32 = ResourceKind::MATERIALS
            .iter()
            .map(|kind| at(layout::RESOURCES + kind.index()))
            .sum();
        let hungry = food < workers - wheat;
        let placed = action.workers as f32;

        match board::location_kind(action.location) {
            Some(LocationKind::BuildingSlot) if materials >= 4.0 => 50.0,
            Some(LocationKind::CardSlot) if materials >= 2.0 => 40.0,
            Some(LocationKind::Gathering(ResourceKind::Food)) if hungry => 35.0 + placed,
            Some(LocationKind::Utility(UtilityKind::Farm)) if wheat < 10.0 => 30.0,
            Some(LocationKind::Utility(UtilityKind::House)) if !hungry && action.workers == 2 => {
                25.0
            }
            Some(LocationKind::Utility(UtilityKind::ToolShop)) => 20.0,
            Some(LocationKind::Gathering(ResourceKind::Food)) => 5.0 + placed,
            Some(LocationKind::Gathering(_)) => 10.0 + 2.0 * placed,
            _ => 0.0,
        }
    }
}

impl Decider for GreedyDecider {
    fn decide_action(&mut self, state: &[f32], legal: &[usize]) -> usize {
        let Some(space) = &self.space else {
            return legal[0];
        };

        let mut best = legal[0];
        let mut best_rank = f32::NEG_INFINITY;
        for &index in legal {
            let Ok(action) = space.action(index) else {
                continue;
            };
            let rank = Self::rank(state, action);
            if rank > best_rank {
                best = index;
                best_rank = rank;
            }
        }
        best
    }
}
