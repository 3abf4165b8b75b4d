//! The decision capability injected into the engine.
//!
//! The engine never asks "who" is playing: every choice it cannot make on
//! its own goes through a `Decider`. Placement is the only required
//! decision; the resolution choices default to the greedy rules in
//! [`super::greedy`], so a learned placement policy gets sensible payments
//! for free.

use crate::buildings::Building;
use crate::cards::Card;
use crate::core::{PlayerId, ResourceKind, Resources};
use crate::players::{Player, ToolSelection};

use super::greedy;

/// Makes the choices of one seat.
pub trait Decider {
    /// Pick one of `legal` (encoded action indices, never empty) given the
    /// state vector of the deciding player.
    fn decide_action(&mut self, state: &[f32], legal: &[usize]) -> usize;

    /// Which tools to add to a roll of `pips` that is divided by `divisor`.
    fn decide_tools(&mut self, player: &Player, pips: u32, divisor: u32) -> ToolSelection {
        greedy::tools(player, pips, divisor)
    }

    /// Materials to pay for `card`, or `None` to pass.
    fn decide_card_payment(&mut self, player: &Player, card: &Card) -> Option<Resources> {
        greedy::card_payment(player, card)
    }

    /// Materials to pay for `building`, or `None` to pass.
    fn decide_building_payment(
        &mut self,
        player: &Player,
        building: &Building,
    ) -> Option<Resources> {
        greedy::building_payment(player, building)
    }

    /// One resource among `options`.
    fn choose_resource(&mut self, _player: &Player, options: &[ResourceKind]) -> ResourceKind {
        greedy::resource(options)
    }

    /// Index of the die to take from `dice`.
    fn choose_die(&mut self, _player: &Player, dice: &[u8]) -> usize {
        greedy::die(dice)
    }
}

impl<D: Decider + ?Sized> Decider for Box<D> {
    fn decide_action(&mut self, state: &[f32], legal: &[usize]) -> usize {
        (**self).decide_action(state, legal)
    }

    fn decide_tools(&mut self, player: &Player, pips: u32, divisor: u32) -> ToolSelection {
        (**self).decide_tools(player, pips, divisor)
    }

    fn decide_card_payment(&mut self, player: &Player, card: &Card) -> Option<Resources> {
        (**self).decide_card_payment(player, card)
    }

    fn decide_building_payment(
        &mut self,
        player: &Player,
        building: &Building,
    ) -> Option<Resources> {
        (**self).decide_building_payment(player, building)
    }

    fn choose_resource(&mut self, player: &Player, options: &[ResourceKind]) -> ResourceKind {
        (**self).choose_resource(player, options)
    }

    fn choose_die(&mut self, player: &Player, dice: &[u8]) -> usize {
        (**self).choose_die(player, dice)
    }
}

// =============================================================================
// Seats
// =============================================================================

/// Maps every seat at the table to its decider.
pub trait Seats {
    /// The decider for `player`.
    fn seat(&mut self, player: PlayerId) -> &mut dyn Decider;

    /// Whether every one of `player_count` seats has a decider.
    fn covers(&self, player_count: usize) -> bool;
}

impl<D: Decider> Seats for Vec<D> {
    fn seat(&mut self, player: PlayerId) -> &mut dyn Decider {
        &mut self[player.index()]
    }

    fn covers(&self, player_count: usize) -> bool {
        self.len() >= player_count
    }
}

impl<D: Decider, const N: usize> Seats for [D; N] {
    fn seat(&mut self, player: PlayerId) -> &mut dyn Decider {
        &mut self[player.index()]
    }

    fn covers(&self, player_count: usize) -> bool {
        N >= player_count
    }
}

/// One decider playing every seat.
#[derive(Clone, Debug, Default)]
pub struct SharedSeat<D>(pub D);

impl<D: Decider> Seats for SharedSeat<D> {
    fn seat(&mut self, _player: PlayerId) -> &mut dyn Decider {
        &mut self.0
    }

    fn covers(&self, _player_count: usize) -> bool {
        true
    }
}
