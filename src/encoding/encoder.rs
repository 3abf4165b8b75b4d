//! Flat state vectors for learning agents.

use serde::{Deserialize, Serialize};

use crate::board::{BOARD_SIZE, BUILDING_SLOTS, CARD_SLOTS};
use crate::buildings::BUILDING_STACKS;
use crate::cards::DeckId;
use crate::core::{PlayerId, MAX_PLAYERS};
use crate::players::TOOL_SLOTS;
use crate::rules::Game;

use super::layout::{self, STATE_SIZE};

/// Encoded game state as a flat tensor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncodedState {
    /// Flattened tensor data.
    pub tensor: Vec<f32>,

    /// Shape of the tensor.
    pub shape: Vec<usize>,
}

impl EncodedState {
    pub fn new(tensor: Vec<f32>, shape: Vec<usize>) -> Self {
        debug_assert_eq!(
            tensor.len(),
            shape.iter().product::<usize>(),
            "Tensor length must match shape product"
        );
        Self { tensor, shape }
    }

    /// A zero-filled state of the given shape.
    pub fn zeros(shape: Vec<usize>) -> Self {
        let size = shape.iter().product();
        Self {
            tensor: vec![0.0; size],
            shape,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tensor.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tensor.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<f32> {
        self.tensor.get(index).copied()
    }

    /// Set element at a flat index; out-of-range writes are ignored.
    pub fn set(&mut self, index: usize, value: f32) {
        if let Some(slot) = self.tensor.get_mut(index) {
            *slot = value;
        }
    }

    /// Take the tensor.
    #[must_use]
    pub fn into_vec(self) -> Vec<f32> {
        self.tensor
    }
}

/// Turns a game into a tensor from one seat's point of view.
pub trait StateEncoder {
    /// Encode `game` as seen by `perspective`.
    fn encode(&self, game: &Game, perspective: PlayerId) -> EncodedState;

    /// Shape of every encoded state.
    fn output_shape(&self) -> Vec<usize>;

    /// Number of action indices a policy has to cover.
    fn action_space_size(&self) -> usize;
}

/// The fixed 143-element encoding.
///
/// Values are raw counts, not normalised. Seats beyond the table size and
/// empty slots encode as zeros.
#[derive(Clone, Debug)]
pub struct FlatEncoder {
    action_space: usize,
}

impl FlatEncoder {
    #[must_use]
    pub fn new(action_space: usize) -> Self {
        Self { action_space }
    }
}

impl StateEncoder for FlatEncoder {
    fn encode(&self, game: &Game, perspective: PlayerId) -> EncodedState {
        let mut state = EncodedState::zeros(vec![STATE_SIZE]);
        let player = game.player(perspective);

        state.set(layout::ROUND, game.round() as f32);
        state.set(layout::WHEAT, player.wheat as f32);
        state.set(layout::TOTAL_WORKERS, player.total_workers as f32);
        state.set(layout::AVAILABLE_WORKERS, player.available_workers as f32);
        state.set(layout::SCORE, player.score() as f32);

        for (kind, amount) in player.resources.iter() {
            state.set(layout::RESOURCES + kind.index(), amount as f32);
        }

        for (i, &multiplier) in player.multipliers.iter().enumerate() {
            state.set(layout::MULTIPLIERS + i, multiplier as f32);
        }

        for (slot, tool) in player.tools.iter().enumerate().take(TOOL_SLOTS) {
            state.set(layout::TOOLS + 2 * slot, f32::from(tool.level));
            state.set(layout::TOOLS + 2 * slot + 1, f32::from(u8::from(tool.available)));
        }

        for (i, &level) in player.one_use_tools.iter().take(4).enumerate() {
            state.set(layout::ONE_USE_TOOLS + i, f32::from(level));
        }

        for deck in DeckId::all() {
            let base = layout::OWNED_CARDS + deck.index() * layout::OWNED_PER_DECK;
            for (i, card) in player.owned_cards[deck.index()]
                .iter()
                .take(layout::OWNED_PER_DECK)
                .enumerate()
            {
                state.set(base + i, card.scoring.code() as f32);
            }
        }

        for (index, location) in game.board().iter().enumerate().take(BOARD_SIZE) {
            for (seat, &workers) in location.occupants().values().enumerate().take(MAX_PLAYERS) {
                state.set(
                    layout::OCCUPANCY + index * MAX_PLAYERS + seat,
                    workers as f32,
                );
            }
        }

        for stack in 0..BUILDING_STACKS {
            state.set(
                layout::STACK_SIZES + stack,
                game.building_stack(stack).len() as f32,
            );
        }

        for (i, index) in BUILDING_SLOTS.enumerate() {
            if let Some(building) = game.board()[index].building() {
                let base = layout::BUILDINGS + i * layout::BUILDING_FIELDS;
                for (field, value) in building.descriptor().into_iter().enumerate() {
                    state.set(base + field, value as f32);
                }
            }
        }

        let deck_size: usize = DeckId::all().map(|deck| game.card_deck(deck).len()).sum();
        state.set(layout::DECK_SIZE, deck_size as f32);

        for (i, index) in CARD_SLOTS.enumerate() {
            if let Some(card) = game.board()[index].card() {
                let base = layout::CARD_SLOTS + i * layout::CARD_FIELDS;
                let [data0, data1] = card.effect.payload();
                let fields = [
                    card.effect.type_code(),
                    card.cost,
                    card.scoring.code(),
                    data0,
                    data1,
                ];
                for (field, value) in fields.into_iter().enumerate() {
                    state.set(base + field, value as f32);
                }
            }
        }

        state
    }

    fn output_shape(&self) -> Vec<usize> {
        vec![STATE_SIZE]
    }

    fn action_space_size(&self) -> usize {
        self.action_space
    }
}
