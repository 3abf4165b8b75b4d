//! Placement actions and the fixed action space.
//!
//! An action is "put `workers` workers on location `location`". The action
//! space enumerates every such pair the board could ever accept (worker
//! counts up to the location's capacity and the largest tribe), so an action
//! index means the same thing for the whole lifetime of a game.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::error::PlacementError;
use super::player::PlayerId;

/// Place `workers` workers on board location `location`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    /// Board index of the target location.
    pub location: usize,

    /// Number of workers committed.
    pub workers: u32,
}

impl Action {
    /// Create a placement action.
    #[must_use]
    pub const fn place(location: usize, workers: u32) -> Self {
        Self { location, workers }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "place {} on #{}", self.workers, self.location)
    }
}

/// Bidirectional mapping between actions and dense indices.
///
/// ```
/// use stone_age::core::{Action, ActionSpace};
///
/// let space = ActionSpace::new(&[1, 2, 7], 10);
/// assert_eq!(space.len(), 1 + 2 + 7);
///
/// let index = space.index_of(Action::place(1, 2)).unwrap();
/// assert_eq!(space.action(index).unwrap(), Action::place(1, 2));
/// ```
#[derive(Clone, Debug)]
pub struct ActionSpace {
    actions: Vec<Action>,
    index: FxHashMap<Action, usize>,
}

impl ActionSpace {
    /// Build the space for a board with the given location capacities.
    ///
    /// Worker counts per location run from 1 to `min(capacity, max_workers)`.
    #[must_use]
    pub fn new(capacities: &[u32], max_workers: u32) -> Self {
        let mut actions = Vec::new();
        let mut index = FxHashMap::default();

        for (location, &capacity) in capacities.iter().enumerate() {
            for workers in 1..=capacity.min(max_workers) {
                let action = Action::place(location, workers);
                index.insert(action, actions.len());
                actions.push(action);
            }
        }

        Self { actions, index }
    }

    /// Number of actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the space is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Decode an index.
    pub fn action(&self, index: usize) -> Result<Action, PlacementError> {
        self.actions
            .get(index)
            .copied()
            .ok_or(PlacementError::UnknownAction(index))
    }

    /// Encode an action, if it is part of the space.
    #[must_use]
    pub fn index_of(&self, action: Action) -> Option<usize> {
        self.index.get(&action).copied()
    }

    /// Iterate over `(index, action)` in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Action)> + '_ {
        self.actions.iter().copied().enumerate()
    }
}

/// A placement that was carried out, kept for replays.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The seat that placed.
    pub player: PlayerId,

    /// Encoded action index.
    pub index: usize,

    /// The decoded action.
    pub action: Action,

    /// Round in which the placement happened.
    pub round: u32,

    /// Sequence number within the round.
    pub sequence: u32,
}
