//! Error types.
//!
//! Placement and purchase errors are recoverable: the rejected request
//! leaves every piece of state untouched and the caller may try again.
//! Configuration errors abort construction. Running out of cards or
//! buildings is the end of the game, not an error.

use thiserror::Error;

use super::resources::{Overdraw, ResourceKind};

/// A worker placement was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("location {location} has room for {available} worker(s), {requested} requested")]
    CapacityExceeded {
        location: usize,
        requested: u32,
        available: u32,
    },

    #[error("location {0} has nothing left to take")]
    LocationExhausted(usize),

    #[error("player has {available} available worker(s), {requested} requested")]
    InsufficientWorkers { requested: u32, available: u32 },

    #[error("at least one worker must be placed")]
    ZeroWorkers,

    #[error("action index {0} is outside the action space")]
    UnknownAction(usize),

    #[error("workers can only be placed during the placement phase")]
    WrongPhase,
}

/// A card or building purchase (or a choice made during one) was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PurchaseError {
    #[error("cannot afford: {needed} material(s) needed, {held} held")]
    CannotAfford { needed: u32, held: u32 },

    #[error("selected {requested} {kind} but only {held} held")]
    SelectionNotHeld {
        kind: ResourceKind,
        requested: u32,
        held: u32,
    },

    #[error("selection totals {selected}, exactly {required} required")]
    SelectionTotalMismatch { selected: u32, required: u32 },

    #[error("selection uses {selected} kind(s), at least {required} required")]
    InsufficientVariety { selected: u32, required: u32 },

    #[error("selection contains food, which cannot be spent on purchases")]
    FoodNotAccepted,

    #[error("chosen option {0} is not among the offered options")]
    SelectionOutsideOptions(String),
}

impl From<Overdraw> for PurchaseError {
    fn from(overdraw: Overdraw) -> Self {
        PurchaseError::SelectionNotHeld {
            kind: overdraw.kind,
            requested: overdraw.requested,
            held: overdraw.held,
        }
    }
}

/// The game could not be constructed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("state vector has {actual} elements, layout requires {expected}")]
    StateSizeMismatch { expected: usize, actual: usize },

    #[error("malformed deck: {0}")]
    MalformedDeck(String),

    #[error("player count must be 2-4, got {0}")]
    InvalidPlayerCount(usize),

    #[error("invalid setting `{name}`: {reason}")]
    InvalidSetting { name: &'static str, reason: String },

    #[error("invalid snapshot: {0}")]
    Snapshot(String),
}

/// Any error surfaced by the game interface.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error(transparent)]
    Placement(#[from] PlacementError),

    #[error(transparent)]
    Purchase(#[from] PurchaseError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("the game is over")]
    GameOver,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_error_messages() {
        let err = PlacementError::CapacityExceeded {
            location: 4,
            requested: 3,
            available: 2,
        };
        assert_eq!(
            err.to_string(),
            "location 4 has room for 2 worker(s), 3 requested"
        );
    }

    #[test]
    fn test_game_error_wraps_sources() {
        let err: GameError = PurchaseError::FoodNotAccepted.into();
        assert!(matches!(err, GameError::Purchase(PurchaseError::FoodNotAccepted)));
        assert_eq!(
            err.to_string(),
            "selection contains food, which cannot be spent on purchases"
        );
    }
}
