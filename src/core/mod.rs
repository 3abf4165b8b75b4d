//! Core engine types: seats, resources, actions, RNG, configuration, errors.
//!
//! Everything here is independent of the board layout and card content;
//! the other modules build the rules on top of these types.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod resources;
pub mod rng;

pub use action::{Action, ActionRecord, ActionSpace};
pub use config::{GameConfig, RewardConfig, MAX_TRIBE_SIZE};
pub use error::{ConfigurationError, GameError, PlacementError, PurchaseError};
pub use player::{PlayerId, PlayerMap, MAX_PLAYERS};
pub use resources::{Overdraw, ResourceKind, Resources};
pub use rng::{DicePool, GameRng, GameRngState};
