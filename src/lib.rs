//! # stone-age
//!
//! A deterministic rules engine for the Stone Age board game, built for
//! reinforcement-learning agents.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Every random event is drawn from one seeded
//!    ChaCha8 stream. The same seed and the same decisions replay the same
//!    game.
//!
//! 2. **N-Player First**: Two to four seats; per-seat data lives in
//!    `PlayerMap`, indexed by `PlayerId`.
//!
//! 3. **Decisions at the seams**: The engine never guesses. Placements,
//!    tool use, payments and dice picks are asked of a `Decider`.
//!
//! ## Architecture
//!
//! - **Round state machine**: placement, resolution, feeding, replenish,
//!   until a card deck or building stack runs dry.
//!
//! - **Persistent Data Structures**: decks, stacks and history use `im`
//!   vectors so cloning a game is cheap.
//!
//! - **Fixed encodings**: a stable action space and a 143-element state
//!   vector for learning agents.
//!
//! ## Modules
//!
//! - `core`: seats, resources, actions, RNG, configuration, errors
//! - `board`: the sixteen locations and their occupants
//! - `players`: the per-seat ledger, tools, feeding and scoring
//! - `cards`: civilization cards, their effects and the decks
//! - `buildings`: building tiles and the stacks
//! - `policy`: the `Decider` seam and built-in deciders
//! - `encoding`: the flat state vector
//! - `rules`: the `Game` and its round drivers

pub mod core;
pub mod board;
pub mod players;
pub mod cards;
pub mod buildings;
pub mod policy;
pub mod encoding;
pub mod rules;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, ActionSpace,
    ConfigurationError, GameError, PlacementError, PurchaseError,
    GameConfig, RewardConfig,
    GameRng, GameRngState,
    PlayerId, PlayerMap,
    ResourceKind, Resources,
};

pub use crate::board::{Board, Location, LocationKind, BOARD_SIZE};

pub use crate::players::{Player, Tool, ToolSelection};

pub use crate::cards::{Card, CardEffect, CardScoring, DeckId};

pub use crate::buildings::{Building, BuildingRule};

pub use crate::policy::{
    Decider, Seats, SharedSeat,
    GreedyDecider, RandomDecider, ScriptedDecider,
};

pub use crate::encoding::{EncodedState, FlatEncoder, StateEncoder, STATE_SIZE};

pub use crate::rules::{
    ActionOutcome, Game, GameResult, GameSnapshot, Phase, RoundSummary, StepOutcome,
};
