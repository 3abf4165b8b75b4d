//! The round state machine.
//!
//! A `Game` moves through placement, resolution, feeding and replenishment
//! each round until a card deck or building stack runs dry or the round
//! limit is reached:
//!
//! - `game`: setup, queries and `execute_an_action`
//! - `round`: resolution and the `play_step`/`run_round`/`run_game` drivers
//! - `snapshot`: serializable copies of a game in progress
//! - `outcome`: phases and reported results

pub mod game;
pub mod outcome;
pub mod round;
pub mod snapshot;

pub use game::Game;
pub use outcome::{ActionOutcome, GameResult, Phase, RoundSummary, StepOutcome};
pub use snapshot::GameSnapshot;
