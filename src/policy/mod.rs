//! Deciders: who makes the choices the rules leave open.
//!
//! - `Decider`: the per-seat capability the engine calls into
//! - `Seats`: maps seats to deciders (`Vec`, arrays, or one `SharedSeat`)
//! - `GreedyDecider`, `RandomDecider`, `ScriptedDecider`: built-in players

pub mod decider;
pub mod greedy;
pub mod random;
pub mod scripted;

pub use decider::{Decider, Seats, SharedSeat};
pub use greedy::GreedyDecider;
pub use random::RandomDecider;
pub use scripted::ScriptedDecider;
