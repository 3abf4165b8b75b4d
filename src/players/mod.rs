//! Player ledgers and tools.

pub mod player;
pub mod tools;

pub use player::{FeedingOutcome, MultiplierTarget, Player};
pub use tools::{Tool, ToolSelection, TOOL_SLOTS};
