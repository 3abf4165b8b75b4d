//! Tools: four persistent slots plus consumable one-use tools.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Number of persistent tool slots every player owns.
pub const TOOL_SLOTS: usize = 4;

/// A persistent tool slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tool {
    /// Pips added when the tool is used. Level 0 means no tool yet.
    pub level: u8,

    /// Whether the tool can still be used this round.
    pub available: bool,
}

impl Tool {
    /// An empty, available slot.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            level: 0,
            available: true,
        }
    }

    /// Whether using this tool would add anything right now.
    #[must_use]
    pub fn usable(&self) -> bool {
        self.available && self.level > 0
    }
}

/// Which tools a player spends on one dice roll.
///
/// `slots` index the persistent tools, `one_use` index the player's
/// one-use tool list. Both must be free of duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSelection {
    pub slots: SmallVec<[usize; TOOL_SLOTS]>,
    pub one_use: SmallVec<[usize; 4]>,
}

impl ToolSelection {
    /// Use no tools.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Use the given persistent slots.
    #[must_use]
    pub fn slots(slots: &[usize]) -> Self {
        Self {
            slots: SmallVec::from_slice(slots),
            one_use: SmallVec::new(),
        }
    }

    /// Also spend the given one-use tools.
    #[must_use]
    pub fn with_one_use(mut self, one_use: &[usize]) -> Self {
        self.one_use.extend_from_slice(one_use);
        self
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty() && self.one_use.is_empty()
    }
}
