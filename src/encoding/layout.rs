//! Offsets of the flat state vector.

use crate::core::ConfigurationError;

/// Length of every state vector.
pub const STATE_SIZE: usize = 143;

// Scalars
pub const ROUND: usize = 0;
pub const WHEAT: usize = 1;
pub const TOTAL_WORKERS: usize = 2;
pub const AVAILABLE_WORKERS: usize = 3;
pub const SCORE: usize = 4;

/// Five resource counts in `ResourceKind` order.
pub const RESOURCES: usize = 5;
/// Four civilization multipliers.
pub const MULTIPLIERS: usize = 10;
/// `[level, available]` for each persistent tool.
pub const TOOLS: usize = 14;
/// Up to four one-use tool levels.
pub const ONE_USE_TOOLS: usize = 22;
/// Scoring codes of the first eight cards owned from each deck.
pub const OWNED_CARDS: usize = 26;
/// Workers per location and seat (16 x 4).
pub const OCCUPANCY: usize = 42;
/// Tiles left in each building stack.
pub const STACK_SIZES: usize = 106;
/// Three numbers per building on offer.
pub const BUILDINGS: usize = 110;
/// Cards left in both decks.
pub const DECK_SIZE: usize = 122;
/// Five numbers per card on offer.
pub const CARD_SLOTS: usize = 123;

pub const OWNED_PER_DECK: usize = 8;
pub const BUILDING_FIELDS: usize = 3;
pub const CARD_FIELDS: usize = 5;

/// `(name, width)` of every section, in order.
pub const SECTIONS: [(&str, usize); 11] = [
    ("scalars", 5),
    ("resources", 5),
    ("multipliers", 4),
    ("tools", 8),
    ("one_use_tools", 4),
    ("owned_cards", 16),
    ("occupancy", 64),
    ("stack_sizes", 4),
    ("buildings", 12),
    ("deck_size", 1),
    ("card_slots", 20),
];

/// Check that the section widths add up to [`STATE_SIZE`].
pub fn validate() -> Result<(), ConfigurationError> {
    let actual: usize = SECTIONS.iter().map(|&(_, width)| width).sum();
    if actual == STATE_SIZE {
        Ok(())
    } else {
        Err(ConfigurationError::StateSizeMismatch {
            expected: STATE_SIZE,
            actual,
        })
    }
}
