//! The board: locations, their occupants and what they offer.

pub mod layout;
pub mod location;

pub use layout::{
    card_slot_deck, location_kind, Board, BOARD_SIZE, BUILDING_SLOTS, CARD_SLOTS, CLAY_PIT,
    FARM, FOREST, HOUSE, HUNTING_GROUNDS, QUARRY, RIVER, TOOL_SHOP,
};
pub use location::{Location, LocationKind, Site, UtilityKind};
