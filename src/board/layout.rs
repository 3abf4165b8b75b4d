//! The fixed sixteen-location board.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::buildings::BUILDING_STACKS;
use crate::cards::DeckId;
use crate::core::{ConfigurationError, GameConfig, PlayerId, ResourceKind};

use super::location::{Location, LocationKind, Site, UtilityKind};

/// Number of locations.
pub const BOARD_SIZE: usize = 16;

pub const FARM: usize = 0;
pub const HOUSE: usize = 1;
pub const TOOL_SHOP: usize = 2;
pub const HUNTING_GROUNDS: usize = 3;
pub const FOREST: usize = 4;
pub const QUARRY: usize = 5;
pub const CLAY_PIT: usize = 6;
pub const RIVER: usize = 7;

/// Card slots; the first two draw from deck 0, the last two from deck 1.
pub const CARD_SLOTS: Range<usize> = 8..12;

/// Building slots, one per stack.
pub const BUILDING_SLOTS: Range<usize> = 12..16;

/// Workers the Farm and the Tool shop take.
const SINGLE: u32 = 1;

/// Workers the House takes.
const HOUSE_CAPACITY: u32 = 2;

/// The kind of the location at `index`, if there is one.
#[must_use]
pub fn location_kind(index: usize) -> Option<LocationKind> {
    let kind = match index {
        FARM => LocationKind::Utility(UtilityKind::Farm),
        HOUSE => LocationKind::Utility(UtilityKind::House),
        TOOL_SHOP => LocationKind::Utility(UtilityKind::ToolShop),
        HUNTING_GROUNDS => LocationKind::Gathering(ResourceKind::Food),
        FOREST => LocationKind::Gathering(ResourceKind::Wood),
        QUARRY => LocationKind::Gathering(ResourceKind::Stone),
        CLAY_PIT => LocationKind::Gathering(ResourceKind::Clay),
        RIVER => LocationKind::Gathering(ResourceKind::Gold),
        i if CARD_SLOTS.contains(&i) => LocationKind::CardSlot,
        i if BUILDING_SLOTS.contains(&i) => LocationKind::BuildingSlot,
        _ => return None,
    };
    Some(kind)
}

/// The deck feeding card slot `index`.
#[must_use]
pub fn card_slot_deck(index: usize) -> DeckId {
    DeckId::new(((index - CARD_SLOTS.start) / 2) as u8)
}

/// All locations, in resolution order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    locations: Vec<Location>,
}

impl Board {
    /// Lay out an empty board; card and building slots start without items.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        let players = config.player_count;
        let gathering = config.gathering_capacity;

        let mut locations = vec![
            Location::new(FARM, Site::Utility(UtilityKind::Farm), SINGLE, players),
            Location::new(HOUSE, Site::Utility(UtilityKind::House), HOUSE_CAPACITY, players),
            Location::new(TOOL_SHOP, Site::Utility(UtilityKind::ToolShop), SINGLE, players),
            Location::new(
                HUNTING_GROUNDS,
                Site::Gathering(ResourceKind::Food),
                config.hunting_capacity,
                players,
            ),
        ];

        for (index, kind) in (FOREST..=RIVER).zip(ResourceKind::MATERIALS) {
            locations.push(Location::new(index, Site::Gathering(kind), gathering, players));
        }

        for index in CARD_SLOTS {
            let site = Site::CardSlot {
                deck: card_slot_deck(index),
                card: None,
            };
            locations.push(Location::new(index, site, SINGLE, players));
        }

        for (stack, index) in BUILDING_SLOTS.enumerate().take(BUILDING_STACKS) {
            let site = Site::BuildingSlot {
                stack,
                building: None,
            };
            locations.push(Location::new(index, site, SINGLE, players));
        }

        Self { locations }
    }

    /// Number of locations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Location> {
        self.locations.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Location> {
        self.locations.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Location> {
        self.locations.iter_mut()
    }

    /// Capacities in index order, for building the action space.
    #[must_use]
    pub fn capacities(&self) -> Vec<u32> {
        self.locations.iter().map(Location::capacity).collect()
    }

    /// Workers per location for one seat.
    pub fn occupancy_of(&self, player: PlayerId) -> impl Iterator<Item = u32> + '_ {
        self.locations
            .iter()
            .map(move |location| location.workers_of(player))
    }

    /// Send every worker home.
    pub fn clear(&mut self) {
        for location in &mut self.locations {
            location.clear();
        }
    }

    /// Check that this board has the layout `config` would build: same
    /// locations in the same places, same capacities, one occupancy count
    /// per seat, and no location over capacity.
    pub fn check_layout(&self, config: &GameConfig) -> Result<(), ConfigurationError> {
        let expected = Self::new(config);
        if self.len() != expected.len() {
            return Err(ConfigurationError::Snapshot(format!(
                "expected {} locations, found {}",
                expected.len(),
                self.len()
            )));
        }

        for (index, (location, fresh)) in self.iter().zip(expected.iter()).enumerate() {
            let misplaced = location.index() != index
                || location.kind() != fresh.kind()
                || location.deck() != fresh.deck()
                || location.stack() != fresh.stack()
                || location.capacity() != fresh.capacity();
            if misplaced {
                return Err(ConfigurationError::Snapshot(format!(
                    "location {index} does not match the board layout"
                )));
            }
            if location.occupants().player_count() != config.player_count {
                return Err(ConfigurationError::Snapshot(format!(
                    "location {index} tracks {} seats, expected {}",
                    location.occupants().player_count(),
                    config.player_count
                )));
            }
            if location.occupied() > location.capacity() {
                return Err(ConfigurationError::Snapshot(format!(
                    "location {index} holds more workers than it has room for"
                )));
            }
        }
        Ok(())
    }
}

impl std::ops::Index<usize> for Board {
    type Output = Location;

    fn index(&self, index: usize) -> &Location {
        &self.locations[index]
    }
}

impl std::ops::IndexMut<usize> for Board {
    fn index_mut(&mut self, index: usize) -> &mut Location {
        &mut self.locations[index]
    }
}
