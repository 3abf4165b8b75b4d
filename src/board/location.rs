//! Board locations.
//!
//! Every location shares the same capacity and occupancy record; what
//! happens at resolution depends on its [`Site`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::buildings::Building;
use crate::cards::{Card, DeckId};
use crate::core::{PlacementError, PlayerId, PlayerMap, ResourceKind};
use crate::players::Player;

/// The three utility buildings of the village.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UtilityKind {
    /// +1 wheat per worker.
    Farm,
    /// +1 tribe member per worker.
    House,
    /// +1 tool level per worker.
    ToolShop,
}

/// What a location is, without its contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationKind {
    Utility(UtilityKind),
    Gathering(ResourceKind),
    CardSlot,
    BuildingSlot,
}

/// A location together with whatever it offers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Site {
    Utility(UtilityKind),
    Gathering(ResourceKind),
    CardSlot {
        deck: DeckId,
        card: Option<Card>,
    },
    BuildingSlot {
        stack: usize,
        building: Option<Building>,
    },
}

/// One place on the board that workers can be sent to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    index: usize,
    site: Site,
    capacity: u32,
    occupants: PlayerMap<u32>,
}

impl Location {
    /// Create an empty location.
    #[must_use]
    pub fn new(index: usize, site: Site, capacity: u32, player_count: usize) -> Self {
        Self {
            index,
            site,
            capacity,
            occupants: PlayerMap::with_value(player_count, 0),
        }
    }

    /// Board index.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn site(&self) -> &Site {
        &self.site
    }

    #[must_use]
    pub fn kind(&self) -> LocationKind {
        match self.site {
            Site::Utility(utility) => LocationKind::Utility(utility),
            Site::Gathering(kind) => LocationKind::Gathering(kind),
            Site::CardSlot { .. } => LocationKind::CardSlot,
            Site::BuildingSlot { .. } => LocationKind::BuildingSlot,
        }
    }

    /// The deck a card slot draws from.
    #[must_use]
    pub fn deck(&self) -> Option<DeckId> {
        match self.site {
            Site::CardSlot { deck, .. } => Some(deck),
            _ => None,
        }
    }

    /// The stack a building slot is fed by.
    #[must_use]
    pub fn stack(&self) -> Option<usize> {
        match self.site {
            Site::BuildingSlot { stack, .. } => Some(stack),
            _ => None,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Workers per seat.
    #[must_use]
    pub fn occupants(&self) -> &PlayerMap<u32> {
        &self.occupants
    }

    /// Workers `player` has here.
    #[must_use]
    pub fn workers_of(&self, player: PlayerId) -> u32 {
        self.occupants[player]
    }

    /// Workers placed by everyone.
    #[must_use]
    pub fn occupied(&self) -> u32 {
        self.occupants.values().sum()
    }

    /// Room left for more workers.
    #[must_use]
    pub fn available_space(&self) -> u32 {
        self.capacity.saturating_sub(self.occupied())
    }

    /// A card or building slot with nothing on it.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        matches!(
            self.site,
            Site::CardSlot { card: None, .. } | Site::BuildingSlot { building: None, .. }
        )
    }

    /// Whether `worker_count` more workers fit here.
    #[must_use]
    pub fn can_place(&self, worker_count: u32) -> bool {
        worker_count >= 1 && !self.is_exhausted() && self.available_space() >= worker_count
    }

    /// Explain why `player` could not place `worker_count` workers here.
    pub fn check_place(&self, player: &Player, worker_count: u32) -> Result<(), PlacementError> {
        if worker_count == 0 {
            return Err(PlacementError::ZeroWorkers);
        }
        if self.is_exhausted() {
            return Err(PlacementError::LocationExhausted(self.index));
        }
        let available = self.available_space();
        if worker_count > available {
            return Err(PlacementError::CapacityExceeded {
                location: self.index,
                requested: worker_count,
                available,
            });
        }
        if worker_count > player.available_workers {
            return Err(PlacementError::InsufficientWorkers {
                requested: worker_count,
                available: player.available_workers,
            });
        }
        Ok(())
    }

    /// Move `worker_count` of `player`'s workers here, or nothing at all.
    pub fn place(
        &mut self,
        id: PlayerId,
        player: &mut Player,
        worker_count: u32,
    ) -> Result<(), PlacementError> {
        self.check_place(player, worker_count)?;
        player.available_workers -= worker_count;
        self.occupants[id] += worker_count;
        debug!(location = self.index, %id, workers = worker_count, "placed workers");
        Ok(())
    }

    /// Send everyone home.
    pub fn clear(&mut self) {
        for (_, count) in self.occupants.iter_mut() {
            *count = 0;
        }
    }

    /// The card on offer, if this is a card slot.
    #[must_use]
    pub fn card(&self) -> Option<&Card> {
        match &self.site {
            Site::CardSlot { card, .. } => card.as_ref(),
            _ => None,
        }
    }

    /// The building on offer, if this is a building slot.
    #[must_use]
    pub fn building(&self) -> Option<&Building> {
        match &self.site {
            Site::BuildingSlot { building, .. } => building.as_ref(),
            _ => None,
        }
    }

    /// Remove and return the card on offer.
    pub fn take_card(&mut self) -> Option<Card> {
        match &mut self.site {
            Site::CardSlot { card, .. } => card.take(),
            _ => None,
        }
    }

    /// Remove and return the building on offer.
    pub fn take_building(&mut self) -> Option<Building> {
        match &mut self.site {
            Site::BuildingSlot { building, .. } => building.take(),
            _ => None,
        }
    }

    /// Put a card on an empty card slot. Returns `false` for other sites
    /// and occupied slots.
    pub fn offer_card(&mut self, offered: Card) -> bool {
        match &mut self.site {
            Site::CardSlot { card, .. } if card.is_none() => {
                *card = Some(offered);
                true
            }
            _ => false,
        }
    }

    /// Put a building on an empty building slot.
    pub fn offer_building(&mut self, offered: Building) -> bool {
        match &mut self.site {
            Site::BuildingSlot { building, .. } if building.is_none() => {
                *building = Some(offered);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardEffect, CardScoring};

    fn forest() -> Location {
        Location::new(4, Site::Gathering(ResourceKind::Wood), 4, 4)
    }

    #[test]
    fn test_place_on_gathering() {
        let mut wood = forest();
        let mut player = Player::new(10, 5);
        let id = PlayerId::new(0);

        assert!(wood.can_place(2));
        wood.place(id, &mut player, 2).unwrap();
        assert_eq!(wood.available_space(), 2);
        assert_eq!(player.available_workers, 3);
        assert_eq!(wood.workers_of(id), 2);
    }

    #[test]
    fn test_rejections_leave_state_alone() {
        let mut wood = forest();
        let mut player = Player::new(10, 5);
        let id = PlayerId::new(1);

        assert_eq!(
            wood.place(id, &mut player, 5),
            Err(PlacementError::CapacityExceeded {
                location: 4,
                requested: 5,
                available: 4
            })
        );
        assert_eq!(wood.place(id, &mut player, 0), Err(PlacementError::ZeroWorkers));

        player.available_workers = 1;
        assert_eq!(
            wood.place(id, &mut player, 2),
            Err(PlacementError::InsufficientWorkers {
                requested: 2,
                available: 1
            })
        );
        assert_eq!(wood.occupied(), 0);
        assert_eq!(player.available_workers, 1);
    }

    #[test]
    fn test_empty_slot_is_exhausted() {
        let mut slot = Location::new(
            8,
            Site::CardSlot {
                deck: DeckId::new(0),
                card: None,
            },
            1,
            2,
        );
        let mut player = Player::new(10, 5);
        assert_eq!(slot.deck(), Some(DeckId::new(0)));
        assert_eq!(slot.stack(), None);
        assert!(slot.is_exhausted());
        assert!(!slot.can_place(1));
        assert_eq!(
            slot.place(PlayerId::new(0), &mut player, 1),
            Err(PlacementError::LocationExhausted(8))
        );

        let card = Card::new(CardEffect::AddTool, 2, CardScoring::Painting { culture: 6 });
        assert!(slot.offer_card(card));
        assert!(!slot.offer_card(card));
        assert!(slot.can_place(1));
        assert_eq!(slot.take_card(), Some(card));
        assert!(slot.is_exhausted());
    }

    #[test]
    fn test_clear() {
        let mut wood = forest();
        let mut a = Player::new(0, 5);
        let mut b = Player::new(0, 5);
        wood.place(PlayerId::new(0), &mut a, 1).unwrap();
        wood.place(PlayerId::new(2), &mut b, 3).unwrap();
        assert!(!wood.can_place(1));
        wood.clear();
        assert_eq!(wood.available_space(), 4);
        assert_eq!(wood.kind(), LocationKind::Gathering(ResourceKind::Wood));
        assert_eq!(wood.deck(), None);
    }
}
