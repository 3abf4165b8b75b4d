//! Card definitions.
//!
//! A card has an immediate effect (applied when bought), a material cost and
//! an end-game scoring rule. Cards are immutable values; the owning
//! collection is the player's `owned_cards`.

use serde::{Deserialize, Serialize};

use crate::core::{PurchaseError, ResourceKind, Resources};
use crate::players::{MultiplierTarget, Player};

/// Number of card decks on the board.
pub const CARD_DECKS: usize = 2;

/// One of the two card decks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeckId(pub u8);

impl DeckId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Both decks in order.
    pub fn all() -> impl Iterator<Item = DeckId> {
        (0..CARD_DECKS as u8).map(DeckId)
    }
}

/// What a card does the moment it is bought.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardEffect {
    /// Gain `amount` of `kind`.
    AddResource { kind: ResourceKind, amount: u32 },

    /// Roll one die per player; everyone picks a die for its reward.
    DiceRoll,

    /// Roll two dice, add tools, gain `floor(total / value)` of `kind`.
    ResourcesWithDice { kind: ResourceKind },

    /// Gain victory points.
    AddVp { vp: i32 },

    /// Upgrade the lowest tool.
    AddTool,

    /// One wheat level.
    AddWheat,

    /// Take the next card of the same deck for free.
    DrawCard,

    /// Gain a one-use tool.
    OneUseTool { level: u8 },

    /// Choose two materials.
    AnyTwoResources,
}

impl CardEffect {
    /// Numeric type code (1-9).
    #[must_use]
    pub const fn type_code(&self) -> u32 {
        match self {
            CardEffect::AddResource { .. } => 1,
            CardEffect::DiceRoll => 2,
            CardEffect::ResourcesWithDice { .. } => 3,
            CardEffect::AddVp { .. } => 4,
            CardEffect::AddTool => 5,
            CardEffect::AddWheat => 6,
            CardEffect::DrawCard => 7,
            CardEffect::OneUseTool { .. } => 8,
            CardEffect::AnyTwoResources => 9,
        }
    }

    /// The two effect parameters as numbers, zero when unused.
    #[must_use]
    pub fn payload(&self) -> [u32; 2] {
        match *self {
            CardEffect::AddResource { kind, amount } => [kind.value(), amount],
            CardEffect::ResourcesWithDice { kind } => [kind.value(), 0],
            CardEffect::AddVp { vp } => [vp.max(0) as u32, 0],
            CardEffect::OneUseTool { level } => [u32::from(level), 0],
            _ => [0, 0],
        }
    }
}

/// How a card scores at the end of the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardScoring {
    /// One point per owned painting of the same culture (1-8).
    Painting { culture: u8 },

    /// `figures` times the tracked quantity of `target`.
    Civilization {
        target: MultiplierTarget,
        figures: u32,
    },
}

impl CardScoring {
    /// Compact numeric form: the culture for paintings, `10 * target + figures`
    /// for civilization cards.
    #[must_use]
    pub fn code(&self) -> u32 {
        match *self {
            CardScoring::Painting { culture } => u32::from(culture),
            CardScoring::Civilization { target, figures } => target.code() * 10 + figures,
        }
    }
}

/// A civilization card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub effect: CardEffect,
    pub cost: u32,
    pub scoring: CardScoring,
}

impl Card {
    #[must_use]
    pub const fn new(effect: CardEffect, cost: u32, scoring: CardScoring) -> Self {
        Self {
            effect,
            cost,
            scoring,
        }
    }

    /// Painting culture, 0 for civilization cards.
    #[must_use]
    pub fn painting(&self) -> u32 {
        match self.scoring {
            CardScoring::Painting { culture } => u32::from(culture),
            CardScoring::Civilization { .. } => 0,
        }
    }

    /// Whether the player holds enough materials to pay the cost.
    #[must_use]
    pub fn is_able_to_buy(&self, player: &Player) -> bool {
        self.is_affordable_with(&player.resources)
    }

    /// Check a proposed payment against the held resources.
    ///
    /// The payment must consist of materials the player holds and add up to
    /// exactly the cost.
    pub fn validate_payment(
        &self,
        held: &Resources,
        payment: &Resources,
    ) -> Result<(), PurchaseError> {
        if !self.is_affordable_with(held) {
            return Err(PurchaseError::CannotAfford {
                needed: self.cost,
                held: held.material_total(),
            });
        }
        check_selection(held, payment)?;
        let selected = payment.total();
        if selected != self.cost {
            return Err(PurchaseError::SelectionTotalMismatch {
                selected,
                required: self.cost,
            });
        }
        Ok(())
    }

    fn is_affordable_with(&self, held: &Resources) -> bool {
        held.material_total() >= self.cost
    }

    /// Points this card adds to `owner`'s final score.
    #[must_use]
    pub fn end_game_effect(&self, owner: &Player) -> i32 {
        match self.scoring {
            CardScoring::Painting { culture } => owner
                .cards()
                .filter(|card| card.scoring == CardScoring::Painting { culture })
                .count() as i32,
            CardScoring::Civilization { target, figures } => {
                (figures * owner.tracked_quantity(target)) as i32
            }
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} (cost {}, {:?})", self.effect, self.cost, self.scoring)
    }
}

/// A material selection must contain no food and be covered by `held`.
pub(crate) fn check_selection(held: &Resources, payment: &Resources) -> Result<(), PurchaseError> {
    if payment.get(ResourceKind::Food) > 0 {
        return Err(PurchaseError::FoodNotAccepted);
    }
    for kind in ResourceKind::MATERIALS {
        let requested = payment.get(kind);
        if requested > held.get(kind) {
            return Err(PurchaseError::SelectionNotHeld {
                kind,
                requested,
                held: held.get(kind),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(cost: u32) -> Card {
        Card::new(CardEffect::AddWheat, cost, CardScoring::Painting { culture: 3 })
    }

    #[test]
    fn test_type_codes() {
        assert_eq!(
            CardEffect::AddResource {
                kind: ResourceKind::Food,
                amount: 7
            }
            .type_code(),
            1
        );
        assert_eq!(CardEffect::AnyTwoResources.type_code(), 9);
        assert_eq!(
            CardEffect::AddResource {
                kind: ResourceKind::Stone,
                amount: 2
            }
            .payload(),
            [4, 2]
        );
    }

    #[test]
    fn test_scoring_codes() {
        let civ = CardScoring::Civilization {
            target: MultiplierTarget::Workers,
            figures: 2,
        };
        assert_eq!(civ.code(), 32);
        assert_eq!(CardScoring::Painting { culture: 6 }.code(), 6);
    }

    #[test]
    fn test_affordability_ignores_food() {
        let mut player = Player::new(10, 5);
        assert!(!card(2).is_able_to_buy(&player));
        player.resources.add(ResourceKind::Wood, 1);
        player.resources.add(ResourceKind::Gold, 1);
        assert!(card(2).is_able_to_buy(&player));
    }

    #[test]
    fn test_payment_validation() {
        let held = Resources::from_pairs([(ResourceKind::Wood, 2), (ResourceKind::Clay, 1)]);
        let c = card(2);

        assert_eq!(
            c.validate_payment(&held, &Resources::new().with(ResourceKind::Wood, 2)),
            Ok(())
        );
        assert_eq!(
            c.validate_payment(&held, &Resources::new().with(ResourceKind::Wood, 1)),
            Err(PurchaseError::SelectionTotalMismatch {
                selected: 1,
                required: 2
            })
        );
        assert!(matches!(
            c.validate_payment(&held, &Resources::new().with(ResourceKind::Clay, 2)),
            Err(PurchaseError::SelectionNotHeld { .. })
        ));
        assert_eq!(
            c.validate_payment(&held, &Resources::new().with(ResourceKind::Food, 2)),
            Err(PurchaseError::FoodNotAccepted)
        );
        assert!(matches!(
            card(4).validate_payment(&held, &held),
            Err(PurchaseError::CannotAfford { needed: 4, held: 3 })
        ));
    }
}
