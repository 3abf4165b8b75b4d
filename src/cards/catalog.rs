//! The 36 civilization cards and deck construction.

use im::Vector;

use crate::core::{ConfigurationError, GameRng, ResourceKind};
use crate::players::MultiplierTarget;

use super::card::{Card, CardEffect, CardScoring, CARD_DECKS};

/// Cards in the full catalog.
pub const CATALOG_SIZE: usize = 36;

const fn painting(effect: CardEffect, cost: u32, culture: u8) -> Card {
    Card::new(effect, cost, CardScoring::Painting { culture })
}

const fn civ(effect: CardEffect, cost: u32, target: MultiplierTarget, figures: u32) -> Card {
    Card::new(effect, cost, CardScoring::Civilization { target, figures })
}

const fn gain(kind: ResourceKind, amount: u32) -> CardEffect {
    CardEffect::AddResource { kind, amount }
}

/// Every civilization card, in catalog order.
#[must_use]
pub fn card_catalog() -> Vec<Card> {
    use CardEffect::*;
    use MultiplierTarget::*;
    use ResourceKind::*;

    vec![
        // Dice rolls for everyone
        civ(DiceRoll, 1, Workers, 2),
        civ(DiceRoll, 1, Buildings, 1),
        civ(DiceRoll, 2, Buildings, 2),
        civ(DiceRoll, 2, Wheat, 1),
        civ(DiceRoll, 3, Wheat, 2),
        painting(DiceRoll, 3, 1),
        painting(DiceRoll, 4, 8),
        painting(DiceRoll, 4, 2),
        painting(DiceRoll, 1, 3),
        painting(DiceRoll, 2, 2),
        // Food
        painting(gain(Food, 7), 1, 2),
        civ(gain(Food, 2), 1, Buildings, 2),
        civ(gain(Food, 4), 2, Buildings, 1),
        painting(gain(Food, 5), 2, 4),
        painting(gain(Food, 3), 3, 5),
        painting(gain(Food, 1), 3, 5),
        civ(gain(Food, 3), 4, Wheat, 2),
        // Materials
        civ(gain(Stone, 1), 1, Wheat, 1),
        painting(gain(Stone, 2), 2, 1),
        civ(gain(Stone, 1), 2, Workers, 1),
        civ(gain(Gold, 1), 3, Workers, 1),
        civ(gain(Clay, 1), 3, Workers, 2),
        // Dice for a single resource
        painting(ResourcesWithDice { kind: Gold }, 2, 6),
        civ(ResourcesWithDice { kind: Wood }, 3, Workers, 2),
        civ(ResourcesWithDice { kind: Stone }, 3, Workers, 1),
        // Points
        civ(AddVp { vp: 3 }, 2, Buildings, 3),
        painting(AddVp { vp: 3 }, 3, 7),
        painting(AddVp { vp: 3 }, 4, 7),
        // Tribe development
        painting(AddTool, 2, 6),
        civ(AddWheat, 2, Wheat, 1),
        painting(AddWheat, 3, 8),
        painting(DrawCard, 3, 3),
        civ(OneUseTool { level: 4 }, 1, Tools, 1),
        civ(OneUseTool { level: 3 }, 2, Tools, 1),
        civ(OneUseTool { level: 2 }, 3, Tools, 2),
        painting(AnyTwoResources, 2, 4),
    ]
}

/// Split the catalog into the two draw decks.
///
/// The catalog is shuffled with the game RNG when `shuffle` is set, then cut
/// in half: the first half becomes deck 0.
pub fn build_card_decks(
    catalog: Vec<Card>,
    rng: &mut GameRng,
    shuffle: bool,
) -> Result<[Vector<Card>; CARD_DECKS], ConfigurationError> {
    if catalog.len() < 2 * CARD_DECKS || catalog.len() % CARD_DECKS != 0 {
        return Err(ConfigurationError::MalformedDeck(format!(
            "{} cards cannot be split into {CARD_DECKS} even decks",
            catalog.len()
        )));
    }
    for card in &catalog {
        validate_card(card)?;
    }

    let mut cards = catalog;
    if shuffle {
        rng.shuffle(&mut cards);
    }

    let half = cards.len() / CARD_DECKS;
    let second: Vector<Card> = cards.split_off(half).into_iter().collect();
    let first: Vector<Card> = cards.into_iter().collect();
    Ok([first, second])
}

fn validate_card(card: &Card) -> Result<(), ConfigurationError> {
    match card.scoring {
        CardScoring::Painting { culture } if !(1..=8).contains(&culture) => {
            return Err(ConfigurationError::MalformedDeck(format!(
                "painting culture {culture} outside 1-8"
            )));
        }
        CardScoring::Civilization { figures: 0, .. } => {
            return Err(ConfigurationError::MalformedDeck(
                "civilization card without figures".to_string(),
            ));
        }
        _ => {}
    }
    if card.cost == 0 {
        return Err(ConfigurationError::MalformedDeck(format!(
            "card {card} costs nothing"
        )));
    }
    Ok(())
}
