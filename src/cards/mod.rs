//! Civilization cards: definitions, the catalog and effect resolution.

pub mod card;
pub mod catalog;
pub mod resolver;

pub(crate) use card::check_selection;
pub use card::{Card, CardEffect, CardScoring, DeckId, CARD_DECKS};
pub use catalog::{build_card_decks, card_catalog, CATALOG_SIZE};
pub use resolver::{CardMarket, EffectLimits};
