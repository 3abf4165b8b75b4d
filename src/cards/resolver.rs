//! Buying cards and resolving their immediate effects.
//!
//! A purchase runs against drafts of the player table, the deck and the
//! RNG. Only a purchase that completes without error is written back, so a
//! rejected payment or an invalid choice halfway through a chain of drawn
//! cards leaves the game exactly as it was.

use im::Vector;
use tracing::{debug, trace};

use crate::core::{
    GameConfig, GameRng, PlayerId, PlayerMap, PurchaseError, ResourceKind, Resources,
};
use crate::players::Player;
use crate::policy::Seats;

use super::card::{Card, CardEffect, DeckId};

/// Caps applied while resolving effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EffectLimits {
    pub max_draw_chain: u32,
    pub max_tool_level: u8,
    pub max_wheat: u32,
}

impl From<&GameConfig> for EffectLimits {
    fn from(config: &GameConfig) -> Self {
        Self {
            max_draw_chain: config.max_draw_chain,
            max_tool_level: config.max_tool_level,
            max_wheat: config.max_wheat,
        }
    }
}

/// The state a card purchase may touch.
pub struct CardMarket<'a> {
    pub players: &'a mut PlayerMap<Player>,
    pub deck: &'a mut Vector<Card>,
    pub rng: &'a mut GameRng,
    pub limits: EffectLimits,
}

impl CardMarket<'_> {
    /// Buy `card` from `deck_id` for `buyer`, paying `payment`.
    ///
    /// All or nothing: on error the players, deck and RNG are unchanged.
    pub fn buy(
        &mut self,
        seats: &mut dyn Seats,
        buyer: PlayerId,
        deck_id: DeckId,
        card: Card,
        payment: &Resources,
    ) -> Result<(), PurchaseError> {
        let mut players = self.players.clone();
        let mut deck = self.deck.clone();
        let mut rng = self.rng.clone();

        let mut resolver = EffectResolver {
            players: &mut players,
            deck: &mut deck,
            rng: &mut rng,
            seats,
            limits: self.limits,
        };
        resolver.pay_and_take(buyer, deck_id, card, payment)?;

        *self.players = players;
        *self.deck = deck;
        *self.rng = rng;
        debug!(%buyer, %card, "bought card");
        Ok(())
    }
}

/// Applies immediate card effects to a draft.
struct EffectResolver<'a> {
    players: &'a mut PlayerMap<Player>,
    deck: &'a mut Vector<Card>,
    rng: &'a mut GameRng,
    seats: &'a mut dyn Seats,
    limits: EffectLimits,
}

impl EffectResolver<'_> {
    fn pay_and_take(
        &mut self,
        buyer: PlayerId,
        deck_id: DeckId,
        card: Card,
        payment: &Resources,
    ) -> Result<(), PurchaseError> {
        let player = &mut self.players[buyer];
        card.validate_payment(&player.resources, payment)?;
        player.resources.try_spend(payment)?;
        player.add_card(deck_id, card);
        self.immediate_effect(buyer, deck_id, &card, 0)
    }

    fn immediate_effect(
        &mut self,
        buyer: PlayerId,
        deck_id: DeckId,
        card: &Card,
        depth: u32,
    ) -> Result<(), PurchaseError> {
        let limits = self.limits;

        match card.effect {
            CardEffect::AddResource { kind, amount } => {
                self.players[buyer].resources.add(kind, amount);
            }
            CardEffect::AddVp { vp } => self.players[buyer].vp += vp,
            CardEffect::AddTool => {
                self.players[buyer].upgrade_tool(limits.max_tool_level);
            }
            CardEffect::AddWheat => self.players[buyer].add_wheat(1, limits.max_wheat),
            CardEffect::OneUseTool { level } => self.players[buyer].add_one_use_tool(level),
            CardEffect::ResourcesWithDice { kind } => {
                let pips = self.rng.roll_sum(2);
                let divisor = kind.value();
                let selection = self
                    .seats
                    .seat(buyer)
                    .decide_tools(&self.players[buyer], pips, divisor);
                let bonus = self.players[buyer].use_tools(&selection)?;
                let amount = (pips + bonus) / divisor;
                self.players[buyer].resources.add(kind, amount);
                trace!(%buyer, pips, bonus, amount, %kind, "rolled for resources");
            }
            CardEffect::AnyTwoResources => {
                let options = ResourceKind::MATERIALS;
                for _ in 0..2 {
                    let player = &self.players[buyer];
                    let choice = self.seats.seat(buyer).choose_resource(player, &options);
                    let kind = player.choose_resources(&options, choice)?;
                    self.players[buyer].resources.add(kind, 1);
                }
            }
            CardEffect::DiceRoll => self.dice_roll(buyer)?,
            CardEffect::DrawCard => {
                if depth >= limits.max_draw_chain {
                    debug!(%buyer, depth, "draw chain limit reached");
                    return Ok(());
                }
                let Some(drawn) = self.deck.pop_front() else {
                    return Ok(());
                };
                self.players[buyer].add_card(deck_id, drawn);
                self.immediate_effect(buyer, deck_id, &drawn, depth + 1)?;
            }
        }
        Ok(())
    }

    /// One die per player; starting with the buyer, everyone takes one.
    fn dice_roll(&mut self, buyer: PlayerId) -> Result<(), PurchaseError> {
        let player_count = self.players.player_count();
        let mut dice = self.rng.roll_dice(player_count);

        for player in buyer.clockwise(player_count) {
            let pick = self.seats.seat(player).choose_die(&self.players[player], &dice);
            if pick >= dice.len() {
                return Err(PurchaseError::SelectionOutsideOptions(format!("die {pick}")));
            }
            let face = dice.remove(pick);
            self.die_reward(player, face);
            trace!(%player, face, "took die");
        }
        Ok(())
    }

    fn die_reward(&mut self, player: PlayerId, face: u8) {
        let limits = self.limits;
        let ledger = &mut self.players[player];
        match face {
            1 => ledger.resources.add(ResourceKind::Wood, 1),
            2 => ledger.resources.add(ResourceKind::Clay, 1),
            3 => ledger.resources.add(ResourceKind::Stone, 1),
            4 => ledger.resources.add(ResourceKind::Gold, 1),
            5 => {
                ledger.upgrade_tool(limits.max_tool_level);
            }
            _ => ledger.add_wheat(1, limits.max_wheat),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardScoring;
    use crate::policy::{Decider, SharedSeat};
    use crate::players::MultiplierTarget;

    struct Picky {
        resource: ResourceKind,
        die: usize,
    }

    impl Decider for Picky {
        fn decide_action(&mut self, _state: &[f32], legal: &[usize]) -> usize {
            legal[0]
        }

        fn choose_resource(&mut self, _player: &Player, _options: &[ResourceKind]) -> ResourceKind {
            self.resource
        }

        fn choose_die(&mut self, _player: &Player, _dice: &[u8]) -> usize {
            self.die
        }
    }

    fn limits() -> EffectLimits {
        EffectLimits::from(&GameConfig::default())
    }

    fn rich_table(players: usize) -> PlayerMap<Player> {
        PlayerMap::new(players, |_| {
            let mut player = Player::new(5, 5);
            player.resources.add(ResourceKind::Wood, 4);
            player
        })
    }

    fn painting(effect: CardEffect, cost: u32) -> Card {
        Card::new(effect, cost, CardScoring::Painting { culture: 1 })
    }

    fn buy(
        players: &mut PlayerMap<Player>,
        deck: &mut Vector<Card>,
        seats: &mut dyn Seats,
        card: Card,
        payment: Resources,
    ) -> Result<(), PurchaseError> {
        let mut rng = GameRng::new(3);
        CardMarket {
            players,
            deck,
            rng: &mut rng,
            limits: limits(),
        }
        .buy(seats, PlayerId::new(0), DeckId::new(0), card, &payment)
    }

    #[test]
    fn test_buy_add_resource() {
        let mut players = rich_table(2);
        let mut deck = Vector::new();
        let card = painting(
            CardEffect::AddResource {
                kind: ResourceKind::Food,
                amount: 7,
            },
            2,
        );
        let payment = Resources::new().with(ResourceKind::Wood, 2);
        let mut seats = SharedSeat(Picky {
            resource: ResourceKind::Gold,
            die: 0,
        });
        buy(&mut players, &mut deck, &mut seats, card, payment).unwrap();

        let buyer = &players[PlayerId::new(0)];
        assert_eq!(buyer.resources.get(ResourceKind::Food), 12);
        assert_eq!(buyer.resources.get(ResourceKind::Wood), 2);
        assert_eq!(buyer.owned_cards[0], vec![card]);
    }

    #[test]
    fn test_bad_payment_changes_nothing() {
        let mut players = rich_table(2);
        let before = players.clone();
        let mut deck = Vector::new();
        let card = painting(CardEffect::AddVp { vp: 3 }, 3);
        let result = buy(
            &mut players,
            &mut deck,
            &mut SharedSeat(Picky { resource: ResourceKind::Gold, die: 0 }),
            card,
            Resources::new().with(ResourceKind::Wood, 2),
        );
        assert!(matches!(result, Err(PurchaseError::SelectionTotalMismatch { .. })));
        assert_eq!(players, before);
    }

    #[test]
    fn test_invalid_choice_rolls_back_payment() {
        let mut players = rich_table(2);
        let before = players.clone();
        let mut deck = Vector::new();
        let card = painting(CardEffect::AnyTwoResources, 1);
        let result = buy(
            &mut players,
            &mut deck,
            &mut SharedSeat(Picky { resource: ResourceKind::Food, die: 0 }),
            card,
            Resources::new().with(ResourceKind::Wood, 1),
        );
        assert!(matches!(result, Err(PurchaseError::SelectionOutsideOptions(_))));
        assert_eq!(players, before);
    }

    #[test]
    fn test_any_two_resources() {
        let mut players = rich_table(2);
        let mut deck = Vector::new();
        buy(
            &mut players,
            &mut deck,
            &mut SharedSeat(Picky { resource: ResourceKind::Clay, die: 0 }),
            painting(CardEffect::AnyTwoResources, 1),
            Resources::new().with(ResourceKind::Wood, 1),
        )
        .unwrap();
        assert_eq!(players[PlayerId::new(0)].resources.get(ResourceKind::Clay), 2);
    }

    #[test]
    fn test_draw_chain_is_bounded() {
        let mut players = rich_table(2);
        let draw = painting(CardEffect::DrawCard, 1);
        let mut deck: Vector<Card> = std::iter::repeat(draw).take(10).collect();
        buy(
            &mut players,
            &mut deck,
            &mut SharedSeat(Picky { resource: ResourceKind::Gold, die: 0 }),
            draw,
            Resources::new().with(ResourceKind::Wood, 1),
        )
        .unwrap();

        // The bought card plus three draws.
        assert_eq!(players[PlayerId::new(0)].owned_cards[0].len(), 4);
        assert_eq!(deck.len(), 7);
    }

    #[test]
    fn test_draw_applies_drawn_effect() {
        let mut players = rich_table(2);
        let civ = Card::new(
            CardEffect::AddVp { vp: 3 },
            2,
            CardScoring::Civilization {
                target: MultiplierTarget::Wheat,
                figures: 2,
            },
        );
        let mut deck: Vector<Card> = vec![civ].into_iter().collect();
        buy(
            &mut players,
            &mut deck,
            &mut SharedSeat(Picky { resource: ResourceKind::Gold, die: 0 }),
            painting(CardEffect::DrawCard, 1),
            Resources::new().with(ResourceKind::Wood, 1),
        )
        .unwrap();

        let buyer = &players[PlayerId::new(0)];
        assert_eq!(buyer.vp, 3);
        assert_eq!(buyer.multipliers[MultiplierTarget::Wheat.index()], 2);
        assert!(deck.is_empty());
    }

    #[test]
    fn test_dice_roll_gives_everyone_a_die() {
        let mut players = rich_table(3);
        let before: Vec<u32> = players.values().map(|p| p.resources.total()).collect();
        let mut deck = Vector::new();
        buy(
            &mut players,
            &mut deck,
            &mut SharedSeat(Picky { resource: ResourceKind::Gold, die: 0 }),
            painting(CardEffect::DiceRoll, 1),
            Resources::new().with(ResourceKind::Wood, 1),
        )
        .unwrap();

        for (id, player) in players.iter() {
            let gained = player.resources.total() + u32::from(id == PlayerId::new(0))
                - before[id.index()];
            let other = player.wheat + player.tool_levels();
            assert_eq!(gained + other, 1, "{id} should get exactly one reward");
        }
    }

    #[test]
    fn test_out_of_range_die_is_rejected() {
        let mut players = rich_table(2);
        let before = players.clone();
        let mut deck = Vector::new();
        let result = buy(
            &mut players,
            &mut deck,
            &mut SharedSeat(Picky { resource: ResourceKind::Gold, die: 5 }),
            painting(CardEffect::DiceRoll, 1),
            Resources::new().with(ResourceKind::Wood, 1),
        );
        assert!(result.is_err());
        assert_eq!(players, before);
    }
}
