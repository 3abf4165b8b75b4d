//! The per-player ledger.
//!
//! A `Player` owns everything a seat accumulates over a game: resources,
//! agriculture, the tribe, tools, bought cards and buildings, and banked
//! victory points. All mutations keep the ledger non-negative and within
//! the caps passed in by the caller.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::cards::{Card, CardScoring, DeckId, CARD_DECKS};
use crate::core::{PurchaseError, ResourceKind, Resources};

use super::tools::{Tool, ToolSelection, TOOL_SLOTS};

/// Quantity a civilization card multiplies at the end of the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MultiplierTarget {
    /// Sum of persistent tool levels.
    Tools,
    /// Buildings owned.
    Buildings,
    /// Tribe size.
    Workers,
    /// Wheat level.
    Wheat,
}

impl MultiplierTarget {
    /// All targets in multiplier-array order.
    pub const ALL: [MultiplierTarget; 4] = [
        MultiplierTarget::Tools,
        MultiplierTarget::Buildings,
        MultiplierTarget::Workers,
        MultiplierTarget::Wheat,
    ];

    /// Position in `Player::multipliers`.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            MultiplierTarget::Tools => 0,
            MultiplierTarget::Buildings => 1,
            MultiplierTarget::Workers => 2,
            MultiplierTarget::Wheat => 3,
        }
    }

    /// Numeric category used in card descriptors (1-4).
    #[must_use]
    pub const fn code(self) -> u32 {
        self.index() as u32 + 1
    }
}

/// What happened when a player fed the tribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeedingOutcome {
    /// Food that had to be paid after wheat.
    pub required: u32,

    /// Food actually removed.
    pub eaten: u32,

    /// Whether the player came up short and took the penalty.
    pub starved: bool,
}

/// One seat's holdings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub resources: Resources,

    /// Agriculture level; feeds this many workers every round.
    pub wheat: u32,

    pub total_workers: u32,
    pub available_workers: u32,

    pub tools: [Tool; TOOL_SLOTS],

    /// Levels of unused one-use tools.
    pub one_use_tools: SmallVec<[u8; 4]>,

    /// Cards bought, grouped by the deck they came from.
    pub owned_cards: [Vec<Card>; CARD_DECKS],

    /// Buildings bought.
    pub buildings: u32,

    /// Victory points banked so far (buildings, cards, penalties).
    pub vp: i32,

    /// Civilization figures per target, indexed by `MultiplierTarget::index`.
    pub multipliers: [u32; 4],
}

impl Player {
    /// A fresh tribe with `food` food and `workers` workers.
    #[must_use]
    pub fn new(food: u32, workers: u32) -> Self {
        Self {
            resources: Resources::new().with(ResourceKind::Food, food),
            wheat: 0,
            total_workers: workers,
            available_workers: workers,
            tools: [Tool::new(); TOOL_SLOTS],
            one_use_tools: SmallVec::new(),
            owned_cards: [Vec::new(), Vec::new()],
            buildings: 0,
            vp: 0,
            multipliers: [0; 4],
        }
    }

    /// Start-of-round refresh: every worker comes home, tools are ready.
    pub fn refresh(&mut self) {
        self.available_workers = self.total_workers;
        for tool in &mut self.tools {
            tool.available = true;
        }
    }

    /// Raise wheat by `amount`, capped at `max`.
    pub fn add_wheat(&mut self, amount: u32, max: u32) {
        self.wheat = (self.wheat + amount).min(max);
    }

    /// Grow the tribe by `amount`, capped at `max`. New workers start
    /// working next round.
    pub fn add_workers(&mut self, amount: u32, max: u32) {
        self.total_workers = (self.total_workers + amount).min(max);
    }

    /// Upgrade the lowest-level tool slot by one.
    ///
    /// Returns the upgraded slot, or `None` when every slot is at `max_level`.
    pub fn upgrade_tool(&mut self, max_level: u8) -> Option<usize> {
        let (slot, tool) = self
            .tools
            .iter_mut()
            .enumerate()
            .filter(|(_, tool)| tool.level < max_level)
            .min_by_key(|(slot, tool)| (tool.level, *slot))?;
        tool.level += 1;
        Some(slot)
    }

    /// Gain a one-use tool of the given level.
    pub fn add_one_use_tool(&mut self, level: u8) {
        self.one_use_tools.push(level);
    }

    /// Sum of persistent tool levels.
    #[must_use]
    pub fn tool_levels(&self) -> u32 {
        self.tools.iter().map(|t| u32::from(t.level)).sum()
    }

    /// Check a tool selection without spending it.
    pub fn check_tools(&self, selection: &ToolSelection) -> Result<u32, PurchaseError> {
        let mut bonus = 0;

        for (i, &slot) in selection.slots.iter().enumerate() {
            if selection.slots[..i].contains(&slot) {
                return Err(outside(format!("tool slot {slot} selected twice")));
            }
            match self.tools.get(slot) {
                Some(tool) if tool.usable() => bonus += u32::from(tool.level),
                _ => return Err(outside(format!("tool slot {slot}"))),
            }
        }

        for (i, &index) in selection.one_use.iter().enumerate() {
            if selection.one_use[..i].contains(&index) {
                return Err(outside(format!("one-use tool {index} selected twice")));
            }
            match self.one_use_tools.get(index) {
                Some(&level) => bonus += u32::from(level),
                None => return Err(outside(format!("one-use tool {index}"))),
            }
        }

        Ok(bonus)
    }

    /// Spend the selected tools and return the pips they add.
    ///
    /// Persistent tools become unavailable for the round, one-use tools are
    /// discarded. An invalid selection changes nothing.
    pub fn use_tools(&mut self, selection: &ToolSelection) -> Result<u32, PurchaseError> {
        let bonus = self.check_tools(selection)?;

        for &slot in &selection.slots {
            self.tools[slot].available = false;
        }

        let mut discarded: SmallVec<[usize; 4]> = selection.one_use.clone();
        discarded.sort_unstable_by(|a, b| b.cmp(a));
        for index in discarded {
            self.one_use_tools.remove(index);
        }

        Ok(bonus)
    }

    /// Resolve a gathering roll: `pips` plus the selected tools, divided by
    /// the value of `kind`, credited to the ledger.
    ///
    /// An invalid tool selection is ignored rather than failing the roll.
    pub fn gather(&mut self, kind: ResourceKind, pips: u32, selection: &ToolSelection) -> u32 {
        let bonus = match self.use_tools(selection) {
            Ok(bonus) => bonus,
            Err(err) => {
                warn!(%err, "ignoring tool selection");
                0
            }
        };
        let amount = (pips + bonus) / kind.value();
        self.resources.add(kind, amount);
        trace!(%kind, pips, bonus, amount, "gathered");
        amount
    }

    /// Validate a choice among offered resource kinds.
    pub fn choose_resources(
        &self,
        options: &[ResourceKind],
        choice: ResourceKind,
    ) -> Result<ResourceKind, PurchaseError> {
        if options.contains(&choice) {
            Ok(choice)
        } else {
            Err(outside(choice.to_string()))
        }
    }

    /// Take a bought card into the collection of `deck`.
    ///
    /// Civilization figures count towards the multipliers immediately.
    pub fn add_card(&mut self, deck: DeckId, card: Card) {
        if let CardScoring::Civilization { target, figures } = card.scoring {
            self.multipliers[target.index()] += figures;
        }
        self.owned_cards[deck.index()].push(card);
    }

    /// Every owned card, deck 0 first.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.owned_cards.iter().flatten()
    }

    /// Feed the tribe.
    ///
    /// Each worker eats one food, less one per wheat level. A player who
    /// cannot pay in full hands over all food and loses `penalty` points.
    pub fn feed(&mut self, penalty: i32) -> FeedingOutcome {
        let required = self.total_workers.saturating_sub(self.wheat);
        let food = self.resources.get(ResourceKind::Food);

        let outcome = if food >= required {
            self.resources.take_up_to(ResourceKind::Food, required);
            FeedingOutcome {
                required,
                eaten: required,
                starved: false,
            }
        } else {
            let eaten = self.resources.take_up_to(ResourceKind::Food, food);
            self.vp -= penalty;
            FeedingOutcome {
                required,
                eaten,
                starved: true,
            }
        };

        debug!(
            required = outcome.required,
            eaten = outcome.eaten,
            starved = outcome.starved,
            "fed tribe"
        );
        outcome
    }

    /// The quantity a civilization target multiplies.
    #[must_use]
    pub fn tracked_quantity(&self, target: MultiplierTarget) -> u32 {
        match target {
            MultiplierTarget::Tools => self.tool_levels(),
            MultiplierTarget::Buildings => self.buildings,
            MultiplierTarget::Workers => self.total_workers,
            MultiplierTarget::Wheat => self.wheat,
        }
    }

    /// Points the owned cards would add if the game ended now.
    #[must_use]
    pub fn card_bonus(&self) -> i32 {
        self.cards().map(|card| card.end_game_effect(self)).sum()
    }

    /// Current score: banked points plus end-game card bonuses.
    #[must_use]
    pub fn score(&self) -> i32 {
        self.vp + self.card_bonus()
    }

    /// Alias of [`Player::score`].
    #[must_use]
    pub fn get_vp(&self) -> i32 {
        self.score()
    }
}

fn outside(option: String) -> PurchaseError {
    PurchaseError::SelectionOutsideOptions(option)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardEffect;

    fn painting(culture: u8) -> Card {
        Card::new(CardEffect::AddVp { vp: 3 }, 1, CardScoring::Painting { culture })
    }

    fn civilization(target: MultiplierTarget, figures: u32) -> Card {
        Card::new(
            CardEffect::AddWheat,
            2,
            CardScoring::Civilization { target, figures },
        )
    }

    #[test]
    fn test_new_player() {
        let player = Player::new(10, 5);
        assert_eq!(player.resources.get(ResourceKind::Food), 10);
        assert_eq!(player.total_workers, 5);
        assert_eq!(player.available_workers, 5);
        assert_eq!(player.score(), 0);
    }

    #[test]
    fn test_feed_with_enough_food() {
        let mut player = Player::new(10, 5);
        player.wheat = 2;
        let outcome = player.feed(10);
        assert!(!outcome.starved);
        assert_eq!(outcome.eaten, 3);
        assert_eq!(player.resources.get(ResourceKind::Food), 7);
        assert_eq!(player.vp, 0);
    }

    #[test]
    fn test_feed_wheat_covers_everything() {
        let mut player = Player::new(0, 3);
        player.wheat = 5;
        assert!(!player.feed(10).starved);
        assert_eq!(player.vp, 0);
    }

    #[test]
    fn test_starvation_takes_all_food_and_penalty() {
        let mut player = Player::new(2, 5);
        let outcome = player.feed(10);
        assert!(outcome.starved);
        assert_eq!(outcome.eaten, 2);
        assert_eq!(player.resources.get(ResourceKind::Food), 0);
        assert_eq!(player.vp, -10);
    }

    #[test]
    fn test_upgrade_lowest_tool() {
        let mut player = Player::new(0, 5);
        assert_eq!(player.upgrade_tool(4), Some(0));
        assert_eq!(player.upgrade_tool(4), Some(1));
        player.tools = [Tool { level: 4, available: true }; TOOL_SLOTS];
        assert_eq!(player.upgrade_tool(4), None);
        assert_eq!(player.tool_levels(), 16);
    }

    #[test]
    fn test_use_tools_spends_selection() {
        let mut player = Player::new(0, 5);
        player.tools[0].level = 2;
        player.tools[1].level = 1;
        player.add_one_use_tool(3);
        player.add_one_use_tool(4);

        let selection = ToolSelection::slots(&[0]).with_one_use(&[1]);
        assert_eq!(player.use_tools(&selection), Ok(6));
        assert!(!player.tools[0].available);
        assert_eq!(player.one_use_tools.as_slice(), &[3]);

        // Used tools cannot be reused this round.
        assert!(player.use_tools(&ToolSelection::slots(&[0])).is_err());
        player.refresh();
        assert_eq!(player.use_tools(&ToolSelection::slots(&[0])), Ok(2));
    }

    #[test]
    fn test_invalid_tool_selection_changes_nothing() {
        let mut player = Player::new(0, 5);
        player.tools[0].level = 2;
        let before = player.clone();
        assert!(player.use_tools(&ToolSelection::slots(&[0, 0])).is_err());
        assert!(player.use_tools(&ToolSelection::slots(&[1])).is_err());
        assert!(player
            .use_tools(&ToolSelection::none().with_one_use(&[0]))
            .is_err());
        assert_eq!(player, before);
    }

    #[test]
    fn test_gather_with_tools() {
        let mut player = Player::new(0, 5);
        player.tools[0].level = 2;
        let selection = ToolSelection::slots(&[0]);
        assert_eq!(player.gather(ResourceKind::Wood, 7, &selection), 3);
        assert!(!player.tools[0].available);

        // The spent tool is ignored on a second roll.
        assert_eq!(player.gather(ResourceKind::Wood, 7, &selection), 2);
        assert_eq!(player.resources.get(ResourceKind::Wood), 5);
    }

    #[test]
    fn test_choose_resources() {
        let player = Player::new(0, 5);
        let options = ResourceKind::MATERIALS;
        assert_eq!(
            player.choose_resources(&options, ResourceKind::Gold),
            Ok(ResourceKind::Gold)
        );
        assert!(player
            .choose_resources(&options, ResourceKind::Food)
            .is_err());
    }

    #[test]
    fn test_caps() {
        let mut player = Player::new(0, 9);
        player.add_workers(3, 10);
        assert_eq!(player.total_workers, 10);
        player.add_wheat(12, 10);
        assert_eq!(player.wheat, 10);
    }

    #[test]
    fn test_painting_scores_per_culture() {
        let mut player = Player::new(0, 5);
        player.add_card(DeckId::new(0), painting(1));
        player.add_card(DeckId::new(1), painting(1));
        player.add_card(DeckId::new(0), painting(2));
        // Two cards of culture 1 score 2 each, the lone culture 2 scores 1.
        assert_eq!(player.card_bonus(), 5);
    }

    #[test]
    fn test_civilization_multipliers() {
        let mut player = Player::new(0, 6);
        player.add_card(DeckId::new(0), civilization(MultiplierTarget::Workers, 2));
        player.add_card(DeckId::new(1), civilization(MultiplierTarget::Buildings, 1));
        player.buildings = 3;
        assert_eq!(player.multipliers, [0, 1, 2, 0]);
        assert_eq!(player.score(), 2 * 6 + 3);
    }
}
