//! The game value: setup, queries and worker placement.
//!
//! A `Game` owns everything about one match; there is no global state and
//! clones are independent (decks and history are persistent vectors, so a
//! clone is cheap). Round resolution lives in `round.rs`.

use im::Vector;
use tracing::{debug, info};

use crate::board::Board;
use crate::buildings::{build_building_stacks, building_catalog, Building, BUILDING_STACKS};
use crate::cards::{build_card_decks, card_catalog, Card, DeckId, CARD_DECKS};
use crate::core::{
    ActionRecord, ActionSpace, ConfigurationError, GameConfig, GameError, GameRng,
    PlacementError, PlayerId, PlayerMap,
};
use crate::encoding::{layout, FlatEncoder, StateEncoder};
use crate::players::Player;

use super::outcome::{ActionOutcome, GameResult, Phase};

/// One Stone Age match.
#[derive(Clone, Debug)]
pub struct Game {
    pub(super) config: GameConfig,
    pub(super) seed: u64,
    pub(super) players: PlayerMap<Player>,
    pub(super) board: Board,
    pub(super) card_decks: [Vector<Card>; CARD_DECKS],
    pub(super) building_stacks: [Vector<Building>; BUILDING_STACKS],
    pub(super) rng: GameRng,
    pub(super) round: u32,
    pub(super) first_player: PlayerId,
    pub(super) active_player: PlayerId,
    pub(super) phase: Phase,
    pub(super) passed: PlayerMap<bool>,
    pub(super) history: Vector<ActionRecord>,
    pub(super) sequence: u32,
    pub(super) result: Option<GameResult>,
    pub(super) action_space: ActionSpace,
    pub(super) encoder: FlatEncoder,
}

impl Game {
    /// A four-player game with default settings.
    pub fn start_game(seed: u64) -> Result<Self, ConfigurationError> {
        Self::new(GameConfig::default(), seed)
    }

    /// Set up a game: shuffle the supply, deal the board, seat the tribes.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigurationError> {
        config.validate()?;
        layout::validate()?;

        let mut rng = GameRng::new(seed);
        let card_decks = build_card_decks(card_catalog(), &mut rng, config.shuffle_supply)?;
        let building_stacks =
            build_building_stacks(building_catalog(), &mut rng, config.shuffle_supply)?;

        let player_count = config.player_count;
        let board = Board::new(&config);
        let action_space = ActionSpace::new(&board.capacities(), config.max_workers);
        let encoder = FlatEncoder::new(action_space.len());
        let players = PlayerMap::new(player_count, |_| {
            Player::new(config.starting_food, config.starting_workers)
        });

        let mut game = Self {
            config,
            seed,
            players,
            board,
            card_decks,
            building_stacks,
            rng,
            round: 1,
            first_player: PlayerId::new(0),
            active_player: PlayerId::new(0),
            phase: Phase::Placement,
            passed: PlayerMap::with_value(player_count, false),
            history: Vector::new(),
            sequence: 0,
            result: None,
            action_space,
            encoder,
        };

        game.fill_board();
        if game.supply_exhausted() {
            return Err(ConfigurationError::MalformedDeck(
                "supply ran out while dealing the board".to_string(),
            ));
        }
        game.begin_placement();

        info!(seed, players = player_count, "game started");
        Ok(game)
    }

    /// Start over with the same configuration and seed.
    pub fn reset(&mut self) -> Result<(), ConfigurationError> {
        self.reset_with_seed(self.seed)
    }

    /// Start over with the same configuration and a new seed.
    pub fn reset_with_seed(&mut self, seed: u64) -> Result<(), ConfigurationError> {
        *self = Self::new(self.config.clone(), seed)?;
        Ok(())
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Cards left in a deck, front first.
    #[must_use]
    pub fn card_deck(&self, deck: DeckId) -> &Vector<Card> {
        &self.card_decks[deck.index()]
    }

    /// Tiles left in a building stack, top first.
    #[must_use]
    pub fn building_stack(&self, stack: usize) -> &Vector<Building> {
        &self.building_stacks[stack]
    }

    /// Current round, starting at 1.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn first_player(&self) -> PlayerId {
        self.first_player
    }

    /// The seat whose placement is awaited.
    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        self.active_player
    }

    #[must_use]
    pub fn has_passed(&self, id: PlayerId) -> bool {
        self.passed[id]
    }

    #[must_use]
    pub fn action_space(&self) -> &ActionSpace {
        &self.action_space
    }

    /// Every placement made so far, in order.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// The result, once the game is over.
    #[must_use]
    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    /// Every seat's score as it stands.
    #[must_use]
    pub fn final_scores(&self) -> PlayerMap<i32> {
        PlayerMap::new(self.player_count(), |id| self.players[id].score())
    }

    /// State vector of the active player.
    #[must_use]
    pub fn get_state(&self) -> Vec<f32> {
        self.state_for(self.active_player)
    }

    /// State vector from any seat's point of view.
    #[must_use]
    pub fn state_for(&self, id: PlayerId) -> Vec<f32> {
        self.encoder.encode(self, id).into_vec()
    }

    /// Legal action indices for the active player.
    #[must_use]
    pub fn get_available_actions(&self) -> Vec<usize> {
        self.legal_actions_for(self.active_player)
    }

    /// Board indices the active player can place on.
    #[must_use]
    pub fn available_locations(&self) -> Vec<usize> {
        let mut locations: Vec<usize> = self
            .get_available_actions()
            .into_iter()
            .filter_map(|index| self.action_space.action(index).ok())
            .map(|action| action.location)
            .collect();
        locations.dedup();
        locations
    }

    fn legal_actions_for(&self, id: PlayerId) -> Vec<usize> {
        if self.phase != Phase::Placement || self.passed[id] {
            return Vec::new();
        }
        let available = self.players[id].available_workers;
        self.action_space
            .iter()
            .filter(|(_, action)| {
                action.workers <= available && self.board[action.location].can_place(action.workers)
            })
            .map(|(index, _)| index)
            .collect()
    }

    // === Placement ===

    /// Place the active player's workers according to action `index`.
    ///
    /// On success the turn passes to the next seat that can still place.
    /// A rejected action changes nothing.
    pub fn execute_an_action(&mut self, index: usize) -> Result<ActionOutcome, GameError> {
        match self.phase {
            Phase::Placement => {}
            Phase::GameOver => return Err(GameError::GameOver),
            _ => return Err(PlacementError::WrongPhase.into()),
        }

        let action = self.action_space.action(index)?;
        let id = self.active_player;

        let location = self
            .board
            .get_mut(action.location)
            .ok_or(PlacementError::UnknownAction(index))?;
        location.place(id, &mut self.players[id], action.workers)?;

        self.history.push_back(ActionRecord {
            player: id,
            index,
            action,
            round: self.round,
            sequence: self.sequence,
        });
        self.sequence += 1;
        debug!(%id, %action, round = self.round, "executed action");

        let placement_complete = !self.advance_turn();
        if placement_complete {
            self.phase = Phase::Resolution;
            debug!(round = self.round, "placement complete");
        }

        Ok(ActionOutcome {
            player: id,
            action,
            placement_complete,
        })
    }

    /// Whether `id` can still place; marks the seat passed when it cannot.
    fn can_act(&mut self, id: PlayerId) -> bool {
        if self.passed[id] {
            return false;
        }
        if self.players[id].available_workers == 0 || self.legal_actions_for(id).is_empty() {
            self.passed[id] = true;
            debug!(%id, "passed");
            return false;
        }
        true
    }

    /// Hand the turn to the next seat that can place, the current one last.
    /// Returns `false` when nobody can.
    pub(super) fn advance_turn(&mut self) -> bool {
        let player_count = self.player_count();
        let mut candidate = self.active_player;
        for _ in 0..player_count {
            candidate = candidate.next(player_count);
            if self.can_act(candidate) {
                self.active_player = candidate;
                return true;
            }
        }
        false
    }

    /// Open the placement phase of the current round.
    pub(super) fn begin_placement(&mut self) {
        self.phase = Phase::Placement;
        self.sequence = 0;
        for (_, passed) in self.passed.iter_mut() {
            *passed = false;
        }
        self.active_player = self.first_player;
        if !self.can_act(self.first_player) && !self.advance_turn() {
            self.phase = Phase::Resolution;
        }
    }

    // === Supply ===

    /// Fill empty card slots front-of-deck first, then empty building slots.
    pub(super) fn fill_board(&mut self) {
        let decks = &mut self.card_decks;
        let stacks = &mut self.building_stacks;
        for location in self.board.iter_mut() {
            if let Some(deck) = location.deck() {
                if location.card().is_none() {
                    if let Some(card) = decks.get_mut(deck.index()).and_then(Vector::pop_front) {
                        location.offer_card(card);
                    }
                }
            } else if let Some(stack) = location.stack() {
                if location.building().is_none() {
                    if let Some(building) = stacks.get_mut(stack).and_then(Vector::pop_front) {
                        location.offer_building(building);
                    }
                }
            }
        }
    }

    /// Any deck or stack has run dry. Checked after every round; the game
    /// ends as soon as this holds.
    #[must_use]
    pub fn supply_exhausted(&self) -> bool {
        self.card_decks.iter().any(Vector::is_empty)
            || self.building_stacks.iter().any(Vector::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BUILDING_SLOTS, CARD_SLOTS, FOREST, HOUSE};
    use crate::core::Action;

    fn index_of(game: &Game, location: usize, workers: u32) -> usize {
        game.action_space()
            .index_of(Action::place(location, workers))
            .unwrap()
    }

    #[test]
    fn test_setup() {
        let game = Game::start_game(1).unwrap();
        assert_eq!(game.player_count(), 4);
        assert_eq!(game.round(), 1);
        assert_eq!(game.phase(), Phase::Placement);
        assert_eq!(game.active_player(), PlayerId::new(0));
        assert_eq!(game.card_deck(DeckId::new(0)).len(), 16);
        assert_eq!(game.card_deck(DeckId::new(1)).len(), 16);
        for stack in 0..BUILDING_STACKS {
            assert_eq!(game.building_stack(stack).len(), 6);
        }
        assert!(CARD_SLOTS.into_iter().all(|i| game.board()[i].card().is_some()));
        assert!(BUILDING_SLOTS.into_iter().all(|i| game.board()[i].building().is_some()));
        for player in game.players().values() {
            assert_eq!(player.available_workers, 5);
        }
    }

    #[test]
    fn test_slots_refill_from_their_own_supply() {
        let mut game = Game::new(GameConfig::new(2).unshuffled(), 4).unwrap();
        let card_slot = CARD_SLOTS.start + 2;
        let building_slot = BUILDING_SLOTS.start + 1;
        let next_card = *game.card_deck(DeckId::new(1)).front().unwrap();
        let next_building = *game.building_stack(1).front().unwrap();

        game.board[card_slot].take_card();
        game.board[building_slot].take_building();
        game.fill_board();

        assert_eq!(game.board()[card_slot].card(), Some(&next_card));
        assert_eq!(game.board()[building_slot].building(), Some(&next_building));
        assert_eq!(game.card_deck(DeckId::new(0)).len(), 16);
        assert_eq!(game.card_deck(DeckId::new(1)).len(), 15);
        assert_eq!(game.building_stack(0).len(), 6);
        assert_eq!(game.building_stack(1).len(), 5);
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(matches!(
            Game::new(GameConfig::new(1), 0),
            Err(ConfigurationError::InvalidPlayerCount(1))
        ));
    }

    #[test]
    fn test_wood_placement() {
        let mut game = Game::start_game(3).unwrap();
        let id = PlayerId::new(0);
        assert!(game.board()[FOREST].can_place(2));

        let outcome = game.execute_an_action(index_of(&game, FOREST, 2)).unwrap();
        assert_eq!(outcome.player, id);
        assert_eq!(outcome.action, Action::place(FOREST, 2));
        assert!(!outcome.placement_complete);
        assert_eq!(game.board()[FOREST].available_space(), 2);
        assert_eq!(game.player(id).available_workers, 3);
        assert_eq!(game.active_player(), PlayerId::new(1));
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_rejected_action_changes_nothing() {
        let mut game = Game::start_game(3).unwrap();
        game.execute_an_action(index_of(&game, HOUSE, 2)).unwrap();
        let state = game.get_state();

        let result = game.execute_an_action(index_of(&game, HOUSE, 1));
        assert!(matches!(
            result,
            Err(GameError::Placement(PlacementError::CapacityExceeded { .. }))
        ));
        assert_eq!(game.get_state(), state);
        assert_eq!(game.active_player(), PlayerId::new(1));

        assert!(matches!(
            game.execute_an_action(usize::MAX),
            Err(GameError::Placement(PlacementError::UnknownAction(_)))
        ));
    }

    #[test]
    fn test_available_actions_respect_capacity() {
        let mut game = Game::start_game(3).unwrap();
        game.execute_an_action(index_of(&game, HOUSE, 2)).unwrap();
        let legal = game.get_available_actions();
        assert!(!legal.contains(&index_of(&game, HOUSE, 1)));
        assert!(!game.available_locations().contains(&HOUSE));
        assert!(game.available_locations().contains(&FOREST));
    }

    #[test]
    fn test_state_has_fixed_length() {
        let game = Game::start_game(9).unwrap();
        assert_eq!(game.get_state().len(), layout::STATE_SIZE);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut game = Game::start_game(21).unwrap();
        let initial = game.get_state();
        game.execute_an_action(index_of(&game, FOREST, 3)).unwrap();
        assert_ne!(game.get_state(), initial);
        game.reset().unwrap();
        assert_eq!(game.get_state(), initial);
        assert!(game.history().is_empty());
    }
}
