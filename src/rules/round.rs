//! Running rounds: resolution, feeding, replenishment and the drivers.

use tracing::{debug, info, warn};

use crate::board::{LocationKind, UtilityKind};
use crate::cards::{CardMarket, EffectLimits};
use crate::core::{ConfigurationError, GameError, PlayerId, PlayerMap, ResourceKind};
use crate::policy::{GreedyDecider, Seats, SharedSeat};

use super::game::Game;
use super::outcome::{GameResult, Phase, RoundSummary, StepOutcome};

/// Times a decider is asked again after proposing an illegal placement.
const MAX_DECISION_ATTEMPTS: usize = 3;

impl Game {
    // =========================================================================
    // Drivers
    // =========================================================================

    /// Execute action `index` for the active player and, when that ends
    /// placement, resolve the round with greedy decisions.
    ///
    /// The reward is the acting player's change in score, plus the weighted
    /// change in held resources, minus the starvation penalty, plus the win
    /// bonus when this step ended the game in their favour.
    ///
    /// A starving tribe is charged twice: the feeding penalty already lowers
    /// the score, and `starvation_penalty` is subtracted on top of that.
    pub fn play_step(&mut self, index: usize) -> Result<StepOutcome, GameError> {
        let actor = self.active_player;
        let score_before = self.players[actor].score();
        let held_before = self.players[actor].resources.total();

        let outcome = self.execute_an_action(index)?;

        let mut starved = false;
        if outcome.placement_complete {
            let mut seats = SharedSeat(GreedyDecider::new());
            let summary = self.finish_round(&mut seats);
            starved = summary.starved[actor];
        }

        let player = &self.players[actor];
        let score = player.score();
        let done = self.is_over();
        let won = done && self.result.as_ref().is_some_and(|r| r.is_winner(actor));

        let weights = &self.config.reward;
        let mut reward = (score - score_before) as f32
            + weights.resource_weight * (player.resources.total() as f32 - held_before as f32);
        if starved {
            reward -= weights.starvation_penalty;
        }
        if won {
            reward += weights.win_bonus;
        }

        Ok(StepOutcome {
            reward,
            done,
            score,
            starved,
        })
    }

    /// Play the current round to its end with one decider per seat.
    pub fn run_round(&mut self, seats: &mut dyn Seats) -> Result<RoundSummary, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        let player_count = self.player_count();
        if !seats.covers(player_count) {
            return Err(ConfigurationError::InvalidSetting {
                name: "seats",
                reason: format!("a decider is needed for each of {player_count} seats"),
            }
            .into());
        }

        while self.phase == Phase::Placement {
            let id = self.active_player;
            let legal = self.get_available_actions();
            if legal.is_empty() {
                self.passed[id] = true;
                if !self.advance_turn() {
                    self.phase = Phase::Resolution;
                }
                continue;
            }
            let state = self.get_state();

            let mut attempts = 0;
            loop {
                let choice = seats.seat(id).decide_action(&state, &legal);
                match self.execute_an_action(choice) {
                    Ok(_) => break,
                    Err(err) if attempts + 1 < MAX_DECISION_ATTEMPTS => {
                        warn!(%id, %err, "placement rejected, asking again");
                        attempts += 1;
                    }
                    Err(err) => return Err(err),
                }
            }
        }

        Ok(self.finish_round(seats))
    }

    /// Play rounds until the game ends.
    pub fn run_game(&mut self, seats: &mut dyn Seats) -> Result<GameResult, GameError> {
        while !self.is_over() {
            self.run_round(seats)?;
        }
        self.result.clone().ok_or(GameError::GameOver)
    }

    // =========================================================================
    // Round phases
    // =========================================================================

    /// Resolution, feeding and replenishment, then either the next round's
    /// placement or the end of the game.
    pub(super) fn finish_round(&mut self, seats: &mut dyn Seats) -> RoundSummary {
        self.phase = Phase::Resolution;
        let purchases = self.resolve_locations(seats);

        self.phase = Phase::Feeding;
        let starved = self.feed_players();

        self.phase = Phase::Replenish;
        self.replenish();

        let round = self.round;
        let game_over = self.check_terminal();
        info!(round, purchases, game_over, "round finished");

        if !game_over {
            self.round += 1;
            self.first_player = self.first_player.next(self.player_count());
            self.begin_placement();
        }

        RoundSummary {
            round,
            starved,
            purchases,
            game_over,
        }
    }

    /// Pay out every location in board order, seats in ascending order,
    /// clearing each location afterwards. Returns the number of purchases.
    fn resolve_locations(&mut self, seats: &mut dyn Seats) -> u32 {
        let mut purchases = 0;

        for index in 0..self.board.len() {
            let kind = self.board[index].kind();
            for id in PlayerId::all(self.player_count()) {
                let workers = self.board[index].workers_of(id);
                if workers == 0 {
                    continue;
                }
                match kind {
                    LocationKind::Utility(utility) => self.resolve_utility(id, utility, workers),
                    LocationKind::Gathering(resource) => {
                        self.resolve_gathering(seats, id, resource, workers);
                    }
                    LocationKind::CardSlot => {
                        purchases += u32::from(self.resolve_card_slot(seats, id, index));
                    }
                    LocationKind::BuildingSlot => {
                        purchases += u32::from(self.resolve_building_slot(seats, id, index));
                    }
                }
            }
            self.board[index].clear();
        }

        purchases
    }

    fn resolve_utility(&mut self, id: PlayerId, utility: UtilityKind, workers: u32) {
        let config = &self.config;
        let player = &mut self.players[id];
        match utility {
            UtilityKind::Farm => player.add_wheat(workers, config.max_wheat),
            UtilityKind::House => player.add_workers(workers, config.max_workers),
            UtilityKind::ToolShop => {
                for _ in 0..workers {
                    player.upgrade_tool(config.max_tool_level);
                }
            }
        }
        debug!(%id, ?utility, workers, "resolved utility");
    }

    fn resolve_gathering(
        &mut self,
        seats: &mut dyn Seats,
        id: PlayerId,
        resource: ResourceKind,
        workers: u32,
    ) {
        let pips = self.rng.roll_sum(workers as usize);
        let selection = seats
            .seat(id)
            .decide_tools(&self.players[id], pips, resource.value());
        let amount = self.players[id].gather(resource, pips, &selection);
        debug!(%id, %resource, workers, pips, amount, "resolved gathering");
    }

    fn resolve_card_slot(&mut self, seats: &mut dyn Seats, id: PlayerId, index: usize) -> bool {
        let slot = &self.board[index];
        let (Some(card), Some(deck)) = (slot.card().copied(), slot.deck()) else {
            return false;
        };
        let Some(payment) = seats.seat(id).decide_card_payment(&self.players[id], &card) else {
            debug!(%id, %card, "declined card");
            return false;
        };

        let mut market = CardMarket {
            players: &mut self.players,
            deck: &mut self.card_decks[deck.index()],
            rng: &mut self.rng,
            limits: EffectLimits::from(&self.config),
        };
        match market.buy(seats, id, deck, card, &payment) {
            Ok(()) => {
                self.board[index].take_card();
                true
            }
            Err(err) => {
                warn!(%id, %err, "card purchase rejected");
                false
            }
        }
    }

    fn resolve_building_slot(
        &mut self,
        seats: &mut dyn Seats,
        id: PlayerId,
        index: usize,
    ) -> bool {
        let Some(building) = self.board[index].building().copied() else {
            return false;
        };
        let Some(payment) = seats
            .seat(id)
            .decide_building_payment(&self.players[id], &building)
        else {
            debug!(%id, "declined building");
            return false;
        };

        let player = &mut self.players[id];
        let purchase = building
            .validate_payment(&player.resources, &payment)
            .and_then(|vp| {
                player.resources.try_spend(&payment)?;
                Ok(vp)
            });

        match purchase {
            Ok(vp) => {
                player.vp += vp as i32;
                player.buildings += 1;
                self.board[index].take_building();
                debug!(%id, vp, "bought building");
                true
            }
            Err(err) => {
                warn!(%id, %err, "building purchase rejected");
                false
            }
        }
    }

    /// Every seat feeds its tribe, in seat order.
    fn feed_players(&mut self) -> PlayerMap<bool> {
        let penalty = self.config.feeding_penalty;
        let mut starved = PlayerMap::with_value(self.player_count(), false);
        for (id, player) in self.players.iter_mut() {
            let outcome = player.feed(penalty);
            if outcome.starved {
                debug!(%id, penalty, "tribe starved");
            }
            starved[id] = outcome.starved;
        }
        starved
    }

    /// Workers come home, tools recover, the board is restocked.
    fn replenish(&mut self) {
        for (_, player) in self.players.iter_mut() {
            player.refresh();
        }
        self.fill_board();
    }

    /// End the game if the supply ran out or the round limit is reached.
    fn check_terminal(&mut self) -> bool {
        if !self.supply_exhausted() && self.round < self.config.max_rounds {
            return false;
        }

        let result = GameResult::from_scores(self.final_scores(), self.round);
        info!(
            winner = %result.winner,
            rounds = result.rounds,
            scores = ?result.scores,
            "game over"
        );
        self.result = Some(result);
        self.phase = Phase::GameOver;
        true
    }
}
