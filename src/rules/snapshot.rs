//! Saving and restoring a game mid-play.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::buildings::{Building, BUILDING_STACKS};
use crate::cards::{Card, CARD_DECKS};
use crate::core::{
    ActionRecord, ActionSpace, ConfigurationError, GameConfig, GameRng, GameRngState, PlayerId,
    PlayerMap,
};
use crate::encoding::FlatEncoder;
use crate::players::Player;

use super::game::Game;
use super::outcome::{GameResult, Phase};

/// Everything needed to continue a game exactly where it stopped,
/// including the position of the dice stream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub config: GameConfig,
    pub seed: u64,
    pub players: PlayerMap<Player>,
    pub board: Board,
    pub card_decks: [Vector<Card>; CARD_DECKS],
    pub building_stacks: [Vector<Building>; BUILDING_STACKS],
    pub rng: GameRngState,
    pub round: u32,
    pub first_player: PlayerId,
    pub active_player: PlayerId,
    pub phase: Phase,
    pub passed: PlayerMap<bool>,
    pub history: Vector<ActionRecord>,
    pub sequence: u32,
    pub result: Option<GameResult>,
}

impl GameSnapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ConfigurationError> {
        bincode::serialize(self).map_err(|e| ConfigurationError::Snapshot(e.to_string()))
    }

    /// Decode bytes written by [`GameSnapshot::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigurationError> {
        bincode::deserialize(bytes).map_err(|e| ConfigurationError::Snapshot(e.to_string()))
    }
}

impl Game {
    /// Capture the full game state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            config: self.config.clone(),
            seed: self.seed,
            players: self.players.clone(),
            board: self.board.clone(),
            card_decks: self.card_decks.clone(),
            building_stacks: self.building_stacks.clone(),
            rng: self.rng.state(),
            round: self.round,
            first_player: self.first_player,
            active_player: self.active_player,
            phase: self.phase,
            passed: self.passed.clone(),
            history: self.history.clone(),
            sequence: self.sequence,
            result: self.result.clone(),
        }
    }

    /// Rebuild a game from a snapshot.
    ///
    /// Fails when the snapshot's configuration is invalid, when its tables
    /// or seat references do not match the configured number of seats, or
    /// when its board is not the board that configuration lays out.
    pub fn restore(snapshot: GameSnapshot) -> Result<Self, ConfigurationError> {
        snapshot.config.validate()?;
        let player_count = snapshot.config.player_count;
        if snapshot.players.player_count() != player_count
            || snapshot.passed.player_count() != player_count
        {
            return Err(ConfigurationError::Snapshot(format!(
                "expected {player_count} seats, found {}",
                snapshot.players.player_count()
            )));
        }
        check_seat("active player", snapshot.active_player, player_count)?;
        check_seat("first player", snapshot.first_player, player_count)?;
        if let Some(result) = &snapshot.result {
            check_seat("winner", result.winner, player_count)?;
            if result.scores.player_count() != player_count {
                return Err(ConfigurationError::Snapshot(format!(
                    "result scores {} seats, expected {player_count}",
                    result.scores.player_count()
                )));
            }
        }
        snapshot.board.check_layout(&snapshot.config)?;

        let action_space = ActionSpace::new(&snapshot.board.capacities(), snapshot.config.max_workers);
        let encoder = FlatEncoder::new(action_space.len());

        Ok(Self {
            config: snapshot.config,
            seed: snapshot.seed,
            players: snapshot.players,
            board: snapshot.board,
            card_decks: snapshot.card_decks,
            building_stacks: snapshot.building_stacks,
            rng: GameRng::from_state(&snapshot.rng),
            round: snapshot.round,
            first_player: snapshot.first_player,
            active_player: snapshot.active_player,
            phase: snapshot.phase,
            passed: snapshot.passed,
            history: snapshot.history,
            sequence: snapshot.sequence,
            result: snapshot.result,
            action_space,
            encoder,
        })
    }
}

fn check_seat(role: &str, id: PlayerId, player_count: usize) -> Result<(), ConfigurationError> {
    if id.index() < player_count {
        Ok(())
    } else {
        Err(ConfigurationError::Snapshot(format!(
            "{role} {} is not seated at a {player_count}-seat table",
            id.index()
        )))
    }
}
