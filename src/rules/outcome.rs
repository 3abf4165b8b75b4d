//! Phases and the values reported while a game runs.

use serde::{Deserialize, Serialize};

use crate::core::{Action, PlayerId, PlayerMap};

/// Where a round currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Players take turns sending workers out.
    Placement,
    /// Locations pay out in board order.
    Resolution,
    /// Every tribe eats.
    Feeding,
    /// Workers return, tools recover, empty slots are refilled.
    Replenish,
    /// The game has ended.
    GameOver,
}

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    /// Highest score; ties go to the lower seat.
    pub winner: PlayerId,

    /// Final score of every seat.
    pub scores: PlayerMap<i32>,

    /// Rounds played.
    pub rounds: u32,
}

impl GameResult {
    /// Rank final scores.
    #[must_use]
    pub fn from_scores(scores: PlayerMap<i32>, rounds: u32) -> Self {
        let winner = scores
            .iter()
            .max_by_key(|&(id, &score)| (score, std::cmp::Reverse(id)))
            .map_or(PlayerId::new(0), |(id, _)| id);
        Self {
            winner,
            scores,
            rounds,
        }
    }

    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winner == player
    }
}

/// What `execute_an_action` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionOutcome {
    /// The seat that placed.
    pub player: PlayerId,

    /// The decoded placement.
    pub action: Action,

    /// Nobody can place any more; the round is ready to resolve.
    pub placement_complete: bool,
}

/// What `play_step` reports to a learning agent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepOutcome {
    /// Weighted reward of the acting player.
    pub reward: f32,

    /// The game ended during this step.
    pub done: bool,

    /// Acting player's score after the step.
    pub score: i32,

    /// The acting player starved during this step.
    pub starved: bool,
}

/// What happened at the end of a round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundSummary {
    /// The round that just finished.
    pub round: u32,

    /// Seats that could not feed their tribe.
    pub starved: PlayerMap<bool>,

    /// Cards and buildings bought.
    pub purchases: u32,

    /// The round ended the game.
    pub game_over: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highest_score_wins() {
        let mut scores = PlayerMap::with_value(3, 10);
        scores[PlayerId::new(2)] = 14;
        let result = GameResult::from_scores(scores, 8);
        assert_eq!(result.winner, PlayerId::new(2));
        assert!(result.is_winner(PlayerId::new(2)));
        assert!(!result.is_winner(PlayerId::new(0)));
    }

    #[test]
    fn test_tie_goes_to_lowest_seat() {
        let mut scores = PlayerMap::with_value(4, 3);
        scores[PlayerId::new(1)] = 9;
        scores[PlayerId::new(3)] = 9;
        assert_eq!(GameResult::from_scores(scores, 1).winner, PlayerId::new(1));
    }
}
