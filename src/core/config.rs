//! Game configuration.
//!
//! `GameConfig` carries every tunable number of a game: table size,
//! starting tribe, board capacities, the round limit and the reward weights
//! reported by `play_step`. Defaults follow the board game; `validate`
//! rejects settings the engine cannot run with.

use serde::{Deserialize, Serialize};

use super::error::ConfigurationError;
use super::player::MAX_PLAYERS;

/// Hard cap on a tribe's size.
pub const MAX_TRIBE_SIZE: u32 = 10;

/// Weights combining the reward components of a step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RewardConfig {
    /// Multiplier applied to the change in held resources.
    pub resource_weight: f32,

    /// Subtracted when the acting player starved this step.
    pub starvation_penalty: f32,

    /// Added when the game ended this step and the acting player won.
    pub win_bonus: f32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            resource_weight: 0.1,
            starvation_penalty: 10.0,
            win_bonus: 50.0,
        }
    }
}

/// Complete game configuration.
///
/// ```
/// use stone_age::core::GameConfig;
///
/// let config = GameConfig::new(3).with_max_rounds(20);
/// assert!(config.validate().is_ok());
/// assert!(GameConfig::new(5).validate().is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of seats (2-4).
    pub player_count: usize,

    /// Food each player starts with.
    pub starting_food: u32,

    /// Workers each player starts with.
    pub starting_workers: u32,

    /// Largest tribe the House can grow to.
    pub max_workers: u32,

    /// Highest wheat (agriculture) level.
    pub max_wheat: u32,

    /// Highest level a persistent tool can reach.
    pub max_tool_level: u8,

    /// Capacity of the hunting grounds.
    pub hunting_capacity: u32,

    /// Capacity of each material gathering location.
    pub gathering_capacity: u32,

    /// Game ends after this many rounds even if no supply ran out.
    pub max_rounds: u32,

    /// Victory points lost by a player who cannot feed the tribe.
    pub feeding_penalty: i32,

    /// Longest chain of "draw a card" effects resolved for one purchase.
    pub max_draw_chain: u32,

    /// Shuffle card decks and building stacks at setup.
    pub shuffle_supply: bool,

    /// Reward weights reported by `play_step`.
    pub reward: RewardConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(MAX_PLAYERS)
    }
}

impl GameConfig {
    /// Create a configuration with board-game defaults.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            starting_food: 10,
            starting_workers: 5,
            max_workers: MAX_TRIBE_SIZE,
            max_wheat: 10,
            max_tool_level: 4,
            hunting_capacity: 40,
            gathering_capacity: 4,
            max_rounds: 50,
            feeding_penalty: 10,
            max_draw_chain: 3,
            shuffle_supply: true,
            reward: RewardConfig::default(),
        }
    }

    /// Set the starting food.
    #[must_use]
    pub fn with_starting_food(mut self, food: u32) -> Self {
        self.starting_food = food;
        self
    }

    /// Set the starting tribe size.
    #[must_use]
    pub fn with_starting_workers(mut self, workers: u32) -> Self {
        self.starting_workers = workers;
        self
    }

    /// Set the capacity of the material gathering locations.
    #[must_use]
    pub fn with_gathering_capacity(mut self, capacity: u32) -> Self {
        self.gathering_capacity = capacity;
        self
    }

    /// Set the round limit.
    #[must_use]
    pub fn with_max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = rounds;
        self
    }

    /// Set the starvation penalty.
    #[must_use]
    pub fn with_feeding_penalty(mut self, penalty: i32) -> Self {
        self.feeding_penalty = penalty;
        self
    }

    /// Set the draw-chain limit.
    #[must_use]
    pub fn with_max_draw_chain(mut self, chain: u32) -> Self {
        self.max_draw_chain = chain;
        self
    }

    /// Keep card decks and building stacks in catalog order.
    #[must_use]
    pub fn unshuffled(mut self) -> Self {
        self.shuffle_supply = false;
        self
    }

    /// Set the reward weights.
    #[must_use]
    pub fn with_reward(mut self, reward: RewardConfig) -> Self {
        self.reward = reward;
        self
    }

    /// Check that the engine can run with these settings.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(2..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(ConfigurationError::InvalidPlayerCount(self.player_count));
        }
        if self.max_workers == 0 || self.max_workers > MAX_TRIBE_SIZE {
            return Err(invalid(
                "max_workers",
                format!("must be 1-{MAX_TRIBE_SIZE}, got {}", self.max_workers),
            ));
        }
        if self.starting_workers == 0 || self.starting_workers > self.max_workers {
            return Err(invalid(
                "starting_workers",
                format!("must be 1-{}, got {}", self.max_workers, self.starting_workers),
            ));
        }
        if self.hunting_capacity == 0 {
            return Err(invalid("hunting_capacity", "must be positive".to_string()));
        }
        if self.gathering_capacity == 0 {
            return Err(invalid("gathering_capacity", "must be positive".to_string()));
        }
        if self.max_rounds == 0 {
            return Err(invalid("max_rounds", "must be positive".to_string()));
        }
        if self.feeding_penalty < 0 {
            return Err(invalid("feeding_penalty", "must not be negative".to_string()));
        }
        Ok(())
    }
}

fn invalid(name: &'static str, reason: String) -> ConfigurationError {
    ConfigurationError::InvalidSetting { name, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.player_count, 4);
        assert_eq!(config.starting_workers, 5);
        assert_eq!(config.gathering_capacity, 4);
        assert_eq!(config.feeding_penalty, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::new(2)
            .with_starting_food(0)
            .with_max_rounds(3)
            .unshuffled();
        assert_eq!(config.starting_food, 0);
        assert_eq!(config.max_rounds, 3);
        assert!(!config.shuffle_supply);
    }

    #[test]
    fn test_rejects_bad_settings() {
        assert_eq!(
            GameConfig::new(1).validate(),
            Err(ConfigurationError::InvalidPlayerCount(1))
        );
        assert!(GameConfig::new(4).with_starting_workers(0).validate().is_err());
        assert!(GameConfig::new(4).with_starting_workers(11).validate().is_err());
        assert!(GameConfig::new(4).with_gathering_capacity(0).validate().is_err());
        assert!(GameConfig::new(4).with_max_rounds(0).validate().is_err());
    }

    #[test]
    fn test_config_serde() {
        let config = GameConfig::new(3).with_max_rounds(12);
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
