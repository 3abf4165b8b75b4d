//! Deterministic dice and shuffling.
//!
//! Every random event in a game (deck shuffles, gathering dice, card dice)
//! is drawn from one `GameRng`. Replaying the same seed with the same action
//! sequence reproduces the game exactly.
//!
//! ```
//! use stone_age::core::GameRng;
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! assert_eq!(a.roll_dice(3), b.roll_dice(3));
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A handful of rolled dice. Nobody rolls more than ten at once.
pub type DicePool = SmallVec<[u8; 10]>;

/// Seeded ChaCha8 stream owned by a game.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// One six-sided die.
    pub fn roll_die(&mut self) -> u8 {
        self.inner.gen_range(1..=6)
    }

    /// `count` dice, each face kept.
    pub fn roll_dice(&mut self, count: usize) -> DicePool {
        (0..count).map(|_| self.roll_die()).collect()
    }

    /// `count` dice, summed. This is the gathering roll.
    pub fn roll_sum(&mut self, count: usize) -> u32 {
        let dice = self.roll_dice(count);
        let total = dice.iter().map(|&d| u32::from(d)).sum();
        tracing::trace!(?dice, total, "dice rolled");
        total
    }

    /// Uniform index below `len`. `len` must be positive.
    pub fn pick_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }

    /// Shuffle a deck or stack in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    /// Position of the stream, for snapshots.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Continue a stream from a saved position.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable stream position.
///
/// The ChaCha8 word position makes capture and restore O(1) however many
/// dice have been rolled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    pub word_pos: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_dice() {
        let mut a = GameRng::new(42);
        let mut b = GameRng::new(42);
        let faces_a: Vec<u8> = (0..100).map(|_| a.roll_die()).collect();
        let faces_b: Vec<u8> = (0..100).map(|_| b.roll_die()).collect();
        assert_eq!(faces_a, faces_b);
    }

    #[test]
    fn test_dice_are_six_sided() {
        let mut rng = GameRng::new(3);
        assert!((0..500).all(|_| (1..=6).contains(&rng.roll_die())));
    }

    #[test]
    fn test_roll_sum_bounds() {
        let mut rng = GameRng::new(9);
        for count in 1..=10 {
            let total = rng.roll_sum(count);
            assert!(total >= count as u32 && total <= 6 * count as u32);
        }
    }

    #[test]
    fn test_restored_stream_continues() {
        let mut rng = GameRng::new(42);
        rng.roll_dice(37);

        let state = rng.state();
        let expected = rng.roll_dice(10);
        let mut restored = GameRng::from_state(&state);
        assert_eq!(restored.roll_dice(10), expected);
    }

    #[test]
    fn test_pick_index_in_range() {
        let mut rng = GameRng::new(5);
        assert!((0..200).all(|_| rng.pick_index(3) < 3));
    }

    #[test]
    fn test_shuffle_keeps_cards() {
        let mut rng = GameRng::new(42);
        let mut deck: Vec<u32> = (1..=36).collect();
        rng.shuffle(&mut deck);
        deck.sort_unstable();
        assert_eq!(deck, (1..=36).collect::<Vec<_>>());
    }
}
