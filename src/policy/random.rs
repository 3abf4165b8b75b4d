//! Uniformly random placement.

use crate::core::GameRng;

use super::decider::Decider;

/// Places uniformly at random among the legal actions; resolution choices
/// stay greedy so a recorded placement sequence replays exactly.
#[derive(Clone, Debug)]
pub struct RandomDecider {
    rng: GameRng,
}

impl RandomDecider {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl Decider for RandomDecider {
    fn decide_action(&mut self, _state: &[f32], legal: &[usize]) -> usize {
        legal[self.rng.pick_index(legal.len())]
    }
}
