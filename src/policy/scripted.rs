//! Replaying a fixed list of placements.

use std::collections::VecDeque;

use crate::core::{ActionRecord, PlayerId};

use super::decider::Decider;

/// Plays back a queue of action indices, then the first legal action.
///
/// The queued index is returned as is, even when it is not legal; the
/// engine rejects it like any other illegal request.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDecider {
    script: VecDeque<usize>,
}

impl ScriptedDecider {
    #[must_use]
    pub fn new(script: impl IntoIterator<Item = usize>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// The placements `player` made in a recorded game.
    #[must_use]
    pub fn from_history<'a>(
        history: impl IntoIterator<Item = &'a ActionRecord>,
        player: PlayerId,
    ) -> Self {
        Self::new(
            history
                .into_iter()
                .filter(|record| record.player == player)
                .map(|record| record.index),
        )
    }

    /// Placements not yet played.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Decider for ScriptedDecider {
    fn decide_action(&mut self, _state: &[f32], legal: &[usize]) -> usize {
        self.script.pop_front().unwrap_or(legal[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Action;

    #[test]
    fn test_plays_script_then_first_legal() {
        let mut decider = ScriptedDecider::new([7, 2]);
        assert_eq!(decider.decide_action(&[], &[1, 2]), 7);
        assert_eq!(decider.decide_action(&[], &[1, 2]), 2);
        assert_eq!(decider.remaining(), 0);
        assert_eq!(decider.decide_action(&[], &[1, 2]), 1);
    }

    #[test]
    fn test_from_history_filters_by_seat() {
        let record = |player: u8, index: usize| ActionRecord {
            player: PlayerId::new(player),
            index,
            action: Action::place(0, 1),
            round: 1,
            sequence: 0,
        };
        let history = vec![record(0, 4), record(1, 5), record(0, 6)];
        let decider = ScriptedDecider::from_history(&history, PlayerId::new(0));
        assert_eq!(decider.script, VecDeque::from(vec![4, 6]));
    }
}
