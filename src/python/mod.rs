//! Python bindings for the Stone Age engine.
//!
//! Built with the `python` feature. The environment follows the usual
//! reset/step shape of RL environments.
//!
//! # Quick Start
//!
//! ```python
//! import stone_age
//!
//! env = stone_age.StoneAgeEnv(seed=42, player_count=4)
//! state = env.get_state()              # numpy array, 143 floats
//! done = False
//! while not done:
//!     action = env.get_available_actions()[0]
//!     reward, done, score = env.play_step(action)
//! ```

use pyo3::prelude::*;

mod py_core;
mod py_games;

pub use py_core::*;
pub use py_games::*;

/// stone_age: a Stone Age rules engine for reinforcement learning.
#[pymodule]
fn stone_age(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyAction>()?;
    m.add_class::<PyGameResult>()?;
    m.add_class::<PyStoneAgeEnv>()?;
    m.add("STATE_SIZE", crate::encoding::STATE_SIZE)?;
    Ok(())
}
