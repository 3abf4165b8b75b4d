//! The game environment for Python.

use numpy::PyArray1;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::{GameConfig, GameError};
use crate::encoding::STATE_SIZE;
use crate::rules::Game;

use super::py_core::{PyAction, PyGameResult};

fn to_py_err(err: impl Into<GameError>) -> PyErr {
    let err: GameError = err.into();
    PyValueError::new_err(err.to_string())
}

/// A Stone Age game driven one placement at a time.
///
/// Resolution choices (tools, payments, dice) are made greedily.
#[pyclass(name = "StoneAgeEnv")]
pub struct PyStoneAgeEnv {
    game: Game,
}

#[pymethods]
impl PyStoneAgeEnv {
    /// Create a new game.
    ///
    /// # Arguments
    /// - seed: RNG seed for deterministic games
    /// - player_count: Number of seats (2-4)
    /// - max_rounds: Round limit
    #[new]
    #[pyo3(signature = (seed = 42, player_count = 4, max_rounds = 50))]
    fn new(seed: u64, player_count: usize, max_rounds: u32) -> PyResult<Self> {
        let config = GameConfig::new(player_count).with_max_rounds(max_rounds);
        let game = Game::new(config, seed).map_err(to_py_err)?;
        Ok(Self { game })
    }

    /// Start over, optionally with a new seed.
    #[pyo3(signature = (seed = None))]
    fn reset<'py>(&mut self, py: Python<'py>, seed: Option<u64>) -> PyResult<Bound<'py, PyArray1<f32>>> {
        match seed {
            Some(seed) => self.game.reset_with_seed(seed),
            None => self.game.reset(),
        }
        .map_err(to_py_err)?;
        Ok(self.get_state(py))
    }

    /// State vector of the active player.
    fn get_state<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f32>> {
        PyArray1::from_vec_bound(py, self.game.get_state())
    }

    /// Legal action indices for the active player.
    fn get_available_actions(&self) -> Vec<usize> {
        self.game.get_available_actions()
    }

    /// Decode an action index.
    fn action(&self, index: usize) -> PyResult<PyAction> {
        self.game
            .action_space()
            .action(index)
            .map(PyAction)
            .map_err(to_py_err)
    }

    /// Play one placement; returns `(reward, done, score)`.
    fn play_step(&mut self, index: usize) -> PyResult<(f32, bool, i32)> {
        let outcome = self.game.play_step(index).map_err(to_py_err)?;
        Ok((outcome.reward, outcome.done, outcome.score))
    }

    /// Current score of every seat, in seat order.
    fn scores(&self) -> Vec<i32> {
        self.game.final_scores().values().copied().collect()
    }

    /// How the game ended, once it is over.
    fn result(&self) -> Option<PyGameResult> {
        self.game.result().cloned().map(PyGameResult)
    }

    /// Seat index whose placement is awaited.
    #[getter]
    fn active_player(&self) -> usize {
        self.game.active_player().index()
    }

    #[getter]
    fn round(&self) -> u32 {
        self.game.round()
    }

    #[getter]
    fn player_count(&self) -> usize {
        self.game.player_count()
    }

    #[getter]
    fn action_space_size(&self) -> usize {
        self.game.action_space().len()
    }

    #[getter]
    fn state_size(&self) -> usize {
        STATE_SIZE
    }

    /// Serialize the game; restore it with `from_bytes`.
    fn to_bytes(&self) -> PyResult<Vec<u8>> {
        self.game.snapshot().to_bytes().map_err(to_py_err)
    }

    #[staticmethod]
    fn from_bytes(bytes: Vec<u8>) -> PyResult<Self> {
        let snapshot = crate::rules::GameSnapshot::from_bytes(&bytes).map_err(to_py_err)?;
        let game = Game::restore(snapshot).map_err(to_py_err)?;
        Ok(Self { game })
    }

    /// Independent copy of the game.
    fn copy(&self) -> Self {
        Self {
            game: self.game.clone(),
        }
    }

    fn __repr__(&self) -> String {
        let status = if self.game.is_over() { "over" } else { "ongoing" };
        format!(
            "StoneAgeEnv(round={}, active=P{}, status={})",
            self.game.round(),
            self.game.active_player().index(),
            status
        )
    }
}
