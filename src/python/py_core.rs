//! Value types handed to Python.

use pyo3::prelude::*;

use crate::core::Action;
use crate::rules::GameResult;

/// A decoded placement.
#[pyclass(name = "Action", frozen)]
#[derive(Clone, Debug)]
pub struct PyAction(pub Action);

#[pymethods]
impl PyAction {
    /// Place `workers` workers on board location `location`.
    #[new]
    fn new(location: usize, workers: u32) -> Self {
        Self(Action::place(location, workers))
    }

    #[getter]
    fn location(&self) -> usize {
        self.0.location
    }

    #[getter]
    fn workers(&self) -> u32 {
        self.0.workers
    }

    fn __repr__(&self) -> String {
        format!("Action(location={}, workers={})", self.0.location, self.0.workers)
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

/// How a finished game ended.
#[pyclass(name = "GameResult", frozen)]
#[derive(Clone, Debug)]
pub struct PyGameResult(pub GameResult);

#[pymethods]
impl PyGameResult {
    /// Seat index of the winner.
    #[getter]
    fn winner(&self) -> usize {
        self.0.winner.index()
    }

    /// Final score of every seat, in seat order.
    #[getter]
    fn scores(&self) -> Vec<i32> {
        self.0.scores.values().copied().collect()
    }

    #[getter]
    fn rounds(&self) -> u32 {
        self.0.rounds
    }

    fn __repr__(&self) -> String {
        format!(
            "GameResult(winner={}, scores={:?}, rounds={})",
            self.winner(),
            self.scores(),
            self.0.rounds
        )
    }
}
