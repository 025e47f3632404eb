//! This module provides the base framework for the minimizers in this crate, such as the
//! base trait and return type.
use crate::error::Error;
use crate::vector::Point;
use ndarray::prelude::*;

/// Minimizer states at the end of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// The best-to-worst value gap fell below the tolerance.
    Converged,
    /// The iteration cap was reached first. The best point at cutoff is returned.
    Exhausted,
    /// An observer asked the run to stop.
    Stopped,
}

/// A minimization result, storing details of the run and the best point found.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimResult {
    /// The best point found and its objective value.
    pub point: Point,
    /// Which terminal state was reached.
    pub status: RunStatus,
    /// The number of completed iterations.
    pub iterations: usize,
    /// The number of function evaluations performed.
    pub f_evals: usize,
}

impl OptimResult {
    /// Whether the run ended by meeting the tolerance, rather than by the iteration cap or an
    /// observer.
    pub fn converged(&self) -> bool {
        self.status == RunStatus::Converged
    }
}

/// A general minimizer trait.
pub trait Minimizer {
    /// Minimizes the value returned by `func`, starting the search at `x0`.
    fn minimize<F: Fn(ArrayView1<f64>) -> f64>(
        &self,
        func: F,
        x0: ArrayView1<f64>,
    ) -> Result<OptimResult, Error>;
}
