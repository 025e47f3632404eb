//! Errors reported by the minimizers of this crate.
//!
//! Configuration problems are reported as [`ValidationError`] before the objective is
//! evaluated even once. Problems discovered while iterating, such as a collapsed simplex,
//! carry whatever partial result was available at that moment.
use crate::vector::Point;

/// A rejected option or initial guess. Returned before any function evaluation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid option: alpha must be greater than 0, got {0}")]
    Alpha(f64),
    #[error("invalid option: beta must be in the open range (0, 1), got {0}")]
    Beta(f64),
    #[error("invalid option: gamma must be greater than 1, got {0}")]
    Gamma(f64),
    #[error("invalid option: delta must be in the open range (0, 1), got {0}")]
    Delta(f64),
    #[error("invalid option: tolerance must be greater than 0, got {0}")]
    Tolerance(f64),
    #[error("invalid option: collapse threshold must be a finite value of at least 0, got {0}")]
    CollapseThreshold(f64),
    #[error("invalid option: max iterations must be greater than 0")]
    MaxIterations,
    #[error("invalid constraint {index}: min and max must be finite numbers, got [{min}, {max}]")]
    NonFiniteBound { index: usize, min: f64, max: f64 },
    #[error("invalid constraint {index}: min must be less than max, got [{min}, {max}]")]
    EmptyBound { index: usize, min: f64, max: f64 },
    #[error("invalid options: {constraints} constraints given for a {dimension}-dimensional problem")]
    ConstraintCount { constraints: usize, dimension: usize },
    #[error("invalid initial guess: it must have at least one dimension")]
    EmptyGuess,
    #[error("invalid initial simplex: expected shape ({expected_rows}, {expected_cols}), got ({rows}, {cols})")]
    SimplexShape {
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A coordinate of the initial guess lies outside its bound.
    #[error("invalid initial guess: x[{index}] = {value} is outside the bound [{min}, {max}]")]
    OutOfBoundsInitialGuess {
        index: usize,
        value: f64,
        min: f64,
        max: f64,
    },

    /// The simplex degenerated before the convergence criterion was met.
    /// `best` is the best vertex at the moment the collapse was detected.
    #[error("simplex has collapsed after {iterations} iterations (mean edge length {mean_edge_length:e})")]
    SimplexCollapse {
        best: Point,
        iterations: usize,
        mean_edge_length: f64,
    },
}

impl Error {
    /// The best point found so far, if the error happened after evaluation started.
    pub fn best(&self) -> Option<&Point> {
        match self {
            Error::SimplexCollapse { best, .. } => Some(best),
            _ => None,
        }
    }
}
