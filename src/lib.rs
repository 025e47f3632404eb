//! Derivative-free minimization of a function of several continuous variables with the
//! Nelder-Mead simplex algorithm, optionally restricted to an axis-aligned box.
//!
//! The search converges to a local stationary point of the simplex geometry; there is no
//! guarantee of finding a global minimum.
//!
//! # Examples
//!
//! ```
//! # use ndarray::prelude::*;
//! use neldermead::{run, Constraint, NelderMead};
//!
//! let objective = |x: ArrayView1<f64>| x[0].powi(3);
//! let options = NelderMead::with_constraints(vec![Constraint::new(3.0, 5.0)]);
//!
//! let result = run(objective, arr1(&[4.0]).view(), &options).unwrap();
//! assert_eq!(format!("x = {:.2}, f(x) = {:.2}", result.point.x[0], result.point.f),
//!            "x = 3.00, f(x) = 27.00");
//! ```
//!
//! Logging goes through `tracing`; install a subscriber to see per-iteration traces.

pub mod error;
pub mod minimizer;
mod utils;
pub mod vector;

pub use error::{Error, ValidationError};
pub use minimizer::{Minimizer, OptimResult, RunStatus};
pub use vector::{Constraint, Constraints, NelderMead, NelderMeadBuilder, Point};

use ndarray::ArrayView1;

/// Minimizes `objective` starting from `x0` with the given options.
///
/// Options and the initial guess are validated before the objective is called. A run that
/// reaches the iteration cap is not an error; check [`OptimResult::status`] to tell it apart
/// from convergence.
pub fn run<F>(objective: F, x0: ArrayView1<f64>, options: &NelderMead) -> Result<OptimResult, Error>
where
    F: Fn(ArrayView1<f64>) -> f64,
{
    options.minimize(objective, x0)
}
