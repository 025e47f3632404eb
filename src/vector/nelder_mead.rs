//! Nelder-Mead simplex minimization with optional box constraints.
//!
//! # Use case
//!
//! The Nelder-Mead algorithm does not require a gradient or a hessian.
//! As a tradeoff it typically requires a lot of function evaluations to
//! find a minimum, and it only converges to a local stationary point of the
//! simplex geometry. It suits low to moderate dimensional objectives that
//! are non-convex or noisy.
//!
//! # Constraints
//!
//! With a non-empty [`Constraints`] set every candidate vertex is clamped into the
//! box before it is evaluated, so the objective is never called outside the box and
//! every vertex of the simplex, the returned point included, is feasible.
//!
//! # Examples
//!
//! ```
//! # use ndarray::prelude::*;
//! # use neldermead::Minimizer;
//! # use neldermead::vector::NelderMeadBuilder;
//!
//! let function = |x: ArrayView1<f64>| (x[0] - 2.0).powi(2) + (x[1] - 3.0).powi(2) - 6.0;
//! let minimizer = NelderMeadBuilder::default()
//!     .tolerance(1e-10)
//!     .constraints(vec![(0.0, 10.0), (0.0, 10.0)])
//!     .build()
//!     .unwrap();
//! let args = Array::from_vec(vec![0.0, 0.5]);
//! let res = minimizer.minimize(&function, args.view()).unwrap();
//! assert!((res.point.f - -6.0).abs() < 1e-6);
//! ```

use super::constraint::Constraints;
use super::observer::{Control, IterationState, Observer, Step};
use super::point::Point;
use super::simplex::{initial_vertices, transform, Simplex};
use crate::error::{Error, ValidationError};
use crate::minimizer::{Minimizer, OptimResult, RunStatus};
use crate::utils::WrappedFunction;
use derive_builder::Builder;
use ndarray::prelude::*;

pub const DEFAULT_ALPHA: f64 = 1.0;
pub const DEFAULT_BETA: f64 = 0.5;
pub const DEFAULT_GAMMA: f64 = 2.0;
pub const DEFAULT_DELTA: f64 = 0.5;
pub const DEFAULT_TOLERANCE: f64 = 1e-6;
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

#[derive(Builder, Debug, Clone, PartialEq)]
/// A minimizer for a scalar function of one or more variables using the Nelder-Mead algorithm.
///
/// The defaults are a starting point and are likely not well suited to a particular problem.
pub struct NelderMead {
    /// Reflection coefficient, greater than 0. Larger values take bolder steps away from the
    /// worst vertex.
    #[builder(default = "DEFAULT_ALPHA")]
    pub alpha: f64,

    /// Contraction coefficient, in (0, 1).
    #[builder(default = "DEFAULT_BETA")]
    pub beta: f64,

    /// Expansion coefficient, greater than 1.
    #[builder(default = "DEFAULT_GAMMA")]
    pub gamma: f64,

    /// Shrink coefficient, in (0, 1).
    #[builder(default = "DEFAULT_DELTA")]
    pub delta: f64,

    /// The run has converged once the gap between the best and worst vertex values is
    /// below this.
    #[builder(default = "DEFAULT_TOLERANCE")]
    pub tolerance: f64,

    /// Minimum mean edge length of the simplex. Below it the simplex is considered collapsed
    /// and the run fails. 0 disables the check.
    #[builder(default = "0.0")]
    pub collapse_threshold: f64,

    /// The maximum number of iterations.
    #[builder(default = "DEFAULT_MAX_ITERATIONS")]
    pub max_iterations: usize,

    /// Per-dimension bounds. Empty for an unconstrained problem.
    #[builder(default = "Constraints::none()")]
    #[builder(setter(into))]
    pub constraints: Constraints,

    /// Evaluate every vertex at every iteration. Without it only vertices that moved are
    /// evaluated, which is cheaper but does not resample noisy objectives.
    #[builder(default = "true")]
    pub reevaluate: bool,
}

impl Default for NelderMead {
    fn default() -> Self {
        NelderMead {
            alpha: DEFAULT_ALPHA,
            beta: DEFAULT_BETA,
            gamma: DEFAULT_GAMMA,
            delta: DEFAULT_DELTA,
            tolerance: DEFAULT_TOLERANCE,
            collapse_threshold: 0.0,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            constraints: Constraints::none(),
            reevaluate: true,
        }
    }
}

/// Candidate buffers and centroid, allocated once per run.
struct Workspace {
    centroid: Array1<f64>,
    reflected: Point,
    expanded: Point,
    contracted: Point,
}

impl Workspace {
    fn new(n: usize) -> Self {
        Workspace {
            centroid: Array1::zeros(n),
            reflected: Point::new(Array1::zeros(n), 0.0),
            expanded: Point::new(Array1::zeros(n), 0.0),
            contracted: Point::new(Array1::zeros(n), 0.0),
        }
    }
}

impl NelderMead {
    /// Default options restricted to the box `constraints`.
    pub fn with_constraints<C: Into<Constraints>>(constraints: C) -> Self {
        NelderMead {
            constraints: constraints.into(),
            ..Default::default()
        }
    }

    /// Checks the coefficient ranges and every bound.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.alpha > 0.0) {
            return Err(ValidationError::Alpha(self.alpha));
        }
        if !(self.beta > 0.0 && self.beta < 1.0) {
            return Err(ValidationError::Beta(self.beta));
        }
        if !(self.gamma > 1.0) {
            return Err(ValidationError::Gamma(self.gamma));
        }
        if !(self.delta > 0.0 && self.delta < 1.0) {
            return Err(ValidationError::Delta(self.delta));
        }
        if !(self.tolerance > 0.0) {
            return Err(ValidationError::Tolerance(self.tolerance));
        }
        if !(self.collapse_threshold >= 0.0 && self.collapse_threshold.is_finite()) {
            return Err(ValidationError::CollapseThreshold(self.collapse_threshold));
        }
        if self.max_iterations == 0 {
            return Err(ValidationError::MaxIterations);
        }
        self.constraints.validate()
    }

    /// Checks that `x0` fits the constraints, both in dimension and in value.
    pub fn validate_guess(&self, x0: ArrayView1<f64>) -> Result<(), Error> {
        if x0.is_empty() {
            return Err(ValidationError::EmptyGuess.into());
        }
        self.constraints.check_dimension(x0.len())?;
        self.constraints.check(x0)
    }

    /// Like [`Minimizer::minimize`], calling `observer` after every completed iteration.
    pub fn minimize_observed<F, O>(
        &self,
        func: F,
        x0: ArrayView1<f64>,
        observer: O,
    ) -> Result<OptimResult, Error>
    where
        F: Fn(ArrayView1<f64>) -> f64,
        O: Observer,
    {
        self.validate()?;
        self.validate_guess(x0)?;
        let vertices = initial_vertices(x0, &self.constraints);
        self.drive(func, vertices, observer)
    }

    /// Search for the value minimizing `func` starting from `init_simplex`, one vertex per
    /// row. Use this to scale the initial simplex to the problem, for instance to a box
    /// narrower than the unit step used by [`Minimizer::minimize`].
    pub fn minimize_simplex<F>(&self, func: F, init_simplex: Array2<f64>) -> Result<OptimResult, Error>
    where
        F: Fn(ArrayView1<f64>) -> f64,
    {
        self.minimize_simplex_observed(func, init_simplex, ())
    }

    pub fn minimize_simplex_observed<F, O>(
        &self,
        func: F,
        init_simplex: Array2<f64>,
        observer: O,
    ) -> Result<OptimResult, Error>
    where
        F: Fn(ArrayView1<f64>) -> f64,
        O: Observer,
    {
        self.validate()?;
        let (rows, cols) = init_simplex.dim();
        if cols == 0 {
            return Err(ValidationError::EmptyGuess.into());
        }
        if rows != cols + 1 {
            return Err(ValidationError::SimplexShape {
                expected_rows: cols + 1,
                expected_cols: cols,
                rows,
                cols,
            }
            .into());
        }
        for vertex in init_simplex.outer_iter() {
            self.validate_guess(vertex)?;
        }
        self.drive(func, init_simplex, observer)
    }

    /// Runs the iteration loop on validated input until a terminal state is reached.
    fn drive<F, O>(&self, func: F, vertices: Array2<f64>, mut observer: O) -> Result<OptimResult, Error>
    where
        F: Fn(ArrayView1<f64>) -> f64,
        O: Observer,
    {
        let n = vertices.ncols();
        tracing::debug!(
            dimension = n,
            constrained = !self.constraints.is_empty(),
            "starting nelder-mead"
        );

        let mut func = WrappedFunction::new(func);
        let mut simplex = Simplex::evaluate(vertices, |x| func.call(x));
        let mut workspace = Workspace::new(n);
        let mut iterations = 0;

        let status = loop {
            if simplex.spread() < self.tolerance {
                break RunStatus::Converged;
            }
            if iterations >= self.max_iterations {
                break RunStatus::Exhausted;
            }

            let step = self.iterate(&mut simplex, &mut workspace, &mut func);
            if self.reevaluate {
                simplex.reevaluate(0, |x| func.call(x));
            } else if step == Step::Shrink {
                simplex.reevaluate(1, |x| func.call(x));
            }
            simplex.order();
            iterations += 1;
            debug_assert!(self.constraints.contains(simplex.best().x()));

            tracing::trace!(
                iteration = iterations,
                ?step,
                best = simplex.best().f,
                worst = simplex.worst().f,
                "nelder-mead iteration"
            );

            if let Some(mean_edge_length) = simplex.collapsed(self.collapse_threshold) {
                tracing::warn!(
                    iterations,
                    mean_edge_length,
                    threshold = self.collapse_threshold,
                    "simplex collapsed"
                );
                return Err(Error::SimplexCollapse {
                    best: simplex.into_best(),
                    iterations,
                    mean_edge_length,
                });
            }

            let state = IterationState {
                iteration: iterations,
                step,
                best_value: simplex.best().f,
                worst_value: simplex.worst().f,
                f_evals: func.num,
            };
            if observer.on_iteration(&state, &simplex) == Control::Stop {
                break RunStatus::Stopped;
            }
        };

        let f_evals = func.num;
        let point = simplex.into_best();
        tracing::debug!(
            ?status,
            iterations,
            f_evals,
            best = point.f,
            "nelder-mead finished"
        );
        Ok(OptimResult {
            point,
            status,
            iterations,
            f_evals,
        })
    }

    /// One reflect / expand / contract / shrink decision on an ordered simplex.
    fn iterate<F>(
        &self,
        simplex: &mut Simplex,
        ws: &mut Workspace,
        func: &mut WrappedFunction<F>,
    ) -> Step
    where
        F: Fn(ArrayView1<f64>) -> f64,
    {
        let worst = simplex.dim();
        simplex.centroid(worst, &mut ws.centroid);

        self.candidate(simplex.worst().x(), &ws.centroid, self.alpha, &mut ws.reflected, func);

        if ws.reflected.f < simplex.second_worst().f {
            // push the reflected point gamma times as far from the centroid
            self.candidate(ws.reflected.x(), &ws.centroid, -self.gamma, &mut ws.expanded, func);
            if ws.expanded.f < ws.reflected.f {
                simplex.replace_worst(&ws.expanded);
                Step::Expand
            } else {
                simplex.replace_worst(&ws.reflected);
                Step::Reflect
            }
        } else {
            if ws.reflected.f < simplex.worst().f {
                simplex.replace_worst(&ws.reflected);
            }
            self.candidate(simplex.worst().x(), &ws.centroid, self.beta, &mut ws.contracted, func);
            if ws.contracted.f < simplex.worst().f {
                simplex.replace_worst(&ws.contracted);
                Step::Contract
            } else {
                simplex.shrink(self.delta, &self.constraints);
                Step::Shrink
            }
        }
    }

    /// Writes `c + k * (c - base)`, clamped into the box, into `out` and evaluates it.
    #[inline]
    fn candidate<F>(
        &self,
        base: ArrayView1<f64>,
        centroid: &Array1<f64>,
        k: f64,
        out: &mut Point,
        func: &mut WrappedFunction<F>,
    ) where
        F: Fn(ArrayView1<f64>) -> f64,
    {
        transform(base, centroid.view(), k, out.x.view_mut());
        self.constraints.clamp(out.x.view_mut());
        out.f = func.call(out.x.view());
    }
}

impl Minimizer for NelderMead {
    /// Search for the value minimizing `func` given an initial guess `x0`. The initial
    /// simplex is `x0` plus one vertex per dimension, offset by a unit step.
    fn minimize<F>(&self, func: F, x0: ArrayView1<f64>) -> Result<OptimResult, Error>
    where
        F: Fn(ArrayView1<f64>) -> f64,
    {
        self.minimize_observed(func, x0, ())
    }
}
