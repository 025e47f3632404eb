//! Algorithms that search for local minima of functions along multiple dimensions.

mod constraint;
mod nelder_mead;
mod observer;
mod point;
mod simplex;

pub use self::constraint::{Constraint, Constraints};
pub use self::nelder_mead::NelderMead;
pub use self::nelder_mead::NelderMeadBuilder;
pub use self::nelder_mead::{
    DEFAULT_ALPHA, DEFAULT_BETA, DEFAULT_DELTA, DEFAULT_GAMMA, DEFAULT_MAX_ITERATIONS,
    DEFAULT_TOLERANCE,
};
pub use self::observer::{Control, Deadline, IterationState, Observer, Step};
pub use self::point::Point;
pub use self::simplex::{initial_vertices, Simplex, INITIAL_STEP};
