//! Axis-aligned box constraints.
//!
//! A [`Constraints`] set is either empty, in which case the problem is unconstrained, or
//! holds exactly one inclusive `[min, max]` bound per dimension.

use crate::error::{Error, ValidationError};
use ndarray::prelude::*;

/// An inclusive bound on one dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraint {
    pub min: f64,
    pub max: f64,
}

impl Constraint {
    pub fn new(min: f64, max: f64) -> Self {
        Constraint { min, max }
    }

    /// Rejects NaN or infinite bounds, and bounds that do not enclose a non-empty range.
    pub fn validate(&self, index: usize) -> Result<(), ValidationError> {
        let (min, max) = (self.min, self.max);
        if !min.is_finite() || !max.is_finite() {
            return Err(ValidationError::NonFiniteBound { index, min, max });
        }
        if min >= max {
            return Err(ValidationError::EmptyBound { index, min, max });
        }
        Ok(())
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Moves `value` onto the nearest bound when it lies outside.
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }
}

impl From<(f64, f64)> for Constraint {
    fn from((min, max): (f64, f64)) -> Self {
        Constraint { min, max }
    }
}

/// Per-dimension bounds of a problem, in dimension order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Constraints(Vec<Constraint>);

impl Constraints {
    /// An empty set; the problem is unconstrained.
    pub fn none() -> Self {
        Constraints(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<Constraint> {
        self.0.iter()
    }

    /// Checks every bound.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (index, c) in self.0.iter().enumerate() {
            c.validate(index)?;
        }
        Ok(())
    }

    /// Checks that the set is empty or has one bound per dimension of a `dim`-dimensional
    /// problem.
    pub fn check_dimension(&self, dim: usize) -> Result<(), ValidationError> {
        if !self.is_empty() && self.len() != dim {
            return Err(ValidationError::ConstraintCount {
                constraints: self.len(),
                dimension: dim,
            });
        }
        Ok(())
    }

    /// Reports the first coordinate of `x` outside its bound.
    pub fn check(&self, x: ArrayView1<f64>) -> Result<(), Error> {
        for (index, (c, &value)) in self.0.iter().zip(x.iter()).enumerate() {
            if !c.contains(value) {
                return Err(Error::OutOfBoundsInitialGuess {
                    index,
                    value,
                    min: c.min,
                    max: c.max,
                });
            }
        }
        Ok(())
    }

    pub fn contains(&self, x: ArrayView1<f64>) -> bool {
        self.0.iter().zip(x.iter()).all(|(c, &v)| c.contains(v))
    }

    /// Clamps every coordinate of `x` into its bound. A no-op when unconstrained.
    /// Returns whether any coordinate moved.
    pub fn clamp(&self, mut x: ArrayViewMut1<f64>) -> bool {
        let mut moved = false;
        for (c, v) in self.0.iter().zip(x.iter_mut()) {
            let clamped = c.clamp(*v);
            if clamped != *v {
                *v = clamped;
                moved = true;
            }
        }
        moved
    }
}

impl From<Vec<Constraint>> for Constraints {
    fn from(v: Vec<Constraint>) -> Self {
        Constraints(v)
    }
}

impl From<Vec<(f64, f64)>> for Constraints {
    fn from(v: Vec<(f64, f64)>) -> Self {
        v.into_iter().collect()
    }
}

impl<C: Into<Constraint>> FromIterator<C> for Constraints {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        Constraints(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a Constraints {
    type Item = &'a Constraint;
    type IntoIter = std::slice::Iter<'a, Constraint>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
