use ndarray::prelude::*;

/// A coordinate vector paired with the objective value evaluated at it.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    /// The coordinates.
    pub x: Array1<f64>,

    /// The objective value at `x`.
    pub f: f64,
}

impl Point {
    pub fn new(x: Array1<f64>, f: f64) -> Self {
        Point { x, f }
    }

    /// Evaluates `func` at `x` and pairs the result with it.
    pub fn evaluate<F>(x: Array1<f64>, mut func: F) -> Self
    where
        F: FnMut(ArrayView1<f64>) -> f64,
    {
        let f = func(x.view());
        Point { x, f }
    }

    pub fn x(&self) -> ArrayView1<f64> {
        self.x.view()
    }

    pub fn f(&self) -> f64 {
        self.f
    }

    pub fn dim(&self) -> usize {
        self.x.len()
    }
}

impl From<Point> for (Array1<f64>, f64) {
    fn from(p: Point) -> Self {
        (p.x, p.f)
    }
}
