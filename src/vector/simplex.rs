//! The working set of a Nelder-Mead run: n+1 evaluated vertices of an n-dimensional problem,
//! and the affine geometry applied to them.

use super::constraint::Constraints;
use super::point::Point;
use crate::utils::distance;
use ndarray::prelude::*;
use ndarray::Zip;

/// Offset added to one coordinate of the initial guess per constructed vertex.
pub const INITIAL_STEP: f64 = 1.0;

/// Builds the coordinates of an initial simplex around `x0`, one vertex per row.
///
/// Row 0 is `x0`; row `i` is `x0` with coordinate `i - 1` moved by [`INITIAL_STEP`]. The step
/// is taken upwards unless that leaves the box, in which case it is taken downwards, so a guess
/// sitting on an upper bound still spans every dimension. When the bound is narrower than the
/// step in both directions, the vertex is placed on the farther bound and the initial simplex
/// is flattened along that dimension. Callers with narrow boxes should construct their own
/// simplex, scaled to the box width.
pub fn initial_vertices(x0: ArrayView1<f64>, constraints: &Constraints) -> Array2<f64> {
    let n = x0.len();
    let mut vertices = Array2::zeros((n + 1, n));
    for mut row in vertices.rows_mut() {
        row.assign(&x0);
    }
    for k in 0..n {
        vertices[[k + 1, k]] += INITIAL_STEP;
    }
    for (k, c) in constraints.iter().enumerate() {
        let xk = x0[k];
        vertices[[k + 1, k]] = if xk + INITIAL_STEP <= c.max {
            xk + INITIAL_STEP
        } else if xk - INITIAL_STEP >= c.min {
            tracing::debug!(dimension = k, "initial step leaves the box upwards, stepping down");
            xk - INITIAL_STEP
        } else {
            tracing::warn!(
                dimension = k,
                width = c.width(),
                "bound is narrower than the initial step, initial simplex is flattened"
            );
            if c.max - xk >= xk - c.min {
                c.max
            } else {
                c.min
            }
        };
    }
    for row in vertices.rows_mut() {
        constraints.clamp(row);
    }
    vertices
}

/// Result coordinates `c + k * (c - p)` written into `out`.
///
/// With `p` the worst vertex, a positive `k` reflects it through the centroid `c`.
#[inline]
pub fn transform(p: ArrayView1<f64>, c: ArrayView1<f64>, k: f64, out: ArrayViewMut1<f64>) {
    Zip::from(out)
        .and(&c)
        .and(&p)
        .for_each(|o, &cj, &pj| *o = cj + k * (cj - pj));
}

#[derive(Debug, Clone)]
pub struct Simplex {
    points: Vec<Point>,
}

impl Simplex {
    /// Evaluates `func` at every row of `vertices` and orders the result.
    pub fn evaluate<F>(vertices: Array2<f64>, mut func: F) -> Self
    where
        F: FnMut(ArrayView1<f64>) -> f64,
    {
        let points = vertices
            .outer_iter()
            .map(|xi| Point::evaluate(xi.to_owned(), &mut func))
            .collect();
        let mut simplex = Simplex { points };
        simplex.order();
        simplex
    }

    /// The problem dimension n. The simplex holds n+1 vertices.
    pub fn dim(&self) -> usize {
        self.points.len() - 1
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn best(&self) -> &Point {
        &self.points[0]
    }

    pub fn worst(&self) -> &Point {
        &self.points[self.points.len() - 1]
    }

    /// For a one-dimensional problem this is also the best vertex.
    pub fn second_worst(&self) -> &Point {
        &self.points[self.points.len() - 2]
    }

    /// Best-to-worst value gap.
    pub fn spread(&self) -> f64 {
        (self.best().f - self.worst().f).abs()
    }

    /// Overwrites the worst vertex with a copy of `point`, reusing its buffer.
    pub fn replace_worst(&mut self, point: &Point) {
        let last = self.points.len() - 1;
        self.points[last].x.assign(&point.x);
        self.points[last].f = point.f;
    }

    /// Sorts the vertices ascending by value. The sort is stable, so vertices with equal
    /// values keep their previous relative order. NaN values of either sign rank after every
    /// number, so a vertex whose value is undefined never becomes the best.
    pub fn order(&mut self) {
        self.points.sort_by(|a, b| {
            a.f.partial_cmp(&b.f)
                .unwrap_or_else(|| a.f.is_nan().cmp(&b.f.is_nan()))
        });
    }

    /// Re-evaluates every vertex from position `from` onwards.
    pub fn reevaluate<F>(&mut self, from: usize, mut func: F)
    where
        F: FnMut(ArrayView1<f64>) -> f64,
    {
        for p in self.points[from..].iter_mut() {
            p.f = func(p.x.view());
        }
    }

    /// Writes the mean of all vertices but the one at `exclude` into `centroid`.
    pub fn centroid(&self, exclude: usize, centroid: &mut Array1<f64>) {
        centroid.fill(0.0);
        for (i, p) in self.points.iter().enumerate() {
            if i != exclude {
                *centroid += &p.x;
            }
        }
        *centroid /= self.dim() as f64;
    }

    /// Moves every vertex except the best towards the best by factor `delta` and clamps the
    /// moved vertices into `constraints`. Their values must be re-evaluated before the next
    /// comparison.
    pub fn shrink(&mut self, delta: f64, constraints: &Constraints) {
        let (best, rest) = self.points.split_at_mut(1);
        let x0 = &best[0].x;
        for p in rest.iter_mut() {
            Zip::from(&mut p.x)
                .and(x0)
                .for_each(|xi, &bi| *xi = bi + delta * (*xi - bi));
            constraints.clamp(p.x.view_mut());
        }
    }

    /// Mean Euclidean distance over all vertex pairs.
    pub fn mean_edge_length(&self) -> f64 {
        let n = self.points.len();
        let mut total = 0.0;
        let mut count = 0usize;
        for i in 0..n {
            for j in i + 1..n {
                total += distance(self.points[i].x.view(), self.points[j].x.view());
                count += 1;
            }
        }
        total / count as f64
    }

    /// Returns the mean edge length if it fell below `threshold`. A threshold of 0 disables
    /// the check.
    pub fn collapsed(&self, threshold: f64) -> Option<f64> {
        if threshold == 0.0 {
            return None;
        }
        let mean = self.mean_edge_length();
        if mean < threshold {
            Some(mean)
        } else {
            None
        }
    }

    pub(crate) fn into_best(mut self) -> Point {
        self.points.swap_remove(0)
    }
}
