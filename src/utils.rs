use ndarray::prelude::*;

/// An objective function together with the number of times it has been called.
pub struct WrappedFunction<F: Fn(ArrayView1<f64>) -> f64> {
    pub num: usize,
    pub func: F,
}

impl<F: Fn(ArrayView1<f64>) -> f64> WrappedFunction<F> {
    pub fn new(func: F) -> Self {
        WrappedFunction { num: 0, func }
    }

    pub fn call(&mut self, arg: ArrayView1<f64>) -> f64 {
        self.num += 1;
        (self.func)(arg)
    }
}

/// Euclidean distance between two points of equal dimension.
pub fn distance(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(ai, bi)| (ai - bi) * (ai - bi))
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {

    use super::*;
    use float_cmp::ApproxEq;

    #[test]
    fn counts_calls() {
        let mut func = WrappedFunction::new(|x: ArrayView1<f64>| x.sum());
        let x = arr1(&[1.0, 2.0]);
        assert_eq!(func.call(x.view()), 3.0);
        assert_eq!(func.call(x.view()), 3.0);
        assert_eq!(func.num, 2);
    }

    #[test]
    fn euclidean_distance() {
        let a = arr1(&[0.0, 0.0]);
        let b = arr1(&[3.0, 4.0]);
        assert!(distance(a.view(), b.view()).approx_eq(5.0, (1e-12, 2)));
        assert_eq!(distance(a.view(), a.view()), 0.0);
    }
}
