use ndarray::prelude::*;
use neldermead::{run, Minimizer, NelderMead, NelderMeadBuilder};
use std::time::Instant;

fn rosenbrock(x: ArrayView1<f64>) -> f64 {
    (1.0 - x[0]).powi(2) + 100.0 * (x[1] - x[0].powi(2)).powi(2)
}

fn main() {
    let nm = NelderMeadBuilder::default()
        .tolerance(1e-12)
        .max_iterations(5000usize)
        .build()
        .unwrap();

    match nm.minimize(rosenbrock, arr1(&[-1.2, 1.0]).view()) {
        Ok(res) => println!(
            "{:?} after {} iterations, {} evaluations: x = {}, f(x) = {:e}",
            res.status, res.iterations, res.f_evals, res.point.x, res.point.f
        ),
        Err(err) => println!("{}", err),
    }

    // Timing loop over a small boxed problem.
    let boxed = NelderMead::with_constraints(vec![(0.0, 10.0), (0.0, 10.0)]);
    let x0 = arr1(&[0.0, 0.5]);
    let runs = 10_000;
    let start = Instant::now();
    for _ in 0..runs {
        if let Err(err) = run(|x: ArrayView1<f64>| x[0] * x[1], x0.view(), &boxed) {
            println!("{}", err);
            return;
        }
    }
    println!("{} boxed runs in {:?}", runs, start.elapsed());
}
