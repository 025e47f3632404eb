use float_cmp::ApproxEq;
use ndarray::prelude::*;
use neldermead::vector::{Control, IterationState, Simplex};
use neldermead::{run, Constraint, Constraints, Error, NelderMead, NelderMeadBuilder, RunStatus};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::{Cell, RefCell};

fn require_within(x: ArrayView1<f64>, constraints: &Constraints) {
    for (xi, c) in x.iter().zip(constraints) {
        assert!(*xi >= c.min, "x = {} is less than min {}", xi, c.min);
        assert!(*xi <= c.max, "x = {} is greater than max {}", xi, c.max);
    }
}

fn expect_point(exp_x: &[f64], exp_f: f64, x: ArrayView1<f64>, f: f64, decimals: i32) {
    let diff = 10f64.powi(-decimals);
    assert!((f - exp_f).abs() <= diff, "expected f = {}, got {}", exp_f, f);
    assert_eq!(x.len(), exp_x.len());
    for (i, (g, e)) in x.iter().zip(exp_x).enumerate() {
        assert!((g - e).abs() <= diff, "expected x{} = {}, got {}", i, e, g);
    }
}

fn box_0_10() -> NelderMead {
    NelderMead::with_constraints(vec![(0.0, 10.0), (0.0, 10.0)])
}

#[test]
fn difference_objective() {
    let options = box_0_10();
    let res = run(|x: ArrayView1<f64>| x[0] - x[1], arr1(&[0.0, 0.5]).view(), &options).unwrap();

    require_within(res.point.x(), &options.constraints);
    expect_point(&[0.0, 10.0], -10.0, res.point.x(), res.point.f, 4);
    assert!(res.converged());
}

#[test]
fn sum_of_squares_with_offset() {
    let options = box_0_10();
    let objective = |x: ArrayView1<f64>| (x[0] - 2.0).powi(2) + (x[1] - 3.0).powi(2) - 6.0;
    let res = run(objective, arr1(&[0.0, 0.5]).view(), &options).unwrap();

    require_within(res.point.x(), &options.constraints);
    expect_point(&[2.0, 3.0], -6.0, res.point.x(), res.point.f, 2);
}

#[test]
fn cubic_against_lower_bound() {
    let options = NelderMead::with_constraints(vec![(3.0, 5.0), (0.0, 10.0)]);
    let objective = |x: ArrayView1<f64>| x[0].powi(3) - x[1];
    let res = run(objective, arr1(&[4.0, 5.0]).view(), &options).unwrap();

    require_within(res.point.x(), &options.constraints);
    assert_eq!(res.point.x, arr1(&[3.0, 10.0]));
    assert_eq!(format!("{:.2}", res.point.f), "17.00");
}

#[test]
fn guess_on_upper_bound_moves_every_coordinate() {
    let options = NelderMead { tolerance: 1e-12, ..box_0_10() };
    let objective = |x: ArrayView1<f64>| (x[0] - 3.0).powi(2) + (x[1] - 5.0).powi(2);
    let res = run(objective, arr1(&[10.0, 5.0]).view(), &options).unwrap();

    require_within(res.point.x(), &options.constraints);
    expect_point(&[3.0, 5.0], 0.0, res.point.x(), res.point.f, 4);
    assert!(res.converged());
}

#[test]
fn bad_initial_guess() {
    let calls = Cell::new(0usize);
    let objective = |x: ArrayView1<f64>| {
        calls.set(calls.get() + 1);
        x[0] - x[1]
    };
    let options = NelderMead::with_constraints(vec![(-1.0, 1.0), (-1.0, 1.0)]);
    let err = run(objective, arr1(&[10.0, 10.0]).view(), &options).unwrap_err();

    assert!(matches!(err, Error::OutOfBoundsInitialGuess { index: 0, .. }));
    assert_eq!(calls.get(), 0);
}

#[test]
fn simplex_collapse() {
    let rng = RefCell::new(StdRng::seed_from_u64(101));
    let flat_region_with_noise = |x: ArrayView1<f64>| {
        let mut rng = rng.borrow_mut();
        x.iter()
            .map(|xi| (xi - 5.0).powi(4) + rng.gen::<f64>() * 1e-10)
            .sum::<f64>()
    };
    let options = NelderMeadBuilder::default()
        .tolerance(1e-16)
        .max_iterations(1000usize)
        .collapse_threshold(1e-5)
        .build()
        .unwrap();

    let err = run(flat_region_with_noise, arr1(&[5.0, 5.0]).view(), &options).unwrap_err();
    assert!(err.to_string().contains("simplex has collapsed"));
    match err {
        Error::SimplexCollapse { best, mean_edge_length, .. } => {
            assert!(mean_edge_length < 1e-5);
            assert_eq!(best.dim(), 2);
            assert!(best.f < 1e-8);
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn converges_immediately_when_already_flat() {
    let x0 = arr1(&[1.0, 2.0]);
    let objective = |_: ArrayView1<f64>| 7.0;
    let options = NelderMead::default();
    let res = run(objective, x0.view(), &options).unwrap();

    assert_eq!(res.status, RunStatus::Converged);
    assert_eq!(res.iterations, 0);
    assert_eq!(res.f_evals, 3);
    assert!((res.point.f - objective(x0.view())).abs() < options.tolerance);
}

#[test]
fn rejects_before_any_evaluation() {
    let calls = Cell::new(0usize);
    let objective = |x: ArrayView1<f64>| {
        calls.set(calls.get() + 1);
        x.sum()
    };
    let x0 = arr1(&[0.5, 0.5]);
    let bounded = |cs: Vec<(f64, f64)>| NelderMead::with_constraints(cs);

    let invalid = vec![
        NelderMead { alpha: 0.0, ..Default::default() },
        NelderMead { beta: 1.0, ..Default::default() },
        NelderMead { gamma: 1.0, ..Default::default() },
        NelderMead { delta: 0.0, ..Default::default() },
        NelderMead { tolerance: 0.0, ..Default::default() },
        NelderMead { max_iterations: 0, ..Default::default() },
        bounded(vec![(1.0, 1.0), (0.0, 1.0)]),
        bounded(vec![(0.0, f64::INFINITY), (0.0, 1.0)]),
        bounded(vec![(0.0, 1.0)]),
        bounded(vec![(0.0, 1.0), (0.6, 1.0)]),
    ];
    for options in &invalid {
        assert!(run(&objective, x0.view(), options).is_err(), "{:?} accepted", options);
    }
    assert_eq!(calls.get(), 0);
}

#[test]
fn best_value_never_increases() {
    let options = NelderMead { tolerance: 1e-12, ..box_0_10() };
    let objective = |x: ArrayView1<f64>| (x[0] - 2.0).powi(2) + 10.0 * (x[1] - 3.0).powi(2);
    let mut previous = f64::INFINITY;
    let observer = |state: &IterationState, simplex: &Simplex| {
        assert!(state.best_value <= previous);
        previous = state.best_value;
        require_within(simplex.best().x(), &options.constraints);
        Control::Continue
    };
    let res = options
        .minimize_observed(objective, arr1(&[9.0, 0.0]).view(), observer)
        .unwrap();
    assert_eq!(res.status, RunStatus::Converged);
}

#[test]
fn random_boxes_stay_feasible() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let mut bounds = Vec::new();
        let mut x0 = Vec::new();
        for _ in 0..2 {
            let min = rng.gen_range(-5.0..5.0);
            let max = min + rng.gen_range(0.01..5.0);
            bounds.push(Constraint::new(min, max));
            x0.push(match rng.gen_range(0..4) {
                0 => min,
                1 => max,
                _ => rng.gen_range(min..=max),
            });
        }
        let (m1, m2): (f64, f64) = (rng.gen_range(-3.0..3.0), rng.gen_range(-3.0..3.0));
        let objective = move |x: ArrayView1<f64>| (x[0] + m1).powi(2) + (x[1] + m2).powi(4);
        let options = NelderMead::with_constraints(bounds);
        let x0 = Array1::from(x0);

        let res = run(objective, x0.view(), &options).unwrap();
        require_within(res.point.x(), &options.constraints);
        assert!(res.point.f.approx_eq(objective(res.point.x()), (0.0, 0)));
        assert!(res.point.f <= objective(x0.view()));
    }
}

#[test]
fn undefined_regions_stay_feasible() {
    // NaN left of x0 = 1, +inf above x1 = 8, a bowl at (2, 2) elsewhere.
    let objective = |x: ArrayView1<f64>| {
        if x[0] < 1.0 {
            -f64::NAN
        } else if x[1] > 8.0 {
            f64::INFINITY
        } else {
            (x[0] - 2.0).powi(2) + (x[1] - 2.0).powi(2)
        }
    };
    let options = box_0_10();

    for start in [[5.0, 5.0], [0.5, 5.0], [1.0, 1.0], [10.0, 9.0]] {
        let res = run(objective, arr1(&start).view(), &options).unwrap();
        require_within(res.point.x(), &options.constraints);
        assert!(res.point.f.is_finite(), "start {:?} ended on {:?}", start, res.point);
        assert!(res.point.x[0] >= 1.0);
    }

    let mut rng = StdRng::seed_from_u64(13);
    for _ in 0..100 {
        let start = arr1(&[rng.gen_range(0.0..=10.0), rng.gen_range(0.0..=10.0)]);
        let res = run(objective, start.view(), &options).unwrap();
        require_within(res.point.x(), &options.constraints);
    }
}
