#![allow(non_snake_case)]

use proxip::algebra::*;
use proxip::solver::traits::ProblemData;
use proxip::solver::*;

fn badly_scaled_data() -> (
    CscMatrix<f64>,
    Vec<f64>,
    CscMatrix<f64>,
    Vec<f64>,
    CscMatrix<f64>,
    Vec<f64>,
    Vec<f64>,
    Vec<f64>,
) {
    // data spanning many orders of magnitude
    let P = CscMatrix::new(2, 2, vec![0, 1, 2], vec![0, 1], vec![1e6, 1e-4]);
    let c = vec![1e3, -1e-3];
    let A = CscMatrix::new(1, 2, vec![0, 1, 2], vec![0, 0], vec![1e5, 1.]);
    let b = vec![1.];
    let G = CscMatrix::new(1, 2, vec![0, 1, 2], vec![0, 0], vec![1e-3, 1e2]);
    let h = vec![1.];
    let x_lb = vec![f64::NEG_INFINITY, -1e4];
    let x_ub = vec![1e4, f64::INFINITY];

    (P, c, A, b, G, h, x_lb, x_ub)
}

#[test]
fn test_equilibration_scaling_bounds() {
    let (P, c, A, b, G, h, x_lb, x_ub) = badly_scaled_data();
    let settings = DefaultSettings::<f64>::default();

    let mut data = DefaultProblemData::new(&P, &c, &A, &b, &G, &h, &x_lb, &x_ub);
    data.equilibrate(&settings);

    let equil = &data.equilibration;
    let lo = settings.equilibrate_min_scaling;
    let hi = settings.equilibrate_max_scaling;

    for v in equil.d.iter().chain(equil.e.iter()).chain(equil.f.iter()) {
        assert!(*v >= lo && *v <= hi);
    }
    assert!(equil.c >= lo && equil.c <= hi);

    // inverse vectors stay consistent
    for (v, vinv) in equil.d.iter().zip(equil.dinv.iter()) {
        assert!((v * vinv - 1.).abs() < 1e-14);
    }
}

#[test]
fn test_equilibration_idempotent() {
    let (P, c, A, b, G, h, x_lb, x_ub) = badly_scaled_data();
    let settings = DefaultSettings::<f64>::default();

    let mut data = DefaultProblemData::new(&P, &c, &A, &b, &G, &h, &x_lb, &x_ub);
    data.equilibrate(&settings);

    // re-equilibrating the already scaled data should leave the scalings
    // essentially untouched
    let mut data2 = DefaultProblemData::new(
        &data.P, &data.c, &data.A, &data.b, &data.G, &data.h, &data.x_lb, &data.x_ub,
    );
    data2.equilibrate(&settings);

    let kappa = 10f64.sqrt();
    let equil = &data2.equilibration;
    for v in equil.d.iter().chain(equil.e.iter()).chain(equil.f.iter()) {
        assert!(*v >= 1. / kappa && *v <= kappa);
    }
}

#[test]
fn test_equilibration_disabled() {
    let (P, c, A, b, G, h, x_lb, x_ub) = badly_scaled_data();
    let settings = DefaultSettingsBuilder::<f64>::default()
        .equilibrate_enable(false)
        .build()
        .unwrap();

    let mut data = DefaultProblemData::new(&P, &c, &A, &b, &G, &h, &x_lb, &x_ub);
    data.equilibrate(&settings);

    let equil = &data.equilibration;
    for v in equil.d.iter().chain(equil.e.iter()).chain(equil.f.iter()) {
        assert_eq!(*v, 1.);
    }
    assert_eq!(equil.c, 1.);
    assert_eq!(data.P.nzval, P.nzval);
}

#[test]
fn test_equilibration_solves_badly_scaled_problem() {
    let (P, c, A, b, G, h, x_lb, x_ub) = badly_scaled_data();
    let settings = DefaultSettings::default();

    let mut solver =
        DefaultSolver::new(&P, &c, &A, &b, &G, &h, &x_lb, &x_ub, settings).unwrap();
    solver.solve();
    assert_eq!(solver.solution.status, SolverStatus::Solved);

    // verify primal feasibility in the user's (unscaled) space
    let x = &solver.solution.x;
    assert!((1e5 * x[0] + x[1] - 1.).abs() <= 1e-6 * 1e5);
    assert!(1e-3 * x[0] + 1e2 * x[1] <= 1. + 1e-4);
}
