#![allow(non_snake_case)]

use proxip::algebra::*;
use proxip::solver::*;

#[allow(clippy::type_complexity)]
fn warm_start_data() -> (
    CscMatrix<f64>,
    Vec<f64>,
    CscMatrix<f64>,
    Vec<f64>,
    CscMatrix<f64>,
    Vec<f64>,
    Vec<f64>,
    Vec<f64>,
) {
    let P = CscMatrix::new(2, 2, vec![0, 1, 3], vec![0, 0, 1], vec![4., 1., 2.]);
    let c = vec![1., 1.];
    let A = CscMatrix::new(1, 2, vec![0, 1, 2], vec![0, 0], vec![1., 1.]);
    let b = vec![1.];
    let G = CscMatrix::new(2, 2, vec![0, 2, 4], vec![0, 1, 0, 1], vec![1., -1., 1., -1.]);
    let h = vec![2., 2.];
    let x_lb = vec![-2., -2.];
    let x_ub = vec![2., 2.];
    (P, c, A, b, G, h, x_lb, x_ub)
}

#[test]
fn test_repeated_solve_is_stable() {
    let (P, c, A, b, G, h, x_lb, x_ub) = warm_start_data();

    let mut solver = DefaultSolver::new(
        &P,
        &c,
        &A,
        &b,
        &G,
        &h,
        &x_lb,
        &x_ub,
        DefaultSettings::default(),
    )
    .unwrap();

    solver.solve();
    assert_eq!(solver.solution.status, SolverStatus::Solved);
    let x1 = solver.solution.x.clone();
    let obj1 = solver.solution.obj_val;

    // the second solve warm starts from the first solution and must
    // reproduce the same answer, in far fewer iterations than a cold
    // start (the interior re-projection perturbs the converged
    // complementarity slightly, so a handful of steps is allowed)
    let cold_iters = solver.solution.iterations;
    solver.solve();
    assert_eq!(solver.solution.status, SolverStatus::Solved);
    assert!(solver.solution.x.dist(&x1) <= 1e-6);
    assert!((solver.solution.obj_val - obj1).abs() <= 1e-6);
    assert!(solver.solution.iterations <= cold_iters);
}

#[test]
fn test_warm_start_after_data_update() {
    let (P, c, A, b, G, h, x_lb, x_ub) = warm_start_data();

    let mut solver = DefaultSolver::new(
        &P,
        &c,
        &A,
        &b,
        &G,
        &h,
        &x_lb,
        &x_ub,
        DefaultSettings::default(),
    )
    .unwrap();
    solver.solve();
    assert_eq!(solver.solution.status, SolverStatus::Solved);

    // nudge the RHS; the warm started solve should track the solution
    solver.update_b(&[1.05]).unwrap();
    solver.solve();
    assert_eq!(solver.solution.status, SolverStatus::Solved);

    // cross-check against a cold solver on the updated problem
    let mut cold = DefaultSolver::new(
        &P,
        &c,
        &A,
        &[1.05],
        &G,
        &h,
        &x_lb,
        &x_ub,
        DefaultSettings::default(),
    )
    .unwrap();
    cold.solve();

    assert!(solver.solution.x.dist(&cold.solution.x) <= 1e-6);
}

#[test]
fn test_warm_start_reprojects_slacks() {
    // after an infeasible outcome the duals are large; a subsequent
    // solve on repaired data must still start from a valid interior
    // point and succeed
    let P = CscMatrix::identity(2);
    let c = vec![0.; 2];
    let A = CscMatrix::new(1, 2, vec![0, 1, 2], vec![0, 0], vec![1., 1.]);
    let b = vec![1.];
    let G = CscMatrix::zeros((0, 2));
    let h: Vec<f64> = vec![];
    let x_lb = vec![0., 0.];
    let x_ub = vec![0., 0.];

    let mut solver = DefaultSolver::new(
        &P,
        &c,
        &A,
        &b,
        &G,
        &h,
        &x_lb,
        &x_ub,
        DefaultSettings::default(),
    )
    .unwrap();
    solver.solve();
    assert_eq!(solver.solution.status, SolverStatus::PrimalInfeasible);

    // repair: fix the equality to be consistent with the box
    solver.update_b(&[0.]).unwrap();
    solver.solve();
    assert_eq!(solver.solution.status, SolverStatus::Solved);
    assert!(solver.solution.x.dist(&[0., 0.]) <= 1e-6);
}
