#![allow(non_snake_case)]

use proxip::algebra::*;
use proxip::solver::*;

#[test]
fn test_eq_constrained() {
    // minimize ½‖x‖² subject to Σx = 3: x* = (1,1,1), y* = -1
    let P = CscMatrix::identity(3);
    let c = [0.; 3];
    let A = CscMatrix::new(1, 3, vec![0, 1, 2, 3], vec![0, 0, 0], vec![1., 1., 1.]);
    let b = [3.];
    let G = CscMatrix::zeros((0, 3));
    let h: [f64; 0] = [];
    let x_lb = [f64::NEG_INFINITY; 3];
    let x_ub = [f64::INFINITY; 3];

    let settings = DefaultSettings::default();
    let mut solver =
        DefaultSolver::new(&P, &c, &A, &b, &G, &h, &x_lb, &x_ub, settings).unwrap();
    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Solved);
    assert!(solver.solution.x.dist(&[1., 1., 1.]) <= 1e-6);
    assert!(f64::abs(solver.solution.y[0] + 1.) <= 1e-6);
    assert!(f64::abs(solver.solution.obj_val - 1.5) <= 1e-6);
}

#[test]
fn test_eq_constrained_rank_deficient_rhs_consistent() {
    // duplicated equality rows are consistent; the proximal dual
    // regularization keeps the KKT factorization well posed
    let P = CscMatrix::identity(2);
    let c = [0.; 2];
    let A = CscMatrix::new(
        2,
        2,
        vec![0, 2, 4],
        vec![0, 1, 0, 1],
        vec![1., 1., 1., 1.],
    );
    let b = [2., 2.];
    let G = CscMatrix::zeros((0, 2));
    let h: [f64; 0] = [];
    let x_lb = [f64::NEG_INFINITY; 2];
    let x_ub = [f64::INFINITY; 2];

    let settings = DefaultSettings::default();
    let mut solver =
        DefaultSolver::new(&P, &c, &A, &b, &G, &h, &x_lb, &x_ub, settings).unwrap();
    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Solved);
    assert!(solver.solution.x.dist(&[1., 1.]) <= 1e-6);
}
