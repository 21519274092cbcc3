#![allow(non_snake_case)]

use proxip::algebra::*;
use proxip::solver::*;

#[test]
fn test_unconstrained_identity() {
    // minimize ½‖x‖² + cᵀx with no constraints: x* = -c
    let P = CscMatrix::identity(3);
    let c = [1., 2., 3.];
    let A = CscMatrix::zeros((0, 3));
    let b: [f64; 0] = [];
    let G = CscMatrix::zeros((0, 3));
    let h: [f64; 0] = [];
    let x_lb = [f64::NEG_INFINITY; 3];
    let x_ub = [f64::INFINITY; 3];

    let settings = DefaultSettings::default();
    let mut solver =
        DefaultSolver::new(&P, &c, &A, &b, &G, &h, &x_lb, &x_ub, settings).unwrap();
    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Solved);

    let refsol = [-1., -2., -3.];
    assert!(solver.solution.x.dist(&refsol) <= 1e-6);

    let refobj = -7.;
    assert!(f64::abs(solver.solution.obj_val - refobj) <= 1e-6);
    assert!(f64::abs(solver.solution.obj_val_dual - refobj) <= 1e-6);
}

#[test]
fn test_unconstrained_dense_backend() {
    let P = CscMatrix::identity(2);
    let c = [-1., 1.];
    let A = CscMatrix::zeros((0, 2));
    let b: [f64; 0] = [];
    let G = CscMatrix::zeros((0, 2));
    let h: [f64; 0] = [];
    let x_lb = [f64::NEG_INFINITY; 2];
    let x_ub = [f64::INFINITY; 2];

    let settings = DefaultSettingsBuilder::default()
        .kkt_solver(KktSolverKind::DenseCholesky)
        .build()
        .unwrap();
    let mut solver =
        DefaultSolver::new(&P, &c, &A, &b, &G, &h, &x_lb, &x_ub, settings).unwrap();
    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Solved);
    assert!(solver.solution.x.dist(&[1., -1.]) <= 1e-6);
}
