#![allow(non_snake_case)]

use proxip::algebra::*;
use proxip::solver::*;

#[test]
fn test_primal_infeasible_bounds_vs_equality() {
    // x₁ + x₂ = 1 with x fixed to zero by its box
    let P = CscMatrix::zeros((2, 2));
    let c = [0.; 2];
    let A = CscMatrix::new(1, 2, vec![0, 1, 2], vec![0, 0], vec![1., 1.]);
    let b = [1.];
    let G = CscMatrix::zeros((0, 2));
    let h: [f64; 0] = [];
    let x_lb = [0., 0.];
    let x_ub = [0., 0.];

    let settings = DefaultSettings::default();
    let mut solver =
        DefaultSolver::new(&P, &c, &A, &b, &G, &h, &x_lb, &x_ub, settings).unwrap();
    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::PrimalInfeasible);
    assert!(solver.solution.obj_val.is_nan());
    assert!(solver.solution.obj_val_dual.is_nan());
}

#[test]
fn test_primal_infeasible_inequalities() {
    // x ≤ -1 and -x ≤ -1 cannot both hold
    let P = CscMatrix::zeros((1, 1));
    let c = [0.];
    let A = CscMatrix::zeros((0, 1));
    let b: [f64; 0] = [];
    let G = CscMatrix::new(2, 1, vec![0, 2], vec![0, 1], vec![1., -1.]);
    let h = [-1., -1.];
    let x_lb = [f64::NEG_INFINITY];
    let x_ub = [f64::INFINITY];

    let settings = DefaultSettings::default();
    let mut solver =
        DefaultSolver::new(&P, &c, &A, &b, &G, &h, &x_lb, &x_ub, settings).unwrap();
    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::PrimalInfeasible);
}

#[test]
fn test_dual_infeasible_unbounded_below() {
    // minimize -x with no constraints at all: unbounded below
    let P = CscMatrix::zeros((1, 1));
    let c = [-1.];
    let A = CscMatrix::zeros((0, 1));
    let b: [f64; 0] = [];
    let G = CscMatrix::zeros((0, 1));
    let h: [f64; 0] = [];
    let x_lb = [f64::NEG_INFINITY];
    let x_ub = [f64::INFINITY];

    let settings = DefaultSettings::default();
    let mut solver =
        DefaultSolver::new(&P, &c, &A, &b, &G, &h, &x_lb, &x_ub, settings).unwrap();
    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::DualInfeasible);
    assert!(solver.solution.obj_val.is_nan());
}

#[test]
fn test_dual_infeasible_partial_hessian() {
    // curvature only in x₁; the objective falls without bound along x₂
    let P = CscMatrix::new(2, 2, vec![0, 1, 1], vec![0], vec![1.]);
    let c = [0., -1.];
    let A = CscMatrix::zeros((0, 2));
    let b: [f64; 0] = [];
    let G = CscMatrix::new(1, 2, vec![0, 1, 1], vec![0], vec![1.]);
    let h = [1.];
    let x_lb = [f64::NEG_INFINITY; 2];
    let x_ub = [f64::INFINITY; 2];

    let settings = DefaultSettings::default();
    let mut solver =
        DefaultSolver::new(&P, &c, &A, &b, &G, &h, &x_lb, &x_ub, settings).unwrap();
    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::DualInfeasible);
}
