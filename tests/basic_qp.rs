#![allow(non_snake_case)]

use proxip::algebra::*;
use proxip::solver::*;

// the standard small dense example of this problem family:
//
//   minimize   ½ xᵀ diag(6,4) x - x₁ - 4x₂
//   subject to x₁ - 2x₂ = 1
//              x₁ - x₂ ≤ 0.2,  2x₁ ≤ -1
//              -1 ≤ x₁ ≤ 1
//
// exact optimum x = (-3/5, -4/5), objective 154/25, with multipliers
// y = -11.8 and z = (16.4, 0)
#[allow(clippy::type_complexity)]
fn basic_qp_data() -> (
    CscMatrix<f64>,
    Vec<f64>,
    CscMatrix<f64>,
    Vec<f64>,
    CscMatrix<f64>,
    Vec<f64>,
    Vec<f64>,
    Vec<f64>,
) {
    let P = CscMatrix::new(2, 2, vec![0, 1, 2], vec![0, 1], vec![6., 4.]);
    let c = vec![-1., -4.];

    let A = CscMatrix::new(1, 2, vec![0, 1, 2], vec![0, 0], vec![1., -2.]);
    let b = vec![1.];

    let G = CscMatrix::new(2, 2, vec![0, 2, 3], vec![0, 1, 0], vec![1., 2., -1.]);
    let h = vec![0.2, -1.];

    let x_lb = vec![-1., f64::NEG_INFINITY];
    let x_ub = vec![1., f64::INFINITY];

    (P, c, A, b, G, h, x_lb, x_ub)
}

fn solve_with(kind: KktSolverKind) -> DefaultSolver<f64> {
    let (P, c, A, b, G, h, x_lb, x_ub) = basic_qp_data();

    let settings = DefaultSettingsBuilder::default()
        .kkt_solver(kind)
        .build()
        .unwrap();

    let mut solver = DefaultSolver::new(&P, &c, &A, &b, &G, &h, &x_lb, &x_ub, settings).unwrap();
    solver.solve();
    solver
}

fn assert_refsol(solver: &DefaultSolver<f64>) {
    assert_eq!(solver.solution.status, SolverStatus::Solved);

    let refsol = [-0.6, -0.8];
    assert!(solver.solution.x.dist(&refsol) <= 1e-6);

    let refobj = 6.16;
    assert!(f64::abs(solver.solution.obj_val - refobj) <= 1e-6);
    assert!(f64::abs(solver.solution.obj_val_dual - refobj) <= 1e-6);

    // multipliers of the active constraints
    assert!(f64::abs(solver.solution.y[0] - (-11.8)) <= 1e-5);
    assert!(f64::abs(solver.solution.z[0] - 16.4) <= 1e-5);
    assert!(f64::abs(solver.solution.z[1]) <= 1e-6);
}

#[test]
fn test_qp_sparse_full() {
    assert_refsol(&solve_with(KktSolverKind::SparseLdlt));
}

#[test]
fn test_qp_sparse_eq_elim() {
    assert_refsol(&solve_with(KktSolverKind::SparseLdltEqElim));
}

#[test]
fn test_qp_sparse_ineq_elim() {
    assert_refsol(&solve_with(KktSolverKind::SparseLdltIneqElim));
}

#[test]
fn test_qp_sparse_all_elim() {
    assert_refsol(&solve_with(KktSolverKind::SparseLdltAllElim));
}

#[test]
fn test_qp_dense() {
    assert_refsol(&solve_with(KktSolverKind::DenseCholesky));
}

#[test]
fn test_qp_slacks_positive() {
    let solver = solve_with(KktSolverKind::SparseLdlt);
    let sol = &solver.solution;

    // strict positivity of every reported complementarity pair
    for v in sol.s.iter().chain(sol.z.iter()) {
        assert!(*v > 0.);
    }
    // bounded entries only; the x₂ bounds are infinite
    assert!(sol.s_lb[0] > 0. && sol.z_lb[0] > 0.);
    assert!(sol.s_ub[0] > 0. && sol.z_ub[0] > 0.);
    assert!(sol.z_lb[1] == 0. && sol.z_ub[1] == 0.);
    assert!(sol.s_lb[1].is_infinite() && sol.s_ub[1].is_infinite());
}

#[test]
fn test_qp_univariate() {
    // minimize ½x² subject to x ≥ 1
    let P = CscMatrix::new(1, 1, vec![0, 1], vec![0], vec![1.]);
    let c = [0.];
    let A = CscMatrix::zeros((0, 1));
    let b: [f64; 0] = [];
    let G = CscMatrix::zeros((0, 1));
    let h: [f64; 0] = [];
    let x_lb = [1.];
    let x_ub = [f64::INFINITY];

    let settings = DefaultSettings::default();
    let mut solver =
        DefaultSolver::new(&P, &c, &A, &b, &G, &h, &x_lb, &x_ub, settings).unwrap();
    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Solved);
    assert!(f64::abs(solver.solution.x[0] - 1.) <= 1e-6);
    assert!(f64::abs(solver.solution.obj_val - 0.5) <= 1e-6);
    // the bound multiplier balances the gradient
    assert!(f64::abs(solver.solution.z_lb[0] - 1.) <= 1e-6);
}
