#![allow(non_snake_case)]

use proxip::algebra::*;
use proxip::solver::*;

#[allow(clippy::type_complexity)]
fn updating_test_data() -> (
    CscMatrix<f64>,
    Vec<f64>,
    CscMatrix<f64>,
    Vec<f64>,
    CscMatrix<f64>,
    Vec<f64>,
    Vec<f64>,
    Vec<f64>,
) {
    // P = [4 1; 1 2] (triu), box constrained
    let P = CscMatrix::new(2, 2, vec![0, 1, 3], vec![0, 0, 1], vec![4., 1., 2.]);
    let c = vec![1., 1.];
    let A = CscMatrix::new(1, 2, vec![0, 1, 2], vec![0, 0], vec![1., 1.]);
    let b = vec![1.];
    let G = CscMatrix::new(1, 2, vec![0, 1, 2], vec![0, 0], vec![1., -1.]);
    let h = vec![2.];
    let x_lb = vec![0., 0.];
    let x_ub = vec![0.9, 0.9];

    (P, c, A, b, G, h, x_lb, x_ub)
}

fn solve_fresh(
    P: &CscMatrix<f64>,
    c: &[f64],
    A: &CscMatrix<f64>,
    b: &[f64],
    G: &CscMatrix<f64>,
    h: &[f64],
    x_lb: &[f64],
    x_ub: &[f64],
) -> DefaultSolution<f64> {
    let mut solver =
        DefaultSolver::new(P, c, A, b, G, h, x_lb, x_ub, DefaultSettings::default()).unwrap();
    solver.solve();
    solver.solution
}

#[test]
fn test_update_matrix_values() {
    let (P, c, A, b, G, h, x_lb, x_ub) = updating_test_data();

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

    // update P, A and G values in place, then re-solve
    let Pv = [5., 0.5, 3.];
    let Av = [1., 2.];
    let Gv = [1., 1.];
    solver.update_P(&Pv).unwrap();
    solver.update_A(&Av).unwrap();
    solver.update_G(&Gv).unwrap();
    solver.solve();
    assert_eq!(solver.solution.status, SolverStatus::Solved);

    // must agree with a solver built directly from the updated data
    let mut P2 = P.clone();
    P2.nzval.copy_from_slice(&Pv);
    let mut A2 = A.clone();
    A2.nzval.copy_from_slice(&Av);
    let mut G2 = G.clone();
    G2.nzval.copy_from_slice(&Gv);

    let reference = solve_fresh(&P2, &c, &A2, &b, &G2, &h, &x_lb, &x_ub);
    assert_eq!(reference.status, SolverStatus::Solved);
    assert!(solver.solution.x.dist(&reference.x) <= 1e-6);
    assert!((solver.solution.obj_val - reference.obj_val).abs() <= 1e-6);
}

#[test]
fn test_update_vectors() {
    let (P, c, A, b, G, h, x_lb, x_ub) = updating_test_data();

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

    let c2 = [0.5, -0.3];
    let b2 = [1.2];
    let h2 = [3.];
    solver.update_c(&c2).unwrap();
    solver.update_b(&b2).unwrap();
    solver.update_h(&h2).unwrap();
    solver.solve();
    assert_eq!(solver.solution.status, SolverStatus::Solved);

    let reference = solve_fresh(&P, &c2, &A, &b2, &G, &h2, &x_lb, &x_ub);
    assert!(solver.solution.x.dist(&reference.x) <= 1e-6);
}

#[test]
fn test_update_bounds_values_only() {
    let (P, c, A, b, G, h, x_lb, x_ub) = updating_test_data();

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

    let lb2 = [0.1, 0.1];
    let ub2 = [0.8, 1.5];
    solver.update_x_lb(&lb2).unwrap();
    solver.update_x_ub(&ub2).unwrap();
    solver.solve();
    assert_eq!(solver.solution.status, SolverStatus::Solved);

    let reference = solve_fresh(&P, &c, &A, &b, &G, &h, &lb2, &ub2);
    assert!(solver.solution.x.dist(&reference.x) <= 1e-6);
}

#[test]
fn test_update_rejects_pattern_changes() {
    let (P, c, A, b, G, h, x_lb, x_ub) = updating_test_data();

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

    // wrong nonzero counts
    assert!(solver.update_P(&[1., 2.]).is_err());
    assert!(solver.update_A(&[1.]).is_err());
    // wrong vector lengths
    assert!(solver.update_b(&[1., 2.]).is_err());
    assert!(solver.update_c(&[1.]).is_err());
    // non-finite data
    assert!(solver.update_c(&[f64::NAN, 0.]).is_err());
    assert!(solver.update_b(&[f64::INFINITY]).is_err());
}

#[test]
fn test_update_rejects_bound_finiteness_changes() {
    let (P, c, A, b, G, h, x_lb, x_ub) = updating_test_data();

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

    // a finite bound may not become infinite in place
    assert!(solver.update_x_lb(&[f64::NEG_INFINITY, 0.]).is_err());
    assert!(solver.update_x_ub(&[0.9, f64::INFINITY]).is_err());

    // value-only changes are fine
    assert!(solver.update_x_lb(&[-0.5, -0.5]).is_ok());
}
