#![allow(non_snake_case)]

// Two small members of the Maros-Mészáros QP collection with published
// optimal objective values (the HS21 reference includes the constant
// objective offset of -100, which the solver does not carry).

use proxip::algebra::*;
use proxip::solver::*;

#[test]
fn test_hs21() {
    // minimize 0.01 x₁² + x₂²  (- 100)
    // subject to 10x₁ - x₂ ≥ 10, 2 ≤ x₁ ≤ 50, -50 ≤ x₂ ≤ 50
    //
    // published optimum: -99.96 at x = (2, 0)
    let P = CscMatrix::new(2, 2, vec![0, 1, 2], vec![0, 1], vec![0.02, 2.]);
    let c = [0.; 2];
    let A = CscMatrix::zeros((0, 2));
    let b: [f64; 0] = [];
    // -10x₁ + x₂ ≤ -10
    let G = CscMatrix::new(1, 2, vec![0, 1, 2], vec![0, 0], vec![-10., 1.]);
    let h = [-10.];
    let x_lb = [2., -50.];
    let x_ub = [50., 50.];

    let settings = DefaultSettings::default();
    let mut solver =
        DefaultSolver::new(&P, &c, &A, &b, &G, &h, &x_lb, &x_ub, settings).unwrap();
    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Solved);
    assert!(solver.solution.x.dist(&[2., 0.]) <= 1e-5);

    let refobj = -99.96 + 100.;
    assert!((solver.solution.obj_val - refobj).abs() <= 1e-6 * refobj.abs().max(1.));
}

#[test]
fn test_hs76() {
    // minimize x₁² + 0.5x₂² + x₃² + 0.5x₄² - x₁x₃ + x₃x₄ - x₁ - 3x₂ + x₃ - x₄
    // subject to x₁ + 2x₂ + x₃ + x₄ ≤ 5
    //            3x₁ + x₂ + 2x₃ - x₄ ≤ 4
    //            x₂ + 4x₃ ≥ 1.5
    //            x ≥ 0
    //
    // published optimum: -4.681818...
    //
    // P (triu) = [2 0 -1 0; . 1 0 0; . . 2 1; . . . 1]
    let P = CscMatrix::new(
        4,
        4,
        vec![0, 1, 2, 4, 6],
        vec![0, 1, 0, 2, 2, 3],
        vec![2., 1., -1., 2., 1., 1.],
    );
    let c = [-1., -3., 1., -1.];
    let A = CscMatrix::zeros((0, 4));
    let b: [f64; 0] = [];
    let G = CscMatrix::new(
        3,
        4,
        vec![0, 2, 5, 8, 10],
        vec![0, 1, 0, 1, 2, 0, 1, 2, 0, 1],
        vec![1., 3., 2., 1., -1., 1., 2., -4., 1., -1.],
    );
    let h = [5., 4., -1.5];
    let x_lb = [0.; 4];
    let x_ub = [f64::INFINITY; 4];

    let settings = DefaultSettings::default();
    let mut solver =
        DefaultSolver::new(&P, &c, &A, &b, &G, &h, &x_lb, &x_ub, settings).unwrap();
    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Solved);

    let refobj = -4.681818181818181;
    assert!((solver.solution.obj_val - refobj).abs() <= 1e-6 * refobj.abs());

    // feasibility of the reported point
    let x = &solver.solution.x;
    assert!(x[0] + 2. * x[1] + x[2] + x[3] <= 5. + 1e-7);
    assert!(3. * x[0] + x[1] + 2. * x[2] - x[3] <= 4. + 1e-7);
    assert!(x[1] + 4. * x[2] >= 1.5 - 1e-7);
    assert!(x.iter().all(|&v| v >= -1e-7));
}
