#![allow(non_snake_case)]

use proxip::algebra::*;
use proxip::solver::*;

fn valid_data() -> (
    CscMatrix<f64>,
    Vec<f64>,
    CscMatrix<f64>,
    Vec<f64>,
    CscMatrix<f64>,
    Vec<f64>,
    Vec<f64>,
    Vec<f64>,
) {
    let P = CscMatrix::identity(2);
    let c = vec![1., 1.];
    let A = CscMatrix::new(1, 2, vec![0, 1, 2], vec![0, 0], vec![1., 1.]);
    let b = vec![1.];
    let G = CscMatrix::new(1, 2, vec![0, 1, 2], vec![0, 0], vec![1., -1.]);
    let h = vec![1.];
    let x_lb = vec![f64::NEG_INFINITY; 2];
    let x_ub = vec![f64::INFINITY; 2];
    (P, c, A, b, G, h, x_lb, x_ub)
}

fn try_setup(
    P: &CscMatrix<f64>,
    c: &[f64],
    A: &CscMatrix<f64>,
    b: &[f64],
    G: &CscMatrix<f64>,
    h: &[f64],
    x_lb: &[f64],
    x_ub: &[f64],
) -> Result<DefaultSolver<f64>, SolverError> {
    DefaultSolver::new(P, c, A, b, G, h, x_lb, x_ub, DefaultSettings::default())
}

#[test]
fn test_valid_data_accepted() {
    let (P, c, A, b, G, h, x_lb, x_ub) = valid_data();
    assert!(try_setup(&P, &c, &A, &b, &G, &h, &x_lb, &x_ub).is_ok());
}

#[test]
fn test_bad_dimensions_rejected() {
    let (P, c, A, b, G, h, x_lb, x_ub) = valid_data();

    // P not matching n
    let Pbad = CscMatrix::<f64>::identity(3);
    assert!(try_setup(&Pbad, &c, &A, &b, &G, &h, &x_lb, &x_ub).is_err());

    // b of the wrong length
    assert!(try_setup(&P, &c, &A, &[1., 2.], &G, &h, &x_lb, &x_ub).is_err());

    // h of the wrong length
    assert!(try_setup(&P, &c, &A, &b, &G, &[1., 2.], &x_lb, &x_ub).is_err());

    // bounds of the wrong length
    assert!(try_setup(&P, &c, &A, &b, &G, &h, &[0.], &x_ub).is_err());

    // zero variables
    let Pz = CscMatrix::<f64>::zeros((0, 0));
    let Az = CscMatrix::<f64>::zeros((0, 0));
    let Gz = CscMatrix::<f64>::zeros((0, 0));
    assert!(try_setup(&Pz, &[], &Az, &[], &Gz, &[], &[], &[]).is_err());
}

#[test]
fn test_nonfinite_data_rejected() {
    let (P, c, A, b, G, h, x_lb, x_ub) = valid_data();

    let cbad = [f64::NAN, 1.];
    assert!(try_setup(&P, &cbad, &A, &b, &G, &h, &x_lb, &x_ub).is_err());

    let bbad = [f64::INFINITY];
    assert!(try_setup(&P, &c, &A, &bbad, &G, &h, &x_lb, &x_ub).is_err());

    // h may be +∞ (vacuous row) but not -∞ or NaN
    assert!(try_setup(&P, &c, &A, &b, &G, &[f64::INFINITY], &x_lb, &x_ub).is_ok());
    assert!(try_setup(&P, &c, &A, &b, &G, &[f64::NEG_INFINITY], &x_lb, &x_ub).is_err());
    assert!(try_setup(&P, &c, &A, &b, &G, &[f64::NAN], &x_lb, &x_ub).is_err());

    // bounds admit ±∞ but not NaN
    assert!(try_setup(&P, &c, &A, &b, &G, &h, &[f64::NAN, 0.], &x_ub).is_err());
}

#[test]
fn test_crossed_bounds_rejected() {
    let (P, c, A, b, G, h, _x_lb, _x_ub) = valid_data();
    let x_lb = [1., 0.];
    let x_ub = [0., 1.];
    assert!(try_setup(&P, &c, &A, &b, &G, &h, &x_lb, &x_ub).is_err());
}

#[test]
fn test_invalid_settings_rejected() {
    let (P, c, A, b, G, h, x_lb, x_ub) = valid_data();

    let mut settings = DefaultSettings::default();
    settings.eps_abs = -1.;

    let result = DefaultSolver::new(&P, &c, &A, &b, &G, &h, &x_lb, &x_ub, settings);
    assert!(matches!(result, Err(SolverError::InvalidSettings(_))));
}
