#![allow(non_snake_case)]
use crate::algebra::*;

fn test_matrix_3x3() -> CscMatrix<f64> {
    // A = [1. 0. 4.]
    //     [2. 3. 0.]
    //     [0. 5. 6.]
    CscMatrix::new(
        3,
        3,
        vec![0, 2, 4, 6],
        vec![0, 1, 1, 2, 0, 2],
        vec![1., 2., 3., 5., 4., 6.],
    )
}

#[test]
fn test_gemv() {
    let A = test_matrix_3x3();
    let x = vec![1., 2., 3.];

    let mut y = vec![0.; 3];
    A.gemv(&mut y, &x, 1., 0.);
    assert_eq!(y, vec![13., 8., 28.]);

    let mut y = vec![1., 1., 1.];
    A.t().gemv(&mut y, &x, 2., -1.);
    assert_eq!(y, vec![9., 41., 43.]);
}

#[test]
fn test_symv_and_quad_form() {
    // S (triu stored) = [2. 1. 0.]
    //                   [1. 3. 1.]
    //                   [0. 1. 4.]
    let S = CscMatrix::new(
        3,
        3,
        vec![0, 1, 3, 5],
        vec![0, 0, 1, 1, 2],
        vec![2., 1., 3., 1., 4.],
    );
    assert!(S.is_triu());

    let x = vec![1., 2., 3.];
    let mut y = vec![0.; 3];
    S.sym().symv(&mut y, &x, 1., 0.);
    assert_eq!(y, vec![4., 10., 14.]);

    // xᵀSx
    assert_eq!(S.quad_form(&x, &x), 66.);
}

#[test]
fn test_norms_and_scalings() {
    let mut A = test_matrix_3x3();

    let mut norms = vec![0.; 3];
    A.col_norms(&mut norms);
    assert_eq!(norms, vec![2., 5., 6.]);

    A.row_norms(&mut norms);
    assert_eq!(norms, vec![4., 3., 6.]);

    A.lrscale(&[1., 2., 0.5], &[2., 1., 1.]);
    // A = [ 2. 0.  4.]
    //     [ 8. 6.  0.]
    //     [ 0. 2.5 3.]
    assert_eq!(A.get_entry((1, 0)).unwrap(), 8.);
    assert_eq!(A.get_entry((2, 1)).unwrap(), 2.5);
    assert_eq!(A.get_entry((2, 2)).unwrap(), 3.);
}

#[test]
fn test_to_triu() {
    // symmetric matrix with full storage
    let S = CscMatrix::new(
        2,
        2,
        vec![0, 2, 4],
        vec![0, 1, 0, 1],
        vec![4., 1., 1., 2.],
    );
    let T = S.to_triu();
    assert!(T.is_triu());
    assert_eq!(T.nnz(), 3);
    assert_eq!(T.get_entry((0, 1)).unwrap(), 1.);
}

#[test]
fn test_dense_gemv_symv() {
    // M = [1. 3.]
    //     [2. 4.]
    let M = Matrix::new_from_slice((2, 2), &[1., 2., 3., 4.]);
    let x = vec![1., 1.];
    let mut y = vec![0.; 2];
    M.gemv(&mut y, &x, 1., 0.);
    assert_eq!(y, vec![4., 6.]);

    M.t().gemv(&mut y, &x, 1., 0.);
    assert_eq!(y, vec![3., 7.]);

    // symmetric triu read
    let S = Matrix::new_from_slice((2, 2), &[4., 0., 1., 2.]);
    S.sym().symv(&mut y, &x, 1., 0.);
    assert_eq!(y, vec![5., 3.]);
}
