use crate::algebra::*;

#[test]
fn test_dot() {
    let x = vec![1., 2., 3., 4.];
    let y = vec![4., 5., 6., 7.];
    assert_eq!(x.dot(&y), 60.);
}

#[test]
fn test_dot_shifted() {
    let z = vec![1., 2., 3.];
    let s = vec![2., 1., 0.5];
    let dz = vec![1., -1., 0.];
    let ds = vec![0.5, 0.5, 1.];
    let α = 0.5;

    let dot1 = <[f64] as VectorMath<f64>>::dot_shifted(&z, &s, &dz, &ds, α);
    let dot2 = z.dot(&s) + α * z.dot(&ds) + α * s.dot(&dz) + α * α * dz.dot(&ds);
    assert!((dot1 - dot2).abs() < 1e-14);
}

#[test]
fn test_norms() {
    let x = vec![-3., 1., 2.];
    assert_eq!(x.norm_inf(), 3.);
    assert_eq!(x.norm_one(), 6.);
    assert_eq!(x.sumsq(), 14.);

    let v = vec![0.5, 2., 1.];
    assert_eq!(x.norm_inf_scaled(&v), 2.);
}

#[test]
fn test_norm_inf_nan() {
    let x = vec![1., f64::NAN, 2.];
    assert!(x.norm_inf().is_nan());
    assert!(!x.is_finite());
}

#[test]
fn test_minimum_maximum_mean() {
    let x = vec![1., 2., 3., 4., 5.];
    assert_eq!(x.minimum(), 1.);
    assert_eq!(x.maximum(), 5.);
    assert_eq!(x.mean(), 3.);
    assert_eq!(x[0..0].mean(), 0.);
}

#[test]
fn test_axpby() {
    let mut y = vec![1., 1.];
    let x = vec![2., 3.];
    y.axpby(2., &x, -1.);
    assert_eq!(y, vec![3., 5.]);

    let mut w = vec![0., 0.];
    w.waxpby(1., &x, 2., &[1., 1.]);
    assert_eq!(w, vec![4., 5.]);
}

#[test]
fn test_clip() {
    let mut x = vec![-2., 0.5, 7.];
    x.clip(0., 1.);
    assert_eq!(x, vec![0., 0.5, 1.]);
}
