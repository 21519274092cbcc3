#![allow(non_snake_case)]

// Seeded random strongly convex sparse QP, solved to tight absolute
// tolerances, with the optimality conditions re-verified in the user's
// (unscaled) data space.

use proxip::algebra::*;
use proxip::solver::*;

struct Rng(u64);

impl Rng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }
    fn uniform(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
    fn signed(&mut self) -> f64 {
        2. * self.uniform() - 1.
    }
}

fn sparse_random(rng: &mut Rng, m: usize, n: usize, density: f64) -> CscMatrix<f64> {
    let mut colptr = vec![0usize; n + 1];
    let mut rowval = Vec::new();
    let mut nzval = Vec::new();
    for col in 0..n {
        for row in 0..m {
            if rng.uniform() < density {
                rowval.push(row);
                nzval.push(rng.signed());
            }
        }
        colptr[col + 1] = rowval.len();
    }
    CscMatrix::new(m, n, colptr, rowval, nzval)
}

// strongly convex sparse P in triu form: random sparse strict upper
// triangle plus a dominant diagonal
fn sparse_strongly_convex_P(rng: &mut Rng, n: usize, density: f64) -> CscMatrix<f64> {
    let mut colptr = vec![0usize; n + 1];
    let mut rowval = Vec::new();
    let mut nzval = Vec::new();
    for col in 0..n {
        for row in 0..col {
            if rng.uniform() < density {
                rowval.push(row);
                nzval.push(rng.signed());
            }
        }
        rowval.push(col);
        nzval.push(20. + rng.uniform());
        colptr[col + 1] = rowval.len();
    }
    CscMatrix::new(n, n, colptr, rowval, nzval)
}

#[test]
fn test_random_strongly_convex_qp() {
    let mut rng = Rng(1234);
    let (dim, n_eq, n_ineq) = (20usize, 8usize, 9usize);
    let sparsity = 0.2;

    let P = sparse_strongly_convex_P(&mut rng, dim, sparsity);
    let A = sparse_random(&mut rng, n_eq, dim, sparsity);
    let G = sparse_random(&mut rng, n_ineq, dim, sparsity);

    let c: Vec<f64> = (0..dim).map(|_| rng.signed()).collect();

    // a strictly feasible construction point
    let x0: Vec<f64> = (0..dim).map(|_| rng.signed()).collect();

    let mut b = vec![0.; n_eq];
    A.gemv(&mut b, &x0, 1., 0.);

    let mut h = vec![0.; n_ineq];
    G.gemv(&mut h, &x0, 1., 0.);
    for v in h.iter_mut() {
        *v += 0.1 + rng.uniform();
    }

    let x_lb: Vec<f64> = x0.iter().map(|v| v - 0.1 - rng.uniform()).collect();
    let x_ub: Vec<f64> = x0.iter().map(|v| v + 0.1 + rng.uniform()).collect();

    // zero relative tolerances: termination certifies the absolute
    // residual and gap bounds directly
    let settings = DefaultSettingsBuilder::default()
        .eps_abs(1e-8)
        .eps_rel(0.0)
        .eps_duality_gap_abs(1e-8)
        .eps_duality_gap_rel(0.0)
        .build()
        .unwrap();

    let mut solver = DefaultSolver::new(&P, &c, &A, &b, &G, &h, &x_lb, &x_ub, settings).unwrap();
    solver.solve();

    let sol = &solver.solution;
    assert_eq!(sol.status, SolverStatus::Solved);
    assert!(sol.r_prim <= 1e-8);
    assert!(sol.r_dual <= 1e-8);
    assert!((sol.obj_val - sol.obj_val_dual).abs() <= 1e-8);

    // re-verify the stationarity residual from the returned solution in
    // the unscaled space
    let mut r = c.clone();
    P.sym().symv(&mut r, &sol.x, 1., 1.);
    A.t().gemv(&mut r, &sol.y, 1., 1.);
    G.t().gemv(&mut r, &sol.z, 1., 1.);
    for j in 0..dim {
        r[j] += sol.z_ub[j] - sol.z_lb[j];
    }
    assert!(r.norm_inf() <= 1e-7);

    // primal feasibility
    let mut req = b.clone();
    A.gemv(&mut req, &sol.x, 1., -1.);
    assert!(req.norm_inf() <= 1e-7);

    let mut gin = vec![0.; n_ineq];
    G.gemv(&mut gin, &sol.x, 1., 0.);
    for i in 0..n_ineq {
        assert!(gin[i] <= h[i] + 1e-7);
        assert!(sol.z[i] >= 0.);
    }
    for j in 0..dim {
        assert!(sol.x[j] >= x_lb[j] - 1e-7);
        assert!(sol.x[j] <= x_ub[j] + 1e-7);
    }
}
