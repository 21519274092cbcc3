#![allow(non_snake_case)]

use crate::algebra::{DenseFactorizationError, FloatT, Matrix};

/// LDLᵀ factorization engine for dense symmetric quasidefinite matrices.
///
/// The input is taken as a full symmetric matrix; only its upper triangle
/// is read.  Diagonal pivots are regularized on the fly against their
/// expected signs using the same rule as the sparse engine, so no pivoting
/// is required for the quasidefinite systems produced by the solver.
pub(crate) struct DenseLDLEngine<T> {
    // unit lower triangular factor, strictly lower part used
    pub L: Matrix<T>,
    pub D: Vec<T>,
    pub Dinv: Vec<T>,
    // count of dynamically regularized pivots in the last factorization
    regularize_count: usize,
}

impl<T> DenseLDLEngine<T>
where
    T: FloatT,
{
    pub fn new(n: usize) -> Self {
        Self {
            L: Matrix::<T>::zeros((n, n)),
            D: vec![T::zero(); n],
            Dinv: vec![T::zero(); n],
            regularize_count: 0,
        }
    }

    #[allow(dead_code)]
    pub fn regularize_count(&self) -> usize {
        self.regularize_count
    }

    /// Factor A = LDLᵀ.  Reads the upper triangle of A only.  When
    /// `regularize` is enabled, pivots whose signed value falls below
    /// `regularize_eps` are replaced by `±regularize_delta` according to
    /// the expected sign pattern in `Dsigns`.
    pub fn factor(
        &mut self,
        A: &Matrix<T>,
        Dsigns: &[i8],
        regularize: bool,
        regularize_eps: T,
        regularize_delta: T,
    ) -> Result<(), DenseFactorizationError> {
        let n = self.D.len();
        if A.m != n || A.n != n {
            return Err(DenseFactorizationError::IncompatibleDimension);
        }

        self.regularize_count = 0;

        for j in 0..n {
            // pivot: d_j = A_jj - Σ_{k<j} L_jk² d_k
            let mut djj = A[(j, j)];
            for k in 0..j {
                djj -= self.L[(j, k)] * self.L[(j, k)] * self.D[k];
            }

            if regularize {
                let sign = T::from_i8(Dsigns[j]).unwrap();
                if djj * sign < regularize_eps {
                    djj = regularize_delta * sign;
                    self.regularize_count += 1;
                }
            }

            if djj == T::zero() {
                return Err(DenseFactorizationError::ZeroPivot);
            }
            self.D[j] = djj;
            self.Dinv[j] = T::recip(djj);

            // subdiagonal column j of L
            for i in (j + 1)..n {
                // upper triangle read: A_ij with i > j lives at (j,i)
                let mut lij = A[(j, i)];
                for k in 0..j {
                    lij -= self.L[(i, k)] * self.L[(j, k)] * self.D[k];
                }
                self.L[(i, j)] = lij * self.Dinv[j];
            }
        }
        Ok(())
    }

    /// Solve Ax = b in place using the current factors.
    pub fn solve(&self, b: &mut [T]) {
        let n = self.D.len();
        assert_eq!(b.len(), n);

        // (L+I) z = b
        for j in 0..n {
            let bj = b[j];
            for i in (j + 1)..n {
                b[i] -= self.L[(i, j)] * bj;
            }
        }
        // D w = z
        for (b, &dinv) in b.iter_mut().zip(self.Dinv.iter()) {
            *b *= dinv;
        }
        // (L+I)ᵀ x = w
        for j in (0..n).rev() {
            let mut s = b[j];
            for i in (j + 1)..n {
                s -= self.L[(i, j)] * b[i];
            }
            b[j] = s;
        }
    }
}

#[test]
fn test_dense_ldl() {
    use crate::algebra::VectorMath;

    // quasidefinite matrix with signs (+,+,-)
    // full symmetric storage; factor reads the triu part
    #[rustfmt::skip]
    let A = Matrix::new_from_slice(
        (3, 3),
        &[ 4., 1., 2.,
           1., 3., 0.,
           2., 0., -5.],
    );

    let mut eng = DenseLDLEngine::<f64>::new(3);
    let signs = [1i8, 1, -1];
    assert!(eng.factor(&A, &signs, false, 0.0, 0.0).is_ok());

    let mut x = vec![1., 2., 3.];
    let b = x.clone();
    eng.solve(&mut x);

    // check A*x = b
    let mut r = vec![0.0; 3];
    for i in 0..3 {
        for j in 0..3 {
            r[i] += A[(i, j)] * x[j];
        }
    }
    assert!(r.norm_inf_diff(&b) < 1e-12);
}
