use crate::algebra::*;
use std::iter::zip;

impl<T: FloatT> MatrixVectorMultiply<T> for CscMatrix<T> {
    fn gemv(&self, y: &mut [T], x: &[T], a: T, b: T) {
        assert_eq!(x.len(), self.n);
        assert_eq!(self.nzval.len(), *self.colptr.last().unwrap());

        _scale_accumulator(y, b);
        if a == T::zero() {
            return;
        }

        // y += a*A*x, one source column at a time
        for (col, &xc) in x.iter().enumerate() {
            let axc = a * xc;
            let rng = self.colptr[col]..self.colptr[col + 1];
            for (&row, &v) in zip(&self.rowval[rng.clone()], &self.nzval[rng]) {
                y[row] += v * axc;
            }
        }
    }
}

impl<T: FloatT> MatrixVectorMultiply<T> for Adjoint<'_, CscMatrix<T>> {
    fn gemv(&self, y: &mut [T], x: &[T], a: T, b: T) {
        let A = self.src;
        assert_eq!(x.len(), A.m);
        assert_eq!(A.nzval.len(), *A.colptr.last().unwrap());

        _scale_accumulator(y, b);
        if a == T::zero() {
            return;
        }

        // y += a*Aᵀx: each column of A reduces against x
        for (col, yc) in y.iter_mut().enumerate().take(A.n) {
            let rng = A.colptr[col]..A.colptr[col + 1];
            let mut acc = T::zero();
            for (&row, &v) in zip(&A.rowval[rng.clone()], &A.nzval[rng]) {
                acc += v * x[row];
            }
            *yc += a * acc;
        }
    }
}

impl<T: FloatT> SymMatrixVectorMultiply<T> for Symmetric<'_, CscMatrix<T>> {
    fn symv(&self, y: &mut [T], x: &[T], a: T, b: T) {
        _csc_symv_triu(self.src, y, x, a, b);
    }
}

impl<T: FloatT> MatrixMath<T> for CscMatrix<T> {
    fn col_norms(&self, norms: &mut [T]) {
        norms.fill(T::zero());
        self.col_norms_no_reset(norms);
    }

    fn col_norms_no_reset(&self, norms: &mut [T]) {
        assert_eq!(norms.len(), self.n);

        for (col, norm) in norms.iter_mut().enumerate() {
            for v in &self.nzval[self.colptr[col]..self.colptr[col + 1]] {
                *norm = T::max(*norm, v.abs());
            }
        }
    }

    fn col_norms_sym(&self, norms: &mut [T]) {
        norms.fill(T::zero());
        self.col_norms_sym_no_reset(norms);
    }

    fn col_norms_sym_no_reset(&self, norms: &mut [T]) {
        assert_eq!(norms.len(), self.n);

        // triu storage: every entry contributes to its column's norm and,
        // by symmetry, to the norm of the column matching its row
        for col in 0..self.n {
            let rng = self.colptr[col]..self.colptr[col + 1];
            for (&row, &v) in zip(&self.rowval[rng.clone()], &self.nzval[rng]) {
                let v = v.abs();
                norms[col] = T::max(norms[col], v);
                norms[row] = T::max(norms[row], v);
            }
        }
    }

    fn row_norms(&self, norms: &mut [T]) {
        norms.fill(T::zero());
        self.row_norms_no_reset(norms);
    }

    fn row_norms_no_reset(&self, norms: &mut [T]) {
        assert_eq!(self.rowval.len(), *self.colptr.last().unwrap());

        for (&row, &v) in zip(&self.rowval, &self.nzval) {
            norms[row] = T::max(norms[row], v.abs());
        }
    }

    fn quad_form(&self, y: &[T], x: &[T]) -> T {
        let M = self;
        assert!(M.is_square());
        assert_eq!(x.len(), M.n);
        assert_eq!(y.len(), M.n);

        // triu storage: split every column into its strict upper part,
        // which contributes symmetrically, and the diagonal
        let mut total = T::zero();

        for col in 0..M.n {
            let mut up_x = T::zero();
            let mut up_y = T::zero();

            let rng = M.colptr[col]..M.colptr[col + 1];
            for (&row, &v) in zip(&M.rowval[rng.clone()], &M.nzval[rng]) {
                match row.cmp(&col) {
                    std::cmp::Ordering::Less => {
                        up_x += v * x[row];
                        up_y += v * y[row];
                    }
                    std::cmp::Ordering::Equal => {
                        total += v * x[col] * y[col];
                    }
                    std::cmp::Ordering::Greater => {
                        panic!("Input matrix should be triu form.");
                    }
                }
            }
            total += up_x * y[col] + up_y * x[col];
        }
        total
    }
}

impl<T: FloatT> MatrixMathMut<T> for CscMatrix<T> {
    fn scale(&mut self, c: T) {
        self.nzval.scale(c);
    }

    fn negate(&mut self) {
        self.nzval.negate();
    }

    fn lscale(&mut self, l: &[T]) {
        for (v, &row) in zip(&mut self.nzval, &self.rowval) {
            *v *= l[row];
        }
    }

    fn rscale(&mut self, r: &[T]) {
        assert_eq!(self.nzval.len(), *self.colptr.last().unwrap());

        for (col, &rc) in r.iter().enumerate() {
            self.nzval[self.colptr[col]..self.colptr[col + 1]].scale(rc);
        }
    }

    fn lrscale(&mut self, l: &[T], r: &[T]) {
        assert_eq!(self.nzval.len(), *self.colptr.last().unwrap());

        for (col, &rc) in r.iter().enumerate() {
            let rng = self.colptr[col]..self.colptr[col + 1];
            for (v, &row) in zip(&mut self.nzval[rng.clone()], &self.rowval[rng]) {
                *v *= l[row] * rc;
            }
        }
    }
}

// shared b*y prologue of the gemv kernels, specializing the common cases
fn _scale_accumulator<T: FloatT>(y: &mut [T], b: T) {
    if b == T::zero() {
        y.fill(T::zero());
    } else if b == -T::one() {
        y.negate();
    } else if b != T::one() {
        y.scale(b);
    }
}

// Symmetric multiply y = a*M*x + b*y with M stored as its upper triangle.
//
// Safety: vector lengths are asserted against the matrix dimension, so the
// unchecked indexing is sound whenever the matrix's rowval and colptr
// arrays are consistent with its dimension.  The unchecked form matters
// because the KKT operator K*x sits inside every iterative refinement
// sweep of the direct solves.
#[allow(non_snake_case)]
fn _csc_symv_triu<T: FloatT>(M: &CscMatrix<T>, y: &mut [T], x: &[T], a: T, b: T) {
    assert!(x.len() == M.n);
    assert!(y.len() == M.n);
    assert!(M.n == M.m);
    assert!(M.nzval.len() == *M.colptr.last().unwrap());

    _scale_accumulator(y, b);

    unsafe {
        for (col, &xc) in x.iter().enumerate() {
            let first = *M.colptr.get_unchecked(col);
            let last = *M.colptr.get_unchecked(col + 1);

            for t in first..last {
                let row = *M.rowval.get_unchecked(t);
                let v = *M.nzval.get_unchecked(t);
                *y.get_unchecked_mut(row) += a * v * xc;

                // strict upper entries mirror below the diagonal
                if row != col {
                    *y.get_unchecked_mut(col) += a * v * (*x.get_unchecked(row));
                }
            }
        }
    }
}
