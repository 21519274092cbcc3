use crate::algebra::*;

impl<T: FloatT> MatrixVectorMultiply<T> for Matrix<T> {
    fn gemv(&self, y: &mut [T], x: &[T], a: T, b: T) {
        assert_eq!(x.len(), self.n);
        assert_eq!(y.len(), self.m);

        y.scale(b);
        for (col, &xcol) in x.iter().enumerate() {
            let vals = self.col_slice(col);
            for (y, &v) in y.iter_mut().zip(vals) {
                *y += a * v * xcol;
            }
        }
    }
}

impl<T: FloatT> MatrixVectorMultiply<T> for Adjoint<'_, Matrix<T>> {
    fn gemv(&self, y: &mut [T], x: &[T], a: T, b: T) {
        let src = self.src;
        assert_eq!(x.len(), src.m);
        assert_eq!(y.len(), src.n);

        y.scale(b);
        for (col, y) in y.iter_mut().enumerate() {
            *y += a * src.col_slice(col).dot(x);
        }
    }
}

// symmetric multiply, with the source data in triu form
impl<T: FloatT> SymMatrixVectorMultiply<T> for Symmetric<'_, Matrix<T>> {
    fn symv(&self, y: &mut [T], x: &[T], a: T, b: T) {
        let M = self.src;
        assert!(M.m == M.n);
        assert_eq!(x.len(), M.n);
        assert_eq!(y.len(), M.n);

        y.scale(b);
        for col in 0..M.n {
            let xcol = x[col];
            for row in 0..=col {
                let v = M[(row, col)];
                y[row] += a * v * xcol;
                if row != col {
                    y[col] += a * v * x[row];
                }
            }
        }
    }
}
