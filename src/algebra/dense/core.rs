#![allow(non_snake_case)]

use crate::algebra::{Adjoint, FloatT, MatrixShape, ShapedMatrix, Symmetric, VectorMath};
use std::ops::{Index, IndexMut};

/// Dense matrix in column-major order
///
/// __Example usage__ : To construct the 2 x 3 matrix
/// ```text
/// A = [1.  3.  5.]
///     [2.  4.  6.]
/// ```
///
/// ```no_run
/// use proxip::algebra::Matrix;
///
/// let A = Matrix::new_from_slice((2, 3), &[1., 2., 3., 4., 5., 6.]);
/// ```

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T = f64> {
    /// number of rows
    pub m: usize,
    /// number of columns
    pub n: usize,
    /// column-major matrix data
    pub data: Vec<T>,
}

impl<T> Matrix<T>
where
    T: FloatT,
{
    pub fn zeros(size: (usize, usize)) -> Self {
        let (m, n) = size;
        Self {
            m,
            n,
            data: vec![T::zero(); m * n],
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut I = Matrix::zeros((n, n));
        for i in 0..n {
            I[(i, i)] = T::one();
        }
        I
    }

    pub fn new_from_slice(size: (usize, usize), src: &[T]) -> Self {
        let (m, n) = size;
        assert_eq!(m * n, src.len());
        Self {
            m,
            n,
            data: src.to_vec(),
        }
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn fill(&mut self, v: T) {
        self.data.set(v);
    }

    /// transpose view
    pub fn t(&self) -> Adjoint<'_, Self> {
        Adjoint { src: self }
    }

    /// symmetric view of a matrix holding data in its upper triangle
    pub fn sym(&self) -> Symmetric<'_, Self> {
        Symmetric { src: self }
    }

    pub fn col_slice(&self, col: usize) -> &[T] {
        assert!(col < self.n);
        &self.data[col * self.m..(col + 1) * self.m]
    }

    pub fn col_slice_mut(&mut self, col: usize) -> &mut [T] {
        assert!(col < self.n);
        &mut self.data[col * self.m..(col + 1) * self.m]
    }

    #[inline]
    fn linear(&self, (row, col): (usize, usize)) -> usize {
        row + self.m * col
    }
}

impl<T> Index<(usize, usize)> for Matrix<T>
where
    T: FloatT,
{
    type Output = T;
    #[inline]
    fn index(&self, idx: (usize, usize)) -> &T {
        &self.data[self.linear(idx)]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T>
where
    T: FloatT,
{
    #[inline]
    fn index_mut(&mut self, idx: (usize, usize)) -> &mut T {
        let at = self.linear(idx);
        &mut self.data[at]
    }
}

impl<T> ShapedMatrix for Matrix<T> {
    fn nrows(&self) -> usize {
        self.m
    }
    fn ncols(&self) -> usize {
        self.n
    }
    fn shape(&self) -> MatrixShape {
        MatrixShape::N
    }
}
