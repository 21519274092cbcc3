#![allow(non_snake_case)]

use crate::algebra::{Adjoint, FloatT, MatrixShape, ShapedMatrix, SparseFormatError, Symmetric};

/// Sparse matrix in standard Compressed Sparse Column (CSC) format
///
/// __Example usage__ : To construct the 2 x 3 matrix
/// ```text
/// A = [4.  0.  1.]
///     [2.  3.  0.]
/// ```
///
/// ```no_run
/// use proxip::algebra::CscMatrix;
///
/// let A : CscMatrix<f64> = CscMatrix::new(
///    2,                    // m
///    3,                    // n
///    vec![0, 2, 3, 4],     //colptr
///    vec![0, 1, 1, 0],     //rowval
///    vec![4., 2., 3., 1.], //nzval
///  );
///
/// // optional correctness check
/// assert!(A.check_format().is_ok());
/// ```

#[derive(Debug, Clone, PartialEq)]
pub struct CscMatrix<T = f64> {
    /// number of rows
    pub m: usize,
    /// number of columns
    pub n: usize,
    /// CSC format column pointer.
    ///
    /// This field should have length `n+1`. The last entry corresponds
    /// to the number of nonzeros and should agree with the lengths
    /// of the `rowval` and `nzval` fields.
    pub colptr: Vec<usize>,
    /// vector of row indices
    pub rowval: Vec<usize>,
    /// vector of non-zero matrix elements
    pub nzval: Vec<T>,
}

impl<T> CscMatrix<T>
where
    T: FloatT,
{
    /// `CscMatrix` constructor.
    ///
    /// # Panics
    /// Panics if the array lengths are mutually inconsistent.   The
    /// constructor does __not__ verify that row indices are in bounds or
    /// that they appear in increasing order within each column; use
    /// [`check_format`](CscMatrix::check_format) for a full check.
    pub fn new(m: usize, n: usize, colptr: Vec<usize>, rowval: Vec<usize>, nzval: Vec<T>) -> Self {
        assert_eq!(rowval.len(), nzval.len());
        assert_eq!(colptr.len(), n + 1);
        assert_eq!(colptr[n], rowval.len());
        CscMatrix {
            m,
            n,
            colptr,
            rowval,
            nzval,
        }
    }

    /// allocate space for an m x n sparse matrix with `nnz` structural nonzeros
    pub fn spalloc(size: (usize, usize), nnz: usize) -> Self {
        let (m, n) = size;
        let mut colptr = vec![0; n + 1];
        colptr[n] = nnz;

        CscMatrix::new(m, n, colptr, vec![0; nnz], vec![T::zero(); nnz])
    }

    /// Identity matrix of size `n`
    pub fn identity(n: usize) -> Self {
        CscMatrix::new(
            n,
            n,
            (0usize..=n).collect(),
            (0usize..n).collect(),
            vec![T::one(); n],
        )
    }

    /// m x n matrix with no structural nonzeros
    pub fn zeros(size: (usize, usize)) -> Self {
        Self::spalloc(size, 0)
    }

    /// number of rows
    pub fn nrows(&self) -> usize {
        self.m
    }

    /// number of columns
    pub fn ncols(&self) -> usize {
        self.n
    }

    /// dimensions as a (rows, cols) pair
    pub fn size(&self) -> (usize, usize) {
        (self.m, self.n)
    }

    /// number of nonzeros
    pub fn nnz(&self) -> usize {
        self.colptr[self.n]
    }

    /// transpose view
    pub fn t(&self) -> Adjoint<'_, Self> {
        Adjoint { src: self }
    }

    /// symmetric view of a matrix in triu form
    pub fn sym(&self) -> Symmetric<'_, Self> {
        debug_assert!(self.is_triu());
        Symmetric { src: self }
    }

    /// Check that matrix data is correctly formatted.
    pub fn check_format(&self) -> Result<(), SparseFormatError> {
        if self.rowval.len() != self.nzval.len()
            || self.colptr.len() != self.n + 1
            || self.colptr[self.n] != self.rowval.len()
        {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        // column pointers never decrease
        if self.colptr.windows(2).any(|c| c[0] > c[1]) {
            return Err(SparseFormatError::BadColptr);
        }

        // row indices strictly increase within each column
        for col in 0..self.n {
            let rows = &self.rowval[self.colptr[col]..self.colptr[col + 1]];
            if rows.windows(2).any(|r| r[0] >= r[1]) {
                return Err(SparseFormatError::BadRowOrdering);
            }
        }

        // and stay in bounds
        if self.rowval.iter().any(|&r| r >= self.m) {
            return Err(SparseFormatError::BadRowval);
        }

        Ok(())
    }

    /// Allocates a new matrix containing only entries from the upper triangular part
    pub fn to_triu(&self) -> Self {
        assert_eq!(self.m, self.n);
        let n = self.n;

        // count the on-or-above-diagonal entries of each column.  Entries
        // within a column are in increasing row order, so those entries
        // are a prefix of the column.
        let mut keep = vec![0usize; n];
        for (col, k) in keep.iter_mut().enumerate() {
            let rows = &self.rowval[self.colptr[col]..self.colptr[col + 1]];
            *k = rows.iter().take_while(|&&row| row <= col).count();
        }

        let mut out = CscMatrix::spalloc((n, n), keep.iter().sum());

        let mut dest = 0;
        for col in 0..n {
            let src = self.colptr[col];
            let take = keep[col];

            out.colptr[col] = dest;
            out.rowval[dest..dest + take].copy_from_slice(&self.rowval[src..src + take]);
            out.nzval[dest..dest + take].copy_from_slice(&self.nzval[src..src + take]);
            dest += take;
        }
        out.colptr[n] = dest;
        out
    }

    /// True if the matrix is upper triangular
    pub fn is_triu(&self) -> bool {
        // check the lower triangle for structural entries, regardless of
        // the values assigned to them
        for col in 0..self.n {
            let rows = &self.rowval[self.colptr[col]..self.colptr[col + 1]];
            if rows.iter().any(|&row| row > col) {
                return false;
            }
        }
        true
    }

    /// Returns the value at the given (row,col) index as an Option.
    /// Returns None if the given index is not a structural nonzero.
    ///
    /// # Panics
    /// Panics if the given index is out of bounds.
    pub fn get_entry(&self, idx: (usize, usize)) -> Option<T> {
        let (row, col) = idx;
        assert!(row < self.m && col < self.n);

        let first = self.colptr[col];
        let rows = &self.rowval[first..self.colptr[col + 1]];
        rows.binary_search(&row).ok().map(|k| self.nzval[first + k])
    }
}

impl<T> ShapedMatrix for CscMatrix<T> {
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

#[test]
fn test_csc_get_entry() {
    // A =
    //[5.0   ⋅    ⋅   8.0]
    //[ ⋅   6.0   ⋅    ⋅ ]
    //[1.0   ⋅   7.0   ⋅ ]
    //[ ⋅   2.0   ⋅   9.0]

    let A = CscMatrix::new(
        4,                                    // m
        4,                                    // n
        vec![0, 2, 4, 5, 7],                  // colptr
        vec![0, 2, 1, 3, 2, 0, 3],            // rowval
        vec![5., 1., 6., 2., 7., 8., 9.],     // nzval
    );

    assert_eq!(A.get_entry((0, 0)).unwrap(), 5.);
    assert_eq!(A.get_entry((2, 0)).unwrap(), 1.);
    assert_eq!(A.get_entry((3, 1)).unwrap(), 2.);
    assert_eq!(A.get_entry((0, 3)).unwrap(), 8.);
    assert_eq!(A.get_entry((3, 3)).unwrap(), 9.);

    assert!(A.get_entry((1, 0)).is_none());
    assert!(A.get_entry((0, 2)).is_none());
    assert!(A.get_entry((2, 3)).is_none());
}
