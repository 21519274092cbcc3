use thiserror::Error;

/// Error type returned by the [`check_format`](crate::algebra::CscMatrix::check_format) utility.
#[derive(Error, Debug)]
pub enum SparseFormatError {
    /// matrix dimension fields and array lengths disagree
    #[error("Matrix dimension fields and/or array lengths are incompatible")]
    IncompatibleDimension,
    /// row indices out of order within a column
    #[error("Data is not sorted by row index within each column")]
    BadRowOrdering,
    /// a row index at or beyond the row dimension
    #[error("Row value exceeds the matrix row dimension")]
    BadRowval,
    /// decreasing or inconsistent column pointers
    #[error("Bad column pointer values")]
    BadColptr,
}

/// Error type returned by dense factorization routines.
#[derive(Error, Debug)]
pub enum DenseFactorizationError {
    /// factorization target does not match the engine's dimension
    #[error("Matrix dimension fields and/or array lengths are incompatible")]
    IncompatibleDimension,
    /// an exactly zero pivot with dynamic regularization disabled
    #[error("Factorization produced a zero pivot")]
    ZeroPivot,
}
