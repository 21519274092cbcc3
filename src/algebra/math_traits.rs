// Internal math operations for the solver are routed through these
// traits, implemented generically over FloatT scalars.  Keeping the
// surface here means the concrete vector and matrix types stay thin.

/// Scalar operations on [`FloatT`](crate::algebra::FloatT)
pub trait ScalarMath {
    /// Restrict a value to the interval `[min_thresh, max_thresh]`.
    fn clip(&self, min_thresh: Self, max_thresh: Self) -> Self;
}

/// Vector operations on slices of [`FloatT`](crate::algebra::FloatT)
pub trait VectorMath<T> {
    /// Copy values from `src` to `self`
    fn copy_from(&mut self, src: &Self) -> &mut Self;

    /// Apply an elementwise operation to every entry in place.
    fn scalarop(&mut self, op: impl Fn(T) -> T) -> &mut Self;

    /// Apply an elementwise operation to `v`, writing the results into
    /// `self`.
    fn scalarop_from(&mut self, op: impl Fn(T) -> T, v: &Self) -> &mut Self;

    /// Add the scalar `c` to every entry.
    fn translate(&mut self, c: T) -> &mut Self;

    /// Set every entry to the scalar `c`.
    fn set(&mut self, c: T) -> &mut Self;

    /// Multiply every entry by the scalar `c`.
    fn scale(&mut self, c: T) -> &mut Self;

    /// Elementwise reciprocal.
    fn recip(&mut self) -> &mut Self;

    /// Elementwise reciprocal square root.
    fn rsqrt(&mut self) -> &mut Self;

    /// Negate every entry.
    fn negate(&mut self) -> &mut Self;

    /// Elementwise product: `self[i] *= y[i]`.
    fn hadamard(&mut self, y: &Self) -> &mut Self;

    /// Elementwise version of [clip](crate::algebra::ScalarMath::clip).
    fn clip(&mut self, min_thresh: T, max_thresh: T) -> &mut Self;

    /// Dot product
    fn dot(&self, y: &Self) -> T;

    /// computes dot(z + αdz, s + αds) without intermediate allocation
    fn dot_shifted(z: &[T], s: &[T], dz: &[T], ds: &[T], α: T) -> T;

    /// Euclidean distance between `self` and `y`.
    fn dist(&self, y: &Self) -> T;

    /// Sum of the entries.
    fn sum(&self) -> T;

    /// Sum of squares of the entries.
    fn sumsq(&self) -> T;

    /// 2-norm
    fn norm(&self) -> T;

    /// Infinity norm
    fn norm_inf(&self) -> T;

    /// One norm
    fn norm_one(&self) -> T;

    /// Infinity norm of the elementwise product of `self` with `v`.
    fn norm_inf_scaled(&self, v: &Self) -> T;

    /// Infinity norm of the difference of `self` with `b`.
    fn norm_inf_diff(&self, b: &Self) -> T;

    /// Smallest entry (`+∞` when empty).
    fn minimum(&self) -> T;

    /// Largest entry (`-∞` when empty).
    fn maximum(&self) -> T;

    /// Mean of the entries (zero when empty).
    fn mean(&self) -> T;

    /// true if no entry is infinite or NaN
    fn is_finite(&self) -> bool;

    //blas-like vector ops
    //--------------------

    /// BLAS-like in-place scale and shift: `self = a*x + b*self`.
    fn axpby(&mut self, a: T, x: &Self, b: T) -> &mut Self;

    /// BLAS-like out-of-place combination: `self = a*x + b*y`.
    fn waxpby(&mut self, a: T, x: &Self, b: T, y: &Self) -> &mut Self;
}

/// Matrix-vector multiply for matrices of [`FloatT`](crate::algebra::FloatT)
pub trait MatrixVectorMultiply<T> {
    /// BLAS-like general matrix-vector multiply: `y = a*self*x + b*y`.
    fn gemv(&self, y: &mut [T], x: &[T], a: T, b: T);
}

/// Symmetric matrix-vector multiply for matrices of
/// [`FloatT`](crate::algebra::FloatT) held as their upper triangle
pub trait SymMatrixVectorMultiply<T> {
    /// BLAS-like symmetric matrix-vector multiply: `y = a*self*x + b*y`,
    /// with the source data in triu form.
    fn symv(&self, y: &mut [T], x: &[T], a: T, b: T);
}

/// Operations on matrices of [`FloatT`](crate::algebra::FloatT)
pub trait MatrixMath<T> {
    /// Write the infinity norm of every column into `norms`.
    fn col_norms(&self, norms: &mut [T]);

    /// Like [`col_norms`](MatrixMath::col_norms), but existing entries of
    /// `norms` are kept when they are already larger.  Used to accumulate
    /// norms over a sequence of block-partitioned matrices.
    fn col_norms_no_reset(&self, norms: &mut [T]);

    /// Column norms of a symmetric matrix held as its upper triangle.
    fn col_norms_sym(&self, norms: &mut [T]);

    /// Accumulating version of
    /// [`col_norms_sym`](MatrixMath::col_norms_sym).
    fn col_norms_sym_no_reset(&self, norms: &mut [T]);

    /// Write the infinity norm of every row into `norms`.
    fn row_norms(&self, norms: &mut [T]);

    /// Accumulating version of [`row_norms`](MatrixMath::row_norms).
    fn row_norms_no_reset(&self, norms: &mut [T]);

    /// Quadratic form `yᵀ*M*x` for a symmetric matrix `M = self` held as
    /// its upper triangle.
    fn quad_form(&self, y: &[T], x: &[T]) -> T;
}

/// Operations on mutable matrices of [`FloatT`](crate::algebra::FloatT)
pub trait MatrixMathMut<T> {
    /// Multiply every entry by the scalar `c`.
    fn scale(&mut self, c: T);

    /// Negate every entry.
    fn negate(&mut self);

    /// Left-multiply `self` by `Diagonal(l)`.
    fn lscale(&mut self, l: &[T]);

    /// Right-multiply `self` by `Diagonal(r)`.
    fn rscale(&mut self, r: &[T]);

    /// Two-sided diagonal scaling: `self = Diagonal(l)*self*Diagonal(r)`.
    fn lrscale(&mut self, l: &[T], r: &[T]);
}
