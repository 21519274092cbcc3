#![allow(non_snake_case)]
use crate::algebra::*;
use derive_builder::Builder;
use std::iter::zip;
use thiserror::Error;

/// Error codes returnable from [`LdlFactorisation`] factor operations

#[derive(Error, Debug)]
pub enum LdlError {
    #[error("Matrix dimension fields are incompatible")]
    IncompatibleDimension,
    #[error("Matrix has a zero column")]
    EmptyColumn,
    #[error("Matrix is not upper triangular")]
    NotUpperTriangular,
    #[error("Matrix factorization produced a zero pivot")]
    ZeroPivot,
    #[error("Invalid permutation vector")]
    InvalidPermutation,
}

/// Required settings for [`LdlFactorisation`]

#[derive(Builder, Debug, Clone)]
pub struct LdlSettings<T: FloatT> {
    /// scaling applied to the AMD dense-row threshold.  Values above
    /// one work better for interior-point KKT systems.
    #[builder(default = "1.5")]
    pub amd_dense_scale: f64,
    /// user supplied fill-reducing ordering.  AMD is used if none is given.
    #[builder(default = "None", setter(strip_option))]
    pub perm: Option<Vec<usize>>,
    /// expected signs of the diagonal D, used by dynamic regularization
    #[builder(default = "None", setter(strip_option))]
    pub Dsigns: Option<Vec<i8>>,
    /// enable dynamic regularization of near-zero pivots
    #[builder(default = "true")]
    pub regularize_enable: bool,
    /// pivot threshold below which regularization is applied
    #[builder(default = "(1e-13).as_T()")]
    pub regularize_eps: T,
    /// replacement magnitude for regularized pivots
    #[builder(default = "(2e-7).as_T()")]
    pub regularize_delta: T,
}

impl<T> Default for LdlSettings<T>
where
    T: FloatT,
{
    fn default() -> LdlSettings<T> {
        LdlSettingsBuilder::<T>::default().build().unwrap()
    }
}

/// Performs LDLᵀ factorization of a symmetric quasidefinite matrix

#[derive(Debug)]
pub struct LdlFactorisation<T = f64> {
    /// permutation vector
    pub perm: Vec<usize>,
    /// lower triangular factor
    pub L: CscMatrix<T>,
    /// diagonal D and its inverse for A = LDLᵀ
    pub D: Vec<T>,
    pub Dinv: Vec<T>,
    // symbolic analysis and numeric scratch
    workspace: LdlWorkspace<T>,
}

impl<T> LdlFactorisation<T>
where
    T: FloatT,
{
    pub fn new(Ain: &CscMatrix<T>, opts: Option<LdlSettings<T>>) -> Result<Self, LdlError> {
        // the factorization target must be square, upper triangular, and
        // structurally nonzero in every column (quasidefinite inputs have
        // at least the diagonal everywhere)
        if !Ain.is_square() {
            return Err(LdlError::IncompatibleDimension);
        }
        if !Ain.is_triu() {
            return Err(LdlError::NotUpperTriangular);
        }
        if Ain.colptr.windows(2).any(|c| c[0] == c[1]) {
            return Err(LdlError::EmptyColumn);
        }

        let n = Ain.nrows();
        let opts = opts.unwrap_or_default();

        // ordering: user supplied, or AMD.  An explicit (0..n) permutation
        // gives the natural order.
        let (perm, iperm) = match opts.perm {
            Some(p) => {
                let ip = invert_permutation(&p)?;
                (p, ip)
            }
            None => amd_ordering(Ain, opts.amd_dense_scale),
        };

        // store PAPᵀ (still upper triangular) and remember where each
        // entry of the input landed, for later value updates
        let (permA, AtoPAPt) = permute_triu(Ain, &iperm);

        // expected pivot signs travel with the permutation
        let mut Dsigns = vec![1_i8; n];
        if let Some(ds) = opts.Dsigns {
            for (s, &p) in zip(Dsigns.iter_mut(), perm.iter()) {
                *s = ds[p];
            }
        }

        let mut workspace = LdlWorkspace::new(
            permA,
            AtoPAPt,
            Dsigns,
            opts.regularize_enable,
            opts.regularize_eps,
            opts.regularize_delta,
        );

        // L gets exactly the nonzeros the elimination tree predicts
        let nnzL = workspace.col_nnz.iter().sum();
        let mut L = CscMatrix::spalloc((n, n), nnzL);
        let mut D = vec![T::zero(); n];
        let mut Dinv = vec![T::zero(); n];

        ldl_numeric(&mut L, &mut D, &mut Dinv, &mut workspace)?;

        Ok(LdlFactorisation {
            perm,
            L,
            D,
            Dinv,
            workspace,
        })
    }

    pub fn positive_inertia(&self) -> usize {
        self.workspace.positive_inertia
    }
    pub fn regularize_count(&self) -> usize {
        self.workspace.regularize_count
    }

    /// Solves Ax = b using the current LDL factors, in place (x replaces b).
    pub fn solve(&mut self, b: &mut [T]) {
        assert_eq!(b.len(), self.D.len());

        // carry b into the permuted ordering
        let v = &mut self.workspace.fwork;
        for (vi, &p) in zip(v.iter_mut(), self.perm.iter()) {
            *vi = b[p];
        }

        lsolve_inplace(&self.L, v);
        zip(v.iter_mut(), self.Dinv.iter()).for_each(|(vi, di)| *vi *= *di);
        ltsolve_inplace(&self.L, v);

        // and back out again
        for (&p, &vi) in zip(self.perm.iter(), v.iter()) {
            b[p] = vi;
        }
    }

    /// overwrite values of the internal (permuted) matrix at the given
    /// entries of the input matrix
    pub fn update_values(&mut self, indices: &[usize], values: &[T]) {
        let target = &mut self.workspace.permA.nzval;
        let map = &self.workspace.AtoPAPt;

        for (&idx, &v) in zip(indices, values) {
            target[map[idx]] = v;
        }
    }

    /// overwrite every value of the internal matrix from the nonzero
    /// values of the (structurally identical) input matrix
    pub fn update_all_values(&mut self, values: &[T]) {
        let target = &mut self.workspace.permA.nzval;
        let map = &self.workspace.AtoPAPt;
        assert_eq!(values.len(), map.len());

        for (&dest, &v) in zip(map, values) {
            target[dest] = v;
        }
    }

    /// shift values of the internal matrix at the given entries by
    /// `offset` with the given signs
    pub fn offset_values(&mut self, indices: &[usize], offset: T, signs: &[i8]) {
        assert_eq!(indices.len(), signs.len());

        let target = &mut self.workspace.permA.nzval;
        let map = &self.workspace.AtoPAPt;

        for (&idx, &sign) in zip(indices, signs) {
            target[map[idx]] += offset * T::from_i8(sign).unwrap();
        }
    }

    /// numeric refactorization reusing the symbolic analysis
    pub fn refactor(&mut self) -> Result<(), LdlError> {
        ldl_numeric(&mut self.L, &mut self.D, &mut self.Dinv, &mut self.workspace)
    }

    /// toggle dynamic regularization for subsequent refactorizations
    pub fn set_regularization(&mut self, enable: bool) {
        self.workspace.regularize_enable = enable;
    }
}

const NO_PARENT: usize = usize::MAX;

#[derive(Debug)]
struct LdlWorkspace<T> {
    // elimination tree and the predicted nonzero count of each L column
    parent: Vec<usize>,
    col_nnz: Vec<usize>,

    // integer / boolean / float scratch for the numeric factorization
    iwork: Vec<usize>,
    marked: Vec<bool>,
    fwork: Vec<T>,

    // number of positive values in D
    positive_inertia: usize,

    // the permuted factorization target PAPᵀ, upper triangular
    permA: CscMatrix<T>,

    // entry k of the caller's matrix lives at permA.nzval[AtoPAPt[k]]
    AtoPAPt: Vec<usize>,

    // regularization signs and parameters
    Dsigns: Vec<i8>,
    regularize_enable: bool,
    regularize_eps: T,
    regularize_delta: T,

    // number of regularized entries in D
    regularize_count: usize,
}

impl<T> LdlWorkspace<T>
where
    T: FloatT,
{
    fn new(
        permA: CscMatrix<T>,
        AtoPAPt: Vec<usize>,
        Dsigns: Vec<i8>,
        regularize_enable: bool,
        regularize_eps: T,
        regularize_delta: T,
    ) -> Self {
        let n = permA.ncols();

        let mut ws = Self {
            parent: vec![NO_PARENT; n],
            col_nnz: vec![0; n],
            iwork: vec![0; 3 * n],
            marked: vec![false; n],
            fwork: vec![T::zero(); n],
            positive_inertia: 0,
            permA,
            AtoPAPt,
            Dsigns,
            regularize_enable,
            regularize_eps,
            regularize_delta,
            regularize_count: 0,
        };
        ws.symbolic();
        ws
    }

    // Elimination tree of PAPᵀ, together with the nonzero count of every
    // column of L.  Column j's above-diagonal entries pull each of their
    // rows (and every ancestor up to j) into the pattern of row j of L.
    fn symbolic(&mut self) {
        let A = &self.permA;
        let n = A.ncols();
        let visit = &mut self.iwork[0..n];

        for j in 0..n {
            visit[j] = j;
            for &row in &A.rowval[A.colptr[j]..A.colptr[j + 1]] {
                // walk toward the root until we meet a node already
                // visited on behalf of column j
                let mut node = row;
                while visit[node] != j {
                    if self.parent[node] == NO_PARENT {
                        self.parent[node] = j;
                    }
                    self.col_nnz[node] += 1;
                    visit[node] = j;
                    node = self.parent[node];
                }
            }
        }
    }
}

// Numeric up-looking factorization of the workspace's PAPᵀ into LDLᵀ,
// reusing the symbolic analysis.  Row k of L is obtained by solving with
// the leading (k-1)-column factor against the above-diagonal part of
// column k of A, walking the elimination tree to enumerate the nonzero
// positions first.
fn ldl_numeric<T: FloatT>(
    L: &mut CscMatrix<T>,
    D: &mut [T],
    Dinv: &mut [T],
    ws: &mut LdlWorkspace<T>,
) -> Result<(), LdlError> {
    let A = &ws.permA;
    let n = A.ncols();

    ws.regularize_count = 0;
    ws.positive_inertia = 0;

    let marked = &mut ws.marked;
    let (pattern, rest) = ws.iwork.split_at_mut(n);
    let (path, col_top) = rest.split_at_mut(n);
    let vals = &mut ws.fwork;

    // L.colptr from the symbolic counts
    L.colptr[0] = 0;
    for j in 0..n {
        L.colptr[j + 1] = L.colptr[j] + ws.col_nnz[j];
    }

    marked.fill(false);
    vals.fill(T::zero());
    D.fill(T::zero());
    // next free slot in each column of L
    col_top.copy_from_slice(&L.colptr[0..n]);

    let mut accept_pivot = |k: usize, d: &mut T, count: &mut usize| -> Result<bool, LdlError> {
        if ws.regularize_enable {
            let sign = T::from_i8(ws.Dsigns[k]).unwrap();
            if *d * sign < ws.regularize_eps {
                *d = ws.regularize_delta * sign;
                *count += 1;
            }
        }
        if *d == T::zero() {
            return Err(LdlError::ZeroPivot);
        }
        Ok(*d > T::zero())
    };

    // first pivot comes straight off the matrix
    D[0] = A.nzval[0];
    let mut npos = 0usize;
    let mut nreg = 0usize;
    if accept_pivot(0, &mut D[0], &mut nreg)? {
        npos += 1;
    }
    Dinv[0] = T::recip(D[0]);

    for k in 1..n {
        // ---- pattern of row k of L ---------------------------------
        // every above-diagonal entry of column k of A seeds an
        // elimination path; paths stop at previously marked nodes.
        // Reversing each path as it is recorded leaves `pattern`
        // in an order whose reverse is topological.
        let mut npattern = 0;

        for idx in A.colptr[k]..A.colptr[k + 1] {
            let row = A.rowval[idx];
            if row == k {
                // the diagonal seeds the pivot instead
                D[k] = A.nzval[idx];
                continue;
            }

            vals[row] = A.nzval[idx];

            if !marked[row] {
                marked[row] = true;
                path[0] = row;
                let mut len = 1;

                let mut node = ws.parent[row];
                while node != NO_PARENT && node < k && !marked[node] {
                    marked[node] = true;
                    path[len] = node;
                    len += 1;
                    node = ws.parent[node];
                }

                while len > 0 {
                    len -= 1;
                    pattern[npattern] = path[len];
                    npattern += 1;
                }
            }
        }

        // ---- numeric elimination over the pattern, in reverse ------
        for &col in pattern[0..npattern].iter().rev() {
            let vcol = vals[col];
            let first = L.colptr[col];
            let last = col_top[col];

            // vals -= vcol * L[:,col] over the column's filled entries.
            // Safety: row indices written into L below are bounded by n,
            // and first..last stays within the column's allocation.
            unsafe {
                for t in first..last {
                    let lval = *L.nzval.get_unchecked(t);
                    let lrow = *L.rowval.get_unchecked(t);
                    *vals.get_unchecked_mut(lrow) -= lval * vcol;
                }
            }

            // the solved entry becomes L[k,col]; fold it into the pivot
            let lkj = vcol * Dinv[col];
            L.nzval[last] = lkj;
            L.rowval[last] = k;
            col_top[col] += 1;
            D[k] -= vcol * lkj;

            // leave the scratch clean for the next row
            vals[col] = T::zero();
            marked[col] = false;
        }

        if accept_pivot(k, &mut D[k], &mut nreg)? {
            npos += 1;
        }
        Dinv[k] = T::recip(D[k]);
    }

    ws.positive_inertia = npos;
    ws.regularize_count = nreg;
    Ok(())
}

// Solve (L+I)x = b in place.  Unchecked indexing: L's stored row indices
// are produced by the factorization above and bounded by its dimension.
fn lsolve_inplace<T: FloatT>(L: &CscMatrix<T>, x: &mut [T]) {
    unsafe {
        for col in 0..x.len() {
            let xc = *x.get_unchecked(col);
            let first = *L.colptr.get_unchecked(col);
            let last = *L.colptr.get_unchecked(col + 1);
            for t in first..last {
                let row = *L.rowval.get_unchecked(t);
                *x.get_unchecked_mut(row) -= *L.nzval.get_unchecked(t) * xc;
            }
        }
    }
}

// Solve (L+I)ᵀx = b in place.
fn ltsolve_inplace<T: FloatT>(L: &CscMatrix<T>, x: &mut [T]) {
    unsafe {
        for col in (0..x.len()).rev() {
            let mut acc = T::zero();
            let first = *L.colptr.get_unchecked(col);
            let last = *L.colptr.get_unchecked(col + 1);
            for t in first..last {
                let row = *L.rowval.get_unchecked(t);
                acc += *L.nzval.get_unchecked(t) * (*x.get_unchecked(row));
            }
            *x.get_unchecked_mut(col) -= acc;
        }
    }
}

// inverse of a permutation vector, rejecting repeats and range errors
fn invert_permutation(p: &[usize]) -> Result<Vec<usize>, LdlError> {
    let mut inv = vec![usize::MAX; p.len()];

    for (i, &j) in p.iter().enumerate() {
        if j >= p.len() || inv[j] != usize::MAX {
            return Err(LdlError::InvalidPermutation);
        }
        inv[j] = i;
    }
    Ok(inv)
}

// Form PAPᵀ for an upper-triangular A and inverse permutation `iperm`,
// keeping the result upper triangular, along with the map sending each
// stored entry of A to its slot in the output.
fn permute_triu<T: FloatT>(A: &CscMatrix<T>, iperm: &[usize]) -> (CscMatrix<T>, Vec<usize>) {
    let n = A.ncols();
    let mut P = CscMatrix::<T>::spalloc((n, n), A.nnz());
    let mut AtoPAPt = vec![0; A.nnz()];

    // destination column of entry (r,c): the larger of the two permuted
    // indices, so the output stays in the upper triangle
    let dest_col = |r: usize, c: usize| std::cmp::max(iperm[r], iperm[c]);

    // column counts of the output
    let mut count = vec![0usize; n];
    for c in 0..n {
        for &r in &A.rowval[A.colptr[c]..A.colptr[c + 1]] {
            count[dest_col(r, c)] += 1;
        }
    }

    P.colptr[0] = 0;
    for j in 0..n {
        P.colptr[j + 1] = P.colptr[j] + count[j];
    }

    // scatter entries; `count` becomes the next free slot per column.
    // Row indices within the output columns are left unsorted, which the
    // factorization tolerates.
    count.copy_from_slice(&P.colptr[0..n]);
    for c in 0..n {
        for idx in A.colptr[c]..A.colptr[c + 1] {
            let r = A.rowval[idx];
            let col = dest_col(r, c);
            let slot = count[col];

            P.rowval[slot] = std::cmp::min(iperm[r], iperm[c]);
            P.nzval[slot] = A.nzval[idx];
            AtoPAPt[idx] = slot;
            count[col] += 1;
        }
    }

    (P, AtoPAPt)
}

// AMD fill-reducing ordering with a rescaled dense-row threshold
fn amd_ordering<T: FloatT>(A: &CscMatrix<T>, dense_scale: f64) -> (Vec<usize>, Vec<usize>) {
    let mut control = amd::Control::default();
    control.dense *= dense_scale;
    let (perm, iperm, _info) = amd::order(A.nrows(), &A.colptr, &A.rowval, &control).unwrap();
    (perm, iperm)
}
