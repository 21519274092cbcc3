#![allow(non_snake_case)]

use super::{GramMap, KktMap};
use crate::algebra::*;
use crate::solver::core::kktsolvers::direct::KktMode;

// Assemble the (structurally zero) condensed KKT matrix for the requested
// elimination mode, together with the index maps used for numeric value
// refreshes.  The upper-left block is the pattern union of P, the full
// variable diagonal, and any Gram products of eliminated blocks; retained
// Aᵀ/Gᵀ blocks and their diagonals follow in the trailing columns.
//
// The returned matrix is upper triangular with sorted, duplicate-free
// columns, which is the storage the LDLᵀ engine requires.

pub(crate) fn assemble_kkt<T: FloatT>(
    P: &CscMatrix<T>,
    A: &CscMatrix<T>,
    G: &CscMatrix<T>,
    mode: KktMode,
) -> (CscMatrix<T>, KktMap) {
    let n = P.ncols();
    let p = A.nrows();
    let m = G.nrows();

    let keep_y = matches!(mode, KktMode::Full | KktMode::IneqEliminated);
    let keep_z = matches!(mode, KktMode::Full | KktMode::EqEliminated);

    // per-row entry lists (column, nz index), ordered by column
    let rows_A = _row_lists(A);
    let rows_G = _row_lists(G);

    // triples of the eliminated Gram products.  Destinations are patched
    // to KKT indices once the merged pattern is known.
    let mut gram_A = (!keep_y).then(|| _gram_triples(&rows_A));
    let mut gram_G = (!keep_z).then(|| _gram_triples(&rows_G));

    // ---- merged upper-left pattern ------------------------------------
    let mut cols: Vec<Vec<usize>> = vec![Vec::new(); n];
    for j in 0..n {
        for idx in P.colptr[j]..P.colptr[j + 1] {
            cols[j].push(P.rowval[idx]);
        }
        // the full diagonal is always structurally present
        cols[j].push(j);
    }
    for gram in [gram_A.as_ref(), gram_G.as_ref()].into_iter().flatten() {
        for (&i, &j) in gram.0.rows.iter().zip(gram.0.cols.iter()) {
            cols[j].push(i);
        }
    }
    for rows in cols.iter_mut() {
        rows.sort_unstable();
        rows.dedup();
    }

    let mut ulhs_colptr = vec![0usize; n + 1];
    for j in 0..n {
        ulhs_colptr[j + 1] = ulhs_colptr[j] + cols[j].len();
    }
    let ulhs_nnz = ulhs_colptr[n];

    // position of entry (i,j) within the merged upper-left block
    let ulhs_pos = |i: usize, j: usize| -> usize {
        ulhs_colptr[j] + cols[j].binary_search(&i).unwrap()
    };

    // ---- KKT pattern ---------------------------------------------------
    let dim = n + if keep_y { p } else { 0 } + if keep_z { m } else { 0 };
    let zoff = n + if keep_y { p } else { 0 };

    let mut nnz = ulhs_nnz;
    if keep_y {
        nnz += A.nnz() + p;
    }
    if keep_z {
        nnz += G.nnz() + m;
    }

    let mut K = CscMatrix::<T>::spalloc((dim, dim), nnz);

    // column counts
    K.colptr.fill(0);
    for j in 0..n {
        K.colptr[j] = cols[j].len();
    }
    if keep_y {
        K.colcount_block(A, n, MatrixShape::T);
        K.colcount_diag(n, p);
    }
    if keep_z {
        K.colcount_block(G, zoff, MatrixShape::T);
        K.colcount_diag(zoff, m);
    }
    K.colcount_to_colptr();

    // fill the upper-left columns with structural zeros, recording where
    // each merged entry lands
    let mut ulhs_to_kkt = vec![0usize; ulhs_nnz];
    let mut u = 0;
    for (j, rows) in cols.iter().enumerate() {
        for &i in rows {
            let dest = K.colptr[j];
            K.rowval[dest] = i;
            K.colptr[j] += 1;
            ulhs_to_kkt[u] = dest;
            u += 1;
        }
    }

    // retained blocks and their diagonals
    let mut map_A = vec![0usize; if keep_y { A.nnz() } else { 0 }];
    let mut diag_y = vec![0usize; if keep_y { p } else { 0 }];
    if keep_y {
        K.fill_block(A, &mut map_A, 0, n, MatrixShape::T);
        K.fill_diag(&mut diag_y, n, p);
    }

    let mut map_G = vec![0usize; if keep_z { G.nnz() } else { 0 }];
    let mut diag_z = vec![0usize; if keep_z { m } else { 0 }];
    if keep_z {
        K.fill_block(G, &mut map_G, 0, zoff, MatrixShape::T);
        K.fill_diag(&mut diag_z, zoff, m);
    }

    K.backshift_colptrs();

    // ---- compose upper-left maps into KKT indices ----------------------
    let mut map_P = vec![0usize; P.nnz()];
    for j in 0..n {
        for idx in P.colptr[j]..P.colptr[j + 1] {
            map_P[idx] = ulhs_to_kkt[ulhs_pos(P.rowval[idx], j)];
        }
    }
    let mut diag_x = vec![0usize; n];
    for (j, d) in diag_x.iter_mut().enumerate() {
        *d = ulhs_to_kkt[ulhs_pos(j, j)];
    }

    let gram_A = gram_A.take().map(|g| g.into_gram_map(&ulhs_pos, &ulhs_to_kkt));
    let gram_G = gram_G.take().map(|g| g.into_gram_map(&ulhs_pos, &ulhs_to_kkt));

    let map = KktMap {
        P: map_P,
        diag_x,
        gram_A,
        gram_G,
        A: map_A,
        diag_y,
        G: map_G,
        diag_z,
        ulhs_nnz,
    };

    (K, map)
}

// entries of each row of M as (column, nz index) pairs.  Scanning the CSC
// columns in order leaves every row list sorted by column.
fn _row_lists<T: FloatT>(M: &CscMatrix<T>) -> Vec<Vec<(usize, usize)>> {
    let mut rows: Vec<Vec<(usize, usize)>> = vec![Vec::new(); M.nrows()];
    for col in 0..M.ncols() {
        for idx in M.colptr[col]..M.colptr[col + 1] {
            rows[M.rowval[idx]].push((col, idx));
        }
    }
    rows
}

// Gram triple list prior to destination patching
struct GramTriples {
    offsets: Vec<usize>,
    src_a: Vec<usize>,
    src_b: Vec<usize>,
    rows: Vec<usize>,
    cols: Vec<usize>,
}

// newtype so that Option combinators above stay readable
struct GramBuild(GramTriples);

impl GramBuild {
    fn into_gram_map(
        self,
        ulhs_pos: &impl Fn(usize, usize) -> usize,
        ulhs_to_kkt: &[usize],
    ) -> GramMap {
        let t = self.0;
        let dest = t
            .rows
            .iter()
            .zip(t.cols.iter())
            .map(|(&i, &j)| ulhs_to_kkt[ulhs_pos(i, j)])
            .collect();
        GramMap {
            offsets: t.offsets,
            src_a: t.src_a,
            src_b: t.src_b,
            dest,
        }
    }
}

// Upper-triangle contributions of Mᵀ diag(w) M: for every row k of M and
// every ordered pair of entries (a,b) in that row with col(a) <= col(b),
// the product w_k·M_a·M_b lands at position (col(a), col(b)).
fn _gram_triples(rows: &[Vec<(usize, usize)>]) -> GramBuild {
    let mut offsets = Vec::with_capacity(rows.len() + 1);
    let mut src_a = Vec::new();
    let mut src_b = Vec::new();
    let mut out_rows = Vec::new();
    let mut out_cols = Vec::new();

    offsets.push(0);
    for entries in rows {
        for (bi, &(jb, idxb)) in entries.iter().enumerate() {
            for &(ja, idxa) in entries.iter().take(bi + 1) {
                src_a.push(idxa);
                src_b.push(idxb);
                out_rows.push(ja);
                out_cols.push(jb);
            }
        }
        offsets.push(src_a.len());
    }

    GramBuild(GramTriples {
        offsets,
        src_a,
        src_b,
        rows: out_rows,
        cols: out_cols,
    })
}
