#![allow(non_snake_case)]

/// Scatter map for a weighted Gram product `Mᵀ diag(w) M` folded into the
/// upper-left KKT block.  For every weight index k the triple range
/// `offsets[k]..offsets[k+1]` lists the contributions
/// `K[dest] += w[k] * M.nzval[src_a] * M.nzval[src_b]`, with the (a,b)
/// pairs drawn from row k of M so that only upper-triangle destinations
/// appear.
#[derive(Debug)]
pub(crate) struct GramMap {
    pub offsets: Vec<usize>,
    pub src_a: Vec<usize>,
    pub src_b: Vec<usize>,
    pub dest: Vec<usize>,
}

/// Index maps from problem data entries into the assembled KKT matrix.
///
/// All positions are recorded at assembly time; numeric refreshes scatter
/// through these maps without touching the sparsity pattern.
#[derive(Debug)]
pub(crate) struct KktMap {
    // upper-left block contributors
    pub P: Vec<usize>,
    pub diag_x: Vec<usize>,
    pub gram_A: Option<GramMap>,
    pub gram_G: Option<GramMap>,

    // retained off-diagonal blocks and their diagonals
    pub A: Vec<usize>,
    pub diag_y: Vec<usize>,
    pub G: Vec<usize>,
    pub diag_z: Vec<usize>,

    // nonzeros in the upper-left block (always the leading entries
    // of the KKT nzval array)
    pub ulhs_nnz: usize,
}
