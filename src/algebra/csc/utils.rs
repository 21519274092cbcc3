//---------------------------------------------------------
// Internal helpers for assembling block-partitioned sparse
// matrices by the count-then-fill method: colptr first holds
// per-column entry counts, then running fill positions, and
// is finally shifted back into a proper column pointer.
//---------------------------------------------------------

use crate::algebra::{CscMatrix, FloatT, MatrixShape};

impl<T> CscMatrix<T>
where
    T: FloatT,
{
    // count an identity-patterned diagonal block starting at `initcol`
    pub(crate) fn colcount_diag(&mut self, initcol: usize, blockcols: usize) {
        for c in &mut self.colptr[initcol..initcol + blockcols] {
            *c += 1;
        }
    }

    // count the entries of M placed as a block with its first column at
    // `initcol`, in the given orientation
    pub(crate) fn colcount_block(&mut self, M: &CscMatrix<T>, initcol: usize, shape: MatrixShape) {
        match shape {
            MatrixShape::T => {
                // M's rows become columns of the block
                for &row in M.rowval.iter() {
                    self.colptr[initcol + row] += 1;
                }
            }
            MatrixShape::N => {
                for col in 0..M.n {
                    self.colptr[initcol + col] += M.colptr[col + 1] - M.colptr[col];
                }
            }
        }
    }

    // place the entries of M at the block with corner (initrow, initcol),
    // consuming fill positions from self.colptr and recording where every
    // entry of M landed
    pub(crate) fn fill_block(
        &mut self,
        M: &CscMatrix<T>,
        MtoKKT: &mut [usize],
        initrow: usize,
        initcol: usize,
        shape: MatrixShape,
    ) {
        for mcol in 0..M.n {
            for idx in M.colptr[mcol]..M.colptr[mcol + 1] {
                let mrow = M.rowval[idx];

                let (row, col) = match shape {
                    MatrixShape::T => (mcol + initrow, mrow + initcol),
                    MatrixShape::N => (mrow + initrow, mcol + initcol),
                };

                let dest = self.colptr[col];
                self.rowval[dest] = row;
                self.nzval[dest] = M.nzval[idx];
                self.colptr[col] += 1;
                MtoKKT[idx] = dest;
            }
        }
    }

    // place an all-zero diagonal block at the given offset, consuming fill
    // positions and recording the entry locations
    pub(crate) fn fill_diag(&mut self, diagtoKKT: &mut [usize], offset: usize, blockdim: usize) {
        for (i, col) in (offset..offset + blockdim).enumerate() {
            let dest = self.colptr[col];
            self.rowval[dest] = col;
            self.nzval[dest] = T::zero();
            self.colptr[col] += 1;
            diagtoKKT[i] = dest;
        }
    }

    // counts -> starting fill positions (exclusive prefix sum)
    pub(crate) fn colcount_to_colptr(&mut self) {
        let mut total = 0;
        for c in &mut self.colptr {
            total += std::mem::replace(c, total);
        }
    }

    // after filling, each colptr entry is the end of its column; shift by
    // one to recover the standard CSC pointer
    pub(crate) fn backshift_colptrs(&mut self) {
        self.colptr.rotate_right(1);
        self.colptr[0] = 0;
    }
}
