#![allow(non_snake_case)]

use super::{assemble_kkt, KktMap};
use crate::algebra::*;
use crate::ldl::{LdlError, LdlFactorisation, LdlSettingsBuilder};
use crate::solver::core::kktsolvers::direct::*;
use crate::solver::core::kktsolvers::{DataUpdates, KktData, KktSolver};
use crate::solver::{DefaultSettings, DefaultVariables};

// -------------------------------------
// KKT solver using direct sparse LDLᵀ factorization, in one of the
// four elimination modes.
// -------------------------------------

pub struct SparseKktSolver<T = f64> {
    // problem dimensions
    n: usize,
    p: usize,
    m: usize,

    // compacted box index maps
    lb_idx: Vec<usize>,
    ub_idx: Vec<usize>,

    mode: KktMode,

    // snapshot of the current regularization and iterate scalings
    scalings: KktScalings<T>,

    // KKT mapping from problem data to the condensed matrix
    map: KktMap,

    // unpermuted condensed KKT matrix, upper triangular
    KKT: CscMatrix<T>,

    // the direct LDLᵀ engine, which owns the permuted copy
    ldl: LdlFactorisation<T>,

    // RHS/solution and workspace for the condensed solve and its
    // iterative refinement
    b: Vec<T>,
    x: Vec<T>,
    work_e: Vec<T>,
    work_dx: Vec<T>,
    work_m: Vec<T>,

    // iterative refinement parameters
    refine_abstol: T,
    refine_reltol: T,
    refine_max_iter: u32,
    refine_min_improvement: T,
}

impl<T> SparseKktSolver<T>
where
    T: FloatT,
{
    pub fn new(
        data: KktData<T>,
        lb_idx: &[usize],
        ub_idx: &[usize],
        mode: KktMode,
        settings: &DefaultSettings<T>,
    ) -> Result<Self, LdlError> {
        let n = data.P.ncols();
        let p = data.A.nrows();
        let m = data.G.nrows();
        let (n_lb, n_ub) = (lb_idx.len(), ub_idx.len());

        let (mut KKT, map) = assemble_kkt(data.P, data.A, data.G, mode);
        let dim = KKT.ncols();

        // expected signs of D in LDL: positive for the variable block,
        // negative for retained dual blocks
        let mut dsigns = vec![1_i8; dim];
        dsigns[n..].fill(-1);

        // start from identity iterate scalings so that the symbolic
        // factorization sees representative numeric values
        let mut scalings = KktScalings::new(n, m, n_lb, n_ub);
        scalings.set_identity(settings.rho_init, settings.delta_init, lb_idx, ub_idx);
        _refresh_kkt_values(&mut KKT, &map, data, &scalings);

        let opts = LdlSettingsBuilder::<T>::default()
            .Dsigns(dsigns)
            .regularize_enable(true)
            .regularize_eps(settings.reg_finetune_lower_limit)
            .regularize_delta(settings.reg_finetune_delta)
            .build()
            .unwrap();

        let ldl = LdlFactorisation::new(&KKT, Some(opts))?;

        Ok(Self {
            n,
            p,
            m,
            lb_idx: lb_idx.to_vec(),
            ub_idx: ub_idx.to_vec(),
            mode,
            scalings,
            map,
            KKT,
            ldl,
            b: vec![T::zero(); dim],
            x: vec![T::zero(); dim],
            work_e: vec![T::zero(); dim],
            work_dx: vec![T::zero(); dim],
            work_m: vec![T::zero(); m],
            refine_abstol: settings.iterative_refinement_abs_tol,
            refine_reltol: settings.iterative_refinement_rel_tol,
            refine_max_iter: settings.iterative_refinement_max_iter,
            refine_min_improvement: settings.iterative_refinement_min_improvement_rate,
        })
    }

    /// the elimination mode this solver was assembled for
    pub fn mode(&self) -> KktMode {
        self.mode
    }

    /// the condensed (unpermuted) KKT matrix, for diagnostics and testing
    pub fn kkt_matrix(&self) -> &CscMatrix<T> {
        &self.KKT
    }

    // column offset of the inequality dual block, when retained
    fn zoff(&self) -> usize {
        match self.mode {
            KktMode::Full => self.n + self.p,
            KktMode::EqEliminated => self.n,
            _ => unreachable!("no inequality block in this mode"),
        }
    }

    fn keep_y(&self) -> bool {
        matches!(self.mode, KktMode::Full | KktMode::IneqEliminated)
    }

    fn keep_z(&self) -> bool {
        matches!(self.mode, KktMode::Full | KktMode::EqEliminated)
    }

    fn refresh(&mut self, data: KktData<T>) {
        _refresh_kkt_values(&mut self.KKT, &self.map, data, &self.scalings);
        self.ldl.update_all_values(&self.KKT.nzval);
    }

    fn iterative_refinement(&mut self) {
        let abstol = self.refine_abstol;
        let reltol = self.refine_reltol;
        let max_iter = self.refine_max_iter;
        let min_improvement = self.refine_min_improvement;

        let Self {
            b,
            x,
            work_e: e,
            work_dx: dx,
            KKT,
            ldl,
            ..
        } = self;

        let normb = b.norm_inf();
        let mut norme = _refine_error(e, b, KKT, x);

        for _ in 0..max_iter {
            if norme <= abstol + reltol * normb {
                //within tolerance, exit
                return;
            }

            let lastnorme = norme;

            //make a refinement
            dx.copy_from(e);
            ldl.solve(dx);

            //prospective solution is x + dx.  Use dx space to
            //hold it for a check before applying to x
            dx.axpby(T::one(), x, T::one()); //now dx is really x + dx
            norme = _refine_error(e, b, KKT, dx);

            if lastnorme / norme < min_improvement {
                //insufficient improvement, exit
                return;
            } else {
                //just swap instead of copying to x
                std::mem::swap(x, dx);
            }
        }
    }
}

impl<T> KktSolver<T> for SparseKktSolver<T>
where
    T: FloatT,
{
    fn update_scalings(
        &mut self,
        data: KktData<T>,
        rho: T,
        delta: T,
        variables: &DefaultVariables<T>,
    ) {
        self.scalings
            .update(rho, delta, variables, &self.lb_idx, &self.ub_idx);
        self.refresh(data);
    }

    fn update_data(&mut self, data: KktData<T>, _updates: DataUpdates) {
        // the upper-left block mixes P with the Gram products of any
        // eliminated blocks, so a full numeric refresh is performed
        // regardless of which matrices changed.  The pattern is untouched.
        self.refresh(data);
    }

    fn factorize(&mut self, dynamic: bool) -> bool {
        self.ldl.set_regularization(dynamic);
        self.ldl.refactor().is_ok()
    }

    fn solve(
        &mut self,
        data: KktData<T>,
        rhs: &DefaultVariables<T>,
        lhs: &mut DefaultVariables<T>,
        refine: bool,
    ) {
        let (n, p, m) = (self.n, self.p, self.m);
        let sc = &self.scalings;
        let delta_inv = T::recip(sc.delta);

        // ---- condense the eight-component RHS --------------------------
        self.b[0..n].copy_from(&rhs.x);
        fold_box_rhs(&mut self.b[0..n], sc, &self.lb_idx, &self.ub_idx, rhs);

        if self.keep_y() {
            self.b[n..n + p].copy_from(&rhs.y);
        } else {
            // fold the equality block: bx += (1/δ)Aᵀ r_y
            data.A.t().gemv(&mut self.b[0..n], &rhs.y, delta_inv, T::one());
        }

        if self.keep_z() {
            let zoff = self.zoff();
            fold_ineq_rhs(&mut self.b[zoff..zoff + m], sc, rhs);
        } else {
            // fold the inequality block: bx += Gᵀ diag(w)⁻¹ (r_z - r_s∘z⁻¹)
            fold_ineq_rhs(&mut self.work_m, sc, rhs);
            self.work_m.hadamard_recip_of(&sc.w);
            data.G.t().gemv(&mut self.b[0..n], &self.work_m, T::one(), T::one());
        }

        // ---- factored solve with optional refinement -------------------
        self.x.copy_from(&self.b);
        self.ldl.solve(&mut self.x);
        if refine {
            self.iterative_refinement();
        }

        // ---- recover the full step -------------------------------------
        let sc = &self.scalings;
        lhs.x.copy_from(&self.x[0..n]);

        if self.keep_y() {
            lhs.y.copy_from(&self.x[n..n + p]);
        } else {
            // Δy = (AΔx - r_y)/δ
            lhs.y.scalarop_from(|ry| -delta_inv * ry, &rhs.y);
            data.A.gemv(&mut lhs.y, &lhs.x, delta_inv, T::one());
        }

        if self.keep_z() {
            let zoff = self.zoff();
            lhs.z.copy_from(&self.x[zoff..zoff + m]);
        } else {
            // Δz = (GΔx - (r_z - r_s∘z⁻¹)) ∘ w⁻¹
            fold_ineq_rhs(&mut self.work_m, sc, rhs);
            self.work_m.negate();
            data.G.gemv(&mut self.work_m, &lhs.x, T::one(), T::one());
            self.work_m.hadamard_recip_of(&sc.w);
            lhs.z.copy_from(&self.work_m);
        }

        recover_ineq_slacks(sc, rhs, lhs);
        recover_box_steps(sc, &self.lb_idx, &self.ub_idx, rhs, lhs);
    }

    fn multiply(&self, data: KktData<T>, lhs: &DefaultVariables<T>, out: &mut DefaultVariables<T>) {
        kkt_multiply(data, &self.scalings, &self.lb_idx, &self.ub_idx, lhs, out);
    }
}

// numeric refresh of the condensed matrix from data and scalings.
// The upper-left block is accumulated from scratch since its entries
// can mix P, diagonal and Gram contributions.
fn _refresh_kkt_values<T: FloatT>(
    KKT: &mut CscMatrix<T>,
    map: &KktMap,
    data: KktData<T>,
    sc: &KktScalings<T>,
) {
    let nz = &mut KKT.nzval;
    nz[0..map.ulhs_nnz].fill(T::zero());

    for (i, &idx) in map.P.iter().enumerate() {
        nz[idx] += data.P.nzval[i];
    }
    for (j, &idx) in map.diag_x.iter().enumerate() {
        nz[idx] += sc.sigma[j];
    }

    if let Some(gram) = &map.gram_A {
        let w = T::recip(sc.delta);
        for k in 0..data.A.nrows() {
            for t in gram.offsets[k]..gram.offsets[k + 1] {
                nz[gram.dest[t]] += w * data.A.nzval[gram.src_a[t]] * data.A.nzval[gram.src_b[t]];
            }
        }
    }
    if let Some(gram) = &map.gram_G {
        for k in 0..data.G.nrows() {
            let w = T::recip(sc.w[k]);
            for t in gram.offsets[k]..gram.offsets[k + 1] {
                nz[gram.dest[t]] += w * data.G.nzval[gram.src_a[t]] * data.G.nzval[gram.src_b[t]];
            }
        }
    }

    for (i, &idx) in map.A.iter().enumerate() {
        nz[idx] = data.A.nzval[i];
    }
    for &idx in map.diag_y.iter() {
        nz[idx] = -sc.delta;
    }
    for (i, &idx) in map.G.iter().enumerate() {
        nz[idx] = data.G.nzval[i];
    }
    for (k, &idx) in map.diag_z.iter().enumerate() {
        nz[idx] = -sc.w[k];
    }
}

// e = b - Kξ, returning the norm of e
fn _refine_error<T: FloatT>(e: &mut [T], b: &[T], K: &CscMatrix<T>, ξ: &[T]) -> T {
    e.copy_from(b);
    K.sym().symv(e, ξ, -T::one(), T::one());
    e.norm_inf()
}

// small local extension: elementwise division by another vector
trait HadamardRecip<T> {
    fn hadamard_recip_of(&mut self, w: &[T]);
}
impl<T: FloatT> HadamardRecip<T> for [T] {
    fn hadamard_recip_of(&mut self, w: &[T]) {
        for (x, &w) in self.iter_mut().zip(w) {
            *x /= w;
        }
    }
}
impl<T: FloatT> HadamardRecip<T> for Vec<T> {
    fn hadamard_recip_of(&mut self, w: &[T]) {
        self.as_mut_slice().hadamard_recip_of(w);
    }
}
