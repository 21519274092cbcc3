#![allow(non_snake_case)]

use crate::algebra::*;
use crate::solver::core::kktsolvers::direct::*;
use crate::solver::core::kktsolvers::{DataUpdates, KktData, KktSolver};
use crate::solver::{DefaultSettings, DefaultVariables};

// -------------------------------------
// KKT solver using dense LDLᵀ factorization of the full-mode
// (3x3 block) matrix.
// -------------------------------------

pub struct DenseKktSolver<T = f64> {
    // problem dimensions
    n: usize,
    p: usize,
    m: usize,

    // compacted box index maps
    lb_idx: Vec<usize>,
    ub_idx: Vec<usize>,

    // snapshot of the current regularization and iterate scalings
    scalings: KktScalings<T>,

    // KKT matrix, upper triangle filled
    KKT: Matrix<T>,

    engine: DenseLDLEngine<T>,
    dsigns: Vec<i8>,

    // RHS/solution and refinement workspace
    b: Vec<T>,
    x: Vec<T>,
    work_e: Vec<T>,
    work_dx: Vec<T>,

    // dynamic regularization parameters
    regularize_eps: T,
    regularize_delta: T,

    // iterative refinement parameters
    refine_abstol: T,
    refine_reltol: T,
    refine_max_iter: u32,
    refine_min_improvement: T,
}

impl<T> DenseKktSolver<T>
where
    T: FloatT,
{
    pub fn new(
        data: KktData<T>,
        lb_idx: &[usize],
        ub_idx: &[usize],
        settings: &DefaultSettings<T>,
    ) -> Self {
        let n = data.P.ncols();
        let p = data.A.nrows();
        let m = data.G.nrows();
        let (n_lb, n_ub) = (lb_idx.len(), ub_idx.len());
        let dim = n + p + m;

        let mut dsigns = vec![1_i8; dim];
        dsigns[n..].fill(-1);

        let mut scalings = KktScalings::new(n, m, n_lb, n_ub);
        scalings.set_identity(settings.rho_init, settings.delta_init, lb_idx, ub_idx);

        let mut out = Self {
            n,
            p,
            m,
            lb_idx: lb_idx.to_vec(),
            ub_idx: ub_idx.to_vec(),
            scalings,
            KKT: Matrix::<T>::zeros((dim, dim)),
            engine: DenseLDLEngine::<T>::new(dim),
            dsigns,
            b: vec![T::zero(); dim],
            x: vec![T::zero(); dim],
            work_e: vec![T::zero(); dim],
            work_dx: vec![T::zero(); dim],
            regularize_eps: settings.reg_finetune_lower_limit,
            regularize_delta: settings.reg_finetune_delta,
            refine_abstol: settings.iterative_refinement_abs_tol,
            refine_reltol: settings.iterative_refinement_rel_tol,
            refine_max_iter: settings.iterative_refinement_max_iter,
            refine_min_improvement: settings.iterative_refinement_min_improvement_rate,
        };
        out.refresh(data);
        out
    }

    fn refresh(&mut self, data: KktData<T>) {
        let (n, p) = (self.n, self.p);
        let K = &mut self.KKT;
        let sc = &self.scalings;

        K.fill(T::zero());

        // P into the upper-left block (P is triu)
        for col in 0..n {
            for idx in data.P.colptr[col]..data.P.colptr[col + 1] {
                K[(data.P.rowval[idx], col)] = data.P.nzval[idx];
            }
        }
        // variable diagonal
        for j in 0..n {
            K[(j, j)] += sc.sigma[j];
        }
        // Aᵀ block and equality diagonal
        for col in 0..data.A.ncols() {
            for idx in data.A.colptr[col]..data.A.colptr[col + 1] {
                K[(col, n + data.A.rowval[idx])] = data.A.nzval[idx];
            }
        }
        for k in 0..p {
            K[(n + k, n + k)] = -sc.delta;
        }
        // Gᵀ block and inequality diagonal
        for col in 0..data.G.ncols() {
            for idx in data.G.colptr[col]..data.G.colptr[col + 1] {
                K[(col, n + p + data.G.rowval[idx])] = data.G.nzval[idx];
            }
        }
        for k in 0..self.m {
            K[(n + p + k, n + p + k)] = -sc.w[k];
        }
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
            engine,
            ..
        } = self;

        let normb = b.norm_inf();
        let mut norme = _refine_error(e, b, KKT, x);

        for _ in 0..max_iter {
            if norme <= abstol + reltol * normb {
                return;
            }

            let lastnorme = norme;

            dx.copy_from(e);
            engine.solve(dx);

            dx.axpby(T::one(), x, T::one());
            norme = _refine_error(e, b, KKT, dx);

            if lastnorme / norme < min_improvement {
                return;
            } else {
                std::mem::swap(x, dx);
            }
        }
    }
}

impl<T> KktSolver<T> for DenseKktSolver<T>
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
        self.refresh(data);
    }

    fn factorize(&mut self, dynamic: bool) -> bool {
        self.engine
            .factor(
                &self.KKT,
                &self.dsigns,
                dynamic,
                self.regularize_eps,
                self.regularize_delta,
            )
            .is_ok()
    }

    fn solve(
        &mut self,
        _data: KktData<T>,
        rhs: &DefaultVariables<T>,
        lhs: &mut DefaultVariables<T>,
        refine: bool,
    ) {
        let (n, p, m) = (self.n, self.p, self.m);
        let sc = &self.scalings;

        self.b[0..n].copy_from(&rhs.x);
        fold_box_rhs(&mut self.b[0..n], sc, &self.lb_idx, &self.ub_idx, rhs);
        self.b[n..n + p].copy_from(&rhs.y);
        fold_ineq_rhs(&mut self.b[n + p..n + p + m], sc, rhs);

        self.x.copy_from(&self.b);
        self.engine.solve(&mut self.x);
        if refine {
            self.iterative_refinement();
        }

        let sc = &self.scalings;
        lhs.x.copy_from(&self.x[0..n]);
        lhs.y.copy_from(&self.x[n..n + p]);
        lhs.z.copy_from(&self.x[n + p..n + p + m]);

        recover_ineq_slacks(sc, rhs, lhs);
        recover_box_steps(sc, &self.lb_idx, &self.ub_idx, rhs, lhs);
    }

    fn multiply(&self, data: KktData<T>, lhs: &DefaultVariables<T>, out: &mut DefaultVariables<T>) {
        kkt_multiply(data, &self.scalings, &self.lb_idx, &self.ub_idx, lhs, out);
    }
}

// e = b - Kξ, returning the norm of e
fn _refine_error<T: FloatT>(e: &mut [T], b: &[T], K: &Matrix<T>, ξ: &[T]) -> T {
    e.copy_from(b);
    K.sym().symv(e, ξ, -T::one(), T::one());
    e.norm_inf()
}
