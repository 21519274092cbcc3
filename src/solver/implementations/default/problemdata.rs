#![allow(non_snake_case)]
use itertools::izip;
use std::iter::zip;

use super::*;
use crate::algebra::*;
use crate::solver::core::traits::ProblemData;
use crate::solver::utils::infbounds::get_infinity;

// norms within this band are already well scaled; a Ruiz sweep that finds
// every composite norm inside it stops early
const RUIZ_KAPPA: f64 = 10.;

// row/column norms below this floor are not used for scaling
const RUIZ_NORM_FLOOR: f64 = 1e-6;

// ---------------
// Data type for the standard QP problem format
// ---------------

/// Standard-form problem data implementing the
/// [`ProblemData`](crate::solver::traits::ProblemData) trait.
///
/// All fields hold the *scaled* problem once
/// [`equilibrate`](crate::solver::traits::ProblemData::equilibrate) has
/// run; the equilibration field carries the diagonal maps back to the
/// user's data.
pub struct DefaultProblemData<T> {
    /// The matrix P of the quadratic objective, upper triangle
    pub P: CscMatrix<T>,
    /// The linear objective term
    pub c: Vec<T>,
    /// The equality constraint matrix
    pub A: CscMatrix<T>,
    /// The equality right-hand side
    pub b: Vec<T>,
    /// The inequality constraint matrix
    pub G: CscMatrix<T>,
    /// The inequality right-hand side
    pub h: Vec<T>,
    /// Lower box bounds (±∞ entries disable a side)
    pub x_lb: Vec<T>,
    /// Upper box bounds
    pub x_ub: Vec<T>,

    // compacted finite bounds: variable indices and values
    pub lb_idx: Vec<usize>,
    pub ub_idx: Vec<usize>,
    pub x_lb_c: Vec<T>,
    pub x_ub_c: Vec<T>,

    /// Number of variables
    pub n: usize,
    /// Number of equality rows
    pub p: usize,
    /// Number of inequality rows
    pub m: usize,

    /// Equilibration data for the problem
    pub equilibration: DefaultEquilibrationData<T>,
}

impl<T> DefaultProblemData<T>
where
    T: FloatT,
{
    /// Create a new `DefaultProblemData` object.  Makes clean internal
    /// copies of all inputs (the internal copy is scaled in place), puts
    /// P into triu form, caps `h` at the infinity bound and compacts the
    /// finite box bounds.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        P: &CscMatrix<T>,
        c: &[T],
        A: &CscMatrix<T>,
        b: &[T],
        G: &CscMatrix<T>,
        h: &[T],
        x_lb: &[T],
        x_ub: &[T],
    ) -> Self {
        let P_new = if P.is_triu() { P.clone() } else { P.to_triu() };

        let infbound: T = get_infinity().as_T();

        //cap entries in h at the infinity bound, so that rows with h = +∞
        //are carried as (weakly) vacuous constraints
        let mut h_new = h.to_vec();
        h_new.scalarop(|x| T::min(x, infbound));

        let (n, p, m) = (P_new.ncols(), A.nrows(), G.nrows());

        // compact the finite box bounds
        let is_finite_bound = |v: T| v.abs() < infbound;
        let lb_idx: Vec<usize> = (0..n).filter(|&j| is_finite_bound(x_lb[j])).collect();
        let ub_idx: Vec<usize> = (0..n).filter(|&j| is_finite_bound(x_ub[j])).collect();
        let x_lb_c = lb_idx.iter().map(|&j| x_lb[j]).collect();
        let x_ub_c = ub_idx.iter().map(|&j| x_ub[j]).collect();

        let equilibration = DefaultEquilibrationData::<T>::new(n, p, m);

        Self {
            P: P_new,
            c: c.to_vec(),
            A: A.clone(),
            b: b.to_vec(),
            G: G.clone(),
            h: h_new,
            x_lb: x_lb.to_vec(),
            x_ub: x_ub.to_vec(),
            lb_idx,
            ub_idx,
            x_lb_c,
            x_ub_c,
            n,
            p,
            m,
            equilibration,
        }
    }

    /// number of finite lower bounds
    pub fn n_lb(&self) -> usize {
        self.lb_idx.len()
    }

    /// number of finite upper bounds
    pub fn n_ub(&self) -> usize {
        self.ub_idx.len()
    }

    /// refresh the compacted bound values from the (scaled) full-length
    /// bound vectors
    pub(crate) fn compact_bounds(&mut self) {
        for (v, &j) in zip(self.x_lb_c.iter_mut(), self.lb_idx.iter()) {
            *v = self.x_lb[j];
        }
        for (v, &j) in zip(self.x_ub_c.iter_mut(), self.ub_idx.iter()) {
            *v = self.x_ub[j];
        }
    }
}

impl<T> ProblemData<T> for DefaultProblemData<T>
where
    T: FloatT,
{
    type V = DefaultVariables<T>;
    type SE = DefaultSettings<T>;

    fn equilibrate(&mut self, settings: &DefaultSettings<T>) {
        let data = self;

        // if equilibration is disabled, just return.  Note that
        // the default equilibration structure initializes with
        // identity scaling already.
        if !settings.equilibrate_enable {
            data.compact_bounds();
            return;
        }

        let (n, p, m) = (data.n, data.p, data.m);

        // per-sweep scaling steps.  Scratch here is fine since
        // equilibration runs once at setup.
        let mut dwork = vec![T::zero(); n];
        let mut ework = vec![T::zero(); p];
        let mut fwork = vec![T::zero(); m];

        let scale_min = settings.equilibrate_min_scaling;
        let scale_max = settings.equilibrate_max_scaling;
        let norm_floor: T = RUIZ_NORM_FLOOR.as_T();

        // perform scaling operations for a bounded number of sweeps
        for _ in 0..settings.equilibrate_max_iter {
            // norms of the composite [P Aᵀ Gᵀ; A 0 0; G 0 0] with unit
            // entries on the columns carrying finite box bounds
            data.P.col_norms_sym(&mut dwork);
            data.A.col_norms_no_reset(&mut dwork);
            data.G.col_norms_no_reset(&mut dwork);
            for &j in data.lb_idx.iter().chain(data.ub_idx.iter()) {
                dwork[j] = T::max(dwork[j], T::one());
            }
            data.A.row_norms(&mut ework);
            data.G.row_norms(&mut fwork);

            if _ruiz_converged(&dwork) && _ruiz_converged(&ework) && _ruiz_converged(&fwork) {
                break;
            }

            // norms below the floor should not get scaled
            dwork.scalarop(|x| if x < norm_floor { T::one() } else { x });
            ework.scalarop(|x| if x < norm_floor { T::one() } else { x });
            fwork.scalarop(|x| if x < norm_floor { T::one() } else { x });

            dwork.rsqrt();
            ework.rsqrt();
            fwork.rsqrt();

            // bound the cumulative scaling
            let equil = &data.equilibration;
            for (dwork, &d) in izip!(dwork.iter_mut(), equil.d.iter()) {
                *dwork = T::clip(dwork, scale_min / d, scale_max / d);
            }
            for (ework, &e) in izip!(ework.iter_mut(), equil.e.iter()) {
                *ework = T::clip(ework, scale_min / e, scale_max / e);
            }
            for (fwork, &f) in izip!(fwork.iter_mut(), equil.f.iter()) {
                *fwork = T::clip(fwork, scale_min / f, scale_max / f);
            }

            // scale the problem data and update the
            // equilibration matrices
            data.P.lrscale(&dwork, &dwork);
            data.A.lrscale(&ework, &dwork);
            data.G.lrscale(&fwork, &dwork);
            data.c.hadamard(&dwork);
            data.b.hadamard(&ework);
            data.h.hadamard(&fwork);

            // bounds follow the inverse of the variable scaling;
            // ±∞ entries pass through unchanged
            for (v, &dw) in zip(data.x_lb.iter_mut(), dwork.iter()) {
                *v = *v / dw;
            }
            for (v, &dw) in zip(data.x_ub.iter_mut(), dwork.iter()) {
                *v = *v / dw;
            }

            let equil = &mut data.equilibration;
            equil.d.hadamard(&dwork);
            equil.e.hadamard(&ework);
            equil.f.hadamard(&fwork);

            // objective scaling: 1/max(1, mean(column norms of P), ‖c‖∞)
            data.P.col_norms(&mut dwork);
            let mean_col_norm_P = dwork.mean();
            let inf_norm_c = data.c.norm_inf();

            let scale_cost = T::max(T::one(), T::max(mean_col_norm_P, inf_norm_c));
            let ctmp = T::recip(scale_cost);
            let ctmp = T::clip(&ctmp, scale_min / equil.c, scale_max / equil.c);

            data.P.scale(ctmp);
            data.c.scale(ctmp);
            equil.c *= ctmp;
        } //end Ruiz scaling loop

        // update the inverse scaling data
        let equil = &mut data.equilibration;
        equil.dinv.scalarop_from(T::recip, &equil.d);
        equil.einv.scalarop_from(T::recip, &equil.e);
        equil.finv.scalarop_from(T::recip, &equil.f);

        data.compact_bounds();
    }
}

// all (nonzero) norms within [1/√κ, √κ]
fn _ruiz_converged<T: FloatT>(norms: &[T]) -> bool {
    let hi: T = <f64 as AsFloatT<T>>::as_T(&RUIZ_KAPPA).sqrt();
    let lo = T::recip(hi);
    norms
        .iter()
        .all(|&v| v == T::zero() || (v >= lo && v <= hi))
}
