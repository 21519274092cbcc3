#![allow(non_snake_case)]

//! Direct (factorization based) KKT backends and their shared machinery.
//!
//! The box-constraint condensation, step recovery and unfactored operator
//! application are identical for the dense and sparse backends and live
//! here as free functions over the scaling state.

use crate::algebra::*;
use crate::solver::DefaultVariables;

use super::KktData;

mod dense;
mod sparse;
pub use dense::*;
pub use sparse::*;

/// Elimination structure of the factored system.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum KktMode {
    /// all blocks retained
    Full,
    /// equality dual block substituted out
    EqEliminated,
    /// inequality and box blocks substituted out
    IneqEliminated,
    /// reduced normal-equations form
    AllEliminated,
}

// ---------------------------------------------
// scaling state shared by the backends
// ---------------------------------------------

/// Current regularization pair and iterate-dependent scalings.  Backends
/// snapshot these at `update_scalings` so that solves and data updates can
/// proceed without the iterate at hand.
pub(crate) struct KktScalings<T> {
    pub rho: T,
    pub delta: T,

    // slack / dual snapshots, box parts compacted
    pub s: Vec<T>,
    pub z: Vec<T>,
    pub s_lb: Vec<T>,
    pub z_lb: Vec<T>,
    pub s_ub: Vec<T>,
    pub z_ub: Vec<T>,

    // w      = s/z + δ        for the inequality block
    // w_lb/ub = s/z + δ       for the box blocks
    // sigma  = ρ + Σ_lb + Σ_ub  on the variable diagonal
    pub w: Vec<T>,
    pub w_lb: Vec<T>,
    pub w_ub: Vec<T>,
    pub sigma: Vec<T>,
}

impl<T> KktScalings<T>
where
    T: FloatT,
{
    pub fn new(n: usize, m: usize, n_lb: usize, n_ub: usize) -> Self {
        Self {
            rho: T::one(),
            delta: T::one(),
            s: vec![T::one(); m],
            z: vec![T::one(); m],
            s_lb: vec![T::one(); n_lb],
            z_lb: vec![T::one(); n_lb],
            s_ub: vec![T::one(); n_ub],
            z_ub: vec![T::one(); n_ub],
            w: vec![T::one(); m],
            w_lb: vec![T::one(); n_lb],
            w_ub: vec![T::one(); n_ub],
            sigma: vec![T::one(); n],
        }
    }

    /// identity scalings (s = z = 1 in every family), used for the
    /// initial-point solve
    pub fn set_identity(&mut self, rho: T, delta: T, lb_idx: &[usize], ub_idx: &[usize]) {
        self.s.set(T::one());
        self.z.set(T::one());
        self.s_lb.set(T::one());
        self.z_lb.set(T::one());
        self.s_ub.set(T::one());
        self.z_ub.set(T::one());
        self.refresh(rho, delta, lb_idx, ub_idx);
    }

    pub fn update(
        &mut self,
        rho: T,
        delta: T,
        variables: &DefaultVariables<T>,
        lb_idx: &[usize],
        ub_idx: &[usize],
    ) {
        self.s.copy_from(&variables.s);
        self.z.copy_from(&variables.z);
        self.s_lb.copy_from(&variables.s_lb);
        self.z_lb.copy_from(&variables.z_lb);
        self.s_ub.copy_from(&variables.s_ub);
        self.z_ub.copy_from(&variables.z_ub);
        self.refresh(rho, delta, lb_idx, ub_idx);
    }

    fn refresh(&mut self, rho: T, delta: T, lb_idx: &[usize], ub_idx: &[usize]) {
        self.rho = rho;
        self.delta = delta;

        for (w, (&s, &z)) in self.w.iter_mut().zip(self.s.iter().zip(self.z.iter())) {
            *w = s / z + delta;
        }
        for (w, (&s, &z)) in self
            .w_lb
            .iter_mut()
            .zip(self.s_lb.iter().zip(self.z_lb.iter()))
        {
            *w = s / z + delta;
        }
        for (w, (&s, &z)) in self
            .w_ub
            .iter_mut()
            .zip(self.s_ub.iter().zip(self.z_ub.iter()))
        {
            *w = s / z + delta;
        }

        self.sigma.set(rho);
        for (k, &j) in lb_idx.iter().enumerate() {
            self.sigma[j] += T::recip(self.w_lb[k]);
        }
        for (k, &j) in ub_idx.iter().enumerate() {
            self.sigma[j] += T::recip(self.w_ub[k]);
        }
    }
}

// ---------------------------------------------
// condensation of the eight-component RHS
// ---------------------------------------------

// fold the box components of the RHS into its x block:
//
//   bx -= I_lbᵀ diag(w_lb)⁻¹ (r_z_lb - r_s_lb ∘ z_lb⁻¹)
//   bx += I_ubᵀ diag(w_ub)⁻¹ (r_z_ub - r_s_ub ∘ z_ub⁻¹)
pub(crate) fn fold_box_rhs<T: FloatT>(
    bx: &mut [T],
    sc: &KktScalings<T>,
    lb_idx: &[usize],
    ub_idx: &[usize],
    rhs: &DefaultVariables<T>,
) {
    for (k, &j) in lb_idx.iter().enumerate() {
        bx[j] -= (rhs.z_lb[k] - rhs.s_lb[k] / sc.z_lb[k]) / sc.w_lb[k];
    }
    for (k, &j) in ub_idx.iter().enumerate() {
        bx[j] += (rhs.z_ub[k] - rhs.s_ub[k] / sc.z_ub[k]) / sc.w_ub[k];
    }
}

// condensed inequality-block RHS:  bz = r_z - r_s ∘ z⁻¹
pub(crate) fn fold_ineq_rhs<T: FloatT>(bz: &mut [T], sc: &KktScalings<T>, rhs: &DefaultVariables<T>) {
    for (i, bz) in bz.iter_mut().enumerate() {
        *bz = rhs.z[i] - rhs.s[i] / sc.z[i];
    }
}

// ---------------------------------------------
// recovery of eliminated step components
// ---------------------------------------------

// box duals and slacks from Δx
pub(crate) fn recover_box_steps<T: FloatT>(
    sc: &KktScalings<T>,
    lb_idx: &[usize],
    ub_idx: &[usize],
    rhs: &DefaultVariables<T>,
    lhs: &mut DefaultVariables<T>,
) {
    for (k, &j) in lb_idx.iter().enumerate() {
        let dz = -(lhs.x[j] + rhs.z_lb[k] - rhs.s_lb[k] / sc.z_lb[k]) / sc.w_lb[k];
        lhs.z_lb[k] = dz;
        lhs.s_lb[k] = (rhs.s_lb[k] - sc.s_lb[k] * dz) / sc.z_lb[k];
    }
    for (k, &j) in ub_idx.iter().enumerate() {
        let dz = (lhs.x[j] - rhs.z_ub[k] + rhs.s_ub[k] / sc.z_ub[k]) / sc.w_ub[k];
        lhs.z_ub[k] = dz;
        lhs.s_ub[k] = (rhs.s_ub[k] - sc.s_ub[k] * dz) / sc.z_ub[k];
    }
}

// inequality slacks from Δz
pub(crate) fn recover_ineq_slacks<T: FloatT>(
    sc: &KktScalings<T>,
    rhs: &DefaultVariables<T>,
    lhs: &mut DefaultVariables<T>,
) {
    for i in 0..lhs.s.len() {
        lhs.s[i] = (rhs.s[i] - sc.s[i] * lhs.z[i]) / sc.z[i];
    }
}

// ---------------------------------------------
// unfactored operator
// ---------------------------------------------

/// Apply the full (unreduced) regularized KKT operator to a primal-dual
/// vector.  Used for residual gauges and testing; the complementarity rows
/// apply the linearization `z∘Δs + s∘Δz`.
pub(crate) fn kkt_multiply<T: FloatT>(
    data: KktData<T>,
    sc: &KktScalings<T>,
    lb_idx: &[usize],
    ub_idx: &[usize],
    lhs: &DefaultVariables<T>,
    out: &mut DefaultVariables<T>,
) {
    // x row: (P+ρI)Δx + AᵀΔy + GᵀΔz - I_lbᵀΔz_lb + I_ubᵀΔz_ub
    data.P.sym().symv(&mut out.x, &lhs.x, T::one(), T::zero());
    out.x.axpby(sc.rho, &lhs.x, T::one());
    data.A.t().gemv(&mut out.x, &lhs.y, T::one(), T::one());
    data.G.t().gemv(&mut out.x, &lhs.z, T::one(), T::one());
    for (k, &j) in lb_idx.iter().enumerate() {
        out.x[j] -= lhs.z_lb[k];
    }
    for (k, &j) in ub_idx.iter().enumerate() {
        out.x[j] += lhs.z_ub[k];
    }

    // y row: AΔx - δΔy
    data.A.gemv(&mut out.y, &lhs.x, T::one(), T::zero());
    out.y.axpby(-sc.delta, &lhs.y, T::one());

    // z row: GΔx - δΔz + Δs
    data.G.gemv(&mut out.z, &lhs.x, T::one(), T::zero());
    out.z.axpby(-sc.delta, &lhs.z, T::one());
    out.z.axpby(T::one(), &lhs.s, T::one());

    // box rows: ∓Δx - δΔz_lb/ub + Δs_lb/ub
    for (k, &j) in lb_idx.iter().enumerate() {
        out.z_lb[k] = -lhs.x[j] - sc.delta * lhs.z_lb[k] + lhs.s_lb[k];
    }
    for (k, &j) in ub_idx.iter().enumerate() {
        out.z_ub[k] = lhs.x[j] - sc.delta * lhs.z_ub[k] + lhs.s_ub[k];
    }

    // complementarity rows
    for i in 0..out.s.len() {
        out.s[i] = sc.z[i] * lhs.s[i] + sc.s[i] * lhs.z[i];
    }
    for k in 0..out.s_lb.len() {
        out.s_lb[k] = sc.z_lb[k] * lhs.s_lb[k] + sc.s_lb[k] * lhs.z_lb[k];
    }
    for k in 0..out.s_ub.len() {
        out.s_ub[k] = sc.z_ub[k] * lhs.s_ub[k] + sc.s_ub[k] * lhs.z_ub[k];
    }
}
