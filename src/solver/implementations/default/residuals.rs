#![allow(non_snake_case)]
use super::*;
use crate::algebra::*;
use crate::solver::core::traits::Residuals;
use std::iter::zip;

// ---------------
// Residuals type for the standard QP problem format
// ---------------

/// Residuals of the perturbed optimality conditions, together with the
/// matrix-vector products and inner products needed by the termination
/// and infeasibility checks.
///
/// All residual vectors are in the solver's scaled space; the certificate
/// quantities are unscaled as they are computed.
pub struct DefaultResiduals<T> {
    // residuals of the perturbed KKT conditions
    pub r_d: Vec<T>,
    pub r_eq: Vec<T>,
    pub r_in: Vec<T>,
    pub r_lb: Vec<T>,
    pub r_ub: Vec<T>,

    // matrix-vector products retained for relative termination norms
    pub Px: Vec<T>,
    pub Ax: Vec<T>,
    pub Gx: Vec<T>,
    pub ATy: Vec<T>,
    pub GTz: Vec<T>,
    // the stationarity contribution of the box duals, full length
    pub zbox: Vec<T>,

    // inner products.  NB: these are in the scaled space; the objective
    // scaling is backed out in the info update.
    pub dot_xPx: T,
    pub dot_cx: T,
    pub dot_by: T,
    pub dot_hz: T,
    pub dot_lb_zlb: T,
    pub dot_ub_zub: T,
    // total complementarity s'z over all three families
    pub dot_gap: T,

    // ---- infeasibility certificate quantities (unscaled) ----
    // primal certificate: the dual direction (Δy, Δz, Δz_lb, Δz_ub)
    pub cert_primal_norm: T,
    pub cert_primal_res: T,
    pub cert_primal_support: T,
    // dual certificate: the primal direction Δx
    pub cert_dual_norm_dx: T,
    pub cert_dual_dot_cdx: T,
    pub cert_dual_res_Pdx: T,
    pub cert_dual_res_Adx: T,
    pub cert_dual_max_Gdx: T,
    pub cert_dual_max_dx_ub: T,
    pub cert_dual_min_dx_lb: T,

    // work vectors for the certificate products
    work_n: Vec<T>,
    work_p: Vec<T>,
    work_m: Vec<T>,
}

impl<T> DefaultResiduals<T>
where
    T: FloatT,
{
    pub fn new(n: usize, p: usize, m: usize, n_lb: usize, n_ub: usize) -> Self {
        Self {
            r_d: vec![T::zero(); n],
            r_eq: vec![T::zero(); p],
            r_in: vec![T::zero(); m],
            r_lb: vec![T::zero(); n_lb],
            r_ub: vec![T::zero(); n_ub],
            Px: vec![T::zero(); n],
            Ax: vec![T::zero(); p],
            Gx: vec![T::zero(); m],
            ATy: vec![T::zero(); n],
            GTz: vec![T::zero(); n],
            zbox: vec![T::zero(); n],
            dot_xPx: T::zero(),
            dot_cx: T::zero(),
            dot_by: T::zero(),
            dot_hz: T::zero(),
            dot_lb_zlb: T::zero(),
            dot_ub_zub: T::zero(),
            dot_gap: T::zero(),
            cert_primal_norm: T::zero(),
            cert_primal_res: T::zero(),
            cert_primal_support: T::zero(),
            cert_dual_norm_dx: T::zero(),
            cert_dual_dot_cdx: T::zero(),
            cert_dual_res_Pdx: T::zero(),
            cert_dual_res_Adx: T::zero(),
            cert_dual_max_Gdx: T::zero(),
            cert_dual_max_dx_ub: T::zero(),
            cert_dual_min_dx_lb: T::zero(),
            work_n: vec![T::zero(); n],
            work_p: vec![T::zero(); p],
            work_m: vec![T::zero(); m],
        }
    }
}

impl<T> Residuals<T> for DefaultResiduals<T>
where
    T: FloatT,
{
    type D = DefaultProblemData<T>;
    type V = DefaultVariables<T>;

    fn update(&mut self, variables: &DefaultVariables<T>, data: &DefaultProblemData<T>) {
        let v = variables;

        // products used multiple times
        data.P.sym().symv(&mut self.Px, &v.x, T::one(), T::zero());
        data.A.gemv(&mut self.Ax, &v.x, T::one(), T::zero());
        data.G.gemv(&mut self.Gx, &v.x, T::one(), T::zero());
        data.A.t().gemv(&mut self.ATy, &v.y, T::one(), T::zero());
        data.G.t().gemv(&mut self.GTz, &v.z, T::one(), T::zero());

        // box dual contribution to stationarity: -I_lbᵀ z_lb + I_ubᵀ z_ub
        self.zbox.fill(T::zero());
        for (k, &j) in data.lb_idx.iter().enumerate() {
            self.zbox[j] -= v.z_lb[k];
        }
        for (k, &j) in data.ub_idx.iter().enumerate() {
            self.zbox[j] += v.z_ub[k];
        }

        // stationarity: r_d = Px + c + Aᵀy + Gᵀz - I_lbᵀz_lb + I_ubᵀz_ub
        for i in 0..self.r_d.len() {
            self.r_d[i] = self.Px[i] + data.c[i] + self.ATy[i] + self.GTz[i] + self.zbox[i];
        }

        // primal: r_eq = Ax - b,  r_in = Gx + s - h
        self.r_eq.waxpby(T::one(), &self.Ax, -T::one(), &data.b);
        for i in 0..self.r_in.len() {
            self.r_in[i] = self.Gx[i] + v.s[i] - data.h[i];
        }
        // box rows: r_lb = x_lb - x + s_lb,  r_ub = x - x_ub + s_ub
        for (k, &j) in data.lb_idx.iter().enumerate() {
            self.r_lb[k] = data.x_lb_c[k] - v.x[j] + v.s_lb[k];
        }
        for (k, &j) in data.ub_idx.iter().enumerate() {
            self.r_ub[k] = v.x[j] - data.x_ub_c[k] + v.s_ub[k];
        }

        // inner products
        self.dot_xPx = v.x.dot(&self.Px);
        self.dot_cx = data.c.dot(&v.x);
        self.dot_by = data.b.dot(&v.y);
        self.dot_hz = data.h.dot(&v.z);
        self.dot_lb_zlb = data.x_lb_c.dot(&v.z_lb);
        self.dot_ub_zub = data.x_ub_c.dot(&v.z_ub);
        self.dot_gap = v.s.dot(&v.z) + v.s_lb.dot(&v.z_lb) + v.s_ub.dot(&v.z_ub);
    }

    fn update_certificates(&mut self, step: &DefaultVariables<T>, data: &DefaultProblemData<T>) {
        let equil = &data.equilibration;
        let cinv = T::recip(equil.c);

        // ---- primal infeasibility: the dual direction ------------------
        // cert vector: AᵀΔy + GᵀΔz - I_lbᵀΔz_lb + I_ubᵀΔz_ub
        data.A.t().gemv(&mut self.work_n, &step.y, T::one(), T::zero());
        data.G.t().gemv(&mut self.work_n, &step.z, T::one(), T::one());
        for (k, &j) in data.lb_idx.iter().enumerate() {
            self.work_n[j] -= step.z_lb[k];
        }
        for (k, &j) in data.ub_idx.iter().enumerate() {
            self.work_n[j] += step.z_ub[k];
        }
        self.cert_primal_res = self.work_n.norm_inf_scaled(&equil.dinv);

        let mut nrm = step.y.norm_inf_scaled(&equil.e);
        nrm = T::max(nrm, step.z.norm_inf_scaled(&equil.f));
        for (k, &j) in data.lb_idx.iter().enumerate() {
            nrm = T::max(nrm, T::abs(step.z_lb[k] * equil.dinv[j]));
        }
        for (k, &j) in data.ub_idx.iter().enumerate() {
            nrm = T::max(nrm, T::abs(step.z_ub[k] * equil.dinv[j]));
        }
        self.cert_primal_norm = nrm;

        self.cert_primal_support = data.b.dot(&step.y) + data.h.dot(&step.z)
            - data.x_lb_c.dot(&step.z_lb)
            + data.x_ub_c.dot(&step.z_ub);

        // ---- dual infeasibility: the primal direction ------------------
        self.cert_dual_norm_dx = step.x.norm_inf_scaled(&equil.d);
        self.cert_dual_dot_cdx = data.c.dot(&step.x) * cinv;

        data.P.sym().symv(&mut self.work_n, &step.x, T::one(), T::zero());
        self.cert_dual_res_Pdx = self.work_n.norm_inf_scaled(&equil.dinv) * cinv;

        data.A.gemv(&mut self.work_p, &step.x, T::one(), T::zero());
        self.cert_dual_res_Adx = self.work_p.norm_inf_scaled(&equil.einv);

        data.G.gemv(&mut self.work_m, &step.x, T::one(), T::zero());
        let mut max_Gdx = -T::infinity();
        for (gdx, &finv) in zip(self.work_m.iter(), equil.finv.iter()) {
            max_Gdx = T::max(max_Gdx, *gdx * finv);
        }
        self.cert_dual_max_Gdx = max_Gdx;

        let mut max_dx_ub = -T::infinity();
        for &j in data.ub_idx.iter() {
            max_dx_ub = T::max(max_dx_ub, step.x[j] * equil.d[j]);
        }
        self.cert_dual_max_dx_ub = max_dx_ub;

        let mut min_dx_lb = T::infinity();
        for &j in data.lb_idx.iter() {
            min_dx_lb = T::min(min_dx_lb, step.x[j] * equil.d[j]);
        }
        self.cert_dual_min_dx_lb = min_dx_lb;
    }
}
