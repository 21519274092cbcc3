use super::*;
use crate::algebra::*;
use crate::solver::core::traits::Info;
use crate::solver::core::SolverStatus;
use crate::timers::*;

// shrink applied to ρ or δ when the paired residual decreased enough
const REG_SHRINK: f64 = 0.1;

/// Standard-form progress information, implementing the
/// [`Info`](crate::solver::traits::Info) and
/// [`InfoPrint`](crate::solver::traits::InfoPrint) traits.
///
/// Also the holder of the proximal regularization pair (ρ, δ), which the
/// driver reads, inflates on factorization failures and shrinks on
/// sufficient progress.
#[derive(Debug, Clone, Default)]
pub struct DefaultInfo<T> {
    /// complementarity gap μ
    pub mu: T,
    /// most recent step length
    pub step_length: T,
    /// most recent centering parameter
    pub sigma: T,
    /// elapsed outer iterations
    pub iterations: u32,
    /// primal objective (unscaled)
    pub cost_primal: T,
    /// dual objective (unscaled)
    pub cost_dual: T,
    /// primal residual ∞-norm (unscaled)
    pub res_primal: T,
    /// dual residual ∞-norm (unscaled)
    pub res_dual: T,
    /// absolute duality gap
    pub gap_abs: T,
    /// relative duality gap
    pub gap_rel: T,
    /// primal proximal regularization ρ
    pub rho: T,
    /// dual proximal regularization δ
    pub delta: T,
    /// total solve time (seconds)
    pub solve_time: f64,
    /// terminal status
    pub status: SolverStatus,

    // previous-iteration residual norms, gating the ρ/δ schedule
    prev_res_primal: T,
    prev_res_dual: T,

    // relative termination denominators
    denom_primal: T,
    denom_dual: T,
}

impl<T> DefaultInfo<T>
where
    T: FloatT,
{
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T> Info<T> for DefaultInfo<T>
where
    T: FloatT,
{
    type V = DefaultVariables<T>;
    type R = DefaultResiduals<T>;

    fn reset(&mut self, timers: &mut Timers, settings: &DefaultSettings<T>) {
        self.status = SolverStatus::Unsolved;
        self.iterations = 0;
        self.solve_time = 0f64;
        self.rho = settings.rho_init;
        self.delta = settings.delta_init;
        self.res_primal = T::infinity();
        self.res_dual = T::infinity();
        self.prev_res_primal = T::infinity();
        self.prev_res_dual = T::infinity();

        timers.reset_timer("solve");
    }

    fn finalize(&mut self, timers: &mut Timers) {
        self.solve_time = timers.total_time().as_secs_f64();
    }

    fn update(
        &mut self,
        data: &DefaultProblemData<T>,
        variables: &DefaultVariables<T>,
        residuals: &DefaultResiduals<T>,
        μ: T,
        timers: &Timers,
    ) {
        let equil = &data.equilibration;
        let cinv = T::recip(equil.c);

        self.mu = μ;

        // residual norms from the last iterate gate the ρ/δ schedule
        self.prev_res_primal = self.res_primal;
        self.prev_res_dual = self.res_dual;

        // primal and dual costs.  dot products are invariant w.r.t. the
        // D/E/F equilibration, but we still need to back out the overall
        // objective scaling term
        let half: T = (0.5).as_T();
        self.cost_primal = (half * residuals.dot_xPx + residuals.dot_cx) * cinv;
        self.cost_dual = (-half * residuals.dot_xPx - residuals.dot_by - residuals.dot_hz
            + residuals.dot_lb_zlb
            - residuals.dot_ub_zub)
            * cinv;

        // primal residual, unscaled through the inverse row scalings
        let mut res_p = residuals.r_eq.norm_inf_scaled(&equil.einv);
        res_p = T::max(res_p, residuals.r_in.norm_inf_scaled(&equil.finv));
        for (k, &j) in data.lb_idx.iter().enumerate() {
            res_p = T::max(res_p, T::abs(residuals.r_lb[k] * equil.d[j]));
        }
        for (k, &j) in data.ub_idx.iter().enumerate() {
            res_p = T::max(res_p, T::abs(residuals.r_ub[k] * equil.d[j]));
        }
        self.res_primal = res_p;

        // dual residual
        self.res_dual = residuals.r_d.norm_inf_scaled(&equil.dinv) * cinv;

        // relative termination denominators.  Rows carrying the infinity
        // bound in h are vacuous and would otherwise dominate the norms.
        let infbound: T = crate::solver::utils::infbounds::get_infinity().as_T();
        let mut dp = residuals.Ax.norm_inf_scaled(&equil.einv);
        dp = T::max(dp, data.b.norm_inf_scaled(&equil.einv));
        dp = T::max(dp, residuals.Gx.norm_inf_scaled(&equil.finv));
        for i in 0..data.m {
            let hu = data.h[i] * equil.finv[i];
            if hu.abs() < infbound {
                dp = T::max(dp, hu.abs());
                dp = T::max(dp, T::abs(variables.s[i] * equil.finv[i]));
            }
        }
        dp = T::max(dp, variables.x.norm_inf_scaled(&equil.d));
        for (k, &j) in data.lb_idx.iter().enumerate() {
            dp = T::max(dp, T::abs(variables.s_lb[k] * equil.d[j]));
        }
        for (k, &j) in data.ub_idx.iter().enumerate() {
            dp = T::max(dp, T::abs(variables.s_ub[k] * equil.d[j]));
        }
        self.denom_primal = dp;

        let mut dd = residuals.Px.norm_inf_scaled(&equil.dinv);
        dd = T::max(dd, data.c.norm_inf_scaled(&equil.dinv));
        dd = T::max(dd, residuals.ATy.norm_inf_scaled(&equil.dinv));
        dd = T::max(dd, residuals.GTz.norm_inf_scaled(&equil.dinv));
        dd = T::max(dd, residuals.zbox.norm_inf_scaled(&equil.dinv));
        self.denom_dual = dd * cinv;

        // absolute and relative gaps
        self.gap_abs = T::abs(self.cost_primal - self.cost_dual);
        self.gap_rel = self.gap_abs
            / T::max(
                T::one(),
                T::min(T::abs(self.cost_primal), T::abs(self.cost_dual)),
            );

        // solve time so far
        self.solve_time = timers.total_time().as_secs_f64();
    }

    fn check_termination(
        &mut self,
        _residuals: &DefaultResiduals<T>,
        settings: &DefaultSettings<T>,
        iter: u32,
    ) -> bool {
        //  optimality
        // ---------------------
        let tol_p = settings.eps_abs + settings.eps_rel * self.denom_primal;
        let tol_d = settings.eps_abs + settings.eps_rel * self.denom_dual;
        let tol_gap = settings.eps_duality_gap_abs
            + settings.eps_duality_gap_rel
                * T::max(T::abs(self.cost_primal), T::abs(self.cost_dual));

        if self.res_primal < tol_p && self.res_dual < tol_d && self.gap_abs < tol_gap {
            self.status = SolverStatus::Solved;
        }

        // iteration limit
        // ----------------------
        if self.status == SolverStatus::Unsolved && iter >= settings.max_iter {
            self.status = SolverStatus::MaxIterations;
        }

        // return TRUE if we settled on a final status
        self.status != SolverStatus::Unsolved
    }

    fn check_infeasibility(
        &mut self,
        residuals: &DefaultResiduals<T>,
        settings: &DefaultSettings<T>,
    ) -> bool {
        let r = residuals;

        // primal infeasibility: the dual direction is an unbounded ray of
        // the dual problem
        let nrm = r.cert_primal_norm;
        if nrm > T::zero()
            && r.cert_primal_res <= settings.eps_primal_inf * nrm
            && r.cert_primal_support < -settings.eps_primal_inf * nrm
        {
            self.status = SolverStatus::PrimalInfeasible;
            return true;
        }

        // dual infeasibility: the primal direction is a descent ray that
        // remains (asymptotically) feasible
        let ndx = r.cert_dual_norm_dx;
        let tol = settings.eps_dual_inf * ndx;
        if ndx > T::zero()
            && r.cert_dual_dot_cdx < -tol
            && r.cert_dual_res_Pdx <= tol
            && r.cert_dual_res_Adx <= tol
            && r.cert_dual_max_Gdx <= tol
            && r.cert_dual_max_dx_ub <= tol
            && r.cert_dual_min_dx_lb >= -tol
        {
            self.status = SolverStatus::DualInfeasible;
            return true;
        }

        false
    }

    fn save_scalars(&mut self, μ: T, α: T, σ: T, iter: u32) {
        self.mu = μ;
        self.step_length = α;
        self.sigma = σ;
        self.iterations = iter;
    }

    fn rho(&self) -> T {
        self.rho
    }

    fn delta(&self) -> T {
        self.delta
    }

    fn inflate_regularization(&mut self, factor: T) {
        self.rho *= factor;
        self.delta *= factor;
    }

    fn update_regularization(&mut self, settings: &DefaultSettings<T>) {
        let shrink: T = REG_SHRINK.as_T();
        let floor = settings.reg_lower_limit;

        // ρ pairs with the stationarity (dual) residual, δ with the
        // primal one; each shrinks only when its residual decreased
        // sufficiently over the last step
        if self.res_dual <= settings.reduction_ratio * self.prev_res_dual {
            self.rho = T::max(floor, self.rho * shrink);
        }
        if self.res_primal <= settings.reduction_ratio * self.prev_res_primal {
            self.delta = T::max(floor, self.delta * shrink);
        }
    }

    fn get_status(&self) -> SolverStatus {
        self.status
    }

    fn set_status(&mut self, status: SolverStatus) {
        self.status = status;
    }
}
