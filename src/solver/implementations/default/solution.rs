use super::*;
use crate::algebra::*;
use crate::solver::core::{traits::Solution, SolverStatus};

/// Standard-form solver solution implementing the
/// [`Solution`](crate::solver::traits::Solution) trait.
///
/// All fields are unscaled back to the user's data.  The box dual and
/// slack vectors have full length `n`: entries for absent (infinite)
/// bounds report a zero dual and an infinite slack.
#[derive(Debug)]
pub struct DefaultSolution<T> {
    /// primal solution
    pub x: Vec<T>,
    /// equality duals
    pub y: Vec<T>,
    /// inequality duals
    pub z: Vec<T>,
    /// lower box duals
    pub z_lb: Vec<T>,
    /// upper box duals
    pub z_ub: Vec<T>,
    /// inequality slacks
    pub s: Vec<T>,
    /// lower box slacks
    pub s_lb: Vec<T>,
    /// upper box slacks
    pub s_ub: Vec<T>,
    /// final solver status
    pub status: SolverStatus,
    /// primal objective value
    pub obj_val: T,
    /// dual objective value
    pub obj_val_dual: T,
    /// solve time in seconds
    pub solve_time: f64,
    /// number of iterations
    pub iterations: u32,
    /// primal residual
    pub r_prim: T,
    /// dual residual
    pub r_dual: T,
}

impl<T> DefaultSolution<T>
where
    T: FloatT,
{
    /// Create a new `DefaultSolution` object
    pub fn new(n: usize, p: usize, m: usize) -> Self {
        Self {
            x: vec![T::zero(); n],
            y: vec![T::zero(); p],
            z: vec![T::zero(); m],
            z_lb: vec![T::zero(); n],
            z_ub: vec![T::zero(); n],
            s: vec![T::zero(); m],
            s_lb: vec![T::zero(); n],
            s_ub: vec![T::zero(); n],
            status: SolverStatus::Unsolved,
            obj_val: T::nan(),
            obj_val_dual: T::nan(),
            solve_time: 0f64,
            iterations: 0,
            r_prim: T::nan(),
            r_dual: T::nan(),
        }
    }
}

impl<T> Solution<T> for DefaultSolution<T>
where
    T: FloatT,
{
    type D = DefaultProblemData<T>;
    type V = DefaultVariables<T>;
    type I = DefaultInfo<T>;
    type SE = DefaultSettings<T>;

    fn post_process(
        &mut self,
        data: &DefaultProblemData<T>,
        variables: &DefaultVariables<T>,
        info: &DefaultInfo<T>,
        _settings: &DefaultSettings<T>,
    ) {
        self.status = info.status;

        if info.status.is_infeasible() {
            self.obj_val = T::nan();
            self.obj_val_dual = T::nan();
        } else {
            self.obj_val = info.cost_primal;
            self.obj_val_dual = info.cost_dual;
        }

        self.iterations = info.iterations;
        self.r_prim = info.res_primal;
        self.r_dual = info.res_dual;

        // unscale the variables back to the user's problem.  The internal
        // (scaled) iterate is left untouched so that subsequent solves can
        // warm start from it.
        let equil = &data.equilibration;
        let cinv = T::recip(equil.c);

        for (i, x) in self.x.iter_mut().enumerate() {
            *x = variables.x[i] * equil.d[i];
        }
        for (i, y) in self.y.iter_mut().enumerate() {
            *y = variables.y[i] * equil.e[i] * cinv;
        }
        for (i, z) in self.z.iter_mut().enumerate() {
            *z = variables.z[i] * equil.f[i] * cinv;
        }
        for (i, s) in self.s.iter_mut().enumerate() {
            *s = variables.s[i] * equil.finv[i];
        }

        // box components expand back to full length
        self.z_lb.set(T::zero());
        self.z_ub.set(T::zero());
        self.s_lb.set(T::infinity());
        self.s_ub.set(T::infinity());
        for (k, &j) in data.lb_idx.iter().enumerate() {
            self.z_lb[j] = variables.z_lb[k] * equil.dinv[j] * cinv;
            self.s_lb[j] = variables.s_lb[k] * equil.d[j];
        }
        for (k, &j) in data.ub_idx.iter().enumerate() {
            self.z_ub[j] = variables.z_ub[k] * equil.dinv[j] * cinv;
            self.s_ub[j] = variables.s_ub[k] * equil.d[j];
        }
    }

    fn finalize(&mut self, info: &DefaultInfo<T>) {
        self.solve_time = info.solve_time;
    }
}
