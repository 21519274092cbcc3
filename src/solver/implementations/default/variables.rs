use super::*;
use crate::algebra::*;
use crate::solver::core::traits::Variables;
use std::iter::zip;

// ---------------
// Variables type for the standard QP problem format
// ---------------

/// Standard-form primal-dual variables implementing the
/// [`Variables`](crate::solver::traits::Variables) trait.
///
/// The box components are compacted: `z_lb`, `z_ub`, `s_lb` and `s_ub`
/// carry entries only for the variables with finite bounds.
#[derive(Debug, Clone)]
pub struct DefaultVariables<T> {
    /// primal variables
    pub x: Vec<T>,
    /// equality duals
    pub y: Vec<T>,
    /// inequality duals
    pub z: Vec<T>,
    /// lower box duals (compacted)
    pub z_lb: Vec<T>,
    /// upper box duals (compacted)
    pub z_ub: Vec<T>,
    /// inequality slacks
    pub s: Vec<T>,
    /// lower box slacks (compacted)
    pub s_lb: Vec<T>,
    /// upper box slacks (compacted)
    pub s_ub: Vec<T>,
}

impl<T> DefaultVariables<T>
where
    T: FloatT,
{
    pub fn new(n: usize, p: usize, m: usize, n_lb: usize, n_ub: usize) -> Self {
        Self {
            x: vec![T::zero(); n],
            y: vec![T::zero(); p],
            z: vec![T::zero(); m],
            z_lb: vec![T::zero(); n_lb],
            z_ub: vec![T::zero(); n_ub],
            s: vec![T::zero(); m],
            s_lb: vec![T::zero(); n_lb],
            s_ub: vec![T::zero(); n_ub],
        }
    }

    /// total number of complementarity pairs
    pub fn degree(&self) -> usize {
        self.s.len() + self.s_lb.len() + self.s_ub.len()
    }

    // maximum feasible step length for a single positive family
    fn family_step_length(v: &[T], dv: &[T], α: T) -> T {
        zip(v, dv).fold(α, |α, (&v, &dv)| {
            if dv < T::zero() {
                T::min(α, -v / dv)
            } else {
                α
            }
        })
    }

    // shift a slack/dual family so that its smallest entry is at least one
    fn family_shift(a: &mut [T], b: &mut [T], c: &mut [T]) {
        let mut mv = T::infinity();
        for v in a.iter().chain(b.iter()).chain(c.iter()) {
            mv = T::min(mv, *v);
        }
        if mv < T::one() && mv.is_finite() {
            let shift = T::one() - mv;
            a.translate(shift);
            b.translate(shift);
            c.translate(shift);
        }
    }
}

impl<T> Variables<T> for DefaultVariables<T>
where
    T: FloatT,
{
    type D = DefaultProblemData<T>;
    type R = DefaultResiduals<T>;
    type SE = DefaultSettings<T>;

    fn calc_mu(&mut self, residuals: &DefaultResiduals<T>) -> T {
        let degree = self.degree();
        if degree == 0 {
            T::zero()
        } else {
            residuals.dot_gap / T::from_usize(degree).unwrap()
        }
    }

    fn mu_shifted(&self, step: &Self, α: T) -> T {
        let degree = self.degree();
        if degree == 0 {
            return T::zero();
        }

        let dot = <[T] as VectorMath<T>>::dot_shifted(&self.z, &self.s, &step.z, &step.s, α)
            + <[T] as VectorMath<T>>::dot_shifted(&self.z_lb, &self.s_lb, &step.z_lb, &step.s_lb, α)
            + <[T] as VectorMath<T>>::dot_shifted(&self.z_ub, &self.s_ub, &step.z_ub, &step.s_ub, α);

        dot / T::from_usize(degree).unwrap()
    }

    fn affine_step_rhs(&mut self, residuals: &DefaultResiduals<T>, variables: &Self) {
        // negated residuals of the perturbed KKT conditions, with a
        // zero complementarity target
        self.x.scalarop_from(|r| -r, &residuals.r_d);
        self.y.scalarop_from(|r| -r, &residuals.r_eq);
        self.z.scalarop_from(|r| -r, &residuals.r_in);
        self.z_lb.scalarop_from(|r| -r, &residuals.r_lb);
        self.z_ub.scalarop_from(|r| -r, &residuals.r_ub);

        for (r, (&s, &z)) in zip(
            self.s.iter_mut(),
            zip(variables.s.iter(), variables.z.iter()),
        ) {
            *r = -s * z;
        }
        for (r, (&s, &z)) in zip(
            self.s_lb.iter_mut(),
            zip(variables.s_lb.iter(), variables.z_lb.iter()),
        ) {
            *r = -s * z;
        }
        for (r, (&s, &z)) in zip(
            self.s_ub.iter_mut(),
            zip(variables.s_ub.iter(), variables.z_ub.iter()),
        ) {
            *r = -s * z;
        }
    }

    fn combined_step_rhs(
        &mut self,
        residuals: &DefaultResiduals<T>,
        variables: &Self,
        step: &Self,
        σ: T,
        μ: T,
    ) {
        // the linear residual parts match the affine RHS; the
        // complementarity target gains the centering term and the
        // Mehrotra correction from the affine step
        self.x.scalarop_from(|r| -r, &residuals.r_d);
        self.y.scalarop_from(|r| -r, &residuals.r_eq);
        self.z.scalarop_from(|r| -r, &residuals.r_in);
        self.z_lb.scalarop_from(|r| -r, &residuals.r_lb);
        self.z_ub.scalarop_from(|r| -r, &residuals.r_ub);

        let σμ = σ * μ;

        for (i, r) in self.s.iter_mut().enumerate() {
            *r = σμ - variables.s[i] * variables.z[i] - step.s[i] * step.z[i];
        }
        for (k, r) in self.s_lb.iter_mut().enumerate() {
            *r = σμ - variables.s_lb[k] * variables.z_lb[k] - step.s_lb[k] * step.z_lb[k];
        }
        for (k, r) in self.s_ub.iter_mut().enumerate() {
            *r = σμ - variables.s_ub[k] * variables.z_ub[k] - step.s_ub[k] * step.z_ub[k];
        }
    }

    fn calc_step_length(&self, step: &Self) -> T {
        let mut α = T::one();
        α = Self::family_step_length(&self.s, &step.s, α);
        α = Self::family_step_length(&self.s_lb, &step.s_lb, α);
        α = Self::family_step_length(&self.s_ub, &step.s_ub, α);
        α = Self::family_step_length(&self.z, &step.z, α);
        α = Self::family_step_length(&self.z_lb, &step.z_lb, α);
        α = Self::family_step_length(&self.z_ub, &step.z_ub, α);
        α
    }

    fn add_step(&mut self, step: &Self, α: T) {
        self.x.axpby(α, &step.x, T::one());
        self.y.axpby(α, &step.y, T::one());
        self.z.axpby(α, &step.z, T::one());
        self.z_lb.axpby(α, &step.z_lb, T::one());
        self.z_ub.axpby(α, &step.z_ub, T::one());
        self.s.axpby(α, &step.s, T::one());
        self.s_lb.axpby(α, &step.s_lb, T::one());
        self.s_ub.axpby(α, &step.s_ub, T::one());
    }

    fn shift_interior(&mut self) {
        // shift the slack and dual families (jointly within each group) so
        // that every complementarity pair starts strictly positive
        let Self {
            s, s_lb, s_ub, z, z_lb, z_ub, ..
        } = self;
        Self::family_shift(s, s_lb, s_ub);
        Self::family_shift(z, z_lb, z_ub);
    }

    fn project_interior(&mut self, floor: T) {
        let inf = T::infinity();
        self.s.clip(floor, inf);
        self.s_lb.clip(floor, inf);
        self.s_ub.clip(floor, inf);
        self.z.clip(floor, inf);
        self.z_lb.clip(floor, inf);
        self.z_ub.clip(floor, inf);
    }

    fn copy_from(&mut self, src: &Self) {
        self.x.copy_from(&src.x);
        self.y.copy_from(&src.y);
        self.z.copy_from(&src.z);
        self.z_lb.copy_from(&src.z_lb);
        self.z_ub.copy_from(&src.z_ub);
        self.s.copy_from(&src.s);
        self.s_lb.copy_from(&src.s_lb);
        self.s_ub.copy_from(&src.s_ub);
    }
}
