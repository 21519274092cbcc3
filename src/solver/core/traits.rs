//! Required traits for types providing a proxip solver implementation.
//!
//! This module defines the core traits that must be implemented by a
//! collection of mutually associated data types to make a solver for a
//! particular problem format.
//!
//! In nearly all cases there is no need for a user to implement these
//! traits.  Instead, users should use the collection of types provided in
//! the default implementation, which collectively implement support for
//! the standard QP problem format described in the top level crate
//! documentation.

use super::SolverStatus;
use crate::algebra::*;
use crate::timers::*;

/// Data for a quadratic program.

pub trait ProblemData<T: FloatT> {
    type V: Variables<T>;
    type SE: Settings<T>;

    /// Equilibrate internal data before the solver starts.
    fn equilibrate(&mut self, settings: &Self::SE);
}

/// Primal-dual variables (and slacks) for a quadratic program.

pub trait Variables<T: FloatT> {
    type D: ProblemData<T>;
    type R: Residuals<T>;
    type SE: Settings<T>;

    /// Compute the scaled duality gap from the current complementarity products.
    fn calc_mu(&mut self, residuals: &Self::R) -> T;

    /// Complementarity gap that would result from a step of length `α`.
    fn mu_shifted(&self, step: &Self, α: T) -> T;

    /// Compute the KKT RHS for a pure Newton (affine) step.
    fn affine_step_rhs(&mut self, residuals: &Self::R, variables: &Self);

    /// Compute the KKT RHS for the combined centering/corrector step.
    fn combined_step_rhs(
        &mut self,
        residuals: &Self::R,
        variables: &Self,
        step: &Self,
        σ: T,
        μ: T,
    );

    /// Compute the maximum step length possible in the given step
    /// direction without violating positivity of slacks and duals.
    fn calc_step_length(&self, step_lhs: &Self) -> T;

    /// Take a step of length `α` in the given direction.
    fn add_step(&mut self, step_lhs: &Self, α: T);

    /// Shift the slack and dual families into the strict interior.
    fn shift_interior(&mut self);

    /// Clip the slack and dual families from below, e.g. for warm starts.
    fn project_interior(&mut self, floor: T);

    /// Overwrite every component with the values of `src`.
    fn copy_from(&mut self, src: &Self);
}

/// Residuals of the perturbed optimality conditions.

pub trait Residuals<T: FloatT> {
    type D: ProblemData<T>;
    type V: Variables<T>;

    /// Recompute all residuals at the given variables.
    fn update(&mut self, variables: &Self::V, data: &Self::D);

    /// Compute the products with a candidate step direction used by the
    /// primal/dual infeasibility certificates.
    fn update_certificates(&mut self, step: &Self::V, data: &Self::D);
}

/// KKT linear solver object.

pub trait KKTSystem<T: FloatT> {
    type D: ProblemData<T>;
    type V: Variables<T>;
    type SE: Settings<T>;

    /// Update the KKT system for a new iterate and regularization pair
    /// and refactor.  Returns false on factorization failure.
    fn update(&mut self, data: &Self::D, variables: &Self::V, ρ: T, δ: T) -> bool;

    /// Solve the KKT system for the given right-hand side.
    fn solve(
        &mut self,
        step_lhs: &mut Self::V,
        step_rhs: &Self::V,
        data: &Self::D,
        settings: &Self::SE,
    );

    /// Find an interior-point starting condition.  Returns false on
    /// factorization failure.
    fn solve_initial_point(
        &mut self,
        variables: &mut Self::V,
        data: &Self::D,
        ρ: T,
        δ: T,
    ) -> bool;
}

/// Printing functions for the solver's Info

pub trait InfoPrint<T>
where
    T: FloatT,
{
    type D: ProblemData<T>;
    type SE: Settings<T>;

    /// Print the problem dimensions and settings once, before the
    /// first iteration.
    fn print_configuration(&self, settings: &Self::SE, data: &Self::D) -> std::io::Result<()>;

    /// Print the column headers of the per-iteration progress table.
    fn print_status_header(&self, settings: &Self::SE) -> std::io::Result<()>;

    /// Print one row of progress information per iteration.
    fn print_status(&self, settings: &Self::SE) -> std::io::Result<()>;

    /// Print the terminal status and exit summary once the solve ends.
    fn print_footer(&self, settings: &Self::SE) -> std::io::Result<()>;
}

/// Internal information for the solver to monitor progress and check for
/// termination, and the holder of the proximal regularization pair.

pub trait Info<T>: InfoPrint<T>
where
    T: FloatT,
{
    type V: Variables<T>;
    type R: Residuals<T>;

    /// Reset internal data, particularly solve timers, and restore the
    /// initial regularization pair.
    fn reset(&mut self, timers: &mut Timers, settings: &Self::SE);

    /// Fill in values that are only known at solver termination.
    fn finalize(&mut self, timers: &mut Timers);

    /// Refresh progress information from the current iterate.
    fn update(
        &mut self,
        data: &Self::D,
        variables: &Self::V,
        residuals: &Self::R,
        μ: T,
        timers: &Timers,
    );

    /// Returns `true` once a terminal status has been established.
    fn check_termination(&mut self, residuals: &Self::R, settings: &Self::SE, iter: u32) -> bool;

    /// Check the infeasibility certificates on a candidate step
    /// direction.  Sets a terminal status and returns `true` on
    /// detection.
    fn check_infeasibility(&mut self, residuals: &Self::R, settings: &Self::SE) -> bool;

    /// Record the scalars chosen by the driver this iteration: the
    /// complementarity gap `μ`, step length `α` and centering `σ`.
    fn save_scalars(&mut self, μ: T, α: T, σ: T, iter: u32);

    /// Current proximal regularization pair.
    fn rho(&self) -> T;
    fn delta(&self) -> T;

    /// Inflate the regularization pair after a factorization failure.
    fn inflate_regularization(&mut self, factor: T);

    /// Shrink the regularization pair toward its floor, gated on
    /// sufficient residual decrease.
    fn update_regularization(&mut self, settings: &Self::SE);

    /// Current termination status.
    fn get_status(&self) -> SolverStatus;
    fn set_status(&mut self, status: SolverStatus);
}

/// Solution for a quadratic program.

pub trait Solution<T: FloatT> {
    type D: ProblemData<T>;
    type V: Variables<T>;
    type I;
    type SE: Settings<T>;

    /// Compute the (unscaled) solution from the variables at solver
    /// termination.
    fn post_process(
        &mut self,
        data: &Self::D,
        variables: &Self::V,
        info: &Self::I,
        settings: &Self::SE,
    );

    /// Record final timing information.
    fn finalize(&mut self, info: &Self::I);
}

/// Settings for a quadratic program solver.
///
/// Implementors of this trait can define any internal or problem specific
/// settings they wish.   They must, however, also maintain a settings
/// object of type [`DefaultSettings`](crate::solver::DefaultSettings) and
/// return this to the solver internally.

pub trait Settings<T: FloatT> {
    /// The standard settings object carried by this implementation.
    fn core(&self) -> &crate::solver::DefaultSettings<T>;

    /// Mutable access to the standard settings object.
    fn core_mut(&mut self) -> &mut crate::solver::DefaultSettings<T>;
}
