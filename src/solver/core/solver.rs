use super::traits::*;
use crate::algebra::*;
use crate::timers::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ---------------------------------
// Solver status type
// ---------------------------------

/// Status codes reported by the solver.  The discriminants are stable
/// and match the conventional integer codes of this solver family.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(i32)]
pub enum SolverStatus {
    /// Problem solved to tolerance
    Solved = 1,
    /// Iteration limit reached before convergence
    MaxIterations = -1,
    /// The problem is primal infeasible (certificate found)
    PrimalInfeasible = -2,
    /// The problem is dual infeasible (certificate found)
    DualInfeasible = -3,
    /// The factorization failed repeatedly or the iteration broke down
    NumericalError = -8,
    /// Solver has not been run yet
    #[default]
    Unsolved = -9,
    /// Settings failed validation
    InvalidSettings = -10,
}

impl SolverStatus {
    /// true for the two infeasibility certificate outcomes
    pub fn is_infeasible(&self) -> bool {
        matches!(
            self,
            SolverStatus::PrimalInfeasible | SolverStatus::DualInfeasible
        )
    }
}

impl std::fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[test]
fn test_status_codes_are_stable() {
    // these integer codes are part of the public contract
    assert_eq!(SolverStatus::Solved as i32, 1);
    assert_eq!(SolverStatus::MaxIterations as i32, -1);
    assert_eq!(SolverStatus::PrimalInfeasible as i32, -2);
    assert_eq!(SolverStatus::DualInfeasible as i32, -3);
    assert_eq!(SolverStatus::NumericalError as i32, -8);
    assert_eq!(SolverStatus::Unsolved as i32, -9);
    assert_eq!(SolverStatus::InvalidSettings as i32, -10);
}

// ---------------------------------
// top level solver container type
// ---------------------------------

/// Assembles the component types of a solver implementation.  Users should
/// interact with the type alias
/// [`DefaultSolver`](crate::solver::DefaultSolver).
pub struct Solver<D, V, R, K, I, SO, SE> {
    pub data: D,
    pub variables: V,
    pub residuals: R,
    pub kktsystem: K,
    pub step_lhs: V,
    pub step_rhs: V,
    pub info: I,
    pub solution: SO,
    pub settings: SE,
    pub timers: Option<Timers>,
}

fn _print_banner(is_verbose: bool) {
    if !is_verbose {
        return;
    }
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    println!("-------------------------------------------------------------");
    println!("            proxip v{}  -  proximal interior point", VERSION);
    println!("-------------------------------------------------------------");
}

// inflation applied to (ρ, δ) when a factorization fails
const REG_INFLATE_FACTOR: f64 = 10.;

// ---------------------------------
// IPSolver trait and its standard implementation.
// ---------------------------------

/// An interior point solver implementing the outer proximal loop.
pub trait IPSolver<T, D, V, R, K, I, SO, SE> {
    /// Run the solver to a terminal status.
    fn solve(&mut self);

    /// Compute an initial iterate.  Returns false on numerical failure.
    fn default_start(&mut self) -> bool;

    /// Mehrotra centering parameter from the affine step.
    fn centering_parameter(&self, α_affine: T, μ: T) -> T;
}

impl<T, D, V, R, K, I, SO, SE> IPSolver<T, D, V, R, K, I, SO, SE>
    for Solver<D, V, R, K, I, SO, SE>
where
    T: FloatT,
    D: ProblemData<T, V = V, SE = SE>,
    V: Variables<T, D = D, R = R, SE = SE>,
    R: Residuals<T, D = D, V = V>,
    K: KKTSystem<T, D = D, V = V, SE = SE>,
    I: Info<T, D = D, V = V, R = R, SE = SE>,
    SO: Solution<T, D = D, V = V, I = I, SE = SE>,
    SE: Settings<T>,
{
    fn solve(&mut self) {
        // slack/dual floor applied to warm starts
        let warm_floor: T = (1e-6).as_T();

        //take the timers out of their Option slot for the duration of
        //the solve, so that borrowing them does not conflict with the
        //other fields
        let mut timers = self.timers.take().unwrap();

        let warm_start = self.info.get_status() != SolverStatus::Unsolved
            && self.info.get_status() != SolverStatus::NumericalError;

        self.info.reset(&mut timers, &self.settings);

        notimeit! {timers; {
            _print_banner(self.settings.core().verbose);
            let _ = self.info.print_configuration(&self.settings, &self.data);
            let _ = self.info.print_status_header(&self.settings);
        }}

        timeit! {timers => "solve"; {

        // get a starting iterate
        // ----------
        let mut is_ok = true;
        timeit!{timers => "initialization"; {
            if warm_start {
                self.variables.project_interior(warm_floor);
            } else {
                is_ok = self.default_start();
            }
        }}

        if !is_ok {
            self.info.set_status(SolverStatus::NumericalError);
        }

        timeit!{timers => "IP iteration"; {

        // ----------
        // main loop
        // ----------

        let mut iter: u32 = 0;
        while is_ok {
            //update the residuals
            //--------------
            self.residuals.update(&self.variables, &self.data);

            //calculate complementarity gap (scaled)
            //--------------
            let μ = self.variables.calc_mu(&self.residuals);

            // termination and certificate checks, progress printing
            // --------------
            self.info
                .update(&self.data, &self.variables, &self.residuals, μ, &timers);

            let isdone = self.info.check_termination(&self.residuals, &self.settings, iter);

            iter += 1;
            notimeit!{timers; {
                let _ = self.info.print_status(&self.settings);
            }}
            if isdone {
                break;
            }

            // update the scalings and refactor, inflating the
            // regularization pair on failure
            // --------------
            timeit!{timers => "kkt update"; {
                is_ok = self.kktsystem.update(
                    &self.data,
                    &self.variables,
                    self.info.rho(),
                    self.info.delta(),
                );
                let mut ntries: u32 = 0;
                while !is_ok && ntries < self.settings.core().reg_finetune_max_iter {
                    self.info.inflate_regularization(REG_INFLATE_FACTOR.as_T());
                    is_ok = self.kktsystem.update(
                        &self.data,
                        &self.variables,
                        self.info.rho(),
                        self.info.delta(),
                    );
                    ntries += 1;
                }
            }}
            if !is_ok {
                self.info.set_status(SolverStatus::NumericalError);
                break;
            }

            // calculate the affine (predictor) step
            // --------------
            self.step_rhs
                .affine_step_rhs(&self.residuals, &self.variables);

            timeit!{timers => "kkt solve"; {
                self.kktsystem.solve(
                    &mut self.step_lhs,
                    &self.step_rhs,
                    &self.data,
                    &self.settings,
                );
            }}

            //distance to the cone boundary sets the centering need
            // --------------
            let α_affine = self.variables.calc_step_length(&self.step_lhs);
            let σ = self.centering_parameter(α_affine, μ);

            // calculate the combined (corrector) step
            // --------------
            self.step_rhs.combined_step_rhs(
                &self.residuals,
                &self.variables,
                &self.step_lhs,
                σ,
                μ,
            );

            timeit!{timers => "kkt solve"; {
                self.kktsystem.solve(
                    &mut self.step_lhs,
                    &self.step_rhs,
                    &self.data,
                    &self.settings,
                );
            }}

            // check the infeasibility certificates on the step direction
            // --------------
            self.residuals.update_certificates(&self.step_lhs, &self.data);
            if self.info.check_infeasibility(&self.residuals, &self.settings) {
                break;
            }

            // final step length.  The fraction-to-boundary factor is
            // relaxed toward one as the gap closes.
            // --------------
            let mut α = self.variables.calc_step_length(&self.step_lhs);
            let τ = T::min(
                (0.9995).as_T(),
                T::max(self.settings.core().max_step_fraction, T::one() - μ),
            );
            α *= τ;

            self.variables.add_step(&self.step_lhs, α);

            //keep this iteration's scalars for printing and reporting
            self.info.save_scalars(μ, α, σ, iter);

            // shrink the proximal regularization pair if the residuals
            // decreased sufficiently
            self.info.update_regularization(&self.settings);
        } //end loop
        // ----------
        // ----------

        }} //end "IP iteration" timer

        }} // end "solve" timer

        //unscale and store the user facing solution
        self.info.finalize(&mut timers);
        self.solution
            .post_process(&self.data, &self.variables, &self.info, &self.settings);
        self.solution.finalize(&self.info);

        //return the timers to their slot
        self.timers.replace(timers);

        let _ = self.info.print_footer(&self.settings);

        if self.settings.core().verbose && self.settings.core().compute_timings {
            self.timers.as_ref().unwrap().print();
        }
    }

    fn default_start(&mut self) -> bool {
        // factor with unit slack/dual scalings and solve for a primal/dual
        // starting point, then shift the slack and dual families into the
        // strict interior
        let is_ok = self.kktsystem.solve_initial_point(
            &mut self.variables,
            &self.data,
            self.info.rho(),
            self.info.delta(),
        );
        self.variables.shift_interior();
        is_ok
    }

    fn centering_parameter(&self, α_affine: T, μ: T) -> T {
        if μ <= T::zero() {
            return T::zero();
        }
        let μ_affine = self.variables.mu_shifted(&self.step_lhs, α_affine);
        T::powi((μ_affine / μ).clip(T::zero(), T::one()), 3)
    }
}
