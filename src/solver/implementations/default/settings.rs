use crate::algebra::*;
use crate::solver::core::traits::Settings;
use derive_builder::Builder;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Selects the KKT backend and, for the sparse backends, the elimination
/// structure of the factored system.  Fewer eliminations are more stable;
/// more eliminations give smaller, often faster factorizations.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum KktSolverKind {
    /// dense LDLᵀ of the full 3x3 block system
    DenseCholesky,
    /// sparse LDLᵀ of the full 3x3 block system
    #[default]
    SparseLdlt,
    /// sparse LDLᵀ with the equality block eliminated
    SparseLdltEqElim,
    /// sparse LDLᵀ with the inequality and box blocks eliminated
    SparseLdltIneqElim,
    /// sparse LDLᵀ of the reduced normal-equations form
    SparseLdltAllElim,
}

/// Standard-form solver settings, implementing the
/// [`Settings`](crate::solver::traits::Settings) trait
///
/// Use the [`DefaultSettingsBuilder`] to build sets of settings
/// field-by-field, or start from `DefaultSettings::default()`.

#[derive(Builder, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DefaultSettings<T: FloatT> {
    ///maximum number of outer iterations
    #[builder(default = "250")]
    pub max_iter: u32,

    ///verbose printing
    #[builder(default = "false")]
    pub verbose: bool,

    ///measure and report setup/solve timings
    #[builder(default = "false")]
    pub compute_timings: bool,

    ///absolute feasibility tolerance
    #[builder(default = "(1e-8).as_T()")]
    pub eps_abs: T,

    ///relative feasibility tolerance
    #[builder(default = "(1e-9).as_T()")]
    pub eps_rel: T,

    ///absolute duality gap tolerance
    #[builder(default = "(1e-8).as_T()")]
    pub eps_duality_gap_abs: T,

    ///relative duality gap tolerance
    #[builder(default = "(1e-9).as_T()")]
    pub eps_duality_gap_rel: T,

    ///primal infeasibility certificate tolerance
    #[builder(default = "(1e-9).as_T()")]
    pub eps_primal_inf: T,

    ///dual infeasibility certificate tolerance
    #[builder(default = "(1e-9).as_T()")]
    pub eps_dual_inf: T,

    ///initial primal proximal regularization ρ
    #[builder(default = "(1e-6).as_T()")]
    pub rho_init: T,

    ///initial dual proximal regularization δ
    #[builder(default = "(1e-4).as_T()")]
    pub delta_init: T,

    ///floor for the proximal regularization pair
    #[builder(default = "(1e-10).as_T()")]
    pub reg_lower_limit: T,

    ///pivot threshold for dynamic regularization in the factorization
    #[builder(default = "(1e-13).as_T()")]
    pub reg_finetune_lower_limit: T,

    ///replacement magnitude for dynamically regularized pivots
    #[builder(default = "(2e-7).as_T()")]
    pub reg_finetune_delta: T,

    ///factorization retries (with inflated ρ, δ) before giving up
    #[builder(default = "5")]
    pub reg_finetune_max_iter: u32,

    ///required residual decrease ratio before ρ or δ is shrunk
    #[builder(default = "(0.5).as_T()")]
    pub reduction_ratio: T,

    ///maximum interior point step fraction-to-boundary
    #[builder(default = "(0.99).as_T()")]
    pub max_step_fraction: T,

    ///KKT direct solve with iterative refinement
    #[builder(default = "true")]
    pub iterative_refinement_enable: bool,

    ///iterative refinement maximum correction sweeps
    #[builder(default = "10")]
    pub iterative_refinement_max_iter: u32,

    ///required error-reduction factor for a refinement sweep to be kept
    #[builder(default = "(5.0).as_T()")]
    pub iterative_refinement_min_improvement_rate: T,

    ///iterative refinement absolute exit tolerance
    #[builder(default = "(1e-12).as_T()")]
    pub iterative_refinement_abs_tol: T,

    ///iterative refinement relative exit tolerance
    #[builder(default = "(1e-12).as_T()")]
    pub iterative_refinement_rel_tol: T,

    ///enable data equilibration pre-scaling
    #[builder(default = "true")]
    pub equilibrate_enable: bool,

    ///maximum equilibration scaling iterations
    #[builder(default = "10")]
    pub equilibrate_max_iter: u32,

    ///minimum equilibration scaling allowed
    #[builder(default = "(1e-4).as_T()")]
    pub equilibrate_min_scaling: T,

    ///maximum equilibration scaling allowed
    #[builder(default = "(1e+4).as_T()")]
    pub equilibrate_max_scaling: T,

    ///KKT backend and elimination mode
    #[builder(default = "KktSolverKind::default()")]
    pub kkt_solver: KktSolverKind,
}

impl<T> Default for DefaultSettings<T>
where
    T: FloatT,
{
    fn default() -> DefaultSettings<T> {
        DefaultSettingsBuilder::<T>::default().build().unwrap()
    }
}

impl<T> Settings<T> for DefaultSettings<T>
where
    T: FloatT,
{
    fn core(&self) -> &DefaultSettings<T> {
        self
    }
    fn core_mut(&mut self) -> &mut DefaultSettings<T> {
        self
    }
}

/// Manual settings validation, applied at solver setup.
impl<T> DefaultSettings<T>
where
    T: FloatT,
{
    /// Checks that the settings are valid
    pub fn validate(&self) -> Result<(), String> {
        if self.max_iter == 0 {
            return Err("max_iter must be nonzero".to_string());
        }

        let nonnegative: [(T, &str); 8] = [
            (self.eps_abs, "eps_abs"),
            (self.eps_rel, "eps_rel"),
            (self.eps_duality_gap_abs, "eps_duality_gap_abs"),
            (self.eps_duality_gap_rel, "eps_duality_gap_rel"),
            (self.eps_primal_inf, "eps_primal_inf"),
            (self.eps_dual_inf, "eps_dual_inf"),
            (self.reg_finetune_lower_limit, "reg_finetune_lower_limit"),
            (self.iterative_refinement_abs_tol, "iterative_refinement_abs_tol"),
        ];
        for (v, name) in nonnegative {
            if !(v >= T::zero()) || !v.is_finite() {
                return Err(format!("{} must be nonnegative and finite", name));
            }
        }

        let positive: [(T, &str); 5] = [
            (self.rho_init, "rho_init"),
            (self.delta_init, "delta_init"),
            (self.reg_lower_limit, "reg_lower_limit"),
            (self.reg_finetune_delta, "reg_finetune_delta"),
            (self.iterative_refinement_min_improvement_rate, "iterative_refinement_min_improvement_rate"),
        ];
        for (v, name) in positive {
            if !(v > T::zero()) || !v.is_finite() {
                return Err(format!("{} must be positive and finite", name));
            }
        }

        if !(self.max_step_fraction > T::zero() && self.max_step_fraction < T::one()) {
            return Err("max_step_fraction must lie in (0,1)".to_string());
        }
        if !(self.reduction_ratio > T::zero() && self.reduction_ratio <= T::one()) {
            return Err("reduction_ratio must lie in (0,1]".to_string());
        }
        if !(self.equilibrate_min_scaling > T::zero()
            && self.equilibrate_max_scaling >= self.equilibrate_min_scaling)
        {
            return Err("equilibration scaling bounds are inconsistent".to_string());
        }

        Ok(())
    }
}

#[test]
fn test_settings_validate() {
    // all standard settings
    assert!(DefaultSettings::<f64>::default().validate().is_ok());

    // fail on a negative tolerance
    let mut settings = DefaultSettings::<f64>::default();
    settings.eps_abs = -1e-8;
    assert!(settings.validate().is_err());

    // fail on a zero regularization start
    let mut settings = DefaultSettings::<f64>::default();
    settings.rho_init = 0.;
    assert!(settings.validate().is_err());

    // fail on a bad step fraction
    let mut settings = DefaultSettings::<f64>::default();
    settings.max_step_fraction = 1.5;
    assert!(settings.validate().is_err());

    // builder produces the same defaults
    let built = DefaultSettingsBuilder::<f64>::default()
        .max_iter(100u32)
        .build()
        .unwrap();
    assert_eq!(built.max_iter, 100);
    assert!(built.validate().is_ok());
}
