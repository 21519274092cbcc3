use super::*;
use crate::algebra::*;
use crate::solver::core::{traits::ProblemData, Solver};
use crate::solver::utils::infbounds::get_infinity;
use crate::timers::*;
use thiserror::Error;

/// Errors reported at solver setup or on data updates.
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error("data dimension fields are incompatible: {0}")]
    IncompatibleDimensions(&'static str),
    #[error("problem data contains non-finite values")]
    NonFiniteData,
    #[error("bad sparse matrix input")]
    BadSparseFormat(#[from] SparseFormatError),
    #[error("a lower bound exceeds the matching upper bound")]
    InconsistentBounds,
    #[error("update would change which bounds are finite; a new setup is required")]
    BoundsFinitenessChanged,
    #[error("initial KKT factorization failed")]
    SetupFactorization,
}

/// Solver for problems in standard QP form

pub type DefaultSolver<T = f64> = Solver<
    DefaultProblemData<T>,
    DefaultVariables<T>,
    DefaultResiduals<T>,
    DefaultKKTSystem<T>,
    DefaultInfo<T>,
    DefaultSolution<T>,
    DefaultSettings<T>,
>;

impl<T> DefaultSolver<T>
where
    T: FloatT,
{
    /// Creates a fully configured solver workspace: copies and
    /// equilibrates the problem data, builds the KKT backend (symbolic
    /// analysis included) and sizes every iteration buffer.  No further
    /// allocation happens during `solve`.
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
        settings: DefaultSettings<T>,
    ) -> Result<Self, SolverError> {
        settings
            .validate()
            .map_err(SolverError::InvalidSettings)?;

        _check_dimensions(P, c, A, b, G, h, x_lb, x_ub)?;
        _check_data_finite(P, c, A, b, G, h, x_lb, x_ub)?;

        let mut timers = Timers::default();
        let info = DefaultInfo::<T>::new();
        let output;

        timeit! {timers => "setup"; {

        let mut data = DefaultProblemData::<T>::new(P, c, A, b, G, h, x_lb, x_ub);

        // equilibrate problem data immediately on setup.  This prevents
        // multiple equilibrations if solve is called more than once.
        timeit!{timers => "equilibration"; {
            data.equilibrate(&settings);
        }}

        let (n, p, m) = (data.n, data.p, data.m);
        let (n_lb, n_ub) = (data.n_lb(), data.n_ub());

        let variables = DefaultVariables::<T>::new(n, p, m, n_lb, n_ub);
        let residuals = DefaultResiduals::<T>::new(n, p, m, n_lb, n_ub);

        let kktsystem;
        timeit!{timers => "kkt init"; {
            kktsystem = DefaultKKTSystem::<T>::new(&data, &settings)?;
        }}

        // work variables for assembling the step direction LHS/RHS
        let step_rhs = DefaultVariables::<T>::new(n, p, m, n_lb, n_ub);
        let step_lhs = DefaultVariables::<T>::new(n, p, m, n_lb, n_ub);

        // user facing results go here
        let solution = DefaultSolution::<T>::new(n, p, m);

        output = Self {
            data,
            variables,
            residuals,
            kktsystem,
            step_lhs,
            step_rhs,
            info,
            solution,
            settings,
            timers: None,
        };

        }} //end "setup" timer

        //now that the timer is finished we can swap our
        //timer object into the solver structure
        let mut output = output;
        output.timers.replace(timers);

        Ok(output)
    }
}

#[allow(clippy::too_many_arguments)]
fn _check_dimensions<T: FloatT>(
    P: &CscMatrix<T>,
    c: &[T],
    A: &CscMatrix<T>,
    b: &[T],
    G: &CscMatrix<T>,
    h: &[T],
    x_lb: &[T],
    x_ub: &[T],
) -> Result<(), SolverError> {
    let n = c.len();

    if n == 0 {
        return Err(SolverError::IncompatibleDimensions(
            "problem must have at least one variable",
        ));
    }
    if !P.is_square() || P.ncols() != n {
        return Err(SolverError::IncompatibleDimensions(
            "P and c incompatible dimensions",
        ));
    }
    if A.ncols() != n {
        return Err(SolverError::IncompatibleDimensions(
            "A and c incompatible dimensions",
        ));
    }
    if b.len() != A.nrows() {
        return Err(SolverError::IncompatibleDimensions(
            "A and b incompatible dimensions",
        ));
    }
    if G.ncols() != n {
        return Err(SolverError::IncompatibleDimensions(
            "G and c incompatible dimensions",
        ));
    }
    if h.len() != G.nrows() {
        return Err(SolverError::IncompatibleDimensions(
            "G and h incompatible dimensions",
        ));
    }
    if x_lb.len() != n || x_ub.len() != n {
        return Err(SolverError::IncompatibleDimensions(
            "bounds and c incompatible dimensions",
        ));
    }

    P.check_format()?;
    A.check_format()?;
    G.check_format()?;

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn _check_data_finite<T: FloatT>(
    P: &CscMatrix<T>,
    c: &[T],
    A: &CscMatrix<T>,
    b: &[T],
    G: &CscMatrix<T>,
    h: &[T],
    x_lb: &[T],
    x_ub: &[T],
) -> Result<(), SolverError> {
    // matrices and the linear terms must be finite.  h entries of +∞ are
    // vacuous rows and allowed; box bounds admit the ±∞ sentinels.
    if !(P.nzval.is_finite()
        && A.nzval.is_finite()
        && G.nzval.is_finite()
        && c.is_finite()
        && b.is_finite())
    {
        return Err(SolverError::NonFiniteData);
    }
    if h.iter().any(|v| v.is_nan() || *v == -T::infinity()) {
        return Err(SolverError::NonFiniteData);
    }
    if x_lb.iter().any(|v| v.is_nan()) || x_ub.iter().any(|v| v.is_nan()) {
        return Err(SolverError::NonFiniteData);
    }

    // bounds must be ordered wherever both sides are finite
    let infbound: T = get_infinity().as_T();
    for (lb, ub) in x_lb.iter().zip(x_ub.iter()) {
        if lb.abs() < infbound && ub.abs() < infbound && lb > ub {
            return Err(SolverError::InconsistentBounds);
        }
    }

    Ok(())
}
