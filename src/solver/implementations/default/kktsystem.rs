use super::*;
use crate::algebra::*;
use crate::solver::core::kktsolvers::direct::{DenseKktSolver, KktMode, SparseKktSolver};
use crate::solver::core::kktsolvers::{DataUpdates, KktData, KktSolver};
use crate::solver::core::traits::{KKTSystem, Variables};

// We require Send here so that solver objects can be moved
// across threads by downstream users.

type BoxedKktSolver<T> = Box<dyn KktSolver<T> + Send>;

/// Standard-form KKT system implementing the
/// [`KKTSystem`](crate::solver::traits::KKTSystem) trait.
///
/// Dispatches to the dense backend or to the sparse backend in one of its
/// four elimination modes, as selected by
/// [`kkt_solver`](crate::solver::DefaultSettings::kkt_solver).
pub struct DefaultKKTSystem<T> {
    kktsolver: BoxedKktSolver<T>,

    // unit slack/dual scalings and scratch RHS for the initial point solve
    unit_vars: DefaultVariables<T>,
    work_rhs: DefaultVariables<T>,
    work_lhs: DefaultVariables<T>,
}

// borrowed matrix view handed to the backends
fn _kktdata<T: FloatT>(data: &DefaultProblemData<T>) -> KktData<'_, T> {
    KktData {
        P: &data.P,
        A: &data.A,
        G: &data.G,
    }
}

impl<T> DefaultKKTSystem<T>
where
    T: FloatT,
{
    pub fn new(
        data: &DefaultProblemData<T>,
        settings: &DefaultSettings<T>,
    ) -> Result<Self, SolverError> {
        let (n, p, m) = (data.n, data.p, data.m);
        let (n_lb, n_ub) = (data.n_lb(), data.n_ub());

        let kktdata = _kktdata(data);

        let kktsolver: BoxedKktSolver<T> = match settings.kkt_solver {
            KktSolverKind::DenseCholesky => Box::new(DenseKktSolver::<T>::new(
                kktdata,
                &data.lb_idx,
                &data.ub_idx,
                settings,
            )),
            kind => {
                let mode = match kind {
                    KktSolverKind::SparseLdlt => KktMode::Full,
                    KktSolverKind::SparseLdltEqElim => KktMode::EqEliminated,
                    KktSolverKind::SparseLdltIneqElim => KktMode::IneqEliminated,
                    KktSolverKind::SparseLdltAllElim => KktMode::AllEliminated,
                    KktSolverKind::DenseCholesky => unreachable!(),
                };
                Box::new(
                    SparseKktSolver::<T>::new(kktdata, &data.lb_idx, &data.ub_idx, mode, settings)
                        .map_err(|_| SolverError::SetupFactorization)?,
                )
            }
        };

        let mut unit_vars = DefaultVariables::<T>::new(n, p, m, n_lb, n_ub);
        unit_vars.project_interior(T::one());

        Ok(Self {
            kktsolver,
            unit_vars,
            work_rhs: DefaultVariables::<T>::new(n, p, m, n_lb, n_ub),
            work_lhs: DefaultVariables::<T>::new(n, p, m, n_lb, n_ub),
        })
    }

    /// Refresh the backend's numeric values after a data update.
    pub(crate) fn update_data(&mut self, data: &DefaultProblemData<T>, updates: DataUpdates) {
        self.kktsolver.update_data(_kktdata(data), updates);
    }
}

impl<T> KKTSystem<T> for DefaultKKTSystem<T>
where
    T: FloatT,
{
    type D = DefaultProblemData<T>;
    type V = DefaultVariables<T>;
    type SE = DefaultSettings<T>;

    fn update(
        &mut self,
        data: &DefaultProblemData<T>,
        variables: &DefaultVariables<T>,
        ρ: T,
        δ: T,
    ) -> bool {
        self.kktsolver
            .update_scalings(_kktdata(data), ρ, δ, variables);
        self.kktsolver.factorize(true)
    }

    fn solve(
        &mut self,
        step_lhs: &mut DefaultVariables<T>,
        step_rhs: &DefaultVariables<T>,
        data: &DefaultProblemData<T>,
        settings: &DefaultSettings<T>,
    ) {
        self.kktsolver.solve(
            _kktdata(data),
            step_rhs,
            step_lhs,
            settings.iterative_refinement_enable,
        );
    }

    fn solve_initial_point(
        &mut self,
        variables: &mut DefaultVariables<T>,
        data: &DefaultProblemData<T>,
        ρ: T,
        δ: T,
    ) -> bool {
        // factor once with unit scalings in every slack/dual family
        self.kktsolver
            .update_scalings(_kktdata(data), ρ, δ, &self.unit_vars);
        if !self.kktsolver.factorize(true) {
            return false;
        }

        // right-hand side built from the problem vectors.  With unit
        // scalings the recovered slack components come out as the negated
        // dual estimates, which is the conventional starting pairing.
        let rhs = &mut self.work_rhs;
        rhs.x.scalarop_from(|c| -c, &data.c);
        rhs.y.copy_from(&data.b);
        rhs.z.copy_from(&data.h);
        rhs.z_lb.scalarop_from(|v| -v, &data.x_lb_c);
        rhs.z_ub.copy_from(&data.x_ub_c);
        rhs.s.set(T::zero());
        rhs.s_lb.set(T::zero());
        rhs.s_ub.set(T::zero());

        self.kktsolver
            .solve(_kktdata(data), &self.work_rhs, &mut self.work_lhs, true);

        variables.copy_from(&self.work_lhs);
        true
    }
}
