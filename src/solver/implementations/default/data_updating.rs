#![allow(non_snake_case)]
use super::*;
use crate::algebra::*;
use crate::solver::core::kktsolvers::DataUpdates;
use crate::solver::utils::infbounds::get_infinity;
use std::iter::zip;

// Overwrites internal problem data in place, without new memory
// allocations, and re-applies the equilibration computed at setup.  The
// sparsity patterns of P, A and G must be unchanged, and bound updates
// may not flip a side between finite and infinite (that requires a fresh
// setup, since the box compaction is part of the KKT structure).
//
// The next `solve` warm starts from the previous iterate.

impl<T> DefaultSolver<T>
where
    T: FloatT,
{
    /// Overwrites the nonzero values of `P`.  The input slice must match
    /// the nonzero count of the upper triangle of the original `P`.
    pub fn update_P(&mut self, values: &[T]) -> Result<(), SolverError> {
        if values.len() != self.data.P.nnz() {
            return Err(SolverError::IncompatibleDimensions("nnz(P) changed"));
        }
        if !values.is_finite() {
            return Err(SolverError::NonFiniteData);
        }

        let equil = &self.data.equilibration;
        self.data.P.nzval.copy_from_slice(values);
        self.data.P.lrscale(&equil.d, &equil.d);
        self.data.P.scale(equil.c);

        self.kktsystem.update_data(
            &self.data,
            DataUpdates {
                P: true,
                A: false,
                G: false,
            },
        );
        Ok(())
    }

    /// Overwrites the linear objective term.
    pub fn update_c(&mut self, c: &[T]) -> Result<(), SolverError> {
        if c.len() != self.data.n {
            return Err(SolverError::IncompatibleDimensions("length of c changed"));
        }
        if !c.is_finite() {
            return Err(SolverError::NonFiniteData);
        }

        let equil = &self.data.equilibration;
        self.data.c.copy_from_slice(c);
        self.data.c.hadamard(&equil.d);
        self.data.c.scale(equil.c);
        Ok(())
    }

    /// Overwrites the nonzero values of `A`.
    pub fn update_A(&mut self, values: &[T]) -> Result<(), SolverError> {
        if values.len() != self.data.A.nnz() {
            return Err(SolverError::IncompatibleDimensions("nnz(A) changed"));
        }
        if !values.is_finite() {
            return Err(SolverError::NonFiniteData);
        }

        let equil = &self.data.equilibration;
        self.data.A.nzval.copy_from_slice(values);
        self.data.A.lrscale(&equil.e, &equil.d);

        self.kktsystem.update_data(
            &self.data,
            DataUpdates {
                P: false,
                A: true,
                G: false,
            },
        );
        Ok(())
    }

    /// Overwrites the equality right-hand side.
    pub fn update_b(&mut self, b: &[T]) -> Result<(), SolverError> {
        if b.len() != self.data.p {
            return Err(SolverError::IncompatibleDimensions("length of b changed"));
        }
        if !b.is_finite() {
            return Err(SolverError::NonFiniteData);
        }

        let equil = &self.data.equilibration;
        self.data.b.copy_from_slice(b);
        self.data.b.hadamard(&equil.e);
        Ok(())
    }

    /// Overwrites the nonzero values of `G`.
    pub fn update_G(&mut self, values: &[T]) -> Result<(), SolverError> {
        if values.len() != self.data.G.nnz() {
            return Err(SolverError::IncompatibleDimensions("nnz(G) changed"));
        }
        if !values.is_finite() {
            return Err(SolverError::NonFiniteData);
        }

        let equil = &self.data.equilibration;
        self.data.G.nzval.copy_from_slice(values);
        self.data.G.lrscale(&equil.f, &equil.d);

        self.kktsystem.update_data(
            &self.data,
            DataUpdates {
                P: false,
                A: false,
                G: true,
            },
        );
        Ok(())
    }

    /// Overwrites the inequality right-hand side.  Entries of +∞ remain
    /// vacuous rows; −∞ and NaN are rejected.
    pub fn update_h(&mut self, h: &[T]) -> Result<(), SolverError> {
        if h.len() != self.data.m {
            return Err(SolverError::IncompatibleDimensions("length of h changed"));
        }
        if h.iter().any(|v| v.is_nan() || *v == -T::infinity()) {
            return Err(SolverError::NonFiniteData);
        }

        let infbound: T = get_infinity().as_T();
        let equil = &self.data.equilibration;
        self.data.h.copy_from_slice(h);
        self.data.h.scalarop(|x| T::min(x, infbound));
        self.data.h.hadamard(&equil.f);
        Ok(())
    }

    /// Overwrites the lower box bounds.  Every entry must stay on the
    /// same side of the infinity sentinel as at setup.
    pub fn update_x_lb(&mut self, x_lb: &[T]) -> Result<(), SolverError> {
        _check_bound_update(x_lb, self.data.n, &self.data.lb_idx)?;

        let equil = &self.data.equilibration;
        for (dst, (&src, &dinv)) in zip(
            self.data.x_lb.iter_mut(),
            zip(x_lb.iter(), equil.dinv.iter()),
        ) {
            *dst = src * dinv;
        }
        self.data.compact_bounds();
        Ok(())
    }

    /// Overwrites the upper box bounds, with the same finiteness rule as
    /// [`update_x_lb`](DefaultSolver::update_x_lb).
    pub fn update_x_ub(&mut self, x_ub: &[T]) -> Result<(), SolverError> {
        _check_bound_update(x_ub, self.data.n, &self.data.ub_idx)?;

        let equil = &self.data.equilibration;
        for (dst, (&src, &dinv)) in zip(
            self.data.x_ub.iter_mut(),
            zip(x_ub.iter(), equil.dinv.iter()),
        ) {
            *dst = src * dinv;
        }
        self.data.compact_bounds();
        Ok(())
    }
}

fn _check_bound_update<T: FloatT>(
    v: &[T],
    n: usize,
    finite_idx: &[usize],
) -> Result<(), SolverError> {
    if v.len() != n {
        return Err(SolverError::IncompatibleDimensions("length of bounds changed"));
    }
    if v.iter().any(|v| v.is_nan()) {
        return Err(SolverError::NonFiniteData);
    }

    // the finiteness pattern is structural and must not change
    let infbound: T = get_infinity().as_T();
    let mut finite_iter = finite_idx.iter().peekable();
    for (j, v) in v.iter().enumerate() {
        let was_finite = finite_iter.peek() == Some(&&j);
        let is_finite = v.abs() < infbound;
        if was_finite != is_finite {
            return Err(SolverError::BoundsFinitenessChanged);
        }
        if was_finite {
            finite_iter.next();
        }
    }
    Ok(())
}
