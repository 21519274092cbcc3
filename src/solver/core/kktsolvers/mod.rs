//! KKT linear system backends.
//!
//! A [`KktSolver`] owns the factorization of the regularized KKT system
//!
//! ```text
//! [ P+ρI+Σ   Aᵀ     Gᵀ      ]
//! [ A        -δI    0       ]
//! [ G        0      -(W+δI) ]
//! ```
//!
//! where `Σ` collects the diagonal contributions of the finite box
//! constraints and `W = diag(s/z)`.  Backends receive the full
//! eight-component primal-dual right-hand side, condense it onto the
//! system they actually factor, and recover every step component.
//!
//! All methods other than construction are allocation-free.

#![allow(non_snake_case)]

use crate::algebra::*;
use crate::solver::DefaultVariables;

pub mod direct;

/// Borrowed view of the (scaled) problem matrices handed to a backend.
#[derive(Clone, Copy)]
pub struct KktData<'a, T> {
    pub P: &'a CscMatrix<T>,
    pub A: &'a CscMatrix<T>,
    pub G: &'a CscMatrix<T>,
}

/// Which of the problem matrices changed in a data update.
#[derive(Clone, Copy, Debug)]
pub struct DataUpdates {
    pub P: bool,
    pub A: bool,
    pub G: bool,
}

impl DataUpdates {
    pub fn all() -> Self {
        Self {
            P: true,
            A: true,
            G: true,
        }
    }
}

/// Contract shared by the dense and sparse KKT backends.
pub trait KktSolver<T: FloatT> {
    /// rewrite the diagonal blocks (and any eliminated Gram terms) for a
    /// new regularization pair and iterate
    fn update_scalings(
        &mut self,
        data: KktData<T>,
        rho: T,
        delta: T,
        variables: &DefaultVariables<T>,
    );

    /// refresh numeric values after problem data changed in place
    fn update_data(&mut self, data: KktData<T>, updates: DataUpdates);

    /// numeric factorization.  `dynamic` enables on-the-fly pivot
    /// regularization.  Returns false on breakdown.
    fn factorize(&mut self, dynamic: bool) -> bool;

    /// solve for the full primal-dual step given the eight-component
    /// right-hand side, optionally with iterative refinement
    fn solve(
        &mut self,
        data: KktData<T>,
        rhs: &DefaultVariables<T>,
        lhs: &mut DefaultVariables<T>,
        refine: bool,
    );

    /// apply the unfactored KKT operator to a primal-dual vector
    fn multiply(&self, data: KktData<T>, lhs: &DefaultVariables<T>, out: &mut DefaultVariables<T>);
}
