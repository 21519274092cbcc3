//! Direct LDLᵀ factorization of sparse symmetric quasidefinite matrices.
//!
//! The engine factors a matrix supplied as its upper triangle, working on
//! a fill-reducing symmetric permutation computed once at construction.
//! Numeric refactorization and solves are allocation-free, which lets the
//! KKT backends refresh values and refactor inside the interior-point
//! iteration without touching the heap.

mod factorisation;
pub use factorisation::*;
