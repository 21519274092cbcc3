//! <h1 align="center">proxip</h1>
//! <p align="center">Proximal interior-point solver for convex quadratic programs.</p>
//!
//! proxip solves problems of the form
//!
//! ```text
//! minimize   ½ xᵀPx + cᵀx
//! subject to Ax = b
//!            Gx ≤ h
//!            x_lb ≤ x ≤ x_ub
//! ```
//!
//! with P symmetric positive semidefinite, using a proximally regularized
//! primal-dual interior-point method with a Mehrotra predictor-corrector
//! step.  Box bounds may be partially infinite; ±∞ entries disable the
//! corresponding side.
//!
//! The main user-facing type is [`DefaultSolver`](crate::solver::DefaultSolver),
//! configured through [`DefaultSettings`](crate::solver::DefaultSettings).
//! Sparse problem data is supplied in [`CscMatrix`](crate::algebra::CscMatrix)
//! format.
//!
//! __Example__
//! ```no_run
//! use proxip::algebra::CscMatrix;
//! use proxip::solver::{DefaultSettings, DefaultSolver, IPSolver, SolverStatus};
//!
//! // minimize ½(6x₁² + 4x₂²) - x₁ - 4x₂
//! let P = CscMatrix::new(2, 2, vec![0, 1, 2], vec![0, 1], vec![6., 4.]);
//! let c = [-1., -4.];
//!
//! let A = CscMatrix::new(1, 2, vec![0, 1, 2], vec![0, 0], vec![1., -2.]);
//! let b = [1.];
//!
//! let G = CscMatrix::new(2, 2, vec![0, 2, 3], vec![0, 1, 0], vec![1., 2., -1.]);
//! let h = [0.2, -1.];
//!
//! let x_lb = [-1., f64::NEG_INFINITY];
//! let x_ub = [1., f64::INFINITY];
//!
//! let settings = DefaultSettings::default();
//! let mut solver =
//!     DefaultSolver::new(&P, &c, &A, &b, &G, &h, &x_lb, &x_ub, settings).unwrap();
//!
//! solver.solve();
//! assert_eq!(solver.solution.status, SolverStatus::Solved);
//! ```

//Rust hates greek characters
#![allow(confusable_idents)]
#![allow(uncommon_codepoints)]

pub mod algebra;
pub mod ldl;
pub mod solver;
pub mod timers;
