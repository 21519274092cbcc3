use crate::solver::utils::atomic::{AtomicF64, Ordering};
use lazy_static::lazy_static;

/// Default magnitude above which a box bound is treated as infinite.
///
/// Any bound entry whose magnitude reaches this value, including the
/// IEEE-754 infinities, disables the corresponding side of the box
/// constraint.  The threshold applies module wide and can be changed with
/// [`set_infinity`].
pub const INFINITY_DEFAULT: f64 = 1e20;

lazy_static! {
    static ref INFINITY: AtomicF64 = AtomicF64::new(INFINITY_DEFAULT);
}

/// Restore the module-level infinity threshold to [`INFINITY_DEFAULT`].
///
/// See also: [`get_infinity`], [`set_infinity`]
pub fn default_infinity() {
    INFINITY.store(INFINITY_DEFAULT, Ordering::Relaxed);
}

/// Set the module-level infinity threshold.
///
/// See also: [`get_infinity`], [`default_infinity`]
pub fn set_infinity(v: f64) {
    INFINITY.store(v, Ordering::Relaxed);
}

/// Read the current module-level infinity threshold.
///
/// See also: [`set_infinity`], [`default_infinity`]
pub fn get_infinity() -> f64 {
    INFINITY.load(Ordering::Relaxed)
}
