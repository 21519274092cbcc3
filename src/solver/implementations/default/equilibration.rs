#![allow(non_snake_case)]
use crate::algebra::*;

// ---------------
// equilibration data
// ---------------

/// Data from the Ruiz equilibration procedure
#[derive(Debug)]
pub struct DefaultEquilibrationData<T> {
    /// Vector of variable scaling terms
    pub d: Vec<T>,
    /// Vector of inverse variable scaling terms
    pub dinv: Vec<T>,
    /// Vector of equality-row scaling terms
    pub e: Vec<T>,
    /// Vector of inverse equality-row scaling terms
    pub einv: Vec<T>,
    /// Vector of inequality-row scaling terms
    pub f: Vec<T>,
    /// Vector of inverse inequality-row scaling terms
    pub finv: Vec<T>,
    /// overall scaling for the objective function
    pub c: T,
}

impl<T> DefaultEquilibrationData<T>
where
    T: FloatT,
{
    /// creates a new equilibration object with identity scalings
    pub fn new(n: usize, p: usize, m: usize) -> Self {
        Self {
            d: vec![T::one(); n],
            dinv: vec![T::one(); n],
            e: vec![T::one(); p],
            einv: vec![T::one(); p],
            f: vec![T::one(); m],
            finv: vec![T::one(); m],
            c: T::one(),
        }
    }
}
