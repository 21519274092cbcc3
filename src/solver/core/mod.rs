// package together the core solver pieces:
// : core component traits
// : kkt solver engines
// : main solver container and driver

pub mod kktsolvers;
pub mod traits;

//partially flatten top level pieces
mod solver;
pub use solver::*;
