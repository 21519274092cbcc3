mod datamap;
mod kkt_assembly;
mod sparsekktsolver;

pub(crate) use datamap::*;
pub(crate) use kkt_assembly::*;
pub use sparsekktsolver::*;
