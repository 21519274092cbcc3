mod densekktsolver;
pub use densekktsolver::*;
