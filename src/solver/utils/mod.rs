pub(crate) mod atomic;
pub mod infbounds;

pub use infbounds::*;
