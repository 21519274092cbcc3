//! Hierarchical wall-clock timers used for the `compute_timings` option.

mod timers;
pub use timers::*;
