//! Experiment drivers
//!
//! Three ways of exercising a model, one per file:
//! - [`data_table`]: deterministic sweep over a scenario grid
//! - [`simulate`]: stochastic simulation fed with pre-generated random
//!   draws, optionally across a scenario grid
//! - [`goal_seek`]: bisection search for the input value that drives an
//!   output to a target
//!
//! Every driver clones the caller's model once at entry and mutates only
//! that clone; the original instance is never touched. Scenarios are
//! processed strictly sequentially and mutation of the clone is cumulative
//! across scenarios, so generation order is an observable contract.

mod data_table;
mod goal_seek;
mod simulation;

pub use data_table::data_table;
pub use goal_seek::{DEFAULT_MAX_ITERATIONS, goal_seek};
pub use simulation::{SimulateOptions, simulate};
