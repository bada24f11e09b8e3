//! What-if analysis engine
//!
//! This crate is the experiment-orchestration core of a lightweight what-if
//! analysis toolkit: given a parametric model (named inputs plus named
//! zero-argument output operations), it can
//! - sweep deterministic input combinations and tabulate outputs
//!   ([`data_table`]),
//! - run stochastic simulations by feeding pre-generated random draws into
//!   selected inputs across one or more deterministic scenarios
//!   ([`simulate`]),
//! - find the input value that drives an output to a target via bisection
//!   ([`goal_seek`]).
//!
//! Models are user-supplied types implementing the [`Model`] capability
//! contract; the engine never constructs one, it only clones and mutates
//! clones. That per-call deep copy is the central isolation guarantee:
//! drivers never touch the caller's instance, so repeated experiments can
//! never observe cross-contamination of model state.
//!
//! # Example
//!
//! ```ignore
//! use whatif_core::{ScenarioInputs, SimulateOptions, simulate, flatten_results};
//!
//! let records = simulate(
//!     &model,
//!     &[("demand".to_string(), demand_draws)],
//!     &["profit"],
//!     &SimulateOptions {
//!         scenario_inputs: Some(ScenarioInputs::new().with("order_quantity", [150.0, 200.0])),
//!         keep_random_inputs: false,
//!     },
//! )?;
//! let table = flatten_results(&records)?;
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod drivers;
pub mod error;
pub mod grid;
pub mod model;
pub mod results;
pub mod value;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use drivers::{DEFAULT_MAX_ITERATIONS, SimulateOptions, data_table, goal_seek, simulate};
pub use error::{ConfigError, DriverError, EvaluationError, ModelError, ShapeError};
pub use grid::{ScenarioAssignment, ScenarioInputs};
pub use model::{AttributeMap, Model, snapshot};
pub use results::{ResultTable, ScenarioRecord, flatten_results};
pub use value::Value;
