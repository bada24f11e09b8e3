//! Bisection goal seek
//!
//! Classic bisection against a model output: find the value of one input
//! that drives the output to a target, given a bracketing interval. All
//! branch decisions are sign-of-product tests; floating-point equality is
//! used only for the exact-hit short circuit.

use crate::error::{DriverError, EvaluationError, ModelError};
use crate::model::Model;
use crate::value::Value;

/// Iteration budget used by callers that don't have a reason to pick one
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Search `bracket` for the value of `by_changing` at which the scalar
/// output `obj_fn` equals `target`.
///
/// Returns `Ok(None)` when bisection cannot proceed: the endpoints do not
/// bracket a target crossing, or the search degenerates with no valid
/// sub-interval. Non-convergence is a normal result, not an error. When the
/// iteration budget runs out the final midpoint is returned as the best
/// approximation.
pub fn goal_seek<M: Model>(
    model: &M,
    obj_fn: &str,
    target: f64,
    by_changing: &str,
    bracket: (f64, f64),
    max_iterations: usize,
) -> Result<Option<f64>, DriverError> {
    let mut clone = model.clone();
    let (a, b) = bracket;

    let mut f_a = eval_scalar(&mut clone, by_changing, a, obj_fn)?;
    let mut f_b = eval_scalar(&mut clone, by_changing, b, obj_fn)?;

    if (f_a - target) * (f_b - target) >= 0.0 {
        return Ok(None);
    }

    let (mut a_n, mut b_n) = (a, b);
    for _ in 0..max_iterations {
        let m = (a_n + b_n) / 2.0;
        let f_m = eval_scalar(&mut clone, by_changing, m, obj_fn)?;

        // Endpoint values are carried forward as the interval shrinks; the
        // model is only re-evaluated at each new midpoint.
        if (f_a - target) * (f_m - target) < 0.0 {
            b_n = m;
            f_b = f_m;
        } else if (f_b - target) * (f_m - target) < 0.0 {
            a_n = m;
            f_a = f_m;
        } else if f_m == target {
            return Ok(Some(m));
        } else {
            return Ok(None);
        }
    }

    Ok(Some((a_n + b_n) / 2.0))
}

/// Set the changing variable and evaluate the objective as a scalar
fn eval_scalar<M: Model>(
    clone: &mut M,
    by_changing: &str,
    x: f64,
    obj_fn: &str,
) -> Result<f64, DriverError> {
    clone
        .set_attribute(by_changing, Value::Scalar(x))
        .map_err(DriverError::Model)?;

    let value = clone.invoke_output(obj_fn).map_err(|source| {
        EvaluationError {
            scenario: 0,
            output: obj_fn.to_string(),
            source,
        }
    })?;

    value.as_scalar().ok_or_else(|| {
        DriverError::Evaluation(EvaluationError {
            scenario: 0,
            output: obj_fn.to_string(),
            source: ModelError::NonScalarOutput(obj_fn.to_string()),
        })
    })
}
