//! Stochastic simulation driver

use crate::error::{ConfigError, DriverError, EvaluationError};
use crate::grid::{ScenarioAssignment, ScenarioInputs};
use crate::model::{Model, snapshot};
use crate::results::ScenarioRecord;
use crate::value::Value;

/// Options for [`simulate`]
#[derive(Debug, Clone, Default)]
pub struct SimulateOptions {
    /// Deterministic scenario grid to sweep; `None` runs the single
    /// baseline scenario
    pub scenario_inputs: Option<ScenarioInputs>,

    /// Record the installed random draw arrays in `scenario_base_vals`
    /// instead of the original model's pre-randomization attributes
    pub keep_random_inputs: bool,
}

/// Run a stochastic simulation over one or more deterministic scenarios.
///
/// `random_inputs` maps input names to pre-generated arrays of `n` random
/// variates; draw generation is the caller's responsibility, which keeps
/// the engine deterministic given fixed inputs. Each array is installed
/// whole as its attribute's value, and every requested output is expected to
/// broadcast over the `n` replications.
///
/// Returns one [`ScenarioRecord`] per scenario in grid generation order, or
/// a single record when no grid is given. Scenario application is cumulative
/// on the one retained clone, exactly as in
/// [`data_table`](crate::drivers::data_table).
pub fn simulate<M: Model>(
    model: &M,
    random_inputs: &[(String, Vec<f64>)],
    outputs: &[&str],
    options: &SimulateOptions,
) -> Result<Vec<ScenarioRecord>, DriverError> {
    let n = check_draws(random_inputs)?;
    debug_assert!(n >= 1);

    let mut clone = model.clone();
    for (name, draws) in random_inputs {
        clone
            .set_attribute(name, Value::Array(draws.clone()))
            .map_err(DriverError::Model)?;
    }

    // Baseline snapshot: the clone includes the installed draw arrays, the
    // original model does not.
    let scenario_base_vals = if options.keep_random_inputs {
        snapshot(&clone).map_err(DriverError::Model)?
    } else {
        snapshot(model).map_err(DriverError::Model)?
    };

    let grid = match &options.scenario_inputs {
        Some(inputs) => inputs.grid()?,
        None => vec![ScenarioAssignment::default()],
    };

    let mut records = Vec::with_capacity(grid.len());
    for (scenario_num, assignment) in grid.into_iter().enumerate() {
        for (name, value) in assignment.iter() {
            clone
                .set_attribute(name, value.clone())
                .map_err(DriverError::Model)?;
        }

        let mut output = Vec::with_capacity(outputs.len());
        for &name in outputs {
            let value = clone.invoke_output(name).map_err(|source| {
                EvaluationError {
                    scenario: scenario_num,
                    output: name.to_string(),
                    source,
                }
            })?;
            output.push((name.to_string(), value));
        }

        records.push(ScenarioRecord {
            scenario_num,
            scenario_vals: assignment,
            scenario_base_vals: scenario_base_vals.clone(),
            output,
        });
    }

    Ok(records)
}

/// Validate the random inputs and return the shared replication count
fn check_draws(random_inputs: &[(String, Vec<f64>)]) -> Result<usize, ConfigError> {
    let Some((_, first)) = random_inputs.first() else {
        return Err(ConfigError::NoReplications);
    };
    let n = first.len();
    if n == 0 {
        return Err(ConfigError::NoReplications);
    }
    for (name, draws) in random_inputs {
        if draws.len() != n {
            return Err(ConfigError::MismatchedDrawCounts {
                input: name.clone(),
                expected: n,
                actual: draws.len(),
            });
        }
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;

    /// Pass-through model: output "seen" returns the current value of "d"
    #[derive(Debug, Clone)]
    struct Identity {
        d: Value,
        offset: Value,
    }

    impl Identity {
        fn new() -> Self {
            Self {
                d: Value::Scalar(0.0),
                offset: Value::Scalar(0.0),
            }
        }
    }

    impl Model for Identity {
        fn attribute_names(&self) -> &'static [&'static str] {
            &["d", "offset"]
        }

        fn get_attribute(&self, name: &str) -> Result<Value, ModelError> {
            match name {
                "d" => Ok(self.d.clone()),
                "offset" => Ok(self.offset.clone()),
                _ => Err(ModelError::UnknownAttribute(name.to_string())),
            }
        }

        fn set_attribute(&mut self, name: &str, value: Value) -> Result<(), ModelError> {
            match name {
                "d" => self.d = value,
                "offset" => self.offset = value,
                _ => return Err(ModelError::UnknownAttribute(name.to_string())),
            }
            Ok(())
        }

        fn invoke_output(&self, name: &str) -> Result<Value, ModelError> {
            match name {
                "seen" => Ok(self.d.clone()),
                "shifted" => Ok(&self.d + &self.offset),
                _ => Err(ModelError::UnknownOutput(name.to_string())),
            }
        }
    }

    #[test]
    fn test_single_scenario_record() {
        let model = Identity::new();
        let randoms = vec![("d".to_string(), vec![1.0, 2.0, 3.0])];

        let records =
            simulate(&model, &randoms, &["seen"], &SimulateOptions::default()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].scenario_num, 0);
        assert!(records[0].scenario_vals.is_empty());
        assert_eq!(records[0].output[0].1, Value::Array(vec![1.0, 2.0, 3.0]));
    }

    #[test]
    fn test_scenario_grid_numbers_records_in_order() {
        let model = Identity::new();
        let randoms = vec![("d".to_string(), vec![1.0, 2.0])];
        let options = SimulateOptions {
            scenario_inputs: Some(ScenarioInputs::new().with("offset", [10.0, 20.0, 30.0])),
            keep_random_inputs: false,
        };

        let records = simulate(&model, &randoms, &["shifted"], &options).unwrap();

        assert_eq!(records.len(), 3);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.scenario_num, i);
        }
        assert_eq!(records[2].output[0].1, Value::Array(vec![31.0, 32.0]));
        assert_eq!(
            records[1].scenario_vals.get("offset"),
            Some(&Value::Scalar(20.0))
        );
    }

    #[test]
    fn test_base_vals_exclude_draws_by_default() {
        let model = Identity::new();
        let randoms = vec![("d".to_string(), vec![5.0, 6.0])];

        let records =
            simulate(&model, &randoms, &["seen"], &SimulateOptions::default()).unwrap();

        // Pre-randomization snapshot: "d" still holds its constructed value
        assert_eq!(records[0].scenario_base_vals["d"], Value::Scalar(0.0));
    }

    #[test]
    fn test_keep_random_inputs_snapshots_draws() {
        let model = Identity::new();
        let randoms = vec![("d".to_string(), vec![5.0, 6.0])];
        let options = SimulateOptions {
            scenario_inputs: None,
            keep_random_inputs: true,
        };

        let records = simulate(&model, &randoms, &["seen"], &options).unwrap();
        assert_eq!(
            records[0].scenario_base_vals["d"],
            Value::Array(vec![5.0, 6.0])
        );
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let model = Identity::new();
        let randoms = vec![("d".to_string(), vec![1.0, 2.0, 3.0])];

        let first =
            simulate(&model, &randoms, &["seen"], &SimulateOptions::default()).unwrap();
        let second =
            simulate(&model, &randoms, &["seen"], &SimulateOptions::default()).unwrap();

        assert_eq!(first[0].output, second[0].output);
        assert_eq!(model.d, Value::Scalar(0.0));
    }

    #[test]
    fn test_mismatched_draw_counts_rejected() {
        let model = Identity::new();
        let randoms = vec![
            ("d".to_string(), vec![1.0, 2.0]),
            ("offset".to_string(), vec![1.0]),
        ];

        let err = simulate(&model, &randoms, &["seen"], &SimulateOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            DriverError::Config(ConfigError::MismatchedDrawCounts { .. })
        ));
    }

    #[test]
    fn test_no_random_inputs_rejected() {
        let model = Identity::new();
        let err =
            simulate(&model, &[], &["seen"], &SimulateOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            DriverError::Config(ConfigError::NoReplications)
        ));
    }
}
