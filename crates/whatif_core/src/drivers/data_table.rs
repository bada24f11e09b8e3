//! Deterministic data-table sweep

use crate::error::{DriverError, EvaluationError};
use crate::grid::ScenarioInputs;
use crate::model::Model;
use crate::results::ResultTable;
use crate::value::Value;

/// Tabulate the requested outputs for every combination of scenario inputs.
///
/// One row per scenario, in grid generation order. Columns are the swept
/// input names followed by the output names. The single retained clone is
/// mutated cumulatively: each scenario only overrides the keys present in
/// `scenario_inputs`, and every other attribute keeps whatever value it held
/// from model construction or a prior scenario.
pub fn data_table<M: Model>(
    model: &M,
    scenario_inputs: &ScenarioInputs,
    outputs: &[&str],
) -> Result<ResultTable, DriverError> {
    let grid = scenario_inputs.grid()?;

    let mut columns: Vec<String> = scenario_inputs.names().map(str::to_string).collect();
    columns.extend(outputs.iter().map(|&name| name.to_string()));
    let mut table = ResultTable::new(columns);

    let mut clone = model.clone();

    for (scenario_num, assignment) in grid.iter().enumerate() {
        for (name, value) in assignment.iter() {
            clone
                .set_attribute(name, value.clone())
                .map_err(DriverError::Model)?;
        }

        let mut row: Vec<Value> = assignment.iter().map(|(_, v)| v.clone()).collect();
        for &output in outputs {
            let value = clone.invoke_output(output).map_err(|source| {
                EvaluationError {
                    scenario: scenario_num,
                    output: output.to_string(),
                    source,
                }
            })?;
            row.push(value);
        }
        table.push_row(row);
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;

    #[derive(Debug, Clone)]
    struct Doubler {
        x: Value,
    }

    impl Model for Doubler {
        fn attribute_names(&self) -> &'static [&'static str] {
            &["x"]
        }

        fn get_attribute(&self, name: &str) -> Result<Value, ModelError> {
            match name {
                "x" => Ok(self.x.clone()),
                _ => Err(ModelError::UnknownAttribute(name.to_string())),
            }
        }

        fn set_attribute(&mut self, name: &str, value: Value) -> Result<(), ModelError> {
            match name {
                "x" => {
                    self.x = value;
                    Ok(())
                }
                _ => Err(ModelError::UnknownAttribute(name.to_string())),
            }
        }

        fn invoke_output(&self, name: &str) -> Result<Value, ModelError> {
            match name {
                "doubled" => Ok(&self.x * 2.0),
                _ => Err(ModelError::UnknownOutput(name.to_string())),
            }
        }
    }

    #[test]
    fn test_three_scenarios_three_rows_in_order() {
        let model = Doubler {
            x: Value::Scalar(0.0),
        };
        let inputs = ScenarioInputs::new().with("x", [1.0, 2.0, 3.0]);

        let table = data_table(&model, &inputs, &["doubled"]).unwrap();
        assert_eq!(table.columns(), ["x", "doubled"]);
        assert_eq!(table.scalar_column("doubled").unwrap(), vec![2.0, 4.0, 6.0]);
    }

    #[test]
    fn test_original_model_is_untouched() {
        let model = Doubler {
            x: Value::Scalar(42.0),
        };
        let inputs = ScenarioInputs::new().with("x", [1.0]);

        data_table(&model, &inputs, &["doubled"]).unwrap();
        assert_eq!(model.x, Value::Scalar(42.0));
    }

    #[test]
    fn test_no_outputs_yields_input_columns_only() {
        let model = Doubler {
            x: Value::Scalar(0.0),
        };
        let inputs = ScenarioInputs::new().with("x", [1.0, 2.0]);

        let table = data_table(&model, &inputs, &[]).unwrap();
        assert_eq!(table.columns(), ["x"]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_failing_output_is_tagged_with_scenario_and_name() {
        let model = Doubler {
            x: Value::Scalar(0.0),
        };
        let inputs = ScenarioInputs::new().with("x", [1.0, 2.0]);

        let err = data_table(&model, &inputs, &["doubled", "tripled"]).unwrap_err();
        match err {
            DriverError::Evaluation(e) => {
                assert_eq!(e.scenario, 0);
                assert_eq!(e.output, "tripled");
            }
            other => panic!("expected evaluation error, got {other:?}"),
        }
    }
}
