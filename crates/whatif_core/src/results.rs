//! Experiment results and result-table flattening
//!
//! A simulation produces one [`ScenarioRecord`] per scenario, holding the
//! raw per-output arrays. [`flatten_results`] turns a list of records into a
//! single [`ResultTable`] with one row per (scenario, replication) pair,
//! the shape downstream reporting and plotting collaborators consume.

use serde::{Deserialize, Serialize};

use crate::error::ShapeError;
use crate::grid::ScenarioAssignment;
use crate::model::AttributeMap;
use crate::value::Value;

/// Raw output of one simulated scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioRecord {
    /// 0-based index in scenario-grid generation order
    pub scenario_num: usize,

    /// The swept-input values for this scenario (empty if no grid was given)
    pub scenario_vals: ScenarioAssignment,

    /// Snapshot of the non-swept model attributes at simulation start
    pub scenario_base_vals: AttributeMap,

    /// Computed output arrays, in requested order
    pub output: Vec<(String, Value)>,
}

impl ScenarioRecord {
    /// The replication count shared by this record's output arrays.
    ///
    /// Scalars broadcast, so they impose no count; an all-scalar record has
    /// a single implicit replication. Arrays of disagreeing lengths are a
    /// shape error.
    pub fn replications(&self) -> Result<usize, ShapeError> {
        let mut n: Option<usize> = None;
        for (name, value) in &self.output {
            if let Some(len) = value.replications() {
                match n {
                    None => n = Some(len),
                    Some(expected) if expected != len => {
                        return Err(ShapeError::OutputLengthMismatch {
                            output: name.clone(),
                            expected,
                            actual: len,
                        });
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(n.unwrap_or(1))
    }

    fn column_names(&self) -> Vec<String> {
        let mut columns = vec!["scenario_num".to_string()];
        columns.extend(self.scenario_vals.names().map(str::to_string));
        columns.extend(self.output.iter().map(|(name, _)| name.clone()));
        columns
    }
}

/// Tabular result with named columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl ResultTable {
    /// Create an empty table with the given column names
    #[must_use]
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row.
    ///
    /// # Panics
    /// Panics if the row width does not match the column count.
    pub fn push_row(&mut self, row: Vec<Value>) {
        assert_eq!(row.len(), self.columns.len(), "row width != column count");
        self.rows.push(row);
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All values of a named column, top to bottom
    #[must_use]
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|row| &row[idx]).collect())
    }

    /// A named column as scalars, if every cell in it is scalar
    #[must_use]
    pub fn scalar_column(&self, name: &str) -> Option<Vec<f64>> {
        self.column(name)?
            .into_iter()
            .map(Value::as_scalar)
            .collect()
    }
}

impl std::fmt::Display for ResultTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(Value::to_string).collect())
            .collect();

        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, name)| {
                cells
                    .iter()
                    .map(|row| row[i].len())
                    .chain(std::iter::once(name.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        for (name, width) in self.columns.iter().zip(widths.iter().copied()) {
            write!(f, "{name:>width$}  ")?;
        }
        writeln!(f)?;
        for row in &cells {
            for (cell, width) in row.iter().zip(widths.iter().copied()) {
                write!(f, "{cell:>width$}  ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Flatten scenario records into one table, one row per replication.
///
/// Rows are ordered by record, then replication index. The schema is
/// identical whether one record or many is given: `scenario_num`, the swept
/// input names, then the output names.
pub fn flatten_results(records: &[ScenarioRecord]) -> Result<ResultTable, ShapeError> {
    let Some(first) = records.first() else {
        return Ok(ResultTable::new(vec!["scenario_num".to_string()]));
    };

    let columns = first.column_names();
    let mut table = ResultTable::new(columns.clone());

    for record in records {
        if record.column_names() != columns {
            return Err(ShapeError::ColumnMismatch);
        }

        let n = record.replications()?;
        for rep in 0..n {
            let mut row = Vec::with_capacity(columns.len());
            row.push(Value::Scalar(record.scenario_num as f64));
            for (_, value) in record.scenario_vals.iter() {
                row.push(value.clone());
            }
            for (name, value) in &record.output {
                // at_rep cannot be out of range: n came from these arrays
                let x = value.at_rep(rep).ok_or_else(|| {
                    ShapeError::OutputLengthMismatch {
                        output: name.clone(),
                        expected: n,
                        actual: value.replications().unwrap_or(1),
                    }
                })?;
                row.push(Value::Scalar(x));
            }
            table.push_row(row);
        }
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        scenario_num: usize,
        output: Vec<(&str, Value)>,
    ) -> ScenarioRecord {
        ScenarioRecord {
            scenario_num,
            scenario_vals: ScenarioAssignment::default(),
            scenario_base_vals: AttributeMap::default(),
            output: output
                .into_iter()
                .map(|(n, v)| (n.to_string(), v))
                .collect(),
        }
    }

    #[test]
    fn test_single_record_flattens_to_one_row_per_replication() {
        let records = vec![record(
            0,
            vec![("profit", Value::Array(vec![1.0, 2.0, 3.0]))],
        )];

        let table = flatten_results(&records).unwrap();
        assert_eq!(table.columns(), ["scenario_num", "profit"]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.scalar_column("profit").unwrap(), vec![1.0, 2.0, 3.0]);
        assert_eq!(
            table.scalar_column("scenario_num").unwrap(),
            vec![0.0, 0.0, 0.0]
        );
    }

    #[test]
    fn test_scalar_outputs_broadcast_across_replications() {
        let records = vec![record(
            0,
            vec![
                ("profit", Value::Array(vec![1.0, 2.0])),
                ("order_cost", Value::Scalar(100.0)),
            ],
        )];

        let table = flatten_results(&records).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.scalar_column("order_cost").unwrap(),
            vec![100.0, 100.0]
        );
    }

    #[test]
    fn test_records_concatenate_in_order() {
        let records = vec![
            record(0, vec![("y", Value::Array(vec![1.0, 2.0]))]),
            record(1, vec![("y", Value::Array(vec![3.0, 4.0]))]),
        ];

        let table = flatten_results(&records).unwrap();
        assert_eq!(table.scalar_column("y").unwrap(), vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(
            table.scalar_column("scenario_num").unwrap(),
            vec![0.0, 0.0, 1.0, 1.0]
        );
    }

    #[test]
    fn test_mismatched_output_lengths_rejected() {
        let records = vec![record(
            0,
            vec![
                ("y", Value::Array(vec![1.0, 2.0])),
                ("z", Value::Array(vec![1.0, 2.0, 3.0])),
            ],
        )];

        assert!(matches!(
            flatten_results(&records),
            Err(ShapeError::OutputLengthMismatch { .. })
        ));
    }

    #[test]
    fn test_all_scalar_record_has_one_replication() {
        let records = vec![record(0, vec![("y", Value::Scalar(7.0))])];
        let table = flatten_results(&records).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_differing_schemas_rejected() {
        let records = vec![
            record(0, vec![("y", Value::Scalar(1.0))]),
            record(1, vec![("z", Value::Scalar(2.0))]),
        ];
        assert_eq!(flatten_results(&records), Err(ShapeError::ColumnMismatch));
    }
}
