//! Scenario inputs and the parameter grid
//!
//! [`ScenarioInputs`] maps input names to candidate-value sequences, in
//! declaration order. [`ScenarioInputs::grid`] expands that mapping into the
//! full Cartesian product of single-valued assignments, one per scenario:
//! row-major order, first-declared input varying slowest and last-declared
//! varying fastest. Scenario numbering everywhere else in the crate is the
//! position in this expansion.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::value::Value;

/// Ordered mapping from input name to its candidate values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScenarioInputs {
    entries: Vec<(String, Vec<Value>)>,
}

impl ScenarioInputs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, preserving declaration order
    #[must_use]
    pub fn with<I, V>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.insert(name, values);
        self
    }

    /// Append an input and its candidate values
    pub fn insert<I, V>(&mut self, name: &str, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        self.entries.push((name.to_string(), values));
    }

    /// Number of declared inputs
    #[must_use]
    pub fn num_inputs(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of scenarios the grid will contain
    #[must_use]
    pub fn num_scenarios(&self) -> usize {
        self.entries.iter().map(|(_, v)| v.len()).product()
    }

    /// Declared input names, in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Expand to the full list of scenario assignments.
    ///
    /// The degenerate empty mapping yields a single empty assignment (the
    /// identity scenario). An input with zero candidate values is rejected
    /// rather than silently producing zero scenarios.
    pub fn grid(&self) -> Result<Vec<ScenarioAssignment>, ConfigError> {
        for (name, values) in &self.entries {
            if values.is_empty() {
                return Err(ConfigError::EmptyCandidates {
                    input: name.clone(),
                });
            }
        }

        if self.entries.is_empty() {
            return Ok(vec![ScenarioAssignment::default()]);
        }

        let shape: Vec<usize> = self.entries.iter().map(|(_, v)| v.len()).collect();
        let mut assignments = Vec::with_capacity(self.num_scenarios());
        let mut indices = vec![0usize; shape.len()];
        let mut done = false;

        while !done {
            let entries = self
                .entries
                .iter()
                .zip(&indices)
                .map(|((name, values), &idx)| (name.clone(), values[idx].clone()))
                .collect();
            assignments.push(ScenarioAssignment { entries });

            // Advance indices, last input varying fastest
            done = true;
            for i in (0..shape.len()).rev() {
                indices[i] += 1;
                if indices[i] < shape[i] {
                    done = false;
                    break;
                }
                indices[i] = 0;
            }
        }

        Ok(assignments)
    }
}

/// One concrete assignment of values to the scenario inputs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioAssignment {
    entries: Vec<(String, Value)>,
}

impl ScenarioAssignment {
    /// Look up the assigned value for an input
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Iterate (name, value) pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Input names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
