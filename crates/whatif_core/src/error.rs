use std::fmt;

/// Errors in an experiment specification, detected before any model
/// evaluation happens
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A scenario input was given with zero candidate values, so the
    /// Cartesian product would vacuously contain no scenarios
    EmptyCandidates { input: String },
    /// Random-input draw arrays disagree on the replication count
    MismatchedDrawCounts {
        input: String,
        expected: usize,
        actual: usize,
    },
    /// A simulation was requested with no random inputs at all
    NoReplications,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyCandidates { input } => {
                write!(f, "scenario input {input:?} has no candidate values")
            }
            ConfigError::MismatchedDrawCounts {
                input,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "random input {input:?} has {actual} draws, expected {expected}"
                )
            }
            ConfigError::NoReplications => {
                write!(f, "simulation requires at least one random input")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors raised by a model implementation itself
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    UnknownAttribute(String),
    UnknownOutput(String),
    /// An output expected to be scalar (e.g. a goal-seek objective)
    /// returned an array
    NonScalarOutput(String),
    /// An attribute holds a value the model cannot evaluate with
    InvalidAttribute { name: String, reason: String },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::UnknownAttribute(name) => write!(f, "unknown attribute {name:?}"),
            ModelError::UnknownOutput(name) => write!(f, "unknown output {name:?}"),
            ModelError::NonScalarOutput(name) => {
                write!(f, "output {name:?} returned an array where a scalar is required")
            }
            ModelError::InvalidAttribute { name, reason } => {
                write!(f, "attribute {name:?} is invalid: {reason}")
            }
        }
    }
}

impl std::error::Error for ModelError {}

/// A named output failed to evaluate for a specific scenario
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationError {
    /// 0-based index of the scenario being evaluated
    pub scenario: usize,
    /// Name of the output operation that failed
    pub output: String,
    /// Underlying model failure
    pub source: ModelError,
}

impl fmt::Display for EvaluationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "output {:?} failed for scenario {}: {}",
            self.output, self.scenario, self.source
        )
    }
}

impl std::error::Error for EvaluationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Errors while flattening scenario records into a result table
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// Output arrays within one scenario record disagree in length
    OutputLengthMismatch {
        output: String,
        expected: usize,
        actual: usize,
    },
    /// Scenario records handed to the aggregator have differing schemas
    ColumnMismatch,
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::OutputLengthMismatch {
                output,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "output {output:?} has {actual} replications, expected {expected}"
                )
            }
            ShapeError::ColumnMismatch => {
                write!(f, "scenario records have differing column sets")
            }
        }
    }
}

impl std::error::Error for ShapeError {}

/// Any failure surfaced by an experiment driver
#[derive(Debug, Clone, PartialEq)]
pub enum DriverError {
    Config(ConfigError),
    /// An attribute get/set failed while preparing a scenario
    Model(ModelError),
    Evaluation(EvaluationError),
    Shape(ShapeError),
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::Config(e) => write!(f, "{e}"),
            DriverError::Model(e) => write!(f, "{e}"),
            DriverError::Evaluation(e) => write!(f, "{e}"),
            DriverError::Shape(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for DriverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DriverError::Config(e) => Some(e),
            DriverError::Model(e) => Some(e),
            DriverError::Evaluation(e) => Some(e),
            DriverError::Shape(e) => Some(e),
        }
    }
}

impl From<ConfigError> for DriverError {
    fn from(e: ConfigError) -> Self {
        DriverError::Config(e)
    }
}

impl From<ModelError> for DriverError {
    fn from(e: ModelError) -> Self {
        DriverError::Model(e)
    }
}

impl From<EvaluationError> for DriverError {
    fn from(e: EvaluationError) -> Self {
        DriverError::Evaluation(e)
    }
}

impl From<ShapeError> for DriverError {
    fn from(e: ShapeError) -> Self {
        DriverError::Shape(e)
    }
}
