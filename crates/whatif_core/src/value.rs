//! Scalar-or-array numeric values
//!
//! Every model attribute and every computed output is a [`Value`]: either a
//! single number or a one-dimensional array with one element per simulation
//! replication. Binary operations broadcast scalars against arrays so model
//! code reads the same whether it is evaluating one scenario or a whole
//! batch of replications.

use serde::{Deserialize, Serialize};

/// A scalar or per-replication array value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Scalar(f64),
    Array(Vec<f64>),
}

impl Value {
    /// Number of replications this value spans, or `None` for a scalar
    /// (scalars broadcast to any replication count).
    #[must_use]
    pub fn replications(&self) -> Option<usize> {
        match self {
            Value::Scalar(_) => None,
            Value::Array(values) => Some(values.len()),
        }
    }

    /// Get the scalar value, or `None` if this is an array
    #[must_use]
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Value::Scalar(x) => Some(*x),
            Value::Array(_) => None,
        }
    }

    /// View the underlying array, or `None` if this is a scalar
    #[must_use]
    pub fn as_array(&self) -> Option<&[f64]> {
        match self {
            Value::Scalar(_) => None,
            Value::Array(values) => Some(values),
        }
    }

    /// Value at a replication index. Scalars broadcast: they return the same
    /// number for every index. Out-of-range array access returns `None`.
    #[must_use]
    pub fn at_rep(&self, index: usize) -> Option<f64> {
        match self {
            Value::Scalar(x) => Some(*x),
            Value::Array(values) => values.get(index).copied(),
        }
    }

    /// Apply `f` elementwise
    #[must_use]
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Value {
        match self {
            Value::Scalar(x) => Value::Scalar(f(*x)),
            Value::Array(values) => Value::Array(values.iter().map(|&x| f(x)).collect()),
        }
    }

    /// Combine two values elementwise with scalar broadcasting.
    ///
    /// # Panics
    /// Panics if both values are arrays of different lengths.
    #[must_use]
    pub fn zip_with(&self, other: &Value, f: impl Fn(f64, f64) -> f64) -> Value {
        match (self, other) {
            (Value::Scalar(a), Value::Scalar(b)) => Value::Scalar(f(*a, *b)),
            (Value::Scalar(a), Value::Array(bs)) => {
                Value::Array(bs.iter().map(|&b| f(*a, b)).collect())
            }
            (Value::Array(rs), Value::Scalar(b)) => {
                Value::Array(rs.iter().map(|&a| f(a, *b)).collect())
            }
            (Value::Array(rs), Value::Array(bs)) => {
                assert_eq!(
                    rs.len(),
                    bs.len(),
                    "elementwise operation on arrays of different lengths"
                );
                Value::Array(rs.iter().zip(bs).map(|(&a, &b)| f(a, b)).collect())
            }
        }
    }

    /// Elementwise minimum with scalar broadcasting
    #[must_use]
    pub fn minimum(&self, other: &Value) -> Value {
        self.zip_with(other, f64::min)
    }

    /// Elementwise maximum with scalar broadcasting
    #[must_use]
    pub fn maximum(&self, other: &Value) -> Value {
        self.zip_with(other, f64::max)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Scalar(x)
    }
}

impl From<Vec<f64>> for Value {
    fn from(values: Vec<f64>) -> Self {
        Value::Array(values)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Scalar(x) => write!(f, "{x}"),
            Value::Array(values) => {
                write!(f, "[")?;
                for (i, x) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{x}")?;
                }
                write!(f, "]")
            }
        }
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $f:expr) => {
        impl std::ops::$trait for &Value {
            type Output = Value;
            fn $method(self, rhs: &Value) -> Value {
                self.zip_with(rhs, $f)
            }
        }

        impl std::ops::$trait for Value {
            type Output = Value;
            fn $method(self, rhs: Value) -> Value {
                self.zip_with(&rhs, $f)
            }
        }

        impl std::ops::$trait<&Value> for Value {
            type Output = Value;
            fn $method(self, rhs: &Value) -> Value {
                self.zip_with(rhs, $f)
            }
        }

        impl std::ops::$trait<Value> for &Value {
            type Output = Value;
            fn $method(self, rhs: Value) -> Value {
                self.zip_with(&rhs, $f)
            }
        }

        impl std::ops::$trait<f64> for &Value {
            type Output = Value;
            fn $method(self, rhs: f64) -> Value {
                self.zip_with(&Value::Scalar(rhs), $f)
            }
        }

        impl std::ops::$trait<f64> for Value {
            type Output = Value;
            fn $method(self, rhs: f64) -> Value {
                self.zip_with(&Value::Scalar(rhs), $f)
            }
        }
    };
}

impl_binary_op!(Add, add, |a, b| a + b);
impl_binary_op!(Sub, sub, |a, b| a - b);
impl_binary_op!(Mul, mul, |a, b| a * b);
impl_binary_op!(Div, div, |a, b| a / b);

impl std::ops::Neg for &Value {
    type Output = Value;
    fn neg(self) -> Value {
        self.map(|x| -x)
    }
}

impl std::ops::Neg for Value {
    type Output = Value;
    fn neg(self) -> Value {
        self.map(|x| -x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_broadcasts_against_array() {
        let price = Value::Scalar(10.0);
        let sold = Value::Array(vec![1.0, 2.0, 3.0]);

        let revenue = &sold * &price;
        assert_eq!(revenue, Value::Array(vec![10.0, 20.0, 30.0]));
    }

    #[test]
    fn test_array_array_elementwise() {
        let a = Value::Array(vec![1.0, 5.0]);
        let b = Value::Array(vec![4.0, 2.0]);

        assert_eq!(&a + &b, Value::Array(vec![5.0, 7.0]));
        assert_eq!(a.minimum(&b), Value::Array(vec![1.0, 2.0]));
        assert_eq!(a.maximum(&b), Value::Array(vec![4.0, 5.0]));
    }

    #[test]
    fn test_at_rep_broadcast() {
        let scalar = Value::Scalar(2.5);
        assert_eq!(scalar.at_rep(0), Some(2.5));
        assert_eq!(scalar.at_rep(99), Some(2.5));

        let array = Value::Array(vec![1.0, 2.0]);
        assert_eq!(array.at_rep(1), Some(2.0));
        assert_eq!(array.at_rep(2), None);
    }

    #[test]
    fn test_replications() {
        assert_eq!(Value::Scalar(1.0).replications(), None);
        assert_eq!(Value::Array(vec![0.0; 4]).replications(), Some(4));
    }

    #[test]
    #[should_panic(expected = "different lengths")]
    fn test_mismatched_arrays_panic() {
        let _ = Value::Array(vec![1.0]) + Value::Array(vec![1.0, 2.0]);
    }
}
