use serde::Serialize;
use std::fmt;

/// Scalar operand of a comparison.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Null,
}

impl Value {
    /// Integral numbers that fit in an i64 become `Int`, everything else `Float`.
    pub fn from_number(n: f64) -> Self {
        const LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63

        if n.is_finite() && n.fract() == 0.0 && n >= -LIMIT && n < LIMIT {
            Value::Int(n as i64)
        } else {
            Value::Float(n)
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Null => write!(f, "null"),
        }
    }
}
