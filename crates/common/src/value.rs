//! Runtime value representation for the rollvm evaluator.
//!
//! Values are what live on the operand stack during evaluation.

use std::fmt;

/// A tagged stack value: an integer or a piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// Signed 64-bit integer.
    Integer(i64),
    /// Text produced by a format template.
    Text(String),
}

impl Value {
    /// Human-readable name of the variant, used in type mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Text(_) => "text",
        }
    }

    /// The integer payload, if this is an integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            Value::Text(_) => None,
        }
    }

    /// The text payload, if this is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Integer(_) => None,
            Value::Text(s) => Some(s),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{n}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}
