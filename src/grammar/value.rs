//! Typed casting of raw command-line tokens.
//!
//! Every argument and parameter declares a [`ValueType`]; extraction casts the
//! matched token through it into a [`Value`]. Boolean casting follows the
//! permissive rule users expect on a command line: `true`/`t`/`1` (any case,
//! surrounding whitespace ignored) are true, everything else is false.

use crate::error::{ConfigError, ParseError};
use std::fmt;

/// Declared type of an argument or parameter value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueType {
    /// Raw string, cast is identity
    #[default]
    Str,
    /// 64-bit signed integer
    Int,
    /// 64-bit float
    Float,
    /// Boolean literal (`true`/`t`/`1` vs everything else)
    Bool,
}

impl ValueType {
    /// Resolve a textual type name (`string`, `int`, `float`, `boolean`).
    ///
    /// The registration builders take [`ValueType`] directly, so an unknown
    /// type cannot be expressed there; this is the boundary for anything
    /// that declares types as text (config-driven command definitions,
    /// external tooling) and the only place an unknown type name is
    /// rejected.
    pub fn parse(name: &str) -> Result<Self, ConfigError> {
        match name {
            "string" => Ok(ValueType::Str),
            "int" => Ok(ValueType::Int),
            "float" => Ok(ValueType::Float),
            "boolean" => Ok(ValueType::Bool),
            other => Err(ConfigError::InvalidType {
                name: other.to_string(),
            }),
        }
    }

    /// Name used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            ValueType::Str => "string",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::Bool => "boolean",
        }
    }

    /// Cast a raw token into a typed value.
    ///
    /// String and boolean casts never fail; int and float casts fail when the
    /// token is not a number.
    pub fn cast(&self, raw: &str) -> Result<Value, ParseError> {
        match self {
            ValueType::Str => Ok(Value::Str(raw.to_string())),
            ValueType::Int => raw
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| ParseError::InvalidNumber {
                    value: raw.to_string(),
                    target: self.name(),
                }),
            ValueType::Float => raw
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| ParseError::InvalidNumber {
                    value: raw.to_string(),
                    target: self.name(),
                }),
            ValueType::Bool => {
                let normalized = raw.trim().to_ascii_lowercase();
                Ok(Value::Bool(matches!(
                    normalized.as_str(),
                    "true" | "t" | "1"
                )))
            }
        }
    }
}

/// A typed value produced by casting a command-line token
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// String value
    Str(String),
    /// Integer value
    Int(i64),
    /// Float value
    Float(f64),
    /// Boolean value
    Bool(bool),
}

impl Value {
    /// Borrow the string payload, if this is a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Integer payload, if this is an int value
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Float payload, if this is a float value
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Boolean payload, if this is a boolean value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{s}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}
