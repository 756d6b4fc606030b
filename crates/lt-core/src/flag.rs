use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// The observed state of a named flag.
///
/// `Unset` is distinct from `Bool(false)`: a flag that was never written
/// satisfies no predicate at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlagState {
    /// The flag has never been set.
    #[default]
    Unset,
    /// The flag holds a boolean.
    Bool(bool),
}

impl FlagState {
    /// Whether this state satisfies `flag == expected`. Unset never does.
    pub fn satisfies(self, expected: bool) -> bool {
        match self {
            Self::Unset => false,
            Self::Bool(value) => value == expected,
        }
    }
}

impl From<Option<bool>> for FlagState {
    fn from(value: Option<bool>) -> Self {
        value.map_or(Self::Unset, Self::Bool)
    }
}

/// Interpret a loosely typed JSON value as a flag value.
///
/// Only booleans are accepted; strings, numbers and `null` are rejected rather
/// than coerced by truthiness.
pub fn flag_from_json(name: &str, value: &serde_json::Value) -> CoreResult<bool> {
    value.as_bool().ok_or_else(|| CoreError::FlagType {
        name: name.to_string(),
        value: value.to_string(),
    })
}

/// A scalar value stored in a game variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// A boolean value.
    Boolean(bool),
    /// A 64-bit signed integer value.
    Integer(i64),
    /// A 64-bit floating-point value.
    Float(f64),
    /// A text value.
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}
