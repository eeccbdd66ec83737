//! Variable values shown in a step's snapshot
//!
//! Values are tagged like C's scalar types but carry no memory model: a
//! snapshot only records what the visualizer should display for a variable at
//! one point in time.
//!
//! - [`Value::Number`]: any numeric value (`int`, `float`, `double`)
//! - [`Value::Text`]: `char` and `char[]` contents, or preformatted numbers
//! - [`Value::Bool`]: `bool`
//! - [`Value::Uninitialized`]: declared but never assigned

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared type of a variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarType {
    Int,
    Float,
    Double,
    Char,
    String,
    Bool,
}

impl VarType {
    pub const ALL: [VarType; 6] = [
        VarType::Int,
        VarType::Float,
        VarType::Double,
        VarType::Char,
        VarType::String,
        VarType::Bool,
    ];

    /// Keyword used when this type is written in a declaration
    pub fn keyword(self) -> &'static str {
        match self {
            VarType::Int => "int",
            VarType::Float => "float",
            VarType::Double => "double",
            VarType::Char => "char",
            VarType::String => "string",
            VarType::Bool => "bool",
        }
    }

    /// Human readable label, e.g. for input helper text
    pub fn label(self) -> &'static str {
        match self {
            VarType::Int => "whole number (int)",
            VarType::Float => "decimal number (float)",
            VarType::Double => "precise decimal number (double)",
            VarType::Char => "single character (char)",
            VarType::String => "string (char[])",
            VarType::Bool => "boolean (bool)",
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, VarType::Int | VarType::Float | VarType::Double)
    }

    pub fn from_keyword(word: &str) -> Option<VarType> {
        VarType::ALL.into_iter().find(|ty| ty.keyword() == word)
    }
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Value of a variable at one step
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Value {
    Number(f64),
    Text(String),
    Bool(bool),
    #[default]
    Uninitialized,
}

impl Value {
    /// Check if this value is initialized
    pub fn is_initialized(&self) -> bool {
        !matches!(self, Value::Uninitialized)
    }

    /// Get the numeric value, returns None if not a Number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// Formats the value the way the variables pane shows it.
///
/// Whole numbers print without a fractional part (`100`, not `100.0`).
/// Uninitialized values print as `[uninit]`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Uninitialized => f.write_str("[uninit]"),
        }
    }
}
