//! Input requests and resolved input values
//!
//! A trace may depend on values the learner supplies before playback (the
//! amount typed into a `scanf`, a list of grades). These are collected once,
//! resolved into an [`Inputs`] map, and then baked into the steps when the
//! trace is built.

use crate::trace::value::Value;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Kind of form field used to collect an input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Number,
    Text,
    Multiline,
}

/// A single resolved input value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    Number(f64),
    Text(String),
}

impl InputValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            InputValue::Number(n) => Some(*n),
            InputValue::Text(_) => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            InputValue::Number(n) => Value::Number(*n),
            InputValue::Text(s) => Value::Text(s.clone()),
        }
    }
}

impl fmt::Display for InputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputValue::Number(n) => write!(f, "{}", n),
            InputValue::Text(s) => f.write_str(s),
        }
    }
}

/// Input values keyed by name, resolved before playback starts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inputs {
    values: FxHashMap<String, InputValue>,
}

impl Inputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&InputValue> {
        self.values.get(key)
    }

    /// Numeric input, or `default` when absent or not a number
    pub fn number_or(&self, key: &str, default: f64) -> f64 {
        self.get(key).and_then(InputValue::as_number).unwrap_or(default)
    }

    /// Text form of an input, or `default` when absent
    pub fn text_or(&self, key: &str, default: &str) -> String {
        self.get(key)
            .map(|v| v.to_string())
            .unwrap_or_else(|| default.to_string())
    }

    /// Returns a copy of these inputs with `key` set to `value`
    pub fn with(&self, key: impl Into<String>, value: InputValue) -> Self {
        let mut next = self.clone();
        next.values.insert(key.into(), value);
        next
    }

    pub fn insert(&mut self, key: impl Into<String>, value: InputValue) {
        self.values.insert(key.into(), value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// How a raw string is folded into the input map.
///
/// Kept as data instead of a closure so that steps carrying an
/// [`InputRequest`] stay serializable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplyRule {
    /// Parse as a number; unparseable text stores 0
    Number,
    /// Store the raw text unchanged
    Text,
}

impl ApplyRule {
    pub fn for_kind(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Number => ApplyRule::Number,
            FieldKind::Text | FieldKind::Multiline => ApplyRule::Text,
        }
    }

    /// Pure: returns new inputs with `key` set from `raw`
    pub fn apply(self, key: &str, existing: &Inputs, raw: &str) -> Inputs {
        let value = match self {
            ApplyRule::Number => InputValue::Number(parse_number(raw).unwrap_or(0.0)),
            ApplyRule::Text => InputValue::Text(raw.to_string()),
        };
        existing.with(key, value)
    }
}

/// A point where a trace depends on a value supplied by the learner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputRequest {
    pub key: String,
    pub prompt: String,
    pub field_kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    pub apply: ApplyRule,
}

impl InputRequest {
    pub fn apply(&self, existing: &Inputs, raw: &str) -> Inputs {
        self.apply.apply(&self.key, existing, raw)
    }
}

/// A form field an example declares it needs before playback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputField {
    pub key: String,
    pub label: String,
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helper_text: Option<String>,
}

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("input '{key}' expects a number, got '{raw}'")]
    NotANumber { key: String, raw: String },

    #[error("no input field named '{0}'")]
    UnknownField(String),
}

/// Resolve raw values for `fields` into an [`Inputs`] map.
///
/// Missing or blank values fall back to the field default. A number field
/// with neither resolves to 0, a text field to the empty string.
pub fn resolve_inputs(
    fields: &[InputField],
    provided: &FxHashMap<String, String>,
) -> Result<Inputs, InputError> {
    if let Some(unknown) = provided
        .keys()
        .find(|key| !fields.iter().any(|field| &field.key == *key))
    {
        return Err(InputError::UnknownField(unknown.clone()));
    }

    let mut inputs = Inputs::new();
    for field in fields {
        let raw = provided
            .get(&field.key)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .or(field.default_value.as_deref());

        let value = match (field.kind, raw) {
            (FieldKind::Number, Some(raw)) => {
                let n = parse_number(raw).ok_or_else(|| InputError::NotANumber {
                    key: field.key.clone(),
                    raw: raw.to_string(),
                })?;
                InputValue::Number(n)
            }
            (FieldKind::Number, None) => InputValue::Number(0.0),
            (_, raw) => InputValue::Text(raw.unwrap_or_default().to_string()),
        };
        inputs.insert(field.key.clone(), value);
    }
    Ok(inputs)
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}
