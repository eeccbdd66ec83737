//! Variable declarations for generated examples

use crate::trace::{FieldKind, InputField, Value, VarType};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// One row of the declaration table an author fills in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub var_type: VarType,
    /// Initial value as typed by the author; empty means uninitialized
    #[serde(default)]
    pub initial_value: String,
    /// Collect a value for this variable before playback
    #[serde(default)]
    pub require_input: bool,
}

impl VariableDecl {
    pub fn new(name: impl Into<String>, var_type: VarType) -> Self {
        VariableDecl {
            name: name.into(),
            var_type,
            initial_value: String::new(),
            require_input: false,
        }
    }

    pub fn with_initial(mut self, value: impl Into<String>) -> Self {
        self.initial_value = value.into();
        self
    }

    pub fn with_input(mut self) -> Self {
        self.require_input = true;
        self
    }

    /// The C declaration line, without indentation
    pub fn c_declaration(&self) -> String {
        let init = self.initial_value.trim();
        let head = match self.var_type {
            VarType::String => format!("char {}[]", self.name),
            ty => format!("{} {}", ty.keyword(), self.name),
        };
        if init.is_empty() {
            format!("{};", head)
        } else {
            format!("{} = {};", head, init)
        }
    }

    pub fn initial(&self) -> Value {
        parse_initial_value(self.var_type, &self.initial_value)
    }

    pub fn field_kind(&self) -> FieldKind {
        field_kind_for(self.var_type)
    }

    pub fn input_field(&self) -> InputField {
        let default = self.initial_value.trim();
        InputField {
            key: self.name.clone(),
            label: format!("Value for {}", self.name),
            kind: self.field_kind(),
            default_value: (!default.is_empty()).then(|| default.to_string()),
            helper_text: Some(format!("Variable type: {}", self.var_type.label())),
        }
    }
}

pub(crate) fn field_kind_for(var_type: VarType) -> FieldKind {
    if var_type.is_numeric() {
        FieldKind::Number
    } else {
        FieldKind::Text
    }
}

/// Best-effort parse of an author-typed initial value.
///
/// Anything that does not parse for the declared type is left
/// [`Value::Uninitialized`] rather than guessed at.
pub fn parse_initial_value(var_type: VarType, raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Uninitialized;
    }

    match var_type {
        VarType::Int => int_prefix_re()
            .find(trimmed)
            .and_then(|m| m.as_str().parse::<i64>().ok())
            .map(Value::from)
            .unwrap_or(Value::Uninitialized),
        VarType::Float | VarType::Double => trimmed
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(Value::Number)
            .unwrap_or(Value::Uninitialized),
        VarType::Bool => {
            let normalized = trimmed.to_lowercase();
            Value::Bool(matches!(normalized.as_str(), "true" | "1" | "yes" | "כן"))
        }
        VarType::Char => {
            let inner = char_literal_re()
                .captures(trimmed)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str())
                .unwrap_or(trimmed);
            inner
                .chars()
                .next()
                .map(|c| Value::Text(c.to_string()))
                .unwrap_or(Value::Uninitialized)
        }
        VarType::String => Value::Text(trimmed.to_string()),
    }
}

fn int_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[+-]?\d+").expect("valid regex"))
}

fn char_literal_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"'(.+)'").expect("valid regex"))
}
