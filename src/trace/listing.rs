//! Annotated source listing rendered next to a trace

use serde::{Deserialize, Serialize};
use std::fmt;

/// Display category of a source line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCategory {
    Declaration,
    Input,
    Calculation,
    Condition,
    Loop,
    Output,
}

impl LineCategory {
    pub fn name(self) -> &'static str {
        match self {
            LineCategory::Declaration => "declaration",
            LineCategory::Input => "input",
            LineCategory::Calculation => "calculation",
            LineCategory::Condition => "condition",
            LineCategory::Loop => "loop",
            LineCategory::Output => "output",
        }
    }
}

impl fmt::Display for LineCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One line of the example's source code, 1-based
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeLine {
    pub line_number: usize,
    pub code: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<LineCategory>,
}

impl CodeLine {
    pub fn new(line_number: usize, code: impl Into<String>, explanation: impl Into<String>) -> Self {
        CodeLine {
            line_number,
            code: code.into(),
            explanation: explanation.into(),
            category: None,
        }
    }

    pub fn blank(line_number: usize) -> Self {
        CodeLine::new(line_number, "", "")
    }

    pub fn with_category(mut self, category: LineCategory) -> Self {
        self.category = Some(category);
        self
    }
}
