//! Step traces: the pre-authored execution script a visualizer plays back
//!
//! A [`StepTrace`] is a finite, ordered list of [`ExecutionStep`]s. Each step
//! describes the state of the program immediately after executing one source
//! line: a full snapshot of the visible variables, plus an optional chunk of
//! output and an optional [`InputRequest`].
//!
//! Traces are produced either by hand (see [`crate::catalog`]) or by the
//! heuristic generator in [`crate::generator`], and are read-only once built.
//!
//! # Indexing
//!
//! [`StepTrace::step_at`] returns `None` for any index outside `0..len()`.
//! That is the end-of-trace signal, not an error.

pub mod input;
pub mod listing;
pub mod value;

pub use input::{
    resolve_inputs, ApplyRule, FieldKind, InputError, InputField, InputRequest, InputValue, Inputs,
};
pub use listing::{CodeLine, LineCategory};
pub use value::{Value, VarType};

use serde::{Deserialize, Serialize};

/// State of one program variable at one step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableSnapshot {
    pub name: String,
    #[serde(rename = "type")]
    pub var_type: VarType,
    #[serde(default)]
    pub value: Value,
}

impl VariableSnapshot {
    pub fn new(name: impl Into<String>, var_type: VarType, value: impl Into<Value>) -> Self {
        VariableSnapshot {
            name: name.into(),
            var_type,
            value: value.into(),
        }
    }

    /// A declared variable that has not been assigned yet
    pub fn uninit(name: impl Into<String>, var_type: VarType) -> Self {
        VariableSnapshot {
            name: name.into(),
            var_type,
            value: Value::Uninitialized,
        }
    }
}

/// The state of the world immediately after executing `line_number`.
///
/// `variables` is a complete snapshot in declaration order, never a delta
/// against the previous step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionStep {
    pub line_number: usize,
    pub description: String,
    #[serde(default)]
    pub variables: Vec<VariableSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlighted_variable: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_request: Option<InputRequest>,
}

impl ExecutionStep {
    pub fn new(line_number: usize, description: impl Into<String>) -> Self {
        ExecutionStep {
            line_number,
            description: description.into(),
            variables: Vec::new(),
            output: None,
            highlighted_variable: None,
            input_request: None,
        }
    }

    pub fn with_variables(mut self, variables: Vec<VariableSnapshot>) -> Self {
        self.variables = variables;
        self
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_highlight(mut self, name: impl Into<String>) -> Self {
        self.highlighted_variable = Some(name.into());
        self
    }

    pub fn with_input_request(mut self, request: InputRequest) -> Self {
        self.input_request = Some(request);
        self
    }

    /// Look up a variable in this step's snapshot
    pub fn variable(&self, name: &str) -> Option<&VariableSnapshot> {
        self.variables.iter().find(|v| v.name == name)
    }

    /// The snapshot entry named by `highlighted_variable`, if it exists
    pub fn highlighted(&self) -> Option<&VariableSnapshot> {
        self.highlighted_variable
            .as_deref()
            .and_then(|name| self.variable(name))
    }
}

/// Finite ordered sequence of execution steps, indexed `0..len()`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepTrace {
    steps: Vec<ExecutionStep>,
}

impl StepTrace {
    pub fn new(steps: Vec<ExecutionStep>) -> Self {
        StepTrace { steps }
    }

    /// Get a step by index; `None` past either end
    pub fn step_at(&self, index: usize) -> Option<&ExecutionStep> {
        self.steps.get(index)
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[ExecutionStep] {
        &self.steps
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExecutionStep> {
        self.steps.iter()
    }

    /// Outputs of steps `0..=index`, in order.
    ///
    /// This is the output log a forward traversal to `index` produces.
    pub fn outputs_through(&self, index: usize) -> Vec<String> {
        self.steps
            .iter()
            .take(index.saturating_add(1))
            .filter_map(|step| step.output.clone())
            .collect()
    }
}

impl From<Vec<ExecutionStep>> for StepTrace {
    fn from(steps: Vec<ExecutionStep>) -> Self {
        StepTrace::new(steps)
    }
}

impl<'a> IntoIterator for &'a StepTrace {
    type Item = &'a ExecutionStep;
    type IntoIter = std::slice::Iter<'a, ExecutionStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_steps() -> StepTrace {
        StepTrace::new(vec![
            ExecutionStep::new(1, "start"),
            ExecutionStep::new(2, "print").with_output("a"),
            ExecutionStep::new(3, "print").with_output("b"),
        ])
    }

    #[test]
    fn step_at_boundaries() {
        let trace = three_steps();
        assert_eq!(trace.len(), 3);
        assert!(trace.step_at(trace.len() - 1).is_some());
        assert!(trace.step_at(trace.len()).is_none());
        assert!(trace.step_at(usize::MAX).is_none());
    }

    #[test]
    fn empty_trace_has_no_steps() {
        let trace = StepTrace::default();
        assert!(trace.is_empty());
        assert!(trace.step_at(0).is_none());
    }

    #[test]
    fn outputs_through_is_inclusive() {
        let trace = three_steps();
        assert!(trace.outputs_through(0).is_empty());
        assert_eq!(trace.outputs_through(1), vec!["a"]);
        assert_eq!(trace.outputs_through(2), vec!["a", "b"]);
        assert_eq!(trace.outputs_through(99), vec!["a", "b"]);
    }

    #[test]
    fn highlighted_resolves_against_snapshot() {
        let step = ExecutionStep::new(4, "declare")
            .with_variables(vec![VariableSnapshot::uninit("x", VarType::Int)])
            .with_highlight("x");
        assert_eq!(step.highlighted().map(|v| v.name.as_str()), Some("x"));

        let dangling = ExecutionStep::new(4, "declare").with_highlight("y");
        assert!(dangling.highlighted().is_none());
    }

    #[test]
    fn serializes_as_plain_step_list() {
        let trace = three_steps();
        let json = serde_json::to_value(&trace).unwrap();
        assert!(json.is_array());
        assert_eq!(json[1]["output"], "a");
        assert!(json[0].get("output").is_none());
    }
}
