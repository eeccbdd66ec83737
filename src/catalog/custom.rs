//! Custom examples authored as a declaration table plus a `main` body
//!
//! A [`CustomExampleDefinition`] is what an author writes (usually as a JSON
//! file). Accepting it validates the form, runs the generator, and replays
//! the resulting trace through a [`TracePlayer`] before handing back a
//! [`CodeExample`]. Nothing malformed is accepted silently.

use super::{CodeExample, Difficulty, ExampleError, ExampleSource, TraceSource};
use crate::generator::{self, VariableDecl};
use crate::player::{TracePlayer, DEFAULT_TICK_MS};
use crate::trace::{CodeLine, ExecutionStep, StepTrace};
use regex::Regex;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomExampleDefinition {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub concepts: Vec<String>,
    #[serde(default)]
    pub variables: Vec<VariableDecl>,
    /// Body of `main`; the `#include`, `main` and `return 0;` wrapper is added
    pub body: String,
}

impl CustomExampleDefinition {
    /// Read a definition from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self, ExampleError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Check the authoring form before anything is generated
    pub fn validate(&self) -> Result<(), ExampleError> {
        if self.title.trim().is_empty() {
            return Err(ExampleError::EmptyTitle);
        }
        if self.description.trim().is_empty() {
            return Err(ExampleError::EmptyDescription);
        }

        let mut seen = FxHashSet::default();
        for (index, var) in self.variables.iter().enumerate() {
            let name = var.name.trim();
            if name.is_empty() {
                return Err(ExampleError::EmptyVariableName(index + 1));
            }
            if !identifier_re().is_match(name) {
                return Err(ExampleError::InvalidVariableName(name.to_string()));
            }
            if !seen.insert(name) {
                return Err(ExampleError::DuplicateVariable(name.to_string()));
            }
        }
        Ok(())
    }

    /// Validate, generate, and self-check; returns the playable example
    pub fn build(&self) -> Result<CodeExample, ExampleError> {
        if let Err(err) = self.validate() {
            warn!(title = %self.title, error = %err, "custom example rejected");
            return Err(err);
        }

        let variables: Vec<VariableDecl> = self
            .variables
            .iter()
            .map(|v| VariableDecl {
                name: v.name.trim().to_string(),
                ..v.clone()
            })
            .collect();
        let generated = generator::generate(&variables, &self.body);
        self_check(&generated.code, &generated.steps)?;

        let id = format!("{}-{}", slugify(&self.title), timestamp_base36());
        info!(%id, steps = generated.steps.len(), "custom example accepted");

        Ok(CodeExample {
            id,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            difficulty: self.difficulty,
            concepts: self
                .concepts
                .iter()
                .map(|c| c.trim())
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect(),
            code: generated.code.clone(),
            inputs: generated.input_fields.clone(),
            source: ExampleSource::Custom,
            trace: TraceSource::Generated(generated),
        })
    }
}

/// Replay `trace` through a player and check every visited step.
///
/// Each step must point at a line of `code`, have unique variable names, and
/// highlight only variables present in its own snapshot. The replay must
/// visit exactly `trace.len()` steps.
pub fn self_check(code: &[CodeLine], trace: &StepTrace) -> Result<(), ExampleError> {
    let mut player = TracePlayer::new(trace.clone(), DEFAULT_TICK_MS)?;

    check_step(code, 0, player.current_step())?;
    let mut visited = 1;
    while player.step_forward() {
        check_step(code, player.current_index(), player.current_step())?;
        visited += 1;
    }

    if visited != trace.len() {
        return Err(ExampleError::SelfCheck {
            step: visited,
            reason: format!("replay visited {} of {} steps", visited, trace.len()),
        });
    }
    Ok(())
}

fn check_step(code: &[CodeLine], index: usize, step: &ExecutionStep) -> Result<(), ExampleError> {
    let fail = |reason: String| ExampleError::SelfCheck {
        step: index,
        reason,
    };

    if !code.iter().any(|line| line.line_number == step.line_number) {
        return Err(fail(format!("line {} is not in the listing", step.line_number)));
    }

    let mut names = FxHashSet::default();
    for var in &step.variables {
        if !names.insert(var.name.as_str()) {
            return Err(fail(format!("variable '{}' appears twice", var.name)));
        }
    }

    if let Some(name) = &step.highlighted_variable {
        if step.highlighted().is_none() {
            return Err(fail(format!("highlighted variable '{}' is not in the snapshot", name)));
        }
    }
    Ok(())
}

fn identifier_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid regex"))
}

/// Lowercase, keep letters/digits/spaces/dashes, collapse whitespace to `-`
pub fn slugify(title: &str) -> String {
    let kept: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '-')
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join("-")
}

fn timestamp_base36() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    to_base36(millis)
}

fn to_base36(mut n: u128) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::{LineCategory, VarType};

    fn definition() -> CustomExampleDefinition {
        CustomExampleDefinition {
            title: "Sum of Two Numbers!".to_string(),
            description: "Adds two numbers".to_string(),
            difficulty: Difficulty::Basic,
            concepts: vec!["variables".to_string(), " ".to_string()],
            variables: vec![
                VariableDecl::new("a", VarType::Int).with_initial("2"),
                VariableDecl::new("b", VarType::Int).with_input(),
            ],
            body: "scanf(\"%d\", &b);\na = a + b;\nprintf(\"done\\n\");".to_string(),
        }
    }

    #[test]
    fn builds_a_custom_example() {
        let example = definition().build().unwrap();
        assert!(example.id.starts_with("sum-of-two-numbers-"));
        assert_eq!(example.source, ExampleSource::Custom);
        assert_eq!(example.concepts, vec!["variables"]);
        assert_eq!(example.inputs.len(), 1);
        assert_eq!(example.inputs[0].key, "b");
        assert!(example
            .code
            .iter()
            .any(|l| l.category == Some(LineCategory::Input)));
    }

    #[test]
    fn rejects_blank_fields() {
        let mut def = definition();
        def.title = "  ".to_string();
        assert!(matches!(def.build(), Err(ExampleError::EmptyTitle)));

        let mut def = definition();
        def.description.clear();
        assert!(matches!(def.validate(), Err(ExampleError::EmptyDescription)));

        let mut def = definition();
        def.variables[1].name = " ".to_string();
        assert!(matches!(def.validate(), Err(ExampleError::EmptyVariableName(2))));
    }

    #[test]
    fn rejects_bad_and_duplicate_names() {
        let mut def = definition();
        def.variables[0].name = "2fast".to_string();
        assert!(matches!(def.validate(), Err(ExampleError::InvalidVariableName(n)) if n == "2fast"));

        let mut def = definition();
        def.variables[1].name = "a".to_string();
        assert!(matches!(def.validate(), Err(ExampleError::DuplicateVariable(n)) if n == "a"));
    }

    #[test]
    fn self_check_catches_dangling_highlight() {
        let code = vec![CodeLine::new(1, "x = 1;", "")];
        let trace = StepTrace::new(vec![ExecutionStep::new(1, "assign").with_highlight("x")]);
        assert!(matches!(
            self_check(&code, &trace),
            Err(ExampleError::SelfCheck { step: 0, .. })
        ));
    }

    #[test]
    fn self_check_catches_unknown_line() {
        let code = vec![CodeLine::new(1, "int main() {", "")];
        let trace = StepTrace::new(vec![
            ExecutionStep::new(1, "start"),
            ExecutionStep::new(7, "nowhere"),
        ]);
        assert!(matches!(
            self_check(&code, &trace),
            Err(ExampleError::SelfCheck { step: 1, .. })
        ));
    }

    #[test]
    fn self_check_rejects_empty_trace() {
        assert!(matches!(
            self_check(&[], &StepTrace::default()),
            Err(ExampleError::Player(_))
        ));
    }

    #[test]
    fn parses_json_definitions() {
        let json = r#"{
            "title": "Hello",
            "description": "Prints a greeting",
            "variables": [{ "name": "total", "type": "int" }],
            "body": "printf(\"Hello World\\n\");"
        }"#;
        let def: CustomExampleDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def.difficulty, Difficulty::Basic);
        assert_eq!(def.variables[0].initial_value, "");
        assert!(!def.variables[0].require_input);
        def.build().unwrap();
    }

    #[test]
    fn slugs_and_base36() {
        assert_eq!(slugify("  Sum of   Two!  "), "sum-of-two");
        assert_eq!(slugify("Already-slugged"), "already-slugged");
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }
}
