//! Example catalog
//!
//! A [`CodeExample`] bundles everything the visualizer needs for one lesson:
//! the annotated listing, the input fields to collect before playback, and a
//! way to build the [`StepTrace`] once those inputs are known.
//!
//! Built-in examples are hand-authored ([`currency`], [`average`]); custom
//! ones come from a [`CustomExampleDefinition`] run through the generator.

pub mod average;
pub mod currency;
pub mod custom;
pub mod error;

pub use custom::{self_check, CustomExampleDefinition};
pub use error::ExampleError;

use crate::generator::GeneratedExample;
use crate::trace::{resolve_inputs, CodeLine, InputError, InputField, Inputs, StepTrace};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Basic,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Basic => "basic",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where an example came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExampleSource {
    BuiltIn,
    Custom,
}

/// How an example turns resolved inputs into a trace
#[derive(Debug, Clone)]
pub enum TraceSource {
    /// Hand-authored steps with input values spliced in
    Authored(fn(&Inputs) -> StepTrace),
    /// Synthesized by the heuristic generator
    Generated(GeneratedExample),
}

#[derive(Debug, Clone)]
pub struct CodeExample {
    pub id: String,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub concepts: Vec<String>,
    pub code: Vec<CodeLine>,
    pub inputs: Vec<InputField>,
    pub source: ExampleSource,
    pub trace: TraceSource,
}

impl CodeExample {
    /// Build the trace for one set of resolved inputs
    pub fn build_trace(&self, inputs: &Inputs) -> StepTrace {
        match &self.trace {
            TraceSource::Authored(build) => build(inputs),
            TraceSource::Generated(generated) => generated.trace_for(inputs),
        }
    }

    /// Resolve raw input strings against this example's fields
    pub fn resolve_inputs(&self, provided: &FxHashMap<String, String>) -> Result<Inputs, InputError> {
        resolve_inputs(&self.inputs, provided)
    }

    /// Look up a listing line by its 1-based number
    pub fn line(&self, line_number: usize) -> Option<&CodeLine> {
        self.code.iter().find(|line| line.line_number == line_number)
    }

    pub fn has_concept(&self, concept: &str) -> bool {
        self.concepts.iter().any(|c| c == concept)
    }
}

/// Every built-in example, in menu order
pub fn all_examples() -> Vec<CodeExample> {
    vec![currency::example(), average::example()]
}

pub fn example_by_id(id: &str) -> Option<CodeExample> {
    all_examples().into_iter().find(|example| example.id == id)
}

pub fn examples_by_difficulty(difficulty: Difficulty) -> Vec<CodeExample> {
    all_examples()
        .into_iter()
        .filter(|example| example.difficulty == difficulty)
        .collect()
}

pub fn examples_by_concept(concept: &str) -> Vec<CodeExample> {
    all_examples()
        .into_iter()
        .filter(|example| example.has_concept(concept))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups() {
        assert!(example_by_id("currency-converter").is_some());
        assert!(example_by_id("test-average").is_some());
        assert!(example_by_id("missing").is_none());

        let basic = examples_by_difficulty(Difficulty::Basic);
        assert!(basic.iter().any(|e| e.id == "currency-converter"));
        assert!(basic.iter().all(|e| e.difficulty == Difficulty::Basic));

        let loops = examples_by_concept("loops");
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].id, "test-average");
    }

    #[test]
    fn built_ins_pass_self_check_with_defaults() {
        for example in all_examples() {
            let inputs = example.resolve_inputs(&FxHashMap::default()).unwrap();
            let trace = example.build_trace(&inputs);
            self_check(&example.code, &trace).unwrap();
        }
    }
}
