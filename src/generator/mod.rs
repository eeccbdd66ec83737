//! Heuristic example generator
//!
//! Turns a declaration table and a free-text `main` body into an annotated
//! source listing plus a [`StepTrace`]. The trace mirrors the listing line by
//! line:
//!
//! 1. a "program starts" step on the `int main() {` line
//! 2. one step per declaration, each snapshot one variable longer than the last
//! 3. one step per non-blank, non-boilerplate body line, classified by
//!    [`rules::classify`]
//! 4. a "program ends" step on the closing brace
//!
//! Nothing is executed. Loops and conditions are recognized only so that the
//! listing can color them; their bodies are not repeated or skipped.

pub mod decl;
pub mod rules;

pub use decl::{parse_initial_value, VariableDecl};

use crate::trace::{
    ApplyRule, CodeLine, ExecutionStep, FieldKind, InputField, InputRequest, Inputs, LineCategory,
    StepTrace, Value, VariableSnapshot,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

const INDENT: &str = "    ";

/// Listing and trace synthesized from an authoring form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedExample {
    pub code: Vec<CodeLine>,
    pub steps: StepTrace,
    pub input_fields: Vec<InputField>,
}

impl GeneratedExample {
    /// The trace with resolved inputs baked in.
    ///
    /// From each `scanf` step whose variable has a resolved input onward, the
    /// variable shows the input value. The `scanf` step echoes the value as
    /// output, the way a terminal echoes what was typed.
    pub fn trace_for(&self, inputs: &Inputs) -> StepTrace {
        bind_inputs(&self.steps, inputs)
    }
}

/// Line numbers of the structural parts of a generated listing
struct Listing {
    lines: Vec<CodeLine>,
    main_line: usize,
    decl_lines: Vec<usize>,
    body_lines: Vec<usize>,
}

/// Generate the listing, trace, and input fields for a custom example
pub fn generate(variables: &[VariableDecl], body: &str) -> GeneratedExample {
    let listing = build_listing(variables, body);
    let steps = build_steps(variables, &listing);
    let input_fields = variables
        .iter()
        .filter(|v| v.require_input)
        .map(VariableDecl::input_field)
        .collect();

    GeneratedExample {
        code: listing.lines,
        steps,
        input_fields,
    }
}

/// Just the annotated source listing
pub fn generate_listing(variables: &[VariableDecl], body: &str) -> Vec<CodeLine> {
    build_listing(variables, body).lines
}

fn build_listing(variables: &[VariableDecl], body: &str) -> Listing {
    let mut lines = Vec::new();
    let mut next = 1;
    let mut push = |lines: &mut Vec<CodeLine>, line: CodeLine| -> usize {
        let number = next;
        next += 1;
        lines.push(CodeLine { line_number: number, ..line });
        number
    };

    push(
        &mut lines,
        CodeLine::new(0, "#include <stdio.h>", "Standard input/output library")
            .with_category(LineCategory::Declaration),
    );
    push(&mut lines, CodeLine::blank(0));
    let main_line = push(
        &mut lines,
        CodeLine::new(0, "int main() {", "The program's main function"),
    );

    let mut decl_lines = Vec::with_capacity(variables.len());
    for var in variables {
        let number = push(
            &mut lines,
            CodeLine::new(
                0,
                format!("{}{}", INDENT, var.c_declaration()),
                format!("Declares {}", var.name),
            )
            .with_category(LineCategory::Declaration),
        );
        decl_lines.push(number);
    }
    if !variables.is_empty() {
        push(&mut lines, CodeLine::blank(0));
    }

    let mut body_lines = Vec::new();
    let mut last_was_blank = false;
    for raw in body.split('\n') {
        let trimmed = raw.trim_end_matches('\r').trim_start();
        if trimmed.trim().is_empty() {
            push(&mut lines, CodeLine::blank(0));
            last_was_blank = true;
            continue;
        }

        let class = rules::classify(trimmed);
        let mut line = CodeLine::new(0, format!("{}{}", INDENT, trimmed), class.description);
        line.category = class.category;
        let number = push(&mut lines, line);
        if !is_boilerplate(trimmed.trim()) {
            body_lines.push(number);
        }
        last_was_blank = false;
    }
    if !last_was_blank {
        push(&mut lines, CodeLine::blank(0));
    }

    push(
        &mut lines,
        CodeLine::new(0, format!("{}return 0;", INDENT), "Ends the program successfully"),
    );
    push(&mut lines, CodeLine::new(0, "}", "End of main"));

    Listing {
        lines,
        main_line,
        decl_lines,
        body_lines,
    }
}

fn is_boilerplate(line: &str) -> bool {
    line == "int main() {" || line == "return 0;" || line == "}" || line.starts_with("#include")
}

fn build_steps(variables: &[VariableDecl], listing: &Listing) -> StepTrace {
    let mut steps = Vec::new();
    let mut state: Vec<VariableSnapshot> = Vec::with_capacity(variables.len());

    steps.push(ExecutionStep::new(listing.main_line, "The program starts running"));

    for (var, &line) in variables.iter().zip(&listing.decl_lines) {
        state.push(VariableSnapshot::new(var.name.clone(), var.var_type, var.initial()));
        steps.push(
            ExecutionStep::new(line, format!("Declares {}", var.name))
                .with_variables(state.clone())
                .with_highlight(var.name.clone()),
        );
    }

    for &number in &listing.body_lines {
        // body_lines only holds numbers handed out by build_listing
        let code = listing.lines[number - 1].code.trim();
        let class = rules::classify(code);
        if class.rule.is_none() {
            debug!(line = number, code, "no rule matched, using fallback");
        }

        let mut step = ExecutionStep::new(number, class.description).with_variables(state.clone());
        if let Some(output) = class.output {
            step = step.with_output(output);
        }
        if let Some(name) = class.highlight {
            // a loop counter or undeclared name has no row to highlight
            if state.iter().any(|v| v.name == name) {
                step = step.with_highlight(name);
            }
        }
        if let Some(name) = class.input_variable {
            step = step.with_input_request(input_request_for(&name, variables));
        }
        steps.push(step);
    }

    let last_line = listing.lines.len();
    steps.push(ExecutionStep::new(last_line, "The program ends").with_variables(state));

    StepTrace::new(steps)
}

fn input_request_for(name: &str, variables: &[VariableDecl]) -> InputRequest {
    let declared = variables.iter().find(|v| v.name == name);
    let field_kind = declared
        .map(VariableDecl::field_kind)
        .unwrap_or(FieldKind::Text);
    let default_value = declared
        .map(|v| v.initial_value.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string);

    InputRequest {
        key: name.to_string(),
        prompt: format!("Enter a value for {}", name),
        field_kind,
        default_value,
        apply: ApplyRule::for_kind(field_kind),
    }
}

fn bind_inputs(trace: &StepTrace, inputs: &Inputs) -> StepTrace {
    let mut bound: Vec<(String, Value)> = Vec::new();
    let mut steps = trace.steps().to_vec();

    for step in &mut steps {
        if let Some(request) = &step.input_request {
            if let Some(input) = inputs.get(&request.key) {
                bound.retain(|(name, _)| name != &request.key);
                bound.push((request.key.clone(), input.to_value()));
                if step.output.is_none() {
                    step.output = Some(input.to_string());
                }
            }
        }

        for var in &mut step.variables {
            if let Some((_, value)) = bound.iter().find(|(name, _)| *name == var.name) {
                var.value = value.clone();
            }
        }
    }

    StepTrace::new(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::{InputValue, VarType};

    #[test]
    fn listing_wraps_body_in_main() {
        let vars = vec![VariableDecl::new("total", VarType::Int)];
        let lines = generate_listing(&vars, "printf(\"hi\");");
        let code: Vec<&str> = lines.iter().map(|l| l.code.as_str()).collect();
        assert_eq!(
            code,
            vec![
                "#include <stdio.h>",
                "",
                "int main() {",
                "    int total;",
                "",
                "    printf(\"hi\");",
                "",
                "    return 0;",
                "}",
            ]
        );
        for (i, line) in lines.iter().enumerate() {
            assert_eq!(line.line_number, i + 1);
        }
        assert_eq!(lines[5].category, Some(LineCategory::Output));
    }

    #[test]
    fn trailing_blank_body_line_is_not_doubled() {
        let lines = generate_listing(&[], "x = 1;\n");
        let code: Vec<&str> = lines.iter().map(|l| l.code.as_str()).collect();
        assert_eq!(
            code,
            vec!["#include <stdio.h>", "", "int main() {", "    x = 1;", "", "    return 0;", "}"]
        );
    }

    #[test]
    fn steps_follow_the_listing() {
        let vars = vec![
            VariableDecl::new("a", VarType::Int).with_initial("2"),
            VariableDecl::new("b", VarType::Int),
        ];
        let generated = generate(&vars, "b = a * 2;\n\nprintf(\"done\\n\");\n}");
        let steps = generated.steps.steps();

        // start, 2 decls, 2 body lines, end; the stray brace is boilerplate
        assert_eq!(steps.len(), 6);
        assert_eq!(steps[0].line_number, 3);
        assert!(steps[0].variables.is_empty());
        assert_eq!(steps[1].variables.len(), 1);
        assert_eq!(steps[2].variables.len(), 2);
        assert_eq!(steps[2].variables[1].value, Value::Uninitialized);
        assert_eq!(steps[3].highlighted_variable.as_deref(), Some("b"));
        assert_eq!(steps[4].output.as_deref(), Some("done\n"));
        assert_eq!(steps[5].line_number, generated.code.len());
    }

    #[test]
    fn undeclared_highlight_is_dropped() {
        let generated = generate(&[], "for (int i = 0; i < 3; i++) {\nk = 4;");
        assert!(generated
            .steps
            .iter()
            .all(|step| step.highlighted_variable.is_none()));
    }

    #[test]
    fn scanf_attaches_request_and_binds_input() {
        let vars = vec![VariableDecl::new("n", VarType::Int).with_input()];
        let generated = generate(&vars, "scanf(\"%d\", &n);\nn = n + 1;");

        let scanf_step = &generated.steps.steps()[2];
        let request = scanf_step.input_request.as_ref().unwrap();
        assert_eq!(request.key, "n");
        assert_eq!(request.apply, ApplyRule::Number);
        assert_eq!(generated.input_fields.len(), 1);

        let inputs = Inputs::new().with("n", InputValue::Number(7.0));
        let bound = generated.trace_for(&inputs);
        assert_eq!(bound.steps()[1].variables[0].value, Value::Uninitialized);
        assert_eq!(bound.steps()[2].variables[0].value, Value::Number(7.0));
        assert_eq!(bound.steps()[2].output.as_deref(), Some("7"));
        assert_eq!(bound.steps()[3].variables[0].value, Value::Number(7.0));

        // unbound inputs leave the trace untouched
        assert_eq!(generated.trace_for(&Inputs::new()), generated.steps);
    }
}
