//! Built-in example: averaging test grades in a loop
//!
//! The loop is unrolled when the trace is built: each grade gets its own
//! group of steps (condition check, prompt, read, accumulate). The number of
//! iterations is the smaller of `numTests` and the grades actually supplied,
//! and `numTests` is read as that number.

use super::{CodeExample, Difficulty, ExampleSource, TraceSource};
use crate::trace::{
    CodeLine, ExecutionStep, FieldKind, InputField, Inputs, LineCategory, StepTrace, Value,
    VarType, VariableSnapshot,
};

pub const ID: &str = "test-average";
const DEFAULT_TESTS: f64 = 3.0;
const DEFAULT_GRADES: &str = "85,90,78";

pub fn example() -> CodeExample {
    CodeExample {
        id: ID.to_string(),
        title: "Average of test grades".to_string(),
        description: "Reads a number of grades in a loop, adds them up and prints their \
                      average."
            .to_string(),
        difficulty: Difficulty::Intermediate,
        concepts: ["variables", "input", "loops", "arithmetic", "output"]
            .map(String::from)
            .to_vec(),
        code: listing(),
        inputs: vec![
            InputField {
                key: "numTests".to_string(),
                label: "Number of tests".to_string(),
                kind: FieldKind::Number,
                default_value: Some("3".to_string()),
                helper_text: None,
            },
            InputField {
                key: "grades".to_string(),
                label: "Grades (comma separated)".to_string(),
                kind: FieldKind::Text,
                default_value: Some(DEFAULT_GRADES.to_string()),
                helper_text: Some("Only the first numTests grades are used".to_string()),
            },
        ],
        source: ExampleSource::BuiltIn,
        trace: TraceSource::Authored(steps),
    }
}

fn listing() -> Vec<CodeLine> {
    use LineCategory::*;

    vec![
        CodeLine::new(1, "#include <stdio.h>", "Standard input/output library")
            .with_category(Declaration),
        CodeLine::blank(2),
        CodeLine::new(3, "int main() {", "main: where the program starts"),
        CodeLine::new(4, "    int numTests;", "How many grades will be entered")
            .with_category(Declaration),
        CodeLine::new(5, "    int grade;", "Holds the grade just read").with_category(Declaration),
        CodeLine::new(6, "    int sum = 0;", "Running total, starts at zero")
            .with_category(Declaration),
        CodeLine::new(7, "    float average;", "The final result").with_category(Declaration),
        CodeLine::blank(8),
        CodeLine::new(9, "    printf(\"How many tests? \");", "Asks for the number of tests")
            .with_category(Output),
        CodeLine::new(10, "    scanf(\"%d\", &numTests);", "Reads the number of tests")
            .with_category(Input),
        CodeLine::blank(11),
        CodeLine::new(
            12,
            "    for (int i = 0; i < numTests; i++) {",
            "Repeats once per test while i < numTests",
        )
        .with_category(Loop),
        CodeLine::new(13, "        printf(\"Enter grade: \");", "Asks for the next grade")
            .with_category(Output),
        CodeLine::new(14, "        scanf(\"%d\", &grade);", "Reads one grade").with_category(Input),
        CodeLine::new(15, "        sum = sum + grade;", "Adds the grade to the total")
            .with_category(Calculation),
        CodeLine::new(16, "    }", "End of the loop body"),
        CodeLine::blank(17),
        CodeLine::new(18, "    average = (float)sum / numTests;", "Divides the total by the count")
            .with_category(Calculation),
        CodeLine::new(19, "    printf(\"Average: %.2f\\n\", average);", "Prints the average")
            .with_category(Output),
        CodeLine::new(20, "    return 0;", "The program finished successfully"),
        CodeLine::new(21, "}", "End of the function"),
    ]
}

/// Grades from a comma separated list; entries that are not numbers are skipped
fn parse_grades(raw: &str) -> Vec<f64> {
    raw.split(',')
        .filter_map(|g| g.trim().parse::<f64>().ok())
        .filter(|g| g.is_finite())
        .collect()
}

/// Snapshot builder: declaration order is numTests, grade, sum, average, i
struct Vars {
    num_tests: Value,
    grade: Value,
    sum: Value,
    average: Value,
    i: Option<Value>,
    declared: usize,
}

impl Vars {
    fn snapshot(&self) -> Vec<VariableSnapshot> {
        let all = [
            ("numTests", VarType::Int, &self.num_tests),
            ("grade", VarType::Int, &self.grade),
            ("sum", VarType::Int, &self.sum),
            ("average", VarType::Float, &self.average),
        ];
        let mut vars: Vec<VariableSnapshot> = all
            .into_iter()
            .take(self.declared)
            .map(|(name, ty, value)| VariableSnapshot::new(name, ty, value.clone()))
            .collect();
        if let Some(i) = &self.i {
            vars.push(VariableSnapshot::new("i", VarType::Int, i.clone()));
        }
        vars
    }
}

fn steps(inputs: &Inputs) -> StepTrace {
    let requested = inputs.number_or("numTests", DEFAULT_TESTS).max(0.0).floor();
    let grades = parse_grades(&inputs.text_or("grades", DEFAULT_GRADES));
    let count = grades.len().min(requested as usize);

    let mut vars = Vars {
        num_tests: Value::Uninitialized,
        grade: Value::Uninitialized,
        sum: Value::Number(0.0),
        average: Value::Uninitialized,
        i: None,
        declared: 0,
    };
    let mut steps = vec![ExecutionStep::new(3, "The program starts running")];

    for (line, name, text) in [
        (4, "numTests", "Declares numTests"),
        (5, "grade", "Declares grade"),
        (6, "sum", "Declares sum and sets it to 0"),
        (7, "average", "Declares average"),
    ] {
        vars.declared += 1;
        steps.push(
            ExecutionStep::new(line, text)
                .with_variables(vars.snapshot())
                .with_highlight(name),
        );
    }

    steps.push(
        ExecutionStep::new(9, "Asks how many tests there are")
            .with_variables(vars.snapshot())
            .with_output("How many tests? "),
    );

    // numTests is read as the number of grades actually supplied
    vars.num_tests = Value::from(count as i64);
    let read_description = if (count as f64) < requested {
        format!(
            "Reads the number of tests into numTests ({} requested, only {} grades supplied)",
            requested, count
        )
    } else {
        "Reads the number of tests into numTests".to_string()
    };
    steps.push(
        ExecutionStep::new(10, read_description)
            .with_variables(vars.snapshot())
            .with_highlight("numTests")
            .with_output(vars.num_tests.to_string()),
    );

    let mut sum = 0.0;
    for (k, grade) in grades.iter().take(count).enumerate() {
        vars.i = Some(Value::from(k as i64));
        steps.push(
            ExecutionStep::new(
                12,
                format!("Iteration {}: i = {} and i < numTests, so the loop body runs", k + 1, k),
            )
            .with_variables(vars.snapshot())
            .with_highlight("i"),
        );
        steps.push(
            ExecutionStep::new(13, "Asks for the next grade")
                .with_variables(vars.snapshot())
                .with_output("Enter grade: "),
        );

        vars.grade = Value::Number(*grade);
        steps.push(
            ExecutionStep::new(14, format!("Reads grade number {}", k + 1))
                .with_variables(vars.snapshot())
                .with_highlight("grade")
                .with_output(vars.grade.to_string()),
        );

        sum += grade;
        vars.sum = Value::Number(sum);
        steps.push(
            ExecutionStep::new(15, format!("Adds the grade to sum, which is now {}", sum))
                .with_variables(vars.snapshot())
                .with_highlight("sum"),
        );
    }

    vars.i = Some(Value::from(count as i64));
    steps.push(
        ExecutionStep::new(12, format!("i = {}: the condition is false and the loop ends", count))
            .with_variables(vars.snapshot())
            .with_highlight("i"),
    );
    vars.i = None;

    let average = if count == 0 { 0.0 } else { sum / count as f64 };
    vars.average = Value::Text(format!("{:.2}", average));
    steps.push(
        ExecutionStep::new(18, "Computes the average: sum divided by the number of tests")
            .with_variables(vars.snapshot())
            .with_highlight("average"),
    );
    steps.push(
        ExecutionStep::new(19, "Prints the average with two decimals")
            .with_variables(vars.snapshot())
            .with_output(format!("Average: {:.2}\n", average)),
    );
    steps.push(
        ExecutionStep::new(20, "Returns 0: the program finished successfully")
            .with_variables(vars.snapshot()),
    );
    steps.push(ExecutionStep::new(21, "The program ends").with_variables(vars.snapshot()));

    StepTrace::new(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::InputValue;

    #[test]
    fn defaults_average_three_grades() {
        let trace = steps(&Inputs::new());
        let outputs = trace.outputs_through(trace.len() - 1);
        assert_eq!(outputs.first().map(String::as_str), Some("How many tests? "));
        assert_eq!(outputs.last().map(String::as_str), Some("Average: 84.33\n"));
        assert_eq!(outputs.iter().filter(|o| *o == "Enter grade: ").count(), 3);
    }

    #[test]
    fn loop_counter_is_scoped_to_the_loop() {
        let trace = steps(&Inputs::new());
        let last = trace.step_at(trace.len() - 1).unwrap();
        assert!(last.variable("i").is_none());
        assert!(trace.iter().any(|s| s.variable("i").is_some()));
    }

    #[test]
    fn fewer_grades_than_tests() {
        let inputs = Inputs::new()
            .with("numTests", InputValue::Number(5.0))
            .with("grades", InputValue::Text("100, x, 50".to_string()));
        let trace = steps(&inputs);
        let outputs = trace.outputs_through(trace.len() - 1);
        assert_eq!(outputs.last().map(String::as_str), Some("Average: 75.00\n"));

        let read = trace.iter().find(|s| s.line_number == 10).unwrap();
        assert_eq!(read.output.as_deref(), Some("2"));
        assert!(read.description.contains("5 requested"));

        // The exit check must really be false: i == numTests
        let exit = trace.iter().filter(|s| s.line_number == 12).last().unwrap();
        assert_eq!(exit.variable("i").unwrap().value, Value::Number(2.0));
        assert_eq!(exit.variable("numTests").unwrap().value, Value::Number(2.0));
        assert_eq!(exit.highlighted_variable.as_deref(), Some("i"));
    }

    #[test]
    fn loop_exit_matches_num_tests_by_default() {
        let trace = steps(&Inputs::new());
        let exit = trace.iter().filter(|s| s.line_number == 12).last().unwrap();
        assert_eq!(
            exit.variable("i").unwrap().value,
            exit.variable("numTests").unwrap().value
        );
        let read = trace.iter().find(|s| s.line_number == 10).unwrap();
        assert_eq!(read.description, "Reads the number of tests into numTests");
    }

    #[test]
    fn zero_tests_does_not_divide_by_zero() {
        let inputs = Inputs::new().with("numTests", InputValue::Number(0.0));
        let trace = steps(&inputs);
        let outputs = trace.outputs_through(trace.len() - 1);
        assert_eq!(outputs.last().map(String::as_str), Some("Average: 0.00\n"));
    }
}
