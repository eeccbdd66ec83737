//! Built-in example: converting dollars to shekels

use super::{CodeExample, Difficulty, ExampleSource, TraceSource};
use crate::trace::{
    CodeLine, ExecutionStep, FieldKind, InputField, Inputs, LineCategory, StepTrace, Value,
    VarType, VariableSnapshot,
};

pub const ID: &str = "currency-converter";
pub const EXCHANGE_RATE: f64 = 3.7;
pub const DEFAULT_DOLLARS: f64 = 100.0;

pub fn example() -> CodeExample {
    CodeExample {
        id: ID.to_string(),
        title: "Currency conversion: dollars to shekels".to_string(),
        description: "A small program that converts dollars to shekels. Shows variable \
                      declarations, input, arithmetic and output."
            .to_string(),
        difficulty: Difficulty::Basic,
        concepts: ["variables", "input", "arithmetic", "output"]
            .map(String::from)
            .to_vec(),
        code: listing(),
        inputs: vec![InputField {
            key: "dollars".to_string(),
            label: "Amount in dollars".to_string(),
            kind: FieldKind::Number,
            default_value: Some("100".to_string()),
            helper_text: None,
        }],
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
        CodeLine::new(4, "    float dollars;", "Declares dollars as a float")
            .with_category(Declaration),
        CodeLine::new(5, "    float exchangeRate = 3.7;", "Declares and initializes the exchange rate")
            .with_category(Declaration),
        CodeLine::new(6, "    float shekels;", "Declares shekels to hold the result")
            .with_category(Declaration),
        CodeLine::blank(7),
        CodeLine::new(8, "    printf(\"Enter amount in dollars: \");", "Shows a prompt to the user")
            .with_category(Output),
        CodeLine::new(9, "    scanf(\"%f\", &dollars);", "Reads a value from the user")
            .with_category(Input),
        CodeLine::blank(10),
        CodeLine::new(11, "    shekels = dollars * exchangeRate;", "Converts: amount times rate")
            .with_category(Calculation),
        CodeLine::blank(12),
        CodeLine::new(
            13,
            "    printf(\"%.2f dollars = %.2f shekels\\n\", dollars, shekels);",
            "Shows the result to the user",
        )
        .with_category(Output),
        CodeLine::new(14, "    return 0;", "The program finished successfully"),
        CodeLine::new(15, "}", "End of the function"),
    ]
}

fn steps(inputs: &Inputs) -> StepTrace {
    let dollars = inputs.number_or("dollars", DEFAULT_DOLLARS);
    let shekels = dollars * EXCHANGE_RATE;

    let dollars_unset = VariableSnapshot::uninit("dollars", VarType::Float);
    let dollars_set = VariableSnapshot::new("dollars", VarType::Float, dollars);
    let rate = VariableSnapshot::new("exchangeRate", VarType::Float, EXCHANGE_RATE);
    let shekels_unset = VariableSnapshot::uninit("shekels", VarType::Float);
    let shekels_set =
        VariableSnapshot::new("shekels", VarType::Float, Value::Text(format!("{:.2}", shekels)));

    let read = vec![dollars_set.clone(), rate.clone(), shekels_unset.clone()];
    let computed = vec![dollars_set, rate.clone(), shekels_set];

    StepTrace::new(vec![
        ExecutionStep::new(3, "The program starts running"),
        ExecutionStep::new(4, "Declares dollars: reserves memory for a decimal number")
            .with_variables(vec![dollars_unset.clone()])
            .with_highlight("dollars"),
        ExecutionStep::new(5, "Creates exchangeRate with the initial value 3.7")
            .with_variables(vec![dollars_unset.clone(), rate.clone()])
            .with_highlight("exchangeRate"),
        ExecutionStep::new(6, "Declares shekels to store the result")
            .with_variables(vec![dollars_unset.clone(), rate.clone(), shekels_unset.clone()])
            .with_highlight("shekels"),
        ExecutionStep::new(8, "Shows a prompt: \"Enter amount in dollars: \"")
            .with_variables(vec![dollars_unset, rate, shekels_unset])
            .with_output("Enter amount in dollars: "),
        ExecutionStep::new(9, "Reads a value from the user into dollars")
            .with_variables(read)
            .with_highlight("dollars")
            .with_output(Value::Number(dollars).to_string()),
        ExecutionStep::new(11, "Computes: multiplies the dollars by the exchange rate")
            .with_variables(computed.clone())
            .with_highlight("shekels"),
        ExecutionStep::new(13, "Shows the result: the dollar amount and its value in shekels")
            .with_variables(computed.clone())
            .with_output(format!("{:.2} dollars = {:.2} shekels", dollars, shekels)),
        ExecutionStep::new(14, "Returns 0: the program finished successfully")
            .with_variables(computed.clone()),
        ExecutionStep::new(15, "The program ends").with_variables(computed),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::InputValue;

    #[test]
    fn default_inputs_give_the_documented_result() {
        let trace = steps(&Inputs::new());
        assert_eq!(trace.len(), 10);
        let outputs = trace.outputs_through(trace.len() - 1);
        assert_eq!(
            outputs,
            vec!["Enter amount in dollars: ", "100", "100.00 dollars = 370.00 shekels"]
        );
    }

    #[test]
    fn input_flows_into_later_snapshots() {
        let inputs = Inputs::new().with("dollars", InputValue::Number(12.5));
        let trace = steps(&inputs);
        let last = trace.step_at(trace.len() - 1).unwrap();
        assert_eq!(last.variable("dollars").unwrap().value, Value::Number(12.5));
        assert_eq!(last.variable("shekels").unwrap().value, Value::from("46.25"));
        // before the scanf line, dollars is still unset
        let prompt = trace.step_at(4).unwrap();
        assert_eq!(prompt.variable("dollars").unwrap().value, Value::Uninitialized);
    }
}
