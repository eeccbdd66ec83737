use cstepper::catalog::{self, currency, CustomExampleDefinition, Difficulty, ExampleError};
use cstepper::generator::{generate, VariableDecl};
use cstepper::player::TracePlayer;
use cstepper::trace::{Value, VarType};
use rustc_hash::FxHashMap;

fn provided(pairs: &[(&str, &str)]) -> FxHashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn currency_converter_with_one_hundred_dollars() {
    let example = catalog::example_by_id(currency::ID).expect("built-in example");
    let inputs = example
        .resolve_inputs(&provided(&[("dollars", "100")]))
        .expect("numeric input");
    let trace = example.build_trace(&inputs);
    let mut player = TracePlayer::new(trace, 1000).expect("non-empty trace");

    assert_eq!(player.current_step().line_number, 3);
    assert!(player.outputs().is_empty());

    player.jump_to_end();
    let view = player.current_view();
    assert!(view.is_at_end());
    assert_eq!(view.total, 10);
    assert_eq!(
        view.outputs,
        [
            "Enter amount in dollars: ",
            "100",
            "100.00 dollars = 370.00 shekels"
        ]
    );

    let shekels = view.step.variable("shekels").expect("shekels in snapshot");
    assert_eq!(shekels.value, Value::Text("370.00".to_string()));
    let dollars = view.step.variable("dollars").expect("dollars in snapshot");
    assert_eq!(dollars.value, Value::Number(100.0));

    // Walking back past the scanf forgets its echo
    while player.current_step().line_number != 8 {
        assert!(player.step_backward());
    }
    assert_eq!(player.outputs(), ["Enter amount in dollars: "]);
}

#[test]
fn currency_converter_rejects_text_for_a_number() {
    let example = catalog::example_by_id(currency::ID).expect("built-in example");
    assert!(example
        .resolve_inputs(&provided(&[("dollars", "lots")]))
        .is_err());
    assert!(example
        .resolve_inputs(&provided(&[("euros", "5")]))
        .is_err());
}

#[test]
fn test_average_uses_supplied_grades() {
    let example = catalog::example_by_id("test-average").expect("built-in example");
    assert_eq!(example.difficulty, Difficulty::Intermediate);

    let inputs = example
        .resolve_inputs(&provided(&[("numTests", "2"), ("grades", "90, 71")]))
        .expect("valid inputs");
    let mut player = TracePlayer::new(example.build_trace(&inputs), 1000).expect("non-empty trace");
    player.jump_to_end();

    assert_eq!(player.outputs().last().map(String::as_str), Some("Average: 80.50\n"));
    assert_eq!(
        player
            .outputs()
            .iter()
            .filter(|o| o.as_str() == "Enter grade: ")
            .count(),
        2
    );
}

#[test]
fn generated_trace_shows_uninitialized_and_printf_output() {
    let vars = vec![VariableDecl::new("total", VarType::Int)];
    let generated = generate(&vars, "printf(\"Hello World\\n\");");
    let trace = &generated.steps;

    let decl = trace
        .iter()
        .find(|step| step.highlighted_variable.as_deref() == Some("total"))
        .expect("declaration step");
    let total = decl.variable("total").expect("total in snapshot");
    assert_eq!(total.value, Value::Uninitialized);
    assert!(!total.value.is_initialized());

    let decl_index = trace
        .iter()
        .position(|step| std::ptr::eq(step, decl))
        .expect("declaration index");
    let printed = trace
        .iter()
        .skip(decl_index + 1)
        .find_map(|step| step.output.as_deref())
        .expect("printf step");
    assert_eq!(printed, "Hello World\n");
}

#[test]
fn custom_definition_from_json_file() {
    let json = r#"{
        "title": "Double It",
        "description": "Reads a number and doubles it",
        "difficulty": "intermediate",
        "concepts": ["input", "arithmetic"],
        "variables": [
            { "name": "n", "type": "int", "require_input": true, "initial_value": "4" },
            { "name": "twice", "type": "int" }
        ],
        "body": "scanf(\"%d\", &n);\ntwice = n * 2;\nprintf(\"%d\\n\", twice);"
    }"#;
    let path = std::env::temp_dir().join(format!("cstepper-custom-{}.json", std::process::id()));
    std::fs::write(&path, json).expect("write temp file");

    let definition = CustomExampleDefinition::from_json_file(&path).expect("valid json");
    std::fs::remove_file(&path).ok();

    let example = definition.build().expect("accepted definition");
    assert!(example.id.starts_with("double-it-"));
    assert_eq!(example.difficulty, Difficulty::Intermediate);
    assert!(example.has_concept("arithmetic"));

    let inputs = example
        .resolve_inputs(&provided(&[("n", "21")]))
        .expect("numeric input");
    let trace = example.build_trace(&inputs);
    catalog::self_check(&example.code, &trace).expect("replay passes");

    let scanf = trace
        .iter()
        .find(|step| step.input_request.is_some())
        .expect("scanf step");
    assert_eq!(scanf.output.as_deref(), Some("21"));
    assert_eq!(
        scanf.variable("n").map(|v| &v.value),
        Some(&Value::Number(21.0))
    );
}

#[test]
fn malformed_custom_definitions_are_rejected() {
    let missing_body = r#"{ "title": "x", "description": "y" }"#;
    assert!(serde_json::from_str::<CustomExampleDefinition>(missing_body).is_err());

    let path = std::env::temp_dir().join("cstepper-definitely-missing.json");
    assert!(matches!(
        CustomExampleDefinition::from_json_file(&path),
        Err(ExampleError::Io(_))
    ));
}
