use pretty_assertions::assert_eq;

use varconf::{
    environment::{BuilderState, Environment, EnvironmentBuilder},
    error::ConfigError,
    evaluate_program, parse_program,
    parser::MAX_NESTING_DEPTH,
    render, run,
    value::Value,
};

fn build(source: &str) -> Result<Environment, ConfigError> {
    let program = parse_program(source).unwrap_or_else(|e| panic!("{source:?} failed: {e}"));
    evaluate_program(&program)
}

fn names(environment: &Environment) -> Vec<&str> {
    environment.names().collect()
}

#[test]
fn smoke_test() {
    let environment = build("").unwrap();
    assert!(environment.is_empty());
    assert_eq!(render::to_json(&environment).unwrap(), "{}\n");
}

#[test]
fn test_bindings_keep_declaration_order() {
    let environment = build("var z = 1\nvar a = 2\nvar m = 3").unwrap();
    assert_eq!(names(&environment), ["z", "a", "m"]);
}

#[test]
fn test_redeclaration_keeps_first_position() {
    let environment = build("var a = 1\nvar b = 2\nvar a = 3\n").unwrap();
    assert_eq!(names(&environment), ["a", "b"]);
    assert_eq!(environment.get("a"), Some(&Value::Integer(3)));
    assert_eq!(environment.len(), 2);
}

#[test]
fn test_redeclaration_sees_previous_value() {
    let environment = build("var a = 1\nvar a = !(a 1 +)\nvar a = !(a a +)").unwrap();
    assert_eq!(environment.get("a"), Some(&Value::Integer(4)));
}

#[test]
fn test_references_are_backward_only() {
    let error = build("var a = !(b)\nvar b = 1").unwrap_err();
    assert_eq!(error.to_string(), "unknown name: b");

    let error = build("var a = !(a)").unwrap_err();
    assert_eq!(error.to_string(), "unknown name: a");
}

#[test]
fn test_bind_returns_previous_value() {
    let mut environment = Environment::new();
    assert_eq!(environment.bind("a", Value::Integer(1)), None);
    assert_eq!(
        environment.bind("a", Value::from("x")),
        Some(Value::Integer(1))
    );
    assert_eq!(environment.get("b"), None);
}

#[test]
fn test_builder_steps_one_declaration_at_a_time() {
    let program = parse_program("var a = 1\nvar b = !(a 1 +)").unwrap();
    let mut builder = EnvironmentBuilder::new(&program);
    assert_eq!(builder.state(), BuilderState::Ready);
    assert_eq!(builder.step().unwrap(), BuilderState::Binding(1));
    assert_eq!(builder.step().unwrap(), BuilderState::Binding(2));
    assert_eq!(builder.step().unwrap(), BuilderState::Done);
    assert_eq!(builder.step().unwrap(), BuilderState::Done);
}

#[test]
fn test_builder_stops_at_first_failure() {
    let program = parse_program("var a = 1\nvar b = !(c)\nvar c = 2").unwrap();
    let mut builder = EnvironmentBuilder::new(&program);
    assert_eq!(builder.step().unwrap(), BuilderState::Binding(1));
    assert!(builder.step().is_err());
    assert_eq!(builder.state(), BuilderState::Failed);
    assert_eq!(builder.step().unwrap(), BuilderState::Failed);
}

#[test]
fn test_render_document() {
    let source = "\
var a = 12
var s = \"h\\u00e9llo \\\"q\\\"\"
var b = !(a 5 -)
var ch = !(72 chr())
var arr = << 1, \"x\", <<>>, << 2 >> >>
var e = <<>>
";
    let expected = r#"{
  "a": 12,
  "s": "héllo \"q\"",
  "b": 7,
  "ch": "H",
  "arr": [
    1,
    "x",
    [],
    [
      2
    ]
  ],
  "e": []
}
"#;
    assert_eq!(run(source).unwrap(), expected);
}

#[test]
fn test_render_negative_and_control_characters() {
    let source = "var n = !(1 10 -)\nvar z = !(5 5 - chr())\nvar t = !(9 chr())";
    let expected = "{\n  \"n\": -9,\n  \"z\": \"\\u0000\",\n  \"t\": \"\\t\"\n}\n";
    assert_eq!(run(source).unwrap(), expected);
}

#[test]
fn test_run_reports_each_category() {
    assert_eq!(run("var x = << 1, 2 \n").unwrap_err().exit_code(), 2);
    assert_eq!(run("var x = !(y)").unwrap_err().exit_code(), 3);
    assert_eq!(run("var x = !(55296 chr())").unwrap_err().exit_code(), 4);
    assert_eq!(
        run("var x = << 1, 2 \n").unwrap_err().to_string(),
        "Syntax error: line 1, column 17"
    );
}

#[test]
fn test_failure_discards_earlier_bindings() {
    let error = run("var a = 1\nvar s = \"s\"\nvar b = !(a s +)").unwrap_err();
    assert!(matches!(error, ConfigError::Evaluation(_)));
    assert_eq!(error.to_string(), "+ and - apply only to numbers");
}

#[test]
fn test_deep_nesting_is_unclassified() {
    let nested = |depth: usize| format!("var a = {}{}", "<<".repeat(depth), ">>".repeat(depth));

    let document = run(&nested(MAX_NESTING_DEPTH)).unwrap();
    assert!(document.starts_with("{\n  \"a\": [\n"));

    let error = run(&nested(MAX_NESTING_DEPTH + 1)).unwrap_err();
    assert!(matches!(error, ConfigError::Unclassified(_)));
    assert_eq!(error.exit_code(), 4);
    assert_eq!(error.code(), "UN007");
    assert_eq!(
        error.to_string(),
        format!("arrays nest deeper than {MAX_NESTING_DEPTH} levels")
    );
}
