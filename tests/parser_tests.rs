// tests/parser_tests.rs

use serde_json::json;
use stencil::ast::{Node, NodeKind};
use stencil::syntax::{parse, ParseOptions};

fn parse_ok(source: &str) -> Node {
    parse(source, &ParseOptions::default())
        .unwrap_or_else(|e| panic!("failed to parse `{}`: {}", source, e))
}

fn round_trip(source: &str) {
    assert_eq!(parse_ok(source).pretty(), source);
}

// ---
// Statements
// ---

#[test]
fn test_parse_declarations() {
    round_trip("let a = 1, b;");
    round_trip("const greeting = 'hi';");
    round_trip("var x = [1, 2, 3];");
}

#[test]
fn test_parse_function_declaration() {
    round_trip("function add(a, b) {\n  return a + b;\n}");
}

#[test]
fn test_parse_control_flow() {
    round_trip("if (ready) {\n  go();\n} else {\n  wait();\n}");
    round_trip("while (i < 10) {\n  i += 1;\n}");
    round_trip("try {\n  risky();\n} catch (e) {\n  log(e);\n} finally {\n  done();\n}");
}

#[test]
fn test_parse_statement_list() {
    let program = parse_ok("a();\nb();\nthrow err;");
    let body = program.body().unwrap();
    assert_eq!(body.len(), 3);
    assert_eq!(body[2].type_name(), "ThrowStatement");
    assert_eq!(program.pretty(), "a();\nb();\nthrow err;");
}

#[test]
fn test_parse_member_and_call_chains() {
    round_trip("a.b[c](d).e;");
    round_trip("new Widget(options);");
}

#[test]
fn test_parse_object_literal_needs_parens_as_statement() {
    round_trip("({ a: 1 });");
}

// ---
// Errors
// ---

#[test]
fn test_error_position_on_later_line() {
    let err = parse("ok();\nlet = 2;", &ParseOptions::default()).unwrap_err();
    assert_eq!(err.line, 2);
    assert!(err.column > 1);
    assert!(err.to_string().contains("(2:"));
}

#[test]
fn test_return_outside_function_can_be_rejected() {
    let options = ParseOptions {
        allow_return_outside_function: false,
        ..ParseOptions::default()
    };
    assert!(parse("return 1;", &options).is_err());
    assert!(parse("function f() { return 1; }", &options).is_ok());
}

// ---
// Tree shape
// ---

#[test]
fn test_tree_serializes_with_type_tags() {
    let program = parse_ok("f(x);");
    let NodeKind::Program { body } = &program.kind else {
        panic!("expected a program");
    };
    let mut value = serde_json::to_value(&body[0]).unwrap();
    strip_locations(&mut value);
    assert_eq!(
        value,
        json!({
            "type": "ExpressionStatement",
            "expression": {
                "type": "CallExpression",
                "callee": { "type": "Identifier", "name": "f" },
                "arguments": [{ "type": "Identifier", "name": "x" }]
            }
        })
    );
}

fn strip_locations(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            map.remove("span");
            map.remove("extra");
            map.values_mut().for_each(strip_locations);
        }
        serde_json::Value::Array(items) => items.iter_mut().for_each(strip_locations),
        _ => {}
    }
}
