use crate::parser::EntryRule::{CompilationUnit, Statement};
use crate::parser::tests::parse;

#[test]
fn error_json_serialization() {
    let result = parse(Statement, "Integer x = ;");
    let errors = result.diagnostics();

    assert_eq!(errors.len(), 1);
    let json = serde_json::to_string_pretty(errors.iter().next().unwrap()).unwrap();

    insta::assert_snapshot!(json, @r#"
    {
      "severity": "error",
      "kind": "ExpectedExpression",
      "range": {
        "start": 12,
        "end": 13
      },
      "line": 1,
      "column": 12,
      "found": ";",
      "found_kind": "Semicolon",
      "message": "expected an expression: found `;`"
    }
    "#);
}

#[test]
fn error_json_serialization_with_related() {
    let result = parse(CompilationUnit, "class A {");
    let errors = result.diagnostics();

    assert_eq!(errors.len(), 1);
    let json = serde_json::to_string_pretty(errors.iter().next().unwrap()).unwrap();

    insta::assert_snapshot!(json, @r#"
    {
      "severity": "error",
      "kind": "UnclosedBrace",
      "range": {
        "start": 8,
        "end": 9
      },
      "line": 1,
      "column": 9,
      "message": "missing closing `}`",
      "related": [
        {
          "range": {
            "start": 8,
            "end": 9
          },
          "message": "class body started here"
        }
      ]
    }
    "#);
}
