use crate::Error;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::listener::{self, FailFast, TracingListener};
use crate::parser::{ParseBuilder, SyntaxKind};

#[test]
fn fail_fast_aborts_on_first_error() {
    let mut listener = FailFast;
    let result = ParseBuilder::new("Integer x = ; Integer y = ;")
        .with_listener(&mut listener)
        .parse_anonymous_unit();

    let Err(Error::Syntax(error)) = result else {
        panic!("expected a syntax error");
    };
    assert_eq!(error.kind, DiagnosticKind::ExpectedExpression);
    assert_eq!((error.line, error.column), (1, 12));
    assert_eq!(error.offending.as_deref(), Some(";"));
    assert_eq!(error.offending_kind, Some(SyntaxKind::Semicolon));
    insta::assert_snapshot!(error.to_string(), @"line 1:12 expected an expression: found `;`");
}

#[test]
fn fail_fast_reports_end_of_input_without_offending_text() {
    let mut listener = FailFast;
    let result = ParseBuilder::new("class A {")
        .with_listener(&mut listener)
        .parse_compilation_unit();

    let Err(Error::Syntax(error)) = result else {
        panic!("expected a syntax error");
    };
    assert_eq!(error.kind, DiagnosticKind::UnclosedBrace);
    assert_eq!(error.offending, None);
    assert_eq!(error.offending_kind, None);
}

#[test]
fn fail_fast_accepts_valid_input() {
    let mut listener = FailFast;
    let result = ParseBuilder::new("trigger T on Account (after insert) { }")
        .with_listener(&mut listener)
        .parse_trigger_unit()
        .unwrap();
    assert!(result.is_valid());
}

#[test]
fn collector_sees_every_diagnostic() {
    let mut collected = Diagnostics::new();
    let result = ParseBuilder::new("Integer x = ; Integer y = ;")
        .with_listener(&mut collected)
        .parse_anonymous_unit()
        .unwrap();

    assert_eq!(collected.len(), 2);
    assert_eq!(&collected, result.diagnostics());
}

#[test]
fn closure_listener_can_abort_selectively() {
    let mut seen = Vec::new();
    let mut listener = listener::from_fn(|d| {
        seen.push(d.kind());
        if d.kind() == DiagnosticKind::TrailingInput {
            Err(d.into())
        } else {
            Ok(())
        }
    });
    let result = ParseBuilder::new("x # y")
        .with_listener(&mut listener)
        .parse_expression();
    drop(listener);

    assert!(matches!(result, Err(Error::Syntax(_))));
    assert_eq!(
        seen,
        vec![DiagnosticKind::UnrecognizedInput, DiagnosticKind::TrailingInput]
    );
}

#[test]
fn unrecognized_input_carries_garbage_kind() {
    let mut listener = FailFast;
    let result = ParseBuilder::new("x # y")
        .with_listener(&mut listener)
        .parse_expression();

    let Err(Error::Syntax(error)) = result else {
        panic!("expected a syntax error");
    };
    assert_eq!(error.kind, DiagnosticKind::UnrecognizedInput);
    assert_eq!(error.offending.as_deref(), Some("#"));
    assert_eq!(error.offending_kind, Some(SyntaxKind::Garbage));
}

#[test]
fn tracing_listener_never_aborts() {
    let mut listener = TracingListener;
    let result = ParseBuilder::new("1 + )")
        .with_listener(&mut listener)
        .parse_expression()
        .unwrap();
    assert!(!result.is_valid());
}

#[test]
fn collector_keeps_partial_tree_for_unbalanced_brace() {
    let result = ParseBuilder::new("public class A { Integer x;")
        .parse_compilation_unit()
        .unwrap();
    assert!(!result.is_valid());
    assert_eq!(result.diagnostics().as_slice()[0].kind, DiagnosticKind::UnclosedBrace);
    assert!(result.tree().type_decl().is_some());
    assert_eq!(result.text(), "public class A { Integer x;");
}
