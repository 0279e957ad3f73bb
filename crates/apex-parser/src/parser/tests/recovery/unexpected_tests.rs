use crate::parser::EntryRule::{AnonymousUnit, CompilationUnit, Expression, Statement};
use crate::parser::tests::{invalid, parse};

#[test]
fn trailing_input_after_expression() {
    insta::assert_snapshot!(parse(Expression, "1 + 2 )").dump_cst(), @r#"
    ExpressionUnit
      AdditiveExpr
        Literal
          IntegerLiteral "1"
        Plus "+"
        Literal
          IntegerLiteral "2"
      Error
        ParenClose ")"
    "#);
    insta::assert_snapshot!(
        invalid(Expression, "1 + 2 )"),
        @"error at 1:6: unexpected input after the end: found `)`"
    );
}

#[test]
fn unrecognized_characters() {
    insta::assert_snapshot!(parse(Expression, "x # y").dump_cst(), @r##"
    ExpressionUnit
      NameRef
        Ident "x"
      Garbage "#"
      Error
        Ident "y"
    "##);
    insta::assert_snapshot!(invalid(Expression, "x # y"), @r"
    error at 1:2: unrecognized input `#`
    error at 1:4: unexpected input after the end: found `y`
    ");
}

#[test]
fn missing_initializer_expression() {
    insta::assert_snapshot!(
        invalid(Statement, "Integer x = ;"),
        @"error at 1:12: expected an expression: found `;`"
    );
}

#[test]
fn missing_semicolon() {
    insta::assert_snapshot!(
        invalid(Statement, "x = 1"),
        @"error at 1:5: expected `;`, found end of input"
    );
}

#[test]
fn try_without_handlers() {
    insta::assert_snapshot!(
        invalid(AnonymousUnit, "try { } x = 1;"),
        @"error at 1:8: `try` needs a `catch` or `finally` block"
    );
}

#[test]
fn query_only_literal_in_apex() {
    insta::assert_snapshot!(
        invalid(Statement, "Date d = 2020-01-01;"),
        @"error at 1:9: literal is only valid inside a query: `2020-01-01` is not an Apex expression"
    );
}

#[test]
fn brackets_without_query() {
    insta::assert_snapshot!(invalid(Expression, "[UPDATE x]"), @r"
    error at 1:0: expected an expression: expected `SELECT` or `FIND` after `[`
    error at 1:1: unexpected input after the end: found `UPDATE`
    ");
}

#[test]
fn stray_closing_brace_in_script() {
    insta::assert_snapshot!(
        invalid(AnonymousUnit, "x = 1; } y = 2;"),
        @"error at 1:7: unmatched `}`"
    );
}

#[test]
fn bad_member_recovers_at_next_modifier() {
    let result = parse(
        CompilationUnit,
        "class C { 42 garbage; public Integer x; }",
    );
    assert_eq!(result.diagnostics().len(), 1);
    insta::assert_snapshot!(
        result.diagnostics().printer().render(),
        @"error at 1:10: expected a member declaration: found `42`"
    );
    assert!(
        result
            .syntax()
            .descendants()
            .any(|n| n.kind() == crate::SyntaxKind::FieldDecl)
    );
}

#[test]
fn diagnostics_are_in_source_order() {
    let result = parse(AnonymousUnit, "Integer a = ; Integer b = ;");
    let columns: Vec<_> = result.diagnostics().iter().map(|d| d.column()).collect();
    assert_eq!(columns, vec![12, 26]);
}
