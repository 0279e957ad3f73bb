use indoc::indoc;

use crate::parser::EntryRule::{AnonymousUnit, CompilationUnit, Expression};
use crate::parser::tests::{invalid, parse};

#[test]
fn unclosed_class_body() {
    insta::assert_snapshot!(
        invalid(CompilationUnit, "public class Hello {"),
        @"error at 1:20: missing closing `}` (related: class body started here at 19..20)"
    );
}

#[test]
fn unclosed_class_body_renders_with_source() {
    let input = indoc! {"
        public class Hello {
            Integer x;
    "};
    let result = parse(CompilationUnit, input);
    assert_eq!(result.diagnostics().len(), 1);
    let rendered = result.diagnostics().printer().source(input).render();
    assert!(rendered.starts_with("error: missing closing `}`"));
    assert!(rendered.contains("class body started here"));
}

#[test]
fn unclosed_argument_list() {
    insta::assert_snapshot!(
        invalid(Expression, "foo(1, 2"),
        @"error at 1:8: missing closing `)` (related: argument list started here at 3..4)"
    );
}

#[test]
fn unclosed_query_bracket() {
    insta::assert_snapshot!(
        invalid(Expression, "[SELECT Id FROM Account"),
        @"error at 1:23: missing closing `]` (related: query started here at 0..1)"
    );
}

#[test]
fn unclosed_block_keeps_statements() {
    let result = parse(AnonymousUnit, "if (x) { y = 1;");
    assert_eq!(result.diagnostics().len(), 1);
    assert!(
        result
            .syntax()
            .descendants()
            .any(|n| n.kind() == crate::SyntaxKind::ExprStmt)
    );
}
