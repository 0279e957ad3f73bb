use crate::parser::EntryRule::{Expression, Statement};
use crate::parser::SyntaxKind;
use crate::parser::tests::{invalid, parse, valid};

#[test]
fn minimal_search() {
    insta::assert_snapshot!(valid(Expression, "[FIND 'x' RETURNING Account]"), @r#"
    ExpressionUnit
      SoslExpr
        BracketOpen "["
        SoslQuery
          KwFind "FIND"
          SoqlLiteral
            StringLiteral "'x'"
          ReturningClause
            KwReturning "RETURNING"
            ReturningEntry
              FieldName
                Ident "Account"
        BracketClose "]"
    "#);
}

#[test]
fn search_group_and_returning_options() {
    let input = "[FIND 'acme' IN ALL FIELDS RETURNING Account(Id, Name WHERE Name LIKE 'a%' ORDER BY Name LIMIT 5), Contact(Email)]";
    let result = parse(Expression, input);
    assert!(
        result.is_valid(),
        "{}",
        result.diagnostics().printer().render()
    );
    let root = result.syntax();
    assert_eq!(
        root.descendants()
            .filter(|n| n.kind() == SyntaxKind::ReturningEntry)
            .count(),
        2
    );
    assert!(
        root.descendants()
            .any(|n| n.kind() == SyntaxKind::SearchGroup)
    );
}

#[test]
fn bound_search_term() {
    valid(
        Statement,
        "List<List<SObject>> found = [FIND :term IN NAME FIELDS RETURNING Lead];",
    );
}

#[test]
fn search_with_options() {
    valid(
        Expression,
        "[FIND 'x' RETURNING Account WITH DIVISION = 'Global' WITH HIGHLIGHT WITH SNIPPET (target_length = 120) LIMIT 10]",
    );
    valid(
        Expression,
        "[FIND 'x' RETURNING KnowledgeArticleVersion WITH DATA CATEGORY Geography__c AT usa__c]",
    );
    valid(
        Expression,
        "[FIND 'x' RETURNING Account WITH NETWORK IN ('a', 'b')]",
    );
}

#[test]
fn search_term_must_be_a_string() {
    insta::assert_snapshot!(
        invalid(Expression, "[FIND acme RETURNING Account]"),
        @"error at 1:6: expected a value: search term, found `acme`"
    );
}
