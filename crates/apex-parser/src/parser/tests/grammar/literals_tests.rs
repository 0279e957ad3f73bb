use crate::parser::EntryRule::{Expression, Literal};
use crate::parser::tests::{invalid, valid};

#[test]
fn boolean() {
    insta::assert_snapshot!(valid(Literal, "true"), @r#"
    LiteralUnit
      Literal
        BooleanLiteral "true"
    "#);
}

#[test]
fn every_apex_literal() {
    for input in ["'abc'", "42", "42L", "3.14", "1.5d", "null", "FALSE", "'it\\'s'"] {
        valid(Literal, input);
    }
}

#[test]
fn name_is_not_a_literal() {
    insta::assert_snapshot!(
        invalid(Literal, "x"),
        @"error at 1:0: expected a literal: found `x`"
    );
}

#[test]
fn date_is_query_only() {
    insta::assert_snapshot!(
        invalid(Literal, "2020-01-01"),
        @"error at 1:0: expected a literal: found `2020-01-01`"
    );
    insta::assert_snapshot!(
        invalid(Expression, "2020-01-01"),
        @"error at 1:0: literal is only valid inside a query: `2020-01-01` is not an Apex expression"
    );
}
