mod grammar;
mod json_serialization_tests;
mod recovery;

use crate::parser::{EntryRule, Parse, ParseBuilder};

fn parse(rule: EntryRule, input: &str) -> Parse<()> {
    ParseBuilder::new(input)
        .parse(rule)
        .expect("parse must not run out of fuel")
}

/// Parses `input`, asserts it is error-free and returns the CST dump.
fn valid(rule: EntryRule, input: &str) -> String {
    let result = parse(rule, input);
    assert!(
        result.is_valid(),
        "expected no diagnostics for {input:?}, got:\n{}",
        result.diagnostics().printer().render()
    );
    assert_eq!(result.text(), input);
    result.dump_cst()
}

/// Parses `input`, asserts it has diagnostics and returns them in plain form.
fn invalid(rule: EntryRule, input: &str) -> String {
    let result = parse(rule, input);
    assert!(
        !result.is_valid(),
        "expected diagnostics for {input:?}, tree:\n{}",
        result.dump_cst()
    );
    assert_eq!(result.text(), input);
    result.diagnostics().printer().render()
}
