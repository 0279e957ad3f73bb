use crate::Error;
use crate::parser::{ParseBuilder, parse_expression};

fn nested_parens(depth: usize) -> String {
    let mut input = "(".repeat(depth);
    input.push('x');
    input.push_str(&")".repeat(depth));
    input
}

#[test]
fn exec_fuel_exhaustion() {
    let result = ParseBuilder::new("a + b + c + d")
        .with_exec_fuel(Some(2))
        .parse_expression();

    assert!(
        matches!(result, Err(Error::ExecFuelExhausted)),
        "expected ExecFuelExhausted error, got {:?}",
        result.map(|p| p.dump_cst())
    );
}

#[test]
fn deeply_nested_expressions_hit_recursion_limit() {
    let input = nested_parens(128);
    let result = ParseBuilder::new(&input)
        .with_recursion_limit(Some(64))
        .parse_expression();

    assert!(
        matches!(result, Err(Error::RecursionLimitExceeded)),
        "expected RecursionLimitExceeded error, got {:?}",
        result.map(|p| p.dump_cst())
    );
}

#[test]
fn deeply_nested_blocks_hit_recursion_limit() {
    let depth = 64;
    let input = format!("{}{}", "{".repeat(depth), "}".repeat(depth));
    let result = ParseBuilder::new(&input)
        .with_recursion_limit(Some(16))
        .parse_anonymous_unit();

    assert!(matches!(result, Err(Error::RecursionLimitExceeded)));
}

#[test]
fn limits_can_be_disabled() {
    let input = nested_parens(128);
    let result = ParseBuilder::new(&input)
        .with_recursion_limit(None)
        .with_exec_fuel(None)
        .parse_expression()
        .unwrap();
    assert!(result.is_valid());
    assert_eq!(result.text(), input);
}

#[test]
fn default_limits_accept_ordinary_nesting() {
    let result = parse_expression(&nested_parens(32)).unwrap();
    assert!(result.is_valid());
}
