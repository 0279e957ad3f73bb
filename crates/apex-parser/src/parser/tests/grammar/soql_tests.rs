use indoc::indoc;

use crate::parser::EntryRule::{Expression, Query, Statement};
use crate::parser::SyntaxKind;
use crate::parser::tests::{invalid, parse, valid};

fn count(input: &str, kind: SyntaxKind) -> usize {
    let result = parse(Query, input);
    assert!(
        result.is_valid(),
        "{}",
        result.diagnostics().printer().render()
    );
    result
        .syntax()
        .descendants()
        .filter(|n| n.kind() == kind)
        .count()
}

#[test]
fn minimal_query() {
    insta::assert_snapshot!(valid(Query, "SELECT Id FROM Account"), @r#"
    QueryUnit
      Query
        KwSelect "SELECT"
        SelectList
          SelectField
            FieldName
              Ident "Id"
        FromClause
          KwFrom "FROM"
          FromEntry
            FieldName
              Ident "Account"
    "#);
}

#[test]
fn query_keywords_ignore_case() {
    valid(Query, "select id from account where name = 'x' order by name limit 1");
}

#[test]
fn where_with_conjunction() {
    insta::assert_snapshot!(valid(Query, "SELECT Id FROM Account WHERE Name = 'x' AND Amount > 10"), @r#"
    QueryUnit
      Query
        KwSelect "SELECT"
        SelectList
          SelectField
            FieldName
              Ident "Id"
        FromClause
          KwFrom "FROM"
          FromEntry
            FieldName
              Ident "Account"
        WhereClause
          KwWhere "WHERE"
          LogicalCondition
            Comparison
              FieldName
                Ident "Name"
              Assign "="
              SoqlLiteral
                StringLiteral "'x'"
            KwAnd "AND"
            Comparison
              FieldName
                Ident "Amount"
              Gt ">"
              SoqlLiteral
                IntegerLiteral "10"
    "#);
}

#[test]
fn fields_function() {
    insta::assert_snapshot!(valid(Query, "SELECT FIELDS(ALL) FROM Account LIMIT 200"), @r#"
    QueryUnit
      Query
        KwSelect "SELECT"
        SelectList
          SelectField
            SoqlFunction
              Ident "FIELDS"
              ParenOpen "("
              FieldName
                Ident "ALL"
              ParenClose ")"
        FromClause
          KwFrom "FROM"
          FromEntry
            FieldName
              Ident "Account"
        LimitClause
          KwLimit "LIMIT"
          SoqlLiteral
            IntegerLiteral "200"
    "#);
}

#[test]
fn aggregate_functions_and_aliases() {
    valid(Query, "SELECT COUNT() FROM Account");
    valid(Query, "SELECT COUNT(Id) total, MAX(Amount) FROM Opportunity o");
    valid(
        Query,
        "SELECT toLabel(Status), convertCurrency(Amount) FROM Opportunity",
    );
    assert_eq!(
        count("SELECT COUNT(Id) total FROM Account a", SyntaxKind::SoqlAlias),
        2
    );
}

#[test]
fn relationship_fields() {
    let result = parse(Query, "SELECT Account.Owner.Name FROM Contact");
    assert!(result.is_valid());
    let field = result
        .syntax()
        .descendants()
        .find(|n| n.kind() == SyntaxKind::FieldName)
        .unwrap();
    assert_eq!(field.text().to_string(), "Account.Owner.Name");
}

#[test]
fn currency_values() {
    valid(Query, "SELECT Id FROM Opportunity WHERE Amount > USD5000");
    valid(Query, "SELECT Id FROM Opportunity WHERE Amount < EUR5.25");
}

#[test]
fn signed_numbers_and_date_formulas() {
    let input = "SELECT Id FROM Account WHERE Amount > -1 AND CreatedDate = LAST_N_DAYS:30 AND LastModifiedDate < TODAY";
    assert_eq!(count(input, SyntaxKind::SignedNumber), 1);
    assert_eq!(count(input, SyntaxKind::DateFormula), 2);
}

#[test]
fn parameterized_date_formula_shape() {
    let result = parse(Query, "SELECT Id FROM Account WHERE CreatedDate = NEXT_N_DAYS:7");
    assert!(result.is_valid());
    let formula = result
        .syntax()
        .descendants()
        .find(|n| n.kind() == SyntaxKind::DateFormula)
        .unwrap();
    assert_eq!(formula.text().to_string(), "NEXT_N_DAYS:7");
}

#[test]
fn date_and_datetime_values() {
    valid(
        Query,
        "SELECT Id FROM Account WHERE CreatedDate > 2020-01-01T00:00:00Z AND CloseDate = 2021-12-31",
    );
}

#[test]
fn subquery_in_select_list() {
    let input = "SELECT Id, (SELECT Id FROM Contacts WHERE CreatedDate > 2020-01-01T00:00:00Z) FROM Account";
    assert_eq!(count(input, SyntaxKind::Subquery), 1);
    assert_eq!(count(input, SyntaxKind::Query), 2);
}

#[test]
fn semi_join_and_value_lists() {
    valid(
        Query,
        "SELECT Id FROM Account WHERE Id IN (SELECT AccountId FROM Contact)",
    );
    valid(Query, "SELECT Id FROM Account WHERE Type NOT IN ('a', 'b')");
    valid(
        Query,
        "SELECT Id FROM Account WHERE Tags__c INCLUDES ('x;y') AND Name LIKE 'A%'",
    );
}

#[test]
fn bound_expressions() {
    valid(
        Expression,
        "[SELECT Id FROM Account WHERE Id IN :ids AND Name = :acc.Name LIMIT :max]",
    );
}

#[test]
fn not_and_parenthesized_conditions() {
    let input = "SELECT Id FROM A WHERE NOT (a = 1 OR b = 2) AND c != null";
    assert_eq!(count(input, SyntaxKind::NotCondition), 1);
    assert_eq!(count(input, SyntaxKind::ParenCondition), 1);
    assert_eq!(count(input, SyntaxKind::LogicalCondition), 2);
}

#[test]
fn mixing_and_or_needs_parentheses() {
    insta::assert_snapshot!(
        invalid(Query, "SELECT Id FROM A WHERE a = 1 AND b = 2 OR c = 3"),
        @"error at 1:39: cannot mix `AND` and `OR` without parentheses"
    );
    valid(Query, "SELECT Id FROM A WHERE (a = 1 AND b = 2) OR c = 3");
}

#[test]
fn with_access_modes() {
    for mode in ["USER_MODE", "SYSTEM_MODE", "SECURITY_ENFORCED"] {
        let input = format!("SELECT Id FROM Account WITH {mode}");
        assert_eq!(count(&input, SyntaxKind::WithClause), 1);
    }
    valid(
        Statement,
        "List<Account> rows = [SELECT Id FROM Account WHERE Name = 'x' WITH USER_MODE];",
    );
}

#[test]
fn with_data_category() {
    let input = "SELECT Title FROM KnowledgeArticleVersion WITH DATA CATEGORY Geography__c AT usa__c AND Product__c BELOW (a__c, b__c)";
    assert_eq!(count(input, SyntaxKind::DataCategoryFilter), 2);
}

#[test]
fn typeof_select_entry() {
    let input = "SELECT TYPEOF What WHEN Account THEN Phone, Name ELSE Name END FROM Event";
    assert_eq!(count(input, SyntaxKind::TypeOf), 1);
    assert_eq!(count(input, SyntaxKind::TypeOfWhen), 1);
    assert_eq!(count(input, SyntaxKind::TypeOfElse), 1);
}

#[test]
fn grouping_and_having() {
    valid(
        Query,
        "SELECT COUNT(Id), Industry FROM Account GROUP BY Industry HAVING COUNT(Id) > 1",
    );
    valid(
        Query,
        "SELECT Industry, Type FROM Account GROUP BY ROLLUP(Industry, Type)",
    );
    valid(Query, "SELECT Industry FROM Account GROUP BY CUBE(Industry)");
}

#[test]
fn trailing_clauses() {
    let input = indoc! {"
        SELECT Name FROM Account
        USING SCOPE mine
        WHERE Name != null
        ORDER BY Name DESC NULLS LAST, Id
        LIMIT 10
        OFFSET 5
        FOR VIEW, REFERENCE
    "};
    assert_eq!(count(input, SyntaxKind::OrderItem), 2);
    valid(Query, "SELECT Id FROM Account LIMIT 1 FOR UPDATE");
    valid(Query, "SELECT Id FROM Account UPDATE TRACKING");
    valid(Query, "SELECT Id FROM Account ALL ROWS");
}

#[test]
fn missing_field() {
    insta::assert_snapshot!(
        invalid(Query, "SELECT FROM Account"),
        @"error at 1:7: expected a field name: found `FROM`"
    );
}

#[test]
fn missing_from() {
    insta::assert_snapshot!(
        invalid(Query, "SELECT Id"),
        @"error at 1:9: expected `FROM`, found end of input"
    );
}
