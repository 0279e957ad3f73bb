use indoc::indoc;

use crate::parser::EntryRule::{AnonymousUnit, Statement};
use crate::parser::SyntaxKind;
use crate::parser::tests::{invalid, parse, valid};

fn statement_kinds(input: &str) -> Vec<SyntaxKind> {
    let result = parse(AnonymousUnit, input);
    assert!(
        result.is_valid(),
        "{}",
        result.diagnostics().printer().render()
    );
    result.syntax().children().map(|n| n.kind()).collect()
}

#[test]
fn local_variable_declaration() {
    insta::assert_snapshot!(valid(Statement, "Integer x = 1;"), @r#"
    StatementUnit
      LocalVarDecl
        TypeRef
          TypeName
            Ident "Integer"
        VariableDeclarator
          Ident "x"
          Assign "="
          Literal
            IntegerLiteral "1"
        Semicolon ";"
    "#);
}

#[test]
fn declaration_with_soql_initializer() {
    let result = parse(
        Statement,
        "List<Account> accounts = [SELECT Id, Name FROM Account WHERE Name LIKE 'A%'];",
    );
    assert!(result.is_valid());
    let root = result.syntax();
    let decl = root.first_child().unwrap();
    assert_eq!(decl.kind(), SyntaxKind::LocalVarDecl);
    assert!(
        decl.descendants()
            .any(|n| n.kind() == SyntaxKind::SoqlExpr)
    );
}

#[test]
fn every_statement_form() {
    let input = indoc! {r#"
        Integer i = 0, j;
        final String name = 'x';
        i++;
        if (i > 0) { i = 1; } else if (i < 0) { i = 2; } else { i = 3; }
        for (Integer k = 0; k < 10; k++) { continue; }
        for (Account a : accounts) { break; }
        while (i < 3) { i += 1; }
        do { i--; } while (i > 0);
        try { throw new MyException(); } catch (MyException e) { } finally { }
        switch on i { when 1, 2 { } when else { } }
        insert accounts;
        System.runAs(u) { }
        return;
    "#};
    assert_eq!(
        statement_kinds(input),
        vec![
            SyntaxKind::LocalVarDecl,
            SyntaxKind::LocalVarDecl,
            SyntaxKind::ExprStmt,
            SyntaxKind::IfStmt,
            SyntaxKind::ForStmt,
            SyntaxKind::ForStmt,
            SyntaxKind::WhileStmt,
            SyntaxKind::DoWhileStmt,
            SyntaxKind::TryStmt,
            SyntaxKind::SwitchStmt,
            SyntaxKind::DmlStmt,
            SyntaxKind::RunAsStmt,
            SyntaxKind::ReturnStmt,
        ]
    );
}

#[test]
fn empty_loop_bodies_are_allowed() {
    valid(AnonymousUnit, "while (true);");
    valid(AnonymousUnit, "for (;;);");
    valid(AnonymousUnit, "for (Account a : accounts);");
}

#[test]
fn empty_statements_between_statements_are_allowed() {
    assert_eq!(
        statement_kinds(";; x = 1;"),
        vec![
            SyntaxKind::EmptyStmt,
            SyntaxKind::EmptyStmt,
            SyntaxKind::ExprStmt
        ]
    );
}

#[test]
fn empty_if_body_is_reported_once() {
    let result = parse(AnonymousUnit, "if (x == 3); else { ; }");
    assert_eq!(result.diagnostics().len(), 1);
    insta::assert_snapshot!(
        result.diagnostics().printer().render(),
        @"error at 1:11: empty statement is not allowed here"
    );
}

#[test]
fn empty_else_body_is_reported() {
    insta::assert_snapshot!(
        invalid(AnonymousUnit, "if (x) { } else ;"),
        @"error at 1:16: empty statement is not allowed here"
    );
}

#[test]
fn standalone_empty_statement_is_reported() {
    insta::assert_snapshot!(
        invalid(Statement, ";"),
        @"error at 1:0: empty statement is not allowed here"
    );
}

#[test]
fn enhanced_for_loop() {
    insta::assert_snapshot!(valid(Statement, "for (Account a : accounts) { }"), @r#"
    StatementUnit
      ForStmt
        KwFor "for"
        ParenOpen "("
        EnhancedForControl
          TypeRef
            TypeName
              Ident "Account"
          Ident "a"
          Colon ":"
          NameRef
            Ident "accounts"
        ParenClose ")"
        Block
          BraceOpen "{"
          BraceClose "}"
    "#);
}

#[test]
fn for_over_inline_query() {
    valid(
        Statement,
        "for (Account a : [SELECT Id FROM Account]) { update a; }",
    );
}

#[test]
fn switch_on_literals_types_and_enums() {
    let input = indoc! {r#"
        switch on value {
            when 1, -2, (3) { }
            when 'a' { }
            when Account a { }
            when RED, GREEN { }
            when null { }
            when else { }
        }
    "#};
    let result = parse(AnonymousUnit, input);
    assert!(
        result.is_valid(),
        "{}",
        result.diagnostics().printer().render()
    );
    let root = result.syntax();
    let whens = root
        .descendants()
        .filter(|n| n.kind() == SyntaxKind::WhenClause)
        .count();
    assert_eq!(whens, 6);
    assert_eq!(
        root.descendants()
            .filter(|n| n.kind() == SyntaxKind::WhenTypeBinding)
            .count(),
        1
    );
}

#[test]
fn switch_keywords_are_remapped() {
    insta::assert_snapshot!(valid(Statement, "switch on x { when else { } }"), @r#"
    StatementUnit
      SwitchStmt
        KwSwitch "switch"
        KwOn "on"
        NameRef
          Ident "x"
        BraceOpen "{"
        WhenClause
          KwWhen "when"
          KwElse "else"
          Block
            BraceOpen "{"
            BraceClose "}"
        BraceClose "}"
    "#);
}

#[test]
fn switch_is_an_identifier_elsewhere() {
    valid(Statement, "switch = 1;");
}

#[test]
fn dml_with_access_level() {
    insta::assert_snapshot!(valid(Statement, "insert as user accounts;"), @r#"
    StatementUnit
      DmlStmt
        KwInsert "insert"
        AccessLevel
          KwAs "as"
          KwUser "user"
        NameRef
          Ident "accounts"
        Semicolon ";"
    "#);
    valid(Statement, "update as SYSTEM accounts;");
}

#[test]
fn merge_and_upsert_operands() {
    valid(Statement, "merge master duplicate;");
    valid(Statement, "upsert records Account.External_Id__c;");
    valid(Statement, "delete [SELECT Id FROM Account];");
    valid(Statement, "undelete records;");
}

#[test]
fn run_as_block() {
    insta::assert_snapshot!(valid(Statement, "System.runAs(u) { }"), @r#"
    StatementUnit
      RunAsStmt
        KwSystem "System"
        Dot "."
        Ident "runAs"
        ArgList
          ParenOpen "("
          NameRef
            Ident "u"
          ParenClose ")"
        Block
          BraceOpen "{"
          BraceClose "}"
    "#);
}

#[test]
fn system_method_call_is_an_expression() {
    let result = parse(Statement, "System.debug('x');");
    assert!(result.is_valid());
    assert_eq!(
        result.syntax().first_child().unwrap().kind(),
        SyntaxKind::ExprStmt
    );
}

#[test]
fn try_with_multiple_catches() {
    valid(
        Statement,
        "try { x(); } catch (DmlException e) { } catch (final Exception e) { }",
    );
}

#[test]
fn generic_local_declaration_is_not_a_comparison() {
    let result = parse(Statement, "Map<Id, List<Contact>> byAccount = new Map<Id, List<Contact>>();");
    assert!(result.is_valid());
    assert_eq!(
        result.syntax().first_child().unwrap().kind(),
        SyntaxKind::LocalVarDecl
    );
}

#[test]
fn comparison_statement_is_an_expression() {
    let result = parse(Statement, "a < b;");
    assert!(result.is_valid());
    assert_eq!(
        result.syntax().first_child().unwrap().kind(),
        SyntaxKind::ExprStmt
    );
}

#[test]
fn currency_shaped_name_is_assignable() {
    let result = parse(Statement, "USD100.name = 'name';");
    assert!(result.is_valid());
    assert!(
        result
            .syntax()
            .descendants_with_tokens()
            .all(|it| it.kind() != SyntaxKind::IntegralCurrencyLiteral)
    );
}

#[test]
fn loop_condition_with_postfix_and_negation() {
    valid(Statement, "while (x++ < 10 && !(y-- < 0));");
}

#[test]
fn when_values_in_nested_parentheses() {
    valid(
        Statement,
        "switch on i { when 1 { } when (2) { } when ((3)) { } when (4), 5 { } when else { } }",
    );
}
