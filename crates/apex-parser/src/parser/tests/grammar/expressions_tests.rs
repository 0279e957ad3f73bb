use crate::parser::EntryRule::Expression;
use crate::parser::SyntaxKind;
use crate::parser::tests::{parse, valid};

#[test]
fn multiplicative() {
    insta::assert_snapshot!(valid(Expression, "a * 5"), @r#"
    ExpressionUnit
      MultiplicativeExpr
        NameRef
          Ident "a"
        Star "*"
        Literal
          IntegerLiteral "5"
    "#);
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    insta::assert_snapshot!(valid(Expression, "1 + 2 * 3"), @r#"
    ExpressionUnit
      AdditiveExpr
        Literal
          IntegerLiteral "1"
        Plus "+"
        MultiplicativeExpr
          Literal
            IntegerLiteral "2"
          Star "*"
          Literal
            IntegerLiteral "3"
    "#);
}

#[test]
fn subtraction_is_left_associative() {
    insta::assert_snapshot!(valid(Expression, "a - b - c"), @r#"
    ExpressionUnit
      AdditiveExpr
        AdditiveExpr
          NameRef
            Ident "a"
          Minus "-"
          NameRef
            Ident "b"
        Minus "-"
        NameRef
          Ident "c"
    "#);
}

#[test]
fn assignment_is_right_associative() {
    insta::assert_snapshot!(valid(Expression, "a = b = c"), @r#"
    ExpressionUnit
      AssignExpr
        NameRef
          Ident "a"
        Assign "="
        AssignExpr
          NameRef
            Ident "b"
          Assign "="
          NameRef
            Ident "c"
    "#);
}

#[test]
fn conditional() {
    insta::assert_snapshot!(valid(Expression, "x ? 1 : 2"), @r#"
    ExpressionUnit
      ConditionalExpr
        NameRef
          Ident "x"
        Question "?"
        Literal
          IntegerLiteral "1"
        Colon ":"
        Literal
          IntegerLiteral "2"
    "#);
}

#[test]
fn shift_is_spelled_with_adjacent_angles() {
    insta::assert_snapshot!(valid(Expression, "a >> 2"), @r#"
    ExpressionUnit
      ShiftExpr
        NameRef
          Ident "a"
        Gt ">"
        Gt ">"
        Literal
          IntegerLiteral "2"
    "#);
}

#[test]
fn unsigned_shift_and_left_shift() {
    let result = parse(Expression, "a >>> 1 << 2");
    assert!(result.is_valid());
    let root = result.syntax();
    let shifts: Vec<_> = root
        .descendants()
        .filter(|n| n.kind() == SyntaxKind::ShiftExpr)
        .collect();
    assert_eq!(shifts.len(), 2);
    assert_eq!(shifts[0].text().to_string(), "a >>> 1 << 2");
    assert_eq!(shifts[1].text().to_string(), "a >>> 1");
}

#[test]
fn cast() {
    insta::assert_snapshot!(valid(Expression, "(String) x"), @r#"
    ExpressionUnit
      CastExpr
        ParenOpen "("
        TypeRef
          TypeName
            Ident "String"
        ParenClose ")"
        NameRef
          Ident "x"
    "#);
}

#[test]
fn parenthesized_name_before_operator_is_not_a_cast() {
    insta::assert_snapshot!(valid(Expression, "(a) + b"), @r#"
    ExpressionUnit
      AdditiveExpr
        ParenExpr
          ParenOpen "("
          NameRef
            Ident "a"
          ParenClose ")"
        Plus "+"
        NameRef
          Ident "b"
    "#);
}

#[test]
fn member_chain() {
    insta::assert_snapshot!(valid(Expression, "a.b(1).c"), @r#"
    ExpressionUnit
      FieldAccessExpr
        MethodCallExpr
          NameRef
            Ident "a"
          Dot "."
          Ident "b"
          ArgList
            ParenOpen "("
            Literal
              IntegerLiteral "1"
            ParenClose ")"
        Dot "."
        Ident "c"
    "#);
}

#[test]
fn reserved_words_after_dot_are_member_names() {
    insta::assert_snapshot!(valid(Expression, "Trigger.new"), @r#"
    ExpressionUnit
      FieldAccessExpr
        NameRef
          Ident "Trigger"
        Dot "."
        Ident "new"
    "#);
}

#[test]
fn currency_shaped_receiver() {
    insta::assert_snapshot!(valid(Expression, "USD100.name"), @r#"
    ExpressionUnit
      FieldAccessExpr
        NameRef
          Ident "USD100"
        Dot "."
        Ident "name"
    "#);
}

#[test]
fn safe_navigation_index_and_class_reference() {
    for input in ["a?.b", "accounts[0].Name", "Account.class", "x++", "--x", "!done"] {
        valid(Expression, input);
    }
    let result = parse(Expression, "Account.class");
    let root = result.syntax();
    assert!(
        root.descendants()
            .any(|n| n.kind() == SyntaxKind::ClassRefExpr)
    );
}

#[test]
fn new_list_with_initializer() {
    insta::assert_snapshot!(valid(Expression, "new List<Integer>{1, 2}"), @r#"
    ExpressionUnit
      NewExpr
        KwNew "new"
        TypeRef
          TypeName
            Ident "List"
            TypeArgs
              Lt "<"
              TypeRef
                TypeName
                  Ident "Integer"
              Gt ">"
        CollectionInit
          BraceOpen "{"
          Literal
            IntegerLiteral "1"
          Comma ","
          Literal
            IntegerLiteral "2"
          BraceClose "}"
    "#);
}

#[test]
fn new_map_with_entries() {
    insta::assert_snapshot!(valid(Expression, "new Map<String, Integer>{'a' => 1}"), @r#"
    ExpressionUnit
      NewExpr
        KwNew "new"
        TypeRef
          TypeName
            Ident "Map"
            TypeArgs
              Lt "<"
              TypeRef
                TypeName
                  Ident "String"
              Comma ","
              TypeRef
                TypeName
                  Ident "Integer"
              Gt ">"
        MapInit
          BraceOpen "{"
          MapEntry
            Literal
              StringLiteral "'a'"
            FatArrow "=>"
            Literal
              IntegerLiteral "1"
          BraceClose "}"
    "#);
}

#[test]
fn nested_generics_close_with_two_angles() {
    let result = parse(Expression, "new Map<Id, List<Contact>>()");
    assert!(result.is_valid());
    let type_args = result
        .syntax()
        .descendants()
        .filter(|n| n.kind() == SyntaxKind::TypeArgs)
        .count();
    assert_eq!(type_args, 2);
}

#[test]
fn array_creation() {
    valid(Expression, "new String[5]");
    valid(Expression, "new Integer[]{1, 2, 3}");
}

#[test]
fn instanceof_takes_a_type() {
    let result = parse(Expression, "x instanceof Account");
    assert!(result.is_valid());
    let root = result.syntax();
    let node = root.first_child().unwrap();
    assert_eq!(node.kind(), SyntaxKind::InstanceOfExpr);
    assert!(
        node.children()
            .any(|child| child.kind() == SyntaxKind::TypeRef)
    );
}

#[test]
fn logical_and_coalesce_precedence() {
    let result = parse(Expression, "a ?? b || c && d == e");
    assert!(result.is_valid());
    let top = result.syntax().first_child().unwrap();
    assert_eq!(top.kind(), SyntaxKind::CoalesceExpr);
}

#[test]
fn embedded_soql() {
    insta::assert_snapshot!(valid(Expression, "[SELECT Id FROM Account]"), @r#"
    ExpressionUnit
      SoqlExpr
        BracketOpen "["
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
        BracketClose "]"
    "#);
}

#[test]
fn cast_of_query() {
    let result = parse(Expression, "(Account) [SELECT Id FROM Account LIMIT 1]");
    assert!(result.is_valid());
    assert_eq!(
        result.syntax().first_child().unwrap().kind(),
        SyntaxKind::CastExpr
    );
}

#[test]
fn this_and_super_calls() {
    valid(Expression, "this.name");
    valid(Expression, "super.describe()");
    valid(Expression, "this(1, 2)");
}
