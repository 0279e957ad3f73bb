use indoc::indoc;

use crate::parser::EntryRule::CompilationUnit;
use crate::parser::ast::TypeDecl;
use crate::parser::{SyntaxKind, parse_compilation_unit};
use crate::parser::tests::{invalid, parse, valid};

fn member_kinds(input: &str) -> Vec<SyntaxKind> {
    let result = parse(CompilationUnit, input);
    assert!(
        result.is_valid(),
        "{}",
        result.diagnostics().printer().render()
    );
    let root = result.syntax();
    let body = root
        .descendants()
        .find(|n| matches!(n.kind(), SyntaxKind::ClassBody | SyntaxKind::InterfaceBody))
        .unwrap();
    body.children().map(|n| n.kind()).collect()
}

#[test]
fn empty_class() {
    insta::assert_snapshot!(valid(CompilationUnit, "public class Hello { }"), @r#"
    CompilationUnit
      ClassDecl
        ModifierList
          KwPublic "public"
        KwClass "class"
        Ident "Hello"
        ClassBody
          BraceOpen "{"
          BraceClose "}"
    "#);
}

#[test]
fn class_keywords_ignore_case() {
    insta::assert_snapshot!(valid(CompilationUnit, "PUBLIC Class Foo EXTENDS Bar { }"), @r#"
    CompilationUnit
      ClassDecl
        ModifierList
          KwPublic "PUBLIC"
        KwClass "Class"
        Ident "Foo"
        ExtendsClause
          KwExtends "EXTENDS"
          TypeRef
            TypeName
              Ident "Bar"
        ClassBody
          BraceOpen "{"
          BraceClose "}"
    "#);
}

#[test]
fn sharing_modifiers_and_annotations() {
    insta::assert_snapshot!(valid(CompilationUnit, "@IsTest public with sharing class T { }"), @r#"
    CompilationUnit
      ClassDecl
        ModifierList
          Annotation
            At "@"
            QualifiedName
              Ident "IsTest"
          KwPublic "public"
          KwWith "with"
          KwSharing "sharing"
        KwClass "class"
        Ident "T"
        ClassBody
          BraceOpen "{"
          BraceClose "}"
    "#);
    valid(CompilationUnit, "global inherited sharing class T { }");
    valid(CompilationUnit, "public without sharing class T { }");
}

#[test]
fn annotation_arguments() {
    valid(
        CompilationUnit,
        "@RestResource(urlMapping='/accounts/*') global class Api { }",
    );
    valid(
        CompilationUnit,
        "public class T { @IsTest(SeeAllData=true OnInstall=false) static void run() { } }",
    );
    valid(
        CompilationUnit,
        "public class T { @SuppressWarnings('PMD') void run() { } }",
    );
}

#[test]
fn every_member_kind() {
    let input = indoc! {r#"
        public virtual class Account_Service extends Base implements Service, Comparable {
            private static final Integer LIMIT_SIZE = 200, OTHER;
            public String name { get; private set; }
            public Integer count { get { return 1; } set { count = value; } }
            static { LIMIT_SIZE = 1; }
            { name = 'x'; }
            public Account_Service() { super(); }
            public override Integer compareTo(Object other) { return 0; }
            public void run(final List<Account> records, Map<Id, Account> byId) { }
            public enum Color { RED, GREEN }
            private class Inner { }
            public interface Callback { void done(); }
        }
    "#};
    assert_eq!(
        member_kinds(input),
        vec![
            SyntaxKind::FieldDecl,
            SyntaxKind::PropertyDecl,
            SyntaxKind::PropertyDecl,
            SyntaxKind::InitializerBlock,
            SyntaxKind::InitializerBlock,
            SyntaxKind::ConstructorDecl,
            SyntaxKind::MethodDecl,
            SyntaxKind::MethodDecl,
            SyntaxKind::EnumDecl,
            SyntaxKind::ClassDecl,
            SyntaxKind::InterfaceDecl,
        ]
    );
}

#[test]
fn property_accessors() {
    insta::assert_snapshot!(
        valid(CompilationUnit, "class C { Integer x { get; private set; } }"),
        @r#"
    CompilationUnit
      ClassDecl
        KwClass "class"
        Ident "C"
        ClassBody
          BraceOpen "{"
          PropertyDecl
            TypeRef
              TypeName
                Ident "Integer"
            Ident "x"
            BraceOpen "{"
            PropertyAccessor
              KwGet "get"
              Semicolon ";"
            PropertyAccessor
              ModifierList
                KwPrivate "private"
              KwSet "set"
              Semicolon ";"
            BraceClose "}"
          BraceClose "}"
    "#
    );
}

#[test]
fn interface_with_signatures() {
    assert_eq!(
        member_kinds("public interface Shape extends Named, Sized { Decimal area(); void scale(Decimal f); }"),
        vec![SyntaxKind::MethodDecl, SyntaxKind::MethodDecl]
    );
}

#[test]
fn abstract_method_without_body() {
    valid(
        CompilationUnit,
        "public abstract class Shape { public abstract Decimal area(); }",
    );
}

#[test]
fn top_level_enum() {
    insta::assert_snapshot!(valid(CompilationUnit, "public enum Season { WINTER, SUMMER }"), @r#"
    CompilationUnit
      EnumDecl
        ModifierList
          KwPublic "public"
        KwEnum "enum"
        Ident "Season"
        EnumBody
          BraceOpen "{"
          Ident "WINTER"
          Comma ","
          Ident "SUMMER"
          BraceClose "}"
    "#);
}

#[test]
fn soft_keywords_as_member_names() {
    valid(
        CompilationUnit,
        "class C { Integer after; String trigger(Integer sharing) { return null; } }",
    );
}

#[test]
fn one_type_per_compilation_unit() {
    insta::assert_snapshot!(
        invalid(CompilationUnit, "class A { } class B { }"),
        @"error at 1:12: unexpected input after the end: found `class`"
    );
}

#[test]
fn missing_declaration() {
    insta::assert_snapshot!(
        invalid(CompilationUnit, "public Integer x;"),
        @"error at 1:7: expected a type declaration: found `Integer`"
    );
}

#[test]
fn comments_do_not_disturb_the_tree() {
    let input = indoc! {r#"
        /**
         * Documented.
         */
        public class Documented { // trailing
            /* inner */ Integer x; // after
        }
    "#};
    let result = parse(CompilationUnit, input);
    assert!(result.is_valid());
    assert_eq!(result.text(), input);
}

/// Upper-cases the letters of `word` whose bit is set in `mask`.
fn cased(word: &str, mask: u32) -> String {
    word.chars()
        .enumerate()
        .map(|(i, c)| {
            if mask & (1 << i) != 0 {
                c.to_ascii_uppercase()
            } else {
                c
            }
        })
        .collect()
}

#[test]
fn every_casing_of_public_and_class() {
    for public_mask in 0u32..1 << "public".len() {
        for class_mask in 0u32..1 << "class".len() {
            let input = format!(
                "{} {} A {{ }}",
                cased("public", public_mask),
                cased("class", class_mask)
            );
            let result = parse_compilation_unit(&input).unwrap();
            assert!(result.diagnostics().is_empty(), "{input}");
            assert_eq!(result.syntax().kind(), SyntaxKind::CompilationUnit);

            let Some(TypeDecl::ClassDecl(class)) = result.tree().type_decl() else {
                panic!("expected a class: {input}");
            };
            assert!(class.modifiers().unwrap().has(SyntaxKind::KwPublic), "{input}");
        }
    }
}
