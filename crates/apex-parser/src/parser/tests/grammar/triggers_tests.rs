use indoc::indoc;

use crate::parser::EntryRule::TriggerUnit;
use crate::parser::tests::{invalid, parse, valid};

#[test]
fn trigger_header() {
    insta::assert_snapshot!(valid(TriggerUnit, "trigger T on Account (before insert, after update) { }"), @r#"
    TriggerUnit
      KwTrigger "trigger"
      Ident "T"
      KwOn "on"
      Ident "Account"
      ParenOpen "("
      TriggerCase
        KwBefore "before"
        KwInsert "insert"
      Comma ","
      TriggerCase
        KwAfter "after"
        KwUpdate "update"
      ParenClose ")"
      Block
        BraceOpen "{"
        BraceClose "}"
    "#);
}

#[test]
fn trigger_body_statements() {
    let input = indoc! {r#"
        trigger AccountTrigger on Account (before insert, before update, after delete, after undelete) {
            for (Account a : Trigger.new) {
                a.Name = 'x';
            }
            if (Trigger.isBefore) {
                update [SELECT Id FROM Contact WHERE AccountId IN :Trigger.newMap.keySet()];
            }
        }
    "#};
    let result = parse(TriggerUnit, input);
    assert!(
        result.is_valid(),
        "{}",
        result.diagnostics().printer().render()
    );
    assert_eq!(result.text(), input);
}

#[test]
fn unsupported_trigger_event() {
    insta::assert_snapshot!(
        invalid(TriggerUnit, "trigger T on Account (before merge) { }"),
        @"error at 1:29: expected `insert`, `update`, `delete` or `undelete`, found `merge`"
    );
}
