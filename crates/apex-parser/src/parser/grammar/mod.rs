//! Grammar productions for Apex, SOQL and SOSL.
//!
//! Every production is a `parse_*` method on `Parser`, split by language area.
//! Entry rules wrap their content in a unit node; anything left after the rule
//! ends up in an `Error` node with a single `TrailingInput` diagnostic.

mod declarations;
mod expressions;
mod literals;
mod soql;
mod sosl;
mod statements;
mod triggers;
mod types;

use super::EntryRule;
use super::core::Parser;
use super::cst::SyntaxKind;
use crate::diagnostics::DiagnosticKind;

impl Parser<'_, '_> {
    pub(crate) fn parse_entry(&mut self, rule: EntryRule) {
        self.start_node(rule.root_kind());

        match rule {
            EntryRule::CompilationUnit => self.parse_compilation_unit_body(),
            EntryRule::TriggerUnit => self.parse_trigger_unit_body(),
            EntryRule::AnonymousUnit => self.parse_anonymous_unit_body(),
            EntryRule::Statement => self.parse_standalone_statement(),
            EntryRule::Expression => self.parse_expr(),
            EntryRule::Query => self.parse_query(),
            EntryRule::Literal => self.parse_literal_entry(),
        }

        self.parse_trailing_input();
        self.drain_trivia();
        self.finish_node();
    }

    /// Wraps whatever the entry rule left unconsumed.
    fn parse_trailing_input(&mut self) {
        if self.should_stop() {
            return;
        }
        let found = self.describe_current();
        self.start_node(SyntaxKind::Error);
        self.error_msg(DiagnosticKind::TrailingInput, format!("found {found}"));
        while !self.should_stop() {
            self.bump();
        }
        self.finish_node();
    }
}
