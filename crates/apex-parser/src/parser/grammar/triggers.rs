use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::SyntaxKind;
use crate::parser::cst::token_sets::{TRIGGER_EVENTS, TRIGGER_TIMINGS};

impl Parser<'_, '_> {
    /// `trigger Name on Object (before insert, after update) { ... }`
    pub(crate) fn parse_trigger_unit_body(&mut self) {
        self.expect_keyword(SyntaxKind::KwTrigger, "`trigger`");
        self.expect_name("trigger name");
        self.expect_keyword(SyntaxKind::KwOn, "`on`");
        self.expect_name("object name");

        if self.at(SyntaxKind::ParenOpen) {
            self.open_delimiter(SyntaxKind::ParenOpen);
            loop {
                self.parse_trigger_case();
                if self.should_stop() || !self.eat(SyntaxKind::Comma) {
                    break;
                }
            }
            self.close_delimiter(SyntaxKind::ParenClose, "trigger events");
        } else {
            let message = self.expected_message("`(`");
            self.error_msg(DiagnosticKind::UnexpectedToken, message);
        }

        self.parse_block();
    }

    fn parse_trigger_case(&mut self) {
        self.start_node(SyntaxKind::TriggerCase);
        if !self.eat_set(TRIGGER_TIMINGS) {
            let message = self.expected_message("`before` or `after`");
            self.error_msg(DiagnosticKind::UnexpectedToken, message);
        }
        if !self.eat_set(TRIGGER_EVENTS) {
            let message = self.expected_message("`insert`, `update`, `delete` or `undelete`");
            self.error_msg(DiagnosticKind::UnexpectedToken, message);
        }
        self.finish_node();
    }
}
