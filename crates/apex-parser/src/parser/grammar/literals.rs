use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::SyntaxKind;
use crate::parser::cst::token_sets::{LITERALS, NUMBERS, SIGNS};

impl Parser<'_, '_> {
    /// A single literal token wrapped in `Literal`.
    pub(crate) fn parse_literal(&mut self) {
        self.start_node(SyntaxKind::Literal);
        self.bump();
        self.finish_node();
    }

    /// Entry rule: exactly one Apex literal.
    pub(crate) fn parse_literal_entry(&mut self) {
        if self.at_set(LITERALS) {
            self.parse_literal();
        } else {
            let found = self.describe_current();
            self.error_msg(DiagnosticKind::ExpectedLiteral, format!("found {found}"));
        }
    }

    /// `-1`, `+2L`, `-+-3.5`
    pub(crate) fn parse_signed_number(&mut self) {
        self.start_node(SyntaxKind::SignedNumber);
        while self.at_set(SIGNS) {
            self.bump();
        }
        if self.at_set(NUMBERS) {
            self.bump();
        } else {
            let found = self.describe_current();
            self.error_msg(
                DiagnosticKind::ExpectedLiteral,
                format!("number after sign, found {found}"),
            );
        }
        self.finish_node();
    }
}
