//! SOSL searches. Only reachable from an embedded `[FIND ...]`.

use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::SyntaxKind;

impl Parser<'_, '_> {
    /// `FIND 'term' [IN group FIELDS] [RETURNING ...] [WITH ...]* [LIMIT n]`
    pub(crate) fn parse_sosl_query(&mut self) {
        if !self.enter_recursion() {
            return;
        }
        self.start_node(SyntaxKind::SoslQuery);

        self.expect_keyword(SyntaxKind::KwFind, "`FIND`");
        match self.current() {
            SyntaxKind::StringLiteral => {
                self.start_node(SyntaxKind::SoqlLiteral);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::Colon => self.parse_bound_expr(),
            _ => {
                let found = self.describe_current();
                self.error_msg(
                    DiagnosticKind::ExpectedQueryValue,
                    format!("search term, found {found}"),
                );
            }
        }

        if self.at_keyword(SyntaxKind::KwIn) {
            self.start_node(SyntaxKind::SearchGroup);
            self.bump_remap(SyntaxKind::KwIn);
            if self.current().is_word() {
                self.bump_name();
            } else {
                let found = self.describe_current();
                self.error_msg(
                    DiagnosticKind::ExpectedIdentifier,
                    format!("search group, found {found}"),
                );
            }
            self.expect_keyword(SyntaxKind::KwFields, "`FIELDS`");
            self.finish_node();
        }

        if self.at_keyword(SyntaxKind::KwReturning) {
            self.parse_returning_clause();
        }
        while self.at_keyword(SyntaxKind::KwWith) {
            self.parse_sosl_with_clause();
        }
        if self.at_keyword(SyntaxKind::KwLimit) {
            self.parse_row_count_clause(SyntaxKind::LimitClause, SyntaxKind::KwLimit);
        }

        self.finish_node();
        self.exit_recursion();
    }

    /// `RETURNING Account(Id, Name WHERE ... ORDER BY ... LIMIT n), Contact`
    fn parse_returning_clause(&mut self) {
        self.start_node(SyntaxKind::ReturningClause);
        self.bump_remap(SyntaxKind::KwReturning);
        loop {
            self.parse_returning_entry();
            if self.should_stop() || !self.eat(SyntaxKind::Comma) {
                break;
            }
        }
        self.finish_node();
    }

    fn parse_returning_entry(&mut self) {
        self.start_node(SyntaxKind::ReturningEntry);
        self.parse_field_name();

        if self.at(SyntaxKind::ParenOpen) {
            self.open_delimiter(SyntaxKind::ParenOpen);
            loop {
                self.parse_field_name();
                if self.should_stop() || !self.eat(SyntaxKind::Comma) {
                    break;
                }
            }
            if self.at_keyword(SyntaxKind::KwWhere) {
                self.start_node(SyntaxKind::WhereClause);
                self.bump_remap(SyntaxKind::KwWhere);
                self.parse_logical_expr();
                self.finish_node();
            }
            if self.at_keyword(SyntaxKind::KwOrder) && self.nth_at_keyword(1, SyntaxKind::KwBy) {
                self.parse_order_by_clause();
            }
            if self.at_keyword(SyntaxKind::KwLimit) {
                self.parse_row_count_clause(SyntaxKind::LimitClause, SyntaxKind::KwLimit);
            }
            if self.at_keyword(SyntaxKind::KwOffset) {
                self.parse_row_count_clause(SyntaxKind::OffsetClause, SyntaxKind::KwOffset);
            }
            self.close_delimiter(SyntaxKind::ParenClose, "returned fields");
        }

        self.finish_node();
    }

    /// `WITH DATA CATEGORY ...`, `WITH DIVISION = 'x'`, `WITH HIGHLIGHT`, `WITH SNIPPET(...)`
    fn parse_sosl_with_clause(&mut self) {
        self.start_node(SyntaxKind::WithClause);
        self.bump_remap(SyntaxKind::KwWith);

        if self.at_keyword(SyntaxKind::KwData) && self.nth_at_keyword(1, SyntaxKind::KwCategory) {
            self.parse_data_category();
            self.finish_node();
            return;
        }

        if self.current().is_word() {
            self.bump_name();
        } else {
            let found = self.describe_current();
            self.error_msg(
                DiagnosticKind::ExpectedIdentifier,
                format!("search option, found {found}"),
            );
        }
        match self.current() {
            SyntaxKind::Assign => {
                self.bump();
                self.parse_soql_value();
            }
            SyntaxKind::ParenOpen => {
                self.open_delimiter(SyntaxKind::ParenOpen);
                self.parse_logical_expr();
                self.close_delimiter(SyntaxKind::ParenClose, "search option");
            }
            _ if self.at_keyword(SyntaxKind::KwIn) => {
                self.bump_remap(SyntaxKind::KwIn);
                self.parse_soql_value();
            }
            _ => {}
        }
        self.finish_node();
    }
}
