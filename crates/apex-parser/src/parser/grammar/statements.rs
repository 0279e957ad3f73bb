//! Statements, blocks and the anonymous-script entry rule.

use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::token_sets::{DML_KEYWORDS, LITERALS, SIGNS};
use crate::parser::cst::{SyntaxKind, TokenSet};

/// Where a lone `;` is accepted as a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EmptyStmtPolicy {
    /// Block level and loop bodies.
    Allow,
    /// `if`/`else` bodies and standalone statements: reported, still kept in the tree.
    Reject,
}

const WHEN_RECOVERY: TokenSet = TokenSet::new(&[SyntaxKind::BraceClose, SyntaxKind::KwWhen]);

impl Parser<'_, '_> {
    pub(crate) fn parse_anonymous_unit_body(&mut self) {
        while !self.should_stop() {
            if self.at(SyntaxKind::BraceClose) {
                self.error_and_bump_msg(DiagnosticKind::UnexpectedToken, "unmatched `}`");
                continue;
            }
            self.parse_statement(EmptyStmtPolicy::Allow);
        }
    }

    pub(crate) fn parse_standalone_statement(&mut self) {
        self.parse_statement(EmptyStmtPolicy::Reject);
    }

    /// `{ statement* }`
    pub(crate) fn parse_block(&mut self) {
        self.start_node(SyntaxKind::Block);
        if !self.at(SyntaxKind::BraceOpen) {
            let message = self.expected_message("`{`");
            self.error_msg(DiagnosticKind::UnexpectedToken, message);
            self.finish_node();
            return;
        }
        self.open_delimiter(SyntaxKind::BraceOpen);
        while !self.should_stop() && !self.at(SyntaxKind::BraceClose) {
            self.parse_statement(EmptyStmtPolicy::Allow);
        }
        self.close_delimiter(SyntaxKind::BraceClose, "block");
        self.finish_node();
    }

    /// Consumes at least one token unless at `}` or the end of input.
    pub(crate) fn parse_statement(&mut self, empty: EmptyStmtPolicy) {
        if !self.enter_recursion() {
            return;
        }

        match self.current() {
            SyntaxKind::BraceOpen => self.parse_block(),
            SyntaxKind::Semicolon => self.parse_empty_statement(empty),
            SyntaxKind::KwIf => self.parse_if(),
            SyntaxKind::KwSwitch if self.nth_at_keyword(1, SyntaxKind::KwOn) => self.parse_switch(),
            SyntaxKind::KwFor => self.parse_for(),
            SyntaxKind::KwWhile => self.parse_while(),
            SyntaxKind::KwDo => self.parse_do_while(),
            SyntaxKind::KwTry => self.parse_try(),
            SyntaxKind::KwReturn => self.parse_return(),
            SyntaxKind::KwThrow => self.parse_throw(),
            SyntaxKind::KwBreak => self.parse_jump(SyntaxKind::BreakStmt),
            SyntaxKind::KwContinue => self.parse_jump(SyntaxKind::ContinueStmt),
            kind if DML_KEYWORDS.contains(kind) => self.parse_dml(),
            _ if self.at_run_as() => self.parse_run_as(),
            _ if self.at_local_var_decl() => self.parse_local_var_decl(true),
            _ if self.at_expr_start() => self.parse_expr_stmt(),
            _ => {
                let found = self.describe_current();
                let message = format!("found {found}");
                if self.at_eof() || self.at(SyntaxKind::BraceClose) {
                    self.error_msg(DiagnosticKind::ExpectedStatement, message);
                } else {
                    self.error_and_bump_msg(DiagnosticKind::ExpectedStatement, message);
                }
            }
        }

        self.exit_recursion();
    }

    fn parse_empty_statement(&mut self, empty: EmptyStmtPolicy) {
        self.start_node(SyntaxKind::EmptyStmt);
        if empty == EmptyStmtPolicy::Reject {
            self.error(DiagnosticKind::EmptyStatement);
        }
        self.bump();
        self.finish_node();
    }

    fn expect_semicolon(&mut self) {
        self.expect(SyntaxKind::Semicolon, "`;`");
    }

    /// `( expr )` as part of a statement header.
    fn parse_paren_condition(&mut self, started: &str) {
        if !self.at(SyntaxKind::ParenOpen) {
            let message = self.expected_message("`(`");
            self.error_msg(DiagnosticKind::UnexpectedToken, message);
            return;
        }
        self.open_delimiter(SyntaxKind::ParenOpen);
        self.parse_expr();
        self.close_delimiter(SyntaxKind::ParenClose, started);
    }

    fn parse_if(&mut self) {
        self.start_node(SyntaxKind::IfStmt);
        self.bump();
        self.parse_paren_condition("`if` condition");
        self.parse_statement(EmptyStmtPolicy::Reject);
        if self.at(SyntaxKind::KwElse) {
            self.start_node(SyntaxKind::ElseClause);
            self.bump();
            self.parse_statement(EmptyStmtPolicy::Reject);
            self.finish_node();
        }
        self.finish_node();
    }

    fn parse_while(&mut self) {
        self.start_node(SyntaxKind::WhileStmt);
        self.bump();
        self.parse_paren_condition("`while` condition");
        self.parse_statement(EmptyStmtPolicy::Allow);
        self.finish_node();
    }

    /// `do { } while (cond);`
    fn parse_do_while(&mut self) {
        self.start_node(SyntaxKind::DoWhileStmt);
        self.bump();
        self.parse_block();
        self.expect(SyntaxKind::KwWhile, "`while`");
        self.parse_paren_condition("`while` condition");
        self.expect_semicolon();
        self.finish_node();
    }

    fn parse_for(&mut self) {
        self.start_node(SyntaxKind::ForStmt);
        self.bump();
        if self.at(SyntaxKind::ParenOpen) {
            self.open_delimiter(SyntaxKind::ParenOpen);
            if self.at_enhanced_for() {
                self.parse_enhanced_for_control();
            } else {
                self.parse_for_control();
            }
            self.close_delimiter(SyntaxKind::ParenClose, "`for` header");
        } else {
            let message = self.expected_message("`(`");
            self.error_msg(DiagnosticKind::UnexpectedToken, message);
        }
        self.parse_statement(EmptyStmtPolicy::Allow);
        self.finish_node();
    }

    /// `[final] Type name :`
    fn at_enhanced_for(&mut self) -> bool {
        let mut index = self.scan_start();
        while self.kind_at(index) == SyntaxKind::KwFinal {
            index = self.significant_after(index);
        }
        let Some(name) = self.scan_type(index) else {
            return false;
        };
        self.kind_at(name).is_name()
            && self.kind_at(self.significant_after(name)) == SyntaxKind::Colon
    }

    fn parse_enhanced_for_control(&mut self) {
        self.start_node(SyntaxKind::EnhancedForControl);
        self.parse_final_modifiers();
        self.parse_type_ref();
        self.expect_name("loop variable");
        self.expect(SyntaxKind::Colon, "`:`");
        self.parse_expr();
        self.finish_node();
    }

    /// `init; condition; update`, every part optional.
    fn parse_for_control(&mut self) {
        self.start_node(SyntaxKind::ForControl);

        if !self.at(SyntaxKind::Semicolon) {
            self.start_node(SyntaxKind::ForInit);
            if self.at_local_var_decl() {
                self.parse_local_var_decl(false);
            } else {
                self.parse_expr_list();
            }
            self.finish_node();
        }
        self.expect_semicolon();

        if !self.at(SyntaxKind::Semicolon) {
            self.parse_expr();
        }
        self.expect_semicolon();

        if !self.at(SyntaxKind::ParenClose) {
            self.start_node(SyntaxKind::ForUpdate);
            self.parse_expr_list();
            self.finish_node();
        }

        self.finish_node();
    }

    fn parse_expr_list(&mut self) {
        loop {
            self.parse_expr();
            if self.should_stop() || !self.eat(SyntaxKind::Comma) {
                break;
            }
        }
    }

    fn parse_try(&mut self) {
        self.start_node(SyntaxKind::TryStmt);
        self.bump();
        self.parse_block();

        let mut handled = false;
        while self.at(SyntaxKind::KwCatch) {
            self.parse_catch_clause();
            handled = true;
        }
        if self.at(SyntaxKind::KwFinally) {
            self.start_node(SyntaxKind::FinallyClause);
            self.bump();
            self.parse_block();
            self.finish_node();
            handled = true;
        }
        if !handled {
            self.error(DiagnosticKind::MissingCatchOrFinally);
        }

        self.finish_node();
    }

    /// `catch (final? Type name) { }`
    fn parse_catch_clause(&mut self) {
        self.start_node(SyntaxKind::CatchClause);
        self.bump();
        if self.at(SyntaxKind::ParenOpen) {
            self.open_delimiter(SyntaxKind::ParenOpen);
            self.parse_final_modifiers();
            self.parse_type_ref();
            self.expect_name("exception variable");
            self.close_delimiter(SyntaxKind::ParenClose, "`catch` parameter");
        } else {
            let message = self.expected_message("`(`");
            self.error_msg(DiagnosticKind::UnexpectedToken, message);
        }
        self.parse_block();
        self.finish_node();
    }

    fn parse_return(&mut self) {
        self.start_node(SyntaxKind::ReturnStmt);
        self.bump();
        if !self.at(SyntaxKind::Semicolon) && self.at_expr_start() {
            self.parse_expr();
        }
        self.expect_semicolon();
        self.finish_node();
    }

    fn parse_throw(&mut self) {
        self.start_node(SyntaxKind::ThrowStmt);
        self.bump();
        self.parse_expr();
        self.expect_semicolon();
        self.finish_node();
    }

    /// `break;` or `continue;`
    fn parse_jump(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.bump();
        self.expect_semicolon();
        self.finish_node();
    }

    /// `insert [as user|system] records;`, `merge master duplicate;`, `upsert records Field;`
    fn parse_dml(&mut self) {
        self.start_node(SyntaxKind::DmlStmt);
        let keyword = self.current();
        self.bump();

        if self.at(SyntaxKind::KwAs)
            && matches!(self.nth(1), SyntaxKind::KwUser | SyntaxKind::KwSystem)
        {
            self.start_node(SyntaxKind::AccessLevel);
            self.bump();
            self.bump();
            self.finish_node();
        }

        self.parse_expr();
        match keyword {
            SyntaxKind::KwMerge => self.parse_expr(),
            SyntaxKind::KwUpsert if self.at_name() => self.parse_qualified_name(),
            _ => {}
        }
        self.expect_semicolon();
        self.finish_node();
    }

    /// `System.runAs(user) { }`
    fn at_run_as(&mut self) -> bool {
        self.at(SyntaxKind::KwSystem)
            && self.next_is(SyntaxKind::Dot)
            && self.nth_text(2).eq_ignore_ascii_case("runas")
            && self.nth(3) == SyntaxKind::ParenOpen
    }

    fn parse_run_as(&mut self) {
        self.start_node(SyntaxKind::RunAsStmt);
        self.bump();
        self.bump();
        self.bump_name();
        self.parse_arg_list();
        self.parse_block();
        self.finish_node();
    }

    /// `[final] Type a = 1, b;` or, inside a `for` header, the same without `;`.
    pub(crate) fn parse_local_var_decl(&mut self, terminated: bool) {
        self.start_node(SyntaxKind::LocalVarDecl);
        self.parse_final_modifiers();
        self.parse_type_ref();
        self.parse_variable_declarators();
        if terminated {
            self.expect_semicolon();
        }
        self.finish_node();
    }

    fn parse_final_modifiers(&mut self) {
        if !self.at(SyntaxKind::KwFinal) {
            return;
        }
        self.start_node(SyntaxKind::ModifierList);
        while self.at(SyntaxKind::KwFinal) {
            self.bump();
        }
        self.finish_node();
    }

    /// `a = 1, b, c = d`
    pub(crate) fn parse_variable_declarators(&mut self) {
        loop {
            self.start_node(SyntaxKind::VariableDeclarator);
            self.expect_name("variable name");
            if self.eat(SyntaxKind::Assign) {
                self.parse_expr();
            }
            self.finish_node();
            if self.should_stop() || !self.eat(SyntaxKind::Comma) {
                break;
            }
        }
    }

    fn parse_expr_stmt(&mut self) {
        self.start_node(SyntaxKind::ExprStmt);
        self.parse_expr();
        self.expect_semicolon();
        self.finish_node();
    }

    /// `switch on expr { when ... { } }`
    fn parse_switch(&mut self) {
        self.start_node(SyntaxKind::SwitchStmt);
        self.bump();
        self.bump_remap(SyntaxKind::KwOn);
        self.parse_expr();

        if self.at(SyntaxKind::BraceOpen) {
            self.open_delimiter(SyntaxKind::BraceOpen);
            while !self.should_stop() && !self.at(SyntaxKind::BraceClose) {
                if self.at_keyword(SyntaxKind::KwWhen) {
                    self.parse_when_clause();
                } else {
                    let message = self.expected_message("`when`");
                    self.error_recover(DiagnosticKind::UnexpectedToken, message, WHEN_RECOVERY);
                }
            }
            self.close_delimiter(SyntaxKind::BraceClose, "`switch` body");
        } else {
            let message = self.expected_message("`{`");
            self.error_msg(DiagnosticKind::UnexpectedToken, message);
        }

        self.finish_node();
    }

    /// `when else`, `when Type name`, or `when v1, v2`, followed by a block.
    fn parse_when_clause(&mut self) {
        self.start_node(SyntaxKind::WhenClause);
        self.bump_remap(SyntaxKind::KwWhen);

        if self.at(SyntaxKind::KwElse) {
            self.bump();
        } else if self.at_when_type_binding() {
            self.start_node(SyntaxKind::WhenTypeBinding);
            self.parse_type_ref();
            self.expect_name("variable name");
            self.finish_node();
        } else {
            loop {
                self.start_node(SyntaxKind::WhenValue);
                self.parse_when_literal();
                self.finish_node();
                if self.should_stop() || !self.eat(SyntaxKind::Comma) {
                    break;
                }
            }
        }

        self.parse_block();
        self.finish_node();
    }

    fn at_when_type_binding(&mut self) -> bool {
        let start = self.scan_start();
        self.scan_type(start)
            .is_some_and(|name| self.kind_at(name).is_name())
    }

    /// A literal, enum constant, or signed number, possibly in parentheses.
    fn parse_when_literal(&mut self) {
        if !self.enter_recursion() {
            return;
        }

        match self.current() {
            SyntaxKind::ParenOpen => {
                self.open_delimiter(SyntaxKind::ParenOpen);
                self.parse_when_literal();
                self.close_delimiter(SyntaxKind::ParenClose, "`when` value");
            }
            kind if SIGNS.contains(kind) => self.parse_signed_number(),
            kind if LITERALS.contains(kind) => self.parse_literal(),
            kind if kind.is_name() => {
                self.start_node(SyntaxKind::NameRef);
                self.bump_name();
                self.finish_node();
            }
            _ => {
                let found = self.describe_current();
                let message = format!("`when` value, found {found}");
                if self.at_eof()
                    || matches!(
                        self.current(),
                        SyntaxKind::BraceOpen | SyntaxKind::Comma | SyntaxKind::ParenClose
                    )
                {
                    self.error_msg(DiagnosticKind::ExpectedLiteral, message);
                } else {
                    self.error_and_bump_msg(DiagnosticKind::ExpectedLiteral, message);
                }
            }
        }

        self.exit_recursion();
    }
}
