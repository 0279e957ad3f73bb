//! Type references and the speculative type scan used to tell declarations from expressions.

use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::SyntaxKind;

/// Generic arguments nested deeper than this are not treated as a type by the scan.
const MAX_SCAN_DEPTH: u32 = 16;

impl Parser<'_, '_> {
    /// `Name(.Name)*` with optional `<...>` per segment, then `[]*`.
    pub(crate) fn parse_type_ref(&mut self) {
        if !self.enter_recursion() {
            return;
        }

        self.start_node(SyntaxKind::TypeRef);
        self.parse_type_name();
        while self.at(SyntaxKind::Dot) && self.nth(1).is_name() {
            self.bump();
            self.parse_type_name();
        }
        while self.at(SyntaxKind::BracketOpen) && self.next_is(SyntaxKind::BracketClose) {
            self.start_node(SyntaxKind::ArraySubscript);
            self.bump();
            self.bump();
            self.finish_node();
        }
        self.finish_node();

        self.exit_recursion();
    }

    fn parse_type_name(&mut self) {
        self.start_node(SyntaxKind::TypeName);
        if self.at_name() {
            self.bump_name();
        } else {
            let found = self.describe_current();
            self.error_msg(DiagnosticKind::ExpectedTypeName, format!("found {found}"));
        }
        if self.at(SyntaxKind::Lt) {
            self.parse_type_args();
        }
        self.finish_node();
    }

    /// `<T, U>`; each `>` of a `>>` closes one level.
    fn parse_type_args(&mut self) {
        self.start_node(SyntaxKind::TypeArgs);
        self.bump();
        loop {
            self.parse_type_ref();
            if self.should_stop() || !self.eat(SyntaxKind::Comma) {
                break;
            }
        }
        self.expect(SyntaxKind::Gt, "`>` closing type arguments");
        self.finish_node();
    }

    /// `a.b.c` as written, e.g. an annotation name or an upsert key field.
    pub(crate) fn parse_qualified_name(&mut self) {
        self.start_node(SyntaxKind::QualifiedName);
        self.expect_name("name");
        while self.at(SyntaxKind::Dot) && self.nth(1).is_word() {
            self.bump();
            self.bump_name();
        }
        self.finish_node();
    }

    /// Scans a type starting at raw index `index` without consuming anything.
    ///
    /// Returns the index of the first significant token after the type.
    pub(crate) fn scan_type(&self, index: usize) -> Option<usize> {
        self.scan_type_at_depth(index, 0)
    }

    fn scan_type_at_depth(&self, mut index: usize, depth: u32) -> Option<usize> {
        if depth > MAX_SCAN_DEPTH {
            return None;
        }

        loop {
            if !self.kind_at(index).is_name() {
                return None;
            }
            index = self.significant_after(index);

            if self.kind_at(index) == SyntaxKind::Lt {
                index = self.significant_after(index);
                loop {
                    index = self.scan_type_at_depth(index, depth + 1)?;
                    match self.kind_at(index) {
                        SyntaxKind::Comma => index = self.significant_after(index),
                        SyntaxKind::Gt => {
                            index = self.significant_after(index);
                            break;
                        }
                        _ => return None,
                    }
                }
            }

            let next = self.significant_after(index);
            if self.kind_at(index) == SyntaxKind::Dot && self.kind_at(next).is_name() {
                index = next;
                continue;
            }
            break;
        }

        while self.kind_at(index) == SyntaxKind::BracketOpen {
            let close = self.significant_after(index);
            if self.kind_at(close) != SyntaxKind::BracketClose {
                break;
            }
            index = self.significant_after(close);
        }
        Some(index)
    }

    /// `[final] Type name` followed by `=`, `;`, `,`, `:` or the end of input.
    pub(crate) fn at_local_var_decl(&mut self) -> bool {
        let mut index = self.scan_start();
        while self.kind_at(index) == SyntaxKind::KwFinal {
            index = self.significant_after(index);
        }
        let Some(name) = self.scan_type(index) else {
            return false;
        };
        if !self.kind_at(name).is_name() {
            return false;
        }
        let after = self.significant_after(name);
        after >= self.tokens.len()
            || matches!(
                self.kind_at(after),
                SyntaxKind::Assign | SyntaxKind::Semicolon | SyntaxKind::Comma | SyntaxKind::Colon
            )
    }
}
