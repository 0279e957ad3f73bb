//! Apex expressions: Pratt loop for binary operators, then unary, postfix and primaries.

use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::SyntaxKind;
use crate::parser::cst::token_sets::{
    ASSIGN_OPS, CAST_FOLLOW, COMPARISON_OPS, EQUALITY_OPS, EXPR_RECOVERY, LITERALS, NEG_OPS,
    PREFIX_OPS, QUERY_ONLY_LITERALS,
};

/// Binding power of an infix operator.
///
/// Levels are spaced by 10 so that the `+ 1` of an associativity never
/// reaches the next level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct BindingPower {
    /// How tightly the operator binds to its left operand.
    pub(super) left: u8,
    /// Minimum binding power of the right operand.
    pub(super) right: u8,
}

impl BindingPower {
    const fn left_assoc(precedence: u8) -> Self {
        Self {
            left: precedence,
            right: precedence + 1,
        }
    }

    const fn right_assoc(precedence: u8) -> Self {
        Self {
            left: precedence + 1,
            right: precedence,
        }
    }
}

/// An infix operator at the current position.
#[derive(Debug, Clone, Copy)]
struct InfixOp {
    /// Node wrapping both operands.
    kind: SyntaxKind,
    power: BindingPower,
    /// Tokens spelling the operator (`>>>` is three `>`).
    width: usize,
}

impl InfixOp {
    const fn new(kind: SyntaxKind, power: BindingPower) -> Self {
        Self {
            kind,
            power,
            width: 1,
        }
    }
}

/// Binding power of a binary operator token, lowest to highest.
fn binary_binding_power(kind: SyntaxKind) -> Option<InfixOp> {
    use SyntaxKind::*;
    let op = match kind {
        k if ASSIGN_OPS.contains(k) => InfixOp::new(AssignExpr, BindingPower::right_assoc(10)),
        Question => InfixOp::new(ConditionalExpr, BindingPower::right_assoc(20)),
        QuestionQuestion => InfixOp::new(CoalesceExpr, BindingPower::left_assoc(30)),
        PipePipe => InfixOp::new(LogicalOrExpr, BindingPower::left_assoc(40)),
        AmpAmp => InfixOp::new(LogicalAndExpr, BindingPower::left_assoc(50)),
        Pipe => InfixOp::new(BitOrExpr, BindingPower::left_assoc(60)),
        Caret => InfixOp::new(BitXorExpr, BindingPower::left_assoc(70)),
        Amp => InfixOp::new(BitAndExpr, BindingPower::left_assoc(80)),
        k if EQUALITY_OPS.contains(k) => {
            InfixOp::new(EqualityExpr, BindingPower::left_assoc(90))
        }
        k if COMPARISON_OPS.contains(k) => {
            InfixOp::new(ComparisonExpr, BindingPower::left_assoc(100))
        }
        KwInstanceOf => InfixOp::new(InstanceOfExpr, BindingPower::left_assoc(100)),
        Plus | Minus => InfixOp::new(AdditiveExpr, BindingPower::left_assoc(120)),
        Star | Slash => InfixOp::new(MultiplicativeExpr, BindingPower::left_assoc(130)),
        _ => return None,
    };
    Some(op)
}

const SHIFT_POWER: BindingPower = BindingPower::left_assoc(110);

impl Parser<'_, '_> {
    pub(crate) fn parse_expr(&mut self) {
        self.parse_expr_bp(0);
    }

    /// Parses operands joined by operators binding at least as tightly as `min_bp`.
    pub(crate) fn parse_expr_bp(&mut self, min_bp: u8) {
        if !self.enter_recursion() {
            return;
        }

        let checkpoint = self.checkpoint();
        if !self.parse_unary() {
            self.exit_recursion();
            return;
        }

        while let Some(op) = self.infix_op() {
            if op.power.left < min_bp {
                break;
            }
            for _ in 0..op.width {
                self.bump();
            }
            match op.kind {
                SyntaxKind::ConditionalExpr => {
                    self.parse_expr();
                    self.expect(SyntaxKind::Colon, "`:` in conditional expression");
                    self.parse_expr_bp(op.power.right);
                }
                SyntaxKind::InstanceOfExpr => self.parse_type_ref(),
                _ => self.parse_expr_bp(op.power.right),
            }
            self.start_node_at(checkpoint, op.kind);
            self.finish_node();
        }

        self.exit_recursion();
    }

    /// Shifts are spelled with adjacent angle tokens, so `List<List<X>>` stays a type.
    fn infix_op(&mut self) -> Option<InfixOp> {
        match self.current() {
            SyntaxKind::Lt if self.glued_run(SyntaxKind::Lt, 2) == 2 => Some(InfixOp {
                kind: SyntaxKind::ShiftExpr,
                power: SHIFT_POWER,
                width: 2,
            }),
            SyntaxKind::Gt => match self.glued_run(SyntaxKind::Gt, 3) {
                1 => binary_binding_power(SyntaxKind::Gt),
                width => Some(InfixOp {
                    kind: SyntaxKind::ShiftExpr,
                    power: SHIFT_POWER,
                    width,
                }),
            },
            kind => binary_binding_power(kind),
        }
    }

    /// Returns `false` if no operand could be parsed.
    fn parse_unary(&mut self) -> bool {
        if !self.enter_recursion() {
            return false;
        }

        let parsed = match self.current() {
            kind if PREFIX_OPS.contains(kind) => {
                self.parse_prefix_operand(SyntaxKind::PrefixExpr);
                true
            }
            kind if NEG_OPS.contains(kind) => {
                self.parse_prefix_operand(SyntaxKind::NegExpr);
                true
            }
            SyntaxKind::ParenOpen if self.at_cast() => {
                self.parse_cast();
                true
            }
            _ => self.parse_postfix_expr(),
        };

        self.exit_recursion();
        parsed
    }

    fn parse_prefix_operand(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.bump();
        self.parse_unary();
        self.finish_node();
    }

    /// `(Type) operand`
    fn parse_cast(&mut self) {
        self.start_node(SyntaxKind::CastExpr);
        self.open_delimiter(SyntaxKind::ParenOpen);
        self.parse_type_ref();
        self.close_delimiter(SyntaxKind::ParenClose, "cast");
        self.parse_unary();
        self.finish_node();
    }

    /// A parenthesized type followed by something that can only be an operand.
    fn at_cast(&mut self) -> bool {
        let start = self.scan_start();
        if self.kind_at(start) != SyntaxKind::ParenOpen {
            return false;
        }
        let Some(close) = self.scan_type(self.significant_after(start)) else {
            return false;
        };
        if self.kind_at(close) != SyntaxKind::ParenClose {
            return false;
        }
        let next_index = self.significant_after(close);
        match self.kind_at(next_index) {
            SyntaxKind::BracketOpen => self.scan_at_query(next_index),
            next => {
                CAST_FOLLOW.contains(next)
                    || next.is_query_keyword()
                    || (next.is_soft_keyword() && next != SyntaxKind::KwInstanceOf)
            }
        }
    }

    /// Whether the `[` at `index` opens an embedded SOQL or SOSL query.
    pub(super) fn scan_at_query(&self, index: usize) -> bool {
        let word = self.significant_after(index);
        self.kind_at(word) == SyntaxKind::Ident
            && matches!(
                self.text_at(word).to_ascii_lowercase().as_str(),
                "select" | "find"
            )
    }

    fn parse_postfix_expr(&mut self) -> bool {
        let checkpoint = self.checkpoint();
        if !self.parse_primary() {
            return false;
        }

        loop {
            let kind = match self.current() {
                SyntaxKind::Dot | SyntaxKind::QuestionDot => self.parse_member_suffix(),
                SyntaxKind::BracketOpen => {
                    self.open_delimiter(SyntaxKind::BracketOpen);
                    self.parse_expr();
                    self.close_delimiter(SyntaxKind::BracketClose, "index");
                    SyntaxKind::IndexExpr
                }
                SyntaxKind::PlusPlus | SyntaxKind::MinusMinus => {
                    self.bump();
                    SyntaxKind::PostfixExpr
                }
                _ => break,
            };
            self.start_node_at(checkpoint, kind);
            self.finish_node();
        }
        true
    }

    /// `.name`, `.name(args)`, `?.name` or `.class`; returns the wrapping node kind.
    fn parse_member_suffix(&mut self) -> SyntaxKind {
        self.bump();
        if self.at(SyntaxKind::KwClass) {
            self.bump();
            return SyntaxKind::ClassRefExpr;
        }
        // after a dot every word is a member name, reserved or not
        let kind = self.current();
        if kind.is_word() || kind == SyntaxKind::IntegralCurrencyLiteral {
            self.bump_name();
        } else {
            let found = self.describe_current();
            self.error_msg(
                DiagnosticKind::ExpectedIdentifier,
                format!("member name after `.`, found {found}"),
            );
            return SyntaxKind::FieldAccessExpr;
        }
        if self.at(SyntaxKind::ParenOpen) {
            self.parse_arg_list();
            SyntaxKind::MethodCallExpr
        } else {
            SyntaxKind::FieldAccessExpr
        }
    }

    /// Returns `false` when nothing usable as an operand was found.
    fn parse_primary(&mut self) -> bool {
        match self.current() {
            kind if LITERALS.contains(kind) => self.parse_literal(),
            kind if QUERY_ONLY_LITERALS.contains(kind) => {
                let text = self.current_text();
                self.error_msg(
                    DiagnosticKind::QueryOnlyLiteral,
                    format!("`{text}` is not an Apex expression"),
                );
                self.parse_literal();
            }
            SyntaxKind::KwThis => self.parse_self_reference(SyntaxKind::ThisExpr),
            SyntaxKind::KwSuper => self.parse_self_reference(SyntaxKind::SuperExpr),
            SyntaxKind::KwNew => self.parse_new_expr(),
            SyntaxKind::ParenOpen => {
                self.start_node(SyntaxKind::ParenExpr);
                self.open_delimiter(SyntaxKind::ParenOpen);
                self.parse_expr();
                self.close_delimiter(SyntaxKind::ParenClose, "parenthesized expression");
                self.finish_node();
            }
            SyntaxKind::BracketOpen => return self.parse_embedded_query(),
            kind if kind.is_name() => {
                if self.next_is(SyntaxKind::ParenOpen) {
                    self.start_node(SyntaxKind::MethodCallExpr);
                    self.bump_name();
                    self.parse_arg_list();
                } else {
                    self.start_node(SyntaxKind::NameRef);
                    self.bump_name();
                }
                self.finish_node();
            }
            _ => {
                let found = self.describe_current();
                let message = format!("found {found}");
                if self.at_set(EXPR_RECOVERY) || self.at_eof() {
                    self.error_msg(DiagnosticKind::ExpectedExpression, message);
                } else {
                    self.error_and_bump_msg(DiagnosticKind::ExpectedExpression, message);
                }
                return false;
            }
        }
        true
    }

    /// `this`, `super`, or the constructor chaining calls `this(...)` and `super(...)`.
    fn parse_self_reference(&mut self, kind: SyntaxKind) {
        if self.next_is(SyntaxKind::ParenOpen) {
            self.start_node(SyntaxKind::MethodCallExpr);
            self.bump();
            self.parse_arg_list();
        } else {
            self.start_node(kind);
            self.bump();
        }
        self.finish_node();
    }

    /// `[SELECT ...]` or `[FIND ...]`
    fn parse_embedded_query(&mut self) -> bool {
        let kind = if self.nth_at_keyword(1, SyntaxKind::KwSelect) {
            SyntaxKind::SoqlExpr
        } else if self.nth_at_keyword(1, SyntaxKind::KwFind) {
            SyntaxKind::SoslExpr
        } else {
            self.error_and_bump_msg(
                DiagnosticKind::ExpectedExpression,
                "expected `SELECT` or `FIND` after `[`",
            );
            return false;
        };

        self.start_node(kind);
        self.open_delimiter(SyntaxKind::BracketOpen);
        if kind == SyntaxKind::SoqlExpr {
            self.parse_query();
        } else {
            self.parse_sosl_query();
        }
        self.close_delimiter(SyntaxKind::BracketClose, "query");
        self.finish_node();
        true
    }

    /// `(a, b = c, ...)`
    pub(crate) fn parse_arg_list(&mut self) {
        self.start_node(SyntaxKind::ArgList);
        self.open_delimiter(SyntaxKind::ParenOpen);
        if !self.at(SyntaxKind::ParenClose) {
            loop {
                self.parse_expr();
                if self.should_stop() || !self.eat(SyntaxKind::Comma) {
                    break;
                }
            }
        }
        self.close_delimiter(SyntaxKind::ParenClose, "argument list");
        self.finish_node();
    }

    /// `new Type(args)`, `new Type[size]`, `new Type[]{...}`, `new List<T>{...}`, `new Map<K, V>{k => v}`
    fn parse_new_expr(&mut self) {
        self.start_node(SyntaxKind::NewExpr);
        self.bump();
        self.parse_type_ref();

        match self.current() {
            SyntaxKind::ParenOpen => {
                self.parse_arg_list();
                if self.at(SyntaxKind::BraceOpen) {
                    self.parse_collection_initializer();
                }
            }
            SyntaxKind::BracketOpen => {
                self.start_node(SyntaxKind::ArrayCreator);
                self.open_delimiter(SyntaxKind::BracketOpen);
                self.parse_expr();
                self.close_delimiter(SyntaxKind::BracketClose, "array size");
                self.finish_node();
            }
            SyntaxKind::BraceOpen => self.parse_collection_initializer(),
            _ => {
                let message = self.expected_message("`(`, `[` or `{` after the created type");
                self.error_msg(DiagnosticKind::UnexpectedToken, message);
            }
        }

        self.finish_node();
    }

    /// `{a, b}` or `{k => v, ...}`; the first entry decides which.
    fn parse_collection_initializer(&mut self) {
        let checkpoint = self.checkpoint();
        self.open_delimiter(SyntaxKind::BraceOpen);

        let mut is_map = false;
        if !self.at(SyntaxKind::BraceClose) {
            let mut first = true;
            loop {
                let entry = self.checkpoint();
                self.parse_expr();
                if first {
                    is_map = self.at(SyntaxKind::FatArrow);
                    first = false;
                }
                if is_map {
                    self.expect(SyntaxKind::FatArrow, "`=>` in map initializer");
                    self.parse_expr();
                    self.start_node_at(entry, SyntaxKind::MapEntry);
                    self.finish_node();
                }
                if self.should_stop() || !self.eat(SyntaxKind::Comma) {
                    break;
                }
            }
        }

        self.close_delimiter(SyntaxKind::BraceClose, "initializer");
        let kind = if is_map {
            SyntaxKind::MapInit
        } else {
            SyntaxKind::CollectionInit
        };
        self.start_node_at(checkpoint, kind);
        self.finish_node();
    }

    /// Whether the current token can begin an expression.
    pub(crate) fn at_expr_start(&mut self) -> bool {
        let kind = self.current();
        kind.is_name()
            || LITERALS.contains(kind)
            || QUERY_ONLY_LITERALS.contains(kind)
            || PREFIX_OPS.contains(kind)
            || NEG_OPS.contains(kind)
            || matches!(
                kind,
                SyntaxKind::ParenOpen
                    | SyntaxKind::BracketOpen
                    | SyntaxKind::KwNew
                    | SyntaxKind::KwThis
                    | SyntaxKind::KwSuper
            )
    }
}
