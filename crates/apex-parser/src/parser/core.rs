//! Parser state machine and low-level operations.

use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

use super::cst::{SyntaxKind, TokenSet};
use super::keywords;
use super::lexer::{Token, token_text};
use super::line_index::LineIndex;
use crate::Error;
use crate::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::listener::ErrorListener;

#[derive(Debug, Clone, Copy)]
pub(super) struct OpenDelimiter {
    pub kind: SyntaxKind,
    pub span: TextRange,
}

/// Trivia tokens are buffered and flushed when starting a new node.
pub struct Parser<'src, 'l> {
    pub(super) source: &'src str,
    pub(super) tokens: Vec<Token>,
    pub(super) pos: usize,
    pub(super) trivia_buffer: Vec<Token>,
    pub(super) builder: GreenNodeBuilder<'static>,
    pub(super) diagnostics: Diagnostics,
    pub(super) depth: u32,
    pub(super) last_diagnostic_pos: Option<TextSize>,
    pub(super) delimiter_stack: Vec<OpenDelimiter>,
    pub(super) debug_fuel: std::cell::Cell<u32>,
    line_index: LineIndex,
    listener: Option<&'l mut dyn ErrorListener>,
    exec_fuel_remaining: Option<u32>,
    recursion_fuel_limit: Option<u32>,
    fatal_error: Option<Error>,
}

impl<'src, 'l> Parser<'src, 'l> {
    pub fn new(source: &'src str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            trivia_buffer: Vec::with_capacity(4),
            builder: GreenNodeBuilder::new(),
            diagnostics: Diagnostics::new(),
            depth: 0,
            last_diagnostic_pos: None,
            delimiter_stack: Vec::with_capacity(8),
            debug_fuel: std::cell::Cell::new(256),
            line_index: LineIndex::new(source),
            listener: None,
            exec_fuel_remaining: None,
            recursion_fuel_limit: None,
            fatal_error: None,
        }
    }

    pub fn with_listener(mut self, listener: Option<&'l mut dyn ErrorListener>) -> Self {
        self.listener = listener;
        self
    }

    pub fn with_exec_fuel(mut self, limit: Option<u32>) -> Self {
        self.exec_fuel_remaining = limit;
        self
    }

    pub fn with_recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.recursion_fuel_limit = limit;
        self
    }

    pub(super) fn finish(mut self) -> Result<(GreenNode, Diagnostics), Error> {
        self.drain_trivia();
        if let Some(err) = self.fatal_error {
            return Err(err);
        }
        Ok((self.builder.finish(), self.diagnostics))
    }

    pub(super) fn has_fatal_error(&self) -> bool {
        self.fatal_error.is_some()
    }

    pub(super) fn current(&mut self) -> SyntaxKind {
        self.skip_trivia_to_buffer();
        self.nth_raw(0)
    }

    fn reset_debug_fuel(&self) {
        self.debug_fuel.set(256);
    }

    pub(super) fn nth_raw(&self, lookahead: usize) -> SyntaxKind {
        self.ensure_progress();
        self.tokens
            .get(self.pos + lookahead)
            .map_or(SyntaxKind::Error, |t| t.kind)
    }

    fn consume_exec_fuel(&mut self) {
        if let Some(ref mut remaining) = self.exec_fuel_remaining {
            if *remaining == 0 {
                if self.fatal_error.is_none() {
                    self.fatal_error = Some(Error::ExecFuelExhausted);
                }
                return;
            }
            *remaining -= 1;
        }
    }

    pub(super) fn current_span(&mut self) -> TextRange {
        self.skip_trivia_to_buffer();
        self.tokens
            .get(self.pos)
            .map_or_else(|| TextRange::empty(self.eof_offset()), |t| t.span)
    }

    /// Text of the current token, empty at EOF.
    pub(super) fn current_text(&mut self) -> &'src str {
        self.skip_trivia_to_buffer();
        self.tokens
            .get(self.pos)
            .map_or("", |t| token_text(self.source, t))
    }

    pub(super) fn eof_offset(&self) -> TextSize {
        TextSize::from(self.source.len() as u32)
    }

    pub(super) fn eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub(super) fn at_eof(&mut self) -> bool {
        self.skip_trivia_to_buffer();
        self.eof()
    }

    pub(super) fn should_stop(&mut self) -> bool {
        self.at_eof() || self.has_fatal_error()
    }

    pub(super) fn at(&mut self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    pub(super) fn at_set(&mut self, set: TokenSet) -> bool {
        set.contains(self.current())
    }

    /// Whether the current token may serve as an Apex identifier.
    pub(super) fn at_name(&mut self) -> bool {
        self.current().is_name()
    }

    /// Whether the current token spells `kw`, either as lexed or by its text.
    pub(super) fn at_keyword(&mut self, kw: SyntaxKind) -> bool {
        let kind = self.current();
        kind == kw || (kind.is_word() && keywords::lookup(self.current_text()) == Some(kw))
    }

    pub(super) fn nth_at_keyword(&mut self, n: usize, kw: SyntaxKind) -> bool {
        let kind = self.nth(n);
        kind == kw || (kind.is_word() && keywords::lookup(self.nth_text(n)) == Some(kw))
    }

    /// Index of the `n`th significant token from the current position.
    fn nth_index(&mut self, n: usize) -> Option<usize> {
        self.skip_trivia_to_buffer();
        self.ensure_progress();
        let mut count = 0;
        let mut pos = self.pos;
        while pos < self.tokens.len() {
            if !is_skipped(self.tokens[pos].kind) {
                if count == n {
                    return Some(pos);
                }
                count += 1;
            }
            pos += 1;
        }
        None
    }

    /// LL(k) lookahead past trivia.
    pub(super) fn nth(&mut self, n: usize) -> SyntaxKind {
        self.nth_index(n)
            .map_or(SyntaxKind::Error, |i| self.tokens[i].kind)
    }

    pub(super) fn nth_text(&mut self, n: usize) -> &'src str {
        self.nth_index(n)
            .map_or("", |i| token_text(self.source, &self.tokens[i]))
    }

    pub(super) fn next_is(&mut self, kind: SyntaxKind) -> bool {
        self.nth(1) == kind
    }

    /// Number of tokens of `kind` starting at the current one with nothing between them.
    pub(super) fn glued_run(&mut self, kind: SyntaxKind, max: usize) -> usize {
        self.skip_trivia_to_buffer();
        let mut count = 0;
        let mut prev_end = None;
        for token in self.tokens[self.pos..].iter().take(max) {
            if token.kind != kind || prev_end.is_some_and(|end| end != token.span.start()) {
                break;
            }
            prev_end = Some(token.span.end());
            count += 1;
        }
        count
    }

    /// Kind of the raw token at `index`, for speculative scans that must not consume fuel.
    pub(super) fn kind_at(&self, index: usize) -> SyntaxKind {
        self.tokens
            .get(index)
            .map_or(SyntaxKind::Error, |t| t.kind)
    }

    /// Text of the raw token at `index`, empty past the end.
    pub(super) fn text_at(&self, index: usize) -> &'src str {
        self.tokens
            .get(index)
            .map_or("", |t| token_text(self.source, t))
    }

    /// First significant token index at or after `index`.
    pub(super) fn significant_from(&self, mut index: usize) -> usize {
        while index < self.tokens.len() && is_skipped(self.tokens[index].kind) {
            index += 1;
        }
        index
    }

    /// Significant token index following the one at `index`.
    pub(super) fn significant_after(&self, index: usize) -> usize {
        self.significant_from(index + 1)
    }

    /// Start of a speculative scan: index of the current significant token.
    pub(super) fn scan_start(&mut self) -> usize {
        self.skip_trivia_to_buffer();
        self.pos
    }

    /// Buffers trivia. Garbage is buffered too, reported once as it is passed.
    pub(super) fn skip_trivia_to_buffer(&mut self) {
        while self.pos < self.tokens.len() && is_skipped(self.tokens[self.pos].kind) {
            let token = self.tokens[self.pos];
            if token.kind == SyntaxKind::Garbage {
                let text = token_text(self.source, &token);
                let diagnostic = self
                    .diagnostic(DiagnosticKind::UnrecognizedInput, token.span, Some(text))
                    .with_detail(text);
                self.emit(diagnostic);
            }
            self.trivia_buffer.push(token);
            self.pos += 1;
        }
    }

    pub(super) fn drain_trivia(&mut self) {
        for token in self.trivia_buffer.drain(..) {
            let text = token_text(self.source, &token);
            self.builder.token(token.kind.into(), text);
        }
    }

    pub(super) fn start_node(&mut self, kind: SyntaxKind) {
        self.drain_trivia();
        self.builder.start_node(kind.into());
    }

    pub(super) fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    pub(super) fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    pub(super) fn checkpoint(&mut self) -> Checkpoint {
        self.drain_trivia();
        self.builder.checkpoint()
    }

    pub(super) fn bump(&mut self) {
        let kind = self.current();
        self.bump_remap(kind);
    }

    /// Consumes the current token, recording it in the tree as `kind`.
    pub(super) fn bump_remap(&mut self, kind: SyntaxKind) {
        self.skip_trivia_to_buffer();
        assert!(!self.eof(), "bump called at EOF");
        self.reset_debug_fuel();
        self.consume_exec_fuel();

        self.drain_trivia();

        let token = self.tokens[self.pos];
        let text = token_text(self.source, &token);
        self.builder.token(kind.into(), text);
        self.pos += 1;
    }

    /// Consumes the current token as an identifier, whatever keyword it spells.
    pub(super) fn bump_name(&mut self) {
        self.bump_remap(SyntaxKind::Ident);
    }

    pub(super) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(super) fn eat_set(&mut self, set: TokenSet) -> bool {
        if self.at_set(set) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(super) fn eat_keyword(&mut self, kw: SyntaxKind) -> bool {
        if self.at_keyword(kw) {
            self.bump_remap(kw);
            true
        } else {
            false
        }
    }

    /// On mismatch: emit diagnostic but don't consume.
    pub(super) fn expect(&mut self, kind: SyntaxKind, what: &str) -> bool {
        if self.eat(kind) {
            return true;
        }
        let message = self.expected_message(what);
        self.error_msg(DiagnosticKind::UnexpectedToken, message);
        false
    }

    pub(super) fn expect_keyword(&mut self, kw: SyntaxKind, what: &str) -> bool {
        if self.eat_keyword(kw) {
            return true;
        }
        let message = self.expected_message(what);
        self.error_msg(DiagnosticKind::UnexpectedToken, message);
        false
    }

    /// Identifier expected: soft keywords and currency-shaped words are remapped to `Ident`.
    pub(super) fn expect_name(&mut self, what: &str) -> bool {
        if self.at_name() {
            self.bump_name();
            return true;
        }
        let found = self.describe_current();
        self.error_msg(
            DiagnosticKind::ExpectedIdentifier,
            format!("{what}, found {found}"),
        );
        false
    }

    pub(super) fn expected_message(&mut self, what: &str) -> String {
        format!("expected {what}, found {}", self.describe_current())
    }

    pub(super) fn describe_current(&mut self) -> String {
        if self.at_eof() {
            "end of input".to_string()
        } else {
            format!("`{}`", self.current_text())
        }
    }

    fn should_report(&mut self, pos: TextSize) -> bool {
        if self.last_diagnostic_pos == Some(pos) {
            return false;
        }
        self.last_diagnostic_pos = Some(pos);
        true
    }

    fn bump_as_error(&mut self) {
        if !self.at_eof() {
            self.start_node(SyntaxKind::Error);
            self.bump();
            self.finish_node();
        }
    }

    /// Builds a diagnostic positioned at the current token.
    fn diagnostic(
        &self,
        kind: DiagnosticKind,
        range: TextRange,
        found: Option<&str>,
    ) -> Diagnostic {
        let offending = self
            .tokens
            .get(self.pos)
            .map_or_else(|| self.eof_offset(), |t| t.span.start());
        let (line, column) = self.line_index.line_col(self.source, offending);
        let found_kind = self.tokens.get(self.pos).map(|t| t.kind);
        Diagnostic::with_default_message(kind, range)
            .at(line, column)
            .found(found, found_kind)
    }

    /// Records a diagnostic and hands it to the listener. A listener error becomes fatal.
    fn emit(&mut self, diagnostic: Diagnostic) {
        if self.has_fatal_error() {
            return;
        }
        tracing::debug!(
            line = diagnostic.line(),
            column = diagnostic.column(),
            kind = ?diagnostic.kind(),
            "syntax error"
        );
        if let Some(listener) = self.listener.as_mut()
            && let Err(err) = listener.syntax_error(&diagnostic)
        {
            self.fatal_error = Some(Error::Syntax(err));
        }
        self.diagnostics.push(diagnostic);
    }

    fn current_found(&mut self) -> Option<&'src str> {
        if self.at_eof() {
            None
        } else {
            Some(self.current_text())
        }
    }

    pub(super) fn error(&mut self, kind: DiagnosticKind) {
        let range = self.current_span();
        if !self.should_report(range.start()) {
            return;
        }
        let found = self.current_found();
        let diagnostic = self.diagnostic(kind, range, found);
        self.emit(diagnostic);
    }

    pub(super) fn error_msg(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let range = self.current_span();
        if !self.should_report(range.start()) {
            return;
        }
        let found = self.current_found();
        let diagnostic = self.diagnostic(kind, range, found).with_detail(message);
        self.emit(diagnostic);
    }

    pub(super) fn error_and_bump_msg(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.error_msg(kind, message);
        self.bump_as_error();
    }

    /// Reports, then skips tokens into an `Error` node until a recovery token.
    pub(super) fn error_recover(
        &mut self,
        kind: DiagnosticKind,
        message: impl Into<String>,
        recovery: TokenSet,
    ) {
        if self.at_set(recovery) || self.should_stop() {
            self.error_msg(kind, message);
            return;
        }

        self.start_node(SyntaxKind::Error);
        self.error_msg(kind, message);
        while !self.should_stop() && !self.at_set(recovery) {
            self.bump();
        }
        self.finish_node();
    }

    pub(super) fn enter_recursion(&mut self) -> bool {
        if let Some(limit) = self.recursion_fuel_limit
            && self.depth >= limit
        {
            if self.fatal_error.is_none() {
                self.fatal_error = Some(Error::RecursionLimitExceeded);
            }
            return false;
        }
        self.depth += 1;
        self.reset_debug_fuel();
        true
    }

    pub(super) fn exit_recursion(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.reset_debug_fuel();
    }

    pub(super) fn push_delimiter(&mut self, kind: SyntaxKind) {
        let span = self.current_span();
        self.delimiter_stack.push(OpenDelimiter { kind, span });
    }

    pub(super) fn pop_delimiter(&mut self) -> Option<OpenDelimiter> {
        self.delimiter_stack.pop()
    }

    /// Bumps the opening delimiter and records it for unclosed reporting.
    pub(super) fn open_delimiter(&mut self, kind: SyntaxKind) {
        self.assert_at_opener(kind);
        self.push_delimiter(kind);
        self.bump();
    }

    /// Consumes the closing delimiter matching the innermost open one.
    ///
    /// At EOF or a mismatched closer the diagnostic spans from the opener, with the opener
    /// as related information.
    pub(super) fn close_delimiter(&mut self, close: SyntaxKind, started: &str) -> bool {
        let open = self.pop_delimiter();
        if self.eat(close) {
            return true;
        }
        let kind = match close {
            SyntaxKind::ParenClose => DiagnosticKind::UnclosedParen,
            SyntaxKind::BracketClose => DiagnosticKind::UnclosedBracket,
            _ => DiagnosticKind::UnclosedBrace,
        };
        match open {
            Some(open) if self.at_eof() => {
                debug_assert!(matches!(
                    (open.kind, close),
                    (SyntaxKind::ParenOpen, SyntaxKind::ParenClose)
                        | (SyntaxKind::BracketOpen, SyntaxKind::BracketClose)
                        | (SyntaxKind::BraceOpen, SyntaxKind::BraceClose)
                ));
                self.error_unclosed_delimiter(kind, format!("{started} started here"), open.span);
            }
            _ => {
                let message = self.expected_message(&format!("`{}`", closer_text(close)));
                self.error_msg(DiagnosticKind::UnexpectedToken, message);
            }
        }
        false
    }

    pub(super) fn error_unclosed_delimiter(
        &mut self,
        kind: DiagnosticKind,
        related_msg: impl Into<String>,
        open_range: TextRange,
    ) {
        let current = self.current_span();
        if !self.should_report(current.start()) {
            return;
        }
        // Use full range for easier downstream error suppression
        let full_range = TextRange::new(open_range.start(), current.end());
        let mut diagnostic = self.diagnostic(kind, full_range, None);
        diagnostic
            .related
            .push(crate::diagnostics::RelatedInfo::new(open_range, related_msg));
        self.emit(diagnostic);
    }
}

/// Tokens the grammar never sees: trivia, and garbage already reported.
fn is_skipped(kind: SyntaxKind) -> bool {
    kind.is_trivia() || kind == SyntaxKind::Garbage
}

fn closer_text(kind: SyntaxKind) -> &'static str {
    match kind {
        SyntaxKind::ParenClose => ")",
        SyntaxKind::BracketClose => "]",
        _ => "}",
    }
}
