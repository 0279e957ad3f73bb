//! Parser infrastructure for Apex with embedded SOQL and SOSL.
//!
//! # Architecture
//!
//! The parser produces a lossless concrete syntax tree (CST) via Rowan's green tree builder.
//!
//! - Zero-copy parsing: tokens carry spans, text sliced only when building tree nodes
//! - Trivia buffering: whitespace/comments collected, then attached as leading trivia
//! - Checkpoint-based wrapping: binary and postfix expressions wrap their left operand
//! - Contextual keywords: query keywords are recognized by text inside `[...]` only
//!
//! # Recovery Strategy
//!
//! The parser is resilient: it always produces a tree unless a listener aborts.
//!
//! 1. Unknown tokens get wrapped in `SyntaxKind::Error` nodes and consumed
//! 2. Missing expected tokens emit a diagnostic but don't consume (parent may handle)
//! 3. Recovery sets define "synchronization points" per production
//! 4. Input left after an entry rule goes into a single trailing Error node
//!
//! Fuel exhaustion (exec_fuel, recursion_fuel) and listener aborts return an actual error.

pub mod ast;
pub mod cst;
pub mod keywords;
pub mod lexer;
pub mod line_index;

mod core;
mod grammar;
mod invariants;

#[cfg(test)]
mod tests;

use std::marker::PhantomData;

pub use cst::{SyntaxKind, SyntaxNode, SyntaxToken};

pub use ast::AstNode;
pub(crate) use core::Parser;

use crate::Result;
use crate::diagnostics::Diagnostics;
use crate::listener::ErrorListener;
use crate::printer::CstPrinter;
use lexer::lex;

/// Default cap on parser operations.
pub const DEFAULT_EXEC_FUEL: u32 = 1_000_000;

/// Default cap on production nesting.
pub const DEFAULT_RECURSION_LIMIT: u32 = 512;

/// Grammar rule a parse starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryRule {
    /// One class, interface or enum declaration.
    CompilationUnit,
    /// One trigger declaration.
    TriggerUnit,
    /// A sequence of statements, as run by anonymous execution.
    AnonymousUnit,
    Statement,
    Expression,
    /// A bare SOQL query, without brackets.
    Query,
    Literal,
}

impl EntryRule {
    pub fn root_kind(self) -> SyntaxKind {
        match self {
            EntryRule::CompilationUnit => SyntaxKind::CompilationUnit,
            EntryRule::TriggerUnit => SyntaxKind::TriggerUnit,
            EntryRule::AnonymousUnit => SyntaxKind::AnonymousUnit,
            EntryRule::Statement => SyntaxKind::StatementUnit,
            EntryRule::Expression => SyntaxKind::ExpressionUnit,
            EntryRule::Query => SyntaxKind::QueryUnit,
            EntryRule::Literal => SyntaxKind::LiteralUnit,
        }
    }
}

/// Parse result containing the green tree and the diagnostics found while building it.
///
/// The tree is always complete. Error nodes in the tree represent recovery points.
/// `T` is the typed root of the entry rule that produced it.
#[derive(Debug, Clone)]
pub struct Parse<T> {
    green: rowan::GreenNode,
    diagnostics: Diagnostics,
    _root: PhantomData<fn() -> T>,
}

impl<T> Parse<T> {
    pub fn as_cst(&self) -> &rowan::GreenNode {
        &self.green
    }

    /// Creates a navigable view over the immutable green tree.
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    /// Every diagnostic in discovery order, whichever listener was installed.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn is_valid(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// The source text, reproduced from the tree.
    pub fn text(&self) -> String {
        self.syntax().text().to_string()
    }

    pub fn printer(&self) -> CstPrinter {
        CstPrinter::new(self.syntax())
    }

    pub fn dump_cst(&self) -> String {
        self.printer().dump()
    }

    /// Like [`dump_cst`](Self::dump_cst), including trivia and byte spans.
    pub fn dump_cst_full(&self) -> String {
        self.printer().with_trivia(true).with_spans(true).dump()
    }
}

impl<T: AstNode> Parse<T> {
    /// Typed root node.
    pub fn tree(&self) -> T {
        T::cast(self.syntax()).expect("root node kind matches the entry rule")
    }
}

/// Configures and runs a parse.
///
/// ```
/// use apex_parser::{ParseBuilder, listener::FailFast};
///
/// let mut listener = FailFast;
/// let parse = ParseBuilder::new("Integer x = 1;")
///     .with_listener(&mut listener)
///     .with_recursion_limit(Some(64))
///     .parse_statement()
///     .unwrap();
/// assert!(parse.is_valid());
/// ```
pub struct ParseBuilder<'src, 'l> {
    source: &'src str,
    listener: Option<&'l mut dyn ErrorListener>,
    exec_fuel: Option<u32>,
    recursion_limit: Option<u32>,
}

impl<'src, 'l> ParseBuilder<'src, 'l> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            listener: None,
            exec_fuel: Some(DEFAULT_EXEC_FUEL),
            recursion_limit: Some(DEFAULT_RECURSION_LIMIT),
        }
    }

    /// Installs a listener that sees each diagnostic as it is found.
    pub fn with_listener(mut self, listener: &'l mut dyn ErrorListener) -> Self {
        self.listener = Some(listener);
        self
    }

    /// `None` disables the limit.
    pub fn with_exec_fuel(mut self, limit: Option<u32>) -> Self {
        self.exec_fuel = limit;
        self
    }

    /// `None` disables the limit.
    pub fn with_recursion_limit(mut self, limit: Option<u32>) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn parse_compilation_unit(self) -> Result<Parse<ast::CompilationUnit>> {
        self.parse(EntryRule::CompilationUnit)
    }

    pub fn parse_trigger_unit(self) -> Result<Parse<ast::TriggerUnit>> {
        self.parse(EntryRule::TriggerUnit)
    }

    pub fn parse_anonymous_unit(self) -> Result<Parse<ast::AnonymousUnit>> {
        self.parse(EntryRule::AnonymousUnit)
    }

    pub fn parse_statement(self) -> Result<Parse<ast::StatementUnit>> {
        self.parse(EntryRule::Statement)
    }

    pub fn parse_expression(self) -> Result<Parse<ast::ExpressionUnit>> {
        self.parse(EntryRule::Expression)
    }

    pub fn parse_query(self) -> Result<Parse<ast::QueryUnit>> {
        self.parse(EntryRule::Query)
    }

    pub fn parse_literal(self) -> Result<Parse<ast::LiteralUnit>> {
        self.parse(EntryRule::Literal)
    }

    /// Runs an entry rule; `T` must be the root node type that rule produces.
    pub(crate) fn parse<T>(self, rule: EntryRule) -> Result<Parse<T>> {
        let tokens = lex(self.source);
        tracing::debug!(?rule, tokens = tokens.len(), "parsing");

        let mut parser = Parser::new(self.source, tokens)
            .with_listener(self.listener)
            .with_exec_fuel(self.exec_fuel)
            .with_recursion_fuel(self.recursion_limit);
        parser.parse_entry(rule);
        let (green, diagnostics) = parser.finish()?;
        invariants::assert_lossless(&green, self.source);

        tracing::debug!(?rule, diagnostics = diagnostics.len(), "parsed");
        Ok(Parse {
            green,
            diagnostics,
            _root: PhantomData,
        })
    }
}

/// Parses one class, interface or enum declaration.
pub fn parse_compilation_unit(source: &str) -> Result<Parse<ast::CompilationUnit>> {
    ParseBuilder::new(source).parse_compilation_unit()
}

/// Parses one trigger declaration.
pub fn parse_trigger_unit(source: &str) -> Result<Parse<ast::TriggerUnit>> {
    ParseBuilder::new(source).parse_trigger_unit()
}

/// Parses a sequence of statements.
pub fn parse_anonymous_unit(source: &str) -> Result<Parse<ast::AnonymousUnit>> {
    ParseBuilder::new(source).parse_anonymous_unit()
}

pub fn parse_statement(source: &str) -> Result<Parse<ast::StatementUnit>> {
    ParseBuilder::new(source).parse_statement()
}

pub fn parse_expression(source: &str) -> Result<Parse<ast::ExpressionUnit>> {
    ParseBuilder::new(source).parse_expression()
}

/// Parses a SOQL query without the surrounding brackets.
pub fn parse_query(source: &str) -> Result<Parse<ast::QueryUnit>> {
    ParseBuilder::new(source).parse_query()
}

pub fn parse_literal(source: &str) -> Result<Parse<ast::LiteralUnit>> {
    ParseBuilder::new(source).parse_literal()
}
