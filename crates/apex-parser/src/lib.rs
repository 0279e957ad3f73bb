//! Lossless parser for Apex with embedded SOQL and SOSL.
//!
//! Every entry point produces a concrete syntax tree that reproduces the input byte for byte,
//! alongside the syntax diagnostics found on the way.
//!
//! # Example
//!
//! ```
//! use apex_parser::parse_compilation_unit;
//!
//! let source = "public class Hello { Integer x = [SELECT COUNT() FROM Account]; }";
//! let parse = parse_compilation_unit(source).expect("out of fuel");
//! assert!(parse.diagnostics().is_empty());
//! assert_eq!(parse.syntax().text().to_string(), source);
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod diagnostics;
pub mod listener;
pub mod parser;
pub mod printer;

pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use listener::{ErrorListener, FailFast, TracingListener};
pub use parser::{
    AstNode, EntryRule, Parse, ParseBuilder, SyntaxKind, SyntaxNode, SyntaxToken, ast,
    parse_anonymous_unit, parse_compilation_unit, parse_expression, parse_literal, parse_query,
    parse_statement, parse_trigger_unit,
};
pub use printer::CstPrinter;

/// A syntax error raised by a listener to abort the parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}:{column} {message}")]
pub struct SyntaxError {
    pub kind: DiagnosticKind,
    /// 1-based
    pub line: u32,
    /// 0-based, in characters
    pub column: u32,
    /// Offending token text; `None` at end of input.
    pub offending: Option<String>,
    /// Lexed kind of the offending token; `None` at end of input.
    pub offending_kind: Option<SyntaxKind>,
    pub message: String,
}

impl From<&Diagnostic> for SyntaxError {
    fn from(diagnostic: &Diagnostic) -> Self {
        Self {
            kind: diagnostic.kind(),
            line: diagnostic.line(),
            column: diagnostic.column(),
            offending: diagnostic.offending_text().map(str::to_owned),
            offending_kind: diagnostic.offending_kind(),
            message: diagnostic.message().to_owned(),
        }
    }
}

/// Errors that abort a parse.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// A listener rejected a syntax error.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// Execution fuel exhausted (too many parser operations).
    #[error("execution limit exceeded")]
    ExecFuelExhausted,

    /// Recursion fuel exhausted (input nested too deeply).
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,
}

/// Result type for parse operations.
pub type Result<T> = std::result::Result<T, Error>;
