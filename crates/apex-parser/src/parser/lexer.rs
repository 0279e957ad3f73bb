//! Lexer for Apex source with embedded SOQL/SOSL.
//!
//! Produces span-based tokens without storing text - text is sliced from source only when needed.
//!
//! ## Keywords
//!
//! Logos only recognizes identifier shapes. A post-pass looks each identifier up in the
//! case-insensitive keyword table and assigns the Apex keyword kind. Query keywords stay
//! `Ident` here; the parser promotes them once it knows it is inside a query.
//!
//! ## Error handling
//!
//! The lexer coalesces consecutive error characters into single `Garbage` tokens rather
//! than producing one error per character. This keeps the token stream manageable for malformed input.

use logos::Logos;
use rowan::TextRange;
use serde::Serialize;
use std::ops::Range;

use super::cst::SyntaxKind;
use super::keywords;
use super::line_index::LineIndex;

/// Zero-copy token: kind + span, text retrieved via [`token_text`] when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: TextRange,
}

impl Token {
    #[inline]
    pub fn new(kind: SyntaxKind, span: TextRange) -> Self {
        Self { kind, span }
    }
}

/// Token with its text and position resolved, for callers outside the parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LexedToken<'src> {
    pub kind: SyntaxKind,
    pub text: &'src str,
    pub start: u32,
    pub end: u32,
    /// 1-based
    pub line: u32,
    /// 0-based, in characters
    pub column: u32,
}

fn range_to_text_range(range: Range<usize>) -> TextRange {
    TextRange::new((range.start as u32).into(), (range.end as u32).into())
}

/// Tokenizes source into a vector of span-based tokens.
///
/// Post-processes the Logos output:
/// - Coalesces consecutive lexer errors into single `Garbage` tokens
/// - Classifies identifiers that spell an Apex keyword
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = SyntaxKind::lexer(source);
    let mut error_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                if let Some(start) = error_start.take() {
                    let end = lexer.span().start;
                    tokens.push(Token::new(
                        SyntaxKind::Garbage,
                        range_to_text_range(start..end),
                    ));
                }

                let span = lexer.span();
                let kind = match kind {
                    SyntaxKind::Ident => {
                        keywords::apex_keyword(lexer.slice()).unwrap_or(SyntaxKind::Ident)
                    }
                    other => other,
                };
                tokens.push(Token::new(kind, range_to_text_range(span)));
            }
            Some(Err(())) => {
                if error_start.is_none() {
                    error_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token::new(
                        SyntaxKind::Garbage,
                        range_to_text_range(start..source.len()),
                    ));
                }
                break;
            }
        }
    }

    tracing::trace!(count = tokens.len(), "lexed source");
    tokens
}

/// Tokenizes source and resolves text, line and column for every token, trivia included.
pub fn tokenize(source: &str) -> Vec<LexedToken<'_>> {
    let line_index = LineIndex::new(source);
    lex(source)
        .into_iter()
        .map(|token| {
            let (line, column) = line_index.line_col(source, token.span.start());
            LexedToken {
                kind: token.kind,
                text: token_text(source, &token),
                start: token.span.start().into(),
                end: token.span.end().into(),
                line,
                column,
            }
        })
        .collect()
}

/// Retrieves the text slice for a token. O(1) slice into source.
#[inline]
pub fn token_text<'src>(source: &'src str, token: &Token) -> &'src str {
    &source[std::ops::Range::<usize>::from(token.span)]
}
