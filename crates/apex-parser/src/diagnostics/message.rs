use rowan::TextRange;
use serde::{Serialize, Serializer};

use crate::parser::SyntaxKind;

/// What went wrong, grouped by cause.
///
/// Unclosed delimiters come first, then missing constructs, then tokens that don't belong
/// where they appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum DiagnosticKind {
    // These cause cascading errors throughout the rest of the file
    UnclosedBrace,
    UnclosedParen,
    UnclosedBracket,

    // User omitted something required - root cause errors
    ExpectedDeclaration,
    ExpectedMember,
    ExpectedStatement,
    ExpectedExpression,
    ExpectedTypeName,
    ExpectedIdentifier,
    ExpectedLiteral,
    ExpectedQueryField,
    ExpectedQueryValue,
    MissingCatchOrFinally,

    // User wrote something that doesn't belong
    UnrecognizedInput,
    UnexpectedToken,
    EmptyStatement,
    QueryOnlyLiteral,
    MixedLogicalOperators,
    TrailingInput,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnclosedBrace => "missing closing `}`",
            Self::UnclosedParen => "missing closing `)`",
            Self::UnclosedBracket => "missing closing `]`",

            Self::ExpectedDeclaration => "expected a type declaration",
            Self::ExpectedMember => "expected a member declaration",
            Self::ExpectedStatement => "expected a statement",
            Self::ExpectedExpression => "expected an expression",
            Self::ExpectedTypeName => "expected a type name",
            Self::ExpectedIdentifier => "expected an identifier",
            Self::ExpectedLiteral => "expected a literal",
            Self::ExpectedQueryField => "expected a field name",
            Self::ExpectedQueryValue => "expected a value",
            Self::MissingCatchOrFinally => "`try` needs a `catch` or `finally` block",

            Self::UnrecognizedInput => "unrecognized input",
            Self::UnexpectedToken => "unexpected token",
            Self::EmptyStatement => "empty statement is not allowed here",
            Self::QueryOnlyLiteral => "literal is only valid inside a query",
            Self::MixedLogicalOperators => "cannot mix `AND` and `OR` without parentheses",
            Self::TrailingInput => "unexpected input after the end",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::UnexpectedToken => "{}".to_string(),
            Self::UnrecognizedInput => "unrecognized input `{}`".to_string(),

            Self::UnclosedBrace | Self::UnclosedParen | Self::UnclosedBracket => {
                format!("{}; {{}}", self.fallback_message())
            }

            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

/// Every syntax problem is an error; the parser has nothing to warn about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatedInfo {
    #[serde(serialize_with = "serialize_range")]
    pub(crate) range: TextRange,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(range: TextRange, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
        }
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A single syntax problem, in source order of discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub(crate) severity: Severity,
    pub(crate) kind: DiagnosticKind,
    #[serde(serialize_with = "serialize_range")]
    pub(crate) range: TextRange,
    /// 1-based
    pub(crate) line: u32,
    /// 0-based, in characters
    pub(crate) column: u32,
    /// Text of the offending token; absent at end of input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) found: Option<String>,
    /// Lexed kind of the offending token, present exactly when `found` is.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) found_kind: Option<SyntaxKind>,
    pub(crate) message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) related: Vec<RelatedInfo>,
}

impl Diagnostic {
    pub(crate) fn new(kind: DiagnosticKind, range: TextRange, message: impl Into<String>) -> Self {
        Self {
            severity: kind.default_severity(),
            kind,
            range,
            line: 1,
            column: 0,
            found: None,
            found_kind: None,
            message: message.into(),
            related: Vec::new(),
        }
    }

    pub(crate) fn with_default_message(kind: DiagnosticKind, range: TextRange) -> Self {
        Self::new(kind, range, kind.fallback_message())
    }

    /// Replaces the message with the kind's template applied to `detail`.
    pub(crate) fn with_detail(mut self, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        self.message = self.kind.message(Some(&detail));
        self
    }

    pub(crate) fn at(mut self, line: u32, column: u32) -> Self {
        self.line = line;
        self.column = column;
        self
    }

    pub(crate) fn found(mut self, text: Option<&str>, kind: Option<SyntaxKind>) -> Self {
        self.found = text.map(str::to_owned);
        self.found_kind = self.found.as_ref().and(kind);
        self
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn offending_text(&self) -> Option<&str> {
        self.found.as_deref()
    }

    pub fn offending_kind(&self) -> Option<SyntaxKind> {
        self.found_kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn related(&self) -> &[RelatedInfo] {
        &self.related
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}:{}: {}",
            self.severity, self.line, self.column, self.message
        )?;
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message,
                u32::from(related.range.start()),
                u32::from(related.range.end())
            )?;
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct RangeRepr {
    start: u32,
    end: u32,
}

fn serialize_range<S: Serializer>(range: &TextRange, serializer: S) -> Result<S::Ok, S::Error> {
    RangeRepr {
        start: range.start().into(),
        end: range.end().into(),
    }
    .serialize(serializer)
}
