//! Renders syntax diagnostics as annotated source excerpts or one-line summaries.

use std::fmt::Write;
use std::ops::Range;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};
use rowan::TextRange;

use super::message::Severity;
use super::{Diagnostic, Diagnostics};

/// Renders a [`Diagnostics`] collection.
///
/// Without source text every diagnostic prints as its `line:column` summary. Given the source,
/// each one becomes an excerpt with the offending span underlined and related locations
/// labelled beside it.
pub struct DiagnosticsPrinter<'d, 's> {
    diagnostics: &'d Diagnostics,
    source: Option<&'s str>,
    path: Option<&'s str>,
    colored: bool,
}

impl<'d, 's> DiagnosticsPrinter<'d, 's> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            source: None,
            path: None,
            colored: false,
        }
    }

    pub fn source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    /// File name shown in the excerpt header, e.g. `Account.cls`.
    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("writing to a String cannot fail");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        match self.source {
            Some(source) => self.format_excerpts(w, source),
            None => self.format_summaries(w),
        }
    }

    fn format_summaries(&self, w: &mut impl Write) -> std::fmt::Result {
        for (i, diag) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            write!(w, "{diag}")?;
        }
        Ok(())
    }

    fn format_excerpts(&self, w: &mut impl Write, source: &str) -> std::fmt::Result {
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        for (i, diag) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            let report = [excerpt(diag, source, self.path)];
            write!(w, "{}", renderer.render(&report))?;
        }
        Ok(())
    }
}

/// The title carries the message, so the primary underline stays unlabelled.
fn excerpt<'a>(diag: &'a Diagnostic, source: &'a str, path: Option<&'a str>) -> Group<'a> {
    let mut snippet = Snippet::source(source)
        .line_start(1)
        .annotation(AnnotationKind::Primary.span(span_in(diag.range(), source)));

    if let Some(path) = path {
        snippet = snippet.path(path);
    }

    for related in diag.related() {
        snippet = snippet.annotation(
            AnnotationKind::Context
                .span(span_in(related.range, source))
                .label(&related.message),
        );
    }

    let level = match diag.severity() {
        Severity::Error => Level::ERROR,
    };
    level.primary_title(diag.message()).element(snippet)
}

/// Clamps `range` to the source; an empty range widens to the character after it.
fn span_in(range: TextRange, source: &str) -> Range<usize> {
    let start = usize::from(range.start()).min(source.len());
    let end = usize::from(range.end()).min(source.len());
    if start < end {
        return start..end;
    }

    let width = source
        .get(start..)
        .and_then(|rest| rest.chars().next())
        .map_or(0, char::len_utf8);
    start..start + width
}

impl Diagnostics {
    pub fn printer(&self) -> DiagnosticsPrinter<'_, '_> {
        DiagnosticsPrinter::new(self)
    }
}
