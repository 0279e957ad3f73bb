//! Pluggable syntax error listeners.
//!
//! The parser reports every diagnostic to the configured listener as soon as it is found.
//! Returning `Err` aborts the parse: no tree is produced and the error propagates to the caller.
//! The returned [`Parse`](crate::Parse) always carries the full ordered diagnostic list,
//! whichever listener is installed.

use crate::SyntaxError;
use crate::diagnostics::{Diagnostic, Diagnostics};

/// Receives syntax errors in discovery order.
pub trait ErrorListener {
    fn syntax_error(&mut self, diagnostic: &Diagnostic) -> Result<(), SyntaxError>;
}

/// Collects every diagnostic and never aborts.
impl ErrorListener for Diagnostics {
    fn syntax_error(&mut self, diagnostic: &Diagnostic) -> Result<(), SyntaxError> {
        self.push(diagnostic.clone());
        Ok(())
    }
}

/// Aborts on the first syntax error.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailFast;

impl ErrorListener for FailFast {
    fn syntax_error(&mut self, diagnostic: &Diagnostic) -> Result<(), SyntaxError> {
        Err(SyntaxError::from(diagnostic))
    }
}

/// Logs each diagnostic through `tracing` and keeps parsing.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingListener;

impl ErrorListener for TracingListener {
    fn syntax_error(&mut self, diagnostic: &Diagnostic) -> Result<(), SyntaxError> {
        tracing::warn!(
            line = diagnostic.line(),
            column = diagnostic.column(),
            kind = ?diagnostic.kind(),
            found = diagnostic.offending_text(),
            "{}",
            diagnostic.message()
        );
        Ok(())
    }
}

/// Listener backed by a closure. Built with [`from_fn`].
pub struct FnListener<F>(F);

/// Wraps a closure as a listener.
///
/// ```
/// use apex_parser::{ParseBuilder, listener};
///
/// let mut lines = Vec::new();
/// let mut listener = listener::from_fn(|d| {
///     lines.push(d.line());
///     Ok(())
/// });
/// let parse = ParseBuilder::new("class A {")
///     .with_listener(&mut listener)
///     .parse_compilation_unit()
///     .unwrap();
/// assert_eq!(parse.diagnostics().len(), 1);
/// drop(listener);
/// assert_eq!(lines, vec![1]);
/// ```
pub fn from_fn<F>(f: F) -> FnListener<F>
where
    F: FnMut(&Diagnostic) -> Result<(), SyntaxError>,
{
    FnListener(f)
}

impl<F> ErrorListener for FnListener<F>
where
    F: FnMut(&Diagnostic) -> Result<(), SyntaxError>,
{
    fn syntax_error(&mut self, diagnostic: &Diagnostic) -> Result<(), SyntaxError> {
        (self.0)(diagnostic)
    }
}
