//! Internal assertions, excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use rowan::GreenNode;

use super::core::Parser;
use super::cst::{SyntaxKind, SyntaxNode};

impl Parser<'_, '_> {
    /// Lookahead without consuming burns debug fuel; a grammar loop that never bumps trips this.
    #[inline]
    pub(super) fn ensure_progress(&self) {
        let fuel = self.debug_fuel.get();
        assert!(fuel != 0, "parser stalled at token {}", self.pos);
        self.debug_fuel.set(fuel - 1);
    }

    /// Grammar rules only open a delimiter after checking for it.
    #[inline]
    pub(super) fn assert_at_opener(&mut self, opener: SyntaxKind) {
        debug_assert!(
            matches!(
                opener,
                SyntaxKind::ParenOpen | SyntaxKind::BraceOpen | SyntaxKind::BracketOpen
            ),
            "{opener:?} is not an opening delimiter"
        );
        let current = self.current();
        assert_eq!(
            current, opener,
            "opened {opener:?} while positioned at {current:?}"
        );
    }
}

/// The finished tree spells the source byte for byte.
pub(super) fn assert_lossless(green: &GreenNode, source: &str) {
    assert_eq!(
        usize::from(green.text_len()),
        source.len(),
        "tree length differs from source length"
    );
    if cfg!(debug_assertions) {
        let text = SyntaxNode::new_root(green.clone()).text().to_string();
        debug_assert_eq!(text, source, "tree text differs from source");
    }
}
