//! Scan context: parse-local state for history-dependent decisions.
//!
//! Two questions cannot be answered from the next token alone:
//! - Which construct does this `}` close? Every production that opens a brace-like delimiter pushes a
//!   [`BraceContext`]; the production that consumes the closer pops it and checks the marker.
//! - May the `;` after this statement be omitted? Only at end of input, before a `}`, or right after a `}` that
//!   closed a block or switch body (`if (c) { ... }`, `switch x { ... }`).
//!
//! ## Notes
//! - One `ScanContext` is owned by each parse; it is cloned for speculative parses and restored on backtrack.
//! - A mismatched pop is a grammar defect, not a user error. It is still recovered (the marker is discarded and
//!   parsing continues) and reported as a `Recovery` diagnostic.

use crate::diagnostics::{Diagnostic, ErrorCode};
use crate::lexer::TokenKind;
use crate::span::Span;
use hxparse_core::lang::punctuation::PunctuationId;

/// Construct opened by a `{` (or `[`, `${`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BraceContext {
    Block,
    ObjectLiteral,
    /// `[k => v, ...]`; starts life as `ArrayLiteral` and is retagged on the first `=>`.
    MapLiteral,
    SwitchBlock,
    ClassBody,
    StructuralType,
    /// `$e{ ... }` and friends.
    Reification,
    ArrayLiteral,
}

impl BraceContext {
    pub fn as_str(self) -> &'static str {
        match self {
            BraceContext::Block => "block",
            BraceContext::ObjectLiteral => "object literal",
            BraceContext::MapLiteral => "map literal",
            BraceContext::SwitchBlock => "switch block",
            BraceContext::ClassBody => "class body",
            BraceContext::StructuralType => "structural type",
            BraceContext::Reification => "reification",
            BraceContext::ArrayLiteral => "array literal",
        }
    }
}

/// Brace-context stack plus a record of the last significant token.
#[derive(Debug, Clone, Default)]
pub struct ScanContext {
    stack: Vec<(BraceContext, Span)>,
    last_significant: Option<TokenKind>,
    /// Context closed by the last consumed token, if that token was a closer.
    last_closed: Option<BraceContext>,
}

impl ScanContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of open contexts.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Innermost open context.
    pub fn current(&self) -> Option<BraceContext> {
        self.stack.last().map(|(ctx, _)| *ctx)
    }

    pub fn last_significant(&self) -> Option<TokenKind> {
        self.last_significant
    }

    /// Record a consumed significant token.
    pub fn record(&mut self, kind: TokenKind) {
        self.last_significant = Some(kind);
        self.last_closed = None;
    }

    /// Push the context a production just committed to; `opener` is the span of its opening delimiter.
    pub fn open(&mut self, ctx: BraceContext, opener: Span) {
        self.stack.push((ctx, opener));
    }

    /// Retag the innermost context from `from` to `to`. Returns `false` if the innermost context is not `from`.
    pub fn retag(&mut self, from: BraceContext, to: BraceContext) -> bool {
        match self.stack.last_mut() {
            Some((ctx, _)) if *ctx == from => {
                *ctx = to;
                true
            }
            _ => false,
        }
    }

    /// Pop the innermost context, which must be `expected`.
    ///
    /// Call after consuming the closing token. On mismatch the popped marker is discarded anyway and a
    /// `ScanContextMismatch` diagnostic is returned.
    pub fn close(&mut self, expected: BraceContext, closer: Span) -> Option<Diagnostic> {
        let popped = self.stack.pop();
        self.last_closed = Some(expected);
        match popped {
            Some((ctx, _)) if ctx == expected => None,
            Some((ctx, opener)) => {
                tracing::debug!(?ctx, ?expected, %opener, %closer, "scan context mismatch");
                Some(
                    Diagnostic::new(
                        ErrorCode::ScanContextMismatch,
                        closer,
                        format!(
                            "closing {} but the innermost open construct is a {} (opened at {opener})",
                            expected.as_str(),
                            ctx.as_str()
                        ),
                    )
                    .with_hint("this is a parser defect; the tree around this point may be mis-nested"),
                )
            }
            None => {
                tracing::debug!(?expected, %closer, "scan context underflow");
                Some(Diagnostic::new(
                    ErrorCode::ScanContextMismatch,
                    closer,
                    format!("closing {} but no construct is open", expected.as_str()),
                ))
            }
        }
    }

    /// Decide whether a statement terminator may be omitted before `next`.
    pub fn semicolon_optional(&self, next: TokenKind) -> bool {
        if matches!(next, TokenKind::Eof) || next.is_punctuation(PunctuationId::RBrace) {
            return true;
        }
        let after_closer = self
            .last_significant
            .is_some_and(|kind| kind.is_punctuation(PunctuationId::RBrace));
        after_closer && matches!(self.last_closed, Some(BraceContext::Block | BraceContext::SwitchBlock))
    }
}
