//! Token types for the Haxe lexer.
//!
//! The lexer uses **registry-backed IDs** for language vocabulary:
//! - `Keyword(KeywordId)` for reserved words
//! - `Operator(OperatorId)` for operators
//! - `Punctuation(PunctuationId)` for punctuation tokens
//! - `Directive(DirectiveId)` for `#if`/`#elseif`/`#else`/`#end`
//!
//! ## Notes
//! - [`TokenKind`] is `Copy` and carries no text. Token text is always sliced from the source by span, which keeps
//!   the token stream cheap and guarantees lossless re-emission.
//! - Use `crate::token_helpers` for ergonomic token matching at call sites.

use crate::span::Span;
use hxparse_core::lang::directives::DirectiveId;
use hxparse_core::lang::keywords::{self, KeywordId};
use hxparse_core::lang::operators::OperatorId;
use hxparse_core::lang::punctuation::PunctuationId;

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Shape of an identifier, decided by its first character.
///
/// Lowercase-leading identifiers name values and package segments; uppercase-leading ones name types. Both share one
/// token kind and the grammar decides the role positionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentCase {
    Lower,
    Upper,
}

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // ========== Keyword / operator / punctuation (ID-based) ==========
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),
    Directive(DirectiveId),

    // ========== Identifiers and literals ==========
    Ident(IdentCase),
    Int,
    Float,
    /// `~/pattern/`
    Regex,
    /// Flag letters directly after a regex (`gimsu`).
    RegexFlags,

    // ========== String parts ==========
    /// Opening `"` or `'`.
    StringStart,
    /// Literal run of characters inside a string (`$$` included).
    StringText,
    /// A backslash escape sequence.
    StringEscape,
    /// `${` opening an interpolated expression.
    InterpOpen,
    /// `}` closing an interpolated expression.
    InterpClose,
    /// Closing quote.
    StringEnd,

    // ========== Trivia ==========
    Whitespace,
    LineComment,
    BlockComment,

    // ========== Special ==========
    /// Unrecognized input; always accompanied by a lex diagnostic.
    Error,
    /// End of file (zero width).
    Eof,
}

/// A token with its kind and source span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Slice this token's text out of `source`.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.span.start..self.span.end]
    }
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::from_str(name)
}

/// Classify an identifier by its leading character.
pub fn ident_case(name: &str) -> IdentCase {
    match name.chars().next() {
        Some(c) if c.is_ascii_uppercase() => IdentCase::Upper,
        _ => IdentCase::Lower,
    }
}
