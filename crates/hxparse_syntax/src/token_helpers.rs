//! Small helper APIs for working with `Token` / `TokenKind`.
//!
//! These helpers exist to reduce repetitive `matches!(...)` at call sites and to make it easy
//! to work with ID-based tokens.

use crate::lexer::{Token, TokenKind};
use hxparse_core::lang::directives::{self, DirectiveId};
use hxparse_core::lang::keywords::{self, KeywordId};
use hxparse_core::lang::operators::{self, OperatorId};
use hxparse_core::lang::punctuation::{self, PunctuationId};

impl TokenKind {
    /// Return the keyword id, if this is a keyword token.
    pub fn keyword_id(&self) -> Option<KeywordId> {
        match self {
            TokenKind::Keyword(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given keyword.
    pub fn is_keyword(&self, id: KeywordId) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == id)
    }

    /// Return the operator id, if this is an operator token.
    pub fn operator_id(&self) -> Option<OperatorId> {
        match self {
            TokenKind::Operator(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given operator.
    pub fn is_operator(&self, id: OperatorId) -> bool {
        matches!(self, TokenKind::Operator(o) if *o == id)
    }

    /// Return the punctuation id, if this is a punctuation token.
    pub fn punctuation_id(&self) -> Option<PunctuationId> {
        match self {
            TokenKind::Punctuation(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given punctuation.
    pub fn is_punctuation(&self, id: PunctuationId) -> bool {
        matches!(self, TokenKind::Punctuation(p) if *p == id)
    }

    /// Return the directive id, if this is a preprocessor directive token.
    pub fn directive_id(&self) -> Option<DirectiveId> {
        match self {
            TokenKind::Directive(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` for identifiers of either case.
    pub fn is_ident(&self) -> bool {
        matches!(self, TokenKind::Ident(_))
    }

    /// Return `true` for whitespace and comments.
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace | TokenKind::LineComment | TokenKind::BlockComment
        )
    }

    /// Return `true` for tokens whose text carries information the node kind does not imply
    /// (identifiers, literal text, boolean keywords).
    pub fn is_content(&self) -> bool {
        matches!(
            self,
            TokenKind::Ident(_)
                | TokenKind::Int
                | TokenKind::Float
                | TokenKind::Regex
                | TokenKind::RegexFlags
                | TokenKind::StringText
                | TokenKind::StringEscape
                | TokenKind::Keyword(KeywordId::True | KeywordId::False)
        )
    }

    /// Human-readable description used in diagnostics (`` `class` ``, `identifier`, `end of file`).
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Keyword(id) => format!("`{}`", keywords::as_str(*id)),
            TokenKind::Operator(id) => format!("`{}`", operators::as_str(*id)),
            TokenKind::Punctuation(id) => format!("`{}`", punctuation::as_str(*id)),
            TokenKind::Directive(id) => format!("`{}`", directives::as_str(*id)),
            TokenKind::Ident(_) => "identifier".to_string(),
            TokenKind::Int => "integer literal".to_string(),
            TokenKind::Float => "float literal".to_string(),
            TokenKind::Regex | TokenKind::RegexFlags => "regex literal".to_string(),
            TokenKind::StringStart => "string literal".to_string(),
            TokenKind::StringText | TokenKind::StringEscape => "string content".to_string(),
            TokenKind::InterpOpen => "`${`".to_string(),
            TokenKind::InterpClose => "end of interpolation".to_string(),
            TokenKind::StringEnd => "end of string".to_string(),
            TokenKind::Whitespace => "whitespace".to_string(),
            TokenKind::LineComment | TokenKind::BlockComment => "comment".to_string(),
            TokenKind::Error => "invalid token".to_string(),
            TokenKind::Eof => "end of file".to_string(),
        }
    }
}

impl Token {
    /// Convenience wrapper for `self.kind.keyword_id()`.
    pub fn keyword_id(&self) -> Option<KeywordId> {
        self.kind.keyword_id()
    }

    /// Convenience wrapper for `self.kind.operator_id()`.
    pub fn operator_id(&self) -> Option<OperatorId> {
        self.kind.operator_id()
    }

    /// Convenience wrapper for `self.kind.punctuation_id()`.
    pub fn punctuation_id(&self) -> Option<PunctuationId> {
        self.kind.punctuation_id()
    }

    /// Return `true` if `next` starts exactly where this token ends (no trivia in between).
    pub fn is_adjacent_to(&self, next: &Token) -> bool {
        self.span.end == next.span.start
    }
}
