//! Tree building from parser events.
//!
//! The grammar never builds nodes directly. It appends [`Event`]s to a flat list; [`build_tree`] replays that list
//! against the full token stream (trivia included) and produces the [`SyntaxNode`] tree.
//!
//! ## Notes
//! - Trivia and lexer `Error` tokens are not seen by the grammar. The sink attaches them in source order: before a
//!   node starts they go to the parent, so a node never begins or ends with trivia.
//! - A lexer `Error` token becomes an `ERROR` node wrapping the token.
//! - Empty nodes (`MISSING`) get a zero-width span at the start of the next significant token.

use std::sync::Arc;

use crate::lexer::{Token, TokenKind};
use crate::span::Span;
use crate::tree::{FieldName, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

/// One step of tree construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Event {
    /// Open a node.
    Start { kind: SyntaxKind },
    /// Consume `raw` adjacent significant tokens as one leaf of kind `kind` (`raw > 1` for composed `>>=` etc).
    Token { kind: TokenKind, raw: u8 },
    /// Name the next element pushed into the current node.
    Field(FieldName),
    /// Set the presentation kind of the current node.
    Alias(SyntaxKind),
    /// Close the current node.
    Finish,
}

struct Frame {
    kind: SyntaxKind,
    alias: Option<SyntaxKind>,
    /// Field under which this node is attached to its parent.
    field: Option<FieldName>,
    /// Field waiting for the next child.
    pending_field: Option<FieldName>,
    children: Vec<SyntaxElement>,
    fields: Vec<(FieldName, usize)>,
    offset: usize,
}

impl Frame {
    fn new(kind: SyntaxKind, field: Option<FieldName>, offset: usize) -> Self {
        Self {
            kind,
            alias: None,
            field,
            pending_field: None,
            children: Vec::new(),
            fields: Vec::new(),
            offset,
        }
    }

    fn push(&mut self, element: SyntaxElement, field: Option<FieldName>) {
        if let Some(field) = field {
            self.fields.push((field, self.children.len()));
        }
        self.children.push(element);
    }

    fn into_node(self) -> (SyntaxNode, Option<FieldName>) {
        let span = match (self.children.first(), self.children.last()) {
            (Some(first), Some(last)) => Span::new(first.span().start, last.span().end),
            _ => Span::empty(self.offset),
        };
        let node = SyntaxNode {
            kind: self.kind,
            alias: self.alias,
            span,
            children: self.children,
            fields: self.fields,
        };
        (node, self.field)
    }
}

struct Sink<'a> {
    source: &'a str,
    raw: &'a [Token],
    cursor: usize,
    stack: Vec<Frame>,
}

impl<'a> Sink<'a> {
    fn next_offset(&self) -> usize {
        self.raw
            .get(self.cursor)
            .map_or(self.source.len(), |token| token.span.start)
    }

    fn leaf(&self, kind: TokenKind, span: Span) -> SyntaxToken {
        SyntaxToken {
            kind,
            span,
            text: self.source.get(span.start..span.end).unwrap_or_default().into(),
        }
    }

    /// Attach trivia and lexer error tokens sitting at the cursor to the current frame.
    fn flush_trivia(&mut self) {
        while let Some(token) = self.raw.get(self.cursor).copied() {
            let element = if token.kind.is_trivia() {
                SyntaxElement::Token(self.leaf(token.kind, token.span))
            } else if token.kind == TokenKind::Error {
                SyntaxElement::Node(Arc::new(SyntaxNode {
                    kind: SyntaxKind::Error,
                    alias: None,
                    span: token.span,
                    children: vec![SyntaxElement::Token(self.leaf(token.kind, token.span))],
                    fields: Vec::new(),
                }))
            } else {
                break;
            };
            self.cursor += 1;
            if let Some(frame) = self.stack.last_mut() {
                frame.push(element, None);
            }
        }
    }

    fn start(&mut self, kind: SyntaxKind) {
        let field = if self.stack.is_empty() {
            None
        } else {
            self.flush_trivia();
            self.stack.last_mut().and_then(|parent| parent.pending_field.take())
        };
        let offset = self.next_offset();
        self.stack.push(Frame::new(kind, field, offset));
    }

    fn token(&mut self, kind: TokenKind, raw: u8) {
        self.flush_trivia();
        let first = self.cursor;
        let last = (first + usize::from(raw.max(1))).min(self.raw.len());
        if first >= last {
            return;
        }
        let span = Span::new(self.raw[first].span.start, self.raw[last - 1].span.end);
        self.cursor = last;
        let token = self.leaf(kind, span);
        if let Some(frame) = self.stack.last_mut() {
            let field = frame.pending_field.take();
            frame.push(SyntaxElement::Token(token), field);
        }
    }

    /// Close the current frame. Returns the node when the root was closed.
    fn finish(&mut self) -> Option<SyntaxNode> {
        if self.stack.len() == 1 {
            self.flush_rest();
        }
        let frame = self.stack.pop()?;
        let (node, field) = frame.into_node();
        match self.stack.last_mut() {
            Some(parent) => {
                parent.push(SyntaxElement::Node(Arc::new(node)), field);
                None
            }
            None => Some(node),
        }
    }

    /// Attach everything left in the stream (except `Eof`) to the root.
    fn flush_rest(&mut self) {
        loop {
            self.flush_trivia();
            match self.raw.get(self.cursor) {
                Some(token) if token.kind != TokenKind::Eof => {
                    // Significant tokens the grammar never consumed; kept verbatim.
                    let token = *token;
                    self.cursor += 1;
                    let leaf = self.leaf(token.kind, token.span);
                    if let Some(frame) = self.stack.last_mut() {
                        frame.push(
                            SyntaxElement::Node(Arc::new(SyntaxNode {
                                kind: SyntaxKind::Error,
                                alias: None,
                                span: token.span,
                                children: vec![SyntaxElement::Token(leaf)],
                                fields: Vec::new(),
                            })),
                            None,
                        );
                    }
                }
                _ => break,
            }
        }
    }
}

/// Replay `events` over `raw` (every token of `source`, trivia included) and return the root node.
pub(crate) fn build_tree(source: &str, raw: &[Token], events: &[Event]) -> Arc<SyntaxNode> {
    let mut sink = Sink {
        source,
        raw,
        cursor: 0,
        stack: Vec::new(),
    };
    let mut root = None;

    for event in events {
        match *event {
            Event::Start { kind } => sink.start(kind),
            Event::Token { kind, raw } => sink.token(kind, raw),
            Event::Field(name) => {
                if let Some(frame) = sink.stack.last_mut() {
                    frame.pending_field = Some(name);
                }
            }
            Event::Alias(kind) => {
                if let Some(frame) = sink.stack.last_mut() {
                    frame.alias = Some(kind);
                }
            }
            Event::Finish => {
                if let Some(node) = sink.finish() {
                    root = Some(node);
                }
            }
        }
    }
    while !sink.stack.is_empty() {
        if let Some(node) = sink.finish() {
            root = Some(node);
        }
    }

    let root = root.unwrap_or_else(|| {
        let mut sink = Sink {
            source,
            raw,
            cursor: 0,
            stack: vec![Frame::new(SyntaxKind::Module, None, 0)],
        };
        sink.flush_rest();
        let (node, _) = sink.stack.pop().map_or_else(
            || Frame::new(SyntaxKind::Module, None, 0).into_node(),
            Frame::into_node,
        );
        node
    });
    Arc::new(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;
    use hxparse_core::lang::operators::OperatorId;

    fn significant(raw: &[Token]) -> Vec<Token> {
        raw.iter()
            .copied()
            .filter(|t| !t.kind.is_trivia() && t.kind != TokenKind::Error && t.kind != TokenKind::Eof)
            .collect()
    }

    #[test]
    fn test_trivia_goes_between_siblings() {
        let source = " a  ;  ";
        let raw = lex(source).tokens;
        let sig = significant(&raw);
        let events = vec![
            Event::Start { kind: SyntaxKind::Module },
            Event::Start { kind: SyntaxKind::ExpressionStatement },
            Event::Field(FieldName::Expression),
            Event::Start { kind: SyntaxKind::Identifier },
            Event::Token { kind: sig[0].kind, raw: 1 },
            Event::Finish,
            Event::Token { kind: sig[1].kind, raw: 1 },
            Event::Finish,
            Event::Finish,
        ];
        let root = build_tree(source, &raw, &events);
        assert_eq!(root.render(), source);
        assert_eq!(root.span, Span::new(0, 7));
        // leading ws, statement, trailing ws
        assert_eq!(root.children.len(), 3);
        let stmt = root.child_nodes().next().map(|n| n.span);
        assert_eq!(stmt, Some(Span::new(1, 5)));
    }

    #[test]
    fn test_composed_token_merges_raw_tokens() {
        let source = "a>>=b";
        let raw = lex(source).tokens;
        let events = vec![
            Event::Start { kind: SyntaxKind::Module },
            Event::Token { kind: TokenKind::Ident(crate::lexer::IdentCase::Lower), raw: 1 },
            Event::Token { kind: TokenKind::Operator(OperatorId::ShrEq), raw: 3 },
            Event::Token { kind: TokenKind::Ident(crate::lexer::IdentCase::Lower), raw: 1 },
            Event::Finish,
        ];
        let root = build_tree(source, &raw, &events);
        let texts: Vec<&str> = root.tokens().iter().map(|t| t.text()).collect();
        assert_eq!(texts, vec!["a", ">>=", "b"]);
    }

    #[test]
    fn test_lexer_errors_become_error_nodes() {
        let source = "a ` b";
        let raw = lex(source).tokens;
        let events = vec![
            Event::Start { kind: SyntaxKind::Module },
            Event::Token { kind: TokenKind::Ident(crate::lexer::IdentCase::Lower), raw: 1 },
            Event::Token { kind: TokenKind::Ident(crate::lexer::IdentCase::Lower), raw: 1 },
            Event::Finish,
        ];
        let root = build_tree(source, &raw, &events);
        assert_eq!(root.render(), source);
        let errors: Vec<Span> = root
            .child_nodes()
            .filter(|n| n.kind == SyntaxKind::Error)
            .map(|n| n.span)
            .collect();
        assert_eq!(errors, vec![Span::new(2, 3)]);
    }

    #[test]
    fn test_empty_node_is_zero_width_at_next_token() {
        let source = "a }";
        let raw = lex(source).tokens;
        let events = vec![
            Event::Start { kind: SyntaxKind::Module },
            Event::Token { kind: TokenKind::Ident(crate::lexer::IdentCase::Lower), raw: 1 },
            Event::Start { kind: SyntaxKind::Missing },
            Event::Finish,
            Event::Finish,
        ];
        let root = build_tree(source, &raw, &events);
        let missing = root.child_nodes().find(|n| n.kind == SyntaxKind::Missing).map(|n| n.span);
        assert_eq!(missing, Some(Span::empty(2)));
        // Unconsumed `}` is still kept.
        assert_eq!(root.render(), source);
    }

    #[test]
    fn test_unbalanced_events_still_produce_a_lossless_root() {
        let source = "x y";
        let raw = lex(source).tokens;
        let root = build_tree(source, &raw, &[]);
        assert_eq!(root.kind, SyntaxKind::Module);
        assert_eq!(root.render(), source);

        let events = vec![Event::Start { kind: SyntaxKind::Module }, Event::Start { kind: SyntaxKind::Block }];
        let root = build_tree(source, &raw, &events);
        assert_eq!(root.render(), source);
    }
}
