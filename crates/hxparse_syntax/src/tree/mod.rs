//! Lossless concrete syntax tree.
//!
//! Every byte of the input, trivia included, is owned by exactly one [`SyntaxToken`] in the tree. Concatenating the
//! token texts in pre-order reproduces the source (see [`SyntaxTree::render`]).
//!
//! ## Notes
//! - Nodes are immutable once built and shared through `Arc`, so subtrees can be compared by identity.
//! - Trivia sits between siblings as ordinary token children but never carries a field.
//! - `Error` and `Missing` nodes mark recovered regions; everything outside them is a normal parse.

mod kinds;
mod render;

pub use kinds::{FieldName, SyntaxKind};

use std::sync::{Arc, OnceLock};

use crate::diagnostics::Diagnostic;
use crate::lexer::TokenKind;
use crate::span::{LineIndex, Span};

/// A leaf of the tree: one (possibly composed) token with its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxToken {
    pub kind: TokenKind,
    pub span: Span,
    pub text: Box<str>,
}

impl SyntaxToken {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }
}

/// A child of a [`SyntaxNode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxElement {
    Node(Arc<SyntaxNode>),
    Token(SyntaxToken),
}

impl SyntaxElement {
    pub fn span(&self) -> Span {
        match self {
            SyntaxElement::Node(node) => node.span,
            SyntaxElement::Token(token) => token.span,
        }
    }

    pub fn as_node(&self) -> Option<&SyntaxNode> {
        match self {
            SyntaxElement::Node(node) => Some(node.as_ref()),
            SyntaxElement::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&SyntaxToken> {
        match self {
            SyntaxElement::Node(_) => None,
            SyntaxElement::Token(token) => Some(token),
        }
    }

    fn is_trivia(&self) -> bool {
        matches!(self, SyntaxElement::Token(token) if token.is_trivia())
    }
}

/// An interior node of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    /// Production that built the node.
    pub kind: SyntaxKind,
    /// Presentation kind, when it differs from the production.
    pub alias: Option<SyntaxKind>,
    /// Union of the children's spans; zero-width for empty nodes.
    pub span: Span,
    pub children: Vec<SyntaxElement>,
    /// `(field, child index)` pairs; a field may name several children.
    pub fields: Vec<(FieldName, usize)>,
}

impl SyntaxNode {
    /// Kind shown to consumers: the alias if present, else the production kind.
    pub fn display_kind(&self) -> SyntaxKind {
        self.alias.unwrap_or(self.kind)
    }

    /// Field attached to the child at `index`, if any.
    pub fn field_of(&self, index: usize) -> Option<FieldName> {
        self.fields.iter().find(|(_, i)| *i == index).map(|(name, _)| *name)
    }

    /// First child carrying `field`.
    pub fn child_by_field(&self, field: FieldName) -> Option<&SyntaxElement> {
        self.children_by_field(field).next()
    }

    /// All children carrying `field`, in source order.
    pub fn children_by_field(&self, field: FieldName) -> impl Iterator<Item = &SyntaxElement> + '_ {
        self.fields
            .iter()
            .filter(move |(name, _)| *name == field)
            .filter_map(|(_, i)| self.children.get(*i))
    }

    /// First child node carrying `field`.
    pub fn node_by_field(&self, field: FieldName) -> Option<&SyntaxNode> {
        self.children_by_field(field).find_map(SyntaxElement::as_node)
    }

    /// First child token carrying `field`.
    pub fn token_by_field(&self, field: FieldName) -> Option<&SyntaxToken> {
        self.children_by_field(field).find_map(SyntaxElement::as_token)
    }

    /// Direct child nodes, in source order.
    pub fn child_nodes(&self) -> impl Iterator<Item = &SyntaxNode> + '_ {
        self.children.iter().filter_map(SyntaxElement::as_node)
    }

    /// This node and every node below it, in pre-order.
    pub fn descendants(&self) -> Vec<&SyntaxNode> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter().rev().filter_map(SyntaxElement::as_node));
        }
        out
    }

    /// All leaves below this node, trivia included, in source order.
    pub fn tokens(&self) -> Vec<&SyntaxToken> {
        let mut out = Vec::new();
        let mut stack: Vec<&SyntaxElement> = self.children.iter().rev().collect();
        while let Some(element) = stack.pop() {
            match element {
                SyntaxElement::Token(token) => out.push(token),
                SyntaxElement::Node(node) => stack.extend(node.children.iter().rev()),
            }
        }
        out
    }

    /// Re-emit the exact source text covered by this node.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.span.len());
        for token in self.tokens() {
            out.push_str(&token.text);
        }
        out
    }

    /// Return `true` if this node or any descendant is an `Error` or `Missing` node.
    pub fn has_errors(&self) -> bool {
        self.descendants().iter().any(|node| node.kind.is_recovery())
    }

    /// Compare two trees ignoring spans and trivia.
    ///
    /// Kinds, aliases, fields and the texts of significant tokens must agree.
    pub fn structurally_eq(&self, other: &SyntaxNode) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((left, right)) = pending.pop() {
            if left.kind != right.kind || left.alias != right.alias {
                return false;
            }
            let mine: Vec<(usize, &SyntaxElement)> = left.significant_children().collect();
            let theirs: Vec<(usize, &SyntaxElement)> = right.significant_children().collect();
            if mine.len() != theirs.len() {
                return false;
            }
            for ((i, a), (j, b)) in mine.into_iter().zip(theirs) {
                if left.field_of(i) != right.field_of(j) {
                    return false;
                }
                match (a, b) {
                    (SyntaxElement::Node(a), SyntaxElement::Node(b)) => pending.push((a.as_ref(), b.as_ref())),
                    (SyntaxElement::Token(a), SyntaxElement::Token(b)) if a.kind == b.kind && a.text == b.text => {}
                    _ => return false,
                }
            }
        }
        true
    }

    fn significant_children(&self) -> impl Iterator<Item = (usize, &SyntaxElement)> + '_ {
        self.children.iter().enumerate().filter(|(_, child)| !child.is_trivia())
    }
}

impl Drop for SyntaxNode {
    /// Release uniquely owned descendants from a work list; a flat chain like `a + b + ... + z` is a left spine as
    /// long as the chain, too deep for the default recursive drop.
    fn drop(&mut self) {
        let mut owned = Vec::new();
        take_child_nodes(&mut self.children, &mut owned);
        while let Some(node) = owned.pop() {
            if let Ok(mut node) = Arc::try_unwrap(node) {
                take_child_nodes(&mut node.children, &mut owned);
            }
        }
    }
}

fn take_child_nodes(children: &mut Vec<SyntaxElement>, out: &mut Vec<Arc<SyntaxNode>>) {
    out.extend(children.drain(..).filter_map(|child| match child {
        SyntaxElement::Node(node) => Some(node),
        SyntaxElement::Token(_) => None,
    }));
}

/// A parsed source file: the source text plus the root `module` node.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    source: Arc<str>,
    root: Arc<SyntaxNode>,
    line_index: OnceLock<LineIndex>,
    /// The caller's buffer, kept when it was not valid UTF-8.
    original: Option<Arc<[u8]>>,
}

impl SyntaxTree {
    pub fn new(source: Arc<str>, root: Arc<SyntaxNode>) -> Self {
        Self {
            source,
            root,
            line_index: OnceLock::new(),
            original: None,
        }
    }

    /// Attach the raw input that `source` was derived from; spans index both alike.
    pub fn with_original_bytes(mut self, bytes: Arc<[u8]>) -> Self {
        self.original = Some(bytes);
        self
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    /// Shared handle to the root, for callers that keep subtrees alive past the tree.
    pub fn root_arc(&self) -> Arc<SyntaxNode> {
        Arc::clone(&self.root)
    }

    /// Lossless re-emission; always equal to [`SyntaxTree::source`].
    pub fn render(&self) -> String {
        self.root.render()
    }

    /// Re-emit the input bytes, including invalid UTF-8 sequences, by slicing each token's span.
    pub fn render_bytes(&self) -> Vec<u8> {
        let Some(original) = &self.original else {
            return self.render().into_bytes();
        };
        let mut out = Vec::with_capacity(original.len());
        for token in self.tokens() {
            out.extend_from_slice(original.get(token.span.start..token.span.end).unwrap_or_default());
        }
        out
    }

    /// All leaves, trivia included, in source order.
    pub fn tokens(&self) -> Vec<&SyntaxToken> {
        self.root.tokens()
    }

    /// Line table, built on first use.
    pub fn line_index(&self) -> &LineIndex {
        self.line_index.get_or_init(|| LineIndex::new(&self.source))
    }

    /// 1-based `(line, column)` of a byte offset.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        self.line_index().line_col(offset)
    }
}

/// Result of a parse: always a complete tree, plus whatever went wrong.
#[derive(Debug, Clone)]
pub struct Parse {
    pub tree: SyntaxTree,
    /// Lexical and syntactic diagnostics ordered by start offset.
    pub diagnostics: Vec<Diagnostic>,
}

impl Parse {
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn root(&self) -> &SyntaxNode {
        self.tree.root()
    }
}
