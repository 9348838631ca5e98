//! Textual dumps of the tree: S-expressions for tests and humans, JSON for tools.

use std::fmt::Write as _;

use serde_json::{Value, json};

use super::{FieldName, SyntaxElement, SyntaxNode, SyntaxToken, SyntaxTree};

impl SyntaxNode {
    /// Tree-sitter style S-expression.
    ///
    /// Child nodes go on their own line, indented two spaces per level and prefixed by their field. Identifier and
    /// literal tokens are shown inline as quoted text; other tokens only when they carry a field; trivia never.
    pub fn to_sexp(&self) -> String {
        let mut out = String::new();
        open_sexp(self, &mut out);
        // Open nodes with their indent and the index of the next child to print.
        let mut stack: Vec<(&SyntaxNode, usize, usize)> = vec![(self, 0, 0)];
        while let Some(top) = stack.last_mut() {
            let (node, indent, index) = *top;
            let Some(child) = node.children.get(index) else {
                out.push(')');
                stack.pop();
                continue;
            };
            top.2 += 1;
            let field = node.field_of(index);
            match child {
                SyntaxElement::Token(token) => {
                    if token.is_trivia() || (!token.kind.is_content() && field.is_none()) {
                        continue;
                    }
                    out.push(' ');
                    push_field(&mut out, field);
                    let _ = write!(out, "{:?}", token.text());
                }
                SyntaxElement::Node(child) => {
                    out.push('\n');
                    out.push_str(&" ".repeat(indent + 2));
                    push_field(&mut out, field);
                    open_sexp(child, &mut out);
                    stack.push((child.as_ref(), indent + 2, 0));
                }
            }
        }
        out
    }

    /// JSON dump including trivia, spans and production kinds.
    pub fn to_json(&self) -> Value {
        self.json_with_field(None)
    }

    fn json_with_field(&self, field: Option<FieldName>) -> Value {
        let children: Vec<Value> = self
            .children
            .iter()
            .enumerate()
            .map(|(index, child)| match child {
                SyntaxElement::Node(node) => node.json_with_field(self.field_of(index)),
                SyntaxElement::Token(token) => token_json(token, self.field_of(index)),
            })
            .collect();

        let mut value = json!({
            "kind": self.display_kind().as_str(),
            "span": [self.span.start, self.span.end],
            "children": children,
        });
        if self.alias.is_some() {
            value["production"] = json!(self.kind.as_str());
        }
        if let Some(field) = field {
            value["field"] = json!(field.as_str());
        }
        value
    }
}

fn open_sexp(node: &SyntaxNode, out: &mut String) {
    out.push('(');
    out.push_str(node.display_kind().as_str());
}

fn push_field(out: &mut String, field: Option<FieldName>) {
    if let Some(field) = field {
        out.push_str(field.as_str());
        out.push_str(": ");
    }
}

fn token_json(token: &SyntaxToken, field: Option<FieldName>) -> Value {
    let mut value = json!({
        "token": format!("{:?}", token.kind),
        "text": token.text(),
        "span": [token.span.start, token.span.end],
    });
    if let Some(field) = field {
        value["field"] = json!(field.as_str());
    }
    value
}

impl SyntaxTree {
    pub fn to_sexp(&self) -> String {
        self.root().to_sexp()
    }

    pub fn to_json(&self) -> Value {
        self.root().to_json()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::lexer::{IdentCase, TokenKind};
    use crate::span::Span;
    use crate::tree::SyntaxKind;
    use hxparse_core::lang::operators::OperatorId;

    fn tok(kind: TokenKind, start: usize, text: &str) -> SyntaxElement {
        SyntaxElement::Token(SyntaxToken {
            kind,
            span: Span::new(start, start + text.len()),
            text: text.into(),
        })
    }

    fn leaf(kind: SyntaxKind, token: SyntaxElement) -> SyntaxElement {
        SyntaxElement::Node(Arc::new(SyntaxNode {
            kind,
            alias: None,
            span: token.span(),
            children: vec![token],
            fields: vec![],
        }))
    }

    /// `a + 1`
    fn binary() -> SyntaxNode {
        SyntaxNode {
            kind: SyntaxKind::BinaryExpression,
            alias: None,
            span: Span::new(0, 5),
            children: vec![
                leaf(SyntaxKind::Identifier, tok(TokenKind::Ident(IdentCase::Lower), 0, "a")),
                tok(TokenKind::Whitespace, 1, " "),
                tok(TokenKind::Operator(OperatorId::Plus), 2, "+"),
                tok(TokenKind::Whitespace, 3, " "),
                leaf(SyntaxKind::IntegerLiteral, tok(TokenKind::Int, 4, "1")),
            ],
            fields: vec![(FieldName::Left, 0), (FieldName::Operator, 2), (FieldName::Right, 4)],
        }
    }

    #[test]
    fn test_sexp_layout() {
        insta::assert_snapshot!(binary().to_sexp(), @r#"
        (binary_expression
          left: (identifier "a") operator: "+"
          right: (integer "1"))
        "#);
    }

    #[test]
    fn test_json_carries_trivia_and_fields() {
        let value = binary().to_json();
        assert_eq!(value["kind"], "binary_expression");
        assert_eq!(value["span"], json!([0, 5]));
        let children = value["children"].as_array().map(Vec::len);
        assert_eq!(children, Some(5));
        assert_eq!(value["children"][1]["text"], " ");
        assert_eq!(value["children"][2]["field"], "operator");
        assert_eq!(value["children"][4]["field"], "right");
        assert!(value.get("production").is_none());
    }

    #[test]
    fn test_json_reports_production_of_aliased_node() {
        let node = SyntaxNode {
            kind: SyntaxKind::FieldDeclaration,
            alias: Some(SyntaxKind::VariableDeclaration),
            span: Span::empty(0),
            children: vec![],
            fields: vec![],
        };
        let value = node.to_json();
        assert_eq!(value["kind"], "variable_declaration");
        assert_eq!(value["production"], "field_declaration");
        assert_eq!(node.to_sexp(), "(variable_declaration)");
    }
}
