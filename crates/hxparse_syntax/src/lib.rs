//! Syntax frontend for Haxe source: tokenizer, context-sensitive parser, lossless concrete syntax tree, diagnostics.
//!
//! The pipeline is bytes → [`lexer`] (tokens + trivia) → [`parser`] (grammar engine consulting the brace
//! [`scan`] context) → tree builder → [`tree::SyntaxTree`] plus an ordered diagnostics list.
//!
//! ## Notes
//! - This crate is syntax-only: no name resolution, no type checking.
//! - Parsing never fails as a whole. Malformed regions become `ERROR`/`MISSING` nodes and a diagnostic; everything
//!   around them still parses.
//! - The tree is lossless: concatenating every token in tree order reproduces the input byte-for-byte.
//! - Vocabulary identity (keywords/operators/punctuation/directives) comes from `hxparse_core::lang` registries.
//!
//! ## Examples
//! ```rust
//! use hxparse_syntax::parse;
//!
//! let source = "class Foo { var x:Int = 5; }";
//! let parse = parse(source);
//! assert!(parse.diagnostics.is_empty());
//! assert_eq!(parse.tree.render(), source);
//! ```
//!
//! ## See also
//! - `hxparse_core::lang` for the registry-backed vocabulary and the precedence table.

mod builder;
pub mod config;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod scan;
pub mod span;
pub mod token_helpers;
pub mod tree;

pub use config::ParseConfig;
pub use diagnostics::{Diagnostic, DiagnosticKind, ErrorCode};
pub use parser::{parse, parse_bytes, parse_bytes_with_config, parse_with_config};
pub use span::{LineIndex, Span};
pub use tree::{FieldName, Parse, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken, SyntaxTree};
