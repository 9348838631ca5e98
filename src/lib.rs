#![forbid(unsafe_code)]
//! hxparse: an error-tolerant, lossless parser for Haxe source.
//!
//! This crate ties the workspace together: it re-exports the syntax frontend (`hxparse_syntax`) and the vocabulary
//! registries (`hxparse_core`), and hosts the `hxparse` command-line tool.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Parsing**: `parse` never fails and never panics on malformed input; problems are reported as diagnostics next
//!   to a complete tree.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! ## Examples
//! ```rust
//! let parse = hxparse::parse("class Foo { var x:Int = 5; }");
//! assert!(parse.diagnostics.is_empty());
//! println!("{}", parse.tree.to_sexp());
//! ```

pub mod cli;

pub use hxparse_core::lang;
pub use hxparse_syntax::{config, diagnostics, lexer, scan, tree};

pub use hxparse_syntax::{
    Diagnostic, DiagnosticKind, ErrorCode, FieldName, LineIndex, Parse, ParseConfig, Span, SyntaxElement, SyntaxKind,
    SyntaxNode, SyntaxToken, SyntaxTree, parse, parse_bytes, parse_bytes_with_config, parse_with_config,
};
