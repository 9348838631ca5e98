//! Parser for Haxe source.
//!
//! Turns the token stream into a lossless concrete syntax tree. The grammar is hand-written recursive descent with
//! one shared precedence-climbing routine for operator expressions; the operator table lives in
//! `hxparse_core::lang::operators`.
//!
//! ## Examples
//!
//! ```rust
//! use hxparse_syntax::{parse, SyntaxKind};
//!
//! let source = "class Foo { var x:Int = 5; }";
//! let parse = parse(source);
//! assert!(parse.diagnostics.is_empty());
//! assert_eq!(parse.tree.render(), source);
//! let class = parse.root().child_nodes().next().map(|n| n.kind);
//! assert_eq!(class, Some(SyntaxKind::ClassDeclaration));
//! ```
//!
//! ## Notes
//! - Parsing never fails. Grammar errors become `ERROR`/`MISSING` nodes plus diagnostics, and parsing resumes at the
//!   next statement boundary.
//! - The grammar only sees significant tokens; trivia and lexer error tokens are attached by `crate::builder`.

use std::sync::Arc;

use crate::builder::{self, Event};
use crate::config::ParseConfig;
use crate::diagnostics::{Diagnostic, ErrorCode, ParseError};
use crate::lexer::{self, LexOutput, Token, TokenKind};
use crate::scan::{BraceContext, ScanContext};
use crate::span::Span;
use crate::tree::{FieldName, Parse, SyntaxKind, SyntaxTree};
use hxparse_core::lang::directives;
use hxparse_core::lang::keywords::{self, KeywordId};
use hxparse_core::lang::operators::{self, Associativity, Fixity, OperatorId};
use hxparse_core::lang::punctuation::PunctuationId;

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/recovery.rs");
include!("parser/decl.rs");
include!("parser/types.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/literals.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
