//! Haxe language vocabulary registries.
//!
//! This module is the “front door” for language-level vocabulary: reserved keywords, operators, punctuation and
//! preprocessor directives.
//!
//! The design goal is to avoid stringly-typed checks scattered across the tokenizer and the grammar engine.
//! Callers work with **stable IDs** (e.g. `KeywordId`, `OperatorId`) and look up spellings/metadata via registry
//! tables.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no tree types, no IO, no side effects.
//! - The lexer/parser enforce syntax; registries provide spellings and metadata for shared use (diagnostics, docs,
//!   tree dumps).
//!
//! ## Examples
//! ```rust
//! use hxparse_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("class"), Some(KeywordId::Class));
//! assert_eq!(keywords::as_str(KeywordId::Class), "class");
//! ```
//!
//! ## See also
//! - `cargo run -p hxparse_core --bin generate_lang_reference` to generate Markdown reference tables.

pub mod directives;
pub mod keywords;
pub mod operators;
pub mod punctuation;
