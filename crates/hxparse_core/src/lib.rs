//! Canonical vocabulary for the Haxe surface grammar.
//!
//! This crate is intentionally small and dependency-free. It holds the registries that both the tokenizer and the
//! grammar engine consult: reserved words, operators (with the precedence table), punctuation, and preprocessor
//! directives.
//!
//! ## Notes
//!
//! - This is a “vocabulary” crate: **no IO**, no global mutable state, no tree or token types.
//! - Tables are `const` and fixed at compile time; nothing here is mutated during a parse.

pub mod lang;
