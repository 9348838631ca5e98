//! Preprocessor directive vocabulary (`#if`, `#elseif`, `#else`, `#end`).
//!
//! Directive words overlap with keyword spellings (`if`, `else`); the tokenizer tells them apart by the `#` that
//! immediately precedes them. Spellings in this table include the `#`.
//!
//! ## Examples
//! ```rust
//! use hxparse_core::lang::directives::{self, DirectiveId};
//!
//! assert_eq!(directives::from_str("#elseif"), Some(DirectiveId::ElseIf));
//! assert!(directives::takes_condition(DirectiveId::If));
//! assert!(!directives::takes_condition(DirectiveId::End));
//! ```

/// Stable identifier for preprocessor directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveId {
    If,
    ElseIf,
    Else,
    End,
}

/// Metadata for a directive.
#[derive(Debug, Clone, Copy)]
pub struct DirectiveInfo {
    pub id: DirectiveId,
    pub canonical: &'static str,
    /// Whether a condition follows the directive word.
    pub takes_condition: bool,
}

/// Registry of all directives.
pub const DIRECTIVES: &[DirectiveInfo] = &[
    DirectiveInfo {
        id: DirectiveId::If,
        canonical: "#if",
        takes_condition: true,
    },
    DirectiveInfo {
        id: DirectiveId::ElseIf,
        canonical: "#elseif",
        takes_condition: true,
    },
    DirectiveInfo {
        id: DirectiveId::Else,
        canonical: "#else",
        takes_condition: false,
    },
    DirectiveInfo {
        id: DirectiveId::End,
        canonical: "#end",
        takes_condition: false,
    },
];

/// Return the canonical spelling (with leading `#`).
pub fn as_str(id: DirectiveId) -> &'static str {
    info_for(id).canonical
}

/// Return `true` if a condition follows the directive.
pub fn takes_condition(id: DirectiveId) -> bool {
    info_for(id).takes_condition
}

/// Return the full metadata entry for a directive.
pub fn info_for(id: DirectiveId) -> &'static DirectiveInfo {
    match DIRECTIVES.iter().find(|d| d.id == id) {
        Some(info) => info,
        None => unreachable!("directive info missing for {id:?}"),
    }
}

/// Resolve a spelling (including the leading `#`) to a directive.
pub fn from_str(s: &str) -> Option<DirectiveId> {
    DIRECTIVES.iter().find(|d| d.canonical == s).map(|d| d.id)
}
