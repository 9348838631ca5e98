//! Define the reserved keyword vocabulary for the Haxe surface grammar.
//!
//! This module is the single source of truth for reserved words: a stable identifier ([`KeywordId`]) plus a const
//! metadata table ([`KEYWORDS`]) that records canonical spellings, categories and usage hints.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive** (`Class` is a type name, `class` is a keyword).
//! - Preprocessor words (`#if`, `#else`, …) are *not* keywords; they live in [`crate::lang::directives`] and are
//!   told apart lexically by the leading `#`.
//!
//! ## Examples
//! ```rust
//! use hxparse_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("typedef"), Some(KeywordId::Typedef));
//! assert_eq!(keywords::from_str("Typedef"), None);
//! assert_eq!(keywords::as_str(KeywordId::Untyped), "untyped");
//! ```

/// Stable identifier for every reserved keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Module structure
    Package,
    Import,
    Using,
    As,

    // Declarations
    Class,
    Extends,
    Implements,
    Typedef,
    Var,
    Final,
    Function,

    // Access / storage modifiers
    Public,
    Private,
    Static,
    Inline,
    Override,
    Extern,
    Dynamic,
    Macro,

    // Control flow
    If,
    Else,
    While,
    Do,
    For,
    In,
    Switch,
    Case,
    Default,
    Break,
    Continue,
    Return,

    // Expressions
    New,
    This,
    Super,
    Cast,
    Untyped,

    // Literals
    Null,
    True,
    False,
}

/// High-level grouping for documentation and tooling.
///
/// ## Notes
/// - Categories are metadata only; they do not enforce parsing context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    Module,
    Declaration,
    Modifier,
    ControlFlow,
    Expression,
    Literal,
}

/// Usage context hints (not enforced here; the grammar engine owns context).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordUsage {
    TopLevel,
    Statement,
    Expression,
    Modifier,
    Type,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
    pub usage: &'static [KeywordUsage],
}

/// Registry of all keywords.
///
/// ## Notes
/// - The ordering is not semantically meaningful, but is grouped for readability.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Module structure
    info(KeywordId::Package, "package", KeywordCategory::Module, &[KeywordUsage::TopLevel]),
    info(KeywordId::Import, "import", KeywordCategory::Module, &[KeywordUsage::TopLevel]),
    info(KeywordId::Using, "using", KeywordCategory::Module, &[KeywordUsage::TopLevel]),
    info(KeywordId::As, "as", KeywordCategory::Module, &[KeywordUsage::TopLevel]),
    // Declarations
    info(KeywordId::Class, "class", KeywordCategory::Declaration, &[KeywordUsage::TopLevel]),
    info(KeywordId::Extends, "extends", KeywordCategory::Declaration, &[KeywordUsage::TopLevel]),
    info(KeywordId::Implements, "implements", KeywordCategory::Declaration, &[KeywordUsage::TopLevel]),
    info(KeywordId::Typedef, "typedef", KeywordCategory::Declaration, &[KeywordUsage::TopLevel, KeywordUsage::Type]),
    info(KeywordId::Var, "var", KeywordCategory::Declaration, &[KeywordUsage::TopLevel, KeywordUsage::Statement]),
    info(KeywordId::Final, "final", KeywordCategory::Declaration, &[KeywordUsage::TopLevel, KeywordUsage::Statement]),
    info(
        KeywordId::Function,
        "function",
        KeywordCategory::Declaration,
        &[KeywordUsage::TopLevel, KeywordUsage::Statement, KeywordUsage::Expression],
    ),
    // Modifiers
    info(KeywordId::Public, "public", KeywordCategory::Modifier, &[KeywordUsage::Modifier]),
    info(KeywordId::Private, "private", KeywordCategory::Modifier, &[KeywordUsage::Modifier]),
    info(KeywordId::Static, "static", KeywordCategory::Modifier, &[KeywordUsage::Modifier]),
    info(KeywordId::Inline, "inline", KeywordCategory::Modifier, &[KeywordUsage::Modifier]),
    info(KeywordId::Override, "override", KeywordCategory::Modifier, &[KeywordUsage::Modifier]),
    info(KeywordId::Extern, "extern", KeywordCategory::Modifier, &[KeywordUsage::Modifier]),
    info(KeywordId::Dynamic, "dynamic", KeywordCategory::Modifier, &[KeywordUsage::Modifier]),
    info(KeywordId::Macro, "macro", KeywordCategory::Modifier, &[KeywordUsage::Modifier]),
    // Control flow
    info(KeywordId::If, "if", KeywordCategory::ControlFlow, &[KeywordUsage::Statement]),
    info(KeywordId::Else, "else", KeywordCategory::ControlFlow, &[KeywordUsage::Statement]),
    info(KeywordId::While, "while", KeywordCategory::ControlFlow, &[KeywordUsage::Statement]),
    info(KeywordId::Do, "do", KeywordCategory::ControlFlow, &[KeywordUsage::Statement]),
    info(KeywordId::For, "for", KeywordCategory::ControlFlow, &[KeywordUsage::Statement]),
    info(KeywordId::In, "in", KeywordCategory::ControlFlow, &[KeywordUsage::Expression]),
    info(
        KeywordId::Switch,
        "switch",
        KeywordCategory::ControlFlow,
        &[KeywordUsage::Statement, KeywordUsage::Expression],
    ),
    info(KeywordId::Case, "case", KeywordCategory::ControlFlow, &[KeywordUsage::Statement]),
    info(KeywordId::Default, "default", KeywordCategory::ControlFlow, &[KeywordUsage::Statement]),
    info(KeywordId::Break, "break", KeywordCategory::ControlFlow, &[KeywordUsage::Expression]),
    info(KeywordId::Continue, "continue", KeywordCategory::ControlFlow, &[KeywordUsage::Expression]),
    info(KeywordId::Return, "return", KeywordCategory::ControlFlow, &[KeywordUsage::Expression]),
    // Expressions
    info(KeywordId::New, "new", KeywordCategory::Expression, &[KeywordUsage::Expression]),
    info(KeywordId::This, "this", KeywordCategory::Expression, &[KeywordUsage::Expression]),
    info(KeywordId::Super, "super", KeywordCategory::Expression, &[KeywordUsage::Expression]),
    info(KeywordId::Cast, "cast", KeywordCategory::Expression, &[KeywordUsage::Expression]),
    info(KeywordId::Untyped, "untyped", KeywordCategory::Expression, &[KeywordUsage::Expression]),
    // Literals
    info(KeywordId::Null, "null", KeywordCategory::Literal, &[KeywordUsage::Expression]),
    info(KeywordId::True, "true", KeywordCategory::Literal, &[KeywordUsage::Expression]),
    info(KeywordId::False, "false", KeywordCategory::Literal, &[KeywordUsage::Expression]),
];

/// Return the canonical spelling for a keyword.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Return the category for a keyword.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Return the usage hints for a keyword.
pub fn usage(id: KeywordId) -> &'static [KeywordUsage] {
    info_for(id).usage
}

/// Return `true` if the keyword is an access/storage modifier (`public`, `static`, …).
pub fn is_modifier(id: KeywordId) -> bool {
    category(id) == KeywordCategory::Modifier
}

/// Return the full metadata entry for a keyword.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error; the guardrail tests cover
///   every variant).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    match KEYWORDS.iter().find(|k| k.id == id) {
        Some(info) => info,
        None => unreachable!("keyword info missing for {id:?}"),
    }
}

/// Lookup by spelling.
///
/// ## Returns
/// - `Some(KeywordId)` if the spelling is reserved.
/// - `None` otherwise.
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

// --- helpers -----------------------------------------------------------------

const fn info(
    id: KeywordId,
    canonical: &'static str,
    category: KeywordCategory,
    usage: &'static [KeywordUsage],
) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        category,
        usage,
    }
}
