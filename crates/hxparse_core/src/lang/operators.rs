//! Operator vocabulary and the precedence table.
//!
//! This module defines the canonical operator set along with the metadata the expression parser consults: precedence,
//! associativity and the fixities an operator may take. The table is fixed at compile time and never mutated; the
//! grammar engine climbs over it instead of encoding binding strength through nested call structure.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - Higher `precedence` binds tighter. Levels used by the grammar (high → low): `%` (12), `* /` (11), `+ -` (10),
//!   shifts (9), bitwise (8), `...` (7), comparison (6), `&&` (5), `||` (4), `??` (3), the ternary
//!   ([`TERNARY_PRECEDENCE`], 2) and finally assignment (1).
//! - Operators that begin with `>` and span several characters (`>=`, `>>`, `>>>`, `>>=`, `>>>=`) are never produced
//!   by the tokenizer. The parser composes them from adjacent `>` tokens so nested generic closers such as
//!   `Array<Array<Int>>` need no lexer feedback. Those entries have [`OperatorInfo::composed`] set.
//!
//! ## Examples
//! ```rust
//! use hxparse_core::lang::operators::{self, Associativity, OperatorId};
//!
//! assert_eq!(operators::from_str("+"), Some(OperatorId::Plus));
//! assert_eq!(operators::binary_info(OperatorId::Interval), Some((7, Associativity::Right)));
//! assert_eq!(operators::binary_info(OperatorId::Not), None);
//! ```

/// Define how operators associate when chained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
    None,
}

/// Define whether an operator is infix (binary), prefix or postfix (unary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixity {
    Infix,
    Prefix,
    Postfix,
}

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    // Shifts
    Shl,
    Shr,
    UShr,

    // Bitwise
    Amp,
    Pipe,
    Caret,

    // Range
    Interval,

    // Comparison
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    AndAnd,
    OrOr,
    QuestionQuestion,

    // Assignment
    Eq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    ShlEq,
    ShrEq,
    UShrEq,
    AmpEq,
    PipeEq,
    CaretEq,

    // Unary only
    Not,
    Tilde,
    Increment,
    Decrement,
}

/// Metadata for an operator.
///
/// ## Notes
/// - `precedence` only matters for operators that can be [`Fixity::Infix`]; unary entries carry `0`.
/// - `fixities` lists every position the operator may take (`-` is both infix and prefix, `++` is prefix and postfix).
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spelling: &'static str,
    pub precedence: u8,
    pub associativity: Associativity,
    pub fixities: &'static [Fixity],
    pub composed: bool,
}

/// Binding strength of the conditional operator `c ? a : b` (right-associative).
///
/// It sits between `??` and assignment, so `a ?? b ? c : d` groups the coalescing first and `x = c ? a : b` assigns
/// the whole conditional.
pub const TERNARY_PRECEDENCE: u8 = 2;

/// Precedence of assignment operators; the lowest binary level.
pub const ASSIGNMENT_PRECEDENCE: u8 = 1;

const INFIX: &[Fixity] = &[Fixity::Infix];
const INFIX_PREFIX: &[Fixity] = &[Fixity::Infix, Fixity::Prefix];
const PREFIX: &[Fixity] = &[Fixity::Prefix];
const PREFIX_POSTFIX: &[Fixity] = &[Fixity::Prefix, Fixity::Postfix];

/// Registry of all operators.
pub const OPERATORS: &[OperatorInfo] = &[
    // Arithmetic
    op(OperatorId::Percent, "%", 12, Associativity::Left, INFIX),
    op(OperatorId::Star, "*", 11, Associativity::Left, INFIX),
    op(OperatorId::Slash, "/", 11, Associativity::Left, INFIX),
    op(OperatorId::Plus, "+", 10, Associativity::Left, INFIX),
    op(OperatorId::Minus, "-", 10, Associativity::Left, INFIX_PREFIX),
    // Shifts
    op(OperatorId::Shl, "<<", 9, Associativity::Left, INFIX),
    composed(OperatorId::Shr, ">>", 9, Associativity::Left),
    composed(OperatorId::UShr, ">>>", 9, Associativity::Left),
    // Bitwise
    op(OperatorId::Amp, "&", 8, Associativity::Left, INFIX),
    op(OperatorId::Pipe, "|", 8, Associativity::Left, INFIX),
    op(OperatorId::Caret, "^", 8, Associativity::Left, INFIX),
    // Range
    op(OperatorId::Interval, "...", 7, Associativity::Right, INFIX),
    // Comparison
    op(OperatorId::EqEq, "==", 6, Associativity::Left, INFIX),
    op(OperatorId::NotEq, "!=", 6, Associativity::Left, INFIX),
    op(OperatorId::Lt, "<", 6, Associativity::Left, INFIX),
    op(OperatorId::LtEq, "<=", 6, Associativity::Left, INFIX),
    op(OperatorId::Gt, ">", 6, Associativity::Left, INFIX),
    composed(OperatorId::GtEq, ">=", 6, Associativity::Left),
    // Logical
    op(OperatorId::AndAnd, "&&", 5, Associativity::Left, INFIX),
    op(OperatorId::OrOr, "||", 4, Associativity::Left, INFIX),
    op(OperatorId::QuestionQuestion, "??", 3, Associativity::Right, INFIX),
    // Assignment
    op(OperatorId::Eq, "=", ASSIGNMENT_PRECEDENCE, Associativity::Right, INFIX),
    op(OperatorId::PlusEq, "+=", ASSIGNMENT_PRECEDENCE, Associativity::Right, INFIX),
    op(OperatorId::MinusEq, "-=", ASSIGNMENT_PRECEDENCE, Associativity::Right, INFIX),
    op(OperatorId::StarEq, "*=", ASSIGNMENT_PRECEDENCE, Associativity::Right, INFIX),
    op(OperatorId::SlashEq, "/=", ASSIGNMENT_PRECEDENCE, Associativity::Right, INFIX),
    op(OperatorId::PercentEq, "%=", ASSIGNMENT_PRECEDENCE, Associativity::Right, INFIX),
    op(OperatorId::ShlEq, "<<=", ASSIGNMENT_PRECEDENCE, Associativity::Right, INFIX),
    composed(OperatorId::ShrEq, ">>=", ASSIGNMENT_PRECEDENCE, Associativity::Right),
    composed(OperatorId::UShrEq, ">>>=", ASSIGNMENT_PRECEDENCE, Associativity::Right),
    op(OperatorId::AmpEq, "&=", ASSIGNMENT_PRECEDENCE, Associativity::Right, INFIX),
    op(OperatorId::PipeEq, "|=", ASSIGNMENT_PRECEDENCE, Associativity::Right, INFIX),
    op(OperatorId::CaretEq, "^=", ASSIGNMENT_PRECEDENCE, Associativity::Right, INFIX),
    // Unary only
    op(OperatorId::Not, "!", 0, Associativity::None, PREFIX),
    op(OperatorId::Tilde, "~", 0, Associativity::None, PREFIX),
    op(OperatorId::Increment, "++", 0, Associativity::None, PREFIX_POSTFIX),
    op(OperatorId::Decrement, "--", 0, Associativity::None, PREFIX_POSTFIX),
];

/// Return the canonical spelling for an operator.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).spelling
}

/// Return the full metadata entry for an operator.
///
/// ## Parameters
/// - `id`: Operator identifier.
///
/// ## Returns
/// - The associated [`OperatorInfo`] from [`OPERATORS`].
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    match OPERATORS.iter().find(|o| o.id == id) {
        Some(info) => info,
        None => unreachable!("operator info missing for {id:?}"),
    }
}

/// Return `(precedence, associativity)` for operators usable in infix position.
///
/// ## Returns
/// - `Some(..)` for binary operators.
/// - `None` for unary-only operators.
pub fn binary_info(id: OperatorId) -> Option<(u8, Associativity)> {
    let info = info_for(id);
    info.fixities
        .contains(&Fixity::Infix)
        .then_some((info.precedence, info.associativity))
}

/// Return `true` if the operator may appear in the given position.
pub fn has_fixity(id: OperatorId, fixity: Fixity) -> bool {
    info_for(id).fixities.contains(&fixity)
}

/// Return `true` for `=` and the compound assignment forms.
pub fn is_assignment(id: OperatorId) -> bool {
    binary_info(id).is_some_and(|(prec, _)| prec == ASSIGNMENT_PRECEDENCE)
}

/// Resolve an operator spelling to its identifier.
///
/// ## Parameters
/// - `spelling`: Candidate operator text.
///
/// ## Returns
/// - `Some(OperatorId)` if the spelling exists in [`OPERATORS`].
/// - `None` otherwise.
pub fn from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.spelling == spelling).map(|o| o.id)
}

// --- helpers -----------------------------------------------------------------

const fn op(
    id: OperatorId,
    spelling: &'static str,
    precedence: u8,
    associativity: Associativity,
    fixities: &'static [Fixity],
) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        precedence,
        associativity,
        fixities,
        composed: false,
    }
}

const fn composed(id: OperatorId, spelling: &'static str, precedence: u8, associativity: Associativity) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        precedence,
        associativity,
        fixities: INFIX,
        composed: true,
    }
}
