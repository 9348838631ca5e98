//! Numeric literal scanning.
//!
//! Supports decimal integers, hex integers (`0x1F`), floats with fraction and/or exponent, and `_` digit
//! separators. A `.` is only taken as a decimal point when it is not the start of `...` and not followed by an
//! identifier (so `1...5` and `1.foo` lex as expected).

use super::{Lexer, TokenKind, is_ident_start};

impl Lexer<'_> {
    /// Scan a number whose first digit `first` has already been consumed.
    pub(super) fn scan_number(&mut self, first: char) -> TokenKind {
        if first == '0'
            && matches!(self.peek(), Some('x' | 'X'))
            && self.peek_next().is_some_and(|c| c.is_ascii_hexdigit())
        {
            self.advance(); // x
            self.eat_while(|c| c.is_ascii_hexdigit() || c == '_');
            return TokenKind::Int;
        }

        self.eat_while(is_digit_or_separator);

        let mut is_float = false;
        if self.peek() == Some('.') {
            let after = self.peek_next();
            let is_range = after == Some('.');
            let is_member = after.is_some_and(is_ident_start);
            if !is_range && !is_member {
                self.advance(); // .
                self.eat_while(is_digit_or_separator);
                is_float = true;
            }
        }

        if self.scan_exponent() {
            is_float = true;
        }

        if is_float { TokenKind::Float } else { TokenKind::Int }
    }

    /// Scan the digits after a leading `.` (`.5`, `.25e3`). The `.` has already been consumed.
    pub(super) fn scan_fraction(&mut self) -> TokenKind {
        self.eat_while(is_digit_or_separator);
        self.scan_exponent();
        TokenKind::Float
    }

    /// Consume `e[+-]digits` if present. Returns `true` when an exponent was taken.
    fn scan_exponent(&mut self) -> bool {
        if !matches!(self.peek(), Some('e' | 'E')) {
            return false;
        }
        let has_digits = match self.peek_next() {
            Some('+' | '-') => self.peek_at(2).is_some_and(|c| c.is_ascii_digit()),
            Some(c) => c.is_ascii_digit(),
            None => false,
        };
        if !has_digits {
            return false;
        }
        self.advance(); // e
        if matches!(self.peek(), Some('+' | '-')) {
            self.advance();
        }
        self.eat_while(is_digit_or_separator);
        true
    }
}

fn is_digit_or_separator(c: char) -> bool {
    c.is_ascii_digit() || c == '_'
}

#[cfg(test)]
mod tests {
    use crate::lexer::{TokenKind, lex};

    fn single(source: &str) -> (TokenKind, &str) {
        let out = lex(source);
        assert!(out.diagnostics.is_empty());
        let token = out.tokens[0];
        (token.kind, token.text(source))
    }

    #[test]
    fn test_integers() {
        assert_eq!(single("42"), (TokenKind::Int, "42"));
        assert_eq!(single("1_000_000"), (TokenKind::Int, "1_000_000"));
        assert_eq!(single("0xFF_FF"), (TokenKind::Int, "0xFF_FF"));
    }

    #[test]
    fn test_floats() {
        assert_eq!(single("3.14"), (TokenKind::Float, "3.14"));
        assert_eq!(single(".5"), (TokenKind::Float, ".5"));
        assert_eq!(single("1e10"), (TokenKind::Float, "1e10"));
        assert_eq!(single("2.5E-3"), (TokenKind::Float, "2.5E-3"));
        assert_eq!(single("1."), (TokenKind::Float, "1."));
    }

    #[test]
    fn test_dot_followed_by_identifier_is_member_access() {
        let source = "1.foo";
        let out = lex(source);
        assert_eq!(out.tokens[0].kind, TokenKind::Int);
        assert_eq!(out.tokens[0].text(source), "1");
    }

    #[test]
    fn test_exponent_requires_digits() {
        let source = "1e";
        let out = lex(source);
        assert_eq!(out.tokens[0].kind, TokenKind::Int);
        assert_eq!(out.tokens[0].text(source), "1");
        assert!(out.tokens[1].kind.is_ident());
    }

    #[test]
    fn test_bare_hex_prefix_is_not_hex() {
        let source = "0x";
        let out = lex(source);
        assert_eq!(out.tokens[0].text(source), "0");
        assert!(out.tokens[1].kind.is_ident());
    }
}
