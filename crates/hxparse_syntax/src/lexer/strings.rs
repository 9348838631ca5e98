//! String-mode scanning.
//!
//! Inside a string the lexer emits a sequence of parts instead of one literal token:
//!
//! ```text
//! 'a $name and ${x + 1}\n'
//!  ^ StringStart
//!   ^^ StringText
//!     ^ Dollar  ^^^^ Ident
//!              ^^^^^ StringText
//!                   ^^ InterpOpen ... normal tokens ... ^ InterpClose
//!                                                        ^^ StringEscape
//!                                                          ^ StringEnd
//! ```
//!
//! Both quote styles interpolate. `$$` is literal text; a `$` not followed by `{`, `$` or an identifier is
//! literal text as well.

use super::{Lexer, Mode, Token, TokenKind, is_ident_continue, is_ident_start};
use crate::span::Span;
use hxparse_core::lang::punctuation::PunctuationId;

impl Lexer<'_> {
    /// Scan the next part of the string closed by `quote`. Never called at end of input.
    pub(super) fn scan_string_part(&mut self, quote: char) -> Token {
        let start = self.current_pos;

        let kind = match self.peek() {
            Some(c) if c == quote => {
                self.advance();
                self.modes.pop();
                TokenKind::StringEnd
            }
            Some('\\') => {
                self.advance();
                self.scan_escape();
                TokenKind::StringEscape
            }
            Some('$') if self.peek_next() == Some('{') => {
                self.advance();
                self.advance();
                self.modes.push(Mode::Interpolation { depth: 0 });
                TokenKind::InterpOpen
            }
            Some('$') if self.peek_next().is_some_and(is_ident_start) => {
                self.advance();
                let ident_start = self.current_pos;
                self.eat_while(is_ident_continue);
                let name = &self.source[ident_start..self.current_pos];
                self.pending = Some(Token::new(
                    TokenKind::Ident(super::ident_case(name)),
                    Span::new(ident_start, self.current_pos),
                ));
                TokenKind::Punctuation(PunctuationId::Dollar)
            }
            _ => {
                self.scan_text_run(quote);
                TokenKind::StringText
            }
        };

        Token::new(kind, Span::new(start, self.current_pos))
    }

    /// Consume literal characters up to the next quote, escape, or interpolation marker.
    fn scan_text_run(&mut self, quote: char) {
        loop {
            match self.peek() {
                None => break,
                Some(c) if c == quote || c == '\\' => break,
                Some('$') => match self.peek_next() {
                    Some('$') => {
                        self.advance();
                        self.advance();
                    }
                    Some('{') => break,
                    Some(c) if is_ident_start(c) => break,
                    _ => {
                        self.advance();
                    }
                },
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    /// Consume the body of an escape sequence. The backslash has already been consumed.
    ///
    /// `\xHH`, `\uHHHH`, `\u{H...}`, octal `\NNN` and single-character escapes. Malformed escapes take what is
    /// there; validating escape values is left to later phases.
    fn scan_escape(&mut self) {
        match self.advance() {
            Some('x') => self.eat_up_to(2, |c| c.is_ascii_hexdigit()),
            Some('u') => {
                if self.match_char('{') {
                    self.eat_while(|c| c.is_ascii_hexdigit());
                    self.match_char('}');
                } else {
                    self.eat_up_to(4, |c| c.is_ascii_hexdigit());
                }
            }
            Some('0'..='7') => self.eat_up_to(2, |c| matches!(c, '0'..='7')),
            _ => {}
        }
    }

    fn eat_up_to(&mut self, max: usize, pred: impl Fn(char) -> bool) {
        for _ in 0..max {
            match self.peek() {
                Some(c) if pred(c) => {
                    self.advance();
                }
                _ => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::diagnostics::ErrorCode;
    use crate::lexer::{Lexer, Mode, TokenKind, lex};
    use hxparse_core::lang::punctuation::PunctuationId;
    use hxparse_core::lang::operators::OperatorId;

    fn parts(source: &str) -> Vec<(TokenKind, &str)> {
        lex(source)
            .tokens
            .iter()
            .filter(|t| t.kind != TokenKind::Eof)
            .map(|t| (t.kind, t.text(source)))
            .collect()
    }

    #[test]
    fn test_plain_string() {
        assert_eq!(
            parts("\"hello\""),
            vec![
                (TokenKind::StringStart, "\""),
                (TokenKind::StringText, "hello"),
                (TokenKind::StringEnd, "\""),
            ]
        );
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(
            parts("''"),
            vec![(TokenKind::StringStart, "'"), (TokenKind::StringEnd, "'")]
        );
    }

    #[test]
    fn test_other_quote_is_text() {
        assert_eq!(parts("'it\"s'")[1], (TokenKind::StringText, "it\"s"));
    }

    #[test]
    fn test_escapes() {
        let p = parts(r#""a\n\x41\u{1F600}\101\"""#);
        let escapes: Vec<&str> = p
            .iter()
            .filter(|(k, _)| *k == TokenKind::StringEscape)
            .map(|(_, t)| *t)
            .collect();
        assert_eq!(escapes, vec![r"\n", r"\x41", r"\u{1F600}", r"\101", r#"\""#]);
        assert_eq!(p.last().map(|(k, _)| *k), Some(TokenKind::StringEnd));
    }

    #[test]
    fn test_dollar_identifier() {
        assert_eq!(
            parts("'hi $name!'"),
            vec![
                (TokenKind::StringStart, "'"),
                (TokenKind::StringText, "hi "),
                (TokenKind::Punctuation(PunctuationId::Dollar), "$"),
                (TokenKind::Ident(crate::lexer::IdentCase::Lower), "name"),
                (TokenKind::StringText, "!"),
                (TokenKind::StringEnd, "'"),
            ]
        );
    }

    #[test]
    fn test_double_dollar_is_text() {
        assert_eq!(
            parts("'$$x $ 1'"),
            vec![
                (TokenKind::StringStart, "'"),
                (TokenKind::StringText, "$$x $ 1"),
                (TokenKind::StringEnd, "'"),
            ]
        );
    }

    #[test]
    fn test_interpolation_with_nested_braces_and_strings() {
        let p = parts("\"${ {a:1}.a + \"b\" }\"");
        let kinds: Vec<TokenKind> = p.iter().map(|(k, _)| *k).filter(|k| !k.is_trivia()).collect();
        assert_eq!(kinds[0], TokenKind::StringStart);
        assert_eq!(kinds[1], TokenKind::InterpOpen);
        assert!(kinds[2].is_punctuation(PunctuationId::LBrace));
        assert!(kinds.iter().any(|k| k.is_operator(OperatorId::Plus)));
        let close = kinds.iter().position(|k| *k == TokenKind::InterpClose);
        assert_eq!(close, Some(kinds.len() - 2));
        assert_eq!(kinds.last(), Some(&TokenKind::StringEnd));
        // Inner string is a complete start/text/end triple.
        assert_eq!(kinds.iter().filter(|k| **k == TokenKind::StringStart).count(), 2);
    }

    #[test]
    fn test_unterminated_string_runs_to_end() {
        let source = "var s = \"abc\n";
        let out = lex(source);
        assert_eq!(out.diagnostics.len(), 1);
        assert_eq!(out.diagnostics[0].code, ErrorCode::UnterminatedString);
        assert_eq!(out.diagnostics[0].span.start, 8);
        assert_eq!(out.diagnostics[0].span.end, source.len());
        let text = out.tokens.iter().find(|t| t.kind == TokenKind::StringText);
        assert_eq!(text.map(|t| t.text(source)), Some("abc\n"));
    }

    #[test]
    fn test_unterminated_interpolation() {
        let mut lexer = Lexer::new("'${x");
        let kinds: Vec<TokenKind> = lexer.by_ref().take(3).map(|t| t.kind).collect();
        assert_eq!(kinds[1], TokenKind::InterpOpen);
        assert!(matches!(lexer.modes.last(), Some(Mode::Interpolation { depth: 0 })));
        let rest: Vec<TokenKind> = lexer.by_ref().map(|t| t.kind).collect();
        assert_eq!(rest, vec![TokenKind::Eof]);
        assert_eq!(lexer.diagnostics().len(), 1);
        assert_eq!(lexer.diagnostics()[0].code, ErrorCode::UnterminatedString);
    }
}
