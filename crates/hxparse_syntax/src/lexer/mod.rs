//! Lexer for Haxe source.
//!
//! Handles tokenization including:
//! - Keywords, identifiers (split by case), numeric literals
//! - Operators and punctuation (multi-character `>` operators are left to the parser)
//! - Strings with escapes and `$ident` / `${expr}` interpolation
//! - Regex literals `~/pattern/flags`
//! - Trivia (whitespace, line and block comments) and preprocessor directives
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token, IdentCase)
//! - `strings` - String-mode scanning (text runs, escapes, interpolation markers)
//! - `numbers` - Numeric literal scanning
//!
//! ## Notes
//! - The token stream covers the input exactly: every byte belongs to exactly one token, trivia included.
//! - Lexing never fails. Problems produce an `Error` token (or a best-effort literal token) plus a `Lex` diagnostic.

mod numbers;
mod strings;
pub mod tokens;

pub use tokens::{IdentCase, Token, TokenKind, ident_case, keyword_id};

use crate::diagnostics::{Diagnostic, ErrorCode};
use crate::span::Span;
use hxparse_core::lang::directives;
use hxparse_core::lang::operators::OperatorId;
use hxparse_core::lang::punctuation::PunctuationId;

// ============================================================================
// LEXER STATE
// ----------------------------------------------------------------------------
// Mode stack (top decides how the next token is scanned):
//
// [Normal] --'"' or '\''--> [String] --"${"--> [Interpolation] --'}' at depth 0--> [String]
//                              |                    |
//                              +--closing quote-----+--'{' / '}' adjust depth
// ============================================================================

/// Scanning mode for the top of the mode stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Inside a string literal opened at `start`.
    String { quote: char, start: usize },
    /// Inside `${ ... }`; `depth` counts unclosed `{` opened within the expression.
    Interpolation { depth: usize },
}

/// Lexer for Haxe source code.
///
/// Implements [`Iterator`]; every `Lexer::new` starts a fresh scan. The final item is always an `Eof` token.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    modes: Vec<Mode>,
    /// Second token of a two-token scan (`$` + identifier, regex + flags).
    pending: Option<Token>,
    finished: bool,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            modes: Vec::new(),
            pending: None,
            finished: false,
            diagnostics: Vec::new(),
        }
    }

    /// Diagnostics reported so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consume the lexer, returning its diagnostics.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_next(&self) -> Option<char> {
        self.peek_at(1)
    }

    /// Look `n` characters ahead of the current position (`0` is the current character).
    fn peek_at(&self, n: usize) -> Option<char> {
        self.source[self.current_pos..].chars().nth(n)
    }

    fn advance(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.current_pos = pos + c.len_utf8();
            Some(c)
        } else {
            None
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.advance();
        }
    }

    fn error(&mut self, code: ErrorCode, span: Span, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::new(code, span, message));
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) -> Token {
        let start = self.current_pos;

        let Some(c) = self.advance() else {
            return Token::new(TokenKind::Eof, Span::empty(start));
        };

        let kind = match c {
            // Trivia
            ' ' | '\t' | '\r' | '\n' => {
                self.eat_while(|c| matches!(c, ' ' | '\t' | '\r' | '\n'));
                TokenKind::Whitespace
            }
            '/' => self.scan_slash(start),

            // Regex literal or bitwise not
            '~' => {
                if self.peek() == Some('/') {
                    return self.scan_regex(start);
                }
                TokenKind::Operator(OperatorId::Tilde)
            }

            '#' => self.scan_directive(start),

            // Strings
            '"' | '\'' => {
                self.modes.push(Mode::String { quote: c, start });
                TokenKind::StringStart
            }

            // Numbers
            '0'..='9' => self.scan_number(c),
            '.' if self.peek().is_some_and(|c| c.is_ascii_digit()) => self.scan_fraction(),

            // Operators and punctuation
            '.' => {
                if self.peek() == Some('.') && self.peek_next() == Some('.') {
                    self.advance();
                    self.advance();
                    TokenKind::Operator(OperatorId::Interval)
                } else {
                    TokenKind::Punctuation(PunctuationId::Dot)
                }
            }
            '+' => self.operator(OperatorId::Plus, &[('+', OperatorId::Increment), ('=', OperatorId::PlusEq)]),
            '-' => {
                if self.match_char('>') {
                    TokenKind::Punctuation(PunctuationId::Arrow)
                } else {
                    self.operator(OperatorId::Minus, &[('-', OperatorId::Decrement), ('=', OperatorId::MinusEq)])
                }
            }
            '*' => self.operator(OperatorId::Star, &[('=', OperatorId::StarEq)]),
            '%' => self.operator(OperatorId::Percent, &[('=', OperatorId::PercentEq)]),
            '^' => self.operator(OperatorId::Caret, &[('=', OperatorId::CaretEq)]),
            '&' => self.operator(OperatorId::Amp, &[('&', OperatorId::AndAnd), ('=', OperatorId::AmpEq)]),
            '|' => self.operator(OperatorId::Pipe, &[('|', OperatorId::OrOr), ('=', OperatorId::PipeEq)]),
            '!' => self.operator(OperatorId::Not, &[('=', OperatorId::NotEq)]),
            '=' => {
                if self.match_char('>') {
                    TokenKind::Punctuation(PunctuationId::FatArrow)
                } else {
                    self.operator(OperatorId::Eq, &[('=', OperatorId::EqEq)])
                }
            }
            '<' => {
                if self.match_char('<') {
                    self.operator(OperatorId::Shl, &[('=', OperatorId::ShlEq)])
                } else {
                    self.operator(OperatorId::Lt, &[('=', OperatorId::LtEq)])
                }
            }
            // Always a single `>`: the parser composes `>=`, `>>`, `>>>`, ... from adjacent tokens.
            '>' => TokenKind::Operator(OperatorId::Gt),
            '?' => {
                if self.match_char('?') {
                    TokenKind::Operator(OperatorId::QuestionQuestion)
                } else if self.peek() == Some('.') && !self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
                    self.advance();
                    TokenKind::Punctuation(PunctuationId::QuestionDot)
                } else {
                    TokenKind::Punctuation(PunctuationId::Question)
                }
            }
            ',' => TokenKind::Punctuation(PunctuationId::Comma),
            ';' => TokenKind::Punctuation(PunctuationId::Semicolon),
            ':' => TokenKind::Punctuation(PunctuationId::Colon),
            '@' => TokenKind::Punctuation(PunctuationId::At),
            '$' => TokenKind::Punctuation(PunctuationId::Dollar),
            '(' => TokenKind::Punctuation(PunctuationId::LParen),
            ')' => TokenKind::Punctuation(PunctuationId::RParen),
            '[' => TokenKind::Punctuation(PunctuationId::LBracket),
            ']' => TokenKind::Punctuation(PunctuationId::RBracket),
            '{' => {
                if let Some(Mode::Interpolation { depth }) = self.modes.last_mut() {
                    *depth += 1;
                }
                TokenKind::Punctuation(PunctuationId::LBrace)
            }
            '}' => self.close_brace(),

            // Identifiers and keywords
            _ if is_ident_start(c) => self.scan_identifier(start),

            _ => {
                self.error(
                    ErrorCode::UnexpectedCharacter,
                    Span::new(start, self.current_pos),
                    format!("unexpected character `{c}`"),
                );
                TokenKind::Error
            }
        };

        Token::new(kind, Span::new(start, self.current_pos))
    }

    // ========================================================================
    // Operator helpers
    // ========================================================================

    /// Try to match a compound operator, fall back to the simple one.
    fn operator(&mut self, simple: OperatorId, compounds: &[(char, OperatorId)]) -> TokenKind {
        for (c, id) in compounds {
            if self.match_char(*c) {
                return TokenKind::Operator(*id);
            }
        }
        TokenKind::Operator(simple)
    }

    /// `}` either closes an interpolation (`${ ... }` at depth 0) or is an ordinary brace.
    fn close_brace(&mut self) -> TokenKind {
        match self.modes.last_mut() {
            Some(Mode::Interpolation { depth: 0 }) => {
                self.modes.pop();
                TokenKind::InterpClose
            }
            Some(Mode::Interpolation { depth }) => {
                *depth -= 1;
                TokenKind::Punctuation(PunctuationId::RBrace)
            }
            _ => TokenKind::Punctuation(PunctuationId::RBrace),
        }
    }

    /// Scan `/`, `/=`, `// comment` and `/* comment */`.
    fn scan_slash(&mut self, start: usize) -> TokenKind {
        if self.match_char('/') {
            self.eat_while(|c| c != '\n');
            TokenKind::LineComment
        } else if self.match_char('*') {
            loop {
                match self.advance() {
                    Some('*') if self.match_char('/') => break,
                    Some(_) => {}
                    None => {
                        self.error(
                            ErrorCode::UnterminatedComment,
                            Span::new(start, self.current_pos),
                            "unterminated block comment",
                        );
                        break;
                    }
                }
            }
            TokenKind::BlockComment
        } else if self.match_char('=') {
            TokenKind::Operator(OperatorId::SlashEq)
        } else {
            TokenKind::Operator(OperatorId::Slash)
        }
    }

    /// Scan `~/pattern/flags`. Called after consuming `~`.
    ///
    /// A newline or end of input before the closing `/` ends the token at the end of the line.
    fn scan_regex(&mut self, start: usize) -> Token {
        self.advance(); // opening '/'
        loop {
            match self.peek() {
                None | Some('\n') => {
                    self.error(
                        ErrorCode::UnterminatedRegex,
                        Span::new(start, self.current_pos),
                        "unterminated regex literal",
                    );
                    return Token::new(TokenKind::Regex, Span::new(start, self.current_pos));
                }
                Some('\\') => {
                    self.advance();
                    if !matches!(self.peek(), None | Some('\n')) {
                        self.advance();
                    }
                }
                Some('/') => {
                    self.advance();
                    break;
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
        let regex = Token::new(TokenKind::Regex, Span::new(start, self.current_pos));

        let flags_start = self.current_pos;
        self.eat_while(|c| matches!(c, 'g' | 'i' | 'm' | 's' | 'u'));
        if self.current_pos > flags_start {
            self.pending = Some(Token::new(
                TokenKind::RegexFlags,
                Span::new(flags_start, self.current_pos),
            ));
        }
        regex
    }

    /// Scan `#if`, `#elseif`, `#else`, `#end`. Called after consuming `#`.
    fn scan_directive(&mut self, start: usize) -> TokenKind {
        self.eat_while(is_ident_continue);
        let spelling = &self.source[start..self.current_pos];
        if let Some(id) = directives::from_str(spelling) {
            return TokenKind::Directive(id);
        }
        let span = Span::new(start, self.current_pos);
        if spelling.len() == 1 {
            self.error(ErrorCode::UnexpectedCharacter, span, "unexpected character `#`");
        } else {
            self.error(
                ErrorCode::UnknownDirective,
                span,
                format!("unknown preprocessor directive `{spelling}`"),
            );
        }
        TokenKind::Error
    }

    // ========================================================================
    // Identifier scanning
    // ========================================================================

    fn scan_identifier(&mut self, start: usize) -> TokenKind {
        self.eat_while(is_ident_continue);
        let spelling = &self.source[start..self.current_pos];

        // Look up identifier spelling in the reserved-word registry.
        match keyword_id(spelling) {
            Some(id) => TokenKind::Keyword(id),
            None => TokenKind::Ident(ident_case(spelling)),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if let Some(token) = self.pending.take() {
            return Some(token);
        }
        if self.finished {
            return None;
        }
        if self.is_at_end() {
            self.finish_modes();
            self.finished = true;
            return Some(Token::new(TokenKind::Eof, Span::empty(self.current_pos)));
        }
        let token = match self.modes.last().copied() {
            Some(Mode::String { quote, .. }) => self.scan_string_part(quote),
            _ => self.scan_token(),
        };
        Some(token)
    }
}

impl Lexer<'_> {
    /// Report every string still open at end of input.
    fn finish_modes(&mut self) {
        while let Some(mode) = self.modes.pop() {
            if let Mode::String { start, .. } = mode {
                self.error(
                    ErrorCode::UnterminatedString,
                    Span::new(start, self.current_pos),
                    "unterminated string literal",
                );
            }
        }
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Check if a character can start an identifier (ASCII-only).
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Check if a character can continue an identifier (ASCII-only).
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Tokens and lexical diagnostics for a whole buffer.
#[derive(Debug, Clone)]
pub struct LexOutput {
    /// Every token including trivia; the last one is `Eof`.
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Convenience function to lex a source string eagerly.
///
/// This is a shorthand for draining `Lexer::new(source)`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> LexOutput {
    let mut lexer = Lexer::new(source);
    let tokens: Vec<Token> = lexer.by_ref().collect();
    tracing::trace!(token_count = tokens.len(), "lexed");
    LexOutput {
        tokens,
        diagnostics: lexer.into_diagnostics(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use hxparse_core::lang::directives::DirectiveId;
    use hxparse_core::lang::keywords::KeywordId;

    /// Lex and drop trivia and the trailing EOF.
    fn significant(source: &str) -> Vec<TokenKind> {
        lex(source)
            .tokens
            .into_iter()
            .map(|t| t.kind)
            .filter(|k| !k.is_trivia() && *k != TokenKind::Eof)
            .collect()
    }

    fn texts(source: &str) -> Vec<&str> {
        lex(source)
            .tokens
            .iter()
            .filter(|t| !t.kind.is_trivia() && t.kind != TokenKind::Eof)
            .map(|t| t.text(source))
            .collect()
    }

    #[test]
    fn test_punctuation_registry_parity() {
        use hxparse_core::lang::punctuation;

        for p in punctuation::PUNCTUATION {
            let out = lex(p.canonical);
            assert!(out.diagnostics.is_empty(), "lex({:?}) reported {:?}", p.canonical, out.diagnostics);
            assert_eq!(out.tokens.len(), 2, "expected token + EOF for {:?}, got {:?}", p.canonical, out.tokens);
            assert!(
                out.tokens[0].kind.is_punctuation(p.id),
                "{:?} lexed as {:?}",
                p.canonical,
                out.tokens[0].kind
            );
        }
    }

    #[test]
    fn test_keyword_registry_parity() {
        use hxparse_core::lang::keywords;

        for k in keywords::KEYWORDS {
            let out = lex(k.canonical);
            assert_eq!(out.tokens.len(), 2, "expected token + EOF for keyword {:?}", k.id);
            assert!(matches!(out.tokens.last().map(|t| t.kind), Some(TokenKind::Eof)));
            assert!(out.tokens[0].kind.is_keyword(k.id));
        }
    }

    #[test]
    fn test_operator_registry_parity() {
        use hxparse_core::lang::operators;

        for o in operators::OPERATORS {
            let kinds = significant(o.spelling);
            if o.composed {
                // `>`-led operators arrive as a run of single-character tokens.
                assert!(kinds.len() > 1, "{:?} should not be a single token", o.spelling);
                assert!(kinds[0].is_operator(OperatorId::Gt));
            } else {
                assert_eq!(kinds.len(), 1, "expected single token for {:?}, got {:?}", o.spelling, kinds);
                assert!(kinds[0].is_operator(o.id), "{:?} lexed as {:?}", o.spelling, kinds[0]);
            }
        }
    }

    #[test]
    fn test_directive_registry_parity() {
        for d in directives::DIRECTIVES {
            assert_eq!(significant(d.canonical), vec![TokenKind::Directive(d.id)]);
        }
    }

    #[test]
    fn test_tokens_cover_input_exactly() {
        let source = "class Foo {\n  // hi\n  var x:Int = 0x1F; /* c */ var s = 'a$b${c}';\n}\n";
        let out = lex(source);
        let mut rebuilt = String::new();
        let mut pos = 0;
        for t in &out.tokens {
            assert_eq!(t.span.start, pos, "gap or overlap before {t:?}");
            rebuilt.push_str(t.text(source));
            pos = t.span.end;
        }
        assert_eq!(rebuilt, source);
        assert!(out.diagnostics.is_empty());
    }

    #[test]
    fn test_identifier_case_split() {
        assert_eq!(
            significant("foo Bar _baz"),
            vec![
                TokenKind::Ident(IdentCase::Lower),
                TokenKind::Ident(IdentCase::Upper),
                TokenKind::Ident(IdentCase::Lower),
            ]
        );
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert_eq!(
            significant("class Class"),
            vec![TokenKind::Keyword(KeywordId::Class), TokenKind::Ident(IdentCase::Upper)]
        );
    }

    #[test]
    fn test_gt_is_never_combined() {
        assert_eq!(texts("a >>>= b >= c"), vec!["a", ">", ">", ">", "=", "b", ">", "=", "c"]);
    }

    #[test]
    fn test_arrows_and_question_forms() {
        let kinds = significant("-> => ?. ?? ?");
        assert!(kinds[0].is_punctuation(PunctuationId::Arrow));
        assert!(kinds[1].is_punctuation(PunctuationId::FatArrow));
        assert!(kinds[2].is_punctuation(PunctuationId::QuestionDot));
        assert!(kinds[3].is_operator(OperatorId::QuestionQuestion));
        assert!(kinds[4].is_punctuation(PunctuationId::Question));
    }

    #[test]
    fn test_directives_shadow_keywords_only_after_hash() {
        assert_eq!(
            significant("#if if #else else #end"),
            vec![
                TokenKind::Directive(DirectiveId::If),
                TokenKind::Keyword(KeywordId::If),
                TokenKind::Directive(DirectiveId::Else),
                TokenKind::Keyword(KeywordId::Else),
                TokenKind::Directive(DirectiveId::End),
            ]
        );
    }

    #[test]
    fn test_unknown_directive() {
        let out = lex("#pragma x");
        assert_eq!(out.tokens[0].kind, TokenKind::Error);
        assert_eq!(out.tokens[0].span, Span::new(0, 7));
        assert_eq!(out.diagnostics.len(), 1);
        assert_eq!(out.diagnostics[0].code, ErrorCode::UnknownDirective);
    }

    #[test]
    fn test_unexpected_character() {
        let out = lex("a ` b");
        assert_eq!(out.tokens[2].kind, TokenKind::Error);
        assert_eq!(out.diagnostics.len(), 1);
        assert_eq!(out.diagnostics[0].code, ErrorCode::UnexpectedCharacter);
        assert_eq!(out.diagnostics[0].span, Span::new(2, 3));
    }

    #[test]
    fn test_non_ascii_character_is_single_error_token() {
        let source = "π";
        let out = lex(source);
        assert_eq!(out.tokens[0].kind, TokenKind::Error);
        assert_eq!(out.tokens[0].text(source), "π");
    }

    #[test]
    fn test_comments_are_trivia() {
        let out = lex("a // line\n/* block */b");
        let kinds: Vec<_> = out.tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Ident(IdentCase::Lower),
                TokenKind::Whitespace,
                TokenKind::LineComment,
                TokenKind::Whitespace,
                TokenKind::BlockComment,
                TokenKind::Ident(IdentCase::Lower),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_block_comments_do_not_nest() {
        assert_eq!(texts("/* a /* b */ c */"), vec!["c", "*", "/"]);
    }

    #[test]
    fn test_unterminated_block_comment() {
        let out = lex("x /* never closed");
        assert_eq!(out.tokens[2].kind, TokenKind::BlockComment);
        assert_eq!(out.tokens[2].span.end, 17);
        assert_eq!(out.diagnostics[0].code, ErrorCode::UnterminatedComment);
    }

    #[test]
    fn test_regex_with_flags() {
        let source = r"~/a\/b/gi;";
        let out = lex(source);
        assert_eq!(out.tokens[0].kind, TokenKind::Regex);
        assert_eq!(out.tokens[0].text(source), r"~/a\/b/");
        assert_eq!(out.tokens[1].kind, TokenKind::RegexFlags);
        assert_eq!(out.tokens[1].text(source), "gi");
        assert!(out.tokens[2].kind.is_punctuation(PunctuationId::Semicolon));
    }

    #[test]
    fn test_unterminated_regex_stops_at_end_of_line() {
        let source = "~/abc\nnext";
        let out = lex(source);
        assert_eq!(out.tokens[0].kind, TokenKind::Regex);
        assert_eq!(out.tokens[0].text(source), "~/abc");
        assert_eq!(out.diagnostics.len(), 1);
        assert_eq!(out.diagnostics[0].code, ErrorCode::UnterminatedRegex);
        assert_eq!(texts(source).last(), Some(&"next"));
    }

    #[test]
    fn test_tilde_without_slash_is_operator() {
        assert!(significant("~x")[0].is_operator(OperatorId::Tilde));
    }

    #[test]
    fn test_range_is_not_float() {
        assert_eq!(
            significant("1...5"),
            vec![TokenKind::Int, TokenKind::Operator(OperatorId::Interval), TokenKind::Int]
        );
    }

    #[test]
    fn test_lexer_is_restartable() {
        let first: Vec<_> = Lexer::new("a + b").collect();
        let second: Vec<_> = Lexer::new("a + b").collect();
        assert_eq!(first, second);
        assert_eq!(first.last().map(|t| t.kind), Some(TokenKind::Eof));
    }
}
