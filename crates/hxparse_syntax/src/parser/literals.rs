/// Primary expression parsing methods.
///
/// This chunk implements the operands of operator expressions:
/// - Literals (numbers, strings with interpolation, regexes, booleans, `null`)
/// - Array / map / object literals, and the object-vs-block decision for `{`
/// - `new`, anonymous functions, `if` expressions, `cast(e, T)`, parenthesized and type-check expressions
/// - Macro reification (`$e{...}`, `$name`) and `$type(e)`
///
/// ## Notes
/// - `{` in expression position is an object literal when followed by `}` or by `key :`; otherwise it is a block.
/// - An array literal whose first element is followed by `=>` becomes a map literal; the open brace context is
///   retagged so later closers are validated against the right construct.
impl<'a> Parser<'a> {
    fn primary_expression(&mut self) -> PResult<SyntaxKind> {
        match self.peek_kind() {
            TokenKind::Int => Ok(self.token_node(SyntaxKind::IntegerLiteral)),
            TokenKind::Float => Ok(self.token_node(SyntaxKind::FloatLiteral)),
            TokenKind::Regex => Ok(self.regex_literal()),
            TokenKind::StringStart => self.string_literal(),
            TokenKind::Ident(_) => Ok(self.token_node(SyntaxKind::Identifier)),
            TokenKind::Keyword(id) => match id {
                KeywordId::True | KeywordId::False => Ok(self.token_node(SyntaxKind::BoolLiteral)),
                KeywordId::Null => Ok(self.token_node(SyntaxKind::NullLiteral)),
                KeywordId::This => Ok(self.token_node(SyntaxKind::ThisExpression)),
                KeywordId::Super => Ok(self.token_node(SyntaxKind::SuperExpression)),
                KeywordId::New => self.new_expression(),
                KeywordId::Function => self.function_expression(),
                KeywordId::If => self.if_expression(),
                KeywordId::Cast => self.cast_call(),
                _ => Err(self.expected("expression")),
            },
            TokenKind::Punctuation(id) => match id {
                PunctuationId::LParen => self.parenthesized_expression(),
                PunctuationId::LBracket => self.array_or_map_literal(),
                PunctuationId::LBrace => self.object_or_block(),
                PunctuationId::Dollar => self.dollar_expression(),
                PunctuationId::RParen | PunctuationId::RBracket | PunctuationId::RBrace => Err(self.unexpected()),
                _ => Err(self.expected("expression")),
            },
            _ => Err(self.expected("expression")),
        }
    }

    // ========================================================================
    // Literals
    // ========================================================================

    fn regex_literal(&mut self) -> SyntaxKind {
        self.start(SyntaxKind::RegexLiteral);
        self.bump();
        if self.peek_kind() == TokenKind::RegexFlags {
            self.bump();
        }
        self.finish();
        SyntaxKind::RegexLiteral
    }

    /// Quote, text and escape runs, interpolations, closing quote.
    ///
    /// An unterminated string simply stops at end of input; the lexer has already reported it.
    fn string_literal(&mut self) -> PResult<SyntaxKind> {
        self.start(SyntaxKind::StringLiteral);
        self.bump(); // opening quote
        loop {
            match self.peek_kind() {
                TokenKind::StringText | TokenKind::StringEscape => self.bump(),
                TokenKind::Punctuation(PunctuationId::Dollar) => {
                    self.start(SyntaxKind::Interpolation);
                    self.bump();
                    if self.peek_kind().is_ident() {
                        self.field(FieldName::Expression);
                        self.token_node(SyntaxKind::Identifier);
                    }
                    self.finish();
                }
                TokenKind::InterpOpen => {
                    self.start(SyntaxKind::Interpolation);
                    self.bump();
                    self.field(FieldName::Expression);
                    self.expression()?;
                    match self.peek_kind() {
                        TokenKind::InterpClose => self.bump(),
                        TokenKind::Eof => {}
                        _ => return Err(self.expected("`}` closing the interpolation")),
                    }
                    self.finish();
                }
                TokenKind::StringEnd => {
                    self.bump();
                    break;
                }
                _ => break,
            }
        }
        self.finish();
        Ok(SyntaxKind::StringLiteral)
    }

    /// `[a, b]` or `[k => v, ...]`
    fn array_or_map_literal(&mut self) -> PResult<SyntaxKind> {
        let cp = self.checkpoint();
        let opener = self.current_span();
        self.bump(); // [
        self.scan.open(BraceContext::ArrayLiteral, opener);
        let mut kind = SyntaxKind::ArrayLiteral;
        let mut first = true;
        while !self.check_punct(PunctuationId::RBracket) && !self.is_at_end() {
            let element = self.checkpoint();
            self.expression()?;
            if first && self.check_punct(PunctuationId::FatArrow) {
                kind = SyntaxKind::MapLiteral;
                self.scan.retag(BraceContext::ArrayLiteral, BraceContext::MapLiteral);
            }
            first = false;
            if kind == SyntaxKind::MapLiteral {
                self.start_at(element, SyntaxKind::Pair, Some(FieldName::Key));
                self.expect_punct(PunctuationId::FatArrow, "`=>`")?;
                self.field(FieldName::Value);
                self.expression()?;
                self.finish();
            }
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        let ctx = match kind {
            SyntaxKind::MapLiteral => BraceContext::MapLiteral,
            _ => BraceContext::ArrayLiteral,
        };
        self.expect_closing(PunctuationId::RBracket, Some(ctx), opener, "`]`")?;
        self.start_at(cp, kind, None);
        self.finish();
        Ok(kind)
    }

    fn object_or_block(&mut self) -> PResult<SyntaxKind> {
        if self.object_literal_ahead() {
            self.object_literal()
        } else {
            self.block()?;
            Ok(SyntaxKind::Block)
        }
    }

    /// Return `true` if the `{` at the current position opens an object literal: `{}` or `{ key :`.
    fn object_literal_ahead(&self) -> bool {
        match self.nth_kind(1) {
            TokenKind::Punctuation(PunctuationId::RBrace) => true,
            TokenKind::Ident(_) => self.nth_kind(2).is_punctuation(PunctuationId::Colon),
            TokenKind::StringStart => {
                let mut n = 2;
                while matches!(self.nth_kind(n), TokenKind::StringText | TokenKind::StringEscape) {
                    n += 1;
                }
                self.nth_kind(n) == TokenKind::StringEnd && self.nth_kind(n + 1).is_punctuation(PunctuationId::Colon)
            }
            _ => false,
        }
    }

    /// `{ a: 1, "b": 2 }`
    fn object_literal(&mut self) -> PResult<SyntaxKind> {
        self.start(SyntaxKind::ObjectLiteral);
        let opener = self.current_span();
        self.bump(); // {
        self.scan.open(BraceContext::ObjectLiteral, opener);
        while !self.check_punct(PunctuationId::RBrace) && !self.is_at_end() {
            self.start(SyntaxKind::Pair);
            match self.peek_kind() {
                TokenKind::Ident(_) => self.bump_field(FieldName::Key),
                TokenKind::StringStart => {
                    self.field(FieldName::Key);
                    self.string_literal()?;
                }
                _ => return Err(self.expected("field name")),
            }
            self.expect_punct(PunctuationId::Colon, "`:`")?;
            self.field(FieldName::Value);
            self.expression()?;
            self.finish();
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        self.expect_closing(PunctuationId::RBrace, Some(BraceContext::ObjectLiteral), opener, "`}`")?;
        self.finish();
        Ok(SyntaxKind::ObjectLiteral)
    }

    // ========================================================================
    // Compound primaries
    // ========================================================================

    /// `(e)` or the type check `(e : T)`; the kind is decided after the inner expression.
    fn parenthesized_expression(&mut self) -> PResult<SyntaxKind> {
        let cp = self.checkpoint();
        let opener = self.current_span();
        self.bump(); // (
        self.field(FieldName::Expression);
        self.expression()?;
        let kind = if self.match_punct(PunctuationId::Colon) {
            self.field(FieldName::Type);
            self.type_expr()?;
            SyntaxKind::TypeCheckExpression
        } else {
            SyntaxKind::ParenthesizedExpression
        };
        self.expect_closing(PunctuationId::RParen, None, opener, "`)`")?;
        self.start_at(cp, kind, None);
        self.finish();
        Ok(kind)
    }

    /// `new pack.Type<Args>(arguments)`
    fn new_expression(&mut self) -> PResult<SyntaxKind> {
        self.start(SyntaxKind::NewExpression);
        self.bump(); // new
        self.field(FieldName::Type);
        self.named_type()?;
        self.field(FieldName::Arguments);
        self.arguments()?;
        self.finish();
        Ok(SyntaxKind::NewExpression)
    }

    /// `function [name](params):Ret body`, where the body is a block or a single expression.
    fn function_expression(&mut self) -> PResult<SyntaxKind> {
        self.start(SyntaxKind::FunctionExpression);
        self.bump(); // function
        if self.peek_kind().is_ident() {
            self.bump_field(FieldName::Name);
        }
        self.field(FieldName::Parameters);
        self.parameter_list()?;
        if self.match_punct(PunctuationId::Colon) {
            self.field(FieldName::ReturnType);
            self.type_expr()?;
        }
        self.field(FieldName::Body);
        if self.check_punct(PunctuationId::LBrace) {
            self.block()?;
        } else {
            self.expression()?;
        }
        self.finish();
        Ok(SyntaxKind::FunctionExpression)
    }

    /// `if (c) a else b` in expression position.
    fn if_expression(&mut self) -> PResult<SyntaxKind> {
        self.start(SyntaxKind::IfExpression);
        self.bump(); // if
        self.parenthesized_condition()?;
        self.field(FieldName::Consequence);
        self.expression()?;
        if self.match_keyword(KeywordId::Else) {
            self.field(FieldName::Alternative);
            self.expression()?;
        }
        self.finish();
        Ok(SyntaxKind::IfExpression)
    }

    /// `cast(e)` / `cast(e, Type)`
    fn cast_call(&mut self) -> PResult<SyntaxKind> {
        self.start(SyntaxKind::CastExpression);
        self.bump(); // cast
        let opener = self.current_span();
        self.expect_punct(PunctuationId::LParen, "`(`")?;
        self.field(FieldName::Expression);
        self.expression()?;
        if self.match_punct(PunctuationId::Comma) {
            self.field(FieldName::Type);
            self.type_expr()?;
        }
        self.expect_closing(PunctuationId::RParen, None, opener, "`)`")?;
        self.finish();
        Ok(SyntaxKind::CastExpression)
    }

    /// `$e{expr}` (and `$i`, `$v`, `$a`, `$b`, `$p`), `$type(expr)`, or a bare `$name` placeholder.
    fn dollar_expression(&mut self) -> PResult<SyntaxKind> {
        if !(self.nth_kind(1).is_ident() && self.adjacent(1)) {
            return Err(self.expected("identifier after `$`"));
        }
        let name = self.text_of(self.nth(1));
        let opens = |p: &Self, id: PunctuationId| p.nth_kind(2).is_punctuation(id) && p.adjacent(2);

        if matches!(name, "e" | "i" | "v" | "a" | "b" | "p") && opens(self, PunctuationId::LBrace) {
            self.start(SyntaxKind::MacroReification);
            self.bump(); // $
            self.bump_field(FieldName::Name);
            let opener = self.current_span();
            self.bump(); // {
            self.scan.open(BraceContext::Reification, opener);
            self.field(FieldName::Expression);
            self.expression()?;
            self.expect_closing(PunctuationId::RBrace, Some(BraceContext::Reification), opener, "`}`")?;
            self.finish();
            return Ok(SyntaxKind::MacroReification);
        }

        if name == "type" && opens(self, PunctuationId::LParen) {
            self.start(SyntaxKind::TypeTraceExpression);
            self.bump(); // $
            self.bump(); // type
            let opener = self.current_span();
            self.bump(); // (
            self.field(FieldName::Expression);
            self.expression()?;
            self.expect_closing(PunctuationId::RParen, None, opener, "`)`")?;
            self.finish();
            return Ok(SyntaxKind::TypeTraceExpression);
        }

        self.start(SyntaxKind::MacroReification);
        self.bump(); // $
        self.bump_field(FieldName::Name);
        self.finish();
        Ok(SyntaxKind::MacroReification)
    }
}
