/// Statement parsing methods.
///
/// This chunk implements:
/// - Blocks and the statement dispatcher
/// - `if` / `while` / `do ... while` / `for` statements
/// - Expression statements and their terminators
///
/// ## Notes
/// - `if` is tried as a statement first. When that fails at an `else` (`if (c) a else b;`), the same tokens are
///   re-parsed as an expression statement holding an `if_expression`.
/// - Local declarations (`var`, `final`, `function name`, metadata-prefixed items) share the class-member
///   productions; see `decl.rs`.
impl<'a> Parser<'a> {
    fn statement(&mut self) -> PResult<()> {
        self.nonterminal(Self::statement_inner)
    }

    fn statement_inner(&mut self) -> PResult<()> {
        match self.peek_kind() {
            TokenKind::Punctuation(PunctuationId::LBrace) => self.block(),
            TokenKind::Punctuation(PunctuationId::Semicolon) => {
                self.token_node(SyntaxKind::EmptyStatement);
                Ok(())
            }
            TokenKind::Directive(_) => self.preprocessor_directive(),
            _ if self.at_declaration_start(Scope::Local) => self.declaration(Scope::Local),
            TokenKind::Keyword(KeywordId::If) => self.if_statement_or_expression(),
            TokenKind::Keyword(KeywordId::While) => self.while_statement(),
            TokenKind::Keyword(KeywordId::Do) => self.do_while_statement(),
            TokenKind::Keyword(KeywordId::For) => self.for_statement(),
            _ => self.expression_statement(),
        }
    }

    /// `{ statements }`; used for statement blocks and function bodies.
    fn block(&mut self) -> PResult<()> {
        self.nonterminal(|p| {
            p.start(SyntaxKind::Block);
            let opener = p.current_span();
            p.expect_punct(PunctuationId::LBrace, "`{`")?;
            p.scan.open(BraceContext::Block, opener);
            while !p.check_punct(PunctuationId::RBrace) && !p.is_at_end() {
                p.recover_item(Self::statement)?;
            }
            p.expect_closing(PunctuationId::RBrace, Some(BraceContext::Block), opener, "`}`")?;
            p.finish();
            Ok(())
        })
    }

    fn expression_statement(&mut self) -> PResult<()> {
        self.start(SyntaxKind::ExpressionStatement);
        self.field(FieldName::Expression);
        self.expression()?;
        self.terminator()?;
        self.finish();
        Ok(())
    }

    fn if_statement_or_expression(&mut self) -> PResult<()> {
        let first = match self.attempt(Self::if_statement) {
            Ok(()) => return Ok(()),
            Err(err) => err,
        };
        if first.is_cancelled() || !self.fails_at_else(&first) {
            return Err(first);
        }
        match self.attempt(Self::expression_statement) {
            Ok(()) => Ok(()),
            Err(second) if second.is_cancelled() => Err(second),
            Err(_) => Err(first),
        }
    }

    /// Return `true` if `err` points at an `else` keyword.
    fn fails_at_else(&self, err: &ParseError) -> bool {
        let start = err.span().start;
        let index = self.tokens.partition_point(|t| t.span.start < start);
        self.tokens
            .get(index)
            .is_some_and(|t| t.span.start == start && t.kind.is_keyword(KeywordId::Else))
    }

    fn if_statement(&mut self) -> PResult<()> {
        self.start(SyntaxKind::IfStatement);
        self.bump(); // if
        self.parenthesized_condition()?;
        self.field(FieldName::Consequence);
        self.statement()?;
        if self.match_keyword(KeywordId::Else) {
            self.field(FieldName::Alternative);
            self.statement()?;
        }
        self.finish();
        Ok(())
    }

    fn while_statement(&mut self) -> PResult<()> {
        self.start(SyntaxKind::WhileStatement);
        self.bump(); // while
        self.parenthesized_condition()?;
        self.field(FieldName::Body);
        self.statement()?;
        self.finish();
        Ok(())
    }

    fn do_while_statement(&mut self) -> PResult<()> {
        self.start(SyntaxKind::DoWhileStatement);
        self.bump(); // do
        self.field(FieldName::Body);
        self.statement()?;
        self.expect_keyword(KeywordId::While, "`while`")?;
        self.parenthesized_condition()?;
        self.terminator()?;
        self.finish();
        Ok(())
    }

    /// `for (i in 0...n) body` / `for (x in xs) body`
    fn for_statement(&mut self) -> PResult<()> {
        self.start(SyntaxKind::ForStatement);
        self.bump(); // for
        let opener = self.current_span();
        self.expect_punct(PunctuationId::LParen, "`(`")?;
        self.field(FieldName::Iterator);
        self.expression()?;
        self.expect_closing(PunctuationId::RParen, None, opener, "`)`")?;
        self.field(FieldName::Body);
        self.statement()?;
        self.finish();
        Ok(())
    }

    /// `( expr )` under the `condition` field, as used by `if`, `while` and `do ... while`.
    fn parenthesized_condition(&mut self) -> PResult<()> {
        let opener = self.current_span();
        self.expect_punct(PunctuationId::LParen, "`(`")?;
        self.field(FieldName::Condition);
        self.expression()?;
        self.expect_closing(PunctuationId::RParen, None, opener, "`)`")
    }
}
