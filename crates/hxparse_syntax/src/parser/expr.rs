/// Expression parsing methods.
///
/// This chunk implements expression parsing using precedence climbing:
/// - Special forms only valid at the head of an expression (`return`, `untyped`, `cast e`, `switch`, `x in xs`,
///   arrow functions)
/// - Binary, assignment and ternary operators (`binary_expression`), driven by the operator registry
/// - Prefix operators (`unary_expression`)
/// - Postfix chains (member access, subscripts, calls, `++`/`--`)
///
/// ## Notes
/// - Precedence and associativity come from `hxparse_core::lang::operators::binary_info`.
/// - The lexer emits every `>` alone. Adjacent `>`/`=` tokens are composed into `>=`, `>>`, `>>=`, `>>>` and
///   `>>>=` here, where a type argument list cannot be open.
/// - Chains at one precedence level (`a + b + c`, `a.b().c[0]`) extend in a loop. Only right operands and nested
///   expressions recurse, so only they take depth budget.
impl<'a> Parser<'a> {
    // ========================================================================
    // Entry
    // ========================================================================

    fn expression(&mut self) -> PResult<SyntaxKind> {
        self.nonterminal(Self::expression_inner)
    }

    fn expression_inner(&mut self) -> PResult<SyntaxKind> {
        match self.peek_kind() {
            TokenKind::Keyword(KeywordId::Cast) if !self.nth_kind(1).is_punctuation(PunctuationId::LParen) => {
                self.prefixed_expression(SyntaxKind::CastExpression)
            }
            TokenKind::Keyword(KeywordId::Untyped) => self.prefixed_expression(SyntaxKind::UntypedExpression),
            TokenKind::Keyword(KeywordId::Return) => self.return_expression(),
            TokenKind::Keyword(KeywordId::Break) => Ok(self.token_node(SyntaxKind::BreakExpression)),
            TokenKind::Keyword(KeywordId::Continue) => Ok(self.token_node(SyntaxKind::ContinueExpression)),
            TokenKind::Keyword(KeywordId::Switch) => self.switch_expression(),
            TokenKind::Ident(_) if self.nth_kind(1).is_keyword(KeywordId::In) => self.range_for_expression(),
            TokenKind::Ident(_) if self.nth_kind(1).is_punctuation(PunctuationId::Arrow) => {
                self.arrow_function(false)
            }
            TokenKind::Punctuation(PunctuationId::LParen) if self.group_followed_by_arrow() => {
                self.arrow_function(true)
            }
            _ => self.binary_expression(0),
        }
    }

    /// `cast e` / `untyped e`
    fn prefixed_expression(&mut self, kind: SyntaxKind) -> PResult<SyntaxKind> {
        self.start(kind);
        self.bump();
        self.field(FieldName::Expression);
        self.expression()?;
        self.finish();
        Ok(kind)
    }

    fn return_expression(&mut self) -> PResult<SyntaxKind> {
        self.start(SyntaxKind::ReturnExpression);
        self.bump();
        if self.expression_follows() {
            self.field(FieldName::Value);
            self.expression()?;
        }
        self.finish();
        Ok(SyntaxKind::ReturnExpression)
    }

    /// Return `true` unless the current token ends an expression (`return;`, `return }`).
    fn expression_follows(&self) -> bool {
        match self.peek_kind() {
            TokenKind::Eof => false,
            TokenKind::Punctuation(id) => !matches!(
                id,
                PunctuationId::Semicolon
                    | PunctuationId::RBrace
                    | PunctuationId::RParen
                    | PunctuationId::RBracket
                    | PunctuationId::Comma
                    | PunctuationId::Colon
            ),
            TokenKind::Keyword(id) => !matches!(id, KeywordId::Else | KeywordId::Case | KeywordId::Default),
            _ => true,
        }
    }

    /// `i in 0...10`, the iterator clause of `for`.
    fn range_for_expression(&mut self) -> PResult<SyntaxKind> {
        self.start(SyntaxKind::RangeForExpression);
        self.field(FieldName::Name);
        self.token_node(SyntaxKind::Identifier);
        self.bump(); // in
        self.field(FieldName::Value);
        self.expression()?;
        self.finish();
        Ok(SyntaxKind::RangeForExpression)
    }

    /// `x -> body` or `(a, b:Int) -> body`
    fn arrow_function(&mut self, parenthesized: bool) -> PResult<SyntaxKind> {
        self.start(SyntaxKind::ArrowFunction);
        if parenthesized {
            self.field(FieldName::Parameters);
            self.parameter_list()?;
        } else {
            self.field(FieldName::Parameter);
            self.start(SyntaxKind::Parameter);
            self.bump_field(FieldName::Name);
            self.finish();
        }
        self.expect_punct(PunctuationId::Arrow, "`->`")?;
        self.field(FieldName::Body);
        self.expression()?;
        self.finish();
        Ok(SyntaxKind::ArrowFunction)
    }

    // ========================================================================
    // Operators
    // ========================================================================

    /// Precedence climbing over binary, assignment and ternary operators.
    ///
    /// Returns the kind of the outermost node produced, which assignments use to validate their target.
    fn binary_expression(&mut self, min_prec: u8) -> PResult<SyntaxKind> {
        let cp = self.checkpoint();
        let lhs_start = self.current_span().start;
        let mut lhs = self.unary_expression(true)?;

        loop {
            if self.check_punct(PunctuationId::Question) && operators::TERNARY_PRECEDENCE >= min_prec {
                self.start_at(cp, SyntaxKind::TernaryExpression, Some(FieldName::Condition));
                self.bump(); // ?
                self.field(FieldName::Consequence);
                self.expression()?;
                self.expect_punct(PunctuationId::Colon, "`:`")?;
                self.field(FieldName::Alternative);
                self.nonterminal(|p| p.binary_expression(operators::TERNARY_PRECEDENCE))?;
                self.finish();
                lhs = SyntaxKind::TernaryExpression;
                continue;
            }

            let Some((op, raw)) = self.peek_binary_operator() else { break };
            let Some((prec, assoc)) = operators::binary_info(op) else { break };
            if prec < min_prec {
                break;
            }

            if operators::is_assignment(op) {
                if !is_assignable(lhs) {
                    self.diagnostics.push(Diagnostic::new(
                        ErrorCode::InvalidAssignmentTarget,
                        Span::new(lhs_start, self.prev_end()),
                        format!("invalid assignment target: {}", lhs.as_str()),
                    ));
                }
                self.start_at(cp, SyntaxKind::AssignmentExpression, Some(FieldName::Left));
                self.field(FieldName::Operator);
                self.bump_as(TokenKind::Operator(op), raw);
                self.field(FieldName::Right);
                self.expression()?;
                self.finish();
                lhs = SyntaxKind::AssignmentExpression;
                continue;
            }

            self.start_at(cp, SyntaxKind::BinaryExpression, Some(FieldName::Left));
            self.field(FieldName::Operator);
            self.bump_as(TokenKind::Operator(op), raw);
            let next_min = match assoc {
                Associativity::Right => prec,
                _ => prec + 1,
            };
            self.field(FieldName::Right);
            self.nonterminal(|p| p.binary_expression(next_min))?;
            self.finish();
            lhs = SyntaxKind::BinaryExpression;
        }

        Ok(lhs)
    }

    /// The binary operator at the current position and how many raw tokens it spans.
    fn peek_binary_operator(&self) -> Option<(OperatorId, u8)> {
        let op = self.peek_kind().operator_id()?;
        if op != OperatorId::Gt {
            return operators::binary_info(op).map(|_| (op, 1));
        }
        let mut count = 1usize;
        while count < 3 && self.nth_kind(count).is_operator(OperatorId::Gt) && self.adjacent(count) {
            count += 1;
        }
        let eq = self.nth_kind(count).is_operator(OperatorId::Eq) && self.adjacent(count);
        let composed = match (count, eq) {
            (1, false) => OperatorId::Gt,
            (1, true) => OperatorId::GtEq,
            (2, false) => OperatorId::Shr,
            (2, true) => OperatorId::ShrEq,
            (_, false) => OperatorId::UShr,
            (_, true) => OperatorId::UShrEq,
        };
        let raw = u8::try_from(count + usize::from(eq)).unwrap_or(1);
        Some((composed, raw))
    }

    /// Prefix operators. `allow_update` is cleared for the operand of a prefix operator so that `-x++` is a
    /// prefix expression over `x` followed by a stray `++`, never both at once.
    fn unary_expression(&mut self, allow_update: bool) -> PResult<SyntaxKind> {
        match self.peek_kind().operator_id() {
            Some(op) if operators::has_fixity(op, Fixity::Prefix) => self.nonterminal(|p| {
                p.start(SyntaxKind::UnaryExpression);
                p.bump_field(FieldName::Operator);
                p.field(FieldName::Operand);
                p.unary_expression(false)?;
                p.finish();
                Ok(SyntaxKind::UnaryExpression)
            }),
            _ => self.postfix_expression(allow_update),
        }
    }

    /// Member access, subscripts, calls, and one trailing `++`/`--`.
    fn postfix_expression(&mut self, allow_update: bool) -> PResult<SyntaxKind> {
        let cp = self.checkpoint();
        let mut kind = self.primary_expression()?;

        loop {
            match self.peek_kind() {
                TokenKind::Punctuation(PunctuationId::Dot | PunctuationId::QuestionDot) => {
                    self.start_at(cp, SyntaxKind::MemberExpression, Some(FieldName::Object));
                    self.bump();
                    self.expect_name(FieldName::Property, "member name")?;
                    self.finish();
                    kind = SyntaxKind::MemberExpression;
                }
                TokenKind::Punctuation(PunctuationId::LBracket) => {
                    self.start_at(cp, SyntaxKind::SubscriptExpression, Some(FieldName::Object));
                    let opener = self.current_span();
                    self.bump();
                    self.field(FieldName::Index);
                    self.expression()?;
                    self.expect_closing(PunctuationId::RBracket, None, opener, "`]`")?;
                    self.finish();
                    kind = SyntaxKind::SubscriptExpression;
                }
                TokenKind::Punctuation(PunctuationId::LParen) => {
                    self.start_at(cp, SyntaxKind::CallExpression, Some(FieldName::Function));
                    self.field(FieldName::Arguments);
                    self.arguments()?;
                    self.finish();
                    kind = SyntaxKind::CallExpression;
                }
                TokenKind::Operator(OperatorId::Increment | OperatorId::Decrement) if allow_update => {
                    self.start_at(cp, SyntaxKind::PostfixExpression, Some(FieldName::Operand));
                    self.bump_field(FieldName::Operator);
                    self.finish();
                    kind = SyntaxKind::PostfixExpression;
                    break;
                }
                _ => break,
            }
        }

        Ok(kind)
    }

    /// `(a, b, c)`; a trailing comma is accepted.
    fn arguments(&mut self) -> PResult<()> {
        self.start(SyntaxKind::Arguments);
        let opener = self.current_span();
        self.expect_punct(PunctuationId::LParen, "`(`")?;
        while !self.check_punct(PunctuationId::RParen) && !self.is_at_end() {
            self.expression()?;
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        self.expect_closing(PunctuationId::RParen, None, opener, "`)`")?;
        self.finish();
        Ok(())
    }

    // ========================================================================
    // Switch
    // ========================================================================

    /// `switch subject { case p1, p2 if (guard): ...; default: ... }`
    fn switch_expression(&mut self) -> PResult<SyntaxKind> {
        self.start(SyntaxKind::SwitchExpression);
        self.bump(); // switch
        self.field(FieldName::Subject);
        self.expression()?;
        let opener = self.current_span();
        self.expect_punct(PunctuationId::LBrace, "`{`")?;
        self.scan.open(BraceContext::SwitchBlock, opener);
        while !self.check_punct(PunctuationId::RBrace) && !self.is_at_end() {
            self.recover_item(Self::switch_arm)?;
        }
        self.expect_closing(PunctuationId::RBrace, Some(BraceContext::SwitchBlock), opener, "`}`")?;
        self.finish();
        Ok(SyntaxKind::SwitchExpression)
    }

    fn switch_arm(&mut self) -> PResult<()> {
        self.nonterminal(|p| match p.peek_kind() {
            TokenKind::Keyword(KeywordId::Case) => p.switch_case(),
            TokenKind::Keyword(KeywordId::Default) => p.default_case(),
            TokenKind::Directive(_) => p.preprocessor_directive(),
            _ => Err(p.expected("`case` or `default`")),
        })
    }

    fn switch_case(&mut self) -> PResult<()> {
        self.start(SyntaxKind::SwitchCase);
        self.bump(); // case
        loop {
            self.field(FieldName::Pattern);
            self.expression()?;
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        if self.match_keyword(KeywordId::If) {
            let opener = self.current_span();
            self.expect_punct(PunctuationId::LParen, "`(`")?;
            self.field(FieldName::Guard);
            self.expression()?;
            self.expect_closing(PunctuationId::RParen, None, opener, "`)`")?;
        }
        self.expect_punct(PunctuationId::Colon, "`:`")?;
        self.arm_body()?;
        self.finish();
        Ok(())
    }

    fn default_case(&mut self) -> PResult<()> {
        self.start(SyntaxKind::DefaultCase);
        self.bump(); // default
        self.expect_punct(PunctuationId::Colon, "`:`")?;
        self.arm_body()?;
        self.finish();
        Ok(())
    }

    /// Statements up to the next `case`, `default` or the closing `}`.
    fn arm_body(&mut self) -> PResult<()> {
        while !self.check_punct(PunctuationId::RBrace)
            && !self.is_at_end()
            && !self.check_keyword(KeywordId::Case)
            && !self.check_keyword(KeywordId::Default)
        {
            self.field(FieldName::Body);
            self.recover_item(Self::statement)?;
        }
        Ok(())
    }
}

/// Node kinds that may appear on the left of an assignment.
fn is_assignable(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Identifier | SyntaxKind::MemberExpression | SyntaxKind::SubscriptExpression
    )
}
