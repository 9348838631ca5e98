/// Token-stream helpers and event emission.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Peeking/consuming tokens (`peek`, `nth`, `bump`)
/// - Matching / expecting keywords, operators, and punctuation
/// - Emitting tree events (`start`, `finish`, `field`, `start_at`)
/// - Lookahead used by the conflict rules
impl<'a> Parser<'a> {
    // ========================================================================
    // Peeking
    // ========================================================================

    /// Return the current token without consuming it.
    fn peek(&self) -> Token {
        self.nth(0)
    }

    /// Return the token `n` positions ahead (`Eof` past the end).
    fn nth(&self, n: usize) -> Token {
        let last = self.tokens.len() - 1;
        self.tokens[(self.pos + n).min(last)]
    }

    fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    fn nth_kind(&self, n: usize) -> TokenKind {
        self.nth(n).kind
    }

    /// Return `true` if the current token is [`TokenKind::Eof`].
    fn is_at_end(&self) -> bool {
        matches!(self.peek_kind(), TokenKind::Eof)
    }

    fn current_span(&self) -> Span {
        self.peek().span
    }

    /// End offset of the last consumed token (start of input if nothing was consumed).
    fn prev_end(&self) -> usize {
        match self.pos.checked_sub(1) {
            Some(prev) => self.tokens[prev].span.end,
            None => 0,
        }
    }

    fn text_of(&self, token: Token) -> &'a str {
        let source: &'a str = self.source;
        source.get(token.span.start..token.span.end).unwrap_or_default()
    }

    fn check_keyword(&self, id: KeywordId) -> bool {
        self.peek_kind().is_keyword(id)
    }

    fn check_punct(&self, id: PunctuationId) -> bool {
        self.peek_kind().is_punctuation(id)
    }

    fn check_op(&self, id: OperatorId) -> bool {
        self.peek_kind().is_operator(id)
    }

    /// Identifier or keyword: anything that may serve as a path segment, metadata or member name.
    fn check_name(&self) -> bool {
        is_name(self.peek_kind())
    }

    // ========================================================================
    // Consuming
    // ========================================================================

    /// Consume the current token as a leaf of its own kind.
    fn bump(&mut self) {
        let kind = self.peek_kind();
        self.bump_as(kind, 1);
    }

    /// Consume `raw` adjacent tokens as one leaf of kind `kind`.
    fn bump_as(&mut self, kind: TokenKind, raw: u8) {
        if self.is_at_end() {
            return;
        }
        self.events.push(Event::Token { kind, raw });
        self.scan.record(kind);
        self.pos = (self.pos + usize::from(raw)).min(self.tokens.len() - 1);
    }

    /// Consume the current token under `field`.
    fn bump_field(&mut self, field: FieldName) {
        self.field(field);
        self.bump();
    }

    fn match_keyword(&mut self, id: KeywordId) -> bool {
        if self.check_keyword(id) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn match_punct(&mut self, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect_keyword(&mut self, id: KeywordId, expected: &'static str) -> PResult<()> {
        if self.match_keyword(id) { Ok(()) } else { Err(self.expected(expected)) }
    }

    fn expect_punct(&mut self, id: PunctuationId, expected: &'static str) -> PResult<()> {
        if self.match_punct(id) { Ok(()) } else { Err(self.expected(expected)) }
    }

    /// Consume an identifier under `field`.
    fn expect_ident(&mut self, field: FieldName, expected: &'static str) -> PResult<()> {
        if self.peek_kind().is_ident() {
            self.bump_field(field);
            Ok(())
        } else {
            Err(self.expected(expected))
        }
    }

    /// Consume an identifier or keyword under `field`.
    fn expect_name(&mut self, field: FieldName, expected: &'static str) -> PResult<()> {
        if self.check_name() {
            self.bump_field(field);
            Ok(())
        } else {
            Err(self.expected(expected))
        }
    }

    fn expected(&self, expected: &'static str) -> ParseError {
        ParseError::Expected {
            expected,
            found: self.peek_kind().describe(),
            span: self.current_span(),
        }
    }

    fn unexpected(&self) -> ParseError {
        ParseError::Unexpected {
            found: self.peek_kind().describe(),
            span: self.current_span(),
        }
    }

    // ========================================================================
    // Events
    // ========================================================================

    fn start(&mut self, kind: SyntaxKind) {
        self.events.push(Event::Start { kind });
    }

    fn finish(&mut self) {
        self.events.push(Event::Finish);
    }

    /// Name the next element emitted into the current node.
    fn field(&mut self, name: FieldName) {
        self.events.push(Event::Field(name));
    }

    /// Present the current node as `kind`.
    fn alias(&mut self, kind: SyntaxKind) {
        self.events.push(Event::Alias(kind));
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.events.len())
    }

    /// Open a node of `kind` that starts at `cp`, adopting everything emitted since.
    ///
    /// `first_field` names the first adopted element (the left operand of a binary expression, the object of a
    /// member access).
    fn start_at(&mut self, cp: Checkpoint, kind: SyntaxKind, first_field: Option<FieldName>) {
        let at = cp.0.min(self.events.len());
        self.events.insert(at, Event::Start { kind });
        if let Some(field) = first_field {
            self.events.insert(at + 1, Event::Field(field));
        }
    }

    /// Emit an empty `kind` node carrying a single consumed token.
    fn token_node(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.start(kind);
        self.bump();
        self.finish();
        kind
    }

    /// Emit a zero-width `MISSING` node and a diagnostic for the absent `expected` token.
    fn missing(&mut self, expected: &'static str, opener: Option<Span>) {
        self.start(SyntaxKind::Missing);
        self.finish();
        let span = Span::empty(self.current_span().start);
        let mut diagnostic = Diagnostic::new(
            ErrorCode::ExpectedToken,
            span,
            format!("expected {expected}, found {}", self.peek_kind().describe()),
        );
        if let Some(opener) = opener {
            diagnostic = diagnostic.with_hint(format!("unclosed delimiter opened at {opener}"));
        }
        self.diagnostics.push(diagnostic);
    }

    // ========================================================================
    // Lookahead
    // ========================================================================

    /// Index of the token closing the group opened at `pos`, if the group is closed at all.
    fn matching_close(&self) -> Option<usize> {
        self.closers.get(self.pos).copied().flatten()
    }

    /// Return `true` if the group opened at `pos` is directly followed by `->`.
    fn group_followed_by_arrow(&self) -> bool {
        self.matching_close()
            .and_then(|close| self.tokens.get(close + 1))
            .is_some_and(|token| token.kind.is_punctuation(PunctuationId::Arrow))
    }

    /// Return `true` if `nth(n)` starts exactly where `nth(n - 1)` ends.
    fn adjacent(&self, n: usize) -> bool {
        n > 0 && self.nth(n - 1).is_adjacent_to(&self.nth(n))
    }
}

/// Identifier or keyword.
fn is_name(kind: TokenKind) -> bool {
    matches!(kind, TokenKind::Ident(_) | TokenKind::Keyword(_))
}
