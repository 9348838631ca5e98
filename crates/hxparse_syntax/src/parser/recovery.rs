/// Error recovery.
///
/// Grammar functions fail with a [`ParseError`]. The loops that parse sequences of items (top-level statements,
/// block statements, class members, switch arms) run each item through [`Parser::recover_item`], which turns a
/// failure into an `ERROR` node spanning the item and resynchronizes at the next boundary:
/// - `;` at the item's own brace depth, once the failing token has been passed (consumed)
/// - a `}` that closes a group opened inside the item, once the failing token has been passed and no `;`, `)`,
///   `]`, `,` or `.` follows (consumed)
/// - a `}` at the item's own brace depth (left for the enclosing construct)
/// - end of input
impl<'a> Parser<'a> {
    /// Parse one item with `item`, recovering locally on failure.
    ///
    /// ## Errors
    /// Only cancellation propagates; the parser state is rolled back to the item start first.
    fn recover_item(&mut self, item: fn(&mut Self) -> PResult<()>) -> PResult<()> {
        let snapshot = self.snapshot();
        match item(self) {
            Ok(()) => Ok(()),
            Err(err) => {
                self.restore(snapshot);
                if err.is_cancelled() {
                    return Err(err);
                }
                self.skip_erroneous_item(&err);
                tracing::debug!(error = %err, span = %err.span(), "recovered from syntax error");
                self.diagnostics.push(err.into_diagnostic());
                Ok(())
            }
        }
    }

    /// Re-emit the tokens of a failed item inside an `ERROR` node.
    fn skip_erroneous_item(&mut self, err: &ParseError) {
        let error_start = err.span().start;
        let error_pos = self.tokens.partition_point(|t| t.span.start < error_start);
        let start_pos = self.pos;
        let mut depth = 0usize;

        self.start(SyntaxKind::Error);
        loop {
            let kind = self.peek_kind();
            match kind.punctuation_id() {
                _ if kind == TokenKind::Eof => break,
                Some(PunctuationId::LBrace) => {
                    depth += 1;
                    self.bump();
                }
                Some(PunctuationId::RBrace) if depth == 0 => {
                    // A stray `}` with nothing open would otherwise stall the item loop.
                    if self.pos == start_pos && self.scan.is_empty() {
                        self.bump();
                    }
                    break;
                }
                Some(PunctuationId::RBrace) => {
                    depth -= 1;
                    self.bump();
                    // A group closed mid-expression (`f({a: })`) keeps going to the item's end.
                    let continues = matches!(
                        self.peek_kind().punctuation_id(),
                        Some(
                            PunctuationId::Semicolon
                                | PunctuationId::RParen
                                | PunctuationId::RBracket
                                | PunctuationId::Comma
                                | PunctuationId::Dot
                        )
                    );
                    if depth == 0 && self.pos > error_pos && !continues {
                        break;
                    }
                }
                Some(PunctuationId::Semicolon) if depth == 0 && self.pos >= error_pos => {
                    self.bump();
                    break;
                }
                _ => self.bump(),
            }
        }
        self.finish();
    }

    /// Wrap everything from the current position to end of input in an `ERROR` node after cancellation.
    fn cancel_rest(&mut self, err: ParseError) {
        let start = self.current_span().start;
        self.start(SyntaxKind::Error);
        while !self.is_at_end() {
            self.bump();
        }
        self.finish();
        tracing::debug!(offset = start, "parse cancelled");
        self.diagnostics.push(Diagnostic::new(
            ErrorCode::Cancelled,
            Span::new(start, self.source.len()),
            err.to_string(),
        ));
    }

    /// Consume the closer of a delimited construct and pop its scan context.
    ///
    /// At end of input the closer is reported missing (a `MISSING` node plus one diagnostic) and the construct is
    /// still closed, so the content parsed so far is kept.
    fn expect_closing(
        &mut self,
        closer: PunctuationId,
        ctx: Option<BraceContext>,
        opener: Span,
        expected: &'static str,
    ) -> PResult<()> {
        if self.check_punct(closer) {
            let span = self.current_span();
            self.bump();
            if let Some(ctx) = ctx {
                self.close_context(ctx, span);
            }
            Ok(())
        } else if self.is_at_end() {
            self.missing(expected, Some(opener));
            if let Some(ctx) = ctx {
                let span = self.current_span();
                self.close_context(ctx, span);
            }
            Ok(())
        } else {
            Err(self.expected(expected))
        }
    }

    fn close_context(&mut self, ctx: BraceContext, closer: Span) {
        if let Some(diagnostic) = self.scan.close(ctx, closer) {
            self.diagnostics.push(diagnostic);
        }
    }
}
