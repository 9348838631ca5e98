/// Parser core types and the module-level loop.
///
/// This chunk defines the [`Parser`] type, its snapshot/checkpoint helpers, and the `module()` entry that drives a
/// whole buffer.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single “god file”.
type PResult<T> = Result<T, ParseError>;

/// Position in the event list; a completed operand can later be wrapped from here.
#[derive(Debug, Clone, Copy)]
struct Checkpoint(usize);

/// Everything needed to undo a speculative or failed parse.
struct Snapshot {
    pos: usize,
    events: usize,
    diagnostics: usize,
    scan: ScanContext,
    depth: usize,
}

/// Parser state.
///
/// ## Notes
/// - `tokens` holds only significant tokens, terminated by `Eof`. The parser never consumes `Eof`.
/// - All mutable state of a parse lives here; there is nothing global, so independent buffers can be parsed on
///   separate threads.
struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    /// For each opening `(`/`[`/`{` in `tokens`, the index of its balancing closer.
    closers: Vec<Option<usize>>,
    pos: usize,
    events: Vec<Event>,
    diagnostics: Vec<Diagnostic>,
    scan: ScanContext,
    depth: usize,
    config: ParseConfig,
}

impl<'a> Parser<'a> {
    /// Create a parser over the full token stream of `source` (trivia included).
    fn new(source: &'a str, raw: &[Token], config: ParseConfig) -> Self {
        let mut tokens: Vec<Token> = raw
            .iter()
            .copied()
            .filter(|t| !t.kind.is_trivia() && t.kind != TokenKind::Error)
            .collect();
        if tokens.last().is_none_or(|t| t.kind != TokenKind::Eof) {
            tokens.push(Token::new(TokenKind::Eof, Span::empty(source.len())));
        }
        let closers = match_groups(&tokens);
        Self {
            source,
            tokens,
            closers,
            pos: 0,
            events: Vec::new(),
            diagnostics: Vec::new(),
            scan: ScanContext::new(),
            depth: 0,
            config,
        }
    }

    /// Parse the whole buffer as a `module`: a sequence of top-level statements.
    fn module(&mut self) {
        self.start(SyntaxKind::Module);
        while !self.is_at_end() {
            if let Err(err) = self.recover_item(Self::top_level_item) {
                self.cancel_rest(err);
                break;
            }
        }
        self.finish();
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            pos: self.pos,
            events: self.events.len(),
            diagnostics: self.diagnostics.len(),
            scan: self.scan.clone(),
            depth: self.depth,
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.pos = snapshot.pos;
        self.events.truncate(snapshot.events);
        self.diagnostics.truncate(snapshot.diagnostics);
        self.scan = snapshot.scan;
        self.depth = snapshot.depth;
    }

    /// Run `f` speculatively: on failure every side effect is undone and the error is returned.
    fn attempt<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        let snapshot = self.snapshot();
        match f(self) {
            Ok(value) => Ok(value),
            Err(err) => {
                tracing::trace!(pos = snapshot.pos, error = %err, "backtracking");
                self.restore(snapshot);
                Err(err)
            }
        }
    }

    /// Run a grammar function as one nonterminal: counts toward the depth limit and honours cancellation.
    fn nonterminal<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        let saved = self.depth;
        self.enter()?;
        let result = f(self);
        self.depth = saved;
        result
    }

    /// Check cancellation and take one level of nesting budget.
    fn enter(&mut self) -> PResult<()> {
        if self.config.is_cancelled() {
            return Err(ParseError::Cancelled {
                span: self.current_span(),
            });
        }
        if self.depth >= self.config.max_depth {
            tracing::debug!(limit = self.config.max_depth, pos = self.pos, "depth limit reached");
            return Err(ParseError::DepthExceeded {
                limit: self.config.max_depth,
                span: self.current_span(),
            });
        }
        self.depth += 1;
        Ok(())
    }
}

/// Pair every opener with its closer in one pass.
///
/// `(`, `[` and `{` are counted alike, so `( a[0], {b:1} )` pairs the outer parentheses; an opener left unclosed at
/// the end of input has no entry.
fn match_groups(tokens: &[Token]) -> Vec<Option<usize>> {
    let mut closers = vec![None; tokens.len()];
    let mut open = Vec::new();
    for (index, token) in tokens.iter().enumerate() {
        match token.kind.punctuation_id() {
            Some(PunctuationId::LParen | PunctuationId::LBracket | PunctuationId::LBrace) => open.push(index),
            Some(PunctuationId::RParen | PunctuationId::RBracket | PunctuationId::RBrace) => {
                if let Some(opener) = open.pop() {
                    closers[opener] = Some(index);
                }
            }
            _ => {}
        }
    }
    closers
}
