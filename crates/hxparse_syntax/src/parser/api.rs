/// Parse a source buffer into a lossless syntax tree.
///
/// This is the main public entrypoint for parsing. Uses [`ParseConfig::default`].
///
/// ## Examples
/// ```rust
/// let parse = hxparse_syntax::parse("var x = 1 +;");
/// assert_eq!(parse.diagnostics.len(), 1);
/// assert_eq!(parse.tree.render(), "var x = 1 +;");
/// ```
pub fn parse(source: &str) -> Parse {
    parse_with_config(source, ParseConfig::default())
}

/// Parse a source buffer with an explicit configuration.
///
/// ## Notes
/// - Never fails: malformed regions become `ERROR`/`MISSING` nodes, each with at least one diagnostic.
/// - Diagnostics (lexical and syntactic) are returned ordered by start offset.
#[tracing::instrument(skip_all, fields(source_len = source.len(), max_depth = config.max_depth))]
pub fn parse_with_config(source: &str, config: ParseConfig) -> Parse {
    let LexOutput { tokens, diagnostics: lex_diagnostics } = lexer::lex(source);

    let mut parser = Parser::new(source, &tokens, config);
    parser.module();
    let Parser { events, diagnostics: parse_diagnostics, .. } = parser;

    let root = builder::build_tree(source, &tokens, &events);
    let mut diagnostics = lex_diagnostics;
    diagnostics.extend(parse_diagnostics);
    diagnostics.sort_by_key(|d| d.span.start);
    tracing::debug!(
        token_count = tokens.len(),
        diagnostic_count = diagnostics.len(),
        "parsed"
    );

    Parse {
        tree: SyntaxTree::new(Arc::from(source), root),
        diagnostics,
    }
}

/// Stand-in for each byte of an invalid UTF-8 sequence (U+001A SUBSTITUTE); one byte wide, so offsets stay
/// those of the input.
const SUBSTITUTE: char = '\u{1A}';

/// Parse raw bytes.
///
/// Each byte of an invalid UTF-8 sequence keeps its original offset: in code it becomes a one-byte `Error` token,
/// inside a string or comment it stays part of that token. Each sequence is reported once as
/// [`ErrorCode::InvalidUtf8`]. [`SyntaxTree::render_bytes`] reproduces the input
/// exactly; [`SyntaxTree::source`] holds the text the parser saw, with every invalid byte shown as U+001A.
///
/// ## Examples
/// ```rust
/// let input = b"var s = 1;\xff var t = 2;";
/// let parse = hxparse_syntax::parse_bytes(input);
/// assert_eq!(parse.diagnostics.len(), 1);
/// assert_eq!(parse.tree.render_bytes(), input);
/// ```
pub fn parse_bytes(bytes: &[u8]) -> Parse {
    parse_bytes_with_config(bytes, ParseConfig::default())
}

/// [`parse_bytes`] with an explicit configuration.
pub fn parse_bytes_with_config(bytes: &[u8], config: ParseConfig) -> Parse {
    if let Ok(source) = std::str::from_utf8(bytes) {
        return parse_with_config(source, config);
    }

    let (text, invalid) = substitute_invalid(bytes);
    tracing::debug!(sequences = invalid.len(), "input is not valid UTF-8");
    let Parse { tree, mut diagnostics } = parse_with_config(&text, config);

    // The lexer saw unexpected characters; report the sequences they stand for instead.
    diagnostics.retain(|d| {
        !(d.code == ErrorCode::UnexpectedCharacter && invalid.iter().any(|span| span.contains(d.span)))
    });
    diagnostics.extend(invalid.iter().map(|span| {
        Diagnostic::new(
            ErrorCode::InvalidUtf8,
            *span,
            format!("invalid UTF-8 at byte offset {}", span.start),
        )
    }));
    diagnostics.sort_by_key(|d| d.span.start);

    Parse {
        tree: tree.with_original_bytes(Arc::from(bytes)),
        diagnostics,
    }
}

/// Replace every byte of each invalid UTF-8 sequence with [`SUBSTITUTE`], returning the text and the sequences.
fn substitute_invalid(bytes: &[u8]) -> (String, Vec<Span>) {
    let mut text = String::with_capacity(bytes.len());
    let mut invalid = Vec::new();
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
        let len = chunk.invalid().len();
        if len > 0 {
            let start = text.len();
            text.extend(std::iter::repeat_n(SUBSTITUTE, len));
            invalid.push(Span::new(start, text.len()));
        }
    }
    (text, invalid)
}
