#![no_main]

use hxparse_syntax::{lexer, parse_bytes};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Lexing alone must cover every byte of valid text
    if let Ok(s) = std::str::from_utf8(data) {
        let output = lexer::lex(s);
        let covered: usize = output.tokens.iter().map(|t| t.span.len()).sum();
        assert_eq!(covered, s.len());
    }

    // The tree renders the input back exactly, invalid UTF-8 included, whatever the diagnostics
    let parse = parse_bytes(data);
    assert_eq!(parse.tree.render_bytes(), data);
});
