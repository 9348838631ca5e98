//! Property-based tests for the parser
//!
//! These tests use proptest to check the tree invariants across many generated inputs: lossless coverage for any
//! text at all, and clean, whitespace-insensitive, idempotent parses for generated comment-free programs.

use hxparse::{ErrorCode, parse, parse_bytes};
use proptest::prelude::*;

// =============================================================================
// Program generators
// =============================================================================

fn identifier() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "b", "count", "items", "total"]).prop_map(String::from)
}

fn binary_operator() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["+", "-", "*", "/", "%", "==", "!=", "<", "<=", "&&", "||", "??", "..."])
}

fn expression() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        identifier(),
        (0u32..1000).prop_map(|n| n.to_string()),
        Just("true".to_string()),
        Just("null".to_string()),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            (inner.clone(), binary_operator(), inner.clone()).prop_map(|(l, op, r)| format!("{l} {op} {r}")),
            inner.clone().prop_map(|e| format!("({e})")),
            inner.clone().prop_map(|e| format!("!{e}")),
            (identifier(), prop::collection::vec(inner.clone(), 0..3))
                .prop_map(|(f, args)| format!("{f}({})", args.join(", "))),
            prop::collection::vec(inner.clone(), 0..4).prop_map(|items| format!("[{}]", items.join(", "))),
            (inner.clone(), identifier()).prop_map(|(object, property)| format!("({object}).{property}")),
            (inner.clone(), inner.clone(), inner.clone()).prop_map(|(c, a, b)| format!("{c} ? {a} : {b}")),
            (identifier(), inner.clone()).prop_map(|(key, value)| format!("g({{{key}: {value}}})")),
        ]
    })
}

fn statement() -> impl Strategy<Value = String> + Clone {
    let simple = prop_oneof![
        expression().prop_map(|e| format!("{e};")),
        (identifier(), expression()).prop_map(|(name, e)| format!("var {name} = {e};")),
        (identifier(), expression()).prop_map(|(name, e)| format!("{name} += {e};")),
        expression().prop_map(|e| format!("return {e};")),
    ];
    simple.prop_recursive(3, 16, 3, |inner| {
        prop_oneof![
            (expression(), prop::collection::vec(inner.clone(), 0..3))
                .prop_map(|(c, body)| format!("if ({c}) {{ {} }}", body.join(" "))),
            (expression(), inner.clone(), inner.clone()).prop_map(|(c, a, b)| format!("if ({c}) {a} else {b}")),
            (expression(), inner.clone()).prop_map(|(c, body)| format!("while ({c}) {body}")),
            (identifier(), expression(), inner.clone()).prop_map(|(i, e, body)| format!("for ({i} in {e}) {body}")),
            prop::collection::vec(inner.clone(), 0..3).prop_map(|body| format!("{{ {} }}", body.join("\n"))),
        ]
    })
}

fn program() -> impl Strategy<Value = String> {
    let statements = prop::collection::vec(statement(), 0..6);
    prop_oneof![
        statements.clone().prop_map(|s| s.join("\n")),
        (identifier(), expression(), statements).prop_map(|(field, init, body)| {
            format!("class Main {{\n    var {field} = {init};\n    function run() {{\n{}\n    }}\n}}\n", body.join("\n"))
        }),
    ]
}

/// Re-join the significant tokens of `source` with single spaces.
fn respaced(source: &str) -> String {
    let parse = parse(source);
    let texts: Vec<&str> = parse.tree.tokens().into_iter().filter(|t| !t.is_trivia()).map(|t| t.text()).collect();
    texts.join(" ")
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Property: any text renders back byte-for-byte, however broken it is
    #[test]
    fn lossless_for_arbitrary_text(source in "\\PC{0,200}") {
        let parse = parse(&source);
        prop_assert_eq!(parse.tree.render(), source);
    }

    /// Property: punctuation-heavy text renders back byte-for-byte
    #[test]
    fn lossless_for_punctuation_soup(source in "[ \n{}()\\[\\];:,.<>=!?$@#~/\"'a-c0-2]{0,120}") {
        let parse = parse(&source);
        prop_assert_eq!(parse.tree.render(), source);
    }

    /// Property: arbitrary bytes, invalid UTF-8 included, render back byte-for-byte
    #[test]
    fn lossless_for_arbitrary_bytes(bytes in prop::collection::vec(any::<u8>(), 0..200)) {
        let parse = parse_bytes(&bytes);
        prop_assert_eq!(parse.tree.render_bytes(), bytes.clone());
        prop_assert_eq!(parse.tree.source().len(), bytes.len());
        let invalid = parse.diagnostics.iter().filter(|d| d.code == ErrorCode::InvalidUtf8).count();
        prop_assert_eq!(invalid > 0, std::str::from_utf8(&bytes).is_err());
    }

    /// Property: generated programs parse without diagnostics
    #[test]
    fn generated_programs_parse_cleanly(source in program()) {
        let parse = parse(&source);
        prop_assert!(parse.diagnostics.is_empty(), "{:#?}\n{}", parse.diagnostics, source);
        prop_assert!(!parse.root().has_errors());
        prop_assert_eq!(parse.tree.render(), source);
    }

    /// Property: parsing the rendered tree gives the same tree
    #[test]
    fn reparse_is_idempotent(source in program()) {
        let first = parse(&source);
        let second = parse(&first.tree.render());
        prop_assert!(first.root().structurally_eq(second.root()));
    }

    /// Property: whitespace between tokens does not change the structure
    #[test]
    fn structure_ignores_whitespace(source in program()) {
        let original = parse(&source);
        let spaced = parse(&respaced(&source));
        prop_assert!(spaced.diagnostics.is_empty(), "{:#?}", spaced.diagnostics);
        prop_assert!(original.root().structurally_eq(spaced.root()));
    }
}
