//! Error recovery tests
//!
//! Malformed input must still produce a complete, lossless tree: the damage is confined to `ERROR`/`MISSING`
//! nodes and every diagnostic points at the offending range.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use hxparse::{
    DiagnosticKind, ErrorCode, FieldName, Parse, ParseConfig, Span, SyntaxKind, SyntaxNode, parse, parse_bytes,
    parse_with_config,
};

fn codes(parse: &Parse) -> Vec<ErrorCode> {
    parse.diagnostics.iter().map(|d| d.code).collect()
}

fn assert_lossless(parse: &Parse, source: &str) {
    assert_eq!(parse.tree.render(), source, "{}", parse.tree.to_sexp());
}

fn kinds(node: &SyntaxNode) -> Vec<SyntaxKind> {
    node.child_nodes().map(|n| n.display_kind()).collect()
}

#[test]
fn test_unterminated_block_keeps_its_declaration() {
    let source = "{ var x = 1;";
    let parse = parse(source);
    assert_lossless(&parse, source);

    assert_eq!(parse.diagnostics.len(), 1);
    let diagnostic = &parse.diagnostics[0];
    assert_eq!(diagnostic.kind, DiagnosticKind::Syntax);
    assert!(diagnostic.message.contains("`}`"), "{}", diagnostic.message);
    assert_eq!(diagnostic.span.start, source.len());

    let block = parse.root().child_nodes().next().unwrap();
    assert_eq!(block.kind, SyntaxKind::Block);
    assert_eq!(kinds(block), vec![SyntaxKind::VariableDeclaration, SyntaxKind::Missing]);
    let declaration = block.child_nodes().next().unwrap();
    assert_eq!(declaration.token_by_field(FieldName::Name).map(|t| t.text()), Some("x"));
    assert_eq!(declaration.render(), "var x = 1;");
}

#[test]
fn test_broken_statement_between_good_ones() {
    let source = "function f() {\n    var a = 1;\n    var b = * 2;\n    var c = 3;\n}\n";
    let parse = parse(source);
    assert_lossless(&parse, source);
    assert_eq!(codes(&parse), vec![ErrorCode::ExpectedToken]);

    let body = parse.root().child_nodes().next().unwrap().node_by_field(FieldName::Body).unwrap();
    assert_eq!(
        kinds(body),
        vec![SyntaxKind::VariableDeclaration, SyntaxKind::Error, SyntaxKind::VariableDeclaration]
    );
    let error = body.child_nodes().nth(1).unwrap();
    assert_eq!(error.render(), "var b = * 2;");
    let start = source.find('*').unwrap();
    assert_eq!(parse.diagnostics[0].span.start, start);
}

#[test]
fn test_errors_in_two_members_are_reported_separately() {
    let source = "class A {\n    var a:Int = ;\n    function ok() {}\n    var b = );\n}\nclass B {}\n";
    let parse = parse(source);
    assert_lossless(&parse, source);
    assert_eq!(parse.diagnostics.len(), 2);

    let items: Vec<_> = parse.root().child_nodes().collect();
    assert_eq!(items.len(), 2);
    let body = items[0].node_by_field(FieldName::Body).unwrap();
    assert_eq!(
        kinds(body),
        vec![SyntaxKind::Error, SyntaxKind::MethodDeclaration, SyntaxKind::Error]
    );
    assert!(!items[1].has_errors());
}

#[test]
fn test_unterminated_string_reports_a_lex_error() {
    let source = "var s = \"open;\nvar t = 2;";
    let parse = parse(source);
    assert_lossless(&parse, source);
    assert!(codes(&parse).contains(&ErrorCode::UnterminatedString));
    assert!(parse.diagnostics.iter().any(|d| d.kind == DiagnosticKind::Lex));
}

#[test]
fn test_unterminated_comment_runs_to_end_of_input() {
    let source = "var a = 1; /* never closed\nvar b = 2;";
    let parse = parse(source);
    assert_lossless(&parse, source);
    assert_eq!(codes(&parse), vec![ErrorCode::UnterminatedComment]);
    assert_eq!(parse.root().child_nodes().count(), 1);
}

#[test]
fn test_mismatched_closer_is_recovered() {
    let source = "var a = [1, 2);\nvar b = 3;";
    let parse = parse(source);
    assert_lossless(&parse, source);

    assert_eq!(codes(&parse), vec![ErrorCode::ExpectedToken]);
    let diagnostic = &parse.diagnostics[0];
    let close = source.find(')').unwrap();
    assert_eq!(diagnostic.span, Span::new(close, close + 1));
    assert!(diagnostic.message.contains("`]`"), "{}", diagnostic.message);

    let items: Vec<_> = parse.root().child_nodes().collect();
    assert_eq!(kinds(parse.root()), vec![SyntaxKind::Error, SyntaxKind::FieldDeclaration]);
    assert_eq!(items[0].span, Span::new(0, close + 2));
    assert_eq!(items[0].render(), "var a = [1, 2);");
    assert!(!items[1].has_errors());
}

#[test]
fn test_incomplete_text_while_typing() {
    for source in ["class A { function f() { if (", "class A { var x:Map<String, ", "x = a ? b", "for (i in 0..."] {
        let parse = parse(source);
        assert_lossless(&parse, source);
        assert!(!parse.diagnostics.is_empty(), "{source:?}");
    }
}

#[test]
fn test_deep_nesting_is_bounded() {
    let depth = 5_000;
    let source = format!("x = {}1{};", "(".repeat(depth), ")".repeat(depth));
    let parse = parse(&source);
    assert_lossless(&parse, &source);
    assert_eq!(codes(&parse), vec![ErrorCode::StackDepthExceeded]);
    assert_eq!(parse.diagnostics[0].kind, DiagnosticKind::Recovery);
}

#[test]
fn test_long_run_of_optional_type_markers_is_bounded() {
    let source = format!("var x:{}Int;\nvar y:?Int;", "? ".repeat(10_000));
    let parse = parse(&source);
    assert_lossless(&parse, &source);
    assert_eq!(codes(&parse), vec![ErrorCode::StackDepthExceeded]);

    assert_eq!(kinds(parse.root()), vec![SyntaxKind::Error, SyntaxKind::FieldDeclaration]);
    let y = parse.root().child_nodes().nth(1).unwrap();
    assert_eq!(y.node_by_field(FieldName::Type).map(|n| n.kind), Some(SyntaxKind::OptionalType));
}

#[test]
fn test_long_right_associative_directive_condition_is_bounded() {
    let source = format!("#if (a{})\nvar x = 1;\n#end\nvar y = 2;", " ?? a".repeat(10_000));
    let parse = parse(&source);
    assert_lossless(&parse, &source);
    assert_eq!(codes(&parse), vec![ErrorCode::StackDepthExceeded]);

    let items: Vec<_> = parse.root().child_nodes().collect();
    assert_eq!(items[0].kind, SyntaxKind::Error);
    let last = items.last().unwrap();
    assert_eq!(last.kind, SyntaxKind::FieldDeclaration);
    assert!(!last.has_errors());
}

#[test]
fn test_flat_chains_are_within_the_default_depth_limit() {
    let terms: Vec<String> = (0..1_000).map(|n| n.to_string()).collect();
    let sum = format!("var x = {};", terms.join(" + "));
    let calls = format!("builder{};", ".add(1)".repeat(1_000));
    for source in [sum.as_str(), calls.as_str()] {
        let parse = parse(source);
        assert_lossless(&parse, source);
        assert!(parse.diagnostics.is_empty(), "{:?}", codes(&parse));
        assert!(!parse.root().has_errors());
    }

    let parse = parse(&sum);
    let value = parse.root().child_nodes().next().unwrap().node_by_field(FieldName::Value).unwrap();
    assert_eq!(value.kind, SyntaxKind::BinaryExpression);
    assert_eq!(value.node_by_field(FieldName::Right).map(|n| n.render()), Some("999".to_string()));
    assert_eq!(value.node_by_field(FieldName::Left).map(|n| n.kind), Some(SyntaxKind::BinaryExpression));
}

#[test]
fn test_nested_right_hand_sides_still_count_toward_the_limit() {
    let source = format!("x = a{};", " ?? a".repeat(1_000));
    let parse = parse(&source);
    assert_lossless(&parse, &source);
    assert_eq!(codes(&parse), vec![ErrorCode::StackDepthExceeded]);
}

#[test]
fn test_invalid_utf8_renders_the_original_bytes() {
    let input = b"var s = 1;\xff var t = \"\xc3(\";";
    let parse = parse_bytes(input);
    assert_eq!(parse.tree.render_bytes(), input);
    assert_eq!(codes(&parse), vec![ErrorCode::InvalidUtf8, ErrorCode::InvalidUtf8]);
    assert_eq!(parse.diagnostics[0].span, Span::new(10, 11));
    assert_eq!(parse.diagnostics[0].kind, DiagnosticKind::Lex);

    let items: Vec<_> = parse.root().child_nodes().collect();
    assert_eq!(
        kinds(parse.root()),
        vec![SyntaxKind::FieldDeclaration, SyntaxKind::Error, SyntaxKind::FieldDeclaration]
    );
    assert_eq!(items[2].span, Span::new(12, input.len()));
    assert_eq!(parse.tree.source().len(), input.len());
}

#[test]
fn test_depth_limit_spares_siblings() {
    let source = "var a = [[[[[[[[1]]]]]]]];\nvar b = 2;";
    let parse = parse_with_config(source, ParseConfig::new().with_max_depth(5));
    assert_lossless(&parse, source);
    assert_eq!(codes(&parse), vec![ErrorCode::StackDepthExceeded]);
    let items: Vec<_> = parse.root().child_nodes().collect();
    assert_eq!(items.last().map(|n| n.kind), Some(SyntaxKind::FieldDeclaration));
    assert!(!items.last().unwrap().has_errors());
}

#[test]
fn test_cancelled_parse_is_still_lossless() {
    let flag = Arc::new(AtomicBool::new(true));
    let source = "class A {}\nclass B {}\n";
    let parse = parse_with_config(source, ParseConfig::new().with_cancellation(flag));
    assert_lossless(&parse, source);
    assert_eq!(codes(&parse), vec![ErrorCode::Cancelled]);
    assert_eq!(parse.diagnostics[0].kind, DiagnosticKind::Recovery);
}

#[test]
fn test_diagnostic_renders_with_source_context() {
    let source = "var x = ;";
    let parse = parse(source);
    let report = parse.diagnostics[0].report("Main.hx", source);
    assert!(report.to_string().contains("expected"), "{report}");
}
