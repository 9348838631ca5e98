//! Generate Markdown reference docs from `hxparse_core::lang` registries.
//!
//! This binary renders the vocabulary registries (keywords, operators, punctuation, directives) into one Markdown
//! document at `docs/syntax-reference.md`.
//!
//! ## Notes
//! - The generated file is a derived artifact. Update the registries instead of editing it by hand.
//!
//! ## Examples
//! Run from the workspace root:
//! ```bash
//! cargo run -p hxparse_core --bin generate_lang_reference
//! ```
//!
//! ## Panics
//! - If the workspace root cannot be resolved.
//! - If the output file cannot be written.

use std::fs;
use std::path::{Path, PathBuf};

use hxparse_core::lang::{directives, keywords, operators, punctuation};

fn ensure_single_blank_line(out: &mut String) {
    while out.ends_with("\n\n\n") {
        out.pop();
    }
    if out.is_empty() || out.ends_with("\n\n") {
        return;
    }
    if out.ends_with('\n') {
        out.push('\n');
    } else {
        out.push_str("\n\n");
    }
}

fn start_section(out: &mut String, heading: &str) {
    ensure_single_blank_line(out);
    out.push_str(heading);
    out.push_str("\n\n");
}

fn main() {
    let root = workspace_root();
    let out_dir = root.join("docs");
    fs::create_dir_all(&out_dir).expect("create docs/");
    write_reference(&out_dir.join("syntax-reference.md"));
}

/// Write the consolidated reference document.
fn write_reference(path: &Path) {
    let mut out = String::new();
    out.push_str("# Haxe surface syntax reference\n\n");
    out.push_str("> Generated file. Regenerate with `cargo run -p hxparse_core --bin generate_lang_reference`.\n\n");

    out.push_str("## Contents\n\n");
    out.push_str("- [Keywords](#keywords)\n");
    out.push_str("- [Operators](#operators)\n");
    out.push_str("- [Punctuation](#punctuation)\n");
    out.push_str("- [Directives](#directives)\n\n");

    render_keywords_section(&mut out);
    render_operators_section(&mut out);
    render_punctuation_section(&mut out);
    render_directives_section(&mut out);

    while out.ends_with("\n\n") {
        out.pop();
    }
    fs::write(path, out).expect("write syntax-reference.md");
}

fn render_keywords_section(out: &mut String) {
    start_section(out, "## Keywords");

    out.push_str("| Id | Spelling | Category | Usage |\n");
    out.push_str("|----|---|---|---|\n");

    for k in keywords::KEYWORDS {
        let usage = k
            .usage
            .iter()
            .map(|u| format!("{u:?}"))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!(
            "| {:?} | `{}` | {:?} | {usage} |\n",
            k.id, k.canonical, k.category
        ));
    }
}

fn render_operators_section(out: &mut String) {
    start_section(out, "## Operators");

    out.push_str("### Notes\n\n");
    out.push_str("- **Precedence**: Higher binds tighter (e.g. `*` > `+`). Unary-only operators carry `0`.\n");
    out.push_str(&format!(
        "- **Ternary**: `c ? a : b` binds at precedence {} (right-associative).\n",
        operators::TERNARY_PRECEDENCE
    ));
    out.push_str("- **Composed**: Spelled with a leading `>`; the parser builds it from adjacent `>` tokens.\n\n");

    out.push_str("| Id | Spelling | Precedence | Associativity | Fixity | Composed |\n");
    out.push_str("|---|---|---:|---|---|---|\n");

    let mut rows: Vec<_> = operators::OPERATORS.iter().collect();
    rows.sort_by(|a, b| b.precedence.cmp(&a.precedence));
    for o in rows {
        let fixity = o
            .fixities
            .iter()
            .map(|f| format!("{f:?}"))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!(
            "| {:?} | `{}` | {} | {:?} | {fixity} | {} |\n",
            o.id, o.spelling, o.precedence, o.associativity, o.composed
        ));
    }
}

fn render_punctuation_section(out: &mut String) {
    start_section(out, "## Punctuation");

    out.push_str("| Id | Spelling | Category |\n");
    out.push_str("|---|---|---|\n");
    for p in punctuation::PUNCTUATION {
        out.push_str(&format!("| {:?} | `{}` | {:?} |\n", p.id, p.canonical, p.category));
    }
}

fn render_directives_section(out: &mut String) {
    start_section(out, "## Directives");

    out.push_str("| Id | Spelling | Takes condition |\n");
    out.push_str("|---|---|---|\n");
    for d in directives::DIRECTIVES {
        out.push_str(&format!("| {:?} | `{}` | {} |\n", d.id, d.canonical, d.takes_condition));
    }
}

fn workspace_root() -> PathBuf {
    // crates/hxparse_core -> crates -> workspace root
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .map(|p| p.to_path_buf())
        .expect("workspace root (two levels above crates/hxparse_core)")
}
