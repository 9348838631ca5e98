//! Diagnostics produced while tokenizing and parsing.
//!
//! Every problem found during a parse becomes a [`Diagnostic`] in the list returned next to the tree. Nothing here is
//! ever raised as a process-terminating error: the parse entry points always return a complete tree.
//!
//! ## Notes
//! - [`DiagnosticKind`] is the coarse taxonomy (lexical, syntactic, recovery); [`ErrorCode`] is the precise cause.
//! - [`DiagnosticReport`] adapts a diagnostic to `miette` so front ends can render it with source context.

use std::fmt;

use miette::{NamedSource, SourceSpan};

use crate::span::Span;

/// Coarse classification of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Unterminated literal/comment, unrecognized character, unknown directive.
    Lex,
    /// No production matched at the current position.
    Syntax,
    /// The parser had to abandon or re-derive state: depth limit, cancellation, brace-context mismatch.
    Recovery,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::Lex => write!(f, "lex error"),
            DiagnosticKind::Syntax => write!(f, "syntax error"),
            DiagnosticKind::Recovery => write!(f, "recovery"),
        }
    }
}

/// Precise cause of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    UnterminatedString,
    UnterminatedComment,
    UnterminatedRegex,
    UnexpectedCharacter,
    UnknownDirective,
    ExpectedToken,
    UnexpectedToken,
    InvalidAssignmentTarget,
    ScanContextMismatch,
    StackDepthExceeded,
    Cancelled,
    InvalidUtf8,
}

impl ErrorCode {
    /// Stable kebab-case name, used in CLI output.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::UnterminatedString => "unterminated-string",
            ErrorCode::UnterminatedComment => "unterminated-comment",
            ErrorCode::UnterminatedRegex => "unterminated-regex",
            ErrorCode::UnexpectedCharacter => "unexpected-character",
            ErrorCode::UnknownDirective => "unknown-directive",
            ErrorCode::ExpectedToken => "expected-token",
            ErrorCode::UnexpectedToken => "unexpected-token",
            ErrorCode::InvalidAssignmentTarget => "invalid-assignment-target",
            ErrorCode::ScanContextMismatch => "scan-context-mismatch",
            ErrorCode::StackDepthExceeded => "stack-depth-exceeded",
            ErrorCode::Cancelled => "cancelled",
            ErrorCode::InvalidUtf8 => "invalid-utf8",
        }
    }

    /// The diagnostic kind this code is reported under.
    pub fn kind(self) -> DiagnosticKind {
        match self {
            ErrorCode::UnterminatedString
            | ErrorCode::UnterminatedComment
            | ErrorCode::UnterminatedRegex
            | ErrorCode::UnexpectedCharacter
            | ErrorCode::UnknownDirective
            | ErrorCode::InvalidUtf8 => DiagnosticKind::Lex,
            ErrorCode::ExpectedToken | ErrorCode::UnexpectedToken | ErrorCode::InvalidAssignmentTarget => {
                DiagnosticKind::Syntax
            }
            ErrorCode::ScanContextMismatch | ErrorCode::StackDepthExceeded | ErrorCode::Cancelled => {
                DiagnosticKind::Recovery
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One problem found in the source, with its byte range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub code: ErrorCode,
    pub span: Span,
    pub message: String,
    pub hints: Vec<String>,
}

impl Diagnostic {
    /// Build a diagnostic whose kind is derived from `code`.
    pub fn new(code: ErrorCode, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind: code.kind(),
            code,
            span,
            message: message.into(),
            hints: Vec::new(),
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }

    /// Attach the source text so the diagnostic can be rendered by `miette`.
    pub fn report(&self, file_name: &str, source: &str) -> DiagnosticReport {
        DiagnosticReport::new(self, file_name, source)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] at {}: {}", self.kind, self.code, self.span, self.message)
    }
}

/// A [`Diagnostic`] bundled with its source, renderable through `miette`'s graphical handler.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
#[error("{kind} [{code}]: {message}")]
pub struct DiagnosticReport {
    kind: DiagnosticKind,
    code: ErrorCode,
    message: String,
    #[source_code]
    source_code: NamedSource<String>,
    #[label("{label}")]
    span: SourceSpan,
    label: String,
    #[help]
    help: Option<String>,
}

impl DiagnosticReport {
    pub fn new(diagnostic: &Diagnostic, file_name: &str, source: &str) -> Self {
        let start = diagnostic.span.start.min(source.len());
        let len = diagnostic.span.len().min(source.len() - start);
        let help = (!diagnostic.hints.is_empty()).then(|| diagnostic.hints.join("\n"));
        Self {
            kind: diagnostic.kind,
            code: diagnostic.code,
            message: diagnostic.message.clone(),
            source_code: NamedSource::new(file_name, source.to_string()),
            span: SourceSpan::new(start.into(), len),
            label: diagnostic.code.as_str().replace('-', " "),
            help,
        }
    }
}

/// Internal failure of one grammar function; caught by the statement-level recovery loops.
///
/// ## Notes
/// - Never escapes [`crate::parser::parse`]; every variant is turned into a [`Diagnostic`] plus an `ERROR` node.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum ParseError {
    #[error("expected {expected}, found {found}")]
    Expected {
        expected: &'static str,
        found: String,
        span: Span,
    },
    #[error("unexpected {found}")]
    Unexpected { found: String, span: Span },
    #[error("nesting exceeds the depth limit of {limit}")]
    DepthExceeded { limit: usize, span: Span },
    #[error("parse cancelled")]
    Cancelled { span: Span },
}

impl ParseError {
    pub(crate) fn span(&self) -> Span {
        match self {
            ParseError::Expected { span, .. }
            | ParseError::Unexpected { span, .. }
            | ParseError::DepthExceeded { span, .. }
            | ParseError::Cancelled { span } => *span,
        }
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        matches!(self, ParseError::Cancelled { .. })
    }

    pub(crate) fn code(&self) -> ErrorCode {
        match self {
            ParseError::Expected { .. } => ErrorCode::ExpectedToken,
            ParseError::Unexpected { .. } => ErrorCode::UnexpectedToken,
            ParseError::DepthExceeded { .. } => ErrorCode::StackDepthExceeded,
            ParseError::Cancelled { .. } => ErrorCode::Cancelled,
        }
    }

    pub(crate) fn into_diagnostic(self) -> Diagnostic {
        let diagnostic = Diagnostic::new(self.code(), self.span(), self.to_string());
        match self {
            ParseError::DepthExceeded { .. } => {
                diagnostic.with_hint("raise the limit with `ParseConfig::with_max_depth` or flatten the nesting")
            }
            _ => diagnostic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_follows_code() {
        let d = Diagnostic::new(ErrorCode::UnterminatedRegex, Span::new(0, 3), "unterminated regex");
        assert_eq!(d.kind, DiagnosticKind::Lex);
        let d = Diagnostic::new(ErrorCode::ScanContextMismatch, Span::new(0, 1), "mismatch");
        assert_eq!(d.kind, DiagnosticKind::Recovery);
        let d = Diagnostic::new(ErrorCode::ExpectedToken, Span::new(0, 1), "expected `;`").with_hint("add it");
        assert_eq!(d.kind, DiagnosticKind::Syntax);
        assert_eq!(d.hints, vec!["add it".to_string()]);
    }

    #[test]
    fn test_display_includes_code_and_span() {
        let d = Diagnostic::new(ErrorCode::UnexpectedCharacter, Span::new(4, 5), "unexpected character `^`");
        assert_eq!(d.to_string(), "lex error [unexpected-character] at 4..5: unexpected character `^`");
    }

    #[test]
    fn test_parse_error_into_diagnostic() {
        let err = ParseError::Expected {
            expected: "`;`",
            found: "`}`".to_string(),
            span: Span::new(7, 8),
        };
        let d = err.into_diagnostic();
        assert_eq!(d.code, ErrorCode::ExpectedToken);
        assert_eq!(d.message, "expected `;`, found `}`");
        assert_eq!(d.span, Span::new(7, 8));

        let d = ParseError::DepthExceeded {
            limit: 4,
            span: Span::new(0, 1),
        }
        .into_diagnostic();
        assert_eq!(d.kind, DiagnosticKind::Recovery);
        assert_eq!(d.hints.len(), 1);
    }

    #[test]
    fn test_report_clamps_span_to_source() {
        let d = Diagnostic::new(ErrorCode::ExpectedToken, Span::new(3, 10), "expected `}`");
        let report = d.report("a.hx", "abcd");
        assert_eq!(report.span, SourceSpan::new(3.into(), 1));
        assert_eq!(report.to_string(), "syntax error [expected-token]: expected `}`");
    }
}
