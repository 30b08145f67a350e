//! Diagnostic types and builders.

use crate::ErrorCode;
use aspire_common::Span;

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// Kind of diagnostic for categorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The input does not follow the grammar.
    Syntax,
    /// The parse hit a configured resource limit.
    Limit,
    /// The program parsed but is suspicious.
    Program,
}

/// A labeled span within a diagnostic.
#[derive(Debug, Clone)]
pub struct Label {
    pub span: Span,
    pub message: String,
}

impl Label {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }
}

/// A diagnostic message with optional labels, notes, and help.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub code: Option<ErrorCode>,
    pub message: String,
    pub span: Span,
    pub labels: Vec<Label>,
    pub notes: Vec<String>,
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn error(kind: DiagnosticKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            kind,
            code: None,
            message: message.into(),
            span,
            labels: vec![],
            notes: vec![],
            help: None,
        }
    }

    pub fn warning(kind: DiagnosticKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            kind,
            code: None,
            message: message.into(),
            span,
            labels: vec![],
            notes: vec![],
            help: None,
        }
    }

    /// Attach an error code; its suggestion becomes the help text unless one is set.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        if self.help.is_none() {
            self.help = code.suggestion().map(str::to_owned);
        }
        self
    }

    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.push(label);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let span = Span::from_usize(3, 4);
        let diag = Diagnostic::error(DiagnosticKind::Syntax, span, "expected comma")
            .with_label(Label::new(span, "here"))
            .with_note("while parsing a vector");

        assert!(diag.is_error());
        assert_eq!(diag.labels.len(), 1);
        assert_eq!(diag.notes, vec!["while parsing a vector".to_string()]);
        assert!(diag.code.is_none());
    }

    #[test]
    fn test_code_supplies_help() {
        let diag = Diagnostic::warning(DiagnosticKind::Program, Span::DUMMY, "empty")
            .with_code(ErrorCode::EmptyProgram);
        assert!(!diag.is_error());
        assert_eq!(diag.help.as_deref(), ErrorCode::EmptyProgram.suggestion());
    }

    #[test]
    fn test_explicit_help_wins() {
        let diag = Diagnostic::error(DiagnosticKind::Limit, Span::DUMMY, "too deep")
            .with_help("custom")
            .with_code(ErrorCode::NestingLimit);
        assert_eq!(diag.help.as_deref(), Some("custom"));
    }
}
