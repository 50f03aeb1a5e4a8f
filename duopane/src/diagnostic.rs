use std::fmt;
use std::ops::Range;

use codespan_reporting::diagnostic::{Diagnostic as Codespan, Label, Severity};

/// The closed set of malformed-input conditions. All are recoverable at the
/// document level; the rest of the document keeps rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// An opening fence or span tag with no terminator before its region ends.
    UnterminatedBlock,
    /// A fence inside a span with neither a highlight id nor a pane key.
    MissingLanguageTag,
    /// A new span opened while the previous one was still open.
    NestedSpanNotClosed,
    /// Two blocks in one span share a pane language.
    DuplicateLanguage,
    /// A span sealed with zero code blocks.
    EmptyComparison,
}

impl DiagnosticKind {
    /// Stable name used in CLI output and case fixtures.
    pub fn name(self) -> &'static str {
        match self {
            DiagnosticKind::UnterminatedBlock => "unterminated-block",
            DiagnosticKind::MissingLanguageTag => "missing-language-tag",
            DiagnosticKind::NestedSpanNotClosed => "nested-span-not-closed",
            DiagnosticKind::DuplicateLanguage => "duplicate-language",
            DiagnosticKind::EmptyComparison => "empty-comparison",
        }
    }

    /// Default severity. Only a broken span structure rates an error;
    /// everything else degrades to a renderable document.
    pub fn severity(self) -> Severity {
        match self {
            DiagnosticKind::UnterminatedBlock => Severity::Error,
            _ => Severity::Warning,
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A structured, non-fatal record of a malformed-input condition.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub span: Range<usize>,
    pub file_id: usize,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn new(
        kind: DiagnosticKind,
        message: impl Into<String>,
        span: Range<usize>,
        file_id: usize,
    ) -> Self {
        Diagnostic {
            kind,
            message: message.into(),
            span,
            file_id,
            notes: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    /// Convert to a codespan-reporting Diagnostic for display.
    pub fn to_codespan(&self) -> Codespan<usize> {
        Codespan::new(self.severity())
            .with_message(&self.message)
            .with_labels(vec![Label::primary(self.file_id, self.span.clone())])
            .with_notes(self.notes.clone())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}
