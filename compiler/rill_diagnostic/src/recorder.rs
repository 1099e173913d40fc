//! Accumulator for semantic-analysis diagnostics.
//!
//! One recorder is shared across the whole `check` pass so that every
//! function body reports into a single ordered list.

use rill_ir::Position;

use crate::{Diagnostic, Severity};

/// Append-only diagnostic accumulator.
///
/// Diagnostics are kept in emission order; the pass that owns the recorder
/// decides how to render them. Nothing is deduplicated here.
#[derive(Debug, Default)]
pub struct SemanticRecorder {
    diagnostics: Vec<Diagnostic>,
}

impl SemanticRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        SemanticRecorder::default()
    }

    /// Record a diagnostic.
    pub fn record(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Record an error.
    pub fn error(&mut self, pos: Position, message: impl Into<String>) {
        self.record(Diagnostic::error(pos, message));
    }

    /// Record a warning.
    pub fn warning(&mut self, pos: Position, message: impl Into<String>) {
        self.record(Diagnostic::warning(pos, message));
    }

    /// Record a note.
    pub fn note(&mut self, pos: Position, message: impl Into<String>) {
        self.record(Diagnostic::new(Severity::Note, pos, message));
    }

    /// Whether any error-severity diagnostic was recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    /// Number of error-severity diagnostics.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_error())
            .count()
    }

    /// Total number of recorded diagnostics.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Iterate diagnostics in emission order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Consume the recorder, returning diagnostics in emission order.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
