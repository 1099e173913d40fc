use std::fmt;

use rill_ir::Position;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl Severity {
    /// Whether this severity fails the compilation.
    #[inline]
    pub fn is_error(self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// A single structured diagnostic.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Diagnostic {
    pub severity: Severity,
    pub pos: Position,
    pub message: String,
}

impl Diagnostic {
    /// Create a new diagnostic.
    pub fn new(severity: Severity, pos: Position, message: impl Into<String>) -> Self {
        Diagnostic {
            severity,
            pos,
            message: message.into(),
        }
    }

    /// Create an error diagnostic.
    pub fn error(pos: Position, message: impl Into<String>) -> Self {
        Diagnostic::new(Severity::Error, pos, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(pos: Position, message: impl Into<String>) -> Self {
        Diagnostic::new(Severity::Warning, pos, message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.pos.is_real() {
            write!(f, "{} at {}: {}", self.severity, self.pos, self.message)
        } else {
            write!(f, "{}: {}", self.severity, self.message)
        }
    }
}
