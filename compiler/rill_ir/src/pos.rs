//! Source positions.
//!
//! Compact 8-byte line/column representation shared by tokens and
//! diagnostics.

use std::fmt;

/// Source position.
///
/// Layout: 8 bytes total
/// - line: u32 - 1-based source line
/// - column: u32 - 1-based column within the line
///
/// Line 0 is reserved for synthesized tokens that have no source location.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[repr(C)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    /// Position of synthesized tokens (entry function, generated names).
    pub const SYNTHESIZED: Position = Position { line: 0, column: 0 };

    /// Create a new position.
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }

    /// Whether this position refers to real source text.
    #[inline]
    pub const fn is_real(&self) -> bool {
        self.line > 0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({}:{})", self.line, self.column)
    }
}
