//! Rill IR - Shared front-end types for the Rill compiler.
//!
//! Currently holds the token model consumed by the parser, the scope
//! engine, and diagnostics:
//! - [`Position`]: 1-based line/column source location
//! - [`TokenKind`] / [`Token`]: lexeme discriminant, literal text, position

mod pos;
mod token;

pub use pos::Position;
pub use token::{Token, TokenKind};
