//! Token types for the Rill lexer.
//!
//! The scope engine and diagnostics only need three things from a token:
//! its discriminant, its literal text, and where it came from.

use std::fmt;

use super::Position;

/// Token discriminant.
///
/// Closed set of lexeme classes produced by the lexer. Trivia kinds
/// (`Whitespace`, `Comment`) are filtered out before parsing but kept in
/// the enum so the lexer and tooling share one vocabulary.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    Eof,
    Whitespace,
    Comment,
    Identifier,
    Keyword,
    Operator,
    Int,
    Float,
    Str,
    Bool,
    Error,
}

impl TokenKind {
    /// Whether this kind names a user-written identifier.
    #[inline]
    pub const fn is_identifier(self) -> bool {
        matches!(self, TokenKind::Identifier)
    }

    /// Whether this kind is trivia the parser never sees.
    #[inline]
    pub const fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Comment)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Eof => "eof",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Comment => "comment",
            TokenKind::Identifier => "identifier",
            TokenKind::Keyword => "keyword",
            TokenKind::Operator => "operator",
            TokenKind::Int => "int",
            TokenKind::Float => "float",
            TokenKind::Str => "string",
            TokenKind::Bool => "bool",
            TokenKind::Error => "error",
        };
        f.write_str(name)
    }
}

/// A token with its literal text and source position.
///
/// `kind` is deliberately public and mutable: resolving an anonymous
/// function's name rewrites its marker token into an identifier so that
/// downstream passes treat named and anonymous functions uniformly.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub pos: Position,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, text: impl Into<String>, pos: Position) -> Self {
        Token {
            kind,
            text: text.into(),
            pos,
        }
    }

    /// Create an identifier token.
    pub fn identifier(text: impl Into<String>, pos: Position) -> Self {
        Token::new(TokenKind::Identifier, text, pos)
    }

    /// Create a token with no source location, for generated code.
    pub fn synthesized(kind: TokenKind, text: impl Into<String>) -> Self {
        Token::new(kind, text, Position::SYNTHESIZED)
    }

    /// Whether this token is a user-written identifier.
    #[inline]
    pub fn is_identifier(&self) -> bool {
        self.kind.is_identifier()
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?}) @ {}", self.kind, self.text, self.pos)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
