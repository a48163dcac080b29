//! Lexical tokens.

use std::fmt;

/// The syntactic category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A numeric literal, possibly signed, fractional or in scientific
    /// notation (or a radix digit string under the hex lexer).
    Number,
    /// A function, variable or constant name.
    Identifier,
    /// A registered operator symbol.
    Operator,
    LeftParen,
    RightParen,
    Comma,
}

/// A typed lexeme with its 1-based character offset in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    text: String,
    position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: usize) -> Self {
        let text = text.into();
        debug_assert!(!text.is_empty());
        Self { kind, text, position }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// 1-based character offset of the token's first character.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
