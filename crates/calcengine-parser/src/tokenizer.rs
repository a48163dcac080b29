//! Expression tokenizer.
//!
//! Scans a normalized expression string into typed tokens. Two rules do
//! the heavy lifting:
//!
//! - A `-` is folded into the following number as a sign only when the
//!   previous token was `(`, `,`, an operator, or absent, and the next
//!   character is a digit. Everywhere else `-` is an ordinary binary
//!   operator, so `3-2` subtracts while `3*-2` multiplies by a negative
//!   literal.
//! - Exponent signs are consumed only immediately after the `e`/`E`
//!   marker inside the same number, so the `+` in `2e3+1` is never
//!   swallowed by the literal.
//!
//! The hex variant ([`Lexer::hex_digits`]) additionally treats the
//! uppercase letters `A`-`F` as digits, which both extends numbers and
//! lets a literal like `B2` start with a letter. It is selected by the
//! caller when lexing for the hexadecimal evaluation lens.

use calcengine_core::{EngineError, Result};
use calcengine_registry::Registry;

use crate::token::{Token, TokenKind};

/// Tokenize an expression with the standard decimal number grammar.
pub fn tokenize(input: &str, registry: &Registry) -> Result<Vec<Token>> {
    Lexer::new(input, registry).run()
}

/// Tokenize an expression accepting `A`-`F` as number digits.
pub fn tokenize_hex(input: &str, registry: &Registry) -> Result<Vec<Token>> {
    let mut lexer = Lexer::new(input, registry);
    lexer.hex_digits(true);
    lexer.run()
}

/// Character-at-a-time scanner over an expression string.
pub struct Lexer<'a> {
    chars: Vec<char>,
    cursor: usize,
    registry: &'a Registry,
    hex_digits: bool,
    previous: Option<TokenKind>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &str, registry: &'a Registry) -> Self {
        Self {
            chars: input.chars().collect(),
            cursor: 0,
            registry,
            hex_digits: false,
            previous: None,
        }
    }

    /// Accept uppercase `A`-`F` as number digits.
    pub fn hex_digits(&mut self, enabled: bool) {
        self.hex_digits = enabled;
    }

    fn run(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            self.previous = Some(token.kind());
            tokens.push(token);
        }
        log::trace!("lexed {} token(s)", tokens.len());
        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Option<Token>> {
        while self.peek().is_some_and(char::is_whitespace) {
            self.cursor += 1;
        }
        let Some(c) = self.peek() else {
            return Ok(None);
        };
        let start = self.cursor + 1;

        if self.is_digit(c) || (c == '.' && self.peek_at(1).is_some_and(|n| self.is_digit(n))) {
            return self.number(start, false).map(Some);
        }
        if c == '-' && self.minus_is_sign() {
            return self.number(start, true).map(Some);
        }
        if c.is_alphabetic() || c == '_' {
            return Ok(Some(self.identifier(start)));
        }
        match c {
            '(' => Ok(Some(self.punctuation(TokenKind::LeftParen, start))),
            ')' => Ok(Some(self.punctuation(TokenKind::RightParen, start))),
            ',' => Ok(Some(self.punctuation(TokenKind::Comma, start))),
            _ => self.operator(start).map(Some),
        }
    }

    /// Whether a `-` at the cursor is a numeric sign rather than the
    /// subtraction operator.
    fn minus_is_sign(&self) -> bool {
        let position_allows = matches!(
            self.previous,
            None | Some(TokenKind::LeftParen) | Some(TokenKind::Comma) | Some(TokenKind::Operator)
        );
        position_allows && self.peek_at(1).is_some_and(|n| self.is_digit(n))
    }

    fn number(&mut self, start: usize, signed: bool) -> Result<Token> {
        let mut text = String::new();
        if signed {
            text.push('-');
            self.cursor += 1;
        }

        let mut seen_point = false;
        let mut in_exponent = false;
        while let Some(c) = self.peek() {
            if self.is_digit(c) {
                text.push(c);
            } else if c == '.' && !seen_point && !in_exponent {
                seen_point = true;
                text.push(c);
            } else if (c == 'e' || c == 'E') && !self.hex_digits && !in_exponent {
                in_exponent = true;
                text.push(c);
                self.cursor += 1;
                // a sign is part of the literal only right after the marker
                if let Some(sign) = self.peek() {
                    if sign == '+' || sign == '-' {
                        text.push(sign);
                        self.cursor += 1;
                    }
                }
                if !self.peek().is_some_and(|d| d.is_ascii_digit()) {
                    return Err(EngineError::Lex {
                        text,
                        position: start,
                    });
                }
                continue;
            } else {
                break;
            }
            self.cursor += 1;
        }
        Ok(Token::new(TokenKind::Number, text, start))
    }

    fn identifier(&mut self, start: usize) -> Token {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                text.push(c);
                self.cursor += 1;
            } else {
                break;
            }
        }
        Token::new(TokenKind::Identifier, text, start)
    }

    fn punctuation(&mut self, kind: TokenKind, start: usize) -> Token {
        let c = self.chars[self.cursor];
        self.cursor += 1;
        Token::new(kind, c.to_string(), start)
    }

    /// Longest match against the registered operator symbols.
    fn operator(&mut self, start: usize) -> Result<Token> {
        let limit = self.registry.max_operator_len().min(self.chars.len() - self.cursor);
        for length in (1..=limit).rev() {
            let candidate: String = self.chars[self.cursor..self.cursor + length].iter().collect();
            if self.registry.is_operator(&candidate) {
                self.cursor += length;
                return Ok(Token::new(TokenKind::Operator, candidate, start));
            }
        }
        Err(EngineError::Lex {
            text: self.unknown_run(),
            position: start,
        })
    }

    /// The maximal run of symbol characters at the cursor, reported in a
    /// lex error.
    fn unknown_run(&self) -> String {
        self.chars[self.cursor..]
            .iter()
            .take_while(|c| {
                !c.is_whitespace()
                    && !c.is_alphanumeric()
                    && !matches!(c, '_' | '(' | ')' | ',')
            })
            .collect()
    }

    fn is_digit(&self, c: char) -> bool {
        c.is_ascii_digit() || (self.hex_digits && ('A'..='F').contains(&c))
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.cursor).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.cursor + offset).copied()
    }
}
