//! The compiled postfix form of an expression.

use std::fmt;

use crate::token::Token;

/// An expression compiled to postfix (RPN) order.
///
/// Produced once per `parse` call and immutable afterwards; the same
/// program can be evaluated any number of times, and variable references
/// inside it are resolved at evaluation time, so rebinding a variable
/// between evaluations changes the result without reparsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpnProgram {
    tokens: Vec<Token>,
}

impl RpnProgram {
    pub(crate) fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    /// The program's tokens in postfix order. `(` tokens are call-start
    /// markers delimiting a function's argument list.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for RpnProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, token) in self.tokens.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}
