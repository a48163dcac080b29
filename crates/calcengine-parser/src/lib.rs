//! Expression compilation: tokenizer, shunting-yard conversion and
//! structural validation.
//!
//! `parse` turns an infix expression string into an immutable
//! [`RpnProgram`]; all syntactic problems are reported here, so a program
//! that parses can only fail at evaluation time for runtime reasons
//! (domain errors, variadic arity, unbound variables).

pub mod program;
pub mod shunting_yard;
pub mod token;
pub mod tokenizer;

pub use program::RpnProgram;
pub use token::{Token, TokenKind};

use calcengine_core::Result;
use calcengine_registry::Registry;

/// Compile an infix expression into a validated RPN program.
pub fn parse(expression: &str, registry: &Registry) -> Result<RpnProgram> {
    let tokens = tokenizer::tokenize(expression, registry)?;
    shunting_yard::to_rpn(tokens, registry)
}

/// Compile an infix expression whose number literals may contain the hex
/// digits `A`-`F`, for evaluation under the hexadecimal lens.
pub fn parse_hex(expression: &str, registry: &Registry) -> Result<RpnProgram> {
    let tokens = tokenizer::tokenize_hex(expression, registry)?;
    shunting_yard::to_rpn(tokens, registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_and_parse_hex_share_the_grammar() {
        let registry = Registry::new();
        assert_eq!(parse("2+3", &registry).unwrap().to_string(), "2 3 +");
        assert_eq!(
            parse_hex("6B - 3E", &registry).unwrap().to_string(),
            "6B 3E -"
        );
    }
}
