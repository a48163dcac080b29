//! Infix to postfix conversion and structural validation.
//!
//! The conversion is the classic shunting-yard algorithm with one
//! extension: when a `(` immediately follows a function name, a literal
//! `(` marker is also emitted to the output queue, so the evaluator can
//! find the start of that call's argument list without knowing any
//! arities. Identifiers bound as variables are emitted directly; a bare
//! identifier that matches nothing is parked on the operator stack and
//! only becomes an error if it is still there at the end of input.
//!
//! Validation runs as a second pass over the finished RPN, counting
//! operands per open call scope, so a structurally impossible program
//! (`2 3`, a starved operator, a wrong-arity call) is rejected before
//! evaluation ever starts.

use calcengine_core::{EngineError, Result};
use calcengine_registry::{Arity, Assoc, Registry};
use smallvec::{smallvec, SmallVec};

use crate::program::RpnProgram;
use crate::token::{Token, TokenKind};

type Stack = SmallVec<[Token; 16]>;

/// Convert a token sequence to a validated RPN program.
pub fn to_rpn(tokens: Vec<Token>, registry: &Registry) -> Result<RpnProgram> {
    let mut output: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut stack: Stack = SmallVec::new();
    let mut previous: Option<&Token> = None;

    for token in &tokens {
        match token.kind() {
            TokenKind::Number => output.push(token.clone()),

            TokenKind::Identifier => {
                if registry.is_variable(token.text()) && !registry.is_function(token.text()) {
                    output.push(token.clone());
                } else {
                    // function name, or a free identifier resolved later
                    stack.push(token.clone());
                }
            }

            TokenKind::Comma => {
                if let Some(prev) = previous {
                    if prev.kind() == TokenKind::Operator {
                        return Err(EngineError::MissingOperand {
                            symbol: prev.text().to_string(),
                            position: prev.position(),
                        });
                    }
                }
                // flush the current argument down to the call's paren
                loop {
                    match stack.last() {
                        None => return Err(EngineError::MismatchedParen),
                        Some(top) if top.kind() == TokenKind::LeftParen => break,
                        Some(_) => {}
                    }
                    if let Some(popped) = stack.pop() {
                        output.push(popped);
                    }
                }
            }

            TokenKind::Operator => {
                let operand_before = matches!(
                    previous.map(Token::kind),
                    Some(TokenKind::Number)
                        | Some(TokenKind::Identifier)
                        | Some(TokenKind::RightParen)
                );
                if !operand_before {
                    return Err(EngineError::MissingOperand {
                        symbol: token.text().to_string(),
                        position: token.position(),
                    });
                }
                let operator = registry.operator(token.text()).ok_or_else(|| {
                    EngineError::UnknownSymbol {
                        name: token.text().to_string(),
                    }
                })?;
                while let Some(top) = stack.last() {
                    if top.kind() != TokenKind::Operator {
                        break;
                    }
                    let pops = registry.operator(top.text()).is_some_and(|above| {
                        match operator.assoc() {
                            Assoc::Left => operator.precedence() <= above.precedence(),
                            Assoc::Right => operator.precedence() < above.precedence(),
                        }
                    });
                    if !pops {
                        break;
                    }
                    if let Some(popped) = stack.pop() {
                        output.push(popped);
                    }
                }
                stack.push(token.clone());
            }

            TokenKind::LeftParen => {
                if let Some(prev) = previous {
                    if prev.kind() == TokenKind::Identifier && registry.is_function(prev.text()) {
                        // call-start marker for the evaluator
                        output.push(token.clone());
                    }
                }
                stack.push(token.clone());
            }

            TokenKind::RightParen => {
                loop {
                    match stack.pop() {
                        None => return Err(EngineError::MismatchedParen),
                        Some(top) if top.kind() == TokenKind::LeftParen => break,
                        Some(top) => output.push(top),
                    }
                }
                // a function name below the paren completes a call
                let call = stack
                    .last()
                    .is_some_and(|top| {
                        top.kind() == TokenKind::Identifier && registry.is_function(top.text())
                    });
                if call {
                    if let Some(name) = stack.pop() {
                        output.push(name);
                    }
                }
            }
        }
        previous = Some(token);
    }

    while let Some(top) = stack.pop() {
        match top.kind() {
            TokenKind::Operator => output.push(top),
            TokenKind::LeftParen | TokenKind::RightParen => {
                return Err(EngineError::MismatchedParen)
            }
            _ => {
                return Err(EngineError::UnknownSymbol {
                    name: top.text().to_string(),
                })
            }
        }
    }

    if output.is_empty() {
        return Err(EngineError::EmptyExpression);
    }
    validate(&output, registry)?;
    log::trace!("compiled to {} RPN token(s)", output.len());
    Ok(RpnProgram::new(output))
}

/// Structural check over the RPN: every operator must find two operands,
/// every fixed-arity call its declared argument count, and the whole
/// program must leave exactly one value.
fn validate(tokens: &[Token], registry: &Registry) -> Result<()> {
    let mut scopes: SmallVec<[usize; 8]> = smallvec![0];

    for token in tokens {
        match token.kind() {
            TokenKind::Number => bump(&mut scopes)?,

            TokenKind::LeftParen => scopes.push(0),

            TokenKind::Operator => {
                let count = scopes.last_mut().ok_or(EngineError::MismatchedParen)?;
                if *count < 2 {
                    return Err(EngineError::TooFewOperands {
                        symbol: token.text().to_string(),
                    });
                }
                *count -= 1;
            }

            TokenKind::Identifier => {
                if let Some(function) = registry.function(token.text()) {
                    let arguments = scopes.pop().ok_or(EngineError::MismatchedParen)?;
                    if scopes.is_empty() {
                        return Err(EngineError::MismatchedParen);
                    }
                    if let Arity::Fixed(expected) = function.arity() {
                        if arguments != expected {
                            return Err(EngineError::ArityMismatch {
                                function: function.name().to_string(),
                                expected,
                                actual: arguments,
                                variadic: false,
                            });
                        }
                    }
                    bump(&mut scopes)?;
                } else {
                    bump(&mut scopes)?;
                }
            }

            // never present in RPN output
            TokenKind::RightParen | TokenKind::Comma => {
                return Err(EngineError::MismatchedParen)
            }
        }
    }

    if scopes.len() != 1 {
        return Err(EngineError::MismatchedParen);
    }
    match scopes[0] {
        1 => Ok(()),
        0 => Err(EngineError::EmptyExpression),
        _ => Err(EngineError::TooManyOperands),
    }
}

fn bump(scopes: &mut SmallVec<[usize; 8]>) -> Result<()> {
    let count = scopes.last_mut().ok_or(EngineError::MismatchedParen)?;
    *count += 1;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn rpn(input: &str) -> Result<String> {
        let registry = Registry::new();
        let tokens = tokenize(input, &registry)?;
        to_rpn(tokens, &registry).map(|program| program.to_string())
    }

    #[rstest]
    #[case("2+3*4", "2 3 4 * +")]
    #[case("(2+3)*4", "2 3 + 4 *")]
    #[case("8-3-2", "8 3 - 2 -")]
    #[case("2^3^2", "2 3 2 ^ ^")]
    #[case("1<2 && 3>2", "1 2 < 3 2 > &&")]
    fn precedence_and_associativity(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(rpn(input).unwrap(), expected);
    }

    #[rstest]
    #[case("SQRT(16)", "( 16 SQRT")]
    #[case("MAX(1,5,3)", "( 1 5 3 MAX")]
    #[case("MAX(1, MIN(2,3))", "( 1 ( 2 3 MIN MAX")]
    #[case("IF(1,5,1/0)", "( 1 5 1 0 / IF")]
    #[case("SIN(90)+1", "( 90 SIN 1 +")]
    fn calls_carry_a_scope_marker(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(rpn(input).unwrap(), expected);
    }

    #[test]
    fn bound_variables_are_emitted_directly() {
        assert_eq!(rpn("PI*2").unwrap(), "PI 2 *");
    }

    #[test]
    fn free_identifiers_left_on_the_stack_are_unknown_symbols() {
        assert_eq!(
            rpn("x+1"),
            Err(EngineError::UnknownSymbol { name: "x".into() })
        );
    }

    #[rstest]
    #[case("(2+3")]
    #[case("2+3)")]
    #[case("1,2")]
    #[case("MAX(1,5")]
    fn unbalanced_parens_are_rejected(#[case] input: &str) {
        assert_eq!(rpn(input), Err(EngineError::MismatchedParen));
    }

    #[test]
    fn consecutive_operators_are_a_missing_operand() {
        assert_eq!(
            rpn("2+*3"),
            Err(EngineError::MissingOperand {
                symbol: "*".into(),
                position: 3
            })
        );
        assert!(matches!(rpn("*2"), Err(EngineError::MissingOperand { .. })));
        assert!(matches!(
            rpn("MAX(1+,2)"),
            Err(EngineError::MissingOperand { .. })
        ));
    }

    #[test]
    fn adjacent_operands_are_too_many() {
        assert_eq!(rpn("2(3)"), Err(EngineError::TooManyOperands));
    }

    #[test]
    fn starved_operators_are_too_few() {
        assert_eq!(
            rpn("(2+)"),
            Err(EngineError::TooFewOperands { symbol: "+".into() })
        );
    }

    #[test]
    fn wrong_fixed_arity_fails_at_parse_time() {
        assert_eq!(
            rpn("SQRT(1,2)"),
            Err(EngineError::ArityMismatch {
                function: "SQRT".into(),
                expected: 1,
                actual: 2,
                variadic: false,
            })
        );
        assert!(rpn("IF(1,2)").is_err());
    }

    #[test]
    fn variadic_arity_is_not_checked_at_parse_time() {
        assert!(rpn("MAX()").is_ok());
        assert!(rpn("MAX(1,2,3,4)").is_ok());
    }

    #[test]
    fn empty_input_is_an_empty_expression() {
        assert_eq!(rpn(""), Err(EngineError::EmptyExpression));
        assert_eq!(rpn("   "), Err(EngineError::EmptyExpression));
    }
}
