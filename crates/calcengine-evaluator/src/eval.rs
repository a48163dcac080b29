//! Tree evaluation under the decimal and radix lenses.

use calcengine_core::value::{parse_decimal, to_plain_string};
use calcengine_core::{EngineError, EvalContext, Result};
use calcengine_parser::RpnProgram;
use calcengine_radix::Radix;
use calcengine_registry::{Arguments, Registry, Thunk};
use rust_decimal::Decimal;

use crate::node::{self, Node};
use crate::result::{Lens, NumericResult};

/// Fractional digits kept when a radix lens re-encodes an operation
/// result. Many decimal fractions do not terminate in another base, so
/// the encoder needs an explicit bound.
pub const RADIX_FRACTION_DIGITS: usize = 5;

/// Evaluate a program under a lens.
///
/// The program is folded into its evaluation tree and the tree is walked
/// once; nothing is cached between calls, so variable rebinding between
/// evaluations is picked up and an unchanged registry yields bit-identical
/// results.
pub fn evaluate(
    program: &RpnProgram,
    registry: &Registry,
    ctx: &EvalContext,
    lens: Lens,
) -> Result<NumericResult> {
    log::trace!("evaluating under the {lens:?} lens");
    match lens.radix() {
        None => evaluate_decimal(program, registry, ctx).map(NumericResult::Decimal),
        Some(radix) => {
            let root = node::build(program, registry)?;
            let digits = eval_radix(&root, registry, ctx, radix)?;
            Ok(NumericResult::Radix { radix, digits })
        }
    }
}

/// Evaluate a program under the decimal lens, yielding the bare value
/// (normalized, trailing fractional zeros stripped).
pub fn evaluate_decimal(
    program: &RpnProgram,
    registry: &Registry,
    ctx: &EvalContext,
) -> Result<Decimal> {
    let root = node::build(program, registry)?;
    eval_decimal(&root, registry, ctx).map(|value| value.normalize())
}

/// Recursive decimal evaluation of a subtree.
pub fn eval_decimal(node: &Node, registry: &Registry, ctx: &EvalContext) -> Result<Decimal> {
    match node {
        Node::Literal(text) => parse_decimal(text),

        Node::Variable(name) => registry
            .variable(name)
            .ok_or_else(|| EngineError::UnknownSymbol { name: name.clone() }),

        Node::Apply { symbol, left, right } => {
            let operator = registry
                .operator(symbol)
                .ok_or_else(|| EngineError::UnknownSymbol {
                    name: symbol.clone(),
                })?;
            // operands are forced in source order
            let lhs = eval_decimal(left, registry, ctx)?;
            let rhs = eval_decimal(right, registry, ctx)?;
            operator.apply(lhs, rhs, ctx)
        }

        Node::Call { name, args } => {
            let function = registry
                .function(name)
                .ok_or_else(|| EngineError::UnknownSymbol { name: name.clone() })?
                .clone();
            let thunks: Vec<NodeThunk<'_>> = args
                .iter()
                .map(|arg| NodeThunk {
                    node: arg,
                    registry,
                    ctx,
                })
                .collect();
            let refs: Vec<&dyn Thunk> = thunks.iter().map(|t| t as &dyn Thunk).collect();
            function.invoke(&Arguments::new(&refs), ctx)
        }
    }
}

/// An unevaluated argument subtree. Forcing it runs the decimal
/// evaluation of that subtree; a function that never forces a thunk never
/// executes the branch behind it.
struct NodeThunk<'a> {
    node: &'a Node,
    registry: &'a Registry,
    ctx: &'a EvalContext,
}

impl Thunk for NodeThunk<'_> {
    fn force(&self) -> Result<Decimal> {
        eval_decimal(self.node, self.registry, self.ctx)
    }
}

/// Recursive evaluation under a radix lens. Every subtree produces digit
/// text in the target base:
///
/// - a literal contributes its digits verbatim (checked against the
///   radix alphabet);
/// - an operator application decodes both operand texts, applies the
///   operator in decimal, and re-encodes the result;
/// - variables and function calls are computed in decimal and their
///   canonical decimal text is reinterpreted as radix digits by the
///   consuming operation.
pub fn eval_radix(
    node: &Node,
    registry: &Registry,
    ctx: &EvalContext,
    radix: Radix,
) -> Result<String> {
    match node {
        Node::Literal(text) => {
            calcengine_radix::decode(text, radix)?;
            Ok(text.clone())
        }

        Node::Variable(_) | Node::Call { .. } => {
            Ok(to_plain_string(eval_decimal(node, registry, ctx)?))
        }

        Node::Apply { symbol, left, right } => {
            let operator = registry
                .operator(symbol)
                .ok_or_else(|| EngineError::UnknownSymbol {
                    name: symbol.clone(),
                })?;
            let lhs = calcengine_radix::decode(&eval_radix(left, registry, ctx, radix)?, radix)?;
            let rhs = calcengine_radix::decode(&eval_radix(right, registry, ctx, radix)?, radix)?;
            let value = operator.apply(lhs, rhs, ctx)?;
            Ok(calcengine_radix::encode(value, radix, RADIX_FRACTION_DIGITS))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calcengine_parser::{parse, parse_hex};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn eval(input: &str) -> Result<NumericResult> {
        let registry = Registry::new();
        let program = parse(input, &registry)?;
        evaluate(&program, &registry, &EvalContext::default(), Lens::Decimal)
    }

    fn eval_value(input: &str) -> Decimal {
        eval(input).unwrap().as_decimal().unwrap()
    }

    #[rstest]
    #[case("2+3*4", "14")]
    #[case("(2+3)*4", "20")]
    #[case("8-3-2", "3")]
    #[case("2^3^2", "512")]
    #[case("10%3", "1")]
    #[case("1/8", "0.125")]
    #[case("3*-2", "-6")]
    #[case("2+-3", "-1")]
    #[case("1<2 && 2<3", "1")]
    #[case("IF(2>1, 10, 20)", "10")]
    #[case("MAX(1,5,3)", "5")]
    #[case("MIN(4,MAX(1,2),8)", "2")]
    #[case("SQRT(16)", "4")]
    #[case("NOT(0)", "1")]
    #[case("FAC(5)", "120")]
    fn decimal_lens(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(eval_value(input), dec(expected));
    }

    #[test]
    fn results_strip_trailing_fractional_zeros() {
        assert_eq!(eval("2.50+2.50").unwrap().to_string(), "5");
        assert_eq!(eval("1.5*3").unwrap().to_string(), "4.5");
    }

    #[test]
    fn untaken_branches_are_never_forced() {
        assert_eq!(eval_value("IF(1, 5, 1/0)"), dec("5"));
        assert_eq!(eval_value("IF(0, 1/0, 7)"), dec("7"));
    }

    #[test]
    fn taken_branch_errors_still_surface() {
        assert!(matches!(
            eval("IF(0, 5, 1/0)"),
            Err(EngineError::Domain { .. })
        ));
    }

    #[test]
    fn variadic_minimum_is_checked_at_evaluation() {
        assert!(matches!(
            eval("MAX()"),
            Err(EngineError::ArityMismatch { variadic: true, .. })
        ));
    }

    #[test]
    fn variables_are_read_at_evaluation_time() {
        let mut registry = Registry::new();
        registry.set_variable("total", dec("10"));
        let program = parse("total+1", &registry).unwrap();
        let ctx = EvalContext::default();

        let first = evaluate(&program, &registry, &ctx, Lens::Decimal).unwrap();
        assert_eq!(first.as_decimal(), Some(dec("11")));

        registry.set_variable("total", dec("20"));
        let second = evaluate(&program, &registry, &ctx, Lens::Decimal).unwrap();
        assert_eq!(second.as_decimal(), Some(dec("21")));
    }

    #[test]
    fn reevaluation_is_bit_identical() {
        let registry = Registry::new();
        let program = parse("SQRT(2)+SIN(45)", &registry).unwrap();
        let ctx = EvalContext::default();
        let first = evaluate(&program, &registry, &ctx, Lens::Decimal).unwrap();
        let second = evaluate(&program, &registry, &ctx, Lens::Decimal).unwrap();
        assert_eq!(first, second);
    }

    #[rstest]
    #[case(Lens::Hex, "6B - 3E", "2D")]
    #[case(Lens::Hex, "A * 2", "14")]
    #[case(Lens::Binary, "101 + 11", "1000")]
    #[case(Lens::Binary, "1 / 10", "0.1")]
    #[case(Lens::Octal, "17 + 1", "20")]
    fn radix_lenses(#[case] lens: Lens, #[case] input: &str, #[case] expected: &str) {
        let registry = Registry::new();
        let program = match lens {
            Lens::Hex => parse_hex(input, &registry).unwrap(),
            _ => parse(input, &registry).unwrap(),
        };
        let result = evaluate(&program, &registry, &EvalContext::default(), lens).unwrap();
        assert_eq!(result.to_string(), expected);
    }

    #[test]
    fn radix_literals_must_fit_the_alphabet() {
        let registry = Registry::new();
        let program = parse("2+3", &registry).unwrap();
        assert!(matches!(
            evaluate(&program, &registry, &EvalContext::default(), Lens::Binary),
            Err(EngineError::RadixFormat { .. })
        ));
    }

    #[test]
    fn radix_lens_respects_precedence() {
        let registry = Registry::new();
        let program = parse("10+10*10", &registry).unwrap();
        // 2 + 2*2 = 6 in binary
        let result = evaluate(&program, &registry, &EvalContext::default(), Lens::Binary).unwrap();
        assert_eq!(result.to_string(), "110");
    }
}
