//! Built-in binary operators: arithmetic, boolean and comparison.
//!
//! Boolean and comparison operators are numeric like everything else:
//! they consume decimals (any non-zero value is true) and produce `1` or
//! `0`, so they compose freely with `IF` and the arithmetic operators.

use calcengine_core::value::is_truthy;
use calcengine_core::{EngineError, EvalContext, Result};
use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use crate::operator::{Assoc, OperatorDef};
use crate::registry::Registry;

pub(crate) fn install(registry: &mut Registry) {
    registry.register_operator(OperatorDef::new("+", 20, Assoc::Left, |lhs, rhs, _| {
        lhs.checked_add(rhs).ok_or_else(EngineError::overflow)
    }));
    registry.register_operator(OperatorDef::new("-", 20, Assoc::Left, |lhs, rhs, _| {
        lhs.checked_sub(rhs).ok_or_else(EngineError::overflow)
    }));
    registry.register_operator(OperatorDef::new("*", 30, Assoc::Left, |lhs, rhs, _| {
        lhs.checked_mul(rhs).ok_or_else(EngineError::overflow)
    }));
    registry.register_operator(OperatorDef::new("/", 30, Assoc::Left, |lhs, rhs, ctx| {
        if rhs.is_zero() {
            return Err(EngineError::domain("division by zero"));
        }
        lhs.checked_div(rhs)
            .map(|quotient| ctx.round(quotient))
            .ok_or_else(EngineError::overflow)
    }));
    registry.register_operator(OperatorDef::new("%", 30, Assoc::Left, |lhs, rhs, _| {
        if rhs.is_zero() {
            return Err(EngineError::domain("remainder by zero"));
        }
        lhs.checked_rem(rhs).ok_or_else(EngineError::overflow)
    }));
    registry.register_operator(OperatorDef::new("^", 40, Assoc::Right, power));

    registry.register_operator(OperatorDef::new("&&", 4, Assoc::Right, |lhs, rhs, _| {
        Ok(bool_to_decimal(is_truthy(lhs) && is_truthy(rhs)))
    }));
    registry.register_operator(OperatorDef::new("||", 2, Assoc::Right, |lhs, rhs, _| {
        Ok(bool_to_decimal(is_truthy(lhs) || is_truthy(rhs)))
    }));

    registry.register_operator(OperatorDef::new(">", 10, Assoc::Right, |lhs, rhs, _| {
        Ok(bool_to_decimal(lhs > rhs))
    }));
    registry.register_operator(OperatorDef::new(">=", 10, Assoc::Right, |lhs, rhs, _| {
        Ok(bool_to_decimal(lhs >= rhs))
    }));
    registry.register_operator(OperatorDef::new("<", 10, Assoc::Right, |lhs, rhs, _| {
        Ok(bool_to_decimal(lhs < rhs))
    }));
    registry.register_operator(OperatorDef::new("<=", 10, Assoc::Right, |lhs, rhs, _| {
        Ok(bool_to_decimal(lhs <= rhs))
    }));

    registry.register_operator(OperatorDef::new("=", 7, Assoc::Right, |lhs, rhs, _| {
        Ok(bool_to_decimal(lhs == rhs))
    }));
    registry.register_operator(OperatorDef::new("==", 7, Assoc::Right, |lhs, rhs, _| {
        Ok(bool_to_decimal(lhs == rhs))
    }));
    registry.register_operator(OperatorDef::new("!=", 7, Assoc::Right, |lhs, rhs, _| {
        Ok(bool_to_decimal(lhs != rhs))
    }));
    registry.register_operator(OperatorDef::new("<>", 7, Assoc::Right, |lhs, rhs, _| {
        Ok(bool_to_decimal(lhs != rhs))
    }));
}

fn bool_to_decimal(value: bool) -> Decimal {
    if value {
        Decimal::ONE
    } else {
        Decimal::ZERO
    }
}

/// The hybrid power rule shared by the `^` operator and `POW`.
///
/// The exponent is split into sign, integer part and fractional remainder:
/// the integer part is raised exactly by squaring, the fractional remainder
/// goes through `f64::powf` and is re-widened, and a negative exponent
/// inverts the combined result under the context rounding policy. Integer
/// powers therefore stay exact.
pub(crate) fn power(base: Decimal, exponent: Decimal, ctx: &EvalContext) -> Result<Decimal> {
    let negative = exponent.is_sign_negative();
    let magnitude = exponent.abs();
    let integer = magnitude.trunc();
    let fraction = magnitude.fract();

    if base.is_sign_negative() && !fraction.is_zero() {
        return Err(EngineError::domain(
            "fractional power of a negative base is undefined",
        ));
    }

    let mut result = integer_power(base, integer)?;
    if !fraction.is_zero() {
        let base_f = base.to_f64().ok_or_else(EngineError::overflow)?;
        let fraction_f = fraction.to_f64().ok_or_else(EngineError::overflow)?;
        let partial = base_f.powf(fraction_f);
        if !partial.is_finite() {
            return Err(EngineError::overflow());
        }
        let partial = Decimal::from_f64(partial).ok_or_else(EngineError::overflow)?;
        result = result.checked_mul(partial).ok_or_else(EngineError::overflow)?;
    }

    if negative {
        if result.is_zero() {
            return Err(EngineError::domain("zero raised to a negative power"));
        }
        result = Decimal::ONE
            .checked_div(result)
            .map(|reciprocal| ctx.round(reciprocal))
            .ok_or_else(EngineError::overflow)?;
    }
    Ok(result)
}

/// Exact exponentiation by squaring for a non-negative integer exponent.
fn integer_power(base: Decimal, exponent: Decimal) -> Result<Decimal> {
    let mut remaining = exponent.to_u64().ok_or_else(EngineError::overflow)?;
    let mut factor = base;
    let mut result = Decimal::ONE;
    while remaining > 0 {
        if remaining & 1 == 1 {
            result = result.checked_mul(factor).ok_or_else(EngineError::overflow)?;
        }
        remaining >>= 1;
        if remaining > 0 {
            factor = factor.checked_mul(factor).ok_or_else(EngineError::overflow)?;
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn apply(symbol: &str, lhs: &str, rhs: &str) -> Result<Decimal> {
        let registry = Registry::new();
        let operator = registry.operator(symbol).unwrap();
        operator.apply(dec(lhs), dec(rhs), &EvalContext::default())
    }

    #[rstest]
    #[case("+", "2", "3", "5")]
    #[case("-", "2", "3", "-1")]
    #[case("*", "2.5", "4", "10.0")]
    #[case("/", "1", "8", "0.125")]
    #[case("%", "10", "3", "1")]
    fn arithmetic(#[case] symbol: &str, #[case] lhs: &str, #[case] rhs: &str, #[case] expected: &str) {
        assert_eq!(apply(symbol, lhs, rhs).unwrap(), dec(expected));
    }

    #[test]
    fn division_by_zero_is_a_domain_error() {
        assert!(matches!(apply("/", "1", "0"), Err(EngineError::Domain { .. })));
        assert!(matches!(apply("%", "1", "0"), Err(EngineError::Domain { .. })));
    }

    #[rstest]
    #[case("2", "10", "1024")]
    #[case("3", "0", "1")]
    #[case("-2", "3", "-8")]
    #[case("2", "-2", "0.25")]
    #[case("10", "20", "100000000000000000000")]
    fn integer_powers_are_exact(#[case] base: &str, #[case] exponent: &str, #[case] expected: &str) {
        assert_eq!(apply("^", base, exponent).unwrap(), dec(expected));
    }

    #[test]
    fn fractional_power_goes_through_the_float_path() {
        let result = apply("^", "2", "0.5").unwrap();
        let error = (result - dec("1.4142135623730951")).abs();
        assert!(error < dec("1e-12"), "got {result}");
    }

    #[test]
    fn fractional_power_of_negative_base_is_rejected() {
        assert!(matches!(
            apply("^", "-2", "0.5"),
            Err(EngineError::Domain { .. })
        ));
    }

    #[rstest]
    #[case("&&", "1", "1", "1")]
    #[case("&&", "1", "0", "0")]
    #[case("||", "0", "2", "1")]
    #[case(">", "3", "2", "1")]
    #[case(">=", "2", "2", "1")]
    #[case("<", "3", "2", "0")]
    #[case("=", "2", "2", "1")]
    #[case("==", "2", "3", "0")]
    #[case("!=", "2", "3", "1")]
    #[case("<>", "2", "2", "0")]
    fn boolean_and_comparison_yield_unit_values(
        #[case] symbol: &str,
        #[case] lhs: &str,
        #[case] rhs: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(apply(symbol, lhs, rhs).unwrap(), dec(expected));
    }
}
