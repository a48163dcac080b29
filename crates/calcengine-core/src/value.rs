//! Decimal helpers and the built-in numeric constants.

use once_cell::sync::Lazy;
use rust_decimal::Decimal;

use crate::error::{EngineError, Result};

/// π to 28 significant digits, the full precision of the decimal type.
pub static PI: Lazy<Decimal> =
    Lazy::new(|| Decimal::from_i128_with_scale(3_141_592_653_589_793_238_462_643_383, 27));

/// Euler's number to 28 significant digits.
pub static E: Lazy<Decimal> =
    Lazy::new(|| Decimal::from_i128_with_scale(2_718_281_828_459_045_235_360_287_471, 27));

/// Parse a numeric literal, accepting both plain (`12.5`) and scientific
/// (`1.25e1`) notation. Values outside the representable decimal range are
/// a domain error.
pub fn parse_decimal(text: &str) -> Result<Decimal> {
    let parsed = if text.contains(['e', 'E']) {
        Decimal::from_scientific(text)
    } else {
        text.parse::<Decimal>()
    };
    parsed.map_err(|_| EngineError::domain(format!("numeric literal '{text}' is out of range")))
}

/// Canonical plain-text rendering of a value, trailing fractional zeros
/// stripped. This is the textual form the radix lenses reinterpret.
pub fn to_plain_string(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Boolean interpretation shared by the logical operators: any non-zero
/// value is true.
pub fn is_truthy(value: Decimal) -> bool {
    !value.is_zero()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn constants_have_expected_leading_digits() {
        assert!(PI.to_string().starts_with("3.14159265358979323846"));
        assert!(E.to_string().starts_with("2.71828182845904523536"));
    }

    #[test]
    fn parses_plain_and_scientific_literals() {
        assert_eq!(parse_decimal("12.5").unwrap(), Decimal::new(125, 1));
        assert_eq!(parse_decimal("1.25e1").unwrap(), Decimal::new(125, 1));
        assert_eq!(parse_decimal("-3e-2").unwrap(), Decimal::new(-3, 2));
    }

    #[test]
    fn out_of_range_literal_is_a_domain_error() {
        assert!(matches!(
            parse_decimal("1e100"),
            Err(EngineError::Domain { .. })
        ));
    }

    #[test]
    fn plain_string_strips_trailing_zeros() {
        assert_eq!(to_plain_string("4.2500".parse().unwrap()), "4.25");
        assert_eq!(to_plain_string("5.000".parse().unwrap()), "5");
    }
}
