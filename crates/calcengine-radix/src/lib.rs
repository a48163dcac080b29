//! Bidirectional conversions between decimal values and binary, octal or
//! hexadecimal digit strings.
//!
//! Both directions handle the integer and fractional halves separately:
//! encoding uses repeated division for the integer part and repeated
//! multiplication for the fraction (bounded by an explicit digit limit,
//! since many decimal fractions do not terminate in another base);
//! decoding is a positional weighted sum. The converters are pure and
//! stateless; they are used by the radix evaluation lenses and exposed on
//! their own for plain numeric display.
//!
//! A leading or trailing `-` marks a negative numeral on decode; encode
//! always emits a leading `-`. Digit strings with a character outside the
//! radix alphabet fail with [`EngineError::RadixFormat`].

use calcengine_core::{EngineError, Result};
use rust_decimal::prelude::*;
use rust_decimal::Decimal;

const DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// A supported non-decimal display base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Radix {
    /// Base 2, digit alphabet `0-1`.
    Binary,
    /// Base 8, digit alphabet `0-7`.
    Octal,
    /// Base 16, digit alphabet `0-9A-F`.
    Hex,
}

impl Radix {
    /// The numeric base of this radix.
    pub const fn base(self) -> u32 {
        match self {
            Radix::Binary => 2,
            Radix::Octal => 8,
            Radix::Hex => 16,
        }
    }

    /// The value of `c` as a digit in this radix, if it is one.
    /// Hex digits are accepted in either case.
    pub fn digit_value(self, c: char) -> Option<u32> {
        let value = c.to_digit(16)?;
        (value < self.base()).then_some(value)
    }
}

impl std::fmt::Display for Radix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.base())
    }
}

/// Encode a decimal value as a digit string in `radix`, keeping at most
/// `fraction_limit` fractional digits.
pub fn encode(value: Decimal, radix: Radix, fraction_limit: usize) -> String {
    if value.is_zero() {
        return "0".to_string();
    }

    let negative = value.is_sign_negative();
    let magnitude = value.abs();
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&encode_magnitude(magnitude.trunc(), radix));

    let mut fraction = magnitude.fract();
    if !fraction.is_zero() {
        out.push('.');
        let base = Decimal::from(radix.base());
        let mut emitted = 0;
        while !fraction.is_zero() && emitted < fraction_limit {
            fraction *= base;
            let digit = fraction.trunc().to_u32().unwrap_or(0);
            out.push(DIGITS[digit as usize] as char);
            fraction = fraction.fract();
            emitted += 1;
        }
    }
    out
}

/// Encode the integer part of a decimal value (the fraction is truncated).
pub fn encode_integer(value: Decimal, radix: Radix) -> String {
    let integer = value.trunc();
    if integer.is_sign_negative() && !integer.is_zero() {
        format!("-{}", encode_magnitude(integer.abs(), radix))
    } else {
        encode_magnitude(integer, radix)
    }
}

/// Repeated division on a non-negative integer-valued decimal.
fn encode_magnitude(integer: Decimal, radix: Radix) -> String {
    let mut quotient = integer.to_u128().unwrap_or(0);
    if quotient == 0 {
        return "0".to_string();
    }
    let base = radix.base() as u128;
    let mut symbols = String::new();
    while quotient > 0 {
        let digit = (quotient % base) as usize;
        symbols.insert(0, DIGITS[digit] as char);
        quotient /= base;
    }
    symbols
}

/// Decode a digit string in `radix` into a decimal value.
pub fn decode(text: &str, radix: Radix) -> Result<Decimal> {
    let (negative, digits) = strip_sign(text, radix)?;

    let (integer_part, fraction_part) = match digits.find('.') {
        None => (digits, ""),
        Some(index) => (&digits[..index], &digits[index + 1..]),
    };

    let base = Decimal::from(radix.base());
    let mut value = decode_digits(integer_part, text, radix)?;

    let mut weight = Decimal::ONE;
    for c in fraction_part.chars() {
        let digit = radix
            .digit_value(c)
            .ok_or_else(|| malformed(text, radix))?;
        weight /= base;
        let term = weight
            .checked_mul(Decimal::from(digit))
            .ok_or_else(EngineError::overflow)?;
        value = value.checked_add(term).ok_or_else(EngineError::overflow)?;
    }

    Ok(if negative { -value } else { value })
}

/// Decode an integer digit string in `radix` (no radix point allowed).
pub fn decode_integer(text: &str, radix: Radix) -> Result<Decimal> {
    let (negative, digits) = strip_sign(text, radix)?;
    let value = decode_digits(digits, text, radix)?;
    Ok(if negative { -value } else { value })
}

/// Positional weighted sum over the integer digits.
fn decode_digits(digits: &str, original: &str, radix: Radix) -> Result<Decimal> {
    let base = Decimal::from(radix.base());
    let mut value = Decimal::ZERO;
    for c in digits.chars() {
        let digit = radix
            .digit_value(c)
            .ok_or_else(|| malformed(original, radix))?;
        value = value
            .checked_mul(base)
            .and_then(|v| v.checked_add(Decimal::from(digit)))
            .ok_or_else(EngineError::overflow)?;
    }
    Ok(value)
}

/// A `-` may appear at either end of the numeral.
fn strip_sign(text: &str, radix: Radix) -> Result<(bool, &str)> {
    let mut digits = text.trim();
    let mut negative = false;
    if let Some(stripped) = digits.strip_prefix('-') {
        negative = true;
        digits = stripped;
    }
    if let Some(stripped) = digits.strip_suffix('-') {
        negative = true;
        digits = stripped;
    }
    if digits.is_empty() {
        return Err(malformed(text, radix));
    }
    Ok((negative, digits))
}

fn malformed(text: &str, radix: Radix) -> EngineError {
    EngineError::RadixFormat {
        text: text.to_string(),
        base: radix.base(),
    }
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

    #[rstest]
    #[case(Radix::Binary, "101", "5")]
    #[case(Radix::Binary, "-101", "-5")]
    #[case(Radix::Octal, "65", "53")]
    #[case(Radix::Hex, "6B", "107")]
    #[case(Radix::Hex, "3E", "62")]
    #[case(Radix::Hex, "ff", "255")]
    fn decodes_integers(#[case] radix: Radix, #[case] text: &str, #[case] expected: &str) {
        assert_eq!(decode(text, radix).unwrap(), dec(expected));
    }

    #[rstest]
    #[case(Radix::Binary, "5", "101")]
    #[case(Radix::Binary, "-5", "-101")]
    #[case(Radix::Octal, "53", "65")]
    #[case(Radix::Hex, "45", "2D")]
    #[case(Radix::Hex, "255", "FF")]
    fn encodes_integers(#[case] radix: Radix, #[case] value: &str, #[case] expected: &str) {
        assert_eq!(encode(dec(value), radix, 5), expected);
    }

    #[test]
    fn trailing_minus_marks_negative() {
        assert_eq!(decode("101-", Radix::Binary).unwrap(), dec("-5"));
    }

    #[test]
    fn fractions_encode_with_integer_part_and_point() {
        assert_eq!(encode(dec("0.5"), Radix::Binary, 5), "0.1");
        assert_eq!(encode(dec("2.75"), Radix::Binary, 5), "10.11");
        assert_eq!(encode(dec("10.6875"), Radix::Hex, 5), "A.B");
    }

    #[test]
    fn non_terminating_fraction_respects_the_digit_limit() {
        // 0.1 has no finite binary representation
        assert_eq!(encode(dec("0.1"), Radix::Binary, 5), "0.00011");
        assert_eq!(encode(dec("0.1"), Radix::Binary, 8), "0.00011001");
    }

    #[test]
    fn fractions_decode() {
        assert_eq!(decode("10.11", Radix::Binary).unwrap(), dec("2.75"));
        assert_eq!(decode("A.B", Radix::Hex).unwrap(), dec("10.6875"));
        assert_eq!(decode(".1", Radix::Binary).unwrap(), dec("0.5"));
    }

    #[rstest]
    #[case(Radix::Binary, "102")]
    #[case(Radix::Octal, "98")]
    #[case(Radix::Hex, "G1")]
    #[case(Radix::Binary, "")]
    #[case(Radix::Binary, "-")]
    fn foreign_digits_are_rejected(#[case] radix: Radix, #[case] text: &str) {
        assert!(matches!(
            decode(text, radix),
            Err(EngineError::RadixFormat { .. })
        ));
    }

    #[rstest]
    #[case(Radix::Binary)]
    #[case(Radix::Octal)]
    #[case(Radix::Hex)]
    fn round_trips_terminating_values(#[case] radix: Radix) {
        for value in ["0", "1", "-1", "5", "53", "107", "2.75", "-10.6875", "0.5"] {
            let v = dec(value);
            assert_eq!(decode(&encode(v, radix, 32), radix).unwrap(), v);
        }
    }

    #[test]
    fn zero_encodes_as_a_single_digit() {
        assert_eq!(encode(Decimal::ZERO, Radix::Hex, 5), "0");
        assert_eq!(encode_integer(Decimal::ZERO, Radix::Binary), "0");
    }
}
