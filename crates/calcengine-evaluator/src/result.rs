//! Evaluation lenses and the values they produce.

use std::fmt;

use calcengine_radix::Radix;
use rust_decimal::Decimal;

/// How operator application touches values during evaluation.
///
/// The decimal lens applies operators directly. The radix lenses
/// reinterpret each operand's digit text in the target base, apply the
/// operator in decimal, and re-encode the result, so one operator table
/// serves all four display radices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lens {
    #[default]
    Decimal,
    Binary,
    Octal,
    Hex,
}

impl Lens {
    /// The radix this lens reinterprets through, if any.
    pub fn radix(self) -> Option<Radix> {
        match self {
            Lens::Decimal => None,
            Lens::Binary => Some(Radix::Binary),
            Lens::Octal => Some(Radix::Octal),
            Lens::Hex => Some(Radix::Hex),
        }
    }
}

/// The outcome of evaluating a program under a lens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumericResult {
    /// A decimal value, trailing fractional zeros stripped.
    Decimal(Decimal),
    /// A digit string in the lens radix.
    Radix { radix: Radix, digits: String },
}

impl NumericResult {
    /// The decimal value, if this result came from the decimal lens.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            NumericResult::Decimal(value) => Some(*value),
            NumericResult::Radix { .. } => None,
        }
    }
}

impl fmt::Display for NumericResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericResult::Decimal(value) => write!(f, "{value}"),
            NumericResult::Radix { digits, .. } => f.write_str(digits),
        }
    }
}
